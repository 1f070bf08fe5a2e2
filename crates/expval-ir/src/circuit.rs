//! High-level circuit builder API.

use rustc_hash::FxHashSet;

use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::instruction::{Instruction, InstructionKind};
use crate::parameter::ParameterExpression;
use crate::qubit::QubitId;

/// A quantum circuit: an ordered list of operations over declared qubits.
///
/// The declared qubit order is the order simulators use to lay out the
/// state vector.
#[derive(Debug, Clone, Default)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Qubits in declaration order.
    qubits: Vec<QubitId>,
    /// Membership index over `qubits`.
    known: FxHashSet<QubitId>,
    /// Operations in application order.
    instructions: Vec<Instruction>,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Create a circuit over qubits `q0 .. q{num_qubits-1}`.
    pub fn with_size(name: impl Into<String>, num_qubits: u32) -> Self {
        let mut circuit = Self::new(name);
        for q in 0..num_qubits {
            circuit.qubits.push(QubitId(q));
            circuit.known.insert(QubitId(q));
        }
        circuit
    }

    /// Create a circuit over an explicit qubit order.
    pub fn with_qubits(
        name: impl Into<String>,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<Self> {
        let mut circuit = Self::new(name);
        for q in qubits {
            circuit.add_qubit(q)?;
        }
        Ok(circuit)
    }

    /// Declare one more qubit at the end of the qubit order.
    pub fn add_qubit(&mut self, qubit: QubitId) -> IrResult<()> {
        if !self.known.insert(qubit) {
            return Err(IrError::DuplicateDeclaration(qubit));
        }
        self.qubits.push(qubit);
        Ok(())
    }

    /// Circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared qubits in order.
    pub fn qubits(&self) -> &[QubitId] {
        &self.qubits
    }

    /// Number of declared qubits.
    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    /// Whether `qubit` is declared in this circuit.
    pub fn contains_qubit(&self, qubit: QubitId) -> bool {
        self.known.contains(&qubit)
    }

    /// Operations in application order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Number of operations.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// True if the circuit has no operations.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Qubits measured by the circuit, in measurement order.
    pub fn measured_qubits(&self) -> Vec<QubitId> {
        self.instructions
            .iter()
            .filter(|inst| inst.is_measure())
            .flat_map(|inst| inst.qubits.iter().copied())
            .collect()
    }

    /// Append an instruction after validating its operands.
    pub fn push(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        self.validate(&instruction)?;
        self.instructions.push(instruction);
        Ok(self)
    }

    /// Append several instructions; stops at the first invalid one.
    pub fn extend(
        &mut self,
        instructions: impl IntoIterator<Item = Instruction>,
    ) -> IrResult<&mut Self> {
        for inst in instructions {
            self.push(inst)?;
        }
        Ok(self)
    }

    fn validate(&self, instruction: &Instruction) -> IrResult<()> {
        let gate_name = || Some(instruction.name().to_string());
        if let InstructionKind::Gate(gate) = &instruction.kind {
            let got = instruction.qubits.len() as u32;
            if got != gate.num_qubits() {
                return Err(IrError::QubitCountMismatch {
                    gate_name: gate.name().to_string(),
                    expected: gate.num_qubits(),
                    got,
                });
            }
        }
        let mut seen = FxHashSet::default();
        for &qubit in &instruction.qubits {
            if !self.known.contains(&qubit) {
                return Err(IrError::QubitNotFound {
                    qubit,
                    gate_name: gate_name(),
                });
            }
            if !seen.insert(qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit,
                    gate_name: gate_name(),
                });
            }
        }
        Ok(())
    }

    fn apply_1q(&mut self, gate: StandardGate, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(gate, qubit))
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply_1q(StandardGate::H, qubit)
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply_1q(StandardGate::X, qubit)
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply_1q(StandardGate::Y, qubit)
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply_1q(StandardGate::Z, qubit)
    }

    /// Apply S gate.
    pub fn s(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply_1q(StandardGate::S, qubit)
    }

    /// Apply S-dagger gate.
    pub fn sdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply_1q(StandardGate::Sdg, qubit)
    }

    /// Apply T gate.
    pub fn t(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply_1q(StandardGate::T, qubit)
    }

    /// Apply T-dagger gate.
    pub fn tdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply_1q(StandardGate::Tdg, qubit)
    }

    /// Apply Rx rotation gate.
    pub fn rx(
        &mut self,
        theta: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        self.apply_1q(StandardGate::Rx(theta.into()), qubit)
    }

    /// Apply Ry rotation gate.
    pub fn ry(
        &mut self,
        theta: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        self.apply_1q(StandardGate::Ry(theta.into()), qubit)
    }

    /// Apply Rz rotation gate.
    pub fn rz(
        &mut self,
        theta: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        self.apply_1q(StandardGate::Rz(theta.into()), qubit)
    }

    // =========================================================================
    // Two-qubit gates
    // =========================================================================

    /// Apply CNOT gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::two_qubit_gate(StandardGate::CX, control, target))
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::two_qubit_gate(StandardGate::CZ, control, target))
    }

    /// Apply SWAP gate.
    pub fn swap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::two_qubit_gate(StandardGate::Swap, q1, q2))
    }

    // =========================================================================
    // Measurement
    // =========================================================================

    /// Measure the given qubits in the computational basis.
    pub fn measure(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<&mut Self> {
        self.push(Instruction::measure(qubits))
    }

    /// Measure every declared qubit, in declaration order.
    pub fn measure_all(&mut self) -> IrResult<&mut Self> {
        let qubits = self.qubits.clone();
        self.measure(qubits)
    }

    // =========================================================================
    // Convenience constructors
    // =========================================================================

    /// Create a Bell state circuit (without measurement).
    pub fn bell() -> IrResult<Self> {
        let mut circuit = Self::with_size("bell", 2);
        circuit.h(QubitId(0))?.cx(QubitId(0), QubitId(1))?;
        Ok(circuit)
    }

    /// Create an n-qubit GHZ state circuit (without measurement).
    pub fn ghz(n: u32) -> IrResult<Self> {
        let mut circuit = Self::with_size(format!("ghz_{n}"), n);
        if n == 0 {
            return Ok(circuit);
        }
        circuit.h(QubitId(0))?;
        for i in 1..n {
            circuit.cx(QubitId(0), QubitId(i))?;
        }
        Ok(circuit)
    }
}
