//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - expectation values of Pauli-string observables",
        style("expval").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  expval-ir           Qubits, gates and circuits");
    println!("  expval-pauli        Pauli algebra, rotations and Pauli strings");
    println!("  expval-sim          Statevector simulation and sampling");
    println!("  expval-expectation  Exact and sampled expectation values");
    println!("  expval-cli          Command-line interface");
    println!();
    println!("License: {}", style(env!("CARGO_PKG_LICENSE")).dim());
}
