//! Eval command implementation.
//!
//! `expval eval --input <job.yaml> [--config <config.yaml>] [--seed N] [--format table|json]`

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use console::style;
use serde::Serialize;
use tracing::info;

use expval_expectation::{EvaluatorConfig, Expectation, PauliStringExpectation};
use expval_ir::Circuit;
use expval_sim::StatevectorSampler;

use super::job::JobSpec;

/// One evaluated observable.
#[derive(Debug, Clone, Serialize)]
pub struct ObservableReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub observable: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub samples: Option<usize>,
    pub value: f64,
}

/// Evaluate every observable of a job against its circuit.
pub fn evaluate_all(
    circuit: &Circuit,
    observables: &[PauliStringExpectation],
    sampler: &StatevectorSampler,
    config: &EvaluatorConfig,
) -> Result<Vec<ObservableReport>> {
    observables
        .iter()
        .map(|obs| {
            let value = obs
                .evaluate(circuit, sampler, config)
                .with_context(|| format!("Failed to evaluate {obs}"))?;
            Ok(ObservableReport {
                key: obs.key().map(str::to_string),
                observable: obs.pauli_string().to_string(),
                samples: obs.num_samples(),
                value,
            })
        })
        .collect()
}

/// Execute the eval command.
pub fn execute(input: &Path, config: Option<&Path>, seed: Option<u64>, format: &str) -> Result<()> {
    let config = EvaluatorConfig::load(config).context("Failed to load evaluator configuration")?;
    let job = JobSpec::from_file(input)?.build()?;
    let sampler = seed.map_or_else(StatevectorSampler::new, StatevectorSampler::seeded);

    info!(
        "Evaluating {} observables on '{}' ({} qubits, {} instructions, seed {:?})",
        job.observables.len(),
        job.circuit.name(),
        job.circuit.num_qubits(),
        job.circuit.len(),
        sampler.seed()
    );
    let start = Instant::now();
    let reports = evaluate_all(&job.circuit, &job.observables, &sampler, &config)?;
    let elapsed = start.elapsed();

    match format {
        "json" => {
            let json =
                serde_json::to_string_pretty(&reports).context("JSON serialization failed")?;
            println!("{json}");
        }
        "table" => print_table(&reports, elapsed.as_secs_f64() * 1000.0),
        other => anyhow::bail!("Unknown format: '{other}'. Available: table, json"),
    }

    Ok(())
}

fn print_table(reports: &[ObservableReport], elapsed_ms: f64) {
    println!(
        "\n{} {} observables:",
        style("✓").green().bold(),
        reports.len()
    );

    let width = reports
        .iter()
        .map(|r| r.observable.chars().count())
        .max()
        .unwrap_or(0);
    for report in reports {
        let mode = match report.samples {
            Some(n) => format!("{n} samples"),
            None => "exact".to_string(),
        };
        let key = report
            .key
            .as_deref()
            .map(|k| format!("  [{k}]"))
            .unwrap_or_default();
        println!(
            "  {}  {:+.6}  {}{}",
            style(format!("{:<width$}", report.observable)).cyan(),
            report.value,
            style(mode).dim(),
            key,
        );
    }

    println!("\n  Evaluation time: {} ms", style(format!("{elapsed_ms:.1}")).yellow());
}
