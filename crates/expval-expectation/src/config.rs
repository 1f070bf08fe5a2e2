//! Evaluator configuration.
//!
//! Values come from, highest precedence first:
//! 1. Environment variables (`EXPVAL_` prefix)
//! 2. A YAML configuration file
//! 3. Defaults

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable overriding [`EvaluatorConfig::imaginary_tolerance`].
pub const ENV_IMAG_TOLERANCE: &str = "EXPVAL_IMAG_TOLERANCE";

/// Environment variable overriding [`EvaluatorConfig::parallel_threshold`].
pub const ENV_PARALLEL_THRESHOLD: &str = "EXPVAL_PARALLEL_THRESHOLD";

/// Numeric settings for the exact evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluatorConfig {
    /// Largest imaginary part tolerated in an exact expectation value,
    /// relative to `1 + ‖ψ‖²`.
    #[serde(default = "default_imaginary_tolerance")]
    pub imaginary_tolerance: f64,

    /// Registers with at least this many qubits are reduced on the rayon pool.
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
}

fn default_imaginary_tolerance() -> f64 {
    1e-8
}

fn default_parallel_threshold() -> usize {
    19
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            imaginary_tolerance: default_imaginary_tolerance(),
            parallel_threshold: default_parallel_threshold(),
        }
    }
}

impl EvaluatorConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(format!("{}: {e}", path.as_ref().display())))?;

        let config: EvaluatorConfig = serde_yaml_ng::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Defaults with environment overrides applied.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().apply_env()
    }

    /// Load with precedence: file (if given), then environment overrides.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        match config_file {
            Some(path) => Self::from_file(path)?.apply_env(),
            None => Self::from_env(),
        }
    }

    /// Override fields from `EXPVAL_*` environment variables.
    pub fn apply_env(self) -> Result<Self, ConfigError> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Override fields from a variable lookup. Unset variables leave the
    /// corresponding field unchanged; unparsable ones are an error.
    pub fn apply_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(v) = lookup(ENV_IMAG_TOLERANCE) {
            self.imaginary_tolerance = v.trim().parse().map_err(|_| {
                ConfigError::ParseError(format!("{ENV_IMAG_TOLERANCE}={v} is not a number"))
            })?;
        }
        if let Some(v) = lookup(ENV_PARALLEL_THRESHOLD) {
            self.parallel_threshold = v.trim().parse().map_err(|_| {
                ConfigError::ParseError(format!(
                    "{ENV_PARALLEL_THRESHOLD}={v} is not a non-negative integer"
                ))
            })?;
        }
        self.validate()?;
        Ok(self)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.imaginary_tolerance.is_finite() || self.imaginary_tolerance < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "imaginary_tolerance must be a finite non-negative number, got {}",
                self.imaginary_tolerance
            )));
        }
        if self.parallel_threshold >= usize::BITS as usize {
            return Err(ConfigError::ValidationError(format!(
                "parallel_threshold must be below {}, got {}",
                usize::BITS,
                self.parallel_threshold
            )));
        }
        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let pairs: Vec<(String, String)> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| {
            pairs
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.clone())
        }
    }

    #[test]
    fn test_default_config() {
        let config = EvaluatorConfig::default();
        assert_eq!(config.parallel_threshold, 19);
        assert!((config.imaginary_tolerance - 1e-8).abs() < f64::EPSILON);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "parallel_threshold: 4").unwrap();
        let config = EvaluatorConfig::from_file(file.path()).unwrap();
        assert_eq!(config.parallel_threshold, 4);
        assert_eq!(
            config.imaginary_tolerance,
            EvaluatorConfig::default().imaginary_tolerance
        );
    }

    #[test]
    fn test_from_file_errors() {
        assert!(matches!(
            EvaluatorConfig::from_file("/nonexistent/expval.yaml"),
            Err(ConfigError::IoError(_))
        ));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "imaginary_tolerance: -1.0").unwrap();
        assert!(matches!(
            EvaluatorConfig::from_file(file.path()),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_overrides() {
        let config = EvaluatorConfig::default()
            .apply_overrides(env(&[(ENV_PARALLEL_THRESHOLD, "3")]))
            .unwrap();
        assert_eq!(config.parallel_threshold, 3);
        assert_eq!(
            config.imaginary_tolerance,
            EvaluatorConfig::default().imaginary_tolerance
        );

        let bad = EvaluatorConfig::default().apply_overrides(env(&[(ENV_IMAG_TOLERANCE, "tiny")]));
        assert!(matches!(bad, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_load_without_file_matches_env() {
        let loaded = EvaluatorConfig::load(None);
        let from_env = EvaluatorConfig::from_env();
        match (loaded, from_env) {
            (Ok(a), Ok(b)) => assert_eq!(a, b),
            (a, b) => assert_eq!(a.is_err(), b.is_err()),
        }
    }

    #[test]
    fn test_validate_rejects_nan() {
        let config = EvaluatorConfig {
            imaginary_tolerance: f64::NAN,
            ..EvaluatorConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
