use shared::models::DEFAULT_VOLUMETRIC_DIVISOR;

use super::error::{EngineResult, PricingError};
use crate::pricing::SolverSettings;

/// Solver iteration budget bounds
const MIN_ITERATIONS: u32 = 1;
const MAX_ITERATIONS: u32 = 100;

/// Engine configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | PRICING_ENVIRONMENT | development | environment name |
/// | PRICING_LOG_LEVEL | info | log level |
/// | PRICING_LOG_DIR | (unset) | daily rolling log directory |
/// | PRICING_MAX_ITERATIONS | 10 | solver iteration budget, clamped to 1..=100 |
/// | PRICING_TOLERANCE | 0.01 | solver convergence threshold (currency) |
/// | PRICING_VOLUMETRIC_DIVISOR | 6000 | cm³ per kg for volumetric weight |
///
/// # Example
///
/// ```ignore
/// PRICING_LOG_LEVEL=debug PRICING_MAX_ITERATIONS=20 cargo test
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// development | staging | production
    pub environment: String,
    pub log_level: String,
    /// Log to stdout when unset
    pub log_dir: Option<String>,
    pub max_iterations: u32,
    pub tolerance: f64,
    pub volumetric_divisor: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let solver = SolverSettings::default();
        Self {
            environment: "development".into(),
            log_level: "info".into(),
            log_dir: None,
            max_iterations: solver.max_iterations,
            tolerance: solver.tolerance,
            volumetric_divisor: DEFAULT_VOLUMETRIC_DIVISOR,
        }
    }
}

impl EngineConfig {
    /// Load from the process environment (after reading `.env` if present)
    ///
    /// Unset or unparsable variables fall back to their defaults.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key → value source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            environment: lookup("PRICING_ENVIRONMENT").unwrap_or(defaults.environment),
            log_level: lookup("PRICING_LOG_LEVEL").unwrap_or(defaults.log_level),
            log_dir: lookup("PRICING_LOG_DIR").filter(|d| !d.trim().is_empty()),
            max_iterations: lookup("PRICING_MAX_ITERATIONS")
                .and_then(|v| v.trim().parse::<u32>().ok())
                .unwrap_or(defaults.max_iterations)
                .clamp(MIN_ITERATIONS, MAX_ITERATIONS),
            tolerance: lookup("PRICING_TOLERANCE")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.tolerance),
            volumetric_divisor: lookup("PRICING_VOLUMETRIC_DIVISOR")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.volumetric_divisor),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Reject values the solver cannot work with
    pub fn validate(&self) -> EngineResult<()> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(PricingError::Configuration(format!(
                "PRICING_TOLERANCE must be a positive number, got {}",
                self.tolerance
            )));
        }
        if !self.volumetric_divisor.is_finite() || self.volumetric_divisor <= 0.0 {
            return Err(PricingError::Configuration(format!(
                "PRICING_VOLUMETRIC_DIVISOR must be a positive number, got {}",
                self.volumetric_divisor
            )));
        }
        Ok(())
    }

    pub fn solver_settings(&self) -> SolverSettings {
        SolverSettings {
            max_iterations: self.max_iterations,
            tolerance: self.tolerance,
            ..SolverSettings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> EngineConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EngineConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let cfg = config(&[]);
        assert_eq!(cfg, EngineConfig::default());
        assert_eq!(cfg.solver_settings(), SolverSettings::default());
        assert!(cfg.validate().is_ok());
        assert!(!cfg.is_production());
    }

    #[test]
    fn test_overrides() {
        let cfg = config(&[
            ("PRICING_ENVIRONMENT", "production"),
            ("PRICING_LOG_DIR", "/var/log/pricing"),
            ("PRICING_MAX_ITERATIONS", "25"),
            ("PRICING_TOLERANCE", "0.001"),
            ("PRICING_VOLUMETRIC_DIVISOR", "5000"),
        ]);
        assert!(cfg.is_production());
        assert_eq!(cfg.log_dir.as_deref(), Some("/var/log/pricing"));
        assert_eq!(cfg.solver_settings().max_iterations, 25);
        assert_eq!(cfg.solver_settings().tolerance, 0.001);
        assert_eq!(cfg.volumetric_divisor, 5000.0);
    }

    #[test]
    fn test_iterations_clamped_and_garbage_ignored() {
        assert_eq!(config(&[("PRICING_MAX_ITERATIONS", "0")]).max_iterations, 1);
        assert_eq!(config(&[("PRICING_MAX_ITERATIONS", "5000")]).max_iterations, 100);
        assert_eq!(config(&[("PRICING_MAX_ITERATIONS", "ten")]).max_iterations, 10);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let cfg = config(&[("PRICING_TOLERANCE", "-1")]);
        assert!(matches!(cfg.validate(), Err(PricingError::Configuration(_))));

        let cfg = config(&[("PRICING_VOLUMETRIC_DIVISOR", "0")]);
        assert!(matches!(cfg.validate(), Err(PricingError::Configuration(_))));
    }
}
