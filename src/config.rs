//! Configuration for the wklint linter.
//!
//! Two inputs alter which rules run: a set of disabled rule codes and a
//! minimum severity threshold. The config is immutable for the duration of
//! a run.

use std::collections::HashSet;

use crate::types::{RuleCode, Severity};

/// Main configuration for wklint.
#[derive(Debug, Clone)]
pub struct WklintConfig {
    /// Rule codes removed from the enabled set before analysis.
    pub disabled_rules: HashSet<String>,
    /// Minimum severity threshold for reporting.
    pub min_severity: Severity,
}

impl Default for WklintConfig {
    fn default() -> Self {
        Self {
            disabled_rules: HashSet::new(),
            // Info is the least severe level, so everything is reported.
            min_severity: Severity::Info,
        }
    }
}

impl WklintConfig {
    /// Create a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable a rule by code. Disabling an unknown code is a no-op.
    pub fn disable(mut self, code: impl Into<String>) -> Self {
        self.disabled_rules.insert(code.into());
        self
    }

    /// Set the minimum severity threshold.
    pub fn with_min_severity(mut self, severity: Severity) -> Self {
        self.min_severity = severity;
        self
    }

    /// Check if a rule is disabled.
    pub fn is_rule_disabled(&self, code: &RuleCode) -> bool {
        self.disabled_rules.contains(code.as_str())
    }

    /// Check if an issue at the given severity should be reported.
    pub fn should_report(&self, severity: Severity) -> bool {
        severity >= self.min_severity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_reports_everything() {
        let config = WklintConfig::default();
        assert!(config.should_report(Severity::Error));
        assert!(config.should_report(Severity::Warning));
        assert!(config.should_report(Severity::Info));
    }

    #[test]
    fn test_threshold_filtering() {
        let config = WklintConfig::default().with_min_severity(Severity::Warning);
        assert!(config.should_report(Severity::Error));
        assert!(config.should_report(Severity::Warning));
        assert!(!config.should_report(Severity::Info));

        let strict = WklintConfig::default().with_min_severity(Severity::Error);
        assert!(strict.should_report(Severity::Error));
        assert!(!strict.should_report(Severity::Warning));
    }

    #[test]
    fn test_disable() {
        let config = WklintConfig::default().disable("WK8016");
        assert!(config.is_rule_disabled(&RuleCode::new("WK8016")));
        assert!(!config.is_rule_disabled(&RuleCode::new("WK8001")));
    }
}
