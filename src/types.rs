//! Core types for the wklint workload-definition linter.
//!
//! Shared value types:
//! - `Severity` - Rule violation severity levels
//! - `RuleCode` - Rule identifiers (e.g., "WK8001")
//! - `Issue` - A single rule violation
//! - `FixResult` - The outcome of one applied (or attempted) fix

use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// Severity levels for rule violations.
///
/// Ordered from most severe to least severe:
/// `Error > Warning > Info`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Critical issues that should always be fixed
    Error,
    /// Important issues that should usually be fixed
    Warning,
    /// Informational suggestions for improvement
    Info,
}

impl Severity {
    /// Parse a severity from a string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "error" => Some(Self::Error),
            "warning" | "warn" => Some(Self::Warning),
            "info" => Some(Self::Info),
            _ => None,
        }
    }

    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Default for Severity {
    fn default() -> Self {
        Self::Warning
    }
}

impl Ord for Severity {
    fn cmp(&self, other: &Self) -> Ordering {
        // Higher severity = lower numeric value for Ord
        let self_val = match self {
            Self::Error => 0,
            Self::Warning => 1,
            Self::Info => 2,
        };
        let other_val = match other {
            Self::Error => 0,
            Self::Warning => 1,
            Self::Info => 2,
        };
        // Reverse so Error > Warning > Info
        other_val.cmp(&self_val)
    }
}

impl PartialOrd for Severity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A rule code identifier (e.g., "WK8001").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RuleCode(pub String);

impl RuleCode {
    /// Create a new rule code.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Get the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if this is a WK8 rule.
    pub fn is_wk8_rule(&self) -> bool {
        self.0.starts_with("WK8")
    }

    /// Get the numeric part of the rule code.
    pub fn number(&self) -> Option<u32> {
        if self.0.starts_with("WK8") {
            self.0[3..].parse().ok()
        } else {
            None
        }
    }
}

impl fmt::Display for RuleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RuleCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for RuleCode {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for RuleCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A rule violation found during analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    /// The rule code that was violated.
    pub code: RuleCode,
    /// The human-readable rule name (e.g., "privileged-container").
    pub rule_name: String,
    /// The severity of the violation.
    pub severity: Severity,
    /// A human-readable message describing the violation.
    pub message: String,
    /// The file path where the violation occurred.
    pub file: String,
    /// The line number where the violation occurred (1-indexed).
    pub line: u32,
    /// The column number where the violation starts (1-indexed).
    pub column: u32,
}

impl Issue {
    /// Create a new issue.
    pub fn new(
        code: impl Into<RuleCode>,
        rule_name: impl Into<String>,
        severity: Severity,
        message: impl Into<String>,
        file: impl Into<String>,
        line: u32,
        column: u32,
    ) -> Self {
        Self {
            code: code.into(),
            rule_name: rule_name.into(),
            severity,
            message: message.into(),
            file: file.into(),
            line,
            column,
        }
    }
}

impl Ord for Issue {
    fn cmp(&self, other: &Self) -> Ordering {
        // Sort by file, then line, then column
        match self.file.cmp(&other.file) {
            Ordering::Equal => match self.line.cmp(&other.line) {
                Ordering::Equal => self.column.cmp(&other.column),
                other => other,
            },
            other => other,
        }
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The outcome of one applied (or attempted) fix.
///
/// Distinct from [`Issue`]: a fix carries its own provenance, such as the
/// exact value that was inserted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FixResult {
    /// The file the fix was applied to.
    pub file: String,
    /// The rule that produced the fix.
    pub code: RuleCode,
    /// Whether the fix was actually applied.
    pub fixed: bool,
    /// What the fix did (e.g., which value was inserted).
    pub description: String,
    /// The failure, if the fix could not be applied or written.
    pub error: Option<String>,
}

impl FixResult {
    /// Record a successfully applied fix.
    pub fn applied(
        file: impl Into<String>,
        code: impl Into<RuleCode>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            file: file.into(),
            code: code.into(),
            fixed: true,
            description: description.into(),
            error: None,
        }
    }

    /// Record a fix that was attempted but failed.
    pub fn failed(
        file: impl Into<String>,
        code: impl Into<RuleCode>,
        description: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            file: file.into(),
            code: code.into(),
            fixed: false,
            description: description.into(),
            error: Some(error.into()),
        }
    }
}
