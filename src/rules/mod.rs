//! Rule system framework for wklint.
//!
//! Provides the infrastructure for defining and running workload-definition
//! linting rules:
//! - `Rule` trait for all rules
//! - `SimpleRule` for stateless checks
//! - `FixableRule` for rules that can auto-fix issues by mutating the tree
//! - `Registry`, the explicit rule catalog passed into the engine and fixer

use std::collections::HashSet;

use crate::config::WklintConfig;
use crate::parser::ast::SourceFile;
use crate::types::{Issue, RuleCode, Severity};

// Rule modules
pub mod wk8001;
pub mod wk8002;
pub mod wk8003;
pub mod wk8004;
pub mod wk8005;
pub mod wk8006;
pub mod wk8007;
pub mod wk8008;
pub mod wk8009;
pub mod wk8010;
pub mod wk8011;
pub mod wk8012;
pub mod wk8013;
pub mod wk8014;
pub mod wk8015;
pub mod wk8016;
pub mod wk8017;
pub mod wk8018;
pub mod wk8019;
pub mod wk8020;
pub mod wk8021;
pub mod wk8022;
pub mod wk8023;
pub mod wk8024;

/// Context for linting one parsed file.
#[derive(Debug, Clone, Copy)]
pub struct LintContext<'a> {
    /// The parsed declaration tree.
    pub file: &'a SourceFile,
    /// The raw source content.
    pub source: &'a str,
    /// The file path (for issue positions).
    pub path: &'a str,
}

impl<'a> LintContext<'a> {
    pub fn new(file: &'a SourceFile, source: &'a str, path: &'a str) -> Self {
        Self { file, source, path }
    }
}

/// One structural change applied by a fix, with its provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixOutcome {
    /// What was changed (e.g., which value was inserted where).
    pub description: String,
}

impl FixOutcome {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A rule that can check workload definition files.
///
/// Rules are stateless and reentrant: `check` never mutates the tree and
/// must yield identical results when invoked twice on the same input. Only
/// `fix` mutates, and only when explicitly invoked in fix mode on a tree
/// the fixer uniquely owns.
pub trait Rule: Send + Sync {
    /// Get the rule code (e.g., "WK8008").
    fn code(&self) -> &RuleCode;

    /// Get the human-readable rule name (e.g., "privileged-container").
    fn name(&self) -> &str;

    /// Get the default severity.
    fn severity(&self) -> Severity;

    /// Get the rule description.
    fn description(&self) -> &str;

    /// Whether this rule can auto-fix issues.
    fn is_fixable(&self) -> bool {
        false
    }

    /// Check the file and return any issues.
    fn check(&self, context: &LintContext) -> Vec<Issue>;

    /// Mutate the tree to repair violations (if fixable). Returns one
    /// outcome per structural change; an empty vec means nothing changed.
    fn fix(&self, _file: &mut SourceFile) -> Vec<FixOutcome> {
        Vec::new()
    }
}

/// Base implementation for a simple (non-fixable) rule.
pub struct SimpleRule<F>
where
    F: Fn(&LintContext) -> Vec<Issue> + Send + Sync,
{
    code: RuleCode,
    name: String,
    severity: Severity,
    description: String,
    check_fn: F,
}

impl<F> SimpleRule<F>
where
    F: Fn(&LintContext) -> Vec<Issue> + Send + Sync,
{
    pub fn new(
        code: impl Into<RuleCode>,
        name: impl Into<String>,
        severity: Severity,
        description: impl Into<String>,
        check_fn: F,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            severity,
            description: description.into(),
            check_fn,
        }
    }
}

impl<F> Rule for SimpleRule<F>
where
    F: Fn(&LintContext) -> Vec<Issue> + Send + Sync,
{
    fn code(&self) -> &RuleCode {
        &self.code
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn severity(&self) -> Severity {
        self.severity
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn check(&self, context: &LintContext) -> Vec<Issue> {
        (self.check_fn)(context)
    }
}

/// Base implementation for a fixable rule.
pub struct FixableRule<C, X>
where
    C: Fn(&LintContext) -> Vec<Issue> + Send + Sync,
    X: Fn(&mut SourceFile) -> Vec<FixOutcome> + Send + Sync,
{
    code: RuleCode,
    name: String,
    severity: Severity,
    description: String,
    check_fn: C,
    fix_fn: X,
}

impl<C, X> FixableRule<C, X>
where
    C: Fn(&LintContext) -> Vec<Issue> + Send + Sync,
    X: Fn(&mut SourceFile) -> Vec<FixOutcome> + Send + Sync,
{
    pub fn new(
        code: impl Into<RuleCode>,
        name: impl Into<String>,
        severity: Severity,
        description: impl Into<String>,
        check_fn: C,
        fix_fn: X,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            severity,
            description: description.into(),
            check_fn,
            fix_fn,
        }
    }
}

impl<C, X> Rule for FixableRule<C, X>
where
    C: Fn(&LintContext) -> Vec<Issue> + Send + Sync,
    X: Fn(&mut SourceFile) -> Vec<FixOutcome> + Send + Sync,
{
    fn code(&self) -> &RuleCode {
        &self.code
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn severity(&self) -> Severity {
        self.severity
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn is_fixable(&self) -> bool {
        true
    }

    fn check(&self, context: &LintContext) -> Vec<Issue> {
        (self.check_fn)(context)
    }

    fn fix(&self, file: &mut SourceFile) -> Vec<FixOutcome> {
        (self.fix_fn)(file)
    }
}

/// Helper to create an issue for a rule.
pub fn make_issue(
    code: &str,
    name: &str,
    severity: Severity,
    message: impl Into<String>,
    path: &str,
    line: u32,
    column: u32,
) -> Issue {
    Issue::new(code, name, severity, message, path, line, column)
}

/// The rule catalog. Constructed once at startup and passed by reference
/// into the engine and the fixer; there is no hidden global rule list.
pub struct Registry {
    rules: Vec<Box<dyn Rule>>,
}

impl Registry {
    /// Build the registry of built-in rules.
    pub fn builtin() -> Self {
        Self {
            rules: vec![
                Box::new(wk8001::rule()),
                Box::new(wk8002::rule()),
                Box::new(wk8003::rule()),
                Box::new(wk8004::rule()),
                Box::new(wk8005::rule()),
                Box::new(wk8006::rule()),
                Box::new(wk8007::rule()),
                Box::new(wk8008::rule()),
                Box::new(wk8009::rule()),
                Box::new(wk8010::rule()),
                Box::new(wk8011::rule()),
                Box::new(wk8012::rule()),
                Box::new(wk8013::rule()),
                Box::new(wk8014::rule()),
                Box::new(wk8015::rule()),
                Box::new(wk8016::rule()),
                Box::new(wk8017::rule()),
                Box::new(wk8018::rule()),
                Box::new(wk8019::rule()),
                Box::new(wk8020::rule()),
                Box::new(wk8021::rule()),
                Box::new(wk8022::rule()),
                Box::new(wk8023::rule()),
                Box::new(wk8024::rule()),
            ],
        }
    }

    /// Build a registry from an explicit rule list (for tests).
    pub fn from_rules(rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules }
    }

    /// All rules in the catalog.
    pub fn rules(&self) -> &[Box<dyn Rule>] {
        &self.rules
    }

    /// The subset of rules enabled under a config. Disabled rules are
    /// removed entirely before any file is analyzed; disabling an unknown
    /// code is a silent no-op.
    pub fn enabled<'a>(&'a self, config: &WklintConfig) -> Vec<&'a dyn Rule> {
        self.rules
            .iter()
            .filter(|r| !config.is_rule_disabled(r.code()))
            .map(|r| r.as_ref())
            .collect()
    }

    /// The static list of rule codes that support fixing, independent of
    /// whether any instance triggers in a given run.
    pub fn fixable_codes(&self) -> Vec<RuleCode> {
        self.rules
            .iter()
            .filter(|r| r.is_fixable())
            .map(|r| r.code().clone())
            .collect()
    }

    /// Definitions for documentation/introspection.
    pub fn definitions(&self) -> Vec<RuleDefinition> {
        self.rules
            .iter()
            .map(|r| RuleDefinition {
                code: r.code().clone(),
                name: r.name().to_string(),
                severity: r.severity(),
                description: r.description().to_string(),
                fixable: r.is_fixable(),
            })
            .collect()
    }
}

/// Rule definition for documentation/introspection.
#[derive(Debug, Clone)]
pub struct RuleDefinition {
    pub code: RuleCode,
    pub name: String,
    pub severity: Severity,
    pub description: String,
    pub fixable: bool,
}
