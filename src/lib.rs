//! # wklint
//!
//! A linter for declarative workload definition files: source files that
//! declare infrastructure resources as top-level variables bound to
//! construction expressions. wklint parses those declarations into a tree,
//! checks them against a catalog of security, reliability, and organization
//! rules, and can rewrite files in place to repair a subset of the findings.
//!
//! ## Features
//!
//! - **Static analysis**: Rules inspect the declaration tree, never a live cluster
//! - **Auto-fix**: Fixable rules rewrite the tree and re-serialize the file, preserving comments
//! - **Recursive runs**: Lint a single file or a whole directory tree in parallel
//! - **CI-friendly output**: Text, JSON, and GitHub annotation formats
//!
//! ## Example
//!
//! ```rust,no_run
//! use wklint::config::WklintConfig;
//! use wklint::lint::lint_path;
//! use wklint::rules::Registry;
//! use std::path::Path;
//!
//! # fn main() -> wklint::Result<()> {
//! let registry = Registry::builtin();
//! let config = WklintConfig::new();
//! let result = lint_path(Path::new("./deploy"), &registry, &config)?;
//! for issue in &result.issues {
//!     println!("{}:{}: [{}] {}", issue.file, issue.line, issue.code, issue.message);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod fix;
pub mod formatter;
pub mod lint;
pub mod matchers;
pub mod parser;
pub mod rules;
pub mod types;

// Re-export commonly used types and functions
pub use config::WklintConfig;
pub use error::{Result, WklintError};
pub use fix::{fix_file, fix_path};
pub use lint::{LintResult, lint_content, lint_file, lint_path};
pub use rules::Registry;
pub use types::{FixResult, Issue, RuleCode, Severity};

/// The current version of the CLI tool
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
