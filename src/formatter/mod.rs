//! Output formatting for lint results.
//!
//! Three formats: human-readable text (the default), machine-readable JSON,
//! and GitHub Actions workflow annotations.

pub mod github;
pub mod json;
pub mod text;

use crate::error::Result;
use crate::lint::LintResult;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Github,
}

impl OutputFormat {
    /// Parse a format name (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            "github" => Some(Self::Github),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
            Self::Github => "github",
        }
    }
}

/// Render a lint result in the requested format.
pub fn format_result(result: &LintResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text::format(result)),
        OutputFormat::Json => json::format(result),
        OutputFormat::Github => Ok(github::format(result)),
    }
}
