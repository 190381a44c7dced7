//! GitHub Actions workflow-command output.
//!
//! One `::error`/`::warning`/`::notice` line per issue, which GitHub turns
//! into inline annotations on the pull request diff.

use crate::lint::LintResult;
use crate::types::Severity;

pub fn format(result: &LintResult) -> String {
    let mut out = String::new();

    for issue in &result.issues {
        let level = match issue.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "notice",
        };
        out.push_str(&format!(
            "::{} file={},line={},col={},title={}::{}\n",
            level,
            issue.file,
            issue.line,
            issue.column,
            issue.code,
            escape(&issue.message)
        ));
    }

    for failure in &result.parse_errors {
        out.push_str(&format!(
            "::error file={},line={},col={},title=parse error::{}\n",
            failure.file,
            failure.line,
            failure.column,
            escape(&failure.message)
        ));
    }

    out
}

/// Workflow-command data escaping, per the GitHub runner rules.
fn escape(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Issue;

    #[test]
    fn test_annotation_lines() {
        let result = LintResult {
            issues: vec![
                Issue::new(
                    "WK8008",
                    "privileged-container",
                    Severity::Error,
                    "privileged",
                    "a.go",
                    3,
                    2,
                ),
                Issue::new(
                    "WK8020",
                    "minimum-replicas",
                    Severity::Info,
                    "one replica",
                    "a.go",
                    1,
                    1,
                ),
            ],
            parse_errors: Vec::new(),
            total_files: 1,
        };
        let out = format(&result);
        assert!(out.contains("::error file=a.go,line=3,col=2,title=WK8008::privileged"));
        assert!(out.contains("::notice file=a.go,line=1,col=1,title=WK8020::one replica"));
    }

    #[test]
    fn test_escaping() {
        assert_eq!(escape("50% done\nnext"), "50%25 done%0Anext");
    }

    #[test]
    fn test_clean_run_is_silent() {
        assert!(format(&LintResult::default()).is_empty());
    }
}
