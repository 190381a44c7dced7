//! Human-readable text output.

use colored::Colorize;

use crate::lint::LintResult;
use crate::types::Severity;

/// Render issues as `file:line:col: severity [CODE] message` lines plus a
/// one-line summary.
pub fn format(result: &LintResult) -> String {
    let mut out = String::new();

    for issue in &result.issues {
        let severity = match issue.severity {
            Severity::Error => issue.severity.as_str().red().bold().to_string(),
            Severity::Warning => issue.severity.as_str().yellow().to_string(),
            Severity::Info => issue.severity.as_str().blue().to_string(),
        };
        out.push_str(&format!(
            "{}:{}:{}: {} [{}] {}\n",
            issue.file, issue.line, issue.column, severity, issue.code, issue.message
        ));
    }

    for failure in &result.parse_errors {
        out.push_str(&format!(
            "{}:{}:{}: {} {}\n",
            failure.file,
            failure.line,
            failure.column,
            "error".red().bold(),
            failure.message
        ));
    }

    if !out.is_empty() {
        out.push('\n');
    }
    out.push_str(&summary(result));
    out.push('\n');
    out
}

fn summary(result: &LintResult) -> String {
    let files = format!(
        "{} file{} checked",
        result.total_files,
        if result.total_files == 1 { "" } else { "s" }
    );
    if !result.has_findings() {
        return format!("{}, no issues found", files);
    }
    let mut parts = vec![format!(
        "{} issue{} ({} errors, {} warnings, {} info)",
        result.issues.len(),
        if result.issues.len() == 1 { "" } else { "s" },
        result.error_count(),
        result.warning_count(),
        result.info_count()
    )];
    if !result.parse_errors.is_empty() {
        parts.push(format!("{} file(s) failed to parse", result.parse_errors.len()));
    }
    format!("{}, {}", files, parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lint::ParseFailure;
    use crate::types::Issue;

    fn sample() -> LintResult {
        LintResult {
            issues: vec![
                Issue::new(
                    "WK8008",
                    "privileged-container",
                    Severity::Error,
                    "Container `web` runs privileged",
                    "a.go",
                    3,
                    2,
                ),
                Issue::new(
                    "WK8020",
                    "minimum-replicas",
                    Severity::Info,
                    "Deployment `web` runs 1 replica(s)",
                    "a.go",
                    1,
                    1,
                ),
            ],
            parse_errors: Vec::new(),
            total_files: 2,
        }
    }

    #[test]
    fn test_format_lines() {
        colored::control::set_override(false);
        let out = format(&sample());
        assert!(out.contains("a.go:3:2: error [WK8008] Container `web` runs privileged"));
        assert!(out.contains("a.go:1:1: info [WK8020]"));
        assert!(out.contains("2 files checked, 2 issues (1 errors, 0 warnings, 1 info)"));
    }

    #[test]
    fn test_format_clean() {
        colored::control::set_override(false);
        let result = LintResult {
            total_files: 1,
            ..LintResult::default()
        };
        assert_eq!(format(&result), "1 file checked, no issues found\n");
    }

    #[test]
    fn test_format_parse_failure() {
        colored::control::set_override(false);
        let result = LintResult {
            issues: Vec::new(),
            parse_errors: vec![ParseFailure {
                file: "bad.go".into(),
                line: 2,
                column: 5,
                message: "expected expression".into(),
            }],
            total_files: 1,
        };
        let out = format(&result);
        assert!(out.contains("bad.go:2:5: error expected expression"));
        assert!(out.contains("1 file(s) failed to parse"));
    }
}
