//! JSON output for machine consumption.

use serde::Serialize;

use crate::error::Result;
use crate::lint::{LintResult, ParseFailure};
use crate::types::Issue;

#[derive(Serialize)]
struct Report<'a> {
    issues: &'a [Issue],
    parse_errors: &'a [ParseFailure],
    total_files: usize,
    files_with_issues: usize,
    error_count: usize,
    warning_count: usize,
    info_count: usize,
}

pub fn format(result: &LintResult) -> Result<String> {
    let report = Report {
        issues: &result.issues,
        parse_errors: &result.parse_errors,
        total_files: result.total_files,
        files_with_issues: result.files_with_issues(),
        error_count: result.error_count(),
        warning_count: result.warning_count(),
        info_count: result.info_count(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Severity;

    #[test]
    fn test_json_shape() {
        let result = LintResult {
            issues: vec![Issue::new(
                "WK8016",
                "no-latest-tag",
                Severity::Warning,
                "pin the image",
                "a.go",
                4,
                3,
            )],
            parse_errors: Vec::new(),
            total_files: 1,
        };
        let out = format(&result).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["total_files"], 1);
        assert_eq!(parsed["files_with_issues"], 1);
        assert_eq!(parsed["warning_count"], 1);
        assert_eq!(parsed["issues"][0]["code"], "WK8016");
        assert_eq!(parsed["issues"][0]["severity"], "warning");
        assert_eq!(parsed["issues"][0]["line"], 4);
    }

    #[test]
    fn test_json_empty_run() {
        let out = format(&LintResult::default()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["issues"].as_array().unwrap().len(), 0);
        assert_eq!(parsed["error_count"], 0);
    }
}
