//! Lint engine: file discovery, per-file rule execution, and run-level
//! aggregation.
//!
//! A run is read-only. Parse failures do not abort a directory walk; they
//! are collected on the [`LintResult`] next to the issues so one broken
//! file cannot hide findings in the rest of the tree.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;

use crate::config::WklintConfig;
use crate::error::{Result, WklintError};
use crate::parser::parse_source;
use crate::rules::{LintContext, Registry};
use crate::types::{Issue, Severity};

/// A file that could not be parsed during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseFailure {
    pub file: String,
    pub line: u32,
    pub column: u32,
    pub message: String,
}

/// Aggregated outcome of one lint run.
#[derive(Debug, Default, Serialize)]
pub struct LintResult {
    /// All issues, sorted by file, line, column.
    pub issues: Vec<Issue>,
    /// Files that failed to parse.
    pub parse_errors: Vec<ParseFailure>,
    /// Number of files analyzed (parse failures included).
    pub total_files: usize,
}

impl LintResult {
    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    pub fn info_count(&self) -> usize {
        self.count(Severity::Info)
    }

    fn count(&self, severity: Severity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }

    /// Number of distinct files with at least one issue.
    pub fn files_with_issues(&self) -> usize {
        let mut files: Vec<&str> = self.issues.iter().map(|i| i.file.as_str()).collect();
        files.sort_unstable();
        files.dedup();
        files.len()
    }

    /// Whether the run should fail a CI gate.
    pub fn has_findings(&self) -> bool {
        !self.issues.is_empty() || !self.parse_errors.is_empty()
    }
}

/// Lint already-loaded content under a display path.
pub fn lint_content(
    source: &str,
    path: &str,
    registry: &Registry,
    config: &WklintConfig,
) -> Result<Vec<Issue>> {
    let file = parse_source(source).map_err(|e| WklintError::Parse {
        path: PathBuf::from(path),
        line: e.line,
        column: e.column,
        message: e.message,
    })?;

    let ctx = LintContext::new(&file, source, path);
    let mut issues = Vec::new();
    for rule in registry.enabled(config) {
        issues.extend(
            rule.check(&ctx)
                .into_iter()
                .filter(|i| config.should_report(i.severity)),
        );
    }
    issues.sort();
    Ok(issues)
}

/// Lint a single file on disk.
pub fn lint_file(path: &Path, registry: &Registry, config: &WklintConfig) -> Result<Vec<Issue>> {
    let source = fs::read_to_string(path)?;
    lint_content(&source, &path.display().to_string(), registry, config)
}

/// Lint a file or recursively lint a directory.
pub fn lint_path(path: &Path, registry: &Registry, config: &WklintConfig) -> Result<LintResult> {
    let files = discover_files(path)?;
    log::debug!("Linting {} file(s) under {}", files.len(), path.display());

    let per_file: Vec<std::result::Result<Vec<Issue>, ParseFailure>> = files
        .par_iter()
        .map(|file| {
            lint_file(file, registry, config).map_err(|e| match e {
                WklintError::Parse {
                    path,
                    line,
                    column,
                    message,
                } => ParseFailure {
                    file: path.display().to_string(),
                    line,
                    column,
                    message,
                },
                other => ParseFailure {
                    file: file.display().to_string(),
                    line: 0,
                    column: 0,
                    message: other.to_string(),
                },
            })
        })
        .collect();

    let mut result = LintResult {
        total_files: files.len(),
        ..LintResult::default()
    };
    for outcome in per_file {
        match outcome {
            Ok(issues) => result.issues.extend(issues),
            Err(failure) => result.parse_errors.push(failure),
        }
    }
    result.issues.sort();
    result.parse_errors.sort_by(|a, b| a.file.cmp(&b.file));
    Ok(result)
}

/// Collect the source files under a path. A file path is taken as-is;
/// a directory is walked recursively for `.go` files, skipping tests.
pub fn discover_files(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.is_dir() {
        return Err(WklintError::InvalidPath(path.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in walkdir::WalkDir::new(path)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if name.ends_with(".go") && !name.ends_with("_test.go") {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Registry, WklintConfig) {
        (Registry::builtin(), WklintConfig::default())
    }

    const CLEAN: &str = r#"var web = &appsv1.Deployment{
	ObjectMeta: metav1.ObjectMeta{
		Name: "web",
		Labels: map[string]string{
			"app": "web",
		},
	},
}"#;

    #[test]
    fn test_lint_content_sorted_and_filtered() {
        let (registry, _) = setup();
        let config = WklintConfig::default().with_min_severity(Severity::Error);
        let src = "var web = newDeployment()\nvar api = corev1.Pod{}";
        let issues = lint_content(src, "a.go", &registry, &config).unwrap();
        assert!(!issues.is_empty());
        assert!(issues.iter().all(|i| i.severity == Severity::Error));
        assert!(issues.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_lint_content_parse_error() {
        let (registry, config) = setup();
        let err = lint_content("var = {", "bad.go", &registry, &config).unwrap_err();
        assert!(matches!(err, WklintError::Parse { .. }));
    }

    #[test]
    fn test_lint_content_disabled_rule() {
        let (registry, _) = setup();
        let config = WklintConfig::default()
            .with_min_severity(Severity::Error)
            .disable("WK8001");
        let issues = lint_content("var web = newDeployment()", "a.go", &registry, &config).unwrap();
        assert!(issues.iter().all(|i| i.code.as_str() != "WK8001"));
    }

    #[test]
    fn test_lint_path_walks_directory() {
        let (registry, config) = setup();
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.go"), CLEAN).unwrap();
        fs::write(dir.path().join("b.go"), "var web = newDeployment()").unwrap();
        fs::write(dir.path().join("b_test.go"), "var broken = {").unwrap();
        fs::write(dir.path().join("notes.txt"), "not a source file").unwrap();

        let result = lint_path(dir.path(), &registry, &config).unwrap();
        assert_eq!(result.total_files, 2, "tests and non-source files skipped");
        assert!(result.parse_errors.is_empty());
        assert!(
            result
                .issues
                .iter()
                .any(|i| i.code.as_str() == "WK8001" && i.file.ends_with("b.go"))
        );
    }

    #[test]
    fn test_lint_path_collects_parse_failures() {
        let (registry, config) = setup();
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("bad.go"), "var = {").unwrap();
        fs::write(dir.path().join("ok.go"), CLEAN).unwrap();

        let result = lint_path(dir.path(), &registry, &config).unwrap();
        assert_eq!(result.parse_errors.len(), 1);
        assert!(result.parse_errors[0].file.ends_with("bad.go"));
        assert!(result.has_findings());
    }

    #[test]
    fn test_lint_path_missing() {
        let (registry, config) = setup();
        let err = lint_path(Path::new("/no/such/dir"), &registry, &config).unwrap_err();
        assert!(matches!(err, WklintError::InvalidPath(_)));
    }

    #[test]
    fn test_result_counts() {
        let (registry, config) = setup();
        let issues = lint_content(CLEAN, "a.go", &registry, &config).unwrap();
        let result = LintResult {
            issues,
            parse_errors: Vec::new(),
            total_files: 1,
        };
        assert_eq!(
            result.error_count() + result.warning_count() + result.info_count(),
            result.issues.len()
        );
    }
}
