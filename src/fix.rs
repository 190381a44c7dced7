//! Fix engine: applies auto-fixes by rewriting the declaration tree.
//!
//! Fixing is the only mutating path in the crate. Each file is parsed into
//! an owned tree, every enabled fixable rule mutates it in turn, and the
//! file is rewritten from the tree only when at least one rule changed
//! something. Untouched files are never rewritten, so their bytes (and
//! their formatting) stay exactly as they were.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use rayon::prelude::*;

use crate::config::WklintConfig;
use crate::error::{Result, WklintError};
use crate::lint::{discover_files, lint_file};
use crate::types::Severity;
use crate::parser::ast::SourceFile;
use crate::parser::parse_source;
use crate::parser::printer::print_source;
use crate::rules::{FixOutcome, Registry};
use crate::types::{FixResult, RuleCode};

/// Run every enabled fixable rule against an owned tree. Returns one
/// `(code, outcome)` pair per structural change, in rule order.
pub fn fix_source(
    file: &mut SourceFile,
    registry: &Registry,
    config: &WklintConfig,
) -> Vec<(RuleCode, FixOutcome)> {
    let mut changes = Vec::new();
    for rule in registry.enabled(config) {
        if !rule.is_fixable() {
            continue;
        }
        for outcome in rule.fix(file) {
            changes.push((rule.code().clone(), outcome));
        }
    }
    changes
}

/// Fix a single file in place. With `dry_run` the changes are computed and
/// reported but the file is left untouched.
pub fn fix_file(
    path: &Path,
    registry: &Registry,
    config: &WklintConfig,
    dry_run: bool,
) -> Result<Vec<FixResult>> {
    let source = fs::read_to_string(path)?;
    let mut file = parse_source(&source).map_err(|e| WklintError::Parse {
        path: path.to_path_buf(),
        line: e.line,
        column: e.column,
        message: e.message,
    })?;

    let changes = fix_source(&mut file, registry, config);
    if changes.is_empty() {
        return Ok(Vec::new());
    }

    let display = path.display().to_string();
    if dry_run {
        return Ok(changes
            .into_iter()
            .map(|(code, outcome)| FixResult::applied(&display, code, outcome.description))
            .collect());
    }

    let rewritten = print_source(&file);
    match fs::write(path, rewritten) {
        Ok(()) => Ok(changes
            .into_iter()
            .map(|(code, outcome)| FixResult::applied(&display, code, outcome.description))
            .collect()),
        Err(e) => {
            let error = e.to_string();
            Ok(changes
                .into_iter()
                .map(|(code, outcome)| {
                    FixResult::failed(&display, code, outcome.description, &error)
                })
                .collect())
        }
    }
}

/// Fix a file or every source file under a directory. An analysis pass
/// selects the files with fixable findings; only those enter the mutating
/// pass. Files that fail to parse are reported as failed fixes rather than
/// aborting the run.
pub fn fix_path(
    path: &Path,
    registry: &Registry,
    config: &WklintConfig,
    dry_run: bool,
) -> Result<Vec<FixResult>> {
    let files = discover_files(path)?;
    log::debug!("Fixing {} file(s) under {}", files.len(), path.display());

    let fixable: HashSet<String> = registry
        .fixable_codes()
        .into_iter()
        .map(|c| c.to_string())
        .collect();
    // Selection ignores the reporting threshold so a tightened config
    // cannot hide a fixable finding from the fixer.
    let select_config = config.clone().with_min_severity(Severity::Info);

    // Each file is owned by exactly one worker, so fixing parallelizes
    // across files only.
    let per_file: Vec<Result<Vec<FixResult>>> = files
        .par_iter()
        .map(|file| {
            let issues = lint_file(file, registry, &select_config)?;
            if !issues.iter().any(|i| fixable.contains(i.code.as_str())) {
                return Ok(Vec::new());
            }
            fix_file(file, registry, config, dry_run)
        })
        .collect();

    let mut results = Vec::new();
    for outcome in per_file {
        match outcome {
            Ok(fixes) => results.extend(fixes),
            Err(WklintError::Parse {
                path: failed,
                line,
                column,
                message,
            }) => {
                log::warn!("Skipping unparseable file {}", failed.display());
                results.push(FixResult::failed(
                    failed.display().to_string(),
                    RuleCode::new("parse"),
                    "file could not be parsed",
                    format!("{}:{}: {}", line, column, message),
                ));
            }
            Err(other) => return Err(other),
        }
    }
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::depth;
    use crate::rules::wk8002::MAX_DEPTH;

    fn setup() -> (Registry, WklintConfig) {
        (Registry::builtin(), WklintConfig::default())
    }

    const UNPINNED: &str = r#"var pod = corev1.PodSpec{
	Containers: []corev1.Container{
		{
			Name:  "web",
			Image: "nginx:1.21",
		},
	},
}"#;

    #[test]
    fn test_fix_source_runs_fixable_rules_only() {
        let (registry, config) = setup();
        let mut file = parse_source(UNPINNED).unwrap();
        let changes = fix_source(&mut file, &registry, &config);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].0.as_str(), "WK8024");
    }

    #[test]
    fn test_fix_source_respects_disabled() {
        let (registry, _) = setup();
        let config = WklintConfig::default().disable("WK8024");
        let mut file = parse_source(UNPINNED).unwrap();
        assert!(fix_source(&mut file, &registry, &config).is_empty());
    }

    #[test]
    fn test_fix_file_rewrites_on_change() {
        let (registry, config) = setup();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pod.go");
        fs::write(&path, UNPINNED).unwrap();

        let results = fix_file(&path, &registry, &config, false).unwrap();
        assert_eq!(results.len(), 1);
        assert!(results[0].fixed);

        let rewritten = fs::read_to_string(&path).unwrap();
        assert!(rewritten.contains("ImagePullPolicy"));
        // The rewritten file needs no further fixing.
        assert!(fix_file(&path, &registry, &config, false).unwrap().is_empty());
    }

    #[test]
    fn test_fix_file_clean_input_untouched() {
        let (registry, config) = setup();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pod.go");
        // Oddly formatted on purpose; no fix applies, so no rewrite happens.
        let original = "var c = corev1.Container{Name: \"web\", Image: \"nginx:1.21\", ImagePullPolicy: \"IfNotPresent\"}";
        fs::write(&path, original).unwrap();

        assert!(fix_file(&path, &registry, &config, false).unwrap().is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn test_fix_file_dry_run() {
        let (registry, config) = setup();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pod.go");
        fs::write(&path, UNPINNED).unwrap();

        let results = fix_file(&path, &registry, &config, true).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(fs::read_to_string(&path).unwrap(), UNPINNED);
    }

    #[test]
    fn test_fix_path_reports_parse_failures() {
        let (registry, config) = setup();
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("bad.go"), "var = {").unwrap();
        fs::write(dir.path().join("pod.go"), UNPINNED).unwrap();

        let results = fix_path(dir.path(), &registry, &config, false).unwrap();
        assert_eq!(results.len(), 2);
        assert!(results.iter().any(|r| !r.fixed && r.file.ends_with("bad.go")));
        assert!(results.iter().any(|r| r.fixed && r.file.ends_with("pod.go")));
    }

    #[test]
    fn test_fix_path_skips_files_without_fixable_findings() {
        let (registry, config) = setup();
        let dir = tempfile::tempdir().unwrap();
        // Findings here (mutable `latest` tag) have no auto-fix.
        let unfixable = "var c = corev1.Container{\n\tName: \"web\",\n\tImage: \"nginx:latest\",\n\tImagePullPolicy: \"Always\",\n}";
        fs::write(dir.path().join("latest.go"), unfixable).unwrap();
        fs::write(dir.path().join("pod.go"), UNPINNED).unwrap();

        let results = fix_path(dir.path(), &registry, &config, false).unwrap();
        assert!(results.iter().all(|r| r.file.ends_with("pod.go")));
        assert_eq!(
            fs::read_to_string(dir.path().join("latest.go")).unwrap(),
            unfixable
        );
    }

    #[test]
    fn test_fix_file_deep_nesting_end_to_end() {
        let (registry, config) = setup();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deep.go");
        let src = "var deep = l1.T{\n\tF: l2.T{\n\t\tF: l3.T{\n\t\t\tF: l4.T{\n\t\t\t\tF: l5.T{\n\t\t\t\t\tF: l6.T{\n\t\t\t\t\t\tF: \"x\",\n\t\t\t\t\t},\n\t\t\t\t},\n\t\t\t},\n\t\t},\n\t},\n}";
        fs::write(&path, src).unwrap();

        let results = fix_file(&path, &registry, &config, false).unwrap();
        assert!(results.iter().any(|r| r.code.as_str() == "WK8002"));

        let rewritten = fs::read_to_string(&path).unwrap();
        let file = parse_source(&rewritten).unwrap();
        for decl in &file.decls {
            assert!(depth(&decl.init) <= MAX_DEPTH);
        }
    }
}
