//! WK8009: read-only-root-fs

use crate::matchers::{bool_field, is_container, nested_record, string_field, walk_composites};
use crate::rules::{LintContext, Rule, SimpleRule, make_issue};
use crate::types::{Issue, Severity};

const CODE: &str = "WK8009";
const NAME: &str = "read-only-root-fs";
const DESCRIPTION: &str = "Containers should mount their root filesystem read-only.";

pub fn rule() -> impl Rule {
    SimpleRule::new(CODE, NAME, Severity::Warning, DESCRIPTION, check)
}

fn check(ctx: &LintContext) -> Vec<Issue> {
    let mut issues = Vec::new();

    walk_composites(ctx.file, &mut |lit| {
        if !is_container(lit) {
            return;
        }
        // Absent SecurityContext and an explicit `false` are both findings.
        let read_only = lit
            .field("SecurityContext")
            .and_then(nested_record)
            .and_then(|sc| bool_field(sc, "ReadOnlyRootFilesystem"));
        if read_only != Some(true) {
            let name = string_field(lit, "Name").unwrap_or("<unnamed>");
            issues.push(make_issue(
                CODE,
                NAME,
                Severity::Warning,
                format!(
                    "Container `{}` has a writable root filesystem; set `ReadOnlyRootFilesystem: true` and mount writable paths explicitly.",
                    name
                ),
                ctx.path,
                lit.span.line,
                lit.span.column,
            ));
        }
    });

    issues
}
