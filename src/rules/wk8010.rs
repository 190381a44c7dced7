//! WK8010: run-as-non-root

use crate::matchers::{bool_field, is_container, nested_record, string_field, walk_composites};
use crate::rules::{LintContext, Rule, SimpleRule, make_issue};
use crate::types::{Issue, Severity};

const CODE: &str = "WK8010";
const NAME: &str = "run-as-non-root";
const DESCRIPTION: &str = "Containers should declare RunAsNonRoot.";

pub fn rule() -> impl Rule {
    SimpleRule::new(CODE, NAME, Severity::Warning, DESCRIPTION, check)
}

fn check(ctx: &LintContext) -> Vec<Issue> {
    let mut issues = Vec::new();

    walk_composites(ctx.file, &mut |lit| {
        if !is_container(lit) {
            return;
        }
        let non_root = lit
            .field("SecurityContext")
            .and_then(nested_record)
            .and_then(|sc| bool_field(sc, "RunAsNonRoot"));
        if non_root != Some(true) {
            let name = string_field(lit, "Name").unwrap_or("<unnamed>");
            issues.push(make_issue(
                CODE,
                NAME,
                Severity::Warning,
                format!(
                    "Container `{}` may run as root; set `RunAsNonRoot: true` in its security context.",
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
