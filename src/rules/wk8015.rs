//! WK8015: readiness-probe

use crate::matchers::{is_container, string_field, walk_composites};
use crate::rules::{LintContext, Rule, SimpleRule, make_issue};
use crate::types::{Issue, Severity};

const CODE: &str = "WK8015";
const NAME: &str = "readiness-probe";
const DESCRIPTION: &str = "Containers should define a readiness probe.";

pub fn rule() -> impl Rule {
    SimpleRule::new(CODE, NAME, Severity::Warning, DESCRIPTION, check)
}

fn check(ctx: &LintContext) -> Vec<Issue> {
    let mut issues = Vec::new();

    walk_composites(ctx.file, &mut |lit| {
        if !is_container(lit) {
            return;
        }
        if lit.field("ReadinessProbe").is_none() {
            let name = string_field(lit, "Name").unwrap_or("<unnamed>");
            issues.push(make_issue(
                CODE,
                NAME,
                Severity::Warning,
                format!(
                    "Container `{}` has no readiness probe, so traffic reaches it before it can serve.",
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
