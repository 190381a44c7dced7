//! WK8008: privileged-container

use crate::matchers::{bool_field, is_container, nested_record, string_field, walk_composites};
use crate::rules::{LintContext, Rule, SimpleRule, make_issue};
use crate::types::{Issue, Severity};

const CODE: &str = "WK8008";
const NAME: &str = "privileged-container";
const DESCRIPTION: &str = "Containers must not run in privileged mode.";

pub fn rule() -> impl Rule {
    SimpleRule::new(CODE, NAME, Severity::Error, DESCRIPTION, check)
}

fn check(ctx: &LintContext) -> Vec<Issue> {
    let mut issues = Vec::new();

    walk_composites(ctx.file, &mut |lit| {
        if !is_container(lit) {
            return;
        }
        let Some(sc) = lit.field("SecurityContext").and_then(nested_record) else {
            return;
        };
        if bool_field(sc, "Privileged") == Some(true) {
            let name = string_field(lit, "Name").unwrap_or("<unnamed>");
            issues.push(make_issue(
                CODE,
                NAME,
                Severity::Error,
                format!(
                    "Container `{}` runs privileged, granting it full access to the host; drop `Privileged` and request specific capabilities instead.",
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
