//! WK8017: name-required
//!
//! Containers and ports need stable names: unnamed entries cannot be
//! targeted by probes, services, or strategic-merge patches.

use crate::matchers::{is_container, is_port, string_field, walk_composites};
use crate::rules::{LintContext, Rule, SimpleRule, make_issue};
use crate::types::{Issue, Severity};

const CODE: &str = "WK8017";
const NAME: &str = "name-required";
const DESCRIPTION: &str = "Containers and ports must carry a non-empty name.";

pub fn rule() -> impl Rule {
    SimpleRule::new(CODE, NAME, Severity::Warning, DESCRIPTION, check)
}

fn check(ctx: &LintContext) -> Vec<Issue> {
    let mut issues = Vec::new();

    walk_composites(ctx.file, &mut |lit| {
        let kind = if is_container(lit) {
            "container"
        } else if is_port(lit) {
            "port"
        } else {
            return;
        };
        let named = string_field(lit, "Name").is_some_and(|n| !n.is_empty());
        if !named {
            issues.push(make_issue(
                CODE,
                NAME,
                Severity::Warning,
                format!("This {} has no name; give every {} a non-empty `Name`.", kind, kind),
                ctx.path,
                lit.span.line,
                lit.span.column,
            ));
        }
    });

    issues
}
