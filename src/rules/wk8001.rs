//! WK8001: no-function-call-resource
//!
//! Resource values must be direct construction expressions, not results of
//! function calls; calls hide the resource's shape from static analysis.

use crate::rules::{LintContext, Rule, SimpleRule, make_issue};
use crate::types::{Issue, Severity};

const CODE: &str = "WK8001";
const NAME: &str = "no-function-call-resource";
const DESCRIPTION: &str = "Resources must be declared as direct construction expressions.";

pub fn rule() -> impl Rule {
    SimpleRule::new(CODE, NAME, Severity::Error, DESCRIPTION, check)
}

fn check(ctx: &LintContext) -> Vec<Issue> {
    let mut issues = Vec::new();

    for decl in &ctx.file.decls {
        if decl.init.is_call() {
            issues.push(make_issue(
                CODE,
                NAME,
                Severity::Error,
                format!(
                    "Resource `{}` is built by a function call; declare it as a direct construction expression so it can be analyzed.",
                    decl.name
                ),
                ctx.path,
                decl.span.line,
                decl.span.column,
            ));
        }
    }

    issues
}
