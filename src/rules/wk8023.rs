//! WK8023: max-resources-per-file

use crate::matchers::resource_kind;
use crate::rules::{LintContext, Rule, SimpleRule, make_issue};
use crate::types::{Issue, Severity};

const CODE: &str = "WK8023";
const NAME: &str = "max-resources-per-file";
const DESCRIPTION: &str = "Files should declare at most 20 resources.";

const MAX_RESOURCES: usize = 20;

pub fn rule() -> impl Rule {
    SimpleRule::new(CODE, NAME, Severity::Warning, DESCRIPTION, check)
}

fn check(ctx: &LintContext) -> Vec<Issue> {
    let count = ctx
        .file
        .decls
        .iter()
        .filter_map(|d| d.init.as_composite())
        .filter(|lit| resource_kind(lit).is_some())
        .count();

    if count > MAX_RESOURCES {
        return vec![make_issue(
            CODE,
            NAME,
            Severity::Warning,
            format!(
                "This file declares {} resources (maximum is {}); split it by component or namespace.",
                count, MAX_RESOURCES
            ),
            ctx.path,
            1,
            1,
        )];
    }

    Vec::new()
}
