//! WK8018: selector-matches-labels
//!
//! A workload whose selector does not match its own pod template labels
//! manages zero pods. Every selector pair must appear verbatim in the
//! template labels; extra template labels are fine.

use crate::matchers::{selector_labels_of, template_labels_of, walk_composites, workload_kind};
use crate::rules::{LintContext, Rule, SimpleRule, make_issue};
use crate::types::{Issue, Severity};

const CODE: &str = "WK8018";
const NAME: &str = "selector-matches-labels";
const DESCRIPTION: &str = "Workload selectors must match their pod template labels.";

pub fn rule() -> impl Rule {
    SimpleRule::new(CODE, NAME, Severity::Error, DESCRIPTION, check)
}

fn check(ctx: &LintContext) -> Vec<Issue> {
    let mut issues = Vec::new();

    walk_composites(ctx.file, &mut |lit| {
        // Bare pods have no selector.
        match workload_kind(lit) {
            None | Some("Pod") => return,
            Some(_) => {}
        }
        let selector = selector_labels_of(lit);
        if selector.is_empty() {
            return;
        }
        let template = template_labels_of(lit);
        let missing: Vec<String> = selector
            .iter()
            .filter(|pair| !template.contains(pair))
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        if !missing.is_empty() {
            issues.push(make_issue(
                CODE,
                NAME,
                Severity::Error,
                format!(
                    "Selector labels [{}] are not present on the pod template, so this workload selects none of its own pods.",
                    missing.join(", ")
                ),
                ctx.path,
                lit.span.line,
                lit.span.column,
            ));
        }
    });

    issues
}
