//! WK8021: pod-disruption-budget
//!
//! Multi-replica workloads should be covered by a PodDisruptionBudget in
//! the same file. Coverage means some budget's selector set is a non-empty
//! subset of the workload's own selector labels.

use crate::matchers::{is_pdb, replicas_of, selector_labels_of, workload_kind};
use crate::parser::ast::CompositeLit;
use crate::rules::{LintContext, Rule, SimpleRule, make_issue};
use crate::types::{Issue, Severity};

const CODE: &str = "WK8021";
const NAME: &str = "pod-disruption-budget";
const DESCRIPTION: &str = "Multi-replica workloads should have a PodDisruptionBudget.";

pub fn rule() -> impl Rule {
    SimpleRule::new(CODE, NAME, Severity::Info, DESCRIPTION, check)
}

fn check(ctx: &LintContext) -> Vec<Issue> {
    let mut issues = Vec::new();

    let budgets: Vec<Vec<(String, String)>> = ctx
        .file
        .decls
        .iter()
        .filter_map(|d| d.init.as_composite())
        .filter(|lit| is_pdb(lit))
        .map(selector_labels_of)
        .collect();

    for decl in &ctx.file.decls {
        let Some(lit) = decl.init.as_composite() else {
            continue;
        };
        let Some(kind) = workload_kind(lit) else {
            continue;
        };
        if replicas_of(lit) < 2 {
            continue;
        }
        if !covered(lit, &budgets) {
            issues.push(make_issue(
                CODE,
                NAME,
                Severity::Info,
                format!(
                    "{} `{}` runs multiple replicas but no PodDisruptionBudget in this file selects it.",
                    kind, decl.name
                ),
                ctx.path,
                decl.span.line,
                decl.span.column,
            ));
        }
    }

    issues
}

fn covered(workload: &CompositeLit, budgets: &[Vec<(String, String)>]) -> bool {
    let labels = selector_labels_of(workload);
    budgets.iter().any(|budget| {
        !budget.is_empty() && budget.iter().all(|pair| labels.contains(pair))
    })
}
