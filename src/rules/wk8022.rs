//! WK8022: pod-anti-affinity
//!
//! Multiple replicas landing on one node fail together. Any
//! `Affinity.PodAntiAffinity` block counts, preferred or required.

use crate::matchers::{nested_record, pod_spec_of, replicas_of, workload_kind};
use crate::rules::{LintContext, Rule, SimpleRule, make_issue};
use crate::types::{Issue, Severity};

const CODE: &str = "WK8022";
const NAME: &str = "pod-anti-affinity";
const DESCRIPTION: &str = "Multi-replica workloads should spread replicas with pod anti-affinity.";

pub fn rule() -> impl Rule {
    SimpleRule::new(CODE, NAME, Severity::Info, DESCRIPTION, check)
}

fn check(ctx: &LintContext) -> Vec<Issue> {
    let mut issues = Vec::new();

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
        let has_anti_affinity = pod_spec_of(lit)
            .and_then(|spec| spec.field("Affinity"))
            .and_then(nested_record)
            .and_then(|aff| aff.field("PodAntiAffinity"))
            .is_some();
        if !has_anti_affinity {
            issues.push(make_issue(
                CODE,
                NAME,
                Severity::Info,
                format!(
                    "{} `{}` runs multiple replicas without pod anti-affinity; one node failure can take out all of them.",
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
