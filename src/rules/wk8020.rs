//! WK8020: minimum-replicas
//!
//! Applies to the replicated workload kinds only; DaemonSets scale with
//! nodes and Jobs are expected to terminate. An unset replica count
//! defaults to 1 and is treated as such.

use crate::matchers::{replicas_of, workload_kind};
use crate::rules::{LintContext, Rule, SimpleRule, make_issue};
use crate::types::{Issue, Severity};

const CODE: &str = "WK8020";
const NAME: &str = "minimum-replicas";
const DESCRIPTION: &str = "Replicated workloads should run at least 2 replicas.";

const REPLICATED_KINDS: &[&str] = &["Deployment", "StatefulSet", "ReplicaSet"];

pub fn rule() -> impl Rule {
    SimpleRule::new(CODE, NAME, Severity::Info, DESCRIPTION, check)
}

fn check(ctx: &LintContext) -> Vec<Issue> {
    let mut issues = Vec::new();

    for decl in &ctx.file.decls {
        let Some(lit) = decl.init.as_composite() else {
            continue;
        };
        let Some(kind) = workload_kind(lit).filter(|k| REPLICATED_KINDS.contains(k)) else {
            continue;
        };
        let replicas = match replicas_of(lit) {
            -1 => 1,
            n => n,
        };
        if replicas < 2 {
            issues.push(make_issue(
                CODE,
                NAME,
                Severity::Info,
                format!(
                    "{} `{}` runs {} replica(s); a single replica means downtime on every restart.",
                    kind, decl.name, replicas
                ),
                ctx.path,
                decl.span.line,
                decl.span.column,
            ));
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_source;

    fn check_src(src: &str) -> Vec<Issue> {
        let file = parse_source(src).unwrap();
        let ctx = LintContext::new(&file, src, "workloads.go");
        check(&ctx)
    }

    fn deployment(replicas: &str) -> String {
        format!(
            "var web = &appsv1.Deployment{{\n\tSpec: appsv1.DeploymentSpec{{\n\t\t{}\n\t}},\n}}",
            replicas
        )
    }

    #[test]
    fn test_no_violation_two_replicas() {
        assert!(check_src(&deployment("Replicas: ptr.To(int32(2)),")).is_empty());
    }

    #[test]
    fn test_violation_single_replica() {
        let issues = check_src(&deployment("Replicas: ptr.To(int32(1)),"));
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("1 replica"));
    }

    #[test]
    fn test_violation_unset_defaults_to_one() {
        assert_eq!(check_src(&deployment("")).len(), 1);
    }

    #[test]
    fn test_daemonset_exempt() {
        let src = "var agent = &appsv1.DaemonSet{\n\tSpec: appsv1.DaemonSetSpec{},\n}";
        assert!(check_src(src).is_empty());
    }

    #[test]
    fn test_zero_replicas_flagged() {
        assert_eq!(check_src(&deployment("Replicas: ptr.To(int32(0)),")).len(), 1);
    }
}
