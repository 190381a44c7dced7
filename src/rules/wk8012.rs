//! WK8012: no-host-namespaces

use crate::matchers::{bool_field, is_pod_spec, walk_composites};
use crate::rules::{LintContext, Rule, SimpleRule, make_issue};
use crate::types::{Issue, Severity};

const CODE: &str = "WK8012";
const NAME: &str = "no-host-namespaces";
const DESCRIPTION: &str = "Pods must not share host network, PID, or IPC namespaces.";

const HOST_FLAGS: &[&str] = &["HostNetwork", "HostPID", "HostIPC"];

pub fn rule() -> impl Rule {
    SimpleRule::new(CODE, NAME, Severity::Warning, DESCRIPTION, check)
}

fn check(ctx: &LintContext) -> Vec<Issue> {
    let mut issues = Vec::new();

    walk_composites(ctx.file, &mut |lit| {
        if !is_pod_spec(lit) {
            return;
        }
        // One issue per enabled flag so each can be suppressed or fixed on
        // its own.
        for flag in HOST_FLAGS {
            if bool_field(lit, flag) == Some(true) {
                let span = lit
                    .field(flag)
                    .map(|v| v.span())
                    .unwrap_or(lit.span);
                issues.push(make_issue(
                    CODE,
                    NAME,
                    Severity::Warning,
                    format!(
                        "Pod spec enables `{}`, sharing a host namespace with every other pod on the node.",
                        flag
                    ),
                    ctx.path,
                    span.line,
                    span.column,
                ));
            }
        }
    });

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

    #[test]
    fn test_no_violation_defaults() {
        assert!(check_src("var p = corev1.PodSpec{}").is_empty());
    }

    #[test]
    fn test_no_violation_explicit_false() {
        let src = "var p = corev1.PodSpec{\n\tHostNetwork: false,\n}";
        assert!(check_src(src).is_empty());
    }

    #[test]
    fn test_violation_one_per_flag() {
        let src = "var p = corev1.PodSpec{\n\tHostNetwork: true,\n\tHostPID: true,\n}";
        let issues = check_src(src);
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().any(|i| i.message.contains("HostNetwork")));
        assert!(issues.iter().any(|i| i.message.contains("HostPID")));
    }

    #[test]
    fn test_violation_inside_workload() {
        let src = r#"var web = &appsv1.Deployment{
	Spec: appsv1.DeploymentSpec{
		Template: corev1.PodTemplateSpec{
			Spec: corev1.PodSpec{
				HostIPC: true,
			},
		},
	},
}"#;
        assert_eq!(check_src(src).len(), 1);
    }
}
