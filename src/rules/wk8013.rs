//! WK8013: resource-limits

use crate::matchers::{is_container, nested_record, string_field, walk_composites};
use crate::rules::{LintContext, Rule, SimpleRule, make_issue};
use crate::types::{Issue, Severity};

const CODE: &str = "WK8013";
const NAME: &str = "resource-limits";
const DESCRIPTION: &str = "Containers must declare resource limits.";

pub fn rule() -> impl Rule {
    SimpleRule::new(CODE, NAME, Severity::Warning, DESCRIPTION, check)
}

fn check(ctx: &LintContext) -> Vec<Issue> {
    let mut issues = Vec::new();

    walk_composites(ctx.file, &mut |lit| {
        if !is_container(lit) {
            return;
        }
        // Requests alone do not cap consumption; only Limits count.
        let limits = lit
            .field("Resources")
            .and_then(nested_record)
            .and_then(|res| res.field("Limits"))
            .and_then(nested_record)
            .map(|map| map.entries.len())
            .unwrap_or(0);
        if limits == 0 {
            let name = string_field(lit, "Name").unwrap_or("<unnamed>");
            issues.push(make_issue(
                CODE,
                NAME,
                Severity::Warning,
                format!(
                    "Container `{}` has no resource limits and can starve its neighbors; set `Resources.Limits`.",
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
    fn test_no_violation_with_limits() {
        let src = r#"var c = corev1.Container{
	Name: "web",
	Resources: corev1.ResourceRequirements{
		Limits: corev1.ResourceList{
			"cpu":    "500m",
			"memory": "256Mi",
		},
	},
}"#;
        assert!(check_src(src).is_empty());
    }

    #[test]
    fn test_violation_no_resources_block() {
        assert_eq!(
            check_src("var c = corev1.Container{\n\tName: \"web\",\n}").len(),
            1
        );
    }

    #[test]
    fn test_violation_requests_only() {
        let src = r#"var c = corev1.Container{
	Name: "web",
	Resources: corev1.ResourceRequirements{
		Requests: corev1.ResourceList{
			"cpu": "100m",
		},
	},
}"#;
        let issues = check_src(src);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("`web`"));
    }

    #[test]
    fn test_violation_empty_limits() {
        let src = "var c = corev1.Container{\n\tName: \"web\",\n\tResources: corev1.ResourceRequirements{\n\t\tLimits: corev1.ResourceList{},\n\t},\n}";
        assert_eq!(check_src(src).len(), 1);
    }
}
