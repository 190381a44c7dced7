//! WK8011: drop-capabilities

use crate::matchers::{is_container, nested_record, string_field, walk_composites};
use crate::rules::{LintContext, Rule, SimpleRule, make_issue};
use crate::types::{Issue, Severity};

const CODE: &str = "WK8011";
const NAME: &str = "drop-capabilities";
const DESCRIPTION: &str = "Containers should drop Linux capabilities they do not use.";

pub fn rule() -> impl Rule {
    SimpleRule::new(CODE, NAME, Severity::Warning, DESCRIPTION, check)
}

fn check(ctx: &LintContext) -> Vec<Issue> {
    let mut issues = Vec::new();

    walk_composites(ctx.file, &mut |lit| {
        if !is_container(lit) {
            return;
        }
        let drops = lit
            .field("SecurityContext")
            .and_then(nested_record)
            .and_then(|sc| sc.field("Capabilities"))
            .and_then(nested_record)
            .and_then(|caps| caps.field("Drop"))
            .and_then(nested_record)
            .map(|list| list.entries.len())
            .unwrap_or(0);
        if drops == 0 {
            let name = string_field(lit, "Name").unwrap_or("<unnamed>");
            issues.push(make_issue(
                CODE,
                NAME,
                Severity::Warning,
                format!(
                    "Container `{}` keeps its default capability set; drop unused capabilities (usually `ALL`).",
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
    fn test_no_violation_drop_all() {
        let src = r#"var c = corev1.Container{
	Name: "web",
	SecurityContext: corev1.SecurityContext{
		Capabilities: corev1.Capabilities{
			Drop: []corev1.Capability{
				"ALL",
			},
		},
	},
}"#;
        assert!(check_src(src).is_empty());
    }

    #[test]
    fn test_violation_no_capabilities_block() {
        assert_eq!(
            check_src("var c = corev1.Container{\n\tName: \"web\",\n}").len(),
            1
        );
    }

    #[test]
    fn test_violation_empty_drop_list() {
        let src = "var c = corev1.Container{\n\tName: \"web\",\n\tSecurityContext: corev1.SecurityContext{\n\t\tCapabilities: corev1.Capabilities{\n\t\t\tDrop: []corev1.Capability{},\n\t\t},\n\t},\n}";
        assert_eq!(check_src(src).len(), 1);
    }
}
