//! WK8019: missing-labels

use crate::matchers::{labels_of, resource_kind};
use crate::rules::{LintContext, Rule, SimpleRule, make_issue};
use crate::types::{Issue, Severity};

const CODE: &str = "WK8019";
const NAME: &str = "missing-labels";
const DESCRIPTION: &str = "Resources should carry metadata labels.";

pub fn rule() -> impl Rule {
    SimpleRule::new(CODE, NAME, Severity::Warning, DESCRIPTION, check)
}

fn check(ctx: &LintContext) -> Vec<Issue> {
    let mut issues = Vec::new();

    for decl in &ctx.file.decls {
        let Some(lit) = decl.init.as_composite() else {
            continue;
        };
        let Some(kind) = resource_kind(lit) else {
            continue;
        };
        if labels_of(lit).is_empty() {
            issues.push(make_issue(
                CODE,
                NAME,
                Severity::Warning,
                format!(
                    "{} `{}` has no labels; label resources so they can be selected and grouped.",
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
    fn test_no_violation_labeled() {
        let src = r#"var web = corev1.Pod{
	ObjectMeta: metav1.ObjectMeta{
		Labels: map[string]string{
			"app": "web",
		},
	},
}"#;
        assert!(check_src(src).is_empty());
    }

    #[test]
    fn test_violation_no_metadata() {
        let issues = check_src("var web = corev1.Pod{}");
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("Pod `web`"));
    }

    #[test]
    fn test_violation_empty_labels() {
        let src = "var web = corev1.Pod{\n\tObjectMeta: metav1.ObjectMeta{\n\t\tLabels: map[string]string{},\n\t},\n}";
        assert_eq!(check_src(src).len(), 1);
    }

    #[test]
    fn test_unrecognized_type_skipped() {
        assert!(check_src("var x = m.Helper{}").is_empty());
    }
}
