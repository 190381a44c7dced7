//! WK8003: duplicate-resource
//!
//! Two resources in the same file must not share a (namespace, name)
//! identity. The namespace defaults to `default` when absent.

use std::collections::HashMap;

use crate::matchers::{resource_identity, resource_kind};
use crate::rules::{LintContext, Rule, SimpleRule, make_issue};
use crate::types::{Issue, Severity};

const CODE: &str = "WK8003";
const NAME: &str = "duplicate-resource";
const DESCRIPTION: &str = "Resource identities (namespace, name) must be unique within a file.";

pub fn rule() -> impl Rule {
    SimpleRule::new(CODE, NAME, Severity::Error, DESCRIPTION, check)
}

fn check(ctx: &LintContext) -> Vec<Issue> {
    let mut issues = Vec::new();
    // Identity -> (variable name, line) of the first declaration.
    let mut seen: HashMap<(String, String), (String, u32)> = HashMap::new();

    for decl in &ctx.file.decls {
        let Some(lit) = decl.init.as_composite() else {
            continue;
        };
        if resource_kind(lit).is_none() {
            continue;
        }
        let Some(identity) = resource_identity(lit) else {
            continue;
        };

        match seen.get(&identity) {
            Some((first_var, first_line)) => {
                issues.push(make_issue(
                    CODE,
                    NAME,
                    Severity::Error,
                    format!(
                        "Resource `{}` duplicates the identity {}/{} first declared by `{}` on line {}.",
                        decl.name, identity.0, identity.1, first_var, first_line
                    ),
                    ctx.path,
                    decl.span.line,
                    decl.span.column,
                ));
            }
            None => {
                seen.insert(identity, (decl.name.clone(), decl.span.line));
            }
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

    fn pod(var: &str, name: &str, namespace: Option<&str>) -> String {
        let ns = namespace
            .map(|ns| format!("\n\t\tNamespace: \"{}\",", ns))
            .unwrap_or_default();
        format!(
            "var {} = corev1.Pod{{\n\tObjectMeta: metav1.ObjectMeta{{\n\t\tName: \"{}\",{}\n\t}},\n}}",
            var, name, ns
        )
    }

    #[test]
    fn test_no_violation_distinct_names() {
        let src = format!("{}\n{}", pod("a", "web", None), pod("b", "api", None));
        assert!(check_src(&src).is_empty());
    }

    #[test]
    fn test_no_violation_distinct_namespaces() {
        let src = format!(
            "{}\n{}",
            pod("a", "web", Some("prod")),
            pod("b", "web", Some("staging"))
        );
        assert!(check_src(&src).is_empty());
    }

    #[test]
    fn test_violation_same_identity() {
        let src = format!("{}\n{}", pod("a", "web", None), pod("b", "web", None));
        let issues = check_src(&src);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("`a`"), "{}", issues[0].message);
        assert!(issues[0].message.contains("line 1"));
        assert!(issues[0].message.contains("default/web"));
    }

    #[test]
    fn test_absent_namespace_collides_with_explicit_default() {
        let src = format!(
            "{}\n{}",
            pod("a", "web", None),
            pod("b", "web", Some("default"))
        );
        assert_eq!(check_src(&src).len(), 1);
    }

    #[test]
    fn test_unnamed_resources_are_skipped() {
        let src = "var a = corev1.Pod{}\nvar b = corev1.Pod{}";
        assert!(check_src(src).is_empty());
    }
}
