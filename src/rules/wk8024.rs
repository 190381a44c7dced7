//! WK8024: image-pull-policy
//!
//! Containers that name an image should pin the pull policy explicitly.
//! The fix inserts `IfNotPresent` for pinned images and `Always` for
//! images that float to `latest`, directly after the `Image` field.

use crate::matchers::{
    image_resolves_to_latest, is_container, string_field, walk_composites, walk_composites_mut,
};
use crate::parser::ast::{Entry, Expr, SourceFile, Span, StrLit};
use crate::rules::{FixOutcome, FixableRule, LintContext, Rule, make_issue};
use crate::types::{Issue, Severity};

const CODE: &str = "WK8024";
const NAME: &str = "image-pull-policy";
const DESCRIPTION: &str = "Containers should set an explicit image pull policy.";

pub fn rule() -> impl Rule {
    FixableRule::new(CODE, NAME, Severity::Warning, DESCRIPTION, check, fix)
}

fn needs_policy(lit: &crate::parser::ast::CompositeLit) -> bool {
    is_container(lit) && lit.field("Image").is_some() && lit.field("ImagePullPolicy").is_none()
}

fn check(ctx: &LintContext) -> Vec<Issue> {
    let mut issues = Vec::new();

    walk_composites(ctx.file, &mut |lit| {
        if !needs_policy(lit) {
            return;
        }
        let name = string_field(lit, "Name").unwrap_or("<unnamed>");
        issues.push(make_issue(
            CODE,
            NAME,
            Severity::Warning,
            format!(
                "Container `{}` relies on the implicit image pull policy; set `ImagePullPolicy` explicitly.",
                name
            ),
            ctx.path,
            lit.span.line,
            lit.span.column,
        ));
    });

    issues
}

fn fix(file: &mut SourceFile) -> Vec<FixOutcome> {
    let mut outcomes = Vec::new();

    walk_composites_mut(file, &mut |lit| {
        if !needs_policy(lit) {
            return;
        }
        let image = string_field(lit, "Image").unwrap_or("").to_string();
        let policy = if image_resolves_to_latest(&image) {
            "Always"
        } else {
            "IfNotPresent"
        };
        let entry = Entry::field(
            "ImagePullPolicy",
            Expr::Str(StrLit {
                value: policy.to_string(),
                raw: false,
                span: Span::default(),
            }),
        );
        match lit.field_index("Image") {
            Some(i) => lit.entries.insert(i + 1, entry),
            None => lit.entries.push(entry),
        }
        outcomes.push(FixOutcome::new(format!(
            "set ImagePullPolicy to {} for image `{}`",
            policy, image
        )));
    });

    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_source;
    use crate::parser::printer::print_source;

    fn check_src(src: &str) -> Vec<Issue> {
        let file = parse_source(src).unwrap();
        let ctx = LintContext::new(&file, src, "workloads.go");
        check(&ctx)
    }

    fn container(fields: &str) -> String {
        format!("var c = corev1.Container{{\n\t{}\n}}", fields)
    }

    #[test]
    fn test_no_violation_policy_set() {
        let src = container("Image: \"nginx:1.21\",\n\tImagePullPolicy: \"IfNotPresent\",");
        assert!(check_src(&src).is_empty());
    }

    #[test]
    fn test_no_violation_no_image() {
        // Nothing to pull, nothing to pin.
        assert!(check_src(&container("Name: \"web\",")).is_empty());
    }

    #[test]
    fn test_violation_missing_policy() {
        let issues = check_src(&container("Name: \"web\",\n\tImage: \"nginx:1.21\","));
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("`web`"));
    }

    #[test]
    fn test_fix_pinned_image_gets_if_not_present() {
        let src = container("Image: \"nginx:1.21\",");
        let mut file = parse_source(&src).unwrap();
        let outcomes = fix(&mut file);
        assert_eq!(outcomes.len(), 1);
        assert!(outcomes[0].description.contains("IfNotPresent"));

        let lit = file.decls[0].init.as_composite().unwrap();
        assert_eq!(string_field(lit, "ImagePullPolicy"), Some("IfNotPresent"));
        // Inserted right after Image.
        assert_eq!(lit.field_index("ImagePullPolicy"), Some(1));
    }

    #[test]
    fn test_fix_latest_image_gets_always() {
        let src = container("Image: \"nginx:latest\",");
        let mut file = parse_source(&src).unwrap();
        fix(&mut file);
        let lit = file.decls[0].init.as_composite().unwrap();
        assert_eq!(string_field(lit, "ImagePullPolicy"), Some("Always"));
    }

    #[test]
    fn test_fix_untagged_image_gets_always() {
        let src = container("Image: \"nginx\",");
        let mut file = parse_source(&src).unwrap();
        fix(&mut file);
        let lit = file.decls[0].init.as_composite().unwrap();
        assert_eq!(string_field(lit, "ImagePullPolicy"), Some("Always"));
    }

    #[test]
    fn test_fix_is_idempotent() {
        let src = container("Image: \"nginx:1.21\",");
        let mut file = parse_source(&src).unwrap();
        assert_eq!(fix(&mut file).len(), 1);
        assert!(fix(&mut file).is_empty());
    }

    #[test]
    fn test_fix_reaches_untyped_list_elements() {
        let src = r#"var pod = corev1.PodSpec{
	Containers: []corev1.Container{
		{
			Name:  "web",
			Image: "nginx:1.21",
		},
	},
}"#;
        let mut file = parse_source(src).unwrap();
        assert_eq!(fix(&mut file).len(), 1);
        let printed = print_source(&file);
        assert!(printed.contains("ImagePullPolicy"));
        parse_source(&printed).unwrap();
    }
}
