//! WK8005: no-hardcoded-secret-env
//!
//! Environment variables whose names suggest sensitive content must not
//! carry inline literal values. `ValueFrom` references are the supported
//! alternative and never trigger.

use crate::matchers::{is_env_var, string_field, walk_composites};
use crate::rules::{LintContext, Rule, SimpleRule, make_issue};
use crate::types::{Issue, Severity};

const CODE: &str = "WK8005";
const NAME: &str = "no-hardcoded-secret-env";
const DESCRIPTION: &str =
    "Sensitive environment variables must reference a secret, not an inline value.";

// `key` subsumes apikey/api_key/private_key and the like.
const SENSITIVE_KEYWORDS: &[&str] = &[
    "password",
    "passwd",
    "secret",
    "token",
    "key",
    "credential",
    "auth",
];

fn is_sensitive_name(name: &str) -> bool {
    let lowered = name.to_lowercase();
    SENSITIVE_KEYWORDS.iter().any(|kw| lowered.contains(kw))
}

pub fn rule() -> impl Rule {
    SimpleRule::new(CODE, NAME, Severity::Error, DESCRIPTION, check)
}

fn check(ctx: &LintContext) -> Vec<Issue> {
    let mut issues = Vec::new();

    walk_composites(ctx.file, &mut |lit| {
        if !is_env_var(lit) {
            return;
        }
        let Some(name) = string_field(lit, "Name") else {
            return;
        };
        if !is_sensitive_name(name) {
            return;
        }
        if let Some(value) = lit.field("Value") {
            issues.push(make_issue(
                CODE,
                NAME,
                Severity::Error,
                format!(
                    "Environment variable `{}` holds an inline value; load it through a secret reference (`ValueFrom`) instead.",
                    name
                ),
                ctx.path,
                value.span().line,
                value.span().column,
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

    fn env(name: &str, value_field: &str) -> String {
        format!(
            "var e = corev1.EnvVar{{\n\tName: \"{}\",\n\t{}\n}}",
            name, value_field
        )
    }

    #[test]
    fn test_no_violation_plain_variable() {
        assert!(check_src(&env("LOG_LEVEL", "Value: \"debug\",")).is_empty());
    }

    #[test]
    fn test_no_violation_value_from() {
        let src = env(
            "DB_PASSWORD",
            "ValueFrom: corev1.EnvVarSource{\n\t\tSecretKeyRef: corev1.SecretKeySelector{},\n\t},",
        );
        assert!(check_src(&src).is_empty());
    }

    #[test]
    fn test_violation_inline_password() {
        let issues = check_src(&env("DB_PASSWORD", "Value: \"hunter2\","));
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("DB_PASSWORD"));
    }

    #[test]
    fn test_violation_case_insensitive_keyword() {
        assert_eq!(check_src(&env("ApiKey", "Value: \"abc\",")).len(), 1);
        assert_eq!(check_src(&env("OAUTH_TOKEN", "Value: \"abc\",")).len(), 1);
    }

    #[test]
    fn test_violation_bare_key_keyword() {
        assert_eq!(check_src(&env("SSH_KEY", "Value: \"abc\",")).len(), 1);
        assert_eq!(check_src(&env("ENCRYPTION_KEY", "Value: \"abc\",")).len(), 1);
    }

    #[test]
    fn test_env_var_inside_container_list() {
        let src = r#"var pod = corev1.PodSpec{
	Containers: []corev1.Container{
		{
			Env: []corev1.EnvVar{
				{
					Name:  "SECRET_KEY",
					Value: "abc123",
				},
			},
		},
	},
}"#;
        assert_eq!(check_src(src).len(), 1);
    }
}
