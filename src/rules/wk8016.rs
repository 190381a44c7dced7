//! WK8016: no-latest-tag
//!
//! Image references must be pinned. A bare name with no tag floats to
//! `latest` implicitly, so it is flagged the same as an explicit `:latest`.
//! There is no auto-fix: picking the right pinned tag needs a human.

use crate::matchers::{image_resolves_to_latest, is_container, string_field, walk_composites};
use crate::rules::{LintContext, Rule, SimpleRule, make_issue};
use crate::types::{Issue, Severity};

const CODE: &str = "WK8016";
const NAME: &str = "no-latest-tag";
const DESCRIPTION: &str = "Container images must be pinned to a specific tag or digest.";

pub fn rule() -> impl Rule {
    SimpleRule::new(CODE, NAME, Severity::Warning, DESCRIPTION, check)
}

fn check(ctx: &LintContext) -> Vec<Issue> {
    let mut issues = Vec::new();

    walk_composites(ctx.file, &mut |lit| {
        if !is_container(lit) {
            return;
        }
        let Some(image) = string_field(lit, "Image") else {
            return;
        };
        if !image_resolves_to_latest(image) {
            return;
        }
        let name = string_field(lit, "Name").unwrap_or("<unnamed>");
        let message = if image.ends_with(":latest") {
            format!(
                "Container `{}` uses the mutable `latest` tag (`{}`); pin a specific version.",
                name, image
            )
        } else {
            format!(
                "Container `{}` image `{}` carries no tag and implicitly floats to `latest`; pin a specific version.",
                name, image
            )
        };
        let span = lit.field("Image").map(|v| v.span()).unwrap_or(lit.span);
        issues.push(make_issue(
            CODE,
            NAME,
            Severity::Warning,
            message,
            ctx.path,
            span.line,
            span.column,
        ));
    });

    issues
}
