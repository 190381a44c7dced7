//! WK8002: max-nesting-depth
//!
//! Construction expressions must not nest deeper than a fixed threshold.
//! The fix hoists deeply nested sub-values into their own top-level
//! declarations, innermost first.

use crate::parser::ast::{CompositeLit, EntryKey, Expr, PathExpr, SourceFile, Span, VarDecl, depth};
use crate::rules::{FixOutcome, FixableRule, LintContext, Rule, make_issue};
use crate::types::{Issue, Severity};

const CODE: &str = "WK8002";
const NAME: &str = "max-nesting-depth";
const DESCRIPTION: &str = "Construction expressions must not nest deeper than 5 levels.";

/// Maximum allowed nesting depth of a declaration initializer.
pub const MAX_DEPTH: u32 = 5;

/// Sub-expressions at this depth or deeper are hoisted by the fix.
const EXTRACT_DEPTH: u32 = 4;

pub fn rule() -> impl Rule {
    FixableRule::new(CODE, NAME, Severity::Warning, DESCRIPTION, check, fix)
}

fn check(ctx: &LintContext) -> Vec<Issue> {
    let mut issues = Vec::new();

    for decl in &ctx.file.decls {
        let measured = depth(&decl.init);
        if measured > MAX_DEPTH {
            issues.push(make_issue(
                CODE,
                NAME,
                Severity::Warning,
                format!(
                    "Resource `{}` is nested {} levels deep (maximum is {}); extract nested values into named declarations.",
                    decl.name, measured, MAX_DEPTH
                ),
                ctx.path,
                decl.span.line,
                decl.span.column,
            ));
        }
    }

    issues
}

fn fix(file: &mut SourceFile) -> Vec<FixOutcome> {
    let mut outcomes = Vec::new();
    let mut hoisted: Vec<VarDecl> = Vec::new();

    for decl in &mut file.decls {
        if depth(&decl.init) <= MAX_DEPTH {
            continue;
        }
        let base = decl.name.clone();
        let mut counter = 1u32;
        if let Some(root) = decl.init.as_composite_mut() {
            extract(root, 1, &base, &mut counter, &mut hoisted, &mut outcomes);
        }
    }

    // New declarations go immediately before the first pre-existing one,
    // keeping their extraction order.
    for (i, decl) in hoisted.into_iter().enumerate() {
        file.decls.insert(i, decl);
    }

    outcomes
}

/// Recurse children first so the innermost nesting is hoisted first; then
/// hoist any entry value that is a construction expression sitting at
/// `EXTRACT_DEPTH` or deeper.
fn extract(
    lit: &mut CompositeLit,
    level: u32,
    base: &str,
    counter: &mut u32,
    hoisted: &mut Vec<VarDecl>,
    outcomes: &mut Vec<FixOutcome>,
) {
    for entry in &mut lit.entries {
        let Some(child) = entry.value.as_composite_mut() else {
            continue;
        };
        extract(child, level + 1, base, counter, hoisted, outcomes);

        // A child without a printable type cannot become a declaration.
        if level + 1 < EXTRACT_DEPTH || child.ty.is_none() {
            continue;
        }

        let field_label = match &entry.key {
            EntryKey::Field(name) => name.clone(),
            _ => "Nested".to_string(),
        };
        let var_name = format!("{}{}{}", base, field_label, counter);
        *counter += 1;

        let span = entry.value.span();
        let init = std::mem::replace(
            &mut entry.value,
            Expr::Path(PathExpr {
                segments: vec![var_name.clone()],
                span,
            }),
        );
        let described = init
            .as_composite()
            .and_then(CompositeLit::type_name)
            .unwrap_or("value")
            .to_string();
        hoisted.push(VarDecl {
            name: var_name.clone(),
            init,
            span: Span::default(),
            leading_comments: Vec::new(),
        });
        outcomes.push(FixOutcome::new(format!(
            "extracted nested {} into `{}`",
            described, var_name
        )));
    }
}
