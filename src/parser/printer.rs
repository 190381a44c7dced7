//! Canonical re-serialization of a declaration tree.
//!
//! The printer is only invoked after the fix engine has mutated the tree;
//! untouched files are never rewritten. Output is gofmt-shaped: tab
//! indentation, one entry per line, trailing commas, and all attached
//! comments reproduced in place.

use super::ast::{Comment, CompositeLit, Entry, EntryKey, Expr, SourceFile, TypeRef};

/// Serialize a whole file back to source text.
pub fn print_source(file: &SourceFile) -> String {
    let mut out = String::new();

    if let Some(package) = &file.package {
        out.push_str("package ");
        out.push_str(package);
        out.push_str("\n\n");
    }

    if let Some(imports) = &file.imports {
        out.push_str(imports);
        out.push_str("\n\n");
    }

    for (i, decl) in file.decls.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        print_comments(&mut out, &decl.leading_comments, 0);
        out.push_str("var ");
        out.push_str(&decl.name);
        out.push_str(" = ");
        print_expr(&mut out, &decl.init, 0);
        out.push('\n');
    }

    if !file.trailing_comments.is_empty() {
        out.push('\n');
        print_comments(&mut out, &file.trailing_comments, 0);
    }

    out
}

fn print_comments(out: &mut String, comments: &[Comment], indent: usize) {
    for comment in comments {
        push_indent(out, indent);
        out.push_str(&comment.text);
        out.push('\n');
    }
}

fn push_indent(out: &mut String, indent: usize) {
    for _ in 0..indent {
        out.push('\t');
    }
}

fn print_expr(out: &mut String, expr: &Expr, indent: usize) {
    match expr {
        Expr::Ref(inner, _) => {
            out.push('&');
            print_expr(out, inner, indent);
        }
        Expr::Str(s) => {
            if s.raw {
                out.push('`');
                out.push_str(&s.value);
                out.push('`');
            } else {
                out.push('"');
                out.push_str(&escape(&s.value));
                out.push('"');
            }
        }
        Expr::Int(i) => out.push_str(&i.value.to_string()),
        Expr::Bool(b) => out.push_str(if b.value { "true" } else { "false" }),
        Expr::Path(p) => out.push_str(&p.dotted()),
        Expr::Call(call) => {
            out.push_str(&call.callee.dotted());
            out.push('(');
            for (i, arg) in call.args.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                print_expr(out, arg, indent);
            }
            out.push(')');
        }
        Expr::Composite(lit) => print_composite(out, lit, indent),
    }
}

fn print_composite(out: &mut String, lit: &CompositeLit, indent: usize) {
    if let Some(ty) = &lit.ty {
        out.push_str(&type_text(ty));
    }

    if lit.entries.is_empty() {
        out.push_str("{}");
        return;
    }

    out.push_str("{\n");
    for entry in &lit.entries {
        print_entry(out, entry, indent + 1);
    }
    push_indent(out, indent);
    out.push('}');
}

fn print_entry(out: &mut String, entry: &Entry, indent: usize) {
    print_comments(out, &entry.leading_comments, indent);
    push_indent(out, indent);

    match &entry.key {
        EntryKey::Field(name) => {
            out.push_str(name);
            out.push_str(": ");
        }
        EntryKey::Keyed(key) => {
            print_expr(out, key, indent);
            out.push_str(": ");
        }
        EntryKey::Positional => {}
    }

    // Untyped elements of a typed slice/map print without their resolved
    // type prefix, matching how they were written.
    match (&entry.key, &entry.value) {
        (EntryKey::Positional, value) => print_element(out, value, indent),
        (_, value) => print_expr(out, value, indent),
    }

    out.push(',');
    if let Some(trailing) = &entry.trailing_comment {
        out.push(' ');
        out.push_str(&trailing.text);
    }
    out.push('\n');
}

/// Positional slice elements were written untyped; suppress the implied type
/// the parser resolved onto them.
fn print_element(out: &mut String, expr: &Expr, indent: usize) {
    match expr {
        Expr::Composite(lit) => {
            let untyped = CompositeLit {
                ty: None,
                entries: lit.entries.clone(),
                span: lit.span,
            };
            print_composite(out, &untyped, indent);
        }
        Expr::Ref(inner, _) => {
            out.push('&');
            print_element(out, inner, indent);
        }
        other => print_expr(out, other, indent),
    }
}

fn type_text(ty: &TypeRef) -> String {
    match ty {
        TypeRef::Named(segments) => segments.join("."),
        TypeRef::Slice(elem) => format!("[]{}", type_text(elem)),
        TypeRef::Map(key, value) => format!("map[{}]{}", type_text(key), type_text(value)),
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_source;

    fn round_trip(src: &str) -> String {
        print_source(&parse_source(src).unwrap())
    }

    #[test]
    fn test_print_simple_decl() {
        let out = round_trip("var x = corev1.Container{}\n");
        assert_eq!(out, "var x = corev1.Container{}\n");
    }

    #[test]
    fn test_print_is_stable() {
        let src = r#"package workloads

import (
	corev1 "k8s.io/api/core/v1"
)

// web tier
var web = &appsv1.Deployment{
	Spec: appsv1.DeploymentSpec{
		Replicas: ptr.To(3), // two would be safer
	},
}
"#;
        let once = round_trip(src);
        let twice = print_source(&parse_source(&once).unwrap());
        assert_eq!(once, twice, "printing must be a fixed point");
        assert!(once.contains("// web tier"));
        assert!(once.contains("// two would be safer"));
    }

    #[test]
    fn test_print_slice_elements_untyped() {
        let src = r#"var spec = corev1.PodSpec{
	Containers: []corev1.Container{
		{
			Image: "nginx:1.21",
		},
	},
}
"#;
        let out = round_trip(src);
        assert!(out.contains("[]corev1.Container{"));
        // Elements keep their written, untyped form.
        assert!(!out.contains("corev1.Container{\n\t\tcorev1.Container"));
        assert_eq!(out, round_trip(&out));
    }

    #[test]
    fn test_print_map_and_strings() {
        let src = "var labels = map[string]string{\n\t\"app\": \"web\",\n}\n";
        assert_eq!(round_trip(src), src);
    }

    #[test]
    fn test_escapes_round_trip() {
        let src = "var msg = corev1.ConfigMap{\n\tData: \"line1\\nline2\\t\\\"quoted\\\"\",\n}\n";
        assert_eq!(round_trip(src), src);
    }
}
