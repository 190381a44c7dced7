//! WK8004: no-circular-dependency
//!
//! Declarations may reference each other by name, but the reference graph
//! must stay acyclic. Each cycle is reported once, at the declaration where
//! the traversal first entered it.

use std::collections::{HashMap, HashSet};

use crate::parser::ast::{Expr, SourceFile};
use crate::rules::{LintContext, Rule, SimpleRule, make_issue};
use crate::types::{Issue, Severity};

const CODE: &str = "WK8004";
const NAME: &str = "no-circular-dependency";
const DESCRIPTION: &str = "References between declarations must not form a cycle.";

pub fn rule() -> impl Rule {
    SimpleRule::new(CODE, NAME, Severity::Error, DESCRIPTION, check)
}

fn check(ctx: &LintContext) -> Vec<Issue> {
    let decl_names: HashSet<&str> = ctx.file.decls.iter().map(|d| d.name.as_str()).collect();
    let graph = build_graph(ctx.file, &decl_names);

    let mut issues = Vec::new();
    let mut visited: HashSet<&str> = HashSet::new();

    for decl in &ctx.file.decls {
        if visited.contains(decl.name.as_str()) {
            continue;
        }
        let mut path = Vec::new();
        let mut on_path = HashSet::new();
        if let Some(chain) = find_cycle(
            decl.name.as_str(),
            &graph,
            &mut visited,
            &mut path,
            &mut on_path,
        ) {
            // Mark the abandoned search path so the same cycle is not
            // reported again from another member.
            visited.extend(path.iter().copied());
            issues.push(make_issue(
                CODE,
                NAME,
                Severity::Error,
                format!(
                    "Declaration `{}` participates in a reference cycle: {}.",
                    decl.name,
                    chain.join(" -> ")
                ),
                ctx.path,
                decl.span.line,
                decl.span.column,
            ));
        }
    }

    issues
}

/// Adjacency: declaration name to the set of sibling declarations its
/// initializer mentions by name.
fn build_graph<'a>(
    file: &'a SourceFile,
    decl_names: &HashSet<&'a str>,
) -> HashMap<&'a str, Vec<&'a str>> {
    let mut graph = HashMap::new();
    for decl in &file.decls {
        let mut refs = Vec::new();
        collect_refs(&decl.init, decl_names, &mut refs);
        refs.dedup();
        graph.insert(decl.name.as_str(), refs);
    }
    graph
}

fn collect_refs<'a>(expr: &'a Expr, decl_names: &HashSet<&'a str>, out: &mut Vec<&'a str>) {
    match expr {
        Expr::Path(path) => {
            let root = path.root();
            if decl_names.contains(root) {
                out.push(root);
            }
        }
        Expr::Composite(lit) => {
            for entry in &lit.entries {
                if let crate::parser::ast::EntryKey::Keyed(key) = &entry.key {
                    collect_refs(key, decl_names, out);
                }
                collect_refs(&entry.value, decl_names, out);
            }
        }
        Expr::Ref(inner, _) => collect_refs(inner, decl_names, out),
        Expr::Call(call) => {
            for arg in &call.args {
                collect_refs(arg, decl_names, out);
            }
        }
        _ => {}
    }
}

/// Depth-first search for a cycle reachable from `node`. Returns the cycle
/// as a name chain (`a -> b -> a`) the first time one is closed. Nodes are
/// marked visited only once fully explored, so a diamond is not mistaken
/// for a cycle.
fn find_cycle<'a>(
    node: &'a str,
    graph: &HashMap<&'a str, Vec<&'a str>>,
    visited: &mut HashSet<&'a str>,
    path: &mut Vec<&'a str>,
    on_path: &mut HashSet<&'a str>,
) -> Option<Vec<String>> {
    path.push(node);
    on_path.insert(node);

    for &next in graph.get(node).map(Vec::as_slice).unwrap_or_default() {
        if on_path.contains(next) {
            let start = path.iter().position(|&n| n == next).unwrap_or(0);
            let mut chain: Vec<String> = path[start..].iter().map(|s| s.to_string()).collect();
            chain.push(next.to_string());
            return Some(chain);
        }
        if visited.contains(next) {
            continue;
        }
        if let Some(chain) = find_cycle(next, graph, visited, path, on_path) {
            return Some(chain);
        }
    }

    path.pop();
    on_path.remove(node);
    visited.insert(node);
    None
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
    fn test_no_violation_acyclic_chain() {
        let src = "var base = metav1.ObjectMeta{}\nvar web = corev1.Pod{\n\tObjectMeta: base,\n}";
        assert!(check_src(src).is_empty());
    }

    #[test]
    fn test_no_violation_diamond() {
        // Both b and c depend on d; sharing is not a cycle.
        let src = "var d = m.M{}\nvar b = m.M{\n\tX: d,\n}\nvar c = m.M{\n\tX: d,\n}\nvar a = m.M{\n\tX: b,\n\tY: c,\n}";
        assert!(check_src(src).is_empty());
    }

    #[test]
    fn test_violation_two_node_cycle() {
        let src = "var a = m.M{\n\tX: b,\n}\nvar b = m.M{\n\tX: a,\n}";
        let issues = check_src(src);
        assert_eq!(issues.len(), 1);
        assert!(
            issues[0].message.contains("a -> b -> a"),
            "{}",
            issues[0].message
        );
        assert_eq!(issues[0].line, 1);
    }

    #[test]
    fn test_violation_self_reference() {
        let issues = check_src("var a = m.M{\n\tX: a,\n}");
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("a -> a"));
    }

    #[test]
    fn test_cycle_through_call_argument() {
        let src = "var a = m.M{\n\tX: ptr.To(b),\n}\nvar b = m.M{\n\tX: a,\n}";
        assert_eq!(check_src(src).len(), 1);
    }

    #[test]
    fn test_external_names_ignored() {
        // `corev1.ProtocolTCP` roots at a package, not a sibling decl.
        let src = "var a = m.M{\n\tProtocol: corev1.ProtocolTCP,\n}";
        assert!(check_src(src).is_empty());
    }
}
