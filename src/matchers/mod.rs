//! Structural matchers shared by all rules.
//!
//! Matchers recognize and extract data from construction expressions whose
//! declared type matches a known domain shape (containers, pod specs,
//! env vars, ports), independent of which rule is asking. Every matcher is
//! null-safe: an absent field means "no match", never an error, which keeps
//! rule `check` functions total over any parseable input.
//!
//! Known limitation: [`map_literal`] does not resolve a map bound through a
//! named variable (`Labels: sharedLabels`); such maps are treated as empty,
//! so label-matching rules under-report when labels are shared by reference.

use crate::parser::ast::{CompositeLit, EntryKey, Expr, SourceFile};

/// Kinds that carry a pod template and participate in workload rules.
pub const WORKLOAD_KINDS: &[&str] = &[
    "Deployment",
    "StatefulSet",
    "DaemonSet",
    "ReplicaSet",
    "Job",
    "CronJob",
    "Pod",
];

/// All recognized top-level resource kinds, for uniqueness and
/// file-organization rules.
pub const RESOURCE_KINDS: &[&str] = &[
    "Deployment",
    "StatefulSet",
    "DaemonSet",
    "ReplicaSet",
    "Job",
    "CronJob",
    "Pod",
    "Service",
    "ConfigMap",
    "Secret",
    "ServiceAccount",
    "Ingress",
    "NetworkPolicy",
    "PodDisruptionBudget",
    "HorizontalPodAutoscaler",
    "PersistentVolumeClaim",
];

/// Resolve the declared type name of a construction expression,
/// transparently through one reference-taking layer.
pub fn type_name_of(expr: &Expr) -> Option<&str> {
    expr.as_composite().and_then(CompositeLit::type_name)
}

/// The expression bound to a named field, or `None`.
pub fn field_value<'a>(lit: &'a CompositeLit, name: &str) -> Option<&'a Expr> {
    lit.field(name)
}

/// Unwrap a field value that is itself a nested construction expression,
/// again through one reference-taking layer.
pub fn nested_record(expr: &Expr) -> Option<&CompositeLit> {
    expr.as_composite()
}

/// Extract a string literal value, resolving the pointer-to-literal
/// helper-call idiom (`ptr.To("x")`) so wrapped and direct literals match
/// uniformly.
pub fn string_literal(expr: &Expr) -> Option<&str> {
    match expr.unref() {
        Expr::Str(s) => Some(&s.value),
        Expr::Call(call) if call.args.len() == 1 => string_literal(&call.args[0]),
        _ => None,
    }
}

/// Extract an integer literal value, resolving pointer/conversion helper
/// calls (`ptr.To(int32(3))`).
pub fn int_literal(expr: &Expr) -> Option<i64> {
    match expr.unref() {
        Expr::Int(i) => Some(i.value),
        Expr::Call(call) if call.args.len() == 1 => int_literal(&call.args[0]),
        _ => None,
    }
}

/// Extract a boolean literal value, resolving one pointer-helper layer.
pub fn bool_literal(expr: &Expr) -> Option<bool> {
    match expr.unref() {
        Expr::Bool(b) => Some(b.value),
        Expr::Call(call) if call.args.len() == 1 => bool_literal(&call.args[0]),
        _ => None,
    }
}

/// A named field read as a string literal.
pub fn string_field<'a>(lit: &'a CompositeLit, name: &str) -> Option<&'a str> {
    lit.field(name).and_then(string_literal)
}

/// A named field read as an integer. Returns `-1` when the field is absent
/// or not a literal, distinguishable from an explicit `0`.
pub fn int_field(lit: &CompositeLit, name: &str) -> i64 {
    lit.field(name).and_then(int_literal).unwrap_or(-1)
}

/// A named field read as a boolean literal.
pub fn bool_field(lit: &CompositeLit, name: &str) -> Option<bool> {
    lit.field(name).and_then(bool_literal)
}

/// Extract a string-to-string map literal's key/value pairs. Non-literal
/// maps (a variable reference) yield an empty vec; see the module docs.
pub fn map_literal(expr: &Expr) -> Vec<(String, String)> {
    let Some(lit) = expr.as_composite() else {
        return Vec::new();
    };
    lit.entries
        .iter()
        .filter_map(|entry| match &entry.key {
            EntryKey::Keyed(key) => {
                let key = string_literal(key)?;
                let value = string_literal(&entry.value)?;
                Some((key.to_string(), value.to_string()))
            }
            _ => None,
        })
        .collect()
}

/// A named field read as a string map.
pub fn map_field(lit: &CompositeLit, name: &str) -> Vec<(String, String)> {
    lit.field(name).map(map_literal).unwrap_or_default()
}

/// Walk a fixed sequence of nested field names, returning `None` as soon as
/// any hop fails to resolve.
pub fn follow_path<'a>(lit: &'a CompositeLit, path: &[&str]) -> Option<&'a CompositeLit> {
    let mut current = lit;
    for name in path {
        current = current.field(name).and_then(nested_record)?;
    }
    Some(current)
}

pub fn is_container(lit: &CompositeLit) -> bool {
    lit.type_name() == Some("Container")
}

pub fn is_pod_spec(lit: &CompositeLit) -> bool {
    lit.type_name() == Some("PodSpec")
}

pub fn is_env_var(lit: &CompositeLit) -> bool {
    lit.type_name() == Some("EnvVar")
}

pub fn is_port(lit: &CompositeLit) -> bool {
    matches!(lit.type_name(), Some("ContainerPort") | Some("ServicePort"))
}

pub fn is_pdb(lit: &CompositeLit) -> bool {
    lit.type_name() == Some("PodDisruptionBudget")
}

/// The workload kind of a construction expression, if it is one.
pub fn workload_kind(lit: &CompositeLit) -> Option<&str> {
    lit.type_name().filter(|k| WORKLOAD_KINDS.contains(k))
}

/// The recognized resource kind of a construction expression, if any.
pub fn resource_kind(lit: &CompositeLit) -> Option<&str> {
    lit.type_name().filter(|k| RESOURCE_KINDS.contains(k))
}

/// The metadata sub-record (`ObjectMeta:` or `Metadata:`) of a resource.
pub fn metadata_of(lit: &CompositeLit) -> Option<&CompositeLit> {
    lit.field("ObjectMeta")
        .or_else(|| lit.field("Metadata"))
        .and_then(nested_record)
}

/// Resource identity: (namespace, name), defaulting the namespace to
/// `"default"` when absent. `None` when the resource carries no literal name.
pub fn resource_identity(lit: &CompositeLit) -> Option<(String, String)> {
    let meta = metadata_of(lit)?;
    let name = string_field(meta, "Name")?;
    let namespace = string_field(meta, "Namespace").unwrap_or("default");
    Some((namespace.to_string(), name.to_string()))
}

/// Labels attached to a resource's metadata.
pub fn labels_of(lit: &CompositeLit) -> Vec<(String, String)> {
    metadata_of(lit)
        .map(|meta| map_field(meta, "Labels"))
        .unwrap_or_default()
}

/// The pod spec of a workload, following the kind-specific field chain.
pub fn pod_spec_of(lit: &CompositeLit) -> Option<&CompositeLit> {
    match workload_kind(lit)? {
        "Pod" => follow_path(lit, &["Spec"]),
        "CronJob" => follow_path(lit, &["Spec", "JobTemplate", "Spec", "Template", "Spec"]),
        _ => follow_path(lit, &["Spec", "Template", "Spec"]),
    }
}

/// All containers of a pod spec (regular and init).
pub fn containers_of<'a>(pod_spec: &'a CompositeLit) -> Vec<&'a CompositeLit> {
    let mut containers = Vec::new();
    for field in ["Containers", "InitContainers"] {
        if let Some(list) = pod_spec.field(field).and_then(nested_record) {
            for entry in &list.entries {
                if let Some(c) = entry.value.as_composite() {
                    containers.push(c);
                }
            }
        }
    }
    containers
}

/// Declared replica count of a workload; `-1` when unset.
pub fn replicas_of(lit: &CompositeLit) -> i64 {
    follow_path(lit, &["Spec"])
        .map(|spec| int_field(spec, "Replicas"))
        .unwrap_or(-1)
}

/// A workload's selector labels (`Spec.Selector.MatchLabels`).
pub fn selector_labels_of(lit: &CompositeLit) -> Vec<(String, String)> {
    follow_path(lit, &["Spec", "Selector"])
        .map(|sel| map_field(sel, "MatchLabels"))
        .unwrap_or_default()
}

/// A workload's pod template labels (`Spec.Template.ObjectMeta.Labels`).
pub fn template_labels_of(lit: &CompositeLit) -> Vec<(String, String)> {
    follow_path(lit, &["Spec", "Template"])
        .and_then(metadata_of)
        .map(|meta| map_field(meta, "Labels"))
        .unwrap_or_default()
}

/// Whether an image reference resolves to the mutable `latest` tag: an
/// explicit `:latest`, or no tag and no digest at all.
pub fn image_resolves_to_latest(image: &str) -> bool {
    if image.contains('@') {
        return false;
    }
    // Strip the registry/repository part so a registry port is not
    // mistaken for a tag separator.
    let name = image.rsplit('/').next().unwrap_or(image);
    match name.split_once(':') {
        Some((_, tag)) => tag == "latest",
        None => true,
    }
}

/// Visit every construction expression in the file, depth-first.
pub fn walk_composites<'a>(file: &'a SourceFile, f: &mut dyn FnMut(&'a CompositeLit)) {
    for decl in &file.decls {
        walk_expr_composites(&decl.init, f);
    }
}

fn walk_expr_composites<'a>(expr: &'a Expr, f: &mut dyn FnMut(&'a CompositeLit)) {
    match expr {
        Expr::Composite(lit) => {
            f(lit);
            for entry in &lit.entries {
                if let EntryKey::Keyed(key) = &entry.key {
                    walk_expr_composites(key, f);
                }
                walk_expr_composites(&entry.value, f);
            }
        }
        Expr::Ref(inner, _) => walk_expr_composites(inner, f),
        Expr::Call(call) => {
            for arg in &call.args {
                walk_expr_composites(arg, f);
            }
        }
        _ => {}
    }
}

/// Visit every expression node in the file, including keys and call
/// arguments.
pub fn walk_exprs<'a>(file: &'a SourceFile, f: &mut dyn FnMut(&'a Expr)) {
    for decl in &file.decls {
        walk_expr(&decl.init, f);
    }
}

fn walk_expr<'a>(expr: &'a Expr, f: &mut dyn FnMut(&'a Expr)) {
    f(expr);
    match expr {
        Expr::Composite(lit) => {
            for entry in &lit.entries {
                if let EntryKey::Keyed(key) = &entry.key {
                    walk_expr(key, f);
                }
                walk_expr(&entry.value, f);
            }
        }
        Expr::Ref(inner, _) => walk_expr(inner, f),
        Expr::Call(call) => {
            for arg in &call.args {
                walk_expr(arg, f);
            }
        }
        _ => {}
    }
}

/// Visit every construction expression mutably, children first.
pub fn walk_composites_mut(file: &mut SourceFile, f: &mut dyn FnMut(&mut CompositeLit)) {
    for decl in &mut file.decls {
        walk_expr_composites_mut(&mut decl.init, f);
    }
}

fn walk_expr_composites_mut(expr: &mut Expr, f: &mut dyn FnMut(&mut CompositeLit)) {
    match expr {
        Expr::Composite(lit) => {
            for entry in &mut lit.entries {
                walk_expr_composites_mut(&mut entry.value, f);
            }
            f(lit);
        }
        Expr::Ref(inner, _) => walk_expr_composites_mut(inner, f),
        Expr::Call(call) => {
            for arg in &mut call.args {
                walk_expr_composites_mut(arg, f);
            }
        }
        _ => {}
    }
}
