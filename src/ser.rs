//! Cycle-aware serialization.
//!
//! This module implements the traversal that lets a [`Value`] graph with
//! cycles and shared references serialize to JSON. The encoding itself
//! (escaping, number formatting, indentation) is entirely `serde_json`'s
//! job; what lives here is the side-channel ancestor stack that decides,
//! for every node the encoder visits, whether the node is a true cycle
//! (an ancestor of itself on the current path) or merely a shared
//! reference that should serialize again in full.
//!
//! ## How the walk works
//!
//! `serde_json` drives the traversal: serializing a composite recursively
//! serializes its children, which is a depth-first pre-order walk with one
//! callback per node. The private [`Node`] wrapper intercepts each of those
//! callbacks and runs the same procedure for every node:
//!
//! 1. Scalars go straight to the transform; the stack is not touched.
//! 2. For a composite, the stack is first reconciled to the node's true
//!    parent: stale entries left over from already-finished sibling
//!    subtrees are popped until the top of the stack is reference-identical
//!    to the composite currently being expanded. Without this step a
//!    sibling visited after a deep branch would be checked against
//!    ancestors it never had.
//! 3. If the composite is reference-identical to any remaining stack entry
//!    it is its own ancestor: the [`CIRCULAR`] sentinel is passed to the
//!    transform instead, and the encoder never descends into it.
//! 4. Otherwise the composite is pushed and serialized normally.
//!
//! Identity means [`Value::ptr_eq`], never structural equality, so two
//! separately-built but equal objects are never confused, and the same
//! instance appearing at two non-ancestor positions is emitted in full at
//! each occurrence.
//!
//! The stack is allocated fresh for each call and discarded with it;
//! independent calls share no state.
//!
//! ## Usage
//!
//! Most users should use the functions in the crate root:
//!
//! ```rust
//! use safe_json::{to_string, Value};
//!
//! let obj = Value::new_object();
//! obj.insert("a", 1);
//! obj.insert("b", obj.clone());
//!
//! assert_eq!(to_string(&obj).unwrap(), r#"{"a":1,"b":"[Circular]"}"#);
//! ```

use crate::{Error, Number, Result, Spacing, Value};
use serde::ser::{Error as _, SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::ser::PrettyFormatter;
use std::cell::RefCell;
use std::io;

/// The sentinel substituted where a composite would be its own ancestor.
///
/// The sentinel itself is routed through the transform, so a custom
/// transform can compare against this constant and rewrite it.
pub const CIRCULAR: &str = "[Circular]";

/// Per-call traversal state: the ancestor stack and the user transform.
///
/// `parents` holds the composites on the path from the root to the node
/// currently being expanded, in root-first order. Entries are aliasing
/// handles, so membership is an identity test.
struct Walk<'t> {
    parents: Vec<Value>,
    transform: &'t mut dyn FnMut(&str, Value, usize) -> Option<Value>,
}

impl Walk<'_> {
    fn new(transform: &mut dyn FnMut(&str, Value, usize) -> Option<Value>) -> Walk<'_> {
        Walk {
            parents: Vec::new(),
            transform,
        }
    }

    /// Pops stale entries until the top of the stack is the composite
    /// currently being expanded. Pops everything when `parent` is gone
    /// from the stack (or is `None`, at the root).
    fn move_to_current_parent(&mut self, parent: Option<&Value>) {
        while let Some(top) = self.parents.last() {
            if parent.is_some_and(|p| top.ptr_eq(p)) {
                break;
            }
            self.parents.pop();
        }
    }

    /// The per-node procedure. `key` is the member name or decimal index
    /// (`""` for the root); `parent` is the composite whose child this
    /// node is. Returns what the encoder should emit, or `None` to omit
    /// the member.
    fn visit(&mut self, key: &str, value: Value, parent: Option<&Value>) -> Option<Value> {
        // Dates collapse to their ISO string before the transform sees
        // them, the same order `JSON.stringify` applies `toJSON`.
        let value = match value {
            Value::Date(dt) => Value::String(Value::date_to_iso(&dt)),
            other => other,
        };

        if !value.is_composite() {
            let depth = self.parents.len();
            return (self.transform)(key, value, depth);
        }

        self.move_to_current_parent(parent);

        if self.parents.iter().any(|p| p.ptr_eq(&value)) {
            let depth = self.parents.len();
            return (self.transform)(key, Value::from(CIRCULAR), depth);
        }

        self.parents.push(value.clone());
        let depth = self.parents.len() - 1;
        (self.transform)(key, value, depth)
    }
}

/// A post-transform node handed to `serde_json`. Serializing a composite
/// `Node` runs [`Walk::visit`] on each child, which is what turns the
/// encoder's recursion into the cycle-checked walk.
struct Node<'w, 't> {
    value: Value,
    walk: &'w RefCell<Walk<'t>>,
}

impl Serialize for Node<'_, '_> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match &self.value {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(Number::Integer(i)) => serializer.serialize_i64(*i),
            Value::Number(Number::Float(f)) if f.is_finite() => serializer.serialize_f64(*f),
            // Non-finite numbers have no JSON representation and become
            // null, as in JSON.stringify.
            Value::Number(_) => serializer.serialize_unit(),
            Value::String(s) => serializer.serialize_str(s),
            Value::Date(dt) => serializer.serialize_str(&Value::date_to_iso(dt)),
            Value::BigInt(_) => Err(S::Error::custom("do not know how to serialize a BigInt")),
            Value::Array(items) => {
                // Snapshot the children (handle clones) so the transform
                // may mutate the graph without poisoning this borrow.
                let children: Vec<Value> = items.borrow().clone();
                let mut seq = serializer.serialize_seq(Some(children.len()))?;
                for (index, child) in children.into_iter().enumerate() {
                    let key = index.to_string();
                    let emitted = self
                        .walk
                        .borrow_mut()
                        .visit(&key, child, Some(&self.value));
                    // An omitted array element holds its slot as null.
                    let value = emitted.unwrap_or(Value::Null);
                    seq.serialize_element(&Node {
                        value,
                        walk: self.walk,
                    })?;
                }
                seq.end()
            }
            Value::Object(map) => {
                let members: Vec<(String, Value)> = map
                    .borrow()
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect();
                let mut out = serializer.serialize_map(None)?;
                for (key, child) in members {
                    let emitted = self
                        .walk
                        .borrow_mut()
                        .visit(&key, child, Some(&self.value));
                    // An omitted member disappears from the output.
                    if let Some(value) = emitted {
                        out.serialize_entry(&key, &Node {
                            value,
                            walk: self.walk,
                        })?;
                    }
                }
                out.end()
            }
        }
    }
}

impl Serialize for Value {
    /// Serializes with the identity transform and cycle substitution
    /// applied, so a `Value` can be embedded in any serde data structure.
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut identity = |_: &str, value: Value, _: usize| Some(value);
        let walk = RefCell::new(Walk::new(&mut identity));
        let root = walk.borrow_mut().visit("", self.clone(), None);
        Node {
            value: root.unwrap_or(Value::Null),
            walk: &walk,
        }
        .serialize(serializer)
    }
}

/// Writes `value` to `writer`, running `transform` on every visited node.
pub(crate) fn write<W, F>(writer: W, value: &Value, transform: F, spacing: Spacing) -> Result<()>
where
    W: io::Write,
    F: FnMut(&str, Value, usize) -> Option<Value>,
{
    let mut transform = transform;
    let walk = RefCell::new(Walk::new(&mut transform));
    let root = walk.borrow_mut().visit("", value.clone(), None);
    let node = Node {
        // An omitted root still has to produce a document.
        value: root.unwrap_or(Value::Null),
        walk: &walk,
    };
    match spacing.indent() {
        None => {
            let mut serializer = serde_json::Serializer::new(writer);
            node.serialize(&mut serializer)?;
        }
        Some(indent) => {
            let formatter = PrettyFormatter::with_indent(indent.as_bytes());
            let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
            node.serialize(&mut serializer)?;
        }
    }
    Ok(())
}

/// String-producing counterpart of [`write`].
pub(crate) fn stringify<F>(value: &Value, transform: F, spacing: Spacing) -> Result<String>
where
    F: FnMut(&str, Value, usize) -> Option<Value>,
{
    let mut buffer = Vec::with_capacity(128);
    write(&mut buffer, value, transform, spacing)?;
    String::from_utf8(buffer).map_err(|e| Error::custom(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(_: &str, value: Value, _: usize) -> Option<Value> {
        Some(value)
    }

    #[test]
    fn test_cycle_depth_is_reconciled_stack_length() {
        // root -> a -> b -> root
        let root = Value::new_object();
        let a = Value::new_object();
        let b = Value::new_object();
        b.insert("me", root.clone());
        a.insert("b", b);
        root.insert("a", a);

        let mut hits = Vec::new();
        let out = stringify(
            &root,
            |key, value, depth| {
                if value.as_str() == Some(CIRCULAR) {
                    hits.push((key.to_string(), depth));
                }
                Some(value)
            },
            Spacing::None,
        )
        .unwrap();

        assert_eq!(out, r#"{"a":{"b":{"me":"[Circular]"}}}"#);
        assert_eq!(hits, vec![("me".to_string(), 3)]);
    }

    #[test]
    fn test_stale_siblings_are_not_misclassified() {
        // A deep first branch must not leave ancestors on the stack that
        // make the second branch look cyclic.
        let shared = Value::new_object();
        shared.insert("v", 1);
        let deep = Value::new_object();
        deep.insert("inner", shared.clone());
        let root = Value::new_object();
        root.insert("x", deep);
        root.insert("y", shared);

        let out = stringify(&root, identity, Spacing::None).unwrap();
        assert_eq!(out, r#"{"x":{"inner":{"v":1}},"y":{"v":1}}"#);
    }

    #[test]
    fn test_no_state_leaks_between_calls() {
        let root = Value::new_object();
        root.insert("me", root.clone());

        let first = stringify(&root, identity, Spacing::None).unwrap();
        let second = stringify(&root, identity, Spacing::None).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, r#"{"me":"[Circular]"}"#);
    }

    #[test]
    fn test_sentinel_string_in_data_is_not_special() {
        // A plain string that happens to equal the sentinel is just data.
        let root = Value::new_object();
        root.insert("note", CIRCULAR);

        let out = stringify(&root, identity, Spacing::None).unwrap();
        assert_eq!(out, r#"{"note":"[Circular]"}"#);
    }

    #[test]
    fn test_structurally_equal_objects_are_not_cycles() {
        // {"a":{"x":1},"b":{"x":1}} with two distinct instances.
        let first = Value::new_object();
        first.insert("x", 1);
        let second = Value::new_object();
        second.insert("x", 1);
        let root = Value::new_object();
        root.insert("a", first);
        root.insert("b", second);

        let out = stringify(&root, identity, Spacing::None).unwrap();
        assert_eq!(out, r#"{"a":{"x":1},"b":{"x":1}}"#);
    }

    #[test]
    fn test_serde_integration_breaks_cycles() {
        let root = Value::new_object();
        root.insert("me", root.clone());

        // Value implements Serialize, so serde_json can take it directly.
        let text = serde_json::to_string(&root).unwrap();
        assert_eq!(text, r#"{"me":"[Circular]"}"#);
    }
}
