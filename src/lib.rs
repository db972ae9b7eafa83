//! # safe_json
//!
//! Cycle-tolerant JSON serialization built on `serde_json`.
//!
//! ## What problem does this solve?
//!
//! A naive depth-first serializer recurses forever (or overflows the
//! stack) when a value transitively contains itself. `safe_json` models
//! values as graphs whose composites can be shared and cyclic, and breaks
//! each cycle at the exact position where a composite would become its own
//! ancestor, substituting the `"[Circular]"` sentinel there. Shared but
//! non-cyclic references are left alone: each occurrence serializes again
//! in full.
//!
//! All actual JSON encoding (escaping, number formatting, indentation)
//! is delegated to `serde_json`. This crate contributes the value graph
//! model, the ancestor-tracking traversal, and a per-node transform hook.
//!
//! ## Quick Start
//!
//! ```rust
//! use safe_json::{to_string, Value};
//!
//! let obj = Value::new_object();
//! obj.insert("a", 1);
//! obj.insert("b", obj.clone()); // obj now contains itself
//!
//! assert_eq!(to_string(&obj).unwrap(), r#"{"a":1,"b":"[Circular]"}"#);
//! ```
//!
//! ## Per-node transforms
//!
//! Every node the encoder visits is passed through a transform receiving
//! its key (property name or array index, `""` for the root), its value
//! (already cycle-substituted if applicable) and its depth. The transform
//! decides what is emitted: the value unchanged, a rewritten value, or
//! `None` to omit the member:
//!
//! ```rust
//! use safe_json::{to_string_with, Spacing, Value};
//!
//! let obj = Value::new_object();
//! obj.insert("password", "hunter2");
//! obj.insert("user", "alice");
//!
//! let redacted = to_string_with(
//!     &obj,
//!     |key, value, _depth| {
//!         if key == "password" {
//!             Some(Value::from("<redacted>"))
//!         } else {
//!             Some(value)
//!         }
//!     },
//!     Spacing::None,
//! )
//! .unwrap();
//!
//! assert_eq!(redacted, r#"{"password":"<redacted>","user":"alice"}"#);
//! ```
//!
//! The sentinel is itself routed through the transform, so comparing
//! against [`CIRCULAR`] lets a transform distinguish or rewrite cycle
//! positions.
//!
//! ## Formatting
//!
//! [`Spacing`] mirrors the `space` argument of `JSON.stringify` (a number
//! of spaces or a literal indent string) and is handed through to
//! `serde_json`'s pretty formatter verbatim; it has no effect on cycle
//! handling.
//!
//! ## What this crate does not do
//!
//! - It does not deduplicate shared non-cyclic references; output can be
//!   larger than minimal by design.
//! - It does not parse JSON. Decode with `serde_json` (or any JSON
//!   reader).

pub mod error;
pub mod macros;
pub mod map;
pub mod options;
pub mod ser;
pub mod value;

pub use error::{Error, Result};
pub use map::Map;
pub use options::{Spacing, MAX_INDENT};
pub use ser::CIRCULAR;
pub use value::{Number, Value};

use std::io;

/// Serializes a value graph to a compact JSON string.
///
/// Cycles become the [`CIRCULAR`] sentinel; everything else serializes as
/// `serde_json` would.
///
/// # Examples
///
/// ```rust
/// use safe_json::{to_string, Value};
///
/// let list = Value::new_array();
/// list.push(1);
/// list.push(list.clone());
///
/// assert_eq!(to_string(&list).unwrap(), r#"[1,"[Circular]"]"#);
/// ```
///
/// # Errors
///
/// Returns an error if the encoder rejects a value, e.g. a
/// [`BigInt`](Value::BigInt).
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string(value: &Value) -> Result<String> {
    ser::stringify(value, |_, value, _| Some(value), Spacing::None)
}

/// Serializes a value graph to a pretty-printed JSON string with two-space
/// indentation.
///
/// # Errors
///
/// Returns an error if the encoder rejects a value.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_pretty(value: &Value) -> Result<String> {
    ser::stringify(value, |_, value, _| Some(value), Spacing::Spaces(2))
}

/// Serializes a value graph with a per-node transform and explicit spacing.
///
/// The transform is invoked for every node the encoder visits, with the
/// node's key, its (possibly cycle-substituted) value, and its depth:
/// `0` for the root, the nesting level below that. Returning `None` omits
/// an object member, leaves `null` in an array slot, and renders the whole
/// document as `null` when applied to the root.
///
/// # Examples
///
/// ```rust
/// use safe_json::{to_string_with, Spacing, Value, CIRCULAR};
///
/// let obj = Value::new_object();
/// obj.insert("a", 2);
/// obj.insert("b", obj.clone());
///
/// let out = to_string_with(
///     &obj,
///     |_, value, _| {
///         if value.as_str() == Some(CIRCULAR) {
///             Some(Value::from("<loop>"))
///         } else {
///             Some(value)
///         }
///     },
///     Spacing::None,
/// )
/// .unwrap();
///
/// assert_eq!(out, r#"{"a":2,"b":"<loop>"}"#);
/// ```
///
/// # Errors
///
/// Returns an error if the encoder rejects a value.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with<F>(value: &Value, transform: F, spacing: Spacing) -> Result<String>
where
    F: FnMut(&str, Value, usize) -> Option<Value>,
{
    ser::stringify(value, transform, spacing)
}

/// Serializes a value graph to a writer as compact JSON.
///
/// # Examples
///
/// ```rust
/// use safe_json::{to_writer, Value};
///
/// let obj = Value::new_object();
/// obj.insert("a", 1);
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &obj).unwrap();
/// assert_eq!(buffer, br#"{"a":1}"#);
/// ```
///
/// # Errors
///
/// Returns an error if serialization fails or writing fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W>(writer: W, value: &Value) -> Result<()>
where
    W: io::Write,
{
    ser::write(writer, value, |_, value, _| Some(value), Spacing::None)
}

/// Serializes a value graph to a writer with a per-node transform and
/// explicit spacing.
///
/// # Errors
///
/// Returns an error if serialization fails or writing fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with<W, F>(writer: W, value: &Value, transform: F, spacing: Spacing) -> Result<()>
where
    W: io::Write,
    F: FnMut(&str, Value, usize) -> Option<Value>,
{
    ser::write(writer, value, transform, spacing)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_string_acyclic() {
        let obj = Value::new_object();
        obj.insert("x", 1);
        obj.insert("y", "two");
        assert_eq!(to_string(&obj).unwrap(), r#"{"x":1,"y":"two"}"#);
    }

    #[test]
    fn test_to_string_pretty_matches_two_space_indent() {
        let obj = Value::new_object();
        obj.insert("x", 1);
        let pretty = to_string_pretty(&obj).unwrap();
        let explicit =
            to_string_with(&obj, |_, v, _| Some(v), Spacing::Spaces(2)).unwrap();
        assert_eq!(pretty, explicit);
    }

    #[test]
    fn test_scalar_roots() {
        assert_eq!(to_string(&Value::from(42)).unwrap(), "42");
        assert_eq!(to_string(&Value::from("hi")).unwrap(), r#""hi""#);
        assert_eq!(to_string(&Value::Null).unwrap(), "null");
        assert_eq!(to_string(&Value::from(true)).unwrap(), "true");
    }

    #[test]
    fn test_to_writer_roundtrip_with_to_string() {
        let obj = Value::new_object();
        obj.insert("me", obj.clone());

        let mut buffer = Vec::new();
        to_writer(&mut buffer, &obj).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), to_string(&obj).unwrap());
    }

    #[test]
    fn test_display_renders_safe_json() {
        let obj = Value::new_object();
        obj.insert("me", obj.clone());
        assert_eq!(obj.to_string(), r#"{"me":"[Circular]"}"#);
    }
}
