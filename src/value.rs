//! Dynamic value graphs.
//!
//! This module provides the [`Value`] enum, the in-memory representation that
//! [`to_string`](crate::to_string) and friends serialize. Unlike a plain JSON
//! tree, composites ([`Value::Array`] and [`Value::Object`]) are shared,
//! mutable cells: the same array or object instance can appear at several
//! positions in a graph, and a composite can (directly or indirectly) contain
//! itself. Serialization breaks such cycles with the
//! [`CIRCULAR`](crate::CIRCULAR) sentinel instead of recursing forever.
//!
//! ## Aliasing semantics
//!
//! `Clone` on a composite clones the *handle*, not the contents. Both clones
//! observe the same children, which is how shared subgraphs and cycles are
//! built:
//!
//! ```rust
//! use safe_json::{to_string, Value};
//!
//! let obj = Value::new_object();
//! obj.insert("a", 1);
//! obj.insert("me", obj.clone()); // cycle: obj contains itself
//!
//! assert_eq!(to_string(&obj).unwrap(), r#"{"a":1,"me":"[Circular]"}"#);
//! ```
//!
//! ## Identity vs. equality
//!
//! Cycle detection uses reference identity ([`Value::ptr_eq`]), never
//! structural comparison: two structurally identical but distinct composites
//! are unrelated as far as the traversal is concerned. `PartialEq` follows
//! the same rule for composites, because structural equality does not
//! terminate on cyclic graphs.

use crate::Map;
use chrono::{DateTime, SecondsFormat, Utc};
use num_bigint::BigInt;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A node in a value graph.
///
/// Scalars are owned directly; composites are reference-counted cells so
/// graphs can share and cycle. See the [module docs](self) for the aliasing
/// rules.
///
/// # Examples
///
/// ```rust
/// use safe_json::Value;
///
/// let null = Value::Null;
/// let num = Value::from(42);
/// let text = Value::from("hello");
///
/// assert!(null.is_null());
/// assert!(num.is_number());
/// assert!(text.is_string());
/// ```
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    /// Rendered as an ISO-8601 string with millisecond precision, the same
    /// text `Date.prototype.toJSON` produces.
    Date(DateTime<Utc>),
    /// JSON has no bigint representation; a `BigInt` that reaches the
    /// encoder fails serialization. A transform may rewrite it first.
    BigInt(BigInt),
    Array(Rc<RefCell<Vec<Value>>>),
    Object(Rc<RefCell<Map>>),
}

/// A numeric value, including the non-finite values JSON cannot represent.
///
/// `Infinity`, `NegativeInfinity` and `NaN` serialize as JSON `null`,
/// matching `JSON.stringify`.
///
/// # Examples
///
/// ```rust
/// use safe_json::Number;
///
/// let integer = Number::Integer(42);
/// assert!(integer.is_integer());
/// assert_eq!(integer.as_i64(), Some(42));
/// assert!(Number::Infinity.is_special());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
    Infinity,
    NegativeInfinity,
    NaN,
}

impl Number {
    /// Returns `true` if this is an integer value.
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_))
    }

    /// Returns `true` if this is a floating-point value.
    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Number::Float(_))
    }

    /// Returns `true` if this is Infinity, -Infinity or NaN.
    #[inline]
    #[must_use]
    pub const fn is_special(&self) -> bool {
        matches!(
            self,
            Number::Infinity | Number::NegativeInfinity | Number::NaN
        )
    }

    /// Converts to `i64` if the value is an integer or a whole float in
    /// range. Special values yield `None`.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Integer(i) => Some(*i),
            Number::Float(f) => {
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                    Some(*f as i64)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Converts to `f64`. Always succeeds.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => *i as f64,
            Number::Float(f) => *f,
            Number::Infinity => f64::INFINITY,
            Number::NegativeInfinity => f64::NEG_INFINITY,
            Number::NaN => f64::NAN,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Float(fl) => write!(f, "{}", fl),
            Number::Infinity => write!(f, "Infinity"),
            Number::NegativeInfinity => write!(f, "-Infinity"),
            Number::NaN => write!(f, "NaN"),
        }
    }
}

macro_rules! number_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Number {
                fn from(value: $ty) -> Self {
                    Number::Integer(value as i64)
                }
            }
        )*
    };
}

number_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Number {
    fn from(value: f32) -> Self {
        Number::Float(value as f64)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

impl Value {
    /// Creates a new, empty object composite.
    #[must_use]
    pub fn new_object() -> Self {
        Value::Object(Rc::new(RefCell::new(Map::new())))
    }

    /// Creates a new, empty array composite.
    #[must_use]
    pub fn new_array() -> Self {
        Value::Array(Rc::new(RefCell::new(Vec::new())))
    }

    /// Returns `true` if the value is null.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` if the value is a boolean.
    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Returns `true` if the value is a number.
    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// Returns `true` if the value is a string.
    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Returns `true` if the value is a date.
    #[inline]
    #[must_use]
    pub const fn is_date(&self) -> bool {
        matches!(self, Value::Date(_))
    }

    /// Returns `true` if the value is a big integer.
    #[inline]
    #[must_use]
    pub const fn is_bigint(&self) -> bool {
        matches!(self, Value::BigInt(_))
    }

    /// Returns `true` if the value is an array.
    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Returns `true` if the value is an object.
    #[inline]
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Returns `true` if the value is a composite (array or object), i.e.
    /// a node the traversal tracks on the ancestor stack.
    #[inline]
    #[must_use]
    pub const fn is_composite(&self) -> bool {
        matches!(self, Value::Array(_) | Value::Object(_))
    }

    /// Reference-identity comparison for composites.
    ///
    /// `true` only when `self` and `other` are handles to the very same
    /// array or object cell. Scalars are never identical to anything.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use safe_json::Value;
    ///
    /// let a = Value::new_object();
    /// let alias = a.clone();
    /// let b = Value::new_object();
    ///
    /// assert!(a.ptr_eq(&alias));
    /// assert!(!a.ptr_eq(&b));
    /// assert!(!Value::from(1).ptr_eq(&Value::from(1)));
    /// ```
    #[must_use]
    pub fn ptr_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// If the value is a boolean, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is a string, returns a reference to it. Otherwise
    /// returns `None`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is an integer or whole float, returns it as `i64`.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    /// If the value is a number, returns it as `f64`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(n.as_f64()),
            _ => None,
        }
    }

    /// If the value is an array, returns a handle to its element cell.
    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Rc<RefCell<Vec<Value>>>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// If the value is an object, returns a handle to its member cell.
    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&Rc<RefCell<Map>>> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// If the value is a date, returns it.
    #[inline]
    #[must_use]
    pub fn as_date(&self) -> Option<&DateTime<Utc>> {
        match self {
            Value::Date(dt) => Some(dt),
            _ => None,
        }
    }

    /// If the value is a big integer, returns a reference to it.
    #[inline]
    #[must_use]
    pub fn as_bigint(&self) -> Option<&BigInt> {
        match self {
            Value::BigInt(bi) => Some(bi),
            _ => None,
        }
    }

    /// Inserts a member into an object, returning the previous value for
    /// that key. Does nothing and returns `None` when `self` is not an
    /// object.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use safe_json::Value;
    ///
    /// let obj = Value::new_object();
    /// assert!(obj.insert("a", 1).is_none());
    /// assert!(obj.insert("a", 2).is_some());
    /// ```
    pub fn insert(&self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        match self {
            Value::Object(map) => map.borrow_mut().insert(key.into(), value.into()),
            _ => None,
        }
    }

    /// Appends an element to an array. Does nothing when `self` is not an
    /// array.
    pub fn push(&self, value: impl Into<Value>) {
        if let Value::Array(items) = self {
            items.borrow_mut().push(value.into());
        }
    }

    /// Looks up an object member by key, returning an aliasing clone of it.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        match self {
            Value::Object(map) => map.borrow().get(key).cloned(),
            _ => None,
        }
    }

    pub(crate) fn date_to_iso(dt: &DateTime<Utc>) -> String {
        dt.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

impl PartialEq for Value {
    /// Scalars compare structurally; composites compare by identity.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::BigInt(a), Value::BigInt(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    /// Composites print shallowly (kind and length only); recursing into
    /// children would overflow the stack on cyclic graphs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Bool(b) => write!(f, "Bool({})", b),
            Value::Number(n) => write!(f, "Number({:?})", n),
            Value::String(s) => write!(f, "String({:?})", s),
            Value::Date(dt) => write!(f, "Date({})", Value::date_to_iso(dt)),
            Value::BigInt(bi) => write!(f, "BigInt({})", bi),
            Value::Array(items) => match items.try_borrow() {
                Ok(items) => write!(f, "Array(len = {})", items.len()),
                Err(_) => f.write_str("Array(<borrowed>)"),
            },
            Value::Object(map) => match map.try_borrow() {
                Ok(map) => write!(f, "Object(len = {})", map.len()),
                Err(_) => f.write_str("Object(<borrowed>)"),
            },
        }
    }
}

impl fmt::Display for Value {
    /// Renders the cycle-safe JSON text, with `"[Circular]"` substituted
    /// at self-references. Fails (with `fmt::Error`) only when the encoder
    /// rejects the value, e.g. for a `BigInt`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = crate::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

// TryFrom implementations for extracting scalars from a Value
impl TryFrom<Value> for i64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match &value {
            Value::Number(n) => n
                .as_i64()
                .ok_or_else(|| crate::Error::custom(format!("cannot convert {} to i64", n))),
            _ => Err(crate::Error::custom(format!(
                "expected integer, found {:?}",
                value
            ))),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match &value {
            Value::Number(n) => Ok(n.as_f64()),
            _ => Err(crate::Error::custom(format!(
                "expected number, found {:?}",
                value
            ))),
        }
    }
}

impl TryFrom<Value> for bool {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Bool(b) => Ok(b),
            _ => Err(crate::Error::custom(format!(
                "expected bool, found {:?}",
                value
            ))),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::String(s) => Ok(s),
            _ => Err(crate::Error::custom(format!(
                "expected string, found {:?}",
                value
            ))),
        }
    }
}

// From implementations for building values from primitives
impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        Value::Number(value)
    }
}

macro_rules! value_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Number(Number::from(value))
                }
            }
        )*
    };
}

value_from_number!(i8, i16, i32, i64, u8, u16, u32, f32, f64);

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::Date(value)
    }
}

impl From<BigInt> for Value {
    fn from(value: BigInt) -> Self {
        Value::BigInt(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(Rc::new(RefCell::new(value)))
    }
}

impl From<Map> for Value {
    fn from(value: Map) -> Self {
        Value::Object(Rc::new(RefCell::new(value)))
    }
}
