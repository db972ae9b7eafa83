//! The [`value!`] macro for building acyclic graphs from JSON-like
//! literals. Cycles and shared references are added afterwards by cloning
//! composite handles into the graph.

/// Builds a [`Value`](crate::Value) from a JSON-like literal.
///
/// # Examples
///
/// ```rust
/// use safe_json::value;
///
/// let data = value!({
///     "name": "Alice",
///     "age": 30,
///     "tags": ["rust", "serde"]
/// });
///
/// assert_eq!(data.get("name").and_then(|v| v.as_str().map(String::from)), Some("Alice".to_string()));
/// ```
#[macro_export]
macro_rules! value {
    // Handle null
    (null) => {
        $crate::Value::Null
    };

    // Handle true
    (true) => {
        $crate::Value::Bool(true)
    };

    // Handle false
    (false) => {
        $crate::Value::Bool(false)
    };

    // Handle empty array
    ([]) => {
        $crate::Value::new_array()
    };

    // Handle non-empty array
    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::from(vec![$($crate::value!($elem)),*])
    };

    // Handle empty object
    ({}) => {
        $crate::Value::new_object()
    };

    // Handle non-empty object
    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::Map::new();
        $(
            object.insert($key.to_string(), $crate::value!($value));
        )*
        $crate::Value::from(object)
    }};

    // Fallback: anything with a From<_> for Value conversion
    ($other:expr) => {
        $crate::Value::from($other)
    };
}

#[cfg(test)]
mod tests {
    use crate::{Number, Value};

    #[test]
    fn test_value_macro_primitives() {
        assert_eq!(value!(null), Value::Null);
        assert_eq!(value!(true), Value::Bool(true));
        assert_eq!(value!(false), Value::Bool(false));
        assert_eq!(value!(42), Value::Number(Number::Integer(42)));
        assert_eq!(value!(3.5), Value::Number(Number::Float(3.5)));
        assert_eq!(value!("hello"), Value::String("hello".to_string()));
    }

    #[test]
    fn test_value_macro_arrays() {
        let empty = value!([]);
        assert!(empty.as_array().is_some_and(|a| a.borrow().is_empty()));

        let arr = value!([1, 2, 3]);
        let items = arr.as_array().unwrap().borrow();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0], Value::Number(Number::Integer(1)));
        assert_eq!(items[2], Value::Number(Number::Integer(3)));
    }

    #[test]
    fn test_value_macro_objects() {
        let empty = value!({});
        assert!(empty.as_object().is_some_and(|m| m.borrow().is_empty()));

        let obj = value!({
            "name": "Alice",
            "age": 30
        });

        assert_eq!(
            obj.get("name"),
            Some(Value::String("Alice".to_string()))
        );
        assert_eq!(obj.get("age").and_then(|v| v.as_i64()), Some(30));
    }

    #[test]
    fn test_value_macro_nested() {
        let obj = value!({
            "outer": { "inner": [1, null, true] }
        });

        let inner = obj.get("outer").and_then(|o| o.get("inner")).unwrap();
        assert_eq!(inner.as_array().unwrap().borrow().len(), 3);
    }
}
