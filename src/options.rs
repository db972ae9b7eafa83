//! Output spacing.
//!
//! [`Spacing`] is the indentation directive handed through to the underlying
//! `serde_json` formatter. It mirrors the `space` argument of
//! `JSON.stringify`: either a number of spaces or a literal indent string,
//! and it has no effect on cycle handling.
//!
//! ## Examples
//!
//! ```rust
//! use safe_json::{to_string_with, Spacing, Value};
//!
//! let obj = Value::new_object();
//! obj.insert("a", 1);
//!
//! let compact = to_string_with(&obj, |_, v, _| Some(v), Spacing::None).unwrap();
//! assert_eq!(compact, r#"{"a":1}"#);
//!
//! let pretty = to_string_with(&obj, |_, v, _| Some(v), Spacing::from(2)).unwrap();
//! assert_eq!(pretty, "{\n  \"a\": 1\n}");
//! ```

/// Indent limit, the same cap `JSON.stringify` applies to its `space`
/// argument.
pub const MAX_INDENT: usize = 10;

/// Indentation directive for serialized output.
///
/// - `None`: compact output, no whitespace.
/// - `Spaces(n)`: indent with `n` spaces per level, capped at
///   [`MAX_INDENT`]; zero means compact.
/// - `Custom(s)`: indent with the first [`MAX_INDENT`] characters of `s`;
///   an empty string means compact.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Spacing {
    #[default]
    None,
    Spaces(usize),
    Custom(String),
}

impl Spacing {
    /// Resolves the directive to the indent string handed to the formatter,
    /// or `None` for compact output.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use safe_json::Spacing;
    ///
    /// assert_eq!(Spacing::None.indent(), None);
    /// assert_eq!(Spacing::Spaces(0).indent(), None);
    /// assert_eq!(Spacing::Spaces(2).indent().as_deref(), Some("  "));
    /// assert_eq!(Spacing::Spaces(99).indent().unwrap().len(), 10);
    /// assert_eq!(Spacing::Custom("\t".into()).indent().as_deref(), Some("\t"));
    /// ```
    #[must_use]
    pub fn indent(&self) -> Option<String> {
        match self {
            Spacing::None => None,
            Spacing::Spaces(n) => {
                let n = (*n).min(MAX_INDENT);
                if n == 0 {
                    None
                } else {
                    Some(" ".repeat(n))
                }
            }
            Spacing::Custom(s) => {
                let s: String = s.chars().take(MAX_INDENT).collect();
                if s.is_empty() {
                    None
                } else {
                    Some(s)
                }
            }
        }
    }
}

impl From<usize> for Spacing {
    fn from(value: usize) -> Self {
        Spacing::Spaces(value)
    }
}

impl From<&str> for Spacing {
    fn from(value: &str) -> Self {
        Spacing::Custom(value.to_string())
    }
}

impl From<String> for Spacing {
    fn from(value: String) -> Self {
        Spacing::Custom(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent_resolution() {
        assert_eq!(Spacing::None.indent(), None);
        assert_eq!(Spacing::Spaces(0).indent(), None);
        assert_eq!(Spacing::Spaces(4).indent().as_deref(), Some("    "));
        assert_eq!(Spacing::Custom(String::new()).indent(), None);
        assert_eq!(Spacing::Custom("--".into()).indent().as_deref(), Some("--"));
    }

    #[test]
    fn test_indent_is_clamped() {
        assert_eq!(Spacing::Spaces(25).indent().unwrap(), " ".repeat(10));
        let long = Spacing::Custom("abcdefghijklmnop".into());
        assert_eq!(long.indent().as_deref(), Some("abcdefghij"));
    }

    #[test]
    fn test_conversions() {
        assert_eq!(Spacing::from(2), Spacing::Spaces(2));
        assert_eq!(Spacing::from("\t"), Spacing::Custom("\t".to_string()));
    }
}
