//! Error types.
//!
//! Cycle handling never produces an error: a self-reference is substituted
//! with the [`CIRCULAR`](crate::CIRCULAR) sentinel and serialization
//! succeeds. The failures that remain are the underlying `serde_json`
//! encoder's own, propagated unchanged as [`Error::Json`]: values JSON
//! fundamentally cannot represent (such as a [`BigInt`](crate::Value::BigInt)
//! that no transform rewrote), and write failures when streaming to an
//! `io::Write` (`serde_json::Error` already wraps those).
//!
//! ## Examples
//!
//! ```rust
//! use num_bigint::BigInt;
//! use safe_json::{to_string, Error, Value};
//!
//! let big: BigInt = "170141183460469231731687303715884105727".parse().unwrap();
//! let result = to_string(&Value::from(big));
//! assert!(matches!(result, Err(Error::Json(_))));
//! ```

use std::fmt;
use thiserror::Error;

/// All errors this crate can return.
#[derive(Debug, Error)]
pub enum Error {
    /// A failure reported by the underlying `serde_json` encoder,
    /// including I/O errors from the writer it streams to.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic message.
    #[error("{0}")]
    Message(String),
}

impl Error {
    /// Creates a generic error from a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use safe_json::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
