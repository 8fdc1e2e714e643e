//! Error types.
//!
//! Only two operations can fail: the canonical encoder, which rejects values it
//! has no textual form for and graphs that loop back on themselves, and Display,
//! whose writer can fail. Deep equality and cycle detection are total.
//!
//! ## Examples
//!
//! ```rust
//! use introspect::{encode, Error, Value};
//!
//! let result = encode(&Value::func("fn()"));
//! assert!(matches!(result, Err(Error::UnsupportedType(_))));
//!
//! if let Err(err) = result {
//!     assert_eq!(err.to_string(), "unsupported type: fn()");
//! }
//! ```

use crate::SlotId;
use std::fmt;
use thiserror::Error;

/// Represents all possible errors of this crate.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// IO error while writing output
    #[error("IO error: {0}")]
    Io(String),

    /// The encoder met a function, channel or raw pointer
    #[error("unsupported type: {0}")]
    UnsupportedType(String),

    /// The encoder reached a heap slot that is already being encoded
    #[error("cyclic value: {0} refers back to itself")]
    Cycle(String),

    /// A slot id that the heap did not issue
    #[error("dangling slot {0}")]
    DanglingSlot(SlotId),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates an unsupported type error naming the offending type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use introspect::{Error, Type};
    ///
    /// let err = Error::unsupported_type(Type::chan(Type::Bool));
    /// assert!(err.to_string().contains("Chan<bool>"));
    /// ```
    pub fn unsupported_type<T: fmt::Display>(ty: T) -> Self {
        Error::UnsupportedType(ty.to_string())
    }

    /// Creates a cycle error naming the type of the revisited slot.
    pub fn cycle<T: fmt::Display>(ty: T) -> Self {
        Error::Cycle(ty.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::io(&err.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
