//! Configuration for the traversals.
//!
//! - [`DisplayOptions`]: traversal budget and header line of the Display engine
//! - [`Budget`]: how much of a graph Display is allowed to walk
//! - [`EncodeOptions`]: float formatting of the canonical encoder
//! - [`EqualOptions`]: float tolerance of deep equality
//!
//! ## Examples
//!
//! ```rust
//! use introspect::{display_with_options, Budget, DisplayOptions, Value};
//!
//! let options = DisplayOptions::new()
//!     .with_budget(Budget::Calls(50))
//!     .with_header(false);
//!
//! let mut out = Vec::new();
//! display_with_options(&mut out, "n", &Value::from(7), &options).unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), "n = 7\n");
//! ```

/// Depth used by [`Budget::default`].
pub const DEFAULT_MAX_DEPTH: usize = 20;

/// Default tolerance of [`EqualOptions`], applied to each real component.
pub const FLOAT_TOLERANCE: f64 = 1.0e-10;

/// Limit on how much of a graph Display walks.
///
/// Exceeding the budget silently ends the affected branch (`Depth`) or the whole
/// dump (`Calls`); nothing is written for the skipped values.
///
/// # Examples
///
/// ```rust
/// use introspect::Budget;
///
/// assert_eq!(Budget::default(), Budget::Depth(20));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Budget {
    /// Stop descending below this many nested visits on any one path.
    Depth(usize),
    /// Stop after this many visits in total across the whole dump.
    Calls(usize),
    Unbounded,
}

impl Default for Budget {
    fn default() -> Self {
        Budget::Depth(DEFAULT_MAX_DEPTH)
    }
}

/// Configuration options for Display.
///
/// # Examples
///
/// ```rust
/// use introspect::{Budget, DisplayOptions};
///
/// let options = DisplayOptions::new();
/// assert_eq!(options.budget, Budget::Depth(20));
/// assert!(options.header);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayOptions {
    pub budget: Budget,
    /// Emit the `Display <label> (<type>)` line before the dump.
    pub header: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        DisplayOptions {
            budget: Budget::default(),
            header: true,
        }
    }
}

impl DisplayOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_budget(mut self, budget: Budget) -> Self {
        self.budget = budget;
        self
    }

    #[must_use]
    pub fn with_header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }
}

/// Configuration options for the canonical encoder.
///
/// # Examples
///
/// ```rust
/// use introspect::{encode_with_options, EncodeOptions, Value};
///
/// let options = EncodeOptions::new().with_float_precision(2);
/// let bytes = encode_with_options(&Value::from(1.5), &options).unwrap();
/// assert_eq!(bytes, b"1.50");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Digits after the decimal point for floats and complex components.
    pub float_precision: usize,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        EncodeOptions { float_precision: 6 }
    }
}

impl EncodeOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_float_precision(mut self, digits: usize) -> Self {
        self.float_precision = digits;
        self
    }
}

/// Configuration options for deep equality.
///
/// # Examples
///
/// ```rust
/// use introspect::{equal_with_options, EqualOptions, Value};
///
/// let loose = EqualOptions::new().with_tolerance(0.01);
/// assert!(equal_with_options(&Value::from(1.0), &Value::from(1.005), &loose));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct EqualOptions {
    /// Absolute tolerance: `x` and `y` are equal when `x - tol <= y <= x + tol`.
    pub tolerance: f64,
}

impl Default for EqualOptions {
    fn default() -> Self {
        EqualOptions {
            tolerance: FLOAT_TOLERANCE,
        }
    }
}

impl EqualOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }
}
