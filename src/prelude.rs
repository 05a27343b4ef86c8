//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use cotejar::prelude::*;
//! ```

pub use crate::compare::{
    compare, compare_columns, compare_with, Check, CheckValue, CompareOptions, Report, Verdict,
};
pub use crate::data::DataFrame;
pub use crate::distance::{cosine, linf};
pub use crate::error::{CotejarError, Result};
pub use crate::fit::{least_squares, LineFit};
pub use crate::rel_errors::{largest_rel_errors, RelError};
