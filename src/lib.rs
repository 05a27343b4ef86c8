//! Cotejar: numeric comparison checks for validating computed results.
//!
//! Cotejar runs a fixed battery of agreement checks between an expected
//! vector and a computed one (the argument names `expect` and `got` come
//! from software testing) and reports pass/fail per check. It is a narrow
//! diagnostic helper for testing numerical and scientific code, not a
//! statistical testing framework.
//!
//! # Quick Start
//!
//! ```
//! use cotejar::prelude::*;
//!
//! let analytic = [0.5, -1.25, 2.0];
//! let autodiff = [0.5, -1.25, 2.0];
//!
//! let report = compare(&analytic, &autodiff).unwrap();
//! assert!(report.all_passed());
//!
//! // Render for a terminal, or serialize the structured report.
//! println!("{}", report.render());
//! ```
//!
//! # Modules
//!
//! - [`compare`]: the comparator (check battery, options, report types)
//! - [`distance`]: cosine similarity and L-infinity distance primitives
//! - [`rel_errors`]: largest-relative-error breakdown for labeled dimensions
//! - [`fit`]: least-squares line fitting for the regression diagnostic
//! - [`data`]: minimal named-column `DataFrame` for tabular input
//! - [`stats`]: standalone statistics/probability helpers
//! - [`error`]: error types

pub mod compare;
pub mod data;
pub mod distance;
pub mod error;
pub mod fit;
pub mod prelude;
pub mod rel_errors;
pub mod stats;
