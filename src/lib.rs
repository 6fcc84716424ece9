//! Instrumented k-th order statistic selection.
//!
//! ```
//! use kselect::selection::{median_of_medians, quickselect};
//!
//! let arr = [3, 1, 4, 1, 5, 9, 2, 6, 5, 3, 5];
//! assert_eq!(median_of_medians(&arr, 6).value, 4);
//! assert_eq!(quickselect(&arr, 6).value, 4);
//! ```

pub mod cs;
pub mod error;

pub use cs::selection;
pub use error::{Error, Result};
