//! Bookscout-Common: shared types and the error taxonomy.
//!
//! - **Generation**: the run identifier used to discard superseded searches
//! - **MaxResults**: page size accepted by the catalog API (1..=40)
//! - **Error Handling**: run-level and caller-side error types
//!
//! # Examples
//!
//! ```
//! use bookscout_common::{Error, Generation, MaxResults, Result};
//!
//! let first = Generation::ZERO.next();
//! assert!(first.next() > first);
//!
//! let page = MaxResults::clamped(100);
//! assert_eq!(page.get(), MaxResults::MAX);
//!
//! fn fetch() -> Result<()> {
//!     Err(Error::transport_status(503))
//! }
//! assert!(fetch().unwrap_err().is_run_failure());
//! ```

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::*;
