//! Flat-file Student Record Management
//!
//! Records are comma-separated lines in a plain text file, one student per
//! line. The library owns validation, persistence, search, and aggregate
//! analysis; front-ends collect field values and display results.

pub mod domain;
pub use domain::{Changes, Config, Draft, Grade, Record, ValidationError};

/// Flat-file storage and aggregate analysis for records.
pub mod storage;
pub use storage::{PASS_MARK, Stats, Store, StoreError};
