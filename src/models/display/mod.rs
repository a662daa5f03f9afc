//! Display model implementations for table output
//!
//! Display models turn API records into CLI-friendly rows with
//! appropriate column names.

mod common;
mod release;

pub use release::ReleaseDisplay;
