//! Shared CLI argument types
//!
//! This module contains reusable argument structs that can be flattened
//! into commands using `#[command(flatten)]`.

mod common;
mod create;
mod filters;
mod global;
mod pagination;
mod wait;

pub use common::OutputFormat;
pub use create::{AppCreateArgs, ReleaseCreateArgs, parse_attribute};
pub use filters::ReleaseFilterArgs;
pub use global::GlobalOptions;
pub use pagination::PaginationArgs;
pub use wait::{WaitArgs, parse_duration};
