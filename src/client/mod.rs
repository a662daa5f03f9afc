//! Fortify on Demand API client
//!
//! The API surface is split into per-resource traits under [`api`]; the
//! [`FodApi`] super-trait ties them together so commands can take a single
//! `&dyn FodApi` (or a generic `C: FodApi`).

#[cfg(test)]
pub mod fixtures;
pub mod api;
pub mod fod;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod pagination;
pub mod parallel;
pub mod query;

pub use api::{ApplicationApi, AuthApi, LookupApi, MicroserviceApi, ReleaseApi};
pub use fod::FodClient;
#[cfg(test)]
pub use mock::MockFodClient;
pub use pagination::{PagedResponse, PaginationParams};
pub use parallel::fetch_remaining_pages;
pub use query::FilterParams;

/// Full API surface used by commands
pub trait FodApi: AuthApi + ApplicationApi + MicroserviceApi + ReleaseApi + LookupApi {}

impl<T> FodApi for T where T: AuthApi + ApplicationApi + MicroserviceApi + ReleaseApi + LookupApi {}
