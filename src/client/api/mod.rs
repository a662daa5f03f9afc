//! API trait definitions split by resource
//!
//! - [`AuthApi`] - Token acquisition
//! - [`ApplicationApi`] - Application lookup and creation
//! - [`MicroserviceApi`] - Microservice lookup and creation
//! - [`ReleaseApi`] - Release lookup, creation and raw records
//! - [`LookupApi`] - Users, user groups and attribute definitions
//!
//! The [`FodApi`](super::FodApi) super-trait combines all of them.

mod application;
mod auth;
mod lookup;
mod microservice;
mod release;

pub use application::ApplicationApi;
pub use auth::AuthApi;
pub use lookup::LookupApi;
pub use microservice::MicroserviceApi;
pub use release::ReleaseApi;
