//! Fortify on Demand API data models
//!
//! Resource descriptors returned by the API plus the request payloads the
//! CLI sends. Descriptors keep unknown fields in a flattened map so output
//! records carry everything the server returned.

mod app;
mod attribute;
mod auth;
mod enums;
mod microservice;
mod release;
pub mod request;
mod user;

pub use app::{AppCreated, ApplicationDescriptor};
pub use attribute::{AttributeDefinition, AttributeValue, PicklistValue};
pub use auth::AccessToken;
pub use enums::{AppType, Criticality, ReleaseInclude, SdlcStatus};
pub use microservice::MicroserviceDescriptor;
pub use release::{ReleaseCreated, ReleaseDescriptor};
pub use request::{AppCreateRequest, ReleaseCreateRequest};
pub use user::{UserDescriptor, UserGroupDescriptor};
