//! Control-panel operations
//!
//! REST calls for operators: start/stop a translation service and fetch
//! the organisation profile. All calls carry a bearer token issued by the
//! external auth provider; the token is treated as an opaque capability.

mod client;

pub use client::{ControlClient, OrganisationProfile};
