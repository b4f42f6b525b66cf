//! Tenant configuration gateway
//!
//! Fetches the per-organisation settings that drive the participant page:
//! - Available translation languages
//! - Welcome and waiting text
//! - Default service identifier
//! - Optional logo
//!
//! A missing organisation key never hits the network; it renders the
//! configuration-required fallback instead.

mod client;
mod info;

pub use client::TenantClient;
pub use info::{parse_info_response, Language, TenantInfo, Welcome};
