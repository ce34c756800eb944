//! Upstream API interaction.
//!
//! # Module Structure
//!
//! - [`client`] - URL construction and page fetching
//! - [`http`] - reqwest wrapper for JSON GET requests
//! - [`models`] - response envelope types

pub mod client;
pub mod http;
pub mod models;

pub use client::{ApiClient, DEFAULT_BASE_URL};
pub use http::format_api_error;
pub use models::{Page, PageInfo};
