//! mortui - terminal UI for the Rick and Morty API.
//!
//! Browse characters, locations, and episodes, search characters by name,
//! and page through results. Exactly one fetch is logically current at any
//! time: responses to superseded requests are dropped on arrival, so the
//! view always reflects the most recent (resource, page, search) selection.
//!
//! # Module Structure
//!
//! - [`api`] - HTTP client, URL construction, and the response envelope
//! - [`app`] - application state and the fetch coordinator
//! - [`event`] - keyboard and mouse dispatch
//! - [`pagination`] - page range computation for the pagination bar
//! - [`resource`] - the registry of browsable collections
//! - [`ui`] - ratatui rendering

pub mod api;
pub mod app;
pub mod event;
pub mod pagination;
pub mod resource;
pub mod ui;

/// Version injected at compile time via MORTUI_VERSION env var (set by CI/CD),
/// or "dev" for local builds.
pub const VERSION: &str = match option_env!("MORTUI_VERSION") {
    Some(v) => v,
    None => "dev",
};
