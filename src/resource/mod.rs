//! Browsable resources.
//!
//! # Module Structure
//!
//! - [`registry`] - the static table of resources, columns, and styling
//! - [`fields`] - dot-notation field extraction from result items

pub mod fields;
pub mod registry;

pub use fields::{count_value, display_value, UNKNOWN};
pub use registry::{
    gender_icon, status_color, ColumnDef, ColumnStyle, ResourceDef, ResourceKind,
};
