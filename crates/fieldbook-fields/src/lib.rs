//! Bundled field definitions and column-map configuration.
//!
//! This crate is the vocabulary resolver for the import pipeline: given a
//! form and a target property key it returns the field definition carrying
//! the vocabulary rule (simple or complex choices, closed flag). It also
//! ships the default spreadsheet column map.

mod error;
mod registry;

pub use error::FieldsError;
pub use registry::{FieldRegistry, builtin_mapping, load_mapping};
