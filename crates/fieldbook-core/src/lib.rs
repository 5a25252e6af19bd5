//! The import-matrix pipeline.
//!
//! `build_matrix` turns a raw spreadsheet grid plus a column-map
//! configuration into the reviewable import plan: columns classified by the
//! mapper, cells validated against field vocabularies, rows gated for
//! import. `letters` supplies the spreadsheet-style column labels the
//! presentation layer shows above each column.

pub mod builder;
pub mod letters;

pub use builder::{MatrixError, build_matrix};
