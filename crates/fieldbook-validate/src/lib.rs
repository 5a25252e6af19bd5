//! Validation stages of the import pipeline: per-cell vocabulary checks and
//! per-row import gating.
//!
//! Both stages are pure over their inputs. Cell validation must run after
//! column mapping (it reads the resolved target properties) and row
//! evaluation after cell validation (it aggregates cell statuses); the
//! matrix builder in `fieldbook-core` enforces that ordering.

mod cells;
mod dates;
mod rows;

pub use cells::validate_cells;
pub use dates::parse_flexible_date;
pub use rows::{evaluate_rows, re_evaluate_rows};
