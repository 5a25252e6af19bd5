//! The downstream importer: turns accepted matrix rows into persisted
//! records.
//!
//! The matrix pipeline only prepares rows; this crate consumes the rows the
//! user accepted (`RowImportStatus::Yes`), projects each into a
//! [`RecordDraft`], and writes it to the [`ProjectStore`]. The store also
//! backs the `ExistingRecords` seam the row evaluator uses to flag
//! identifier collisions.

mod error;
mod record;
mod store;

use std::path::PathBuf;

use tracing::info;

use fieldbook_model::{FormType, Matrix, RowImportStatus};

pub use error::ImportError;
pub use record::{Contribution, RecordDraft};
pub use store::ProjectStore;

/// What happened to one accepted row.
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    pub row_index: usize,
    pub id: String,
    pub path: PathBuf,
    /// True when an existing record with the same identifier was replaced.
    pub replaced: bool,
}

/// Import every `Yes` row of the matrix into the store.
///
/// Rows the evaluator disqualified never reach this function's write path:
/// `NotAllowed` cannot be toggled to `Yes`.
pub fn import_rows(
    matrix: &Matrix,
    form: FormType,
    store: &ProjectStore,
) -> Result<Vec<ImportOutcome>, ImportError> {
    let mut outcomes = Vec::new();
    for row in matrix.rows_with_status(RowImportStatus::Yes) {
        let draft = RecordDraft::from_row(matrix, row, form)?;
        let replaced = store.contains_record(form, &draft.id);
        let path = store.save(&draft)?;
        outcomes.push(ImportOutcome {
            row_index: row.index,
            id: draft.id,
            path,
            replaced,
        });
    }
    info!(form = %form, imported = outcomes.len(), "import finished");
    Ok(outcomes)
}
