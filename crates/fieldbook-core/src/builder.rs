//! Matrix construction: the orchestrated three-phase pipeline.

use tracing::info;

use fieldbook_fields::FieldRegistry;
use fieldbook_ingest::Grid;
use fieldbook_map::map_columns;
use fieldbook_model::{
    Cell, ExistingRecords, FormType, ImportMapping, Matrix, Row, RowImportStatus,
};
use fieldbook_validate::{evaluate_rows, validate_cells};

/// Fatal precondition violations of the incoming grid.
///
/// The builder never constructs a partial matrix: a broken column/cell
/// correspondence would poison every later stage, so malformed input fails
/// fast here instead.
#[derive(Debug, thiserror::Error)]
pub enum MatrixError {
    #[error("the spreadsheet has no header row")]
    EmptyGrid,

    #[error("spreadsheet row {row} has {actual} cells where the header has {expected}")]
    RaggedRow {
        /// 1-based spreadsheet row number (the header is row 1).
        row: usize,
        expected: usize,
        actual: usize,
    },
}

/// Build the fully classified matrix from a raw grid and a column map.
///
/// Phases run strictly in order — column mapping, then cell validation
/// (which reads the mapped target properties), then row evaluation (which
/// reads the validated cell statuses). Each phase is a pure function over
/// the previous phase's output.
///
/// Data rows that are entirely blank are dropped before classification;
/// `Row::index` numbers the rows that are kept.
pub fn build_matrix(
    grid: &Grid,
    mapping: &ImportMapping,
    form: FormType,
    registry: &FieldRegistry,
    existing: &dyn ExistingRecords,
) -> Result<Matrix, MatrixError> {
    let header = grid.header().ok_or(MatrixError::EmptyGrid)?;
    let expected = header.len();
    for (offset, raw) in grid.data_rows().iter().enumerate() {
        if raw.len() != expected {
            return Err(MatrixError::RaggedRow {
                row: offset + 2,
                expected,
                actual: raw.len(),
            });
        }
    }

    let columns = map_columns(header, mapping, form);

    let rows: Vec<Row> = grid
        .data_rows()
        .iter()
        .filter(|raw| raw.iter().any(|value| !value.trim().is_empty()))
        .enumerate()
        .map(|(index, raw)| Row {
            index,
            cells: raw
                .iter()
                .enumerate()
                .map(|(column, value)| Cell::new(value.clone(), column))
                .collect(),
            // replaced by row evaluation below
            import_status: RowImportStatus::No,
            matches_existing_record: false,
            problems: Vec::new(),
        })
        .collect();

    let (columns, rows) = validate_cells(columns, rows, form, registry);
    let rows = evaluate_rows(&columns, rows, form, existing);

    let matrix = Matrix { columns, rows };
    let counts = matrix.status_counts();
    info!(
        form = %form,
        columns = matrix.columns.len(),
        rows = matrix.rows.len(),
        importable = counts.yes,
        not_allowed = counts.not_allowed,
        "built import matrix"
    );
    Ok(matrix)
}
