//! Row eligibility: the third stage of the matrix pipeline.

use tracing::debug;

use fieldbook_model::{
    CellImportStatus, ColumnInfo, ExistingRecords, FormType, Matrix, Row, RowImportStatus,
};

/// Compute each row's import gate from its cell statuses and identifier.
///
/// A row is `NotAllowed` when its identifier cell is empty or absent, or
/// when any cell carries `ProgramError` or `NotInClosedVocabulary`;
/// otherwise it starts as `Yes`. A row whose identifier already exists in
/// the project is demoted to `No` — allowed, but off by default, so a
/// re-import does not silently overwrite records.
///
/// Idempotent: re-running over the same cells yields the same statuses.
pub fn evaluate_rows(
    columns: &[ColumnInfo],
    rows: Vec<Row>,
    form: FormType,
    existing: &dyn ExistingRecords,
) -> Vec<Row> {
    let rows: Vec<Row> = rows
        .into_iter()
        .map(|row| evaluate_row(columns, row, form, existing))
        .collect();
    let not_allowed = rows
        .iter()
        .filter(|row| row.import_status == RowImportStatus::NotAllowed)
        .count();
    debug!(rows = rows.len(), not_allowed, "evaluated rows");
    rows
}

/// Recompute row gates in place on a built matrix, e.g. after a column was
/// skipped away. Only a full re-evaluation may move a row out of
/// `NotAllowed`.
pub fn re_evaluate_rows(matrix: &mut Matrix, form: FormType, existing: &dyn ExistingRecords) {
    let rows = std::mem::take(&mut matrix.rows);
    matrix.rows = evaluate_rows(&matrix.columns, rows, form, existing);
}

fn evaluate_row(
    columns: &[ColumnInfo],
    mut row: Row,
    form: FormType,
    existing: &dyn ExistingRecords,
) -> Row {
    let id_property = form.id_property();
    let identifier = row
        .cells
        .iter()
        .find_map(|cell| {
            let column = &columns[cell.column];
            let value = cell.value.trim();
            (column.target_property == id_property && !value.is_empty()).then(|| value.to_string())
        });

    let disqualified = row.cells.iter().any(|cell| {
        matches!(
            cell.status,
            CellImportStatus::ProgramError | CellImportStatus::NotInClosedVocabulary
        )
    });

    let mut problems = Vec::new();
    row.matches_existing_record = false;
    row.import_status = match &identifier {
        None => {
            problems.push(format!("Missing {id_property}"));
            RowImportStatus::NotAllowed
        }
        Some(_) if disqualified => RowImportStatus::NotAllowed,
        Some(_) => RowImportStatus::Yes,
    };

    if let Some(id) = &identifier
        && existing.contains(form, id)
    {
        row.matches_existing_record = true;
        if row.import_status == RowImportStatus::Yes {
            row.import_status = RowImportStatus::No;
        }
    }

    row.problems = problems;
    row
}
