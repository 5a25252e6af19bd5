//! Matrix and summary rendering with comfy-table.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use fieldbook_core::letters;
use fieldbook_import::ImportOutcome;
use fieldbook_model::{
    Cell as MatrixCell, CellImportStatus, ColumnInfo, MappingStatus, Matrix, Row, RowImportStatus,
};

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn header_cell(text: impl Into<String>) -> Cell {
    Cell::new(text.into()).add_attribute(Attribute::Bold)
}

/// Render the classified matrix: one header block per column (letter,
/// incoming label, mapping), one line per spreadsheet row.
pub fn print_matrix(matrix: &Matrix) {
    let mut table = Table::new();
    apply_table_style(&mut table);

    let mut header = vec![header_cell(" ")];
    for (index, column) in matrix.columns.iter().enumerate() {
        let letter = letters::encode(index as i64 + 1);
        header.push(header_cell(format!(
            "{letter}\n{}\n{}",
            column.incoming_label,
            mapping_marker(column)
        )));
    }
    table.set_header(header);

    for row in &matrix.rows {
        let mut cells = vec![row_header_cell(row)];
        for cell in &row.cells {
            cells.push(value_cell(cell));
        }
        table.add_row(cells);
    }
    println!("{table}");
}

fn mapping_marker(column: &ColumnInfo) -> String {
    match column.mapping_status {
        MappingStatus::Identity => "✔".to_string(),
        MappingStatus::Matched => format!("→ {}", column.target_property),
        MappingStatus::Custom => "→ custom".to_string(),
        MappingStatus::Skip => "SKIP".to_string(),
        MappingStatus::MissingIncomingLabel => String::new(),
    }
}

fn row_header_cell(row: &Row) -> Cell {
    let number = row.index + 1;
    match row.import_status {
        RowImportStatus::Yes => Cell::new(format!("{number} ✔")).fg(Color::Green),
        RowImportStatus::No => Cell::new(format!("{number} ·")).fg(Color::Yellow),
        RowImportStatus::NotAllowed => Cell::new(format!("{number} ✖")).fg(Color::Red),
    }
}

fn value_cell(cell: &MatrixCell) -> Cell {
    match cell.status {
        CellImportStatus::Ok => Cell::new(&cell.value),
        CellImportStatus::Addition => Cell::new(&cell.value).fg(Color::Yellow),
        CellImportStatus::NotInClosedVocabulary | CellImportStatus::ProgramError => {
            Cell::new(&cell.value).fg(Color::Red)
        }
    }
}

/// Print the per-row gate counts and every problem with its cell address.
pub fn print_summary(matrix: &Matrix) {
    let counts = matrix.status_counts();
    let existing = matrix
        .rows
        .iter()
        .filter(|row| row.matches_existing_record)
        .count();

    let mut table = Table::new();
    apply_table_style(&mut table);
    table.set_header(vec![header_cell("Rows"), header_cell("Count")]);
    table.add_row(vec![
        Cell::new("Will import").fg(Color::Green),
        Cell::new(counts.yes),
    ]);
    table.add_row(vec![
        Cell::new("Off by default").fg(Color::Yellow),
        Cell::new(counts.no),
    ]);
    table.add_row(vec![
        Cell::new("Not allowed").fg(Color::Red),
        Cell::new(counts.not_allowed),
    ]);
    table.add_row(vec![
        Cell::new("Match existing records"),
        Cell::new(existing),
    ]);
    println!("{table}");

    for line in problem_lines(matrix) {
        eprintln!("{line}");
    }
}

/// Problems with spreadsheet-style addresses (the header is row 1, so data
/// row 0 renders as row 2).
pub fn problem_lines(matrix: &Matrix) -> Vec<String> {
    let mut lines = Vec::new();
    for row in &matrix.rows {
        let sheet_row = row.index + 2;
        for problem in &row.problems {
            lines.push(format!("row {sheet_row}: {problem}"));
        }
        for cell in &row.cells {
            if let Some(problem) = &cell.problem {
                let letter = letters::encode(cell.column as i64 + 1);
                lines.push(format!("{letter}{sheet_row}: {problem}"));
            }
        }
    }
    lines
}

/// Print what the importer did with each accepted row.
pub fn print_outcomes(outcomes: &[ImportOutcome]) {
    let mut table = Table::new();
    apply_table_style(&mut table);
    table.set_header(vec![
        header_cell("Row"),
        header_cell("Id"),
        header_cell("Action"),
        header_cell("Path"),
    ]);
    for outcome in outcomes {
        let action = if outcome.replaced {
            Cell::new("replaced").fg(Color::Yellow)
        } else {
            Cell::new("created").fg(Color::Green)
        };
        table.add_row(vec![
            Cell::new(outcome.row_index + 1),
            Cell::new(&outcome.id),
            action,
            Cell::new(outcome.path.display()),
        ]);
    }
    println!("{table}");
}
