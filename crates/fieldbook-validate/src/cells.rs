//! Per-cell validation: the second stage of the matrix pipeline.

use tracing::debug;

use fieldbook_fields::FieldRegistry;
use fieldbook_model::{
    Cell, CellImportStatus, ColumnInfo, ColumnVocabulary, FieldDefinition, FieldKind, FormType,
    MappingStatus, Row,
};

use crate::dates::parse_flexible_date;

/// What validation applies to the cells of one column.
enum ColumnRule<'a> {
    /// Nothing to check: skipped, unlabeled, custom, or a `contribution.*`
    /// column whose sub-records are validated by the downstream importer.
    NoCheck,
    /// The column maps to a property with no field definition; every cell
    /// is an internal inconsistency.
    Unresolvable,
    Field(&'a FieldDefinition),
}

fn column_rule<'a>(
    column: &ColumnInfo,
    form: FormType,
    registry: &'a FieldRegistry,
) -> ColumnRule<'a> {
    if !matches!(
        column.mapping_status,
        MappingStatus::Identity | MappingStatus::Matched
    ) {
        return ColumnRule::NoCheck;
    }
    if column.is_contribution() {
        return ColumnRule::NoCheck;
    }
    match registry.definition(form, column.primary_property()) {
        Some(field) => ColumnRule::Field(field),
        None => ColumnRule::Unresolvable,
    }
}

/// Validate every cell of every row against the columns' field vocabularies.
///
/// Returns new columns enriched with their cached vocabulary and new rows
/// whose cells carry an import status (and canonical-case values for
/// simple-vocabulary matches). Runs after column mapping and before row
/// evaluation.
pub fn validate_cells(
    columns: Vec<ColumnInfo>,
    rows: Vec<Row>,
    form: FormType,
    registry: &FieldRegistry,
) -> (Vec<ColumnInfo>, Vec<Row>) {
    let rules: Vec<ColumnRule> = columns
        .iter()
        .map(|column| column_rule(column, form, registry))
        .collect();

    let columns: Vec<ColumnInfo> = columns
        .iter()
        .zip(&rules)
        .map(|(column, rule)| {
            let vocabulary = match rule {
                ColumnRule::Field(field) => vocabulary_for(field),
                _ => None,
            };
            ColumnInfo {
                vocabulary,
                ..column.clone()
            }
        })
        .collect();

    let rows: Vec<Row> = rows
        .into_iter()
        .map(|mut row| {
            let cells = std::mem::take(&mut row.cells);
            row.cells = cells
                .into_iter()
                .map(|cell| {
                    let rule = &rules[cell.column];
                    validate_cell(cell, rule, &columns)
                })
                .collect();
            row
        })
        .collect();

    let problem_cells = rows
        .iter()
        .flat_map(|row| &row.cells)
        .filter(|cell| cell.status != CellImportStatus::Ok)
        .count();
    debug!(rows = rows.len(), problem_cells, "validated cells");

    (columns, rows)
}

fn vocabulary_for(field: &FieldDefinition) -> Option<ColumnVocabulary> {
    if let Some(choices) = &field.complex_choices {
        return Some(ColumnVocabulary::Complex {
            choices: choices.clone(),
        });
    }
    field.choices.as_ref().map(|choices| ColumnVocabulary::Simple {
        choices: choices.clone(),
        closed: field.closed_vocabulary,
    })
}

fn validate_cell(cell: Cell, rule: &ColumnRule, columns: &[ColumnInfo]) -> Cell {
    match rule {
        ColumnRule::NoCheck => Cell {
            status: CellImportStatus::Ok,
            problem: None,
            ..cell
        },
        ColumnRule::Unresolvable => {
            let column = &columns[cell.column];
            Cell {
                status: CellImportStatus::ProgramError,
                problem: Some(format!(
                    "no field definition matches the property \"{}\"",
                    column.primary_property()
                )),
                ..cell
            }
        }
        ColumnRule::Field(field) => classify_value(cell, field),
    }
}

/// Classify one cell value against its field definition. Pure and total:
/// every branch assigns one of the defined statuses.
fn classify_value(cell: Cell, field: &FieldDefinition) -> Cell {
    let value = cell.value.trim();

    // No field is strictly required at the cell level; emptiness is gated
    // per row (the identifier) rather than per cell.
    if value.is_empty() {
        return Cell {
            status: CellImportStatus::Ok,
            problem: None,
            ..cell
        };
    }

    if field.kind == FieldKind::Date {
        return if parse_flexible_date(value).is_some() {
            Cell {
                status: CellImportStatus::Ok,
                problem: None,
                ..cell
            }
        } else {
            Cell {
                status: CellImportStatus::NotInClosedVocabulary,
                problem: Some(format!("\"{value}\" cannot be understood as a date")),
                ..cell
            }
        };
    }

    if field.complex_choices.is_some() {
        return if field.match_complex_id(value).is_some() {
            Cell {
                status: CellImportStatus::Ok,
                problem: None,
                ..cell
            }
        } else {
            // Importing will add a new entry to this open vocabulary.
            Cell {
                status: CellImportStatus::Addition,
                problem: None,
                ..cell
            }
        };
    }

    if field.choices.is_some() {
        if let Some(canonical) = field.match_simple(value) {
            // Fix the case to the canonical spelling.
            let canonical = canonical.to_string();
            return Cell {
                value: canonical,
                status: CellImportStatus::Ok,
                problem: None,
                ..cell
            };
        }
        return if field.closed_vocabulary {
            let permitted = field
                .choices
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(|choice| format!("\"{choice}\""))
                .collect::<Vec<_>>()
                .join(", ");
            Cell {
                status: CellImportStatus::NotInClosedVocabulary,
                problem: Some(format!(
                    "the permitted values for {} are: {permitted}",
                    field.key
                )),
                ..cell
            }
        } else {
            Cell {
                status: CellImportStatus::Addition,
                problem: None,
                ..cell
            }
        };
    }

    Cell {
        status: CellImportStatus::Ok,
        problem: None,
        ..cell
    }
}
