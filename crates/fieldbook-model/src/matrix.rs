//! The import matrix: classified columns, validated cells, gated rows.
//!
//! A [`Matrix`] is the reviewable import plan built from one spreadsheet.
//! Columns carry the mapping classification, cells carry per-value
//! validation results, and rows carry the import gate the user toggles.
//! Cells refer to their column by index into [`Matrix::columns`] so the
//! column metadata has a single source of truth.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::field::Choice;
use crate::form::FormType;

/// How an incoming column relates to the target schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MappingStatus {
    /// Header text equals the target property (ignoring case).
    Identity,
    /// Header is configured to map to a different property.
    Matched,
    /// Header is not in the mapping configuration; imported as a custom field.
    Custom,
    /// Column explicitly excluded from import by user action.
    Skip,
    /// Header cell was empty; nothing can be imported from this column.
    MissingIncomingLabel,
}

/// Validation outcome for a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellImportStatus {
    Ok,
    /// Value is not in an open vocabulary; importing adds a new entry.
    Addition,
    /// Value rejected by a closed vocabulary (or unparseable date).
    NotInClosedVocabulary,
    /// Internal inconsistency: column mapped to a property with no field
    /// definition. Never silently ignored.
    ProgramError,
}

/// Import gate for a whole row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowImportStatus {
    Yes,
    No,
    /// Categorically disqualified; cannot be re-enabled by the user.
    NotAllowed,
}

/// Vocabulary cached on a column once its target field is resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnVocabulary {
    Simple { choices: Vec<String>, closed: bool },
    Complex { choices: Vec<Choice> },
}

impl ColumnVocabulary {
    /// Flat list of legal values, for display.
    pub fn valid_choices(&self) -> Vec<&str> {
        match self {
            ColumnVocabulary::Simple { choices, .. } => {
                choices.iter().map(String::as_str).collect()
            }
            ColumnVocabulary::Complex { choices } => {
                choices.iter().map(|c| c.id.as_str()).collect()
            }
        }
    }
}

/// One incoming spreadsheet column and its mapping classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnInfo {
    /// Header text as found in the source sheet; may be empty.
    pub incoming_label: String,
    /// Destination property path, e.g. `"title"` or `"contribution.role"`.
    pub target_property: String,
    pub mapping_status: MappingStatus,
    /// Vocabulary resolved for the target field, cached by the validator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vocabulary: Option<ColumnVocabulary>,
}

impl ColumnInfo {
    /// Whether cells under this column participate in the import at all.
    pub fn do_import(&self) -> bool {
        !matches!(
            self.mapping_status,
            MappingStatus::Skip | MappingStatus::MissingIncomingLabel
        )
    }

    /// First segment of the target property path.
    pub fn primary_property(&self) -> &str {
        self.target_property
            .split('.')
            .next()
            .unwrap_or(&self.target_property)
    }

    /// True for repeating `contribution.*` sub-record columns.
    pub fn is_contribution(&self) -> bool {
        self.primary_property() == "contribution"
    }

    pub fn valid_choices(&self) -> Option<Vec<&str>> {
        self.vocabulary.as_ref().map(ColumnVocabulary::valid_choices)
    }
}

/// One (row, column) intersection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub value: String,
    /// Index of this cell's column in [`Matrix::columns`].
    pub column: usize,
    pub status: CellImportStatus,
    /// Human-readable note when the status is a problem.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub problem: Option<String>,
}

impl Cell {
    pub fn new(value: impl Into<String>, column: usize) -> Self {
        Self {
            value: value.into(),
            column,
            status: CellImportStatus::Ok,
            problem: None,
        }
    }
}

/// One spreadsheet data row (the header row is not a `Row`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    /// Zero-based position among the kept data rows.
    pub index: usize,
    pub cells: Vec<Cell>,
    pub import_status: RowImportStatus,
    /// True when this row's identifier already exists in the project.
    #[serde(default)]
    pub matches_existing_record: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub problems: Vec<String>,
}

impl Row {
    /// Flip the user-facing import gate between `Yes` and `No`.
    ///
    /// A `NotAllowed` row stays `NotAllowed`: disqualification is a hard
    /// rule, only a full re-evaluation can lift it. Returns whether the
    /// status changed.
    pub fn toggle_import_status(&mut self) -> bool {
        match self.import_status {
            RowImportStatus::Yes => {
                self.import_status = RowImportStatus::No;
                true
            }
            RowImportStatus::No => {
                self.import_status = RowImportStatus::Yes;
                true
            }
            RowImportStatus::NotAllowed => false,
        }
    }
}

/// Per-status row counts, for summaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowStatusCounts {
    pub yes: usize,
    pub no: usize,
    pub not_allowed: usize,
}

/// The whole import unit: columns plus data rows.
///
/// Invariant: every row has exactly `columns.len()` cells and
/// `cells[i].column == i`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    pub columns: Vec<ColumnInfo>,
    pub rows: Vec<Row>,
}

impl Matrix {
    pub fn column_for<'a>(&'a self, cell: &Cell) -> &'a ColumnInfo {
        &self.columns[cell.column]
    }

    /// The first non-empty value in `row` under the given target property.
    pub fn row_value<'a>(&self, row: &'a Row, property: &str) -> Option<&'a str> {
        row.cells.iter().find_map(|cell| {
            let column = &self.columns[cell.column];
            let value = cell.value.trim();
            (column.target_property == property && !value.is_empty()).then_some(value)
        })
    }

    /// The row's identifier value under the form's id property.
    pub fn identifier_value<'a>(&self, row: &'a Row, form: FormType) -> Option<&'a str> {
        self.row_value(row, form.id_property())
    }

    pub fn rows_with_status(
        &self,
        status: RowImportStatus,
    ) -> impl Iterator<Item = &Row> {
        self.rows.iter().filter(move |row| row.import_status == status)
    }

    pub fn status_counts(&self) -> RowStatusCounts {
        let mut counts = RowStatusCounts::default();
        for row in &self.rows {
            match row.import_status {
                RowImportStatus::Yes => counts.yes += 1,
                RowImportStatus::No => counts.no += 1,
                RowImportStatus::NotAllowed => counts.not_allowed += 1,
            }
        }
        counts
    }

    /// Explicit user action excluding a column from import.
    ///
    /// Cells under the column revert to `Ok` (there is nothing left to
    /// check); callers must re-run row evaluation afterwards, since a
    /// disqualifying cell may just have been skipped away.
    pub fn skip_column(&mut self, index: usize) {
        if index >= self.columns.len() {
            return;
        }
        self.columns[index].mapping_status = MappingStatus::Skip;
        for row in &mut self.rows {
            if let Some(cell) = row.cells.get_mut(index) {
                cell.status = CellImportStatus::Ok;
                cell.problem = None;
            }
        }
    }
}

/// Lookup for identifiers already present in the target project.
///
/// The matrix pipeline does not compute existence itself; the project store
/// (or a test double) supplies it through this seam.
pub trait ExistingRecords {
    fn contains(&self, form: FormType, id: &str) -> bool;
}

/// Lookup that knows of no existing records.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoExistingRecords;

impl ExistingRecords for NoExistingRecords {
    fn contains(&self, _form: FormType, _id: &str) -> bool {
        false
    }
}

/// Case-insensitive id set, independent of form.
#[derive(Debug, Clone, Default)]
pub struct ExistingIdSet {
    ids: BTreeSet<String>,
}

impl ExistingIdSet {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            ids: ids
                .into_iter()
                .map(|id| id.as_ref().trim().to_lowercase())
                .collect(),
        }
    }
}

impl ExistingRecords for ExistingIdSet {
    fn contains(&self, _form: FormType, id: &str) -> bool {
        self.ids.contains(&id.trim().to_lowercase())
    }
}
