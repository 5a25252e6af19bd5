//! Record drafts: the flat projection of an accepted matrix row.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use fieldbook_model::{FormType, Matrix, Row};
use fieldbook_validate::parse_flexible_date;

use crate::error::ImportError;

/// One contributor to a session, assembled from a `contribution.*` column
/// group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
    pub name: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comments: String,
}

/// A session or person record ready to persist.
///
/// Built from one accepted row: plain properties keyed by target property,
/// custom columns keyed by their incoming header text, and repeated
/// `contribution.*` columns grouped into [`Contribution`]s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordDraft {
    pub form: FormType,
    pub id: String,
    pub fields: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub custom: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contributions: Vec<Contribution>,
}

impl RecordDraft {
    /// Project a row of the matrix into a draft.
    ///
    /// Only columns marked for import contribute, and only non-empty cells.
    /// Date values are normalized to ISO on the way out.
    pub fn from_row(matrix: &Matrix, row: &Row, form: FormType) -> Result<Self, ImportError> {
        let id = matrix
            .identifier_value(row, form)
            .ok_or_else(|| ImportError::MissingIdentifier {
                row: row.index,
                property: form.id_property().to_string(),
            })?
            .to_string();

        let mut fields = BTreeMap::new();
        let mut custom = BTreeMap::new();
        let mut contributions = Vec::new();

        for (cell_index, cell) in row.cells.iter().enumerate() {
            let column = matrix.column_for(cell);
            if !column.do_import() {
                continue;
            }
            let value = cell.value.trim();
            if value.is_empty() {
                continue;
            }

            match column.target_property.as_str() {
                "custom" => {
                    custom.insert(column.incoming_label.clone(), value.to_string());
                }
                "contribution.name" => {
                    contributions.push(Contribution {
                        name: value.to_string(),
                        role: look_ahead(matrix, row, cell_index, "contribution.role")
                            .unwrap_or("participant")
                            .to_string(),
                        comments: look_ahead(matrix, row, cell_index, "contribution.comments")
                            .unwrap_or_default()
                            .to_string(),
                    });
                }
                // picked up by the look-ahead from their contribution.name
                property if property.starts_with("contribution.") => {}
                property if property == form.id_property() => {}
                "date" => {
                    let normalized = parse_flexible_date(value)
                        .map_or_else(|| value.to_string(), |d| d.format("%Y-%m-%d").to_string());
                    fields.insert("date".to_string(), normalized);
                }
                property => {
                    fields.insert(property.to_string(), value.to_string());
                }
            }
        }

        Ok(Self {
            form,
            id,
            fields,
            custom,
            contributions,
        })
    }
}

/// Find the value of a sibling `contribution.*` property for the group that
/// starts at `from`: scan rightward, stopping at the next contributor.
fn look_ahead<'a>(matrix: &Matrix, row: &'a Row, from: usize, property: &str) -> Option<&'a str> {
    for cell in &row.cells[from + 1..] {
        let column = matrix.column_for(cell);
        if column.target_property == "contribution.name" {
            break;
        }
        let value = cell.value.trim();
        if column.target_property == property && !value.is_empty() {
            return Some(value);
        }
    }
    None
}
