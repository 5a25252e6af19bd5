//! Import mapping configuration: incoming header text to target property.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::form::FormType;

/// Maps exact incoming header text to a target property path, per form.
///
/// Target paths are simple property keys (`"title"`) or dotted paths for
/// repeating sub-records (`"contribution.role"`). Headers with no entry are
/// treated as custom columns by the column mapper.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportMapping {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub session: BTreeMap<String, String>,
    #[serde(default)]
    pub person: BTreeMap<String, String>,
}

impl ImportMapping {
    /// Exact-match lookup of a header for the given form.
    pub fn target_for(&self, form: FormType, header: &str) -> Option<&str> {
        let table = match form {
            FormType::Session => &self.session,
            FormType::Person => &self.person,
        };
        table.get(header).map(String::as_str)
    }
}
