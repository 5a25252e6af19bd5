//! Field registry: resolves a target property to its field definition.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use fieldbook_model::{FieldDefinition, FormType, ImportMapping};

use crate::error::FieldsError;

const BUILTIN_FIELDS: &str = include_str!("../data/fields.json");
const BUILTIN_COLUMN_MAP: &str = include_str!("../data/column_map.json");

#[derive(Debug, Deserialize)]
struct FieldsFile {
    #[serde(default)]
    session: Vec<FieldDefinition>,
    #[serde(default)]
    person: Vec<FieldDefinition>,
}

/// All known field definitions, indexed by form.
#[derive(Debug, Clone)]
pub struct FieldRegistry {
    session: Vec<FieldDefinition>,
    person: Vec<FieldDefinition>,
}

impl FieldRegistry {
    /// Load the definitions bundled with the application.
    pub fn builtin() -> Result<Self, FieldsError> {
        Self::from_json(BUILTIN_FIELDS, "builtin fields.json")
    }

    pub fn from_json(text: &str, what: &str) -> Result<Self, FieldsError> {
        let file: FieldsFile = serde_json::from_str(text).map_err(|source| FieldsError::Json {
            what: what.to_string(),
            source,
        })?;
        Ok(Self {
            session: file.session,
            person: file.person,
        })
    }

    pub fn fields(&self, form: FormType) -> &[FieldDefinition] {
        match form {
            FormType::Session => &self.session,
            FormType::Person => &self.person,
        }
    }

    /// Resolve a property key for the given form, ignoring case.
    pub fn definition(&self, form: FormType, key: &str) -> Option<&FieldDefinition> {
        let wanted = key.trim();
        self.fields(form)
            .iter()
            .find(|field| field.key.eq_ignore_ascii_case(wanted))
    }
}

/// The column map bundled with the application.
pub fn builtin_mapping() -> Result<ImportMapping, FieldsError> {
    parse_mapping(BUILTIN_COLUMN_MAP, "builtin column_map.json")
}

/// Load a caller-supplied column map from a JSON file.
pub fn load_mapping(path: &Path) -> Result<ImportMapping, FieldsError> {
    let text = fs::read_to_string(path).map_err(|source| FieldsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_mapping(&text, &path.display().to_string())
}

fn parse_mapping(text: &str, what: &str) -> Result<ImportMapping, FieldsError> {
    serde_json::from_str(text).map_err(|source| FieldsError::Json {
        what: what.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_fields_load() {
        let registry = FieldRegistry::builtin().unwrap();
        assert!(!registry.fields(FormType::Session).is_empty());
        assert!(!registry.fields(FormType::Person).is_empty());
    }

    #[test]
    fn resolves_case_insensitively() {
        let registry = FieldRegistry::builtin().unwrap();
        let field = registry
            .definition(FormType::Session, "LOCATIONCONTINENT")
            .expect("continent field");
        assert!(field.closed_vocabulary);
        assert!(field.match_simple("australia").is_some());
    }

    #[test]
    fn session_and_person_namespaces_are_separate() {
        let registry = FieldRegistry::builtin().unwrap();
        assert!(registry.definition(FormType::Session, "gender").is_none());
        assert!(registry.definition(FormType::Person, "gender").is_some());
    }

    #[test]
    fn genre_has_complex_choices() {
        let registry = FieldRegistry::builtin().unwrap();
        let genre = registry
            .definition(FormType::Session, "genre")
            .expect("genre field");
        let narrative = genre.match_complex_id("Narrative").expect("narrative id");
        assert_eq!(narrative.id, "narrative");
        assert!(!genre.closed_vocabulary);
    }

    #[test]
    fn builtin_mapping_covers_the_identifier_column() {
        let mapping = builtin_mapping().unwrap();
        assert_eq!(mapping.target_for(FormType::Session, "filename"), Some("id"));
        assert_eq!(
            mapping.target_for(FormType::Session, "participant_2_role"),
            Some("contribution.role")
        );
        assert_eq!(mapping.target_for(FormType::Person, "full_name"), Some("name"));
    }
}
