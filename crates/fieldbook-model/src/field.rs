//! Field definitions and their vocabulary rules.
//!
//! A field definition describes one property of a session or person record:
//! its key, its kind, and — when the field is constrained — its vocabulary.
//! Vocabularies come in two shapes:
//!
//! - **simple**: a list of bare string choices, optionally *closed* when an
//!   archive's deposit protocol fixes the legal values;
//! - **complex**: structured entries carrying an `id` plus descriptive
//!   metadata (label, description, examples, source). Complex vocabularies
//!   are always open; an unmatched value becomes a new entry on import.

use serde::{Deserialize, Serialize};

/// A structured vocabulary entry (e.g. a genre).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// Stable identifier; the value matched against imported cells.
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// How a field's raw text is interpreted beyond its vocabulary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Text,
    /// Values must parse as a calendar date.
    Date,
}

/// One property of a session or person record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Property key, e.g. `"title"` or `"genre"`.
    pub key: String,
    /// English display label; defaults to the key when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub kind: FieldKind,
    /// Simple string choices, when the field has a flat vocabulary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,
    /// Structured choices, when the field has an id+metadata vocabulary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complex_choices: Option<Vec<Choice>>,
    /// True when an external archive fixes the legal values; values outside
    /// a closed vocabulary are rejected rather than treated as additions.
    #[serde(default)]
    pub closed_vocabulary: bool,
}

impl FieldDefinition {
    pub fn text(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: None,
            kind: FieldKind::Text,
            choices: None,
            complex_choices: None,
            closed_vocabulary: false,
        }
    }

    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.key)
    }

    pub fn has_vocabulary(&self) -> bool {
        self.complex_choices.is_some() || self.choices.is_some()
    }

    /// Case-insensitive match against the simple choice list, returning the
    /// canonical spelling so the caller can fix the cell's case.
    pub fn match_simple(&self, value: &str) -> Option<&str> {
        let wanted = value.to_lowercase();
        self.choices
            .as_deref()?
            .iter()
            .find(|choice| choice.to_lowercase() == wanted)
            .map(String::as_str)
    }

    /// Case-insensitive match of a value against complex-choice ids.
    pub fn match_complex_id(&self, value: &str) -> Option<&Choice> {
        let wanted = value.to_lowercase();
        self.complex_choices
            .as_deref()?
            .iter()
            .find(|choice| choice.id.to_lowercase() == wanted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn continent_field() -> FieldDefinition {
        FieldDefinition {
            choices: Some(vec![
                "Africa".to_string(),
                "Asia".to_string(),
                "Australia".to_string(),
                "Europe".to_string(),
            ]),
            closed_vocabulary: true,
            ..FieldDefinition::text("location_continent")
        }
    }

    #[test]
    fn simple_match_is_case_insensitive_and_canonical() {
        let field = continent_field();
        assert_eq!(field.match_simple("australia"), Some("Australia"));
        assert_eq!(field.match_simple("AUSTRALIA"), Some("Australia"));
        assert_eq!(field.match_simple("Australasia"), None);
    }

    #[test]
    fn complex_match_by_id() {
        let field = FieldDefinition {
            complex_choices: Some(vec![Choice {
                id: "narrative".to_string(),
                label: Some("Narrative".to_string()),
                description: None,
                examples: vec!["folktale".to_string()],
                source: None,
            }]),
            ..FieldDefinition::text("genre")
        };
        assert!(field.match_complex_id("Narrative").is_some());
        assert!(field.match_complex_id("sermon").is_none());
    }

    #[test]
    fn plain_text_field_has_no_vocabulary() {
        let field = FieldDefinition::text("title");
        assert!(!field.has_vocabulary());
        assert_eq!(field.match_simple("anything"), None);
    }
}
