//! Column mapping: the first stage of the matrix pipeline.
//!
//! Classifies each incoming header against the import mapping configuration.
//! Pure and total: every header, including an empty one, gets exactly one
//! classification, and no vocabulary or registry access happens here.

use fieldbook_model::{ColumnInfo, FormType, ImportMapping, MappingStatus};

/// Classify every header cell, in order.
///
/// - blank header → `MissingIncomingLabel`, target `"skip"`
/// - header not in the mapping → `Custom`, target `"custom"`
/// - mapped header → the configured target; `Identity` when the target
///   equals the header ignoring case, `Matched` otherwise
///
/// `Skip` is never produced here; it is reserved for an explicit user
/// action on the built matrix.
pub fn map_columns(
    headers: &[String],
    mapping: &ImportMapping,
    form: FormType,
) -> Vec<ColumnInfo> {
    headers
        .iter()
        .map(|header| map_column(header, mapping, form))
        .collect()
}

fn map_column(header: &str, mapping: &ImportMapping, form: FormType) -> ColumnInfo {
    if header.trim().is_empty() {
        return ColumnInfo {
            incoming_label: header.to_string(),
            target_property: "skip".to_string(),
            mapping_status: MappingStatus::MissingIncomingLabel,
            vocabulary: None,
        };
    }

    let (target_property, mapping_status) = match mapping.target_for(form, header) {
        None => ("custom".to_string(), MappingStatus::Custom),
        Some(target) => {
            let status = if target.eq_ignore_ascii_case(header) {
                MappingStatus::Identity
            } else {
                MappingStatus::Matched
            };
            (target.to_string(), status)
        }
    };

    ColumnInfo {
        incoming_label: header.to_string(),
        target_property,
        mapping_status,
        vocabulary: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping() -> ImportMapping {
        let mut mapping = ImportMapping::default();
        mapping
            .session
            .insert("date".to_string(), "date".to_string());
        mapping
            .session
            .insert("filename".to_string(), "id".to_string());
        mapping
            .session
            .insert("Title".to_string(), "title".to_string());
        mapping
    }

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| (*n).to_string()).collect()
    }

    #[test]
    fn identity_when_target_equals_header_ignoring_case() {
        let columns = map_columns(&headers(&["date", "Title"]), &mapping(), FormType::Session);
        assert_eq!(columns[0].mapping_status, MappingStatus::Identity);
        assert_eq!(columns[0].target_property, "date");
        // "Title" -> "title": same text up to case, still identity
        assert_eq!(columns[1].mapping_status, MappingStatus::Identity);
    }

    #[test]
    fn matched_when_target_differs() {
        let columns = map_columns(&headers(&["filename"]), &mapping(), FormType::Session);
        assert_eq!(columns[0].mapping_status, MappingStatus::Matched);
        assert_eq!(columns[0].target_property, "id");
    }

    #[test]
    fn unmapped_header_becomes_custom() {
        let columns = map_columns(&headers(&["custom_note"]), &mapping(), FormType::Session);
        assert_eq!(columns[0].mapping_status, MappingStatus::Custom);
        assert_eq!(columns[0].target_property, "custom");
        assert!(columns[0].do_import());
    }

    #[test]
    fn blank_header_is_missing_label_regardless_of_mapping() {
        for header in ["", "   ", "\t"] {
            let columns = map_columns(&headers(&[header]), &mapping(), FormType::Session);
            assert_eq!(
                columns[0].mapping_status,
                MappingStatus::MissingIncomingLabel,
                "header {header:?}"
            );
            assert_eq!(columns[0].target_property, "skip");
            assert!(!columns[0].do_import());
        }
    }

    #[test]
    fn lookup_is_form_scoped() {
        let columns = map_columns(&headers(&["filename"]), &mapping(), FormType::Person);
        assert_eq!(columns[0].mapping_status, MappingStatus::Custom);
    }

    #[test]
    fn builtin_mapping_classifies_participant_columns() {
        let mapping = fieldbook_fields::builtin_mapping().unwrap();
        let columns = map_columns(
            &headers(&["participant_1_full_name", "participant_1_role"]),
            &mapping,
            FormType::Session,
        );
        assert_eq!(columns[0].target_property, "contribution.name");
        assert_eq!(columns[1].target_property, "contribution.role");
        assert_eq!(columns[0].mapping_status, MappingStatus::Matched);
    }

    #[test]
    fn never_produces_skip() {
        let all = map_columns(
            &headers(&["date", "filename", "mystery", ""]),
            &mapping(),
            FormType::Session,
        );
        assert!(
            all.iter()
                .all(|c| c.mapping_status != MappingStatus::Skip)
        );
    }
}
