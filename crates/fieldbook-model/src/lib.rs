pub mod field;
pub mod form;
pub mod mapping;
pub mod matrix;

pub use field::{Choice, FieldDefinition, FieldKind};
pub use form::FormType;
pub use mapping::ImportMapping;
pub use matrix::{
    Cell, CellImportStatus, ColumnInfo, ColumnVocabulary, ExistingIdSet, ExistingRecords,
    MappingStatus, Matrix, NoExistingRecords, Row, RowImportStatus, RowStatusCounts,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapping_serializes() {
        let mut mapping = ImportMapping::default();
        mapping
            .session
            .insert("filename".to_string(), "id".to_string());
        let json = serde_json::to_string(&mapping).expect("serialize mapping");
        let round: ImportMapping = serde_json::from_str(&json).expect("deserialize mapping");
        assert_eq!(round.target_for(FormType::Session, "filename"), Some("id"));
    }
}
