//! Importer tests over matrices produced by the real pipeline.

use fieldbook_core::build_matrix;
use fieldbook_fields::FieldRegistry;
use fieldbook_import::{ProjectStore, RecordDraft, import_rows};
use fieldbook_ingest::Grid;
use fieldbook_model::{FormType, ImportMapping, Matrix, NoExistingRecords};

fn grid(rows: &[&[&str]]) -> Grid {
    Grid::new(
        rows.iter()
            .map(|row| row.iter().map(|v| (*v).to_string()).collect())
            .collect(),
    )
}

fn session_mapping() -> ImportMapping {
    let mut mapping = ImportMapping::default();
    for (header, target) in [
        ("filename", "id"),
        ("title", "title"),
        ("date", "date"),
        ("participant_1_full_name", "contribution.name"),
        ("participant_1_role", "contribution.role"),
        ("participant_2_full_name", "contribution.name"),
        ("participant_2_role", "contribution.role"),
    ] {
        mapping
            .session
            .insert(header.to_string(), target.to_string());
    }
    mapping
}

fn build(g: &Grid) -> Matrix {
    let registry = FieldRegistry::builtin().unwrap();
    build_matrix(
        g,
        &session_mapping(),
        FormType::Session,
        &registry,
        &NoExistingRecords,
    )
    .unwrap()
}

#[test]
fn groups_contribution_columns_with_look_ahead() {
    let matrix = build(&grid(&[
        &[
            "filename",
            "participant_1_full_name",
            "participant_1_role",
            "participant_2_full_name",
            "participant_2_role",
        ],
        &["take.mp3", "Joe", "Speaker", "Jane", "Researcher"],
    ]));
    let draft = RecordDraft::from_row(&matrix, &matrix.rows[0], FormType::Session).unwrap();

    assert_eq!(draft.id, "take.mp3");
    assert_eq!(draft.contributions.len(), 2);
    assert_eq!(draft.contributions[0].name, "Joe");
    assert_eq!(draft.contributions[0].role, "Speaker");
    assert_eq!(draft.contributions[1].name, "Jane");
    assert_eq!(draft.contributions[1].role, "Researcher");
}

#[test]
fn missing_role_defaults_to_participant() {
    let matrix = build(&grid(&[
        &["filename", "participant_1_full_name", "participant_1_role"],
        &["take.mp3", "Joe", ""],
    ]));
    let draft = RecordDraft::from_row(&matrix, &matrix.rows[0], FormType::Session).unwrap();
    assert_eq!(draft.contributions.len(), 1);
    assert_eq!(draft.contributions[0].role, "participant");
}

#[test]
fn role_belongs_to_its_own_contributor_group() {
    // Joe has no role column before the next contributor; Jane's role must
    // not leak backwards to him.
    let matrix = build(&grid(&[
        &[
            "filename",
            "participant_1_full_name",
            "participant_2_full_name",
            "participant_2_role",
        ],
        &["take.mp3", "Joe", "Jane", "Researcher"],
    ]));
    let draft = RecordDraft::from_row(&matrix, &matrix.rows[0], FormType::Session).unwrap();
    assert_eq!(draft.contributions[0].name, "Joe");
    assert_eq!(draft.contributions[0].role, "participant");
    assert_eq!(draft.contributions[1].role, "Researcher");
}

#[test]
fn custom_columns_are_kept_under_their_incoming_label() {
    let matrix = build(&grid(&[
        &["filename", "recording_equipment"],
        &["take.mp3", "Zoom H4n"],
    ]));
    let draft = RecordDraft::from_row(&matrix, &matrix.rows[0], FormType::Session).unwrap();
    assert_eq!(
        draft.custom.get("recording_equipment").map(String::as_str),
        Some("Zoom H4n")
    );
    assert!(draft.fields.is_empty());
}

#[test]
fn unlabeled_columns_and_empty_cells_contribute_nothing() {
    let matrix = build(&grid(&[
        &["filename", "", "title"],
        &["take.mp3", "stray", ""],
    ]));
    let draft = RecordDraft::from_row(&matrix, &matrix.rows[0], FormType::Session).unwrap();
    assert!(draft.fields.is_empty());
    assert!(draft.custom.is_empty());
}

#[test]
fn dates_are_normalized_to_iso() {
    let matrix = build(&grid(&[
        &["filename", "date"],
        &["take.mp3", "7/27/2022"],
    ]));
    let draft = RecordDraft::from_row(&matrix, &matrix.rows[0], FormType::Session).unwrap();
    assert_eq!(draft.fields.get("date").map(String::as_str), Some("2022-07-27"));
}

#[test]
fn identifier_is_not_duplicated_into_fields() {
    let matrix = build(&grid(&[
        &["filename", "title"],
        &["take.mp3", "Forest walk"],
    ]));
    let draft = RecordDraft::from_row(&matrix, &matrix.rows[0], FormType::Session).unwrap();
    assert!(!draft.fields.contains_key("id"));
    assert_eq!(draft.fields.get("title").map(String::as_str), Some("Forest walk"));
}

#[test]
fn import_writes_records_and_flags_replacements() {
    let dir = tempfile::tempdir().unwrap();
    let store = ProjectStore::open(dir.path()).unwrap();

    let matrix = build(&grid(&[
        &["filename", "title"],
        &["take.mp3", "Forest walk"],
        &["walk2.mp3", "Second walk"],
    ]));

    let outcomes = import_rows(&matrix, FormType::Session, &store).unwrap();
    assert_eq!(outcomes.len(), 2);
    assert!(outcomes.iter().all(|o| !o.replaced));
    assert!(outcomes[0].path.exists());
    assert!(store.contains_record(FormType::Session, "TAKE.MP3"));

    // importing again replaces
    let outcomes = import_rows(&matrix, FormType::Session, &store).unwrap();
    assert!(outcomes.iter().all(|o| o.replaced));

    let text = std::fs::read_to_string(&outcomes[0].path).unwrap();
    let round: RecordDraft = serde_json::from_str(&text).unwrap();
    assert_eq!(round.id, "take.mp3");
    assert_eq!(round.fields.get("title").map(String::as_str), Some("Forest walk"));
}
