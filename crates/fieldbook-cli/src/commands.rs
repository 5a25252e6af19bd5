use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};
use tracing::info_span;

use fieldbook_core::build_matrix;
use fieldbook_fields::{FieldRegistry, builtin_mapping, load_mapping};
use fieldbook_import::{ProjectStore, import_rows};
use fieldbook_ingest::read_spreadsheet;
use fieldbook_model::{
    ExistingRecords, FieldDefinition, FormType, ImportMapping, Matrix, NoExistingRecords,
};

use crate::cli::{FieldsArgs, ImportArgs, PreviewArgs};
use crate::render;

fn resolve_mapping(path: Option<&Path>) -> Result<ImportMapping> {
    match path {
        Some(path) => {
            load_mapping(path).with_context(|| format!("load column map {}", path.display()))
        }
        None => builtin_mapping().context("load builtin column map"),
    }
}

fn build(
    file: &Path,
    form: FormType,
    mapping: Option<&Path>,
    existing: &dyn ExistingRecords,
) -> Result<Matrix> {
    let registry = FieldRegistry::builtin().context("load field definitions")?;
    let mapping = resolve_mapping(mapping)?;
    let grid = read_spreadsheet(file).with_context(|| format!("read {}", file.display()))?;
    build_matrix(&grid, &mapping, form, &registry, existing).context("build import matrix")
}

pub fn run_preview(args: &PreviewArgs) -> Result<()> {
    let form = FormType::from(args.form);
    let span = info_span!("preview", file = %args.file.display());
    let _guard = span.enter();

    let store = args
        .project
        .clone()
        .map(ProjectStore::open)
        .transpose()
        .context("open project")?;
    let existing: &dyn ExistingRecords = match &store {
        Some(store) => store,
        None => &NoExistingRecords,
    };

    let matrix = build(&args.file, form, args.mapping.as_deref(), existing)?;
    render::print_matrix(&matrix);
    render::print_summary(&matrix);
    Ok(())
}

pub fn run_import(args: &ImportArgs) -> Result<()> {
    let form = FormType::from(args.form);
    let span = info_span!("import", file = %args.file.display());
    let _guard = span.enter();

    let store = ProjectStore::open(args.project.clone())
        .with_context(|| format!("open project {}", args.project.display()))?;
    let matrix = build(&args.file, form, args.mapping.as_deref(), &store)?;
    render::print_matrix(&matrix);
    render::print_summary(&matrix);

    if args.dry_run {
        println!("Dry run: no records were written.");
        return Ok(());
    }

    let outcomes = import_rows(&matrix, form, &store).context("import rows")?;
    if outcomes.is_empty() {
        println!("No rows were eligible for import.");
    } else {
        render::print_outcomes(&outcomes);
    }
    Ok(())
}

pub fn run_fields(args: &FieldsArgs) -> Result<()> {
    let registry = FieldRegistry::builtin().context("load field definitions")?;
    let forms = match args.form {
        Some(form) => vec![FormType::from(form)],
        None => vec![FormType::Session, FormType::Person],
    };
    for form in forms {
        let mut table = Table::new();
        render::apply_table_style(&mut table);
        table.set_header(vec![
            Cell::new(format!("{form} field")),
            Cell::new("Label"),
            Cell::new("Vocabulary"),
        ]);
        for field in registry.fields(form) {
            table.add_row(vec![
                Cell::new(&field.key),
                Cell::new(field.label()),
                Cell::new(vocabulary_summary(field)),
            ]);
        }
        println!("{table}");
    }
    Ok(())
}

fn vocabulary_summary(field: &FieldDefinition) -> String {
    if let Some(choices) = &field.complex_choices {
        return format!("structured ({} entries)", choices.len());
    }
    if let Some(choices) = &field.choices {
        let openness = if field.closed_vocabulary { "closed" } else { "open" };
        return format!("{openness} ({} values)", choices.len());
    }
    "-".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldbook_model::NoExistingRecords;

    #[test]
    fn builds_a_plan_from_a_csv_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sessions.csv");
        std::fs::write(
            &path,
            "date,filename,location_continent\n\
             2021-06-10,take.mp3,Australia\n\
             2021-07-01,take2.mp3,Australasia\n",
        )
        .unwrap();

        let matrix = build(&path, FormType::Session, None, &NoExistingRecords).unwrap();
        insta::assert_json_snapshot!(matrix.status_counts(), @r#"
        {
          "yes": 1,
          "no": 0,
          "not_allowed": 1
        }
        "#);
        assert_eq!(render::problem_lines(&matrix).len(), 1);
    }

    #[test]
    fn vocabulary_summary_names_the_shape() {
        let registry = FieldRegistry::builtin().unwrap();
        let continent = registry
            .definition(FormType::Session, "locationContinent")
            .unwrap();
        assert!(vocabulary_summary(continent).starts_with("closed"));
        let genre = registry.definition(FormType::Session, "genre").unwrap();
        assert!(vocabulary_summary(genre).starts_with("structured"));
        let title = registry.definition(FormType::Session, "title").unwrap();
        assert_eq!(vocabulary_summary(title), "-");
    }
}
