//! Spreadsheet ingestion: turn an xlsx or csv file into a raw string grid.
//!
//! Parsing the file is commodity work done by `calamine` and `csv`; this
//! crate's job is only to deliver a rectangular grid of display strings
//! (row 0 = header, blank cells = `""`) for the matrix builder.

mod csv_reader;
mod error;
mod grid;
mod xlsx_reader;

use std::path::Path;

use tracing::debug;

pub use csv_reader::read_csv;
pub use error::IngestError;
pub use grid::Grid;
pub use xlsx_reader::read_xlsx;

/// Read a spreadsheet file, dispatching on its extension.
pub fn read_spreadsheet(path: &Path) -> Result<Grid, IngestError> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_lowercase();

    let grid = match extension.as_str() {
        "csv" => read_csv(path)?,
        "xlsx" | "xlsm" => read_xlsx(path)?,
        _ => {
            return Err(IngestError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension,
            });
        }
    };
    debug!(path = %path.display(), rows = grid.rows.len(), "read spreadsheet");
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sessions.ods");
        std::fs::write(&path, "not a real spreadsheet").unwrap();
        assert!(matches!(
            read_spreadsheet(&path),
            Err(IngestError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn missing_file_is_reported_before_dispatch() {
        assert!(matches!(
            read_spreadsheet(Path::new("no/such/file.csv")),
            Err(IngestError::FileNotFound { .. })
        ));
    }
}
