use std::path::Path;

use csv::ReaderBuilder;

use crate::error::IngestError;
use crate::grid::{Grid, scrub};

/// Read a csv file into a raw grid, header row included.
///
/// The csv reader enforces rectangularity; a record with a deviating field
/// count surfaces as an error here rather than as a broken grid downstream.
pub fn read_csv(path: &Path) -> Result<Grid, IngestError> {
    let mut reader = ReaderBuilder::new().has_headers(false).from_path(path)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(scrub).collect());
    }
    Ok(Grid::new(rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_csv(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sessions.csv");
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn reads_header_and_rows() {
        let (_dir, path) = write_csv("date,filename,title\n2021-06-10,take.mp3,Forest\n");
        let grid = read_csv(&path).unwrap();
        assert_eq!(
            grid.header().unwrap(),
            &["date".to_string(), "filename".to_string(), "title".to_string()]
        );
        assert_eq!(grid.data_rows().len(), 1);
        assert_eq!(grid.data_rows()[0][1], "take.mp3");
    }

    #[test]
    fn blank_cells_are_empty_strings() {
        let (_dir, path) = write_csv("a,b\n1,\n");
        let grid = read_csv(&path).unwrap();
        assert_eq!(grid.data_rows()[0][1], "");
    }

    #[test]
    fn ragged_record_is_an_error() {
        let (_dir, path) = write_csv("a,b\n1,2,3\n");
        assert!(read_csv(&path).is_err());
    }
}
