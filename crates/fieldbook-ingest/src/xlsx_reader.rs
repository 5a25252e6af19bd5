use std::path::Path;

use calamine::{Data, Reader, Xlsx, open_workbook};
use chrono::NaiveTime;
use tracing::debug;

use crate::error::IngestError;
use crate::grid::{Grid, scrub};

/// Read the first sheet of an xlsx workbook into a raw grid.
pub fn read_xlsx(path: &Path) -> Result<Grid, IngestError> {
    let mut workbook: Xlsx<std::io::BufReader<std::fs::File>> =
        open_workbook(path).map_err(|error: calamine::XlsxError| IngestError::Workbook {
        path: path.to_path_buf(),
        message: error.to_string(),
    })?;

    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| IngestError::EmptyWorkbook {
            path: path.to_path_buf(),
        })?;

    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|error| IngestError::Workbook {
            path: path.to_path_buf(),
            message: error.to_string(),
        })?;

    debug!(sheet = %sheet, rows = range.height(), "read worksheet");

    let rows = range
        .rows()
        .map(|row| row.iter().map(render_cell).collect())
        .collect();
    Ok(Grid::new(rows))
}

/// Render a workbook cell the way it displays: dates as ISO, whole-number
/// floats without the trailing `.0`, error cells as blanks.
fn render_cell(data: &Data) -> String {
    match data {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) => scrub(s),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => render_float(*f),
        Data::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(naive) if naive.time() == NaiveTime::MIN => {
                naive.date().format("%Y-%m-%d").to_string()
            }
            Some(naive) => naive.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => render_float(dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
    }
}

fn render_float(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        f.to_string()
    }
}
