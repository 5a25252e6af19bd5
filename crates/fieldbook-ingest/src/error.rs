use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("cannot find a spreadsheet at {path}")]
    FileNotFound { path: PathBuf },

    #[error("unsupported spreadsheet format {extension:?} for {path}")]
    UnsupportedFormat { path: PathBuf, extension: String },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("could not open workbook {path}: {message}")]
    Workbook { path: PathBuf, message: String },

    #[error("workbook {path} has no sheets")]
    EmptyWorkbook { path: PathBuf },
}
