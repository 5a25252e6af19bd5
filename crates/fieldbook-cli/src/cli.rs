//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use fieldbook_model::FormType;

#[derive(Parser)]
#[command(
    name = "fieldbook",
    version,
    about = "Fieldbook - bulk-import field sessions and participants from spreadsheets",
    long_about = "Bulk-import field-session and participant records from an xlsx or csv\n\
                  spreadsheet. Columns are mapped to known fields, cell values are\n\
                  validated against field vocabularies, and rows are gated before any\n\
                  record is written to the project."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Read a spreadsheet and show the mapped, validated import plan.
    Preview(PreviewArgs),

    /// Import the accepted rows of a spreadsheet into a project.
    Import(ImportArgs),

    /// List the known fields for each form.
    Fields(FieldsArgs),
}

#[derive(Parser)]
pub struct PreviewArgs {
    /// The xlsx or csv file to read.
    #[arg(value_name = "SPREADSHEET")]
    pub file: PathBuf,

    /// Which record shape the rows describe.
    #[arg(long, value_enum, default_value = "session")]
    pub form: FormArg,

    /// Column map JSON file (defaults to the bundled map).
    #[arg(long, value_name = "PATH")]
    pub mapping: Option<PathBuf>,

    /// Project directory, used to flag rows that collide with existing records.
    #[arg(long, value_name = "DIR")]
    pub project: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ImportArgs {
    /// The xlsx or csv file to read.
    #[arg(value_name = "SPREADSHEET")]
    pub file: PathBuf,

    /// Project directory to import into (created if missing).
    #[arg(long, value_name = "DIR")]
    pub project: PathBuf,

    /// Which record shape the rows describe.
    #[arg(long, value_enum, default_value = "session")]
    pub form: FormArg,

    /// Column map JSON file (defaults to the bundled map).
    #[arg(long, value_name = "PATH")]
    pub mapping: Option<PathBuf>,

    /// Build and report the plan without writing any records.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct FieldsArgs {
    /// Limit the listing to one form.
    #[arg(long, value_enum)]
    pub form: Option<FormArg>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FormArg {
    Session,
    Person,
}

impl From<FormArg> for FormType {
    fn from(arg: FormArg) -> Self {
        match arg {
            FormArg::Session => FormType::Session,
            FormArg::Person => FormType::Person,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
