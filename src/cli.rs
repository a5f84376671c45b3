use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Align an old dataset to a new dataset's columns and export both",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Reorder the old dataset to match the new one and export both files
    Convert(ConvertArgs),
    /// Show how columns of the old dataset map onto the new dataset
    Mapping(MappingArgs),
    /// List the columns of a dataset
    Columns(ColumnsArgs),
}

#[derive(Debug, Clone, Default, Args)]
pub struct InputOptions {
    /// Delimiter for CSV inputs (supports ',', 'tab', ';', '|'); forces CSV parsing
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input files (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct ConvertArgs {
    /// Reference dataset whose column layout wins (defaults to New.json)
    #[arg(short = 'n', long = "new")]
    pub new_input: Option<PathBuf>,
    /// Dataset to realign (defaults to Old.json)
    #[arg(short = 'o', long = "old")]
    pub old_input: Option<PathBuf>,
    /// Export target for the new dataset (defaults to NewFile.xlsx)
    #[arg(long = "new-output")]
    pub new_output: Option<PathBuf>,
    /// Export target for the realigned old dataset (defaults to OldFile.xlsx)
    #[arg(long = "old-output")]
    pub old_output: Option<PathBuf>,
    /// Worksheet name used in exported workbooks (defaults to Data)
    #[arg(long = "sheet-name")]
    pub sheet_name: Option<String>,
    /// YAML file providing defaults for the options above
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Print the column mapping before exporting
    #[arg(long = "show-mapping")]
    pub show_mapping: bool,
    #[command(flatten)]
    pub input: InputOptions,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
#[value(rename_all = "kebab-case")]
pub enum ReportFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Clone, Args)]
pub struct MappingArgs {
    /// Reference dataset whose column layout wins
    #[arg(short = 'n', long = "new")]
    pub new_input: PathBuf,
    /// Dataset whose columns are matched against the reference
    #[arg(short = 'o', long = "old")]
    pub old_input: PathBuf,
    /// Output format for the report
    #[arg(long, value_enum, default_value = "table")]
    pub format: ReportFormat,
    #[command(flatten)]
    pub input: InputOptions,
}

#[derive(Debug, Clone, Args)]
pub struct ColumnsArgs {
    /// Dataset to inspect
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    #[command(flatten)]
    pub options: InputOptions,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}
