//! Dataset loading and output plumbing.
//!
//! All file I/O in reconcile-sheets flows through this module:
//!
//! - **Format resolution**: `.csv` / `.tsv` inputs (or any input given an
//!   explicit delimiter) are read as delimited text; everything else is read
//!   as a JSON array of flat objects.
//! - **Encoding**: input bytes are decoded via `encoding_rs`, defaulting to UTF-8.
//! - **stdin/stdout**: the `-` path convention routes through standard streams.

use std::{
    fs::File,
    io::{self, BufWriter, Read, Write},
    path::Path,
};

use anyhow::{Context, Result, anyhow, bail};
use encoding_rs::{Encoding, UTF_8};
use log::debug;

use crate::{
    cli::InputOptions,
    data::{Record, Value, cell_from_json},
};

pub const DEFAULT_CSV_DELIMITER: u8 = b',';
pub const DEFAULT_TSV_DELIMITER: u8 = b'\t';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Delimited(u8),
}

#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
    pub delimiter: Option<u8>,
    pub encoding: &'static Encoding,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            delimiter: None,
            encoding: UTF_8,
        }
    }
}

impl LoadOptions {
    pub fn from_cli(options: &InputOptions) -> Result<Self> {
        Ok(Self {
            delimiter: options.delimiter,
            encoding: resolve_encoding(options.input_encoding.as_deref())?,
        })
    }
}

pub fn is_dash(path: &Path) -> bool {
    path == Path::new("-")
}

pub fn resolve_encoding(label: Option<&str>) -> Result<&'static Encoding> {
    if let Some(value) = label {
        Encoding::for_label(value.trim().as_bytes())
            .ok_or_else(|| anyhow!("Unknown encoding '{value}'"))
    } else {
        Ok(UTF_8)
    }
}

pub fn resolve_input_format(path: &Path, delimiter: Option<u8>) -> InputFormat {
    if let Some(delimiter) = delimiter {
        return InputFormat::Delimited(delimiter);
    }
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => {
            InputFormat::Delimited(DEFAULT_TSV_DELIMITER)
        }
        Some(ext) if ext.eq_ignore_ascii_case("csv") => {
            InputFormat::Delimited(DEFAULT_CSV_DELIMITER)
        }
        _ => InputFormat::Json,
    }
}

pub fn decode_bytes(bytes: &[u8], encoding: &'static Encoding) -> Result<String> {
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        Err(anyhow!(
            "Failed to decode text with encoding {}",
            encoding.name()
        ))
    } else {
        Ok(text.into_owned())
    }
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    if is_dash(path) {
        io::stdin()
            .lock()
            .read_to_end(&mut buf)
            .context("Reading dataset from stdin")?;
    } else {
        File::open(path)
            .with_context(|| format!("Opening input file {path:?}"))?
            .read_to_end(&mut buf)
            .with_context(|| format!("Reading input file {path:?}"))?;
    }
    Ok(buf)
}

pub fn load_dataset(path: &Path, options: &LoadOptions) -> Result<Vec<Record>> {
    let bytes = read_input(path)?;
    let text = decode_bytes(&bytes, options.encoding)
        .with_context(|| format!("Decoding {path:?}"))?;
    let records = match resolve_input_format(path, options.delimiter) {
        InputFormat::Json => parse_json_dataset(&text),
        InputFormat::Delimited(delimiter) => parse_delimited_dataset(&text, delimiter),
    }
    .with_context(|| format!("Parsing dataset {path:?}"))?;
    debug!("Parsed {} record(s) from {:?}", records.len(), path);
    Ok(records)
}

/// Parses a JSON array of flat objects. A top-level `null` is an empty dataset.
pub fn parse_json_dataset(text: &str) -> Result<Vec<Record>> {
    let document: serde_json::Value = serde_json::from_str(text).context("Invalid JSON")?;
    let items = match document {
        serde_json::Value::Null => return Ok(Vec::new()),
        serde_json::Value::Array(items) => items,
        _ => bail!("Expected a JSON array of objects at the top level"),
    };

    items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            let object = item
                .as_object()
                .ok_or_else(|| anyhow!("Record {idx} is not a JSON object"))?;
            let mut record = Record::with_capacity(object.len());
            for (name, value) in object {
                let cell = cell_from_json(value)
                    .with_context(|| format!("Record {idx} column '{name}'"))?;
                record.insert(name.as_str(), cell);
            }
            Ok(record)
        })
        .collect()
}

/// Parses delimited text with a header row. Every cell is kept as a string.
pub fn parse_delimited_dataset(text: &str, delimiter: u8) -> Result<Vec<Record>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .double_quote(true)
        .flexible(false)
        .from_reader(text.as_bytes());
    let headers = reader.headers().context("Reading header row")?.clone();

    let mut records = Vec::new();
    for (idx, row) in reader.records().enumerate() {
        let row = row.with_context(|| format!("Reading row {}", idx + 2))?;
        let mut record = Record::with_capacity(headers.len());
        for (name, cell) in headers.iter().zip(row.iter()) {
            record.insert(name, Some(Value::String(cell.to_string())));
        }
        records.push(record);
    }
    Ok(records)
}

pub fn open_output(path: &Path) -> Result<Box<dyn Write>> {
    if is_dash(path) {
        Ok(Box::new(io::stdout()))
    } else {
        let file = File::create(path).with_context(|| format!("Creating output file {path:?}"))?;
        Ok(Box::new(BufWriter::new(file)))
    }
}
