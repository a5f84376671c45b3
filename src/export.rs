//! Dataset export to XLSX, delimited text, or JSON.
//!
//! Workbooks hold a single worksheet whose first row is the union of keys
//! across all records, in first-seen order. Null cells are left blank.

use std::{collections::HashSet, io::Write, path::Path};

use anyhow::{Context, Result, anyhow, bail};
use log::{debug, warn};
use rust_xlsxwriter::{ColNum, RowNum, Workbook, Worksheet};

use crate::{
    data::{Record, Value},
    io_utils,
};

pub const DEFAULT_SHEET_NAME: &str = "Data";

/// Largest integer magnitude Excel stores without losing digits.
const MAX_EXACT_INTEGER: i64 = 999_999_999_999_999;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Xlsx,
    Delimited(u8),
    Json,
}

pub fn resolve_output_format(path: &Path) -> Result<OutputFormat> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("xlsx") => Ok(OutputFormat::Xlsx),
        Some(ext) if ext.eq_ignore_ascii_case("csv") => Ok(OutputFormat::Delimited(
            io_utils::DEFAULT_CSV_DELIMITER,
        )),
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => Ok(OutputFormat::Delimited(
            io_utils::DEFAULT_TSV_DELIMITER,
        )),
        Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(OutputFormat::Json),
        _ if io_utils::is_dash(path) => Ok(OutputFormat::Json),
        _ => bail!("Cannot determine output format for {path:?} (expected .xlsx, .csv, .tsv or .json)"),
    }
}

/// Keys of every record, in the order they are first seen.
pub fn sheet_columns(records: &[Record]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut columns = Vec::new();
    for record in records {
        for name in record.columns() {
            if seen.insert(name) {
                columns.push(name.to_string());
            }
        }
    }
    columns
}

/// Builds a single-sheet workbook and returns its XLSX bytes.
pub fn encode_workbook(records: &[Record], sheet_name: &str) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook
        .add_worksheet()
        .set_name(sheet_name)
        .with_context(|| format!("Naming worksheet '{sheet_name}'"))?;

    let columns = sheet_columns(records);
    for (col, name) in columns.iter().enumerate() {
        worksheet
            .write_string(0, column_number(col)?, name.as_str())
            .with_context(|| format!("Writing header '{name}'"))?;
    }

    for (idx, record) in records.iter().enumerate() {
        let row = RowNum::try_from(idx + 1)
            .map_err(|_| anyhow!("Row {} exceeds the worksheet limit", idx + 1))?;
        for (col, name) in columns.iter().enumerate() {
            if let Some(value) = record.value(name) {
                write_cell(worksheet, row, column_number(col)?, value)
                    .with_context(|| format!("Writing record {idx} column '{name}'"))?;
            }
        }
    }

    let buffer = workbook
        .save_to_buffer()
        .context("Encoding XLSX workbook")?;
    debug!(
        "Encoded {} record(s) across {} column(s) into {} byte(s)",
        records.len(),
        columns.len(),
        buffer.len()
    );
    Ok(buffer)
}

fn column_number(col: usize) -> Result<ColNum> {
    ColNum::try_from(col).map_err(|_| anyhow!("Column {} exceeds the worksheet limit", col + 1))
}

fn write_cell(worksheet: &mut Worksheet, row: RowNum, col: ColNum, value: &Value) -> Result<()> {
    match value {
        Value::String(s) => {
            worksheet.write_string(row, col, s.as_str())?;
        }
        Value::Integer(i) if i.unsigned_abs() > MAX_EXACT_INTEGER as u64 => {
            warn!("Integer {i} exceeds spreadsheet precision; writing it as text");
            worksheet.write_string(row, col, &i.to_string())?;
        }
        Value::Integer(i) => {
            worksheet.write_number(row, col, *i as f64)?;
        }
        Value::Float(f) => {
            worksheet.write_number(row, col, *f)?;
        }
        Value::Boolean(b) => {
            worksheet.write_boolean(row, col, *b)?;
        }
    }
    Ok(())
}

pub fn write_delimited<W: Write>(records: &[Record], writer: W, delimiter: u8) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .double_quote(true)
        .from_writer(writer);
    let columns = sheet_columns(records);
    writer
        .write_record(&columns)
        .context("Writing header row")?;
    for (idx, record) in records.iter().enumerate() {
        let fields = columns
            .iter()
            .map(|name| record.value(name).map(Value::as_display).unwrap_or_default());
        writer
            .write_record(fields)
            .with_context(|| format!("Writing record {idx}"))?;
    }
    writer.flush().context("Flushing delimited output")?;
    Ok(())
}

pub fn write_json<W: Write>(records: &[Record], mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, records).context("Serializing records as JSON")?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Writes `records` to `path` in the format implied by its extension.
///
/// The whole output is rendered in memory first; `path` is only created once
/// encoding has succeeded, so a failed export leaves an existing file intact.
pub fn export_dataset(records: &[Record], path: &Path, sheet_name: &str) -> Result<()> {
    let buffer = match resolve_output_format(path)? {
        OutputFormat::Xlsx => encode_workbook(records, sheet_name)?,
        OutputFormat::Delimited(delimiter) => {
            let mut buf = Vec::new();
            write_delimited(records, &mut buf, delimiter)?;
            buf
        }
        OutputFormat::Json => {
            let mut buf = Vec::new();
            write_json(records, &mut buf)?;
            buf
        }
    };
    let mut output = io_utils::open_output(path)?;
    output
        .write_all(&buffer)
        .with_context(|| format!("Writing export to {path:?}"))?;
    output
        .flush()
        .with_context(|| format!("Flushing export to {path:?}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn row(cells: &[(&str, Option<Value>)]) -> Record {
        cells.iter().cloned().collect()
    }

    #[test]
    fn sheet_columns_union_in_first_seen_order() {
        let records = vec![
            row(&[("a", None), ("b", None)]),
            row(&[("c", None), ("a", None)]),
        ];
        assert_eq!(sheet_columns(&records), vec!["a", "b", "c"]);
    }

    #[test]
    fn output_format_from_extension() {
        assert_eq!(
            resolve_output_format(&PathBuf::from("NewFile.xlsx")).unwrap(),
            OutputFormat::Xlsx
        );
        assert_eq!(
            resolve_output_format(&PathBuf::from("out.tsv")).unwrap(),
            OutputFormat::Delimited(b'\t')
        );
        assert!(resolve_output_format(&PathBuf::from("out.xls")).is_err());
    }

    #[test]
    fn delimited_output_blanks_nulls() {
        let records = vec![row(&[
            ("Name", Some(Value::from("Y"))),
            ("Age", None),
            ("Active", Some(Value::Boolean(true))),
        ])];
        let mut buf = Vec::new();
        write_delimited(&records, &mut buf, b',').unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "Name,Age,Active\nY,,true\n");
    }

    #[test]
    fn json_output_keeps_nulls() {
        let records = vec![row(&[("Name", Some(Value::from("Y"))), ("Age", None)])];
        let mut buf = Vec::new();
        write_json(&records, &mut buf).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(parsed, serde_json::json!([{"Name": "Y", "Age": null}]));
    }

    #[test]
    fn encode_workbook_produces_zip_container() {
        let records = vec![row(&[("Name", Some(Value::from("Y")))])];
        let bytes = encode_workbook(&records, DEFAULT_SHEET_NAME).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn encode_workbook_rejects_invalid_sheet_name() {
        let records = vec![row(&[("Name", Some(Value::from("Y")))])];
        assert!(encode_workbook(&records, "bad/name").is_err());
    }
}
