//! Column mapping report between two datasets.
//!
//! Loads both datasets, matches the old dataset's columns to the new one's, and
//! prints matched pairs, reference columns that will be null, and source
//! columns that will be dropped, either as a table or as JSON.

use anyhow::{Context, Result};
use log::info;

use crate::{
    cli::{MappingArgs, ReportFormat},
    data::get_columns,
    io_utils::{self, LoadOptions},
    mapping::{MappingReport, build_mapping},
    table::Table,
};

pub fn execute(args: &MappingArgs) -> Result<()> {
    let options = LoadOptions::from_cli(&args.input)?;
    let new_records = io_utils::load_dataset(&args.new_input, &options)?;
    let old_records = io_utils::load_dataset(&args.old_input, &options)?;

    let columns_new = get_columns(&new_records);
    let columns_old = get_columns(&old_records);
    let mapping = build_mapping(&columns_new, &columns_old);
    let report = MappingReport::new(&columns_new, &columns_old, &mapping);

    match args.format {
        ReportFormat::Table => report_table(&report).print(),
        ReportFormat::Json => {
            let rendered =
                serde_json::to_string_pretty(&report).context("Serializing mapping report")?;
            println!("{rendered}");
        }
    }
    info!(
        "Matched {} of {} column(s); {} unmatched, {} dropped",
        report.matched.len(),
        columns_new.len(),
        report.unmatched_targets.len(),
        report.dropped_sources.len()
    );
    Ok(())
}

pub fn report_table(report: &MappingReport) -> Table {
    let mut table = Table::new(["new", "old", "status"]);
    for pair in &report.matched {
        table.push_row([pair.target.as_str(), pair.source.as_str(), "matched"]);
    }
    for column in &report.unmatched_targets {
        table.push_row([column.as_str(), "", "null"]);
    }
    for column in &report.dropped_sources {
        table.push_row(["", column.as_str(), "dropped"]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_table_lists_every_column() {
        let columns_new = ["Name", "Email"];
        let columns_old = ["name", "legacy_code"];
        let mapping = build_mapping(&columns_new, &columns_old);
        let report = MappingReport::new(&columns_new, &columns_old, &mapping);
        let rendered = report_table(&report).render();
        let lines = rendered.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 5);
        assert!(lines[2].starts_with("Name"));
        assert!(lines[2].ends_with("matched"));
        assert!(lines[3].ends_with("null"));
        assert!(lines[4].contains("legacy_code"));
        assert!(lines[4].ends_with("dropped"));
    }
}
