//! Column listing for a single dataset.

use anyhow::Result;
use log::info;

use crate::{
    cli::ColumnsArgs,
    data::{DatasetStats, get_columns},
    io_utils::{self, LoadOptions},
    table::Table,
};

pub fn execute(args: &ColumnsArgs) -> Result<()> {
    let options = LoadOptions::from_cli(&args.options)?;
    let records = io_utils::load_dataset(&args.input, &options)?;
    let stats = DatasetStats::of(&records);

    if stats.records == 0 {
        info!("{:?} does not contain any records", args.input);
        return Ok(());
    }

    let mut table = Table::new(["#", "name"]);
    for (idx, column) in get_columns(&records).into_iter().enumerate() {
        table.push_row([(idx + 1).to_string(), column]);
    }
    table.print();
    info!(
        "{:?}: {} record(s), {} column(s)",
        args.input, stats.records, stats.columns
    );
    Ok(())
}
