//! The `convert` workflow: load both datasets, realign the old one to the new
//! one's columns, then export the new dataset followed by the realigned old
//! dataset.

use anyhow::{Context, Result, bail};
use log::{debug, info, warn};

use crate::{
    cli::ConvertArgs,
    config::ReconcileConfig,
    data::{DatasetStats, get_columns},
    export,
    io_utils::{self, LoadOptions},
    mapping::MappingReport,
    mapping_cmd,
    reorder::{Reordered, reorder},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertSummary {
    pub new_stats: DatasetStats,
    pub old_stats: DatasetStats,
    pub report: MappingReport,
}

pub fn execute(args: &ConvertArgs) -> Result<()> {
    let config = ReconcileConfig::resolve(args)?;
    let options = LoadOptions::from_cli(&args.input)?;
    run(&config, &options, args.show_mapping)?;
    Ok(())
}

pub fn run(
    config: &ReconcileConfig,
    options: &LoadOptions,
    show_mapping: bool,
) -> Result<ConvertSummary> {
    info!("Loading data...");
    let new_records = io_utils::load_dataset(&config.new_input, options)?;
    let old_records = io_utils::load_dataset(&config.old_input, options)?;
    let new_stats = DatasetStats::of(&new_records);
    let old_stats = DatasetStats::of(&old_records);
    info!(
        "Loaded {} record(s) from {:?} and {} record(s) from {:?}",
        new_stats.records, config.new_input, old_stats.records, config.old_input
    );

    if new_records.is_empty() || old_records.is_empty() {
        bail!("No data available to convert");
    }

    info!("Reordering old file columns...");
    let Reordered { reordered, mapping } = reorder(&new_records, &old_records)?;
    let report = MappingReport::new(
        &get_columns(&new_records),
        &get_columns(&old_records),
        &mapping,
    );
    for pair in &report.matched {
        debug!("Column '{}' <- '{}'", pair.target, pair.source);
    }
    for column in &report.unmatched_targets {
        warn!("Column '{column}' has no match in the old file and will be empty");
    }
    for column in &report.dropped_sources {
        warn!("Old file column '{column}' has no match in the new file and is dropped");
    }
    if show_mapping {
        mapping_cmd::report_table(&report).print();
    }

    info!("Exporting new file to {:?}...", config.new_output);
    export::export_dataset(&new_records, &config.new_output, &config.sheet_name)
        .with_context(|| format!("Exporting new dataset to {:?}", config.new_output))?;

    info!("Exporting old file to {:?}...", config.old_output);
    export::export_dataset(&reordered, &config.old_output, &config.sheet_name)
        .with_context(|| format!("Exporting old dataset to {:?}", config.old_output))?;

    info!(
        "Success! Exported {} record(s) from the new file and {} record(s) from the old file with matching {} column(s)",
        new_stats.records, old_stats.records, new_stats.columns
    );
    Ok(ConvertSummary {
        new_stats,
        old_stats,
        report,
    })
}
