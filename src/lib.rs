pub mod cli;
pub mod columns;
pub mod config;
pub mod convert;
pub mod data;
pub mod export;
pub mod io_utils;
pub mod mapping;
pub mod mapping_cmd;
pub mod normalize;
pub mod reorder;
pub mod table;

use std::{env, sync::OnceLock};

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

use crate::cli::{Cli, Commands};

pub use crate::{
    data::{Record, Value, get_columns},
    mapping::{ColumnMapping, build_mapping},
    normalize::normalize_key,
    reorder::{ReconcileError, Reordered, reorder},
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("reconcile_sheets", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Convert(args) => convert::execute(&args),
        Commands::Mapping(args) => mapping_cmd::execute(&args),
        Commands::Columns(args) => columns::execute(&args),
    }
}
