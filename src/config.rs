//! Run configuration for the `convert` command.
//!
//! Values resolve in three layers: built-in defaults, an optional YAML file,
//! then command-line flags.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::{cli::ConvertArgs, export::DEFAULT_SHEET_NAME};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReconcileConfig {
    pub new_input: PathBuf,
    pub old_input: PathBuf,
    pub new_output: PathBuf,
    pub old_output: PathBuf,
    pub sheet_name: String,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            new_input: PathBuf::from("New.json"),
            old_input: PathBuf::from("Old.json"),
            new_output: PathBuf::from("NewFile.xlsx"),
            old_output: PathBuf::from("OldFile.xlsx"),
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
        }
    }
}

impl ReconcileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Reading configuration file {path:?}"))?;
        Self::from_yaml(&raw).with_context(|| format!("Parsing configuration file {path:?}"))
    }

    pub fn from_yaml(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(raw)?)
    }

    /// Builds the effective configuration for a `convert` invocation.
    pub fn resolve(args: &ConvertArgs) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        if let Some(path) = &args.new_input {
            config.new_input = path.clone();
        }
        if let Some(path) = &args.old_input {
            config.old_input = path.clone();
        }
        if let Some(path) = &args.new_output {
            config.new_output = path.clone();
        }
        if let Some(path) = &args.old_output {
            config.old_output = path.clone();
        }
        if let Some(name) = &args.sheet_name {
            config.sheet_name = name.clone();
        }
        Ok(config)
    }
}
