use crate::finder::FinderParams;
use crate::ndv::{NdvDef, NdvError};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct RuntimeConfig {
    pub input: PathBuf,
    #[serde(default)]
    pub ndv: NdvConfig,
    #[serde(default)]
    pub finder: FinderParams,
    pub output: OutputConfig,
}

/// No-data terms, in the `"v v v"` / `"min..max"` syntax of [`crate::ndv`].
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NdvConfig {
    pub ndv: Vec<String>,
    pub valid_range: Vec<String>,
}

impl NdvConfig {
    pub fn to_def(&self) -> Result<NdvDef, NdvError> {
        NdvDef::new(self.ndv.as_slice(), self.valid_range.as_slice())
    }
}

#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    pub json_out: PathBuf,
    /// Mask with hull, sides and final polygon drawn over it.
    #[serde(default)]
    pub debug_png: Option<PathBuf>,
    /// Rasterised polygon.
    #[serde(default)]
    pub mask_png: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<RuntimeConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    let config = parse_config(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))?;
    config
        .finder
        .anneal
        .validate()
        .map_err(|e| format!("Invalid config {}: {e}", path.display()))?;
    Ok(config)
}

pub fn parse_config(data: &str) -> Result<RuntimeConfig, serde_json::Error> {
    serde_json::from_str(data)
}
