pub mod batch;
pub mod config;
pub mod extract;
pub mod layouts;

use std::path::{Path, PathBuf};

use stmtx_core::StmtxConfig;
use tracing::debug;

/// Default configuration file location.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("stmtx")
        .join("config.json")
}

/// Load the explicit config file, else the default one if present, else
/// built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<StmtxConfig> {
    if let Some(path) = config_path {
        return Ok(StmtxConfig::from_file(Path::new(path))?);
    }

    let path = default_config_path();
    if path.exists() {
        debug!("Using config file {}", path.display());
        Ok(StmtxConfig::from_file(&path)?)
    } else {
        Ok(StmtxConfig::default())
    }
}
