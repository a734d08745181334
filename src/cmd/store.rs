//! File-backed loading of the catalog and settings records
//!
//! Missing files are not an error: they yield the same defaults a fresh
//! install starts from.

use color_eyre::eyre::{Result, WrapErr};
use emberfly_common::{Catalog, Image, SystemSettings};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Load the image catalog from `images.yaml`.
pub fn load_catalog(path: &Path) -> Result<Vec<Image>> {
    if !path.exists() {
        debug!(path = %path.display(), "catalog file missing, starting empty");
        return Ok(Vec::new());
    }
    let text = fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read catalog {}", path.display()))?;
    let catalog: Catalog = serde_yaml::from_str(&text)
        .wrap_err_with(|| format!("failed to parse catalog {}", path.display()))?;
    Ok(catalog.images)
}

/// Load the system settings record from `system.json`.
pub fn load_settings(path: &Path) -> Result<SystemSettings> {
    if !path.exists() {
        debug!(path = %path.display(), "settings file missing, using defaults");
        return Ok(SystemSettings::default());
    }
    let text = fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read settings {}", path.display()))?;
    let settings = serde_json::from_str(&text)
        .wrap_err_with(|| format!("failed to parse settings {}", path.display()))?;
    Ok(settings)
}
