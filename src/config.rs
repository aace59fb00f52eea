use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::catalog::{CatalogEntry, ImageCatalog};
use crate::scheduler::RefreshInterval;

/// Looked up in the working directory at startup.
pub const CONFIG_FILE: &str = "sun-viewer.json";

// ---------------------------------------------------------------------------
// On-disk layout
// ---------------------------------------------------------------------------

/// Expected JSON schema, every field optional:
///
/// ```json
/// {
///   "catalog": [
///     { "name": "AIA 193", "url": "https://.../latest_1024_0193pfss.jpg" }
///   ],
///   "refresh_interval_minutes": 5
/// }
/// ```
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    catalog: Option<Vec<CatalogEntry>>,
    refresh_interval_minutes: Option<u64>,
}

// ---------------------------------------------------------------------------
// Validated configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewerConfig {
    pub catalog: ImageCatalog,
    pub refresh_interval: RefreshInterval,
}

impl ViewerConfig {
    /// Read `path`, falling back to the built-in defaults when it is absent.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No {} found, using built-in catalog", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("parsing {}", path.display()))
    }

    /// Like [`ViewerConfig::load`], but any error is logged and the defaults
    /// are used instead.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Ignoring config: {e:#}");
                Self::default()
            }
        }
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let raw: RawConfig = serde_json::from_str(text).context("invalid JSON")?;

        let catalog = match raw.catalog {
            Some(entries) => {
                validate_entries(&entries)?;
                ImageCatalog::new(entries)
            }
            None => ImageCatalog::default(),
        };

        let refresh_interval = match raw.refresh_interval_minutes {
            Some(minutes) => RefreshInterval::from_minutes(minutes).with_context(|| {
                format!("refresh_interval_minutes must be 1, 2, 5 or 10, got {minutes}")
            })?,
            None => RefreshInterval::default(),
        };

        Ok(Self {
            catalog,
            refresh_interval,
        })
    }
}

fn validate_entries(entries: &[CatalogEntry]) -> Result<()> {
    if entries.is_empty() {
        bail!("catalog must contain at least one entry");
    }
    let mut seen = BTreeSet::new();
    for (i, entry) in entries.iter().enumerate() {
        if entry.name.is_empty() {
            bail!("catalog entry {i} has an empty name");
        }
        if entry.url.is_empty() {
            bail!("catalog entry {:?} has an empty url", entry.name);
        }
        if !seen.insert(entry.name.as_str()) {
            bail!("duplicate catalog name {:?}", entry.name);
        }
    }
    Ok(())
}
