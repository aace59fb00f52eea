use serde::Deserialize;

// ---------------------------------------------------------------------------
// Catalog entry – one selectable image
// ---------------------------------------------------------------------------

/// A display name and the URL its latest image is served from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub url: String,
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// ImageCatalog – the fixed name → URL table
// ---------------------------------------------------------------------------

/// Ordered name → URL table offered in the selection dropdown.
///
/// Order is preserved so the dropdown lists entries as configured; the first
/// entry is the one loaded at startup. Names are unique (checked when the
/// catalog comes from a config file).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCatalog {
    entries: Vec<CatalogEntry>,
}

impl Default for ImageCatalog {
    /// The four SDO "latest image" PFSS variants.
    fn default() -> Self {
        const BASE: &str = "https://sdo.gsfc.nasa.gov/assets/img/latest";
        Self::new(vec![
            CatalogEntry::new(
                "1024 PFSS - AIA 193 Å",
                format!("{BASE}/latest_1024_0193pfss.jpg"),
            ),
            CatalogEntry::new(
                "1024 PFSS - AIA 211 Å",
                format!("{BASE}/latest_1024_0211pfss.jpg"),
            ),
            CatalogEntry::new(
                "1024 PFSS - AIA 171 Å",
                format!("{BASE}/latest_1024_0171pfss.jpg"),
            ),
            CatalogEntry::new(
                "1024 PFSS - AIA 211 Å, 193 Å, 171 Å",
                format!("{BASE}/f_211_193_171pfss_1024.jpg"),
            ),
        ])
    }
}

impl ImageCatalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// Look up the URL for a display name.
    pub fn url_for(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.url.as_str())
    }

    /// Display names in dropdown order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// The entry loaded at startup.
    pub fn default_name(&self) -> Option<&str> {
        self.entries.first().map(|e| e.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
