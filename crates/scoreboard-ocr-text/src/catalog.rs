//! Immutable glyph catalogs and their JSON representation.

use crate::glyph::{GlyphFormatError, GlyphTemplate, RunLengthBitmap};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("glyph #{index} ({label:?}): {source}")]
    Glyph {
        index: usize,
        label: String,
        #[source]
        source: GlyphFormatError,
    },
    #[error("glyph catalog is empty")]
    Empty,
    #[error("every glyph in the catalog is excluded")]
    NoActiveGlyphs,
}

/// One serialized catalog entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlyphEntry {
    pub label: String,
    #[serde(flatten)]
    pub bitmap: RunLengthBitmap,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub excluded: bool,
}

/// On-disk catalog layout: `{ "glyphs": [ {label, width, height, runs}, ... ] }`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlyphCatalogFile {
    pub glyphs: Vec<GlyphEntry>,
}

/// Ordered list of glyph templates. Order matters: it breaks score ties.
#[derive(Clone, Debug)]
pub struct GlyphCatalog {
    glyphs: Vec<GlyphTemplate>,
}

impl GlyphCatalog {
    /// Wrap prepared templates. The catalog must contain at least one
    /// non-excluded glyph.
    pub fn new(glyphs: Vec<GlyphTemplate>) -> Result<Self, CatalogError> {
        if glyphs.is_empty() {
            return Err(CatalogError::Empty);
        }
        if glyphs.iter().all(GlyphTemplate::is_excluded) {
            return Err(CatalogError::NoActiveGlyphs);
        }
        Ok(Self { glyphs })
    }

    /// Decode every compact entry, failing on the first malformed one.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "info", skip(entries), fields(count = entries.len()))
    )]
    pub fn from_entries(entries: &[GlyphEntry]) -> Result<Self, CatalogError> {
        let glyphs = entries
            .iter()
            .enumerate()
            .map(|(index, e)| {
                GlyphTemplate::from_run_length(e.label.clone(), &e.bitmap, e.excluded).map_err(
                    |source| CatalogError::Glyph {
                        index,
                        label: e.label.clone(),
                        source,
                    },
                )
            })
            .collect::<Result<Vec<_>, _>>()?;
        let catalog = Self::new(glyphs)?;
        log::info!(
            "glyph catalog ready: {} glyphs ({} active)",
            catalog.len(),
            catalog.active().count()
        );
        Ok(catalog)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        let file: GlyphCatalogFile = serde_json::from_str(raw)?;
        Self::from_entries(&file.glyphs)
    }

    /// Load a JSON catalog from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    #[inline]
    pub fn glyphs(&self) -> &[GlyphTemplate] {
        &self.glyphs
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Glyphs that take part in line scanning, with their catalog index.
    pub fn active(&self) -> impl Iterator<Item = (usize, &GlyphTemplate)> + '_ {
        self.glyphs
            .iter()
            .enumerate()
            .filter(|(_, g)| !g.is_excluded())
    }

    /// First glyph carrying `label`.
    pub fn find(&self, label: &str) -> Option<&GlyphTemplate> {
        self.glyphs.iter().find(|g| g.label() == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"{
        "glyphs": [
            { "label": "o", "width": 3, "height": 3, "runs": [0, 4, 1, 4] },
            { "label": "0", "width": 3, "height": 3, "runs": [0, 4, 1, 4], "excluded": true }
        ]
    }"#;

    #[test]
    fn parses_compact_entries() {
        let catalog = GlyphCatalog::from_json_str(CATALOG).expect("catalog");
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.active().count(), 1);
        let o = catalog.find("o").expect("o");
        assert_eq!(o.ink(), 8);
        assert!(catalog.find("0").expect("0").is_excluded());
    }

    #[test]
    fn malformed_entry_names_the_glyph() {
        let raw = r#"{ "glyphs": [ { "label": "x", "width": 2, "height": 2, "runs": [1] } ] }"#;
        match GlyphCatalog::from_json_str(raw) {
            Err(CatalogError::Glyph { index, label, .. }) => {
                assert_eq!(index, 0);
                assert_eq!(label, "x");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn oversized_entry_is_an_error_not_a_panic() {
        let raw = r#"{ "glyphs": [
            { "label": "x", "width": 18446744073709551615, "height": 2, "runs": [0] }
        ] }"#;
        assert!(matches!(
            GlyphCatalog::from_json_str(raw),
            Err(CatalogError::Glyph {
                source: GlyphFormatError::TooLarge { .. },
                ..
            })
        ));
    }

    #[test]
    fn empty_catalog_is_an_error() {
        assert!(matches!(
            GlyphCatalog::from_json_str(r#"{ "glyphs": [] }"#),
            Err(CatalogError::Empty)
        ));
    }

    #[test]
    fn loads_from_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("glyphs.json");
        std::fs::write(&path, CATALOG).expect("write");
        let catalog = GlyphCatalog::load_json(&path).expect("load");
        assert_eq!(catalog.len(), 2);
        assert!(GlyphCatalog::load_json(dir.path().join("missing.json")).is_err());
    }
}
