//! Flag catalogs and their JSON representation.

use crate::format::{FlagFormatError, RgbBitmap};
use scoreboard_ocr_core::RgbaImage;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

#[derive(thiserror::Error, Debug)]
pub enum FlagCatalogError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("flag #{index} ({code:?}): {source}")]
    Flag {
        index: usize,
        code: String,
        #[source]
        source: FlagFormatError,
    },
    #[error("flag {code:?} is {got:?}, catalog flags are {expected:?}")]
    SizeMismatch {
        code: String,
        expected: (usize, usize),
        got: (usize, usize),
    },
    #[error("flag catalog is empty")]
    Empty,
}

/// One flag: country code and its reference bitmap.
#[derive(Clone, Debug)]
pub struct FlagTemplate {
    code: String,
    image: RgbaImage,
}

impl FlagTemplate {
    pub fn new(code: impl Into<String>, image: RgbaImage) -> Result<Self, FlagFormatError> {
        let code = code.into();
        if code.is_empty() {
            return Err(FlagFormatError::EmptyCode);
        }
        Ok(Self { code, image })
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagEntry {
    pub code: String,
    #[serde(flatten)]
    pub bitmap: RgbBitmap,
}

/// On-disk layout: `{ "flags": [ {code, width, height, rgb}, ... ] }`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagCatalogFile {
    pub flags: Vec<FlagEntry>,
}

/// Ordered, non-empty list of same-sized flags. Order breaks score ties.
#[derive(Clone, Debug)]
pub struct FlagCatalog {
    flags: Vec<FlagTemplate>,
    width: usize,
    height: usize,
}

impl FlagCatalog {
    pub fn new(flags: Vec<FlagTemplate>) -> Result<Self, FlagCatalogError> {
        let first = flags.first().ok_or(FlagCatalogError::Empty)?;
        let (width, height) = (first.image.width(), first.image.height());
        if let Some(bad) = flags
            .iter()
            .find(|f| (f.image.width(), f.image.height()) != (width, height))
        {
            return Err(FlagCatalogError::SizeMismatch {
                code: bad.code.clone(),
                expected: (width, height),
                got: (bad.image.width(), bad.image.height()),
            });
        }
        Ok(Self {
            flags,
            width,
            height,
        })
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "info", skip(entries), fields(count = entries.len()))
    )]
    pub fn from_entries(entries: &[FlagEntry]) -> Result<Self, FlagCatalogError> {
        let flags = entries
            .iter()
            .enumerate()
            .map(|(index, e)| {
                e.bitmap
                    .decode()
                    .and_then(|img| FlagTemplate::new(e.code.clone(), img))
                    .map_err(|source| FlagCatalogError::Flag {
                        index,
                        code: e.code.clone(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let catalog = Self::new(flags)?;
        log::info!(
            "flag catalog ready: {} flags of {}x{}",
            catalog.len(),
            catalog.width,
            catalog.height
        );
        Ok(catalog)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, FlagCatalogError> {
        let file: FlagCatalogFile = serde_json::from_str(raw)?;
        Self::from_entries(&file.flags)
    }

    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, FlagCatalogError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    #[inline]
    pub fn flags(&self) -> &[FlagTemplate] {
        &self.flags
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Size every flag in the catalog shares.
    pub fn flag_size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn find(&self, code: &str) -> Option<&FlagTemplate> {
        self.flags.iter().find(|f| f.code == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"{
        "flags": [
            { "code": "fr", "width": 3, "height": 1, "rgb": [0,0,255, 255,255,255, 255,0,0] },
            { "code": "it", "width": 3, "height": 1, "rgb": [0,140,69, 244,249,255, 205,33,42] }
        ]
    }"#;

    #[test]
    fn parses_entries_in_order() {
        let catalog = FlagCatalog::from_json_str(CATALOG).expect("catalog");
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.flag_size(), (3, 1));
        assert_eq!(catalog.flags()[0].code(), "fr");
        assert_eq!(
            catalog.find("it").and_then(|f| f.image().pixel(0, 0)),
            Some([0, 140, 69, 255])
        );
    }

    #[test]
    fn rejects_mixed_sizes() {
        let raw = r#"{ "flags": [
            { "code": "a", "width": 1, "height": 1, "rgb": [0,0,0] },
            { "code": "b", "width": 2, "height": 1, "rgb": [0,0,0, 0,0,0] }
        ] }"#;
        assert!(matches!(
            FlagCatalog::from_json_str(raw),
            Err(FlagCatalogError::SizeMismatch { code, .. }) if code == "b"
        ));
    }

    #[test]
    fn oversized_entry_is_an_error_not_a_panic() {
        let raw = r#"{ "flags": [
            { "code": "xx", "width": 9223372036854775807, "height": 1, "rgb": [0,0,0] }
        ] }"#;
        assert!(matches!(
            FlagCatalog::from_json_str(raw),
            Err(FlagCatalogError::Flag {
                source: FlagFormatError::TooLarge { .. },
                ..
            })
        ));
    }

    #[test]
    fn empty_catalog_is_an_error() {
        assert!(matches!(
            FlagCatalog::from_json_str(r#"{ "flags": [] }"#),
            Err(FlagCatalogError::Empty)
        ));
    }

    #[test]
    fn load_failures_surface() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(matches!(
            FlagCatalog::load_json(dir.path().join("none.json")),
            Err(FlagCatalogError::Io(_))
        ));
        let path = dir.path().join("flags.json");
        std::fs::write(&path, "{ not json").expect("write");
        assert!(matches!(
            FlagCatalog::load_json(&path),
            Err(FlagCatalogError::Json(_))
        ));
    }
}
