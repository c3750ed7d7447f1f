//! JSON configuration and report helpers for whole-screen scans.

use crate::recognizer::{Recognizer, RecognizerParams};
use scoreboard_ocr_core::PixelRect;
use scoreboard_ocr_flags::{FlagCatalog, FlagCatalogError};
use scoreboard_ocr_text::{CatalogError, GlyphCatalog};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(thiserror::Error, Debug)]
pub enum ConfigIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("glyph catalog {}: {source}", path.display())]
    Glyphs {
        path: PathBuf,
        #[source]
        source: CatalogError,
    },
    #[error("flag catalog {}: {source}", path.display())]
    Flags {
        path: PathBuf,
        #[source]
        source: FlagCatalogError,
    },
}

/// Regions of one player row, in canonical screen coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowLayout {
    pub name: PixelRect,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flag: Option<PixelRect>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<PixelRect>,
}

impl RowLayout {
    /// Same row moved down by `dy`.
    pub fn offset(&self, dy: i32) -> Self {
        Self {
            name: self.name.offset(0, dy),
            flag: self.flag.map(|r| r.offset(0, dy)),
            score: self.score.map(|r| r.offset(0, dy)),
        }
    }
}

fn default_stretch() -> Option<[usize; 2]> {
    Some([1280, 720])
}

/// Where the rows of a results screen are.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenLayout {
    /// Canonical size screenshots are stretched to before cropping; `None`
    /// crops the screenshot as is.
    #[serde(default = "default_stretch")]
    pub stretch: Option<[usize; 2]>,
    pub rows: Vec<RowLayout>,
}

impl ScreenLayout {
    /// `count` rows starting at `first`, each `pitch` pixels below the
    /// previous one.
    pub fn evenly_spaced(first: RowLayout, pitch: i32, count: usize) -> Self {
        Self {
            stretch: default_stretch(),
            rows: (0..count).map(|i| first.offset(pitch * i as i32)).collect(),
        }
    }
}

/// Configuration of the `scan` command.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScreenConfig {
    /// Glyph catalog JSON, relative to the config file.
    pub glyph_catalog: String,
    /// Flag catalog JSON, relative to the config file.
    pub flag_catalog: String,
    #[serde(default)]
    pub output_path: Option<String>,
    #[serde(flatten)]
    pub layout: ScreenLayout,
    #[serde(default)]
    pub params: RecognizerParams,
}

impl ScreenConfig {
    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ConfigIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ConfigIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Resolve the output report path, if any.
    pub fn output_path(&self, base_dir: &Path) -> Option<PathBuf> {
        self.output_path.as_ref().map(|p| base_dir.join(p))
    }

    /// Load both catalogs (paths resolved against `base_dir`) and build the
    /// recognizer.
    pub fn build_recognizer(&self, base_dir: &Path) -> Result<Recognizer, ConfigError> {
        let glyph_path = base_dir.join(&self.glyph_catalog);
        let glyphs = GlyphCatalog::load_json(&glyph_path).map_err(|source| ConfigError::Glyphs {
            path: glyph_path.clone(),
            source,
        })?;
        let flag_path = base_dir.join(&self.flag_catalog);
        let flags = FlagCatalog::load_json(&flag_path).map_err(|source| ConfigError::Flags {
            path: flag_path.clone(),
            source,
        })?;
        Ok(Recognizer::new(glyphs, flags, self.params.clone()))
    }
}

/// One recognized player row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: String,
    /// Flag code, empty when no flag matched.
    pub flag: String,
    pub score: u64,
    /// Confidence of the name read.
    pub confidence: f32,
}

/// Report written by the `scan` command.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
    pub players: Vec<PlayerRecord>,
}

impl ScanReport {
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ConfigIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ConfigIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
