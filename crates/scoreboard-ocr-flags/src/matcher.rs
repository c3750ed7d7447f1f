//! Whole-region colour matching.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::catalog::{FlagCatalog, FlagTemplate};
use scoreboard_ocr_core::{color_proximity, RgbaImage};
use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FlagError {
    #[error("flag region is {got:?}, flag {code:?} is {expected:?}")]
    SizeMismatch {
        code: String,
        expected: (usize, usize),
        got: (usize, usize),
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlagParams {
    /// Best scores below this mean "no flag".
    pub min_score: f32,
}

impl Default for FlagParams {
    fn default() -> Self {
        Self { min_score: 0.75 }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FlagMatch {
    pub code: String,
    pub score: f32,
}

/// Mean colour proximity between `target` and `flag` over every pixel, in
/// `[0, 1]`. Both must have the same size.
pub fn score_flag(target: &RgbaImage, flag: &FlagTemplate) -> Result<f32, FlagError> {
    let reference = flag.image();
    let expected = (reference.width(), reference.height());
    let got = (target.width(), target.height());
    if expected != got {
        return Err(FlagError::SizeMismatch {
            code: flag.code().to_owned(),
            expected,
            got,
        });
    }
    let total: f64 = target
        .as_raw()
        .chunks_exact(4)
        .zip(reference.as_raw().chunks_exact(4))
        .map(|(a, b)| f64::from(color_proximity([a[0], a[1], a[2]], [b[0], b[1], b[2]])))
        .sum();
    let n = (got.0 * got.1).max(1) as f64;
    Ok((total / n) as f32)
}

/// Picks the closest flag of a catalog.
#[derive(Clone, Debug)]
pub struct FlagMatcher {
    catalog: FlagCatalog,
    params: FlagParams,
}

impl FlagMatcher {
    pub fn new(catalog: FlagCatalog, params: FlagParams) -> Self {
        Self { catalog, params }
    }

    pub fn catalog(&self) -> &FlagCatalog {
        &self.catalog
    }

    pub fn params(&self) -> &FlagParams {
        &self.params
    }

    /// Best flag for `target`, or `None` when even the best one scores below
    /// [`FlagParams::min_score`]. The first of equally scoring flags wins.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            level = "debug",
            skip_all,
            fields(width = target.width(), height = target.height())
        )
    )]
    pub fn recognize(&self, target: &RgbaImage) -> Result<Option<FlagMatch>, FlagError> {
        let scores = self.score_all(target)?;
        let mut best: Option<(usize, f32)> = None;
        for (i, &score) in scores.iter().enumerate() {
            if best.map_or(true, |(_, b)| score > b) {
                best = Some((i, score));
            }
        }
        let Some((index, score)) = best else {
            return Ok(None);
        };
        let code = self.catalog.flags()[index].code();
        if score < self.params.min_score {
            log::debug!("best flag {:?} at {:.3} is below threshold", code, score);
            return Ok(None);
        }
        log::debug!("flag {:?} ({:.3})", code, score);
        Ok(Some(FlagMatch {
            code: code.to_owned(),
            score,
        }))
    }

    #[cfg(not(feature = "parallel"))]
    fn score_all(&self, target: &RgbaImage) -> Result<Vec<f32>, FlagError> {
        self.catalog
            .flags()
            .iter()
            .map(|flag| score_flag(target, flag))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn score_all(&self, target: &RgbaImage) -> Result<Vec<f32>, FlagError> {
        self.catalog
            .flags()
            .par_iter()
            .map(|flag| score_flag(target, flag))
            .collect()
    }
}
