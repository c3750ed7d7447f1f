//! Row probes that tell apart the one-column shapes `l`, `i`, `ı` and `!`.
//!
//! These glyphs differ only in where their vertical stroke is interrupted,
//! so the line scanner picks whichever template fits best and then looks at
//! a few absolute rows of the target to decide which one it really was.
//! Row numbers are tied to the font and line crop height.

use scoreboard_ocr_core::ScanImage;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmbiguityProbes {
    /// Labels whose match triggers disambiguation.
    pub labels: Vec<String>,
    /// Rows between the `!` stroke and its dot.
    pub exclamation_gap_rows: Vec<i32>,
    /// Rows between the `i` tittle and its stem.
    pub small_i_gap_rows: Vec<i32>,
    /// Rows occupied by the `i` tittle.
    pub tittle_rows: Vec<i32>,
}

impl Default for AmbiguityProbes {
    fn default() -> Self {
        Self {
            labels: ["l", "i", "I", "!", "ı"].map(String::from).to_vec(),
            exclamation_gap_rows: vec![13],
            small_i_gap_rows: vec![6],
            tittle_rows: vec![3, 4],
        }
    }
}

impl AmbiguityProbes {
    pub fn applies_to(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    /// Decide among `!`, `ı`, `i` and `l` for a stroke spanning target
    /// columns `x0..=x1`. Always yields exactly one of those four.
    pub fn resolve(&self, target: &ScanImage, x0: i32, x1: i32) -> &'static str {
        let rows_empty = |rows: &[i32]| {
            !rows.is_empty() && rows.iter().all(|&y| target.row_is_empty(y, x0, x1))
        };
        let exclamation_gap = rows_empty(&self.exclamation_gap_rows);
        let small_i_gap = rows_empty(&self.small_i_gap_rows);

        if exclamation_gap && !small_i_gap {
            "!"
        } else if small_i_gap && rows_empty(&self.tittle_rows) {
            "ı"
        } else if small_i_gap {
            "i"
        } else {
            "l"
        }
    }
}
