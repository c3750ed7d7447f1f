//! Bounded ring-search distance field and per-column occupancy statistics.
//!
//! The field is a coarse, non-Euclidean approximation: each cell searches
//! Chebyshev rings `0..=MAX_RADIUS` around itself and reports the first
//! foreground probe as `layer + step / layer`. Probe order inside a ring is
//! fixed, so ties resolve identically on every run. Scoring weights
//! downstream are tuned against exactly these values.

use crate::image::{PixelRect, RgbaImage};

/// Largest Chebyshev ring searched.
pub const MAX_RADIUS: i32 = 4;

/// Distance reported when no foreground pixel lies within [`MAX_RADIUS`].
pub const FAR: f32 = 100.0;

/// The eight symmetric probe directions for ring `layer` at `step`.
#[inline]
fn ring_probes(layer: i32, step: i32) -> [(i32, i32); 8] {
    [
        (layer, step),
        (-layer, step),
        (layer, -step),
        (-layer, -step),
        (step, layer),
        (step, -layer),
        (-step, layer),
        (-step, -layer),
    ]
}

/// Per-pixel approximate distance to the nearest foreground pixel.
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceField {
    width: usize,
    height: usize,
    values: Vec<f32>,
}

impl DistanceField {
    /// Compute the field for `image`. When `restrict` is set, only probes
    /// inside that rectangle can register a hit.
    pub fn compute(image: &RgbaImage, restrict: Option<PixelRect>) -> Self {
        let (width, height) = (image.width(), image.height());
        let mut values = Vec::with_capacity(width * height);
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                values.push(cell_distance(image, restrict.as_ref(), x, y));
            }
        }
        Self {
            width,
            height,
            values,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major cell values.
    #[inline]
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Distance at `(x, y)`; [`FAR`] outside the field.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> f32 {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return FAR;
        }
        self.values[y as usize * self.width + x as usize]
    }
}

fn cell_distance(image: &RgbaImage, restrict: Option<&PixelRect>, x: i32, y: i32) -> f32 {
    let hit = |px: i32, py: i32| {
        restrict.map_or(true, |r| r.contains(px, py)) && image.is_foreground(px, py)
    };

    if hit(x, y) {
        return 0.0;
    }
    for layer in 1..=MAX_RADIUS {
        for step in 0..=layer {
            for (dx, dy) in ring_probes(layer, step) {
                if hit(x + dx, y + dy) {
                    return layer as f32 + step as f32 / layer as f32;
                }
            }
        }
    }
    FAR
}

/// Per-column fill ratio plus nearest filled/empty column lookups.
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnStats {
    filling: Vec<f32>,
    next_filled: Vec<Option<usize>>,
    prev_filled: Vec<Option<usize>>,
    next_empty: Vec<Option<usize>>,
}

impl ColumnStats {
    pub fn compute(image: &RgbaImage) -> Self {
        let (width, height) = (image.width(), image.height());
        let mut counts = vec![0usize; width];
        for (x, count) in counts.iter_mut().enumerate() {
            *count = (0..height as i32)
                .filter(|&y| image.is_foreground(x as i32, y))
                .count();
        }
        let filling = counts
            .iter()
            .map(|&c| if height == 0 { 0.0 } else { c as f32 / height as f32 })
            .collect();

        let mut next_filled = vec![None; width];
        let mut next_empty = vec![None; width];
        let mut nf = None;
        let mut ne = None;
        for x in (0..width).rev() {
            if counts[x] > 0 {
                nf = Some(x);
            } else {
                ne = Some(x);
            }
            next_filled[x] = nf;
            next_empty[x] = ne;
        }

        let mut prev_filled = vec![None; width];
        let mut pf = None;
        for x in 0..width {
            if counts[x] > 0 {
                pf = Some(x);
            }
            prev_filled[x] = pf;
        }

        Self {
            filling,
            next_filled,
            prev_filled,
            next_empty,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.filling.len()
    }

    /// Foreground fraction of column `x`; `0` outside the buffer.
    #[inline]
    pub fn filling(&self, x: i32) -> f32 {
        if x < 0 {
            return 0.0;
        }
        self.filling.get(x as usize).copied().unwrap_or(0.0)
    }

    /// First column `>= x` holding at least one foreground pixel.
    pub fn next_filled(&self, x: i32) -> Option<usize> {
        let x = x.max(0) as usize;
        self.next_filled.get(x).copied().flatten()
    }

    /// Last column `<= x` holding at least one foreground pixel.
    pub fn prev_filled(&self, x: i32) -> Option<usize> {
        if x < 0 || self.filling.is_empty() {
            return None;
        }
        let x = (x as usize).min(self.filling.len() - 1);
        self.prev_filled[x]
    }

    /// First column `>= x` that is entirely background.
    pub fn next_empty(&self, x: i32) -> Option<usize> {
        let x = x.max(0) as usize;
        self.next_empty.get(x).copied().flatten()
    }
}
