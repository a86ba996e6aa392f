//! Filled contour bands over an explicit coordinate grid.
//!
//! Every grid cell is split into two triangles. The field is linear across a
//! triangle, so clipping the triangle against a band's lower and upper levels
//! gives the exact region of that band inside it.

use rayon::prelude::*;
use tracing::debug;

use super::{
    colormaps::ColorMap,
    errors::{FieldError, Result},
    figure::{ColorScale, Extent, LayerTrait, Patch},
    levels::ContourLevels,
    type_lib::{finite_range, Field, NumericData, Point},
};

type Vertex = (Point, NumericData);

#[derive(Debug, Clone)]
pub struct ContourLayer {
    pub field: Field,
    pub xx: Field,
    pub yy: Field,
    pub levels: Vec<NumericData>,
    pub colormap: ColorMap,
}

impl ContourLayer {
    /// Checks that the coordinate grids match the field before anything is drawn.
    pub fn new(field: Field, xx: Field, yy: Field, levels: ContourLevels, colormap: ColorMap) -> Result<Self> {
        if xx.dim() != field.dim() || yy.dim() != field.dim() {
            return Err(FieldError::ShapeMismatch { field: field.dim(), x_grid: xx.dim(), y_grid: yy.dim() });
        }
        let (n_rows, n_cols) = field.dim();
        if n_rows < 2 || n_cols < 2 {
            return Err(FieldError::TooSmall { rows: n_rows, cols: n_cols });
        }
        let (lo, hi) = finite_range(&field).ok_or(FieldError::NoFiniteValues)?;
        let levels = levels.compute(lo, hi);
        debug!(n_levels = levels.len(), first = levels[0], last = levels[levels.len() - 1], "contour levels");
        Ok(ContourLayer { field, xx, yy, levels, colormap })
    }

    pub fn n_bands(&self) -> usize {
        self.levels.len() - 1
    }

    /// Band index and polygon for every piece of every band.
    pub fn band_polygons(&self) -> Vec<(usize, Vec<Point>)> {
        let (n_rows, n_cols) = self.field.dim();
        (0..n_rows - 1).into_par_iter()
            .flat_map_iter(|i| {
                let mut pieces = Vec::new();
                for j in 0..n_cols - 1 {
                    let corners = [(i, j), (i, j + 1), (i + 1, j + 1), (i + 1, j)]
                        .map(|(r, c)| ((self.xx[[r, c]], self.yy[[r, c]]), self.field[[r, c]]));
                    if corners.iter().any(|(_, value)| !value.is_finite()) {
                        continue;
                    }
                    for triangle in [[corners[0], corners[1], corners[2]], [corners[0], corners[2], corners[3]]] {
                        self.split_triangle(&triangle, &mut pieces);
                    }
                }
                pieces
            })
            .collect()
    }

    fn split_triangle(&self, triangle: &[Vertex; 3], pieces: &mut Vec<(usize, Vec<Point>)>) {
        let lo = triangle.iter().map(|v| v.1).fold(NumericData::INFINITY, NumericData::min);
        let hi = triangle.iter().map(|v| v.1).fold(NumericData::NEG_INFINITY, NumericData::max);
        // a sloped triangle starts in the band whose lower level is at or below its
        // minimum; a flat triangle sitting exactly on a level belongs to the band below it
        let start = if lo < hi {
            self.levels.partition_point(|&level| level <= lo)
        } else {
            self.levels.partition_point(|&level| level < lo)
        }
        .saturating_sub(1);

        for band in start..self.n_bands() {
            let (lower, upper) = (self.levels[band], self.levels[band + 1]);
            if lower > hi || (band > start && lower >= hi) {
                break;
            }
            if upper < lo {
                continue;
            }
            let above = clip(triangle, lower, true);
            if above.len() < 3 {
                continue;
            }
            let inside = clip(&above, upper, false);
            if inside.len() < 3 {
                continue;
            }
            pieces.push((band, inside.into_iter().map(|v| v.0).collect()));
        }
    }

    fn band_color_position(&self, band: usize) -> NumericData {
        let first = self.levels[0];
        let last = self.levels[self.levels.len() - 1];
        let mid = 0.5 * (self.levels[band] + self.levels[band + 1]);
        (mid - first) / (last - first)
    }
}

/// Sutherland-Hodgman clip of a polygon against `value >= level` (or `<=`).
fn clip(polygon: &[Vertex], level: NumericData, keep_above: bool) -> Vec<Vertex> {
    let inside = |v: &Vertex| if keep_above { v.1 >= level } else { v.1 <= level };
    let mut out = Vec::with_capacity(polygon.len() + 2);
    for (k, current) in polygon.iter().enumerate() {
        let next = &polygon[(k + 1) % polygon.len()];
        let (current_in, next_in) = (inside(current), inside(next));
        if current_in {
            out.push(*current);
        }
        if current_in != next_in {
            let t = (level - current.1) / (next.1 - current.1);
            let point = (
                current.0 .0 + t * (next.0 .0 - current.0 .0),
                current.0 .1 + t * (next.0 .1 - current.0 .1),
            );
            out.push((point, level));
        }
    }
    out
}

impl LayerTrait for ContourLayer {
    fn extent(&self) -> Extent {
        let (x_min, x_max) = finite_range(&self.xx).unwrap_or((0.0, 1.0));
        let (y_min, y_max) = finite_range(&self.yy).unwrap_or((0.0, 1.0));
        Extent { x_min, x_max, y_min, y_max }
    }

    fn color_scale(&self) -> ColorScale {
        ColorScale {
            vmin: self.levels[0],
            vmax: self.levels[self.levels.len() - 1],
            levels: Some(self.levels.clone()),
            colormap: self.colormap,
        }
    }

    fn patches(&self) -> Vec<Patch> {
        let sampler = self.colormap.sampler();
        let colors: Vec<_> = (0..self.n_bands()).map(|band| sampler.at(self.band_color_position(band))).collect();
        self.band_polygons().into_iter()
            .map(|(band, points)| Patch { points, color: colors[band] })
            .collect()
    }

    fn y_flipped(&self) -> bool {
        false
    }
}
