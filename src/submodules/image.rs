use ndarray::{s, ArrayView2};
use serde::{Deserialize, Serialize};

use super::{
    colormaps::ColorMap,
    errors::{FieldError, Result},
    figure::{ColorScale, Extent, LayerTrait, Patch},
    levels::nonsingular,
    type_lib::{finite_range, Field, NumericData},
};

/// Where array row 0 ends up on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Origin {
    /// Row 0 at the bottom, the natural orientation for a y axis.
    #[default]
    Lower,
    /// Row 0 at the top, the usual raster convention.
    Upper,
}

/// A field drawn cell by cell in index space.
#[derive(Debug, Clone)]
pub struct ImageLayer {
    pub field: Field,
    pub colormap: ColorMap,
    pub origin: Origin,
    vmin: NumericData,
    vmax: NumericData,
}

impl ImageLayer {
    pub fn new(field: Field, colormap: ColorMap, origin: Origin) -> Result<Self> {
        let (lo, hi) = finite_range(&field).ok_or(FieldError::NoFiniteValues)?;
        let (vmin, vmax) = nonsingular(lo, hi);
        Ok(ImageLayer { field, colormap, origin, vmin, vmax })
    }

    /// The field in top-to-bottom screen order.
    pub fn screen_rows(&self) -> ArrayView2<'_, NumericData> {
        match self.origin {
            Origin::Lower => self.field.slice(s![..;-1, ..]),
            Origin::Upper => self.field.view(),
        }
    }
}

impl LayerTrait for ImageLayer {
    fn extent(&self) -> Extent {
        let (n_rows, n_cols) = self.field.dim();
        Extent { x_min: 0.0, x_max: n_cols as NumericData, y_min: 0.0, y_max: n_rows as NumericData }
    }

    fn color_scale(&self) -> ColorScale {
        ColorScale { vmin: self.vmin, vmax: self.vmax, levels: None, colormap: self.colormap }
    }

    fn patches(&self) -> Vec<Patch> {
        let sampler = self.colormap.sampler();
        let screen = self.screen_rows();
        let n_rows = screen.nrows();
        screen.indexed_iter()
            .filter(|(_, value)| value.is_finite())
            .map(|((row, col), &value)| {
                let x = col as NumericData;
                let y = (n_rows - 1 - row) as NumericData;
                Patch {
                    points: vec![(x, y), (x + 1.0, y), (x + 1.0, y + 1.0), (x, y + 1.0)],
                    color: sampler.map(value, self.vmin, self.vmax),
                }
            })
            .collect()
    }

    fn y_flipped(&self) -> bool {
        self.origin == Origin::Upper
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn increasing_rows() -> Field {
        array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]
    }

    #[test]
    fn lower_origin_puts_row_zero_at_the_bottom() {
        let layer = ImageLayer::new(increasing_rows(), ColorMap::default(), Origin::Lower).unwrap();
        let screen = layer.screen_rows();
        assert_eq!(screen.row(screen.nrows() - 1).to_vec(), vec![1.0, 2.0, 3.0]);
        assert_eq!(screen.row(0).to_vec(), vec![7.0, 8.0, 9.0]);
    }

    #[test]
    fn lower_origin_patches_sit_at_their_row_index() {
        let layer = ImageLayer::new(increasing_rows(), ColorMap::default(), Origin::Lower).unwrap();
        let sampler = ColorMap::default().sampler();
        let bottom_left = layer.patches().into_iter()
            .find(|patch| patch.points[0] == (0.0, 0.0))
            .unwrap();
        assert_eq!(bottom_left.color, sampler.at(0.0));
    }

    #[test]
    fn upper_origin_keeps_raster_order() {
        let layer = ImageLayer::new(increasing_rows(), ColorMap::default(), Origin::Upper).unwrap();
        assert_eq!(layer.screen_rows().row(0).to_vec(), vec![1.0, 2.0, 3.0]);
        assert!(layer.y_flipped());
    }

    #[test]
    fn colour_scale_spans_field_range() {
        let layer = ImageLayer::new(increasing_rows(), ColorMap::default(), Origin::Lower).unwrap();
        let scale = layer.color_scale();
        assert_eq!((scale.vmin, scale.vmax), (1.0, 9.0));
        assert!(scale.levels.is_none());
    }

    #[test]
    fn nan_cells_are_left_blank() {
        let layer = ImageLayer::new(array![[f64::NAN, 1.0], [2.0, 3.0]], ColorMap::default(), Origin::Lower).unwrap();
        assert_eq!(layer.patches().len(), 3);
    }

    #[test]
    fn infinite_cells_are_left_blank() {
        let field = array![[f64::INFINITY, 1.0], [2.0, f64::NEG_INFINITY]];
        let layer = ImageLayer::new(field, ColorMap::default(), Origin::Lower).unwrap();
        assert_eq!(layer.patches().len(), 2);
        assert_eq!((layer.color_scale().vmin, layer.color_scale().vmax), (1.0, 2.0));
    }

    #[test]
    fn all_nan_field_is_rejected() {
        let err = ImageLayer::new(array![[f64::NAN]], ColorMap::default(), Origin::Lower).unwrap_err();
        assert!(matches!(err, FieldError::NoFiniteValues));
    }
}
