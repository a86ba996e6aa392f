use std::f64::consts::TAU;

use enum_dispatch::enum_dispatch;
use plotters::prelude::{RGBColor, BLACK};

use super::{colormaps::ColorMap, contour::ContourLayer, image::ImageLayer, type_lib::{NumericData, Point}};

const CIRCLE_SEGMENTS: usize = 256;

/// A filled polygon in data coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Patch {
    pub points: Vec<Point>,
    pub color: RGBColor,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub x_min: NumericData,
    pub x_max: NumericData,
    pub y_min: NumericData,
    pub y_max: NumericData,
}

/// Value range and colours a colorbar has to show.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    pub vmin: NumericData,
    pub vmax: NumericData,
    /// Band boundaries for contour plots; `None` for a continuous scale.
    pub levels: Option<Vec<NumericData>>,
    pub colormap: ColorMap,
}

#[enum_dispatch]
pub trait LayerTrait {
    fn extent(&self) -> Extent;
    fn color_scale(&self) -> ColorScale;
    fn patches(&self) -> Vec<Patch>;
    /// True when the y axis runs top to bottom in data terms.
    fn y_flipped(&self) -> bool;
}

#[enum_dispatch(LayerTrait)]
#[derive(Debug, Clone)]
pub enum PlotLayer {
    Image(ImageLayer),
    Contour(ContourLayer),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Annotation {
    Circle {
        center: Point,
        radius: NumericData,
        color: RGBColor,
        filled: bool,
    },
}

impl Annotation {
    /// Unfilled black circle of radius 1 at the origin.
    pub fn unit_circle() -> Self {
        Annotation::Circle { center: (0.0, 0.0), radius: 1.0, color: BLACK, filled: false }
    }

    /// Closed outline in data coordinates.
    pub fn outline(&self) -> Vec<Point> {
        match self {
            Annotation::Circle { center, radius, .. } => (0..=CIRCLE_SEGMENTS)
                .map(|i| {
                    let angle = TAU * i as NumericData / CIRCLE_SEGMENTS as NumericData;
                    (center.0 + radius * angle.cos(), center.1 + radius * angle.sin())
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Colorbar {
    /// Gap between the plot and the bar, as a fraction of the figure width.
    pub pad: NumericData,
    /// Width of the bar, as a fraction of the figure width.
    pub fraction: NumericData,
}

pub struct Figure {
    pub title: Option<String>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub layer: PlotLayer,
    pub annotations: Vec<Annotation>,
    pub colorbar: Option<Colorbar>,
}

impl Figure {
    pub fn new(layer: PlotLayer) -> Self {
        Figure { title: None, x_label: None, y_label: None, layer, annotations: Vec::new(), colorbar: None }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn with_labels(mut self, x_label: &str, y_label: &str) -> Self {
        self.x_label = Some(x_label.to_string());
        self.y_label = Some(y_label.to_string());
        self
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn with_colorbar(mut self, colorbar: Colorbar) -> Self {
        self.colorbar = Some(colorbar);
        self
    }

    /// Plot extent grown to include every annotation.
    pub fn extent(&self) -> Extent {
        let mut extent = self.layer.extent();
        for point in self.annotations.iter().flat_map(|annotation| annotation.outline()) {
            extent.x_min = extent.x_min.min(point.0);
            extent.x_max = extent.x_max.max(point.0);
            extent.y_min = extent.y_min.min(point.1);
            extent.y_max = extent.y_max.max(point.1);
        }
        extent
    }
}
