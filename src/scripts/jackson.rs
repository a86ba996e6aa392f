use std::{error::Error, path::Path};

use crate::submodules::{
    colormaps::ColorMap,
    errors::Result,
    field_io::load_field,
    figure::{Annotation, Figure},
    levels::ContourLevels,
    visualizer::{Dismissal, FieldVisualizer},
};

pub const POTENTIAL_FILE: &str = "phi.csv";
pub const X_GRID_FILE: &str = "xx.csv";
pub const Y_GRID_FILE: &str = "yy.csv";
pub const COLORBAR_PAD: f64 = 0.1;

pub fn build_figure(base_dir: &Path, visualizer: &FieldVisualizer) -> Result<Figure> {
    let phi = load_field(base_dir.join(POTENTIAL_FILE))?;
    let xx = load_field(base_dir.join(X_GRID_FILE))?;
    let yy = load_field(base_dir.join(Y_GRID_FILE))?;

    let figure = visualizer
        .contour(phi, xx, yy, ContourLevels::Auto, ColorMap::default())?
        .with_title("Potential, Jackson 2.13")
        .with_labels("x", "y")
        .with_annotation(Annotation::unit_circle())
        .with_colorbar(visualizer.config.colorbar_with_pad(COLORBAR_PAD));
    Ok(figure)
}

pub fn run(base_dir: &Path, visualizer: &FieldVisualizer) -> std::result::Result<(), Box<dyn Error>> {
    let figure = build_figure(base_dir, visualizer)?;
    visualizer.show(figure, "phi", Dismissal::AwaitInput)?;
    Ok(())
}
