use std::{error::Error, path::Path};

use crate::submodules::{
    colormaps::ColorMap,
    errors::Result,
    field_io::load_field,
    figure::Figure,
    visualizer::{Dismissal, FieldVisualizer},
};

pub const POTENTIAL_FILE: &str = "output.csv";

/// Relaxed potential as a plain raster, row 0 at the bottom.
pub fn build_figure(base_dir: &Path, visualizer: &FieldVisualizer) -> Result<Figure> {
    let phi = load_field(base_dir.join(POTENTIAL_FILE))?;
    visualizer.image(phi, ColorMap::default())
}

pub fn run(base_dir: &Path, visualizer: &FieldVisualizer) -> std::result::Result<(), Box<dyn Error>> {
    let figure = build_figure(base_dir, visualizer)?;
    visualizer.show(figure, "output", Dismissal::OnClose)?;
    Ok(())
}
