use std::{error::Error, io::{self, BufRead}, path::Path};

use crate::submodules::{
    colormaps::{ColorMap, Palette},
    errors::Result,
    field_io::load_field,
    figure::{Annotation, Figure},
    levels::ContourLevels,
    visualizer::{Dismissal, FieldVisualizer},
};

pub const POTENTIAL_FILE: &str = "phi_oacc.csv";
pub const X_GRID_FILE: &str = "xx.csv";
pub const Y_GRID_FILE: &str = "yy.csv";
pub const ITERATION_FILE: &str = "a_oacc.csv";
pub const N_LEVELS: usize = 40;
pub const COLORBAR_PAD: f64 = 0.1;

pub fn build_contour_figure(base_dir: &Path, visualizer: &FieldVisualizer) -> Result<Figure> {
    let phi = load_field(base_dir.join(POTENTIAL_FILE))?;
    let xx = load_field(base_dir.join(X_GRID_FILE))?;
    let yy = load_field(base_dir.join(Y_GRID_FILE))?;

    let figure = visualizer
        .contour(phi, xx, yy, ContourLevels::Linear(N_LEVELS), ColorMap::new(Palette::RdBu))?
        .with_title("Potential (OpenACC), Jackson 2.13")
        .with_labels("x", "y")
        .with_annotation(Annotation::unit_circle())
        .with_colorbar(visualizer.config.colorbar_with_pad(COLORBAR_PAD));
    Ok(figure)
}

pub fn build_iteration_figure(base_dir: &Path, visualizer: &FieldVisualizer) -> Result<Figure> {
    let a = load_field(base_dir.join(ITERATION_FILE))?;
    let figure = visualizer
        .image(a, ColorMap::new(Palette::RdBu).reversed())?
        .with_title("Jacobi iteration array (OpenACC)")
        .with_labels("column", "row");
    Ok(figure)
}

pub fn run(base_dir: &Path, visualizer: &FieldVisualizer) -> std::result::Result<(), Box<dyn Error>> {
    let stdin = io::stdin();
    run_with(base_dir, visualizer, &mut stdin.lock())
}

/// Contour plot first; the second field is only read once that figure is released.
pub fn run_with<R: BufRead>(base_dir: &Path, visualizer: &FieldVisualizer, input: &mut R) -> std::result::Result<(), Box<dyn Error>> {
    let contour = build_contour_figure(base_dir, visualizer)?;
    visualizer.show_with(contour, "phi_oacc", Dismissal::AwaitInput, input)?;

    let iteration = build_iteration_figure(base_dir, visualizer)?;
    visualizer.show_with(iteration, "a_oacc", Dismissal::OnClose, input)?;
    Ok(())
}
