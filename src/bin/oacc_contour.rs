use std::{path::Path, process};

use relax_plot::{init_logging, scripts::oacc, submodules::{plot_config::PlotConfig, visualizer::FieldVisualizer}};
use tracing::error;

fn main() {
    init_logging();
    let visualizer = FieldVisualizer::new(PlotConfig::default());
    if let Err(err) = oacc::run(Path::new("."), &visualizer) {
        error!("{err}");
        process::exit(1);
    }
}
