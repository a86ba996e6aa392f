use std::{path::Path, process};

use relax_plot::{init_logging, scripts::potential_map, submodules::{plot_config::PlotConfig, visualizer::FieldVisualizer}};
use tracing::error;

fn main() {
    init_logging();
    let visualizer = FieldVisualizer::new(PlotConfig::default());
    if let Err(err) = potential_map::run(Path::new("."), &visualizer) {
        error!("{err}");
        process::exit(1);
    }
}
