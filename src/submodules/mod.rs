pub mod colormaps;
pub mod contour;
pub mod errors;
pub mod field_io;
pub mod figure;
pub mod image;
pub mod levels;
pub mod logging;
pub mod plot_config;
pub mod render;
pub mod type_lib;
pub mod visualizer;
