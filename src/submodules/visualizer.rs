use std::{error::Error, io::{self, BufRead, Write}, path::PathBuf};

use tracing::{debug, info};

use super::{
    colormaps::ColorMap,
    contour::ContourLayer,
    errors::Result,
    figure::Figure,
    image::{ImageLayer, Origin},
    levels::ContourLevels,
    plot_config::PlotConfig,
    render::save_figure,
    type_lib::Field,
};

/// What has to happen before a shown figure is released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dismissal {
    /// Block until a line is read from the input.
    AwaitInput,
    /// Release as soon as the figure has been written.
    OnClose,
}

pub struct FieldVisualizer {
    pub config: PlotConfig,
}

impl FieldVisualizer {
    pub fn new(config: PlotConfig) -> Self {
        FieldVisualizer { config }
    }

    /// Raster of `field` in index space, row 0 at the bottom, with a colorbar.
    pub fn image(&self, field: Field, colormap: ColorMap) -> Result<Figure> {
        let layer = ImageLayer::new(field, colormap, Origin::Lower)?;
        Ok(Figure::new(layer.into()).with_colorbar(self.config.colorbar()))
    }

    /// Filled contours of `field` over the `xx`/`yy` coordinate grids, with a colorbar.
    pub fn contour(&self, field: Field, xx: Field, yy: Field, levels: ContourLevels, colormap: ColorMap) -> Result<Figure> {
        let layer = ContourLayer::new(field, xx, yy, levels, colormap)?;
        Ok(Figure::new(layer.into()).with_colorbar(self.config.colorbar()))
    }

    /// Renders the figure, blocks on stdin as asked, then releases it.
    pub fn show(&self, figure: Figure, name: &str, dismissal: Dismissal) -> std::result::Result<PathBuf, Box<dyn Error>> {
        let stdin = io::stdin();
        self.show_with(figure, name, dismissal, &mut stdin.lock())
    }

    pub fn show_with<R: BufRead>(&self, figure: Figure, name: &str, dismissal: Dismissal, input: &mut R) -> std::result::Result<PathBuf, Box<dyn Error>> {
        let config_json = serde_json::to_string(&self.config)?;
        debug!(config = %config_json, "rendering {name}");
        let path = save_figure(&figure, name, &self.config)?;
        info!("figure written to {}", path.display());
        await_dismissal(dismissal, input)?;
        drop(figure);
        Ok(path)
    }
}

/// Reads exactly one line for `AwaitInput`; end of input also counts as dismissal.
pub fn await_dismissal<R: BufRead>(dismissal: Dismissal, input: &mut R) -> io::Result<()> {
    if dismissal == Dismissal::AwaitInput {
        print!("Press Enter to close the figure...");
        io::stdout().flush()?;
        let mut line = String::new();
        input.read_line(&mut line)?;
    }
    Ok(())
}
