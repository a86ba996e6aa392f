use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::{figure::Colorbar, type_lib::NumericData};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Png,
    Svg,
}

impl OutputFormat {
    pub fn extension(&self) -> &str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
        }
    }
}

/// Rendering settings shared by every figure of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotConfig {
    pub width: u32,
    pub height: u32,
    pub output_dir: PathBuf,
    pub format: OutputFormat,
    pub font_family: String,
    pub caption_size: u32,
    pub label_size: u32,
    pub colorbar_fraction: NumericData,
    pub colorbar_pad: NumericData,
}

impl Default for PlotConfig {
    fn default() -> Self {
        PlotConfig {
            width: 900,
            height: 700,
            output_dir: PathBuf::from("plots"),
            format: OutputFormat::Png,
            font_family: "sans-serif".to_string(),
            caption_size: 26,
            label_size: 16,
            colorbar_fraction: 0.08,
            colorbar_pad: 0.05,
        }
    }
}

impl PlotConfig {
    pub fn output_dir<P: Into<PathBuf>>(mut self, output_dir: P) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn colorbar(&self) -> Colorbar {
        Colorbar { pad: self.colorbar_pad, fraction: self.colorbar_fraction }
    }

    pub fn colorbar_with_pad(&self, pad: NumericData) -> Colorbar {
        Colorbar { pad, ..self.colorbar() }
    }

    pub fn figure_path(&self, name: &str) -> PathBuf {
        self.output_dir.join(format!("{}.{}", name, self.format.extension()))
    }
}
