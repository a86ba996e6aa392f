use colorgrad::Gradient;
use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};

use super::type_lib::NumericData;

/// Sequential and diverging maps the plots draw with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Palette {
    Viridis,
    RdBu,
}

impl Palette {
    fn gradient(&self) -> Box<dyn Gradient> {
        match self {
            Palette::Viridis => Box::new(colorgrad::preset::viridis()),
            Palette::RdBu => Box::new(colorgrad::preset::rd_bu()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorMap {
    pub palette: Palette,
    pub reversed: bool,
}

impl Default for ColorMap {
    fn default() -> Self {
        ColorMap::new(Palette::Viridis)
    }
}

impl ColorMap {
    pub fn new(palette: Palette) -> Self {
        ColorMap { palette, reversed: false }
    }

    pub fn reversed(self) -> Self {
        ColorMap { reversed: !self.reversed, ..self }
    }

    /// Builds the underlying gradient once so many values can be mapped cheaply.
    pub fn sampler(&self) -> ColorSampler {
        ColorSampler { gradient: self.palette.gradient(), reversed: self.reversed }
    }
}

pub struct ColorSampler {
    gradient: Box<dyn Gradient>,
    reversed: bool,
}

impl ColorSampler {
    /// Colour at normalized position `t`, clamped to [0, 1].
    pub fn at(&self, t: NumericData) -> RGBColor {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let t = if self.reversed { 1.0 - t } else { t };
        let rgba = self.gradient.at(t as f32).to_rgba8();
        RGBColor(rgba[0], rgba[1], rgba[2])
    }

    /// Colour of `value` on a linear scale from `vmin` to `vmax`.
    pub fn map(&self, value: NumericData, vmin: NumericData, vmax: NumericData) -> RGBColor {
        let t = if vmax > vmin { (value - vmin) / (vmax - vmin) } else { 0.5 };
        self.at(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reversal_swaps_endpoints() {
        let forward = ColorMap::new(Palette::RdBu).sampler();
        let backward = ColorMap::new(Palette::RdBu).reversed().sampler();
        assert_eq!(forward.at(0.0), backward.at(1.0));
        assert_eq!(forward.at(1.0), backward.at(0.0));
    }

    #[test]
    fn rd_bu_runs_from_red_to_blue() {
        let sampler = ColorMap::new(Palette::RdBu).sampler();
        let low = sampler.at(0.0);
        let high = sampler.at(1.0);
        assert!(low.0 > low.2);
        assert!(high.2 > high.0);
    }

    #[test]
    fn out_of_range_values_clamp() {
        let sampler = ColorMap::default().sampler();
        assert_eq!(sampler.map(-5.0, 0.0, 1.0), sampler.at(0.0));
        assert_eq!(sampler.map(7.0, 0.0, 1.0), sampler.at(1.0));
    }

    #[test]
    fn double_reversal_restores_the_map() {
        let map = ColorMap::new(Palette::RdBu);
        assert!(map.reversed().reversed);
        assert_eq!(map.reversed().reversed(), map);
    }
}
