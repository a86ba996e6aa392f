use std::{error::Error, path::PathBuf};

use plotters::{coord::Shift, prelude::*};

use super::{
    figure::{Annotation, ColorScale, Figure, LayerTrait},
    plot_config::{OutputFormat, PlotConfig},
};

const MARGIN: u32 = 10;
const X_LABEL_AREA: u32 = 45;
const Y_LABEL_AREA: u32 = 60;
const MIN_BAR_LABEL_AREA: u32 = 45;
const CONTINUOUS_STRIPS: usize = 256;

/// Writes `figure` to `<output_dir>/<name>.<ext>` and returns the path.
pub fn save_figure(figure: &Figure, name: &str, config: &PlotConfig) -> Result<PathBuf, Box<dyn Error>> {
    std::fs::create_dir_all(&config.output_dir)?;
    let path = config.figure_path(name);
    let size = (config.width, config.height);
    match config.format {
        OutputFormat::Png => {
            let root = BitMapBackend::new(&path, size).into_drawing_area();
            render_figure(figure, &root, config)?;
            root.present()?;
        }
        OutputFormat::Svg => {
            let root = SVGBackend::new(&path, size).into_drawing_area();
            render_figure(figure, &root, config)?;
            root.present()?;
        }
    }
    Ok(path)
}

pub fn render_figure<DB: DrawingBackend>(figure: &Figure, root: &DrawingArea<DB, Shift>, config: &PlotConfig) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;
    let Some(colorbar) = figure.colorbar else {
        return draw_plot(figure, root, config);
    };

    let (width, _) = root.dim_in_pixel();
    let side_px = (width as f64 * (colorbar.pad + colorbar.fraction)).round() as u32;
    let pad_px = ((width as f64 * colorbar.pad).round() as u32).max(MIN_BAR_LABEL_AREA);
    let (plot_area, bar_area) = root.split_horizontally(width.saturating_sub(side_px));

    draw_plot(figure, &plot_area, config)?;
    let top = if figure.title.is_some() { config.caption_size + 2 * MARGIN } else { MARGIN };
    draw_colorbar(&figure.layer.color_scale(), &bar_area, pad_px, top, config)
}

fn draw_plot<DB: DrawingBackend>(figure: &Figure, area: &DrawingArea<DB, Shift>, config: &PlotConfig) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let extent = figure.extent();
    let font = config.font_family.as_str();
    let flipped_row = |y: &f64| format!("{:.0}", extent.y_max + extent.y_min - y);

    let mut builder = ChartBuilder::on(area);
    builder.margin(MARGIN).x_label_area_size(X_LABEL_AREA).y_label_area_size(Y_LABEL_AREA);
    if let Some(title) = &figure.title {
        builder.caption(title, (font, config.caption_size));
    }
    let mut chart = builder.build_cartesian_2d(extent.x_min..extent.x_max, extent.y_min..extent.y_max)?;

    {
        let mut mesh = chart.configure_mesh();
        mesh.disable_mesh()
            .label_style((font, config.label_size))
            .axis_desc_style((font, config.label_size));
        if let Some(x_label) = &figure.x_label {
            mesh.x_desc(x_label.as_str());
        }
        if let Some(y_label) = &figure.y_label {
            mesh.y_desc(y_label.as_str());
        }
        if figure.layer.y_flipped() {
            mesh.y_label_formatter(&flipped_row);
        }
        mesh.draw()?;
    }

    chart.draw_series(
        figure.layer.patches().into_iter()
            .map(|patch| Polygon::new(patch.points, patch.color.filled())),
    )?;

    for annotation in &figure.annotations {
        match annotation {
            Annotation::Circle { color, filled: true, .. } => {
                chart.draw_series(std::iter::once(Polygon::new(annotation.outline(), color.filled())))?;
            }
            Annotation::Circle { color, filled: false, .. } => {
                chart.draw_series(std::iter::once(PathElement::new(annotation.outline(), color.stroke_width(2))))?;
            }
        }
    }
    Ok(())
}

fn draw_colorbar<DB: DrawingBackend>(scale: &ColorScale, area: &DrawingArea<DB, Shift>, label_px: u32, top: u32, config: &PlotConfig) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let mut chart = ChartBuilder::on(area)
        .margin_top(top)
        .margin_bottom(MARGIN + X_LABEL_AREA)
        .margin_right(MARGIN)
        .y_label_area_size(label_px)
        .build_cartesian_2d(0.0..1.0, scale.vmin..scale.vmax)?;

    chart.configure_mesh()
        .disable_mesh()
        .y_labels(10)
        .label_style((config.font_family.as_str(), config.label_size))
        .draw()?;

    let sampler = scale.colormap.sampler();
    let strip = |lo: f64, hi: f64| {
        let color = sampler.map(0.5 * (lo + hi), scale.vmin, scale.vmax);
        Rectangle::new([(0.0, lo), (1.0, hi)], color.filled())
    };
    match &scale.levels {
        Some(levels) => {
            chart.draw_series(levels.windows(2).map(|pair| strip(pair[0], pair[1])))?;
        }
        None => {
            let step = (scale.vmax - scale.vmin) / CONTINUOUS_STRIPS as f64;
            chart.draw_series((0..CONTINUOUS_STRIPS).map(|k| {
                let lo = scale.vmin + k as f64 * step;
                strip(lo, lo + step)
            }))?;
        }
    }
    chart.draw_series(std::iter::once(Rectangle::new([(0.0, scale.vmin), (1.0, scale.vmax)], BLACK.stroke_width(1))))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submodules::{colormaps::ColorMap, image::{ImageLayer, Origin}};
    use ndarray::array;

    fn image_figure() -> Figure {
        let layer = ImageLayer::new(array![[0.0, 1.0, 2.0], [3.0, 4.0, 5.0]], ColorMap::default(), Origin::Upper).unwrap();
        Figure::new(layer.into())
    }

    #[test]
    fn figure_without_colorbar_renders_to_svg() {
        let dir = tempfile::tempdir().unwrap();
        let config = PlotConfig::default().output_dir(dir.path().join("nested")).format(OutputFormat::Svg);
        let path = save_figure(&image_figure(), "plain", &config).unwrap();
        assert_eq!(path, dir.path().join("nested").join("plain.svg"));
        assert!(path.is_file());
    }

    #[test]
    fn continuous_colorbar_is_drawn_beside_the_plot() {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (600, 400)).into_drawing_area();
            let config = PlotConfig::default();
            let figure = image_figure().with_title("field").with_colorbar(config.colorbar());
            render_figure(&figure, &root, &config).unwrap();
            root.present().unwrap();
        }
        assert_eq!(svg.matches("<polygon").count(), 6);
        // background, the continuous bar strips and the bar outline
        assert!(svg.matches("<rect").count() >= CONTINUOUS_STRIPS + 2);
    }
}
