//! Drawing chart descriptions to image files with [`plotters`].
//!
//! This is the only part of the crate that touches the rendering layer.
//! Charts are drawn on a white canvas of the configured size and written to
//! `<output_dir>/<file_stem>.<png|svg>`.

use crate::charts::{BoxPlot, Chart, Heatmap, PieChart, TrendLine};
use crate::config::{AnalysisConfig, ChartFormat};
use crate::error::{EdaError, Result};
use plotters::coord::Shift;
use plotters::element::Pie;
use plotters::prelude::*;
use plotters::style::colors::colormaps::{ColorMap, ViridisRGB};
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const FONT: &str = "sans-serif";
const TITLE_SIZE: u32 = 32;
const AXIS_DESC_SIZE: u32 = 22;
const LABEL_SIZE: u32 = 15;

/// Seaborn's "pastel" palette, cycled for pie wedges.
const PASTEL: [RGBColor; 10] = [
    RGBColor(161, 201, 244),
    RGBColor(255, 180, 130),
    RGBColor(141, 229, 161),
    RGBColor(255, 159, 155),
    RGBColor(208, 187, 255),
    RGBColor(222, 187, 155),
    RGBColor(250, 176, 228),
    RGBColor(207, 207, 207),
    RGBColor(255, 254, 163),
    RGBColor(185, 242, 240),
];

const MISSING_CELL: RGBColor = RGBColor(230, 230, 230);

fn render_err<E: std::fmt::Display>(e: E) -> EdaError {
    EdaError::Render(e.to_string())
}

/// Writes charts into an output directory.
#[derive(Debug, Clone)]
pub struct ChartRenderer {
    output_dir: PathBuf,
    format: ChartFormat,
    size: (u32, u32),
}

impl ChartRenderer {
    pub fn new(output_dir: impl Into<PathBuf>, format: ChartFormat, size: (u32, u32)) -> Self {
        Self {
            output_dir: output_dir.into(),
            format,
            size,
        }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(&config.output_dir, config.chart_format, config.chart_size)
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Path a chart with `file_stem` is written to.
    pub fn output_path(&self, file_stem: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", file_stem, self.format.extension()))
    }

    /// Draw `chart` to `<output_dir>/<chart.file_stem()>.<ext>`.
    pub fn render(&self, chart: &Chart) -> Result<PathBuf> {
        self.render_as(chart, chart.file_stem())
    }

    /// Draw `chart` to `<output_dir>/<file_stem>.<ext>`.
    pub fn render_as(&self, chart: &Chart, file_stem: &str) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.output_dir)?;
        let path = self.output_path(file_stem);

        if chart.is_empty() {
            warn!("Chart '{}' has no data; rendering an empty frame", chart.title());
        }

        match self.format {
            ChartFormat::Png => {
                let root = BitMapBackend::new(&path, self.size).into_drawing_area();
                draw_chart(&root, chart)?;
            }
            ChartFormat::Svg => {
                let root = SVGBackend::new(&path, self.size).into_drawing_area();
                draw_chart(&root, chart)?;
            }
        }

        info!("Rendered '{}' to {}", chart.title(), path.display());
        Ok(path)
    }
}

/// Draw any chart onto a drawing area and flush it.
pub fn draw_chart<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, chart: &Chart) -> Result<()> {
    root.fill(&WHITE).map_err(render_err)?;

    match chart {
        Chart::TrendLine(c) => draw_trend_line(root, c)?,
        Chart::Pie(c) => draw_pie(root, c)?,
        Chart::BoxPlot(c) => draw_box_plot(root, c)?,
        Chart::Heatmap(c) => draw_heatmap(root, c)?,
    }

    root.present().map_err(render_err)?;
    Ok(())
}

/// Axis range covering `values` with a little headroom; `(0, 1)` when empty.
fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    let pad = ((max - min) * 0.1).max(1.0);
    (min - pad, max + pad)
}

fn draw_trend_line<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    chart: &TrendLine,
) -> Result<()> {
    let (x_min, x_max) = match (chart.points.first(), chart.points.last()) {
        (Some(first), Some(last)) => (first.0 - 1, last.0 + 1),
        _ => (0, 1),
    };
    let y_max = chart.points.iter().map(|(_, c)| *c).max().unwrap_or(0);
    let y_top = y_max + y_max / 10 + 1;

    let mut ctx = ChartBuilder::on(root)
        .caption(&chart.title, (FONT, TITLE_SIZE).into_font().style(FontStyle::Bold))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .build_cartesian_2d(x_min..x_max, 0usize..y_top)
        .map_err(render_err)?;

    ctx.configure_mesh()
        .x_desc(chart.x_label.as_str())
        .y_desc(chart.y_label.as_str())
        .axis_desc_style((FONT, AXIS_DESC_SIZE))
        .label_style((FONT, LABEL_SIZE))
        .light_line_style(&BLACK.mix(0.05))
        .bold_line_style(&BLACK.mix(0.15))
        .draw()
        .map_err(render_err)?;

    ctx.draw_series(LineSeries::new(chart.points.iter().copied(), &BLUE))
        .map_err(render_err)?;
    ctx.draw_series(
        chart
            .points
            .iter()
            .map(|&point| Circle::new(point, 4, BLUE.filled())),
    )
    .map_err(render_err)?;

    let value_style = (FONT, LABEL_SIZE)
        .into_font()
        .style(FontStyle::Bold)
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Bottom));
    ctx.draw_series(
        chart
            .points
            .iter()
            .map(|&(year, count)| Text::new(count.to_string(), (year, count), value_style.clone())),
    )
    .map_err(render_err)?;

    Ok(())
}

fn draw_pie<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, chart: &PieChart) -> Result<()> {
    let area = root
        .titled(&chart.title, (FONT, TITLE_SIZE).into_font().style(FontStyle::Bold))
        .map_err(render_err)?;
    if chart.slices.is_empty() {
        return Ok(());
    }

    let (width, height) = area.dim_in_pixel();
    let center = ((width / 2) as i32, (height / 2) as i32);
    let radius = f64::from(width.min(height)) * 0.35;

    let sizes: Vec<f64> = chart.slices.iter().map(|s| s.count as f64).collect();
    let colors: Vec<RGBColor> = (0..chart.slices.len())
        .map(|i| PASTEL[i % PASTEL.len()])
        .collect();
    let labels: Vec<String> = chart.slices.iter().map(|s| s.display_label()).collect();

    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.start_angle(chart.start_angle);
    pie.label_style((FONT, AXIS_DESC_SIZE).into_font().style(FontStyle::Bold));
    pie.label_offset(10.0);
    area.draw(&pie).map_err(render_err)?;

    Ok(())
}

fn draw_box_plot<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, chart: &BoxPlot) -> Result<()> {
    let (y_min, y_max) = match &chart.summary {
        Some(s) => padded_range(
            [s.lower_whisker, s.upper_whisker]
                .into_iter()
                .chain(s.outliers.iter().copied()),
        ),
        None => (0.0, 1.0),
    };

    let mut ctx = ChartBuilder::on(root)
        .caption(&chart.title, (FONT, TITLE_SIZE).into_font().style(FontStyle::Bold))
        .margin(20)
        .x_label_area_size(20)
        .y_label_area_size(80)
        .build_cartesian_2d(0.0..1.0, y_min..y_max)
        .map_err(render_err)?;

    ctx.configure_mesh()
        .disable_x_mesh()
        .disable_x_axis()
        .y_desc(chart.y_label.as_str())
        .axis_desc_style((FONT, AXIS_DESC_SIZE))
        .label_style((FONT, LABEL_SIZE))
        .light_line_style(&BLACK.mix(0.05))
        .bold_line_style(&BLACK.mix(0.15))
        .draw()
        .map_err(render_err)?;

    let Some(summary) = &chart.summary else {
        return Ok(());
    };
    debug!(
        "Box plot: median {} IQR {} ({} outliers)",
        summary.median,
        summary.iqr(),
        summary.outliers.len()
    );

    let (left, right, mid) = (0.3, 0.7, 0.5);
    let fill = ViridisRGB.get_color(0.5f32);
    let edge = ShapeStyle::from(&BLACK).stroke_width(2);

    ctx.draw_series([
        Rectangle::new([(left, summary.q1), (right, summary.q3)], fill.filled()),
        Rectangle::new([(left, summary.q1), (right, summary.q3)], edge),
    ])
    .map_err(render_err)?;

    ctx.draw_series([
        PathElement::new(vec![(left, summary.median), (right, summary.median)], edge),
        PathElement::new(vec![(mid, summary.q3), (mid, summary.upper_whisker)], edge),
        PathElement::new(vec![(mid, summary.q1), (mid, summary.lower_whisker)], edge),
        PathElement::new(vec![(0.4, summary.upper_whisker), (0.6, summary.upper_whisker)], edge),
        PathElement::new(vec![(0.4, summary.lower_whisker), (0.6, summary.lower_whisker)], edge),
    ])
    .map_err(render_err)?;

    ctx.draw_series(
        summary
            .outliers
            .iter()
            .map(|&v| Circle::new((mid, v), 4, ShapeStyle::from(&BLACK).stroke_width(1))),
    )
    .map_err(render_err)?;

    Ok(())
}

fn draw_heatmap<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, chart: &Heatmap) -> Result<()> {
    let n = chart.matrix.len();
    if n == 0 {
        root.titled(&chart.title, (FONT, TITLE_SIZE).into_font().style(FontStyle::Bold))
            .map_err(render_err)?;
        return Ok(());
    }

    let size = n as f64;
    let mut ctx = ChartBuilder::on(root)
        .caption(&chart.title, (FONT, TITLE_SIZE).into_font().style(FontStyle::Bold))
        .margin(20)
        .margin_left(180)
        .margin_bottom(60)
        .build_cartesian_2d(0.0..size, 0.0..size)
        .map_err(render_err)?;

    let cell_style = (FONT, AXIS_DESC_SIZE).into_font().style(FontStyle::Bold);
    let centered = Pos::new(HPos::Center, VPos::Center);

    // Row 0 is drawn at the top.
    let mut cells = Vec::with_capacity(n * n);
    let mut annotations = Vec::with_capacity(n * n);
    for (i, row) in chart.matrix.values.iter().enumerate() {
        let y = size - 1.0 - i as f64;
        for (j, &r) in row.iter().enumerate() {
            let x = j as f64;
            let (fill, text_color, text) = if r.is_nan() {
                (MISSING_CELL, BLACK, "nan".to_string())
            } else {
                let t = ((r + 1.0) / 2.0).clamp(0.0, 1.0);
                let text_color = if t < 0.5 { WHITE } else { BLACK };
                (ViridisRGB.get_color(t as f32), text_color, format!("{:.2}", r))
            };
            cells.push(Rectangle::new([(x, y), (x + 1.0, y + 1.0)], fill.filled()));
            cells.push(Rectangle::new(
                [(x, y), (x + 1.0, y + 1.0)],
                ShapeStyle::from(&WHITE).stroke_width(1),
            ));
            annotations.push(Text::new(
                text,
                (x + 0.5, y + 0.5),
                cell_style.color(&text_color).pos(centered),
            ));
        }
    }

    ctx.draw_series(cells).map_err(render_err)?;
    ctx.draw_series(annotations).map_err(render_err)?;

    // Column names along the bottom, row names on the left.
    let name_style = (FONT, LABEL_SIZE + 3).into_font().color(&BLACK);
    for (k, name) in chart.matrix.columns.iter().enumerate() {
        let center = k as f64 + 0.5;
        let (bx, by) = ctx.backend_coord(&(center, 0.0));
        root.draw(&Text::new(
            name.clone(),
            (bx, by + 10),
            name_style.pos(Pos::new(HPos::Center, VPos::Top)),
        ))
        .map_err(render_err)?;

        let (lx, ly) = ctx.backend_coord(&(0.0, size - center));
        root.draw(&Text::new(
            name.clone(),
            (lx - 10, ly),
            name_style.pos(Pos::new(HPos::Right, VPos::Center)),
        ))
        .map_err(render_err)?;
    }

    Ok(())
}
