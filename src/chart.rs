use std::error::Error;
use std::path::{Path, PathBuf};
use log::{debug, info};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontDesc, FontFamily, FontStyle, FontTransform, Palette, Palette99, TextStyle};
use crate::error::ChartError;
use crate::frequency::ValueCounts;

/// Cosmetic settings shared by every chart.
#[derive(Debug, Clone)]
pub struct ChartStyle {
    /// Figure size in units; one unit is `pixels_per_unit` pixels.
    pub figure_size: (u32, u32),
    pub pixels_per_unit: u32,
    pub font_size: f64,
    pub title_size: f64,
    pub background: RGBColor,
    pub grid: RGBColor,
    pub margin: i32,
    pub label_area: i32,
    /// Room below the x axis when tick labels are rotated.
    pub rotated_label_area: i32,
    pub bar_margin: u32,
}

impl Default for ChartStyle {
    fn default() -> Self {
        ChartStyle {
            figure_size: (10, 6),
            pixels_per_unit: 100,
            font_size: 10.0,
            title_size: 14.0,
            background: RGBColor(234, 234, 242),
            grid: WHITE,
            margin: 15,
            label_area: 60,
            rotated_label_area: 110,
            bar_margin: 6,
        }
    }
}

impl ChartStyle {
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            self.figure_size.0 * self.pixels_per_unit,
            self.figure_size.1 * self.pixels_per_unit,
        )
    }

    fn title_font(&self) -> FontDesc<'static> {
        FontDesc::new(FontFamily::SansSerif, self.title_size, FontStyle::Bold)
    }

    fn text_font(&self) -> FontDesc<'static> {
        FontDesc::new(FontFamily::SansSerif, self.font_size, FontStyle::Normal)
    }

    /// Category ticks under a vertical bar chart: turned a quarter and anchored
    /// at their end, so each label finishes at its tick.
    fn rotated_tick_style(&self) -> TextStyle<'static> {
        TextStyle::from(self.text_font().transform(FontTransform::Rotate90))
            .pos(Pos::new(HPos::Right, VPos::Center))
    }
}

/// Title and axis descriptions of a chart. Empty strings draw nothing.
#[derive(Debug, Clone, Default)]
pub struct ChartLabels {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
}

impl ChartLabels {
    pub fn new(title: impl Into<String>, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        ChartLabels {
            title: title.into(),
            x_label: x_label.into(),
            y_label: y_label.into(),
        }
    }
}

/// An SVG output target. Each draw call consumes the figure, writes the file
/// and hands the figure back with the number of bars it drew.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Figure {
    path: PathBuf,
    size: (u32, u32),
    bars: usize,
}

impl Figure {
    pub fn new(path: impl Into<PathBuf>, style: &ChartStyle) -> Self {
        Figure {
            path: path.into(),
            size: style.pixel_size(),
            bars: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    pub fn bars(&self) -> usize {
        self.bars
    }
}

/// Draws one vertical bar per entry, left to right in the order of `counts`.
pub fn draw_vertical_bars(
    mut figure: Figure,
    counts: &ValueCounts,
    labels: &ChartLabels,
    style: &ChartStyle,
) -> Result<Figure, ChartError> {
    debug!("Drawing {} vertical bars to {} ({}x{})", counts.len(), figure.path.display(), figure.size.0, figure.size.1);
    plot_vertical(&figure, counts, labels, style).map_err(|e| render_error(&figure, e))?;
    figure.bars = counts.len();
    info!("Chart '{}' written to {}", labels.title, figure.path.display());
    Ok(figure)
}

/// Draws one horizontal bar per entry, bottom to top in the order of `counts`.
///
/// The last entry ends up on top, so pass ascending counts to get the largest
/// bar at the top of the chart.
pub fn draw_horizontal_bars(
    mut figure: Figure,
    counts: &ValueCounts,
    labels: &ChartLabels,
    style: &ChartStyle,
) -> Result<Figure, ChartError> {
    debug!("Drawing {} horizontal bars to {} ({}x{})", counts.len(), figure.path.display(), figure.size.0, figure.size.1);
    plot_horizontal(&figure, counts, labels, style).map_err(|e| render_error(&figure, e))?;
    figure.bars = counts.len();
    info!("Chart '{}' written to {}", labels.title, figure.path.display());
    Ok(figure)
}

fn render_error(figure: &Figure, e: Box<dyn Error>) -> ChartError {
    ChartError::Render {
        path: figure.path.clone(),
        message: e.to_string(),
    }
}

fn plot_vertical(
    figure: &Figure,
    counts: &ValueCounts,
    labels: &ChartLabels,
    style: &ChartStyle,
) -> Result<(), Box<dyn Error>> {
    let names: Vec<&str> = counts.labels().collect();
    // An empty segmented axis has no key points, keep one empty slot instead.
    let slots = names.len().max(1);

    let root = SVGBackend::new(&figure.path, figure.size).into_drawing_area();
    root.fill(&style.background)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&labels.title, style.title_font())
        .margin(style.margin)
        .x_label_area_size(style.rotated_label_area)
        .y_label_area_size(style.label_area)
        .build_cartesian_2d((0..slots).into_segmented(), 0..value_axis_end(counts))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .bold_line_style(style.grid)
        .light_line_style(style.grid.mix(0.4))
        .x_labels(slots)
        .x_label_formatter(&|value: &SegmentValue<usize>| segment_label(&names, value))
        .x_label_style(style.rotated_tick_style())
        .y_label_style(style.text_font())
        .x_desc(labels.x_label.as_str())
        .y_desc(labels.y_label.as_str())
        .axis_desc_style(style.text_font())
        .draw()?;

    chart.draw_series(
        Histogram::vertical(&chart)
            .margin(style.bar_margin)
            .style_func(|value, _| bar_style(value))
            .data(counts.iter().enumerate().map(|(index, (_, count))| (index, count))),
    )?;

    root.present()?;
    Ok(())
}

fn plot_horizontal(
    figure: &Figure,
    counts: &ValueCounts,
    labels: &ChartLabels,
    style: &ChartStyle,
) -> Result<(), Box<dyn Error>> {
    let names: Vec<&str> = counts.labels().collect();
    let slots = names.len().max(1);

    let root = SVGBackend::new(&figure.path, figure.size).into_drawing_area();
    root.fill(&style.background)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&labels.title, style.title_font())
        .margin(style.margin)
        .x_label_area_size(style.label_area)
        .y_label_area_size(style.label_area)
        .build_cartesian_2d(0..value_axis_end(counts), (0..slots).into_segmented())?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .bold_line_style(style.grid)
        .light_line_style(style.grid.mix(0.4))
        .y_labels(slots)
        .y_label_formatter(&|value: &SegmentValue<usize>| segment_label(&names, value))
        .label_style(style.text_font())
        .x_desc(labels.x_label.as_str())
        .y_desc(labels.y_label.as_str())
        .axis_desc_style(style.text_font())
        .draw()?;

    chart.draw_series(
        Histogram::horizontal(&chart)
            .margin(style.bar_margin)
            .style_func(|value, _| bar_style(value))
            .data(counts.iter().enumerate().map(|(index, (_, count))| (index, count))),
    )?;

    root.present()?;
    Ok(())
}

/// Upper bound of the count axis, with some headroom above the tallest bar.
fn value_axis_end(counts: &ValueCounts) -> usize {
    let max = counts.max_count().unwrap_or(0);
    max + max / 10 + 1
}

fn segment_label(names: &[&str], value: &SegmentValue<usize>) -> String {
    match value {
        SegmentValue::CenterOf(index) => names.get(*index).map(|name| name.to_string()).unwrap_or_default(),
        _ => String::new(),
    }
}

fn bar_style(value: &SegmentValue<usize>) -> ShapeStyle {
    let index = match value {
        SegmentValue::Exact(index) | SegmentValue::CenterOf(index) => *index,
        SegmentValue::Last => 0,
    };
    Palette99::pick(index).filled()
}
