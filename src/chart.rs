//! Render the visible fuel types of a window as a line chart (**SVG** or **PNG**).
//!
//! - One line per visible fuel type, registry colors and legend order
//! - Gaps where a fuel type was not reported (each run of values is its own line)
//! - Dates on the x axis, prices with three decimals on the y axis

use crate::align::AlignedSeries;
use crate::view::{ChartSeries, visible_chart_series};
use crate::visibility::VisibilityState;
use anyhow::{Context, Result, anyhow, bail};
use chrono::Duration;
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::LineSeries;
use plotters::style::FontFamily;
use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Fonts tried when no font is configured. All of them carry Greek glyphs.
const SYSTEM_FONTS: [&str; 6] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

#[derive(Debug, Clone)]
pub struct ChartOptions {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub font_path: Option<PathBuf>,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 600,
            title: "Τιμές καυσίμων".to_string(),
            font_path: None,
        }
    }
}

/// The configured font if it exists, otherwise the first system font found.
pub fn find_font(configured: Option<&Path>) -> Option<PathBuf> {
    if let Some(p) = configured {
        return p.exists().then(|| p.to_path_buf());
    }
    SYSTEM_FONTS
        .iter()
        .map(PathBuf::from)
        .find(|p| p.exists())
}

static FONT: OnceLock<PathBuf> = OnceLock::new();

/// Register a "sans-serif" font for the `ab_glyph` text path, which does not
/// discover OS fonts by itself. Only the first successful call registers.
fn ensure_font_registered(configured: Option<&Path>) -> Result<()> {
    if FONT.get().is_some() {
        return Ok(());
    }
    let path = find_font(configured).ok_or_else(|| {
        anyhow!("no TrueType font found; set chart.font_path (e.g. to DejaVuSans.ttf)")
    })?;
    let bytes = std::fs::read(&path).with_context(|| format!("read font {}", path.display()))?;
    // plotters keeps a 'static reference for the lifetime of the process
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    plotters::style::register_font("sans-serif", plotters::style::FontStyle::Normal, bytes)
        .map_err(|_| anyhow!("invalid font {}", path.display()))?;
    log::debug!("registered chart font {}", path.display());
    let _ = FONT.set(path);
    Ok(())
}

/// Split a column into runs of consecutive present values as `(x, price)` points.
pub fn present_runs(xs: &[f64], values: &[Option<f64>]) -> Vec<Vec<(f64, f64)>> {
    let mut runs = Vec::new();
    let mut current: Vec<(f64, f64)> = Vec::new();
    for (x, v) in xs.iter().zip(values) {
        match v {
            Some(y) => current.push((*x, *y)),
            None if !current.is_empty() => runs.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

/// Render the visible series of `series` to `out_path`. The backend is chosen by
/// extension: `.svg` gives SVG, anything else a bitmap.
pub fn render_chart<P: AsRef<Path>>(
    series: &AlignedSeries,
    visibility: &VisibilityState,
    out_path: P,
    options: &ChartOptions,
) -> Result<()> {
    if series.is_empty() {
        bail!("no data to plot");
    }
    let lines = visible_chart_series(series, visibility);
    if lines.is_empty() {
        bail!("no visible fuel type to plot");
    }
    ensure_font_registered(options.font_path.as_deref())?;

    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();
    let size = (options.width, options.height);
    if out_path.extension().and_then(|s| s.to_str()) == Some("svg") {
        let root = SVGBackend::new(path_string.as_str(), size).into_drawing_area();
        draw_chart(root, series, &lines, &options.title)?;
    } else {
        let root = BitMapBackend::new(path_string.as_str(), size).into_drawing_area();
        draw_chart(root, series, &lines, &options.title)?;
    }
    log::info!("wrote chart with {} series to {}", lines.len(), out_path.display());
    Ok(())
}

fn draw_chart<DB>(
    root: DrawingArea<DB, Shift>,
    series: &AlignedSeries,
    lines: &[ChartSeries],
    title: &str,
) -> Result<()>
where
    DB: DrawingBackend,
{
    let first = *series
        .dates()
        .first()
        .ok_or_else(|| anyhow!("no dates to plot"))?;
    let xs: Vec<f64> = series
        .dates()
        .iter()
        .map(|d| (*d - first).num_days() as f64)
        .collect();
    let x_max = xs.last().copied().unwrap_or(0.0).max(1.0);

    let values: Vec<f64> = lines
        .iter()
        .flat_map(|l| l.values.iter().flatten().copied())
        .collect();
    if values.is_empty() {
        bail!("no prices to plot");
    }
    let (mut min_val, mut max_val) = (
        values.iter().cloned().fold(f64::INFINITY, f64::min),
        values.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
    );
    if (max_val - min_val).abs() < 1e-9 {
        min_val -= 0.05;
        max_val += 0.05;
    } else {
        let pad = (max_val - min_val) * 0.05;
        min_val -= pad;
        max_val += pad;
    }

    let x_label_fmt = |x: &f64| {
        (first + Duration::days(x.round() as i64))
            .format("%d/%m/%Y")
            .to_string()
    };
    let y_label_fmt = |v: &f64| format!("{v:.3}");

    root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;
    let mut chart = ChartBuilder::on(&root)
        .margin(16)
        .caption(title, (FontFamily::SansSerif, 24))
        .set_label_area_size(LabelAreaPosition::Left, 64)
        .set_label_area_size(LabelAreaPosition::Bottom, 48)
        .build_cartesian_2d(0.0..x_max, min_val..max_val)
        .map_err(|e| anyhow!("{:?}", e))?;

    chart
        .configure_mesh()
        .x_desc("Ημερομηνία")
        .y_desc("€ / λίτρο")
        .x_labels(xs.len().clamp(2, 8))
        .y_labels(10)
        .x_label_formatter(&x_label_fmt)
        .y_label_formatter(&y_label_fmt)
        .label_style((FontFamily::SansSerif, 12))
        .axis_desc_style((FontFamily::SansSerif, 16))
        .draw()
        .map_err(|e| anyhow!("{:?}", e))?;

    for line in lines {
        let (r, g, b) = line.fuel_type.rgb();
        let color = RGBColor(r, g, b);
        let style = ShapeStyle {
            color: color.to_rgba(),
            filled: false,
            stroke_width: 2,
        };
        let mut labeled = false;
        for run in present_runs(&xs, &line.values) {
            // a lone value has no neighbour to connect to, mark it instead
            let drawn = if run.len() == 1 {
                chart.draw_series(
                    run.iter()
                        .map(|(x, y)| Circle::new((*x, *y), 3, color.filled())),
                )
            } else {
                chart.draw_series(LineSeries::new(run, style))
            };
            let elem = drawn.map_err(|e| anyhow!("{:?}", e))?;
            if !labeled {
                elem.label(line.label).legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                });
                labeled = true;
            }
        }
    }

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.85))
        .label_font((FontFamily::SansSerif, 14))
        .draw()
        .map_err(|e| anyhow!("{:?}", e))?;

    root.present().map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}
