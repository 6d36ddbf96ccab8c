//! Static Chart Renderer
//! Draws the tier breakdown to a PNG with plotters.
//!
//! Layout:
//! 1. Legend strip across the top, one entry per tier
//! 2. Two horizontal stacked bars (Channel, Capacity) with labels on the left
//! 3. White percentage labels centered on each segment

use crate::charts::format::format_data_label;
use crate::charts::layout::{metric_row, stacked_segments};
use crate::charts::TierStyle;
use crate::data::{Metric, Tier, TierBreakdown};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid image size {0}x{1}")]
    InvalidSize(u32, u32),
    #[error("Drawing failed: {0}")]
    Draw(String),
}

fn draw_err<E: std::fmt::Display>(err: E) -> RenderError {
    RenderError::Draw(err.to_string())
}

const FONT: &str = "sans-serif";
const LEGEND_HEIGHT: u32 = 50;
const LEGEND_SWATCH: i32 = 14;
const BAR_GAP_PX: u32 = 18;

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    fn fill_color(style: &TierStyle) -> RGBAColor {
        let (r, g, b) = style.rgb;
        RGBAColor(r, g, b, style.fill_alpha)
    }

    /// Render the chart to a PNG file.
    pub fn render_png(
        breakdown: &TierBreakdown,
        path: &Path,
        width: u32,
        height: u32,
    ) -> Result<(), RenderError> {
        if width == 0 || height <= LEGEND_HEIGHT {
            return Err(RenderError::InvalidSize(width, height));
        }

        let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
        Self::draw(&root, breakdown)?;
        root.present().map_err(draw_err)?;

        info!(path = %path.display(), width, height, "rendered chart");
        Ok(())
    }

    /// Draw legend and bars onto any plotters backend.
    pub fn draw<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        breakdown: &TierBreakdown,
    ) -> Result<(), RenderError> {
        root.fill(&WHITE).map_err(draw_err)?;

        let (legend_area, plot_area) = root.split_vertically(LEGEND_HEIGHT);
        Self::draw_legend(&legend_area)?;
        Self::draw_bars(&plot_area, breakdown)
    }

    fn draw_legend<DB: DrawingBackend>(area: &DrawingArea<DB, Shift>) -> Result<(), RenderError> {
        let (width, _) = area.dim_in_pixel();
        let entry_width = width as i32 / Tier::ALL.len() as i32;
        let y = LEGEND_HEIGHT as i32 / 2;
        let text_style = TextStyle::from((FONT, 14).into_font()).pos(Pos::new(HPos::Left, VPos::Center));

        for tier in Tier::ALL {
            let style = TierStyle::of(tier);
            let x = entry_width * tier.index() as i32 + 20;

            area.draw(&Rectangle::new(
                [(x, y - LEGEND_SWATCH / 2), (x + LEGEND_SWATCH, y + LEGEND_SWATCH / 2)],
                Self::fill_color(style).filled(),
            ))
            .map_err(draw_err)?;
            area.draw(&Text::new(
                style.legend,
                (x + LEGEND_SWATCH + 6, y),
                text_style.clone(),
            ))
            .map_err(draw_err)?;
        }

        Ok(())
    }

    fn draw_bars<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        breakdown: &TierBreakdown,
    ) -> Result<(), RenderError> {
        let rows = Metric::ALL.len();
        let mut chart = ChartBuilder::on(area)
            .margin(20)
            .y_label_area_size(90)
            .build_cartesian_2d(0f64..100f64, (0..rows).into_segmented())
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .disable_mesh()
            .disable_x_axis()
            .y_labels(rows)
            .y_label_style((FONT, 16))
            .y_label_formatter(&|value| match value {
                SegmentValue::CenterOf(row) => Metric::ALL
                    .into_iter()
                    .find(|&metric| metric_row(metric) == *row)
                    .map(|metric| metric.name().to_string())
                    .unwrap_or_default(),
                _ => String::new(),
            })
            .draw()
            .map_err(draw_err)?;

        let segments = stacked_segments(breakdown);

        chart
            .draw_series(segments.iter().map(|segment| {
                let row = metric_row(segment.metric);
                let fill = Self::fill_color(TierStyle::of(segment.tier));
                let mut bar = Rectangle::new(
                    [
                        (segment.start, SegmentValue::Exact(row)),
                        (segment.end(), SegmentValue::Exact(row + 1)),
                    ],
                    fill.filled(),
                );
                bar.set_margin(BAR_GAP_PX, BAR_GAP_PX, 0, 0);
                bar
            }))
            .map_err(draw_err)?;

        let label_style = TextStyle::from((FONT, 15).into_font().style(FontStyle::Bold))
            .color(&WHITE)
            .pos(Pos::new(HPos::Center, VPos::Center));

        chart
            .draw_series(segments.iter().filter(|s| s.value > 0.0).map(|segment| {
                Text::new(
                    format_data_label(segment.value),
                    (
                        segment.center(),
                        SegmentValue::CenterOf(metric_row(segment.metric)),
                    ),
                    label_style.clone(),
                )
            }))
            .map_err(draw_err)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{sample_rows, DataProcessor};
    use tempfile::TempDir;

    #[test]
    fn test_render_png_writes_file() {
        let breakdown = DataProcessor::process(&sample_rows());
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chart.png");

        StaticChartRenderer::render_png(&breakdown, &path, 1200, 400).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(!bytes.is_empty());
        assert_eq!(&bytes[..4], b"\x89PNG");
    }

    #[test]
    fn test_zero_width_is_rejected() {
        let breakdown = DataProcessor::process(&sample_rows());
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chart.png");
        let result = StaticChartRenderer::render_png(&breakdown, &path, 0, 400);

        assert!(matches!(result, Err(RenderError::InvalidSize(0, 400))));
        assert!(!path.exists());
    }

    #[test]
    fn test_height_must_leave_room_for_bars() {
        let breakdown = DataProcessor::process(&sample_rows());
        let dir = TempDir::new().unwrap();
        let result =
            StaticChartRenderer::render_png(&breakdown, &dir.path().join("chart.png"), 800, 40);

        assert!(matches!(result, Err(RenderError::InvalidSize(800, 40))));
    }
}
