//! Chart Plotter Module
//! Interactive horizontal stacked bar chart using egui_plot.

use crate::charts::format::{
    format_count, format_data_label, tooltip_lines, NUM_CHANNELS_COLUMN, NUM_UNIQUE_NODES_COLUMN,
};
use crate::charts::layout::{metric_row, stacked_segments};
use crate::charts::TierStyle;
use crate::data::{Metric, Tier, TierBreakdown};
use egui::{Color32, RichText, Stroke};
use egui_plot::{Bar, BarChart, Corner, GridMark, Legend, Plot, PlotPoint, Text};

const BAR_WIDTH: f64 = 0.6;

/// Draws the tier breakdown with egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Translucent fill for a tier's bars.
    pub fn fill_color(style: &TierStyle) -> Color32 {
        let (r, g, b) = style.rgb;
        Color32::from_rgba_unmultiplied(r, g, b, style.fill_alpha_u8())
    }

    pub fn border_color(style: &TierStyle) -> Color32 {
        let (r, g, b) = style.rgb;
        Color32::from_rgb(r, g, b)
    }

    /// Metric shown at a category-axis position, if any.
    fn metric_at(position: f64) -> Option<Metric> {
        Metric::ALL
            .into_iter()
            .find(|&metric| (metric_row(metric) as f64 - position).abs() < 0.5)
    }

    /// One stacked dataset per tier, carrying its own hover text.
    fn tier_chart(tier: Tier, breakdown: &TierBreakdown) -> BarChart {
        let style = TierStyle::of(tier);
        let fill = Self::fill_color(style);

        let bars: Vec<Bar> = stacked_segments(breakdown)
            .into_iter()
            .filter(|segment| segment.tier == tier)
            .map(|segment| {
                Bar::new(metric_row(segment.metric) as f64, segment.value)
                    .base_offset(segment.start)
                    .width(BAR_WIDTH)
                    .name(segment.metric.name())
                    .fill(fill)
                    .stroke(Stroke::NONE)
            })
            .collect();

        let tooltips = Metric::ALL.map(|metric| tooltip_lines(tier, metric, breakdown).join("\n"));

        BarChart::new(bars)
            .name(style.legend)
            .color(fill)
            .horizontal()
            .element_formatter(Box::new(move |bar, _chart| {
                Self::metric_at(bar.argument)
                    .map(|metric| tooltips[metric.index()].clone())
                    .unwrap_or_default()
            }))
    }

    /// Draw the stacked bar chart: category axis on the left, value axis hidden.
    pub fn draw_stacked_chart(ui: &mut egui::Ui, breakdown: &TierBreakdown, height: f32) {
        let charts: Vec<BarChart> = Tier::ALL
            .iter()
            .map(|&tier| Self::tier_chart(tier, breakdown))
            .collect();
        let segments = stacked_segments(breakdown);

        Plot::new("tier_breakdown")
            .height(height)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .show_axes([false, true])
            .show_grid(false)
            .include_x(0.0)
            .include_x(100.0)
            .include_y(-0.5)
            .include_y(Metric::ALL.len() as f64 - 0.5)
            .legend(Legend::default().position(Corner::LeftTop))
            .y_grid_spacer(|_input| {
                Metric::ALL
                    .iter()
                    .map(|&metric| GridMark {
                        value: metric_row(metric) as f64,
                        step_size: 1.0,
                    })
                    .collect()
            })
            .y_axis_formatter(|mark, _range| {
                Self::metric_at(mark.value)
                    .map(|metric| metric.name().to_string())
                    .unwrap_or_default()
            })
            .show(ui, |plot_ui| {
                for chart in charts {
                    plot_ui.bar_chart(chart);
                }

                // Data labels on non-empty segments
                for segment in segments.iter().filter(|s| s.value > 0.0) {
                    plot_ui.text(Text::new(
                        PlotPoint::new(segment.center(), metric_row(segment.metric) as f64),
                        RichText::new(format_data_label(segment.value))
                            .color(Color32::WHITE)
                            .strong(),
                    ));
                }
            });
    }

    /// Raw tier figures under the chart.
    pub fn draw_details_table(ui: &mut egui::Ui, breakdown: &TierBreakdown) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new("tier_details_table")
                    .striped(true)
                    .min_col_width(70.0)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        ui.label(RichText::new("Tier").strong().size(12.0));
                        for metric in Metric::ALL {
                            ui.label(RichText::new(format!("{} %", metric)).strong().size(12.0));
                        }
                        ui.label(RichText::new("Num Channels").strong().size(12.0));
                        ui.label(RichText::new("Unique Nodes").strong().size(12.0));
                        ui.end_row();

                        for tier in Tier::ALL {
                            let style = TierStyle::of(tier);
                            ui.label(
                                RichText::new(style.legend)
                                    .size(12.0)
                                    .color(Self::border_color(style)),
                            );
                            for metric in Metric::ALL {
                                let value = breakdown.normalized.get(metric, tier);
                                ui.label(RichText::new(format!("{:.2}", value)).size(12.0));
                            }
                            let aggregate = &breakdown.aggregate;
                            ui.label(
                                RichText::new(format_count(
                                    aggregate.value(tier, NUM_CHANNELS_COLUMN),
                                ))
                                .size(12.0),
                            );
                            ui.label(
                                RichText::new(format_count(
                                    aggregate.value(tier, NUM_UNIQUE_NODES_COLUMN),
                                ))
                                .size(12.0),
                            );
                            ui.end_row();
                        }
                    });
            });
    }
}
