//! Chart Viewer Widget
//! Central panel showing the loading state, an error card, or the tier chart.

use crate::charts::ChartPlotter;
use crate::data::TierBreakdown;
use egui::{Color32, RichText, ScrollArea};

const CHART_HEIGHT: f32 = 260.0;
const ERROR_COLOR: Color32 = Color32::from_rgb(220, 53, 69);

/// What the central panel currently shows.
#[derive(Debug, Clone, Default)]
pub enum ViewState {
    #[default]
    Loading,
    Ready(TierBreakdown),
    Failed(String),
}

/// Central panel with the chart card.
#[derive(Default)]
pub struct ChartViewer {
    pub state: ViewState,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_breakdown(&mut self, breakdown: TierBreakdown) {
        self.state = ViewState::Ready(breakdown);
    }

    pub fn set_error(&mut self, message: String) {
        self.state = ViewState::Failed(message);
    }

    pub fn breakdown(&self) -> Option<&TierBreakdown> {
        match &self.state {
            ViewState::Ready(breakdown) => Some(breakdown),
            _ => None,
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        match &self.state {
            ViewState::Loading => {
                ui.centered_and_justified(|ui| {
                    ui.horizontal_centered(|ui| {
                        ui.spinner();
                        ui.label(RichText::new("Loading…").size(20.0));
                    });
                });
            }
            ViewState::Failed(message) => Self::draw_error_card(ui, message),
            ViewState::Ready(breakdown) => {
                ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| Self::draw_chart_card(ui, breakdown));
            }
        }
    }

    fn draw_error_card(ui: &mut egui::Ui, message: &str) {
        ui.add_space(40.0);
        ui.vertical_centered(|ui| {
            egui::Frame::none()
                .rounding(8.0)
                .stroke(egui::Stroke::new(2.0, ERROR_COLOR))
                .fill(ui.visuals().widgets.noninteractive.bg_fill)
                .inner_margin(16.0)
                .show(ui, |ui| {
                    ui.set_max_width(600.0);
                    ui.label(
                        RichText::new("⚠ Could not load tier data")
                            .size(18.0)
                            .strong()
                            .color(ERROR_COLOR),
                    );
                    ui.add_space(8.0);
                    ui.label(RichText::new(message).size(13.0));
                });
        });
    }

    fn draw_chart_card(ui: &mut egui::Ui, breakdown: &TierBreakdown) {
        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(1.0, ui.visuals().widgets.noninteractive.bg_stroke.color))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.label(
                    RichText::new("Channel Size Tiers")
                        .size(18.0)
                        .strong(),
                );
                ui.add_space(8.0);

                ChartPlotter::draw_stacked_chart(ui, breakdown, CHART_HEIGHT);

                ui.add_space(10.0);

                ChartPlotter::draw_details_table(ui, breakdown);
            });
    }
}
