//! Channel Tier Chart Main Application
//! Main window with control panel and chart viewer.

use crate::charts::{ChartJsConfig, StaticChartRenderer};
use crate::data::{DataLoader, DataProcessor, DataSource, TierBreakdown};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction, ExportSettings};
use egui::SidePanel;
use std::path::Path;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;
use tracing::{error, info, warn};

/// Load result from background thread
enum LoadResult {
    Progress(f32, String),
    Complete(TierBreakdown),
    Error(String),
}

/// Main application window.
pub struct TierChartApp {
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,

    // Async load
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl TierChartApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, source: DataSource, export: ExportSettings) -> Self {
        let mut app = Self {
            control_panel: ControlPanel::new(source.to_string(), export),
            chart_viewer: ChartViewer::new(),
            load_rx: None,
            is_loading: false,
        };
        app.start_load(source);
        app
    }

    /// Fetch, parse and normalize once, in a background thread.
    fn start_load(&mut self, source: DataSource) {
        let (tx, rx) = channel();
        self.load_rx = Some(rx);
        self.is_loading = true;
        self.control_panel.set_progress(5.0, "Loading CSV...");

        thread::spawn(move || Self::run_load(tx, source));
    }

    /// Run load (called from background thread)
    fn run_load(tx: Sender<LoadResult>, source: DataSource) {
        let _ = tx.send(LoadResult::Progress(10.0, format!("Fetching {}...", source)));

        let rows = match DataLoader::load_rows(&source) {
            Ok(rows) => rows,
            Err(e) => {
                error!(error = %e, "load failed");
                let _ = tx.send(LoadResult::Error(e.to_string()));
                return;
            }
        };

        let _ = tx.send(LoadResult::Progress(
            60.0,
            format!("Normalizing {} rows...", rows.len()),
        ));

        let breakdown = DataProcessor::process(&rows);
        let _ = tx.send(LoadResult::Complete(breakdown));
    }

    /// Check for load results
    fn check_load_results(&mut self) {
        // Take the receiver temporarily to avoid borrow issues
        let rx = self.load_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    LoadResult::Progress(progress, status) => {
                        self.control_panel.set_progress(progress, &status);
                    }
                    LoadResult::Complete(breakdown) => {
                        self.chart_viewer.set_breakdown(breakdown);
                        self.control_panel.set_progress(100.0, "Complete! Chart ready");
                        self.control_panel.export_enabled = true;
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                    LoadResult::Error(message) => {
                        self.control_panel
                            .set_progress(0.0, &format!("Error: {}", message));
                        self.chart_viewer.set_error(message);
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                }
            }

            // Put receiver back if still needed
            if should_keep_receiver {
                self.load_rx = Some(rx);
            }
        }
    }

    /// Handle PNG export
    fn handle_export_png(&mut self) {
        let Some(breakdown) = self.chart_viewer.breakdown() else {
            self.control_panel.set_progress(0.0, "No chart to export");
            return;
        };

        let output_path = match rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name("channel_tiers.png")
            .save_file()
        {
            Some(path) => path,
            None => return, // User cancelled
        };

        let settings = &self.control_panel.export;
        match StaticChartRenderer::render_png(
            breakdown,
            &output_path,
            settings.png_width,
            settings.png_height,
        ) {
            Ok(()) => {
                let open_after = settings.open_after_export;
                self.exported(&output_path, open_after);
            }
            Err(e) => {
                error!(error = %e, "PNG export failed");
                self.control_panel
                    .set_progress(0.0, &format!("Render error: {}", e));
            }
        }
    }

    /// Handle Chart.js config export
    fn handle_export_chartjs(&mut self) {
        let Some(breakdown) = self.chart_viewer.breakdown() else {
            self.control_panel.set_progress(0.0, "No chart to export");
            return;
        };

        let output_path = match rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name("channel_tiers.chart.json")
            .save_file()
        {
            Some(path) => path,
            None => return,
        };

        match ChartJsConfig::write(breakdown, &output_path) {
            Ok(()) => self.exported(&output_path, false),
            Err(e) => {
                error!(error = %e, "config export failed");
                self.control_panel
                    .set_progress(0.0, &format!("Export error: {}", e));
            }
        }
    }

    fn exported(&mut self, path: &Path, open_after: bool) {
        info!(path = %path.display(), "exported");
        self.control_panel
            .set_progress(100.0, &format!("Exported {}", path.display()));

        if open_after {
            if let Err(e) = open::that(path) {
                warn!(error = %e, "could not open exported file");
            }
        }
    }
}

impl eframe::App for TierChartApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for background results
        self.check_load_results();

        // Request repaint while loading
        if self.is_loading {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(280.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.control_panel.show(ui) {
                        ControlPanelAction::ExportPng => self.handle_export_png(),
                        ControlPanelAction::ExportChartJs => self.handle_export_chartjs(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}
