//! Charts module - Chart rendering and export

mod chartjs;
pub mod format;
mod layout;
mod palette;
mod plotter;
mod renderer;

pub use chartjs::ChartJsConfig;
pub use palette::TierStyle;
pub use plotter::ChartPlotter;
pub use renderer::StaticChartRenderer;
