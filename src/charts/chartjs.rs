//! Chart.js configuration export.
//!
//! Produces the `{type, data, options}` object a browser page passes to
//! `new Chart(ctx, config)`. Formatter callbacks cannot travel through JSON,
//! so each dataset carries its labels and tooltip lines already formatted.

use crate::charts::format::{format_data_label, tooltip_lines};
use crate::charts::TierStyle;
use crate::data::{Metric, Tier, TierBreakdown};
use serde::Serialize;
use serde_json::{json, Value};
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to serialize chart config: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: &'static str,
    pub data: Vec<f64>,
    pub background_color: String,
    pub border_color: String,
    pub border_width: u32,
    pub data_labels: Vec<String>,
    pub tooltips: Vec<Vec<String>>,
}

impl Dataset {
    fn for_tier(tier: Tier, breakdown: &TierBreakdown) -> Self {
        let style = TierStyle::of(tier);
        Self {
            label: style.legend,
            data: Metric::ALL
                .iter()
                .map(|&metric| breakdown.normalized.get(metric, tier))
                .collect(),
            background_color: style.css_background(),
            border_color: style.css_border(),
            border_width: 0,
            data_labels: Metric::ALL
                .iter()
                .map(|&metric| format_data_label(breakdown.normalized.get(metric, tier)))
                .collect(),
            tooltips: Metric::ALL
                .iter()
                .map(|&metric| tooltip_lines(tier, metric, breakdown))
                .collect(),
        }
    }
}

/// Builds Chart.js configuration objects.
pub struct ChartJsConfig;

impl ChartJsConfig {
    pub fn build(breakdown: &TierBreakdown) -> Value {
        let labels: Vec<&str> = Metric::ALL.iter().map(|m| m.name()).collect();
        let datasets: Vec<Dataset> = Tier::ALL
            .iter()
            .map(|&tier| Dataset::for_tier(tier, breakdown))
            .collect();

        json!({
            "type": "bar",
            "data": {
                "labels": labels,
                "datasets": datasets,
            },
            "options": {
                "indexAxis": "y",
                "scales": {
                    "x": {
                        "stacked": true,
                        "display": false,
                        "grid": { "display": false },
                        "title": { "display": false },
                    },
                    "y": {
                        "stacked": true,
                        "grid": { "display": false },
                        "title": { "display": false },
                        "ticks": { "display": true },
                        "border": { "display": false },
                    },
                },
                "plugins": {
                    "legend": {
                        "position": "top",
                        "display": true,
                        "labels": { "font": { "size": 14 } },
                    },
                    "datalabels": {
                        "color": "#fff",
                        "font": { "weight": "bold" },
                    },
                },
            },
        })
    }

    /// Write the configuration as pretty-printed JSON.
    pub fn write(breakdown: &TierBreakdown, path: &Path) -> Result<(), ExportError> {
        let body = serde_json::to_string_pretty(&Self::build(breakdown))?;
        std::fs::write(path, body).map_err(|source| ExportError::Io {
            path: path.display().to_string(),
            source,
        })?;
        info!(path = %path.display(), "wrote Chart.js config");
        Ok(())
    }
}
