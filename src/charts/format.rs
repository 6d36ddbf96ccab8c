//! Text formatting for bar labels and hover tooltips.

use crate::charts::TierStyle;
use crate::data::{parse_number, Metric, Tier, TierBreakdown};

pub const NUM_CHANNELS_COLUMN: &str = "Num_Channels";
pub const NUM_UNIQUE_NODES_COLUMN: &str = "Num_Unique_Nodes";

/// Below this a data label keeps one decimal place.
const LABEL_DECIMAL_THRESHOLD: f64 = 3.0;
/// Above this a tooltip value drops its decimal place.
const TOOLTIP_INTEGER_THRESHOLD: f64 = 20.0;

/// Label drawn on a bar segment.
///
/// The threshold is checked after rounding to one decimal so that values
/// just under 3 render as `"3%"` rather than `"3.0%"`.
pub fn format_data_label(value: f64) -> String {
    // `+ 0.0` turns a rounded -0.0 into 0.0
    let rounded = (value * 10.0).round() / 10.0 + 0.0;
    if rounded < LABEL_DECIMAL_THRESHOLD {
        format!("{:.1}%", rounded)
    } else {
        format!("{:.0}%", value)
    }
}

/// Percentage shown in the first tooltip line.
pub fn format_tooltip_value(value: f64) -> String {
    if value > TOOLTIP_INTEGER_THRESHOLD {
        format!("{:.0}%", value)
    } else {
        format!("{:.1}%", value)
    }
}

/// Insert `,` between every group of three digits of an unsigned integer string.
fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Render a count with thousands separators. Fractions keep up to three
/// decimals.
pub fn format_thousands(value: f64) -> String {
    let negative = value < 0.0;
    let abs = (value.abs() * 1000.0).round() / 1000.0;
    let int_part = abs.trunc();

    let mut out = group_thousands(&format!("{:.0}", int_part));
    let frac = format!("{:.3}", abs - int_part);
    let frac = frac.trim_end_matches('0').trim_end_matches('.');
    if let Some(decimals) = frac.strip_prefix('0') {
        out.push_str(decimals);
    }

    if negative {
        format!("-{}", out)
    } else {
        out
    }
}

/// Formatted numeric cell, or `"N/A"` when absent or non-numeric.
pub fn format_count(raw: Option<&str>) -> String {
    match parse_number(raw) {
        Some(value) => format_thousands(value),
        None => "N/A".to_string(),
    }
}

/// Tooltip for one bar segment.
pub fn tooltip_lines(tier: Tier, metric: Metric, breakdown: &TierBreakdown) -> Vec<String> {
    let style = TierStyle::of(tier);
    let value = breakdown.normalized.get(metric, tier);
    let aggregate = &breakdown.aggregate;

    vec![
        format!("{}: {}", style.legend, format_tooltip_value(value)),
        format!(
            "Num Channels: {}",
            format_count(aggregate.value(tier, NUM_CHANNELS_COLUMN))
        ),
        format!(
            "Unique Nodes: {}",
            format_count(aggregate.value(tier, NUM_UNIQUE_NODES_COLUMN))
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{sample_rows, DataProcessor};

    #[test]
    fn test_data_label_decimals() {
        assert_eq!(format_data_label(2.3), "2.3%");
        assert_eq!(format_data_label(0.04), "0.0%");
        assert_eq!(format_data_label(2.999), "3%");
        assert_eq!(format_data_label(3.0), "3%");
        assert_eq!(format_data_label(45.6), "46%");
        assert_eq!(format_data_label(100.0), "100%");
        assert_eq!(format_data_label(-0.04), "0.0%");
    }

    #[test]
    fn test_tooltip_value_decimals() {
        assert_eq!(format_tooltip_value(20.0), "20.0%");
        assert_eq!(format_tooltip_value(12.34), "12.3%");
        assert_eq!(format_tooltip_value(61.5), "62%");
    }

    #[test]
    fn test_thousands_separators() {
        assert_eq!(format_thousands(0.0), "0");
        assert_eq!(format_thousands(999.0), "999");
        assert_eq!(format_thousands(1000.0), "1,000");
        assert_eq!(format_thousands(12345.0), "12,345");
        assert_eq!(format_thousands(1234567.0), "1,234,567");
        assert_eq!(format_thousands(1234.5), "1,234.5");
        assert_eq!(format_thousands(-9876.0), "-9,876");
    }

    #[test]
    fn test_count_absent_is_na() {
        assert_eq!(format_count(None), "N/A");
        assert_eq!(format_count(Some("")), "N/A");
        assert_eq!(format_count(Some("unknown")), "N/A");
        assert_eq!(format_count(Some("12345")), "12,345");
        assert_eq!(format_count(Some("0")), "0");
    }

    #[test]
    fn test_tooltip_lines() {
        let breakdown = DataProcessor::process(&sample_rows());

        let lines = tooltip_lines(Tier::Myway, Metric::Channel, &breakdown);
        assert_eq!(
            lines,
            vec![
                "Myway (<= 5M Sats): 50%".to_string(),
                "Num Channels: 12,345".to_string(),
                "Unique Nodes: 678".to_string(),
            ]
        );

        let lines = tooltip_lines(Tier::Freeway, Metric::Capacity, &breakdown);
        assert_eq!(lines[0], "Freeway (> 1 BTC): 0.0%");
        assert_eq!(lines[1], "Num Channels: N/A");
        assert_eq!(lines[2], "Unique Nodes: N/A");
    }
}
