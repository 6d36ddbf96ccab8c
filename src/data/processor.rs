//! Data Processor Module
//! Selects the three tier rows and normalizes their percentage metrics.

use std::collections::HashMap;
use std::fmt;
use tracing::{debug, warn};

/// Column holding the tier display name.
pub const TIER_COLUMN: &str = "Channel_Size_Tier";

/// A parsed CSV row: column name to raw string value.
pub type Row = HashMap<String, String>;

/// Channel-size tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tier {
    Myway,
    Highway,
    Freeway,
}

impl Tier {
    /// All tiers in stacking order.
    pub const ALL: [Tier; 3] = [Tier::Myway, Tier::Highway, Tier::Freeway];

    /// Value of the tier column that identifies this tier's row.
    pub fn display_name(self) -> &'static str {
        match self {
            Tier::Myway => "My Way",
            Tier::Highway => "Highway",
            Tier::Freeway => "Freeway",
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Tier::Myway => "Myway",
            Tier::Highway => "Highway",
            Tier::Freeway => "Freeway",
        }
    }

    /// Position in [`Tier::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Percentage metric compared across tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Metric {
    Channel,
    Capacity,
}

impl Metric {
    /// All metrics in axis order.
    pub const ALL: [Metric; 2] = [Metric::Channel, Metric::Capacity];

    pub fn name(self) -> &'static str {
        match self {
            Metric::Channel => "Channel",
            Metric::Capacity => "Capacity",
        }
    }

    /// CSV column carrying this metric.
    pub fn column(self) -> &'static str {
        match self {
            Metric::Channel => "Channel_Percentage",
            Metric::Capacity => "Capacity_Percentage",
        }
    }

    /// Position in [`Metric::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Selected row for each tier. Tiers without a matching row hold an empty row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateData {
    rows: [Row; 3],
}

impl AggregateData {
    pub fn row(&self, tier: Tier) -> &Row {
        &self.rows[tier.index()]
    }

    /// Raw string value of `column` for `tier`, if present.
    pub fn value(&self, tier: Tier, column: &str) -> Option<&str> {
        self.row(tier).get(column).map(String::as_str)
    }

    /// Raw percentage of `metric` for `tier`; missing or non-numeric is 0.
    pub fn metric_value(&self, tier: Tier, metric: Metric) -> f64 {
        parse_number(self.value(tier, metric.column())).unwrap_or(0.0)
    }
}

/// Normalized percentages indexed by metric, then tier.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NormalizedData {
    values: [[f64; 3]; 2],
}

impl NormalizedData {
    pub fn get(&self, metric: Metric, tier: Tier) -> f64 {
        self.values[metric.index()][tier.index()]
    }

    /// Values for one metric in [`Tier::ALL`] order.
    pub fn series(&self, metric: Metric) -> [f64; 3] {
        self.values[metric.index()]
    }
}

/// Output of [`DataProcessor::process`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TierBreakdown {
    pub aggregate: AggregateData,
    pub normalized: NormalizedData,
}

/// Parse a numeric cell. Returns `None` for absent, empty or non-finite values.
pub fn parse_number(raw: Option<&str>) -> Option<f64> {
    let value = raw?.trim().parse::<f64>().ok()?;
    value.is_finite().then_some(value)
}

/// Handles tier selection and normalization.
pub struct DataProcessor;

impl DataProcessor {
    /// Pick the first row whose tier column matches `tier`.
    pub fn select_row<'a>(rows: &'a [Row], tier: Tier) -> Option<&'a Row> {
        rows.iter().find(|row| {
            row.get(TIER_COLUMN)
                .is_some_and(|name| name == tier.display_name())
        })
    }

    /// Build the per-tier aggregate. Missing tiers degrade to empty rows.
    pub fn aggregate(rows: &[Row]) -> AggregateData {
        let selected = Tier::ALL.map(|tier| match Self::select_row(rows, tier) {
            Some(row) => row.clone(),
            None => {
                debug!(tier = %tier, "no row for tier, using empty row");
                Row::new()
            }
        });
        AggregateData { rows: selected }
    }

    /// Sum of `metric` across all tiers.
    pub fn metric_total(aggregate: &AggregateData, metric: Metric) -> f64 {
        Tier::ALL
            .iter()
            .map(|&tier| aggregate.metric_value(tier, metric))
            .sum()
    }

    /// Rescale each metric so its three tier values sum to 100.
    ///
    /// A metric whose total is zero yields zero for every tier. A total that
    /// overflows is recomputed on values divided by the largest magnitude.
    pub fn normalize(aggregate: &AggregateData) -> NormalizedData {
        let values = Metric::ALL.map(|metric| {
            let mut raw = Tier::ALL.map(|tier| aggregate.metric_value(tier, metric));
            let mut total = Self::metric_total(aggregate, metric);

            if !total.is_finite() {
                warn!(metric = %metric, "metric total overflows, rescaling before normalizing");
                let scale = raw.iter().fold(0.0_f64, |max, v| max.max(v.abs()));
                raw = raw.map(|v| v / scale);
                total = raw.iter().sum();
            }
            if total == 0.0 {
                warn!(metric = %metric, "metric total is zero, rendering empty bars");
                return [0.0; 3];
            }
            raw.map(|v| v / total * 100.0)
        });
        NormalizedData { values }
    }

    pub fn process(rows: &[Row]) -> TierBreakdown {
        let aggregate = Self::aggregate(rows);
        let normalized = Self::normalize(&aggregate);
        debug!(?normalized, "normalized tier breakdown");
        TierBreakdown {
            aggregate,
            normalized,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn row(pairs: &[(&str, &str)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    pub(crate) fn sample_rows() -> Vec<Row> {
        vec![
            row(&[
                (TIER_COLUMN, "My Way"),
                ("Channel_Percentage", "50"),
                ("Capacity_Percentage", "10"),
                ("Num_Channels", "12345"),
                ("Num_Unique_Nodes", "678"),
            ]),
            row(&[
                (TIER_COLUMN, "Highway"),
                ("Channel_Percentage", "30"),
                ("Capacity_Percentage", "10"),
                ("Num_Channels", "4000"),
            ]),
            row(&[
                (TIER_COLUMN, "Freeway"),
                ("Channel_Percentage", "20"),
                ("Capacity_Percentage", "0"),
            ]),
        ]
    }

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-6, "{a} != {b}");
    }

    #[test]
    fn test_channel_normalization() {
        let result = DataProcessor::process(&sample_rows());

        assert_close(result.normalized.get(Metric::Channel, Tier::Myway), 50.0);
        assert_close(result.normalized.get(Metric::Channel, Tier::Highway), 30.0);
        assert_close(result.normalized.get(Metric::Channel, Tier::Freeway), 20.0);
    }

    #[test]
    fn test_capacity_normalization() {
        let result = DataProcessor::process(&sample_rows());

        assert_close(result.normalized.get(Metric::Capacity, Tier::Myway), 50.0);
        assert_close(result.normalized.get(Metric::Capacity, Tier::Highway), 50.0);
        assert_close(result.normalized.get(Metric::Capacity, Tier::Freeway), 0.0);
    }

    #[test]
    fn test_each_metric_sums_to_hundred() {
        let rows = vec![
            row(&[
                (TIER_COLUMN, "My Way"),
                ("Channel_Percentage", "61.3"),
                ("Capacity_Percentage", "3.7"),
            ]),
            row(&[
                (TIER_COLUMN, "Highway"),
                ("Channel_Percentage", "33.1"),
                ("Capacity_Percentage", "40.02"),
            ]),
            row(&[
                (TIER_COLUMN, "Freeway"),
                ("Channel_Percentage", "4.9"),
                ("Capacity_Percentage", "55.9"),
            ]),
        ];
        let result = DataProcessor::process(&rows);

        for metric in Metric::ALL {
            let sum: f64 = result.normalized.series(metric).iter().sum();
            assert_close(sum, 100.0);
        }
    }

    #[test]
    fn test_missing_tier_counts_as_zero() {
        let mut rows = sample_rows();
        rows.remove(1);
        let result = DataProcessor::process(&rows);

        assert!(result.aggregate.row(Tier::Highway).is_empty());
        assert_eq!(result.aggregate.metric_value(Tier::Highway, Metric::Channel), 0.0);
        assert_close(result.normalized.get(Metric::Channel, Tier::Myway), 50.0 / 70.0 * 100.0);
        assert_close(result.normalized.get(Metric::Channel, Tier::Highway), 0.0);
        assert_close(result.normalized.get(Metric::Capacity, Tier::Myway), 100.0);
    }

    #[test]
    fn test_zero_total_yields_zeros_not_nan() {
        let rows = vec![
            row(&[(TIER_COLUMN, "My Way"), ("Channel_Percentage", "0")]),
            row(&[(TIER_COLUMN, "Highway"), ("Channel_Percentage", "0")]),
            row(&[(TIER_COLUMN, "Freeway")]),
        ];
        let result = DataProcessor::process(&rows);

        for metric in Metric::ALL {
            assert_eq!(result.normalized.series(metric), [0.0, 0.0, 0.0]);
        }
    }

    #[test]
    fn test_overflowing_total_still_sums_to_hundred() {
        let rows = vec![
            row(&[(TIER_COLUMN, "My Way"), ("Channel_Percentage", "1e308")]),
            row(&[(TIER_COLUMN, "Highway"), ("Channel_Percentage", "1e308")]),
            row(&[(TIER_COLUMN, "Freeway"), ("Channel_Percentage", "1")]),
        ];
        let result = DataProcessor::process(&rows);
        let series = result.normalized.series(Metric::Channel);

        assert_close(series[0], 50.0);
        assert_close(series[1], 50.0);
        assert_close(series[2], 0.0);
        assert_close(series.iter().sum(), 100.0);
    }

    #[test]
    fn test_empty_input_is_all_zero() {
        let result = DataProcessor::process(&[]);

        for tier in Tier::ALL {
            assert!(result.aggregate.row(tier).is_empty());
        }
        assert_eq!(result.normalized, NormalizedData::default());
    }

    #[test]
    fn test_first_duplicate_row_wins() {
        let mut rows = sample_rows();
        rows.push(row(&[
            (TIER_COLUMN, "Freeway"),
            ("Channel_Percentage", "900"),
        ]));
        let result = DataProcessor::process(&rows);

        assert_eq!(result.aggregate.value(Tier::Freeway, "Channel_Percentage"), Some("20"));
        assert_close(result.normalized.get(Metric::Channel, Tier::Freeway), 20.0);
    }

    #[test]
    fn test_non_numeric_metric_is_zero() {
        let rows = vec![
            row(&[(TIER_COLUMN, "My Way"), ("Channel_Percentage", "n/a")]),
            row(&[(TIER_COLUMN, "Highway"), ("Channel_Percentage", " 25 ")]),
            row(&[(TIER_COLUMN, "Freeway"), ("Channel_Percentage", "")]),
        ];
        let result = DataProcessor::process(&rows);

        assert_close(result.normalized.get(Metric::Channel, Tier::Myway), 0.0);
        assert_close(result.normalized.get(Metric::Channel, Tier::Highway), 100.0);
    }

    #[test]
    fn test_tier_lookup_uses_display_name() {
        let rows = vec![row(&[(TIER_COLUMN, "Myway"), ("Channel_Percentage", "10")])];

        assert!(DataProcessor::select_row(&rows, Tier::Myway).is_none());
        assert_eq!(Tier::Myway.display_name(), "My Way");
        assert_eq!(Tier::Highway.display_name(), Tier::Highway.id());
    }
}
