//! Stacking layout shared by the interactive and static charts.

use crate::data::{Metric, Tier, TierBreakdown};

/// One tier's slice of one metric bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub tier: Tier,
    pub metric: Metric,
    /// Left edge, in percent.
    pub start: f64,
    /// Width, in percent.
    pub value: f64,
}

impl Segment {
    pub fn end(&self) -> f64 {
        self.start + self.value
    }

    pub fn center(&self) -> f64 {
        self.start + self.value / 2.0
    }
}

/// Row of a metric on the category axis, counted from the bottom.
/// The first metric sits on top.
pub fn metric_row(metric: Metric) -> usize {
    Metric::ALL.len() - 1 - metric.index()
}

/// Segments for every (metric, tier) pair, stacked in [`Tier::ALL`] order.
pub fn stacked_segments(breakdown: &TierBreakdown) -> Vec<Segment> {
    let mut segments = Vec::with_capacity(Metric::ALL.len() * Tier::ALL.len());
    for metric in Metric::ALL {
        let mut start = 0.0;
        for tier in Tier::ALL {
            let value = breakdown.normalized.get(metric, tier);
            segments.push(Segment {
                tier,
                metric,
                start,
                value,
            });
            start += value;
        }
    }
    segments
}
