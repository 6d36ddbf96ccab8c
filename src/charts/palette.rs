//! Per-tier colors and legend labels shared by every chart surface.

use crate::data::Tier;

/// RGB triple plus the fill alpha used for bar backgrounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierStyle {
    pub tier: Tier,
    pub rgb: (u8, u8, u8),
    pub fill_alpha: f64,
    pub legend: &'static str,
}

pub const TIER_STYLES: [TierStyle; 3] = [
    TierStyle {
        tier: Tier::Myway,
        rgb: (255, 99, 132), // Pink
        fill_alpha: 0.7,
        legend: "Myway (<= 5M Sats)",
    },
    TierStyle {
        tier: Tier::Highway,
        rgb: (54, 162, 235), // Blue
        fill_alpha: 0.7,
        legend: "Highway (> 5M Sats)",
    },
    TierStyle {
        tier: Tier::Freeway,
        rgb: (75, 192, 192), // Teal
        fill_alpha: 0.7,
        legend: "Freeway (> 1 BTC)",
    },
];

impl TierStyle {
    pub fn of(tier: Tier) -> &'static TierStyle {
        &TIER_STYLES[tier.index()]
    }

    /// CSS `rgba()` for the bar fill.
    pub fn css_background(&self) -> String {
        let (r, g, b) = self.rgb;
        format!("rgba({}, {}, {}, {})", r, g, b, self.fill_alpha)
    }

    /// CSS `rgba()` for the bar border (opaque).
    pub fn css_border(&self) -> String {
        let (r, g, b) = self.rgb;
        format!("rgba({}, {}, {}, 1)", r, g, b)
    }

    pub fn fill_alpha_u8(&self) -> u8 {
        (self.fill_alpha * 255.0).round() as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_styles_follow_tier_order() {
        for tier in Tier::ALL {
            assert_eq!(TierStyle::of(tier).tier, tier);
        }
    }

    #[test]
    fn test_css_colors() {
        let style = TierStyle::of(Tier::Highway);
        assert_eq!(style.css_background(), "rgba(54, 162, 235, 0.7)");
        assert_eq!(style.css_border(), "rgba(54, 162, 235, 1)");
    }
}
