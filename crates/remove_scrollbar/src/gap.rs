//! Scrollbar gap measurement.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::platform::Platform;

/// Which box-model property of the body absorbs the compensation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GapMode {
    #[default]
    Margin,
    Padding,
}

impl GapMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Margin => "margin",
            Self::Padding => "padding",
        }
    }
}

/// Pixel offsets captured in one measurement pass.
///
/// `gap` is the scrollbar thickness. `left`, `top` and `right` are the body's own
/// margin (or padding, in [`GapMode::Padding`]) at measurement time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct GapOffset {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub gap: i32,
}

impl GapOffset {
    /// Result when there is nothing to measure.
    pub const ZERO: Self = Self {
        left: 0,
        top: 0,
        right: 0,
        gap: 0,
    };
}

/// Left, top and right edge of one box-model property.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Edges {
    pub left: i32,
    pub top: i32,
    pub right: i32,
}

/// Everything a measurement reads from the rendering surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LayoutMetrics {
    /// Viewport width including the scrollbar (`window.innerWidth`).
    pub window_width: i32,
    /// Viewport width excluding the scrollbar (`documentElement.clientWidth`).
    pub document_width: i32,
    pub body_margin: Edges,
    pub body_padding: Edges,
}

impl LayoutMetrics {
    pub const fn body_edges(&self, mode: GapMode) -> Edges {
        match mode {
            GapMode::Margin => self.body_margin,
            GapMode::Padding => self.body_padding,
        }
    }
}

/// Measure the scrollbar gap for `mode`.
///
/// Without a rendering surface this returns [`GapOffset::ZERO`]. After the generated stylesheet
/// hides the scrollbar the removed width shows up in the body's right edge instead, so measuring
/// again in the same mode gives the same gap.
pub fn measure<P: Platform + ?Sized>(platform: &P, mode: GapMode) -> GapOffset {
    let Some(metrics) = platform.layout_metrics() else {
        debug!(target: "remove_scrollbar", "no rendering surface, gap is zero");
        return GapOffset::ZERO;
    };
    let edges = metrics.body_edges(mode);
    // Edges come from arbitrary author lengths; widen so extreme values clamp instead of wrapping.
    let wide = i64::from(metrics.window_width) - i64::from(metrics.document_width)
        + i64::from(edges.right)
        - i64::from(edges.left);
    let gap = i32::try_from(wide.max(0)).unwrap_or(i32::MAX);
    debug!(
        target: "remove_scrollbar",
        "measured {}px gap in {} mode (window {}, document {})",
        gap,
        mode.as_str(),
        metrics.window_width,
        metrics.document_width
    );
    GapOffset {
        left: edges.left,
        top: edges.top,
        right: edges.right,
        gap,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Headless;

    struct Fixed(LayoutMetrics);

    impl Platform for Fixed {
        fn layout_metrics(&self) -> Option<LayoutMetrics> {
            Some(self.0)
        }

        fn add_body_class(&self, _class: &str) -> bool {
            false
        }

        fn remove_body_class(&self, _class: &str) -> bool {
            false
        }
    }

    fn metrics() -> LayoutMetrics {
        LayoutMetrics {
            window_width: 1024,
            document_width: 1007,
            body_margin: Edges {
                left: 8,
                top: 8,
                right: 8,
            },
            body_padding: Edges {
                left: 0,
                top: 4,
                right: 10,
            },
        }
    }

    #[test]
    fn headless_measures_zero() {
        assert_eq!(measure(&Headless, GapMode::Margin), GapOffset::ZERO);
        assert_eq!(measure(&Headless, GapMode::Padding), GapOffset::ZERO);
    }

    #[test]
    fn margin_mode_reads_body_margin() {
        let offset = measure(&Fixed(metrics()), GapMode::Margin);
        assert_eq!(
            offset,
            GapOffset {
                left: 8,
                top: 8,
                right: 8,
                gap: 17,
            }
        );
    }

    #[test]
    fn padding_mode_folds_asymmetric_padding_into_gap() {
        let offset = measure(&Fixed(metrics()), GapMode::Padding);
        assert_eq!(offset.top, 4);
        assert_eq!(offset.gap, 27);
    }

    #[test]
    fn gap_never_goes_negative() {
        let mut narrow = metrics();
        narrow.document_width = 1024;
        narrow.body_margin.left = 30;
        assert_eq!(measure(&Fixed(narrow), GapMode::Margin).gap, 0);
    }

    #[test]
    fn extreme_edges_clamp_instead_of_overflowing() {
        let mut huge = metrics();
        huge.body_margin.right = i32::MAX;
        assert_eq!(measure(&Fixed(huge), GapMode::Margin).gap, i32::MAX);

        let mut negative = metrics();
        negative.body_margin.left = i32::MAX;
        negative.body_margin.right = i32::MIN;
        negative.document_width = i32::MIN;
        assert_eq!(measure(&Fixed(negative), GapMode::Margin).gap, 0);
    }
}
