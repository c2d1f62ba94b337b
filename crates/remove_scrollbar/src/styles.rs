//! Stylesheet that hides the page scrollbar and pays its width back.
//!
//! Every pixel taken away by `overflow: hidden` is returned as padding, margin or a right
//! offset, so the page keeps its width when the scrollbar disappears.

use crate::constants::{
    FULL_WIDTH_CLASS_NAME, IMPORTANT, NO_SCROLLBARS_CLASS_NAME, REMOVED_BAR_SIZE_VARIABLE,
    ZERO_RIGHT_CLASS_NAME,
};
use crate::gap::{GapMode, GapOffset};

/// Whether compensation declarations carry `!important`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Importance {
    #[default]
    Important,
    Normal,
}

impl Importance {
    pub const fn token(self) -> &'static str {
        match self {
            Self::Important => IMPORTANT,
            Self::Normal => "",
        }
    }
}

/// Accumulates `selector { ... }` blocks.
struct SheetWriter {
    css: String,
    importance: Importance,
}

impl SheetWriter {
    fn open(&mut self, selector: &str) {
        self.css.push_str(&format!("{selector} {{\n"));
    }

    fn close(&mut self) {
        self.css.push_str("}\n");
    }

    fn plain(&mut self, property: &str, value: &str) {
        self.css.push_str(&format!("  {property}: {value};\n"));
    }

    /// Declaration suffixed with the importance token, if any.
    fn ranked(&mut self, property: &str, value: &str) {
        match self.importance {
            Importance::Important => {
                self.css.push_str(&format!("  {property}: {value} {IMPORTANT};\n"));
            }
            Importance::Normal => self.plain(property, value),
        }
    }
}

/// Build the scroll-locking stylesheet.
///
/// `body_class` scopes the body rules to `body.<class>`; when empty they apply to `body`.
/// In [`GapMode::Margin`] the body's measured margins move into its padding and the gap becomes
/// its right margin; in [`GapMode::Padding`] the gap is added as right padding only.
pub fn synthesize(
    offset: GapOffset,
    allow_relative: bool,
    gap_mode: GapMode,
    importance: Importance,
    body_class: &str,
) -> String {
    let GapOffset {
        left,
        top,
        right,
        gap,
    } = offset;
    let gap_px = format!("{gap}px");
    let body = if body_class.is_empty() {
        "body".to_owned()
    } else {
        format!("body.{body_class}")
    };
    let mut sheet = SheetWriter {
        css: String::with_capacity(768),
        importance,
    };

    sheet.open(&format!(".{NO_SCROLLBARS_CLASS_NAME}"));
    sheet.ranked("overflow", "hidden");
    sheet.ranked("padding-right", &gap_px);
    sheet.close();

    sheet.open(&body);
    sheet.ranked("overflow", "hidden");
    sheet.plain("overscroll-behavior", "contain");
    if allow_relative {
        sheet.ranked("position", "relative");
    }
    match gap_mode {
        GapMode::Margin => {
            sheet.plain("padding-left", &format!("{left}px"));
            sheet.plain("padding-top", &format!("{top}px"));
            sheet.plain("padding-right", &format!("{right}px"));
            sheet.plain("margin-left", "0");
            sheet.plain("margin-top", "0");
            sheet.ranked("margin-right", &gap_px);
        }
        GapMode::Padding => sheet.ranked("padding-right", &gap_px),
    }
    sheet.close();

    sheet.open(&format!(".{ZERO_RIGHT_CLASS_NAME}"));
    sheet.ranked("right", &gap_px);
    sheet.close();

    sheet.open(&format!(".{FULL_WIDTH_CLASS_NAME}"));
    sheet.ranked("margin-right", &gap_px);
    sheet.close();

    sheet.open(&format!(".{ZERO_RIGHT_CLASS_NAME} .{ZERO_RIGHT_CLASS_NAME}"));
    sheet.ranked("right", "0");
    sheet.close();

    sheet.open(&format!(".{FULL_WIDTH_CLASS_NAME} .{FULL_WIDTH_CLASS_NAME}"));
    sheet.ranked("margin-right", "0");
    sheet.close();

    sheet.open(&body);
    sheet.plain(REMOVED_BAR_SIZE_VARIABLE, &gap_px);
    sheet.close();

    sheet.css
}

#[cfg(test)]
mod tests {
    use super::*;

    const OFFSET: GapOffset = GapOffset {
        left: 8,
        top: 8,
        right: 8,
        gap: 17,
    };

    #[test]
    fn no_scrollbars_rule_leads_the_sheet() {
        let css = synthesize(OFFSET, true, GapMode::Padding, Importance::Important, "");
        assert!(css.starts_with(
            ".with-scroll-bars-hidden {\n  overflow: hidden !important;\n  padding-right: 17px !important;\n}\n"
        ));
    }

    #[test]
    fn normal_importance_leaves_no_token() {
        let css = synthesize(OFFSET, true, GapMode::Margin, Importance::Normal, "x");
        assert!(!css.contains("important"));
        assert!(css.contains("  overflow: hidden;\n"));
    }

    #[test]
    fn bare_body_rule_without_class() {
        let css = synthesize(OFFSET, false, GapMode::Margin, Importance::Important, "");
        assert!(css.contains("\nbody {\n"));
        assert!(!css.contains("body."));
        assert!(!css.contains("position"));
    }

    #[test]
    fn margin_mode_moves_margins_into_padding() {
        let css = synthesize(OFFSET, true, GapMode::Margin, Importance::Important, "lock");
        assert!(css.contains(
            "  padding-left: 8px;\n  padding-top: 8px;\n  padding-right: 8px;\n  margin-left: 0;\n  margin-top: 0;\n  margin-right: 17px !important;\n"
        ));
    }
}
