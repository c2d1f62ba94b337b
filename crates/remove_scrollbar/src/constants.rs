//! Class names and property names the generated stylesheet targets.
//!
//! Put these on your own elements to opt into compensation.

/// Fixed or absolutely positioned elements pinned to the right edge. They are moved left by
/// the gap; a nested element with the same class is reset to `right: 0`.
pub const ZERO_RIGHT_CLASS_NAME: &str = "right-scroll-bar-position";

/// Full-width elements that should stop before the gap. Nested occurrences reset to
/// `margin-right: 0`.
pub const FULL_WIDTH_CLASS_NAME: &str = "width-before-scroll-bar";

/// Scroll containers whose own scrollbar should be hidden and padded out.
pub const NO_SCROLLBARS_CLASS_NAME: &str = "with-scroll-bars-hidden";

/// Custom property on the body carrying the removed scrollbar width, e.g. `17px`.
pub const REMOVED_BAR_SIZE_VARIABLE: &str = "--removed-body-scroll-bar-size";

/// Importance token appended to compensation declarations.
pub const IMPORTANT: &str = "!important";
