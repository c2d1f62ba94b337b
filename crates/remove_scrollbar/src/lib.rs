//! Hide the page scrollbar without shifting the layout.
//!
//! A [`ScrollLock`] measures the native scrollbar width once, builds a stylesheet that hides the
//! scrollbar and gives the same width back as body margin or padding, and submits it to a
//! first-write-wins [`StyleSink`]. Scrollbar removal is a one-shot effect for the page: releasing
//! a lock only removes its body marker class.
//!
//! ```ignore
//! let window = Window::new(Viewport::new(1280, 17));
//! let sink = Rc::new(StyleSingleton::new(window.clone()));
//! let remover = RemoveScrollBar::new(window, sink);
//! let lock = remover.activate(BodyScrollConfig::default().with_body_class("locked"));
//! // ... modal is open ...
//! lock.deactivate();
//! ```

#![forbid(unsafe_code)]

pub mod config;
pub mod constants;
pub mod controller;
pub mod gap;
pub mod platform;
pub mod styles;

pub use config::BodyScrollConfig;
pub use constants::{
    FULL_WIDTH_CLASS_NAME, IMPORTANT, NO_SCROLLBARS_CLASS_NAME, REMOVED_BAR_SIZE_VARIABLE,
    ZERO_RIGHT_CLASS_NAME,
};
pub use controller::{RemoveScrollBar, ScrollLock};
pub use gap::{Edges, GapMode, GapOffset, LayoutMetrics, measure};
pub use platform::{Headless, Platform};
pub use style_singleton::{StyleSingleton, StyleSink, Submission};
pub use styles::{Importance, synthesize};
