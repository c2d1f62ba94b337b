//! The rendering surface scroll locking reads from and marks up.

use dom::{ComputedStyle, Window};
use log::trace;

use crate::gap::{Edges, LayoutMetrics};

/// Host environment: layout metrics plus the body's class list.
pub trait Platform {
    /// Current metrics, or `None` when nothing is rendered.
    fn layout_metrics(&self) -> Option<LayoutMetrics>;

    /// Add `class` to the body. Returns whether the class list changed; a missing body is a
    /// silent no-op.
    fn add_body_class(&self, class: &str) -> bool;

    /// Remove `class` from the body. Same contract as [`Platform::add_body_class`].
    fn remove_body_class(&self, class: &str) -> bool;
}

/// No document at all, e.g. when rendering on a server.
#[derive(Clone, Copy, Debug, Default)]
pub struct Headless;

impl Platform for Headless {
    fn layout_metrics(&self) -> Option<LayoutMetrics> {
        None
    }

    fn add_body_class(&self, _class: &str) -> bool {
        false
    }

    fn remove_body_class(&self, _class: &str) -> bool {
        false
    }
}

fn edges(style: &ComputedStyle, property: &str) -> Edges {
    let side = |name: &str| style.px(&format!("{property}-{name}"));
    Edges {
        left: side("left"),
        top: side("top"),
        right: side("right"),
    }
}

impl Platform for Window {
    fn layout_metrics(&self) -> Option<LayoutMetrics> {
        let document = self.document();
        let (body_margin, body_padding) = document.body().map_or_else(Default::default, |body| {
            let style = document.computed_style(body);
            (edges(&style, "margin"), edges(&style, "padding"))
        });
        Some(LayoutMetrics {
            window_width: document.viewport().inner_width,
            document_width: document.client_width(),
            body_margin,
            body_padding,
        })
    }

    fn add_body_class(&self, class: &str) -> bool {
        let mut document = self.document_mut();
        let Some(body) = document.body() else {
            trace!(target: "remove_scrollbar", "no body to add `{class}` to");
            return false;
        };
        document.add_class(body, class)
    }

    fn remove_body_class(&self, class: &str) -> bool {
        let mut document = self.document_mut();
        let Some(body) = document.body() else {
            trace!(target: "remove_scrollbar", "no body to remove `{class}` from");
            return false;
        };
        document.remove_class(body, class)
    }
}
