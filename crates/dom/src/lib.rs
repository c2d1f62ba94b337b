//! In-memory document model: an arena-backed tree, class lists, `<style>` elements, and just
//! enough cascade and viewport geometry to answer the layout questions scroll locking asks.

#![forbid(unsafe_code)]

pub mod document;
pub mod printing;
pub mod style;
pub mod window;

pub use document::{DOMNode, Document, NodeKind};
pub use indextree::NodeId;
pub use style::ComputedStyle;
pub use window::{Viewport, Window};
