//! The browsing context that owns a document and its viewport.

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use crate::document::Document;

/// Viewport geometry in CSS pixels.
///
/// `scrollbar_width` is the thickness of the classic (non-overlay) vertical scrollbar the
/// platform draws while the root element scrolls; `0` on overlay-scrollbar platforms.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Viewport {
    pub inner_width: i32,
    pub scrollbar_width: i32,
}

impl Viewport {
    pub const fn new(inner_width: i32, scrollbar_width: i32) -> Self {
        Self {
            inner_width,
            scrollbar_width,
        }
    }
}

/// Shared handle to a document, the equivalent of the page's `window` global.
///
/// Cloning is cheap and every clone sees the same document. The handle is single-threaded,
/// like the event loop that would drive it.
#[derive(Clone, Debug)]
pub struct Window {
    document: Rc<RefCell<Document>>,
}

impl Window {
    pub fn new(viewport: Viewport) -> Self {
        Self::from_document(Document::new(viewport))
    }

    pub fn from_document(document: Document) -> Self {
        Self {
            document: Rc::new(RefCell::new(document)),
        }
    }

    /// `window.innerWidth`: the layout viewport including any scrollbar.
    pub fn inner_width(&self) -> i32 {
        self.document.borrow().viewport().inner_width
    }

    pub fn document(&self) -> Ref<'_, Document> {
        self.document.borrow()
    }

    pub fn document_mut(&self) -> RefMut<'_, Document> {
        self.document.borrow_mut()
    }

    /// Whether both handles point at the same document.
    pub fn same_document(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.document, &other.document)
    }
}
