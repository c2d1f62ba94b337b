//! A `<style>` element that can only be written once.
//!
//! Every caller that wants the page styled hands its CSS to the same [`StyleSink`]. The first
//! non-empty text that renders into the document claims the sink; everything after it is
//! dropped until the sink is [`reset`](StyleSink::reset). Callers may race to submit: whoever submits first wins, and
//! the others observe [`Submission::Superseded`].

#![forbid(unsafe_code)]

use std::cell::RefCell;

use anyhow::{Context as _, Result};
use dom::{NodeId, Window};
use log::{debug, trace, warn};

/// What happened to a submitted stylesheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Submission {
    /// First non-empty submission; it is now the page's stylesheet.
    Applied,
    /// An earlier submission already holds the sink.
    Superseded,
    /// Blank text, never recorded.
    Ignored,
    /// The document refused the `<style>` element. Nothing was recorded, so a later submission
    /// can still claim the sink.
    Failed,
}

/// Destination for injected CSS with first-write-wins semantics.
pub trait StyleSink {
    fn submit(&self, css: &str) -> Submission;

    /// Forget the accepted stylesheet and remove it from the document. Test teardown only.
    fn reset(&self);

    /// The stylesheet currently in effect.
    fn applied(&self) -> Option<String>;
}

#[derive(Debug, Default)]
struct State {
    css: Option<String>,
    element: Option<NodeId>,
    superseded: usize,
}

/// [`StyleSink`] that renders into a [`Window`]'s `<head>`, or nowhere when headless.
#[derive(Debug)]
pub struct StyleSingleton {
    target: Option<Window>,
    nonce: Option<String>,
    state: RefCell<State>,
}

impl StyleSingleton {
    pub fn new(window: Window) -> Self {
        Self {
            target: Some(window),
            nonce: None,
            state: RefCell::default(),
        }
    }

    /// A sink with no document: it still arbitrates first-write-wins but renders nothing.
    pub fn headless() -> Self {
        Self {
            target: None,
            nonce: None,
            state: RefCell::default(),
        }
    }

    /// Stamp the injected element with a CSP `nonce` attribute.
    #[must_use]
    pub fn with_nonce(mut self, nonce: impl Into<String>) -> Self {
        self.nonce = Some(nonce.into());
        self
    }

    /// The injected `<style>` element, if one is in the document.
    pub fn element(&self) -> Option<NodeId> {
        self.state.borrow().element
    }

    /// How many submissions lost to the accepted one since the last reset.
    pub fn superseded(&self) -> usize {
        self.state.borrow().superseded
    }

    fn inject(&self, window: &Window, css: &str) -> Result<NodeId> {
        let mut document = window.document_mut();
        let style = document.create_element("style");
        document.set_attribute(style, "type", "text/css");
        if let Some(nonce) = &self.nonce {
            document.set_attribute(style, "nonce", nonce);
        }
        let text = document.create_text(css);
        document
            .append_child(style, text)
            .context("filling injected <style>")?;
        let head = document.head();
        if let Err(error) = document.append_child(head, style) {
            document.remove_node(style);
            return Err(error.context("attaching injected <style> to <head>"));
        }
        Ok(style)
    }
}

impl StyleSink for StyleSingleton {
    fn submit(&self, css: &str) -> Submission {
        if css.trim().is_empty() {
            trace!(target: "style_singleton", "ignoring blank stylesheet");
            return Submission::Ignored;
        }
        let mut state = self.state.borrow_mut();
        if state.css.is_some() {
            state.superseded += 1;
            debug!(target: "style_singleton", "stylesheet already applied, dropping submission #{}", state.superseded);
            return Submission::Superseded;
        }
        if let Some(window) = &self.target {
            match self.inject(window, css) {
                Ok(element) => state.element = Some(element),
                Err(error) => {
                    warn!(target: "style_singleton", "stylesheet not rendered: {error:#}");
                    return Submission::Failed;
                }
            }
        }
        debug!(target: "style_singleton", "applied stylesheet ({} bytes)", css.len());
        state.css = Some(css.to_owned());
        Submission::Applied
    }

    fn reset(&self) {
        let State { element, .. } = self.state.take();
        if let (Some(window), Some(element)) = (&self.target, element) {
            window.document_mut().remove_node(element);
        }
        trace!(target: "style_singleton", "reset");
    }

    fn applied(&self) -> Option<String> {
        self.state.borrow().css.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headless_sink_still_arbitrates() {
        let sink = StyleSingleton::headless();
        assert_eq!(sink.submit("a{}"), Submission::Applied);
        assert_eq!(sink.submit("b{}"), Submission::Superseded);
        assert_eq!(sink.applied().as_deref(), Some("a{}"));
        assert_eq!(sink.element(), None);
    }

    #[test]
    fn blank_text_does_not_claim_the_sink() {
        let sink = StyleSingleton::headless();
        assert_eq!(sink.submit("  \n "), Submission::Ignored);
        assert_eq!(sink.applied(), None);
        assert_eq!(sink.submit("a{}"), Submission::Applied);
    }
}
