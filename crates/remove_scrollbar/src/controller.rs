//! Activation lifecycle: measure, synthesize, submit, mark the body.

use std::rc::Rc;

use log::{debug, trace};
use style_singleton::{StyleSink, Submission};

use crate::config::BodyScrollConfig;
use crate::gap::{self, GapMode, GapOffset};
use crate::platform::Platform;
use crate::styles;

/// Entry point shared by every component that wants the page scrollbar gone.
///
/// All locks created from one `RemoveScrollBar` (or from several sharing a sink) submit to the
/// same [`StyleSink`], so only the first lock's stylesheet ever applies.
pub struct RemoveScrollBar<P> {
    platform: P,
    sink: Rc<dyn StyleSink>,
}

impl<P: Platform + Clone> RemoveScrollBar<P> {
    pub fn new(platform: P, sink: Rc<dyn StyleSink>) -> Self {
        Self { platform, sink }
    }

    /// Mount: measure the gap, submit the stylesheet and add the body marker class.
    ///
    /// Everything has happened by the time this returns. The lock is released on
    /// [`ScrollLock::deactivate`] or drop.
    pub fn activate(&self, config: BodyScrollConfig) -> ScrollLock<P> {
        ScrollLock::acquire(self.platform.clone(), Rc::clone(&self.sink), config)
    }

    pub fn sink(&self) -> &Rc<dyn StyleSink> {
        &self.sink
    }
}

/// One active mount.
pub struct ScrollLock<P: Platform> {
    platform: P,
    sink: Rc<dyn StyleSink>,
    config: BodyScrollConfig,
    measured: (GapMode, GapOffset),
    styles: String,
    submission: Submission,
    active: bool,
}

impl<P: Platform> ScrollLock<P> {
    fn acquire(platform: P, sink: Rc<dyn StyleSink>, config: BodyScrollConfig) -> Self {
        let offset = gap::measure(&platform, config.gap_mode);
        let mut lock = Self {
            platform,
            sink,
            measured: (config.gap_mode, offset),
            config,
            styles: String::new(),
            submission: Submission::Ignored,
            active: true,
        };
        lock.restyle();
        if let Some(class) = lock.config.body_class() {
            lock.platform.add_body_class(class);
        }
        debug!(target: "remove_scrollbar", "activated ({:?})", lock.submission);
        lock
    }

    /// Synthesize from the memoized offset and hand the result to the sink.
    fn restyle(&mut self) {
        self.styles = styles::synthesize(
            self.measured.1,
            self.config.allow_relative(),
            self.config.gap_mode,
            self.config.importance(),
            &self.config.body_class_name,
        );
        self.submission = self.sink.submit(&self.styles);
    }

    /// Apply a new configuration.
    ///
    /// An equal configuration is ignored. A different gap mode is measured again; any change
    /// re-synthesizes and re-submits, which only shows if nothing was applied before. A changed
    /// body class moves from the old name to the new one.
    pub fn update(&mut self, config: BodyScrollConfig) {
        if !self.active || config == self.config {
            return;
        }
        if config.gap_mode != self.measured.0 {
            self.measured = (config.gap_mode, gap::measure(&self.platform, config.gap_mode));
        }
        if config.body_class_name != self.config.body_class_name {
            if let Some(class) = self.config.body_class() {
                self.platform.remove_body_class(class);
            }
            if let Some(class) = config.body_class() {
                self.platform.add_body_class(class);
            }
        }
        self.config = config;
        self.restyle();
        trace!(target: "remove_scrollbar", "updated ({:?})", self.submission);
    }

    pub fn config(&self) -> &BodyScrollConfig {
        &self.config
    }

    /// The memoized measurement.
    pub fn gap(&self) -> GapOffset {
        self.measured.1
    }

    /// The stylesheet this lock derived, whether or not it is the one in effect.
    pub fn styles(&self) -> &str {
        &self.styles
    }

    /// Outcome of the latest submission.
    pub fn submission(&self) -> Submission {
        self.submission
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Unmount: remove the body marker class. The stylesheet stays for the page's lifetime.
    ///
    /// Class membership is not counted. When several active locks share one body class, the first
    /// to be released removes it for all of them; give overlapping locks distinct class names.
    pub fn deactivate(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        if let Some(class) = self.config.body_class() {
            self.platform.remove_body_class(class);
        }
        debug!(target: "remove_scrollbar", "deactivated");
    }
}

impl<P: Platform> Drop for ScrollLock<P> {
    fn drop(&mut self) {
        self.release();
    }
}
