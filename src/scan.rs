//! Resumable scans.
//!
//! Long scans (building the dictionary index, searching for sub-words) are
//! split into batches so a host loop can interleave other work between them.
//! A scan only suspends at batch boundaries and never reorders or skips
//! elements; how often it gets resumed is entirely up to the caller.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Outcome of one call to [`ResumableScan::resume_batch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanStatus {
    /// A batch was processed and more input remains.
    Yielded,
    /// All input has been processed and the completion listener has fired.
    Complete,
    /// The scan observed its cancel token and stopped.
    Cancelled,
}

impl ScanStatus {
    pub fn is_finished(self) -> bool {
        !matches!(self, ScanStatus::Yielded)
    }
}

/// Position snapshot for progress display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanProgress {
    pub current: usize,
    pub total: usize,
}

impl ScanProgress {
    /// Fraction done in `0.0..=1.0`. An empty scan counts as done.
    pub fn fraction(self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.current as f64 / self.total as f64
        }
    }
}

impl fmt::Display for ScanProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.current, self.total)
    }
}

/// Shared flag checked by scans at batch boundaries.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// One-shot completion listener.
///
/// Firing twice is a logic error: it trips a `debug_assert!` in debug
/// builds and is logged and ignored in release builds.
pub struct Completion<T: ?Sized> {
    listener: Option<Box<dyn FnOnce(&T)>>,
    fired: bool,
}

impl<T: ?Sized> Completion<T> {
    pub fn new() -> Self {
        Self {
            listener: None,
            fired: false,
        }
    }

    /// Register the listener, replacing any previous one.
    pub fn set_listener<F>(&mut self, listener: F)
    where
        F: FnOnce(&T) + 'static,
    {
        self.listener = Some(Box::new(listener));
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }

    /// Notify the listener, if any. Only the first call has an effect.
    pub fn fire(&mut self, value: &T) {
        if self.fired {
            debug_assert!(false, "completion fired more than once");
            log::warn!("ignoring duplicate completion signal");
            return;
        }
        self.fired = true;
        if let Some(listener) = self.listener.take() {
            listener(value);
        }
    }
}

impl<T: ?Sized> Default for Completion<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for Completion<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Completion")
            .field("has_listener", &self.listener.is_some())
            .field("fired", &self.fired)
            .finish()
    }
}

/// A scan that does its work `n` elements at a time.
pub trait ResumableScan {
    /// Process up to `n` more elements (at least one, if any remain).
    ///
    /// Once the scan has finished, further calls do no work and keep
    /// returning the final status.
    fn resume_batch(&mut self, n: usize) -> ScanStatus;

    fn progress(&self) -> ScanProgress;

    /// Drive the scan to the end in batches of `n`.
    fn run_to_completion(&mut self, n: usize) -> ScanStatus {
        loop {
            let status = self.resume_batch(n);
            if status.is_finished() {
                return status;
            }
        }
    }
}
