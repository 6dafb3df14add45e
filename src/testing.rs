//! Probe kinds and helpers for testing code against the kind protocol
//!
//! Nothing here is a production resource or error kind. These types exist so
//! tests (and doctests) can observe what the wrappers do: count release
//! calls, record observer-hook invocations, and stand in for a plain
//! errno-style status code.
//!
//! # Examples
//!
//! ```
//! use holdfast::testing::{CountedRes, ReleaseProbe};
//! use holdfast::UniqueResource;
//!
//! let probe = ReleaseProbe::new();
//! drop(UniqueResource::<CountedRes>::adopt(probe.handle()));
//! assert_eq!(probe.releases(), 1);
//! ```

use std::cell::RefCell;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::kind::{ErrorKind, ResourceKind};

/// Counts how many times [`CountedRes`] releases one of its handles.
///
/// Each handle produced by [`handle`](ReleaseProbe::handle) shares the
/// probe's counter; releasing any of them increments it.
#[derive(Debug, Clone)]
pub struct ReleaseProbe {
    count: Arc<AtomicUsize>,
}

impl ReleaseProbe {
    /// A fresh probe with a zero release count.
    pub fn new() -> Self {
        ReleaseProbe {
            count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A live handle tied to this probe's counter.
    pub fn handle(&self) -> Option<Arc<AtomicUsize>> {
        Some(Arc::clone(&self.count))
    }

    /// How many handles have been released so far.
    pub fn releases(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl Default for ReleaseProbe {
    fn default() -> Self {
        Self::new()
    }
}

/// Resource kind whose release increments a shared counter.
///
/// The value type is `Option<Arc<AtomicUsize>>`: `None` is the empty
/// sentinel, `Some(counter)` a live handle from a [`ReleaseProbe`].
#[derive(Debug)]
pub struct CountedRes;

impl ResourceKind for CountedRes {
    type Value = Option<Arc<AtomicUsize>>;
    const NAME: &'static str = "CountedRes";

    fn default_value() -> Self::Value {
        None
    }

    fn is_default(value: &Self::Value) -> bool {
        value.is_none()
    }

    fn release(value: Self::Value) {
        if let Some(count) = value {
            count.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Plain errno-style error kind: `i32` codes, zero is success. No hooks.
#[derive(Debug)]
pub struct Status;

impl ErrorKind for Status {
    type Value = i32;
    const NAME: &'static str = "Status";

    fn default_value() -> i32 {
        0
    }

    fn is_ok(value: &i32) -> bool {
        *value == 0
    }
}

/// One recorded observer-hook invocation from [`Recorded`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Report {
    /// `report_initiated` fired with this value.
    Initiated(i32),
    /// `report_reset` fired with this value.
    Reset(i32),
}

thread_local! {
    static REPORTS: RefCell<Vec<Report>> = const { RefCell::new(Vec::new()) };
}

/// Take all hook invocations recorded on the current thread, oldest first.
///
/// The record is thread-local, so tests running in parallel do not see each
/// other's reports. Call once at the start of a test to clear leftovers.
pub fn drain_reports() -> Vec<Report> {
    REPORTS.with(|reports| std::mem::take(&mut *reports.borrow_mut()))
}

/// Error kind that records its observer-hook invocations.
///
/// Like [`Status`] but every `report_initiated`/`report_reset` call is
/// appended to a thread-local record readable via [`drain_reports`].
#[derive(Debug)]
pub struct Recorded;

impl ErrorKind for Recorded {
    type Value = i32;
    const NAME: &'static str = "Recorded";

    fn default_value() -> i32 {
        0
    }

    fn is_ok(value: &i32) -> bool {
        *value == 0
    }

    fn report_initiated(value: &i32) {
        REPORTS.with(|reports| reports.borrow_mut().push(Report::Initiated(*value)));
    }

    fn report_reset(value: &i32) {
        REPORTS.with(|reports| reports.borrow_mut().push(Report::Reset(*value)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_counts_shared_handles() {
        let probe = ReleaseProbe::new();
        CountedRes::release(probe.handle());
        CountedRes::release(probe.handle());
        assert_eq!(probe.releases(), 2);
    }

    #[test]
    fn status_success_is_zero() {
        assert!(Status::is_ok(&0));
        assert!(!Status::is_ok(&-1));
        assert_eq!(Status::default_value(), 0);
    }

    #[test]
    fn recorded_hooks_accumulate_in_order() {
        drain_reports();
        Recorded::report_initiated(&1);
        Recorded::report_reset(&2);
        assert_eq!(drain_reports(), vec![Report::Initiated(1), Report::Reset(2)]);
        assert!(drain_reports().is_empty());
    }
}
