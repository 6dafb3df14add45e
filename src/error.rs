//! Error codes that must be observed before they die
//!
//! [`UniqueError`] pairs a kind-defined error value with a *disposition*: a
//! bookkeeping state recording whether the current value has been checked,
//! suppressed, or neither. An error value that reaches the end of its life
//! while still unobserved is a defect in the calling code: the holder
//! aborts the process rather than let the error vanish silently.
//!
//! The only ways to end a non-default error's life without aborting:
//!
//! - [`ok`](UniqueError::ok): observe it (was it success?)
//! - [`suppress`](UniqueError::suppress): explicitly opt out
//! - [`release`](UniqueError::release): take the raw value back
//! - [`take`](UniqueError::take): transfer it to a new holder
//! - [`ensure`](UniqueError::ensure): convert it to a typed [`Failure`]
//!
//! [`StaticError`] is the escape hatch for carrying raw values between
//! scopes: an immutable snapshot with no enforcement attached, absorbed
//! into a live holder when it matters again.
//!
//! # Examples
//!
//! ```
//! use holdfast::testing::Status;
//! use holdfast::UniqueError;
//!
//! fn open_device() -> UniqueError<Status> {
//!     UniqueError::new(-3) // something went wrong
//! }
//!
//! let mut err = open_device();
//! if !err.ok() {
//!     // handle it; having asked, the holder may now be dropped
//! }
//! ```

use core::fmt;
use core::mem;
use std::error::Error as StdError;

use crate::kind::ErrorKind;
use crate::truthy::Truthy;

/// Bookkeeping state for a held error value.
///
/// `Initiated` and `Unchecked` are the *armed* states: dropping or resetting
/// a holder in either of them aborts the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Disposition {
    /// Holding the kind's default (success) value; never enforced.
    Defaulted,
    /// A freshly produced non-default error, not yet observed.
    Initiated,
    /// `ok` (or `ensure`) has been asked; enforcement satisfied.
    Checked,
    /// Enforcement explicitly opted out of.
    Suppressed,
    /// Installed via reset or transfer, pending the next check.
    Unchecked,
}

impl Disposition {
    fn armed(self) -> bool {
        matches!(self, Disposition::Initiated | Disposition::Unchecked)
    }
}

/// An immutable raw-value snapshot of an error.
///
/// Snapshots carry no disposition and are never enforced; they exist to move
/// error values across scopes and thread boundaries cheaply. Absorb one into
/// a [`UniqueError`] (via `From`) to re-enter the enforcement regime.
///
/// # Examples
///
/// ```
/// use holdfast::testing::Status;
/// use holdfast::{StaticError, UniqueError};
///
/// let parked = StaticError::<Status>::new(-7);
/// let mut live = UniqueError::from(parked);
/// assert!(!live.ok());
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(
        serialize = "K::Value: serde::Serialize",
        deserialize = "K::Value: serde::Deserialize<'de>"
    ))
)]
pub struct StaticError<K: ErrorKind> {
    value: K::Value,
}

impl<K: ErrorKind> StaticError<K> {
    /// Snapshot a raw value.
    pub fn new(value: K::Value) -> Self {
        StaticError { value }
    }

    /// The raw value.
    pub fn get(&self) -> &K::Value {
        &self.value
    }

    /// Unwrap the raw value.
    pub fn into_inner(self) -> K::Value {
        self.value
    }
}

impl<K: ErrorKind> Clone for StaticError<K> {
    fn clone(&self) -> Self {
        StaticError {
            value: self.value.clone(),
        }
    }
}

impl<K: ErrorKind> Copy for StaticError<K> where K::Value: Copy {}

impl<K: ErrorKind> fmt::Debug for StaticError<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticError")
            .field("kind", &K::NAME)
            .field("value", &self.value)
            .finish()
    }
}

/// A typed failure produced by [`UniqueError::ensure`].
///
/// Carries the raw error value of the originating kind, so callers can match
/// on the exact kind in their error types, plus an optional human-readable
/// message.
pub struct Failure<K: ErrorKind> {
    value: K::Value,
    message: Option<String>,
}

impl<K: ErrorKind> Failure<K> {
    /// Build a failure from a raw value with no message.
    pub fn new(value: K::Value) -> Self {
        Failure {
            value,
            message: None,
        }
    }

    /// Attach a message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// The raw error value.
    pub fn value(&self) -> &K::Value {
        &self.value
    }

    /// The attached message, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl<K: ErrorKind> Clone for Failure<K> {
    fn clone(&self) -> Self {
        Failure {
            value: self.value.clone(),
            message: self.message.clone(),
        }
    }
}

impl<K: ErrorKind> PartialEq for Failure<K> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && self.message == other.message
    }
}

impl<K: ErrorKind> fmt::Debug for Failure<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Failure")
            .field("kind", &K::NAME)
            .field("value", &self.value)
            .field("message", &self.message)
            .finish()
    }
}

impl<K: ErrorKind> fmt::Display for Failure<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} error {:?}", K::NAME, self.value)?;
        if let Some(message) = &self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl<K: ErrorKind> StdError for Failure<K> {}

/// Holder of one error value with unchecked-error enforcement.
///
/// Construction from a non-default value arms the holder; the value must be
/// checked, suppressed, released, or transferred before the holder dies, or
/// the process aborts. Default-valued holders are never enforced.
///
/// Checking takes `&mut self`: disposition is ordinary state, not interior
/// mutability. Use [`try_ok`](UniqueError::try_ok) for a read-only peek
/// that deliberately does not count as checking.
///
/// # Examples
///
/// ```
/// use holdfast::testing::Status;
/// use holdfast::UniqueError;
///
/// let mut err = UniqueError::<Status>::new(-2);
/// match err.ensure("opening control socket") {
///     Ok(()) => unreachable!(),
///     Err(failure) => assert_eq!(*failure.value(), -2),
/// }
/// ```
pub struct UniqueError<K: ErrorKind> {
    value: K::Value,
    disposition: Disposition,
}

impl<K: ErrorKind> UniqueError<K> {
    /// Hold `raw`. Non-default values arm enforcement and fire the kind's
    /// `report_initiated` hook.
    pub fn new(raw: K::Value) -> Self {
        let disposition = if raw == K::default_value() {
            Disposition::Defaulted
        } else {
            K::report_initiated(&raw);
            Disposition::Initiated
        };
        UniqueError {
            value: raw,
            disposition,
        }
    }

    /// The raw value, without observing it.
    pub fn get(&self) -> &K::Value {
        &self.value
    }

    /// Current bookkeeping state.
    pub fn disposition(&self) -> Disposition {
        self.disposition
    }

    /// An unenforced snapshot of the current value.
    pub fn snapshot(&self) -> StaticError<K> {
        StaticError::new(self.value.clone())
    }

    /// Observe the value: marks the holder checked and returns whether the
    /// value represents success. Idempotent; also valid after `suppress`
    /// (and does not re-arm).
    pub fn ok(&mut self) -> bool {
        self.disposition = Disposition::Checked;
        K::is_ok(&self.value)
    }

    /// Peek at success without observing. Does not satisfy enforcement.
    pub fn try_ok(&self) -> bool {
        K::is_ok(&self.value)
    }

    /// Opt out of enforcement for the current value.
    pub fn suppress(&mut self) -> &mut Self {
        self.disposition = Disposition::Suppressed;
        self
    }

    /// Discard the current value and return to the default state.
    ///
    /// Aborts the process if the holder is still armed. A reset over an
    /// unobserved error is exactly the defect this type exists to catch.
    pub fn reset(&mut self) {
        if self.disposition.armed() {
            abort_unobserved::<K>(&self.value, "reset over");
        }
        self.value = K::default_value();
        self.disposition = Disposition::Defaulted;
    }

    /// Install a new value, arming enforcement for it.
    ///
    /// Aborts the process if the holder is still armed. Installing a
    /// non-default value fires the kind's `report_reset` hook and leaves
    /// the holder pending the next check; installing the default leaves it
    /// unenforced.
    pub fn reset_to(&mut self, raw: K::Value) -> &mut Self {
        if self.disposition.armed() {
            abort_unobserved::<K>(&self.value, "reset over");
        }
        self.value = raw;
        if self.value == K::default_value() {
            self.disposition = Disposition::Defaulted;
        } else {
            K::report_reset(&self.value);
            self.disposition = Disposition::Unchecked;
        }
        self
    }

    /// Take the raw value out, disarming the holder. Never aborts.
    pub fn release(&mut self) -> K::Value {
        self.disposition = Disposition::Defaulted;
        mem::replace(&mut self.value, K::default_value())
    }

    /// Transfer the value to a fresh holder.
    ///
    /// The source is left defaulted and disarmed; the destination is armed
    /// exactly when the transferred value is non-default, and must be
    /// independently checked or suppressed. No observer hooks fire; the
    /// error was already reported when it was produced.
    pub fn take(&mut self) -> Self {
        let value = self.release();
        let disposition = if value == K::default_value() {
            Disposition::Defaulted
        } else {
            Disposition::Unchecked
        };
        UniqueError { value, disposition }
    }

    /// Observe the value and convert failure into a typed [`Failure`].
    ///
    /// Returns `Ok(())` exactly when the kind's success predicate holds;
    /// otherwise the failure carries the held raw value and `message`.
    /// Either way the holder counts as checked.
    pub fn ensure(&mut self, message: impl Into<String>) -> Result<(), Failure<K>> {
        if self.ok() {
            Ok(())
        } else {
            Err(Failure::new(self.value.clone()).with_message(message))
        }
    }

    /// Exchange value and disposition with `other`.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.value, &mut other.value);
        mem::swap(&mut self.disposition, &mut other.disposition);
    }
}

impl<K: ErrorKind> Default for UniqueError<K> {
    fn default() -> Self {
        UniqueError {
            value: K::default_value(),
            disposition: Disposition::Defaulted,
        }
    }
}

impl<K: ErrorKind> From<StaticError<K>> for UniqueError<K> {
    fn from(snapshot: StaticError<K>) -> Self {
        UniqueError::new(snapshot.into_inner())
    }
}

/// Clones never inherit observation: a clone of an armed *or observed*
/// non-default holder starts armed and must be independently checked or
/// suppressed.
impl<K: ErrorKind> Clone for UniqueError<K> {
    fn clone(&self) -> Self {
        let value = self.value.clone();
        let disposition = if value == K::default_value() {
            Disposition::Defaulted
        } else {
            Disposition::Unchecked
        };
        UniqueError { value, disposition }
    }
}

impl<K: ErrorKind> Drop for UniqueError<K> {
    fn drop(&mut self) {
        if self.disposition.armed() {
            abort_unobserved::<K>(&self.value, "dropped");
        }
    }
}

impl<K: ErrorKind> fmt::Debug for UniqueError<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UniqueError")
            .field("kind", &K::NAME)
            .field("value", &self.value)
            .field("disposition", &self.disposition)
            .finish()
    }
}

/// Truthiness is `try_ok`: reading it in boolean context does not count as
/// checking.
impl<K: ErrorKind> Truthy for UniqueError<K> {
    fn truthy(&self) -> bool {
        self.try_ok()
    }
}

// Comparisons look at raw values only; disposition never participates.

impl<K: ErrorKind> PartialEq for UniqueError<K> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<K: ErrorKind> PartialOrd for UniqueError<K> {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        self.value.partial_cmp(&other.value)
    }
}

impl<K: ErrorKind> PartialEq<StaticError<K>> for UniqueError<K> {
    fn eq(&self, other: &StaticError<K>) -> bool {
        self.value == other.value
    }
}

impl<K: ErrorKind> PartialOrd<StaticError<K>> for UniqueError<K> {
    fn partial_cmp(&self, other: &StaticError<K>) -> Option<core::cmp::Ordering> {
        self.value.partial_cmp(&other.value)
    }
}

impl<K: ErrorKind> PartialEq<UniqueError<K>> for StaticError<K> {
    fn eq(&self, other: &UniqueError<K>) -> bool {
        self.value == other.value
    }
}

impl<K: ErrorKind> PartialOrd<UniqueError<K>> for StaticError<K> {
    fn partial_cmp(&self, other: &UniqueError<K>) -> Option<core::cmp::Ordering> {
        self.value.partial_cmp(&other.value)
    }
}

/// A swallowed error is unrecoverable by design: terminate, loudly.
///
/// The message goes straight to stderr; a tracing subscriber cannot be
/// assumed to flush before `abort`.
fn abort_unobserved<K: ErrorKind>(value: &K::Value, action: &str) -> ! {
    #[cfg(feature = "tracing")]
    tracing::error!(
        kind = K::NAME,
        value = ?value,
        action,
        "error value was never checked, suppressed, or released"
    );
    eprintln!(
        "holdfast: {} error {:?} {} while unobserved; aborting",
        K::NAME,
        value,
        action
    );
    std::process::abort();
}
