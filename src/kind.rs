//! Kind traits: the customization protocol for wrapper types.
//!
//! Every resource or error category that wants to live inside a
//! [`UniqueResource`](crate::UniqueResource) or
//! [`UniqueError`](crate::UniqueError) is described by a zero-sized *kind*
//! type. The kind never holds data; it exists only to select, at compile
//! time, the handful of operations the wrappers need:
//!
//! - [`ResourceKind`]: the required contract for resources: the value type,
//!   its empty sentinel, and how to release a live value.
//! - [`ErrorKind`]: the required contract for error codes: the value type,
//!   its success value, the success predicate, and optional observer hooks.
//! - [`Indirect`], [`IndexAt`], [`Make`]: optional capabilities. A kind
//!   that implements them unlocks `Deref`, indexing, or in-place
//!   construction on its wrapper; a kind that doesn't simply never has those
//!   operations, and calling them is a missing-bound compile error rather
//!   than anything at runtime.
//!
//! # Defining a resource kind
//!
//! ```
//! use holdfast::{ResourceKind, UniqueResource};
//!
//! /// A slot index into some external table; `usize::MAX` means "no slot".
//! struct TableSlot;
//!
//! impl ResourceKind for TableSlot {
//!     type Value = usize;
//!     const NAME: &'static str = "TableSlot";
//!
//!     fn default_value() -> usize {
//!         usize::MAX
//!     }
//!
//!     fn is_default(value: &usize) -> bool {
//!         *value == usize::MAX
//!     }
//!
//!     fn release(value: usize) {
//!         // return the slot to the table
//!         let _ = value;
//!     }
//! }
//!
//! let slot = UniqueResource::<TableSlot>::adopt(3);
//! assert!(!slot.is_empty());
//! ```
//!
//! # Defining an error kind
//!
//! ```
//! use holdfast::{ErrorKind, UniqueError};
//!
//! /// errno-style status: zero is success.
//! struct Errno;
//!
//! impl ErrorKind for Errno {
//!     type Value = i32;
//!     const NAME: &'static str = "Errno";
//!
//!     fn default_value() -> i32 {
//!         0
//!     }
//!
//!     fn is_ok(value: &i32) -> bool {
//!         *value == 0
//!     }
//! }
//!
//! let mut err = UniqueError::<Errno>::new(2);
//! assert!(!err.ok());
//! ```

use core::fmt;

/// Contract a resource category must satisfy.
///
/// Implementors are zero-sized tag types. The wrapper guarantees that
/// [`release`](ResourceKind::release) is called exactly once for every live
/// value it adopts, on the thread that drops or resets the owning wrapper,
/// and never for the default sentinel.
pub trait ResourceKind {
    /// The owned handle type: a file descriptor, a slot index, a raw socket.
    type Value;

    /// Human-readable kind name, used in `Debug` output and diagnostics.
    const NAME: &'static str;

    /// The "empty" sentinel. A wrapper holding this value is considered
    /// empty and will not trigger [`release`](ResourceKind::release).
    fn default_value() -> Self::Value;

    /// Whether `value` is the empty sentinel.
    fn is_default(value: &Self::Value) -> bool;

    /// Relinquish a live value: close the descriptor, free the slot.
    ///
    /// Called at most once per adopted value. Never called with a value for
    /// which [`is_default`](ResourceKind::is_default) is true.
    fn release(value: Self::Value);
}

/// Contract an error category must satisfy.
///
/// The default value doubles as the success value: a freshly defaulted
/// holder is both "empty" and "ok". The observer hooks fire whenever a
/// non-default value is installed into a holder; the provided
/// implementations do nothing (under the `tracing` feature they emit a
/// debug event).
pub trait ErrorKind {
    /// The raw error-code type.
    type Value: Clone + PartialEq + PartialOrd + fmt::Debug;

    /// Human-readable kind name, used in `Debug` output and the abort
    /// message for unobserved errors.
    const NAME: &'static str;

    /// The success sentinel.
    fn default_value() -> Self::Value;

    /// Whether `value` represents success.
    fn is_ok(value: &Self::Value) -> bool;

    /// Observer hook: a non-default value was installed at construction.
    fn report_initiated(value: &Self::Value) {
        #[cfg(feature = "tracing")]
        tracing::debug!(kind = Self::NAME, value = ?value, "error initiated");
        #[cfg(not(feature = "tracing"))]
        let _ = value;
    }

    /// Observer hook: a non-default value was installed via reset.
    fn report_reset(value: &Self::Value) {
        #[cfg(feature = "tracing")]
        tracing::debug!(kind = Self::NAME, value = ?value, "error reset");
        #[cfg(not(feature = "tracing"))]
        let _ = value;
    }
}

/// Optional capability: the resource value can be dereferenced.
///
/// Implementing this for a kind gives its [`UniqueResource`] `Deref` and
/// `DerefMut` to [`Target`](Indirect::Target). Dereferencing an *empty*
/// wrapper forwards the sentinel value; whether that is meaningful is up to
/// the kind.
///
/// [`UniqueResource`]: crate::UniqueResource
pub trait Indirect: ResourceKind {
    /// What the value dereferences to.
    type Target: ?Sized;

    /// Shared dereference.
    fn indirect(value: &Self::Value) -> &Self::Target;

    /// Exclusive dereference.
    fn indirect_mut(value: &mut Self::Value) -> &mut Self::Target;
}

/// Optional capability: the resource value supports indexed access.
///
/// Implementing this for a kind gives its [`UniqueResource`] `Index<usize>`
/// and `IndexMut<usize>`.
///
/// [`UniqueResource`]: crate::UniqueResource
pub trait IndexAt: ResourceKind {
    /// The element type produced by indexing.
    type Output: ?Sized;

    /// Shared indexed access. May panic on out-of-range indexes, matching
    /// the convention of `std::ops::Index`.
    fn at(value: &Self::Value, index: usize) -> &Self::Output;

    /// Exclusive indexed access.
    fn at_mut(value: &mut Self::Value, index: usize) -> &mut Self::Output;
}

/// Optional capability: the resource can be constructed in place.
///
/// `Args` is a tuple of forwarded constructor arguments: `()`, `(A,)`, or
/// `(A, B)`. A kind may implement `Make` for several arities. The free
/// function [`make`](crate::make) builds a wrapper from these.
///
/// # Example
///
/// ```
/// use holdfast::{make, Make, ResourceKind, UniqueResource};
///
/// struct Buffer;
///
/// impl ResourceKind for Buffer {
///     type Value = Option<Vec<u8>>;
///     const NAME: &'static str = "Buffer";
///     fn default_value() -> Self::Value { None }
///     fn is_default(value: &Self::Value) -> bool { value.is_none() }
///     fn release(value: Self::Value) { drop(value) }
/// }
///
/// impl Make<(usize,)> for Buffer {
///     fn make((len,): (usize,)) -> Self::Value {
///         Some(vec![0; len])
///     }
/// }
///
/// let buf: UniqueResource<Buffer> = make((16,));
/// assert!(!buf.is_empty());
/// ```
pub trait Make<Args>: ResourceKind {
    /// Build a live value from the forwarded arguments.
    fn make(args: Args) -> Self::Value;
}
