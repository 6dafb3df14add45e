//! Boolean-context queries without boolean conversion
//!
//! Wrapper types in this crate answer the question "is there something here?"
//! through the [`Truthy`] trait instead of converting to their underlying
//! value. This keeps a handle wrapper from being mistaken for the handle
//! itself while still reading naturally at branch points.
//!
//! # Examples
//!
//! ```
//! use holdfast::Truthy;
//!
//! assert!(true.truthy());
//! assert!(Some(7).truthy());
//! assert!(None::<i32>.falsy());
//! ```

/// A type that can be queried in boolean context.
///
/// Implementations must be read-only: asking the question never changes the
/// answer. For [`UniqueError`](crate::UniqueError) in particular, `truthy`
/// deliberately does *not* count as observing the error; use
/// [`ok`](crate::UniqueError::ok) for that.
pub trait Truthy {
    /// Returns `true` if the value is "live", "present", or "successful" in
    /// its own terms.
    fn truthy(&self) -> bool;

    /// The negation of [`truthy`](Truthy::truthy).
    fn falsy(&self) -> bool {
        !self.truthy()
    }
}

impl Truthy for bool {
    fn truthy(&self) -> bool {
        *self
    }
}

impl<T> Truthy for Option<T> {
    fn truthy(&self) -> bool {
        self.is_some()
    }
}
