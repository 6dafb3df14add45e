//! Move-only ownership of non-memory resources
//!
//! [`UniqueResource`] is to handles what `Box` is to heap memory: it owns
//! exactly one value of a kind-defined type and guarantees the kind's
//! [`release`](ResourceKind::release) runs exactly once, when the owner is
//! dropped or reset. Unlike `Box`, the owned value is not a pointer: it can
//! be a file descriptor, a lock token, a slot index, anything with a
//! designated "empty" sentinel.
//!
//! Ownership moves and never copies; the compiler enforces this because the
//! wrapper is not `Clone`.
//!
//! # Examples
//!
//! ```
//! use holdfast::testing::{CountedRes, ReleaseProbe};
//! use holdfast::UniqueResource;
//!
//! let probe = ReleaseProbe::new();
//! {
//!     let owner = UniqueResource::<CountedRes>::adopt(probe.handle());
//!     assert!(!owner.is_empty());
//! } // dropped here: release runs once
//! assert_eq!(probe.releases(), 1);
//! ```

use core::fmt;
use core::mem;
use core::ops::{Deref, DerefMut, Index, IndexMut};

use crate::kind::{IndexAt, Indirect, Make, ResourceKind};
use crate::truthy::Truthy;

/// Sole owner of one resource value of kind `K`.
///
/// The wrapper is always in one of two states: *empty* (holding the kind's
/// default sentinel) or *live* (holding an adopted value). A live value is
/// released exactly once, even across arbitrary move chains, and never on a
/// moved-from owner, since moved-from owners no longer exist in Rust.
///
/// # Examples
///
/// ```
/// use holdfast::testing::{CountedRes, ReleaseProbe};
/// use holdfast::UniqueResource;
///
/// let probe = ReleaseProbe::new();
/// let mut owner = UniqueResource::<CountedRes>::adopt(probe.handle());
///
/// // Taking the value back out disclaims ownership: no release happens.
/// let raw = owner.release();
/// assert!(owner.is_empty());
/// drop(owner);
/// assert_eq!(probe.releases(), 0);
/// # drop(raw);
/// ```
pub struct UniqueResource<K: ResourceKind> {
    value: K::Value,
}

impl<K: ResourceKind> UniqueResource<K> {
    /// Create an empty owner holding the kind's default sentinel.
    pub fn new() -> Self {
        UniqueResource {
            value: K::default_value(),
        }
    }

    /// Take ownership of `value`.
    ///
    /// Adopting the default sentinel produces an empty owner; no release
    /// will fire for it.
    pub fn adopt(value: K::Value) -> Self {
        UniqueResource { value }
    }

    /// Whether the owner currently holds the default sentinel.
    pub fn is_empty(&self) -> bool {
        K::is_default(&self.value)
    }

    /// Peek at the held value without affecting ownership.
    pub fn get(&self) -> &K::Value {
        &self.value
    }

    /// Exclusive access to the held value without affecting ownership.
    pub fn get_mut(&mut self) -> &mut K::Value {
        &mut self.value
    }

    /// Release the current value (if live) and become empty.
    pub fn reset(&mut self) {
        self.reset_to(K::default_value());
    }

    /// Release the current value (if live) and adopt `value` in its place.
    pub fn reset_to(&mut self, value: K::Value) {
        let old = mem::replace(&mut self.value, value);
        if !K::is_default(&old) {
            K::release(old);
        }
    }

    /// Give up ownership: return the held value and become empty.
    ///
    /// The kind's `release` is *not* invoked, now or later, for the
    /// returned value; the caller owns it.
    pub fn release(&mut self) -> K::Value {
        mem::replace(&mut self.value, K::default_value())
    }

    /// Exchange held values with `other`. No release fires on either side.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.value, &mut other.value);
    }
}

/// Construct a resource in place from forwarded arguments.
///
/// Requires the kind to implement [`Make`] for the argument tuple; kinds
/// without a `Make` impl cannot be built this way, and attempting it is a
/// compile error.
///
/// # Examples
///
/// See [`Make`] for a complete example.
pub fn make<K, Args>(args: Args) -> UniqueResource<K>
where
    K: Make<Args>,
{
    UniqueResource::adopt(K::make(args))
}

impl<K: ResourceKind> Default for UniqueResource<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: ResourceKind> Drop for UniqueResource<K> {
    fn drop(&mut self) {
        let value = mem::replace(&mut self.value, K::default_value());
        if !K::is_default(&value) {
            K::release(value);
        }
    }
}

impl<K: ResourceKind> fmt::Debug for UniqueResource<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UniqueResource")
            .field("kind", &K::NAME)
            .field("live", &!self.is_empty())
            .finish()
    }
}

impl<K: ResourceKind> Truthy for UniqueResource<K> {
    fn truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl<K: Indirect> Deref for UniqueResource<K> {
    type Target = K::Target;

    fn deref(&self) -> &Self::Target {
        K::indirect(&self.value)
    }
}

impl<K: Indirect> DerefMut for UniqueResource<K> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        K::indirect_mut(&mut self.value)
    }
}

impl<K: IndexAt> Index<usize> for UniqueResource<K> {
    type Output = K::Output;

    fn index(&self, index: usize) -> &Self::Output {
        K::at(&self.value, index)
    }
}

impl<K: IndexAt> IndexMut<usize> for UniqueResource<K> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        K::at_mut(&mut self.value, index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{CountedRes, ReleaseProbe};

    // A kind over an owned buffer, exercising every optional capability.
    struct Buf;

    impl ResourceKind for Buf {
        type Value = Option<Vec<u8>>;
        const NAME: &'static str = "Buf";
        fn default_value() -> Self::Value {
            None
        }
        fn is_default(value: &Self::Value) -> bool {
            value.is_none()
        }
        fn release(value: Self::Value) {
            drop(value);
        }
    }

    impl Indirect for Buf {
        type Target = Vec<u8>;
        fn indirect(value: &Self::Value) -> &Vec<u8> {
            value.as_ref().expect("deref through empty Buf")
        }
        fn indirect_mut(value: &mut Self::Value) -> &mut Vec<u8> {
            value.as_mut().expect("deref through empty Buf")
        }
    }

    impl IndexAt for Buf {
        type Output = u8;
        fn at(value: &Self::Value, index: usize) -> &u8 {
            &value.as_ref().expect("index into empty Buf")[index]
        }
        fn at_mut(value: &mut Self::Value, index: usize) -> &mut u8 {
            &mut value.as_mut().expect("index into empty Buf")[index]
        }
    }

    impl Make<()> for Buf {
        fn make(_: ()) -> Self::Value {
            Some(Vec::new())
        }
    }

    impl Make<(usize,)> for Buf {
        fn make((len,): (usize,)) -> Self::Value {
            Some(vec![0; len])
        }
    }

    impl Make<(usize, u8)> for Buf {
        fn make((len, fill): (usize, u8)) -> Self::Value {
            Some(vec![fill; len])
        }
    }

    #[test]
    fn new_is_empty_and_releases_nothing() {
        let probe = ReleaseProbe::new();
        {
            let owner = UniqueResource::<CountedRes>::new();
            assert!(owner.is_empty());
            assert!(owner.falsy());
        }
        assert_eq!(probe.releases(), 0);
    }

    #[test]
    fn drop_releases_exactly_once() {
        let probe = ReleaseProbe::new();
        {
            let owner = UniqueResource::<CountedRes>::adopt(probe.handle());
            assert!(owner.truthy());
        }
        assert_eq!(probe.releases(), 1);
    }

    #[test]
    fn move_transfers_ownership() {
        let probe = ReleaseProbe::new();
        {
            let first = UniqueResource::<CountedRes>::adopt(probe.handle());
            let second = first;
            assert!(!second.is_empty());
        }
        // One live value, one release, regardless of how many times it moved.
        assert_eq!(probe.releases(), 1);
    }

    #[test]
    fn release_disclaims_ownership() {
        let probe = ReleaseProbe::new();
        let raw = {
            let mut owner = UniqueResource::<CountedRes>::adopt(probe.handle());
            let raw = owner.release();
            assert!(owner.is_empty());
            raw
        };
        assert_eq!(probe.releases(), 0);
        drop(raw);
    }

    #[test]
    fn reset_releases_current_value() {
        let probe = ReleaseProbe::new();
        let mut owner = UniqueResource::<CountedRes>::adopt(probe.handle());
        owner.reset();
        assert!(owner.is_empty());
        assert_eq!(probe.releases(), 1);
        // Resetting an empty owner is a no-op.
        owner.reset();
        assert_eq!(probe.releases(), 1);
    }

    #[test]
    fn reset_to_releases_then_adopts() {
        let probe = ReleaseProbe::new();
        let mut owner = UniqueResource::<CountedRes>::adopt(probe.handle());
        owner.reset_to(probe.handle());
        assert_eq!(probe.releases(), 1);
        assert!(!owner.is_empty());
        drop(owner);
        assert_eq!(probe.releases(), 2);
    }

    #[test]
    fn swap_exchanges_without_release() {
        let probe = ReleaseProbe::new();
        let mut live = UniqueResource::<CountedRes>::adopt(probe.handle());
        let mut empty = UniqueResource::<CountedRes>::new();
        live.swap(&mut empty);
        assert!(live.is_empty());
        assert!(!empty.is_empty());
        assert_eq!(probe.releases(), 0);
        drop(live);
        drop(empty);
        assert_eq!(probe.releases(), 1);
    }

    #[test]
    fn get_peeks_without_ownership_change() {
        let mut owner = make::<Buf, _>((4,));
        assert_eq!(owner.get().as_ref().map(Vec::len), Some(4));
        owner.get_mut().as_mut().unwrap().push(9);
        assert_eq!(owner.get().as_ref().map(Vec::len), Some(5));
    }

    #[test]
    fn deref_forwards_to_kind_indirect() {
        let owner = make::<Buf, _>((3, 7u8));
        assert_eq!(owner.len(), 3);
        assert_eq!(*owner, vec![7, 7, 7]);
    }

    #[test]
    fn deref_mut_forwards_to_kind_indirect_mut() {
        let mut owner = make::<Buf, _>(());
        owner.push(1);
        owner.push(2);
        assert_eq!(*owner, vec![1, 2]);
    }

    #[test]
    fn index_forwards_to_kind_at() {
        let mut owner = make::<Buf, _>((2, 5u8));
        assert_eq!(owner[0], 5);
        owner[1] = 6;
        assert_eq!(owner[1], 6);
    }

    #[test]
    fn make_supports_zero_one_and_two_arguments() {
        let empty = make::<Buf, _>(());
        let sized = make::<Buf, _>((8,));
        let filled = make::<Buf, _>((2, 3u8));
        assert_eq!(empty.len(), 0);
        assert_eq!(sized.len(), 8);
        assert_eq!(*filled, vec![3, 3]);
    }

    #[test]
    fn adopting_the_sentinel_is_empty() {
        let probe = ReleaseProbe::new();
        let owner = UniqueResource::<CountedRes>::adopt(CountedRes::default_value());
        assert!(owner.is_empty());
        drop(owner);
        assert_eq!(probe.releases(), 0);
    }

    #[test]
    fn debug_names_the_kind() {
        let owner = UniqueResource::<Buf>::new();
        let shown = format!("{:?}", owner);
        assert!(shown.contains("Buf"));
        assert!(shown.contains("live: false"));
    }
}
