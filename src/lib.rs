//! # Holdfast
//!
//! > *"What you hold, you hold alone, and you let go exactly once."*
//!
//! Two move-only wrapper families for things Rust's ownership model covers
//! but the standard library's smart pointers don't:
//!
//! - [`UniqueResource<K>`](UniqueResource): unique ownership of a
//!   *non-memory* resource value (a file descriptor, a lock token, a slot
//!   index), with the releasing action supplied per resource *kind* and
//!   guaranteed to run exactly once.
//! - [`UniqueError<K>`](UniqueError): an error-code holder that tracks not
//!   just the value but whether anyone has *looked* at it. Dropping an
//!   unobserved error aborts the process: swallowed errors become loud
//!   defects instead of silent ones.
//!
//! Both are parameterized by a zero-sized kind type implementing
//! [`ResourceKind`] or [`ErrorKind`]. The kind supplies the small fixed
//! vocabulary the wrappers need (default sentinel, release action, success
//! predicate, optional capabilities), all resolved statically, with no
//! runtime dispatch and no per-kind wrapper code.
//!
//! ## Quick Example
//!
//! ```rust
//! use holdfast::{ResourceKind, UniqueResource};
//!
//! /// A raw descriptor; -1 means "none".
//! struct Fd;
//!
//! impl ResourceKind for Fd {
//!     type Value = i32;
//!     const NAME: &'static str = "Fd";
//!
//!     fn default_value() -> i32 { -1 }
//!     fn is_default(value: &i32) -> bool { *value < 0 }
//!     fn release(value: i32) {
//!         // close(value) in real code
//!         let _ = value;
//!     }
//! }
//!
//! let fd = UniqueResource::<Fd>::adopt(3);
//! assert!(!fd.is_empty());
//! // dropping `fd` closes descriptor 3, exactly once
//! ```
//!
//! Optional capabilities ([`Indirect`], [`IndexAt`], [`Make`]) unlock
//! `Deref`, indexing, and in-place construction on kinds that implement
//! them; kinds that don't get a compile error at the call site, never a
//! runtime branch.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod error;
pub mod kind;
pub mod resource;
pub mod testing;
pub mod truthy;

// Re-exports
pub use error::{Disposition, Failure, StaticError, UniqueError};
pub use kind::{ErrorKind, IndexAt, Indirect, Make, ResourceKind};
pub use resource::{make, UniqueResource};
pub use truthy::Truthy;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Disposition, Failure, StaticError, UniqueError};
    pub use crate::kind::{ErrorKind, IndexAt, Indirect, Make, ResourceKind};
    pub use crate::resource::{make, UniqueResource};
    pub use crate::truthy::Truthy;
}
