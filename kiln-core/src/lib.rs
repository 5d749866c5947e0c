#![no_std]
#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![warn(clippy::std_instead_of_alloc)]
#![forbid(unsafe_code)]
//! Shapes and dynamic value storage.
//!
//! A [`Shape`] describes a type once, statically. A [`Value`] is a storage slot
//! whose layout follows some shape. Neither knows how to walk the other: that is
//! the job of `kiln-reflect`.

extern crate alloc;

// Type descriptors
mod types;
pub use types::*;

// Builtin primitive shapes
pub mod shapes;

// Storage slots
mod value;
pub use value::*;
