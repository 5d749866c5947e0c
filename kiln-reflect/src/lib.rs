#![no_std]
#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![warn(clippy::std_instead_of_alloc)]
#![forbid(unsafe_code)]
//! Read-only [`Peek`] views and writable [`Poke`] handles over kiln values,
//! and the [`Materializer`] that walks a value and fills it in.
//!
//! ```
//! use kiln_core::{shapes, Shape, Value};
//! use kiln_reflect::{Materializer, Poke};
//!
//! static WORDS: Shape = Shape::builder("Vec<String>").list(|| &shapes::STRING).build();
//!
//! let mut words = Value::zero(&WORDS);
//! Materializer::default()
//!     .materialize(Poke::new(&mut words, &WORDS).unwrap())
//!     .unwrap();
//!
//! let Value::List(Some(list)) = &words else { panic!("allocated") };
//! assert_eq!((list.len(), list.cap()), (5, 8));
//! ```

extern crate alloc;

#[cfg(feature = "log")]
#[allow(unused_imports)]
pub(crate) use log::{debug, trace};

#[cfg(not(feature = "log"))]
macro_rules! trace {
    ($($tt:tt)*) => {};
}
#[cfg(not(feature = "log"))]
#[allow(unused_imports)]
pub(crate) use trace;

#[cfg(not(feature = "log"))]
macro_rules! debug {
    ($($tt:tt)*) => {};
}
#[cfg(not(feature = "log"))]
#[allow(unused_imports)]
pub(crate) use debug;

mod error;
pub use error::*;

mod peek;
pub use peek::*;

mod poke;
pub use poke::*;

mod materialize;
pub use materialize::*;

pub mod raw;
