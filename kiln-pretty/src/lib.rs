#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![warn(clippy::std_instead_of_alloc)]
#![forbid(unsafe_code)]
//! Pretty-printing for kiln values.
//!
//! ```
//! use kiln_core::{shapes, Shape, Value};
//! use kiln_pretty::PrettyPrinter;
//! use kiln_reflect::Peek;
//!
//! static WORDS: Shape = Shape::builder("Vec<String>").list(|| &shapes::STRING).build();
//!
//! let words = Value::zero(&WORDS);
//! let peek = Peek::new(&words, &WORDS).unwrap();
//! assert_eq!(PrettyPrinter::new().with_colors(false).format(peek), "nil");
//! ```

mod printer;
pub use printer::*;

mod display;
pub use display::*;
