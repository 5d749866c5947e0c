//! Allows writing into values

mod value;
pub use value::*;

mod struct_;
pub use struct_::*;

mod list;
pub use list::*;

mod map;
pub use map::*;

mod pointer;
pub use pointer::*;
