/// A shape we can name, but never look into
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct OpaqueDef {
    /// What kind of thing it is
    pub kind: OpaqueKind,
}

/// The kinds of [`OpaqueDef`]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum OpaqueKind {
    /// Fixed-size array
    Array,
    /// Channel
    Chan,
    /// Function
    Func,
    /// Dynamic interface value
    Interface,
    /// Untyped raw pointer
    UnsafePointer,
    /// Integer wide enough to hold a raw pointer
    Uintptr,
    /// No type at all
    Invalid,
}
