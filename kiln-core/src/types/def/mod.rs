use super::*;

mod scalar;
pub use scalar::*;

mod map;
pub use map::*;

mod list;
pub use list::*;

mod pointer;
pub use pointer::*;

mod struct_;
pub use struct_::*;

mod opaque;
pub use opaque::*;

/// The semantic definition of a shape: is it a scalar, a map, a list?
///
/// This is a closed set. Code that switches on it gets an exhaustiveness
/// check from the compiler whenever a variant is added.
#[derive(Clone, Copy, Debug)]
pub enum Def {
    /// Scalar: not composed of other things.
    ///
    /// e.g. `bool`, `i64`, `String`
    Scalar(ScalarDef),

    /// Map from homogeneous keys to homogeneous values, nil until allocated
    Map(MapDef),

    /// List of ordered homogeneous values with a length and a capacity,
    /// nil until allocated
    List(ListDef),

    /// Nullable owning pointer
    Pointer(PointerDef),

    /// Struct with named fields, in declaration order
    Struct(StructDef),

    /// Recognized, but out of reach for any walker
    Opaque(OpaqueDef),
}

impl Def {
    /// Returns the `ScalarDef` wrapped in an `Ok` if this is a [`Def::Scalar`].
    pub fn into_scalar(self) -> Result<ScalarDef, Self> {
        match self {
            Self::Scalar(def) => Ok(def),
            _ => Err(self),
        }
    }
    /// Returns the `MapDef` wrapped in an `Ok` if this is a [`Def::Map`].
    pub fn into_map(self) -> Result<MapDef, Self> {
        match self {
            Self::Map(def) => Ok(def),
            _ => Err(self),
        }
    }
    /// Returns the `ListDef` wrapped in an `Ok` if this is a [`Def::List`].
    pub fn into_list(self) -> Result<ListDef, Self> {
        match self {
            Self::List(def) => Ok(def),
            _ => Err(self),
        }
    }
    /// Returns the `PointerDef` wrapped in an `Ok` if this is a [`Def::Pointer`].
    pub fn into_pointer(self) -> Result<PointerDef, Self> {
        match self {
            Self::Pointer(def) => Ok(def),
            _ => Err(self),
        }
    }
    /// Returns the `StructDef` wrapped in an `Ok` if this is a [`Def::Struct`].
    pub fn into_struct(self) -> Result<StructDef, Self> {
        match self {
            Self::Struct(def) => Ok(def),
            _ => Err(self),
        }
    }
}
