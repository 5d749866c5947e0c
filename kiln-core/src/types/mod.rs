use core::fmt;

mod field;
pub use field::*;

mod def;
pub use def::*;

/// Schema for a type: its name and what it is made of.
///
/// Shapes are meant to live in `static`s. They are never mutated, and a value
/// graph only ever refers to them through `&'static Shape`.
///
/// ```
/// use kiln_core::{shapes, Field, Shape, StructDef};
///
/// static POINT: Shape = Shape::builder("Point")
///     .struct_(
///         StructDef::builder()
///             .fields(&const {
///                 [
///                     Field::builder().name("x").shape(|| &shapes::I64).build(),
///                     Field::builder().name("y").shape(|| &shapes::I64).build(),
///                 ]
///             })
///             .build(),
///     )
///     .build();
///
/// assert_eq!(POINT.to_string(), "Point");
/// ```
#[derive(Clone, Copy, Debug)]
#[non_exhaustive]
pub struct Shape {
    /// Name of the type, unique among the shapes of a program
    pub type_identifier: &'static str,

    /// What the type is made of
    pub def: Def,

    /// Doc comments
    pub doc: &'static [&'static str],
}

impl Shape {
    /// Returns a builder for a shape with the given type identifier
    pub const fn builder(type_identifier: &'static str) -> ShapeBuilder {
        ShapeBuilder::new(type_identifier)
    }

    /// Coarse classification of this shape
    pub fn kind(&self) -> Kind {
        match self.def {
            Def::Scalar(ScalarDef::Bool) => Kind::Bool,
            Def::Scalar(ScalarDef::Integer { signed: true, .. }) => Kind::Int,
            Def::Scalar(ScalarDef::Integer { signed: false, .. }) => Kind::Uint,
            Def::Scalar(ScalarDef::Float { .. }) => Kind::Float,
            Def::Scalar(ScalarDef::Complex { .. }) => Kind::Complex,
            Def::Scalar(ScalarDef::Str) => Kind::String,
            Def::Map(_) => Kind::Map,
            Def::List(_) => Kind::List,
            Def::Pointer(_) => Kind::Pointer,
            Def::Struct(_) => Kind::Struct,
            Def::Opaque(def) => Kind::Unsupported(def.kind),
        }
    }

    /// Returns true if both shapes describe the same type.
    ///
    /// Type identifiers are the identity of a shape, so two statics built for
    /// the same type compare equal.
    pub fn is_shape(&self, other: &Shape) -> bool {
        core::ptr::eq(self, other) || self.type_identifier == other.type_identifier
    }

    /// Returns true for a list of unsigned bytes
    pub fn is_bytes(&self) -> bool {
        match self.def {
            Def::List(list) => matches!(
                list.t().def,
                Def::Scalar(ScalarDef::Integer {
                    signed: false,
                    bits: 8
                })
            ),
            _ => false,
        }
    }

    /// Returns true if this shape is a pointer whose target is a struct
    pub fn is_pointer_to_struct(&self) -> bool {
        match self.def {
            Def::Pointer(ptr) => ptr.target().kind() == Kind::Struct,
            _ => false,
        }
    }
}

impl PartialEq for Shape {
    fn eq(&self, other: &Self) -> bool {
        self.is_shape(other)
    }
}

impl Eq for Shape {}

impl core::hash::Hash for Shape {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.type_identifier.hash(state);
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_identifier)
    }
}

/// Builder for [`Shape`]
pub struct ShapeBuilder {
    type_identifier: &'static str,
    def: Option<Def>,
    doc: &'static [&'static str],
}

impl ShapeBuilder {
    /// Creates a new builder
    pub const fn new(type_identifier: &'static str) -> Self {
        Self {
            type_identifier,
            def: None,
            doc: &[],
        }
    }

    /// Sets the definition
    pub const fn def(mut self, def: Def) -> Self {
        self.def = Some(def);
        self
    }

    /// Makes this a scalar shape
    pub const fn scalar(self, def: ScalarDef) -> Self {
        self.def(Def::Scalar(def))
    }

    /// Makes this a map from `k` to `v`
    pub const fn map(self, k: fn() -> &'static Shape, v: fn() -> &'static Shape) -> Self {
        self.def(Def::Map(MapDef::new(k, v)))
    }

    /// Makes this a list of `t`
    pub const fn list(self, t: fn() -> &'static Shape) -> Self {
        self.def(Def::List(ListDef::new(t)))
    }

    /// Makes this a pointer to `target`
    pub const fn pointer(self, target: fn() -> &'static Shape) -> Self {
        self.def(Def::Pointer(PointerDef::new(target)))
    }

    /// Makes this a struct
    pub const fn struct_(self, def: StructDef) -> Self {
        self.def(Def::Struct(def))
    }

    /// Makes this a shape we know of, but never look into
    pub const fn opaque(self, kind: OpaqueKind) -> Self {
        self.def(Def::Opaque(OpaqueDef { kind }))
    }

    /// Sets the doc comments
    pub const fn doc(mut self, doc: &'static [&'static str]) -> Self {
        self.doc = doc;
        self
    }

    /// Builds the shape
    ///
    /// # Panics
    ///
    /// If no definition was set. In a `static` this is a compile error.
    pub const fn build(self) -> Shape {
        let def = match self.def {
            Some(def) => def,
            None => panic!("a shape needs a definition"),
        };
        Shape {
            type_identifier: self.type_identifier,
            def,
            doc: self.doc,
        }
    }
}

/// Coarse dynamic classification of a value: what the materializer switches on.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Kind {
    /// `bool`
    Bool,
    /// Signed integer of any width
    Int,
    /// Unsigned integer of any width
    Uint,
    /// Floating-point number
    Float,
    /// Complex number
    Complex,
    /// UTF-8 text
    String,
    /// Key/value mapping
    Map,
    /// Growable sequence with a length and a capacity
    List,
    /// Nullable owning pointer
    Pointer,
    /// Named-field aggregate
    Struct,
    /// Known, but never looked into
    Unsupported(OpaqueKind),
}

impl Kind {
    /// Returns true for kinds that have no children
    pub fn is_leaf(self) -> bool {
        matches!(
            self,
            Kind::Bool | Kind::Int | Kind::Uint | Kind::Float | Kind::Complex | Kind::String
        )
    }

    /// Returns true for kinds whose storage can be nil
    pub fn is_nilable(self) -> bool {
        matches!(self, Kind::Map | Kind::List | Kind::Pointer)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Bool => f.write_str("bool"),
            Kind::Int => f.write_str("int"),
            Kind::Uint => f.write_str("uint"),
            Kind::Float => f.write_str("float"),
            Kind::Complex => f.write_str("complex"),
            Kind::String => f.write_str("string"),
            Kind::Map => f.write_str("map"),
            Kind::List => f.write_str("list"),
            Kind::Pointer => f.write_str("pointer"),
            Kind::Struct => f.write_str("struct"),
            Kind::Unsupported(opaque) => write!(f, "unsupported ({opaque:?})"),
        }
    }
}
