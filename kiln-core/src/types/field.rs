use bitflags::bitflags;

use super::Shape;

/// Describes a field in a struct
#[derive(Clone, Copy, Debug)]
#[non_exhaustive]
pub struct Field {
    /// name of the field (for tuple structs, the 0-based index)
    pub name: &'static str,

    /// shape of the inner type
    pub shape: fn() -> &'static Shape,

    /// flags for the field (e.g. embedded, private, etc.)
    pub flags: FieldFlags,

    /// doc comments
    pub doc: &'static [&'static str],
}

impl Field {
    /// Returns the shape of the inner type
    pub fn shape(&self) -> &'static Shape {
        (self.shape)()
    }

    /// Returns a builder for Field
    pub const fn builder() -> FieldBuilder {
        FieldBuilder::new()
    }

    /// The field is an anonymous member whose own fields are promoted
    pub fn is_embedded(&self) -> bool {
        self.flags.contains(FieldFlags::EMBEDDED)
    }

    /// The field cannot be written through a regular handle
    pub fn is_private(&self) -> bool {
        self.flags.contains(FieldFlags::PRIVATE)
    }

    /// Checks if field is marked as sensitive
    pub fn is_sensitive(&self) -> bool {
        self.flags.contains(FieldFlags::SENSITIVE)
    }
}

/// Builder for Field
pub struct FieldBuilder {
    name: Option<&'static str>,
    shape: Option<fn() -> &'static Shape>,
    flags: FieldFlags,
    doc: &'static [&'static str],
}

impl FieldBuilder {
    /// Creates a new FieldBuilder
    #[allow(clippy::new_without_default)]
    pub const fn new() -> Self {
        Self {
            name: None,
            shape: None,
            flags: FieldFlags::EMPTY,
            doc: &[],
        }
    }

    /// Sets the name for the Field
    pub const fn name(mut self, name: &'static str) -> Self {
        self.name = Some(name);
        self
    }

    /// Sets the shape for the Field
    pub const fn shape(mut self, shape: fn() -> &'static Shape) -> Self {
        self.shape = Some(shape);
        self
    }

    /// Sets the flags for the Field
    pub const fn flags(mut self, flags: FieldFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Marks the field as embedded
    pub const fn embedded(self) -> Self {
        let flags = self.flags.union(FieldFlags::EMBEDDED);
        self.flags(flags)
    }

    /// Marks the field as private
    pub const fn private(self) -> Self {
        let flags = self.flags.union(FieldFlags::PRIVATE);
        self.flags(flags)
    }

    /// Sets the doc comments for the Field
    pub const fn doc(mut self, doc: &'static [&'static str]) -> Self {
        self.doc = doc;
        self
    }

    /// Builds the Field
    pub const fn build(self) -> Field {
        Field {
            name: self.name.expect("a field needs a name"),
            shape: self.shape.expect("a field needs a shape"),
            flags: self.flags,
            doc: self.doc,
        }
    }
}

bitflags! {
    /// Flags that can be applied to fields to modify their behavior
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FieldFlags: u64 {
        /// An empty set of flags
        const EMPTY = 0;

        /// Anonymous member: its fields are promoted to the parent
        const EMBEDDED = 1 << 0;

        /// Unexported member: regular handles may read it, never write it
        const PRIVATE = 1 << 1;

        /// Contains sensitive data that should not be displayed
        const SENSITIVE = 1 << 2;
    }
}

/// Errors encountered when calling `field_by_index` or `field_by_name`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum FieldError {
    /// `field_by_name` was called on a struct, and there is no field
    /// with the given name.
    NoSuchField,

    /// `field` was called with an index past the last field
    IndexOutOfBounds,

    /// Tried to get a writable handle to a private field
    NotExported,

    /// `set` was called with a mismatched type
    TypeMismatch {
        /// the actual type of the field
        expected: &'static Shape,

        /// what someone tried to write into it
        actual: &'static Shape,
    },
}

impl core::error::Error for FieldError {}

impl core::fmt::Display for FieldError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FieldError::NoSuchField => write!(f, "No such field"),
            FieldError::IndexOutOfBounds => write!(f, "Index out of bounds"),
            FieldError::NotExported => write!(f, "Field is not exported"),
            FieldError::TypeMismatch { expected, actual } => {
                write!(f, "Type mismatch: expected {}, got {}", expected, actual)
            }
        }
    }
}
