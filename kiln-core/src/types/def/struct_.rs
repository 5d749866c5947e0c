use super::Field;

/// Common fields for struct-like types
#[derive(Clone, Copy, Debug)]
pub struct StructDef {
    /// the kind of struct (e.g. struct, tuple struct, unit)
    pub kind: StructKind,

    /// all fields, in declaration order
    pub fields: &'static [Field],
}

impl StructDef {
    /// Returns a builder for StructDef
    pub const fn builder() -> StructBuilder {
        StructBuilder::new()
    }

    /// Returns the index of the field with the given name
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
}

/// Builder for StructDef
pub struct StructBuilder {
    kind: StructKind,
    fields: &'static [Field],
}

impl StructBuilder {
    /// Creates a new StructBuilder
    #[allow(clippy::new_without_default)]
    pub const fn new() -> Self {
        Self {
            kind: StructKind::Struct,
            fields: &[],
        }
    }

    /// Sets the kind to Unit and returns self
    pub const fn unit(mut self) -> Self {
        self.kind = StructKind::Unit;
        self
    }

    /// Sets the kind to TupleStruct and returns self
    pub const fn tuple_struct(mut self) -> Self {
        self.kind = StructKind::TupleStruct;
        self
    }

    /// Sets the fields for the StructDef
    pub const fn fields(mut self, fields: &'static [Field]) -> Self {
        self.fields = fields;
        self
    }

    /// Builds the StructDef
    pub const fn build(self) -> StructDef {
        StructDef {
            kind: self.kind,
            fields: self.fields,
        }
    }
}

/// Describes the kind of struct
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum StructKind {
    /// struct UnitStruct;
    Unit,

    /// struct TupleStruct(T0, T1);
    TupleStruct,

    /// struct S { foo: T0, bar: T1 }
    Struct,
}
