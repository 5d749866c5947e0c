use kiln_core::{Field, FieldError, Shape, StructDef, Value};

use super::Peek;

/// Lets you read from a struct
#[derive(Clone, Copy)]
pub struct PeekStruct<'mem> {
    pub(crate) shape: &'static Shape,

    /// the definition of the struct!
    pub(crate) def: StructDef,

    /// field values, in declaration order
    pub(crate) fields: &'mem [Value],
}

impl core::fmt::Debug for PeekStruct<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PeekStruct").finish_non_exhaustive()
    }
}

impl<'mem> PeekStruct<'mem> {
    /// Returns the struct definition
    #[inline(always)]
    pub fn def(&self) -> &StructDef {
        &self.def
    }

    /// Returns the shape of the struct
    #[inline(always)]
    pub fn shape(&self) -> &'static Shape {
        self.shape
    }

    /// Returns the number of fields in this struct
    #[inline(always)]
    pub fn field_count(&self) -> usize {
        self.def.fields.len()
    }

    /// Returns the value of the field at the given index. Private fields can
    /// be read.
    #[inline(always)]
    pub fn field(&self, index: usize) -> Result<Peek<'mem>, FieldError> {
        let field = self.def.fields.get(index).ok_or(FieldError::IndexOutOfBounds)?;
        let value = self.fields.get(index).ok_or(FieldError::IndexOutOfBounds)?;
        Ok(Peek::unchecked_new(value, field.shape()))
    }

    /// Gets the value of the field with the given name
    #[inline]
    pub fn field_by_name(&self, name: &str) -> Result<Peek<'mem>, FieldError> {
        let index = self.def.field_index(name).ok_or(FieldError::NoSuchField)?;
        self.field(index)
    }

    /// Iterates over all fields in this struct, providing both the field
    /// metadata and its value
    #[inline]
    pub fn fields(&self) -> impl DoubleEndedIterator<Item = (Field, Peek<'mem>)> + use<'mem> {
        let values: &'mem [Value] = self.fields;
        let fields: &'static [Field] = self.def.fields;
        fields
            .iter()
            .zip(values)
            .map(|(field, value)| (*field, Peek::unchecked_new(value, field.shape())))
    }
}
