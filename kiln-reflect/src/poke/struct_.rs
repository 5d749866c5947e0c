use kiln_core::{Field, FieldError, Shape, StructDef, Value};

use crate::{Peek, PeekStruct, ReflectError};

use super::Poke;

/// Lets you write into the fields of a struct.
///
/// Fields flagged private can be read through [`PokeStruct::peek_field`] but
/// not handed out for writing: that takes [`crate::raw`].
pub struct PokeStruct<'mem> {
    pub(crate) shape: &'static Shape,
    pub(crate) def: StructDef,
    pub(crate) fields: &'mem mut [Value],
}

impl core::fmt::Debug for PokeStruct<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PokeStruct")
            .field("shape", &self.shape.type_identifier)
            .finish_non_exhaustive()
    }
}

impl<'mem> PokeStruct<'mem> {
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

    /// Returns the metadata of the field at `index`
    pub fn field_meta(&self, index: usize) -> Result<Field, FieldError> {
        self.def
            .fields
            .get(index)
            .copied()
            .ok_or(FieldError::IndexOutOfBounds)
    }

    /// Borrows this struct as a read-only view
    pub fn as_peek(&self) -> PeekStruct<'_> {
        PeekStruct {
            shape: self.shape,
            def: self.def,
            fields: &*self.fields,
        }
    }

    /// Reads the field at `index`, private or not
    pub fn peek_field(&self, index: usize) -> Result<Peek<'_>, FieldError> {
        let field = self.field_meta(index)?;
        let value = self.fields.get(index).ok_or(FieldError::IndexOutOfBounds)?;
        Ok(Peek::unchecked_new(value, field.shape()))
    }

    /// Returns a writable handle on the field at `index`
    pub fn field(&mut self, index: usize) -> Result<Poke<'_>, FieldError> {
        let field = self.field_meta(index)?;
        if field.is_private() {
            return Err(FieldError::NotExported);
        }
        let value = self
            .fields
            .get_mut(index)
            .ok_or(FieldError::IndexOutOfBounds)?;
        Ok(Poke::unchecked_new(value, field.shape()))
    }

    /// Returns a writable handle on the field called `name`
    pub fn field_by_name(&mut self, name: &str) -> Result<Poke<'_>, FieldError> {
        let index = self.def.field_index(name).ok_or(FieldError::NoSuchField)?;
        self.field(index)
    }

    /// Turns this handle into a writable handle on the field at `index`
    pub fn into_field(self, index: usize) -> Result<Poke<'mem>, FieldError> {
        if self.field_meta(index)?.is_private() {
            return Err(FieldError::NotExported);
        }
        self.into_field_ignoring_visibility(index)
    }

    /// Replaces the value of the field at `index`
    pub fn set_field(&mut self, index: usize, value: Value) -> Result<(), ReflectError> {
        let shape = self.shape;
        self.field(index)
            .map_err(|field_error| ReflectError::FieldError { shape, field_error })?
            .set(value)
    }

    /// Iterates over the fields, giving writable handles on the exported ones
    pub fn fields_mut(&mut self) -> impl Iterator<Item = (Field, Option<Poke<'_>>)> {
        self.def
            .fields
            .iter()
            .zip(self.fields.iter_mut())
            .map(|(field, value)| {
                if field.is_private() {
                    (*field, None)
                } else {
                    (*field, Some(Poke::unchecked_new(value, field.shape())))
                }
            })
    }

    pub(crate) fn into_field_ignoring_visibility(
        self,
        index: usize,
    ) -> Result<Poke<'mem>, FieldError> {
        let field = self.field_meta(index)?;
        let fields: &'mem mut [Value] = self.fields;
        let value = fields.get_mut(index).ok_or(FieldError::IndexOutOfBounds)?;
        Ok(Poke::unchecked_new(value, field.shape()))
    }
}
