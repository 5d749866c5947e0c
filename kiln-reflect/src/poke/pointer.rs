use alloc::boxed::Box;

use kiln_core::{PointerDef, Shape, Value};

use crate::{PeekPointer, ReflectError, trace};

use super::Poke;

/// Lets you write into a pointer: point it at a fresh value, or clear it
pub struct PokePointer<'mem> {
    pub(crate) shape: &'static Shape,
    pub(crate) def: PointerDef,
    pub(crate) slot: &'mem mut Option<Box<Value>>,
}

impl core::fmt::Debug for PokePointer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PokePointer")
            .field("shape", &self.shape.type_identifier)
            .field("nil", &self.is_nil())
            .finish()
    }
}

impl<'mem> PokePointer<'mem> {
    /// Returns true if the pointer is nil
    pub fn is_nil(&self) -> bool {
        self.slot.is_none()
    }

    /// Shape of the pointer
    pub fn shape(&self) -> &'static Shape {
        self.shape
    }

    /// Shape of the pointee
    pub fn target_shape(&self) -> &'static Shape {
        self.def.target()
    }

    /// Borrows this pointer as a read-only view
    pub fn as_peek(&self) -> PeekPointer<'_> {
        PeekPointer {
            shape: self.shape,
            def: self.def,
            target: self.slot.as_deref(),
        }
    }

    /// Points at a freshly allocated zero value of the pointee shape, and
    /// returns a handle on it
    pub fn allocate(self) -> Poke<'mem> {
        let target = self.def.target();
        trace!("allocating the pointee of {}", self.shape);
        let slot: &'mem mut Option<Box<Value>> = self.slot;
        let value = slot.insert(Box::new(Value::zero(target)));
        Poke::unchecked_new(value, target)
    }

    /// Points at a freshly allocated copy of `value`
    pub fn set_target(&mut self, value: Value) -> Result<(), ReflectError> {
        if !value.conforms_to(self.def.target()) {
            return Err(ReflectError::ValueMismatch {
                shape: self.def.target(),
            });
        }
        *self.slot = Some(Box::new(value));
        Ok(())
    }

    /// Makes the pointer nil
    pub fn set_nil(&mut self) {
        *self.slot = None;
    }

    /// Turns this handle into a handle on the pointee, unless the pointer is
    /// nil
    pub fn into_target(self) -> Option<Poke<'mem>> {
        let target = self.def.target();
        let slot: &'mem mut Option<Box<Value>> = self.slot;
        slot.as_deref_mut()
            .map(|value| Poke::unchecked_new(value, target))
    }
}
