use alloc::string::String;

use kiln_core::{Complex, Def, Kind, ScalarDef, Shape, Value};

use crate::{Peek, ReflectError};

use super::{PokeList, PokeMap, PokePointer, PokeStruct};

/// Lets you write into a value.
///
/// A `Poke` is addressable: it borrows the caller's storage slot mutably, so
/// every write through it is visible in the caller's value once the handle is
/// dropped. Every write is checked against the shape of the slot.
pub struct Poke<'mem> {
    pub(crate) value: &'mem mut Value,
    pub(crate) shape: &'static Shape,
}

impl<'mem> Poke<'mem> {
    /// Creates a new `Poke`, checking that the value has the layout of `shape`.
    pub fn new(value: &'mem mut Value, shape: &'static Shape) -> Result<Self, ReflectError> {
        if !value.conforms_to(shape) {
            return Err(ReflectError::ValueMismatch { shape });
        }
        Ok(Self { value, shape })
    }

    /// Creates a new `Poke` for a value already known to conform to `shape`.
    pub(crate) fn unchecked_new(value: &'mem mut Value, shape: &'static Shape) -> Self {
        Self { value, shape }
    }

    /// Returns the shape of the value
    #[inline(always)]
    pub fn shape(&self) -> &'static Shape {
        self.shape
    }

    /// Returns the kind of the value
    #[inline(always)]
    pub fn kind(&self) -> Kind {
        self.shape.kind()
    }

    /// Returns true for a nil map, list or pointer
    pub fn is_nil(&self) -> bool {
        self.value.is_nil()
    }

    /// Borrows this handle as a read-only view
    pub fn as_peek(&self) -> Peek<'_> {
        Peek::unchecked_new(&*self.value, self.shape)
    }

    /// Turns this handle into a read-only view
    pub fn into_peek(self) -> Peek<'mem> {
        Peek::unchecked_new(self.value, self.shape)
    }

    /// Borrows this handle for a shorter time
    pub fn reborrow(&mut self) -> Poke<'_> {
        Poke::unchecked_new(&mut *self.value, self.shape)
    }

    /// Follows pointers until reaching a nil one or a value that is not a
    /// pointer. The result still borrows the caller's storage.
    pub fn innermost(self) -> Self {
        let Poke {
            mut value,
            mut shape,
        } = self;
        while let Def::Pointer(def) = shape.def {
            match value {
                Value::Pointer(Some(target)) => {
                    value = &mut **target;
                    shape = def.target();
                }
                _ => break,
            }
        }
        Poke { value, shape }
    }

    /// Writes a `bool`
    pub fn set_bool(&mut self, v: bool) -> Result<(), ReflectError> {
        match self.scalar_def("bool")? {
            ScalarDef::Bool => {
                *self.value = Value::Bool(v);
                Ok(())
            }
            _ => Err(self.was_not_a("bool")),
        }
    }

    /// Writes a signed integer, which must fit the width of the shape
    pub fn set_int(&mut self, v: i64) -> Result<(), ReflectError> {
        match self.scalar_def("signed integer")? {
            def @ ScalarDef::Integer { signed: true, .. } => {
                if !def.fits_signed(v) {
                    return Err(ReflectError::NumericOverflow { shape: self.shape });
                }
                *self.value = Value::Int(v);
                Ok(())
            }
            _ => Err(self.was_not_a("signed integer")),
        }
    }

    /// Writes an unsigned integer, which must fit the width of the shape
    pub fn set_uint(&mut self, v: u64) -> Result<(), ReflectError> {
        match self.scalar_def("unsigned integer")? {
            def @ ScalarDef::Integer { signed: false, .. } => {
                if !def.fits_unsigned(v) {
                    return Err(ReflectError::NumericOverflow { shape: self.shape });
                }
                *self.value = Value::Uint(v);
                Ok(())
            }
            _ => Err(self.was_not_a("unsigned integer")),
        }
    }

    /// Writes a float, rounded to the precision of the shape
    pub fn set_float(&mut self, v: f64) -> Result<(), ReflectError> {
        match self.scalar_def("float")? {
            ScalarDef::Float { bits: 32 } => {
                *self.value = Value::Float(v as f32 as f64);
                Ok(())
            }
            ScalarDef::Float { .. } => {
                *self.value = Value::Float(v);
                Ok(())
            }
            _ => Err(self.was_not_a("float")),
        }
    }

    /// Writes a complex number, rounded to the precision of the shape
    pub fn set_complex(&mut self, v: Complex) -> Result<(), ReflectError> {
        match self.scalar_def("complex")? {
            ScalarDef::Complex { bits: 64 } => {
                let rounded = Complex::new(v.re as f32 as f64, v.im as f32 as f64);
                *self.value = Value::Complex(rounded);
                Ok(())
            }
            ScalarDef::Complex { .. } => {
                *self.value = Value::Complex(v);
                Ok(())
            }
            _ => Err(self.was_not_a("complex")),
        }
    }

    /// Writes a string
    pub fn set_str(&mut self, v: impl Into<String>) -> Result<(), ReflectError> {
        match self.scalar_def("string")? {
            ScalarDef::Str => {
                *self.value = Value::Str(v.into());
                Ok(())
            }
            _ => Err(self.was_not_a("string")),
        }
    }

    /// Replaces the whole value. The new value must conform to the shape.
    pub fn set(&mut self, value: Value) -> Result<(), ReflectError> {
        if !value.conforms_to(self.shape) {
            return Err(ReflectError::ValueMismatch { shape: self.shape });
        }
        *self.value = value;
        Ok(())
    }

    /// Resets the value to the zero value of its shape
    pub fn set_zero(&mut self) {
        *self.value = Value::zero(self.shape);
    }

    /// Tries to identify this value as a struct
    pub fn into_struct(self) -> Result<PokeStruct<'mem>, ReflectError> {
        let Def::Struct(def) = self.shape.def else {
            return Err(self.was_not_a("struct"));
        };
        let shape = self.shape;
        let Value::Struct(fields) = self.value else {
            return Err(ReflectError::ValueMismatch { shape });
        };
        Ok(PokeStruct { shape, def, fields })
    }

    /// Tries to identify this value as a list
    pub fn into_list(self) -> Result<PokeList<'mem>, ReflectError> {
        let Def::List(def) = self.shape.def else {
            return Err(self.was_not_a("list"));
        };
        let shape = self.shape;
        let Value::List(storage) = self.value else {
            return Err(ReflectError::ValueMismatch { shape });
        };
        Ok(PokeList {
            shape,
            def,
            storage,
        })
    }

    /// Tries to identify this value as a map
    pub fn into_map(self) -> Result<PokeMap<'mem>, ReflectError> {
        let Def::Map(def) = self.shape.def else {
            return Err(self.was_not_a("map"));
        };
        let shape = self.shape;
        let Value::Map(storage) = self.value else {
            return Err(ReflectError::ValueMismatch { shape });
        };
        Ok(PokeMap {
            shape,
            def,
            storage,
        })
    }

    /// Tries to identify this value as a pointer
    pub fn into_pointer(self) -> Result<PokePointer<'mem>, ReflectError> {
        let Def::Pointer(def) = self.shape.def else {
            return Err(self.was_not_a("pointer"));
        };
        let shape = self.shape;
        let Value::Pointer(slot) = self.value else {
            return Err(ReflectError::ValueMismatch { shape });
        };
        Ok(PokePointer { shape, def, slot })
    }

    fn scalar_def(&self, expected: &'static str) -> Result<ScalarDef, ReflectError> {
        self.shape
            .def
            .into_scalar()
            .map_err(|_| self.was_not_a(expected))
    }

    fn was_not_a(&self, expected: &'static str) -> ReflectError {
        ReflectError::WasNotA {
            expected,
            actual: self.shape,
        }
    }
}

impl core::fmt::Debug for Poke<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Poke")
            .field("shape", &self.shape.type_identifier)
            .field("value", &self.value)
            .finish()
    }
}
