use kiln_core::{Complex, Def, Kind, Shape, Value};

use crate::ReflectError;

use super::{PeekList, PeekMap, PeekPointer, PeekStruct};

/// Lets you read from a value.
///
/// A `Peek` is a detached view: nothing written through another handle while
/// it exists can be observed through it, and nothing can be written through
/// it. Values read out of maps are only ever reachable this way.
#[derive(Clone, Copy)]
pub struct Peek<'mem> {
    /// Underlying data
    pub(crate) value: &'mem Value,

    /// Shape of the value
    pub(crate) shape: &'static Shape,
}

impl<'mem> Peek<'mem> {
    /// Creates a new `Peek`, checking that the value has the layout of `shape`.
    pub fn new(value: &'mem Value, shape: &'static Shape) -> Result<Self, ReflectError> {
        if !value.conforms_to(shape) {
            return Err(ReflectError::ValueMismatch { shape });
        }
        Ok(Self { value, shape })
    }

    /// Creates a new `Peek` for a value already known to conform to `shape`.
    pub(crate) fn unchecked_new(value: &'mem Value, shape: &'static Shape) -> Self {
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

    /// Returns the underlying value
    #[inline(always)]
    pub fn value(&self) -> &'mem Value {
        self.value
    }

    /// Returns true for a nil map, list or pointer. Other kinds are never nil.
    pub fn is_nil(&self) -> bool {
        self.value.is_nil()
    }

    /// Follows pointers until reaching a nil one or a value that is not a pointer
    pub fn innermost(self) -> Self {
        let mut peek = self;
        while let (Def::Pointer(def), Value::Pointer(Some(target))) = (peek.shape.def, peek.value)
        {
            peek = Peek::unchecked_new(target, def.target());
        }
        peek
    }

    /// Reads a `bool`
    pub fn as_bool(&self) -> Result<bool, ReflectError> {
        match self.value {
            Value::Bool(v) => Ok(*v),
            _ => Err(self.was_not_a("bool")),
        }
    }

    /// Reads a signed integer, widened to 64 bits
    pub fn as_i64(&self) -> Result<i64, ReflectError> {
        match self.value {
            Value::Int(v) => Ok(*v),
            _ => Err(self.was_not_a("signed integer")),
        }
    }

    /// Reads an unsigned integer, widened to 64 bits
    pub fn as_u64(&self) -> Result<u64, ReflectError> {
        match self.value {
            Value::Uint(v) => Ok(*v),
            _ => Err(self.was_not_a("unsigned integer")),
        }
    }

    /// Reads a float, widened to 64 bits
    pub fn as_f64(&self) -> Result<f64, ReflectError> {
        match self.value {
            Value::Float(v) => Ok(*v),
            _ => Err(self.was_not_a("float")),
        }
    }

    /// Reads a complex number
    pub fn as_complex(&self) -> Result<Complex, ReflectError> {
        match self.value {
            Value::Complex(v) => Ok(*v),
            _ => Err(self.was_not_a("complex")),
        }
    }

    /// Reads a string
    pub fn as_str(&self) -> Result<&'mem str, ReflectError> {
        match self.value {
            Value::Str(v) => Ok(v),
            _ => Err(self.was_not_a("string")),
        }
    }

    /// Tries to identify this value as a string
    pub fn into_str(self) -> Result<PeekStr<'mem>, ReflectError> {
        let value = self.as_str()?;
        Ok(PeekStr {
            value,
            shape: self.shape,
        })
    }

    /// Tries to identify this value as a struct
    pub fn into_struct(self) -> Result<PeekStruct<'mem>, ReflectError> {
        let Def::Struct(def) = self.shape.def else {
            return Err(self.was_not_a("struct"));
        };
        let Value::Struct(fields) = self.value else {
            return Err(ReflectError::ValueMismatch { shape: self.shape });
        };
        Ok(PeekStruct {
            shape: self.shape,
            def,
            fields,
        })
    }

    /// Tries to identify this value as a list
    pub fn into_list(self) -> Result<PeekList<'mem>, ReflectError> {
        let Def::List(def) = self.shape.def else {
            return Err(self.was_not_a("list"));
        };
        let Value::List(storage) = self.value else {
            return Err(ReflectError::ValueMismatch { shape: self.shape });
        };
        Ok(PeekList::new(self.shape, def, storage.as_ref()))
    }

    /// Tries to identify this value as a map
    pub fn into_map(self) -> Result<PeekMap<'mem>, ReflectError> {
        let Def::Map(def) = self.shape.def else {
            return Err(self.was_not_a("map"));
        };
        let Value::Map(storage) = self.value else {
            return Err(ReflectError::ValueMismatch { shape: self.shape });
        };
        Ok(PeekMap {
            shape: self.shape,
            def,
            storage: storage.as_ref(),
        })
    }

    /// Tries to identify this value as a pointer
    pub fn into_pointer(self) -> Result<PeekPointer<'mem>, ReflectError> {
        let Def::Pointer(def) = self.shape.def else {
            return Err(self.was_not_a("pointer"));
        };
        let Value::Pointer(target) = self.value else {
            return Err(ReflectError::ValueMismatch { shape: self.shape });
        };
        Ok(PeekPointer {
            shape: self.shape,
            def,
            target: target.as_deref(),
        })
    }

    fn was_not_a(&self, expected: &'static str) -> ReflectError {
        ReflectError::WasNotA {
            expected,
            actual: self.shape,
        }
    }
}

impl core::fmt::Display for Peek<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.value {
            Value::Bool(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Uint(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Complex(v) => write!(f, "{v}"),
            Value::Str(v) => f.write_str(v),
            v if v.is_nil() => write!(f, "⟨{}⟩(nil)", self.shape),
            _ => write!(f, "⟨{}⟩", self.shape),
        }
    }
}

impl core::fmt::Debug for Peek<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Debug::fmt(self.value, f)
    }
}

impl PartialEq for Peek<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.shape.is_shape(other.shape) && self.value == other.value
    }
}

/// Lets you read from a string: its length, its bytes, its sub-ranges
#[derive(Clone, Copy, Debug)]
pub struct PeekStr<'mem> {
    value: &'mem str,
    shape: &'static Shape,
}

impl<'mem> PeekStr<'mem> {
    /// The whole string
    pub fn as_str(&self) -> &'mem str {
        self.value
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.value.len()
    }

    /// Returns true for the empty string
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// The byte at `index`
    pub fn byte(&self, index: usize) -> Result<u8, ReflectError> {
        self.value
            .as_bytes()
            .get(index)
            .copied()
            .ok_or(ReflectError::IndexOutOfBounds {
                shape: self.shape,
                index,
                len: self.value.len(),
            })
    }

    /// The bytes in `lo..hi`, which must fall on character boundaries
    pub fn slice(&self, lo: usize, hi: usize) -> Result<&'mem str, ReflectError> {
        self.value.get(lo..hi).ok_or(ReflectError::InvalidRange {
            shape: self.shape,
            lo,
            hi,
            max: hi,
            cap: self.value.len(),
        })
    }
}
