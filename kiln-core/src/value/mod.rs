use alloc::{boxed::Box, string::String, vec::Vec};

use crate::{Def, ScalarDef, Shape};

mod list;
pub use list::*;

mod map;
pub use map::*;

/// A storage slot whose layout follows some [`Shape`].
///
/// A `Value` does not know its own shape: the two travel together in the
/// handles of `kiln-reflect`. Containers have a nil state (`None`) which is
/// distinct from being allocated and empty.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// `bool`
    Bool(bool),
    /// Any signed integer, range-checked against the shape's width on write
    Int(i64),
    /// Any unsigned integer, range-checked against the shape's width on write
    Uint(u64),
    /// Any float
    Float(f64),
    /// Any complex number
    Complex(Complex),
    /// Text
    Str(String),
    /// Map, or nil
    Map(Option<MapStorage>),
    /// List, or nil
    List(Option<ListStorage>),
    /// Pointer, or nil
    Pointer(Option<Box<Value>>),
    /// Struct fields, in declaration order
    Struct(Vec<Value>),
    /// Placeholder for opaque shapes
    Opaque,
}

impl Value {
    /// Returns the zero value for a shape.
    ///
    /// Scalars are zero or empty, structs are made of zeroed fields, and maps,
    /// lists and pointers are nil. A struct that contains itself by value (not
    /// through a pointer) makes this recurse forever.
    pub fn zero(shape: &'static Shape) -> Self {
        match shape.def {
            Def::Scalar(ScalarDef::Bool) => Value::Bool(false),
            Def::Scalar(ScalarDef::Integer { signed: true, .. }) => Value::Int(0),
            Def::Scalar(ScalarDef::Integer { signed: false, .. }) => Value::Uint(0),
            Def::Scalar(ScalarDef::Float { .. }) => Value::Float(0.0),
            Def::Scalar(ScalarDef::Complex { .. }) => Value::Complex(Complex::ZERO),
            Def::Scalar(ScalarDef::Str) => Value::Str(String::new()),
            Def::Map(_) => Value::Map(None),
            Def::List(_) => Value::List(None),
            Def::Pointer(_) => Value::Pointer(None),
            Def::Struct(def) => {
                Value::Struct(def.fields.iter().map(|f| Value::zero(f.shape())).collect())
            }
            Def::Opaque(_) => Value::Opaque,
        }
    }

    /// Returns true if this value has the layout described by `shape`, all the
    /// way down, and every integer fits the width of its shape.
    pub fn conforms_to(&self, shape: &'static Shape) -> bool {
        match (shape.def, self) {
            (Def::Scalar(ScalarDef::Bool), Value::Bool(_)) => true,
            (Def::Scalar(def @ ScalarDef::Integer { signed: true, .. }), Value::Int(v)) => {
                def.fits_signed(*v)
            }
            (Def::Scalar(def @ ScalarDef::Integer { signed: false, .. }), Value::Uint(v)) => {
                def.fits_unsigned(*v)
            }
            (Def::Scalar(ScalarDef::Float { .. }), Value::Float(_)) => true,
            (Def::Scalar(ScalarDef::Complex { .. }), Value::Complex(_)) => true,
            (Def::Scalar(ScalarDef::Str), Value::Str(_)) => true,
            (Def::Map(def), Value::Map(map)) => map.as_ref().is_none_or(|map| {
                map.iter()
                    .all(|(k, v)| k.conforms_to(def.k()) && v.conforms_to(def.v()))
            }),
            (Def::List(def), Value::List(list)) => list.as_ref().is_none_or(|list| {
                list.elem_shape().is_shape(def.t())
                    && list.backing().iter().all(|v| v.conforms_to(def.t()))
            }),
            (Def::Pointer(def), Value::Pointer(ptr)) => {
                ptr.as_deref().is_none_or(|v| v.conforms_to(def.target()))
            }
            (Def::Struct(def), Value::Struct(fields)) => {
                fields.len() == def.fields.len()
                    && def
                        .fields
                        .iter()
                        .zip(fields)
                        .all(|(field, v)| v.conforms_to(field.shape()))
            }
            (Def::Opaque(_), Value::Opaque) => true,
            _ => false,
        }
    }

    /// Returns true for a nil map, list or pointer
    pub fn is_nil(&self) -> bool {
        matches!(
            self,
            Value::Map(None) | Value::List(None) | Value::Pointer(None)
        )
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::Uint(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<Complex> for Value {
    fn from(v: Complex) -> Self {
        Value::Complex(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.into())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

/// A complex number
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Complex {
    /// Real part
    pub re: f64,
    /// Imaginary part
    pub im: f64,
}

impl Complex {
    /// `0+0i`
    pub const ZERO: Complex = Complex::new(0.0, 0.0);

    /// Creates a complex number
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }
}

impl core::fmt::Display for Complex {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.im.is_sign_negative() {
            write!(f, "({}{}i)", self.re, self.im)
        } else {
            write!(f, "({}+{}i)", self.re, self.im)
        }
    }
}
