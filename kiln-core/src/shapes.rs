//! Shapes for the builtin scalar types, plus [`BYTES`].
//!
//! User-defined shapes point at these from their fields, e.g.
//! `Field::builder().name("age").shape(|| &shapes::U32)`.

use crate::{ScalarDef, Shape};

macro_rules! int_shape {
    ($(#[$meta:meta])* $name:ident, $id:literal, $signed:literal, $bits:literal) => {
        $(#[$meta])*
        pub static $name: Shape = Shape::builder($id)
            .scalar(ScalarDef::Integer {
                signed: $signed,
                bits: $bits,
            })
            .build();
    };
}

/// `bool`
pub static BOOL: Shape = Shape::builder("bool").scalar(ScalarDef::Bool).build();

int_shape!(
    /// `i8`
    I8, "i8", true, 8
);
int_shape!(
    /// `i16`
    I16, "i16", true, 16
);
int_shape!(
    /// `i32`
    I32, "i32", true, 32
);
int_shape!(
    /// `i64`
    I64, "i64", true, 64
);
int_shape!(
    /// `isize`, always 64 bits wide here
    ISIZE, "isize", true, 64
);
int_shape!(
    /// `u8`
    U8, "u8", false, 8
);
int_shape!(
    /// `u16`
    U16, "u16", false, 16
);
int_shape!(
    /// `u32`
    U32, "u32", false, 32
);
int_shape!(
    /// `u64`
    U64, "u64", false, 64
);
int_shape!(
    /// `usize`, always 64 bits wide here
    USIZE, "usize", false, 64
);

/// `f32`
pub static F32: Shape = Shape::builder("f32")
    .scalar(ScalarDef::Float { bits: 32 })
    .build();

/// `f64`
pub static F64: Shape = Shape::builder("f64")
    .scalar(ScalarDef::Float { bits: 64 })
    .build();

/// Complex number made of two `f32`
pub static COMPLEX64: Shape = Shape::builder("Complex<f32>")
    .scalar(ScalarDef::Complex { bits: 64 })
    .build();

/// Complex number made of two `f64`
pub static COMPLEX128: Shape = Shape::builder("Complex<f64>")
    .scalar(ScalarDef::Complex { bits: 128 })
    .build();

/// `String`
pub static STRING: Shape = Shape::builder("String").scalar(ScalarDef::Str).build();

/// A list of `u8`: the one list shape every convention knows about.
pub static BYTES: Shape = Shape::builder("Bytes").list(|| &U8).build();

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Kind;

    #[test]
    fn builtin_kinds() {
        assert_eq!(BOOL.kind(), Kind::Bool);
        assert_eq!(I8.kind(), Kind::Int);
        assert_eq!(USIZE.kind(), Kind::Uint);
        assert_eq!(F32.kind(), Kind::Float);
        assert_eq!(COMPLEX128.kind(), Kind::Complex);
        assert_eq!(STRING.kind(), Kind::String);
        assert_eq!(BYTES.kind(), Kind::List);
        assert!(BYTES.is_bytes());
        assert!(!STRING.is_bytes());
    }

    #[test]
    fn integer_ranges() {
        let i8_def = I8.def.into_scalar().unwrap();
        assert!(i8_def.fits_signed(127));
        assert!(i8_def.fits_signed(-128));
        assert!(!i8_def.fits_signed(128));
        assert!(!i8_def.fits_unsigned(1));

        let u16_def = U16.def.into_scalar().unwrap();
        assert!(u16_def.fits_unsigned(65535));
        assert!(!u16_def.fits_unsigned(65536));

        let i64_def = I64.def.into_scalar().unwrap();
        assert!(i64_def.fits_signed(i64::MIN));
    }
}
