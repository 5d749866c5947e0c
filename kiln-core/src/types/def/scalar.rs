/// Definition for scalar types
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ScalarDef {
    /// `bool`
    Bool,

    /// Integer (`u16`, `i8`, `usize`, etc.)
    Integer {
        /// Is this a signed integer (`i`) or unsigned (`u`)?
        signed: bool,
        /// Width in bits, at most 64
        bits: u32,
    },

    /// Floating-point (`f32`, `f64`)
    Float {
        /// Width in bits: 32 or 64
        bits: u32,
    },

    /// Complex number made of two floats
    Complex {
        /// Total width in bits: 64 or 128
        bits: u32,
    },

    /// UTF-8 string
    Str,
}

impl ScalarDef {
    /// Returns true if `value` can be stored in a signed integer of this width
    pub fn fits_signed(&self, value: i64) -> bool {
        match *self {
            ScalarDef::Integer { signed: true, bits } if bits < 64 => {
                let max = (1i64 << (bits - 1)) - 1;
                let min = -(1i64 << (bits - 1));
                (min..=max).contains(&value)
            }
            ScalarDef::Integer { signed: true, .. } => true,
            _ => false,
        }
    }

    /// Returns true if `value` can be stored in an unsigned integer of this width
    pub fn fits_unsigned(&self, value: u64) -> bool {
        match *self {
            ScalarDef::Integer { signed: false, bits } if bits < 64 => value < (1u64 << bits),
            ScalarDef::Integer { signed: false, .. } => true,
            _ => false,
        }
    }
}
