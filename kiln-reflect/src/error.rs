use kiln_core::{FieldError, ListError, Shape};
use owo_colors::OwoColorize;

/// Errors that can occur when reflecting on values.
#[derive(Debug, PartialEq, Clone)]
#[non_exhaustive]
pub enum ReflectError {
    /// Attempted to perform an operation that expected a struct or something
    WasNotA {
        /// The name of the expected kind.
        expected: &'static str,

        /// The type we got instead
        actual: &'static Shape,
    },

    /// Tried to put a value of one shape where another was expected
    WrongShape {
        /// The expected shape of the value.
        expected: &'static Shape,
        /// The actual shape of the value.
        actual: &'static Shape,
    },

    /// A value does not have the layout its shape describes
    ValueMismatch {
        /// The shape the value was checked against
        shape: &'static Shape,
    },

    /// An error occurred when attempting to access or modify a field.
    FieldError {
        /// The shape of the value containing the field.
        shape: &'static Shape,
        /// The specific error that occurred with the field.
        field_error: FieldError,
    },

    /// List index out of bounds
    IndexOutOfBounds {
        /// The shape of the list
        shape: &'static Shape,
        /// The index that was out of bounds
        index: usize,
        /// The list length
        len: usize,
    },

    /// A sub-range does not satisfy `lo <= hi <= max <= cap`
    InvalidRange {
        /// The shape of the list or string
        shape: &'static Shape,
        /// Start of the range
        lo: usize,
        /// End of the range
        hi: usize,
        /// Capacity bound of the range
        max: usize,
        /// Capacity of the list (length of the string)
        cap: usize,
    },

    /// Resizing a list failed
    ListError {
        /// The shape of the list
        shape: &'static Shape,
        /// What went wrong
        list_error: ListError,
    },

    /// The operation needs an allocated map or list
    NilContainer {
        /// The shape of the container
        shape: &'static Shape,
        /// The name of the operation that failed.
        operation: &'static str,
    },

    /// A number does not fit the width of its shape
    NumericOverflow {
        /// The shape of the number
        shape: &'static Shape,
    },

    /// The value graph has a shape the materialization convention does not
    /// support. The traversal was aborted, possibly halfway through: the value
    /// should be considered unusable.
    ConventionViolation {
        /// Shape of the value where the walk stopped
        shape: &'static Shape,
        /// What was wrong with it
        violation: ConventionViolation,
    },
}

impl ReflectError {
    /// Returns true for the fatal tier: errors that abort a materialization
    /// because the caller broke the convention.
    pub fn is_convention_violation(&self) -> bool {
        matches!(self, ReflectError::ConventionViolation { .. })
    }
}

/// Ways in which a value graph can break the materialization convention
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[non_exhaustive]
pub enum ConventionViolation {
    /// A pointer that should be nil at this point was not
    PointerNotNil,

    /// A nil pointer whose pointee kind the convention refuses to allocate
    UnsupportedPointee {
        /// Shape of the pointee
        pointee: &'static Shape,
    },

    /// A struct shape whose storage is not a struct
    InvalidAggregate,

    /// The walk went deeper than the convention allows
    DepthExceeded {
        /// The configured limit
        max_depth: usize,
    },
}

impl core::fmt::Display for ConventionViolation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConventionViolation::PointerNotNil => write!(f, "pointer should be nil here"),
            ConventionViolation::UnsupportedPointee { pointee } => {
                write!(f, "cannot allocate a pointee of type {}", pointee.yellow())
            }
            ConventionViolation::InvalidAggregate => {
                write!(f, "struct storage is not a struct")
            }
            ConventionViolation::DepthExceeded { max_depth } => {
                write!(f, "nesting deeper than {max_depth} levels")
            }
        }
    }
}

impl core::fmt::Display for ReflectError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ReflectError::WasNotA { expected, actual } => {
                write!(
                    f,
                    "Wrong shape: expected {}, but got {}",
                    expected.green(),
                    actual.red()
                )
            }
            ReflectError::WrongShape { expected, actual } => {
                write!(
                    f,
                    "Wrong shape: expected {}, but got {}",
                    expected.green(),
                    actual.red()
                )
            }
            ReflectError::ValueMismatch { shape } => {
                write!(f, "Value does not have the layout of {}", shape.red())
            }
            ReflectError::FieldError { shape, field_error } => {
                write!(f, "Field error for shape {}: {}", shape.red(), field_error)
            }
            ReflectError::IndexOutOfBounds { shape, index, len } => {
                write!(
                    f,
                    "Index {} out of bounds for '{}' (length is {})",
                    index,
                    shape.blue(),
                    len
                )
            }
            ReflectError::InvalidRange {
                shape,
                lo,
                hi,
                max,
                cap,
            } => {
                write!(
                    f,
                    "Range [{lo}:{hi}:{max}] is invalid for '{}' (capacity is {cap})",
                    shape.blue()
                )
            }
            ReflectError::ListError { shape, list_error } => {
                write!(f, "List error for '{}': {}", shape.blue(), list_error)
            }
            ReflectError::NilContainer { shape, operation } => {
                write!(
                    f,
                    "Cannot {} on a nil {}",
                    operation.yellow(),
                    shape.blue()
                )
            }
            ReflectError::NumericOverflow { shape } => {
                write!(f, "Number does not fit in a {}", shape.red())
            }
            ReflectError::ConventionViolation { shape, violation } => {
                write!(
                    f,
                    "Convention violation at {}: {}",
                    shape.red(),
                    violation
                )
            }
        }
    }
}

impl core::error::Error for ReflectError {}
