//! Writes into fields that the regular handles refuse to hand out.
//!
//! A [`FieldPath`] is resolved once against a struct shape, following fields
//! by name through nested structs, private ones included. [`write_field`] then
//! replaces the value at the end of that path. Writes are still checked
//! against the shape of the target field.
//!
//! ```
//! use kiln_core::{shapes, Field, Shape, StructDef, Value};
//! use kiln_reflect::{raw, Poke};
//!
//! static SECRET: Shape = Shape::builder("Secret")
//!     .struct_(
//!         StructDef::builder()
//!             .fields(&const {
//!                 [Field::builder().name("token").shape(|| &shapes::STRING).private().build()]
//!             })
//!             .build(),
//!     )
//!     .build();
//!
//! let path = raw::FieldPath::resolve(&SECRET, &["token"]).unwrap();
//! let mut secret = Value::zero(&SECRET);
//! raw::write_field(Poke::new(&mut secret, &SECRET).unwrap(), &path, "hunter2".into()).unwrap();
//! assert_eq!(secret, Value::Struct(vec!["hunter2".into()]));
//! ```

use alloc::vec::Vec;

use kiln_core::{Def, FieldError, Shape, Value};

use crate::{Poke, ReflectError, trace};

/// Field indices leading from a struct shape down to one of its (possibly
/// nested, possibly private) fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    root: &'static Shape,
    leaf: &'static Shape,
    indices: Vec<usize>,
}

impl FieldPath {
    /// Follows `names` from `root`, one struct level per name
    pub fn resolve(root: &'static Shape, names: &[&str]) -> Result<Self, ReflectError> {
        let mut leaf = root;
        let mut indices = Vec::with_capacity(names.len());
        for name in names {
            let Def::Struct(def) = leaf.def else {
                return Err(ReflectError::WasNotA {
                    expected: "struct",
                    actual: leaf,
                });
            };
            let index = def.field_index(name).ok_or(ReflectError::FieldError {
                shape: leaf,
                field_error: FieldError::NoSuchField,
            })?;
            indices.push(index);
            leaf = def.fields[index].shape();
        }
        trace!("resolved {root}.{} to {indices:?}", names.join("."));
        Ok(Self {
            root,
            leaf,
            indices,
        })
    }

    /// The shape the path starts from
    pub fn root(&self) -> &'static Shape {
        self.root
    }

    /// The shape of the field at the end of the path
    pub fn leaf(&self) -> &'static Shape {
        self.leaf
    }

    /// Field index at each level
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }
}

/// Replaces the field at the end of `path` with `value`, whether or not the
/// fields along the way are exported
pub fn write_field(poke: Poke<'_>, path: &FieldPath, value: Value) -> Result<(), ReflectError> {
    if !poke.shape().is_shape(path.root) {
        return Err(ReflectError::WrongShape {
            expected: path.root,
            actual: poke.shape(),
        });
    }

    let mut poke = poke;
    for &index in &path.indices {
        let st = poke.into_struct()?;
        let shape = st.shape();
        poke = st
            .into_field_ignoring_visibility(index)
            .map_err(|field_error| ReflectError::FieldError { shape, field_error })?;
    }
    poke.set(value)
}
