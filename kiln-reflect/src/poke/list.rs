use alloc::vec::Vec;

use kiln_core::{ListDef, ListError, ListStorage, Shape, Value};

use crate::{PeekList, ReflectError, trace};

use super::Poke;

/// Lets you write into a list: resize it, replace its items, append to it.
///
/// A nil list behaves like an allocated list with no capacity for reads and
/// resizes to zero; appending to it allocates it.
pub struct PokeList<'mem> {
    pub(crate) shape: &'static Shape,
    pub(crate) def: ListDef,
    pub(crate) storage: &'mem mut Option<ListStorage>,
}

impl core::fmt::Debug for PokeList<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PokeList")
            .field("len", &self.len())
            .field("cap", &self.cap())
            .field("nil", &self.is_nil())
            .finish_non_exhaustive()
    }
}

impl<'mem> PokeList<'mem> {
    /// Shape of the list
    pub fn shape(&self) -> &'static Shape {
        self.shape
    }

    /// Shape of the items
    pub fn elem_shape(&self) -> &'static Shape {
        self.def.t()
    }

    /// Returns true if the list was never allocated
    pub fn is_nil(&self) -> bool {
        self.storage.is_none()
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.storage.as_ref().map_or(0, ListStorage::len)
    }

    /// Returns true if there are no items
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of items the list can hold before it has to grow
    pub fn cap(&self) -> usize {
        self.storage.as_ref().map_or(0, ListStorage::cap)
    }

    /// Replaces the list with a freshly allocated one holding `len` zero
    /// values, with room for `cap`
    pub fn make(&mut self, len: usize, cap: usize) -> Result<(), ReflectError> {
        let storage = ListStorage::with_len_cap(self.def.t(), len, cap)
            .map_err(|list_error| self.list_error(list_error))?;
        trace!("allocating {} with len {len} and cap {cap}", self.shape);
        *self.storage = Some(storage);
        Ok(())
    }

    /// Changes the length, which may not exceed the capacity
    pub fn set_len(&mut self, len: usize) -> Result<(), ReflectError> {
        let shape = self.shape;
        match self.storage {
            Some(storage) => storage
                .set_len(len)
                .map_err(|list_error| ReflectError::ListError { shape, list_error }),
            None if len == 0 => Ok(()),
            None => Err(self.list_error(ListError::LenOutOfRange { len, cap: 0 })),
        }
    }

    /// Shrinks the capacity, which must stay between the length and the
    /// current capacity
    pub fn set_cap(&mut self, cap: usize) -> Result<(), ReflectError> {
        let shape = self.shape;
        match self.storage {
            Some(storage) => storage
                .set_cap(cap)
                .map_err(|list_error| ReflectError::ListError { shape, list_error }),
            None if cap == 0 => Ok(()),
            None => Err(self.list_error(ListError::CapOutOfRange {
                requested: cap,
                len: 0,
                cap: 0,
            })),
        }
    }

    /// Borrows this list as a read-only view
    pub fn as_peek(&self) -> PeekList<'_> {
        PeekList::new(self.shape, self.def, self.storage.as_ref())
    }

    /// Returns a writable handle on the item at `index`
    pub fn get_mut(&mut self, index: usize) -> Result<Poke<'_>, ReflectError> {
        let (shape, t, len) = (self.shape, self.def.t(), self.len());
        self.storage
            .as_mut()
            .and_then(|storage| storage.get_mut(index))
            .map(|value| Poke::unchecked_new(value, t))
            .ok_or(ReflectError::IndexOutOfBounds { shape, index, len })
    }

    /// Replaces the item at `index`
    pub fn set(&mut self, index: usize, value: Value) -> Result<(), ReflectError> {
        self.get_mut(index)?.set(value)
    }

    /// Appends an item, allocating the list if it is nil
    pub fn push(&mut self, value: Value) -> Result<(), ReflectError> {
        self.check_item(&value)?;
        let t = self.def.t();
        self.storage
            .get_or_insert_with(|| ListStorage::new(t))
            .push(value);
        Ok(())
    }

    /// Appends every item of `values`, allocating the list if it is nil.
    /// Nothing is appended unless every item has the item shape.
    pub fn append(&mut self, values: impl IntoIterator<Item = Value>) -> Result<(), ReflectError> {
        let values: Vec<Value> = values.into_iter().collect();
        for value in &values {
            self.check_item(value)?;
        }
        trace!("appending {} items to {}", values.len(), self.shape);
        let t = self.def.t();
        self.storage
            .get_or_insert_with(|| ListStorage::new(t))
            .extend(values);
        Ok(())
    }

    fn check_item(&self, value: &Value) -> Result<(), ReflectError> {
        if value.conforms_to(self.def.t()) {
            Ok(())
        } else {
            Err(ReflectError::ValueMismatch {
                shape: self.def.t(),
            })
        }
    }

    fn list_error(&self, list_error: ListError) -> ReflectError {
        ReflectError::ListError {
            shape: self.shape,
            list_error,
        }
    }
}
