use alloc::vec::Vec;

use kiln_core::{Def, MapDef, MapStorage, Shape, Value};

use crate::{Peek, PeekMap, Poke, ReflectError, trace};

/// Lets you write into a map.
///
/// Entries are never addressable: reading one gives a [`Peek`], and changing
/// one means inserting it again.
pub struct PokeMap<'mem> {
    pub(crate) shape: &'static Shape,
    pub(crate) def: MapDef,
    pub(crate) storage: &'mem mut Option<MapStorage>,
}

impl core::fmt::Debug for PokeMap<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PokeMap")
            .field("len", &self.len())
            .field("nil", &self.is_nil())
            .finish_non_exhaustive()
    }
}

impl<'mem> PokeMap<'mem> {
    /// Shape of the map
    pub fn shape(&self) -> &'static Shape {
        self.shape
    }

    /// Def getter
    pub fn def(&self) -> MapDef {
        self.def
    }

    /// Returns true if the map was never allocated
    pub fn is_nil(&self) -> bool {
        self.storage.is_none()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.storage.as_ref().map_or(0, MapStorage::len)
    }

    /// Returns true if the map is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replaces the map with a freshly allocated, empty one
    pub fn make(&mut self, capacity: usize) {
        trace!("allocating {} with capacity {capacity}", self.shape);
        *self.storage = Some(MapStorage::with_capacity(capacity));
    }

    /// Borrows this map as a read-only view
    pub fn as_peek(&self) -> PeekMap<'_> {
        PeekMap {
            shape: self.shape,
            def: self.def,
            storage: self.storage.as_ref(),
        }
    }

    /// Check if the map contains a key
    pub fn contains_key(&self, key: &Value) -> bool {
        self.storage.as_ref().is_some_and(|m| m.contains_key(key))
    }

    /// Reads the value stored for `key`
    pub fn get(&self, key: &Value) -> Option<Peek<'_>> {
        let value = self.storage.as_ref()?.get(key)?;
        Some(Peek::unchecked_new(value, self.def.v()))
    }

    /// Reads every entry. Values stay read-only: replace them with
    /// [`PokeMap::insert`].
    pub fn iter(&self) -> impl Iterator<Item = (Peek<'_>, Peek<'_>)> {
        self.as_peek().iter()
    }

    /// Handles on the targets of the non-nil pointer values. The values are
    /// not addressable, but what they point at is.
    pub fn pointees_mut(&mut self) -> impl Iterator<Item = Poke<'_>> {
        let target = match self.def.v().def {
            Def::Pointer(def) => Some(def.target()),
            _ => None,
        };
        self.storage
            .as_mut()
            .into_iter()
            .flat_map(MapStorage::iter_mut)
            .filter_map(move |(_, value)| match (value, target) {
                (Value::Pointer(Some(pointee)), Some(target)) => {
                    Some(Poke::unchecked_new(pointee.as_mut(), target))
                }
                _ => None,
            })
    }

    /// Copies out every key, so entries can be re-inserted while walking them
    pub fn keys(&self) -> Vec<Value> {
        self.storage
            .as_ref()
            .map(|m| m.iter().map(|(k, _)| k.clone()).collect())
            .unwrap_or_default()
    }

    /// Stores `value` for `key`, returning the value it replaces. Inserting
    /// into a nil map is an error.
    pub fn insert(&mut self, key: Value, value: Value) -> Result<Option<Value>, ReflectError> {
        if !key.conforms_to(self.def.k()) {
            return Err(ReflectError::ValueMismatch {
                shape: self.def.k(),
            });
        }
        if !value.conforms_to(self.def.v()) {
            return Err(ReflectError::ValueMismatch {
                shape: self.def.v(),
            });
        }
        let shape = self.shape;
        let storage = self.storage.as_mut().ok_or(ReflectError::NilContainer {
            shape,
            operation: "insert",
        })?;
        Ok(storage.insert(key, value))
    }

    /// Removes the entry for `key`. Removing from a nil map does nothing.
    pub fn remove(&mut self, key: &Value) -> Option<Value> {
        self.storage.as_mut()?.remove(key)
    }
}
