use kiln_core::{MapDef, MapStorage, Shape, Value};

use super::Peek;

/// Lets you read from a map.
///
/// Keys and values come out as [`Peek`]s: they are copies as far as the map
/// is concerned, and the only way to change one is to insert the whole entry
/// again.
#[derive(Clone, Copy)]
pub struct PeekMap<'mem> {
    pub(crate) shape: &'static Shape,

    pub(crate) def: MapDef,

    pub(crate) storage: Option<&'mem MapStorage>,
}

impl core::fmt::Debug for PeekMap<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PeekMap").finish_non_exhaustive()
    }
}

impl<'mem> PeekMap<'mem> {
    /// Returns true if the map was never allocated
    pub fn is_nil(&self) -> bool {
        self.storage.is_none()
    }

    /// Get the number of entries in the map
    pub fn len(&self) -> usize {
        self.storage.map_or(0, |m| m.len())
    }

    /// Returns true if the map is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check if the map contains a key
    pub fn contains_key(&self, key: &Value) -> bool {
        self.storage.is_some_and(|m| m.contains_key(key))
    }

    /// Get a value from the map for the given key
    pub fn get(&self, key: &Value) -> Option<Peek<'mem>> {
        let value = self.storage?.get(key)?;
        Some(Peek::unchecked_new(value, self.def.v()))
    }

    /// Returns an iterator over the key-value pairs in the map
    pub fn iter(&self) -> impl Iterator<Item = (Peek<'mem>, Peek<'mem>)> + use<'mem> {
        let (k, v) = (self.def.k(), self.def.v());
        let storage: Option<&'mem MapStorage> = self.storage;
        storage
            .into_iter()
            .flat_map(|m| m.iter())
            .map(move |(key, value)| (Peek::unchecked_new(key, k), Peek::unchecked_new(value, v)))
    }

    /// Shape of the map
    pub fn shape(&self) -> &'static Shape {
        self.shape
    }

    /// Def getter
    pub fn def(&self) -> MapDef {
        self.def
    }
}
