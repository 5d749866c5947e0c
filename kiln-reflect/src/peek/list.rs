use kiln_core::{ListDef, ListStorage, Shape, Value};

use crate::ReflectError;

use super::Peek;

/// Lets you read from a list, or from a sub-range of one.
///
/// A sub-range keeps a window on the backing store of the list it was cut
/// from: its capacity runs to the end of that store, or to the bound given to
/// [`PeekList::slice3`].
#[derive(Clone, Copy)]
pub struct PeekList<'mem> {
    shape: &'static Shape,
    def: ListDef,
    window: &'mem [Value],
    len: usize,
    nil: bool,
}

impl core::fmt::Debug for PeekList<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PeekList")
            .field("len", &self.len)
            .field("cap", &self.cap())
            .field("nil", &self.nil)
            .finish_non_exhaustive()
    }
}

impl<'mem> PeekList<'mem> {
    pub(crate) fn new(
        shape: &'static Shape,
        def: ListDef,
        storage: Option<&'mem ListStorage>,
    ) -> Self {
        match storage {
            Some(storage) => Self {
                shape,
                def,
                window: storage.backing(),
                len: storage.len(),
                nil: false,
            },
            None => Self {
                shape,
                def,
                window: &[],
                len: 0,
                nil: true,
            },
        }
    }

    /// Returns true if the list was never allocated
    pub fn is_nil(&self) -> bool {
        self.nil
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if there are no items
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of items this list could hold
    pub fn cap(&self) -> usize {
        self.window.len()
    }

    /// Shape of the list
    pub fn shape(&self) -> &'static Shape {
        self.shape
    }

    /// Shape of the items
    pub fn elem_shape(&self) -> &'static Shape {
        self.def.t()
    }

    /// Returns the item at `index`
    pub fn get(&self, index: usize) -> Option<Peek<'mem>> {
        let items: &'mem [Value] = &self.window[..self.len];
        items
            .get(index)
            .map(|value| Peek::unchecked_new(value, self.def.t()))
    }

    /// Iterates over the items
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = Peek<'mem>> + use<'mem> {
        let t = self.def.t();
        let items: &'mem [Value] = &self.window[..self.len];
        items
            .iter()
            .map(move |value| Peek::unchecked_new(value, t))
    }

    /// Items `lo..hi`. The capacity of the result runs to the end of this
    /// list's capacity.
    pub fn slice(&self, lo: usize, hi: usize) -> Result<Self, ReflectError> {
        self.slice3(lo, hi, self.cap())
    }

    /// Items `lo..hi`, with the capacity of the result bounded to `max - lo`
    pub fn slice3(&self, lo: usize, hi: usize, max: usize) -> Result<Self, ReflectError> {
        if !(lo <= hi && hi <= max && max <= self.cap()) {
            return Err(ReflectError::InvalidRange {
                shape: self.shape,
                lo,
                hi,
                max,
                cap: self.cap(),
            });
        }
        let window: &'mem [Value] = self.window;
        Ok(Self {
            shape: self.shape,
            def: self.def,
            window: &window[lo..max],
            len: hi - lo,
            nil: self.nil,
        })
    }
}
