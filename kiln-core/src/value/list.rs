use alloc::vec::Vec;
use core::fmt;

use super::Value;
use crate::Shape;

/// Backing storage of an allocated list.
///
/// The backing store always holds `cap` values; the first `len` of them are
/// the list's items. Slots past `len` hold zero values, or whatever was there
/// before the list was shortened: growing the length again reveals them.
#[derive(Clone, Debug)]
pub struct ListStorage {
    elem: &'static Shape,
    backing: Vec<Value>,
    len: usize,
}

impl ListStorage {
    /// An allocated list with no items and no capacity
    pub fn new(elem: &'static Shape) -> Self {
        Self {
            elem,
            backing: Vec::new(),
            len: 0,
        }
    }

    /// An allocated list of `len` zero values, with room for `cap`
    pub fn with_len_cap(elem: &'static Shape, len: usize, cap: usize) -> Result<Self, ListError> {
        if len > cap {
            return Err(ListError::LenOutOfRange { len, cap });
        }
        let mut backing = Vec::with_capacity(cap);
        backing.resize_with(cap, || Value::zero(elem));
        Ok(Self { elem, backing, len })
    }

    /// Shape of the items
    pub fn elem_shape(&self) -> &'static Shape {
        self.elem
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if there are no items
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of items the list can hold before it has to grow
    pub fn cap(&self) -> usize {
        self.backing.len()
    }

    /// The items
    pub fn as_slice(&self) -> &[Value] {
        &self.backing[..self.len]
    }

    /// The items, mutably
    pub fn as_mut_slice(&mut self) -> &mut [Value] {
        &mut self.backing[..self.len]
    }

    /// The whole backing store, `cap` values long
    pub fn backing(&self) -> &[Value] {
        &self.backing
    }

    /// Returns the item at `index`
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.as_slice().get(index)
    }

    /// Returns the item at `index`, mutably
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Value> {
        self.as_mut_slice().get_mut(index)
    }

    /// Changes the length. The new length may not exceed the capacity.
    pub fn set_len(&mut self, len: usize) -> Result<(), ListError> {
        if len > self.cap() {
            return Err(ListError::LenOutOfRange {
                len,
                cap: self.cap(),
            });
        }
        self.len = len;
        Ok(())
    }

    /// Shrinks the capacity. It must stay between the length and the current
    /// capacity: growing happens through [`ListStorage::push`] only.
    pub fn set_cap(&mut self, cap: usize) -> Result<(), ListError> {
        if cap < self.len || cap > self.cap() {
            return Err(ListError::CapOutOfRange {
                requested: cap,
                len: self.len,
                cap: self.cap(),
            });
        }
        self.backing.truncate(cap);
        Ok(())
    }

    /// Appends an item, growing the backing store if it is full
    pub fn push(&mut self, value: Value) {
        self.reserve(1);
        self.backing[self.len] = value;
        self.len += 1;
    }

    /// Appends every item of `values`
    pub fn extend(&mut self, values: impl IntoIterator<Item = Value>) {
        let values = values.into_iter();
        self.reserve(values.size_hint().0);
        for value in values {
            self.push(value);
        }
    }

    fn reserve(&mut self, additional: usize) {
        let needed = self.len + additional;
        if needed <= self.cap() {
            return;
        }
        let new_cap = needed.max(self.cap() * 2);
        let elem = self.elem;
        self.backing.resize_with(new_cap, || Value::zero(elem));
    }
}

impl PartialEq for ListStorage {
    fn eq(&self, other: &Self) -> bool {
        self.elem.is_shape(other.elem) && self.as_slice() == other.as_slice()
    }
}

/// Errors from resizing or indexing a list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ListError {
    /// The requested length exceeds the capacity
    LenOutOfRange {
        /// requested length
        len: usize,
        /// capacity of the list
        cap: usize,
    },

    /// The requested capacity is below the length or above the capacity
    CapOutOfRange {
        /// requested capacity
        requested: usize,
        /// length of the list
        len: usize,
        /// capacity of the list
        cap: usize,
    },
}

impl core::error::Error for ListError {}

impl fmt::Display for ListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListError::LenOutOfRange { len, cap } => {
                write!(f, "length {len} exceeds capacity {cap}")
            }
            ListError::CapOutOfRange {
                requested,
                len,
                cap,
            } => write!(
                f,
                "capacity {requested} out of range (length is {len}, capacity is {cap})"
            ),
        }
    }
}
