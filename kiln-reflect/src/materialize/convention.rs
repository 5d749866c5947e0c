use bitflags::bitflags;
use kiln_core::{Complex, Kind, Shape};

bitflags! {
    /// A set of value kinds
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct KindSet: u16 {
        /// `bool`
        const BOOL = 1 << 0;
        /// signed integers
        const INT = 1 << 1;
        /// unsigned integers
        const UINT = 1 << 2;
        /// floats
        const FLOAT = 1 << 3;
        /// complex numbers
        const COMPLEX = 1 << 4;
        /// strings
        const STRING = 1 << 5;
        /// maps
        const MAP = 1 << 6;
        /// lists
        const LIST = 1 << 7;
        /// pointers
        const POINTER = 1 << 8;
        /// structs
        const STRUCT = 1 << 9;
    }
}

impl KindSet {
    /// The member for `kind`. Unsupported kinds have none.
    pub const fn of(kind: Kind) -> Self {
        match kind {
            Kind::Bool => Self::BOOL,
            Kind::Int => Self::INT,
            Kind::Uint => Self::UINT,
            Kind::Float => Self::FLOAT,
            Kind::Complex => Self::COMPLEX,
            Kind::String => Self::STRING,
            Kind::Map => Self::MAP,
            Kind::List => Self::LIST,
            Kind::Pointer => Self::POINTER,
            Kind::Struct => Self::STRUCT,
            Kind::Unsupported(_) => Self::empty(),
        }
    }

    /// Returns true if `kind` is a member
    pub const fn includes(self, kind: Kind) -> bool {
        let member = Self::of(kind);
        !member.is_empty() && self.contains(member)
    }
}

bitflags! {
    /// Pointee shapes the first-field rule allocates behind a nil pointer
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PointeeKinds: u8 {
        /// A struct, allocated as its zero value
        const STRUCT = 1 << 0;
        /// A list of bytes, allocated empty with room to grow
        const BYTES = 1 << 1;
        /// A signed integer, allocated as zero
        const INT = 1 << 2;
        /// A map, allocated empty
        const MAP = 1 << 3;
    }
}

impl PointeeKinds {
    /// The member matching `shape`, if any
    pub fn of(shape: &'static Shape) -> Self {
        if shape.is_bytes() {
            return Self::BYTES;
        }
        match shape.kind() {
            Kind::Struct => Self::STRUCT,
            Kind::Int => Self::INT,
            Kind::Map => Self::MAP,
            _ => Self::empty(),
        }
    }
}

/// Values written into scalar leaves
#[derive(Debug, Clone, PartialEq)]
pub struct LeafValues {
    /// written into `bool`s
    pub boolean: bool,
    /// written into signed integers
    pub signed: i64,
    /// written into unsigned integers
    pub unsigned: u64,
    /// written into floats
    pub float: f64,
    /// written into complex numbers
    pub complex: Complex,
    /// written into strings
    pub text: &'static str,
}

impl Default for LeafValues {
    fn default() -> Self {
        Self {
            boolean: true,
            signed: 64,
            unsigned: 64,
            float: 64.0,
            complex: Complex::new(64.0, 64.0),
            text: "hello world",
        }
    }
}

/// What happens to struct and pointer-to-struct values found inside a map.
///
/// Map values are not addressable, so the walker cannot fill them in where
/// they are stored. The target of a pointer value is, though.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MapValueRecursion {
    /// Leave them alone
    Skip,
    /// Walk struct values read-only. Struct values behind non-nil pointers
    /// are reachable, and are walked in place.
    #[default]
    Inspect,
    /// Materialize a copy and insert it back under the same key
    WriteBack,
}

/// How maps are filled in
#[derive(Debug, Clone, PartialEq)]
pub struct MapPolicy {
    /// Capacity of a map allocated in place of a nil one
    pub initial_capacity: usize,
    /// Insert the zero key with the zero value, unless the key is present
    pub seed_zero_entry: bool,
    /// Entries inserted into maps from strings to strings, unless their key
    /// is present
    pub text_entries: &'static [(&'static str, &'static str)],
    /// What happens to struct and pointer-to-struct values
    pub value_recursion: MapValueRecursion,
}

impl Default for MapPolicy {
    fn default() -> Self {
        Self {
            initial_capacity: 2,
            seed_zero_entry: true,
            text_entries: &[("greeting", "hello"), ("farewell", "goodbye")],
            value_recursion: MapValueRecursion::default(),
        }
    }
}

/// How lists are filled in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListPolicy {
    /// Length of a list allocated in place of a nil one
    pub initial_len: usize,
    /// Capacity of a list allocated in place of a nil one
    pub initial_cap: usize,
    /// Number of fresh elements appended one at a time
    pub append_zeroed: usize,
    /// Number of fresh elements appended in one go
    pub append_range: usize,
}

impl Default for ListPolicy {
    fn default() -> Self {
        Self {
            initial_len: 5,
            initial_cap: 8,
            append_zeroed: 0,
            append_range: 0,
        }
    }
}

/// Which pointers are allocated when the walker reaches them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerPolicy {
    /// Pointee kinds that may be allocated
    pub allocatable: KindSet,
}

impl Default for PointerPolicy {
    fn default() -> Self {
        Self {
            allocatable: KindSet::all().difference(KindSet::MAP),
        }
    }
}

/// Extra handling for the first field of every struct
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FirstFieldPolicy {
    /// Written into a signed integer first field
    pub int_value: i64,
    /// Pointees allocated behind a nil pointer first field
    pub pointees: PointeeKinds,
    /// Capacity of a byte buffer allocated behind a nil pointer first field
    pub byte_buffer_capacity: usize,
}

impl Default for FirstFieldPolicy {
    fn default() -> Self {
        Self {
            int_value: 996,
            pointees: PointeeKinds::STRUCT | PointeeKinds::BYTES,
            byte_buffer_capacity: 8,
        }
    }
}

/// Everything the [`crate::Materializer`] agrees to do, and how.
///
/// `Default` gives the stock convention: every supported kind, five items
/// out of eight slots for fresh lists, two slots for fresh maps, no
/// allocation of map pointees, and at most 64 levels of nesting, the outermost
/// value included.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct Convention {
    /// Kinds the walker acts on. Others are skipped silently.
    pub supported: KindSet,
    /// Scalar leaf values
    pub leaves: LeafValues,
    /// Map rules
    pub map: MapPolicy,
    /// List rules
    pub list: ListPolicy,
    /// Pointer rules
    pub pointer: PointerPolicy,
    /// First-field rules
    pub first_field: FirstFieldPolicy,
    /// Nesting limit
    pub max_depth: usize,
}

impl Default for Convention {
    fn default() -> Self {
        Self {
            supported: KindSet::all(),
            leaves: LeafValues::default(),
            map: MapPolicy::default(),
            list: ListPolicy::default(),
            pointer: PointerPolicy::default(),
            first_field: FirstFieldPolicy::default(),
            max_depth: 64,
        }
    }
}

impl Convention {
    /// Sets the supported kinds
    pub fn with_supported(mut self, supported: KindSet) -> Self {
        self.supported = supported;
        self
    }

    /// Sets the scalar leaf values
    pub fn with_leaves(mut self, leaves: LeafValues) -> Self {
        self.leaves = leaves;
        self
    }

    /// Sets the map rules
    pub fn with_map(mut self, map: MapPolicy) -> Self {
        self.map = map;
        self
    }

    /// Sets the list rules
    pub fn with_list(mut self, list: ListPolicy) -> Self {
        self.list = list;
        self
    }

    /// Sets the pointer rules
    pub fn with_pointer(mut self, pointer: PointerPolicy) -> Self {
        self.pointer = pointer;
        self
    }

    /// Sets the first-field rules
    pub fn with_first_field(mut self, first_field: FirstFieldPolicy) -> Self {
        self.first_field = first_field;
        self
    }

    /// Sets the nesting limit
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
