use super::Shape;

/// Fields for map types
#[derive(Clone, Copy, Debug)]
pub struct MapDef {
    /// shape of the keys in the map
    pub k: fn() -> &'static Shape,
    /// shape of the values in the map
    pub v: fn() -> &'static Shape,
}

impl MapDef {
    /// Creates a map definition
    pub const fn new(k: fn() -> &'static Shape, v: fn() -> &'static Shape) -> Self {
        Self { k, v }
    }

    /// Returns the shape of the keys of the map
    pub fn k(&self) -> &'static Shape {
        (self.k)()
    }

    /// Returns the shape of the values of the map
    pub fn v(&self) -> &'static Shape {
        (self.v)()
    }
}
