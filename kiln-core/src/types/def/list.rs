use super::Shape;

/// Fields for list types
#[derive(Clone, Copy, Debug)]
pub struct ListDef {
    /// shape of the items in the list
    pub t: fn() -> &'static Shape,
}

impl ListDef {
    /// Creates a list definition
    pub const fn new(t: fn() -> &'static Shape) -> Self {
        Self { t }
    }

    /// Returns the shape of the items in the list
    pub fn t(&self) -> &'static Shape {
        (self.t)()
    }
}
