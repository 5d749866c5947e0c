use super::Shape;

/// Describes a nullable, owning pointer
#[derive(Clone, Copy, Debug)]
pub struct PointerDef {
    /// Shape of the pointee
    ///
    /// This needs to be indirect (behind a function), in order to allow
    /// recursive types without overflowing const evaluation.
    pub target: fn() -> &'static Shape,
}

impl PointerDef {
    /// Creates a pointer definition
    pub const fn new(target: fn() -> &'static Shape) -> Self {
        Self { target }
    }

    /// Returns the shape of the pointee
    pub fn target(&self) -> &'static Shape {
        (self.target)()
    }
}
