use kiln_core::{PointerDef, Shape, Value};

use super::Peek;

/// Lets you read from a pointer
#[derive(Clone, Copy, Debug)]
pub struct PeekPointer<'mem> {
    pub(crate) shape: &'static Shape,

    pub(crate) def: PointerDef,

    pub(crate) target: Option<&'mem Value>,
}

impl<'mem> PeekPointer<'mem> {
    /// Returns true if the pointer is nil
    pub fn is_nil(&self) -> bool {
        self.target.is_none()
    }

    /// Shape of the pointer
    pub fn shape(&self) -> &'static Shape {
        self.shape
    }

    /// Shape of the pointee
    pub fn target_shape(&self) -> &'static Shape {
        self.def.target()
    }

    /// The pointee, unless the pointer is nil
    pub fn target(&self) -> Option<Peek<'mem>> {
        self.target
            .map(|value| Peek::unchecked_new(value, self.def.target()))
    }
}
