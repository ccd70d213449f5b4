use crate::primitive::Primitive;
use crate::vertex_attribute::VertexAttribute;

/// One decoded mesh: its declared vertex attributes and primitive records.
///
/// Invariant (enforced by the decoder's interleaved read loop): every
/// attribute buffer holds the same number of vertices.
#[derive(Debug, Clone)]
pub struct Mesh {
    attributes: Vec<VertexAttribute>,
    primitives: Vec<Primitive>,
}

impl Mesh {
    pub fn new(attributes: Vec<VertexAttribute>, primitives: Vec<Primitive>) -> Self {
        Self {
            attributes,
            primitives,
        }
    }

    /// The shared vertex count of all attribute buffers.
    pub fn vertex_count(&self) -> usize {
        self.attributes.first().map_or(0, VertexAttribute::len)
    }

    pub fn attributes(&self) -> &[VertexAttribute] {
        &self.attributes
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }
}
