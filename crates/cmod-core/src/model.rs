use crate::material::Material;
use crate::mesh::Mesh;

/// A fully decoded CMOD document: materials and meshes in document order.
///
/// Built once by the decoder and consumed once by mesh assembly; primitives
/// reference materials by 0-based index into `materials`.
#[derive(Debug, Clone, Default)]
pub struct Model {
    pub materials: Vec<Material>,
    pub meshes: Vec<Mesh>,
}
