use std::collections::BTreeMap;

use cmod_core::vertex_attribute::VariantIter;
use cmod_core::{
    AttributeType, DiagnosticSink, Material, Mesh, Model, PrimitiveCategory, PrimitiveType,
    Variant, Warning,
};

use crate::pool::Pool;
use crate::vertex_info::VertexInfo;

/// One output draw record: the vertices of a single `f`, `l` or `p`
/// statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjPrimitive {
    pub category: PrimitiveCategory,
    pub vertices: Vec<VertexInfo>,
}

impl ObjPrimitive {
    fn new(category: PrimitiveCategory, capacity: usize) -> Self {
        Self {
            category,
            vertices: Vec::with_capacity(capacity),
        }
    }
}

/// An indexed, deduplicated model ready for OBJ emission.
///
/// The pools are shared across every mesh in the document; primitives are
/// grouped by the material they reference, in material-index order.
#[derive(Debug)]
pub struct WavefrontMesh {
    materials: Vec<Material>,
    positions: Vec<Variant>,
    tex_coords: Vec<Variant>,
    normals: Vec<Variant>,
    primitive_groups: BTreeMap<usize, Vec<ObjPrimitive>>,
}

impl WavefrontMesh {
    /// Assembles the decoded model, reporting degraded features to `sink`.
    ///
    /// A mesh without a position attribute is dropped from the output; all
    /// other losses (unsupported attributes, diverging per-texture UVs,
    /// sprite sizes) degrade with a warning and processing continues.
    pub fn create(model: Model, sink: &mut dyn DiagnosticSink) -> Self {
        let Model { materials, meshes } = model;

        let vertex_count: usize = meshes.iter().map(Mesh::vertex_count).sum();
        let mut positions = Pool::with_capacity(vertex_count);
        let mut tex_coords = Pool::with_capacity(vertex_count);
        let mut normals = Pool::with_capacity(vertex_count);
        let mut primitive_groups: BTreeMap<usize, Vec<ObjPrimitive>> = BTreeMap::new();

        for mesh in &meshes {
            let Some(vertex_info) =
                process_vertices(mesh, &mut positions, &mut tex_coords, &mut normals, sink)
            else {
                continue;
            };
            process_primitives(mesh, &mut primitive_groups, &vertex_info, sink);
        }

        WavefrontMesh {
            materials,
            positions: positions.into_values(),
            tex_coords: tex_coords.into_values(),
            normals: normals.into_values(),
            primitive_groups,
        }
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    /// Position pool in insertion order; slot `i` is OBJ index `i + 1`.
    pub fn positions(&self) -> &[Variant] {
        &self.positions
    }

    pub fn tex_coords(&self) -> &[Variant] {
        &self.tex_coords
    }

    pub fn normals(&self) -> &[Variant] {
        &self.normals
    }

    pub fn primitive_groups(&self) -> &BTreeMap<usize, Vec<ObjPrimitive>> {
        &self.primitive_groups
    }
}

/// Walks all classified attribute streams of one mesh in lock-step and
/// interns each vertex's values, producing one pool-index triple per
/// original vertex. Returns `None` when the mesh has no position data.
fn process_vertices(
    mesh: &Mesh,
    positions: &mut Pool,
    tex_coords: &mut Pool,
    normals: &mut Pool,
    sink: &mut dyn DiagnosticSink,
) -> Option<Vec<VertexInfo>> {
    let mut position_iter = None;
    let mut normal_iter = None;
    let mut texcoord_iters: Vec<VariantIter<'_>> = Vec::new();
    // Numeric preference among texcoord channels: 0, then 2, then 3.
    // texcoord1 is not an output channel; it degrades like color/tangent.
    let mut primary = usize::MAX;
    let mut primary_slot = usize::MAX;

    for attribute in mesh.attributes() {
        match attribute.attribute_type() {
            AttributeType::Position => position_iter = Some(attribute.variants()),
            AttributeType::Texture0 => {
                primary = 0;
                primary_slot = texcoord_iters.len();
                texcoord_iters.push(attribute.variants());
            }
            AttributeType::Texture2 => {
                if primary > 2 {
                    primary = 2;
                    primary_slot = texcoord_iters.len();
                }
                texcoord_iters.push(attribute.variants());
            }
            AttributeType::Texture3 => {
                if primary > 3 {
                    primary = 3;
                    primary_slot = texcoord_iters.len();
                }
                texcoord_iters.push(attribute.variants());
            }
            AttributeType::Normal => normal_iter = Some(attribute.variants()),
            other => sink.warning(Warning::UnsupportedAttribute(other)),
        }
    }

    let Some(mut position_iter) = position_iter else {
        sink.warning(Warning::NoPositionData);
        return None;
    };

    let mut vertex_info = Vec::with_capacity(mesh.vertex_count());
    let mut compare_uvs = texcoord_iters.len() > 1;
    let mut current_tex = Vec::with_capacity(texcoord_iters.len());

    while let Some(position) = position_iter.next() {
        current_tex.clear();
        let mut exhausted = false;
        for iter in &mut texcoord_iters {
            match iter.next() {
                Some(value) => current_tex.push(value),
                None => {
                    exhausted = true;
                    break;
                }
            }
        }
        if exhausted {
            break;
        }
        let normal = match normal_iter.as_mut() {
            Some(iter) => match iter.next() {
                Some(value) => Some(value),
                None => break,
            },
            None => None,
        };

        let position_index = positions.intern(position);

        if compare_uvs && current_tex.iter().any(|value| *value != current_tex[0]) {
            sink.warning(Warning::PerTextureUv {
                primary: primary as u8,
            });
            compare_uvs = false;
        }

        let tex_coord_index = if primary_slot == usize::MAX {
            -1
        } else {
            tex_coords.intern(current_tex[primary_slot])
        };
        let normal_index = match normal {
            Some(value) => normals.intern(value),
            None => -1,
        };

        vertex_info.push(VertexInfo {
            position: position_index,
            tex_coord: tex_coord_index,
            normal: normal_index,
        });
    }

    Some(vertex_info)
}

fn process_primitives(
    mesh: &Mesh,
    primitive_groups: &mut BTreeMap<usize, Vec<ObjPrimitive>>,
    vertex_info: &[VertexInfo],
    sink: &mut dyn DiagnosticSink,
) {
    for primitive in mesh.primitives() {
        let group = primitive_groups
            .entry(primitive.material_index)
            .or_default();

        match primitive.primitive_type {
            PrimitiveType::TriList => expand_tri_list(group, vertex_info, &primitive.indices),
            PrimitiveType::TriStrip => expand_tri_strip(group, vertex_info, &primitive.indices),
            PrimitiveType::TriFan => expand_tri_fan(group, vertex_info, &primitive.indices),
            PrimitiveType::LineList => expand_line_list(group, vertex_info, &primitive.indices),
            PrimitiveType::LineStrip => expand_line_strip(group, vertex_info, &primitive.indices),
            PrimitiveType::SpriteList => {
                sink.warning(Warning::SpriteSizeUnsupported);
                expand_points(group, vertex_info, &primitive.indices);
            }
            PrimitiveType::PointList => expand_points(group, vertex_info, &primitive.indices),
        }
    }
}

fn expand_tri_list(group: &mut Vec<ObjPrimitive>, vertex_info: &[VertexInfo], indices: &[u32]) {
    for tri in indices.chunks_exact(3) {
        let mut primitive = ObjPrimitive::new(PrimitiveCategory::Triangle, 3);
        primitive.vertices.push(vertex_info[tri[0] as usize]);
        primitive.vertices.push(vertex_info[tri[1] as usize]);
        primitive.vertices.push(vertex_info[tri[2] as usize]);
        group.push(primitive);
    }
}

// Sliding window keeping the original vertex order; no winding swap on the
// odd triangles.
fn expand_tri_strip(group: &mut Vec<ObjPrimitive>, vertex_info: &[VertexInfo], indices: &[u32]) {
    if indices.len() < 3 {
        return;
    }
    let mut a = vertex_info[indices[0] as usize];
    let mut b = vertex_info[indices[1] as usize];
    for &index in &indices[2..] {
        let c = vertex_info[index as usize];
        let mut primitive = ObjPrimitive::new(PrimitiveCategory::Triangle, 3);
        primitive.vertices.push(a);
        primitive.vertices.push(b);
        primitive.vertices.push(c);
        group.push(primitive);
        a = b;
        b = c;
    }
}

fn expand_tri_fan(group: &mut Vec<ObjPrimitive>, vertex_info: &[VertexInfo], indices: &[u32]) {
    if indices.len() < 3 {
        return;
    }
    let a = vertex_info[indices[0] as usize];
    let mut b = vertex_info[indices[1] as usize];
    for &index in &indices[2..] {
        let c = vertex_info[index as usize];
        let mut primitive = ObjPrimitive::new(PrimitiveCategory::Triangle, 3);
        primitive.vertices.push(a);
        primitive.vertices.push(b);
        primitive.vertices.push(c);
        group.push(primitive);
        b = c;
    }
}

fn expand_line_list(group: &mut Vec<ObjPrimitive>, vertex_info: &[VertexInfo], indices: &[u32]) {
    for line in indices.chunks_exact(2) {
        let mut primitive = ObjPrimitive::new(PrimitiveCategory::Line, 2);
        primitive.vertices.push(vertex_info[line[0] as usize]);
        primitive.vertices.push(vertex_info[line[1] as usize]);
        group.push(primitive);
    }
}

// An OBJ `l` statement may list any number of vertices, so a whole strip
// stays one primitive.
fn expand_line_strip(group: &mut Vec<ObjPrimitive>, vertex_info: &[VertexInfo], indices: &[u32]) {
    let mut primitive = ObjPrimitive::new(PrimitiveCategory::Line, indices.len());
    primitive
        .vertices
        .extend(indices.iter().map(|&index| vertex_info[index as usize]));
    group.push(primitive);
}

fn expand_points(group: &mut Vec<ObjPrimitive>, vertex_info: &[VertexInfo], indices: &[u32]) {
    let mut primitive = ObjPrimitive::new(PrimitiveCategory::Point, indices.len());
    primitive
        .vertices
        .extend(indices.iter().map(|&index| vertex_info[index as usize]));
    group.push(primitive);
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmod_core::{AttributeFormat, Primitive, VertexAttribute};

    fn attribute(
        attribute_type: AttributeType,
        format: AttributeFormat,
        values: &[Variant],
    ) -> VertexAttribute {
        let mut attribute = VertexAttribute::new(attribute_type, format);
        for &value in values {
            attribute.push(value).unwrap();
        }
        attribute
    }

    fn positions_f3(values: &[(f32, f32, f32)]) -> VertexAttribute {
        let variants: Vec<Variant> = values
            .iter()
            .map(|&(x, y, z)| Variant::Float3(x, y, z))
            .collect();
        attribute(AttributeType::Position, AttributeFormat::Float3, &variants)
    }

    fn five_point_mesh(primitive_type: PrimitiveType, indices: Vec<u32>) -> Model {
        Model {
            materials: vec![Material::default()],
            meshes: vec![Mesh::new(
                vec![positions_f3(&[
                    (0.0, 0.0, 0.0),
                    (1.0, 0.0, 0.0),
                    (2.0, 0.0, 0.0),
                    (3.0, 0.0, 0.0),
                    (4.0, 0.0, 0.0),
                ])],
                vec![Primitive {
                    primitive_type,
                    material_index: 0,
                    indices,
                }],
            )],
        }
    }

    fn triangles(mesh: &WavefrontMesh, material_index: usize) -> Vec<Vec<i32>> {
        mesh.primitive_groups()[&material_index]
            .iter()
            .map(|primitive| {
                assert_eq!(primitive.category, PrimitiveCategory::Triangle);
                primitive
                    .vertices
                    .iter()
                    .map(|vertex| vertex.position)
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_tri_strip_expansion() {
        let model = five_point_mesh(PrimitiveType::TriStrip, vec![0, 1, 2, 3, 4]);
        let mut warnings: Vec<Warning> = Vec::new();
        let mesh = WavefrontMesh::create(model, &mut warnings);

        // Pool indices are 1-based, so original vertex i maps to i + 1.
        assert_eq!(
            triangles(&mesh, 0),
            vec![vec![1, 2, 3], vec![2, 3, 4], vec![3, 4, 5]]
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_tri_fan_expansion() {
        let model = five_point_mesh(PrimitiveType::TriFan, vec![0, 1, 2, 3, 4]);
        let mut warnings: Vec<Warning> = Vec::new();
        let mesh = WavefrontMesh::create(model, &mut warnings);

        assert_eq!(
            triangles(&mesh, 0),
            vec![vec![1, 2, 3], vec![1, 3, 4], vec![1, 4, 5]]
        );
    }

    #[test]
    fn test_tri_list_expansion() {
        let model = five_point_mesh(PrimitiveType::TriList, vec![0, 1, 2]);
        let mut warnings: Vec<Warning> = Vec::new();
        let mesh = WavefrontMesh::create(model, &mut warnings);

        assert_eq!(triangles(&mesh, 0), vec![vec![1, 2, 3]]);
    }

    #[test]
    fn test_vertices_weld_by_content() {
        // Vertices 0 and 2 are bit-identical and must share a pool slot.
        let model = Model {
            materials: vec![Material::default()],
            meshes: vec![Mesh::new(
                vec![positions_f3(&[
                    (1.0, 2.0, 3.0),
                    (4.0, 5.0, 6.0),
                    (1.0, 2.0, 3.0),
                ])],
                vec![Primitive {
                    primitive_type: PrimitiveType::TriList,
                    material_index: 0,
                    indices: vec![0, 1, 2],
                }],
            )],
        };
        let mut warnings: Vec<Warning> = Vec::new();
        let mesh = WavefrontMesh::create(model, &mut warnings);

        assert_eq!(mesh.positions().len(), 2);
        assert_eq!(triangles(&mesh, 0), vec![vec![1, 2, 1]]);
    }

    #[test]
    fn test_sprites_become_one_point_primitive() {
        let model = five_point_mesh(PrimitiveType::SpriteList, vec![0, 1, 2]);
        let mut warnings: Vec<Warning> = Vec::new();
        let mesh = WavefrontMesh::create(model, &mut warnings);

        let group = &mesh.primitive_groups()[&0];
        assert_eq!(group.len(), 1);
        assert_eq!(group[0].category, PrimitiveCategory::Point);
        assert_eq!(group[0].vertices.len(), 3);
        assert_eq!(warnings, vec![Warning::SpriteSizeUnsupported]);
    }

    #[test]
    fn test_line_strip_is_single_line() {
        let model = five_point_mesh(PrimitiveType::LineStrip, vec![0, 1, 2, 3]);
        let mut warnings: Vec<Warning> = Vec::new();
        let mesh = WavefrontMesh::create(model, &mut warnings);

        let group = &mesh.primitive_groups()[&0];
        assert_eq!(group.len(), 1);
        assert_eq!(group[0].category, PrimitiveCategory::Line);
        assert_eq!(group[0].vertices.len(), 4);
    }

    #[test]
    fn test_mesh_without_positions_is_skipped() {
        let normals = attribute(
            AttributeType::Normal,
            AttributeFormat::Float3,
            &[Variant::Float3(0.0, 1.0, 0.0)],
        );
        let good_mesh = Mesh::new(
            vec![positions_f3(&[
                (0.0, 0.0, 0.0),
                (1.0, 0.0, 0.0),
                (0.0, 1.0, 0.0),
            ])],
            vec![Primitive {
                primitive_type: PrimitiveType::TriList,
                material_index: 0,
                indices: vec![0, 1, 2],
            }],
        );
        let model = Model {
            materials: vec![Material::default()],
            meshes: vec![
                Mesh::new(
                    vec![normals],
                    vec![Primitive {
                        primitive_type: PrimitiveType::PointList,
                        material_index: 0,
                        indices: vec![0],
                    }],
                ),
                good_mesh,
            ],
        };
        let mut warnings: Vec<Warning> = Vec::new();
        let mesh = WavefrontMesh::create(model, &mut warnings);

        assert!(warnings.contains(&Warning::NoPositionData));
        // The sibling mesh is still processed.
        assert_eq!(mesh.positions().len(), 3);
        assert_eq!(mesh.primitive_groups()[&0].len(), 1);
    }

    #[test]
    fn test_unsupported_attribute_warns_but_continues() {
        let model = Model {
            materials: vec![Material::default()],
            meshes: vec![Mesh::new(
                vec![
                    positions_f3(&[(0.0, 0.0, 0.0)]),
                    attribute(
                        AttributeType::PointSize,
                        AttributeFormat::Float1,
                        &[Variant::Float1(2.0)],
                    ),
                ],
                vec![Primitive {
                    primitive_type: PrimitiveType::PointList,
                    material_index: 0,
                    indices: vec![0],
                }],
            )],
        };
        let mut warnings: Vec<Warning> = Vec::new();
        let mesh = WavefrontMesh::create(model, &mut warnings);

        assert_eq!(
            warnings,
            vec![Warning::UnsupportedAttribute(AttributeType::PointSize)]
        );
        assert_eq!(mesh.positions().len(), 1);
    }

    #[test]
    fn test_texcoord0_is_primary_over_texcoord2() {
        let tex0 = attribute(
            AttributeType::Texture0,
            AttributeFormat::Float2,
            &[Variant::Float2(0.25, 0.25)],
        );
        let tex2 = attribute(
            AttributeType::Texture2,
            AttributeFormat::Float2,
            &[Variant::Float2(0.75, 0.75)],
        );
        // Declared in reverse numeric order; preference is by channel
        // number, not declaration order.
        let model = Model {
            materials: vec![Material::default()],
            meshes: vec![Mesh::new(
                vec![tex2, tex0, positions_f3(&[(0.0, 0.0, 0.0)])],
                vec![Primitive {
                    primitive_type: PrimitiveType::PointList,
                    material_index: 0,
                    indices: vec![0],
                }],
            )],
        };
        let mut warnings: Vec<Warning> = Vec::new();
        let mesh = WavefrontMesh::create(model, &mut warnings);

        assert_eq!(mesh.tex_coords(), &[Variant::Float2(0.25, 0.25)]);
        assert_eq!(warnings, vec![Warning::PerTextureUv { primary: 0 }]);
    }

    #[test]
    fn test_texcoord2_fallback_without_texcoord0() {
        let tex2 = attribute(
            AttributeType::Texture2,
            AttributeFormat::Float2,
            &[Variant::Float2(0.5, 0.5)],
        );
        let model = Model {
            materials: vec![Material::default()],
            meshes: vec![Mesh::new(
                vec![positions_f3(&[(0.0, 0.0, 0.0)]), tex2],
                vec![Primitive {
                    primitive_type: PrimitiveType::PointList,
                    material_index: 0,
                    indices: vec![0],
                }],
            )],
        };
        let mut warnings: Vec<Warning> = Vec::new();
        let mesh = WavefrontMesh::create(model, &mut warnings);

        assert_eq!(mesh.tex_coords(), &[Variant::Float2(0.5, 0.5)]);
        assert!(warnings.is_empty());
        assert_eq!(mesh.primitive_groups()[&0][0].vertices[0].tex_coord, 1);
    }

    #[test]
    fn test_matching_multi_texcoords_do_not_warn() {
        let values = [Variant::Float2(0.1, 0.9)];
        let tex0 = attribute(AttributeType::Texture0, AttributeFormat::Float2, &values);
        let tex3 = attribute(AttributeType::Texture3, AttributeFormat::Float2, &values);
        let model = Model {
            materials: vec![Material::default()],
            meshes: vec![Mesh::new(
                vec![positions_f3(&[(0.0, 0.0, 0.0)]), tex0, tex3],
                vec![Primitive {
                    primitive_type: PrimitiveType::PointList,
                    material_index: 0,
                    indices: vec![0],
                }],
            )],
        };
        let mut warnings: Vec<Warning> = Vec::new();
        let mesh = WavefrontMesh::create(model, &mut warnings);

        assert!(warnings.is_empty());
        assert_eq!(mesh.tex_coords().len(), 1);
    }

    #[test]
    fn test_pools_are_shared_across_meshes() {
        let mesh_a = Mesh::new(
            vec![positions_f3(&[(0.0, 0.0, 0.0), (1.0, 0.0, 0.0)])],
            vec![Primitive {
                primitive_type: PrimitiveType::LineList,
                material_index: 0,
                indices: vec![0, 1],
            }],
        );
        let mesh_b = Mesh::new(
            vec![positions_f3(&[(1.0, 0.0, 0.0), (2.0, 0.0, 0.0)])],
            vec![Primitive {
                primitive_type: PrimitiveType::LineList,
                material_index: 1,
                indices: vec![0, 1],
            }],
        );
        let model = Model {
            materials: vec![Material::default(), Material::default()],
            meshes: vec![mesh_a, mesh_b],
        };
        let mut warnings: Vec<Warning> = Vec::new();
        let mesh = WavefrontMesh::create(model, &mut warnings);

        // (1, 0, 0) appears in both meshes and is welded once.
        assert_eq!(mesh.positions().len(), 3);
        let second = &mesh.primitive_groups()[&1][0];
        assert_eq!(second.vertices[0].position, 2);
        assert_eq!(second.vertices[1].position, 3);
    }
}
