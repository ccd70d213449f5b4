//! Grammar driver for the text encoding.

use std::io::BufRead;

use cmod_core::{
    AttributeFormat, AttributeType, BlendMode, CmodError, Material, Mesh, Model, Primitive,
    PrimitiveType, Result, TextureSemantic, VertexAttribute,
};

use crate::token_reader::TokenReader;

pub(super) fn read<R: BufRead>(reader: R) -> Result<Model> {
    let mut tokens = TokenReader::new(reader);
    let mut materials = Vec::new();
    let mut meshes = Vec::new();

    while let Some(token) = tokens.try_next_token()? {
        match token.as_str() {
            "material" => materials.push(read_material(&mut tokens)?),
            "mesh" => meshes.push(read_mesh(&mut tokens, materials.len())?),
            _ => return Err(CmodError::format("Unexpected token in cmod file")),
        }
    }

    Ok(Model { materials, meshes })
}

fn read_material<R: BufRead>(tokens: &mut TokenReader<R>) -> Result<Material> {
    let mut material = Material::default();

    loop {
        let token = tokens.next_token()?;
        match token.as_str() {
            "diffuse" => material.diffuse = Some(tokens.read_color()?),
            "specular" => material.specular = Some(tokens.read_color()?),
            "emissive" => material.emissive = Some(tokens.read_color()?),
            "specpower" => material.specular_power = Some(tokens.read_f32()?),
            "opacity" => material.opacity = Some(tokens.read_f32()?),
            "blend" => {
                material.blend_mode = Some(match tokens.next_token()?.as_str() {
                    "normal" => BlendMode::Normal,
                    "add" => BlendMode::Additive,
                    "premultiplied" => BlendMode::PremultipliedAlpha,
                    _ => return Err(CmodError::format("Unknown blend mode")),
                });
            }
            "texture0" | "texture1" | "texture2" | "texture3" => {
                let code = (token.as_bytes()[token.len() - 1] - b'0') as i16;
                let semantic = TextureSemantic::from_code(code)
                    .ok_or_else(|| CmodError::format("Invalid texture semantic"))?;
                let path = tokens.read_quoted()?;
                // A repeated semantic replaces the earlier path; only the
                // binary decoder rejects duplicates.
                material.set_texture(semantic, path);
            }
            "end_material" => return Ok(material),
            _ => return Err(CmodError::format("Unexpected token in material")),
        }
    }
}

fn read_mesh<R: BufRead>(tokens: &mut TokenReader<R>, material_count: usize) -> Result<Mesh> {
    let mut attributes = read_vertex_description(tokens)?;
    let vertex_count = read_vertices(tokens, &mut attributes)?;
    let primitives = read_primitives(tokens, material_count, vertex_count)?;

    Ok(Mesh::new(attributes, primitives))
}

fn read_vertex_description<R: BufRead>(
    tokens: &mut TokenReader<R>,
) -> Result<Vec<VertexAttribute>> {
    if tokens.next_token()? != "vertexdesc" {
        return Err(CmodError::format("Expected vertex description"));
    }

    let mut attributes: Vec<VertexAttribute> = Vec::new();

    loop {
        let token = tokens.next_token()?;
        if token == "end_vertexdesc" {
            return Ok(attributes);
        }

        let attribute_type = AttributeType::from_keyword(&token)
            .ok_or_else(|| CmodError::format("Unexpected vertex attribute"))?;
        if attributes
            .iter()
            .any(|attribute| attribute.attribute_type() == attribute_type)
        {
            return Err(CmodError::format("Duplicate vertex attribute"));
        }

        let format_token = tokens.next_token()?;
        let format = AttributeFormat::from_keyword(&format_token)
            .ok_or_else(|| CmodError::format("Unknown vertex format"))?;

        attributes.push(VertexAttribute::new(attribute_type, format));
    }
}

fn read_vertices<R: BufRead>(
    tokens: &mut TokenReader<R>,
    attributes: &mut [VertexAttribute],
) -> Result<usize> {
    if tokens.next_token()? != "vertices" {
        return Err(CmodError::format("Expected vertices"));
    }

    let vertex_count = tokens.read_i32()?;
    if vertex_count <= 0 {
        return Err(CmodError::format("Vertex count out of range"));
    }
    let vertex_count = vertex_count as usize;

    for attribute in attributes.iter_mut() {
        attribute.reserve(vertex_count);
    }

    // The stream is vertex-major: all attributes of vertex 0, then vertex 1.
    for _ in 0..vertex_count {
        for attribute in attributes.iter_mut() {
            attribute.read_vertex(tokens)?;
        }
    }

    Ok(vertex_count)
}

fn read_primitives<R: BufRead>(
    tokens: &mut TokenReader<R>,
    material_count: usize,
    vertex_count: usize,
) -> Result<Vec<Primitive>> {
    let mut primitives = Vec::new();

    loop {
        let token = tokens.next_token()?;
        if token == "end_mesh" {
            return Ok(primitives);
        }

        let primitive_type = PrimitiveType::from_keyword(&token)
            .ok_or_else(|| CmodError::format("Unknown primitive type"))?;

        let material_index = tokens.read_i32()?;
        if material_index < 0 || material_index as usize >= material_count {
            return Err(CmodError::format("Material index out of range"));
        }

        let index_count = tokens.read_i32()?;
        if index_count <= 0 {
            return Err(CmodError::format("Index count out of range"));
        }

        let mut indices = Vec::with_capacity(index_count as usize);
        for _ in 0..index_count {
            let index = tokens.read_i32()?;
            if index < 0 || index as usize >= vertex_count {
                return Err(CmodError::format("Index out of range"));
            }
            indices.push(index as u32);
        }

        primitives.push(Primitive {
            primitive_type,
            material_index: material_index as usize,
            indices,
        });
    }
}
