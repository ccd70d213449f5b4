//! Grammar driver for the binary encoding.

use std::io::Read;

use cmod_core::{
    AttributeFormat, AttributeType, CmodError, Material, Mesh, Model, Primitive, PrimitiveType,
    Result, Token, VertexAttribute,
};

use crate::decode_buffer::DecodeBuffer;

pub(super) fn read<R: Read>(reader: R) -> Result<Model> {
    let mut buffer = DecodeBuffer::new(reader);
    let mut materials = Vec::new();
    let mut meshes = Vec::new();

    while let Some(token) = buffer.try_read_token()? {
        match token {
            Token::Material => materials.push(read_material(&mut buffer)?),
            Token::Mesh => meshes.push(read_mesh(&mut buffer, materials.len())?),
            _ => return Err(CmodError::format("Unexpected token in cmod file")),
        }
    }

    // Unlike the text form, a binary document must carry real content.
    if materials.is_empty() {
        return Err(CmodError::format("No materials found"));
    }
    if meshes.is_empty() {
        return Err(CmodError::format("No meshes found"));
    }

    Ok(Model { materials, meshes })
}

fn read_material<R: Read>(buffer: &mut DecodeBuffer<R>) -> Result<Material> {
    let mut material = Material::default();

    loop {
        match buffer.read_token()? {
            Token::Diffuse => material.diffuse = Some(buffer.read_tagged_color()?),
            Token::Specular => material.specular = Some(buffer.read_tagged_color()?),
            Token::Emissive => material.emissive = Some(buffer.read_tagged_color()?),
            Token::SpecularPower => material.specular_power = Some(buffer.read_tagged_f32()?),
            Token::Opacity => material.opacity = Some(buffer.read_tagged_f32()?),
            Token::Blend => material.blend_mode = Some(buffer.read_blend_mode()?),
            Token::Texture => {
                let semantic = buffer.read_texture_semantic()?;
                let path = buffer.read_tagged_string()?;
                material.add_texture(semantic, path)?;
            }
            Token::EndMaterial => return Ok(material),
            _ => return Err(CmodError::format("Unexpected token in material")),
        }
    }
}

fn read_mesh<R: Read>(buffer: &mut DecodeBuffer<R>, material_count: usize) -> Result<Mesh> {
    let mut attributes = read_vertex_description(buffer)?;
    let vertex_count = read_vertices(buffer, &mut attributes)?;
    let primitives = read_primitives(buffer, material_count, vertex_count)?;

    Ok(Mesh::new(attributes, primitives))
}

fn read_vertex_description<R: Read>(
    buffer: &mut DecodeBuffer<R>,
) -> Result<Vec<VertexAttribute>> {
    if buffer.read_token()? != Token::VertexDesc {
        return Err(CmodError::format("Expected vertex description"));
    }

    let mut attributes: Vec<VertexAttribute> = Vec::new();

    loop {
        // Attribute type codes share the 16-bit stream with the closing
        // token, so this read cannot go through read_token.
        let code = buffer.read_i16()?;
        if code == Token::EndVertexDesc.code() {
            return Ok(attributes);
        }

        let attribute_type = AttributeType::from_code(code)
            .ok_or_else(|| CmodError::format("Unknown vertex attribute"))?;
        if attributes
            .iter()
            .any(|attribute| attribute.attribute_type() == attribute_type)
        {
            return Err(CmodError::format("Duplicate vertex attribute"));
        }

        let format = buffer.read_attribute_format()?;
        attributes.push(VertexAttribute::new(attribute_type, format));
    }
}

fn read_vertices<R: Read>(
    buffer: &mut DecodeBuffer<R>,
    attributes: &mut [VertexAttribute],
) -> Result<usize> {
    if buffer.read_token()? != Token::Vertices {
        return Err(CmodError::format("Expected vertices"));
    }

    let vertex_count = buffer.read_i32()?;
    if vertex_count <= 0 {
        return Err(CmodError::format("Vertex count out of range"));
    }
    let vertex_count = vertex_count as usize;

    for attribute in attributes.iter_mut() {
        attribute.reserve(vertex_count);
    }

    for _ in 0..vertex_count {
        for attribute in attributes.iter_mut() {
            attribute.read_vertex(buffer)?;
        }
    }

    Ok(vertex_count)
}

fn read_primitives<R: Read>(
    buffer: &mut DecodeBuffer<R>,
    material_count: usize,
    vertex_count: usize,
) -> Result<Vec<Primitive>> {
    let mut primitives = Vec::new();

    loop {
        let code = buffer.read_i16()?;
        if code == Token::EndMesh.code() {
            return Ok(primitives);
        }

        let primitive_type = PrimitiveType::from_code(code)
            .ok_or_else(|| CmodError::format("Unknown primitive type"))?;

        let material_index = buffer.read_i32()?;
        if material_index < 0 || material_index as usize >= material_count {
            return Err(CmodError::format("Material index out of range"));
        }

        let index_count = buffer.read_i32()?;
        if index_count <= 0 {
            return Err(CmodError::format("Index count out of range"));
        }

        let mut indices = Vec::with_capacity(index_count as usize);
        for _ in 0..index_count {
            let index = buffer.read_i32()?;
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
