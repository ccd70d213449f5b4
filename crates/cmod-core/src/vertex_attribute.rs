use std::slice;

use crate::data_read::DataRead;
use crate::error::{CmodError, Result};
use crate::variant::{AttributeFormat, Variant};

/// Semantic role of a per-vertex attribute.
///
/// At most one attribute of a given type may be declared per mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeType {
    Position,
    Color0,
    Color1,
    Normal,
    Tangent,
    Texture0,
    Texture1,
    Texture2,
    Texture3,
    PointSize,
    NextPosition,
    ScaleFactor,
}

impl AttributeType {
    /// Decodes the 16-bit code used by the binary encoding.
    pub fn from_code(code: i16) -> Option<Self> {
        Some(match code {
            0 => AttributeType::Position,
            1 => AttributeType::Color0,
            2 => AttributeType::Color1,
            3 => AttributeType::Normal,
            4 => AttributeType::Tangent,
            5 => AttributeType::Texture0,
            6 => AttributeType::Texture1,
            7 => AttributeType::Texture2,
            8 => AttributeType::Texture3,
            9 => AttributeType::PointSize,
            10 => AttributeType::NextPosition,
            11 => AttributeType::ScaleFactor,
            _ => return None,
        })
    }

    /// Parses the keyword used by the ASCII encoding.
    ///
    /// NextPosition and ScaleFactor have no ASCII spelling; the text form
    /// of the format predates them.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Some(match keyword {
            "position" => AttributeType::Position,
            "color0" => AttributeType::Color0,
            "color1" => AttributeType::Color1,
            "normal" => AttributeType::Normal,
            "tangent" => AttributeType::Tangent,
            "texcoord0" => AttributeType::Texture0,
            "texcoord1" => AttributeType::Texture1,
            "texcoord2" => AttributeType::Texture2,
            "texcoord3" => AttributeType::Texture3,
            "pointsize" => AttributeType::PointSize,
            _ => return None,
        })
    }
}

/// Append-only columnar storage for one declared vertex attribute.
///
/// The backing buffer is typed by the declared [`AttributeFormat`];
/// [`VertexAttribute::variants`] exposes it as a lazy, restartable sequence
/// of [`Variant`] values in insertion order for the assembly stage.
#[derive(Debug, Clone)]
pub struct VertexAttribute {
    attribute_type: AttributeType,
    data: AttributeData,
}

#[derive(Debug, Clone)]
enum AttributeData {
    Float1(Vec<f32>),
    Float2(Vec<[f32; 2]>),
    Float3(Vec<[f32; 3]>),
    Float4(Vec<[f32; 4]>),
    UByte4(Vec<[u8; 4]>),
}

impl VertexAttribute {
    pub fn new(attribute_type: AttributeType, format: AttributeFormat) -> Self {
        let data = match format {
            AttributeFormat::Float1 => AttributeData::Float1(Vec::new()),
            AttributeFormat::Float2 => AttributeData::Float2(Vec::new()),
            AttributeFormat::Float3 => AttributeData::Float3(Vec::new()),
            AttributeFormat::Float4 => AttributeData::Float4(Vec::new()),
            AttributeFormat::UByte4 => AttributeData::UByte4(Vec::new()),
        };
        Self {
            attribute_type,
            data,
        }
    }

    pub fn attribute_type(&self) -> AttributeType {
        self.attribute_type
    }

    pub fn format(&self) -> AttributeFormat {
        match self.data {
            AttributeData::Float1(..) => AttributeFormat::Float1,
            AttributeData::Float2(..) => AttributeFormat::Float2,
            AttributeData::Float3(..) => AttributeFormat::Float3,
            AttributeData::Float4(..) => AttributeFormat::Float4,
            AttributeData::UByte4(..) => AttributeFormat::UByte4,
        }
    }

    /// Number of vertices stored so far.
    pub fn len(&self) -> usize {
        match &self.data {
            AttributeData::Float1(data) => data.len(),
            AttributeData::Float2(data) => data.len(),
            AttributeData::Float3(data) => data.len(),
            AttributeData::Float4(data) => data.len(),
            AttributeData::UByte4(data) => data.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reserves capacity for the declared vertex count.
    pub fn reserve(&mut self, additional: usize) {
        match &mut self.data {
            AttributeData::Float1(data) => data.reserve(additional),
            AttributeData::Float2(data) => data.reserve(additional),
            AttributeData::Float3(data) => data.reserve(additional),
            AttributeData::Float4(data) => data.reserve(additional),
            AttributeData::UByte4(data) => data.reserve(additional),
        }
    }

    /// Reads one vertex's value for this attribute and appends it.
    ///
    /// Dispatches on the declared format once per attribute per vertex; the
    /// component reads go through the shared [`DataRead`] contract.
    pub fn read_vertex<R: DataRead + ?Sized>(&mut self, reader: &mut R) -> Result<()> {
        match &mut self.data {
            AttributeData::Float1(data) => {
                data.push(reader.read_single()?);
            }
            AttributeData::Float2(data) => {
                let a = reader.read_single()?;
                let b = reader.read_single()?;
                data.push([a, b]);
            }
            AttributeData::Float3(data) => {
                let a = reader.read_single()?;
                let b = reader.read_single()?;
                let c = reader.read_single()?;
                data.push([a, b, c]);
            }
            AttributeData::Float4(data) => {
                let a = reader.read_single()?;
                let b = reader.read_single()?;
                let c = reader.read_single()?;
                let d = reader.read_single()?;
                data.push([a, b, c, d]);
            }
            AttributeData::UByte4(data) => {
                data.push(reader.read_ubyte4()?);
            }
        }
        Ok(())
    }

    /// Appends one value directly; its format tag must match the declared
    /// format.
    pub fn push(&mut self, value: Variant) -> Result<()> {
        match (&mut self.data, value) {
            (AttributeData::Float1(data), Variant::Float1(a)) => data.push(a),
            (AttributeData::Float2(data), Variant::Float2(a, b)) => data.push([a, b]),
            (AttributeData::Float3(data), Variant::Float3(a, b, c)) => data.push([a, b, c]),
            (AttributeData::Float4(data), Variant::Float4(a, b, c, d)) => data.push([a, b, c, d]),
            (AttributeData::UByte4(data), Variant::UByte4(a, b, c, d)) => data.push([a, b, c, d]),
            _ => return Err(CmodError::format("Attribute value format mismatch")),
        }
        Ok(())
    }

    /// Iterates the stored values as [`Variant`]s, one per vertex, in
    /// insertion order.
    pub fn variants(&self) -> VariantIter<'_> {
        let inner = match &self.data {
            AttributeData::Float1(data) => Inner::Float1(data.iter()),
            AttributeData::Float2(data) => Inner::Float2(data.iter()),
            AttributeData::Float3(data) => Inner::Float3(data.iter()),
            AttributeData::Float4(data) => Inner::Float4(data.iter()),
            AttributeData::UByte4(data) => Inner::UByte4(data.iter()),
        };
        VariantIter { inner }
    }
}

/// Lazy sequence of [`Variant`] values over one attribute buffer.
pub struct VariantIter<'a> {
    inner: Inner<'a>,
}

enum Inner<'a> {
    Float1(slice::Iter<'a, f32>),
    Float2(slice::Iter<'a, [f32; 2]>),
    Float3(slice::Iter<'a, [f32; 3]>),
    Float4(slice::Iter<'a, [f32; 4]>),
    UByte4(slice::Iter<'a, [u8; 4]>),
}

impl Iterator for VariantIter<'_> {
    type Item = Variant;

    fn next(&mut self) -> Option<Variant> {
        match &mut self.inner {
            Inner::Float1(iter) => iter.next().map(|&a| Variant::Float1(a)),
            Inner::Float2(iter) => iter.next().map(|&[a, b]| Variant::Float2(a, b)),
            Inner::Float3(iter) => iter.next().map(|&[a, b, c]| Variant::Float3(a, b, c)),
            Inner::Float4(iter) => iter.next().map(|&[a, b, c, d]| Variant::Float4(a, b, c, d)),
            Inner::UByte4(iter) => iter.next().map(|&[a, b, c, d]| Variant::UByte4(a, b, c, d)),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.inner {
            Inner::Float1(iter) => iter.size_hint(),
            Inner::Float2(iter) => iter.size_hint(),
            Inner::Float3(iter) => iter.size_hint(),
            Inner::Float4(iter) => iter.size_hint(),
            Inner::UByte4(iter) => iter.size_hint(),
        }
    }
}

impl ExactSizeIterator for VariantIter<'_> {}
