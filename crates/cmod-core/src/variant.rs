use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem;

/// On-disk shape of one attribute's per-vertex value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeFormat {
    Float1,
    Float2,
    Float3,
    Float4,
    UByte4,
}

impl AttributeFormat {
    /// Decodes the 16-bit code used by the binary encoding.
    pub fn from_code(code: i16) -> Option<Self> {
        Some(match code {
            0 => AttributeFormat::Float1,
            1 => AttributeFormat::Float2,
            2 => AttributeFormat::Float3,
            3 => AttributeFormat::Float4,
            4 => AttributeFormat::UByte4,
            _ => return None,
        })
    }

    /// Parses the keyword used by the ASCII encoding.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Some(match keyword {
            "f1" => AttributeFormat::Float1,
            "f2" => AttributeFormat::Float2,
            "f3" => AttributeFormat::Float3,
            "f4" => AttributeFormat::Float4,
            "ub4" => AttributeFormat::UByte4,
            _ => return None,
        })
    }
}

/// A single vertex attribute value, tagged by its format.
///
/// This is both the element type yielded by attribute buffers and the key
/// used for geometry welding. Equality requires matching tags and exact
/// component equality: floats compare by IEEE-754 semantics, so a value
/// containing `NaN` never equals anything, including itself. Hashing uses
/// the bit representation, keeping it consistent with equality for every
/// non-`NaN` value; `NaN`-bearing values hash by representation but are
/// never welded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Variant {
    Float1(f32),
    Float2(f32, f32),
    Float3(f32, f32, f32),
    Float4(f32, f32, f32, f32),
    UByte4(u8, u8, u8, u8),
}

// Marker only: reflexivity does not hold for NaN components, which means a
// NaN vertex value is simply never deduplicated.
impl Eq for Variant {}

impl Hash for Variant {
    fn hash<H: Hasher>(&self, state: &mut H) {
        mem::discriminant(self).hash(state);
        match *self {
            Variant::Float1(a) => {
                a.to_bits().hash(state);
            }
            Variant::Float2(a, b) => {
                a.to_bits().hash(state);
                b.to_bits().hash(state);
            }
            Variant::Float3(a, b, c) => {
                a.to_bits().hash(state);
                b.to_bits().hash(state);
                c.to_bits().hash(state);
            }
            Variant::Float4(a, b, c, d) => {
                a.to_bits().hash(state);
                b.to_bits().hash(state);
                c.to_bits().hash(state);
                d.to_bits().hash(state);
            }
            Variant::UByte4(a, b, c, d) => {
                (a, b, c, d).hash(state);
            }
        }
    }
}

impl Variant {
    /// The format tag of this value.
    pub fn format(&self) -> AttributeFormat {
        match self {
            Variant::Float1(..) => AttributeFormat::Float1,
            Variant::Float2(..) => AttributeFormat::Float2,
            Variant::Float3(..) => AttributeFormat::Float3,
            Variant::Float4(..) => AttributeFormat::Float4,
            Variant::UByte4(..) => AttributeFormat::UByte4,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Variant::Float1(a) => write!(f, "{a}"),
            Variant::Float2(a, b) => write!(f, "{a} {b}"),
            Variant::Float3(a, b, c) => write!(f, "{a} {b} {c}"),
            Variant::Float4(a, b, c, d) => write!(f, "{a} {b} {c} {d}"),
            Variant::UByte4(a, b, c, d) => write!(f, "{a} {b} {c} {d}"),
        }
    }
}
