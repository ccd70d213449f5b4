/// Draw topology of one primitive record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveType {
    TriList,
    TriStrip,
    TriFan,
    LineList,
    LineStrip,
    PointList,
    SpriteList,
}

impl PrimitiveType {
    /// Decodes the 16-bit code used by the binary encoding.
    pub fn from_code(code: i16) -> Option<Self> {
        Some(match code {
            0 => PrimitiveType::TriList,
            1 => PrimitiveType::TriStrip,
            2 => PrimitiveType::TriFan,
            3 => PrimitiveType::LineList,
            4 => PrimitiveType::LineStrip,
            5 => PrimitiveType::PointList,
            6 => PrimitiveType::SpriteList,
            _ => return None,
        })
    }

    /// Parses the keyword used by the ASCII encoding.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Some(match keyword {
            "trilist" => PrimitiveType::TriList,
            "tristrip" => PrimitiveType::TriStrip,
            "trifan" => PrimitiveType::TriFan,
            "linelist" => PrimitiveType::LineList,
            "linestrip" => PrimitiveType::LineStrip,
            "points" => PrimitiveType::PointList,
            "sprites" => PrimitiveType::SpriteList,
            _ => return None,
        })
    }

    /// Output category this topology collapses to. Sprites lose their size
    /// and become plain points.
    pub fn categorize(self) -> PrimitiveCategory {
        match self {
            PrimitiveType::TriList | PrimitiveType::TriStrip | PrimitiveType::TriFan => {
                PrimitiveCategory::Triangle
            }
            PrimitiveType::LineList | PrimitiveType::LineStrip => PrimitiveCategory::Line,
            PrimitiveType::PointList | PrimitiveType::SpriteList => PrimitiveCategory::Point,
        }
    }
}

/// Output-format category of an expanded primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveCategory {
    Triangle,
    Line,
    Point,
}

impl PrimitiveCategory {
    /// The OBJ statement keyword for this category.
    pub fn command(self) -> char {
        match self {
            PrimitiveCategory::Triangle => 'f',
            PrimitiveCategory::Line => 'l',
            PrimitiveCategory::Point => 'p',
        }
    }
}

/// One decoded primitive record: a topology, a material reference and the
/// vertex indices it consumes. The decoder guarantees the material index is
/// in range of the document's materials and every vertex index is in range
/// of the owning mesh's vertex count.
#[derive(Debug, Clone)]
pub struct Primitive {
    pub primitive_type: PrimitiveType,
    pub material_index: usize,
    pub indices: Vec<u32>,
}
