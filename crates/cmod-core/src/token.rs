/// Structural keywords of a CMOD document.
///
/// Each token has a literal spelling in the ASCII encoding and a fixed
/// 16-bit code in the binary encoding. Only these are legal at statement
/// position; any other value is a decode error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    Material,
    EndMaterial,
    Diffuse,
    Specular,
    SpecularPower,
    Opacity,
    Texture,
    Mesh,
    EndMesh,
    VertexDesc,
    EndVertexDesc,
    Vertices,
    Emissive,
    Blend,
}

impl Token {
    /// Decodes the little-endian 16-bit code used by the binary encoding.
    ///
    /// Code 1008 was never assigned by the format.
    pub fn from_code(code: i16) -> Option<Token> {
        Some(match code {
            1001 => Token::Material,
            1002 => Token::EndMaterial,
            1003 => Token::Diffuse,
            1004 => Token::Specular,
            1005 => Token::SpecularPower,
            1006 => Token::Opacity,
            1007 => Token::Texture,
            1009 => Token::Mesh,
            1010 => Token::EndMesh,
            1011 => Token::VertexDesc,
            1012 => Token::EndVertexDesc,
            1013 => Token::Vertices,
            1014 => Token::Emissive,
            1015 => Token::Blend,
            _ => return None,
        })
    }

    /// The binary encoding's code for this token.
    pub fn code(self) -> i16 {
        match self {
            Token::Material => 1001,
            Token::EndMaterial => 1002,
            Token::Diffuse => 1003,
            Token::Specular => 1004,
            Token::SpecularPower => 1005,
            Token::Opacity => 1006,
            Token::Texture => 1007,
            Token::Mesh => 1009,
            Token::EndMesh => 1010,
            Token::VertexDesc => 1011,
            Token::EndVertexDesc => 1012,
            Token::Vertices => 1013,
            Token::Emissive => 1014,
            Token::Blend => 1015,
        }
    }
}
