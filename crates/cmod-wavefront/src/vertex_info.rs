use std::fmt;

/// 1-based pool indices for one original vertex.
///
/// A value of `-1` marks an attribute stream the mesh did not carry; the
/// `Display` impl renders the OBJ slash forms accordingly (`v`, `v/vt`,
/// `v//vn`, `v/vt/vn`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexInfo {
    pub position: i32,
    pub tex_coord: i32,
    pub normal: i32,
}

impl fmt::Display for VertexInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tex_coord < 0 {
            if self.normal < 0 {
                write!(f, "{}", self.position)
            } else {
                write!(f, "{}//{}", self.position, self.normal)
            }
        } else if self.normal < 0 {
            write!(f, "{}/{}", self.position, self.tex_coord)
        } else {
            write!(f, "{}/{}/{}", self.position, self.tex_coord, self.normal)
        }
    }
}
