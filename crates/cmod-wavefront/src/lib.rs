//! Assembly of decoded CMOD models into an indexed Wavefront representation.
//!
//! The assembler welds the attribute-interleaved vertex streams into three
//! deduplicated pools (positions, texture coordinates, normals) and expands
//! each variable-topology primitive into the flat triangle/line/point
//! records an OBJ file can express, grouped per material.

pub mod pool;
pub mod vertex_info;
pub mod wavefront;

pub use pool::Pool;
pub use vertex_info::VertexInfo;
pub use wavefront::{ObjPrimitive, WavefrontMesh};
