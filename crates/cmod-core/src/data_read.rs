use crate::error::Result;

/// The encoding-agnostic slice of the token/value layer needed to read one
/// vertex attribute value.
///
/// Both the ASCII token reader and the binary decode buffer implement this,
/// so the per-vertex read loop is written once against the trait.
pub trait DataRead {
    /// Reads one 32-bit float.
    fn read_single(&mut self) -> Result<f32>;

    /// Reads four unsigned bytes.
    fn read_ubyte4(&mut self) -> Result<[u8; 4]>;
}
