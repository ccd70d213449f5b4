use std::io::{BufReader, Read};

use cmod_core::{CmodError, Model, Result};

mod ascii;
mod binary;

/// Decodes a CMOD document from `reader`.
///
/// The first 16 bytes select the encoding; the rest of the stream is
/// handed to the matching decoder. Both encodings produce identical models
/// for equivalent input.
pub fn read_cmod<R: Read>(mut reader: R) -> Result<Model> {
    let mut header = [0u8; 16];
    let mut filled = 0;
    while filled < header.len() {
        let bytes_read = reader.read(&mut header[filled..])?;
        if bytes_read == 0 {
            return Err(CmodError::format("Unknown format"));
        }
        filled += bytes_read;
    }

    match &header {
        b"#celmodel__ascii" => ascii::read(BufReader::new(reader)),
        b"#celmodel_binary" => binary::read(reader),
        _ => Err(CmodError::format("Unknown CMOD format")),
    }
}
