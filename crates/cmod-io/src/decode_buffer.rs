use std::io::Read;

use byteorder::{ByteOrder, LittleEndian};
use cmod_core::{
    AttributeFormat, BlendMode, CmodError, Color, DataRead, Result, TextureSemantic, Token,
};

const DEFAULT_CAPACITY: usize = 4096;

// Type tags prefixing material property values in the binary encoding.
const DATA_FLOAT1: i16 = 1;
const DATA_STRING: i16 = 5;
const DATA_COLOR: i16 = 7;
const DATA_MAX: i16 = 7;

/// Buffered little-endian reader for the binary encoding.
///
/// Maintains a sliding window over the underlying stream; a read that
/// overruns the window compacts it and refills from the source. The buffer
/// grows only when a single value (a string) is longer than the window.
pub struct DecodeBuffer<R> {
    reader: R,
    buffer: Vec<u8>,
    length: usize,
    position: usize,
}

impl<R: Read> DecodeBuffer<R> {
    pub fn new(reader: R) -> Self {
        Self::with_capacity(reader, DEFAULT_CAPACITY)
    }

    pub fn with_capacity(reader: R, capacity: usize) -> Self {
        Self {
            reader,
            buffer: vec![0; capacity.max(1)],
            length: 0,
            position: 0,
        }
    }

    /// Ensures up to `length` bytes are buffered; returns how many are
    /// actually available, which is less only at end of stream.
    fn fill(&mut self, length: usize) -> Result<usize> {
        let remaining = self.length - self.position;
        if remaining >= length {
            return Ok(length);
        }

        self.buffer.copy_within(self.position..self.length, 0);
        self.position = 0;
        self.length = remaining;
        if self.buffer.len() < length {
            self.buffer.resize(length, 0);
        }
        while self.length < length {
            let bytes_read = self.reader.read(&mut self.buffer[self.length..])?;
            if bytes_read == 0 {
                break;
            }
            self.length += bytes_read;
        }
        Ok(self.length.min(length))
    }

    /// Reads up to `length` bytes, short only at end of stream.
    fn read_bytes(&mut self, length: usize) -> Result<&[u8]> {
        let available = self.fill(length)?;
        let start = self.position;
        self.position += available;
        Ok(&self.buffer[start..start + available])
    }

    fn read_bytes_required(&mut self, length: usize) -> Result<&[u8]> {
        let available = self.fill(length)?;
        if available < length {
            return Err(CmodError::format("Unexpected end of stream"));
        }
        let start = self.position;
        self.position += length;
        Ok(&self.buffer[start..start + length])
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(LittleEndian::read_i16(self.read_bytes_required(2)?))
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(LittleEndian::read_u16(self.read_bytes_required(2)?))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(LittleEndian::read_i32(self.read_bytes_required(4)?))
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(LittleEndian::read_f32(self.read_bytes_required(4)?))
    }

    pub fn read_token(&mut self) -> Result<Token> {
        let code = self.read_i16()?;
        Token::from_code(code).ok_or_else(|| CmodError::format("Invalid token type"))
    }

    /// Reads the next token, or `None` at a clean end of stream. A single
    /// trailing byte is an error.
    pub fn try_read_token(&mut self) -> Result<Option<Token>> {
        let bytes = self.read_bytes(2)?;
        match bytes.len() {
            0 => Ok(None),
            1 => Err(CmodError::format("Partial token")),
            _ => {
                let code = LittleEndian::read_i16(bytes);
                Token::from_code(code)
                    .map(Some)
                    .ok_or_else(|| CmodError::format("Invalid token type"))
            }
        }
    }

    pub fn read_texture_semantic(&mut self) -> Result<TextureSemantic> {
        let code = self.read_i16()?;
        TextureSemantic::from_code(code)
            .ok_or_else(|| CmodError::format("Invalid texture semantic"))
    }

    pub fn read_attribute_format(&mut self) -> Result<AttributeFormat> {
        let code = self.read_i16()?;
        AttributeFormat::from_code(code)
            .ok_or_else(|| CmodError::format("Invalid attribute format"))
    }

    pub fn read_blend_mode(&mut self) -> Result<BlendMode> {
        let code = self.read_i16()?;
        BlendMode::from_code(code).ok_or_else(|| CmodError::format("Invalid blend mode"))
    }

    /// Reads a type-tagged float property value.
    pub fn read_tagged_f32(&mut self) -> Result<f32> {
        if self.read_data_type()? != DATA_FLOAT1 {
            return Err(CmodError::format("Expected data type float1"));
        }
        self.read_f32()
    }

    /// Reads a type-tagged color property value.
    pub fn read_tagged_color(&mut self) -> Result<Color> {
        if self.read_data_type()? != DATA_COLOR {
            return Err(CmodError::format("Expected data type color"));
        }
        let red = self.read_f32()?;
        let green = self.read_f32()?;
        let blue = self.read_f32()?;
        Ok(Color::new(red, green, blue))
    }

    /// Reads a type-tagged length-prefixed string value.
    pub fn read_tagged_string(&mut self) -> Result<String> {
        if self.read_data_type()? != DATA_STRING {
            return Err(CmodError::format("Expected data type string"));
        }
        let length = self.read_u16()? as usize;
        let bytes = self.read_bytes_required(length)?;
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }

    fn read_data_type(&mut self) -> Result<i16> {
        let code = self.read_i16()?;
        if (DATA_FLOAT1..=DATA_MAX).contains(&code) {
            Ok(code)
        } else {
            Err(CmodError::format("Invalid data type"))
        }
    }
}

impl<R: Read> DataRead for DecodeBuffer<R> {
    // Vertex data is untagged; components are raw little-endian values.
    fn read_single(&mut self) -> Result<f32> {
        self.read_f32()
    }

    fn read_ubyte4(&mut self) -> Result<[u8; 4]> {
        let bytes = self.read_bytes_required(4)?;
        Ok([bytes[0], bytes[1], bytes[2], bytes[3]])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(bytes: &[u8]) -> DecodeBuffer<&[u8]> {
        DecodeBuffer::new(bytes)
    }

    #[test]
    fn test_little_endian_reads() {
        let mut reader = buffer(&[0xe9, 0x03, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x80, 0x3f]);
        assert_eq!(reader.read_i16().unwrap(), 1001);
        assert_eq!(reader.read_i32().unwrap(), 1);
        assert_eq!(reader.read_f32().unwrap(), 1.0);
    }

    #[test]
    fn test_refill_across_window_boundary() {
        let bytes: Vec<u8> = (0..64).collect();
        let mut reader = DecodeBuffer::with_capacity(bytes.as_slice(), 4);
        for expected in (0..64).step_by(4) {
            let value = reader.read_i32().unwrap();
            assert_eq!(value.to_le_bytes()[0], expected);
        }
    }

    #[test]
    fn test_string_longer_than_window() {
        let mut bytes = vec![DATA_STRING as u8, 0, 16, 0];
        bytes.extend_from_slice(b"0123456789abcdef");
        let mut reader = DecodeBuffer::with_capacity(bytes.as_slice(), 4);
        assert_eq!(reader.read_tagged_string().unwrap(), "0123456789abcdef");
    }

    #[test]
    fn test_try_read_token() {
        let mut reader = buffer(&[0xe9, 0x03]);
        assert_eq!(reader.try_read_token().unwrap(), Some(Token::Material));
        assert_eq!(reader.try_read_token().unwrap(), None);
    }

    #[test]
    fn test_partial_token_fails() {
        let mut reader = buffer(&[0xe9]);
        assert_eq!(
            reader.try_read_token().unwrap_err(),
            CmodError::format("Partial token")
        );
    }

    #[test]
    fn test_unassigned_token_code_fails() {
        let bytes = (1008i16).to_le_bytes();
        let mut reader = buffer(&bytes);
        assert_eq!(
            reader.read_token().unwrap_err(),
            CmodError::format("Invalid token type")
        );
    }

    #[test]
    fn test_tagged_color() {
        let mut bytes = (DATA_COLOR).to_le_bytes().to_vec();
        bytes.extend_from_slice(&0.25f32.to_le_bytes());
        bytes.extend_from_slice(&0.5f32.to_le_bytes());
        bytes.extend_from_slice(&1.0f32.to_le_bytes());
        let mut reader = buffer(&bytes);
        assert_eq!(reader.read_tagged_color().unwrap(), Color::new(0.25, 0.5, 1.0));
    }

    #[test]
    fn test_wrong_tag_fails() {
        let mut bytes = (DATA_FLOAT1).to_le_bytes().to_vec();
        bytes.extend_from_slice(&1.0f32.to_le_bytes());
        let mut reader = buffer(&bytes);
        assert_eq!(
            reader.read_tagged_color().unwrap_err(),
            CmodError::format("Expected data type color")
        );
    }

    #[test]
    fn test_invalid_tag_fails() {
        let bytes = (9i16).to_le_bytes();
        let mut reader = buffer(&bytes);
        assert_eq!(
            reader.read_tagged_f32().unwrap_err(),
            CmodError::format("Invalid data type")
        );
    }

    #[test]
    fn test_truncated_value_fails() {
        let mut reader = buffer(&[0x00, 0x00, 0x80]);
        assert_eq!(
            reader.read_f32().unwrap_err(),
            CmodError::format("Unexpected end of stream")
        );
    }

    #[test]
    fn test_data_read_ubyte4() {
        let mut reader = buffer(&[1, 2, 3, 4]);
        assert_eq!(reader.read_ubyte4().unwrap(), [1, 2, 3, 4]);
    }
}
