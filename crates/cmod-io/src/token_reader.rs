use std::io::BufRead;

use cmod_core::{CmodError, Color, DataRead, Result};

/// Whitespace tokenizer for the text encoding.
///
/// Tokens are runs of non-blank characters separated by spaces and tabs;
/// `#` starts a comment running to the end of the line, and a `"`-delimited
/// string literal is one token (quotes included) that may not span lines.
pub struct TokenReader<R> {
    reader: R,
    line: String,
    position: usize,
}

impl<R: BufRead> TokenReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
            position: 0,
        }
    }

    /// Returns the next token, or `None` at end of input.
    pub fn try_next_token(&mut self) -> Result<Option<String>> {
        loop {
            if self.position >= self.line.len() {
                self.line.clear();
                if self.reader.read_line(&mut self.line)? == 0 {
                    return Ok(None);
                }
                while self.line.ends_with('\n') || self.line.ends_with('\r') {
                    self.line.pop();
                }
                self.position = 0;
            }

            let bytes = self.line.as_bytes();
            while self.position < bytes.len() {
                let current = self.position;
                match bytes[current] {
                    b' ' | b'\t' => self.position += 1,
                    b'"' => {
                        let Some(end_quote) = self.line[current + 1..].find('"') else {
                            return Err(CmodError::format("Missing string literal terminator"));
                        };
                        let end_quote = current + 1 + end_quote;
                        self.position = end_quote + 1;
                        return Ok(Some(self.line[current..=end_quote].to_string()));
                    }
                    b'#' => self.position = self.line.len(),
                    _ => {
                        let end = bytes[current + 1..]
                            .iter()
                            .position(|&byte| byte == b' ' || byte == b'\t')
                            .map(|offset| current + 1 + offset)
                            .unwrap_or(bytes.len());
                        self.position = if end < bytes.len() { end + 1 } else { end };
                        return Ok(Some(self.line[current..end].to_string()));
                    }
                }
            }
        }
    }

    /// Returns the next token, failing at end of input.
    pub fn next_token(&mut self) -> Result<String> {
        self.try_next_token()?
            .ok_or_else(|| CmodError::format("Unexpected end of stream"))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        let token = self.next_token()?;
        token
            .parse()
            .map_err(|_| CmodError::format("Invalid number"))
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        let token = self.next_token()?;
        token
            .parse()
            .map_err(|_| CmodError::format("Invalid number"))
    }

    pub fn read_color(&mut self) -> Result<Color> {
        let red = self.read_f32()?;
        let green = self.read_f32()?;
        let blue = self.read_f32()?;
        Ok(Color::new(red, green, blue))
    }

    /// Returns the contents of a quoted string token, without the quotes.
    pub fn read_quoted(&mut self) -> Result<String> {
        let token = self.next_token()?;
        if token.len() >= 2 && token.starts_with('"') && token.ends_with('"') {
            Ok(token[1..token.len() - 1].to_string())
        } else {
            Err(CmodError::format("Expected quoted string"))
        }
    }

    fn read_u8(&mut self) -> Result<u8> {
        let token = self.next_token()?;
        token
            .parse()
            .map_err(|_| CmodError::format("Invalid number"))
    }
}

impl<R: BufRead> DataRead for TokenReader<R> {
    fn read_single(&mut self) -> Result<f32> {
        self.read_f32()
    }

    fn read_ubyte4(&mut self) -> Result<[u8; 4]> {
        let a = self.read_u8()?;
        let b = self.read_u8()?;
        let c = self.read_u8()?;
        let d = self.read_u8()?;
        Ok([a, b, c, d])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<String> {
        let mut reader = TokenReader::new(input.as_bytes());
        let mut tokens = Vec::new();
        while let Some(token) = reader.try_next_token().unwrap() {
            tokens.push(token);
        }
        tokens
    }

    #[test]
    fn test_splits_on_spaces_and_tabs() {
        assert_eq!(tokens("one two\tthree\n four"), ["one", "two", "three", "four"]);
    }

    #[test]
    fn test_comment_runs_to_end_of_line() {
        assert_eq!(tokens("mesh # trailing words\nvertices"), ["mesh", "vertices"]);
    }

    #[test]
    fn test_quoted_token_keeps_quotes() {
        assert_eq!(tokens("texture0 \"a b.png\""), ["texture0", "\"a b.png\""]);
    }

    #[test]
    fn test_unterminated_quote_fails() {
        let mut reader = TokenReader::new("\"open".as_bytes());
        assert_eq!(
            reader.try_next_token().unwrap_err(),
            CmodError::format("Missing string literal terminator")
        );
    }

    #[test]
    fn test_crlf_line_endings() {
        assert_eq!(tokens("one\r\ntwo\r\n"), ["one", "two"]);
    }

    #[test]
    fn test_next_token_fails_at_end() {
        let mut reader = TokenReader::new("".as_bytes());
        assert_eq!(
            reader.next_token().unwrap_err(),
            CmodError::format("Unexpected end of stream")
        );
    }

    #[test]
    fn test_read_quoted_rejects_bare_token() {
        let mut reader = TokenReader::new("bare".as_bytes());
        assert_eq!(
            reader.read_quoted().unwrap_err(),
            CmodError::format("Expected quoted string")
        );
    }

    #[test]
    fn test_numeric_reads() {
        let mut reader = TokenReader::new("42 -7 0.5 1e3".as_bytes());
        assert_eq!(reader.read_i32().unwrap(), 42);
        assert_eq!(reader.read_i32().unwrap(), -7);
        assert_eq!(reader.read_f32().unwrap(), 0.5);
        assert_eq!(reader.read_f32().unwrap(), 1000.0);
    }

    #[test]
    fn test_data_read_ubyte4() {
        let mut reader = TokenReader::new("255 0 128 1".as_bytes());
        assert_eq!(reader.read_ubyte4().unwrap(), [255, 0, 128, 1]);
    }

    #[test]
    fn test_invalid_number_fails() {
        let mut reader = TokenReader::new("abc".as_bytes());
        assert_eq!(
            reader.read_i32().unwrap_err(),
            CmodError::format("Invalid number")
        );
    }
}
