//! Reading cipher keys from the command line or a stream

use std::io::Read;

use zeroize::Zeroizing;

use crate::error::{CrackboxError, ErrorCategory, ErrorKind, Result};

/// Source of key text for encode and decode.
pub trait KeyReader {
    /// Key text, wiped from memory when dropped.
    fn read_key(&mut self) -> Result<Zeroizing<String>>;
}

/// Returns a fixed key, as given with `--key`.
pub struct ConstantKeyReader {
    key: Zeroizing<String>,
}

impl ConstantKeyReader {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: Zeroizing::new(key.into()),
        }
    }
}

impl KeyReader for ConstantKeyReader {
    fn read_key(&mut self) -> Result<Zeroizing<String>> {
        Ok(self.key.clone())
    }
}

/// Reads the whole of `reader` as the key. Trailing line endings are dropped,
/// so `echo LEMON | crackbox ... --key-stdin` works.
pub struct ReaderKeyReader {
    reader: Box<dyn Read>,
}

impl ReaderKeyReader {
    pub fn new(reader: Box<dyn Read>) -> Self {
        Self { reader }
    }
}

impl KeyReader for ReaderKeyReader {
    fn read_key(&mut self) -> Result<Zeroizing<String>> {
        let mut data = Zeroizing::new(String::new());
        self.reader.read_to_string(&mut data).map_err(|e| {
            CrackboxError::with_kind_and_source(
                ErrorCategory::Internal,
                ErrorKind::Io,
                format!("error reading key: {}", e),
                e,
            )
        })?;
        let trimmed_len = data.trim_end_matches(['\r', '\n']).len();
        data.truncate(trimmed_len);
        if data.trim().is_empty() {
            return Err(CrackboxError::invalid_key("key input is empty"));
        }
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_constant_reader() {
        let mut reader = ConstantKeyReader::new("LEMON");
        assert_eq!(reader.read_key().unwrap().as_str(), "LEMON");
        // Reusable.
        assert_eq!(reader.read_key().unwrap().as_str(), "LEMON");
    }

    #[test]
    fn test_reader_trims_line_ending() {
        let mut reader = ReaderKeyReader::new(Box::new(Cursor::new(b"5,8\r\n".to_vec())));
        assert_eq!(reader.read_key().unwrap().as_str(), "5,8");
    }

    #[test]
    fn test_reader_keeps_inner_text() {
        let mut reader = ReaderKeyReader::new(Box::new(Cursor::new(b"ADD 3;RAIL 2\n".to_vec())));
        assert_eq!(reader.read_key().unwrap().as_str(), "ADD 3;RAIL 2");
    }

    #[test]
    fn test_reader_empty() {
        let mut reader = ReaderKeyReader::new(Box::new(Cursor::new(b"\n".to_vec())));
        let err = reader.read_key().expect_err("empty key");
        assert_eq!(err.kind, Some(ErrorKind::InvalidKey));
    }

    #[test]
    fn test_reader_invalid_utf8() {
        let mut reader = ReaderKeyReader::new(Box::new(Cursor::new(vec![0xff, 0xfe])));
        let err = reader.read_key().expect_err("not utf-8");
        assert_eq!(err.kind, Some(ErrorKind::Io));
    }
}
