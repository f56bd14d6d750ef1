//! Primitive encoding for vector files.
//!
//! Byte order is little-endian throughout:
//!
//! - string: `u32` byte length, then that many UTF-8 bytes
//! - int32: 4 bytes
//! - float32 array: `n` x 4 bytes, no length prefix (the reader knows `n`)

use std::io::{self, Read, Write};

/// Upper bound on a decoded string, guards against corrupt length prefixes
pub const MAX_STRING_LEN: usize = 1 << 20;

/// Upper bound on a float array (and so on a file's dimension)
pub const MAX_DIMENSION: usize = 1 << 20;

/// Write side of the vector file protocol
pub trait VectorOutput {
    fn write_string(&mut self, s: &str) -> io::Result<()>;
    fn write_int32(&mut self, value: i32) -> io::Result<()>;
    fn write_float32_array(&mut self, values: &[f32]) -> io::Result<()>;
}

impl<W: Write + ?Sized> VectorOutput for W {
    fn write_string(&mut self, s: &str) -> io::Result<()> {
        let len = u32::try_from(s.len())
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "string too long"))?;
        self.write_all(&len.to_le_bytes())?;
        self.write_all(s.as_bytes())
    }

    #[inline]
    fn write_int32(&mut self, value: i32) -> io::Result<()> {
        self.write_all(&value.to_le_bytes())
    }

    fn write_float32_array(&mut self, values: &[f32]) -> io::Result<()> {
        let mut buf = Vec::with_capacity(values.len() * 4);
        for v in values {
            buf.extend_from_slice(&v.to_le_bytes());
        }
        self.write_all(&buf)
    }
}

/// Read side of the vector file protocol
pub trait VectorInput {
    /// Read a string, or `None` on a clean end of stream before its first byte
    fn read_string_or_eof(&mut self) -> io::Result<Option<String>>;
    fn read_int32(&mut self) -> io::Result<i32>;
    fn read_float32_array(&mut self, len: usize) -> io::Result<Vec<f32>>;

    fn read_string(&mut self) -> io::Result<String> {
        self.read_string_or_eof()?
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "expected string"))
    }
}

impl<R: Read + ?Sized> VectorInput for R {
    fn read_string_or_eof(&mut self) -> io::Result<Option<String>> {
        let mut len_buf = [0u8; 4];
        let mut filled = 0;
        while filled < len_buf.len() {
            match self.read(&mut len_buf[filled..]) {
                Ok(0) if filled == 0 => return Ok(None),
                Ok(0) => {
                    return Err(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        "truncated string length",
                    ))
                }
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }

        let len = u32::from_le_bytes(len_buf) as usize;
        if len > MAX_STRING_LEN {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("string length {} exceeds limit {}", len, MAX_STRING_LEN),
            ));
        }

        let mut bytes = vec![0u8; len];
        self.read_exact(&mut bytes)?;
        String::from_utf8(bytes)
            .map(Some)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    #[inline]
    fn read_int32(&mut self) -> io::Result<i32> {
        let mut buf = [0u8; 4];
        self.read_exact(&mut buf)?;
        Ok(i32::from_le_bytes(buf))
    }

    fn read_float32_array(&mut self, len: usize) -> io::Result<Vec<f32>> {
        let byte_len = len
            .checked_mul(4)
            .filter(|_| len <= MAX_DIMENSION)
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("float array length {} exceeds limit {}", len, MAX_DIMENSION),
                )
            })?;
        let mut bytes = vec![0u8; byte_len];
        self.read_exact(&mut bytes)?;
        Ok(bytes
            .chunks_exact(4)
            .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect())
    }
}
