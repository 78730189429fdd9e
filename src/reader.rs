use std::io::{self, BufRead, Read};

use byteorder::{LittleEndian, ReadBytesExt};

use crate::error::{LevelError, Result};

/// Forward-only reader over a level byte stream. All reads are little-endian.
///
/// There is no seeking: every decoder must consume exactly the bytes its record occupies, even the
/// ones it throws away, or everything after it is read from the wrong offset.
#[derive(Debug)]
pub struct LevelReader<R> {
    inner: R,
    pos: u64,
}

impl<R: BufRead> LevelReader<R> {
    pub fn new(inner: R) -> Self {
        LevelReader { inner, pos: 0 }
    }

    /// Number of bytes consumed so far.
    pub fn position(&self) -> u64 {
        self.pos
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    /// True when no further bytes remain. Does not consume anything.
    pub fn is_at_end(&mut self) -> Result<bool> {
        Ok(self.inner.fill_buf()?.is_empty())
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        let start = self.pos;
        let v = self.inner.read_u8().map_err(|e| truncated(e, start, 1))?;
        self.pos += 1;
        Ok(v)
    }

    pub fn read_s8(&mut self) -> Result<i8> {
        let start = self.pos;
        let v = self.inner.read_i8().map_err(|e| truncated(e, start, 1))?;
        self.pos += 1;
        Ok(v)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        let start = self.pos;
        let v = self
            .inner
            .read_u16::<LittleEndian>()
            .map_err(|e| truncated(e, start, 2))?;
        self.pos += 2;
        Ok(v)
    }

    pub fn read_s16(&mut self) -> Result<i16> {
        let start = self.pos;
        let v = self
            .inner
            .read_i16::<LittleEndian>()
            .map_err(|e| truncated(e, start, 2))?;
        self.pos += 2;
        Ok(v)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        let start = self.pos;
        let v = self
            .inner
            .read_u32::<LittleEndian>()
            .map_err(|e| truncated(e, start, 4))?;
        self.pos += 4;
        Ok(v)
    }

    pub fn read_s32(&mut self) -> Result<i32> {
        let start = self.pos;
        let v = self
            .inner
            .read_i32::<LittleEndian>()
            .map_err(|e| truncated(e, start, 4))?;
        self.pos += 4;
        Ok(v)
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        let start = self.pos;
        let v = self
            .inner
            .read_f32::<LittleEndian>()
            .map_err(|e| truncated(e, start, 4))?;
        self.pos += 4;
        Ok(v)
    }

    /// Reads `count` floats in a row.
    pub fn read_f32_array(&mut self, count: usize) -> Result<Vec<f32>> {
        let mut values = Vec::with_capacity(count);
        for _ in 0..count {
            values.push(self.read_f32()?);
        }

        Ok(values)
    }

    /// Reads a `u16` length followed by that many single-byte characters.
    ///
    /// Each byte maps to the char with the same code point, so any byte sequence is accepted.
    pub fn read_text(&mut self) -> Result<String> {
        let len = self.read_u16()?;
        let bytes = self.read_exact_vec(len as u64)?;

        Ok(bytes.iter().map(|&b| b as char).collect())
    }

    /// Reads a `u32` length followed by that many opaque bytes.
    pub fn read_buffer(&mut self) -> Result<Vec<u8>> {
        let len = self.read_u32()?;
        self.read_exact_vec(len as u64)
    }

    /// Reads a `u32` length and discards the bytes that follow. Returns the discarded length.
    pub fn skip_buffer(&mut self) -> Result<u64> {
        let len = self.read_u32()? as u64;
        self.skip(len)?;

        Ok(len)
    }

    /// Consumes exactly `n` bytes without keeping them.
    pub fn skip(&mut self, n: u64) -> Result<()> {
        let start = self.pos;
        let copied = io::copy(&mut (&mut self.inner).take(n), &mut io::sink())?;
        self.pos += copied;

        if copied != n {
            return Err(LevelError::TruncatedStream {
                offset: start,
                need: n,
            });
        }

        Ok(())
    }

    /// Reads exactly `n` bytes. The buffer grows with the data actually read, so a corrupt length
    /// can't force a huge allocation up front.
    pub fn read_exact_vec(&mut self, n: u64) -> Result<Vec<u8>> {
        let start = self.pos;
        let mut bytes = Vec::new();
        let read = (&mut self.inner).take(n).read_to_end(&mut bytes)? as u64;
        self.pos += read;

        if read != n {
            return Err(LevelError::TruncatedStream {
                offset: start,
                need: n,
            });
        }

        Ok(bytes)
    }
}

fn truncated(err: io::Error, offset: u64, need: u64) -> LevelError {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        LevelError::TruncatedStream { offset, need }
    } else {
        LevelError::Io(err)
    }
}
