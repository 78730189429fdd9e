use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};

/// Builds synthetic level streams for tests.
#[derive(Debug, Default)]
pub(crate) struct StreamBuilder {
    bytes: Vec<u8>,
}

impl StreamBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a stream with the `LVL` signature.
    pub fn level() -> Self {
        let mut b = Self::new();
        b.bytes.extend_from_slice(b"LVL");
        b
    }

    pub fn u8(mut self, v: u8) -> Self {
        self.bytes.write_u8(v).unwrap();
        self
    }

    pub fn s16(mut self, v: i16) -> Self {
        self.bytes.write_i16::<LittleEndian>(v).unwrap();
        self
    }

    pub fn u16(mut self, v: u16) -> Self {
        self.bytes.write_u16::<LittleEndian>(v).unwrap();
        self
    }

    pub fn s32(mut self, v: i32) -> Self {
        self.bytes.write_i32::<LittleEndian>(v).unwrap();
        self
    }

    pub fn u32(mut self, v: u32) -> Self {
        self.bytes.write_u32::<LittleEndian>(v).unwrap();
        self
    }

    pub fn f32(mut self, v: f32) -> Self {
        self.bytes.write_f32::<LittleEndian>(v).unwrap();
        self
    }

    pub fn f32s(self, values: &[f32]) -> Self {
        values.iter().fold(self, |b, v| b.f32(*v))
    }

    pub fn text(mut self, s: &str) -> Self {
        self.bytes.write_u16::<LittleEndian>(s.len() as u16).unwrap();
        self.bytes.write_all(s.as_bytes()).unwrap();
        self
    }

    pub fn buffer(mut self, data: &[u8]) -> Self {
        self.bytes.write_u32::<LittleEndian>(data.len() as u32).unwrap();
        self.bytes.write_all(data).unwrap();
        self
    }

    pub fn raw(mut self, data: &[u8]) -> Self {
        self.bytes.write_all(data).unwrap();
        self
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn build(self) -> Vec<u8> {
        self.bytes
    }
}
