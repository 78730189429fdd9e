use std::io::BufRead;

use log::trace;

use crate::{
    error::{LevelError, Result},
    reader::LevelReader,
    record::ops::TextureOpcode,
};

/// Width of the position fields of a [`Rect`] on disk. The size fields are always 16-bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordWidth {
    Narrow,
    Wide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i16,
    pub height: i16,
}

impl Rect {
    pub fn read<R: BufRead>(reader: &mut LevelReader<R>, coords: CoordWidth) -> Result<Rect> {
        let (x, y) = match coords {
            CoordWidth::Narrow => (reader.read_s16()? as i32, reader.read_s16()? as i32),
            CoordWidth::Wide => (reader.read_s32()?, reader.read_s32()?),
        };

        Ok(Rect {
            x,
            y,
            width: reader.read_s16()?,
            height: reader.read_s16()?,
        })
    }
}

/// Decodes a texture record up to and including its end instruction.
///
/// The atlas layout is read and dropped. Returns the texture name.
pub fn decode_texture<R: BufRead>(reader: &mut LevelReader<R>) -> Result<String> {
    let name = reader.read_text()?;
    // Not used to find the end of the record, the instruction stream is.
    let _size = reader.read_u32()?;

    loop {
        let offset = reader.position();
        let tag = reader.read_u8()?;
        let opcode = TextureOpcode::try_from(tag)
            .map_err(|_| LevelError::UnknownTextureOpcode { opcode: tag, offset })?;

        match opcode {
            TextureOpcode::End => break,
            TextureOpcode::SubTexture => {
                let index = reader.read_s16()?;
                let rect = Rect::read(reader, CoordWidth::Narrow)?;
                trace!("{}: sub-texture {} {:?}", name, index, rect);
            }
            TextureOpcode::MovieName => {
                let movie = reader.read_text()?;
                trace!("{}: movie {}", name, movie);
            }
            TextureOpcode::TextureAnim => {
                let count = reader.read_u16()?;
                for _ in 0..count {
                    let _index = reader.read_u16()?;
                    let _label = reader.read_text()?;
                }
                trace!("{}: animation with {} frames", name, count);
            }
            TextureOpcode::MovieTexRect1 => {
                let rect = Rect::read(reader, CoordWidth::Narrow)?;
                trace!("{}: movie rect {:?}", name, rect);
            }
            TextureOpcode::MovieTexRect2 => {
                let rect = Rect::read(reader, CoordWidth::Narrow)?;
                let frame = Rect::read(reader, CoordWidth::Wide)?;
                trace!("{}: movie rect {:?} in {:?}", name, rect, frame);
            }
        }
    }

    Ok(name)
}
