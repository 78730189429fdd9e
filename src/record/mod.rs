//! Decoders for the individual top-level records.
//!
//! Each decoder starts right after the record's opcode byte and leaves the reader on the first
//! byte of the next record.

pub mod buffers;
pub mod ops;
pub mod player;
pub mod texture;
pub mod timeline;

use std::io::BufRead;

use log::trace;

use crate::{
    error::Result,
    level::{Level, RawResource, ResourceKind},
    reader::LevelReader,
};

pub fn decode_name<R: BufRead>(reader: &mut LevelReader<R>, level: &mut Level) -> Result<()> {
    level.name = reader.read_text()?;
    Ok(())
}

pub fn decode_atlas_texture<R: BufRead>(
    reader: &mut LevelReader<R>,
    level: &mut Level,
    retain: bool,
) -> Result<()> {
    let name = reader.read_text()?;
    // Meaning unknown
    let has_atlas = reader.read_u8()? != 0;
    trace!("atlas texture {} (has atlas: {})", name, has_atlas);

    read_payload(reader, level, retain, ResourceKind::AtlasTexture, name)
}

pub fn decode_image<R: BufRead>(
    reader: &mut LevelReader<R>,
    level: &mut Level,
    retain: bool,
) -> Result<()> {
    let name = reader.read_text()?;
    read_payload(reader, level, retain, ResourceKind::Image, name)
}

pub fn decode_sound<R: BufRead>(
    reader: &mut LevelReader<R>,
    level: &mut Level,
    retain: bool,
) -> Result<()> {
    let key = level.sound_key(&reader.read_text()?);
    let id = reader.read_u16()?;
    level.sound_ids.insert(key.clone(), id);

    read_payload(reader, level, retain, ResourceKind::Sound, key)
}

pub fn decode_sound_loop<R: BufRead>(
    reader: &mut LevelReader<R>,
    level: &mut Level,
    retain: bool,
) -> Result<()> {
    let name = reader.read_text()?;
    read_payload(reader, level, retain, ResourceKind::SoundLoop, name)
}

pub fn decode_image_ids<R: BufRead>(reader: &mut LevelReader<R>, level: &mut Level) -> Result<()> {
    let count = reader.read_u16()?;
    for _ in 0..count {
        let name = reader.read_text()?;
        let id = reader.read_u16()?;
        level.image_ids.insert(name, id);
    }

    Ok(())
}

pub fn decode_strings<R: BufRead>(reader: &mut LevelReader<R>, level: &mut Level) -> Result<()> {
    let count = reader.read_u16()?;
    for _ in 0..count {
        let index = reader.read_u16()?;
        let text = reader.read_text()?;
        level.strings.insert(index, text);
    }

    Ok(())
}

fn read_payload<R: BufRead>(
    reader: &mut LevelReader<R>,
    level: &mut Level,
    retain: bool,
    kind: ResourceKind,
    name: String,
) -> Result<()> {
    if retain {
        let data = reader.read_buffer()?;
        trace!("{} {}: kept {} bytes", kind, name, data.len());
        level.resources.push(RawResource { kind, name, data });
    } else {
        let len = reader.skip_buffer()?;
        trace!("{} {}: skipped {} bytes", kind, name, len);
    }

    Ok(())
}
