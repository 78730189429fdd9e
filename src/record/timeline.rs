use std::io::BufRead;

use log::trace;

use crate::{
    error::{LevelError, Result},
    level::Level,
    reader::LevelReader,
    record::ops::TimelineOpcode,
};

/// Decodes the instruction stream of a timeline record.
///
/// Sprite and shape definitions may repeat. The symbol table instruction ends the timeline, so
/// whatever follows it belongs to the next top-level record.
pub fn decode_timeline<R: BufRead>(reader: &mut LevelReader<R>, level: &mut Level) -> Result<()> {
    // Unused header field
    reader.read_u32()?;

    loop {
        let offset = reader.position();
        let tag = reader.read_u8()?;
        let opcode = TimelineOpcode::try_from(tag)
            .map_err(|_| LevelError::UnknownTimelineOpcode { opcode: tag, offset })?;

        trace!("timeline {:?} at {:#x}", opcode, offset);

        match opcode {
            TimelineOpcode::Symbols => {
                decode_symbols(reader, level)?;
                return Ok(());
            }
            TimelineOpcode::SpriteDefinition => skip_sprite_definition(reader)?,
            TimelineOpcode::ShapeDefinition => skip_shape_definition(reader)?,
        }
    }
}

fn decode_symbols<R: BufRead>(reader: &mut LevelReader<R>, level: &mut Level) -> Result<()> {
    let name_count = reader.read_u32()?;
    for _ in 0..name_count {
        let id = reader.read_u16()?;
        let name = reader.read_text()?;
        level.names.insert(id, name);
    }

    level.sound_group_volumes.insert(0, 1.0);

    let group_count = reader.read_u32()?;
    for _ in 0..group_count {
        let group = reader.read_u8()?;
        let name = reader.read_text()?;

        level.sound_groups.insert(name, group);
        level.sound_group_volumes.insert(group, 1.0);
    }

    Ok(())
}

fn skip_sprite_definition<R: BufRead>(reader: &mut LevelReader<R>) -> Result<()> {
    let id = reader.read_u16()?;
    let len = reader.skip_buffer()?;
    trace!("skipped sprite definition {} ({} bytes)", id, len);

    Ok(())
}

fn skip_shape_definition<R: BufRead>(reader: &mut LevelReader<R>) -> Result<()> {
    let _id = reader.read_u16()?;
    let buffer_index = reader.read_u8()?;
    let first_index = reader.read_u32()?;
    let triangle_count = reader.read_u32()?;
    trace!(
        "skipped shape definition (buffer {}, first index {}, {} triangles)",
        buffer_index, first_index, triangle_count
    );

    Ok(())
}
