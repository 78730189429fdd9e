use std::io::BufRead;

use indexmap::IndexMap;
use log::trace;

use crate::{
    error::Result,
    level::{Arc, Player, Waypoint},
    reader::LevelReader,
};

/// Decodes a player record. Only the stored keyframes are kept, nothing is interpolated.
pub fn decode_player<R: BufRead>(reader: &mut LevelReader<R>, player: &mut Player) -> Result<()> {
    let frames = reader.read_u16()? as usize;
    player.positions_x = reader.read_f32_array(frames)?;
    player.positions_y = reader.read_f32_array(frames)?;
    player.scales_x = reader.read_f32_array(frames)?;
    player.rotations = reader.read_f32_array(frames)?;

    let reverse_frames = reader.read_u16()? as usize;
    player.r_positions_x = reader.read_f32_array(reverse_frames)?;
    player.r_positions_y = reader.read_f32_array(reverse_frames)?;
    player.r_rotations = reader.read_f32_array(reverse_frames)?;

    read_labels(reader, &mut player.labels_at)?;
    read_labels(reader, &mut player.labels_left)?;
    read_labels(reader, &mut player.labels_right)?;

    let waypoint_count = reader.read_u8()?;
    for _ in 0..waypoint_count {
        let x = reader.read_s16()?;
        let y = reader.read_s16()?;
        player.waypoints.push(Waypoint { x, y });
    }

    let arc_count = reader.read_u8()?;
    for _ in 0..arc_count {
        let arc_type = reader.read_u8()?;
        let from = reader.read_u8()?;
        let to = reader.read_u8()?;
        player.arcs.push(Arc { arc_type, from, to });
    }

    Ok(())
}

fn read_labels<R: BufRead>(
    reader: &mut LevelReader<R>,
    labels: &mut IndexMap<u16, String>,
) -> Result<()> {
    let count = reader.read_u16()?;
    for _ in 0..count {
        let frame = reader.read_u16()?;
        labels.insert(frame, reader.read_text()?);
    }

    Ok(())
}

/// Consumes a path data record. Nothing models path interpolation yet, so every value is dropped.
pub fn skip_path_data<R: BufRead>(reader: &mut LevelReader<R>) -> Result<()> {
    let count = reader.read_u16()? as u64;

    // x, y, scale x, scale y, rotation
    reader.skip(count * 5 * 4)?;

    let label_count = reader.read_u16()?;
    for _ in 0..label_count {
        let _index = reader.read_u16()?;
        let _label = reader.read_text()?;
    }

    trace!("skipped path data ({} frames, {} labels)", count, label_count);

    Ok(())
}
