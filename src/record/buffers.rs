use std::io::BufRead;

use log::trace;

use crate::{error::Result, reader::LevelReader};

/// Bytes per vertex: six 32-bit floats.
pub const VERTEX_STRIDE: u64 = 6 * 4;
/// Bytes per index.
pub const INDEX_STRIDE: u64 = 2;

/// Consumes a GPU buffer record: every vertex buffer first, then the same number of index
/// buffers. Returns the total number of payload bytes skipped.
pub fn skip_buffers<R: BufRead>(reader: &mut LevelReader<R>) -> Result<u64> {
    let count = reader.read_u8()?;
    let mut skipped = 0u64;

    for i in 0..count {
        let vertex_count = reader.read_u32()? as u64;
        reader.skip(vertex_count * VERTEX_STRIDE)?;
        skipped += vertex_count * VERTEX_STRIDE;
        trace!("vertex buffer {}: {} vertices", i, vertex_count);
    }

    for i in 0..count {
        let index_count = reader.read_u32()? as u64;
        reader.skip(index_count * INDEX_STRIDE)?;
        skipped += index_count * INDEX_STRIDE;
        trace!("index buffer {}: {} indices", i, index_count);
    }

    Ok(skipped)
}
