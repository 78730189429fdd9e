use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LevelError {
    /// The first three bytes were not `LVL`. `found` holds the bytes read up to and including the
    /// first mismatch.
    #[error("invalid level signature at offset {offset:#x}: found {found:?}")]
    InvalidSignature { offset: u64, found: Vec<u8> },

    /// The byte source ran out in the middle of a read.
    #[error("stream truncated at offset {offset:#x} (needed {need} bytes)")]
    TruncatedStream { offset: u64, need: u64 },

    #[error("unknown opcode {opcode} at offset {offset:#x}")]
    UnknownOpcode { opcode: u8, offset: u64 },

    #[error("unknown timeline opcode {opcode} at offset {offset:#x}")]
    UnknownTimelineOpcode { opcode: u8, offset: u64 },

    #[error("unknown texture opcode {opcode} at offset {offset:#x}")]
    UnknownTextureOpcode { opcode: u8, offset: u64 },

    #[error("unable to open {}: {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("unable to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("read error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, LevelError>;
