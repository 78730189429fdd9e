pub mod error;
pub mod extract;
pub mod level;
pub mod reader;
pub mod record;

#[cfg(test)]
pub(crate) mod test_util;

use std::{
    fs::File,
    io::{BufRead, BufReader, Cursor},
    path::Path,
};

use log::{debug, info};

pub use crate::{
    error::{LevelError, Result},
    level::{Arc, Level, NameTable, Player, RawResource, ResourceKind, Waypoint},
    reader::LevelReader,
};
use crate::record::{buffers, ops::Opcode, player, texture, timeline};

/// Magic bytes at the start of every level.
pub const SIGNATURE: [u8; 3] = *b"LVL";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Keep the embedded texture, image and sound payloads in [`Level::resources`] instead of
    /// dropping them after reading.
    pub retain_payloads: bool,
}

/// How a successfully decoded stream ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// An explicit [`Opcode::End`] record.
    EndOpcode,
    /// The byte source ran out between two records.
    EndOfStream,
}

/// Decodes a level from a buffered byte source.
#[derive(Debug)]
pub struct LevelDecoder<R> {
    reader: LevelReader<R>,
    options: DecodeOptions,
    record_count: usize,
    termination: Option<Termination>,
}

impl<R: BufRead> LevelDecoder<R> {
    pub fn new(inner: R) -> Self {
        Self::with_options(inner, DecodeOptions::default())
    }

    pub fn with_options(inner: R, options: DecodeOptions) -> Self {
        LevelDecoder {
            reader: LevelReader::new(inner),
            options,
            record_count: 0,
            termination: None,
        }
    }

    /**
    Decodes one level starting at the current position of the byte source.

    Reading stops after an [`Opcode::End`] record or when the source runs out between two
    records. Anything after an end record is left unread.

    # Errors
    - [`LevelError::InvalidSignature`] when the stream doesn't start with `LVL`
    - [`LevelError::TruncatedStream`] when the source runs out in the middle of a record
    - [`LevelError::UnknownOpcode`], [`LevelError::UnknownTimelineOpcode`] and
      [`LevelError::UnknownTextureOpcode`] for unrecognised tags

    # Examples
    ```
    use s3lvl::LevelDecoder;

    let bytes = b"LVL\x01\x05\x00Intro\x00";
    let mut decoder = LevelDecoder::new(&bytes[..]);
    let level = decoder.decode().expect("Unable to decode level.");

    assert_eq!(level.name, "Intro");
    assert_eq!(decoder.position(), bytes.len() as u64);
    ```
    */
    pub fn decode(&mut self) -> Result<Level> {
        self.record_count = 0;
        self.termination = None;

        self.read_signature()?;

        let mut level = Level::new();

        let termination = loop {
            if self.reader.is_at_end()? {
                break Termination::EndOfStream;
            }

            let offset = self.reader.position();
            let tag = self.reader.read_u8()?;
            let opcode = Opcode::try_from(tag)
                .map_err(|_| LevelError::UnknownOpcode { opcode: tag, offset })?;

            debug!("{:?} record at {:#x}", opcode, offset);

            if opcode == Opcode::End {
                break Termination::EndOpcode;
            }

            self.decode_record(opcode, &mut level)?;
            self.record_count += 1;
        };

        info!(
            "decoded level \"{}\": {} records, {} bytes ({:?})",
            level.name,
            self.record_count,
            self.reader.position(),
            termination
        );

        self.termination = Some(termination);

        Ok(level)
    }

    fn read_signature(&mut self) -> Result<()> {
        let mut found = Vec::with_capacity(SIGNATURE.len());

        for expected in SIGNATURE {
            let offset = self.reader.position();
            let byte = match self.reader.read_u8() {
                Ok(b) => b,
                Err(LevelError::TruncatedStream { .. }) => {
                    return Err(LevelError::InvalidSignature { offset, found });
                }
                Err(e) => return Err(e),
            };

            found.push(byte);

            if byte != expected {
                return Err(LevelError::InvalidSignature { offset, found });
            }
        }

        Ok(())
    }

    fn decode_record(&mut self, opcode: Opcode, level: &mut Level) -> Result<()> {
        let reader = &mut self.reader;
        let retain = self.options.retain_payloads;

        match opcode {
            Opcode::End => {}
            Opcode::Name => record::decode_name(reader, level)?,
            Opcode::AtlasTexture => record::decode_atlas_texture(reader, level, retain)?,
            Opcode::Image => record::decode_image(reader, level, retain)?,
            Opcode::Sound => record::decode_sound(reader, level, retain)?,
            Opcode::SoundLoop => record::decode_sound_loop(reader, level, retain)?,
            Opcode::Player => player::decode_player(reader, &mut level.player)?,
            Opcode::PathData => player::skip_path_data(reader)?,
            Opcode::ImageIds => record::decode_image_ids(reader, level)?,
            Opcode::Strings => record::decode_strings(reader, level)?,
            Opcode::Timeline => timeline::decode_timeline(reader, level)?,
            Opcode::Buffers => {
                buffers::skip_buffers(reader)?;
            }
            Opcode::Texture => {
                texture::decode_texture(reader)?;
            }
        }

        Ok(())
    }

    /// Number of bytes consumed so far.
    pub fn position(&self) -> u64 {
        self.reader.position()
    }

    /// Number of records, not counting the end record, read by the last [`LevelDecoder::decode`].
    pub fn record_count(&self) -> usize {
        self.record_count
    }

    /// How the last successful [`LevelDecoder::decode`] ended.
    pub fn termination(&self) -> Option<Termination> {
        self.termination
    }

    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }
}

impl Level {
    /// Decodes a level held in memory.
    pub fn from_bytes(bytes: &[u8]) -> Result<Level> {
        Self::from_bytes_with_options(bytes, DecodeOptions::default())
    }

    pub fn from_bytes_with_options(bytes: &[u8], options: DecodeOptions) -> Result<Level> {
        LevelDecoder::with_options(Cursor::new(bytes), options).decode()
    }

    /// Opens and decodes a level file.
    ///
    /// # Errors
    /// [`LevelError::Open`] when the file can't be opened, otherwise anything
    /// [`LevelDecoder::decode`] returns.
    pub fn open<P: AsRef<Path>>(path: P, options: DecodeOptions) -> Result<Level> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LevelError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        LevelDecoder::with_options(BufReader::new(file), options).decode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::StreamBuilder;

    fn decode(bytes: &[u8]) -> (Result<Level>, LevelDecoder<Cursor<&[u8]>>) {
        let mut decoder = LevelDecoder::new(Cursor::new(bytes));
        let result = decoder.decode();
        (result, decoder)
    }

    #[test]
    fn signature_then_end_is_an_empty_level() {
        let (result, decoder) = decode(b"LVL\x00");
        let level = result.unwrap();

        assert_eq!(level, Level::new());
        assert!(level.name.is_empty());
        assert!(level.sound_group_volumes.is_empty());
        assert_eq!(decoder.termination(), Some(Termination::EndOpcode));
        assert_eq!(decoder.record_count(), 0);
    }

    #[test]
    fn signature_alone_ends_naturally() {
        let (result, decoder) = decode(b"LVL");

        assert_eq!(result.unwrap(), Level::new());
        assert_eq!(decoder.termination(), Some(Termination::EndOfStream));
    }

    #[test]
    fn bad_signature_stops_at_first_mismatch() {
        let (result, decoder) = decode(b"LXL\x00");

        match result {
            Err(LevelError::InvalidSignature { offset, found }) => {
                assert_eq!(offset, 1);
                assert_eq!(found, b"LX".to_vec());
            }
            other => panic!("expected invalid signature, got {:?}", other),
        }
        assert_eq!(decoder.position(), 2);

        for bytes in [&b""[..], &b"LV"[..], &b"lvl\x00"[..], &b"\x00LVL"[..]] {
            assert!(matches!(
                Level::from_bytes(bytes),
                Err(LevelError::InvalidSignature { .. })
            ));
        }
    }

    #[test]
    fn name_and_image_ids() {
        let bytes = StreamBuilder::level()
            .u8(1)
            .text("Intro")
            .u8(30)
            .u16(1)
            .text("bg")
            .u16(7)
            .u8(0)
            .build();

        let level = Level::from_bytes(&bytes).unwrap();

        assert_eq!(level.name, "Intro");
        assert_eq!(level.image_ids.get("bg"), Some(&7));
        assert_eq!(level.image_ids.len(), 1);
    }

    #[test]
    fn consumes_exactly_the_records_up_to_end() {
        let mut b = StreamBuilder::level();
        let mut expected = vec![b.len()];

        b = b.u8(1).text("lab");
        expected.push(b.len());
        b = b.u8(2).text("atlas").u8(1).buffer(&[0; 10]);
        expected.push(b.len());
        b = b.u8(8).text("img").buffer(&[1; 3]);
        expected.push(b.len());
        b = b.u8(15).text("s").u16(2).buffer(&[2; 5]);
        expected.push(b.len());
        b = b.u8(18).text("loop").buffer(&[]);
        expected.push(b.len());
        b = b
            .u8(20)
            .u16(1)
            .f32s(&[0.0; 4])
            .u16(1)
            .f32s(&[0.0; 3])
            .u16(1)
            .u16(0)
            .text("a")
            .u16(0)
            .u16(0)
            .u8(1)
            .s16(1)
            .s16(2)
            .u8(1)
            .u8(0)
            .u8(0)
            .u8(0);
        expected.push(b.len());
        b = b.u8(25).u16(2).f32s(&[0.0; 10]).u16(1).u16(0).text("p");
        expected.push(b.len());
        b = b.u8(30).u16(1).text("bg").u16(7);
        expected.push(b.len());
        b = b.u8(31).u16(1).u16(4).text("hello");
        expected.push(b.len());
        b = b
            .u8(40)
            .u32(0)
            .u8(11)
            .u16(1)
            .buffer(&[0; 4])
            .u8(13)
            .u16(1)
            .u8(0)
            .u32(0)
            .u32(6)
            .u8(0)
            .u32(1)
            .u16(1)
            .text("clip")
            .u32(1)
            .u8(2)
            .text("sfx");
        expected.push(b.len());
        b = b.u8(41).u8(1).u32(3).raw(&[0; 72]).u32(3).raw(&[0; 6]);
        expected.push(b.len());
        b = b
            .u8(102)
            .text("tex")
            .u32(0)
            .u8(3)
            .s16(0)
            .s16(0)
            .s16(0)
            .s16(4)
            .s16(4)
            .u8(7)
            .s16(0)
            .s16(0)
            .s16(4)
            .s16(4)
            .s32(0)
            .s32(0)
            .s16(4)
            .s16(4)
            .u8(0);
        expected.push(b.len());
        b = b.u8(0);
        let end = b.len();
        let bytes = b.raw(b"trailing bytes").build();

        let (result, decoder) = decode(&bytes);
        let level = result.unwrap();

        assert_eq!(decoder.position(), end as u64);
        assert_eq!(decoder.record_count(), expected.len() - 1);
        assert_eq!(decoder.termination(), Some(Termination::EndOpcode));

        assert_eq!(level.name, "lab");
        assert_eq!(level.sound_ids.get("lab/s"), Some(&2));
        assert_eq!(level.strings.get(&4).map(String::as_str), Some("hello"));
        assert_eq!(level.names.id("clip"), Some(1));
        assert_eq!(level.sound_groups.get("sfx"), Some(&2));
        assert_eq!(level.player.frame_count(), 1);
        assert_eq!(level.player.reverse_frame_count(), 1);
        assert!(level.resources.is_empty());

        // Cutting the stream at any record boundary still decodes.
        for boundary in expected {
            let (result, decoder) = decode(&bytes[..boundary]);
            result.unwrap();
            assert_eq!(decoder.position(), boundary as u64);
            assert_eq!(decoder.termination(), Some(Termination::EndOfStream));
        }
    }

    #[test]
    fn timeline_symbols_hand_back_to_top_level() {
        let bytes = StreamBuilder::level()
            .u8(40)
            .u32(0)
            .u8(0)
            .u32(1)
            .u16(3)
            .text("walk")
            .u32(0)
            .u8(1)
            .text("after")
            .build();

        let level = Level::from_bytes(&bytes).unwrap();

        assert_eq!(level.names.name(3), Some("walk"));
        assert_eq!(level.name, "after");
        assert_eq!(level.sound_group_volumes.get(&0), Some(&1.0));
    }

    #[test]
    fn unknown_tags_at_every_level() {
        let top = StreamBuilder::level().u8(1).text("x").u8(99).build();
        assert!(matches!(
            Level::from_bytes(&top),
            Err(LevelError::UnknownOpcode {
                opcode: 99,
                offset: 7
            })
        ));

        let timeline = StreamBuilder::level().u8(40).u32(0).u8(200).build();
        assert!(matches!(
            Level::from_bytes(&timeline),
            Err(LevelError::UnknownTimelineOpcode {
                opcode: 200,
                offset: 8
            })
        ));

        let texture = StreamBuilder::level().u8(102).text("t").u32(0).u8(2).build();
        assert!(matches!(
            Level::from_bytes(&texture),
            Err(LevelError::UnknownTextureOpcode {
                opcode: 2,
                offset: 11
            })
        ));
    }

    #[test]
    fn truncated_record_fails_the_whole_decode() {
        let bytes = StreamBuilder::level()
            .u8(1)
            .text("Intro")
            .u8(8)
            .text("img")
            .u32(10)
            .raw(&[0; 4])
            .build();

        assert!(matches!(
            Level::from_bytes(&bytes),
            Err(LevelError::TruncatedStream {
                offset: 21,
                need: 10
            })
        ));
    }

    #[test]
    fn repeated_sounds_overwrite_by_key() {
        let bytes = StreamBuilder::level()
            .u8(1)
            .text("lvl")
            .u8(15)
            .text("hit")
            .u16(1)
            .buffer(&[0xaa])
            .u8(15)
            .text("hit")
            .u16(2)
            .buffer(&[0xbb, 0xcc])
            .build();

        let options = DecodeOptions {
            retain_payloads: true,
        };
        let level = Level::from_bytes_with_options(&bytes, options).unwrap();

        assert_eq!(level.sound_ids.len(), 1);
        assert_eq!(level.sound_ids.get("lvl/hit"), Some(&2));
        assert_eq!(level.resources.len(), 2);
        assert_eq!(level.resources[1].data, vec![0xbb, 0xcc]);
        assert_eq!(level.resources[1].file_name(), "lvl/hit.mp3");
    }

    #[test]
    fn open_reports_missing_files() {
        let path = std::env::temp_dir().join("s3lvl-does-not-exist.lvl");

        assert!(matches!(
            Level::open(&path, DecodeOptions::default()),
            Err(LevelError::Open { .. })
        ));
    }
}
