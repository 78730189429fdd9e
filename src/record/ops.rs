use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Top-level record tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum Opcode {
    End = 0,
    Name = 1,
    AtlasTexture = 2,
    Image = 8,
    Sound = 15,
    SoundLoop = 18,
    Player = 20,
    PathData = 25,
    ImageIds = 30,
    Strings = 31,
    Timeline = 40,
    Buffers = 41,
    Texture = 102,
}

/// Instructions inside a [`Opcode::Timeline`] record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum TimelineOpcode {
    /// Symbol names and sound groups. Always the last instruction of the timeline.
    Symbols = 0,
    // Sprite definition, not interpreted yet
    SpriteDefinition = 11,
    // Shape referencing a range of a vertex/index buffer
    ShapeDefinition = 13,
}

/// Instructions inside a [`Opcode::Texture`] record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum TextureOpcode {
    End = 0,
    SubTexture = 3,
    MovieName = 4,
    TextureAnim = 5,
    MovieTexRect1 = 6,
    MovieTexRect2 = 7,
}
