use std::fmt::{self, Display};

use indexmap::IndexMap;

pub mod player;

pub use player::{Arc, Player, Waypoint};

/// A fully decoded level.
///
/// Decoding fills this in record by record. If decoding fails the partially filled value is never
/// handed out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Level {
    pub name: String,
    /// Sound IDs keyed by `"<level name>/<sound name>"`.
    pub sound_ids: IndexMap<String, u16>,
    pub image_ids: IndexMap<String, u16>,
    pub strings: IndexMap<u16, String>,
    pub names: NameTable,
    pub sound_groups: IndexMap<String, u8>,
    pub sound_group_volumes: IndexMap<u8, f32>,
    pub player: Player,
    /// Payloads kept when decoding with [`crate::DecodeOptions::retain_payloads`].
    pub resources: Vec<RawResource>,
}

impl Level {
    pub fn new() -> Self {
        Self::default()
    }

    /// The key a sound record is stored under in [`Level::sound_ids`].
    pub fn sound_key(&self, sound_name: &str) -> String {
        format!("{}/{}", self.name, sound_name)
    }
}

/// Two-way mapping between timeline symbol IDs and their names.
///
/// The two directions are always exact inverses: inserting a pair that reuses an ID or a name
/// drops the pair it replaces from both sides.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NameTable {
    names_by_id: IndexMap<u16, String>,
    ids_by_name: IndexMap<String, u16>,
}

impl NameTable {
    pub fn insert(&mut self, id: u16, name: String) {
        if let Some(old_name) = self.names_by_id.get(&id) {
            if *old_name != name {
                self.ids_by_name.shift_remove(old_name);
            }
        }

        if let Some(old_id) = self.ids_by_name.get(&name) {
            if *old_id != id {
                self.names_by_id.shift_remove(old_id);
            }
        }

        self.ids_by_name.insert(name.clone(), id);
        self.names_by_id.insert(id, name);
    }

    pub fn name(&self, id: u16) -> Option<&str> {
        self.names_by_id.get(&id).map(String::as_str)
    }

    pub fn id(&self, name: &str) -> Option<u16> {
        self.ids_by_name.get(name).copied()
    }

    pub fn names_by_id(&self) -> &IndexMap<u16, String> {
        &self.names_by_id
    }

    pub fn ids_by_name(&self) -> &IndexMap<String, u16> {
        &self.ids_by_name
    }

    pub fn len(&self) -> usize {
        self.names_by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names_by_id.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    AtlasTexture,
    Image,
    Sound,
    SoundLoop,
}

impl ResourceKind {
    pub fn extension(&self) -> &'static str {
        match self {
            ResourceKind::AtlasTexture => "atf",
            ResourceKind::Image => "swf",
            ResourceKind::Sound => "mp3",
            ResourceKind::SoundLoop => "bin",
        }
    }
}

impl Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// An embedded payload exactly as it appears in the level.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResource {
    pub kind: ResourceKind,
    /// Name of the resource. Sounds carry the level-qualified key.
    pub name: String,
    pub data: Vec<u8>,
}

impl RawResource {
    /// Relative path the payload is saved under, eg. `intro/click.mp3`.
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.name, self.kind.extension())
    }
}
