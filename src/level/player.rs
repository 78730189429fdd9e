use indexmap::IndexMap;

/// Player motion and path-finding data.
///
/// The four forward tracks always share one length and the three reverse tracks share another.
/// Use [`Player::frame_count`] and [`Player::reverse_frame_count`] rather than any single field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Player {
    pub positions_x: Vec<f32>,
    pub positions_y: Vec<f32>,
    pub scales_x: Vec<f32>,
    pub rotations: Vec<f32>,

    pub r_positions_x: Vec<f32>,
    pub r_positions_y: Vec<f32>,
    pub r_rotations: Vec<f32>,

    /// Frame labels, keyed by frame index.
    pub labels_at: IndexMap<u16, String>,
    pub labels_left: IndexMap<u16, String>,
    pub labels_right: IndexMap<u16, String>,

    pub waypoints: Vec<Waypoint>,
    pub arcs: Vec<Arc>,
}

impl Player {
    pub fn frame_count(&self) -> usize {
        self.positions_x.len()
    }

    pub fn reverse_frame_count(&self) -> usize {
        self.r_positions_x.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Waypoint {
    pub x: i16,
    pub y: i16,
}

/// A path-finding edge between two waypoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arc {
    pub arc_type: u8,
    pub from: u8,
    pub to: u8,
}
