/// Identifier of a single moving agent, as extracted from its log tag.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct AgentId(pub u32);

/// Absolute 0-based frame index in playback timeline space.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub usize);

/// Integer cell position on the grid map, `(row, col)` with the origin in
/// the upper-left corner.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct GridPos {
    /// Row (vertical, grows downward).
    pub row: u32,
    /// Column (horizontal, grows rightward).
    pub col: u32,
}

impl GridPos {
    /// Create a position from a `(row, col)` pair.
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

/// An sRGB display color, 8 bits per channel.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Create a color from raw channel values.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}
