//! Wall states and their tileset codes

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::TileCode;

/// State of one cell of the walls layer
///
/// `Open`, `Solid` and `Interior` are the raw states used while carving;
/// the rest are edge and corner pieces written by the autotiler. The
/// discriminant is the tileset code.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u16)]
pub enum WallTile {
    /// No wall
    #[default]
    Open = 15,
    /// Undifferentiated wall
    Solid = 161,
    /// Wall surrounded by wall on all eight sides
    Interior = 167,
    Top = 1,
    Bottom = 49,
    Left = 16,
    Right = 18,
    LeftBottom = 48,
    RightBottom = 50,
    LeftUp = 0,
    RightUp = 2,
    InnerLeftUp = 19,
    InnerRightUp = 21,
    InnerLeftBottom = 37,
    InnerRightBottom = 35,
}

impl WallTile {
    /// Every wall state
    pub const ALL: [WallTile; 15] = [
        WallTile::Open,
        WallTile::Solid,
        WallTile::Interior,
        WallTile::Top,
        WallTile::Bottom,
        WallTile::Left,
        WallTile::Right,
        WallTile::LeftBottom,
        WallTile::RightBottom,
        WallTile::LeftUp,
        WallTile::RightUp,
        WallTile::InnerLeftUp,
        WallTile::InnerRightUp,
        WallTile::InnerLeftBottom,
        WallTile::InnerRightBottom,
    ];

    /// Tileset code
    pub const fn code(self) -> TileCode {
        self as TileCode
    }

    /// Look up the state for a tileset code
    pub fn from_code(code: TileCode) -> Option<WallTile> {
        Self::ALL.iter().copied().find(|t| t.code() == code)
    }

    pub const fn is_open(self) -> bool {
        matches!(self, WallTile::Open)
    }

    /// Anything other than open floor
    pub const fn is_wall(self) -> bool {
        !self.is_open()
    }

    /// Glyph for text previews
    pub const fn symbol(self) -> char {
        match self {
            WallTile::Open => '.',
            WallTile::Solid => '#',
            WallTile::Interior => ' ',
            WallTile::Top | WallTile::Bottom => '-',
            WallTile::Left | WallTile::Right => '|',
            WallTile::LeftUp
            | WallTile::RightUp
            | WallTile::LeftBottom
            | WallTile::RightBottom => '+',
            WallTile::InnerLeftUp
            | WallTile::InnerRightUp
            | WallTile::InnerLeftBottom
            | WallTile::InnerRightBottom => '*',
        }
    }
}
