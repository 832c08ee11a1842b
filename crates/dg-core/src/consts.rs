//! Tile vocabulary and size limits
//!
//! The numeric codes index into the dungeon tileset atlas and must stay
//! bit-exact for existing maps to render correctly.

/// A tile index into the tileset atlas
pub type TileCode = u16;

/// Ground layer code, used for every cell
pub const GROUND: TileCode = 139;

/// Interchangeable full floor tiles
pub const FLOOR_FULLS: [TileCode; 12] = [88, 89, 90, 91, 92, 93, 104, 105, 106, 107, 108, 109];

/// Partial floor tiles (reserved, not placed by the generator)
pub const FLOOR_PARTS: [TileCode; 12] = [68, 69, 70, 84, 85, 86, 100, 101, 102, 116, 117, 118];

/// Code written into the decals, upper and leaves layers
pub const EMPTY: TileCode = 0;

/// Grid size limits
pub const MIN_WIDTH: usize = 5;
pub const MIN_HEIGHT: usize = 6;
pub const MAX_DIMENSION: usize = 4096;

/// Smallest room side
pub const MIN_ROOM_SIZE: usize = 3;

/// Rows at the top of the map that are always wall
pub const TOP_BORDER: usize = 2;
