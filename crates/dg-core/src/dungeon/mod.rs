//! Dungeon layout: rooms, connectors, doorways and wall tiling

pub mod autotile;
pub mod carve;
pub mod connector;
pub mod generation;
pub mod room;
pub mod tile;

pub use autotile::{PASSES, Rule, apply_pass, autotile};
pub use carve::{carve_hole, connect_rooms};
pub use connector::{WallSegment, detect_connectors};
pub use generation::{
    Dungeon, build_walls, fill_bottom, fill_overlays, generate, generate_seeded,
};
pub use room::{Room, init_walls, is_border, pack_rooms, pos_to_room, wall_off};
pub use tile::WallTile;
