//! Connector detection
//!
//! After packing, the only walls separating two neighbouring rooms are the
//! margins written by [`wall_off`](super::room::wall_off): a two column
//! strip between side-by-side rooms and a three row strip under a room.
//! Each such strip that has open floor on both faces is a candidate
//! doorway.

use serde::{Deserialize, Serialize};

use crate::grid::Grid;
use crate::TOP_BORDER;

use super::room::{Room, pos_to_room};
use super::tile::WallTile;

/// Thickness of a strip between side-by-side rooms
pub const VERTICAL_THICKNESS: usize = 2;

/// Thickness of a strip between stacked rooms
pub const HORIZONTAL_THICKNESS: usize = 3;

/// Shortest strip worth recording
const MIN_RUN: usize = 2;

/// A thin wall strip between two rooms
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallSegment {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
    /// Strip runs top to bottom, separating a left and a right room
    pub is_vertical: bool,
    /// Room indices on either face (left/right or above/below)
    pub rooms: [Option<usize>; 2],
    /// A doorway has been cut through this strip
    pub carved: bool,
}

impl WallSegment {
    /// Check if a point lies inside the strip
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.x && y >= self.y && x < self.x + self.width && y < self.y + self.height
    }

    /// The room on the other face from `room`, if this strip touches it
    pub fn other_side(&self, room: usize) -> Option<usize> {
        match self.rooms {
            [Some(a), Some(b)] if a == room => Some(b),
            [Some(a), Some(b)] if b == room => Some(a),
            _ => None,
        }
    }

    /// Length along the strip
    pub fn length(&self) -> usize {
        if self.is_vertical {
            self.height
        } else {
            self.width
        }
    }
}

fn is(walls: &Grid<WallTile>, x: usize, y: usize, tile: WallTile) -> bool {
    walls.get(x, y) == Some(tile)
}

/// Rows of a two-wide wall with open floor on both sides, from `(x, y)` down
fn vertical_run(walls: &Grid<WallTile>, x: usize, y: usize) -> usize {
    (y..walls.height())
        .take_while(|&j| {
            is(walls, x - 1, j, WallTile::Open)
                && is(walls, x, j, WallTile::Solid)
                && is(walls, x + 1, j, WallTile::Solid)
                && is(walls, x + 2, j, WallTile::Open)
        })
        .count()
}

/// Columns of a three-tall wall with open floor above and below, from `(x, y)` right
fn horizontal_run(walls: &Grid<WallTile>, x: usize, y: usize) -> usize {
    (x..walls.width())
        .take_while(|&i| {
            is(walls, i, y - 1, WallTile::Open)
                && is(walls, i, y, WallTile::Solid)
                && is(walls, i, y + 1, WallTile::Solid)
                && is(walls, i, y + 2, WallTile::Solid)
                && is(walls, i, y + 3, WallTile::Open)
        })
        .count()
}

/// Check for a connector whose top-left cell is `(x, y)`
///
/// Vertical strips take precedence when a cell could start either kind.
fn connector_at(
    walls: &Grid<WallTile>,
    rooms: &[Room],
    found: &[WallSegment],
    x: usize,
    y: usize,
) -> Option<WallSegment> {
    if is(walls, x, y, WallTile::Open)
        || y + HORIZONTAL_THICKNESS >= walls.height()
        || x + VERTICAL_THICKNESS >= walls.width()
    {
        return None;
    }
    if found.iter().any(|w| w.contains(x, y)) {
        return None;
    }

    let dy = vertical_run(walls, x, y);
    if dy >= MIN_RUN {
        return Some(WallSegment {
            x,
            y,
            width: VERTICAL_THICKNESS,
            height: dy,
            is_vertical: true,
            rooms: [
                pos_to_room(rooms, x - 1, y),
                pos_to_room(rooms, x + VERTICAL_THICKNESS, y),
            ],
            carved: false,
        });
    }

    let dx = horizontal_run(walls, x, y);
    if dx >= MIN_RUN {
        return Some(WallSegment {
            x,
            y,
            width: dx,
            height: HORIZONTAL_THICKNESS,
            is_vertical: false,
            rooms: [
                pos_to_room(rooms, x, y - 1),
                pos_to_room(rooms, x, y + HORIZONTAL_THICKNESS),
            ],
            carved: false,
        });
    }

    None
}

/// Find every wall strip that separates two rooms
///
/// Strips are recorded in scan order by their top-left cell; a cell already
/// covered by a recorded strip never starts another.
pub fn detect_connectors(walls: &Grid<WallTile>, rooms: &[Room]) -> Vec<WallSegment> {
    let mut found = Vec::new();
    let (width, height) = (walls.width(), walls.height());

    for y in TOP_BORDER..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            if let Some(segment) = connector_at(walls, rooms, &found, x, y) {
                found.push(segment);
            }
        }
    }

    found
}
