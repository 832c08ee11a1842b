//! Connectivity carving
//!
//! Depth-first walk over rooms through their connectors, starting at the
//! first room placed. Every connector that first reaches an unvisited room
//! gets a doorway, so the carved connectors form a spanning tree of the
//! rooms reachable from the start. All other connectors stay solid.

use log::trace;

use crate::grid::Grid;
use crate::rng::GenRng;

use super::connector::WallSegment;
use super::room::Room;
use super::tile::WallTile;

/// Width of a doorway cut into a long connector
const DOOR_SPAN: usize = 2;

/// Connectors up to this long are opened along their whole length
const FULL_OPEN_MAX: usize = 3;

/// Open a doorway through a connector
///
/// Long strips get a two cell opening at one end chosen by coin flip, the
/// rest are opened entirely.
pub fn carve_hole(walls: &mut Grid<WallTile>, segment: &mut WallSegment, rng: &mut GenRng) {
    let len = segment.length();
    let (start, end) = if len > FULL_OPEN_MAX {
        let start = if rng.coin() { 0 } else { len - DOOR_SPAN };
        (start, start + DOOR_SPAN)
    } else {
        (0, len)
    };

    if segment.is_vertical {
        for dy in start..end {
            for dx in 0..segment.width {
                walls.set(segment.x + dx, segment.y + dy, WallTile::Open);
            }
        }
    } else {
        for dx in start..end {
            for dy in 0..segment.height {
                walls.set(segment.x + dx, segment.y + dy, WallTile::Open);
            }
        }
    }

    segment.carved = true;
    trace!(
        "carved {} connector at ({}, {}) cells {}..{}",
        if segment.is_vertical { "vertical" } else { "horizontal" },
        segment.x,
        segment.y,
        start,
        end
    );
}

/// One room on the walk
struct Visit {
    room: usize,
    /// Next connector to examine
    next: usize,
    /// Connector this room was reached through
    via: Option<usize>,
}

/// Join rooms reachable from room 0 with a spanning tree of doorways
///
/// Marks every reached room `connected` and returns the number of doorways
/// cut, which is one less than the number of rooms reached. A doorway is
/// cut when the walk backs out of the room it leads to, so holes are made
/// in post-order. Rooms with no path of connectors to room 0 are left
/// unconnected.
pub fn connect_rooms(
    walls: &mut Grid<WallTile>,
    rooms: &mut [Room],
    connectors: &mut [WallSegment],
    rng: &mut GenRng,
) -> usize {
    let Some(first) = rooms.first_mut() else {
        return 0;
    };
    first.connected = true;

    let mut holes = 0;
    let mut stack = vec![Visit {
        room: 0,
        next: 0,
        via: None,
    }];

    while let Some(top) = stack.last_mut() {
        let room = top.room;
        let step = connectors[top.next..]
            .iter()
            .enumerate()
            .find_map(|(i, c)| {
                c.other_side(room)
                    .filter(|&other| !rooms[other].connected)
                    .map(|other| (top.next + i, other))
            });

        match step {
            Some((index, other)) => {
                top.next = index + 1;
                rooms[other].connected = true;
                stack.push(Visit {
                    room: other,
                    next: 0,
                    via: Some(index),
                });
            }
            None => {
                if let Some(index) = top.via {
                    carve_hole(walls, &mut connectors[index], rng);
                    holes += 1;
                }
                stack.pop();
            }
        }
    }

    holes
}
