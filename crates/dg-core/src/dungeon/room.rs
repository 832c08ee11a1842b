//! Room packing
//!
//! Rooms are placed greedily in scan order (top to bottom, left to right).
//! Each placed room is walled off at once, so the rest of the scan sees its
//! footprint as occupied and rooms never overlap.

use log::trace;
use serde::{Deserialize, Serialize};

use crate::grid::Grid;
use crate::rng::GenRng;
use crate::{MIN_ROOM_SIZE, TOP_BORDER};

use super::tile::WallTile;

/// Depth of the wall strip written under a room
const BOTTOM_MARGIN: isize = 3;

/// Width of the wall strips written beside a room
const SIDE_MARGIN: isize = 2;

/// A rectangular playable area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Left column
    pub x: usize,
    /// Top row
    pub y: usize,
    pub width: usize,
    pub height: usize,
    /// Reached by the spanning tree of doorways
    pub connected: bool,
}

impl Room {
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            connected: false,
        }
    }

    /// Check if a point lies inside the room
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.x && y >= self.y && x < self.x + self.width && y < self.y + self.height
    }

    /// Check if two rooms share any cell
    pub fn overlaps(&self, other: &Room) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }
}

/// Index of the first room containing `(x, y)`
pub fn pos_to_room(rooms: &[Room], x: usize, y: usize) -> Option<usize> {
    rooms.iter().position(|r| r.contains(x, y))
}

/// Check if a cell is on the permanent wall border
///
/// The two top rows, the bottom row and the outer columns.
pub fn is_border(width: usize, height: usize, x: usize, y: usize) -> bool {
    y < TOP_BORDER || y + 1 == height || x < 1 || x + 1 == width
}

/// Walls grid with a solid border and open interior
pub fn init_walls(width: usize, height: usize) -> Grid<WallTile> {
    let mut walls = Grid::new(width, height, WallTile::Open);
    for y in 0..height {
        for x in 0..width {
            if is_border(width, height, x, y) {
                walls.set(x, y, WallTile::Solid);
            }
        }
    }
    walls
}

/// Outcome of probing a cell during the packing scan
enum Probe {
    /// Inside an already placed room
    Busy,
    /// Open run too short in one direction
    Rejected,
    /// Open pocket of the given size starts here
    Pocket { width: usize, height: usize },
}

fn probe(walls: &Grid<WallTile>, rooms: &[Room], x: usize, y: usize) -> Probe {
    if pos_to_room(rooms, x, y).is_some() {
        return Probe::Busy;
    }

    let width = (x..walls.width())
        .take_while(|&i| walls.get(i, y) == Some(WallTile::Open))
        .count();
    if width < MIN_ROOM_SIZE {
        return Probe::Rejected;
    }

    let height = (y..walls.height())
        .take_while(|&j| walls.get(x, j) == Some(WallTile::Open))
        .count();
    if height < MIN_ROOM_SIZE {
        return Probe::Rejected;
    }

    Probe::Pocket { width, height }
}

/// Size a room inside a pocket, leaving a margin
fn room_in_pocket(x: usize, y: usize, width: usize, height: usize, rng: &mut GenRng) -> Room {
    let width = rng.rand_int(MIN_ROOM_SIZE, (width / 2).max(MIN_ROOM_SIZE));
    let height = rng.rand_int(MIN_ROOM_SIZE, (height / 2).max(MIN_ROOM_SIZE));
    Room::new(x, y, width, height)
}

/// Wall off the bottom, left and right of a room, clipped to the grid
///
/// The top edge is left alone: it is already bounded by the map border or
/// by the bottom strip of whatever room sits above.
pub fn wall_off(walls: &mut Grid<WallTile>, room: &Room) {
    let (x, y) = (room.x as isize, room.y as isize);
    let (w, h) = (room.width as isize, room.height as isize);

    for dy in h..h + BOTTOM_MARGIN {
        for dx in -SIDE_MARGIN..w + SIDE_MARGIN {
            walls.set_clipped(x + dx, y + dy, WallTile::Solid);
        }
    }

    for dy in 0..h {
        for dx in (-SIDE_MARGIN..0).chain(w..w + SIDE_MARGIN) {
            walls.set_clipped(x + dx, y + dy, WallTile::Solid);
        }
    }
}

/// Greedily place rooms in the open interior of `walls`
///
/// Open cells that cannot start a room are turned solid, so after packing
/// every open cell belongs to exactly one room.
pub fn pack_rooms(walls: &mut Grid<WallTile>, rng: &mut GenRng) -> Vec<Room> {
    let mut rooms = Vec::new();
    let (width, height) = (walls.width(), walls.height());

    for y in TOP_BORDER..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            match probe(walls, &rooms, x, y) {
                Probe::Busy => {}
                Probe::Rejected => walls.set(x, y, WallTile::Solid),
                Probe::Pocket {
                    width: pocket_w,
                    height: pocket_h,
                } => {
                    let room = room_in_pocket(x, y, pocket_w, pocket_h, rng);
                    trace!(
                        "room {} at ({}, {}) {}x{} in {}x{} pocket",
                        rooms.len(),
                        x,
                        y,
                        room.width,
                        room.height,
                        pocket_w,
                        pocket_h
                    );
                    wall_off(walls, &room);
                    rooms.push(room);
                }
            }
        }
    }

    rooms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_contains() {
        let room = Room::new(2, 3, 4, 5);
        assert!(room.contains(2, 3));
        assert!(room.contains(5, 7));
        assert!(!room.contains(6, 3));
        assert!(!room.contains(2, 8));
        assert!(!room.contains(1, 3));
    }

    #[test]
    fn test_room_overlaps() {
        let a = Room::new(0, 0, 3, 3);
        assert!(a.overlaps(&Room::new(2, 2, 3, 3)));
        assert!(!a.overlaps(&Room::new(3, 0, 3, 3)));
        assert!(!a.overlaps(&Room::new(0, 3, 3, 3)));
    }

    #[test]
    fn test_init_walls_border() {
        let walls = init_walls(6, 7);
        for (x, y, tile) in walls.iter() {
            let border = y < 2 || y == 6 || x == 0 || x == 5;
            assert_eq!(tile == WallTile::Solid, border, "({x}, {y})");
            assert_eq!(tile == WallTile::Open, !border, "({x}, {y})");
        }
    }

    #[test]
    fn test_single_pocket_gets_one_room() {
        let mut walls = init_walls(5, 6);
        let mut rng = GenRng::new(42);
        let rooms = pack_rooms(&mut walls, &mut rng);

        assert_eq!(rooms, vec![Room::new(1, 2, 3, 3)]);
        for (x, y, tile) in walls.iter() {
            assert_eq!(tile.is_open(), rooms[0].contains(x, y), "({x}, {y})");
        }
    }

    #[test]
    fn test_narrow_interior_is_rejected() {
        // Interior is only two columns wide
        let mut walls = init_walls(4, 10);
        let mut rng = GenRng::new(1);
        let rooms = pack_rooms(&mut walls, &mut rng);

        assert!(rooms.is_empty());
        assert!(walls.cells().iter().all(|&t| t == WallTile::Solid));
    }

    #[test]
    fn test_wall_off_strips() {
        let mut walls = Grid::new(12, 12, WallTile::Open);
        let room = Room::new(4, 3, 3, 3);
        wall_off(&mut walls, &room);

        // sides, two deep
        for y in 3..6 {
            for x in [2, 3, 7, 8] {
                assert_eq!(walls.get(x, y), Some(WallTile::Solid), "({x}, {y})");
            }
            assert_eq!(walls.get(1, y), Some(WallTile::Open));
            assert_eq!(walls.get(9, y), Some(WallTile::Open));
        }
        // bottom, three deep and as wide as the side strips
        for y in 6..9 {
            for x in 2..9 {
                assert_eq!(walls.get(x, y), Some(WallTile::Solid), "({x}, {y})");
            }
        }
        assert_eq!(walls.get(4, 9), Some(WallTile::Open));
        // top and interior untouched
        for x in 2..9 {
            assert_eq!(walls.get(x, 2), Some(WallTile::Open));
        }
        for y in 3..6 {
            for x in 4..7 {
                assert_eq!(walls.get(x, y), Some(WallTile::Open));
            }
        }
    }

    #[test]
    fn test_wall_off_clips_at_edges() {
        let mut walls = Grid::new(4, 4, WallTile::Open);
        wall_off(&mut walls, &Room::new(0, 0, 3, 3));
        assert_eq!(walls.get(3, 0), Some(WallTile::Solid));
        assert_eq!(walls.get(0, 3), Some(WallTile::Solid));
        assert_eq!(walls.get(0, 0), Some(WallTile::Open));
    }

    #[test]
    fn test_rooms_sized_and_disjoint() {
        for seed in 0..20 {
            let mut walls = init_walls(48, 36);
            let mut rng = GenRng::new(seed);
            let rooms = pack_rooms(&mut walls, &mut rng);

            assert!(rooms.len() > 1, "seed {seed}");
            for (i, a) in rooms.iter().enumerate() {
                assert!(a.width >= MIN_ROOM_SIZE && a.height >= MIN_ROOM_SIZE);
                assert!(!a.connected);
                for b in &rooms[i + 1..] {
                    assert!(!a.overlaps(b), "seed {seed}: {a:?} overlaps {b:?}");
                }
            }
        }
    }

    #[test]
    fn test_open_cells_belong_to_rooms() {
        let mut walls = init_walls(40, 30);
        let mut rng = GenRng::new(3);
        let rooms = pack_rooms(&mut walls, &mut rng);

        for (x, y, tile) in walls.iter() {
            let in_room = pos_to_room(&rooms, x, y).is_some();
            assert_eq!(tile.is_open(), in_room, "({x}, {y})");
            if is_border(40, 30, x, y) {
                assert_eq!(tile, WallTile::Solid);
            }
        }
    }
}
