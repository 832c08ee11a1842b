//! Dungeon generation
//!
//! Runs the stages in order: allocate layers, fill ground and floor, pack
//! rooms, find connectors, carve the spanning tree of doorways, autotile
//! the walls, then fill the overlay layers.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::config::GenConfig;
use crate::grid::{Grid, LayerSet};
use crate::rng::GenRng;
use crate::{EMPTY, FLOOR_FULLS, GROUND};

use super::autotile::autotile;
use super::carve::connect_rooms;
use super::connector::{WallSegment, detect_connectors};
use super::room::{Room, init_walls, pack_rooms};
use super::tile::WallTile;

/// A generated map and the structure it was built from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dungeon {
    pub layers: LayerSet,
    /// Rooms in placement order; room 0 is where carving starts
    pub rooms: Vec<Room>,
    pub connectors: Vec<WallSegment>,
    /// Doorways cut, one per spanning tree edge
    pub holes: usize,
    /// Seed of the RNG the map was drawn from
    pub seed: u64,
}

impl Dungeon {
    pub fn width(&self) -> usize {
        self.layers.width()
    }

    pub fn height(&self) -> usize {
        self.layers.height()
    }

    /// Typed view of the walls layer
    pub fn walls(&self) -> Grid<WallTile> {
        self.layers
            .walls
            .map(|code| WallTile::from_code(code).unwrap_or(WallTile::Solid))
    }

    /// Indices of the rooms joined to room 0
    pub fn reachable_rooms(&self) -> Vec<usize> {
        self.rooms
            .iter()
            .enumerate()
            .filter(|(_, r)| r.connected)
            .map(|(i, _)| i)
            .collect()
    }

    /// Text preview of the walls layer, one glyph per cell
    pub fn ascii(&self) -> String {
        self.walls()
            .rows()
            .map(|row| row.iter().map(|t| t.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Ground everywhere, a random full floor tile per cell
pub fn fill_bottom(layers: &mut LayerSet, rng: &mut GenRng) {
    layers.ground.fill(GROUND);

    let (width, height) = (layers.width(), layers.height());
    for y in 0..height {
        for x in 0..width {
            let code = rng.choose(&FLOOR_FULLS).copied().unwrap_or(FLOOR_FULLS[0]);
            layers.floor.set(x, y, code);
        }
    }
}

/// Blank the upper, decals and leaves layers
pub fn fill_overlays(layers: &mut LayerSet) {
    layers.upper.fill(EMPTY);
    layers.decals.fill(EMPTY);
    layers.leaves.fill(EMPTY);
}

/// Lay out walls, rooms and connectors on a fresh walls grid
///
/// Returns the autotiled walls along with the structure that produced them.
pub fn build_walls(
    width: usize,
    height: usize,
    rng: &mut GenRng,
) -> (Grid<WallTile>, Vec<Room>, Vec<WallSegment>, usize) {
    let mut walls = init_walls(width, height);

    let mut rooms = pack_rooms(&mut walls, rng);
    debug!("packed {} rooms", rooms.len());

    let mut connectors = detect_connectors(&walls, &rooms);
    debug!("found {} connectors", connectors.len());

    let holes = connect_rooms(&mut walls, &mut rooms, &mut connectors, rng);
    let unreached = rooms.iter().filter(|r| !r.connected).count();
    debug!("carved {} doorways, {} rooms unreached", holes, unreached);

    let changed = autotile(&mut walls);
    debug!("autotiled {} wall cells", changed);

    (walls, rooms, connectors, holes)
}

/// Generate a dungeon for `config`, drawing randomness from `rng`
///
/// Sides below the minimum are raised to it, whichever way the config was
/// built.
pub fn generate(config: &GenConfig, rng: &mut GenRng) -> Dungeon {
    let (width, height) = config.clamped_size();
    let mut layers = LayerSet::new(width, height);

    fill_bottom(&mut layers, rng);
    let (walls, rooms, connectors, holes) = build_walls(width, height, rng);
    layers.walls = walls.map(WallTile::code);
    fill_overlays(&mut layers);

    info!(
        "generated {}x{} dungeon (seed {}): {} rooms, {} connectors, {} doorways",
        width,
        height,
        rng.seed(),
        rooms.len(),
        connectors.len(),
        holes
    );

    Dungeon {
        layers,
        rooms,
        connectors,
        holes,
        seed: rng.seed(),
    }
}

/// Generate with a fixed seed; undersized requests are clamped
pub fn generate_seeded(width: usize, height: usize, seed: u64) -> Dungeon {
    let config = GenConfig::new(width, height).with_seed(seed);
    generate(&config, &mut GenRng::new(seed))
}
