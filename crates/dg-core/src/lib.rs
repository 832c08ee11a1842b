//! dg-core: procedural dungeon layout generation
//!
//! Produces six same-shaped tile layers (ground, floor, walls, decals,
//! upper, leaves) for a room-and-corridor map whose rooms are joined by a
//! random spanning tree of doorways, then classifies raw wall state into
//! edge and corner tile codes for a tile renderer.
//!
//! Generation is pure: every stage works on explicitly passed grids and a
//! caller-supplied [`GenRng`], so independent generations can run on
//! separate threads without coordination.

pub mod config;
pub mod dungeon;
pub mod grid;

mod consts;
mod error;
mod rng;

pub use config::GenConfig;
pub use consts::*;
pub use dungeon::{Dungeon, generate, generate_seeded};
pub use error::GenError;
pub use grid::{Grid, Layer, LayerKind, LayerSet};
pub use rng::GenRng;
