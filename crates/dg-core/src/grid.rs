//! Dense 2D grids and the six output layers

use core::ops::Index;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

use crate::TileCode;

/// Row-major `width × height` grid addressed by `(x, y)`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T: Copy> Grid<T> {
    /// Create a grid with every cell set to `fill`
    pub fn new(width: usize, height: usize, fill: T) -> Self {
        Self {
            width,
            height,
            cells: vec![fill; width * height],
        }
    }

    /// Build a grid from row slices; rows must all be `width` long
    pub fn from_rows(width: usize, rows: &[Vec<T>]) -> Option<Self> {
        if rows.iter().any(|row| row.len() != width) {
            return None;
        }
        Some(Self {
            width,
            height: rows.len(),
            cells: rows.iter().flatten().copied().collect(),
        })
    }

    /// Build a grid from a flat row-major vector
    pub fn from_vec(width: usize, height: usize, cells: Vec<T>) -> Option<Self> {
        if cells.len() != width * height {
            return None;
        }
        Some(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Check signed coordinates against the grid bounds
    pub fn in_bounds(&self, x: isize, y: isize) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Cell at `(x, y)`, or `None` outside the grid
    pub fn get(&self, x: usize, y: usize) -> Option<T> {
        if x < self.width && y < self.height {
            Some(self.cells[y * self.width + x])
        } else {
            None
        }
    }

    /// Cell at a signed offset from `(x, y)`, or `None` outside the grid
    pub fn neighbor(&self, x: usize, y: usize, dx: isize, dy: isize) -> Option<T> {
        let nx = x as isize + dx;
        let ny = y as isize + dy;
        if self.in_bounds(nx, ny) {
            Some(self.cells[ny as usize * self.width + nx as usize])
        } else {
            None
        }
    }

    /// Write a cell; writes outside the grid are dropped
    pub fn set(&mut self, x: usize, y: usize, value: T) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = value;
        }
    }

    /// Write a cell at signed coordinates, clipping to the grid
    pub fn set_clipped(&mut self, x: isize, y: isize, value: T) {
        if self.in_bounds(x, y) {
            self.cells[y as usize * self.width + x as usize] = value;
        }
    }

    pub fn fill(&mut self, value: T) {
        self.cells.fill(value);
    }

    pub fn row(&self, y: usize) -> &[T] {
        &self.cells[y * self.width..(y + 1) * self.width]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.cells.chunks(self.width.max(1))
    }

    /// Copy out as nested `[row][col]` vectors
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        self.rows().map(<[T]>::to_vec).collect()
    }

    /// Flat row-major cells
    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    /// Iterate `(x, y, value)` in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &v)| (i % width, i / width, v))
    }

    pub fn map<U: Copy>(&self, f: impl FnMut(T) -> U) -> Grid<U> {
        Grid {
            width: self.width,
            height: self.height,
            cells: self.cells.iter().copied().map(f).collect(),
        }
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    fn index(&self, (x, y): (usize, usize)) -> &T {
        assert!(x < self.width && y < self.height, "({x}, {y}) out of bounds");
        &self.cells[y * self.width + x]
    }
}

/// A layer of tile codes
pub type Layer = Grid<TileCode>;

/// The six output layers, bottom to top
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum LayerKind {
    Ground,
    Floor,
    Walls,
    Decals,
    Upper,
    Leaves,
}

/// Six same-shaped layers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerSet {
    pub ground: Layer,
    pub floor: Layer,
    pub walls: Layer,
    pub decals: Layer,
    pub upper: Layer,
    pub leaves: Layer,
}

impl LayerSet {
    /// Allocate six zeroed layers
    pub fn new(width: usize, height: usize) -> Self {
        let blank = Layer::new(width, height, 0);
        Self {
            ground: blank.clone(),
            floor: blank.clone(),
            walls: blank.clone(),
            decals: blank.clone(),
            upper: blank.clone(),
            leaves: blank,
        }
    }

    pub fn width(&self) -> usize {
        self.ground.width()
    }

    pub fn height(&self) -> usize {
        self.ground.height()
    }

    pub fn layer(&self, kind: LayerKind) -> &Layer {
        match kind {
            LayerKind::Ground => &self.ground,
            LayerKind::Floor => &self.floor,
            LayerKind::Walls => &self.walls,
            LayerKind::Decals => &self.decals,
            LayerKind::Upper => &self.upper,
            LayerKind::Leaves => &self.leaves,
        }
    }

    pub fn layer_mut(&mut self, kind: LayerKind) -> &mut Layer {
        match kind {
            LayerKind::Ground => &mut self.ground,
            LayerKind::Floor => &mut self.floor,
            LayerKind::Walls => &mut self.walls,
            LayerKind::Decals => &mut self.decals,
            LayerKind::Upper => &mut self.upper,
            LayerKind::Leaves => &mut self.leaves,
        }
    }

    /// Layers in bottom-to-top order
    pub fn iter(&self) -> impl Iterator<Item = (LayerKind, &Layer)> {
        LayerKind::iter().map(move |kind| (kind, self.layer(kind)))
    }
}
