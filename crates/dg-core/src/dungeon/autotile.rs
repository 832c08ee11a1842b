//! Wall autotiling
//!
//! Turns raw open/solid wall state into edge and corner pieces with a fixed
//! sequence of neighbourhood passes. Each pass rewrites the cells its rule
//! matches across the whole grid; later rules test for pieces written by
//! earlier ones, so the order in [`PASSES`] is significant.
//!
//! Neighbours outside the grid never match anything, which gives border
//! cells a one-sided version of each rule.

use log::debug;

use crate::grid::Grid;

use super::tile::WallTile;

/// A cell and its neighbourhood, as seen by a rule
pub struct Around<'a> {
    walls: &'a Grid<WallTile>,
    x: usize,
    y: usize,
}

impl<'a> Around<'a> {
    fn new(walls: &'a Grid<WallTile>, x: usize, y: usize) -> Self {
        Self { walls, x, y }
    }

    fn at(&self, dx: isize, dy: isize) -> Option<WallTile> {
        self.walls.neighbor(self.x, self.y, dx, dy)
    }

    fn is(&self, dx: isize, dy: isize, tile: WallTile) -> bool {
        self.at(dx, dy) == Some(tile)
    }

    fn is_any(&self, dx: isize, dy: isize, tiles: &[WallTile]) -> bool {
        self.at(dx, dy).is_some_and(|t| tiles.contains(&t))
    }

    fn center(&self, tile: WallTile) -> bool {
        self.is(0, 0, tile)
    }
}

/// A rule deciding whether a cell takes a pass's tile
pub type Rule = fn(&Around) -> bool;

const UP: (isize, isize) = (0, -1);
const DOWN: (isize, isize) = (0, 1);
const LEFT: (isize, isize) = (-1, 0);
const RIGHT: (isize, isize) = (1, 0);

fn is_at(c: &Around, (dx, dy): (isize, isize), tile: WallTile) -> bool {
    c.is(dx, dy, tile)
}

fn any_at(c: &Around, (dx, dy): (isize, isize), tiles: &[WallTile]) -> bool {
    c.is_any(dx, dy, tiles)
}

fn enclosed(c: &Around) -> bool {
    c.center(WallTile::Solid)
        && (-1..=1).all(|dy| (-1..=1).all(|dx| !c.is(dx, dy, WallTile::Open)))
}

fn top(c: &Around) -> bool {
    is_at(c, UP, WallTile::Open) && c.center(WallTile::Solid) && is_at(c, DOWN, WallTile::Interior)
}

fn bottom(c: &Around) -> bool {
    is_at(c, UP, WallTile::Interior) && c.center(WallTile::Solid) && is_at(c, DOWN, WallTile::Open)
}

fn left(c: &Around) -> bool {
    c.center(WallTile::Solid) && is_at(c, LEFT, WallTile::Open)
}

fn right(c: &Around) -> bool {
    c.center(WallTile::Solid) && is_at(c, RIGHT, WallTile::Open)
}

fn left_bottom(c: &Around) -> bool {
    c.center(WallTile::Left) && is_at(c, DOWN, WallTile::Open) && is_at(c, LEFT, WallTile::Open)
}

fn right_bottom(c: &Around) -> bool {
    c.center(WallTile::Right) && is_at(c, DOWN, WallTile::Open) && is_at(c, RIGHT, WallTile::Open)
}

fn inner_left_up(c: &Around) -> bool {
    c.center(WallTile::Solid)
        && any_at(c, DOWN, &[WallTile::Right, WallTile::RightBottom])
        && any_at(c, RIGHT, &[WallTile::Bottom, WallTile::RightBottom])
}

fn inner_right_up(c: &Around) -> bool {
    c.center(WallTile::Solid)
        && any_at(c, DOWN, &[WallTile::Left, WallTile::LeftBottom])
        && any_at(c, LEFT, &[WallTile::Bottom, WallTile::LeftBottom])
}

fn inner_right_bottom(c: &Around) -> bool {
    c.center(WallTile::Solid)
        && is_at(c, UP, WallTile::Right)
        && any_at(c, RIGHT, &[WallTile::Top, WallTile::Open])
}

fn inner_left_bottom(c: &Around) -> bool {
    c.center(WallTile::Solid)
        && is_at(c, UP, WallTile::Left)
        && any_at(c, LEFT, &[WallTile::Top, WallTile::Open])
}

fn left_up(c: &Around) -> bool {
    c.center(WallTile::Left) && is_at(c, RIGHT, WallTile::Top)
}

fn right_up(c: &Around) -> bool {
    c.center(WallTile::Right) && is_at(c, LEFT, WallTile::Top)
}

/// Autotiling passes in the order they must run
pub const PASSES: [(WallTile, Rule); 13] = [
    (WallTile::Interior, enclosed),
    (WallTile::Top, top),
    (WallTile::Bottom, bottom),
    (WallTile::Left, left),
    (WallTile::Right, right),
    (WallTile::LeftBottom, left_bottom),
    (WallTile::RightBottom, right_bottom),
    (WallTile::InnerLeftUp, inner_left_up),
    (WallTile::InnerRightUp, inner_right_up),
    (WallTile::InnerRightBottom, inner_right_bottom),
    (WallTile::InnerLeftBottom, inner_left_bottom),
    (WallTile::LeftUp, left_up),
    (WallTile::RightUp, right_up),
];

/// Run one pass, returning the number of cells rewritten
pub fn apply_pass(walls: &mut Grid<WallTile>, tile: WallTile, rule: Rule) -> usize {
    let mut changed = 0;
    for y in 0..walls.height() {
        for x in 0..walls.width() {
            if rule(&Around::new(walls, x, y)) && walls.get(x, y) != Some(tile) {
                walls.set(x, y, tile);
                changed += 1;
            }
        }
    }
    changed
}

/// Classify every wall cell into its edge or corner piece
///
/// Running it again on its own output changes nothing. Returns the number
/// of cells rewritten.
pub fn autotile(walls: &mut Grid<WallTile>) -> usize {
    PASSES
        .iter()
        .map(|&(tile, rule)| {
            let changed = apply_pass(walls, tile, rule);
            debug!("autotile {tile}: {changed} cells");
            changed
        })
        .sum()
}
