//! Rectangle-vs-tile collision resolution
//!
//! Movement is resolved one axis at a time: horizontal first, then vertical
//! from the already-resolved x. Resolving the axes separately keeps corners
//! unambiguous (no diagonal tunneling between two tiles).
//!
//! The resolver is pure. It reports where the rectangle ends up and what it
//! touched; callers apply the result to their entities and the world.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::tile::Tile;
use super::world::TileWorld;
use crate::consts::{EDGE_EPSILON, TILE};
use crate::tile_coord;

/// Axis-aligned rectangle in world pixels (top-left origin, y down)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Bounds of the tile at (tx, ty)
    pub fn tile(tx: i32, ty: i32) -> Self {
        Self::new(tx as f32 * TILE, ty as f32 * TILE, TILE, TILE)
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Strict overlap: touching edges do not count
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Overlap area (0 when only touching)
    pub fn overlap_area(&self, other: &Rect) -> f32 {
        let w = self.right().min(other.right()) - self.x.max(other.x);
        let h = self.bottom().min(other.bottom()) - self.y.max(other.y);
        w.max(0.0) * h.max(0.0)
    }

    /// Inclusive range of tile columns covered by [left, right)
    fn columns(left: f32, right: f32) -> std::ops::RangeInclusive<i32> {
        tile_coord(left)..=tile_coord(right - EDGE_EPSILON)
    }
}

/// An upward collision against a breakable tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadHit {
    pub tx: i32,
    pub ty: i32,
    pub tile: Tile,
}

/// Result of resolving one move
#[derive(Debug, Clone, PartialEq)]
pub struct MoveResult {
    /// Resolved top-left position
    pub pos: Vec2,
    /// A downward move was stopped by a tile beneath
    pub grounded: bool,
    /// The horizontal move was stopped by a tile
    pub hit_wall: bool,
    /// An upward move was stopped by a tile above
    pub hit_ceiling: bool,
    /// Breakable tiles bumped from below, ascending tile x
    pub head_hits: Vec<HeadHit>,
}

/// Move `rect` by `delta` against the solid tiles of `world`
pub fn resolve_move(world: &TileWorld, rect: Rect, delta: Vec2) -> MoveResult {
    let (x, hit_wall) = resolve_horizontal(world, rect, delta.x);
    let moved = Rect { x, ..rect };
    let (y, grounded, hit_ceiling, head_hits) = resolve_vertical(world, moved, delta.y);

    MoveResult {
        pos: Vec2::new(x, y),
        grounded,
        hit_wall,
        hit_ceiling,
        head_hits,
    }
}

/// Find the nearest tile line a moving edge runs into.
///
/// `lead` is the leading edge coordinate and `d` the signed displacement
/// along the axis. Tiles are visited nearest first; only tiles whose facing
/// side is at or ahead of the leading edge count, so a tile the rectangle
/// already overlaps never pushes it backward. Returns the tile index and the
/// coordinate of its facing side.
fn sweep(lead: f32, d: f32, blocked: impl Fn(i32) -> bool) -> Option<(i32, f32)> {
    if d > 0.0 {
        (tile_coord(lead - EDGE_EPSILON)..=tile_coord(lead + d))
            .map(|t| (t, t as f32 * TILE))
            .filter(|&(_, face)| face >= lead - EDGE_EPSILON && face <= lead + d)
            .find(|&(t, _)| blocked(t))
    } else if d < 0.0 {
        (tile_coord(lead + d) - 1..=tile_coord(lead + EDGE_EPSILON) - 1)
            .rev()
            .map(|t| (t, (t + 1) as f32 * TILE))
            .filter(|&(_, face)| face <= lead + EDGE_EPSILON && face >= lead + d)
            .find(|&(t, _)| blocked(t))
    } else {
        None
    }
}

/// Horizontal pass. Returns the resolved x and whether a tile stopped it.
fn resolve_horizontal(world: &TileWorld, rect: Rect, dx: f32) -> (f32, bool) {
    let rows = Rect::columns(rect.y, rect.bottom());
    let solid_column = |tx: i32| rows.clone().any(|ty| world.is_solid(tx, ty));

    let lead = if dx > 0.0 { rect.right() } else { rect.x };
    match sweep(lead, dx, solid_column) {
        Some((_, face)) if dx > 0.0 => (face - rect.w, true),
        Some((_, face)) => (face, true),
        None => (rect.x + dx, false),
    }
}

/// Vertical pass. Returns the resolved y, grounded, ceiling contact, and the
/// head hits from the blocking row.
fn resolve_vertical(
    world: &TileWorld,
    rect: Rect,
    dy: f32,
) -> (f32, bool, bool, Vec<HeadHit>) {
    let columns = Rect::columns(rect.x, rect.right());
    let solid_row = |ty: i32| columns.clone().any(|tx| world.is_solid(tx, ty));

    if dy > 0.0 {
        match sweep(rect.bottom(), dy, solid_row) {
            Some((_, face)) => (face - rect.h, true, false, Vec::new()),
            None => (rect.y + dy, false, false, Vec::new()),
        }
    } else {
        match sweep(rect.y, dy, solid_row) {
            Some((ty, face)) => {
                let head_hits = columns
                    .clone()
                    .map(|tx| (tx, world.tile_at(tx, ty)))
                    .filter(|(_, tile)| tile.is_breakable())
                    .map(|(tx, tile)| HeadHit { tx, ty, tile })
                    .collect();
                (face, false, true, head_hits)
            }
            None => (rect.y + dy, false, false, Vec::new()),
        }
    }
}
