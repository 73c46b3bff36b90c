//! Tile grid with a fixed shape and mutable content
//!
//! Out-of-range queries never fail. Above the grid is open sky, below it is
//! an implicit floor, and past the world's left/right extent are implicit
//! walls, so no entity can leave through undefined space.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::tile::Tile;
use crate::consts::TILE;

/// Marker cell that designates the player spawn in a level template
pub const SPAWN_MARKER: char = 'S';

/// Spawn used when a template has no marker
pub const DEFAULT_SPAWN: Vec2 = Vec2::new(2.0 * TILE, 0.0);

/// A rectangular tile grid (rows may be shorter than the world width)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileWorld {
    rows: Vec<Vec<Tile>>,
    width: usize,
}

impl TileWorld {
    pub fn new(rows: Vec<Vec<Tile>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        Self { rows, width }
    }

    /// Build a world from template rows, stripping the spawn marker.
    ///
    /// Returns the world and the player spawn in world pixels. The spawn sits
    /// one tile above the marker cell; the first marker in row order wins and
    /// any further markers load as empty cells.
    pub fn from_template<S: AsRef<str>>(template: &[S]) -> (Self, Vec2) {
        let mut spawn = None;
        let mut rows = Vec::with_capacity(template.len());

        for (ty, line) in template.iter().enumerate() {
            let mut row = Vec::with_capacity(line.as_ref().len());
            for (tx, symbol) in line.as_ref().chars().enumerate() {
                let tile = if symbol == SPAWN_MARKER {
                    if spawn.is_none() {
                        spawn = Some(Vec2::new(tx as f32 * TILE, (ty as f32 - 1.0) * TILE));
                    }
                    Tile::Empty
                } else {
                    Tile::from_symbol(symbol).unwrap_or_else(|| {
                        log::warn!("Unknown tile symbol {symbol:?} at ({tx}, {ty}), loading as empty");
                        Tile::Empty
                    })
                };
                row.push(tile);
            }
            rows.push(row);
        }

        let spawn = spawn.unwrap_or_else(|| {
            log::warn!("Level template has no spawn marker, using default spawn");
            DEFAULT_SPAWN
        });

        (Self::new(rows), spawn)
    }

    /// Width in tiles (longest row)
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in tiles
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn pixel_width(&self) -> f32 {
        self.width as f32 * TILE
    }

    pub fn pixel_height(&self) -> f32 {
        self.rows.len() as f32 * TILE
    }

    /// Rows of the grid, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Tile at integer tile coordinates, with the boundary policy applied
    pub fn tile_at(&self, tx: i32, ty: i32) -> Tile {
        if ty < 0 {
            return Tile::Empty;
        }
        let Some(row) = self.rows.get(ty as usize) else {
            return Tile::Ground;
        };
        if tx < 0 || tx as usize >= self.width {
            return Tile::Ground;
        }
        row.get(tx as usize).copied().unwrap_or(Tile::Empty)
    }

    pub fn is_solid(&self, tx: i32, ty: i32) -> bool {
        self.tile_at(tx, ty).is_solid()
    }

    /// Consume a breakable tile, leaving the cell empty.
    ///
    /// Returns the tile that was removed, or `Tile::Empty` when the cell holds
    /// nothing consumable (already consumed, solid terrain, out of range).
    pub fn consume(&mut self, tx: i32, ty: i32) -> Tile {
        if tx < 0 || ty < 0 {
            return Tile::Empty;
        }
        let Some(cell) = self
            .rows
            .get_mut(ty as usize)
            .and_then(|row| row.get_mut(tx as usize))
        else {
            return Tile::Empty;
        };
        if !cell.is_breakable() {
            return Tile::Empty;
        }
        std::mem::take(cell)
    }
}
