//! Tile types and their symbol alphabet

use serde::{Deserialize, Serialize};

/// A single cell of the level grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tile {
    #[default]
    Empty,
    Ground,
    Platform,
    Brick,
    CoinBlock,
    Pipe,
    Flagpole,
    Goal,
    Tree,
    Cloud,
}

impl Tile {
    /// Parse a template symbol. Returns None for symbols outside the alphabet
    /// (the spawn marker 'S' included, it is handled by the loader).
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            ' ' => Some(Tile::Empty),
            '#' => Some(Tile::Ground),
            '=' => Some(Tile::Platform),
            'B' => Some(Tile::Brick),
            '?' => Some(Tile::CoinBlock),
            'P' => Some(Tile::Pipe),
            'F' => Some(Tile::Flagpole),
            'G' => Some(Tile::Goal),
            'T' => Some(Tile::Tree),
            'C' => Some(Tile::Cloud),
            _ => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Tile::Empty => ' ',
            Tile::Ground => '#',
            Tile::Platform => '=',
            Tile::Brick => 'B',
            Tile::CoinBlock => '?',
            Tile::Pipe => 'P',
            Tile::Flagpole => 'F',
            Tile::Goal => 'G',
            Tile::Tree => 'T',
            Tile::Cloud => 'C',
        }
    }

    /// Whether this tile blocks movement
    pub fn is_solid(&self) -> bool {
        match self {
            Tile::Ground
            | Tile::Platform
            | Tile::Brick
            | Tile::CoinBlock
            | Tile::Pipe
            | Tile::Flagpole
            | Tile::Goal => true,
            Tile::Empty | Tile::Tree | Tile::Cloud => false,
        }
    }

    /// Whether a head hit consumes this tile (turns it into `Empty`)
    pub fn is_breakable(&self) -> bool {
        matches!(self, Tile::Brick | Tile::CoinBlock)
    }

    pub fn is_decoration(&self) -> bool {
        matches!(self, Tile::Tree | Tile::Cloud)
    }
}
