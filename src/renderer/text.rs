//! Plain-text viewport renderer for terminals, logs and tests

use super::{Frame, RenderSink};
use crate::sim::{Body, HudSnapshot};
use crate::tile_coord;

const PLAYER_GLYPH: char = '@';
const ENEMY_GLYPH: char = 'e';

/// Renders the visible columns of the world as one character per tile,
/// preceded by a HUD line
#[derive(Debug, Default)]
pub struct TextRenderer {
    output: String,
    frames: u64,
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently rendered frame
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Frames rendered so far
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl RenderSink for TextRenderer {
    fn render(&mut self, frame: &Frame<'_>) {
        let columns = frame.visible_columns();
        let height = frame.world.height() as i32;
        let width = columns.len();

        let mut grid: Vec<Vec<char>> = (0..height)
            .map(|ty| {
                columns
                    .clone()
                    .map(|tx| frame.world.tile_at(tx, ty).symbol())
                    .collect()
            })
            .collect();

        let mut plot = |body: &Body, glyph: char| {
            let center = body.center();
            let col = tile_coord(center.x) - columns.start;
            let row = tile_coord(center.y);
            if (0..width as i32).contains(&col) && (0..height).contains(&row) {
                grid[row as usize][col as usize] = glyph;
            }
        };

        for enemy in frame.enemies.iter().filter(|e| e.alive) {
            plot(&enemy.body, ENEMY_GLYPH);
        }
        if frame.player_visible() {
            plot(&frame.player.body, PLAYER_GLYPH);
        }

        self.output.clear();
        self.output.push_str(&hud_line(&frame.hud));
        if frame.paused {
            self.output.push_str("  PAUSED");
        }
        self.output.push('\n');
        for row in grid {
            self.output.extend(row);
            self.output.push('\n');
        }
        self.frames += 1;
    }
}

/// HUD counters in arcade layout
pub fn hud_line(hud: &HudSnapshot) -> String {
    format!(
        "SCORE {:06}  COINS {}  WORLD {}  TIME {}  LIVES {}",
        hud.score,
        hud.coins,
        hud.world,
        hud.time.max(0.0).floor() as u32,
        hud.lives
    )
}
