//! Rendering boundary
//!
//! Drawing code lives outside the simulation. Each frame the session hands a
//! [`RenderSink`] a borrowed [`Frame`] of the latest state; sinks never
//! mutate it.

pub mod text;

pub use text::TextRenderer;

use std::ops::Range;

use crate::consts::{TILE, VIEW_W};
use crate::sim::{Enemy, GameState, HudSnapshot, Player, TileWorld};
use crate::tile_coord;

/// Everything needed to draw one frame
#[derive(Debug, Clone)]
pub struct Frame<'a> {
    pub world: &'a TileWorld,
    /// Left edge of the viewport in world pixels
    pub camera_x: f32,
    pub player: &'a Player,
    /// Live enemies only
    pub enemies: &'a [Enemy],
    pub hud: HudSnapshot,
    pub paused: bool,
}

impl<'a> Frame<'a> {
    pub fn from_state(state: &'a GameState, paused: bool) -> Self {
        Self {
            world: &state.world,
            camera_x: state.camera.x,
            player: &state.player,
            enemies: &state.enemies,
            hud: state.hud(),
            paused,
        }
    }

    /// The player blinks while invulnerable
    pub fn player_visible(&self) -> bool {
        !self.player.flicker_hidden()
    }

    /// Tile columns intersecting the viewport
    pub fn visible_columns(&self) -> Range<i32> {
        let first = tile_coord(self.camera_x.floor());
        let count = (VIEW_W / TILE).ceil() as i32;
        // A camera between tile edges exposes one extra partial column
        let extra = i32::from(self.camera_x.floor() % TILE != 0.0);
        first..first + count + extra
    }
}

/// Consumer of rendered frames (GPU, canvas, terminal...)
pub trait RenderSink {
    fn render(&mut self, frame: &Frame<'_>);
}
