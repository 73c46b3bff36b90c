//! Retro Plumber - A tile-based 2D platformer simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (tiles, collisions, kinematics, interactions)
//! - `clock`: Frame-driven session that gates and sequences simulation ticks
//! - `input`: Level-triggered input latch shared with the event layer
//! - `renderer`: Render sink abstraction and a text viewport renderer
//! - `settings`: Data-driven tuning, scoring rules and clock configuration

pub mod clock;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use clock::{Session, SessionObserver};
pub use input::{InputLatch, InputSnapshot, Key, Keys};
pub use settings::{Settings, SettingsError};

/// Game configuration constants
///
/// Physics values are per simulation tick (one tick per display frame in the
/// default step mode); they are the defaults for [`settings::Tuning`].
pub mod consts {
    /// Tile edge length in world pixels
    pub const TILE: f32 = 16.0;

    /// Logical viewport size in world pixels
    pub const VIEW_W: f32 = 320.0;
    pub const VIEW_H: f32 = 180.0;

    /// Player physics
    pub const GRAVITY: f32 = 0.35;
    pub const MAX_FALL: f32 = 8.0;
    pub const GROUND_FRICTION: f32 = 0.85;
    pub const AIR_DRAG: f32 = 0.98;
    pub const MAX_RUN: f32 = 1.8;
    pub const ACCEL: f32 = 0.15;
    pub const JUMP_VEL: f32 = -5.4;
    /// Fraction of the jump velocity given back after a stomp
    pub const STOMP_BOUNCE: f32 = 0.7;
    /// Max penetration (player bottom - enemy top) still counted as a stomp
    pub const STOMP_DEPTH: f32 = 10.0;

    /// Player hitbox
    pub const PLAYER_W: f32 = 14.0;
    pub const PLAYER_H: f32 = 16.0;

    /// Enemy defaults
    pub const ENEMY_W: f32 = 12.0;
    pub const ENEMY_H: f32 = 12.0;
    pub const ENEMY_SPEED: f32 = 0.5;
    /// Enemies are placed every N columns
    pub const ENEMY_SPACING: i32 = 12;
    /// First column considered for enemy placement
    pub const ENEMY_FIRST_COLUMN: i32 = 20;
    /// Columns left free of enemies at the end of the level
    pub const ENEMY_END_MARGIN: i32 = 10;

    /// Invulnerability window granted on respawn (ticks)
    pub const RESPAWN_INVULNERABILITY: u32 = 60;

    /// Camera keeps this far behind the player before scrolling
    pub const CAMERA_LEAD: f32 = 80.0;
    /// Camera offset applied when snapping to a respawned player
    pub const CAMERA_RESPAWN_OFFSET: f32 = 40.0;

    /// Session rules
    pub const START_LIVES: u32 = 3;
    pub const TIME_BUDGET: f32 = 400.0;
    pub const GOAL_TIME_BONUS: f32 = 50.0;
    pub const WORLD_ID: &str = "1-1";

    /// Score awards
    pub const SCORE_BRICK: u64 = 50;
    pub const SCORE_COIN: u64 = 200;
    pub const SCORE_STOMP: u64 = 100;
    pub const SCORE_GOAL: u64 = 1000;

    /// Elapsed time per frame is clamped to this (stalls, tab switches)
    pub const MAX_FRAME_MS: f64 = 50.0;
    /// Fixed-step mode tick rate
    pub const FIXED_TICK_HZ: f32 = 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Slack used when converting rectangle edges to tile indices
    pub const EDGE_EPSILON: f32 = 0.001;
}

/// Tile index containing the given world coordinate
#[inline]
pub fn tile_coord(px: f32) -> i32 {
    (px / consts::TILE).floor() as i32
}
