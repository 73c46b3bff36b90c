//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per call, driven by the session clock
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod interact;
pub mod kinematics;
pub mod level;
pub mod state;
pub mod tick;
pub mod tile;
pub mod world;

pub use autopilot::autopilot;
pub use collision::{HeadHit, MoveResult, Rect, resolve_move};
pub use level::{WORLD_1_1, place_enemies};
pub use state::{
    Actor, ActorKind, Body, Camera, Enemy, GameEvent, GamePhase, GameState, HudSnapshot,
    LifeLossCause, Player,
};
pub use tick::{TickInput, tick};
pub use tile::Tile;
pub use world::TileWorld;
