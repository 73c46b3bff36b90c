//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives in [`GameState`]; the session owns
//! it and passes it by reference to each subsystem.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::level::{WORLD_1_1, place_enemies};
use super::world::TileWorld;
use crate::consts::*;
use crate::settings::{Rules, Settings, Tuning};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Lives ran out
    GameOver,
}

/// Position, velocity and hitbox shared by every actor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner in world pixels
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Add one tick of gravity, capped at terminal fall speed
    pub fn apply_gravity(&mut self, gravity: f32, max_fall: f32) {
        self.vel.y = (self.vel.y + gravity).min(max_fall);
    }
}

/// Which variant an actor is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorKind {
    Player,
    Enemy,
}

/// Common view over the player and enemies
pub trait Actor {
    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;
    fn kind(&self) -> ActorKind;
}

/// The player character. Never destroyed, only repositioned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    pub on_ground: bool,
    /// Ticks left during which contact damage is ignored
    pub invulnerable_ticks: u32,
}

impl Player {
    pub fn new(spawn: Vec2) -> Self {
        Self {
            body: Body::new(spawn, Vec2::new(PLAYER_W, PLAYER_H)),
            on_ground: false,
            invulnerable_ticks: 0,
        }
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_ticks > 0
    }

    /// Blink pattern while invulnerable: hidden for 4 ticks out of every 8
    pub fn flicker_hidden(&self) -> bool {
        self.invulnerable_ticks > 0 && (self.invulnerable_ticks / 4) % 2 == 0
    }
}

impl Actor for Player {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn kind(&self) -> ActorKind {
        ActorKind::Player
    }
}

/// A patrolling enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub body: Body,
    pub alive: bool,
}

impl Enemy {
    /// `patrol_vx` sets both the patrol speed and the initial direction
    pub fn new(id: u32, pos: Vec2, patrol_vx: f32) -> Self {
        let mut body = Body::new(pos, Vec2::new(ENEMY_W, ENEMY_H));
        body.vel.x = patrol_vx;
        Self {
            id,
            body,
            alive: true,
        }
    }

    /// Reverse the patrol direction
    pub fn turn_around(&mut self) {
        self.body.vel.x = -self.body.vel.x;
    }
}

impl Actor for Enemy {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn kind(&self) -> ActorKind {
        ActorKind::Enemy
    }
}

/// Horizontal scroll follower that never moves backward within a life
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub x: f32,
}

impl Camera {
    /// Ratchet forward to keep `lead` pixels behind the target
    pub fn follow(&mut self, target_x: f32, lead: f32) {
        self.x = self.x.max(target_x - lead);
    }

    /// Jump to a respawned target, ignoring the ratchet
    pub fn snap_to(&mut self, target_x: f32, offset: f32) {
        self.x = (target_x - offset).max(0.0);
    }
}

/// Read-only counters for the HUD, rebuilt from the state every tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HudSnapshot {
    pub score: u64,
    pub coins: u32,
    pub time: f32,
    pub lives: u32,
    pub world: String,
}

/// Why the player lost a life
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifeLossCause {
    EnemyContact,
    TimeUp,
}

/// Things that happened during a tick, in order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    BrickBroken { tx: i32, ty: i32 },
    CoinCollected { tx: i32, ty: i32 },
    EnemyStomped { id: u32 },
    LifeLost { cause: LifeLossCause, lives_left: u32 },
    GoalReached,
    GameOver,
}

/// Complete game state for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub world: TileWorld,
    /// Player spawn in world pixels
    pub spawn: Vec2,
    pub player: Player,
    /// Live enemies (sorted by id)
    pub enemies: Vec<Enemy>,
    pub camera: Camera,
    pub score: u64,
    pub coins: u32,
    /// Seconds left on the level timer
    pub time_remaining: f32,
    pub lives: u32,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub seed: u64,
    pub world_id: String,
    pub tuning: Tuning,
    pub rules: Rules,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a game on the built-in level
    pub fn new(settings: &Settings) -> Self {
        Self::from_template(&WORLD_1_1, settings)
    }

    /// Create a game from template rows
    pub fn from_template<S: AsRef<str>>(template: &[S], settings: &Settings) -> Self {
        let (world, spawn) = TileWorld::from_template(template);
        log::info!(
            "Loaded level {} ({}x{} tiles), spawn at ({}, {})",
            settings.world_id,
            world.width(),
            world.height(),
            spawn.x,
            spawn.y
        );

        let mut state = Self {
            world,
            spawn,
            player: Player::new(spawn),
            enemies: Vec::new(),
            camera: Camera::default(),
            score: 0,
            coins: 0,
            time_remaining: settings.rules.time_budget,
            lives: settings.rules.start_lives,
            phase: GamePhase::Playing,
            time_ticks: 0,
            seed: settings.seed,
            world_id: settings.world_id.clone(),
            tuning: settings.tuning,
            rules: settings.rules,
            next_id: 1,
        };

        state.respawn_enemies();
        state.respawn_player();
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Put the player back at the spawn with a fresh invulnerability window
    pub fn respawn_player(&mut self) {
        let player = &mut self.player;
        player.body.pos = self.spawn;
        player.body.vel = Vec2::ZERO;
        player.on_ground = false;
        player.invulnerable_ticks = self.rules.respawn_invulnerability;
        self.camera
            .snap_to(player.body.pos.x, self.rules.camera_respawn_offset);
    }

    /// Replace the enemy population with a fresh placement from the seed
    pub fn respawn_enemies(&mut self) {
        let enemies = place_enemies(&self.world, self.seed, self.next_id);
        self.next_id += enemies.len() as u32;
        self.enemies = enemies;
    }

    /// Spawn one extra enemy (levels and tests)
    pub fn spawn_enemy(&mut self, pos: Vec2, patrol_vx: f32) -> u32 {
        let id = self.next_entity_id();
        self.enemies.push(Enemy::new(id, pos, patrol_vx));
        id
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot {
            score: self.score,
            coins: self.coins,
            time: self.time_remaining,
            lives: self.lives,
            world: self.world_id.clone(),
        }
    }
}
