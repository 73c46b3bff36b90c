//! Per-tick movement for the player and enemies

use super::collision::{HeadHit, resolve_move};
use super::state::{Enemy, Player};
use super::tick::TickInput;
use super::world::TileWorld;
use crate::settings::Tuning;
use crate::tile_coord;

/// Integrate the player for one tick and resolve it against the world.
///
/// Returns the breakable tiles bumped from below this tick.
pub fn step_player(
    player: &mut Player,
    input: &TickInput,
    world: &TileWorld,
    tuning: &Tuning,
) -> Vec<HeadHit> {
    let body = &mut player.body;

    body.vel.x += f32::from(input.direction.signum()) * tuning.accel;
    body.vel.x *= if player.on_ground {
        tuning.ground_friction
    } else {
        tuning.air_drag
    };
    body.vel.x = body.vel.x.clamp(-tuning.max_run, tuning.max_run);

    if input.jump && player.on_ground {
        body.vel.y = tuning.jump_vel;
        player.on_ground = false;
    }

    body.apply_gravity(tuning.gravity, tuning.max_fall);

    // Contacts move the body but leave its velocity alone
    let result = resolve_move(world, body.rect(), body.vel);
    body.pos = result.pos;
    player.on_ground = result.grounded;

    result.head_hits
}

/// Patrol one enemy: walk, turn at walls and ledges, fall, snap to ground.
///
/// Enemies skip the full resolver; checking one pixel ahead at body and foot
/// height plus a downward snap is enough for their square hitboxes.
pub fn step_enemy(enemy: &mut Enemy, world: &TileWorld, tuning: &Tuning) {
    if !enemy.alive {
        return;
    }

    let body = &mut enemy.body;
    body.apply_gravity(tuning.gravity, tuning.max_fall);
    body.pos.x += body.vel.x;

    let ahead_x = if body.vel.x < 0.0 {
        body.pos.x - 1.0
    } else {
        body.pos.x + body.size.x + 1.0
    };
    let ahead = tile_coord(ahead_x);
    let wall = world.is_solid(ahead, tile_coord(body.pos.y));
    let ledge = !world.is_solid(ahead, tile_coord(body.bottom()));
    if body.vel.x != 0.0 && (wall || ledge) {
        enemy.turn_around();
    }

    let body = &mut enemy.body;
    body.pos.y += body.vel.y;

    // Ground snap along the foot line
    let ty = tile_coord(body.bottom());
    let left = tile_coord(body.pos.x);
    let right = tile_coord(body.pos.x + body.size.x);
    if (left..=right).any(|tx| world.is_solid(tx, ty)) {
        body.pos.y = ty as f32 * crate::consts::TILE - body.size.y;
        body.vel.y = 0.0;
    }
}
