//! Interaction rules: tile bumps, enemy contact, goal, timer and lives

use super::collision::HeadHit;
use super::state::{Enemy, GameEvent, GamePhase, GameState, LifeLossCause, Player};
use super::tile::Tile;
use crate::settings::Tuning;
use crate::tile_coord;

/// How a player/enemy overlap resolves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// No overlap, or overlap while invulnerable
    Ignored,
    /// Player landed on the enemy from above
    Stomp,
    /// Enemy hurts the player
    Damage,
}

/// Whether losing a life ended the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifeOutcome {
    Respawned,
    GameOver,
}

/// Classify an overlap. Stomp wins whenever its condition holds: the player
/// is descending and its bottom is less than `stomp_depth` into the enemy.
pub fn classify_contact(player: &Player, enemy: &Enemy, tuning: &Tuning) -> Contact {
    if !enemy.alive || !player.body.rect().overlaps(&enemy.body.rect()) {
        return Contact::Ignored;
    }

    let penetration = player.body.bottom() - enemy.body.pos.y;
    if player.body.vel.y > 0.0 && penetration < tuning.stomp_depth {
        Contact::Stomp
    } else if !player.is_invulnerable() {
        Contact::Damage
    } else {
        Contact::Ignored
    }
}

/// Consume bumped tiles and award their score
pub fn apply_head_hits(state: &mut GameState, hits: &[HeadHit], events: &mut Vec<GameEvent>) {
    for hit in hits {
        match state.world.consume(hit.tx, hit.ty) {
            Tile::Brick => {
                state.score += state.rules.score_brick;
                log::debug!("Brick broken at ({}, {})", hit.tx, hit.ty);
                events.push(GameEvent::BrickBroken {
                    tx: hit.tx,
                    ty: hit.ty,
                });
            }
            Tile::CoinBlock => {
                state.coins += 1;
                state.score += state.rules.score_coin;
                log::debug!("Coin block emptied at ({}, {})", hit.tx, hit.ty);
                events.push(GameEvent::CoinCollected {
                    tx: hit.tx,
                    ty: hit.ty,
                });
            }
            _ => {}
        }
    }
}

/// Take one life. Respawns the player unless it was the last one.
pub fn lose_life(
    state: &mut GameState,
    cause: LifeLossCause,
    events: &mut Vec<GameEvent>,
) -> LifeOutcome {
    state.lives = state.lives.saturating_sub(1);
    events.push(GameEvent::LifeLost {
        cause,
        lives_left: state.lives,
    });

    if state.lives == 0 {
        log::info!("Game over: {cause:?}, final score {}", state.score);
        state.phase = GamePhase::GameOver;
        events.push(GameEvent::GameOver);
        return LifeOutcome::GameOver;
    }

    log::info!("Life lost ({cause:?}), {} left", state.lives);
    state.respawn_player();
    LifeOutcome::Respawned
}

/// Resolve every overlapping pair of player and live enemy.
///
/// Enemies are only marked dead here; removal happens at the end of the tick
/// so the scan stays stable. Returns the life outcome if damage was taken.
pub fn resolve_enemy_contacts(
    state: &mut GameState,
    events: &mut Vec<GameEvent>,
) -> Option<LifeOutcome> {
    let mut outcome = None;

    for i in 0..state.enemies.len() {
        match classify_contact(&state.player, &state.enemies[i], &state.tuning) {
            Contact::Ignored => {}
            Contact::Stomp => {
                let enemy = &mut state.enemies[i];
                enemy.alive = false;
                state.score += state.rules.score_stomp;
                state.player.body.vel.y = state.tuning.jump_vel * state.tuning.stomp_bounce;
                log::debug!("Enemy {} stomped", enemy.id);
                events.push(GameEvent::EnemyStomped { id: enemy.id });
            }
            Contact::Damage => {
                let result = lose_life(state, LifeLossCause::EnemyContact, events);
                outcome = Some(result);
                if result == LifeOutcome::GameOver {
                    break;
                }
            }
        }
    }

    outcome
}

/// Goal tile under the player's center, or one tile to its right (the goal is
/// solid, so a player walking in from the left stops just short of it)
pub fn reached_goal(state: &GameState) -> bool {
    let center = state.player.body.center();
    let tx = tile_coord(center.x);
    let ty = tile_coord(center.y);
    state.world.tile_at(tx, ty) == Tile::Goal || state.world.tile_at(tx + 1, ty) == Tile::Goal
}

/// Award the goal and send the player back to the start of the level
pub fn check_goal(state: &mut GameState, events: &mut Vec<GameEvent>) -> bool {
    if !reached_goal(state) {
        return false;
    }
    state.score += state.rules.score_goal;
    state.time_remaining += state.rules.goal_time_bonus;
    log::info!("Goal reached, score {}", state.score);
    events.push(GameEvent::GoalReached);
    state.respawn_player();
    true
}

/// Run the level timer down. Running out costs a life and refills the clock.
pub fn tick_timer(
    state: &mut GameState,
    dt: f32,
    events: &mut Vec<GameEvent>,
) -> Option<LifeOutcome> {
    state.time_remaining -= dt;
    if state.time_remaining > 0.0 {
        return None;
    }

    let outcome = lose_life(state, LifeLossCause::TimeUp, events);
    if outcome == LifeOutcome::Respawned {
        state.time_remaining = state.rules.time_budget;
    }
    Some(outcome)
}
