//! One simulation step
//!
//! Order within a tick:
//! 1. Player and enemy kinematics
//! 2. Head hits (bricks, coin blocks)
//! 3. Player/enemy contact (stomp or damage)
//! 4. Goal check
//! 5. Level timer
//! 6. Dead enemy removal, enemy re-placement after a lost life
//! 7. Invulnerability countdown
//! 8. Camera

use super::interact::{
    LifeOutcome, apply_head_hits, check_goal, resolve_enemy_contacts, tick_timer,
};
use super::kinematics::{step_enemy, step_player};
use super::state::{GameEvent, GameState};

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// -1 left, 0 none, 1 right
    pub direction: i8,
    /// Jump held (honored only on the ground)
    pub jump: bool,
}

/// Advance the game state by one step of `dt` seconds.
///
/// Returns what happened, in order. A finished game does not advance.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.is_game_over() {
        return events;
    }

    state.time_ticks += 1;

    let head_hits = step_player(&mut state.player, input, &state.world, &state.tuning);
    for enemy in &mut state.enemies {
        step_enemy(enemy, &state.world, &state.tuning);
    }

    apply_head_hits(state, &head_hits, &mut events);

    let mut life_lost = match resolve_enemy_contacts(state, &mut events) {
        Some(LifeOutcome::GameOver) => return events,
        Some(LifeOutcome::Respawned) => true,
        None => false,
    };

    check_goal(state, &mut events);

    match tick_timer(state, dt, &mut events) {
        Some(LifeOutcome::GameOver) => return events,
        Some(LifeOutcome::Respawned) => life_lost = true,
        None => {}
    }

    // End of tick: the contact scan above always sees a stable enemy list
    state.enemies.retain(|e| e.alive);
    if life_lost {
        state.respawn_enemies();
    }

    state.player.invulnerable_ticks = state.player.invulnerable_ticks.saturating_sub(1);

    state
        .camera
        .follow(state.player.body.pos.x, state.rules.camera_lead);

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::settings::Settings;
    use crate::sim::state::{GamePhase, LifeLossCause};
    use crate::sim::tile::Tile;
    use glam::Vec2;

    const DT: f32 = 1.0 / 60.0;

    const RIGHT: TickInput = TickInput {
        direction: 1,
        jump: false,
    };

    /// Flat run with a brick and a coin block two rows above head height
    const RUNWAY: [&str; 8] = [
        "                              ",
        "                              ",
        "                              ",
        "    B?                        ",
        "                              ",
        "                              ",
        "S                             ",
        "##############################",
    ];

    fn runway() -> GameState {
        let mut state = GameState::from_template(&RUNWAY, &Settings::default());
        state.enemies.clear();
        state
    }

    fn settle(state: &mut GameState) {
        for _ in 0..30 {
            tick(state, &TickInput::default(), DT);
        }
        assert!(state.player.on_ground);
    }

    #[test]
    fn test_jump_breaks_brick_overhead() {
        let mut state = runway();
        settle(&mut state);
        // Under the brick at column 4 (x 64..80)
        state.player.body.pos.x = 65.0;

        let jump = TickInput {
            direction: 0,
            jump: true,
        };
        let mut events = tick(&mut state, &jump, DT);
        for _ in 0..30 {
            if !events.is_empty() {
                break;
            }
            events = tick(&mut state, &TickInput::default(), DT);
        }
        assert_eq!(events, vec![GameEvent::BrickBroken { tx: 4, ty: 3 }]);
        // Flush against the brick's underside, still moving up
        let brick_bottom = 4.0 * TILE;
        assert_eq!(state.player.body.pos.y, brick_bottom);
        assert!(state.player.body.vel.y < 0.0);

        // Next tick the jump carries on into the emptied cell
        events.extend(tick(&mut state, &TickInput::default(), DT));
        assert!(state.player.body.pos.y < brick_bottom);
        assert!(state.player.body.vel.y < 0.0);

        for _ in 0..40 {
            events.extend(tick(&mut state, &TickInput::default(), DT));
        }

        assert_eq!(state.world.tile_at(4, 3), Tile::Empty);
        assert_eq!(state.score, SCORE_BRICK);
        assert_eq!(events, vec![GameEvent::BrickBroken { tx: 4, ty: 3 }]);

        // Jumping into the now-empty cell does nothing more
        for _ in 0..40 {
            events.extend(tick(&mut state, &jump, DT));
        }
        assert_eq!(state.score, SCORE_BRICK);
        assert_eq!(state.coins, 0);
    }

    #[test]
    fn test_jump_empties_coin_block() {
        let mut state = runway();
        settle(&mut state);
        state.player.body.pos.x = 82.0;

        let jump = TickInput {
            direction: 0,
            jump: true,
        };
        for _ in 0..80 {
            tick(&mut state, &jump, DT);
        }
        assert_eq!(state.world.tile_at(5, 3), Tile::Empty);
        assert_eq!(state.coins, 1);
        assert_eq!(state.score, SCORE_COIN);
    }

    #[test]
    fn test_timer_expiry_costs_one_life() {
        let mut state = runway();
        state.time_remaining = 0.4;
        let events = tick(&mut state, &TickInput::default(), 0.5);
        assert_eq!(state.lives, START_LIVES - 1);
        assert_eq!(state.time_remaining, TIME_BUDGET);
        assert_eq!(
            events,
            vec![GameEvent::LifeLost {
                cause: LifeLossCause::TimeUp,
                lives_left: START_LIVES - 1
            }]
        );
    }

    #[test]
    fn test_stomp_through_tick() {
        let mut state = runway();
        settle(&mut state);
        let floor_y = state.player.body.pos.y;
        state.player.invulnerable_ticks = 0;
        // Enemy resting on the floor, player dropping onto it
        let id = state.spawn_enemy(Vec2::new(200.0, floor_y + PLAYER_H - ENEMY_H), 0.0);
        // Feet one pixel into the enemy's top
        state.player.body.pos = Vec2::new(199.0, floor_y - 11.0);
        state.player.body.vel = Vec2::new(0.0, 2.0);
        state.player.on_ground = false;

        let events = tick(&mut state, &TickInput::default(), DT);
        assert_eq!(events, vec![GameEvent::EnemyStomped { id }]);
        assert!(state.enemies.is_empty());
        assert_eq!(state.lives, START_LIVES);
        assert!(state.player.body.vel.y < 0.0);
    }

    #[test]
    fn test_walking_into_enemy_hurts() {
        let mut state = runway();
        settle(&mut state);
        let floor_y = state.player.body.pos.y;
        state.player.invulnerable_ticks = 0;
        state.player.body.pos.x = 100.0;
        state.spawn_enemy(Vec2::new(112.0, floor_y + PLAYER_H - ENEMY_H), -ENEMY_SPEED);

        let mut lost = false;
        for _ in 0..10 {
            let events = tick(&mut state, &RIGHT, DT);
            if events
                .iter()
                .any(|e| matches!(e, GameEvent::LifeLost { .. }))
            {
                lost = true;
                break;
            }
        }
        assert!(lost);
        assert_eq!(state.lives, START_LIVES - 1);
        assert_eq!(state.player.body.pos.x, state.spawn.x);
        // Enemies are re-placed from the level (none fit on this runway)
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_game_over_freezes_state() {
        let mut state = runway();
        state.lives = 1;
        state.time_remaining = 0.01;
        let events = tick(&mut state, &TickInput::default(), 0.05);
        assert_eq!(events.last(), Some(&GameEvent::GameOver));
        assert_eq!(state.phase, GamePhase::GameOver);

        let ticks = state.time_ticks;
        let pos = state.player.body.pos;
        assert!(tick(&mut state, &RIGHT, DT).is_empty());
        assert_eq!(state.time_ticks, ticks);
        assert_eq!(state.player.body.pos, pos);
    }

    #[test]
    fn test_game_over_from_enemy_contact_ends_the_tick() {
        let mut state = runway();
        settle(&mut state);
        let floor_y = state.player.body.pos.y;
        state.lives = 1;
        state.player.invulnerable_ticks = 0;
        state.player.body.pos.x = 100.0;
        // Side by side on the floor: too deep for a stomp
        state.spawn_enemy(Vec2::new(104.0, floor_y + PLAYER_H - ENEMY_H), 0.0);
        state.camera.x = 0.0;
        let time_remaining = state.time_remaining;

        let events = tick(&mut state, &TickInput::default(), DT);
        assert_eq!(
            events,
            vec![
                GameEvent::LifeLost {
                    cause: LifeLossCause::EnemyContact,
                    lives_left: 0,
                },
                GameEvent::GameOver,
            ]
        );
        assert_eq!(state.phase, GamePhase::GameOver);
        // Timer, camera and invulnerability never ran
        assert_eq!(state.time_remaining, time_remaining);
        assert_eq!(state.camera.x, 0.0);
        assert_eq!(state.player.invulnerable_ticks, 0);
        assert_eq!(state.enemies.len(), 1);
    }

    #[test]
    fn test_goal_loops_back_to_start() {
        let template = [
            "          ",
            "S       G ",
            "##########",
        ];
        let mut state = GameState::from_template(&template, &Settings::default());
        let mut reached = false;
        for _ in 0..600 {
            if tick(&mut state, &RIGHT, DT).contains(&GameEvent::GoalReached) {
                reached = true;
                break;
            }
        }
        assert!(reached);
        assert_eq!(state.score, SCORE_GOAL);
        assert_eq!(state.player.body.pos, state.spawn);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_invulnerability_counts_down() {
        let mut state = runway();
        assert_eq!(state.player.invulnerable_ticks, RESPAWN_INVULNERABILITY);
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.player.invulnerable_ticks, RESPAWN_INVULNERABILITY - 1);
        for _ in 0..200 {
            tick(&mut state, &TickInput::default(), DT);
        }
        assert_eq!(state.player.invulnerable_ticks, 0);
    }

    #[test]
    fn test_camera_trails_player() {
        let mut state = runway();
        for _ in 0..300 {
            tick(&mut state, &RIGHT, DT);
        }
        let x = state.player.body.pos.x;
        assert!(x > CAMERA_LEAD);
        assert_eq!(state.camera.x, x - CAMERA_LEAD);
    }

    #[test]
    fn test_determinism() {
        let settings = Settings::default();
        let mut state1 = GameState::new(&settings);
        let mut state2 = GameState::new(&settings);

        let inputs = [
            RIGHT,
            TickInput {
                direction: 1,
                jump: true,
            },
            TickInput::default(),
            TickInput {
                direction: -1,
                jump: false,
            },
        ];

        for i in 0..400 {
            let input = &inputs[(i / 25) % inputs.len()];
            let a = tick(&mut state1, input, DT);
            let b = tick(&mut state2, input, DT);
            assert_eq!(a, b);
        }

        assert_eq!(state1.player, state2.player);
        assert_eq!(state1.enemies, state2.enemies);
        assert_eq!(state1.hud(), state2.hud());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn camera_never_moves_back_within_a_life(
                moves in proptest::collection::vec((-1i8..=1, any::<bool>()), 10..200)
            ) {
                let mut state = GameState::new(&Settings::default());
                let mut last_x = state.camera.x;
                for (direction, jump) in moves {
                    let events = tick(&mut state, &TickInput { direction, jump }, DT);
                    let respawned = events.iter().any(|e| {
                        matches!(e, GameEvent::LifeLost { .. } | GameEvent::GoalReached)
                    });
                    if state.is_game_over() {
                        break;
                    }
                    if !respawned {
                        prop_assert!(state.camera.x >= last_x);
                    }
                    last_x = state.camera.x;
                }
            }
        }
    }
}
