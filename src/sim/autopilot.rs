//! Demo-mode controller: run right, hop over walls, pits and enemies
//!
//! Reads the state only; the result goes through the same input path as a
//! human player's keys, so a demo run is an ordinary deterministic run.

use super::state::GameState;
use super::tick::TickInput;
use super::tile::Tile;
use crate::consts::EDGE_EPSILON;
use crate::tile_coord;

/// How far ahead of the leading edge a wall triggers a jump
const WALL_LOOKAHEAD: f32 = 3.0;
/// How far ahead of the leading edge a missing floor triggers a jump
const LEDGE_LOOKAHEAD: f32 = 2.0;
/// Enemy distance (gap between hitboxes) that triggers a jump
const ENEMY_LOOKAHEAD: f32 = 24.0;

/// Choose this tick's input for the demo player
pub fn autopilot(state: &GameState) -> TickInput {
    let player = &state.player;
    let jump = player.on_ground && (wall_ahead(state) || ledge_ahead(state) || enemy_ahead(state));
    TickInput {
        direction: 1,
        jump,
    }
}

fn wall_ahead(state: &GameState) -> bool {
    let body = &state.player.body;
    let tx = tile_coord(body.pos.x + body.size.x + WALL_LOOKAHEAD);
    let top = tile_coord(body.pos.y);
    let bottom = tile_coord(body.bottom() - EDGE_EPSILON);
    (top..=bottom).any(|ty| {
        let tile = state.world.tile_at(tx, ty);
        // Walking into the goal is the point
        tile.is_solid() && tile != Tile::Goal
    })
}

fn ledge_ahead(state: &GameState) -> bool {
    let body = &state.player.body;
    let tx = tile_coord(body.pos.x + body.size.x + LEDGE_LOOKAHEAD);
    !state.world.is_solid(tx, tile_coord(body.bottom() + EDGE_EPSILON))
}

fn enemy_ahead(state: &GameState) -> bool {
    let body = &state.player.body;
    let front = body.pos.x + body.size.x;
    state.enemies.iter().filter(|e| e.alive).any(|enemy| {
        let gap = enemy.body.pos.x - front;
        let same_band = enemy.body.pos.y < body.bottom() && enemy.body.bottom() > body.pos.y;
        same_band && (0.0..=ENEMY_LOOKAHEAD).contains(&gap)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::state::GameEvent;
    use crate::sim::tick::tick;
    use glam::Vec2;

    const DT: f32 = 1.0 / 60.0;

    /// A pipe, a pit and the goal
    const COURSE: [&str; 8] = [
        "                              ",
        "                              ",
        "                              ",
        "                              ",
        "                              ",
        "          PP                  ",
        " S        PP                G ",
        "#################   ##########",
    ];

    fn course() -> GameState {
        GameState::from_template(&COURSE, &Settings::default())
    }

    fn settle(state: &mut GameState) {
        for _ in 0..30 {
            tick(state, &TickInput::default(), DT);
        }
    }

    #[test]
    fn test_runs_right_on_open_ground() {
        let mut state = course();
        settle(&mut state);
        let input = autopilot(&state);
        assert_eq!(input.direction, 1);
        assert!(!input.jump);
    }

    #[test]
    fn test_jumps_at_pipe() {
        let mut state = course();
        settle(&mut state);
        // Flush against the pipe's left face at x=160
        state.player.body.pos.x = 160.0 - 14.0;
        assert!(autopilot(&state).jump);
    }

    #[test]
    fn test_jumps_at_pit_edge() {
        let mut state = course();
        settle(&mut state);
        // Pit starts at x=272
        state.player.body.pos.x = 272.0 - 14.0 - 1.0;
        assert!(autopilot(&state).jump);
    }

    #[test]
    fn test_jumps_at_enemy() {
        let mut state = course();
        settle(&mut state);
        let y = state.player.body.bottom() - 12.0;
        state.spawn_enemy(Vec2::new(state.player.body.pos.x + 30.0, y), -0.5);
        assert!(autopilot(&state).jump);
    }

    #[test]
    fn test_never_jumps_midair() {
        let mut state = course();
        state.player.body.pos.x = 160.0 - 14.0;
        state.player.on_ground = false;
        assert!(!autopilot(&state).jump);
    }

    #[test]
    fn test_clears_course_to_goal() {
        let mut state = course();
        let mut reached = false;
        for _ in 0..1500 {
            let input = autopilot(&state);
            if tick(&mut state, &input, DT).contains(&GameEvent::GoalReached) {
                reached = true;
                break;
            }
        }
        assert!(reached);
        assert!(!state.is_game_over());
    }
}
