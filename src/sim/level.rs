//! Built-in level and enemy placement

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::Enemy;
use super::tile::Tile;
use super::world::TileWorld;
use crate::consts::*;

/// World 1-1: run, first enemy, coin blocks, bricks, pipes, a staircase and
/// the goal at the foot of the flagpole. Rows may end early; the rest of the
/// row is open air.
pub const WORLD_1_1: [&str; 16] = [
    "",
    "            C                                             C                                                              C",
    "                                     C                                                    C",
    "",
    "",
    "",
    "                                                                                                            ?                               F",
    "                              ?                                        ?                                                                    F",
    "                                                                                                                                            F",
    "                                        ====                                                                                                F",
    "                                                        =====                                             ====              ####            F",
    "                ?           B?B?B                                     BBB                                                  #####            F",
    "                                                                                                                          ######            F",
    "                                                PP                              PP                                       #######            F",
    " S     T                                        PP  T                           PP              T                       ########          G F",
    "###############################################################   ###################################  ###############################################",
];

/// Place patrolling enemies along the level.
///
/// Every `ENEMY_SPACING` columns (leaving a margin at both ends) an enemy is
/// dropped two tiles above the first ground tile that has open air on top.
/// Columns without such a tile get no enemy. Patrol direction comes from the
/// seeded RNG, so the same seed always yields the same population.
pub fn place_enemies(world: &TileWorld, seed: u64, first_id: u32) -> Vec<Enemy> {
    let mut rng = Pcg32::seed_from_u64(seed);
    let mut enemies = Vec::new();
    let mut next_id = first_id;
    let last_column = world.width() as i32 - ENEMY_END_MARGIN;

    let mut tx = ENEMY_FIRST_COLUMN;
    while tx < last_column {
        let ground_row = (0..world.height() as i32).find(|&ty| {
            world.tile_at(tx, ty) == Tile::Ground && world.tile_at(tx, ty - 1) == Tile::Empty
        });

        if let Some(ty) = ground_row {
            let direction = if rng.random_bool(0.5) { -1.0 } else { 1.0 };
            let pos = Vec2::new(tx as f32 * TILE + 2.0, (ty - 2) as f32 * TILE);
            enemies.push(Enemy::new(next_id, pos, direction * ENEMY_SPEED));
            next_id += 1;
        }

        tx += ENEMY_SPACING;
    }

    log::debug!("Placed {} enemies (seed {seed})", enemies.len());
    enemies
}
