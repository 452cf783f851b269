//! Black-hole hazards
//!
//! A black hole pulls the player and active enemies toward its center with
//! strength that ramps up sharply near the core, plus a small angular
//! swirl so captures spiral instead of falling straight in. Enemies that
//! reach the core are consumed; the player reaching it ends the run.

use glam::Vec2;

use super::state::{BlackHole, Simulation};

/// Distance at which an enemy is consumed
const ENEMY_CONSUME_DIST: f32 = 5.0;
/// Distance at which the player is lost
const PLAYER_CONSUME_DIST: f32 = 10.0;
/// Swirl offset added to the pull angle (radians)
const SWIRL: f32 = 0.1;

/// Pull displacement and distance for a point inside the field, or None
/// when the point is out of reach.
fn pull(hole: &BlackHole, center: Vec2) -> Option<(Vec2, f32)> {
    let to_hole = hole.pos - center;
    let dist = to_hole.length();
    if dist >= hole.radius {
        return None;
    }
    let strength = hole.strength * (1.0 + (hole.radius - dist) / hole.radius * 4.0);
    let angle = to_hole.y.atan2(to_hole.x) + SWIRL;
    Some((Vec2::new(angle.cos(), angle.sin()) * strength, dist))
}

/// Apply every active hole to the player and enemies. Returns true when
/// the player was consumed this tick.
pub fn update_hazards(sim: &mut Simulation) -> bool {
    let Simulation {
        hazards,
        enemies,
        player,
        config,
        ..
    } = sim;

    let mut player_consumed = false;
    let half_enemy = config.enemy_size / 2.0;

    for hole in hazards.iter_active() {
        for enemy in enemies.iter_active_mut() {
            match pull(hole, enemy.pos + Vec2::splat(half_enemy)) {
                Some((displacement, dist)) => {
                    enemy.pos += displacement;
                    enemy.visual_scale = (dist / hole.radius).max(0.5);
                    if dist < ENEMY_CONSUME_DIST {
                        enemy.active = false;
                    }
                }
                None => enemy.visual_scale = 1.0,
            }
        }

        match pull(hole, player.center()) {
            Some((displacement, dist)) => {
                player.pos += displacement;
                player.visual_scale = (dist / hole.radius).max(0.5);
                if dist < PLAYER_CONSUME_DIST {
                    player_consumed = true;
                }
            }
            None => player.visual_scale = 1.0,
        }
    }

    player_consumed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::sim::state::MovementKind;

    fn sim_with_hole(pos: Vec2, radius: f32, strength: f32) -> Simulation {
        let mut sim = Simulation::new(Config::default(), 11);
        let (_, hole) = sim.hazards.acquire().unwrap();
        hole.spawn(pos, radius, strength);
        sim
    }

    #[test]
    fn test_pull_draws_entities_inward() {
        let hole_pos = Vec2::new(200.0, 200.0);
        let mut sim = sim_with_hole(hole_pos, 120.0, 1.0);
        let (_, enemy) = sim.enemies.acquire().unwrap();
        enemy.spawn(150.0, 200.0, MovementKind::Static, 10);
        sim.player.pos = Vec2::new(10000.0, 10000.0);

        let before = (hole_pos - (sim.enemies.as_slice()[0].pos + Vec2::splat(15.0))).length();
        update_hazards(&mut sim);
        let after = (hole_pos - (sim.enemies.as_slice()[0].pos + Vec2::splat(15.0))).length();
        assert!(after < before);
        assert!(sim.enemies.as_slice()[0].visual_scale < 1.0);
    }

    #[test]
    fn test_entities_outside_field_untouched() {
        let mut sim = sim_with_hole(Vec2::new(200.0, 200.0), 100.0, 1.0);
        let (_, enemy) = sim.enemies.acquire().unwrap();
        enemy.spawn(200.0, 600.0, MovementKind::Static, 10);
        sim.player.pos = Vec2::new(10000.0, 10000.0);

        let pos = sim.enemies.as_slice()[0].pos;
        update_hazards(&mut sim);
        assert_eq!(sim.enemies.as_slice()[0].pos, pos);
        assert_eq!(sim.enemies.as_slice()[0].visual_scale, 1.0);
    }

    #[test]
    fn test_core_consumes_enemy_and_player() {
        let hole_pos = Vec2::new(200.0, 200.0);
        let mut sim = sim_with_hole(hole_pos, 120.0, 1.0);
        let (_, enemy) = sim.enemies.acquire().unwrap();
        let half = sim.config.enemy_size / 2.0;
        enemy.spawn(hole_pos.x - half + 1.0, hole_pos.y - half, MovementKind::Static, 10);

        sim.player.pos = hole_pos - Vec2::splat(sim.config.player_size / 2.0);
        let consumed = update_hazards(&mut sim);
        assert!(consumed);
        assert_eq!(sim.enemies.active_count(), 0);
    }
}
