//! Request-based firing
//!
//! Entities never touch the projectile pool directly during the update
//! pass. Firing pushes a request capturing shooter and target positions at
//! decision time; the queue is drained once per tick, after spawning, into
//! pooled projectiles. A full pool silently drops the shot.

use glam::Vec2;

use super::state::{ProjectileOwner, Simulation};
use crate::on_screen;

/// A queued intent to create a projectile.
#[derive(Debug, Clone, Copy)]
pub struct FireRequest {
    pub owner: ProjectileOwner,
    /// Shooter center at request time
    pub origin: Vec2,
    /// Target center at request time; the projectile does not home
    pub target: Vec2,
}

pub fn request_shot(
    requests: &mut Vec<FireRequest>,
    owner: ProjectileOwner,
    origin: Vec2,
    target: Vec2,
) {
    requests.push(FireRequest {
        owner,
        origin,
        target,
    });
}

/// Drain the per-tick queue into the projectile pool.
pub fn process_fire_requests(sim: &mut Simulation) {
    let requests = std::mem::take(&mut sim.fire_requests);
    let Simulation {
        projectiles,
        config,
        ..
    } = sim;

    for request in requests {
        let Some((_, projectile)) = projectiles.acquire() else {
            // Pool exhausted: the shot is dropped, not an error
            continue;
        };
        let dir = (request.target - request.origin).normalize_or_zero();
        projectile.pos = request.origin;
        projectile.vel = dir * config.projectile_speed;
        projectile.owner = request.owner;
        projectile.damage = match request.owner {
            ProjectileOwner::Player => config.player_projectile_damage,
            ProjectileOwner::Enemy => config.enemy_projectile_damage,
        };
        projectile.active = true;
    }
}

/// Player auto-aim: the first active, on-screen enemy in pool order. Not
/// the nearest; first-match is the established behavior and keeps target
/// selection deterministic.
pub fn select_player_target(sim: &Simulation) -> Option<Vec2> {
    let config = &sim.config;
    sim.enemies
        .iter_active()
        .find(|e| on_screen(e.pos.y, config.enemy_size, sim.camera.y, config.view_height))
        .map(|e| e.center(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::sim::state::MovementKind;

    fn sim() -> Simulation {
        Simulation::new(Config::default(), 7)
    }

    #[test]
    fn test_drain_sets_unit_direction_times_speed() {
        let mut sim = sim();
        let origin = Vec2::new(100.0, 700.0);
        let target = Vec2::new(100.0, 400.0);
        request_shot(
            &mut sim.fire_requests,
            ProjectileOwner::Player,
            origin,
            target,
        );
        process_fire_requests(&mut sim);

        assert!(sim.fire_requests.is_empty());
        let projectile = sim.projectiles.iter_active().next().unwrap();
        assert_eq!(projectile.pos, origin);
        assert_eq!(projectile.vel, Vec2::new(0.0, -sim.config.projectile_speed));
        assert_eq!(projectile.damage, sim.config.player_projectile_damage);
    }

    #[test]
    fn test_exhausted_pool_drops_shot_silently() {
        let mut sim = sim();
        let n = sim.projectiles.capacity();
        for _ in 0..n {
            let (_, p) = sim.projectiles.acquire().unwrap();
            p.active = true;
        }
        request_shot(
            &mut sim.fire_requests,
            ProjectileOwner::Enemy,
            Vec2::ZERO,
            Vec2::ONE,
        );
        process_fire_requests(&mut sim);
        assert_eq!(sim.projectiles.active_count(), n);
        assert!(sim.fire_requests.is_empty());
    }

    #[test]
    fn test_player_targets_first_enemy_in_pool_order() {
        let mut sim = sim();
        // Two on-screen enemies; the nearer one sits later in the pool
        let far = Vec2::new(10.0, sim.camera.y + 50.0);
        let near = Vec2::new(10.0, sim.camera.y + 600.0);
        {
            let (_, e) = sim.enemies.acquire().unwrap();
            e.spawn(far.x, far.y, MovementKind::Static, 10);
        }
        {
            let (_, e) = sim.enemies.acquire().unwrap();
            e.spawn(near.x, near.y, MovementKind::Static, 10);
        }
        let target = select_player_target(&sim).unwrap();
        let half = sim.config.enemy_size / 2.0;
        assert_eq!(target, far + Vec2::splat(half));
    }

    #[test]
    fn test_offscreen_enemies_not_targeted() {
        let mut sim = sim();
        let (_, e) = sim.enemies.acquire().unwrap();
        e.spawn(
            10.0,
            sim.camera.y - 500.0,
            MovementKind::Static,
            10,
        );
        assert!(select_player_target(&sim).is_none());
    }
}
