//! Procedural spawning and recycling
//!
//! Platforms are generated frontier-first: each inactive slot is placed a
//! randomized gap above the most recently placed platform, so no gap can
//! ever exceed the player's jump reach while the field still varies
//! organically. Enemy and hazard spawns are driven by score accumulated
//! since their last spawn, against thresholds redrawn per spawn so the
//! cadence never turns periodic.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{ItemKind, MovementKind, Simulation};
use crate::config::{Config, ItemRarity};

/// Generation state: the frontier plus the score checkpoints.
#[derive(Debug, Clone, Copy)]
pub struct SpawnDirector {
    /// World y of the most recently placed platform
    pub frontier_y: f32,
    pub last_enemy_score: f32,
    /// Score that must accumulate past the checkpoint before the next
    /// enemy; redrawn after every spawn
    pub next_enemy_step: f32,
    pub last_hazard_score: f32,
    pub special_spawned: bool,
}

impl SpawnDirector {
    pub fn new(config: &Config) -> Self {
        Self {
            frontier_y: config.view_height,
            last_enemy_score: 0.0,
            next_enemy_step: config.enemy_spawn_step_min,
            last_hazard_score: 0.0,
            special_spawned: false,
        }
    }
}

/// Map a uniform roll through the cumulative rarity thresholds, rarest
/// first. First match wins; a roll past the table spawns nothing.
pub fn roll_item(rarity: &ItemRarity, roll: f32) -> Option<ItemKind> {
    if roll < rarity.rocket {
        Some(ItemKind::Rocket)
    } else if roll < rarity.drone {
        Some(ItemKind::Drone)
    } else if roll < rarity.trampoline {
        Some(ItemKind::Trampoline)
    } else if roll < rarity.bomb {
        Some(ItemKind::Bomb)
    } else if roll < rarity.spikes {
        Some(ItemKind::Spikes)
    } else if roll < rarity.adrenaline {
        Some(ItemKind::Adrenaline)
    } else if roll < rarity.medkit {
        Some(ItemKind::Medkit)
    } else {
        None
    }
}

fn random_sign(rng: &mut Pcg32) -> f32 {
    if rng.random_bool(0.5) { 1.0 } else { -1.0 }
}

/// Reset mode: clear the platform and enemy pools, place one guaranteed
/// static platform beneath the spawn position, stand the player on it,
/// then fill the rest of the field above.
pub fn reset_run(sim: &mut Simulation) {
    sim.platforms.clear();
    sim.enemies.clear();

    let config = &sim.config;
    let x = config.view_width / 2.0 - config.platform_width / 2.0;
    let y = config.view_height - 50.0;
    if let Some((_, start)) = sim.platforms.acquire() {
        start.spawn(x, y, MovementKind::Static, false);
    }
    sim.player.pos.y = y - sim.player.size;
    sim.player.last_y = sim.player.pos.y;
    // Baseline the score at the spawn height so the first climb counts
    sim.score.update(sim.player.pos.y);

    sim.director.frontier_y = y;
    sim.director.last_enemy_score = 0.0;
    sim.director.last_hazard_score = 0.0;
    sim.director.special_spawned = false;
    sim.director.next_enemy_step = sim
        .rng
        .random_range(sim.config.enemy_spawn_step_min..sim.config.enemy_spawn_step_max);

    refill(sim);
}

/// Steady-state tick: fill every inactive platform slot above the
/// frontier, then check the enemy and hazard score thresholds.
pub fn refill(sim: &mut Simulation) {
    let difficulty = sim.score.difficulty_factor(&sim.config);
    let score = sim.score.value();
    let camera_y = sim.camera.y;
    let player_y = sim.player.pos.y;

    let Simulation {
        platforms,
        items,
        enemies,
        hazards,
        director,
        rng,
        config,
        ..
    } = sim;

    let (gap_min, gap_max) = config.gap_range(difficulty);
    let horizontal_chance = (config.horizontal_platform_base
        + config.horizontal_platform_gain * difficulty)
        .min(config.horizontal_platform_cap);
    let vertical_chance = (config.vertical_platform_gain * difficulty).min(config.vertical_platform_cap);
    let breakable_chance =
        (config.breakable_base + config.breakable_gain * difficulty).min(config.breakable_cap);

    while let Some((handle, platform)) = platforms.acquire() {
        let gap = rng.random_range(gap_min..gap_max);
        let x = rng.random_range(0.0..config.view_width - config.platform_width);
        let y = director.frontier_y - gap;

        // Weighted movement draw: the moving variants join the candidate
        // set with difficulty-scaled (independently capped) probability,
        // then one candidate is picked uniformly.
        let mut tags = [0u8; 3];
        let mut n = 1;
        if rng.random_bool(horizontal_chance as f64) {
            tags[n] = 1;
            n += 1;
        }
        if rng.random_bool(vertical_chance as f64) {
            tags[n] = 2;
            n += 1;
        }
        let movement = match tags[rng.random_range(0..n)] {
            1 => MovementKind::Horizontal {
                vx: rng.random_range(1.0..3.0) * random_sign(rng),
            },
            2 => MovementKind::Vertical {
                vy: rng.random_range(1.0..2.0),
                amplitude: rng.random_range(config.gap_min * 0.5..config.gap_min),
                base_y: y,
            },
            _ => MovementKind::Static,
        };
        let breakable = rng.random_bool(breakable_chance as f64);

        platform.spawn(x, y, movement, breakable);
        let platform_pos = platform.pos;
        director.frontier_y = y;

        // Each platform gets an independent shot at carrying an item
        let roll: f32 = rng.random();
        if let Some(kind) = roll_item(&config.item_rarity, roll)
            && let Some((_, item)) = items.acquire()
        {
            item.spawn(kind, handle, platform_pos, config);
        }

        // The one-per-run special rides the next platform spawned inside
        // its score window
        if !director.special_spawned
            && score >= config.special_min_score
            && score <= config.special_max_score
            && let Some((_, item)) = items.acquire()
        {
            item.spawn(ItemKind::Special, handle, platform_pos, config);
            director.special_spawned = true;
        }
    }

    if score - director.last_enemy_score >= director.next_enemy_step {
        if let Some((_, enemy)) = enemies.acquire() {
            let x = rng.random_range(0.0..config.view_width - config.enemy_size);
            let y = camera_y - config.enemy_size;
            let movement = match rng.random_range(0..3u32) {
                1 => MovementKind::Horizontal {
                    vx: (rng.random_range(1.0..2.0) + 2.0 * difficulty) * random_sign(rng),
                },
                2 => MovementKind::Vertical {
                    vy: rng.random_range(1.0..2.0) + 2.0 * difficulty,
                    amplitude: rng.random_range(50.0..120.0),
                    base_y: y,
                },
                _ => MovementKind::Static,
            };
            enemy.spawn(x, y, movement, config.enemy_hp);
            director.last_enemy_score = score;
            director.next_enemy_step =
                rng.random_range(config.enemy_spawn_step_min..config.enemy_spawn_step_max);
            log::debug!("enemy spawned at x={x:.0} (score {score:.0})");
        }
    }

    if score - director.last_hazard_score >= config.hazard_spawn_step {
        if let Some((_, hole)) = hazards.acquire() {
            let x = rng.random_range(50.0..config.view_width - 50.0);
            let y = player_y - rng.random_range(400.0..800.0);
            let radius = rng.random_range(80.0..120.0);
            let strength = rng.random_range(0.8..1.5);
            hole.spawn(Vec2::new(x, y), radius, strength);
            director.last_hazard_score = score;
            log::debug!("black hole spawned at y={y:.0} (score {score:.0})");
        }
    }
}
