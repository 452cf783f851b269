//! Simulation tuning
//!
//! Every constant the core consumes lives here, supplied once at
//! construction as an immutable value. Defaults reproduce the shipped
//! balance; hosts may deserialize an override from JSON.

use serde::{Deserialize, Serialize};

/// Cumulative item rarity thresholds, evaluated in a fixed order
/// (rocket, drone, trampoline, bomb, spikes, adrenaline, medkit).
/// A uniform roll below a threshold yields that item; first match wins;
/// a roll past `medkit` yields nothing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ItemRarity {
    pub rocket: f32,
    pub drone: f32,
    pub trampoline: f32,
    pub bomb: f32,
    pub spikes: f32,
    pub adrenaline: f32,
    pub medkit: f32,
}

impl Default for ItemRarity {
    fn default() -> Self {
        Self {
            rocket: 0.0003,
            drone: 0.0007,
            trampoline: 0.0014,
            bomb: 0.0018,
            spikes: 0.0025,
            adrenaline: 0.004,
            medkit: 0.007,
        }
    }
}

/// Item effect magnitudes: upward impulses (subtracted from vy) and hp
/// deltas applied on pickup. Heals are still clamped to `player_max_hp`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ItemEffects {
    pub trampoline_impulse: f32,
    pub drone_impulse: f32,
    pub rocket_impulse: f32,
    pub spikes_damage: i32,
    pub bomb_damage: i32,
    pub medkit_heal: i32,
    pub adrenaline_heal: i32,
}

impl Default for ItemEffects {
    fn default() -> Self {
        Self {
            trampoline_impulse: 5.0,
            drone_impulse: 35.0,
            rocket_impulse: 75.0,
            spikes_damage: 1,
            bomb_damage: 5,
            medkit_heal: 1,
            adrenaline_heal: 5,
        }
    }
}

/// Immutable simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // === World ===
    /// Visible scroll window width (world units)
    pub view_width: f32,
    /// Visible scroll window height (world units)
    pub view_height: f32,

    // === Player ===
    /// Constant downward acceleration per tick (y grows downward)
    pub gravity: f32,
    /// Upward impulse applied on every platform landing
    pub jump_force: f32,
    /// Horizontal displacement per tick at full intent
    pub horizontal_speed: f32,
    /// Player bounding box side
    pub player_size: f32,
    /// Hit points at spawn; hp is clamped to [0, player_max_hp]
    pub player_max_hp: i32,
    /// Ticks between player auto-fire shots
    pub player_fire_cooldown: u32,
    pub player_projectile_damage: i32,

    // === Platforms ===
    pub platform_width: f32,
    pub platform_height: f32,
    pub platform_pool: usize,
    /// Base vertical gap range between consecutive platforms
    pub gap_min: f32,
    pub gap_max: f32,
    /// Gap bounds widen by `1 + difficulty * gap_growth`, capped below
    pub gap_growth: f32,
    pub gap_min_cap: f32,
    pub gap_max_cap: f32,
    /// Movement-kind weights: chance a slot also offers the moving variants.
    /// Each is independently capped so composition stays sane at high score.
    pub horizontal_platform_base: f32,
    pub horizontal_platform_gain: f32,
    pub horizontal_platform_cap: f32,
    pub vertical_platform_gain: f32,
    pub vertical_platform_cap: f32,
    /// Breakable (single-use) platform chance, rising with difficulty
    pub breakable_base: f32,
    pub breakable_gain: f32,
    pub breakable_cap: f32,

    // === Enemies ===
    pub enemy_size: f32,
    pub enemy_hp: i32,
    pub enemy_pool: usize,
    /// Ticks between enemy shots while both parties are on-screen
    pub enemy_fire_interval: u32,
    pub enemy_projectile_damage: i32,
    /// Score accumulated since the last enemy spawn before the next one;
    /// the actual threshold is drawn uniformly from this range per spawn
    pub enemy_spawn_step_min: f32,
    pub enemy_spawn_step_max: f32,

    // === Items ===
    pub item_size: f32,
    pub item_pool: usize,
    pub item_rarity: ItemRarity,
    pub item_effects: ItemEffects,
    /// Score window in which the one-per-run special item may appear
    pub special_min_score: f32,
    pub special_max_score: f32,

    // === Projectiles ===
    pub projectile_pool: usize,
    pub projectile_speed: f32,

    // === Hazards ===
    pub hazard_pool: usize,
    /// Score accumulated between black-hole spawns
    pub hazard_spawn_step: f32,

    // === Difficulty ===
    /// difficulty = min(score / divisor, cap)
    pub difficulty_divisor: f32,
    pub difficulty_cap: f32,

    // === Camera ===
    /// The player is held below this fraction of the viewport height
    pub camera_band: f32,
    /// Easing rate when the camera chases a climbing player
    pub camera_ease_up: f32,
    /// Easing rate when the camera gives chase downward (0 = never)
    pub camera_ease_down: f32,
    /// Extra distance past the trailing edge before a fall ends the run
    pub fall_tolerance: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            view_width: 480.0,
            view_height: 800.0,

            gravity: 0.8,
            jump_force: 13.5,
            horizontal_speed: 10.0,
            player_size: 40.0,
            player_max_hp: 100,
            player_fire_cooldown: 10,
            player_projectile_damage: 1,

            platform_width: 50.0,
            platform_height: 12.0,
            platform_pool: 18,
            gap_min: 85.0,
            gap_max: 100.0,
            gap_growth: 0.08,
            gap_min_cap: 95.0,
            gap_max_cap: 110.0,
            horizontal_platform_base: 0.15,
            horizontal_platform_gain: 0.7,
            horizontal_platform_cap: 0.85,
            vertical_platform_gain: 0.12,
            vertical_platform_cap: 0.5,
            breakable_base: 0.10,
            breakable_gain: 0.05,
            breakable_cap: 0.25,

            enemy_size: 30.0,
            enemy_hp: 10,
            enemy_pool: 5,
            enemy_fire_interval: 25,
            enemy_projectile_damage: 1,
            enemy_spawn_step_min: 500.0,
            enemy_spawn_step_max: 1000.0,

            item_size: 20.0,
            item_pool: 7,
            item_rarity: ItemRarity::default(),
            item_effects: ItemEffects::default(),
            special_min_score: 5000.0,
            special_max_score: 10000.0,

            projectile_pool: 500,
            projectile_speed: 13.0,

            hazard_pool: 3,
            hazard_spawn_step: 1500.0,

            difficulty_divisor: 2000.0,
            difficulty_cap: 5.0,

            camera_band: 0.65,
            camera_ease_up: 0.18,
            camera_ease_down: 0.06,
            fall_tolerance: 0.0,
        }
    }
}

impl Config {
    /// Gap range for a given difficulty factor. The bounds widen with
    /// difficulty but are independently capped so no gap ever exceeds the
    /// player's jump reach.
    pub fn gap_range(&self, difficulty: f32) -> (f32, f32) {
        let growth = 1.0 + difficulty * self.gap_growth;
        let min = (self.gap_min * growth).min(self.gap_min_cap);
        let max = (self.gap_max * growth).min(self.gap_max_cap);
        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gap_range_caps() {
        let cfg = Config::default();
        let (min0, max0) = cfg.gap_range(0.0);
        assert_eq!(min0, cfg.gap_min);
        assert_eq!(max0, cfg.gap_max);

        // Huge difficulty must still respect the caps
        let (min, max) = cfg.gap_range(1000.0);
        assert_eq!(min, cfg.gap_min_cap);
        assert_eq!(max, cfg.gap_max_cap);
        assert!(min < max);
    }

    #[test]
    fn test_config_json_round_trip() {
        let cfg = Config::default();
        let json = serde_json::to_string(&cfg).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back.platform_pool, cfg.platform_pool);
        assert_eq!(back.jump_force, cfg.jump_force);
        assert_eq!(
            back.item_effects.rocket_impulse,
            cfg.item_effects.rocket_impulse
        );
    }

    #[test]
    fn test_default_combat_balance() {
        let cfg = Config::default();
        assert_eq!(cfg.player_fire_cooldown, 10);
        assert_eq!(cfg.enemy_fire_interval, 25);
        assert_eq!(cfg.item_effects.drone_impulse, 35.0);
        assert_eq!(cfg.item_effects.bomb_damage, 5);
    }
}
