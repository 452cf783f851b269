//! Entity types and the simulation root
//!
//! Everything that advances per tick lives here: the player body, the
//! pooled entities, and the `Simulation` struct that owns them all. No
//! module-level state; several simulations can coexist (tests do).

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::camera::CameraController;
use super::pool::{EntityPool, Handle, Pooled};
use super::projectile::FireRequest;
use super::score::ScoreAccountant;
use super::spawn::SpawnDirector;
use crate::config::Config;

/// How a platform or enemy moves. Vertical movers oscillate around the y
/// they spawned at.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum MovementKind {
    #[default]
    Static,
    Horizontal {
        vx: f32,
    },
    Vertical {
        vy: f32,
        amplitude: f32,
        base_y: f32,
    },
}

/// The single kinematic actor. World y grows downward; upward impulses are
/// negative. Horizontal motion is input-derived, never integrated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerBody {
    /// Top-left corner of the bounding box
    pub pos: Vec2,
    /// Vertical velocity; gravity accumulates without a terminal clamp
    pub vy: f32,
    /// Previous tick's y, kept for the swept platform test
    pub last_y: f32,
    /// Bounding box side
    pub size: f32,
    /// Magnitude of the upward impulse applied on landing
    pub jump_force: f32,
    /// Hit points, clamped to [0, max]
    pub hp: i32,
    /// Ticks until the next auto-fire shot
    pub fire_cooldown: u32,
    /// Shrink applied by a nearby black hole (renderer hint, 1.0 = none)
    pub visual_scale: f32,
}

impl PlayerBody {
    pub fn new(config: &Config) -> Self {
        let mut body = Self {
            pos: Vec2::ZERO,
            vy: 0.0,
            last_y: 0.0,
            size: config.player_size,
            jump_force: config.jump_force,
            hp: config.player_max_hp,
            fire_cooldown: 0,
            visual_scale: 1.0,
        };
        body.reset(config);
        body
    }

    /// Re-center for a fresh run. Same object, never reallocated.
    pub fn reset(&mut self, config: &Config) {
        self.pos = Vec2::new(
            config.view_width / 2.0,
            config.view_height - 50.0 - self.size,
        );
        self.vy = 0.0;
        self.last_y = self.pos.y;
        self.hp = config.player_max_hp;
        self.fire_cooldown = 0;
        self.visual_scale = 1.0;
    }

    /// Integrate one tick of input and gravity. `intent` is already
    /// normalized to {-1, 0, 1} by the tick boundary.
    pub fn update(&mut self, intent: f32, config: &Config) {
        self.last_y = self.pos.y;

        self.pos.x += intent * config.horizontal_speed;
        // Exit left, reappear right (and vice versa)
        if self.pos.x < -self.size {
            self.pos.x = config.view_width;
        } else if self.pos.x > config.view_width {
            self.pos.x = -self.size;
        }

        self.vy += config.gravity;
        self.pos.y += self.vy;
    }

    /// Landing response: the only way the body gains upward velocity.
    pub fn land(&mut self) {
        self.vy = -self.jump_force;
    }

    pub fn apply_hp(&mut self, delta: i32, max_hp: i32) {
        self.hp = (self.hp + delta).clamp(0, max_hp);
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }
}

/// A pooled platform.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Platform {
    /// Top-left corner
    pub pos: Vec2,
    /// Previous tick's y; fast vertical movers would tunnel through a
    /// single-point test without it
    pub prev_y: f32,
    pub movement: MovementKind,
    /// Single-use platform: deactivates after its first landing
    pub breakable: bool,
    pub used: bool,
    pub active: bool,
}

impl Pooled for Platform {
    fn is_active(&self) -> bool {
        self.active
    }
    fn deactivate(&mut self) {
        self.active = false;
    }
}

impl Platform {
    pub fn spawn(&mut self, x: f32, y: f32, movement: MovementKind, breakable: bool) {
        self.pos = Vec2::new(x, y);
        self.prev_y = y;
        self.movement = movement;
        self.breakable = breakable;
        self.used = false;
        self.active = true;
    }

    /// Advance movement and retire once past the camera's trailing edge.
    pub fn update(&mut self, config: &Config, camera_y: f32) {
        self.prev_y = self.pos.y;

        match &mut self.movement {
            MovementKind::Static => {}
            MovementKind::Horizontal { vx } => {
                self.pos.x += *vx;
                if self.pos.x < 0.0 || self.pos.x + config.platform_width > config.view_width {
                    *vx = -*vx;
                }
            }
            MovementKind::Vertical {
                vy,
                amplitude,
                base_y,
            } => {
                self.pos.y += *vy;
                if self.pos.y > *base_y + *amplitude || self.pos.y < *base_y - *amplitude {
                    *vy = -*vy;
                }
            }
        }

        if self.pos.y - camera_y > config.view_height {
            self.active = false;
        }
    }
}

/// A pooled enemy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub movement: MovementKind,
    pub hp: i32,
    pub max_hp: i32,
    /// Ticks until it may fire again
    pub fire_cooldown: u32,
    pub visual_scale: f32,
    pub active: bool,
}

impl Pooled for Enemy {
    fn is_active(&self) -> bool {
        self.active
    }
    fn deactivate(&mut self) {
        self.active = false;
    }
}

impl Enemy {
    pub fn spawn(&mut self, x: f32, y: f32, movement: MovementKind, hp: i32) {
        self.pos = Vec2::new(x, y);
        self.movement = movement;
        self.hp = hp;
        self.max_hp = hp;
        self.fire_cooldown = 0;
        self.visual_scale = 1.0;
        self.active = true;
    }

    /// Advance movement; retire when dead or scrolled off the bottom.
    pub fn update(&mut self, config: &Config, camera_y: f32) {
        match &mut self.movement {
            MovementKind::Static => {}
            MovementKind::Horizontal { vx } => {
                self.pos.x += *vx;
                if self.pos.x < 0.0 || self.pos.x + config.enemy_size > config.view_width {
                    *vx = -*vx;
                }
            }
            MovementKind::Vertical {
                vy,
                amplitude,
                base_y,
            } => {
                self.pos.y += *vy;
                if self.pos.y > *base_y + *amplitude || self.pos.y < *base_y - *amplitude {
                    *vy = -*vy;
                }
            }
        }

        if self.hp <= 0 || self.pos.y - camera_y > config.view_height {
            self.active = false;
        }
    }

    pub fn center(&self, config: &Config) -> Vec2 {
        self.pos + Vec2::splat(config.enemy_size / 2.0)
    }
}

/// Item variants, rarest first (the order the rarity table is evaluated in).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ItemKind {
    Rocket,
    Drone,
    #[default]
    Trampoline,
    Bomb,
    Spikes,
    Adrenaline,
    Medkit,
    /// The one-per-run lootbox
    Special,
}

/// A pooled item. Items ride their platform and die with it; the link is a
/// generational handle, so a recycled platform slot is never misread.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Item {
    pub pos: Vec2,
    pub size: f32,
    pub kind: ItemKind,
    pub platform: Option<Handle>,
    pub active: bool,
}

impl Pooled for Item {
    fn is_active(&self) -> bool {
        self.active
    }
    fn deactivate(&mut self) {
        self.active = false;
        self.platform = None;
    }
}

impl Item {
    pub fn spawn(&mut self, kind: ItemKind, platform: Handle, platform_pos: Vec2, config: &Config) {
        self.kind = kind;
        self.size = config.item_size;
        self.platform = Some(platform);
        self.pos = Self::seat(platform_pos, self.size, config);
        self.active = true;
    }

    /// Position on top of the owning platform, centered.
    pub fn seat(platform_pos: Vec2, size: f32, config: &Config) -> Vec2 {
        Vec2::new(
            platform_pos.x + config.platform_width / 2.0 - size / 2.0,
            platform_pos.y - size,
        )
    }
}

/// Which faction fired a projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProjectileOwner {
    #[default]
    Player,
    Enemy,
}

/// A pooled projectile. One slot covers the whole fire → travel →
/// hit-or-expire lifecycle; nothing allocates mid-flight.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub owner: ProjectileOwner,
    pub damage: i32,
    pub active: bool,
}

impl Pooled for Projectile {
    fn is_active(&self) -> bool {
        self.active
    }
    fn deactivate(&mut self) {
        self.active = false;
    }
}

/// A pooled black-hole hazard (spawn logic in `spawn`, pull in `hazard`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlackHole {
    /// Center of the pull field
    pub pos: Vec2,
    /// Pull field radius
    pub radius: f32,
    /// Base pull strength, scaled up near the core
    pub strength: f32,
    pub active: bool,
}

impl Pooled for BlackHole {
    fn is_active(&self) -> bool {
        self.active
    }
    fn deactivate(&mut self) {
        self.active = false;
    }
}

impl BlackHole {
    pub fn spawn(&mut self, pos: Vec2, radius: f32, strength: f32) {
        self.pos = pos;
        self.radius = radius;
        self.strength = strength;
        self.active = true;
    }
}

/// Why the run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverCause {
    OutOfHealth,
    FellBelowCamera,
    ConsumedByHazard,
}

/// Observable outcomes of a tick, surfaced for the host. `GameOver` is a
/// normal terminal transition, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    GameOver(GameOverCause),
    ItemCollected(ItemKind),
    EnemyDestroyed,
}

/// Events emitted by a single `tick()` call.
#[derive(Debug, Clone, Default)]
pub struct SimulationEvents {
    pub events: Vec<GameEvent>,
}

impl SimulationEvents {
    pub(crate) fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn game_over(&self) -> Option<GameOverCause> {
        self.events.iter().find_map(|e| match e {
            GameEvent::GameOver(cause) => Some(*cause),
            _ => None,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.events.iter()
    }
}

/// The simulation root: all pools, the seeded RNG, and the per-subsystem
/// state. Constructed once per run; `reset()` recycles it in place.
pub struct Simulation {
    pub config: Config,
    pub seed: u64,
    pub rng: Pcg32,
    pub time_ticks: u64,

    pub player: PlayerBody,
    pub platforms: EntityPool<Platform>,
    pub enemies: EntityPool<Enemy>,
    pub items: EntityPool<Item>,
    pub projectiles: EntityPool<Projectile>,
    pub hazards: EntityPool<BlackHole>,

    /// Fire intents queued during the entity pass, drained once per tick
    pub fire_requests: Vec<FireRequest>,

    pub director: SpawnDirector,
    pub score: ScoreAccountant,
    pub camera: CameraController,

    pub game_over: Option<GameOverCause>,
    /// Latched when the one-per-run special item is collected
    pub special_collected: bool,
}

impl Simulation {
    pub fn new(config: Config, seed: u64) -> Self {
        let player = PlayerBody::new(&config);
        let mut sim = Self {
            platforms: EntityPool::with_capacity(config.platform_pool),
            enemies: EntityPool::with_capacity(config.enemy_pool),
            items: EntityPool::with_capacity(config.item_pool),
            projectiles: EntityPool::with_capacity(config.projectile_pool),
            hazards: EntityPool::with_capacity(config.hazard_pool),
            fire_requests: Vec::new(),
            player,
            director: SpawnDirector::new(&config),
            score: ScoreAccountant::default(),
            camera: CameraController::default(),
            game_over: None,
            special_collected: false,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
            seed,
            config,
        };
        super::spawn::reset_run(&mut sim);
        sim
    }

    /// Restart in place: clear every pool, re-center the player, reseed the
    /// RNG so a run is reproducible from (config, seed).
    pub fn reset(&mut self) {
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.time_ticks = 0;
        self.fire_requests.clear();
        self.projectiles.clear();
        self.hazards.clear();
        self.items.clear();
        self.score.reset();
        self.camera.reset();
        self.game_over = None;
        self.special_collected = false;
        self.player.reset(&self.config);
        super::spawn::reset_run(self);
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over.is_some()
    }

    /// Advance one frame. See `sim::tick` for the fixed update order.
    pub fn tick(&mut self, input: TickInput) -> SimulationEvents {
        super::tick::tick(self, &input)
    }
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Horizontal intent; anything outside {-1, 0, 1} is normalized at the
    /// boundary rather than propagated
    pub horizontal: f32,
}

impl TickInput {
    pub fn left() -> Self {
        Self { horizontal: -1.0 }
    }
    pub fn right() -> Self {
        Self { horizontal: 1.0 }
    }
}
