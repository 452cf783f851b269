//! Deterministic game simulation
//!
//! All gameplay logic lives here, cleanly separated from rendering and
//! input capture. The rules:
//! - Fixed tick only: one `tick()` per frame, no wall-clock reads
//! - Seeded RNG only: every random draw goes through the run's `Pcg32`
//! - Stable pool iteration: entities update in slot order, every tick
//! - No platform dependencies: the module builds and tests headless
//!
//! Identical (config, seed, input sequence) triples replay identically.

pub mod camera;
pub mod collision;
pub mod hazard;
pub mod pool;
pub mod projectile;
pub mod score;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use camera::CameraController;
pub use pool::{EntityPool, Handle, Pooled};
pub use snapshot::RenderSnapshot;
pub use spawn::SpawnDirector;
pub use state::{
    BlackHole, Enemy, GameEvent, GameOverCause, Item, ItemKind, MovementKind, Platform,
    PlayerBody, Projectile, ProjectileOwner, Simulation, SimulationEvents, TickInput,
};
pub use tick::tick;
