//! Sky Hopper - a vertically scrolling arcade jumper
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, pools, collisions, spawning)
//! - `config`: Immutable, data-driven tuning supplied at construction
//!
//! Rendering, input capture and session UI live in the host. The library
//! exposes one `tick()` per rendered frame plus read-only snapshots.

pub mod config;
pub mod sim;

pub use config::Config;
pub use sim::{GameEvent, GameOverCause, Simulation, SimulationEvents, TickInput, tick};

use glam::Vec2;

/// Axis-aligned overlap between two boxes given by top-left corner and size.
#[inline]
pub fn aabb_overlap(a_pos: Vec2, a_size: Vec2, b_pos: Vec2, b_size: Vec2) -> bool {
    a_pos.x + a_size.x > b_pos.x
        && a_pos.x < b_pos.x + b_size.x
        && a_pos.y + a_size.y > b_pos.y
        && a_pos.y < b_pos.y + b_size.y
}

/// Whether a point lies inside a box given by top-left corner and size.
#[inline]
pub fn point_in_box(p: Vec2, pos: Vec2, size: Vec2) -> bool {
    p.x > pos.x && p.x < pos.x + size.x && p.y > pos.y && p.y < pos.y + size.y
}

/// Whether a square of side `size` at world `y` intersects the visible
/// scroll window `[camera_y, camera_y + view_height)`.
#[inline]
pub fn on_screen(y: f32, size: f32, camera_y: f32, view_height: f32) -> bool {
    y - camera_y + size > 0.0 && y - camera_y < view_height
}
