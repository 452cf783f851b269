//! Read-only render snapshot
//!
//! A host renders from a flat, serializable view of the world instead of
//! reaching into the pools. Snapshots carry only what a renderer needs;
//! pool bookkeeping, RNG state and spawn checkpoints stay internal.

use glam::Vec2;
use serde::Serialize;

use super::state::{GameOverCause, ItemKind, ProjectileOwner, Simulation};

#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub size: f32,
    pub hp: i32,
    pub max_hp: i32,
    pub visual_scale: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlatformView {
    pub pos: Vec2,
    pub size: Vec2,
    pub breakable: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnemyView {
    pub pos: Vec2,
    pub size: f32,
    /// Remaining hp as a fraction of max, for health bars
    pub hp_fraction: f32,
    pub visual_scale: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ItemView {
    pub pos: Vec2,
    pub size: f32,
    pub kind: ItemKind,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectileView {
    pub pos: Vec2,
    pub owner: ProjectileOwner,
}

#[derive(Debug, Clone, Serialize)]
pub struct HazardView {
    pub pos: Vec2,
    pub radius: f32,
}

/// Everything a renderer needs for one frame. Positions are world-space;
/// subtract `camera_y` to map into the viewport.
#[derive(Debug, Clone, Serialize)]
pub struct RenderSnapshot {
    pub camera_y: f32,
    pub score: f32,
    pub time_ticks: u64,
    pub game_over: Option<GameOverCause>,
    pub player: PlayerView,
    pub platforms: Vec<PlatformView>,
    pub enemies: Vec<EnemyView>,
    pub items: Vec<ItemView>,
    pub projectiles: Vec<ProjectileView>,
    pub hazards: Vec<HazardView>,
}

impl Simulation {
    pub fn snapshot(&self) -> RenderSnapshot {
        let config = &self.config;
        RenderSnapshot {
            camera_y: self.camera.y,
            score: self.score.value(),
            time_ticks: self.time_ticks,
            game_over: self.game_over,
            player: PlayerView {
                pos: self.player.pos,
                size: self.player.size,
                hp: self.player.hp,
                max_hp: config.player_max_hp,
                visual_scale: self.player.visual_scale,
            },
            platforms: self
                .platforms
                .iter_active()
                .map(|p| PlatformView {
                    pos: p.pos,
                    size: Vec2::new(config.platform_width, config.platform_height),
                    breakable: p.breakable,
                })
                .collect(),
            enemies: self
                .enemies
                .iter_active()
                .map(|e| EnemyView {
                    pos: e.pos,
                    size: config.enemy_size,
                    hp_fraction: e.hp as f32 / e.max_hp.max(1) as f32,
                    visual_scale: e.visual_scale,
                })
                .collect(),
            items: self
                .items
                .iter_active()
                .map(|i| ItemView {
                    pos: i.pos,
                    size: i.size,
                    kind: i.kind,
                })
                .collect(),
            projectiles: self
                .projectiles
                .iter_active()
                .map(|p| ProjectileView {
                    pos: p.pos,
                    owner: p.owner,
                })
                .collect(),
            hazards: self
                .hazards
                .iter_active()
                .map(|h| HazardView {
                    pos: h.pos,
                    radius: h.radius,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_snapshot_mirrors_active_counts() {
        let sim = Simulation::new(Config::default(), 3);
        let snap = sim.snapshot();
        assert_eq!(snap.platforms.len(), sim.platforms.active_count());
        assert_eq!(snap.enemies.len(), 0);
        assert_eq!(snap.camera_y, sim.camera.y);
        assert_eq!(snap.player.hp, sim.config.player_max_hp);
        assert!(snap.game_over.is_none());
    }

    #[test]
    fn test_snapshot_serializes_to_json() {
        let sim = Simulation::new(Config::default(), 3);
        let json = serde_json::to_string(&sim.snapshot()).unwrap();
        assert!(json.contains("\"camera_y\""));
        assert!(json.contains("\"platforms\""));
    }
}
