//! Broad-phase collision resolution
//!
//! All tests are axis-aligned box checks. The player-vs-platform landing
//! is swept across the previous and current tick so fast vertical movers
//! cannot tunnel through the player's bounding box in a single frame.

use glam::Vec2;

use super::state::{
    GameEvent, Item, ItemKind, Platform, PlayerBody, ProjectileOwner, Simulation, SimulationEvents,
};
use crate::config::Config;
use crate::{aabb_overlap, point_in_box};

/// Swept landing test. A landing registers when the player's bottom edge
/// was at or above the platform's top last tick, is at or below it now, the
/// player is falling, and the boxes overlap horizontally. Both sides of
/// the sweep use the platform's previous y so a platform moving toward the
/// player cannot slip past between samples.
pub fn platform_landing(player: &PlayerBody, platform: &Platform, config: &Config) -> bool {
    if !platform.active {
        return false;
    }
    let prev_bottom = player.last_y + player.size;
    let curr_bottom = player.pos.y + player.size;

    player.vy > 0.0
        && prev_bottom <= platform.prev_y + config.platform_height
        && curr_bottom >= platform.prev_y
        && player.pos.x + player.size > platform.pos.x
        && player.pos.x < platform.pos.x + config.platform_width
}

/// Apply landing impulses for every platform the swept test matches.
/// Breakable platforms give exactly one impulse, ever: the first landing
/// marks them used and retires the slot.
pub fn resolve_platform_landings(sim: &mut Simulation) {
    let Simulation {
        player,
        platforms,
        config,
        ..
    } = sim;

    for platform in platforms.iter_active_mut() {
        if platform_landing(player, platform, config) {
            if platform.breakable {
                if platform.used {
                    continue;
                }
                platform.used = true;
                platform.active = false;
            }
            player.land();
        }
    }
}

/// Items ride their owning platform and die with it; overlap with the
/// player applies the item's effect and consumes the slot.
pub fn resolve_items(sim: &mut Simulation, events: &mut SimulationEvents) {
    let Simulation {
        items,
        platforms,
        player,
        config,
        special_collected,
        ..
    } = sim;

    for item in items.iter_active_mut() {
        // A dead or recycled platform (stale handle) retires the item
        let seat = item
            .platform
            .and_then(|handle| platforms.get(handle))
            .map(|p| Item::seat(p.pos, item.size, config));
        let Some(pos) = seat else {
            item.active = false;
            item.platform = None;
            continue;
        };
        item.pos = pos;

        let player_size = Vec2::splat(player.size);
        if aabb_overlap(player.pos, player_size, item.pos, Vec2::splat(item.size)) {
            apply_item_effect(player, item.kind, config);
            if item.kind == ItemKind::Special {
                *special_collected = true;
            }
            events.push(GameEvent::ItemCollected(item.kind));
            item.active = false;
            item.platform = None;
        }
    }
}

fn apply_item_effect(player: &mut PlayerBody, kind: ItemKind, config: &Config) {
    let effects = &config.item_effects;
    match kind {
        ItemKind::Trampoline => player.vy -= effects.trampoline_impulse,
        ItemKind::Drone => player.vy -= effects.drone_impulse,
        ItemKind::Rocket => player.vy -= effects.rocket_impulse,
        ItemKind::Spikes => player.apply_hp(-effects.spikes_damage, config.player_max_hp),
        ItemKind::Bomb => player.apply_hp(-effects.bomb_damage, config.player_max_hp),
        ItemKind::Medkit => player.apply_hp(effects.medkit_heal, config.player_max_hp),
        ItemKind::Adrenaline => player.apply_hp(effects.adrenaline_heal, config.player_max_hp),
        // The special item has no physical effect; collection is the event
        ItemKind::Special => {}
    }
}

/// Move projectiles and resolve hits. A projectile that leaves the visible
/// window or scores a hit deactivates in the same tick and never interacts
/// again. When several targets overlap, the first match in pool order
/// takes the hit and consumes the projectile.
pub fn update_projectiles(sim: &mut Simulation, events: &mut SimulationEvents) {
    let Simulation {
        projectiles,
        enemies,
        player,
        config,
        camera,
        ..
    } = sim;
    let camera_y = camera.y;

    for projectile in projectiles.iter_active_mut() {
        projectile.pos += projectile.vel;
        let p = projectile.pos;

        if p.x < 0.0
            || p.x > config.view_width
            || p.y - camera_y < 0.0
            || p.y - camera_y > config.view_height
        {
            projectile.active = false;
            continue;
        }

        match projectile.owner {
            ProjectileOwner::Player => {
                for enemy in enemies.iter_active_mut() {
                    if point_in_box(p, enemy.pos, Vec2::splat(config.enemy_size)) {
                        enemy.hp -= projectile.damage;
                        projectile.active = false;
                        if enemy.hp <= 0 {
                            enemy.active = false;
                            events.push(GameEvent::EnemyDestroyed);
                        }
                        break;
                    }
                }
            }
            ProjectileOwner::Enemy => {
                if point_in_box(p, player.pos, Vec2::splat(player.size)) {
                    player.apply_hp(-projectile.damage, config.player_max_hp);
                    projectile.active = false;
                }
            }
        }
    }
}
