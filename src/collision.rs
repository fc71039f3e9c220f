/// Same-cell overlap resolution.
///
/// Every check skips entities already dead this tick, so one overlap is
/// never resolved twice. Scans are linear over the live entities; the field never
/// holds more than a few dozen actors.

use tracing::debug;

use crate::entities::{AlienKind, Body, Brain, Cell, EntityId, PickupKind, Side};
use crate::hooks::SoundEvent;
use crate::world::World;

/// First live alien ship standing on `cell`. Wrecks shot down earlier this
/// tick still qualify unless `intact_only` is set.
fn alien_at(world: &World, cell: Cell, intact_only: bool) -> Option<EntityId> {
    world
        .entities
        .iter()
        .find(|(_, entity)| {
            entity.is_alive()
                && entity.cell == cell
                && entity.alien_kind().is_some()
                && (!intact_only || entity.ship().is_some_and(|ship| ship.health > 0))
        })
        .map(|(id, _)| id)
}

// ── Player ship vs aliens ────────────────────────────────────────────────────

/// Rams destroy the alien without crediting the kill, and cost the player
/// a fixed amount of health. A wreck already paid for is left to its own
/// update.
pub(crate) fn player_ship_vs_aliens(world: &mut World) {
    if !world.player.is_alive() {
        return;
    }
    let damage = world.tuning.player.collision_damage;
    while let Some(id) = alien_at(world, world.player.cell, true) {
        if let Some(alien) = world.entities.get_mut(id) {
            alien.kill();
        }
        world.progress.forgive_kill();
        if let Some(ship) = world.player.ship_mut() {
            ship.health -= damage;
        }
        world.play(SoundEvent::EnemyPlayerCollision);
        debug!(x = world.player.cell.x, y = world.player.cell.y, "player rammed an alien");
    }
}

// ── Projectiles ──────────────────────────────────────────────────────────────

/// Resolves projectile `id` against whatever it can hit. Returns `true` when
/// the projectile is gone, either spent now or dead already.
pub(crate) fn projectile_hit(world: &mut World, id: EntityId) -> bool {
    let Some(entity) = world.entities.get(id).copied() else {
        return true;
    };
    if !entity.is_alive() {
        return true;
    }
    let Some(projectile) = entity.projectile().copied() else {
        return false;
    };

    match projectile.side {
        Side::Player => {
            let Some(target) = alien_at(world, entity.cell, false) else {
                return false;
            };
            spend(world, id);
            world.play(SoundEvent::EnemyHit);
            damage_alien(world, target, projectile.power);
            true
        }
        Side::Alien => {
            if !world.player.is_alive() || world.player.cell != entity.cell {
                return false;
            }
            spend(world, id);
            world.play(SoundEvent::PlayerHit);
            if let Some(ship) = world.player.ship_mut() {
                ship.health -= projectile.power;
            }
            true
        }
    }
}

fn spend(world: &mut World, id: EntityId) {
    if let Some(entity) = world.entities.get_mut(id) {
        entity.kill();
    }
}

/// Applies `power` damage. The kill bonus and drop roll happen on the hit
/// that takes health from positive to zero or below; the wreck itself is
/// removed on the alien's next update.
fn damage_alien(world: &mut World, id: EntityId, power: i32) {
    let Some(alien) = world.entities.get_mut(id) else {
        return;
    };
    let cell = alien.cell;
    let Some(kind) = alien.alien_kind() else {
        return;
    };
    let Some(ship) = alien.ship_mut() else {
        return;
    };

    let was_intact = ship.health > 0;
    ship.health -= power;
    if let Brain::Smallbot { hit_by_player } = &mut ship.brain {
        *hit_by_player = true;
    }
    if was_intact && ship.health <= 0 {
        award_kill(world, kind, cell);
    }
}

fn award_kill(world: &mut World, kind: AlienKind, cell: Cell) {
    let bonus = world.tuning.aliens.kill_bonus(kind);
    world.score = world.score.saturating_add(bonus);
    debug!(?kind, bonus, score = world.score, "alien destroyed");

    let odds = world.tuning.aliens.drop_odds;
    let drop = match kind {
        AlienKind::Nachling => None,
        AlienKind::WealthyNachling if world.rng.one_in(odds) => {
            if world.rng.one_in(2) {
                Some(PickupKind::Energy)
            } else {
                Some(PickupKind::Torpedoes)
            }
        }
        AlienKind::Smallbot if world.rng.one_in(odds) => Some(PickupKind::FreeShip),
        _ => None,
    };
    if let Some(pickup) = drop {
        world.spawn_pickup(pickup, cell);
    }
}

// ── Pickups ──────────────────────────────────────────────────────────────────

/// Collects pickup `id` if the player ship sits on it. Returns `true` when
/// the pickup is gone.
pub(crate) fn pickup_collected(world: &mut World, id: EntityId) -> bool {
    let Some(entity) = world.entities.get_mut(id) else {
        return true;
    };
    if !entity.is_alive() {
        return true;
    }
    let Body::Pickup(pickup) = entity.body else {
        return false;
    };
    if !world.player.is_alive() || world.player.cell != entity.cell {
        return false;
    }
    entity.kill();

    world.play(SoundEvent::GotGoodie);
    let tuning = world.tuning;
    world.score = world.score.saturating_add(tuning.pickups.bonus);
    match pickup.kind {
        PickupKind::FreeShip => world.lives = world.lives.saturating_add(1),
        PickupKind::Energy => {
            if let Some(ship) = world.player.ship_mut() {
                ship.health = tuning.player.full_health;
            }
        }
        PickupKind::Torpedoes => {
            if let Some(ship) = world.player.ship_mut() {
                ship.torpedoes = ship.torpedoes.saturating_add(tuning.pickups.torpedo_grant);
            }
        }
    }
    debug!(kind = ?pickup.kind, score = world.score, "pickup collected");
    true
}
