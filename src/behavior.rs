/// Per-kind update logic, one function per entity kind.
///
/// `behavior_for` is the dispatch table the world consults for every live
/// entity. Ships work on a copy of their record and write it back at the
/// end, so the world stays free to spawn and resolve collisions meanwhile.

use tracing::debug;

use crate::collision;
use crate::entities::{
    Body, Brain, Cell, Entity, EntityId, EntityKind, Heading, Patrol, PatrolState, Ship, Side,
    Weapon, RIGHT_COLUMN, TOP_ROW,
};
use crate::hooks::{Key, SoundEvent};
use crate::random::RandomSource;
use crate::tuning::AlienTuning;
use crate::world::{Surroundings, World};

pub(crate) type Behavior = fn(&mut World, EntityId);

pub(crate) fn behavior_for(kind: EntityKind) -> Behavior {
    match kind {
        EntityKind::Star => update_star,
        EntityKind::Nachling | EntityKind::WealthyNachling => update_patrol_alien,
        EntityKind::Smallbot => update_smallbot,
        EntityKind::Bullet | EntityKind::Torpedo => update_projectile,
        EntityKind::FreeShipGoodie | EntityKind::EnergyGoodie | EntityKind::TorpedoGoodie => {
            update_pickup
        }
        // The player ship is driven separately, before the entity pass.
        EntityKind::PlayerShip => idle,
    }
}

fn idle(_world: &mut World, _id: EntityId) {}

// ── Player ───────────────────────────────────────────────────────────────────

/// Ram check, one key of input, ram check again.
pub(crate) fn update_player(world: &mut World) {
    if !world.player.is_alive() {
        return;
    }

    collision::player_ship_vs_aliens(world);
    if player_destroyed(world) {
        return;
    }

    if let Some(key) = world.hooks.input.last_key() {
        apply_key(world, key);
    }

    collision::player_ship_vs_aliens(world);
    player_destroyed(world);
}

fn player_destroyed(world: &mut World) -> bool {
    let wrecked = world.player.ship().map_or(true, |ship| ship.health <= 0);
    if wrecked {
        world.player.kill();
        world.play(SoundEvent::PlayerDie);
    }
    wrecked
}

fn apply_key(world: &mut World, key: Key) {
    let cell = world.player.cell;
    let Some(ship) = world.player.ship_mut() else {
        return;
    };

    let shot = match key {
        Key::Up | Key::Down | Key::Left | Key::Right => {
            ship.bullet_cooldown = false;
            ship.torpedo_cooldown = false;
            let (dx, dy) = match key {
                Key::Up => (0, 1),
                Key::Down => (0, -1),
                Key::Left => (-1, 0),
                _ => (1, 0),
            };
            let target = cell.offset(dx, dy);
            if target.in_field() {
                world.player.cell = target;
            }
            None
        }
        Key::Fire => fire_bullet(ship),
        Key::Torpedo => fire_torpedo(ship),
        Key::Other(_) => None,
    };

    if let Some(weapon) = shot {
        // From the top row the shot leaves the field at once.
        let muzzle = cell.offset(0, 1);
        if muzzle.in_field() {
            world.spawn_projectile(muzzle, Side::Player, weapon);
        }
        world.play(match weapon {
            Weapon::Bullet => SoundEvent::PlayerFire,
            Weapon::Torpedo => SoundEvent::PlayerTorpedo,
        });
    }
}

/// A bullet fired last tick blocks this one; the block itself clears it.
fn fire_bullet(ship: &mut Ship) -> Option<Weapon> {
    if ship.bullet_cooldown {
        ship.bullet_cooldown = false;
        return None;
    }
    ship.bullet_cooldown = true;
    ship.torpedo_cooldown = false;
    Some(Weapon::Bullet)
}

/// Same cooldown rule as bullets, and needs a torpedo in stock.
fn fire_torpedo(ship: &mut Ship) -> Option<Weapon> {
    if ship.torpedo_cooldown {
        ship.torpedo_cooldown = false;
        return None;
    }
    ship.bullet_cooldown = false;
    if ship.torpedoes == 0 {
        return None;
    }
    ship.torpedoes -= 1;
    ship.torpedo_cooldown = true;
    Some(Weapon::Torpedo)
}

// ── Scenery, projectiles, pickups ────────────────────────────────────────────

fn update_star(world: &mut World, id: EntityId) {
    let Some(star) = world.entities.get_mut(id) else {
        return;
    };
    star.cell.y -= 1;
    if star.cell.y < 0 {
        star.kill();
    }
}

/// Check, move one row, check again.
fn update_projectile(world: &mut World, id: EntityId) {
    if collision::projectile_hit(world, id) {
        return;
    }

    let Some(entity) = world.entities.get_mut(id) else {
        return;
    };
    let Some(step) = entity.projectile().map(|projectile| projectile.step()) else {
        return;
    };
    entity.cell.y += step;
    if !entity.cell.in_field() {
        entity.kill();
        return;
    }

    collision::projectile_hit(world, id);
}

fn update_pickup(world: &mut World, id: EntityId) {
    if collision::pickup_collected(world, id) {
        return;
    }

    let period = world.tuning.pickups.move_period;
    let Some(entity) = world.entities.get_mut(id) else {
        return;
    };
    let Body::Pickup(pickup) = &mut entity.body else {
        return;
    };
    let drifts = pickup.move_countdown <= 0;
    if drifts {
        pickup.move_countdown = period;
    }
    pickup.move_countdown -= 1;
    if drifts {
        entity.cell.y -= 1;
    }

    if collision::pickup_collected(world, id) {
        return;
    }

    let Some(entity) = world.entities.get_mut(id) else {
        return;
    };
    let Some(pickup) = entity.pickup_mut() else {
        return;
    };
    pickup.ticks_left -= 1;
    let expired = pickup.ticks_left <= 0;
    if expired || !entity.cell.in_field() {
        entity.kill();
    }
}

// ── Aliens ───────────────────────────────────────────────────────────────────

fn update_patrol_alien(world: &mut World, id: EntityId) {
    update_alien(world, id, patrol_turn);
}

fn update_smallbot(world: &mut World, id: EntityId) {
    update_alien(world, id, smallbot_turn);
}

type AlienStep = fn(
    &mut Cell,
    &mut Ship,
    &mut dyn RandomSource,
    &AlienTuning,
    Surroundings,
) -> Option<(Cell, Weapon)>;

/// Shared alien frame: wreck check, the kind-specific step on a copy, write
/// back, bottom-exit check, then any shot the step asked for.
fn update_alien(world: &mut World, id: EntityId, step: AlienStep) {
    let Some(mut me) = world.entities.get(id).copied() else {
        return;
    };
    let Some(mut ship) = me.ship().copied() else {
        return;
    };

    if ship.health <= 0 {
        me.kill();
        store(world, id, me);
        world.play(SoundEvent::EnemyDie);
        return;
    }

    let around = world.surroundings();
    let mut cell = me.cell;
    let shot = step(
        &mut cell,
        &mut ship,
        world.rng.as_mut(),
        &world.tuning.aliens,
        around,
    );

    me.cell = cell;
    me.body = Body::Ship(ship);
    if cell.y < 0 {
        // Slipped past the bottom row; still counts toward the quota.
        debug!(kind = ?me.alien_kind(), x = cell.x, "alien left the field");
        me.kill();
    }
    store(world, id, me);

    if let Some((target, weapon)) = shot {
        if me.is_alive() && target.in_field() {
            world.spawn_projectile(target, Side::Alien, weapon);
            world.play(SoundEvent::EnemyFire);
        }
    }
}

fn patrol_turn(
    cell: &mut Cell,
    ship: &mut Ship,
    rng: &mut dyn RandomSource,
    tuning: &AlienTuning,
    around: Surroundings,
) -> Option<(Cell, Weapon)> {
    if wealthy_malfunction(ship, rng, tuning) || !ship.take_turn() {
        return None;
    }
    let patrol = ship.patrol_mut()?;
    match patrol.state {
        PatrolState::Approach => {
            approach(cell, patrol, rng, around);
            None
        }
        PatrolState::Strafe => {
            strafe(cell, patrol, rng, tuning, around).map(|target| (target, Weapon::Bullet))
        }
        PatrolState::Retreat => {
            retreat(cell, patrol, rng);
            None
        }
    }
}

fn smallbot_turn(
    cell: &mut Cell,
    ship: &mut Ship,
    rng: &mut dyn RandomSource,
    tuning: &AlienTuning,
    around: Surroundings,
) -> Option<(Cell, Weapon)> {
    if !ship.take_turn() {
        return None;
    }
    smallbot_step(cell, ship, rng, tuning, around)
}

fn store(world: &mut World, id: EntityId, entity: Entity) {
    if let Some(slot) = world.entities.get_mut(id) {
        *slot = entity;
    }
}

/// Wealthy aliens occasionally stall for a while. Returns `true` while stalled.
fn wealthy_malfunction(ship: &mut Ship, rng: &mut dyn RandomSource, tuning: &AlienTuning) -> bool {
    let Brain::WealthyNachling { resting_ticks, .. } = &mut ship.brain else {
        return false;
    };
    if *resting_ticks > 0 {
        *resting_ticks -= 1;
        return true;
    }
    if rng.one_in(tuning.malfunction_odds) {
        *resting_ticks = tuning.malfunction_ticks;
        return true;
    }
    false
}

fn approach(cell: &mut Cell, patrol: &mut Patrol, rng: &mut dyn RandomSource, around: Surroundings) {
    if cell.x == around.player.x && !cell.on_side_wall() {
        let border = cell.border_distance();
        patrol.distance = if border > 3 { rng.rand_int(1, 3) } else { border };
        patrol.heading = if rng.one_in(2) {
            Heading::Left
        } else {
            Heading::Right
        };
        patrol.remaining = patrol.distance;
        patrol.state = PatrolState::Strafe;
        cell.y -= 1;
    } else if rng.one_in(3) {
        // Diagonal step toward the player's column.
        if cell.x < around.player.x && cell.x < RIGHT_COLUMN {
            *cell = cell.offset(1, -1);
        } else if cell.x > around.player.x && cell.x > 0 {
            *cell = cell.offset(-1, -1);
        }
    } else {
        cell.y -= 1;
    }
}

/// Returns where to fire from, if the alien takes a shot.
fn strafe(
    cell: &mut Cell,
    patrol: &mut Patrol,
    rng: &mut dyn RandomSource,
    tuning: &AlienTuning,
    around: Surroundings,
) -> Option<Cell> {
    // Still finishes this step, firing included.
    if around.player.y < cell.y {
        patrol.state = PatrolState::Retreat;
    }

    if patrol.remaining <= 0 {
        patrol.heading = patrol.heading.flipped();
        patrol.remaining = 2 * patrol.distance;
    } else {
        patrol.remaining -= 1;
    }

    let next = cell.offset(patrol.heading.dx(), 0);
    if next.in_field() {
        *cell = next;
    }

    let fires = rng.one_in(tuning.base_fire_chance / around.round.max(1) + 1)
        && around.alien_projectiles < 2 * around.round
        && cell.y > around.player.y;

    if rng.one_in(tuning.retreat_odds) {
        patrol.state = PatrolState::Retreat;
    }

    fires.then(|| cell.offset(0, -1))
}

fn retreat(cell: &mut Cell, patrol: &mut Patrol, rng: &mut dyn RandomSource) {
    if cell.y >= TOP_ROW {
        patrol.state = PatrolState::Approach;
        return;
    }
    patrol.heading = if cell.x == 0 {
        Heading::Right
    } else if cell.x == RIGHT_COLUMN {
        Heading::Left
    } else if rng.one_in(2) {
        Heading::Left
    } else {
        Heading::Right
    };
    *cell = cell.offset(patrol.heading.dx(), 1);
}

/// Drop straight down, or veer once after being hit; shoot when lined up
/// above the player.
fn smallbot_step(
    cell: &mut Cell,
    ship: &mut Ship,
    rng: &mut dyn RandomSource,
    tuning: &AlienTuning,
    around: Surroundings,
) -> Option<(Cell, Weapon)> {
    let Brain::Smallbot { hit_by_player } = &mut ship.brain else {
        return None;
    };

    if std::mem::take(hit_by_player) {
        let dx = if cell.x == 0 {
            1
        } else if cell.x == RIGHT_COLUMN {
            -1
        } else if rng.one_in(2) {
            1
        } else {
            -1
        };
        *cell = cell.offset(dx, -1);
    } else {
        cell.y -= 1;
    }

    let lined_up = cell.x == around.player.x && cell.y > around.player.y;
    if !lined_up || around.alien_projectiles >= 2 * around.round {
        return None;
    }
    let weapon = if rng.one_in(tuning.smallbot_torpedo_chance / around.round.max(1)) {
        Weapon::Torpedo
    } else {
        Weapon::Bullet
    };
    Some((cell.offset(0, -1), weapon))
}
