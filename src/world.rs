/// The simulation driver.
///
/// `World` owns every actor, the hooks and the random source, and advances
/// the whole population one tick per `advance_tick` call. Entity behaviour
/// is in `behavior`, overlap resolution in `collision`; this module holds
/// spawning, the update order, reaping and the round/lives bookkeeping.

use slotmap::SlotMap;
use tracing::{debug, info, trace};

use crate::behavior;
use crate::entities::{
    AlienKind, Body, Cell, Entity, EntityId, PickupKind, Pickup, Projectile, Ship, Side, Weapon,
    RIGHT_COLUMN, TOP_ROW,
};
use crate::hooks::{Hooks, RenderHook, SoundEvent, Sprite};
use crate::random::RandomSource;
use crate::round::RoundProgress;
use crate::scoreboard::Scoreboard;
use crate::tuning::Tuning;

/// Where a fresh player ship starts.
pub const PLAYER_START: Cell = Cell::new(15, 1);

/// Result of one tick, for the external driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickStatus {
    Continue,
    /// The player ship was destroyed; one life has been deducted.
    PlayerDied,
}

/// Read-only view of the world an alien decides on.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Surroundings {
    pub player: Cell,
    pub round: i32,
    pub alien_projectiles: i32,
}

pub struct World {
    pub(crate) tuning: Tuning,
    pub(crate) hooks: Hooks,
    pub(crate) rng: Box<dyn RandomSource>,
    pub(crate) entities: SlotMap<EntityId, Entity>,
    pub(crate) player: Entity,
    pub(crate) progress: RoundProgress,
    pub(crate) alien_projectiles: i32,
    pub(crate) score: u32,
    pub(crate) lives: u32,
}

impl World {
    pub fn new(tuning: Tuning, hooks: Hooks, rng: Box<dyn RandomSource>) -> Self {
        let player = fresh_player(&tuning);
        Self {
            lives: tuning.player.start_lives,
            tuning,
            hooks,
            rng,
            entities: SlotMap::with_key(),
            player,
            progress: RoundProgress::default(),
            alien_projectiles: 0,
            score: 0,
        }
    }

    // ── Per-tick driver ──────────────────────────────────────────────────────

    /// Advance the simulation by one tick.
    ///
    /// Entities spawned while the player or the pass runs are first updated
    /// next tick. Once the player ship is destroyed the world stands still:
    /// further calls return `PlayerDied` without charging another life until
    /// `restart_round` is called.
    pub fn advance_tick(&mut self) -> TickStatus {
        if !self.player.is_alive() {
            return TickStatus::PlayerDied;
        }

        self.spawn_scenery();
        self.spawn_wave();
        self.publish_status();

        let ids: Vec<EntityId> = self.entities.keys().collect();
        behavior::update_player(self);

        for id in ids {
            let Some(kind) = self
                .entities
                .get(id)
                .filter(|entity| entity.is_alive())
                .map(Entity::kind)
            else {
                continue;
            };
            behavior::behavior_for(kind)(self, id);
        }

        self.reap();
        trace!(
            entities = self.entities.len(),
            on_screen = self.progress.on_screen(),
            aliens_left = self.progress.aliens_left(),
            alien_projectiles = self.alien_projectiles,
            "tick complete"
        );

        if !self.player.is_alive() {
            self.lives = self.lives.saturating_sub(1);
            info!(lives = self.lives, score = self.score, "player ship destroyed");
            if self.is_game_over() {
                info!(score = self.score, round = self.progress.round(), "game over");
            }
            return TickStatus::PlayerDied;
        }

        if self.progress.is_cleared() {
            self.progress.advance();
            debug!(
                round = self.progress.round(),
                quota = self.progress.quota(),
                max_on_screen = self.progress.max_on_screen(),
                "round cleared"
            );
        }

        TickStatus::Continue
    }

    /// Replay the current round after a lost life: empty field, fresh ship,
    /// full quota. Score, round and lives carry over.
    pub fn restart_round(&mut self) {
        self.entities.clear();
        self.player = fresh_player(&self.tuning);
        self.progress.restart();
        self.alien_projectiles = 0;
        debug!(round = self.progress.round(), lives = self.lives, "round restarted");
    }

    pub fn is_game_over(&self) -> bool {
        self.lives == 0
    }

    /// Hand every live entity, player first, to `renderer`.
    pub fn render(&self, renderer: &mut dyn RenderHook) {
        let live = std::iter::once(&self.player)
            .chain(self.entities.iter().map(|(_, entity)| entity))
            .filter(|entity| entity.is_alive() && entity.cell.in_field());
        for entity in live {
            renderer.draw(&Sprite {
                kind: entity.kind(),
                cell: entity.cell,
                brightness: entity.brightness(),
            });
        }
    }

    pub fn scoreboard(&self) -> Scoreboard {
        let ship = self.player.ship();
        Scoreboard {
            score: self.score,
            round: self.progress.round(),
            health: ship.map_or(0, |ship| ship.health),
            full_health: self.tuning.player.full_health,
            torpedoes: ship.map_or(0, |ship| ship.torpedoes),
            lives: self.lives,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────────────

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn round(&self) -> u32 {
        self.progress.round()
    }

    pub fn progress(&self) -> &RoundProgress {
        &self.progress
    }

    /// Alien-owned projectiles currently in flight.
    pub fn alien_projectiles(&self) -> i32 {
        self.alien_projectiles
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn player(&self) -> &Entity {
        &self.player
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    /// Every entity on the field except the player ship.
    pub fn entities(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.entities.iter()
    }

    // ── Direct manipulation (drivers, tests) ─────────────────────────────────

    pub fn player_mut(&mut self) -> &mut Entity {
        &mut self.player
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(id)
    }

    pub fn set_lives(&mut self, lives: u32) {
        self.lives = lives;
    }

    // ── Spawning ─────────────────────────────────────────────────────────────

    pub fn spawn_star(&mut self, cell: Cell) -> EntityId {
        self.entities.insert(Entity::new(cell, Body::Star))
    }

    /// Spawn an alien with round-scaled health. Counts toward the on-screen cap.
    pub fn spawn_alien(&mut self, kind: AlienKind, cell: Cell) -> EntityId {
        let health = self.tuning.aliens.health_for(kind, self.progress.round());
        self.progress.alien_spawned();
        debug!(?kind, x = cell.x, y = cell.y, health, "alien spawned");
        self.entities
            .insert(Entity::new(cell, Body::Ship(Ship::alien(kind, health))))
    }

    pub fn spawn_projectile(&mut self, cell: Cell, side: Side, weapon: Weapon) -> EntityId {
        if side == Side::Alien {
            self.alien_projectiles += 1;
        }
        let projectile = Projectile {
            side,
            weapon,
            power: self.tuning.weapons.power(weapon),
        };
        self.entities
            .insert(Entity::new(cell, Body::Projectile(projectile)))
    }

    /// Spawn a pickup whose lifetime shrinks with the round.
    pub fn spawn_pickup(&mut self, kind: PickupKind, cell: Cell) -> EntityId {
        let pickups = &self.tuning.pickups;
        let pickup = Pickup::new(
            kind,
            pickups.lifetime_for(self.progress.round()),
            pickups.move_period,
        );
        debug!(?kind, x = cell.x, y = cell.y, "pickup dropped");
        self.entities.insert(Entity::new(cell, Body::Pickup(pickup)))
    }

    fn spawn_scenery(&mut self) {
        let odds = self.tuning.pickups.star_odds;
        if odds > 0 && self.rng.one_in(odds) {
            let x = self.rng.rand_int(0, RIGHT_COLUMN);
            self.spawn_star(Cell::new(x, TOP_ROW));
        }
    }

    fn spawn_wave(&mut self) {
        if !self.progress.wants_alien() {
            return;
        }
        let aliens = self.tuning.aliens;
        let kind = if self.rng.percent(aliens.patrol_share) {
            if self.rng.percent(aliens.wealthy_share) {
                AlienKind::WealthyNachling
            } else {
                AlienKind::Nachling
            }
        } else {
            AlienKind::Smallbot
        };
        let x = self.rng.rand_int(0, RIGHT_COLUMN);
        self.spawn_alien(kind, Cell::new(x, TOP_ROW));
    }

    // ── Bookkeeping ──────────────────────────────────────────────────────────

    fn publish_status(&mut self) {
        let text = self.scoreboard().to_string();
        self.hooks.status.set_status_text(&text);
    }

    /// Drop every dead entity and settle the counters they held.
    fn reap(&mut self) {
        let progress = &mut self.progress;
        let alien_projectiles = &mut self.alien_projectiles;
        self.entities.retain(|_, entity| {
            if entity.is_alive() {
                return true;
            }
            if entity.alien_kind().is_some() {
                progress.alien_removed();
            }
            if entity
                .projectile()
                .is_some_and(|projectile| projectile.side == Side::Alien)
            {
                *alien_projectiles = (*alien_projectiles - 1).max(0);
            }
            false
        });
    }

    pub(crate) fn surroundings(&self) -> Surroundings {
        Surroundings {
            player: self.player.cell,
            round: self.progress.round() as i32,
            alien_projectiles: self.alien_projectiles,
        }
    }

    pub(crate) fn play(&mut self, event: SoundEvent) {
        self.hooks.sound.play_sound(event);
    }
}

fn fresh_player(tuning: &Tuning) -> Entity {
    let mut ship = Ship::player(tuning.player.full_health);
    ship.torpedoes = tuning.player.start_torpedoes;
    Entity::new(PLAYER_START, Body::Ship(ship))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedRandom;

    /// No stars, and every spawn roll lands on the lowest value.
    fn quiet_world() -> World {
        let mut tuning = Tuning::default();
        tuning.pickups.star_odds = 0;
        World::new(tuning, Hooks::headless(), Box::new(ScriptedRandom::default()))
    }

    #[test]
    fn reap_releases_alien_and_projectile_counters() {
        let mut world = quiet_world();
        let alien = world.spawn_alien(AlienKind::Nachling, Cell::new(3, 30));
        let shot = world.spawn_projectile(Cell::new(3, 29), Side::Alien, Weapon::Bullet);
        assert_eq!(world.progress.on_screen(), 1);
        assert_eq!(world.alien_projectiles, 1);

        world.entities.get_mut(alien).unwrap().kill();
        world.entities.get_mut(shot).unwrap().kill();
        world.reap();

        assert_eq!(world.progress.on_screen(), 0);
        assert_eq!(world.progress.aliens_left(), 3);
        assert_eq!(world.alien_projectiles, 0);
        assert!(world.entities.is_empty());
    }

    #[test]
    fn wave_spawn_respects_on_screen_cap() {
        let mut world = quiet_world();
        for _ in 0..10 {
            world.spawn_wave();
            assert!(world.progress.on_screen() <= world.progress.max_on_screen());
        }
        assert_eq!(world.progress.on_screen(), 2);
    }

    #[test]
    fn lowest_rolls_spawn_a_wealthy_alien_in_column_zero() {
        let mut world = quiet_world();
        world.spawn_wave();
        let (_, alien) = world.entities().next().unwrap();
        assert_eq!(alien.alien_kind(), Some(AlienKind::WealthyNachling));
        assert_eq!(alien.cell, Cell::new(0, TOP_ROW));
    }

    #[test]
    fn restart_round_keeps_score_round_and_lives() {
        let mut world = quiet_world();
        world.score = 4200;
        world.lives = 2;
        world.progress.advance();
        world.spawn_alien(AlienKind::Smallbot, Cell::new(5, 20));
        world.player.kill();

        world.restart_round();

        assert!(world.entities.is_empty());
        assert!(world.player.is_alive());
        assert_eq!(world.player.cell, PLAYER_START);
        assert_eq!(world.score, 4200);
        assert_eq!(world.lives, 2);
        assert_eq!(world.progress, RoundProgress::for_round(2));
    }
}
