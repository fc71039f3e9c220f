// Hook doubles and world builders shared by the integration tests.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use space_inflators::hooks::{InputHook, SoundHook, StatusHook};
use space_inflators::{
    Entity, EntityId, Hooks, Key, RandomSource, RngSource, ScriptedRandom, SoundEvent, Tuning,
    World,
};

/// Every sound the world played, in order.
#[derive(Clone, Default)]
pub struct SoundLog(Rc<RefCell<Vec<SoundEvent>>>);

impl SoundLog {
    pub fn events(&self) -> Vec<SoundEvent> {
        self.0.borrow().clone()
    }

    pub fn count(&self, event: SoundEvent) -> usize {
        self.0.borrow().iter().filter(|e| **e == event).count()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

impl SoundHook for SoundLog {
    fn play_sound(&mut self, event: SoundEvent) {
        self.0.borrow_mut().push(event);
    }
}

/// One queued key is handed out per read.
#[derive(Clone, Default)]
pub struct ScriptedKeys(Rc<RefCell<VecDeque<Key>>>);

impl ScriptedKeys {
    pub fn push(&self, key: Key) {
        self.0.borrow_mut().push_back(key);
    }
}

impl InputHook for ScriptedKeys {
    fn last_key(&mut self) -> Option<Key> {
        self.0.borrow_mut().pop_front()
    }
}

#[derive(Clone, Default)]
pub struct StatusLog(Rc<RefCell<Vec<String>>>);

impl StatusLog {
    pub fn last(&self) -> Option<String> {
        self.0.borrow().last().cloned()
    }
}

impl StatusHook for StatusLog {
    fn set_status_text(&mut self, text: &str) {
        self.0.borrow_mut().push(text.to_string());
    }
}

pub struct Harness {
    pub world: World,
    pub sound: SoundLog,
    pub keys: ScriptedKeys,
    pub status: StatusLog,
}

impl Harness {
    pub fn new(tuning: Tuning, rng: Box<dyn RandomSource>) -> Self {
        let sound = SoundLog::default();
        let keys = ScriptedKeys::default();
        let status = StatusLog::default();
        let hooks = Hooks::new(sound.clone(), keys.clone(), status.clone());
        Self {
            world: World::new(tuning, hooks, rng),
            sound,
            keys,
            status,
        }
    }

    /// No stars, and every draw lands on its lowest value: each wave alien
    /// is a wealthy one in the top-left corner that stalls there for good,
    /// and every drop roll succeeds.
    pub fn quiet() -> Self {
        Self::new(quiet_tuning(), Box::new(ScriptedRandom::default()))
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(Tuning::default(), Box::new(RngSource::seeded(seed)))
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.world.entity(id)
    }

    pub fn health(&self) -> i32 {
        self.world.player().ship().map_or(0, |ship| ship.health)
    }

    pub fn live_aliens(&self) -> usize {
        self.world
            .entities()
            .filter(|(_, e)| e.is_alive() && e.alien_kind().is_some())
            .count()
    }
}

pub fn quiet_tuning() -> Tuning {
    let mut tuning = Tuning::default();
    tuning.pickups.star_odds = 0;
    tuning
}
