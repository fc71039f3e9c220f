/// Boundary contracts between the simulation and its presentation layer.
///
/// The world holds the sound, input and status hooks for its whole life.
/// Rendering is pull-based: the driver hands a `RenderHook` to
/// `World::render` once per frame.

use crate::entities::{Cell, EntityKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundEvent {
    EnemyDie,
    PlayerDie,
    PlayerFire,
    PlayerTorpedo,
    EnemyFire,
    GotGoodie,
    PlayerHit,
    EnemyHit,
    EnemyPlayerCollision,
}

/// One buffered keypress. Keys the game does not understand arrive as
/// `Other` and are ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    /// Primary weapon.
    Fire,
    /// Secondary weapon.
    Torpedo,
    Other(u32),
}

/// What the renderer needs to draw one live entity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sprite {
    pub kind: EntityKind,
    pub cell: Cell,
    pub brightness: f32,
}

pub trait SoundHook {
    /// Fire-and-forget.
    fn play_sound(&mut self, event: SoundEvent);
}

pub trait InputHook {
    /// Returns and clears the buffered key, if any.
    fn last_key(&mut self) -> Option<Key>;
}

pub trait StatusHook {
    fn set_status_text(&mut self, text: &str);
}

pub trait RenderHook {
    fn draw(&mut self, sprite: &Sprite);
}

// ── Inert implementations ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl SoundHook for Silent {
    fn play_sound(&mut self, _event: SoundEvent) {}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoInput;

impl InputHook for NoInput {
    fn last_key(&mut self) -> Option<Key> {
        None
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoStatus;

impl StatusHook for NoStatus {
    fn set_status_text(&mut self, _text: &str) {}
}

/// The collaborators a `World` is built with.
pub struct Hooks {
    pub sound: Box<dyn SoundHook>,
    pub input: Box<dyn InputHook>,
    pub status: Box<dyn StatusHook>,
}

impl Hooks {
    pub fn new(
        sound: impl SoundHook + 'static,
        input: impl InputHook + 'static,
        status: impl StatusHook + 'static,
    ) -> Self {
        Self {
            sound: Box::new(sound),
            input: Box::new(input),
            status: Box::new(status),
        }
    }

    /// No sound, no input, status text dropped.
    pub fn headless() -> Self {
        Self::new(Silent, NoInput, NoStatus)
    }
}
