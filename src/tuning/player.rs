/// Gameplay tuning for the player ship.

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlayerTuning {
    /// Ships at the start of a game.
    pub start_lives: u32,

    /// Health of a fresh ship; shown as 100% energy.
    pub full_health: i32,

    /// Health lost when ramming an alien.
    pub collision_damage: i32,

    /// Torpedoes at the start of each life.
    pub start_torpedoes: u32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            start_lives: 3,
            full_health: 50,
            collision_damage: 15,
            start_torpedoes: 0,
        }
    }
}
