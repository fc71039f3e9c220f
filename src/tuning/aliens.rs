/// Gameplay tuning for alien spawning, behaviour and rewards.

use serde::Deserialize;

use crate::entities::AlienKind;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AlienTuning {
    /// Percent of spawns that are patrol-type rather than smallbots.
    pub patrol_share: u32,

    /// Percent of patrol-type spawns that are wealthy.
    pub wealthy_share: u32,

    /// Health before round scaling, per variant.
    pub nachling_health: i32,
    pub wealthy_health: i32,
    pub smallbot_health: i32,

    /// Multiplier applied together with the round number.
    pub health_round_scale: f64,

    /// Score for destroying each variant.
    pub nachling_bonus: u32,
    pub wealthy_bonus: u32,
    pub smallbot_bonus: u32,

    /// Strafing fire roll is 1 in `base_fire_chance / round + 1`.
    pub base_fire_chance: i32,

    /// Strafing aliens break off with probability 1 in this.
    pub retreat_odds: i32,

    /// Wealthy aliens start a malfunction with probability 1 in this.
    pub malfunction_odds: i32,

    /// Length of a malfunction in ticks.
    pub malfunction_ticks: u32,

    /// Smallbot torpedo roll is 1 in `smallbot_torpedo_chance / round`.
    pub smallbot_torpedo_chance: i32,

    /// Drop roll for wealthy and small aliens is 1 in this.
    pub drop_odds: i32,
}

impl AlienTuning {
    /// Health for a fresh alien of `kind` in `round`. Never below 1.
    pub fn health_for(&self, kind: AlienKind, round: u32) -> i32 {
        let base = match kind {
            AlienKind::Nachling => self.nachling_health,
            AlienKind::WealthyNachling => self.wealthy_health,
            AlienKind::Smallbot => self.smallbot_health,
        };
        let scaled = f64::from(base) * f64::from(round) * self.health_round_scale;
        (scaled as i32).max(1)
    }

    pub fn kill_bonus(&self, kind: AlienKind) -> u32 {
        match kind {
            AlienKind::Nachling => self.nachling_bonus,
            AlienKind::WealthyNachling => self.wealthy_bonus,
            AlienKind::Smallbot => self.smallbot_bonus,
        }
    }
}

impl Default for AlienTuning {
    fn default() -> Self {
        Self {
            patrol_share: 70,
            wealthy_share: 20,
            nachling_health: 5,
            wealthy_health: 8,
            smallbot_health: 12,
            health_round_scale: 0.9,
            nachling_bonus: 1000,
            wealthy_bonus: 1200,
            smallbot_bonus: 1500,
            base_fire_chance: 10,
            retreat_odds: 20,
            malfunction_odds: 200,
            malfunction_ticks: 30,
            smallbot_torpedo_chance: 100,
            drop_odds: 3,
        }
    }
}
