/// Gameplay tuning for pickups and scenery.

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PickupTuning {
    /// Score for collecting any pickup.
    pub bonus: u32,

    /// Torpedoes granted by a torpedo pickup.
    pub torpedo_grant: u32,

    /// Lifetime is `lifetime_base / round + lifetime_floor` ticks.
    pub lifetime_base: i32,
    pub lifetime_floor: i32,

    /// Pickups drift one row every this many ticks.
    pub move_period: i32,

    /// A star appears with probability 1 in this each tick; 0 disables stars.
    pub star_odds: i32,
}

impl PickupTuning {
    pub fn lifetime_for(&self, round: u32) -> i32 {
        let round = round.max(1) as i32;
        self.lifetime_base / round + self.lifetime_floor
    }
}

impl Default for PickupTuning {
    fn default() -> Self {
        Self {
            bonus: 5000,
            torpedo_grant: 5,
            lifetime_base: 100,
            lifetime_floor: 30,
            move_period: 3,
            star_odds: 3,
        }
    }
}
