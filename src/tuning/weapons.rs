/// Gameplay tuning for projectiles. Both sides share the same weapons.

use serde::Deserialize;

use crate::entities::Weapon;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WeaponTuning {
    /// Damage dealt by a bullet.
    pub bullet_power: i32,

    /// Damage dealt by a torpedo.
    pub torpedo_power: i32,
}

impl WeaponTuning {
    pub fn power(&self, weapon: Weapon) -> i32 {
        match weapon {
            Weapon::Bullet => self.bullet_power,
            Weapon::Torpedo => self.torpedo_power,
        }
    }
}

impl Default for WeaponTuning {
    fn default() -> Self {
        Self {
            bullet_power: 2,
            torpedo_power: 8,
        }
    }
}
