/// Gameplay tuning.
///
/// Every number the simulation balances on lives here so it can be tweaked
/// from a TOML file without a rebuild. Field dimensions are not tuning; they
/// are fixed in `entities`.

mod aliens;
mod pickups;
mod player;
mod weapons;

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::ConfigError;

pub use aliens::AlienTuning;
pub use pickups::PickupTuning;
pub use player::PlayerTuning;
pub use weapons::WeaponTuning;

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Tuning {
    pub player: PlayerTuning,
    pub weapons: WeaponTuning,
    pub aliens: AlienTuning,
    pub pickups: PickupTuning,
}

impl Tuning {
    /// Parses TOML; missing tables and keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = toml::from_str(text)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_toml_str(&text)?;
        debug!(path = %path.display(), "loaded tuning");
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.player.full_health <= 0 {
            return Err(invalid("player.full_health", "must be positive"));
        }
        if self.player.start_lives == 0 {
            return Err(invalid("player.start_lives", "must be at least 1"));
        }
        if self.aliens.patrol_share > 100 {
            return Err(invalid("aliens.patrol_share", "is a percentage (0..=100)"));
        }
        if self.aliens.wealthy_share > 100 {
            return Err(invalid("aliens.wealthy_share", "is a percentage (0..=100)"));
        }
        if self.aliens.health_round_scale <= 0.0 {
            return Err(invalid("aliens.health_round_scale", "must be positive"));
        }
        if self.pickups.move_period <= 0 {
            return Err(invalid("pickups.move_period", "must be positive"));
        }
        if self.pickups.lifetime_floor <= 0 {
            return Err(invalid("pickups.lifetime_floor", "must be positive"));
        }
        if self.pickups.star_odds < 0 {
            return Err(invalid("pickups.star_odds", "must not be negative"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}
