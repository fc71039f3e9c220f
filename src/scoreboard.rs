/// Scoreboard text published to the status hook every tick.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scoreboard {
    pub score: u32,
    pub round: u32,
    pub health: i32,
    pub full_health: i32,
    pub torpedoes: u32,
    pub lives: u32,
}

impl Scoreboard {
    /// Health as a percentage of a fresh ship, clamped at zero.
    pub fn energy_percent(&self) -> i32 {
        if self.full_health <= 0 {
            return 0;
        }
        self.health.max(0) * 100 / self.full_health
    }
}

impl fmt::Display for Scoreboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Score: {:07} Round: {:02} Energy: {:>3}% Torpedoes: {:03} Ships: {:02}",
            self.score,
            self.round,
            self.energy_percent(),
            self.torpedoes,
            self.lives
        )
    }
}
