/// Round budget bookkeeping: kill quota, aliens left, on-screen cap.

/// Per-round counters. Counters are signed because the kill tally may
/// overshoot the quota when several aliens go down on the same tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundProgress {
    round: u32,
    quota: i32,
    aliens_left: i32,
    max_on_screen: i32,
    on_screen: i32,
}

impl Default for RoundProgress {
    fn default() -> Self {
        Self::for_round(1)
    }
}

impl RoundProgress {
    /// Fresh budget for `round`: quota `4 × round`, cap `2 + round / 2`.
    pub fn for_round(round: u32) -> Self {
        let round = round.max(1);
        let r = round as i32;
        Self {
            round,
            quota: 4 * r,
            aliens_left: 4 * r,
            max_on_screen: 2 + r / 2,
            on_screen: 0,
        }
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn quota(&self) -> i32 {
        self.quota
    }

    pub fn aliens_left(&self) -> i32 {
        self.aliens_left
    }

    pub fn max_on_screen(&self) -> i32 {
        self.max_on_screen
    }

    pub fn on_screen(&self) -> i32 {
        self.on_screen
    }

    /// Room on screen, and more aliens still owed this round.
    pub fn wants_alien(&self) -> bool {
        self.on_screen < self.max_on_screen && self.aliens_left > self.on_screen
    }

    pub fn alien_spawned(&mut self) {
        self.on_screen += 1;
    }

    /// An alien left the field for good: shot down, rammed, or slipped
    /// past the bottom row.
    pub fn alien_removed(&mut self) {
        self.on_screen = (self.on_screen - 1).max(0);
        self.aliens_left -= 1;
    }

    /// Hands back one kill so a rammed alien does not count toward the quota.
    pub fn forgive_kill(&mut self) {
        self.aliens_left += 1;
    }

    pub fn is_cleared(&self) -> bool {
        self.aliens_left <= 0
    }

    pub fn advance(&mut self) {
        *self = Self::for_round(self.round + 1);
    }

    /// Same round, full quota again. Used after the player loses a life.
    pub fn restart(&mut self) {
        *self = Self::for_round(self.round);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, 4, 2)]
    #[case(2, 8, 3)]
    #[case(3, 12, 3)]
    #[case(4, 16, 4)]
    #[case(9, 36, 6)]
    fn budget_for_round(#[case] round: u32, #[case] quota: i32, #[case] cap: i32) {
        let progress = RoundProgress::for_round(round);
        assert_eq!(progress.quota(), quota);
        assert_eq!(progress.aliens_left(), quota);
        assert_eq!(progress.max_on_screen(), cap);
        assert_eq!(progress.on_screen(), 0);
    }

    #[test]
    fn spawning_stops_at_the_cap() {
        let mut progress = RoundProgress::for_round(1);
        progress.alien_spawned();
        assert!(progress.wants_alien());
        progress.alien_spawned();
        assert!(!progress.wants_alien());
    }

    #[test]
    fn spawning_stops_when_enough_aliens_are_out() {
        let mut progress = RoundProgress::for_round(1);
        for _ in 0..3 {
            progress.alien_spawned();
            progress.alien_removed();
        }
        // one alien left to kill
        progress.alien_spawned();
        assert_eq!(progress.aliens_left(), 1);
        assert!(!progress.wants_alien());
    }

    #[test]
    fn forgiven_kill_leaves_quota_unchanged() {
        let mut progress = RoundProgress::for_round(2);
        progress.alien_spawned();
        progress.forgive_kill();
        progress.alien_removed();
        assert_eq!(progress.aliens_left(), 8);
        assert_eq!(progress.on_screen(), 0);
    }

    #[test]
    fn advance_moves_to_next_budget() {
        let mut progress = RoundProgress::for_round(1);
        for _ in 0..4 {
            progress.alien_spawned();
            progress.alien_removed();
        }
        assert!(progress.is_cleared());
        progress.advance();
        assert_eq!(progress, RoundProgress::for_round(2));
    }

    #[test]
    fn on_screen_never_goes_negative() {
        let mut progress = RoundProgress::for_round(1);
        progress.alien_removed();
        assert_eq!(progress.on_screen(), 0);
        assert_eq!(progress.aliens_left(), 3);
    }
}
