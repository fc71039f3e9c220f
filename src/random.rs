/// Random draws used for every stochastic decision in the simulation.
///
/// The world only ever asks for uniform integers in a closed range, so the
/// trait is that one call plus two conveniences built on it. Production code
/// reseeds from entropy; tests inject a seeded `StdRng` or a `ScriptedRandom`.

use std::collections::VecDeque;

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

pub trait RandomSource {
    /// Uniform draw in `[min, max]`. Bounds may be given in either order.
    fn rand_int(&mut self, min: i32, max: i32) -> i32;

    /// `true` with probability `1 / n`. Any `n <= 1` always succeeds.
    fn one_in(&mut self, n: i32) -> bool {
        n <= 1 || self.rand_int(1, n) == 1
    }

    /// `true` with probability `percent / 100`.
    fn percent(&mut self, percent: u32) -> bool {
        self.rand_int(1, 100) <= percent.min(100) as i32
    }
}

/// Adapter from any `rand::Rng` to `RandomSource`.
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<ThreadRng> {
    /// Thread-local generator seeded from system entropy.
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng())
    }
}

impl RngSource<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn rand_int(&mut self, min: i32, max: i32) -> i32 {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        self.rng.gen_range(lo..=hi)
    }
}

/// Replays a fixed list of draws, clamping each into the requested range.
/// Once the list runs dry every draw returns the lower bound.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    draws: VecDeque<i32>,
}

impl ScriptedRandom {
    pub fn new(draws: impl IntoIterator<Item = i32>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.draws.len()
    }
}

impl RandomSource for ScriptedRandom {
    fn rand_int(&mut self, min: i32, max: i32) -> i32 {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        self.draws.pop_front().map_or(lo, |draw| draw.clamp(lo, hi))
    }
}
