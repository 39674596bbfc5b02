use rand::prelude::*;
use rand_distr::Uniform;

/// Where simulation draws come from.
pub trait DrawSource {
    /// A number in `1..=total_range`. `total_range` is at least 1.
    fn draw(&mut self, total_range: u32) -> u32;
}

/// Uniform integer draws from a `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    /// Reproducible source: the same seed yields the same batch.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> DrawSource for RngSource<R> {
    fn draw(&mut self, total_range: u32) -> u32 {
        Uniform::new_inclusive(1, total_range).sample(&mut self.rng)
    }
}

/// Replays a fixed list of numbers, wrapping around at the end.
///
/// An empty script draws 0, which no range owns.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDraws {
    numbers: Vec<u32>,
    next: usize,
}

impl ScriptedDraws {
    pub fn new(numbers: impl Into<Vec<u32>>) -> Self {
        Self {
            numbers: numbers.into(),
            next: 0,
        }
    }
}

impl DrawSource for ScriptedDraws {
    fn draw(&mut self, _total_range: u32) -> u32 {
        if self.numbers.is_empty() {
            return 0;
        }
        let number = self.numbers[self.next];
        self.next = (self.next + 1) % self.numbers.len();
        number
    }
}
