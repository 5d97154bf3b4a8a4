use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const DIE_MIN: u32 = 1;
pub const DIE_MAX: u32 = 6;

/// Source of every random draw the game makes: battle dice, mission draws and
/// starting troop counts.
pub trait Dice {
    /// One roll of a six-sided die, in `DIE_MIN..=DIE_MAX`.
    fn roll(&mut self) -> u32;

    /// A uniform index in `0..n`. `n` is never zero.
    fn pick(&mut self, n: usize) -> usize;
}

#[derive(Debug, Clone)]
pub struct RandomDice<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomDice<R> {
    pub fn new(rng: R) -> Self {
        RandomDice { rng }
    }
}

impl RandomDice<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> Dice for RandomDice<R> {
    fn roll(&mut self) -> u32 {
        self.rng.gen_range(DIE_MIN..=DIE_MAX)
    }

    fn pick(&mut self, n: usize) -> usize {
        self.rng.gen_range(0..n.max(1))
    }
}

/*
 * Dice that replay fixed sequences. Rolls and picks cycle once exhausted; an
 * empty roll script behaves like a die that always shows DIE_MIN and an empty
 * pick script always picks index 0.
 */
#[derive(Debug, Clone, Default)]
pub struct LoadedDice {
    rolls: Vec<u32>,
    picks: Vec<usize>,
    next_roll: usize,
    next_pick: usize,
}

impl LoadedDice {
    pub fn new(rolls: &[u32]) -> Self {
        LoadedDice {
            rolls: rolls.to_vec(),
            ..Default::default()
        }
    }

    pub fn with_picks(mut self, picks: &[usize]) -> Self {
        self.picks = picks.to_vec();
        self
    }
}

impl Dice for LoadedDice {
    fn roll(&mut self) -> u32 {
        if self.rolls.is_empty() {
            return DIE_MIN;
        }
        let value = self.rolls[self.next_roll % self.rolls.len()];
        self.next_roll += 1;
        value.clamp(DIE_MIN, DIE_MAX)
    }

    fn pick(&mut self, n: usize) -> usize {
        if self.picks.is_empty() || n == 0 {
            return 0;
        }
        let value = self.picks[self.next_pick % self.picks.len()];
        self.next_pick += 1;
        value % n
    }
}
