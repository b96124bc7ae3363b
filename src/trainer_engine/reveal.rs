use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::trainer_engine::models::Side;

/// Source of the color revealed after each guess.
///
/// The draw never sees the player's guess.
pub trait OutcomeSource {
    fn reveal(&mut self) -> Side;
}

/// RNG-backed source: blue with probability `blue_bias`, red otherwise.
pub struct RandomReveal {
    rng: StdRng,
    blue_bias: f64,
}

impl RandomReveal {
    /// `Some(seed)` replays the same color sequence every run.
    /// `blue_bias` is expected to be validated already (see `TrainerSettings::validate`).
    pub fn new(rng_seed: Option<u64>, blue_bias: f64) -> Self {
        let rng = match rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None       => StdRng::from_entropy(),
        };
        let blue_bias = if blue_bias.is_nan() { 0.5 } else { blue_bias.clamp(0.0, 1.0) };
        RandomReveal { rng, blue_bias }
    }
}

impl OutcomeSource for RandomReveal {
    fn reveal(&mut self) -> Side {
        if self.rng.gen_bool(self.blue_bias) { Side::Blue } else { Side::Red }
    }
}

impl<F: FnMut() -> Side> OutcomeSource for F {
    fn reveal(&mut self) -> Side {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_reveals_same_sequence() {
        let draw = |seed| {
            let mut src = RandomReveal::new(Some(seed), 0.5);
            (0..32).map(|_| src.reveal()).collect::<Vec<_>>()
        };
        assert_eq!(draw(7), draw(7));
    }

    #[test]
    fn bias_extremes_are_deterministic() {
        let mut always_blue = RandomReveal::new(Some(1), 1.0);
        let mut always_red = RandomReveal::new(Some(1), 0.0);
        for _ in 0..50 {
            assert_eq!(always_blue.reveal(), Side::Blue);
            assert_eq!(always_red.reveal(), Side::Red);
        }
    }

    #[test]
    fn fair_source_produces_both_colors() {
        let mut src = RandomReveal::new(Some(42), 0.5);
        let blues = (0..1000).filter(|_| src.reveal() == Side::Blue).count();
        assert!((350..=650).contains(&blues), "suspicious blue count {blues}");
    }
}
