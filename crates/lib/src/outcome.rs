//! Bet outcome sources.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// Result of a single bet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Lose,
}

/// Draws one outcome per bet.
pub trait OutcomeSource {
    fn sample_outcome(&mut self) -> Outcome;
}

impl<S: OutcomeSource + ?Sized> OutcomeSource for Box<S> {
    fn sample_outcome(&mut self) -> Outcome {
        (**self).sample_outcome()
    }
}

/// Uniform coin flip over {Win, Lose}. Not cryptographic.
#[derive(Debug, Clone)]
pub struct RandomOutcomes {
    rng: StdRng,
}

impl RandomOutcomes {
    /// Seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic sequence for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seeded when `seed` is set, from entropy otherwise.
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => Self::seeded(s),
            None => Self::from_entropy(),
        }
    }
}

impl OutcomeSource for RandomOutcomes {
    fn sample_outcome(&mut self) -> Outcome {
        if self.rng.gen_bool(0.5) {
            Outcome::Win
        } else {
            Outcome::Lose
        }
    }
}

/// Replays a fixed sequence of outcomes, then keeps answering `Lose`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedOutcomes {
    script: VecDeque<Outcome>,
    draws: usize,
}

impl ScriptedOutcomes {
    pub fn new(script: impl IntoIterator<Item = Outcome>) -> Self {
        Self {
            script: script.into_iter().collect(),
            draws: 0,
        }
    }

    /// Parse a script such as `"wlw"` or `"win,lose"`. Unknown characters are rejected.
    pub fn parse(script: &str) -> Option<Self> {
        let mut outcomes = Vec::new();
        for token in script
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
        {
            match token.to_ascii_lowercase().as_str() {
                "win" => outcomes.push(Outcome::Win),
                "lose" => outcomes.push(Outcome::Lose),
                letters => {
                    for c in letters.chars() {
                        match c {
                            'w' => outcomes.push(Outcome::Win),
                            'l' => outcomes.push(Outcome::Lose),
                            _ => return None,
                        }
                    }
                }
            }
        }
        Some(Self::new(outcomes))
    }

    /// Number of outcomes drawn so far.
    pub fn draws(&self) -> usize {
        self.draws
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl OutcomeSource for ScriptedOutcomes {
    fn sample_outcome(&mut self) -> Outcome {
        self.draws += 1;
        self.script.pop_front().unwrap_or(Outcome::Lose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_sources_repeat() {
        let mut a = RandomOutcomes::seeded(7);
        let mut b = RandomOutcomes::seeded(7);
        let xs: Vec<_> = (0..32).map(|_| a.sample_outcome()).collect();
        let ys: Vec<_> = (0..32).map(|_| b.sample_outcome()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn random_source_produces_both_outcomes() {
        let mut src = RandomOutcomes::seeded(42);
        let wins = (0..1000)
            .filter(|_| src.sample_outcome() == Outcome::Win)
            .count();
        assert!(wins > 400 && wins < 600, "wins = {}", wins);
    }

    #[test]
    fn scripted_replays_then_loses() {
        let mut src = ScriptedOutcomes::new([Outcome::Win, Outcome::Lose, Outcome::Win]);
        assert_eq!(src.sample_outcome(), Outcome::Win);
        assert_eq!(src.sample_outcome(), Outcome::Lose);
        assert_eq!(src.sample_outcome(), Outcome::Win);
        assert_eq!(src.sample_outcome(), Outcome::Lose);
        assert_eq!(src.draws(), 4);
    }

    #[test]
    fn parse_accepts_letters_and_words() {
        let src = ScriptedOutcomes::parse("wl, win lose").expect("valid script");
        assert_eq!(src.remaining(), 4);
        assert!(ScriptedOutcomes::parse("wxl").is_none());
        assert_eq!(ScriptedOutcomes::parse("").map(|s| s.remaining()), Some(0));
    }
}
