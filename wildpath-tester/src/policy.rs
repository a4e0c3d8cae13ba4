//! Choice policies for headless playthroughs.

use clap::ValueEnum;
use rand::Rng;
use wildpath_game::Scenario;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ChoicePolicy {
    /// Always pick the choice with the highest health impact.
    Best,
    /// Always pick the choice with the lowest health impact.
    Worst,
    /// Pick uniformly at random (seeded, reproducible).
    Random,
}

impl ChoicePolicy {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Best => "best",
            Self::Worst => "worst",
            Self::Random => "random",
        }
    }

    /// Index of the choice to submit for `scenario`. Ties resolve to
    /// the earliest choice so runs stay deterministic.
    pub fn pick<R: Rng>(self, scenario: &Scenario, rng: &mut R) -> usize {
        let ranked = scenario
            .choices
            .iter()
            .enumerate()
            .map(|(idx, choice)| (idx, choice.impact.health));
        match self {
            Self::Best => ranked
                .max_by_key(|&(idx, health)| (health, std::cmp::Reverse(idx)))
                .map_or(0, |(idx, _)| idx),
            Self::Worst => ranked
                .min_by_key(|&(idx, health)| (health, idx))
                .map_or(0, |(idx, _)| idx),
            Self::Random => rng.gen_range(0..scenario.choices.len().max(1)),
        }
    }
}
