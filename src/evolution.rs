//! The evolutionary loop: breeding, reporting and termination.
//!
//! Each generation is reported, then a new population is bred from it:
//! crossover children first, then mutants, then unchanged copies of selected
//! parents. All parents are picked by roulette-wheel selection over the
//! current population, which stays read-only until the new one replaces it.

use crate::cards::Card;
use crate::evaluator::Fitness;
use crate::hand::{Hand, HandError, HAND_SIZE};
use crate::population::{Population, PopulationError};
use core::fmt;
use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::io::Write;

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum EvolutionError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Population(#[from] PopulationError),
    #[error(transparent)]
    Hand(#[from] HandError),
    #[error("crossover cut point {0} leaves no room for the second parent")]
    InvalidCutPoint(usize),
    #[error("crossover ran out of cards from the second parent")]
    CrossoverExhausted,
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

/// Tunables for a run. Defaults reproduce the classic setup: 100 hands, 80%
/// crossover, 10% mutation, 10% copies, stop once the average fitness
/// exceeds 270 or after 200 generations.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct EvolutionConfig {
    pub population_size: usize,
    pub crossover_percent: usize,
    pub mutation_percent: usize,
    pub target_average: f64,
    pub max_generations: u32,
    /// Starting hands stronger than this are redealt.
    pub initial_max_fitness: Fitness,
    pub rng_seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            crossover_percent: 80,
            mutation_percent: 10,
            target_average: 270.0,
            max_generations: 200,
            initial_max_fitness: Fitness::OnePair,
            rng_seed: None,
        }
    }
}

impl EvolutionConfig {
    /// Set a deterministic RNG seed for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    pub fn with_max_generations(mut self, generations: u32) -> Self {
        self.max_generations = generations;
        self
    }

    pub fn with_target_average(mut self, target: f64) -> Self {
        self.target_average = target;
        self
    }

    pub fn with_shares(mut self, crossover_percent: usize, mutation_percent: usize) -> Self {
        self.crossover_percent = crossover_percent;
        self.mutation_percent = mutation_percent;
        self
    }

    pub fn validate(&self) -> Result<(), EvolutionError> {
        if self.population_size == 0 {
            return Err(EvolutionError::InvalidConfig("population size must be positive".into()));
        }
        let bred = self.crossover_percent.checked_add(self.mutation_percent);
        if bred.map_or(true, |percent| percent > 100) {
            return Err(EvolutionError::InvalidConfig(format!(
                "crossover ({}%) and mutation ({}%) exceed 100%",
                self.crossover_percent, self.mutation_percent
            )));
        }
        if self.max_generations == 0 {
            return Err(EvolutionError::InvalidConfig("at least one generation is required".into()));
        }
        Ok(())
    }

    /// End indices of the crossover and mutation blocks; the rest are copies.
    fn partition(&self) -> (usize, usize) {
        let n = self.population_size;
        let share = |percent: usize| ((n * percent + 99) / 100).min(n);
        (share(self.crossover_percent), share(self.crossover_percent + self.mutation_percent))
    }
}

/// Build a child's cards from two parents.
///
/// Positions `0..=cut` come from `a` unchanged. The remaining positions are
/// filled from the last position backwards with `b`'s cards, also taken from
/// the back, skipping any card the child already holds. `cut` must be below
/// 4 so `b` always contributes at least one card.
///
/// ```
/// use genetic_poker::evolution::crossover_cards;
/// use genetic_poker::hand::Hand;
///
/// let a: Hand = "2c 4d 6h 8s Tc".parse().unwrap();
/// let b: Hand = "3c 5d 7h 9s Jc".parse().unwrap();
/// let child = crossover_cards(&a, &b, 1).unwrap();
/// assert_eq!(Hand::from_cards(child).to_string(), "[2, Clubs][4, Diamonds][7, Hearts][9, Spades][Jack, Clubs]");
/// ```
pub fn crossover_cards(a: &Hand, b: &Hand, cut: usize) -> Result<[Card; HAND_SIZE], EvolutionError> {
    if cut >= HAND_SIZE - 1 {
        return Err(EvolutionError::InvalidCutPoint(cut));
    }
    let mut child = a.as_array();
    let mut donors = b.cards().iter().rev().copied();
    for slot in (cut + 1..HAND_SIZE).rev() {
        let card = donors
            .by_ref()
            .find(|c| !child[..=cut].contains(c) && !child[slot + 1..].contains(c))
            .ok_or(EvolutionError::CrossoverExhausted)?;
        child[slot] = card;
    }
    Ok(child)
}

/// Cross two parents at a cut point drawn uniformly from 0..=3.
pub fn crossover<R: Rng + ?Sized>(a: &Hand, b: &Hand, rng: &mut R) -> Result<Hand, EvolutionError> {
    let cut = rng.random_range(0..HAND_SIZE - 1);
    crossover_cards(a, b, cut).map(Hand::from_cards)
}

/// Statistics printed for one generation.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationReport {
    pub generation: u32,
    pub average_fitness: f64,
    pub best: Hand,
}

impl GenerationReport {
    pub fn from_population(generation: u32, population: &Population) -> Self {
        Self {
            generation,
            average_fitness: population.average_fitness(),
            best: population.best().clone(),
        }
    }
}

impl fmt::Display for GenerationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "GENERATION {}", self.generation)?;
        // Debug keeps the fractional part on whole numbers ("2.0", not "2")
        writeln!(f, "Average Fitness: {:?}", self.average_fitness)?;
        write!(f, "Best Hand: {}", self.best)
    }
}

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StopReason {
    TargetReached,
    GenerationLimit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Number of generations reported.
    pub generations: u32,
    pub reason: StopReason,
    /// Average fitness of the population left after the last breeding step.
    pub final_average: f64,
}

/// Drives a population through successive generations.
#[derive(Debug)]
pub struct Evolution<R = ChaCha8Rng> {
    config: EvolutionConfig,
    rng: R,
    population: Population,
    generation: u32,
}

impl Evolution<ChaCha8Rng> {
    /// Seed from the config, or from the thread RNG when no seed is set.
    pub fn new(config: EvolutionConfig) -> Result<Self, EvolutionError> {
        let seed = config.rng_seed.unwrap_or_else(|| rand::rng().random());
        info!("seeding evolution with {seed}");
        Self::with_rng(config, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> Evolution<R> {
    pub fn with_rng(config: EvolutionConfig, mut rng: R) -> Result<Self, EvolutionError> {
        config.validate()?;
        let population =
            Population::initial(&mut rng, config.population_size, config.initial_max_fitness)?;
        Ok(Self { config, rng, population, generation: 1 })
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    /// Number of the generation currently held (starts at 1).
    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn report(&self) -> GenerationReport {
        GenerationReport::from_population(self.generation, &self.population)
    }

    /// Report the current generation, then replace it with its offspring.
    pub fn step(&mut self) -> Result<GenerationReport, EvolutionError> {
        let report = self.report();
        debug!(
            "generation {}: average {:.2}, best {}",
            report.generation,
            report.average_fitness,
            report.best.fitness()
        );
        let next = breed(&self.population, &self.config, &mut self.rng)?;
        self.population = next;
        self.generation += 1;
        Ok(report)
    }

    /// Checked after each step against the freshly bred population.
    pub fn stop_reason(&self) -> Option<StopReason> {
        if self.population.average_fitness() > self.config.target_average {
            Some(StopReason::TargetReached)
        } else if self.generation > self.config.max_generations {
            Some(StopReason::GenerationLimit)
        } else {
            None
        }
    }

    /// Step until a stop condition holds, writing one report block per
    /// generation to `out`.
    pub fn run<W: Write>(&mut self, out: &mut W) -> Result<RunSummary, EvolutionError> {
        info!(
            "evolving {} hands for at most {} generations",
            self.population.len(),
            self.config.max_generations
        );
        loop {
            let report = self.step()?;
            writeln!(out, "{report}")?;
            if let Some(reason) = self.stop_reason() {
                let summary = RunSummary {
                    generations: report.generation,
                    reason,
                    final_average: self.population.average_fitness(),
                };
                info!(
                    "stopped after {} generations ({:?}), final average {:.2}",
                    summary.generations, summary.reason, summary.final_average
                );
                return Ok(summary);
            }
        }
    }
}

fn breed<R: Rng + ?Sized>(
    current: &Population,
    config: &EvolutionConfig,
    rng: &mut R,
) -> Result<Population, EvolutionError> {
    let (crossover_end, mutation_end) = config.partition();
    let mut next = Vec::with_capacity(current.len());
    for i in 0..current.len() {
        let child = if i < crossover_end {
            let a = current.select(rng);
            let b = current.select(rng);
            crossover(a, b, rng)?
        } else if i < mutation_end {
            current.select(rng).mutate(rng)?
        } else {
            current.select(rng).clone()
        };
        next.push(child);
    }
    Ok(Population::from_hands(next)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn hand(s: &str) -> Hand {
        s.parse().expect("valid hand")
    }

    #[test]
    fn default_partition_is_80_10_10() {
        assert_eq!(EvolutionConfig::default().partition(), (80, 90));
    }

    #[test]
    fn partition_rounds_up_like_a_fractional_bound() {
        let config = EvolutionConfig::default().with_population_size(7);
        // i < 7 * 0.8 covers 0..6, i < 7 * 0.9 covers 0..7
        assert_eq!(config.partition(), (6, 7));
    }

    #[test]
    fn validate_rejects_bad_configs() {
        assert!(EvolutionConfig::default().validate().is_ok());
        let empty = EvolutionConfig::default().with_population_size(0);
        assert!(matches!(empty.validate(), Err(EvolutionError::InvalidConfig(_))));
        let too_much = EvolutionConfig::default().with_shares(90, 20);
        assert!(matches!(too_much.validate(), Err(EvolutionError::InvalidConfig(_))));
        let no_generations = EvolutionConfig::default().with_max_generations(0);
        assert!(matches!(no_generations.validate(), Err(EvolutionError::InvalidConfig(_))));
    }

    #[test]
    fn validate_rejects_overflowing_shares() {
        let config = EvolutionConfig::default().with_shares(usize::MAX, 1);
        assert!(matches!(config.validate(), Err(EvolutionError::InvalidConfig(_))));
        let config = EvolutionConfig::default().with_shares(101, 0);
        assert!(matches!(config.validate(), Err(EvolutionError::InvalidConfig(_))));
        assert!(EvolutionConfig::default().with_shares(100, 0).validate().is_ok());
    }

    #[test]
    fn crossover_cut_zero_keeps_first_card_of_a() {
        let a = hand("2c 4d 6h 8s Tc");
        let b = hand("3c 5d 7h 9s Jc");
        let child = crossover_cards(&a, &b, 0).unwrap();
        assert_eq!(child[0], a.cards()[0]);
        // the rest come from the back of b
        assert_eq!(&child[1..], &b.cards()[1..]);
    }

    #[test]
    fn crossover_skips_cards_already_held() {
        let a = hand("2c 4d 6h 8s Tc");
        let b = hand("3c 4d 5d 6h 8s");
        // a keeps 2c 4d 6h; b gives 8s, then 6h collides and 5d takes its place
        let child = crossover_cards(&a, &b, 2).unwrap();
        let set: HashSet<Card> = child.iter().copied().collect();
        assert_eq!(set.len(), HAND_SIZE);
        assert_eq!(&child[..3], &a.cards()[..3]);
        assert_eq!(child[4], "8s".parse::<Card>().unwrap());
        assert_eq!(child[3], "5d".parse::<Card>().unwrap());
    }

    #[test]
    fn crossover_of_identical_parents_reproduces_the_parent() {
        let a = hand("2c 4d 6h 8s Tc");
        for cut in 0..4 {
            let child = crossover_cards(&a, &a, cut).unwrap();
            assert_eq!(Hand::from_cards(child), a);
        }
    }

    #[test]
    fn crossover_always_completes_for_legal_parents() {
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        for _ in 0..2000 {
            let a = Hand::random(&mut rng).unwrap();
            let b = Hand::random(&mut rng).unwrap();
            let child = crossover(&a, &b, &mut rng).unwrap();
            let set: HashSet<Card> = child.cards().iter().copied().collect();
            assert_eq!(set.len(), HAND_SIZE);
            assert!(child.cards().iter().all(|c| a.contains(*c) || b.contains(*c)));
        }
    }

    #[test]
    fn crossover_rejects_cut_point_four() {
        let a = hand("2c 4d 6h 8s Tc");
        assert!(matches!(crossover_cards(&a, &a, 4), Err(EvolutionError::InvalidCutPoint(4))));
    }

    #[test]
    fn report_renders_three_lines() {
        let pop = Population::from_hands(vec![hand("2c 2d 8h Js Kc"), hand("2h 5d 8c Js Kc")])
            .unwrap();
        let report = GenerationReport::from_population(3, &pop);
        assert_eq!(
            report.to_string(),
            "GENERATION 3\nAverage Fitness: 1.5\nBest Hand: [2, Clubs][2, Diamonds][8, Hearts][Jack, Spades][King, Clubs]"
        );
    }

    #[test]
    fn whole_number_average_keeps_decimal_point() {
        let pop = Population::from_hands(vec![hand("2c 2d 8h Js Kc")]).unwrap();
        let report = GenerationReport::from_population(1, &pop);
        assert!(report.to_string().contains("Average Fitness: 2.0\n"));
    }

    #[test]
    fn step_advances_and_keeps_size() {
        let config = EvolutionConfig::default().with_seed(5);
        let mut evo = Evolution::new(config).unwrap();
        assert_eq!(evo.generation(), 1);
        assert!(evo.population().hands().iter().all(|h| h.score() <= 2));
        let report = evo.step().unwrap();
        assert_eq!(report.generation, 1);
        assert_eq!(evo.generation(), 2);
        assert_eq!(evo.population().len(), 100);
    }

    #[test]
    fn same_seed_same_run() {
        let run = |seed| {
            let mut evo = Evolution::new(EvolutionConfig::default().with_seed(seed)).unwrap();
            let mut out = Vec::new();
            let summary = evo.run(&mut out).unwrap();
            (summary, out)
        };
        assert_eq!(run(9), run(9));
    }

    #[test]
    fn generation_limit_stops_the_run() {
        let config =
            EvolutionConfig::default().with_seed(1).with_max_generations(3).with_target_average(1e9);
        let mut evo = Evolution::new(config).unwrap();
        let mut out = Vec::new();
        let summary = evo.run(&mut out).unwrap();
        assert_eq!(summary.generations, 3);
        assert_eq!(summary.reason, StopReason::GenerationLimit);
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("GENERATION").count(), 3);
    }

    #[test]
    fn average_equal_to_target_keeps_running() {
        let mut first = Evolution::new(EvolutionConfig::default().with_seed(5)).unwrap();
        first.step().unwrap();
        let reached = first.population().average_fitness();

        let config = EvolutionConfig::default().with_seed(5).with_target_average(reached);
        let mut stepped = Evolution::new(config.clone()).unwrap();
        stepped.step().unwrap();
        assert_eq!(stepped.population().average_fitness(), reached);
        assert_eq!(stepped.stop_reason(), None);

        let mut evo = Evolution::new(config).unwrap();
        let mut out = Vec::new();
        let summary = evo.run(&mut out).unwrap();
        assert!(summary.generations > 1);
    }

    #[test]
    fn low_target_stops_after_first_generation() {
        let config = EvolutionConfig::default().with_seed(2).with_target_average(0.0);
        let mut evo = Evolution::new(config).unwrap();
        let mut out = Vec::new();
        let summary = evo.run(&mut out).unwrap();
        assert_eq!(summary.generations, 1);
        assert_eq!(summary.reason, StopReason::TargetReached);
    }
}
