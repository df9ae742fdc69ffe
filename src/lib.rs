//! genetic-poker: evolving five-card poker hands with a genetic algorithm
//!
//! A population of random, weak hands is scored by poker category and bred
//! generation after generation through fitness-weighted selection, crossover
//! and mutation until the average fitness clears a target or a generation cap
//! is hit.
//!
//! - Hands are plain values: every change builds a new, sorted, scored hand
//! - All randomness flows through a caller-supplied `rand::Rng`, so runs can
//!   be made deterministic with a seed
//!
//! ## Quick start: score a hand
//! ```
//! use genetic_poker::evaluator::Fitness;
//! use genetic_poker::hand::Hand;
//!
//! let hand: Hand = "2c 2d 2h 9s 9c".parse().unwrap();
//! assert_eq!(hand.fitness(), Fitness::FullHouse);
//! assert_eq!(hand.score(), 64);
//! ```
//!
//! ## Quick start: run a short, seeded evolution
//! ```
//! use genetic_poker::evolution::{Evolution, EvolutionConfig};
//!
//! let config = EvolutionConfig::default().with_seed(7).with_max_generations(5);
//! let mut evolution = Evolution::new(config).unwrap();
//! let mut out = Vec::new();
//! let summary = evolution.run(&mut out).unwrap();
//! assert!(summary.generations <= 5);
//! ```
//!
//! ## Binary
//! Run the full evolution and print one report per generation with:
//! ```sh
//! cargo run --bin genetic-poker
//! ```

pub mod cards;
pub mod deck;
pub mod evaluator;
pub mod evolution;
pub mod hand;
pub mod population;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
