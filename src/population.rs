use crate::evaluator::Fitness;
use crate::hand::{Hand, HandError};
use rand::Rng;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PopulationError {
    #[error("population must hold at least one hand")]
    Empty,
    #[error(transparent)]
    Hand(#[from] HandError),
}

/// One generation of hands. Never empty, never mutated in place: the next
/// generation is built alongside it and then replaces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Population {
    hands: Vec<Hand>,
}

impl Population {
    pub fn from_hands(hands: Vec<Hand>) -> Result<Self, PopulationError> {
        if hands.is_empty() {
            return Err(PopulationError::Empty);
        }
        Ok(Self { hands })
    }

    /// Deal `size` random hands, redealing any hand stronger than
    /// `max_fitness`.
    pub fn initial<R: Rng + ?Sized>(
        rng: &mut R,
        size: usize,
        max_fitness: Fitness,
    ) -> Result<Self, PopulationError> {
        let mut hands = Vec::with_capacity(size);
        while hands.len() < size {
            let hand = Hand::random(rng)?;
            if hand.fitness() <= max_fitness {
                hands.push(hand);
            }
        }
        Self::from_hands(hands)
    }

    pub fn len(&self) -> usize {
        self.hands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hands.is_empty()
    }

    pub fn hands(&self) -> &[Hand] {
        &self.hands
    }

    pub fn total_fitness(&self) -> u64 {
        self.hands.iter().map(|h| u64::from(h.score())).sum()
    }

    pub fn average_fitness(&self) -> f64 {
        self.total_fitness() as f64 / self.hands.len() as f64
    }

    /// The first hand holding the highest fitness.
    pub fn best(&self) -> &Hand {
        let mut best = &self.hands[0];
        for hand in &self.hands[1..] {
            if hand.score() > best.score() {
                best = hand;
            }
        }
        best
    }

    /// Roulette-wheel selection: a hand is picked with probability
    /// proportional to its fitness.
    ///
    /// Draws a target in `0..total + 1` and walks the hands until the running
    /// fitness reaches it. Falls back to the last hand if the walk comes up
    /// short.
    pub fn select<R: Rng + ?Sized>(&self, rng: &mut R) -> &Hand {
        let target = rng.random_range(0..self.total_fitness() + 1);
        let mut running = 0u64;
        for hand in &self.hands {
            running += u64::from(hand.score());
            if running >= target {
                return hand;
            }
        }
        log::trace!("selection walk fell short of {target}, taking the last hand");
        match self.hands.last() {
            Some(last) => last,
            None => unreachable!("populations are never empty"),
        }
    }
}
