use crate::cards::{parse_cards, Card};
use crate::deck::Deck;
use crate::evaluator::{evaluate_five, Fitness};
use core::fmt;
use rand::Rng;
use std::collections::HashSet;
use std::str::FromStr;

pub const HAND_SIZE: usize = 5;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HandError {
    #[error("expected exactly 5 cards, got {0}")]
    CardCount(usize),
    #[error("duplicate card in hand: {0}")]
    DuplicateCard(Card),
    #[error("card parse error: {0}")]
    CardParse(String),
    #[error("no card left to replace one in the hand")]
    NoReplacement,
}

/// Five distinct cards kept sorted ascending by rank, with their fitness
/// computed once at construction.
///
/// Hands never change after construction; mutation and crossover build new
/// hands.
///
/// ```
/// use genetic_poker::evaluator::Fitness;
/// use genetic_poker::hand::Hand;
///
/// let hand: Hand = "Kh 9h Jh Th Qh".parse().unwrap();
/// assert_eq!(hand.fitness(), Fitness::StraightFlush);
/// assert_eq!(
///     hand.to_string(),
///     "[9, Hearts][10, Hearts][Jack, Hearts][Queen, Hearts][King, Hearts]"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hand {
    cards: [Card; HAND_SIZE],
    fitness: Fitness,
}

impl Hand {
    /// Deal five distinct random cards from a full deck.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Result<Self, HandError> {
        Self::deal(&Deck::standard(), rng)
    }

    /// Deal five distinct cards from `deck`, which must hold at least five.
    pub fn deal<R: Rng + ?Sized>(deck: &Deck, rng: &mut R) -> Result<Self, HandError> {
        let dealt = deck.deal(rng, HAND_SIZE);
        let cards = <[Card; HAND_SIZE]>::try_from(dealt)
            .map_err(|short| HandError::CardCount(short.len()))?;
        Ok(Self::from_cards(cards))
    }

    /// Sort and score the given cards. Distinctness is the caller's
    /// responsibility; use [`Hand::try_from_slice`] for untrusted input.
    pub fn from_cards(mut cards: [Card; HAND_SIZE]) -> Self {
        // stable: equal ranks keep the order they were placed in
        cards.sort_by_key(|c| c.rank());
        let fitness = evaluate_five(&cards);
        Self { cards, fitness }
    }

    pub fn try_from_slice(slice: &[Card]) -> Result<Self, HandError> {
        let cards: [Card; HAND_SIZE] =
            slice.try_into().map_err(|_| HandError::CardCount(slice.len()))?;
        let mut seen = HashSet::with_capacity(HAND_SIZE);
        for card in cards {
            if !seen.insert(card) {
                return Err(HandError::DuplicateCard(card));
            }
        }
        Ok(Self::from_cards(cards))
    }

    pub fn cards(&self) -> &[Card; HAND_SIZE] {
        &self.cards
    }

    /// Independent copy of the cards.
    pub fn as_array(&self) -> [Card; HAND_SIZE] {
        self.cards
    }

    pub fn fitness(&self) -> Fitness {
        self.fitness
    }

    pub fn score(&self) -> u32 {
        self.fitness.score()
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    /// Replace one uniformly chosen card with a random card not already in the
    /// hand.
    pub fn mutate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Hand, HandError> {
        self.mutate_within(&Deck::standard(), rng)
    }

    /// Like [`Hand::mutate`], drawing the replacement from the cards of `deck`
    /// the hand does not hold. Fails when there are none.
    pub fn mutate_within<R: Rng + ?Sized>(&self, deck: &Deck, rng: &mut R) -> Result<Hand, HandError> {
        let candidates = deck.excluding(&self.cards);
        let replacement = candidates.choose(rng).ok_or(HandError::NoReplacement)?;
        let slot = rng.random_range(0..HAND_SIZE);
        let mut cards = self.cards;
        cards[slot] = replacement;
        Ok(Hand::from_cards(cards))
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for card in &self.cards {
            write!(f, "{card}")?;
        }
        Ok(())
    }
}

impl FromStr for Hand {
    type Err = HandError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = parse_cards(s).map_err(|e| HandError::CardParse(e.to_string()))?;
        Self::try_from_slice(&cards)
    }
}
