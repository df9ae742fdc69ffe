use crate::cards::{Card, Rank, Suit};
use rand::seq::{index, IndexedRandom};
use rand::Rng;

/// A set of distinct cards, starting from the standard 52-card deck.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// ```
    /// use genetic_poker::deck::Deck;
    ///
    /// let deck = Deck::standard();
    /// assert_eq!(deck.len(), 52);
    /// ```
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(52);
        for s in Suit::ALL {
            for r in Rank::ALL {
                cards.push(Card::new(r, s));
            }
        }
        Self { cards }
    }

    /// The standard deck minus every card in `held`. Holding five distinct
    /// cards always leaves 47.
    pub fn without(held: &[Card]) -> Self {
        Self::standard().excluding(held)
    }

    /// This deck minus every card in `held`.
    pub fn excluding(&self, held: &[Card]) -> Self {
        let cards = self.cards.iter().copied().filter(|c| !held.contains(c)).collect();
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    /// Sample up to `n` distinct cards without replacement. The deck itself is
    /// left untouched.
    pub fn deal<R: Rng + ?Sized>(&self, rng: &mut R, n: usize) -> Vec<Card> {
        let amount = n.min(self.cards.len());
        index::sample(rng, self.cards.len(), amount).into_iter().map(|i| self.cards[i]).collect()
    }

    /// Pick one card uniformly at random.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Card> {
        self.cards.choose(rng).copied()
    }
}
