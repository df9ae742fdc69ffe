pub(crate) mod rank_groups;
pub(crate) mod straight_info;
pub(crate) mod suit_info;

use crate::cards::{Card, Rank};
use core::fmt;
use rank_groups::{Pairing, RankRuns};
use straight_info::StraightInfo;
use suit_info::SuitInfo;

/// Fitness of a five-card hand, from weakest to strongest.
///
/// Each category doubles the score of the one below it, so the score works
/// directly as a selection weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[non_exhaustive]
#[repr(u16)]
pub enum Fitness {
    HighCard = 1,
    OnePair = 2,
    TwoPair = 4,
    ThreeOfAKind = 8,
    Straight = 16,
    Flush = 32,
    FullHouse = 64,
    FourOfAKind = 128,
    StraightFlush = 256,
    RoyalFlush = 512,
}

impl Fitness {
    pub const ALL: [Fitness; 10] = [
        Fitness::HighCard,
        Fitness::OnePair,
        Fitness::TwoPair,
        Fitness::ThreeOfAKind,
        Fitness::Straight,
        Fitness::Flush,
        Fitness::FullHouse,
        Fitness::FourOfAKind,
        Fitness::StraightFlush,
        Fitness::RoyalFlush,
    ];

    pub const fn score(self) -> u32 {
        self as u32
    }

    pub fn label(self) -> &'static str {
        match self {
            Fitness::HighCard => "High Card",
            Fitness::OnePair => "One Pair",
            Fitness::TwoPair => "Two Pair",
            Fitness::ThreeOfAKind => "Three of a Kind",
            Fitness::Straight => "Straight",
            Fitness::Flush => "Flush",
            Fitness::FullHouse => "Full House",
            Fitness::FourOfAKind => "Four of a Kind",
            Fitness::StraightFlush => "Straight Flush",
            Fitness::RoyalFlush => "Royal Flush",
        }
    }
}

impl fmt::Display for Fitness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label(), self.score())
    }
}

/// Evaluate five cards already sorted ascending by rank.
///
/// The first matching category wins, strongest first. Straights need five
/// consecutive ranks with Ace high only.
///
/// ```
/// use genetic_poker::cards::parse_cards;
/// use genetic_poker::evaluator::{evaluate_five, Fitness};
///
/// let cards = parse_cards("Ts Js Qs Ks As").unwrap();
/// let sorted: [_; 5] = cards.try_into().unwrap();
/// assert_eq!(evaluate_five(&sorted), Fitness::RoyalFlush);
/// assert_eq!(evaluate_five(&sorted).score(), 512);
/// ```
pub fn evaluate_five(sorted: &[Card; 5]) -> Fitness {
    let ranks = sorted.map(Card::rank);
    let suits = SuitInfo::detect(sorted);
    let straight = StraightInfo::detect(&ranks);
    let pairing = RankRuns::scan(&ranks).pairing();

    if suits.is_flush && straight.is_straight && straight.top_rank == Some(Rank::Ace) {
        return Fitness::RoyalFlush;
    }
    if suits.is_flush && straight.is_straight {
        return Fitness::StraightFlush;
    }
    match pairing {
        Pairing::FourOfAKind => return Fitness::FourOfAKind,
        Pairing::FullHouse => return Fitness::FullHouse,
        _ => {}
    }
    if suits.is_flush {
        return Fitness::Flush;
    }
    if straight.is_straight {
        return Fitness::Straight;
    }
    match pairing {
        Pairing::ThreeOfAKind => Fitness::ThreeOfAKind,
        Pairing::TwoPair => Fitness::TwoPair,
        Pairing::OnePair => Fitness::OnePair,
        _ => Fitness::HighCard,
    }
}
