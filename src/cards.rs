use std::fmt;
use std::str::FromStr;

/// Card ranks from Two (low) to Ace (high). Ace is always high.
///
/// The discriminant is the rank index used throughout the crate: 0 for Two up
/// to 12 for Ace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Rank {
    Two = 0,
    Three = 1,
    Four = 2,
    Five = 3,
    Six = 4,
    Seven = 5,
    Eight = 6,
    Nine = 7,
    Ten = 8,
    Jack = 9,
    Queen = 10,
    King = 11,
    Ace = 12,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    pub const fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Option<Rank> {
        Rank::ALL.get(index as usize).copied()
    }

    /// Name used in generation reports.
    pub const fn name(self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "Jack",
            Rank::Queen => "Queen",
            Rank::King => "King",
            Rank::Ace => "Ace",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RankParseError {
    #[error("invalid rank: '{0}'")]
    Invalid(String),
}

impl FromStr for Rank {
    type Err = RankParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        let r = match upper.as_str() {
            "2" => Rank::Two,
            "3" => Rank::Three,
            "4" => Rank::Four,
            "5" => Rank::Five,
            "6" => Rank::Six,
            "7" => Rank::Seven,
            "8" => Rank::Eight,
            "9" => Rank::Nine,
            "10" | "T" => Rank::Ten,
            "J" | "JACK" => Rank::Jack,
            "Q" | "QUEEN" => Rank::Queen,
            "K" | "KING" => Rank::King,
            "A" | "ACE" => Rank::Ace,
            _ => return Err(RankParseError::Invalid(s.to_string())),
        };
        Ok(r)
    }
}

/// Four suits. Stored with codes 1..=4; code 0 is never produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Suit {
    Clubs = 1,
    Diamonds = 2,
    Hearts = 3,
    Spades = 4,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    pub const fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Suit> {
        match code {
            1 => Some(Suit::Clubs),
            2 => Some(Suit::Diamonds),
            3 => Some(Suit::Hearts),
            4 => Some(Suit::Spades),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Suit::Clubs => "Clubs",
            Suit::Diamonds => "Diamonds",
            Suit::Hearts => "Hearts",
            Suit::Spades => "Spades",
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SuitParseError {
    #[error("invalid suit: '{0}'")]
    Invalid(String),
}

impl FromStr for Suit {
    type Err = SuitParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "c" | "clubs" => Ok(Suit::Clubs),
            "d" | "diamonds" => Ok(Suit::Diamonds),
            "h" | "hearts" => Ok(Suit::Hearts),
            "s" | "spades" => Ok(Suit::Spades),
            _ => Err(SuitParseError::Invalid(s.to_string())),
        }
    }
}

impl TryFrom<char> for Suit {
    type Error = SuitParseError;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_lowercase() {
            'c' => Ok(Suit::Clubs),
            'd' => Ok(Suit::Diamonds),
            'h' => Ok(Suit::Hearts),
            's' => Ok(Suit::Spades),
            _ => Err(SuitParseError::Invalid(c.to_string())),
        }
    }
}

/// A playing card: rank + suit. Two cards are the same card only when both
/// rank and suit match.
///
/// ```
/// use genetic_poker::cards::{Card, Rank, Suit};
///
/// let card = Card::new(Rank::Ace, Suit::Spades);
/// assert_eq!(card.to_string(), "[Ace, Spades]");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    pub const fn rank(self) -> Rank {
        self.rank
    }
    pub const fn suit(self) -> Suit {
        self.suit
    }

    /// Position of this card in a standard deck, 0..52 (suit-major).
    pub const fn index(self) -> usize {
        (self.suit.code() as usize - 1) * 13 + self.rank.index() as usize
    }

    pub fn from_index(index: usize) -> Option<Card> {
        let suit = Suit::from_code(u8::try_from(index / 13 + 1).ok()?)?;
        let rank = Rank::from_index(u8::try_from(index % 13).ok()?)?;
        Some(Card::new(rank, suit))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.rank, self.suit)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CardParseError {
    #[error("invalid card: '{0}'")]
    Invalid(String),
    #[error(transparent)]
    Rank(#[from] RankParseError),
    #[error(transparent)]
    Suit(#[from] SuitParseError),
}

impl FromStr for Card {
    type Err = CardParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        // rank is everything but the last char; suit is the last char
        let mut chars = t.chars();
        let suit_ch = chars.next_back().ok_or_else(|| CardParseError::Invalid(s.to_string()))?;
        let rank_str = chars.as_str();
        if rank_str.is_empty() {
            return Err(CardParseError::Invalid(s.to_string()));
        }

        let rank = Rank::from_str(rank_str)?;
        let suit = Suit::try_from(suit_ch)?;
        Ok(Card::new(rank, suit))
    }
}

/// Parse multiple cards separated by whitespace or commas.
///
/// ```
/// use genetic_poker::cards::{parse_cards, Card, Rank, Suit};
///
/// let cards = parse_cards("As, Kd 10c").unwrap();
/// assert_eq!(cards[0], Card::new(Rank::Ace, Suit::Spades));
/// assert_eq!(cards[1], Card::new(Rank::King, Suit::Diamonds));
/// assert_eq!(cards[2], Card::new(Rank::Ten, Suit::Clubs));
/// ```
pub fn parse_cards(input: &str) -> Result<Vec<Card>, CardParseError> {
    input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(Card::from_str)
        .collect()
}
