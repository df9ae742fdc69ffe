use crate::cards::Rank;

/// Rank-multiplicity pattern of a five-card hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pairing {
    FourOfAKind,
    FullHouse,
    ThreeOfAKind,
    TwoPair,
    OnePair,
    Nothing,
}

/// Two runs of equal ranks found by scanning a rank-sorted hand.
///
/// `first` grows over adjacent equal ranks from index 1 until a different rank
/// follows a run longer than one card. `second` then counts the remaining
/// adjacent equal ranks from that break point onward. With five cards and at
/// most four of any rank this pair of counters is enough to tell every
/// multiplicity pattern apart.
///
/// Example: 5 5 5 9 9 scans as first = 3, second = 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankRuns {
    first: u8,
    second: u8,
}

impl RankRuns {
    /// Scan ranks that are already sorted ascending.
    pub fn scan(sorted_ranks: &[Rank; 5]) -> Self {
        let mut first = 1u8;
        let mut second = 1u8;

        let mut i = 1;
        while i < sorted_ranks.len() {
            if sorted_ranks[i] == sorted_ranks[i - 1] {
                first += 1;
            } else if first > 1 {
                break;
            }
            i += 1;
        }

        for j in i..sorted_ranks.len() {
            if sorted_ranks[j] == sorted_ranks[j - 1] {
                second += 1;
            }
        }

        Self { first, second }
    }

    pub fn pairing(&self) -> Pairing {
        if self.first == 4 {
            Pairing::FourOfAKind
        } else if self.first + self.second == 5 {
            Pairing::FullHouse
        } else if self.first == 3 || self.second == 3 {
            Pairing::ThreeOfAKind
        } else if self.first == 2 && self.second == 2 {
            Pairing::TwoPair
        } else if self.first == 2 {
            Pairing::OnePair
        } else {
            Pairing::Nothing
        }
    }

    #[cfg(test)]
    pub fn counts(&self) -> (u8, u8) {
        (self.first, self.second)
    }
}
