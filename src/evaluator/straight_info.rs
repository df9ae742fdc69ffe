use crate::cards::Rank;

/// Whether five rank-sorted cards form a straight, and its top rank.
///
/// Ace only plays high: A-2-3-4-5 is not a straight here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StraightInfo {
    pub is_straight: bool,
    pub top_rank: Option<Rank>,
}

impl StraightInfo {
    /// Detect a straight from ranks sorted ascending.
    pub fn detect(sorted_ranks: &[Rank; 5]) -> Self {
        let is_consecutive = sorted_ranks.windows(2).all(|w| w[1].index() == w[0].index() + 1);

        if is_consecutive {
            StraightInfo { is_straight: true, top_rank: Some(sorted_ranks[4]) }
        } else {
            StraightInfo { is_straight: false, top_rank: None }
        }
    }
}
