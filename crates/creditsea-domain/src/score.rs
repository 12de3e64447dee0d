//! Score bands for presenting bureau scores

/// Coarse rating of a bureau score
///
/// - Good: 700 and above
/// - Fair: 600 to 699
/// - Poor: below 600 (including a missing score of 0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreBand {
    /// 700 and above
    Good,

    /// 600 to 699
    Fair,

    /// Below 600
    Poor,
}

impl ScoreBand {
    /// Lowest score in the Good band
    pub const GOOD_THRESHOLD: u32 = 700;

    /// Lowest score in the Fair band
    pub const FAIR_THRESHOLD: u32 = 600;

    /// Band for a score
    pub fn from_score(score: u32) -> Self {
        if score >= Self::GOOD_THRESHOLD {
            ScoreBand::Good
        } else if score >= Self::FAIR_THRESHOLD {
            ScoreBand::Fair
        } else {
            ScoreBand::Poor
        }
    }
}
