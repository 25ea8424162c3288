//! Category assignment behind the [`CategoryAssigner`] capability.
//!
//! Business-classification fields (engagement, activity, channel, segment,
//! tier) stand in for a real scoring model and are drawn from weighted
//! distributions. The trait keeps the pipeline shape independent of the
//! assignment strategy, so real business rules can replace the weighted
//! draws without touching enrichment. The default [`WeightedAssigner`] is
//! seeded by the caller: the same seed reproduces identical output.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::model::{
    AcquisitionChannel, ActivityStatus, CustomerTier, EngagementLevel, MarketSegment,
};

/// Source of business-classification values for one enrichment run.
///
/// Implementations may return `Unknown` for engagement or activity when the
/// input is unresolvable; enrichment deducts quality points for those.
pub trait CategoryAssigner {
    fn engagement_level(&mut self) -> EngagementLevel;
    fn activity_status(&mut self) -> ActivityStatus;
    fn acquisition_channel(&mut self) -> AcquisitionChannel;
    fn market_segment(&mut self) -> MarketSegment;
    fn customer_tier(&mut self) -> CustomerTier;
}

/// Weighted draws: high 30%, medium 45%, low 25%.
const ENGAGEMENT_WEIGHTS: &[(EngagementLevel, u32)] = &[
    (EngagementLevel::High, 30),
    (EngagementLevel::Medium, 45),
    (EngagementLevel::Low, 25),
];

/// Weighted draws: active 80%, inactive 20%.
const ACTIVITY_WEIGHTS: &[(ActivityStatus, u32)] = &[
    (ActivityStatus::Active, 80),
    (ActivityStatus::Inactive, 20),
];

/// Weighted draws: website 50%, mobile 30%, email 20%.
const CHANNEL_WEIGHTS: &[(AcquisitionChannel, u32)] = &[
    (AcquisitionChannel::Website, 50),
    (AcquisitionChannel::Mobile, 30),
    (AcquisitionChannel::Email, 20),
];

/// Weighted draws: US-West 30%, US-East 30%, EU 25%, APAC 15%.
const SEGMENT_WEIGHTS: &[(MarketSegment, u32)] = &[
    (MarketSegment::UsWest, 30),
    (MarketSegment::UsEast, 30),
    (MarketSegment::Eu, 25),
    (MarketSegment::Apac, 15),
];

/// Weighted draws: basic 60%, premium 30%, enterprise 10%.
const TIER_WEIGHTS: &[(CustomerTier, u32)] = &[
    (CustomerTier::Basic, 60),
    (CustomerTier::Premium, 30),
    (CustomerTier::Enterprise, 10),
];

/// Default assigner: seeded weighted draws over fixed distributions.
///
/// Never returns `Unknown`; a draw is made for every record.
#[derive(Debug)]
pub struct WeightedAssigner {
    rng: StdRng,
}

impl WeightedAssigner {
    /// Creates an assigner whose draw sequence is fully determined by `seed`.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn draw<T: Copy>(&mut self, table: &[(T, u32)]) -> T {
        match table.choose_weighted(&mut self.rng, |entry| entry.1) {
            Ok(entry) => entry.0,
            // Static weight tables are non-empty with positive weights, so
            // this arm is unreachable; fall back to the first entry.
            Err(_) => table[0].0,
        }
    }
}

impl CategoryAssigner for WeightedAssigner {
    fn engagement_level(&mut self) -> EngagementLevel {
        self.draw(ENGAGEMENT_WEIGHTS)
    }

    fn activity_status(&mut self) -> ActivityStatus {
        self.draw(ACTIVITY_WEIGHTS)
    }

    fn acquisition_channel(&mut self) -> AcquisitionChannel {
        self.draw(CHANNEL_WEIGHTS)
    }

    fn market_segment(&mut self) -> MarketSegment {
        self.draw(SEGMENT_WEIGHTS)
    }

    fn customer_tier(&mut self) -> CustomerTier {
        self.draw(TIER_WEIGHTS)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn draw_sequence(seed: u64, n: usize) -> Vec<(EngagementLevel, CustomerTier)> {
        let mut assigner = WeightedAssigner::from_seed(seed);
        (0..n)
            .map(|_| (assigner.engagement_level(), assigner.customer_tier()))
            .collect()
    }

    #[test]
    fn test_same_seed_reproduces_identical_draws() {
        assert_eq!(draw_sequence(42, 64), draw_sequence(42, 64));
    }

    #[test]
    fn test_weight_tables_sum_to_one_hundred() {
        assert_eq!(ENGAGEMENT_WEIGHTS.iter().map(|e| e.1).sum::<u32>(), 100);
        assert_eq!(ACTIVITY_WEIGHTS.iter().map(|e| e.1).sum::<u32>(), 100);
        assert_eq!(CHANNEL_WEIGHTS.iter().map(|e| e.1).sum::<u32>(), 100);
        assert_eq!(SEGMENT_WEIGHTS.iter().map(|e| e.1).sum::<u32>(), 100);
        assert_eq!(TIER_WEIGHTS.iter().map(|e| e.1).sum::<u32>(), 100);
    }

    #[test]
    fn test_weighted_assigner_never_draws_unknown() {
        let mut assigner = WeightedAssigner::from_seed(7);
        for _ in 0..256 {
            assert_ne!(assigner.engagement_level(), EngagementLevel::Unknown);
            assert_ne!(assigner.activity_status(), ActivityStatus::Unknown);
        }
    }

    #[test]
    fn test_all_engagement_variants_reachable() {
        let mut assigner = WeightedAssigner::from_seed(1);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..512 {
            seen.insert(assigner.engagement_level().as_str());
        }
        assert!(seen.contains("high"));
        assert!(seen.contains("medium"));
        assert!(seen.contains("low"));
    }
}
