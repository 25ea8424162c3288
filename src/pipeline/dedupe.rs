//! Deduplication and final ordering of enriched records.
//!
//! A pure reduction with no knowledge of HTTP or randomness: deterministic
//! given its input, which makes it independently testable.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::model::EnrichedCustomer;

/// Collapses records sharing a `customer_id` and sorts the result.
///
/// Within a duplicate group the record with the highest
/// `data_quality_score` wins; ties keep the first-seen record, preserving
/// original fetch order. Output is sorted by `full_name` ascending,
/// case-insensitive, with ties broken by `customer_id` ascending.
#[must_use]
pub fn merge(enriched: Vec<EnrichedCustomer>) -> Vec<EnrichedCustomer> {
    let mut kept: Vec<EnrichedCustomer> = Vec::with_capacity(enriched.len());
    let mut slot_by_id: HashMap<u64, usize> = HashMap::with_capacity(enriched.len());

    for record in enriched {
        match slot_by_id.entry(record.customer_id) {
            Entry::Vacant(entry) => {
                entry.insert(kept.len());
                kept.push(record);
            }
            Entry::Occupied(entry) => {
                let slot = *entry.get();
                // Strict comparison: equal scores keep the earlier record.
                if record.data_quality_score > kept[slot].data_quality_score {
                    kept[slot] = record;
                }
            }
        }
    }

    kept.sort_by(|a, b| {
        a.full_name
            .to_lowercase()
            .cmp(&b.full_name.to_lowercase())
            .then_with(|| a.customer_id.cmp(&b.customer_id))
    });
    kept
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{
        AcquisitionChannel, ActivityStatus, CustomerTier, EngagementLevel, MarketSegment,
    };

    fn record(id: u64, name: &str, score: u8) -> EnrichedCustomer {
        EnrichedCustomer {
            customer_id: id,
            full_name: name.to_string(),
            email_domain: "example.com".to_string(),
            engagement_level: EngagementLevel::Medium,
            activity_status: ActivityStatus::Active,
            acquisition_channel: AcquisitionChannel::Website,
            market_segment: MarketSegment::Eu,
            customer_tier: CustomerTier::Basic,
            data_quality_score: score,
        }
    }

    #[test]
    fn test_merge_empty_input() {
        assert!(merge(Vec::new()).is_empty());
    }

    #[test]
    fn test_merge_output_has_unique_ids() {
        let input = vec![
            record(1, "Alice Adams", 90),
            record(2, "Bob Brown", 80),
            record(1, "Alice Adams", 70),
            record(2, "Bob Brown", 100),
        ];
        let output = merge(input);
        let mut ids: Vec<u64> = output.iter().map(|r| r.customer_id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), output.len());
        assert_eq!(output.len(), 2);
    }

    #[test]
    fn test_merge_keeps_highest_quality_record() {
        let input = vec![record(1, "Complete Person", 100), record(1, "Unknown", 70)];
        let output = merge(input);
        assert_eq!(output.len(), 1);
        assert_eq!(output[0].data_quality_score, 100);
        assert_eq!(output[0].full_name, "Complete Person");
    }

    #[test]
    fn test_merge_later_higher_quality_replaces_earlier() {
        let input = vec![record(1, "Sparse", 60), record(1, "Full", 100)];
        let output = merge(input);
        assert_eq!(output[0].full_name, "Full");
    }

    #[test]
    fn test_merge_tie_keeps_first_seen() {
        let input = vec![
            record(1, "First Seen", 90),
            record(1, "Second Seen", 90),
        ];
        let output = merge(input);
        assert_eq!(output.len(), 1);
        assert_eq!(output[0].full_name, "First Seen");
    }

    #[test]
    fn test_merge_sorts_by_name_case_insensitive() {
        let input = vec![
            record(1, "charlie day", 100),
            record(2, "Alice Adams", 100),
            record(3, "bob Brown", 100),
        ];
        let output = merge(input);
        let names: Vec<&str> = output.iter().map(|r| r.full_name.as_str()).collect();
        assert_eq!(names, vec!["Alice Adams", "bob Brown", "charlie day"]);
    }

    #[test]
    fn test_merge_name_ties_break_by_customer_id() {
        let input = vec![
            record(30, "Same Name", 100),
            record(10, "same name", 100),
            record(20, "Same Name", 100),
        ];
        let output = merge(input);
        let ids: Vec<u64> = output.iter().map(|r| r.customer_id).collect();
        assert_eq!(ids, vec![10, 20, 30]);
    }

    #[test]
    fn test_merge_kept_score_dominates_group() {
        let input = vec![
            record(5, "Dana", 50),
            record(5, "Dana", 95),
            record(5, "Dana", 80),
            record(6, "Eve", 75),
        ];
        let output = merge(input.clone());

        for kept in &output {
            let group_max = input
                .iter()
                .filter(|r| r.customer_id == kept.customer_id)
                .map(|r| r.data_quality_score)
                .max()
                .unwrap();
            assert_eq!(kept.data_quality_score, group_max);
        }
    }

    #[test]
    fn test_merge_is_deterministic() {
        let input = vec![
            record(3, "Carol", 90),
            record(1, "Alice", 80),
            record(2, "Bob", 85),
            record(1, "Alice", 80),
        ];
        assert_eq!(merge(input.clone()), merge(input));
    }
}
