//! Deterministic key → lane routing.
//!
//! Routing is a pure function of the key's category tag, so every value for
//! a key lands on the same lane for a fixed lane count (the co-location
//! invariant the aggregator's top-N bounding and totals depend on).

use crate::constants::router;
use crate::hash::stable_hash_str;
use crate::types::LaneIndex;
use crate::utils::category_tag;

/// Route a categorized key to one of `lane_count` lanes.
///
/// Known category tags map through a fixed table so related categories
/// co-locate; unknown tags fall back to a stable hash of the full key.
///
/// # Panics
/// Panics when `lane_count` is zero.
pub fn lane_for_key(key: &str, lane_count: usize) -> LaneIndex {
    assert!(lane_count > 0, "lane_count must be positive");
    match fixed_slot(category_tag(key)) {
        Some(slot) => slot % lane_count,
        None => (stable_hash_str(router::ROUTE_HASH_SEED, key) % lane_count as u64) as LaneIndex,
    }
}

fn fixed_slot(tag: &str) -> Option<usize> {
    let slot = match tag {
        "location" => router::LANE_LOCATION,
        "sentiment" | "traffic_sentiment" => router::LANE_SENTIMENT,
        "brand" | "brand_comment" => router::LANE_BRAND,
        "timeframe" | "time_of_day" | "day_of_week" | "month" | "hour" | "day_type" => {
            router::LANE_TIMEFRAME
        }
        "keyword" | "phrase" => router::LANE_KEYWORD,
        "category" => router::LANE_CATEGORY,
        "score" | "comments" => router::LANE_ENGAGEMENT,
        "flair" | "topic" => router::LANE_TOPIC,
        "school" => router::LANE_SCHOOL,
        _ => return None,
    };
    Some(slot)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routing_is_stable_for_a_fixed_lane_count() {
        let first = lane_for_key("brand:toyota", 4);
        for _ in 0..16 {
            assert_eq!(lane_for_key("brand:toyota", 4), first);
        }
    }

    #[test]
    fn related_categories_share_a_lane() {
        assert_eq!(
            lane_for_key("sentiment:positive", 9),
            lane_for_key("traffic_sentiment:negative", 9)
        );
        assert_eq!(
            lane_for_key("time_of_day:midday", 9),
            lane_for_key("hour:14", 9)
        );
        assert_eq!(lane_for_key("score", 9), lane_for_key("comments", 9));
    }

    #[test]
    fn table_slots_reduce_modulo_lane_count() {
        // school sits at slot 8; with 3 lanes that is lane 2
        assert_eq!(lane_for_key("school:bbdc", 3), 2);
        assert_eq!(lane_for_key("location:pie", 3), 0);
    }

    #[test]
    fn unknown_tags_hash_within_bounds() {
        for lane_count in 1..8 {
            let lane = lane_for_key("mystery:value", lane_count);
            assert!(lane < lane_count);
            assert_eq!(lane, lane_for_key("mystery:value", lane_count));
        }
    }
}
