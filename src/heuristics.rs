//! Sizing helpers for choosing how many aggregation lanes a run should use.

use crate::config::AnalysisMode;

/// Number of fixed slots in the routing table; more lanes than this only
/// benefits hash-routed keys.
const ROUTING_TABLE_SLOTS: usize = 9;

/// Extra lane granted per this many estimated input records.
const RECORDS_PER_EXTRA_LANE: usize = 250_000;

/// Suggest a lane count for an analysis run.
///
/// High-cardinality key spaces (location, timeframe) start wider; modes with
/// a handful of distinct keys start narrow. Larger inputs grow the count up
/// to the routing-table size.
pub fn suggested_lane_count(mode: AnalysisMode, estimated_records: usize) -> usize {
    let base = match mode {
        AnalysisMode::Location | AnalysisMode::Timeframe => 6,
        AnalysisMode::Trend | AnalysisMode::Traffic | AnalysisMode::Brands => 4,
        AnalysisMode::Sentiment | AnalysisMode::Topic | AnalysisMode::Engagement => 2,
    };
    let growth = estimated_records / RECORDS_PER_EXTRA_LANE;
    (base + growth).clamp(1, ROUTING_TABLE_SLOTS)
}
