use crate::types::LaneIndex;

/// Monotonic counters for one analysis run.
///
/// Error conditions surface only here; a malformed payload bumps a counter
/// and processing continues (no single bad record aborts a run).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunCounters {
    /// Records that decoded and were fed to the extractor.
    pub records: u64,
    /// Payloads dropped by structural validation.
    pub malformed: u64,
    /// Categorized emissions produced across all records.
    pub emissions: u64,
}

/// Aggregate skew metrics over per-lane output record counts.
#[derive(Clone, Debug, PartialEq)]
pub struct LaneSkew {
    pub total: usize,
    pub lanes: usize,
    pub min: usize,
    pub max: usize,
    pub mean: f64,
    pub max_share: f64,
    pub ratio: f64,
    pub per_lane: Vec<LaneShare>,
}

/// Per-lane share of the run's output for skew inspection.
#[derive(Clone, Debug, PartialEq)]
pub struct LaneShare {
    pub lane: LaneIndex,
    pub count: usize,
    pub share: f64,
}

/// Compute skew metrics from per-lane record counts (index = lane).
pub fn lane_skew(counts: &[usize]) -> Option<LaneSkew> {
    if counts.is_empty() {
        return None;
    }
    let total: usize = counts.iter().sum();
    let lanes = counts.len();
    let min = *counts.iter().min().expect("counts non-empty");
    let max = *counts.iter().max().expect("counts non-empty");
    let mean = total as f64 / lanes as f64;
    let max_share = if total == 0 {
        0.0
    } else {
        max as f64 / total as f64
    };
    let ratio = if min == 0 {
        f64::INFINITY
    } else {
        max as f64 / min as f64
    };
    let mut per_lane: Vec<LaneShare> = counts
        .iter()
        .enumerate()
        .map(|(lane, count)| LaneShare {
            lane,
            count: *count,
            share: if total == 0 {
                0.0
            } else {
                *count as f64 / total as f64
            },
        })
        .collect();
    per_lane.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.lane.cmp(&b.lane)));
    Some(LaneSkew {
        total,
        lanes,
        min,
        max,
        mean,
        max_share,
        ratio,
        per_lane,
    })
}
