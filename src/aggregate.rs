//! Per-lane aggregation: configurable reduction, a bounded top-N frontier
//! with deterministic tie-breaking, and per-brand grand totals.

use std::collections::{BTreeMap, BTreeSet};

use indexmap::IndexMap;

use crate::config::{AggregationStrategy, AnalysisConfig, AnalysisMode};
use crate::constants::aggregate::TOTAL_PREFIX;
use crate::types::{CategorizedKey, CounterValue, Discriminator};
use crate::utils::{category_tag, last_segment};

/// Apply `strategy` to the collected values of one key.
///
/// An empty slice reduces to 0 for every strategy. All strategies are
/// order-independent, so re-running on a reordered multiset is a no-op.
pub fn reduce(strategy: AggregationStrategy, values: &[CounterValue]) -> CounterValue {
    if values.is_empty() {
        return 0;
    }
    let n = values.len() as u64;
    match strategy {
        AggregationStrategy::Sum => values.iter().sum(),
        AggregationStrategy::Max => values.iter().copied().max().unwrap_or(0),
        AggregationStrategy::Min => values.iter().copied().min().unwrap_or(0),
        AggregationStrategy::Avg => {
            // integer round half-up
            let sum: u64 = values.iter().sum();
            (sum + n / 2) / n
        }
        AggregationStrategy::Median => {
            let mut sorted = values.to_vec();
            sorted.sort_unstable();
            let mid = sorted.len() / 2;
            if sorted.len() % 2 == 1 {
                sorted[mid]
            } else {
                (sorted[mid - 1] + sorted[mid]) / 2
            }
        }
        AggregationStrategy::Count => n,
    }
}

/// Lane-local aggregation state: exclusively owned by one lane, created at
/// lane start and consumed by [`LaneAggregator::flush`].
///
/// Every value for a key must be presented in a single [`reduce_key`] call
/// (the co-location invariant); there is no partial or incremental emission.
///
/// [`reduce_key`]: LaneAggregator::reduce_key
#[derive(Debug)]
pub struct LaneAggregator {
    mode: AnalysisMode,
    strategy: AggregationStrategy,
    top_n: usize,
    secondary_sort: bool,
    frontier: BTreeMap<CounterValue, BTreeSet<CategorizedKey>>,
    candidates: usize,
    brand_totals: IndexMap<Discriminator, CounterValue>,
    immediate: Vec<(CategorizedKey, CounterValue)>,
}

impl LaneAggregator {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            mode: config.mode,
            strategy: config.aggregation,
            top_n: config.top_n,
            secondary_sort: config.secondary_sort,
            frontier: BTreeMap::new(),
            candidates: 0,
            brand_totals: IndexMap::new(),
            immediate: Vec::new(),
        }
    }

    /// Reduce all values collected for `key` and file the aggregate under
    /// the mode's disposition rules.
    pub fn reduce_key(&mut self, key: CategorizedKey, values: &[CounterValue]) {
        let reduced = reduce(self.strategy, values);
        match self.mode {
            AnalysisMode::Sentiment | AnalysisMode::Engagement => {
                self.immediate.push((key, reduced));
            }
            AnalysisMode::Brands => {
                if category_tag(&key) == "brand" {
                    let brand = last_segment(&key).to_string();
                    *self.brand_totals.entry(brand).or_insert(0) += reduced;
                    self.insert_candidate(key, reduced);
                } else {
                    // comment mentions and anything else pass straight through
                    self.immediate.push((key, reduced));
                }
            }
            AnalysisMode::Trend
            | AnalysisMode::Traffic
            | AnalysisMode::Location
            | AnalysisMode::Topic
            | AnalysisMode::Timeframe => {
                self.insert_candidate(key, reduced);
            }
        }
    }

    /// Drain the lane: pass-through records in arrival order, then brand
    /// totals, then ranked records (value descending, key ascending, at most
    /// `top_n`).
    pub fn flush(mut self) -> Vec<(CategorizedKey, CounterValue)> {
        let mut out = std::mem::take(&mut self.immediate);
        for (brand, total) in &self.brand_totals {
            out.push((format!("{TOTAL_PREFIX}:{brand}"), *total));
        }
        let frontier = std::mem::take(&mut self.frontier);
        let ranked = if self.secondary_sort {
            drain_composite(frontier, self.top_n)
        } else {
            drain_frontier(frontier, self.top_n)
        };
        out.extend(ranked);
        out
    }

    /// Insert a ranked candidate, evicting the weakest entry (lowest value,
    /// then lexicographically greatest key) once the bound is exceeded.
    fn insert_candidate(&mut self, key: CategorizedKey, value: CounterValue) {
        self.frontier.entry(value).or_default().insert(key);
        self.candidates += 1;
        if self.candidates <= self.top_n {
            return;
        }
        if let Some(mut entry) = self.frontier.first_entry() {
            entry.get_mut().pop_last();
            if entry.get().is_empty() {
                entry.remove();
            }
            self.candidates -= 1;
        }
    }
}

/// Walk candidate values strictly descending, keys ascending within a value,
/// emitting until the bound is reached.
fn drain_frontier(
    frontier: BTreeMap<CounterValue, BTreeSet<CategorizedKey>>,
    top_n: usize,
) -> Vec<(CategorizedKey, CounterValue)> {
    let mut out = Vec::with_capacity(top_n.min(64));
    for (value, keys) in frontier.into_iter().rev() {
        for key in keys {
            if out.len() >= top_n {
                return out;
            }
            out.push((key, value));
        }
    }
    out
}

/// Composite-key formulation of the same ordering: sort (value, key) pairs
/// by value descending then key ascending. Must produce output identical to
/// [`drain_frontier`].
fn drain_composite(
    frontier: BTreeMap<CounterValue, BTreeSet<CategorizedKey>>,
    top_n: usize,
) -> Vec<(CategorizedKey, CounterValue)> {
    let mut flat: Vec<(CategorizedKey, CounterValue)> = frontier
        .into_iter()
        .flat_map(|(value, keys)| keys.into_iter().map(move |key| (key, value)))
        .collect();
    flat.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    flat.truncate(top_n);
    flat
}
