//! In-process pipeline driver.
//!
//! Stands in for the external batch substrate: decodes input lines, runs
//! feature extraction in parallel over the decoded records, routes emissions
//! to lanes, and reduces each lane to its ordered output. Extractor workers
//! share no mutable state; each lane's aggregator is exclusively owned here
//! and fed every value for its keys before any reduction is finalized.

use std::sync::Arc;

use indexmap::IndexMap;
use rayon::prelude::*;
use tracing::debug;

use crate::aggregate::LaneAggregator;
use crate::config::AnalysisConfig;
use crate::data::{decode_lines, Post};
use crate::errors::AnalysisError;
use crate::extract::FeatureExtractor;
use crate::lexicon::Lexicon;
use crate::metrics::RunCounters;
use crate::route::lane_for_key;
use crate::types::{CategorizedKey, CounterValue, LaneIndex};

/// Ordered output of one aggregation lane.
#[derive(Clone, Debug)]
pub struct LaneOutput {
    pub lane: LaneIndex,
    pub records: Vec<(CategorizedKey, CounterValue)>,
}

/// Result of one pipeline run: per-lane ordered records plus run counters.
#[derive(Clone, Debug)]
pub struct AnalysisReport {
    pub lanes: Vec<LaneOutput>,
    pub counters: RunCounters,
}

impl AnalysisReport {
    /// All records across lanes, in lane order.
    pub fn all_records(&self) -> impl Iterator<Item = &(CategorizedKey, CounterValue)> {
        self.lanes.iter().flat_map(|lane| lane.records.iter())
    }

    /// Per-lane record counts, indexed by lane (input for skew diagnostics).
    pub fn lane_counts(&self) -> Vec<usize> {
        self.lanes.iter().map(|lane| lane.records.len()).collect()
    }
}

/// Configured analysis run: one extractor rule set, one routing width, one
/// aggregation strategy.
pub struct AnalysisPipeline {
    config: AnalysisConfig,
    lexicon: Arc<Lexicon>,
}

impl AnalysisPipeline {
    pub fn new(config: AnalysisConfig, lexicon: Lexicon) -> Self {
        Self {
            config,
            lexicon: Arc::new(lexicon),
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Decode raw input lines (skipping and counting malformed payloads) and
    /// run the full analysis.
    pub fn run_lines<I>(&self, lines: I) -> Result<AnalysisReport, AnalysisError>
    where
        I: IntoIterator<Item = String>,
    {
        let batch = decode_lines(lines);
        self.run_posts(batch.posts, batch.skipped)
    }

    /// Run the analysis over already-decoded records. `malformed` carries the
    /// upstream skip count into the report.
    pub fn run_posts(
        &self,
        posts: Vec<Post>,
        malformed: u64,
    ) -> Result<AnalysisReport, AnalysisError> {
        if self.config.lane_count == 0 {
            return Err(AnalysisError::Configuration(
                "lane_count must be at least 1".to_string(),
            ));
        }

        let extractor = FeatureExtractor::new(self.config.mode, Arc::clone(&self.lexicon));
        let per_record: Vec<Vec<(CategorizedKey, CounterValue)>> = posts
            .par_iter()
            .map(|post| extractor.extract(post))
            .collect();

        let mut counters = RunCounters {
            records: posts.len() as u64,
            malformed,
            emissions: 0,
        };

        // Group every value for a key on its routed lane, keeping first-seen
        // key order so pass-through output is deterministic.
        let mut lanes: Vec<IndexMap<CategorizedKey, Vec<CounterValue>>> =
            (0..self.config.lane_count).map(|_| IndexMap::new()).collect();
        for emissions in per_record {
            for (key, value) in emissions {
                counters.emissions += 1;
                let lane = lane_for_key(&key, self.config.lane_count);
                lanes[lane].entry(key).or_default().push(value);
            }
        }

        let mut outputs = Vec::with_capacity(lanes.len());
        for (lane, keyed) in lanes.into_iter().enumerate() {
            let mut aggregator = LaneAggregator::new(&self.config);
            for (key, values) in keyed {
                aggregator.reduce_key(key, &values);
            }
            let records = aggregator.flush();
            debug!(lane, records = records.len(), "lane flushed");
            outputs.push(LaneOutput { lane, records });
        }

        debug!(
            records = counters.records,
            malformed = counters.malformed,
            emissions = counters.emissions,
            "analysis run complete"
        );
        Ok(AnalysisReport {
            lanes: outputs,
            counters,
        })
    }
}
