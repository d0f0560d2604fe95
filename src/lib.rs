#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Per-lane aggregation: reduction strategies, top-N frontier, brand totals.
pub mod aggregate;
/// Analysis, aggregation, and output configuration types.
pub mod config;
/// Centralized constants used across routing, aggregation, and encoding.
pub mod constants;
/// Input record types and "decode or skip" line decoding.
pub mod data;
/// Result encoders (tabular, structured, and default text layouts).
pub mod encode;
/// Per-record feature extraction.
pub mod extract;
mod hash;
/// Lane-count estimation helpers.
pub mod heuristics;
/// Immutable domain vocabulary and coordinate lookup.
pub mod lexicon;
/// Run counters and per-lane skew diagnostics.
pub mod metrics;
/// In-process extract → route → aggregate driver.
pub mod pipeline;
/// Deterministic key-to-lane routing.
pub mod route;
/// Multi-analysis summary documents.
pub mod summary;
/// Shared type aliases.
pub mod types;
/// Text normalization and key helpers.
pub mod utils;

mod errors;

pub use aggregate::{reduce, LaneAggregator};
pub use config::{
    AggregationStrategy, AnalysisConfig, AnalysisMode, CsvConfig, JsonConfig, OutputFormat,
};
pub use data::{decode_line, decode_lines, Comment, DecodedBatch, Post};
pub use encode::{create_output, output_file_name, write_default, CsvEncoder, JsonEncoder};
pub use errors::AnalysisError;
pub use extract::{Emission, FeatureExtractor};
pub use lexicon::Lexicon;
pub use metrics::{lane_skew, LaneShare, LaneSkew, RunCounters};
pub use pipeline::{AnalysisPipeline, AnalysisReport, LaneOutput};
pub use route::lane_for_key;
pub use summary::{aggregate_document, AnalysisResultSet};
pub use types::{
    CategorizedKey, CategoryTag, CounterValue, Discriminator, FlairLabel, LaneIndex,
};
