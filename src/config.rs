use tracing::warn;

use crate::constants::aggregate::DEFAULT_TOP_N;
use crate::constants::encode::DEFAULT_SEPARATOR;

/// Analysis mode selected once per run; drives both feature extraction and
/// the aggregator's per-category disposition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnalysisMode {
    /// Keywords, driving schools, phrases, and flair frequency.
    Trend,
    /// Positive/negative/neutral classification plus traffic-weighted blend.
    Sentiment,
    /// Flair categories plus fixed substring-trigger categories.
    Traffic,
    /// Location mentions in posts and comments.
    Location,
    /// Flair-as-topic frequency.
    Topic,
    /// Raw score/comment engagement totals.
    Engagement,
    /// Car brand and model mentions in posts and comments.
    Brands,
    /// Calendar bucketing of post timestamps plus time mentions in text.
    Timeframe,
}

impl AnalysisMode {
    /// Parse a configuration string; unknown values fall back to `Trend`.
    pub fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "trend" => Self::Trend,
            "sentiment" => Self::Sentiment,
            "traffic" => Self::Traffic,
            "location" => Self::Location,
            "topic" => Self::Topic,
            "engagement" => Self::Engagement,
            "brands" => Self::Brands,
            "timeframe" => Self::Timeframe,
            other => {
                warn!("unknown analysis mode '{other}', falling back to trend");
                Self::Trend
            }
        }
    }

    /// Canonical lowercase name of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trend => "trend",
            Self::Sentiment => "sentiment",
            Self::Traffic => "traffic",
            Self::Location => "location",
            Self::Topic => "topic",
            Self::Engagement => "engagement",
            Self::Brands => "brands",
            Self::Timeframe => "timeframe",
        }
    }
}

impl Default for AnalysisMode {
    fn default() -> Self {
        Self::Trend
    }
}

/// Reduction applied to the collected values of each distinct key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AggregationStrategy {
    /// Sum of all contributions (default).
    Sum,
    /// Largest contribution.
    Max,
    /// Smallest contribution.
    Min,
    /// Mean rounded half-up.
    Avg,
    /// Middle value; even lengths floor the mean of the middle pair.
    Median,
    /// Number of contributions, ignoring magnitude.
    Count,
}

impl AggregationStrategy {
    /// Parse a configuration string; unknown values fall back to `Sum`.
    pub fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "sum" => Self::Sum,
            "max" => Self::Max,
            "min" => Self::Min,
            "avg" => Self::Avg,
            "median" => Self::Median,
            "count" => Self::Count,
            other => {
                warn!("unknown aggregation strategy '{other}', falling back to sum");
                Self::Sum
            }
        }
    }
}

impl Default for AggregationStrategy {
    fn default() -> Self {
        Self::Sum
    }
}

/// Top-level analysis configuration.
#[derive(Clone, Debug)]
pub struct AnalysisConfig {
    /// Analysis mode applied uniformly to every record in the run.
    pub mode: AnalysisMode,
    /// Bound for ranked output per aggregation lane.
    pub top_n: usize,
    /// Reduction strategy applied per distinct key.
    pub aggregation: AggregationStrategy,
    /// Selects the composite-key flush path (identical output either way).
    pub secondary_sort: bool,
    /// Number of aggregation lanes keys are routed across.
    pub lane_count: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            mode: AnalysisMode::default(),
            top_n: DEFAULT_TOP_N,
            aggregation: AggregationStrategy::default(),
            secondary_sort: false,
            lane_count: 1,
        }
    }
}

/// Persisted output flavor for a result set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Tab-separated `key\tvalue` lines.
    Default,
    /// Delimited tabular output with escaping.
    Csv,
    /// Structured JSON document.
    Json,
}

impl OutputFormat {
    /// Parse a configuration string; unknown values fall back to `Default`.
    pub fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "default" => Self::Default,
            "csv" => Self::Csv,
            "json" => Self::Json,
            other => {
                warn!("unknown output format '{other}', falling back to default");
                Self::Default
            }
        }
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Default
    }
}

/// Tabular encoder options.
#[derive(Clone, Debug)]
pub struct CsvConfig {
    /// Field separator placed between key and value.
    pub separator: String,
    /// Header line written before the first record.
    pub header: Option<String>,
    /// Whether the header line is written at all.
    pub include_header: bool,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            header: None,
            include_header: true,
        }
    }
}

/// Structured encoder options.
#[derive(Clone, Debug)]
pub struct JsonConfig {
    /// Group records by category tag under a single top-level document.
    pub as_array: bool,
    /// Pretty-print emitted objects.
    pub pretty: bool,
    /// One compact object per line (ignored when `as_array` is set).
    pub newline_separated: bool,
    /// Optional `analysis_type` metadata stamped on grouped documents.
    pub analysis_type: Option<String>,
}

impl Default for JsonConfig {
    fn default() -> Self {
        Self {
            as_array: false,
            pretty: false,
            newline_separated: true,
            analysis_type: None,
        }
    }
}
