/// Constants used by key routing and lane assignment.
pub mod router {
    /// Lane slot for `location:` keys.
    pub const LANE_LOCATION: usize = 0;
    /// Lane slot for `sentiment:` and `traffic_sentiment:` keys.
    pub const LANE_SENTIMENT: usize = 1;
    /// Lane slot for `brand:` and `brand_comment:` keys.
    pub const LANE_BRAND: usize = 2;
    /// Lane slot for calendar-derived keys (`timeframe:`, `time_of_day:`,
    /// `day_of_week:`, `month:`, `hour:`, `day_type:`).
    pub const LANE_TIMEFRAME: usize = 3;
    /// Lane slot for `keyword:` and `phrase:` keys.
    pub const LANE_KEYWORD: usize = 4;
    /// Lane slot for `category:` keys.
    pub const LANE_CATEGORY: usize = 5;
    /// Lane slot for engagement keys (`score`, `comments`).
    pub const LANE_ENGAGEMENT: usize = 6;
    /// Lane slot for `flair:` and `topic:` keys.
    pub const LANE_TOPIC: usize = 7;
    /// Lane slot for `school:` keys.
    pub const LANE_SCHOOL: usize = 8;
    /// Seed mixed into the stable hash used for unrecognized category tags.
    pub const ROUTE_HASH_SEED: u64 = 0x70AD_51DE;
}

/// Constants used by aggregation and ranked output.
pub mod aggregate {
    /// Default bound for ranked output per lane.
    pub const DEFAULT_TOP_N: usize = 10;
    /// Key prefix for per-brand grand totals emitted at lane flush.
    pub const TOTAL_PREFIX: &str = "total";
}

/// Constants used by sentiment classification.
pub mod sentiment {
    /// Weight applied to traffic-specific sentiment word hits.
    pub const TRAFFIC_WEIGHT: u64 = 2;
    /// Intensity ratio at or above which sentiment is `medium`.
    pub const INTENSITY_MEDIUM: f64 = 0.15;
    /// Intensity ratio at or above which sentiment is `high`.
    pub const INTENSITY_HIGH: f64 = 0.30;
}

/// Constants used by calendar bucketing of post timestamps.
pub mod timeframe {
    /// All calendar fields are derived in this fixed reference timezone.
    pub const REFERENCE_ZONE: chrono_tz::Tz = chrono_tz::Asia::Singapore;
    /// First hour (inclusive) of the morning commute bucket.
    pub const MORNING_START: u32 = 6;
    /// First hour (inclusive) of the midday bucket.
    pub const MIDDAY_START: u32 = 10;
    /// First hour (inclusive) of the evening commute bucket.
    pub const EVENING_START: u32 = 16;
    /// First hour (exclusive upper bound) after which buckets wrap to night.
    pub const EVENING_END: u32 = 20;
}

/// Constants used by the result encoders.
pub mod encode {
    /// Default field separator for tabular output.
    pub const DEFAULT_SEPARATOR: &str = ",";
    /// Line terminator written after every encoded record.
    pub const NEWLINE: &str = "\n";
    /// File-name suffix appended when gzip compression is enabled.
    pub const GZIP_SUFFIX: &str = ".gz";
    /// File-name suffix for tabular output shards.
    pub const CSV_SUFFIX: &str = ".csv";
    /// File-name suffix for structured output shards.
    pub const JSON_SUFFIX: &str = ".json";
    /// Category tag assigned to keys without a `:` separator.
    pub const CATEGORY_FALLBACK: &str = "other";
    /// `analysis_type` value used for combined multi-analysis documents.
    pub const AGGREGATED_TYPE: &str = "aggregated";
}
