/// Categorized counter key emitted by the feature extractor.
/// Example: `brand:toyota`, `sentiment:question:positive`, `time_of_day:morning_commute`
pub type CategorizedKey = String;
/// Category tag portion of a key (text before the first `:`).
/// Examples: `keyword`, `location`, `traffic_sentiment`
pub type CategoryTag = String;
/// Entity portion of a key (text after the last `:`).
/// Examples: `toyota`, `woodlands`, `positive`
pub type Discriminator = String;
/// Non-negative counter contribution carried by an emission.
/// Almost always `1`; engagement emissions carry raw score/comment counts.
pub type CounterValue = u64;
/// Index of the aggregation lane a key routes to.
pub type LaneIndex = usize;
/// Post category label supplied by the upstream platform.
/// Examples: `question`, `rant`, `test`
pub type FlairLabel = String;
