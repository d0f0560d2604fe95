//! Combination of several per-mode result sets into one summary document,
//! for runs that chain multiple analyses over the same input.

use serde_json::{json, Value};

use crate::config::AnalysisMode;
use crate::constants::encode::AGGREGATED_TYPE;
use crate::types::{CategorizedKey, CounterValue};

/// One completed analysis: the mode that produced it plus its ordered
/// result records.
#[derive(Clone, Debug)]
pub struct AnalysisResultSet {
    pub mode: AnalysisMode,
    pub records: Vec<(CategorizedKey, CounterValue)>,
}

/// Merge per-mode result sets into a single grouped document:
/// `{"analysis_type": "aggregated", "results": {"<mode>": [...]}}`.
///
/// Result sets sharing a mode are concatenated in the order given.
pub fn aggregate_document(sets: &[AnalysisResultSet]) -> Value {
    let mut results = serde_json::Map::new();
    for set in sets {
        let bucket = results
            .entry(set.mode.as_str().to_string())
            .or_insert_with(|| Value::Array(Vec::new()));
        if let Value::Array(records) = bucket {
            records.extend(
                set.records
                    .iter()
                    .map(|(key, count)| json!({ "key": key, "count": count })),
            );
        }
    }
    json!({
        "analysis_type": AGGREGATED_TYPE,
        "results": Value::Object(results),
    })
}
