use std::io::Write;

use chrono::Utc;
use indexmap::IndexMap;
use serde_json::{json, Value};

use crate::config::JsonConfig;
use crate::constants::encode::{CATEGORY_FALLBACK, NEWLINE};
use crate::errors::AnalysisError;
use crate::types::{CategoryTag, CounterValue};
use crate::utils::{category_tag, last_segment};

/// Structured record writer with three layouts.
///
/// * grouped-object (`as_array`): records are collected per category tag and
///   written as one document at [`finish`], with optional `analysis_type` /
///   `generated_at` metadata;
/// * line-delimited (`newline_separated`): one object per line as records
///   arrive;
/// * single-array: a JSON array opened on the first record and closed at
///   [`finish`].
///
/// [`finish`]: JsonEncoder::finish
pub struct JsonEncoder<W: Write> {
    out: W,
    config: JsonConfig,
    first_record: bool,
    grouped: IndexMap<CategoryTag, Vec<Value>>,
}

impl<W: Write> JsonEncoder<W> {
    pub fn new(out: W, config: JsonConfig) -> Self {
        Self {
            out,
            config,
            first_record: true,
            grouped: IndexMap::new(),
        }
    }

    /// Write (or stage, for the grouped layout) one record.
    pub fn write_record(&mut self, key: &str, count: CounterValue) -> Result<(), AnalysisError> {
        let record = record_object(key, count);

        if self.config.as_array {
            self.grouped
                .entry(record_category(key).to_string())
                .or_default()
                .push(record);
            return Ok(());
        }

        let rendered = self.render(&record)?;
        if self.config.newline_separated {
            self.out.write_all(rendered.as_bytes())?;
            self.out.write_all(NEWLINE.as_bytes())?;
        } else {
            if self.first_record {
                self.out.write_all(b"[")?;
            } else {
                self.out.write_all(b",")?;
            }
            if self.config.pretty {
                self.out.write_all(NEWLINE.as_bytes())?;
            }
            self.out.write_all(rendered.as_bytes())?;
            self.first_record = false;
        }
        Ok(())
    }

    /// Close the document and hand back the underlying stream.
    pub fn finish(mut self) -> Result<W, AnalysisError> {
        if self.config.as_array {
            let document = self.grouped_document();
            let rendered = self.render(&document)?;
            self.out.write_all(rendered.as_bytes())?;
            self.out.write_all(NEWLINE.as_bytes())?;
        } else if !self.config.newline_separated {
            if self.first_record {
                self.out.write_all(b"[]")?;
            } else {
                if self.config.pretty {
                    self.out.write_all(NEWLINE.as_bytes())?;
                }
                self.out.write_all(b"]")?;
            }
            self.out.write_all(NEWLINE.as_bytes())?;
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn render(&self, value: &Value) -> Result<String, AnalysisError> {
        let rendered = if self.config.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        rendered.map_err(|err| AnalysisError::Io(err.into()))
    }

    fn grouped_document(&mut self) -> Value {
        let mut results = serde_json::Map::new();
        for (category, records) in std::mem::take(&mut self.grouped) {
            results.insert(category, Value::Array(records));
        }
        let mut document = serde_json::Map::new();
        if let Some(analysis_type) = self.config.analysis_type.as_deref() {
            if !analysis_type.is_empty() {
                document.insert("analysis_type".to_string(), json!(analysis_type));
                document.insert("generated_at".to_string(), json!(Utc::now().to_rfc3339()));
            }
        }
        document.insert("results".to_string(), Value::Object(results));
        Value::Object(document)
    }
}

/// Category a record files under in the grouped layout: the key's tag when a
/// `:` is present, otherwise the fallback bucket.
fn record_category(key: &str) -> &str {
    if key.contains(':') {
        category_tag(key)
    } else {
        CATEGORY_FALLBACK
    }
}

/// Build the per-record object, attaching the category-specific field for
/// location/brand/sentiment keys.
fn record_object(key: &str, count: CounterValue) -> Value {
    let mut record = serde_json::Map::new();
    record.insert("key".to_string(), json!(key));
    record.insert("count".to_string(), json!(count));
    for special in ["location", "brand", "sentiment"] {
        if category_tag(key) == special {
            record.insert(special.to_string(), json!(last_segment(key)));
            break;
        }
    }
    Value::Object(record)
}
