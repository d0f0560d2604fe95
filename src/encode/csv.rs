use std::io::Write;

use crate::config::CsvConfig;
use crate::constants::encode::NEWLINE;
use crate::errors::AnalysisError;
use crate::types::CounterValue;

/// Tabular record writer.
///
/// Owns its output stream for the shard's lifetime; the header (when
/// enabled and configured) is written before the first record. Any field
/// containing the separator, a double quote, or a newline is wrapped in
/// double quotes with interior quotes doubled.
pub struct CsvEncoder<W: Write> {
    out: W,
    config: CsvConfig,
    wrote_header: bool,
}

impl<W: Write> CsvEncoder<W> {
    pub fn new(out: W, config: CsvConfig) -> Self {
        Self {
            out,
            config,
            wrote_header: false,
        }
    }

    /// Write one `key,value` record, emitting the header first if pending.
    pub fn write_record(&mut self, key: &str, value: CounterValue) -> Result<(), AnalysisError> {
        if !self.wrote_header {
            self.wrote_header = true;
            if self.config.include_header {
                if let Some(header) = self.config.header.as_deref().filter(|h| !h.is_empty()) {
                    self.out.write_all(header.as_bytes())?;
                    self.out.write_all(NEWLINE.as_bytes())?;
                }
            }
        }
        let field = escape_field(key, &self.config.separator);
        self.out.write_all(field.as_bytes())?;
        self.out.write_all(self.config.separator.as_bytes())?;
        self.out.write_all(value.to_string().as_bytes())?;
        self.out.write_all(NEWLINE.as_bytes())?;
        Ok(())
    }

    /// Flush and hand back the underlying stream.
    pub fn finish(mut self) -> Result<W, AnalysisError> {
        self.out.flush()?;
        Ok(self.out)
    }
}

fn escape_field(field: &str, separator: &str) -> String {
    if field.contains(separator) || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
