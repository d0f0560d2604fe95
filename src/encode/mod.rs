//! Result encoders.
//!
//! Two interchangeable record encoders (tabular and structured) plus the
//! default tab-separated text layout, all writing through an optionally
//! gzip-compressed stream. File-name suffixes follow the selected format and
//! codec so downstream tooling can recognize shards by name.

mod csv;
mod json;

pub use csv::CsvEncoder;
pub use json::JsonEncoder;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;

use crate::config::OutputFormat;
use crate::constants::encode::{CSV_SUFFIX, GZIP_SUFFIX, JSON_SUFFIX, NEWLINE};
use crate::errors::AnalysisError;
use crate::types::CounterValue;

/// Write records in the default layout: one tab-separated `key\tvalue` line
/// per record.
pub fn write_default<'a, W, I>(out: &mut W, records: I) -> Result<(), AnalysisError>
where
    W: Write,
    I: IntoIterator<Item = &'a (String, CounterValue)>,
{
    for (key, value) in records {
        out.write_all(key.as_bytes())?;
        out.write_all(b"\t")?;
        out.write_all(value.to_string().as_bytes())?;
        out.write_all(NEWLINE.as_bytes())?;
    }
    out.flush()?;
    Ok(())
}

/// Resolve the shard file name for a format/compression combination.
pub fn output_file_name(base: &str, format: OutputFormat, compress: bool) -> String {
    let mut name = String::from(base);
    match format {
        OutputFormat::Default => {}
        OutputFormat::Csv => name.push_str(CSV_SUFFIX),
        OutputFormat::Json => name.push_str(JSON_SUFFIX),
    }
    if compress {
        name.push_str(GZIP_SUFFIX);
    }
    name
}

/// Create the shard's output file, transparently wrapping it in a gzip
/// stream when requested. Returns the writer plus the path actually created
/// (with format and codec suffixes applied).
pub fn create_output(
    base: &Path,
    format: OutputFormat,
    compress: bool,
) -> Result<(Box<dyn Write>, PathBuf), AnalysisError> {
    let file_name = base
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    let resolved = base.with_file_name(output_file_name(file_name, format, compress));
    let file = File::create(&resolved)?;
    let writer: Box<dyn Write> = if compress {
        Box::new(GzEncoder::new(BufWriter::new(file), Compression::default()))
    } else {
        Box::new(BufWriter::new(file))
    };
    Ok((writer, resolved))
}
