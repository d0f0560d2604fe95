use std::collections::BTreeSet;
use std::io::Read;

use flate2::read::GzDecoder;
use serde_json::Value;

use roadtrends::{
    create_output, write_default, AnalysisConfig, AnalysisMode, AnalysisPipeline, CsvConfig,
    CsvEncoder, JsonConfig, JsonEncoder, Lexicon, OutputFormat,
};

fn sample_records() -> Vec<(String, u64)> {
    let pipeline = AnalysisPipeline::new(
        AnalysisConfig {
            mode: AnalysisMode::Brands,
            lane_count: 2,
            ..AnalysisConfig::default()
        },
        Lexicon::builtin(),
    );
    let lines = vec![
        r#"{"title":"Toyota vs Honda","flair":"Question","comments":[{"text":"the Mazda is fine"}]}"#
            .to_string(),
        r#"{"title":"BMW depreciation","text":"resale on the Audi is worse"}"#.to_string(),
    ];
    pipeline
        .run_lines(lines)
        .expect("report")
        .all_records()
        .cloned()
        .collect()
}

#[test]
fn csv_escapes_separator_and_quotes() {
    let mut encoder = CsvEncoder::new(
        Vec::new(),
        CsvConfig {
            include_header: false,
            ..CsvConfig::default()
        },
    );
    encoder
        .write_record(r#"keyword:a,"b""#, 3)
        .expect("write");
    let out = String::from_utf8(encoder.finish().expect("finish")).expect("utf8");
    assert_eq!(out, "\"keyword:a,\"\"b\"\"\",3\n");
}

#[test]
fn csv_header_and_custom_separator_round_trip() {
    let mut encoder = CsvEncoder::new(
        Vec::new(),
        CsvConfig {
            separator: "|".to_string(),
            header: Some("key|count".to_string()),
            include_header: true,
        },
    );
    for (key, count) in [("brand:toyota", 4), ("total:toyota", 9)] {
        encoder.write_record(key, count).expect("write");
    }
    let out = String::from_utf8(encoder.finish().expect("finish")).expect("utf8");
    assert_eq!(out, "key|count\nbrand:toyota|4\ntotal:toyota|9\n");
}

#[test]
fn gzip_output_gains_suffix_and_decodes_back() {
    let dir = tempfile::tempdir().expect("tempdir");
    let base = dir.path().join("part-00000");
    let (writer, path) = create_output(&base, OutputFormat::Csv, true).expect("create");
    assert!(path.to_string_lossy().ends_with("part-00000.csv.gz"));

    let mut encoder = CsvEncoder::new(
        writer,
        CsvConfig {
            include_header: false,
            ..CsvConfig::default()
        },
    );
    encoder.write_record("keyword:jam", 12).expect("write");
    encoder.write_record("keyword:road", 7).expect("write");
    drop(encoder.finish().expect("finish"));

    let file = std::fs::File::open(&path).expect("open");
    let mut decoded = String::new();
    GzDecoder::new(file)
        .read_to_string(&mut decoded)
        .expect("gunzip");
    assert_eq!(decoded, "keyword:jam,12\nkeyword:road,7\n");
}

#[test]
fn default_format_writes_tab_separated_lines_to_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let base = dir.path().join("part-00001");
    let (mut writer, path) = create_output(&base, OutputFormat::Default, false).expect("create");
    let records = vec![("sentiment:positive".to_string(), 5_u64)];
    write_default(&mut writer, &records).expect("write");
    drop(writer);
    let contents = std::fs::read_to_string(&path).expect("read");
    assert_eq!(contents, "sentiment:positive\t5\n");
}

#[test]
fn single_array_json_round_trips_the_result_set() {
    let records = sample_records();
    assert!(!records.is_empty());

    let mut encoder = JsonEncoder::new(
        Vec::new(),
        JsonConfig {
            newline_separated: false,
            ..JsonConfig::default()
        },
    );
    for (key, count) in &records {
        encoder.write_record(key, *count).expect("write");
    }
    let out = String::from_utf8(encoder.finish().expect("finish")).expect("utf8");

    let parsed: Vec<Value> = serde_json::from_str(&out).expect("array");
    let reparsed: BTreeSet<(String, u64)> = parsed
        .iter()
        .map(|record| {
            (
                record["key"].as_str().expect("key").to_string(),
                record["count"].as_u64().expect("count"),
            )
        })
        .collect();
    let original: BTreeSet<(String, u64)> = records.into_iter().collect();
    assert_eq!(reparsed, original);
}

#[test]
fn grouped_json_reflects_category_structure_of_a_real_run() {
    let records = sample_records();
    let mut encoder = JsonEncoder::new(
        Vec::new(),
        JsonConfig {
            as_array: true,
            analysis_type: Some("brands".to_string()),
            ..JsonConfig::default()
        },
    );
    for (key, count) in &records {
        encoder.write_record(key, *count).expect("write");
    }
    let out = String::from_utf8(encoder.finish().expect("finish")).expect("utf8");
    let document: Value = serde_json::from_str(&out).expect("document");

    assert_eq!(document["analysis_type"], "brands");
    let brand_bucket = document["results"]["brand"].as_array().expect("brand bucket");
    assert!(brand_bucket
        .iter()
        .all(|record| record["brand"].is_string()));
    assert!(document["results"]["total"].as_array().is_some());
}

#[test]
fn pretty_and_compact_line_layouts_parse_identically() {
    let records = vec![("location:question:pie".to_string(), 2_u64)];

    let mut compact = JsonEncoder::new(Vec::new(), JsonConfig::default());
    let mut pretty = JsonEncoder::new(
        Vec::new(),
        JsonConfig {
            pretty: true,
            ..JsonConfig::default()
        },
    );
    for (key, count) in &records {
        compact.write_record(key, *count).expect("write");
        pretty.write_record(key, *count).expect("write");
    }
    let compact = String::from_utf8(compact.finish().expect("finish")).expect("utf8");
    let pretty = String::from_utf8(pretty.finish().expect("finish")).expect("utf8");

    let compact_value: Value = serde_json::from_str(compact.trim()).expect("compact");
    let pretty_value: Value = serde_json::from_str(pretty.trim()).expect("pretty");
    assert_eq!(compact_value, pretty_value);
    assert_eq!(compact_value["location"], "pie");
}
