//! Per-record feature extraction.
//!
//! One [`FeatureExtractor`] is built per worker with a fixed analysis mode
//! and a shared lexicon, then reused across every record the worker sees.
//! Extraction is total: malformed content never panics, and a record that is
//! missing a field simply skips the emissions that need it.

use std::sync::Arc;

use chrono::{TimeZone, Timelike, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::AnalysisMode;
use crate::constants::{sentiment, timeframe};
use crate::data::{Comment, Post};
use crate::lexicon::Lexicon;
use crate::types::{CategorizedKey, CounterValue, FlairLabel};
use crate::utils::normalize_text;

/// One categorized counter contribution.
pub type Emission = (CategorizedKey, CounterValue);

/// Literal clock-time mentions such as `7am`, `11 PM`, `7:30pm`.
static CLOCK_TIME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(\d{1,2}(?::\d{2})?)\s*(am|pm)\b").expect("clock-time regex"));

/// Stateless-per-record extractor; applies one mode's rule set per record
/// and, where the mode defines one, the matching per-comment rule.
#[derive(Clone)]
pub struct FeatureExtractor {
    mode: AnalysisMode,
    lexicon: Arc<Lexicon>,
}

impl FeatureExtractor {
    pub fn new(mode: AnalysisMode, lexicon: Arc<Lexicon>) -> Self {
        Self { mode, lexicon }
    }

    /// Mode this extractor was configured with.
    pub fn mode(&self) -> AnalysisMode {
        self.mode
    }

    /// Extract every categorized emission for one record, comments included.
    pub fn extract(&self, post: &Post) -> Vec<Emission> {
        let mut out = Vec::new();
        match self.mode {
            AnalysisMode::Trend => self.trend_post(post, &mut out),
            AnalysisMode::Sentiment => self.sentiment_post(post, &mut out),
            AnalysisMode::Traffic => self.traffic_post(post, &mut out),
            AnalysisMode::Location => self.location_post(post, &mut out),
            AnalysisMode::Topic => self.topic_post(post, &mut out),
            AnalysisMode::Engagement => self.engagement_post(post, &mut out),
            AnalysisMode::Brands => self.brands_post(post, &mut out),
            AnalysisMode::Timeframe => self.timeframe_post(post, &mut out),
        }
        for comment in &post.comments {
            self.extract_comment(comment, &mut out);
        }
        out
    }

    fn extract_comment(&self, comment: &Comment, out: &mut Vec<Emission>) {
        let text = comment.text.as_deref().unwrap_or("");
        match self.mode {
            AnalysisMode::Sentiment => self.sentiment_text(text, None, out),
            AnalysisMode::Trend | AnalysisMode::Traffic => self.generic_text(text, out),
            AnalysisMode::Location => self.location_text(text, None, out),
            AnalysisMode::Brands => self.brand_comment_text(text, out),
            AnalysisMode::Timeframe => {
                self.calendar_fields(comment.created_utc, out);
                self.timeframe_text(text, out);
            }
            AnalysisMode::Topic | AnalysisMode::Engagement => {}
        }
    }

    fn trend_post(&self, post: &Post, out: &mut Vec<Emission>) {
        if let Some(flair) = post.flair_lower() {
            out.push((format!("flair:{flair}"), 1));
        }
        self.generic_text(&post.combined_text(), out);
    }

    /// Keyword / driving-school / phrase scan over normalized text. Shared by
    /// the trend rule and by trend/traffic comment recursion.
    fn generic_text(&self, text: &str, out: &mut Vec<Emission>) {
        let normalized = normalize_text(text);
        if normalized.is_empty() {
            return;
        }
        for token in normalized.split_whitespace() {
            if token.len() > 2 && self.lexicon.is_traffic_keyword(token) {
                out.push((format!("keyword:{token}"), 1));
            }
            if token.len() > 2 && self.lexicon.is_driving_school(token) {
                out.push((format!("school:{token}"), 1));
            }
        }
        for phrase in self.lexicon.phrases() {
            if normalized.contains(phrase) {
                out.push((format!("phrase:{}", phrase.replace(' ', "_")), 1));
            }
        }
    }

    fn sentiment_post(&self, post: &Post, out: &mut Vec<Emission>) {
        self.sentiment_text(&post.combined_text(), post.flair_lower(), out);
    }

    fn sentiment_text(&self, text: &str, flair: Option<FlairLabel>, out: &mut Vec<Emission>) {
        let lowered = text.to_lowercase();
        let normalized = normalize_text(text);
        if normalized.is_empty() {
            return;
        }

        let positive = contained_words(&lowered, self.lexicon.positive_words());
        let negative = contained_words(&lowered, self.lexicon.negative_words());
        let label = classify(positive, negative);

        match flair {
            Some(flair) => out.push((format!("sentiment:{flair}:{label}"), 1)),
            None => out.push((format!("sentiment:{label}"), 1)),
        }

        if !self.lexicon.mentions_traffic(&normalized) {
            return;
        }

        // Road-condition words count double on top of the base lists.
        let traffic_positive = contained_words(&lowered, self.lexicon.traffic_positive_words());
        let traffic_negative = contained_words(&lowered, self.lexicon.traffic_negative_words());
        let weighted_positive = positive + sentiment::TRAFFIC_WEIGHT * traffic_positive;
        let weighted_negative = negative + sentiment::TRAFFIC_WEIGHT * traffic_negative;
        let traffic_label = classify(weighted_positive, weighted_negative);
        out.push((format!("traffic_sentiment:{traffic_label}"), 1));

        let hits = positive + negative + traffic_positive + traffic_negative;
        let total_tokens = normalized.split_whitespace().count() as u64;
        let intensity = intensity_bucket(hits, total_tokens);
        out.push((format!("traffic_sentiment_intensity:{intensity}"), 1));
    }

    fn traffic_post(&self, post: &Post, out: &mut Vec<Emission>) {
        if let Some(flair) = post.flair_lower() {
            out.push((format!("category:{flair}"), 1));
        }
        let lowered = post.combined_text().to_lowercase();
        if lowered.contains("driving school") || lowered.contains("instructor") {
            out.push(("category:learning".to_string(), 1));
        }
        if lowered.contains("test") || lowered.contains("exam") {
            out.push(("category:test".to_string(), 1));
        }
        if lowered.contains("route") || lowered.contains("road") {
            out.push(("category:route".to_string(), 1));
        }
    }

    fn location_post(&self, post: &Post, out: &mut Vec<Emission>) {
        self.location_text(&post.combined_text(), post.flair_lower(), out);
    }

    fn location_text(&self, text: &str, flair: Option<FlairLabel>, out: &mut Vec<Emission>) {
        let normalized = normalize_text(text);
        if normalized.is_empty() {
            return;
        }
        for location in self.lexicon.locations() {
            if normalized.contains(location) {
                match &flair {
                    Some(flair) => out.push((format!("location:{flair}:{location}"), 1)),
                    None => out.push((format!("location:{location}"), 1)),
                }
            }
        }
    }

    fn topic_post(&self, post: &Post, out: &mut Vec<Emission>) {
        if let Some(flair) = post.flair_lower() {
            out.push((format!("topic:{flair}"), 1));
        }
    }

    fn engagement_post(&self, post: &Post, out: &mut Vec<Emission>) {
        if let Some(score) = post.score {
            out.push(("score".to_string(), clamp_value(score)));
        }
        if let Some(comments) = post.num_comments {
            out.push(("comments".to_string(), clamp_value(comments)));
        }
        if let (Some(score), Some(flair)) = (post.score, post.flair_lower()) {
            out.push((format!("score:{flair}"), clamp_value(score)));
        }
    }

    fn brands_post(&self, post: &Post, out: &mut Vec<Emission>) {
        let lowered = post.combined_text().to_lowercase();
        let flair = post.flair_lower();
        for brand in self.lexicon.car_brands() {
            if lowered.contains(brand) {
                match &flair {
                    Some(flair) => out.push((format!("brand:{flair}:{brand}"), 1)),
                    None => out.push((format!("brand:{brand}"), 1)),
                }
            }
        }
    }

    fn brand_comment_text(&self, text: &str, out: &mut Vec<Emission>) {
        let lowered = text.to_lowercase();
        if lowered.is_empty() {
            return;
        }
        for brand in self.lexicon.car_brands() {
            if lowered.contains(brand) {
                out.push((format!("brand_comment:{brand}"), 1));
            }
        }
    }

    fn timeframe_post(&self, post: &Post, out: &mut Vec<Emission>) {
        self.calendar_fields(post.created_utc, out);
        self.timeframe_text(&post.combined_text(), out);
    }

    /// Calendar-derived keys; silently skipped when the timestamp is absent
    /// or out of range.
    fn calendar_fields(&self, created_utc: Option<f64>, out: &mut Vec<Emission>) {
        let Some(ts) = created_utc else {
            return;
        };
        let Some(utc) = Utc.timestamp_opt(ts as i64, 0).single() else {
            return;
        };
        let local = utc.with_timezone(&timeframe::REFERENCE_ZONE);
        let hour = local.hour();

        out.push((format!("time_of_day:{}", time_of_day_bucket(hour)), 1));
        out.push((format!("hour:{hour}"), 1));
        let day = local.format("%A").to_string().to_lowercase();
        out.push((format!("day_of_week:{day}"), 1));
        let day_type = if matches!(day.as_str(), "saturday" | "sunday") {
            "weekend"
        } else {
            "weekday"
        };
        out.push((format!("day_type:{day_type}"), 1));
        let month = local.format("%B").to_string().to_lowercase();
        out.push((format!("month:{month}"), 1));
    }

    fn timeframe_text(&self, text: &str, out: &mut Vec<Emission>) {
        let normalized = normalize_text(text);
        for keyword in self.lexicon.timeframe_keywords() {
            if normalized.contains(keyword) {
                out.push((format!("timeframe:{}", keyword.replace(' ', "_")), 1));
            }
        }
        // The normalizer strips ':' so clock times are matched on raw text.
        for capture in CLOCK_TIME.captures_iter(text) {
            let digits = capture.get(1).map(|m| m.as_str()).unwrap_or("");
            let meridiem = capture.get(2).map(|m| m.as_str()).unwrap_or("");
            let mention = format!("{digits}{}", meridiem.to_lowercase());
            out.push((format!("timeframe:{mention}"), 1));
        }
    }
}

/// Number of list words contained in the text (one hit per list word).
fn contained_words(lowered: &str, words: &[&str]) -> u64 {
    words.iter().filter(|word| lowered.contains(*word)).count() as u64
}

fn classify(positive: u64, negative: u64) -> &'static str {
    if positive > negative {
        "positive"
    } else if negative > positive {
        "negative"
    } else {
        "neutral"
    }
}

fn intensity_bucket(hits: u64, total_tokens: u64) -> &'static str {
    if total_tokens == 0 {
        return "low";
    }
    let ratio = hits as f64 / total_tokens as f64;
    if ratio >= sentiment::INTENSITY_HIGH {
        "high"
    } else if ratio >= sentiment::INTENSITY_MEDIUM {
        "medium"
    } else {
        "low"
    }
}

fn time_of_day_bucket(hour: u32) -> &'static str {
    if (timeframe::MORNING_START..timeframe::MIDDAY_START).contains(&hour) {
        "morning_commute"
    } else if (timeframe::MIDDAY_START..timeframe::EVENING_START).contains(&hour) {
        "midday"
    } else if (timeframe::EVENING_START..timeframe::EVENING_END).contains(&hour) {
        "evening_commute"
    } else {
        "night"
    }
}

fn clamp_value(value: i64) -> CounterValue {
    value.max(0) as CounterValue
}
