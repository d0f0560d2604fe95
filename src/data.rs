use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::FlairLabel;

/// One social-media post: optional text fields plus ordered comments.
///
/// Every field is optional; a missing text-like field behaves as an empty
/// string and a missing numeric field suppresses the emissions that need it.
/// Unknown upstream fields are ignored during decoding.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Post {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flair: Option<String>,
    /// Unix timestamp with fractional seconds, as scraped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_utc: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_comments: Option<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Comment>,
}

/// One comment under a post.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Comment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_utc: Option<f64>,
}

impl Post {
    /// Title and body joined with a single space (either side may be empty).
    pub fn combined_text(&self) -> String {
        format!(
            "{} {}",
            self.title.as_deref().unwrap_or(""),
            self.text.as_deref().unwrap_or("")
        )
    }

    /// Lowercased flair, treating the empty string as absent.
    pub fn flair_lower(&self) -> Option<FlairLabel> {
        self.flair
            .as_deref()
            .filter(|flair| !flair.is_empty())
            .map(|flair| flair.to_lowercase())
    }
}

/// Result of decoding an input shard: the records that survived structural
/// validation plus the count of payloads that did not.
#[derive(Clone, Debug, Default)]
pub struct DecodedBatch {
    pub posts: Vec<Post>,
    pub skipped: u64,
}

/// Decode one line as a [`Post`], or `None` when it is blank or malformed.
pub fn decode_line(line: &str) -> Option<Post> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    match serde_json::from_str(line) {
        Ok(post) => Some(post),
        Err(err) => {
            debug!("skipping malformed record: {err}");
            None
        }
    }
}

/// Decode an input shard under the "decode or skip" contract.
///
/// The usual shape is one JSON object per line. One upstream variant ships a
/// single JSON array spanning the whole shard; that shape is detected from
/// the first non-blank line and decoded as a unit (counted as one skip when
/// the array itself is malformed).
pub fn decode_lines<I>(lines: I) -> DecodedBatch
where
    I: IntoIterator<Item = String>,
{
    let lines: Vec<String> = lines.into_iter().collect();
    let first_payload = lines.iter().map(|line| line.trim()).find(|l| !l.is_empty());

    if matches!(first_payload, Some(payload) if payload.starts_with('[')) {
        let joined: String = lines.iter().map(|line| line.trim()).collect();
        return match serde_json::from_str::<Vec<Post>>(&joined) {
            Ok(posts) => DecodedBatch { posts, skipped: 0 },
            Err(err) => {
                debug!("skipping malformed record array: {err}");
                DecodedBatch {
                    posts: Vec::new(),
                    skipped: 1,
                }
            }
        };
    }

    let mut batch = DecodedBatch::default();
    for line in &lines {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match decode_line(trimmed) {
            Some(post) => batch.posts.push(post),
            None => batch.skipped += 1,
        }
    }
    batch
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_line_ignores_unknown_fields() {
        let post = decode_line(
            r#"{"title":"Test day","score":12,"url":"https://example.invalid","ups":3}"#,
        )
        .expect("post");
        assert_eq!(post.title.as_deref(), Some("Test day"));
        assert_eq!(post.score, Some(12));
        assert!(post.comments.is_empty());
    }

    #[test]
    fn decode_lines_counts_malformed_records() {
        let lines = vec![
            r#"{"title":"ok"}"#.to_string(),
            "not json".to_string(),
            String::new(),
            r#"{"text":"also ok"}"#.to_string(),
        ];
        let batch = decode_lines(lines);
        assert_eq!(batch.posts.len(), 2);
        assert_eq!(batch.skipped, 1);
    }

    #[test]
    fn decode_lines_accepts_single_array_payload() {
        let lines = vec![
            "[".to_string(),
            r#"{"title":"a"},"#.to_string(),
            r#"{"title":"b"}"#.to_string(),
            "]".to_string(),
        ];
        let batch = decode_lines(lines);
        assert_eq!(batch.posts.len(), 2);
        assert_eq!(batch.skipped, 0);
    }

    #[test]
    fn empty_flair_is_treated_as_absent() {
        let post = decode_line(r#"{"flair":""}"#).expect("post");
        assert_eq!(post.flair_lower(), None);
        let post = decode_line(r#"{"flair":"Question"}"#).expect("post");
        assert_eq!(post.flair_lower().as_deref(), Some("question"));
    }

    #[test]
    fn malformed_comment_entry_drops_the_whole_record() {
        assert!(decode_line(r#"{"title":"x","comments":[{"text":1}]}"#).is_none());
    }
}
