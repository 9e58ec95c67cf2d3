// Keyword-lexicon sentiment scoring.
//
// This is a coarse directional signal: each lexicon term either appears in
// the corpus or it doesn't. No tokenization, negation handling or weighting.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Lexicon
// ---------------------------------------------------------------------------

const DEFAULT_POSITIVE: &[&str] = &[
    "great",
    "good",
    "excellent",
    "strong",
    "best",
    "start",
    "must start",
    "breakout",
    "stud",
    "rb1",
    "wr1",
    "te1",
    "league winner",
    "smash play",
    "explosive",
    "touchdown",
    "targets",
    "volume",
    "opportunity",
];

const DEFAULT_NEGATIVE: &[&str] = &[
    "bad",
    "terrible",
    "worst",
    "bench",
    "sit",
    "avoid",
    "bust",
    "injured",
    "injury",
    "questionable",
    "doubtful",
    "out",
    "limited",
    "concerned",
    "risky",
    "trap",
    "fade",
];

/// Positive and negative keyword lists.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Lexicon {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            positive: DEFAULT_POSITIVE.iter().map(|s| s.to_string()).collect(),
            negative: DEFAULT_NEGATIVE.iter().map(|s| s.to_string()).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Verdict
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Neutral => "neutral",
            SentimentLabel::Negative => "negative",
        }
    }
}

/// Keyword hit counts and the score derived from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentVerdict {
    pub positive_count: u32,
    pub negative_count: u32,
    /// In [-1, 1]; exactly 0 when nothing matched.
    pub score: f64,
    pub label: SentimentLabel,
}

impl SentimentVerdict {
    pub fn from_counts(positive_count: u32, negative_count: u32) -> Self {
        let total = positive_count + negative_count;
        let score = if total == 0 {
            0.0
        } else {
            (positive_count as f64 - negative_count as f64) / total as f64
        };
        let label = match positive_count.cmp(&negative_count) {
            std::cmp::Ordering::Greater => SentimentLabel::Positive,
            std::cmp::Ordering::Less => SentimentLabel::Negative,
            std::cmp::Ordering::Equal => SentimentLabel::Neutral,
        };
        Self {
            positive_count,
            negative_count,
            score,
            label,
        }
    }
}

/// Score a corpus against the lexicon. Matching is case-insensitive substring
/// search, and a keyword counts once no matter how often it repeats.
pub fn score_corpus(corpus: &str, lexicon: &Lexicon) -> SentimentVerdict {
    let lower = corpus.to_lowercase();
    let hits = |terms: &[String]| -> u32 {
        terms
            .iter()
            .filter(|term| !term.is_empty() && lower.contains(&term.to_lowercase()))
            .count() as u32
    };
    SentimentVerdict::from_counts(hits(&lexicon.positive), hits(&lexicon.negative))
}

// ---------------------------------------------------------------------------
// Lookup result
// ---------------------------------------------------------------------------

/// A discussion thread surfaced alongside a sentiment lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscussionLink {
    pub title: String,
    pub score: i64,
    pub url: String,
}

/// Outcome of one forum sentiment lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub query: String,
    pub posts_found: usize,
    /// Sum of post scores across matched posts.
    pub total_score: i64,
    /// Sum of the posts' reported comment counts.
    pub total_comments: u64,
    /// Number of comments actually fetched and scanned.
    pub comments_scanned: usize,
    pub verdict: SentimentVerdict,
    pub top_discussions: Vec<DiscussionLink>,
}

impl SentimentResult {
    pub fn score(&self) -> f64 {
        self.verdict.score
    }
}

// ---------------------------------------------------------------------------
// Mentions
// ---------------------------------------------------------------------------

/// Names from `names` mentioned in `text`, by full name or last name,
/// case-insensitive, deduplicated in input order.
pub fn extract_player_mentions(text: &str, names: &[String]) -> Vec<String> {
    let lower = text.to_lowercase();
    let mut mentions: Vec<String> = Vec::new();
    for name in names {
        let lower_name = name.to_lowercase();
        let last_name = lower_name.split_whitespace().last().unwrap_or("");
        let mentioned = (!lower_name.is_empty() && lower.contains(&lower_name))
            || (!last_name.is_empty() && lower.contains(last_name));
        if mentioned && !mentions.contains(name) {
            mentions.push(name.clone());
        }
    }
    mentions
}
