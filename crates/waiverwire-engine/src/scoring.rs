// Priority scoring for waiver pickups and wording for drop candidates.

use serde::Serialize;
use waiverwire_core::config::PriorityWeights;

/// Trending component: one point per `divisor` adds, capped.
pub fn trending_points(count: u64, weights: &PriorityWeights) -> f64 {
    (count as f64 / weights.trending_divisor).min(weights.trending_cap)
}

/// Composite pickup priority.
///
/// `trending + need bonus + (sentiment + 1) * scale`; the sentiment term is
/// omitted entirely when no sentiment is available.
pub fn pickup_priority(
    trending_count: u64,
    position_need: bool,
    sentiment: Option<f64>,
    weights: &PriorityWeights,
) -> f64 {
    let mut score = trending_points(trending_count, weights);
    if position_need {
        score += weights.position_need_bonus;
    }
    if let Some(s) = sentiment {
        score += (s + 1.0) * weights.sentiment_scale;
    }
    score
}

/// Reason text for a rostered player showing up in trending drops.
pub fn drop_reason(count: u64, heavy_threshold: u64) -> String {
    if count > heavy_threshold {
        format!("Heavily dropped league-wide ({count} leagues)")
    } else {
        format!("Trending drop ({count} leagues)")
    }
}

// ---------------------------------------------------------------------------
// Tiers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PriorityTier {
    High,
    Medium,
    Low,
}

impl PriorityTier {
    pub fn from_score(score: f64) -> Self {
        if score > 70.0 {
            PriorityTier::High
        } else if score > 40.0 {
            PriorityTier::Medium
        } else {
            PriorityTier::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PriorityTier::High => "HIGH",
            PriorityTier::Medium => "MEDIUM",
            PriorityTier::Low => "LOW",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            PriorityTier::High => "priority-high",
            PriorityTier::Medium => "priority-medium",
            PriorityTier::Low => "priority-low",
        }
    }
}
