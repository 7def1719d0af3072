use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::scoring::{classify_score, Channel, DimensionScores, ScoreLabel};

/// One persisted score snapshot for an entity on a channel and date.
///
/// Rows are written by the metrics pipeline and never mutated; a newer
/// `score_date` supersedes older rows for the same entity and channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FibboScoreRecord {
    pub project_id: String,
    pub entity_id: String,
    #[serde(default)]
    pub entity_name: Option<String>,
    pub channel: Channel,
    pub score_date: NaiveDate,
    pub presence_score: f64,
    pub engagement_score: f64,
    pub content_score: f64,
    pub competitiveness_score: f64,
    pub total_score: f64,
    /// Metrics the score was computed from, kept to explain it
    #[serde(default)]
    pub raw_metrics: BTreeMap<String, serde_json::Value>,
}

impl FibboScoreRecord {
    pub fn dimensions(&self) -> DimensionScores {
        DimensionScores {
            presence: self.presence_score,
            engagement: self.engagement_score,
            content: self.content_score,
            competitiveness: self.competitiveness_score,
        }
    }

    pub fn label(&self) -> ScoreLabel {
        classify_score(self.total_score)
    }

    /// Name to show, falling back to the entity id.
    pub fn display_name(&self) -> &str {
        self.entity_name.as_deref().unwrap_or(&self.entity_id)
    }

    /// Composite key the latest-score filter deduplicates on.
    pub fn entity_channel_key(&self) -> String {
        format!("{}_{}", self.entity_id, self.channel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_row() {
        let json = r#"{
            "project_id": "acme",
            "entity_id": "brand-1",
            "channel": "instagram",
            "score_date": "2026-03-01",
            "presence_score": 20,
            "engagement_score": 18.5,
            "content_score": 15,
            "competitiveness_score": 12.5,
            "total_score": 66,
            "raw_metrics": { "engagement_rate_pct": 2.4 }
        }"#;
        let row: FibboScoreRecord = serde_json::from_str(json).unwrap();
        assert_eq!(row.channel, Channel::Instagram);
        assert_eq!(row.score_date, NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
        assert_eq!(row.dimensions().total(), 66.0);
        assert_eq!(row.label(), ScoreLabel::Strong);
        assert_eq!(row.display_name(), "brand-1");
        assert_eq!(row.entity_channel_key(), "brand-1_instagram");
        assert_eq!(row.raw_metrics["engagement_rate_pct"], 2.4);
    }

    #[test]
    fn test_missing_optional_fields() {
        let json = r#"{
            "project_id": "acme",
            "entity_id": "rival",
            "entity_name": "Rival Co",
            "channel": "tiktok",
            "score_date": "2026-03-02",
            "presence_score": 5,
            "engagement_score": 5,
            "content_score": 5,
            "competitiveness_score": 5,
            "total_score": 20
        }"#;
        let row: FibboScoreRecord = serde_json::from_str(json).unwrap();
        assert!(row.raw_metrics.is_empty());
        assert_eq!(row.display_name(), "Rival Co");
        assert_eq!(row.label(), ScoreLabel::Critical);
    }

    #[test]
    fn test_non_numeric_raw_metrics() {
        let json = r#"{
            "project_id": "acme",
            "entity_id": "brand-1",
            "channel": "youtube",
            "score_date": "2026-03-03",
            "presence_score": 10,
            "engagement_score": 10,
            "content_score": 10,
            "competitiveness_score": 10,
            "total_score": 40,
            "raw_metrics": {
                "views": 1200,
                "top_video": "launch-teaser",
                "sentiment": { "positive": 0.7, "negative": 0.1 },
                "seo_position": null
            }
        }"#;
        let row: FibboScoreRecord = serde_json::from_str(json).unwrap();
        assert_eq!(row.raw_metrics.len(), 4);
        assert_eq!(row.raw_metrics["views"], 1200);
        assert_eq!(row.raw_metrics["top_video"], "launch-teaser");
        assert_eq!(row.raw_metrics["sentiment"]["positive"], 0.7);
        assert!(row.raw_metrics["seo_position"].is_null());
    }
}
