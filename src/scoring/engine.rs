use serde::{Deserialize, Serialize};

use super::channel::Channel;
use super::classify::{classify_score, ScoreLabel};
use super::config::FibboScoreConfig;

/// Upper bound for each dimension so four of them sum to 100.
pub const DIMENSION_MAX: f64 = 25.0;

/// The four dimension sub-scores for one channel.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
pub struct DimensionScores {
    pub presence: f64,
    pub engagement: f64,
    pub content: f64,
    pub competitiveness: f64,
}

impl DimensionScores {
    pub fn total(&self) -> f64 {
        self.presence + self.engagement + self.content + self.competitiveness
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelScore {
    pub channel: Channel,
    pub dimensions: DimensionScores,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChannelContribution {
    pub channel: Channel,
    pub weight: f64,
    /// Unweighted channel total
    pub total: f64,
    /// Points this channel adds to the overall score
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AggregateResult {
    pub score: f64,
    pub label: ScoreLabel,
    pub breakdown: Vec<ChannelContribution>,
}

/// Combine per-channel totals into one overall score, weighted by the
/// config's channel weights. Returns `None` when nothing carries weight.
pub fn aggregate(scores: &[ChannelScore], config: &FibboScoreConfig) -> Option<AggregateResult> {
    let weight_sum: f64 = scores.iter().map(|s| config.weight_for(s.channel)).sum();
    if scores.is_empty() || weight_sum <= 0.0 {
        return None;
    }

    let mut breakdown = Vec::with_capacity(scores.len());
    let mut score = 0.0;
    for s in scores {
        let weight = config.weight_for(s.channel);
        let total = s.dimensions.total();
        let share = total * weight / weight_sum;
        score += share;
        breakdown.push(ChannelContribution {
            channel: s.channel,
            weight,
            total,
            share,
        });
    }

    Some(AggregateResult {
        score,
        label: classify_score(score),
        breakdown,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(presence: f64, engagement: f64, content: f64, competitiveness: f64) -> DimensionScores {
        DimensionScores {
            presence,
            engagement,
            content,
            competitiveness,
        }
    }

    /// A channel scoring `each` on all four dimensions
    fn channel_score(channel: Channel, each: f64) -> ChannelScore {
        ChannelScore {
            channel,
            dimensions: dims(each, each, each, each),
        }
    }

    #[test]
    fn test_dimension_total() {
        assert_eq!(dims(20.0, 15.0, 10.0, 12.5).total(), 57.5);
        assert_eq!(dims(DIMENSION_MAX, DIMENSION_MAX, DIMENSION_MAX, DIMENSION_MAX).total(), 100.0);
    }

    #[test]
    fn test_equal_weights_is_mean() {
        let scores = vec![
            channel_score(Channel::Instagram, 20.0),
            channel_score(Channel::Tiktok, 10.0),
        ];
        let result = aggregate(&scores, &FibboScoreConfig::default()).unwrap();
        assert_eq!(result.score, 60.0);
        assert_eq!(result.label, ScoreLabel::Average);
        assert_eq!(result.breakdown.len(), 2);
        assert_eq!(result.breakdown[0].share, 40.0);
    }

    #[test]
    fn test_weights_shift_score() {
        let mut config = FibboScoreConfig::default();
        config.weights.insert(Channel::Instagram, 2.0);
        config.weights.insert(Channel::Tiktok, 0.5);
        let scores = vec![
            channel_score(Channel::Instagram, 25.0),
            channel_score(Channel::Tiktok, 0.0),
        ];
        let result = aggregate(&scores, &config).unwrap();
        assert!((result.score - 80.0).abs() < 1e-9);
        assert_eq!(result.label, ScoreLabel::Excellent);
    }

    #[test]
    fn test_zero_weight_channel_ignored() {
        let mut config = FibboScoreConfig::default();
        config.weights.insert(Channel::Facebook, 0.0);
        let scores = vec![
            channel_score(Channel::Youtube, 10.0),
            channel_score(Channel::Facebook, 25.0),
        ];
        let result = aggregate(&scores, &config).unwrap();
        assert_eq!(result.score, 40.0);
        assert_eq!(result.breakdown[1].share, 0.0);
    }

    #[test]
    fn test_no_scores_or_weight() {
        assert!(aggregate(&[], &FibboScoreConfig::default()).is_none());

        let mut config = FibboScoreConfig::default();
        config.weights.insert(Channel::Linkedin, 0.0);
        let scores = vec![channel_score(Channel::Linkedin, 10.0)];
        assert!(aggregate(&scores, &config).is_none());
    }
}
