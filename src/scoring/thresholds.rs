use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::channel::{Channel, ALL_CHANNELS};

/// Calibration thresholds for a single channel.
///
/// Serialized with the keys the dashboard has always stored, so a persisted
/// document round-trips unchanged:
/// ```yaml
/// presenca:
///   followerGrowthMaxPct: 5
///   postsPerWeekMax: 7
/// engajamento:
///   engagementRateMaxPct: 3
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ChannelThresholds {
    #[serde(rename = "presenca")]
    pub presence: PresenceThresholds,

    #[serde(rename = "engajamento")]
    pub engagement: EngagementThresholds,

    #[serde(rename = "conteudo")]
    pub content: ContentThresholds,

    #[serde(rename = "competitividade")]
    pub competitiveness: CompetitivenessThresholds,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PresenceThresholds {
    /// Follower growth (%) that earns the full presence score
    pub follower_growth_max_pct: f64,
    pub posts_per_week_max: f64,
    pub reach_rate_max_pct: f64,
    /// SERP positions beyond this earn nothing
    pub seo_position_cutoff: f64,
    pub seo_top_position: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EngagementThresholds {
    pub engagement_rate_max_pct: f64,
    pub comment_rate_max_pct: f64,
    pub save_rate_max_pct: f64,
    pub sentiment_score_max: f64,
    /// Period-over-period change (%) counted as a trend
    pub trend_threshold_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ContentThresholds {
    pub pillar_deviation_multiplier: f64,
    /// Ascending breakpoints for posting consistency ratio
    pub consistency_ratio_thresholds: [f64; 3],
    pub hashtag_lift_threshold_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompetitivenessThresholds {
    pub eng_ratio_min: f64,
    pub eng_ratio_max: f64,
    pub seo_advantage_max: f64,
    /// Score awarded when there is no competitor to compare against
    pub neutral_score: f64,
}

impl ChannelThresholds {
    /// Every numeric field with its document path, e.g. `presenca.postsPerWeekMax`.
    pub fn numeric_leaves(&self) -> Vec<(String, f64)> {
        let p = &self.presence;
        let e = &self.engagement;
        let c = &self.content;
        let k = &self.competitiveness;

        let mut leaves = vec![
            ("presenca.followerGrowthMaxPct".to_string(), p.follower_growth_max_pct),
            ("presenca.postsPerWeekMax".to_string(), p.posts_per_week_max),
            ("presenca.reachRateMaxPct".to_string(), p.reach_rate_max_pct),
            ("presenca.seoPositionCutoff".to_string(), p.seo_position_cutoff),
            ("presenca.seoTopPosition".to_string(), p.seo_top_position),
            ("engajamento.engagementRateMaxPct".to_string(), e.engagement_rate_max_pct),
            ("engajamento.commentRateMaxPct".to_string(), e.comment_rate_max_pct),
            ("engajamento.saveRateMaxPct".to_string(), e.save_rate_max_pct),
            ("engajamento.sentimentScoreMax".to_string(), e.sentiment_score_max),
            ("engajamento.trendThresholdPct".to_string(), e.trend_threshold_pct),
            ("conteudo.pillarDeviationMultiplier".to_string(), c.pillar_deviation_multiplier),
        ];
        for (i, v) in c.consistency_ratio_thresholds.iter().enumerate() {
            leaves.push((format!("conteudo.consistencyRatioThresholds[{}]", i), *v));
        }
        leaves.extend([
            ("conteudo.hashtagLiftThresholdPct".to_string(), c.hashtag_lift_threshold_pct),
            ("competitividade.engRatioMin".to_string(), k.eng_ratio_min),
            ("competitividade.engRatioMax".to_string(), k.eng_ratio_max),
            ("competitividade.seoAdvantageMax".to_string(), k.seo_advantage_max),
            ("competitividade.neutralScore".to_string(), k.neutral_score),
        ]);
        leaves
    }
}

/// Hand-tuned default thresholds for a channel.
///
/// Organic reach and engagement norms differ per platform, so these are
/// calibration constants rather than derived values.
pub fn defaults_for(channel: Channel) -> ChannelThresholds {
    match channel {
        Channel::Instagram => ChannelThresholds {
            presence: PresenceThresholds {
                follower_growth_max_pct: 5.0,
                posts_per_week_max: 7.0,
                reach_rate_max_pct: 10.0,
                seo_position_cutoff: 20.0,
                seo_top_position: 3.0,
            },
            engagement: EngagementThresholds {
                engagement_rate_max_pct: 3.0,
                comment_rate_max_pct: 0.5,
                save_rate_max_pct: 1.0,
                sentiment_score_max: 1.0,
                trend_threshold_pct: 10.0,
            },
            content: ContentThresholds {
                pillar_deviation_multiplier: 1.5,
                consistency_ratio_thresholds: [0.5, 0.75, 0.9],
                hashtag_lift_threshold_pct: 15.0,
            },
            competitiveness: standard_competitiveness(),
        },
        Channel::Tiktok => ChannelThresholds {
            presence: PresenceThresholds {
                follower_growth_max_pct: 10.0,
                posts_per_week_max: 10.0,
                reach_rate_max_pct: 20.0,
                seo_position_cutoff: 20.0,
                seo_top_position: 3.0,
            },
            engagement: EngagementThresholds {
                // Short-form video runs at roughly twice Instagram's rate
                engagement_rate_max_pct: 6.0,
                comment_rate_max_pct: 1.0,
                save_rate_max_pct: 1.5,
                sentiment_score_max: 1.0,
                trend_threshold_pct: 15.0,
            },
            content: ContentThresholds {
                pillar_deviation_multiplier: 1.5,
                consistency_ratio_thresholds: [0.5, 0.75, 0.9],
                hashtag_lift_threshold_pct: 20.0,
            },
            competitiveness: CompetitivenessThresholds {
                eng_ratio_max: 2.5,
                ..standard_competitiveness()
            },
        },
        Channel::Youtube => ChannelThresholds {
            presence: PresenceThresholds {
                follower_growth_max_pct: 3.0,
                posts_per_week_max: 3.0,
                reach_rate_max_pct: 8.0,
                seo_position_cutoff: 10.0,
                seo_top_position: 3.0,
            },
            engagement: EngagementThresholds {
                engagement_rate_max_pct: 4.0,
                comment_rate_max_pct: 0.8,
                save_rate_max_pct: 0.5,
                sentiment_score_max: 1.0,
                trend_threshold_pct: 10.0,
            },
            content: ContentThresholds {
                pillar_deviation_multiplier: 2.0,
                consistency_ratio_thresholds: [0.4, 0.6, 0.8],
                hashtag_lift_threshold_pct: 10.0,
            },
            competitiveness: CompetitivenessThresholds {
                seo_advantage_max: 15.0,
                ..standard_competitiveness()
            },
        },
        Channel::Linkedin => ChannelThresholds {
            presence: PresenceThresholds {
                follower_growth_max_pct: 4.0,
                posts_per_week_max: 5.0,
                reach_rate_max_pct: 6.0,
                seo_position_cutoff: 20.0,
                seo_top_position: 3.0,
            },
            engagement: EngagementThresholds {
                engagement_rate_max_pct: 2.0,
                comment_rate_max_pct: 0.3,
                save_rate_max_pct: 0.3,
                sentiment_score_max: 1.0,
                trend_threshold_pct: 10.0,
            },
            content: ContentThresholds {
                pillar_deviation_multiplier: 1.5,
                consistency_ratio_thresholds: [0.5, 0.75, 0.9],
                hashtag_lift_threshold_pct: 10.0,
            },
            competitiveness: standard_competitiveness(),
        },
        Channel::Twitter => ChannelThresholds {
            presence: PresenceThresholds {
                follower_growth_max_pct: 3.0,
                posts_per_week_max: 14.0,
                reach_rate_max_pct: 5.0,
                seo_position_cutoff: 20.0,
                seo_top_position: 3.0,
            },
            engagement: EngagementThresholds {
                engagement_rate_max_pct: 1.0,
                comment_rate_max_pct: 0.2,
                save_rate_max_pct: 0.2,
                sentiment_score_max: 1.0,
                trend_threshold_pct: 20.0,
            },
            content: ContentThresholds {
                pillar_deviation_multiplier: 1.5,
                consistency_ratio_thresholds: [0.6, 0.8, 0.95],
                hashtag_lift_threshold_pct: 10.0,
            },
            competitiveness: standard_competitiveness(),
        },
        Channel::Facebook => ChannelThresholds {
            presence: PresenceThresholds {
                follower_growth_max_pct: 2.0,
                posts_per_week_max: 7.0,
                reach_rate_max_pct: 5.0,
                seo_position_cutoff: 20.0,
                seo_top_position: 3.0,
            },
            engagement: EngagementThresholds {
                engagement_rate_max_pct: 1.5,
                comment_rate_max_pct: 0.3,
                save_rate_max_pct: 0.2,
                sentiment_score_max: 1.0,
                trend_threshold_pct: 10.0,
            },
            content: ContentThresholds {
                pillar_deviation_multiplier: 1.5,
                consistency_ratio_thresholds: [0.5, 0.75, 0.9],
                hashtag_lift_threshold_pct: 10.0,
            },
            competitiveness: standard_competitiveness(),
        },
    }
}

fn standard_competitiveness() -> CompetitivenessThresholds {
    CompetitivenessThresholds {
        eng_ratio_min: 0.5,
        eng_ratio_max: 2.0,
        seo_advantage_max: 10.0,
        neutral_score: 12.5,
    }
}

/// Catalog defaults for every channel.
pub fn channel_defaults() -> BTreeMap<Channel, ChannelThresholds> {
    ALL_CHANNELS.iter().map(|c| (*c, defaults_for(*c))).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_default_leaf_non_negative() {
        for (channel, thresholds) in channel_defaults() {
            for (path, value) in thresholds.numeric_leaves() {
                assert!(value >= 0.0, "{}.{} is negative", channel, path);
            }
        }
    }

    #[test]
    fn test_defaults_cover_all_channels() {
        assert_eq!(channel_defaults().len(), ALL_CHANNELS.len());
    }

    #[test]
    fn test_tiktok_engagement_double_instagram() {
        let ig = defaults_for(Channel::Instagram);
        let tk = defaults_for(Channel::Tiktok);
        assert_eq!(ig.engagement.engagement_rate_max_pct, 3.0);
        assert_eq!(
            tk.engagement.engagement_rate_max_pct,
            ig.engagement.engagement_rate_max_pct * 2.0
        );
    }

    #[test]
    fn test_consistency_breakpoints_ascending() {
        for (channel, thresholds) in channel_defaults() {
            let [a, b, c] = thresholds.content.consistency_ratio_thresholds;
            assert!(a <= b && b <= c, "{} breakpoints out of order", channel);
        }
    }

    #[test]
    fn test_numeric_leaves_count() {
        let leaves = defaults_for(Channel::Youtube).numeric_leaves();
        assert_eq!(leaves.len(), 19);
        assert!(leaves
            .iter()
            .any(|(path, v)| path == "competitividade.seoAdvantageMax" && *v == 15.0));
    }

    #[test]
    fn test_serde_uses_document_keys() {
        let json = serde_json::to_value(defaults_for(Channel::Instagram)).unwrap();
        assert_eq!(json["presenca"]["postsPerWeekMax"], 7.0);
        assert_eq!(json["engajamento"]["engagementRateMaxPct"], 3.0);
        assert_eq!(json["conteudo"]["consistencyRatioThresholds"][2], 0.9);
        assert_eq!(json["competitividade"]["neutralScore"], 12.5);
    }

    #[test]
    fn test_yaml_roundtrip() {
        let thresholds = defaults_for(Channel::Linkedin);
        let yaml = serde_saphyr::to_string(&thresholds).unwrap();
        let parsed: ChannelThresholds = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(thresholds, parsed);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let mut json = serde_json::to_value(defaults_for(Channel::Facebook)).unwrap();
        json["presenca"]["followersMax"] = serde_json::json!(3);
        let result: Result<ChannelThresholds, _> = serde_json::from_value(json);
        assert!(result.is_err());
    }
}
