use serde::Serialize;

use super::thresholds::{
    ChannelThresholds, CompetitivenessThresholds, ContentThresholds, EngagementThresholds,
    PresenceThresholds,
};

/// One of the five administrator-facing sensitivity steps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SensitivityLevel {
    pub value: u8,
    pub label: &'static str,
    pub multiplier: f64,
}

pub const SENSITIVITY_LEVELS: [SensitivityLevel; 5] = [
    SensitivityLevel {
        value: 1,
        label: "Rigoroso",
        multiplier: 0.6,
    },
    SensitivityLevel {
        value: 2,
        label: "Exigente",
        multiplier: 0.8,
    },
    SensitivityLevel {
        value: 3,
        label: "Padrão",
        multiplier: 1.0,
    },
    SensitivityLevel {
        value: 4,
        label: "Generoso",
        multiplier: 1.3,
    },
    SensitivityLevel {
        value: 5,
        label: "Muito generoso",
        multiplier: 1.6,
    },
];

/// Level used when nothing has been customized.
pub const DEFAULT_SENSITIVITY: u8 = 3;

// Ceilings for scaled fields
const FOLLOWER_GROWTH_CEIL: f64 = 50.0;
const POSTS_PER_WEEK_CEIL: f64 = 14.0;
const REACH_RATE_CEIL: f64 = 30.0;
const ENGAGEMENT_RATE_CEIL: f64 = 15.0;
const COMMENT_RATE_CEIL: f64 = 5.0;
const SAVE_RATE_CEIL: f64 = 5.0;
const HASHTAG_LIFT_CEIL: f64 = 50.0;
const ENG_RATIO_MAX_CEIL: f64 = 5.0;

pub fn sensitivity_level(value: u8) -> Option<&'static SensitivityLevel> {
    SENSITIVITY_LEVELS.iter().find(|l| l.value == value)
}

fn scale(value: f64, multiplier: f64, ceiling: f64) -> f64 {
    (value * multiplier).clamp(0.0, ceiling)
}

/// Scale a channel's thresholds by `multiplier`.
///
/// Rates and volumes are scaled then clamped to `[0, ceiling]`. SEO positions,
/// sentiment, trend, pillar deviation and the competitiveness floor/baseline
/// pass through untouched. The consistency breakpoints are scaled with no
/// ceiling, which keeps their order for any positive multiplier.
///
/// Any multiplier is accepted, not only the catalog ones. Applying this twice
/// compounds, so callers must always start from catalog defaults.
pub fn apply_sensitivity(defaults: &ChannelThresholds, multiplier: f64) -> ChannelThresholds {
    let p = &defaults.presence;
    let e = &defaults.engagement;
    let c = &defaults.content;
    let k = &defaults.competitiveness;

    ChannelThresholds {
        presence: PresenceThresholds {
            follower_growth_max_pct: scale(
                p.follower_growth_max_pct,
                multiplier,
                FOLLOWER_GROWTH_CEIL,
            ),
            posts_per_week_max: scale(p.posts_per_week_max, multiplier, POSTS_PER_WEEK_CEIL),
            reach_rate_max_pct: scale(p.reach_rate_max_pct, multiplier, REACH_RATE_CEIL),
            seo_position_cutoff: p.seo_position_cutoff,
            seo_top_position: p.seo_top_position,
        },
        engagement: EngagementThresholds {
            engagement_rate_max_pct: scale(
                e.engagement_rate_max_pct,
                multiplier,
                ENGAGEMENT_RATE_CEIL,
            ),
            comment_rate_max_pct: scale(e.comment_rate_max_pct, multiplier, COMMENT_RATE_CEIL),
            save_rate_max_pct: scale(e.save_rate_max_pct, multiplier, SAVE_RATE_CEIL),
            sentiment_score_max: e.sentiment_score_max,
            trend_threshold_pct: e.trend_threshold_pct,
        },
        content: ContentThresholds {
            pillar_deviation_multiplier: c.pillar_deviation_multiplier,
            consistency_ratio_thresholds: c.consistency_ratio_thresholds.map(|v| v * multiplier),
            hashtag_lift_threshold_pct: scale(
                c.hashtag_lift_threshold_pct,
                multiplier,
                HASHTAG_LIFT_CEIL,
            ),
        },
        competitiveness: CompetitivenessThresholds {
            eng_ratio_min: k.eng_ratio_min,
            eng_ratio_max: scale(k.eng_ratio_max, multiplier, ENG_RATIO_MAX_CEIL),
            seo_advantage_max: k.seo_advantage_max,
            neutral_score: k.neutral_score,
        },
    }
}
