use serde::{Deserialize, Serialize};
use std::fmt;

/// Qualitative band for a 0-100 FibboScore.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreLabel {
    Critical,
    Developing,
    Average,
    Strong,
    Excellent,
}

impl ScoreLabel {
    pub fn from_score(score: f64) -> Self {
        classify_score(score)
    }

    /// Dashboard text for the band.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreLabel::Excellent => "Excelente",
            ScoreLabel::Strong => "Forte",
            ScoreLabel::Average => "Médio",
            ScoreLabel::Developing => "Em desenvolvimento",
            ScoreLabel::Critical => "Crítico",
        }
    }
}

impl fmt::Display for ScoreLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a score to its band. Lower bounds are inclusive and nothing is
/// clamped, so negative and >100 scores classify like any other value.
/// NaN is Critical.
pub fn classify_score(score: f64) -> ScoreLabel {
    if score.is_nan() {
        return ScoreLabel::Critical;
    }
    if score >= 80.0 {
        ScoreLabel::Excellent
    } else if score >= 65.0 {
        ScoreLabel::Strong
    } else if score >= 50.0 {
        ScoreLabel::Average
    } else if score >= 35.0 {
        ScoreLabel::Developing
    } else {
        ScoreLabel::Critical
    }
}

pub fn classify_score_label(score: f64) -> &'static str {
    classify_score(score).as_str()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakpoints() {
        assert_eq!(classify_score_label(80.0), "Excelente");
        assert_eq!(classify_score_label(79.99), "Forte");
        assert_eq!(classify_score_label(65.0), "Forte");
        assert_eq!(classify_score_label(64.999), "Médio");
        assert_eq!(classify_score_label(50.0), "Médio");
        assert_eq!(classify_score_label(49.999), "Em desenvolvimento");
        assert_eq!(classify_score_label(35.0), "Em desenvolvimento");
        assert_eq!(classify_score_label(34.99), "Crítico");
        assert_eq!(classify_score_label(0.0), "Crítico");
        assert_eq!(classify_score_label(100.0), "Excelente");
    }

    #[test]
    fn test_out_of_range_not_clamped() {
        assert_eq!(classify_score(-10.0), ScoreLabel::Critical);
        assert_eq!(classify_score(250.0), ScoreLabel::Excellent);
        assert_eq!(classify_score(f64::INFINITY), ScoreLabel::Excellent);
        assert_eq!(classify_score(f64::NEG_INFINITY), ScoreLabel::Critical);
    }

    #[test]
    fn test_nan_is_critical() {
        assert_eq!(classify_score(f64::NAN), ScoreLabel::Critical);
    }

    #[test]
    fn test_labels_ordered_by_band() {
        assert!(ScoreLabel::Excellent > ScoreLabel::Strong);
        assert!(ScoreLabel::Developing > ScoreLabel::Critical);
        assert_eq!(ScoreLabel::from_score(72.0).to_string(), "Forte");
    }
}
