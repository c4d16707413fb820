//! Quality score classification.

use serde::Serialize;

/// Three-level quality classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityLevel {
    /// Score below 40.
    Poor,
    /// Score in [40, 70).
    Fair,
    /// Score of 70 or above.
    Good,
}

impl QualityLevel {
    /// Classify a quality score.
    pub fn classify(score: u32) -> Self {
        if score < 40 {
            Self::Poor
        } else if score < 70 {
            Self::Fair
        } else {
            Self::Good
        }
    }

    /// Display name for this level.
    pub fn name(self) -> &'static str {
        match self {
            Self::Poor => "Poor",
            Self::Fair => "Fair",
            Self::Good => "Good",
        }
    }
}

/// Renderable view of a quality score.
#[derive(Debug, Clone, Serialize)]
pub struct QualityView {
    /// Raw score (0-100).
    pub score: u32,
    /// Classified level.
    pub level: QualityLevel,
    /// Display label, e.g. `Good (85/100)`.
    pub label: String,
}

impl QualityView {
    /// Project a score into a view model.
    pub fn project(score: u32) -> Self {
        let level = QualityLevel::classify(score);
        Self {
            score,
            level,
            label: format!("{} ({}/100)", level.name(), score),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds() {
        assert_eq!(QualityLevel::classify(0), QualityLevel::Poor);
        assert_eq!(QualityLevel::classify(39), QualityLevel::Poor);
        assert_eq!(QualityLevel::classify(40), QualityLevel::Fair);
        assert_eq!(QualityLevel::classify(69), QualityLevel::Fair);
        assert_eq!(QualityLevel::classify(70), QualityLevel::Good);
        assert_eq!(QualityLevel::classify(100), QualityLevel::Good);
    }

    #[test]
    fn test_label() {
        let view = QualityView::project(85);
        assert_eq!(view.level, QualityLevel::Good);
        assert_eq!(view.label, "Good (85/100)");
    }
}
