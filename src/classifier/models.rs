//! Data models for SDG classification

use serde::{Deserialize, Serialize};

/// The 17 UN Sustainable Development Goals, indexed by code - 1.
pub const SDG_GOAL_NAMES: [&str; 17] = [
    "No poverty",
    "Zero hunger",
    "Good health and well-being",
    "Quality education",
    "Gender equality",
    "Clean water and sanitation",
    "Affordable and clean energy",
    "Decent work and economic growth",
    "Industry, innovation and infrastructure",
    "Reduced inequalities",
    "Sustainable cities and communities",
    "Responsible consumption and production",
    "Climate action",
    "Life below water",
    "Life on land",
    "Peace, justice and strong institutions",
    "Partnerships for the goals",
];

/// Look up the canonical goal name for an SDG code (1..=17)
pub fn goal_name(code: u8) -> Option<&'static str> {
    SDG_GOAL_NAMES.get(code.checked_sub(1)? as usize).copied()
}

/// One scored goal in a normalized classification
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Prediction {
    /// SDG code, 1..=17
    pub code: u8,
    pub name: String,
    /// Classifier score in [0, 1], passed through unchanged
    pub score: f64,
}

/// Normalized output of one classification request
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ClassificationResult {
    pub predictions: Vec<Prediction>,
}

impl ClassificationResult {
    /// Highest-scoring prediction; ties broken by first-seen order.
    pub fn top(&self) -> Option<&Prediction> {
        let mut best: Option<&Prediction> = None;
        for prediction in &self.predictions {
            match best {
                Some(current) if prediction.score <= current.score => {}
                _ => best = Some(prediction),
            }
        }
        best
    }

    /// True when the classifier returned no scored goals at all
    pub fn is_empty(&self) -> bool {
        self.predictions.is_empty()
    }
}

/// Wire shape of the remote classifier response.
///
/// The remote service returns per-goal score objects in goal-indexed order;
/// that ordering is a compatibility contract, so normalization maps array
/// index `i` to SDG code `i + 1` and ignores any labels the service attaches.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteResponse {
    #[serde(default)]
    pub predictions: Vec<RemotePrediction>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemotePrediction {
    #[serde(alias = "prediction")]
    pub prediction_score: f64,
}

impl From<RemoteResponse> for ClassificationResult {
    fn from(remote: RemoteResponse) -> Self {
        let predictions = remote
            .predictions
            .iter()
            .zip(SDG_GOAL_NAMES)
            .enumerate()
            .map(|(i, (remote, name))| Prediction {
                code: (i + 1) as u8,
                name: name.to_string(),
                score: remote.prediction_score,
            })
            .collect();

        Self { predictions }
    }
}

/// Classification outcome as it crosses the messaging fabric.
///
/// Raw errors never cross a context boundary; every outcome is collapsed to
/// one of these tagged variants at the coordinator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ClassifyReply {
    /// Successful classification (possibly with zero predictions)
    Ok { data: ClassificationResult },
    /// Request rejected locally before any remote call
    Declined { reason: String },
    /// Remote call failed; `message` is rendered to the user verbatim
    Error { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn remote(scores: &[f64]) -> RemoteResponse {
        RemoteResponse {
            predictions: scores
                .iter()
                .map(|&prediction_score| RemotePrediction { prediction_score })
                .collect(),
        }
    }

    #[test]
    fn test_goal_name_lookup() {
        assert_eq!(goal_name(1), Some("No poverty"));
        assert_eq!(goal_name(17), Some("Partnerships for the goals"));
        assert_eq!(goal_name(0), None);
        assert_eq!(goal_name(18), None);
    }

    #[test]
    fn test_normalization_index_mapping() {
        let result = ClassificationResult::from(remote(&[0.1, 0.9, 0.05]));

        assert_eq!(result.predictions.len(), 3);
        assert_eq!(result.predictions[0].code, 1);
        assert_eq!(result.predictions[0].name, "No poverty");
        assert_eq!(result.predictions[0].score, 0.1);
        assert_eq!(result.predictions[1].code, 2);
        assert_eq!(result.predictions[1].name, "Zero hunger");
        assert_eq!(result.predictions[2].code, 3);
        assert_eq!(result.predictions[2].score, 0.05);

        assert_eq!(result.top().unwrap().code, 2);
    }

    #[test]
    fn test_empty_predictions_is_not_an_error() {
        let result = ClassificationResult::from(remote(&[]));
        assert!(result.is_empty());
        assert!(result.top().is_none());
    }

    #[test]
    fn test_top_tie_breaks_first_seen() {
        let result = ClassificationResult::from(remote(&[0.3, 0.9, 0.9, 0.1]));
        assert_eq!(result.top().unwrap().code, 2);
    }

    #[test]
    fn test_full_response_covers_all_goals() {
        let scores: Vec<f64> = (0..17).map(|i| i as f64 / 17.0).collect();
        let result = ClassificationResult::from(remote(&scores));

        assert_eq!(result.predictions.len(), 17);
        assert_eq!(result.predictions[16].code, 17);
        assert_eq!(result.predictions[16].name, "Partnerships for the goals");
        assert_eq!(result.top().unwrap().code, 17);
    }

    #[test]
    fn test_remote_score_field_alias() {
        let parsed: RemoteResponse =
            serde_json::from_str(r#"{"predictions": [{"prediction": 0.7}]}"#).unwrap();
        assert_eq!(parsed.predictions[0].prediction_score, 0.7);
    }

    #[test]
    fn test_missing_predictions_field_defaults_empty() {
        let parsed: RemoteResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.predictions.is_empty());
    }
}
