//! Wire types for the prediction endpoint.
//!
//! The request mirrors the service's published schema key for key; the
//! response maps field for field into [`RiskAssessment`].

use crate::profile::HealthProfile;
use serde::{Deserialize, Serialize};

/// JSON body of the `/predict` POST.
///
/// The service takes lab levels as code strings and lifestyle flags as
/// "yes"/"no", a fossil of the training dataset it was built from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PredictionRequest {
    pub age: u32,
    pub gender: String,
    pub height: f64,
    pub weight: f64,
    pub ap_hi: u32,
    pub ap_lo: u32,
    pub cholesterol: String,
    pub glucose: String,
    pub smoke: String,
    pub alcohol: String,
    pub active: String,
    pub model: String,
}

fn yes_no(flag: bool) -> String {
    if flag { "yes" } else { "no" }.to_string()
}

impl From<&HealthProfile> for PredictionRequest {
    fn from(profile: &HealthProfile) -> Self {
        PredictionRequest {
            age: profile.age,
            gender: profile.sex.wire_name().to_string(),
            height: profile.height_cm,
            weight: profile.weight_kg,
            ap_hi: profile.systolic,
            ap_lo: profile.diastolic,
            cholesterol: profile.cholesterol.as_code().to_string(),
            glucose: profile.glucose.as_code().to_string(),
            smoke: yes_no(profile.smoker),
            alcohol: yes_no(profile.alcohol),
            active: yes_no(profile.active),
            model: profile.model.wire_name().to_string(),
        }
    }
}

/// Risk classification returned by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskCategory {
    Low,
    Moderate,
    High,
}

/// Raw response body of a successful prediction
#[derive(Debug, Clone, Deserialize)]
pub struct PredictionResponse {
    pub risk: RiskCategory,
    pub probability: f64,
    #[serde(default)]
    pub factors: Vec<String>,
    #[serde(rename = "modelUsed")]
    pub model_used: String,
}

/// One prediction outcome: the result model the rest of the client consumes.
///
/// Replaced wholesale by each new request, cleared on reset.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskAssessment {
    pub risk: RiskCategory,
    /// Probability of the positive class, in [0, 1]
    pub probability: f64,
    /// Contributing factors, server-supplied, listed verbatim in order
    pub factors: Vec<String>,
    /// Human-readable name of the model variant that produced the result
    pub model_used: String,
}

impl From<PredictionResponse> for RiskAssessment {
    fn from(resp: PredictionResponse) -> Self {
        RiskAssessment {
            risk: resp.risk,
            probability: resp.probability,
            factors: resp.factors,
            model_used: resp.model_used,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{ModelVariant, OrdinalLevel, Sex};

    fn sample_profile() -> HealthProfile {
        HealthProfile {
            age: 45,
            sex: Sex::Male,
            height_cm: 170.0,
            weight_kg: 70.0,
            systolic: 120,
            diastolic: 80,
            cholesterol: OrdinalLevel::AboveNormal,
            glucose: OrdinalLevel::Normal,
            smoker: false,
            alcohol: true,
            active: true,
            model: ModelVariant::RandomForest,
        }
    }

    #[test]
    fn test_request_has_exactly_documented_keys() {
        let request = PredictionRequest::from(&sample_profile());
        let value = serde_json::to_value(&request).unwrap();
        let obj = value.as_object().unwrap();

        let expected = [
            "age",
            "gender",
            "height",
            "weight",
            "apHi",
            "apLo",
            "cholesterol",
            "glucose",
            "smoke",
            "alcohol",
            "active",
            "model",
        ];
        assert_eq!(obj.len(), expected.len());
        for key in expected {
            assert!(obj.contains_key(key), "missing key {key}");
        }
    }

    #[test]
    fn test_request_value_types() {
        let request = PredictionRequest::from(&sample_profile());
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["age"], serde_json::json!(45));
        assert!(value["height"].is_number());
        assert_eq!(value["apHi"], serde_json::json!(120));
        assert_eq!(value["apLo"], serde_json::json!(80));
        assert_eq!(value["gender"], "male");
        assert_eq!(value["cholesterol"], "2");
        assert_eq!(value["glucose"], "1");
        assert_eq!(value["smoke"], "no");
        assert_eq!(value["alcohol"], "yes");
        assert_eq!(value["active"], "yes");
        assert_eq!(value["model"], "random_forest");
    }

    #[test]
    fn test_response_maps_field_for_field() {
        let body = r#"{
            "risk": "high",
            "probability": 0.82,
            "factors": ["High BP"],
            "modelUsed": "random_forest"
        }"#;
        let resp: PredictionResponse = serde_json::from_str(body).unwrap();
        let assessment = RiskAssessment::from(resp);

        assert_eq!(assessment.risk, RiskCategory::High);
        assert_eq!(assessment.probability, 0.82);
        assert_eq!(assessment.factors, vec!["High BP".to_string()]);
        assert_eq!(assessment.model_used, "random_forest");
    }

    #[test]
    fn test_response_missing_factors_defaults_empty() {
        let body = r#"{"risk":"low","probability":0.1,"modelUsed":"Random Forest"}"#;
        let resp: PredictionResponse = serde_json::from_str(body).unwrap();
        assert!(resp.factors.is_empty());
    }

    #[test]
    fn test_response_rejects_unknown_risk() {
        let body = r#"{"risk":"severe","probability":0.9,"factors":[],"modelUsed":"x"}"#;
        assert!(serde_json::from_str::<PredictionResponse>(body).is_err());
    }
}
