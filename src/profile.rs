//! Health-data form model.
//!
//! `ProfileDraft` is the editable state: every field optional, mutated one
//! prompt at a time. `HealthProfile` is the submitted state: every field
//! present, guaranteed by `ProfileDraft::finish`. The prediction client only
//! ever sees a `HealthProfile`, so missing-field errors cannot reach the wire.

use serde::{Deserialize, Serialize};

/// Biological sex category as the prediction service expects it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Wire value for the `gender` request key
    pub fn wire_name(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Sex::Male => "Male",
            Sex::Female => "Female",
        }
    }

    pub fn from_input(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "m" | "male" => Some(Sex::Male),
            "f" | "female" => Some(Sex::Female),
            _ => None,
        }
    }
}

/// Ordinal lab level shared by cholesterol and glucose.
///
/// The service speaks in the dataset's "1"/"2"/"3" codes; the user sees
/// labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrdinalLevel {
    Normal,
    AboveNormal,
    WellAboveNormal,
}

impl OrdinalLevel {
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "1" => Some(OrdinalLevel::Normal),
            "2" => Some(OrdinalLevel::AboveNormal),
            "3" => Some(OrdinalLevel::WellAboveNormal),
            _ => None,
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            OrdinalLevel::Normal => "1",
            OrdinalLevel::AboveNormal => "2",
            OrdinalLevel::WellAboveNormal => "3",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OrdinalLevel::Normal => "Normal",
            OrdinalLevel::AboveNormal => "Above Normal",
            OrdinalLevel::WellAboveNormal => "Well Above Normal",
        }
    }

    /// Label for a raw code, with the defined fallback for anything
    /// unrecognized.
    pub fn label_for_code(code: &str) -> &'static str {
        Self::from_code(code).map(|l| l.label()).unwrap_or("N/A")
    }
}

/// Which server-side model produces the prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelVariant {
    RandomForest,
    LogisticRegression,
    DecisionTree,
}

impl ModelVariant {
    pub const ALL: [ModelVariant; 3] = [
        ModelVariant::RandomForest,
        ModelVariant::LogisticRegression,
        ModelVariant::DecisionTree,
    ];

    pub fn wire_name(&self) -> &'static str {
        match self {
            ModelVariant::RandomForest => "random_forest",
            ModelVariant::LogisticRegression => "logistic_regression",
            ModelVariant::DecisionTree => "decision_tree",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ModelVariant::RandomForest => "Random Forest",
            ModelVariant::LogisticRegression => "Logistic Regression",
            ModelVariant::DecisionTree => "Decision Tree",
        }
    }

    pub fn from_wire_name(s: &str) -> Option<Self> {
        match s {
            "random_forest" => Some(ModelVariant::RandomForest),
            "logistic_regression" => Some(ModelVariant::LogisticRegression),
            "decision_tree" => Some(ModelVariant::DecisionTree),
            _ => None,
        }
    }
}

impl Default for ModelVariant {
    fn default() -> Self {
        ModelVariant::RandomForest
    }
}

/// Accepted input ranges, enforced at the prompt so out-of-range values
/// never reach the prediction client.
pub mod ranges {
    pub const AGE: (u32, u32) = (1, 120);
    pub const HEIGHT_CM: (f64, f64) = (50.0, 250.0);
    pub const WEIGHT_KG: (f64, f64) = (20.0, 300.0);
    pub const SYSTOLIC: (u32, u32) = (60, 250);
    pub const DIASTOLIC: (u32, u32) = (40, 200);
}

/// Fully populated health profile, ready for submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthProfile {
    pub age: u32,
    pub sex: Sex,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub systolic: u32,
    pub diastolic: u32,
    pub cholesterol: OrdinalLevel,
    pub glucose: OrdinalLevel,
    pub smoker: bool,
    pub alcohol: bool,
    pub active: bool,
    pub model: ModelVariant,
}

impl HealthProfile {
    /// BMI of this profile, if the measurements allow one
    pub fn bmi(&self) -> Option<f64> {
        bmi(self.height_cm, self.weight_kg)
    }
}

/// Editable profile with every field optional except the model variant,
/// which carries its documented default from the start.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileDraft {
    pub age: Option<u32>,
    pub sex: Option<Sex>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub systolic: Option<u32>,
    pub diastolic: Option<u32>,
    pub cholesterol: Option<OrdinalLevel>,
    pub glucose: Option<OrdinalLevel>,
    pub smoker: Option<bool>,
    pub alcohol: Option<bool>,
    pub active: Option<bool>,
    pub model: ModelVariant,
}

impl ProfileDraft {
    pub fn new() -> Self {
        ProfileDraft::default()
    }

    /// Convert into a submittable profile, naming the first missing field
    /// on failure.
    pub fn finish(&self) -> Result<HealthProfile, &'static str> {
        Ok(HealthProfile {
            age: self.age.ok_or("age")?,
            sex: self.sex.ok_or("sex")?,
            height_cm: self.height_cm.ok_or("height")?,
            weight_kg: self.weight_kg.ok_or("weight")?,
            systolic: self.systolic.ok_or("systolic pressure")?,
            diastolic: self.diastolic.ok_or("diastolic pressure")?,
            cholesterol: self.cholesterol.ok_or("cholesterol level")?,
            glucose: self.glucose.ok_or("glucose level")?,
            smoker: self.smoker.ok_or("smoker flag")?,
            alcohol: self.alcohol.ok_or("alcohol flag")?,
            active: self.active.ok_or("activity flag")?,
            model: self.model,
        })
    }

    /// Live BMI for display while editing, once both measurements exist
    pub fn bmi(&self) -> Option<f64> {
        bmi(self.height_cm?, self.weight_kg?)
    }
}

/// Body-mass index from metric measurements.
///
/// Returns `None` for non-positive inputs rather than a nonsense value.
pub fn bmi(height_cm: f64, weight_kg: f64) -> Option<f64> {
    if height_cm <= 0.0 || weight_kg <= 0.0 {
        return None;
    }
    let height_m = height_cm / 100.0;
    Some(weight_kg / (height_m * height_m))
}

/// Display-only BMI classification bands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BmiClass {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiClass {
    pub fn of(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiClass::Underweight
        } else if bmi < 25.0 {
            BmiClass::Normal
        } else if bmi < 30.0 {
            BmiClass::Overweight
        } else {
            BmiClass::Obese
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BmiClass::Underweight => "Underweight",
            BmiClass::Normal => "Normal",
            BmiClass::Overweight => "Overweight",
            BmiClass::Obese => "Obese",
        }
    }
}
