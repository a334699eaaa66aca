//! Terminal rendering of assessment results.
//!
//! The risk-category presentation is a closed table over the three
//! categories, matching the service's fixed classification.

use crate::client::{RiskAssessment, RiskCategory};
use crate::errors::PredictError;
use crate::profile::{BmiClass, HealthProfile};
use colored::{Color, Colorize};

/// Fixed presentation for one risk category
pub struct RiskPresentation {
    pub label: &'static str,
    pub symbol: &'static str,
    pub description: &'static str,
    pub color: Color,
    /// RGB fill for the report's risk banner
    pub banner_rgb: (u8, u8, u8),
}

impl RiskCategory {
    /// Presentation triple for this category
    pub fn presentation(&self) -> RiskPresentation {
        match self {
            RiskCategory::Low => RiskPresentation {
                label: "Low Risk",
                symbol: "[ok]",
                description: "Your cardiovascular risk appears to be within normal range.",
                color: Color::Green,
                banner_rgb: (34, 197, 94),
            },
            RiskCategory::Moderate => RiskPresentation {
                label: "Moderate Risk",
                symbol: "[!]",
                description: "Some risk factors detected. Consider lifestyle modifications.",
                color: Color::Yellow,
                banner_rgb: (234, 179, 8),
            },
            RiskCategory::High => RiskPresentation {
                label: "High Risk",
                symbol: "[!!]",
                description: "Elevated risk detected. Please consult a healthcare provider.",
                color: Color::Red,
                banner_rgb: (239, 68, 68),
            },
        }
    }
}

/// Proportional probability bar, `width` cells wide
pub fn probability_bar(probability: f64, width: usize) -> String {
    let clamped = probability.clamp(0.0, 1.0);
    let filled = (clamped * width as f64).round() as usize;
    format!("{}{}", "#".repeat(filled), "-".repeat(width - filled))
}

/// Render a full assessment to stdout
pub fn show_result(profile: &HealthProfile, assessment: &RiskAssessment) {
    let pres = assessment.risk.presentation();
    let percent = assessment.probability * 100.0;

    println!();
    println!(
        "  {} {}",
        pres.symbol.color(pres.color).bold(),
        pres.label.color(pres.color).bold()
    );
    println!("  {}", pres.description);
    println!();
    println!(
        "  Risk probability: {} [{}]",
        format!("{percent:.1}%").bold(),
        probability_bar(assessment.probability, 30).color(pres.color)
    );
    println!("  Model used: {}", assessment.model_used);

    if let Some(bmi) = profile.bmi() {
        println!(
            "  BMI: {:.1} ({})",
            bmi,
            BmiClass::of(bmi).label()
        );
    }

    if !assessment.factors.is_empty() {
        println!();
        println!("  {}", "Identified risk factors".bold());
        for factor in &assessment.factors {
            println!("    - {factor}");
        }
    }
    println!();
}

/// Render a prediction failure with a kind-specific message.
///
/// Each error kind reads differently on purpose; a dead server and a
/// rejected payload call for different user reactions.
pub fn show_prediction_error(err: &PredictError) {
    let hint = match err {
        PredictError::Timeout { .. } => {
            "The service may be cold-starting; try submitting again shortly."
        }
        PredictError::Transport(_) => {
            "Check your network connection, or point --endpoint at a reachable service."
        }
        PredictError::Status { .. } => {
            "The service refused the request; verify the entered values and try again."
        }
        PredictError::MalformedResponse(_) => {
            "The service answered with something unexpected; it may be mid-deploy."
        }
        _ => "The request could not be completed.",
    };
    eprintln!();
    eprintln!("  {} {}", "error:".red().bold(), err);
    eprintln!("  {hint}");
    eprintln!();
}
