//! Interactive health-data form.
//!
//! Field-by-field prompts over rustyline, in the same section order as the
//! service's intake form. All range and type validation happens here, at the
//! edit surface; the prediction client only ever receives values that
//! already passed it. Entered values are kept as defaults on re-entry, so a
//! failed submission can be resubmitted without retyping everything.

use crate::profile::{bmi, ranges, BmiClass, ModelVariant, OrdinalLevel, ProfileDraft, Sex};
use anyhow::Result;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// Outcome of one prompt: a value, or the user backing out
enum Answer<T> {
    Value(T),
    Aborted,
}

/// Parse a whole number inside an inclusive range
pub fn parse_in_range_u32(input: &str, (min, max): (u32, u32)) -> Result<u32, String> {
    let value: u32 = input
        .trim()
        .parse()
        .map_err(|_| format!("enter a whole number between {min} and {max}"))?;
    if value < min || value > max {
        return Err(format!("must be between {min} and {max}"));
    }
    Ok(value)
}

/// Parse a decimal number inside an inclusive range
pub fn parse_in_range_f64(input: &str, (min, max): (f64, f64)) -> Result<f64, String> {
    let value: f64 = input
        .trim()
        .parse()
        .map_err(|_| format!("enter a number between {min} and {max}"))?;
    if !value.is_finite() || value < min || value > max {
        return Err(format!("must be between {min} and {max}"));
    }
    Ok(value)
}

pub fn parse_yes_no(input: &str) -> Result<bool, String> {
    match input.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Ok(true),
        "n" | "no" => Ok(false),
        _ => Err("answer yes or no".to_string()),
    }
}

pub fn parse_model_choice(input: &str) -> Result<ModelVariant, String> {
    match input.trim() {
        "1" => Ok(ModelVariant::RandomForest),
        "2" => Ok(ModelVariant::LogisticRegression),
        "3" => Ok(ModelVariant::DecisionTree),
        other => ModelVariant::from_wire_name(other)
            .ok_or_else(|| "choose 1, 2 or 3".to_string()),
    }
}

/// One form pass over the draft.
///
/// Returns `Ok(false)` if the user aborted (Ctrl-C / Ctrl-D); on `Ok(true)`
/// every draft field is populated.
pub fn collect(editor: &mut DefaultEditor, draft: &mut ProfileDraft) -> Result<bool> {
    section("Demographics");
    match prompt(editor, "Age (years)", draft.age.map(|v| v.to_string()), |s| {
        parse_in_range_u32(s, ranges::AGE)
    })? {
        Answer::Value(v) => draft.age = Some(v),
        Answer::Aborted => return Ok(false),
    }
    match prompt(
        editor,
        "Sex (male/female)",
        draft.sex.map(|v| v.label().to_string()),
        |s| Sex::from_input(s).ok_or_else(|| "enter male or female".to_string()),
    )? {
        Answer::Value(v) => draft.sex = Some(v),
        Answer::Aborted => return Ok(false),
    }

    section("Body Measurements");
    match prompt(
        editor,
        "Height (cm)",
        draft.height_cm.map(|v| format!("{v}")),
        |s| parse_in_range_f64(s, ranges::HEIGHT_CM),
    )? {
        Answer::Value(v) => draft.height_cm = Some(v),
        Answer::Aborted => return Ok(false),
    }
    match prompt(
        editor,
        "Weight (kg)",
        draft.weight_kg.map(|v| format!("{v}")),
        |s| parse_in_range_f64(s, ranges::WEIGHT_KG),
    )? {
        Answer::Value(v) => draft.weight_kg = Some(v),
        Answer::Aborted => return Ok(false),
    }
    // Live BMI echo once both measurements exist
    if let (Some(h), Some(w)) = (draft.height_cm, draft.weight_kg) {
        if let Some(value) = bmi(h, w) {
            println!(
                "  Calculated BMI: {} ({})",
                format!("{value:.1}").bold(),
                BmiClass::of(value).label()
            );
        }
    }

    section("Blood Pressure");
    match prompt(
        editor,
        "Systolic BP (mm Hg)",
        draft.systolic.map(|v| v.to_string()),
        |s| parse_in_range_u32(s, ranges::SYSTOLIC),
    )? {
        Answer::Value(v) => draft.systolic = Some(v),
        Answer::Aborted => return Ok(false),
    }
    match prompt(
        editor,
        "Diastolic BP (mm Hg)",
        draft.diastolic.map(|v| v.to_string()),
        |s| parse_in_range_u32(s, ranges::DIASTOLIC),
    )? {
        Answer::Value(v) => draft.diastolic = Some(v),
        Answer::Aborted => return Ok(false),
    }

    section("Lab Results");
    let level_help = "1 = Normal, 2 = Above Normal, 3 = Well Above Normal";
    println!("  {level_help}");
    match prompt(
        editor,
        "Cholesterol level (1-3)",
        draft.cholesterol.map(|v| v.as_code().to_string()),
        |s| OrdinalLevel::from_code(s).ok_or_else(|| "choose 1, 2 or 3".to_string()),
    )? {
        Answer::Value(v) => draft.cholesterol = Some(v),
        Answer::Aborted => return Ok(false),
    }
    match prompt(
        editor,
        "Glucose level (1-3)",
        draft.glucose.map(|v| v.as_code().to_string()),
        |s| OrdinalLevel::from_code(s).ok_or_else(|| "choose 1, 2 or 3".to_string()),
    )? {
        Answer::Value(v) => draft.glucose = Some(v),
        Answer::Aborted => return Ok(false),
    }

    section("Lifestyle Factors");
    for (label, field) in [
        ("Smoker (yes/no)", Field::Smoker),
        ("Alcohol intake (yes/no)", Field::Alcohol),
        ("Physically active (yes/no)", Field::Active),
    ] {
        let current = match field {
            Field::Smoker => draft.smoker,
            Field::Alcohol => draft.alcohol,
            Field::Active => draft.active,
        };
        match prompt(
            editor,
            label,
            current.map(|v| if v { "yes" } else { "no" }.to_string()),
            parse_yes_no,
        )? {
            Answer::Value(v) => match field {
                Field::Smoker => draft.smoker = Some(v),
                Field::Alcohol => draft.alcohol = Some(v),
                Field::Active => draft.active = Some(v),
            },
            Answer::Aborted => return Ok(false),
        }
    }

    section("Prediction Model");
    println!("  1 = Random Forest (recommended), 2 = Logistic Regression, 3 = Decision Tree");
    match prompt(
        editor,
        "Model (1-3)",
        Some(draft.model.wire_name().to_string()),
        parse_model_choice,
    )? {
        Answer::Value(v) => draft.model = v,
        Answer::Aborted => return Ok(false),
    }

    Ok(true)
}

enum Field {
    Smoker,
    Alcohol,
    Active,
}

fn section(title: &str) {
    println!();
    println!("{}", title.bold().underline());
}

/// Prompt until the parser accepts, Enter keeps the shown default.
fn prompt<T>(
    editor: &mut DefaultEditor,
    label: &str,
    default: Option<String>,
    parse: impl Fn(&str) -> Result<T, String>,
) -> Result<Answer<T>> {
    loop {
        let text = match &default {
            Some(d) => format!("  {label} [{d}]: "),
            None => format!("  {label}: "),
        };
        let line = match editor.readline(&text) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                return Ok(Answer::Aborted)
            }
            Err(e) => return Err(e.into()),
        };

        let input = if line.trim().is_empty() {
            match &default {
                Some(d) => d.clone(),
                None => {
                    println!("  {}", "This field is required.".yellow());
                    continue;
                }
            }
        } else {
            line
        };

        match parse(&input) {
            Ok(value) => return Ok(Answer::Value(value)),
            Err(msg) => println!("  {} {msg}", "invalid:".yellow()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_u32_range() {
        assert_eq!(parse_in_range_u32("45", ranges::AGE).unwrap(), 45);
        assert!(parse_in_range_u32("0", ranges::AGE).is_err());
        assert!(parse_in_range_u32("121", ranges::AGE).is_err());
        assert!(parse_in_range_u32("forty", ranges::AGE).is_err());
        assert!(parse_in_range_u32("-3", ranges::AGE).is_err());
    }

    #[test]
    fn test_parse_f64_range() {
        assert_eq!(parse_in_range_f64("170", ranges::HEIGHT_CM).unwrap(), 170.0);
        assert_eq!(parse_in_range_f64("70.5", ranges::WEIGHT_KG).unwrap(), 70.5);
        assert!(parse_in_range_f64("49.9", ranges::HEIGHT_CM).is_err());
        assert!(parse_in_range_f64("NaN", ranges::HEIGHT_CM).is_err());
        assert!(parse_in_range_f64("tall", ranges::HEIGHT_CM).is_err());
    }

    #[test]
    fn test_parse_yes_no() {
        assert_eq!(parse_yes_no("yes").unwrap(), true);
        assert_eq!(parse_yes_no("Y").unwrap(), true);
        assert_eq!(parse_yes_no("no").unwrap(), false);
        assert_eq!(parse_yes_no(" N ").unwrap(), false);
        assert!(parse_yes_no("maybe").is_err());
    }

    #[test]
    fn test_parse_model_choice() {
        assert_eq!(parse_model_choice("1").unwrap(), ModelVariant::RandomForest);
        assert_eq!(
            parse_model_choice("2").unwrap(),
            ModelVariant::LogisticRegression
        );
        assert_eq!(parse_model_choice("3").unwrap(), ModelVariant::DecisionTree);
        // Wire names are accepted too, for muscle memory
        assert_eq!(
            parse_model_choice("random_forest").unwrap(),
            ModelVariant::RandomForest
        );
        assert!(parse_model_choice("4").is_err());
    }
}
