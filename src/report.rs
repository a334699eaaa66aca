//! PDF report formatter.
//!
//! Lays out one profile/assessment pair as a paginated A4 document and saves
//! it under a dated filename. Layout is a greedy top-down flow: before each
//! block the remaining space is checked against the bottom margin, and a new
//! page is started when it does not fit. The document is assembled fully in
//! memory; nothing touches the filesystem until the final save, so a failed
//! build leaves no partial artifact.

use crate::client::RiskAssessment;
use crate::errors::{PredictError, Result};
use crate::profile::{BmiClass, HealthProfile};
use chrono::{DateTime, Local};
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Rect, Rgb,
};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

const PAGE_W: f32 = 210.0;
const PAGE_H: f32 = 297.0;
const MARGIN: f32 = 20.0;
const TOP_MARGIN: f32 = 20.0;
const BOTTOM_MARGIN: f32 = 30.0;

const COLOR_HEADER: (u8, u8, u8) = (20, 184, 166);
const COLOR_WHITE: (u8, u8, u8) = (255, 255, 255);
const COLOR_BLACK: (u8, u8, u8) = (0, 0, 0);
const COLOR_GRAY: (u8, u8, u8) = (100, 100, 100);
const COLOR_BOX: (u8, u8, u8) = (245, 245, 245);

/// Fixed recommendation list, wrapped to the content width at layout time
pub const RECOMMENDATIONS: [&str; 4] = [
    "Consult a healthcare provider.",
    "Monitor blood pressure regularly.",
    "Maintain a heart-healthy diet.",
    "Exercise regularly.",
];

pub const DISCLAIMER: &str = "Medical Disclaimer: This report is generated by a machine \
learning model for educational purposes only. It is not a medical diagnosis.";

/// Characters that fit the content width at body size; used for word wrap
const WRAP_CHARS: usize = 90;

/// Dated report filename, `CardioPredict_Report_<YYYY-MM-DD>.pdf`
pub fn report_filename(generated_at: DateTime<Local>) -> String {
    format!(
        "CardioPredict_Report_{}.pdf",
        generated_at.format("%Y-%m-%d")
    )
}

/// Greedy word wrap to a character budget.
///
/// A word longer than the budget gets a line of its own rather than being
/// split mid-word.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + word.len() + 1 > max_chars {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

fn rgb(c: (u8, u8, u8)) -> Color {
    Color::Rgb(Rgb::new(
        c.0 as f32 / 255.0,
        c.1 as f32 / 255.0,
        c.2 as f32 / 255.0,
        None,
    ))
}

/// Cursor-driven page writer. `y` is millimetres from the top of the page;
/// printpdf's origin is bottom-left, so baselines are converted on write.
struct ReportWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    font: IndirectFontRef,
    bold: IndirectFontRef,
    y: f32,
    pages: usize,
}

impl ReportWriter {
    fn new(title: &str) -> Result<Self> {
        let (doc, page, layer) = PdfDocument::new(title, Mm(PAGE_W), Mm(PAGE_H), "Page 1");
        let layer = doc.get_page(page).get_layer(layer);
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| PredictError::Report(format!("font load: {e}")))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| PredictError::Report(format!("font load: {e}")))?;

        Ok(ReportWriter {
            doc,
            layer,
            font,
            bold,
            y: TOP_MARGIN,
            pages: 1,
        })
    }

    fn new_page(&mut self) {
        self.pages += 1;
        let (page, layer) = self.doc.add_page(
            Mm(PAGE_W),
            Mm(PAGE_H),
            format!("Page {}", self.pages),
        );
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = TOP_MARGIN;
    }

    /// The pagination policy: start a new page when the next block would
    /// cross into the bottom margin.
    fn ensure_space(&mut self, needed_mm: f32) {
        if self.y + needed_mm > PAGE_H - BOTTOM_MARGIN {
            self.new_page();
        }
    }

    fn text_at(&self, text: &str, size: f32, x: f32, y_from_top: f32, font: &IndirectFontRef, color: (u8, u8, u8)) {
        self.layer.set_fill_color(rgb(color));
        self.layer
            .use_text(text, size, Mm(x), Mm(PAGE_H - y_from_top), font);
    }

    fn centered(&self, text: &str, size: f32, y_from_top: f32, font: &IndirectFontRef, color: (u8, u8, u8)) {
        // Builtin Helvetica has no metrics here; approximate the glyph
        // advance to center
        let approx_width = text.len() as f32 * size * 0.172;
        let x = (PAGE_W - approx_width) / 2.0;
        self.text_at(text, size, x.max(MARGIN), y_from_top, font, color);
    }

    /// Filled rectangle with its top edge `top` mm from the page top
    fn fill_rect(&self, x: f32, top: f32, width: f32, height: f32, color: (u8, u8, u8)) {
        self.layer.set_fill_color(rgb(color));
        let rect = Rect::new(
            Mm(x),
            Mm(PAGE_H - top - height),
            Mm(x + width),
            Mm(PAGE_H - top),
        )
        .with_mode(PaintMode::Fill)
        .with_winding(WindingOrder::NonZero);
        self.layer.add_rect(rect);
    }

    /// Section heading with an underline, as one block
    fn section(&mut self, title: &str) {
        self.ensure_space(20.0);
        self.text_at(title, 14.0, MARGIN, self.y, &self.bold, COLOR_BLACK);
        self.y += 2.0;
        self.fill_rect(MARGIN, self.y, PAGE_W - 2.0 * MARGIN, 0.4, COLOR_GRAY);
        self.y += 8.0;
    }

    /// Bold label, plain value, two-column
    fn kv(&mut self, label: &str, value: &str, value_x: f32) {
        self.ensure_space(8.0);
        self.text_at(&format!("{label}:"), 11.0, MARGIN, self.y, &self.bold, COLOR_BLACK);
        self.text_at(value, 11.0, value_x, self.y, &self.font, COLOR_BLACK);
        self.y += 7.0;
    }

    fn bullet(&mut self, text: &str) {
        self.ensure_space(8.0);
        self.text_at("\u{2022}", 11.0, MARGIN + 3.0, self.y, &self.font, COLOR_BLACK);
        self.text_at(text, 11.0, MARGIN + 10.0, self.y, &self.font, COLOR_BLACK);
        self.y += 7.0;
    }

    /// Wrapped paragraph; the cursor advances by the wrapped line count
    fn wrapped(&mut self, text: &str, indent: f32) {
        let lines = wrap_text(text, WRAP_CHARS);
        self.ensure_space(lines.len() as f32 * 6.0);
        for line in lines {
            self.text_at(&line, 11.0, MARGIN + indent, self.y, &self.font, COLOR_BLACK);
            self.y += 6.0;
        }
    }
}

/// A fully assembled report, ready to save
pub struct ReportDocument {
    doc: PdfDocumentReference,
    /// Number of pages the layout produced
    pub pages: usize,
}

impl ReportDocument {
    /// Write the document to `path`
    pub fn save(self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.doc
            .save(&mut writer)
            .map_err(|e| PredictError::Report(format!("PDF save: {e}")))?;
        Ok(())
    }
}

/// Lay out the full report for one profile/assessment pair.
///
/// Section order is fixed: header banner, generation metadata, risk banner,
/// patient information, clinical measurements, lifestyle factors, risk
/// factors (only if any), recommendations, closing disclaimer on a final
/// page.
pub fn render(
    profile: &HealthProfile,
    assessment: &RiskAssessment,
    generated_at: DateTime<Local>,
) -> Result<ReportDocument> {
    let mut w = ReportWriter::new("CardioPredict Report")?;
    let pres = assessment.risk.presentation();

    // Title banner, full width
    w.fill_rect(0.0, 0.0, PAGE_W, 40.0, COLOR_HEADER);
    w.centered("CardioPredict", 24.0, 18.0, &w.bold, COLOR_WHITE);
    w.centered(
        "Cardiovascular Risk Assessment Report",
        12.0,
        30.0,
        &w.font,
        COLOR_WHITE,
    );

    w.y = 55.0;
    w.text_at(
        &format!("Generated: {}", generated_at.format("%Y-%m-%d %H:%M:%S")),
        10.0,
        MARGIN,
        w.y,
        &w.font,
        COLOR_GRAY,
    );
    w.text_at(
        &format!("Model Used: {}", assessment.model_used),
        10.0,
        MARGIN,
        w.y + 6.0,
        &w.font,
        COLOR_GRAY,
    );
    w.y += 20.0;

    // Risk summary banner, fill from the fixed three-entry palette
    w.ensure_space(40.0);
    w.fill_rect(MARGIN, w.y, PAGE_W - 2.0 * MARGIN, 35.0, pres.banner_rgb);
    w.centered(
        &pres.label.to_uppercase(),
        18.0,
        w.y + 15.0,
        &w.bold,
        COLOR_WHITE,
    );
    w.centered(
        &format!(
            "Risk Probability: {:.1}%",
            assessment.probability * 100.0
        ),
        14.0,
        w.y + 27.0,
        &w.font,
        COLOR_WHITE,
    );
    w.y += 45.0;

    w.section("Patient Information");
    let bmi_label = match profile.bmi() {
        Some(bmi) => format!("{:.1} ({})", bmi, BmiClass::of(bmi).label()),
        None => "N/A".to_string(),
    };
    w.kv("Age", &format!("{} yrs", profile.age), MARGIN + 50.0);
    w.kv("Sex", profile.sex.label(), MARGIN + 50.0);
    w.kv("Height", &format!("{:.0} cm", profile.height_cm), MARGIN + 50.0);
    w.kv("Weight", &format!("{:.0} kg", profile.weight_kg), MARGIN + 50.0);
    w.kv("BMI", &bmi_label, MARGIN + 50.0);

    w.section("Clinical Measurements");
    w.kv("Systolic BP", &format!("{} mmHg", profile.systolic), MARGIN + 60.0);
    w.kv("Diastolic BP", &format!("{} mmHg", profile.diastolic), MARGIN + 60.0);
    w.kv("Cholesterol", profile.cholesterol.label(), MARGIN + 60.0);
    w.kv("Glucose", profile.glucose.label(), MARGIN + 60.0);

    let yes_no = |flag: bool| if flag { "Yes" } else { "No" };
    w.section("Lifestyle Factors");
    w.kv("Smoker", yes_no(profile.smoker), MARGIN + 60.0);
    w.kv("Alcohol", yes_no(profile.alcohol), MARGIN + 60.0);
    w.kv("Active", yes_no(profile.active), MARGIN + 60.0);

    if !assessment.factors.is_empty() {
        w.section("Identified Risk Factors");
        for factor in &assessment.factors {
            w.bullet(factor);
        }
    }

    w.section("Recommendations");
    for rec in RECOMMENDATIONS {
        w.wrapped(rec, 10.0);
    }

    // Disclaimer pinned near the bottom of its own final page
    w.new_page();
    let box_top = PAGE_H - 45.0;
    w.fill_rect(MARGIN, box_top, PAGE_W - 2.0 * MARGIN, 30.0, COLOR_BOX);
    let mut line_y = box_top + 8.0;
    for line in wrap_text(DISCLAIMER, WRAP_CHARS) {
        w.text_at(&line, 8.0, MARGIN + 5.0, line_y, &w.font, COLOR_GRAY);
        line_y += 4.0;
    }

    Ok(ReportDocument {
        pages: w.pages,
        doc: w.doc,
    })
}

/// Render and save into `dir`, returning the written path
pub fn save_report(
    profile: &HealthProfile,
    assessment: &RiskAssessment,
    dir: &Path,
) -> Result<PathBuf> {
    let now = Local::now();
    let path = dir.join(report_filename(now));
    let document = render(profile, assessment, now)?;
    document.save(&path)?;
    Ok(path)
}
