use jiff::civil::date;

use scl90_core::models::evaluation::Evaluation;
use scl90_core::models::likert::Responses;
use scl90_core::models::respondent::{Respondent, Sex};
use scl90_export::chart::{Histogram, ProfileChart};
use scl90_export::docx::generate_docx;
use scl90_export::error::ExportError;
use scl90_export::pdf::generate_pdf;
use scl90_export::render::render_summary;
use scl90_export::report::{Emphasis, ReportContent, Tone};
use scl90_export::styles::{ReportStyles, Rgb};
use scl90_instruments::instruments::scl90r::Scl90R;
use scl90_instruments::profile::ScoreProfile;
use scl90_instruments::Instrument;

fn evaluate(values: [u8; 90], sex: Sex) -> (Evaluation, ScoreProfile) {
    evaluate_named("Ana Garcia", values, sex)
}

fn evaluate_named(name: &str, values: [u8; 90], sex: Sex) -> (Evaluation, ScoreProfile) {
    let responses = Responses::from_values(&values).unwrap();
    let profile = Scl90R.score(&responses, sex).unwrap();
    let evaluation = Evaluation::new(
        Respondent {
            name: name.to_string(),
            sex,
        },
        "Dr. Ruiz",
        date(2025, 3, 5),
        responses,
    )
    .unwrap();
    (evaluation, profile)
}

#[test]
fn distress_without_clinical_case_has_one_gsi_line() {
    let (evaluation, profile) = evaluate([1; 90], Sex::Male);
    let content = ReportContent::build(&evaluation, &profile);

    assert_eq!(content.indices.len(), 3);
    assert_eq!(content.indices[0].value, "1.00");
    assert_eq!(content.indices[0].emphasis, Emphasis::Bold);
    assert_eq!(content.indices[0].note, "(>=1.00 = distress)");

    assert_eq!(content.indices[1].value, "90");
    assert_eq!(content.indices[1].note, "(Simulation risk)");

    assert_eq!(content.indices[2].emphasis, Emphasis::Plain);
    assert_eq!(content.indices[2].note, "(Possible dramatization > 2.80)");
}

#[test]
fn clinical_case_adds_alert_line() {
    let (evaluation, profile) = evaluate([4; 90], Sex::Female);
    let content = ReportContent::build(&evaluation, &profile);

    assert_eq!(content.indices.len(), 4);
    assert_eq!(content.indices[1].emphasis, Emphasis::Alert);
    assert_eq!(content.indices[1].note, "(>=1.50 = clinical case)");
    assert_eq!(content.indices[3].note, "(Possible dramatization)");
    assert_eq!(content.clinical_count, 9);
}

#[test]
fn quiet_profile_mentions_sex_specific_pst_threshold() {
    let (evaluation, profile) = evaluate([0; 90], Sex::Female);
    let content = ReportContent::build(&evaluation, &profile);

    assert_eq!(content.indices[0].emphasis, Emphasis::Plain);
    assert_eq!(content.indices[0].note, "(>=1.00 = distress | >=1.50 = clinical case)");
    assert_eq!(content.indices[1].note, "(Simulation risk in females > 70)");
}

#[test]
fn response_cells_are_toned_by_value() {
    let mut values = [0u8; 90];
    values[6] = 2;
    values[7] = 3;
    values[8] = 4;
    let (evaluation, profile) = evaluate(values, Sex::Male);
    let content = ReportContent::build(&evaluation, &profile);

    assert_eq!(content.responses.len(), 90);
    assert_eq!(content.responses[0].tone, Tone::Muted);
    assert_eq!(content.responses[6].tone, Tone::Normal);
    assert_eq!(content.responses[7].tone, Tone::Alert);
    assert_eq!(content.responses[8].tone, Tone::Alert);
    assert_eq!(content.responses[6].label(), "Item  7: ");
    assert_eq!(content.responses[89].label(), "Item 90: ");
}

#[test]
fn summary_template_renders_all_sections() {
    let (evaluation, profile) = evaluate([1; 90], Sex::Male);
    let content = ReportContent::build(&evaluation, &profile);
    let summary = render_summary(&content).unwrap();

    assert!(summary.starts_with("# SCL-90-R Results Report"));
    assert!(summary.contains("**Name:** Ana Garcia"));
    assert!(summary.contains("**Date:** 05/03/2025"));
    assert!(summary.contains("- Global Severity Index (GSI): **1.00** (>=1.00 = distress)"));
    assert!(summary.contains("- Phobic Anxiety: mean 1.00, cutoff 0.73, **Clinical**"));
    assert!(summary.contains("- Depression: mean 1.00, cutoff 1.43, Normal"));
    assert!(summary.contains("2 of 9 dimensions reach the clinical cutoff."));
    assert!(summary.contains("1: 1, 2: 1"));
    assert!(summary.trim_end().ends_with("90: 1"));
}

#[test]
fn profile_chart_highlights_clinical_bars() {
    let mut values = [0u8; 90];
    // Hostility items at 2, everything else quiet
    for item in [11, 24, 63, 67, 74, 81] {
        values[item - 1] = 2;
    }
    let (_, profile) = evaluate(values, Sex::Male);
    let styles = ReportStyles::default();
    let chart = ProfileChart::from_profile(&profile, &styles).unwrap();

    assert_eq!(chart.bars.len(), 9);
    assert_eq!(chart.cutoffs.len(), 9);
    let hostility = &chart.bars[5];
    assert_eq!(hostility.label, "Hostility");
    assert_eq!(hostility.color, Rgb::parse_hex(&styles.highlight_color).unwrap());
    assert!(hostility.labelled);
    assert_eq!(chart.bars[0].color, Rgb::parse_hex(&styles.accent_color).unwrap());
    assert!(!chart.bars[0].labelled);
}

#[test]
fn histogram_scales_to_next_multiple_of_ten() {
    let mut values = [1u8; 90];
    values[..45].fill(0);
    let (_, profile) = evaluate(values, Sex::Male);
    let histogram = Histogram::from_profile(&profile, &ReportStyles::default()).unwrap();

    assert_eq!(histogram.bars[0].value, 45.0);
    assert_eq!(histogram.bars[1].value, 45.0);
    assert_eq!(histogram.y_max(), 50.0);
    assert!(!histogram.bars[4].labelled);
}

/// Text drawn on each page, in drawing order.
fn pdf_pages(bytes: &[u8]) -> Vec<Vec<String>> {
    let doc = lopdf::Document::load_mem(bytes).unwrap();
    doc.get_pages()
        .values()
        .map(|id| {
            let content = doc.get_and_decode_page_content(*id).unwrap();
            content
                .operations
                .iter()
                .filter(|op| op.operator == "Tj")
                .filter_map(|op| match op.operands.first() {
                    Some(lopdf::Object::String(bytes, _)) => {
                        Some(lopdf::Document::decode_text(Some("WinAnsiEncoding"), bytes))
                    }
                    _ => None,
                })
                .collect()
        })
        .collect()
}

fn position(texts: &[String], wanted: &str) -> usize {
    texts
        .iter()
        .position(|t| t == wanted)
        .unwrap_or_else(|| panic!("{wanted:?} not drawn"))
}

#[test]
fn pdf_sections_appear_in_order() {
    let (evaluation, profile) = evaluate([2; 90], Sex::Female);
    let bytes = generate_pdf(&evaluation, &profile, &ReportStyles::default()).unwrap();
    assert!(bytes.starts_with(b"%PDF"));

    let pages = pdf_pages(&bytes);
    assert!(pages[0].first().is_some_and(|t| t == "SCL-90-R Results Report"));
    let texts: Vec<String> = pages.concat();

    let order = [
        position(&texts, "SCL-90-R Results Report"),
        position(&texts, "Name:"),
        position(&texts, "Evaluator:"),
        position(&texts, "Responses of Ana Garcia"),
        position(&texts, "Item  1: "),
        position(&texts, "Item 90: "),
        position(&texts, "Global Indices"),
        position(&texts, "- Global Severity Index (GSI):"),
        position(&texts, "- Positive Symptom Distress Index (PSDI):"),
        position(&texts, "Scores by Dimension (Spanish norms)"),
        position(&texts, "Psychoticism"),
        position(&texts, "Scores by Dimension"),
    ];
    assert!(order.windows(2).all(|w| w[0] < w[1]), "sections out of order: {order:?}");
    assert!(!texts.iter().any(|t| t == "Response distribution"));
}

#[test]
fn pdf_header_and_indices_carry_the_values() {
    let (evaluation, profile) = evaluate([2; 90], Sex::Female);
    let bytes = generate_pdf(&evaluation, &profile, &ReportStyles::default()).unwrap();
    let texts: Vec<String> = pdf_pages(&bytes).concat();

    let name = position(&texts, "Name:");
    assert_eq!(texts[name + 1], "Ana Garcia");
    let date = position(&texts, "Date:");
    assert_eq!(texts[date + 1], "05/03/2025");
    let evaluator = position(&texts, "Evaluator:");
    assert_eq!(texts[evaluator + 1], "Dr. Ruiz");

    let gsi = position(&texts, "- Global Severity Index (GSI):");
    assert_eq!(texts[gsi + 1], "2.00");
    assert_eq!(texts[gsi + 2], "(>=1.00 = distress)");

    // Every female cutoff is below 2.00
    assert_eq!(texts.iter().filter(|t| *t == "Clinical").count(), 9);
}

#[test]
fn pdf_keeps_accented_names() {
    let (evaluation, profile) = evaluate_named("José Núñez", [1; 90], Sex::Male);
    let bytes = generate_pdf(&evaluation, &profile, &ReportStyles::default()).unwrap();
    let texts: Vec<String> = pdf_pages(&bytes).concat();

    let name = position(&texts, "Name:");
    assert_eq!(texts[name + 1], "José Núñez");
    position(&texts, "Responses of José Núñez");
}

#[test]
fn pdf_histogram_is_the_last_section() {
    let (evaluation, profile) = evaluate([2; 90], Sex::Female);
    let styles = ReportStyles {
        include_histogram: true,
        ..ReportStyles::default()
    };
    let bytes = generate_pdf(&evaluation, &profile, &styles).unwrap();
    let texts: Vec<String> = pdf_pages(&bytes).concat();

    let chart = position(&texts, "Scores by Dimension");
    let histogram = position(&texts, "Response distribution");
    assert!(chart < histogram);
    // All 90 answers are 2
    assert!(texts[histogram..].iter().any(|t| t == "90"));
}

#[test]
fn bad_colour_in_styles_is_reported() {
    let (evaluation, profile) = evaluate([0; 90], Sex::Male);
    let styles = ReportStyles {
        accent_color: "blue".to_string(),
        ..ReportStyles::default()
    };
    let err = generate_pdf(&evaluation, &profile, &styles).unwrap_err();
    assert!(matches!(err, ExportError::InvalidColor(ref c) if c == "blue"));
}

#[test]
fn docx_is_a_zip_package() {
    let (evaluation, profile) = evaluate([1; 90], Sex::Male);
    let summary = render_summary(&ReportContent::build(&evaluation, &profile)).unwrap();
    let bytes = generate_docx(&summary, &ReportStyles::default()).unwrap();
    assert!(bytes.starts_with(b"PK"));
}
