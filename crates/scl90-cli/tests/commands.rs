use scl90_cli::commands::{
    config_init, config_show, report, score, ReportFormat, ReportRequest, SAVE_CANCELLED,
};
use scl90_cli::config::Scl90Config;
use scl90_core::models::respondent::Sex;

fn write_responses(dir: &std::path::Path, value: u8) -> std::path::PathBuf {
    let path = dir.join("responses.json");
    let values = vec![value.to_string(); 90].join(",");
    std::fs::write(&path, format!("[{values}]")).unwrap();
    path
}

fn request(input: std::path::PathBuf, output: std::path::PathBuf, format: ReportFormat) -> ReportRequest {
    ReportRequest {
        input,
        name: "Ana Garcia".to_string(),
        evaluator: Some("Dr. Ruiz".to_string()),
        sex: Some(Sex::Female),
        date: Some("05/03/2025".to_string()),
        output: Some(output),
        format,
    }
}

#[test]
fn score_prints_structured_summary() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_responses(dir.path(), 1);
    let text = score(&input, Sex::Male, false).unwrap();
    assert!(text.contains("- GSI: 1.00"));
}

#[test]
fn score_json_is_a_profile() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_responses(dir.path(), 2);
    let json: serde_json::Value = serde_json::from_str(&score(&input, Sex::Female, true).unwrap()).unwrap();
    assert_eq!(json["global"]["pst"], 90);
    assert_eq!(json["dimensions"].as_array().unwrap().len(), 9);
    assert_eq!(json["sex"], "female");
}

#[test]
fn report_writes_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_responses(dir.path(), 3);
    let output = dir.path().join("out").join("report.pdf");
    let path = report(&request(input, output.clone(), ReportFormat::Pdf), &Scl90Config::default()).unwrap();
    assert_eq!(path, output);
    assert!(std::fs::read(&output).unwrap().starts_with(b"%PDF"));
}

#[test]
fn report_writes_markdown() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_responses(dir.path(), 0);
    let output = dir.path().join("report.md");
    report(&request(input, output.clone(), ReportFormat::Md), &Scl90Config::default()).unwrap();
    let text = std::fs::read_to_string(&output).unwrap();
    assert!(text.contains("**Name:** Ana Garcia"));
    assert!(text.contains("**Date:** 05/03/2025"));
}

#[test]
fn report_falls_back_to_configured_evaluator() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_responses(dir.path(), 1);
    let mut req = request(input, dir.path().join("r.md"), ReportFormat::Md);
    req.evaluator = None;

    assert!(report(&req, &Scl90Config::default()).is_err());

    let config = Scl90Config {
        default_evaluator: Some("Dr. Ruiz".to_string()),
        ..Scl90Config::default()
    };
    report(&req, &config).unwrap();
}

#[test]
fn default_output_uses_format_extension() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_responses(dir.path(), 1);
    let config = Scl90Config {
        output_dir: Some(dir.path().join("reports")),
        ..Scl90Config::default()
    };
    let mut req = request(input, dir.path().join("unused"), ReportFormat::Docx);
    req.output = None;

    let path = report(&req, &config).unwrap();
    assert_eq!(path, dir.path().join("reports").join("SCL90R_Ana_Garcia_05-03-2025.docx"));
    assert!(std::fs::read(&path).unwrap().starts_with(b"PK"));
}

#[test]
fn config_init_refuses_to_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    config_init(Some(&path), false).unwrap();
    assert!(config_init(Some(&path), false).is_err());
    config_init(Some(&path), true).unwrap();

    let shown = config_show(Some(&path)).unwrap();
    assert!(shown.contains("\"config_version\": 1"));
}

#[test]
fn save_cancelled_points_at_the_output_flag() {
    assert!(SAVE_CANCELLED.starts_with("Save cancelled"));
    assert!(SAVE_CANCELLED.contains("--output <file.pdf>"));
}
