use std::path::{Path, PathBuf};

use clap::ValueEnum;

use scl90_core::models::evaluation::{self, Evaluation};
use scl90_core::models::respondent::{Respondent, Sex};
use scl90_export::docx::generate_docx;
use scl90_export::pdf::generate_pdf;
use scl90_export::render::render_summary;
use scl90_export::report::ReportContent;
use scl90_export::styles::ReportStyles;
use scl90_instruments::instruments::scl90r::Scl90R;
use scl90_instruments::profile::ScoreProfile;
use scl90_instruments::Instrument;

use crate::config::{self, Scl90Config};
use crate::input;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
    #[default]
    Pdf,
    Docx,
    Md,
}

impl ReportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ReportFormat::Pdf => "pdf",
            ReportFormat::Docx => "docx",
            ReportFormat::Md => "md",
        }
    }
}

/// Printed when the save dialog yields no path. `rfd` also returns no path
/// when no dialog backend is available, so name the flag that skips it.
pub const SAVE_CANCELLED: &str = "Save cancelled: no file was chosen. \
     Run `scl90 form --output <file.pdf>` to save without a dialog.";

/// Inputs for headless report generation.
#[derive(Debug, Clone)]
pub struct ReportRequest {
    pub input: PathBuf,
    pub name: String,
    pub evaluator: Option<String>,
    pub sex: Option<Sex>,
    pub date: Option<String>,
    pub output: Option<PathBuf>,
    pub format: ReportFormat,
}

pub fn score(input: &Path, sex: Sex, json: bool) -> eyre::Result<String> {
    let responses = input::read_responses(input)?;
    let profile = Scl90R.score(&responses, sex)?;
    if json {
        Ok(serde_json::to_string_pretty(&profile)?)
    } else {
        Ok(Scl90R.to_structured_input(&profile))
    }
}

pub fn report(request: &ReportRequest, config: &Scl90Config) -> eyre::Result<PathBuf> {
    let responses = input::read_responses(&request.input)?;
    let date = match &request.date {
        Some(d) => evaluation::parse_date(d)?,
        None => evaluation::today(),
    };
    let evaluator = request
        .evaluator
        .as_deref()
        .or(config.default_evaluator.as_deref())
        .unwrap_or_default();
    let respondent = Respondent {
        name: request.name.clone(),
        sex: request.sex.unwrap_or(config.default_sex),
    };

    let evaluation = Evaluation::new(respondent, evaluator, date, responses)?;
    let profile = Scl90R.score(&evaluation.responses, evaluation.respondent.sex)?;

    let path = match &request.output {
        Some(p) => p.clone(),
        None => default_output_path(&evaluation, request.format, &config.output_dir()),
    };
    let bytes = render_report(&evaluation, &profile, request.format, &config.report)?;
    write_report(&path, &bytes)?;
    Ok(path)
}

/// Score the evaluation and write a PDF. Used by the terminal form once
/// the save location is known.
pub fn save_pdf(evaluation: &Evaluation, path: &Path, styles: &ReportStyles) -> eyre::Result<()> {
    let profile = Scl90R.score(&evaluation.responses, evaluation.respondent.sex)?;
    let bytes = render_report(evaluation, &profile, ReportFormat::Pdf, styles)?;
    write_report(path, &bytes)
}

pub fn render_report(
    evaluation: &Evaluation,
    profile: &ScoreProfile,
    format: ReportFormat,
    styles: &ReportStyles,
) -> eyre::Result<Vec<u8>> {
    let bytes = match format {
        ReportFormat::Pdf => generate_pdf(evaluation, profile, styles)?,
        ReportFormat::Docx => {
            let summary = render_summary(&ReportContent::build(evaluation, profile))?;
            generate_docx(&summary, styles)?
        }
        ReportFormat::Md => render_summary(&ReportContent::build(evaluation, profile))?.into_bytes(),
    };
    Ok(bytes)
}

/// `dir/SCL90R_{name}_{date}.{ext}`.
pub fn default_output_path(evaluation: &Evaluation, format: ReportFormat, dir: &Path) -> PathBuf {
    dir.join(evaluation.default_file_name())
        .with_extension(format.extension())
}

pub fn write_report(path: &Path, bytes: &[u8]) -> eyre::Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(path, bytes)
        .map_err(|e| eyre::eyre!("failed to write {}: {e}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "report written");
    Ok(())
}

pub fn config_show(path: Option<&Path>) -> eyre::Result<String> {
    let config = config::load_config(path)?;
    Ok(serde_json::to_string_pretty(&config)?)
}

/// Write a default config unless one already exists.
pub fn config_init(path: Option<&Path>, force: bool) -> eyre::Result<PathBuf> {
    let target = match path {
        Some(p) => p.to_path_buf(),
        None => config::config_path()?,
    };
    if target.exists() && !force {
        return Err(eyre::eyre!(
            "config already exists at {} (use --force to overwrite)",
            target.display()
        ));
    }
    config::save_config(&Scl90Config::default(), Some(&target))
}
