use serde::Serialize;

use scl90_core::models::evaluation::{format_date, Evaluation};
use scl90_core::models::respondent::Sex;
use scl90_instruments::profile::{ClinicalStatus, ScoreProfile, SeverityBand};

/// Visual weight of a response value in the response grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    /// Rated 0.
    Muted,
    /// Rated 1 or 2.
    Normal,
    /// Rated 3 or 4.
    Alert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Emphasis {
    Plain,
    Bold,
    Alert,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResponseCell {
    pub item: usize,
    pub value: u8,
    pub tone: Tone,
}

impl ResponseCell {
    /// Fixed-width label, e.g. `"Item  7: "`.
    pub fn label(&self) -> String {
        format!("Item {:2}: ", self.item)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct IndexLine {
    pub label: String,
    pub value: String,
    pub emphasis: Emphasis,
    pub note: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DimensionRow {
    pub name: String,
    pub mean: String,
    pub cutoff: String,
    pub status: String,
    pub clinical: bool,
}

/// Everything a report shows, already formatted. Shared by the PDF
/// renderer and the text summary template.
#[derive(Debug, Clone, Serialize)]
pub struct ReportContent {
    pub title: String,
    pub name: String,
    pub sex: String,
    pub date: String,
    pub evaluator: String,
    pub norms_name: String,
    pub responses: Vec<ResponseCell>,
    pub indices: Vec<IndexLine>,
    pub dimensions: Vec<DimensionRow>,
    pub clinical_count: usize,
}

impl ReportContent {
    pub fn build(evaluation: &Evaluation, profile: &ScoreProfile) -> Self {
        let responses = evaluation
            .responses
            .iter()
            .enumerate()
            .map(|(i, v)| ResponseCell {
                item: i + 1,
                value: v.get(),
                tone: match v.get() {
                    0 => Tone::Muted,
                    1 | 2 => Tone::Normal,
                    _ => Tone::Alert,
                },
            })
            .collect();

        let dimensions = profile
            .dimensions
            .iter()
            .map(|d| DimensionRow {
                name: d.name.clone(),
                mean: format!("{:.2}", d.mean),
                cutoff: format!("{:.2}", d.cutoff),
                status: d.status.label().to_string(),
                clinical: d.status == ClinicalStatus::Clinical,
            })
            .collect();

        Self {
            title: "SCL-90-R Results Report".to_string(),
            name: evaluation.respondent.name.clone(),
            sex: evaluation.respondent.sex.label().to_string(),
            date: format_date(evaluation.date),
            evaluator: evaluation.evaluator.clone(),
            norms_name: profile.norms_name.clone(),
            responses,
            indices: index_lines(profile),
            dimensions,
            clinical_count: profile.clinical_dimensions().count(),
        }
    }
}

fn index_lines(profile: &ScoreProfile) -> Vec<IndexLine> {
    let global = profile.global;
    let interp = profile.interpretation;
    let thresholds = profile.thresholds;
    let mut lines = Vec::with_capacity(4);

    let gsi_label = "Global Severity Index (GSI)";
    let gsi = format!("{:.2}", global.gsi);
    match interp.severity {
        SeverityBand::None => lines.push(IndexLine {
            label: gsi_label.to_string(),
            value: gsi,
            emphasis: Emphasis::Plain,
            note: format!(
                "(>={:.2} = distress | >={:.2} = clinical case)",
                thresholds.gsi_distress, thresholds.gsi_clinical
            ),
        }),
        SeverityBand::Distress | SeverityBand::ClinicalCase => {
            lines.push(IndexLine {
                label: gsi_label.to_string(),
                value: gsi.clone(),
                emphasis: Emphasis::Bold,
                note: format!("(>={:.2} = distress)", thresholds.gsi_distress),
            });
            if interp.severity == SeverityBand::ClinicalCase {
                lines.push(IndexLine {
                    label: gsi_label.to_string(),
                    value: gsi,
                    emphasis: Emphasis::Alert,
                    note: format!("(>={:.2} = clinical case)", thresholds.gsi_clinical),
                });
            }
        }
    }

    let pst_label = "Positive Symptom Total (PST)";
    lines.push(if interp.simulation_risk {
        IndexLine {
            label: pst_label.to_string(),
            value: global.pst.to_string(),
            emphasis: Emphasis::Bold,
            note: "(Simulation risk)".to_string(),
        }
    } else {
        let group = match profile.sex {
            Sex::Male => "males",
            Sex::Female => "females",
        };
        IndexLine {
            label: pst_label.to_string(),
            value: global.pst.to_string(),
            emphasis: Emphasis::Plain,
            note: format!("(Simulation risk in {group} > {})", interp.pst_threshold),
        }
    });

    let psdi_label = "Positive Symptom Distress Index (PSDI)";
    lines.push(if interp.dramatization {
        IndexLine {
            label: psdi_label.to_string(),
            value: format!("{:.2}", global.psdi),
            emphasis: Emphasis::Bold,
            note: "(Possible dramatization)".to_string(),
        }
    } else {
        IndexLine {
            label: psdi_label.to_string(),
            value: format!("{:.2}", global.psdi),
            emphasis: Emphasis::Plain,
            note: format!("(Possible dramatization > {:.2})", thresholds.psdi_dramatization),
        }
    });

    lines
}
