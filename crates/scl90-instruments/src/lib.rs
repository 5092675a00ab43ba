//! scl90-instruments
//!
//! Inventory definitions and scoring. Pure data and arithmetic: defines the
//! item tables, norm cutoffs, and the rules that turn 90 ratings into
//! dimension scores and global indices.

pub mod error;
pub mod instruments;
pub mod norms;
pub mod profile;
pub mod scoring;

use scl90_core::models::likert::Responses;
use scl90_core::models::respondent::Sex;

use error::InstrumentError;
use norms::NormTable;
use profile::{
    ClinicalStatus, DimensionScore, GlobalIndices, GlobalInterpretation, ItemRating,
    ScoreProfile, SeverityBand,
};
use scoring::{round2, Dimension, ScoreRange, ValidationError};

/// Trait implemented by each symptom inventory.
pub trait Instrument: Send + Sync {
    /// Unique identifier for this instrument (e.g., "scl90r").
    fn id(&self) -> &str;

    /// Human-readable name (e.g., "SCL-90-R").
    fn name(&self) -> &str;

    /// Number of items a complete set of responses must contain.
    fn item_count(&self) -> usize;

    /// Valid range for a single item rating.
    fn likert_range(&self) -> ScoreRange {
        ScoreRange::LIKERT
    }

    /// The symptom dimensions, in report order.
    fn dimensions(&self) -> &[Dimension];

    /// Items that belong to no dimension but still count towards the
    /// global indices.
    fn additional_items(&self) -> &[usize];

    /// Norm sample used for clinical cutoffs.
    fn norms(&self) -> &NormTable;

    /// Check raw ratings against the item range. Reports every offending
    /// item rather than stopping at the first.
    fn validate_responses(&self, values: &[u8]) -> Vec<ValidationError> {
        let range = self.likert_range();
        values
            .iter()
            .enumerate()
            .filter(|(_, v)| !range.contains(f64::from(**v)))
            .map(|(i, v)| ValidationError {
                item: i + 1,
                value: f64::from(*v),
                expected_range: range,
                message: format!(
                    "{}: item {} rating {} is outside range [{}, {}]",
                    self.name(),
                    i + 1,
                    v,
                    range.min,
                    range.max,
                ),
            })
            .collect()
    }

    /// Score a complete set of responses against the norms for `sex`.
    fn score(&self, responses: &Responses, sex: Sex) -> Result<ScoreProfile, InstrumentError> {
        let item_count = self.item_count();
        if responses.as_slice().len() != item_count {
            return Err(InstrumentError::ItemCount {
                instrument_id: self.id().to_string(),
                expected: item_count,
                actual: responses.as_slice().len(),
            });
        }

        let norms = self.norms();
        let mut dimensions = Vec::with_capacity(self.dimensions().len());
        for dimension in self.dimensions() {
            let raw: u32 = dimension
                .items
                .iter()
                .filter_map(|n| responses.item(*n))
                .map(|v| u32::from(v.get()))
                .sum();
            let n_items = dimension.items.len();
            let mean = if n_items == 0 {
                0.0
            } else {
                round2(f64::from(raw) / n_items as f64)
            };
            let cutoff = norms.cutoff(&dimension.id, sex).ok_or_else(|| {
                InstrumentError::MissingNorm {
                    instrument_id: self.id().to_string(),
                    dimension_id: dimension.id.clone(),
                }
            })?;
            let status = if mean >= cutoff {
                ClinicalStatus::Clinical
            } else {
                ClinicalStatus::Normal
            };

            dimensions.push(DimensionScore {
                id: dimension.id.clone(),
                name: dimension.name.clone(),
                raw,
                mean,
                n_items,
                cutoff,
                status,
            });
        }

        let total = responses.total();
        let pst = responses.iter().filter(|v| v.is_positive()).count() as u32;
        let global = GlobalIndices {
            gsi: round2(f64::from(total) / item_count as f64),
            pst,
            psdi: if pst > 0 {
                round2(f64::from(total) / f64::from(pst))
            } else {
                0.0
            },
        };

        let thresholds = norms.global;
        let severity = if global.gsi >= thresholds.gsi_clinical {
            SeverityBand::ClinicalCase
        } else if global.gsi >= thresholds.gsi_distress {
            SeverityBand::Distress
        } else {
            SeverityBand::None
        };
        let pst_threshold = thresholds.pst_simulation(sex);
        let interpretation = GlobalInterpretation {
            severity,
            simulation_risk: global.pst > pst_threshold,
            pst_threshold,
            dramatization: global.psdi > thresholds.psdi_dramatization,
        };

        let additional = self
            .additional_items()
            .iter()
            .filter_map(|n| {
                responses.item(*n).map(|v| ItemRating {
                    item: *n,
                    value: v.get(),
                })
            })
            .collect();

        let mut histogram = [0u32; 5];
        for value in responses.iter() {
            if let Some(slot) = histogram.get_mut(usize::from(value.get())) {
                *slot += 1;
            }
        }

        let profile = ScoreProfile {
            instrument_id: self.id().to_string(),
            norms_id: norms.id.clone(),
            norms_name: norms.name.clone(),
            sex,
            dimensions,
            global,
            interpretation,
            thresholds,
            additional,
            histogram,
        };

        tracing::debug!(
            instrument = self.id(),
            gsi = profile.global.gsi,
            pst = profile.global.pst,
            psdi = profile.global.psdi,
            clinical = profile.clinical_dimensions().count(),
            "scored responses"
        );

        Ok(profile)
    }

    /// Format a profile as plain structured text.
    fn to_structured_input(&self, profile: &ScoreProfile) -> String {
        let mut output = format!("## {}\n\n", self.name());
        output.push_str(&format!("Norms: {} ({})\n\n", profile.norms_name, profile.sex));

        output.push_str("### Global Indices\n");
        output.push_str(&format!("- GSI: {:.2}\n", profile.global.gsi));
        output.push_str(&format!("- PST: {}\n", profile.global.pst));
        output.push_str(&format!("- PSDI: {:.2}\n\n", profile.global.psdi));

        output.push_str("### Dimensions\n");
        for score in &profile.dimensions {
            output.push_str(&format!(
                "- {}: mean {:.2} (raw {}, {} items, cutoff {:.2}) {}\n",
                score.name,
                score.mean,
                score.raw,
                score.n_items,
                score.cutoff,
                score.status.label(),
            ));
        }

        if !profile.additional.is_empty() {
            output.push_str("\n### Additional Items\n");
            for rating in &profile.additional {
                output.push_str(&format!("- Item {}: {}\n", rating.item, rating.value));
            }
        }
        output
    }
}
