use serde::{Deserialize, Serialize};

use scl90_core::models::respondent::Sex;

use crate::norms::GlobalThresholds;

/// Whether a dimension mean reaches its clinical cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClinicalStatus {
    Normal,
    Clinical,
}

impl ClinicalStatus {
    pub fn label(self) -> &'static str {
        match self {
            ClinicalStatus::Normal => "Normal",
            ClinicalStatus::Clinical => "Clinical",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DimensionScore {
    pub id: String,
    pub name: String,
    /// Sum of the item ratings.
    pub raw: u32,
    /// `raw / n_items`, rounded to two decimals.
    pub mean: f64,
    pub n_items: usize,
    pub cutoff: f64,
    pub status: ClinicalStatus,
}

/// GSI, PST and PSDI.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlobalIndices {
    /// Global Severity Index: mean rating over all items.
    pub gsi: f64,
    /// Positive Symptom Total: number of items rated above 0.
    pub pst: u32,
    /// Positive Symptom Distress Index: mean rating over positive items.
    pub psdi: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityBand {
    None,
    Distress,
    ClinicalCase,
}

/// Flags derived from the global indices and the norm thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalInterpretation {
    pub severity: SeverityBand,
    pub simulation_risk: bool,
    /// The PST threshold that applied for the respondent's sex.
    pub pst_threshold: u32,
    pub dramatization: bool,
}

/// The rating of a single item outside every dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRating {
    pub item: usize,
    pub value: u8,
}

/// The complete scoring result for one set of responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreProfile {
    pub instrument_id: String,
    pub norms_id: String,
    pub norms_name: String,
    pub sex: Sex,
    pub dimensions: Vec<DimensionScore>,
    pub global: GlobalIndices,
    pub interpretation: GlobalInterpretation,
    /// Thresholds the interpretation was derived from.
    pub thresholds: GlobalThresholds,
    /// Ratings of the items that only count towards the global indices.
    pub additional: Vec<ItemRating>,
    /// How many items received each rating, indexed by rating 0..=4.
    pub histogram: [u32; 5],
}

impl ScoreProfile {
    pub fn clinical_dimensions(&self) -> impl Iterator<Item = &DimensionScore> {
        self.dimensions
            .iter()
            .filter(|d| d.status == ClinicalStatus::Clinical)
    }

    pub fn dimension(&self, id: &str) -> Option<&DimensionScore> {
        self.dimensions.iter().find(|d| d.id == id)
    }
}
