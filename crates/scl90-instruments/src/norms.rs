use serde::{Deserialize, Serialize};

use scl90_core::models::respondent::Sex;

/// Clinical cutoff for one dimension, as mean rating per item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DimensionCutoff {
    pub dimension_id: String,
    pub male: f64,
    pub female: f64,
}

impl DimensionCutoff {
    pub fn for_sex(&self, sex: Sex) -> f64 {
        match sex {
            Sex::Male => self.male,
            Sex::Female => self.female,
        }
    }
}

/// Thresholds applied to the three global indices.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GlobalThresholds {
    /// GSI at or above this value indicates distress.
    pub gsi_distress: f64,
    /// GSI at or above this value is a clinical case.
    pub gsi_clinical: f64,
    /// PST strictly above this value suggests symptom simulation (males).
    pub pst_simulation_male: u32,
    /// PST strictly above this value suggests symptom simulation (females).
    pub pst_simulation_female: u32,
    /// PSDI strictly above this value suggests dramatization.
    pub psdi_dramatization: f64,
}

impl GlobalThresholds {
    pub fn pst_simulation(&self, sex: Sex) -> u32 {
        match sex {
            Sex::Male => self.pst_simulation_male,
            Sex::Female => self.pst_simulation_female,
        }
    }
}

/// A norm sample: per-dimension cutoffs plus global thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormTable {
    pub id: String,
    pub name: String,
    pub cutoffs: Vec<DimensionCutoff>,
    pub global: GlobalThresholds,
}

impl NormTable {
    pub fn cutoff(&self, dimension_id: &str, sex: Sex) -> Option<f64> {
        self.cutoffs
            .iter()
            .find(|c| c.dimension_id == dimension_id)
            .map(|c| c.for_sex(sex))
    }
}
