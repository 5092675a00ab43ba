use std::sync::LazyLock;

use scl90_core::ITEM_COUNT;

use crate::norms::{DimensionCutoff, GlobalThresholds, NormTable};
use crate::scoring::Dimension;
use crate::Instrument;

/// SCL-90-R: Symptom Checklist-90-Revised.
/// 90 items rated 0–4, nine symptom dimensions plus seven additional items
/// that only feed the global indices (GSI, PST, PSDI).
///
/// Item 18 is scored in both Obsessive-Compulsive and Paranoid Ideation,
/// and item 65 in no dimension, matching the scoring sheet the norms were
/// collected with.
pub struct Scl90R;

/// Items scored only in the global indices.
const ADDITIONAL_ITEMS: [usize; 7] = [19, 44, 59, 60, 64, 66, 89];

static DIMENSIONS: LazyLock<Vec<Dimension>> = LazyLock::new(|| {
    vec![
        dimension(
            "somatization",
            "Somatization",
            &[1, 4, 12, 27, 40, 42, 48, 49, 52, 53, 56, 58],
        ),
        dimension(
            "obsessive_compulsive",
            "Obsessive-Compulsive",
            &[3, 9, 10, 18, 28, 38, 45, 46, 51, 55],
        ),
        dimension(
            "interpersonal_sensitivity",
            "Interpersonal Sensitivity",
            &[6, 21, 34, 36, 37, 41, 61, 69, 73],
        ),
        dimension(
            "depression",
            "Depression",
            &[5, 14, 15, 20, 22, 26, 29, 30, 31, 32, 54, 71, 79],
        ),
        dimension(
            "anxiety",
            "Anxiety",
            &[2, 17, 23, 33, 39, 57, 72, 78, 80, 86],
        ),
        dimension("hostility", "Hostility", &[11, 24, 63, 67, 74, 81]),
        dimension(
            "phobic_anxiety",
            "Phobic Anxiety",
            &[13, 25, 47, 50, 70, 75, 82],
        ),
        dimension(
            "paranoid_ideation",
            "Paranoid Ideation",
            &[8, 18, 43, 68, 76, 83],
        ),
        dimension(
            "psychoticism",
            "Psychoticism",
            &[7, 16, 35, 62, 77, 84, 85, 87, 88, 90],
        ),
    ]
});

// Spanish general-population norms, mean per item. A dimension mean at or
// above the cutoff corresponds to T >= 63.
static SPANISH_NORMS: LazyLock<NormTable> = LazyLock::new(|| NormTable {
    id: "es".to_string(),
    name: "Spanish norms".to_string(),
    cutoffs: vec![
        cutoff("somatization", 1.18, 1.63),
        cutoff("obsessive_compulsive", 1.61, 1.99),
        cutoff("interpersonal_sensitivity", 1.37, 1.81),
        cutoff("depression", 1.43, 1.87),
        cutoff("anxiety", 1.16, 1.58),
        cutoff("hostility", 1.26, 1.60),
        cutoff("phobic_anxiety", 0.73, 1.00),
        cutoff("paranoid_ideation", 1.46, 1.56),
        cutoff("psychoticism", 0.97, 1.03),
    ],
    global: GlobalThresholds {
        gsi_distress: 1.0,
        gsi_clinical: 1.5,
        pst_simulation_male: 60,
        pst_simulation_female: 70,
        psdi_dramatization: 2.8,
    },
});

impl Instrument for Scl90R {
    fn id(&self) -> &str {
        "scl90r"
    }

    fn name(&self) -> &str {
        "SCL-90-R"
    }

    fn item_count(&self) -> usize {
        ITEM_COUNT
    }

    fn dimensions(&self) -> &[Dimension] {
        &DIMENSIONS
    }

    fn additional_items(&self) -> &[usize] {
        &ADDITIONAL_ITEMS
    }

    fn norms(&self) -> &NormTable {
        &SPANISH_NORMS
    }
}

fn dimension(id: &str, name: &str, items: &[usize]) -> Dimension {
    Dimension {
        id: id.to_string(),
        name: name.to_string(),
        items: items.to_vec(),
    }
}

fn cutoff(dimension_id: &str, male: f64, female: f64) -> DimensionCutoff {
    DimensionCutoff {
        dimension_id: dimension_id.to_string(),
        male,
        female,
    }
}
