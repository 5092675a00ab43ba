use scl90_instruments::profile::{ClinicalStatus, ScoreProfile};

use crate::error::ExportError;
use crate::styles::{Palette, ReportStyles, Rgb};

/// Bars shorter than this carry no value label.
const MIN_LABELLED_VALUE: f64 = 0.3;

#[derive(Debug, Clone)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    pub color: Rgb,
    /// Whether the value is printed on the bar.
    pub labelled: bool,
}

/// Bar chart of dimension means against the clinical cutoff line.
#[derive(Debug, Clone)]
pub struct ProfileChart {
    pub title: String,
    pub y_label: String,
    pub y_max: f64,
    pub bars: Vec<Bar>,
    /// One cutoff per bar, joined by a dashed line.
    pub cutoffs: Vec<f64>,
    pub cutoff_label: String,
    pub cutoff_color: Rgb,
}

impl ProfileChart {
    pub fn from_profile(profile: &ScoreProfile, styles: &ReportStyles) -> Result<Self, ExportError> {
        let palette = Palette::from_styles(styles)?;
        let bars = profile
            .dimensions
            .iter()
            .map(|d| Bar {
                label: d.name.clone(),
                value: d.mean,
                color: match d.status {
                    ClinicalStatus::Clinical => palette.highlight,
                    ClinicalStatus::Normal => palette.accent,
                },
                labelled: d.mean >= MIN_LABELLED_VALUE,
            })
            .collect();

        Ok(Self {
            title: "SCL-90-R Profile - Comparison with Spanish norms".to_string(),
            y_label: "Mean per item (0-4)".to_string(),
            y_max: 4.0,
            bars,
            cutoffs: profile.dimensions.iter().map(|d| d.cutoff).collect(),
            cutoff_label: "Clinical cutoff (T>=63) - Spain".to_string(),
            cutoff_color: palette.alert,
        })
    }
}

/// Distribution of the 90 answers over the rating values 0–4.
#[derive(Debug, Clone)]
pub struct Histogram {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub bars: Vec<Bar>,
}

impl Histogram {
    pub fn from_profile(profile: &ScoreProfile, styles: &ReportStyles) -> Result<Self, ExportError> {
        let palette = Palette::from_styles(styles)?;
        let bars = profile
            .histogram
            .iter()
            .enumerate()
            .map(|(rating, count)| Bar {
                label: rating.to_string(),
                value: f64::from(*count),
                color: palette.accent,
                labelled: *count > 0,
            })
            .collect();

        Ok(Self {
            title: "Response distribution (Likert 0-4)".to_string(),
            x_label: "Likert value".to_string(),
            y_label: "Frequency".to_string(),
            bars,
        })
    }

    /// Top of the y axis: the largest count rounded up to a multiple of 10.
    pub fn y_max(&self) -> f64 {
        let max = self.bars.iter().map(|b| b.value).fold(0.0, f64::max);
        ((max / 10.0).ceil() * 10.0).max(10.0)
    }
}

/// Split a bar label into at most two lines at a space or after a hyphen.
pub fn wrap_label(label: &str) -> Vec<String> {
    let split = label
        .find(' ')
        .map(|i| (i, i + 1))
        .or_else(|| label.find('-').map(|i| (i + 1, i + 1)));
    match split {
        Some((end, start)) => vec![label[..end].to_string(), label[start..].to_string()],
        None => vec![label.to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_on_space_then_hyphen() {
        assert_eq!(wrap_label("Phobic Anxiety"), vec!["Phobic", "Anxiety"]);
        assert_eq!(wrap_label("Obsessive-Compulsive"), vec!["Obsessive-", "Compulsive"]);
        assert_eq!(wrap_label("Depression"), vec!["Depression"]);
    }
}
