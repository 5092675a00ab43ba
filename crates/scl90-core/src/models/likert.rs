use serde::{Deserialize, Serialize};

use crate::ITEM_COUNT;
use crate::error::CoreError;

/// A single answer on the 0–4 rating scale
/// (0 = not at all, 4 = extremely).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct LikertValue(u8);

impl LikertValue {
    pub const MIN: u8 = 0;
    pub const MAX: u8 = 4;

    pub fn new(value: u8) -> Result<Self, CoreError> {
        if value > Self::MAX {
            return Err(CoreError::InvalidLikert(value.to_string()));
        }
        Ok(Self(value))
    }

    /// Parse a form field. A blank field counts as 0, anything else must
    /// be a single number in 0–4.
    pub fn parse_field(field: &str) -> Result<Self, CoreError> {
        let trimmed = field.trim();
        if trimmed.is_empty() {
            return Ok(Self(0));
        }
        if !trimmed.chars().all(|c| c.is_ascii_digit()) {
            return Err(CoreError::InvalidLikert(trimmed.to_string()));
        }
        let value: u8 = trimmed
            .parse()
            .map_err(|_| CoreError::InvalidLikert(trimmed.to_string()))?;
        Self::new(value)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Whether this answer counts as a positive symptom (any value above 0).
    pub fn is_positive(self) -> bool {
        self.0 > 0
    }
}

impl TryFrom<u8> for LikertValue {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LikertValue> for u8 {
    fn from(value: LikertValue) -> Self {
        value.0
    }
}

impl std::fmt::Display for LikertValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The full set of 90 answers, item `n` (1-based) stored at index `n - 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct Responses(Vec<LikertValue>);

impl Responses {
    pub fn from_values(values: &[u8]) -> Result<Self, CoreError> {
        check_count(values.len())?;
        values
            .iter()
            .enumerate()
            .map(|(i, v)| LikertValue::new(*v).map_err(|e| item_error(i, e)))
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    /// Build from raw form fields, where blank fields count as 0.
    pub fn from_fields<S: AsRef<str>>(fields: &[S]) -> Result<Self, CoreError> {
        check_count(fields.len())?;
        fields
            .iter()
            .enumerate()
            .map(|(i, f)| LikertValue::parse_field(f.as_ref()).map_err(|e| item_error(i, e)))
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    /// Answer for a 1-based item number.
    pub fn item(&self, number: usize) -> Option<LikertValue> {
        number.checked_sub(1).and_then(|i| self.0.get(i).copied())
    }

    pub fn iter(&self) -> impl Iterator<Item = LikertValue> + '_ {
        self.0.iter().copied()
    }

    pub fn as_slice(&self) -> &[LikertValue] {
        &self.0
    }

    pub fn total(&self) -> u32 {
        self.0.iter().map(|v| u32::from(v.get())).sum()
    }
}

impl TryFrom<Vec<u8>> for Responses {
    type Error = CoreError;

    fn try_from(values: Vec<u8>) -> Result<Self, Self::Error> {
        Self::from_values(&values)
    }
}

impl From<Responses> for Vec<u8> {
    fn from(responses: Responses) -> Self {
        responses.0.into_iter().map(u8::from).collect()
    }
}

fn check_count(actual: usize) -> Result<(), CoreError> {
    if actual != ITEM_COUNT {
        return Err(CoreError::WrongItemCount {
            expected: ITEM_COUNT,
            actual,
        });
    }
    Ok(())
}

fn item_error(index: usize, source: CoreError) -> CoreError {
    CoreError::InvalidItem {
        item: index + 1,
        source: Box::new(source),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_field_counts_as_zero() {
        assert_eq!(LikertValue::parse_field("   ").unwrap().get(), 0);
        assert_eq!(LikertValue::parse_field("").unwrap().get(), 0);
    }

    #[test]
    fn rejects_out_of_range_and_non_digits() {
        assert!(LikertValue::parse_field("5").is_err());
        assert!(LikertValue::parse_field("-1").is_err());
        assert!(LikertValue::parse_field("2.5").is_err());
        assert!(LikertValue::parse_field("a").is_err());
        assert!(LikertValue::new(200).is_err());
    }

    #[test]
    fn item_error_reports_one_based_number() {
        let mut fields = vec!["0"; ITEM_COUNT];
        fields[41] = "9";
        let err = Responses::from_fields(&fields).unwrap_err();
        assert!(matches!(err, CoreError::InvalidItem { item: 42, .. }));
    }
}
