use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;
use crate::models::likert::Responses;
use crate::models::respondent::Respondent;

/// One administration of the inventory: who answered, who scored it,
/// when, and the 90 answers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    pub id: Uuid,
    pub respondent: Respondent,
    pub evaluator: String,
    pub date: Date,
    pub responses: Responses,
    pub created_at: jiff::Timestamp,
}

impl Evaluation {
    /// Build an evaluation. Respondent name and evaluator are required
    /// and are stored trimmed.
    pub fn new(
        respondent: Respondent,
        evaluator: &str,
        date: Date,
        responses: Responses,
    ) -> Result<Self, CoreError> {
        let name = respondent.name.trim();
        if name.is_empty() {
            return Err(CoreError::MissingField("respondent name".to_string()));
        }
        let evaluator = evaluator.trim();
        if evaluator.is_empty() {
            return Err(CoreError::MissingField("evaluator".to_string()));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            respondent: Respondent {
                name: name.to_string(),
                sex: respondent.sex,
            },
            evaluator: evaluator.to_string(),
            date,
            responses,
            created_at: jiff::Timestamp::now(),
        })
    }

    /// Suggested report file name, e.g. `SCL90R_Ana_Garcia_05-03-2025.pdf`.
    pub fn default_file_name(&self) -> String {
        format!(
            "SCL90R_{}_{}.pdf",
            self.respondent.name.replace(' ', "_"),
            format_date(self.date).replace('/', "-"),
        )
    }
}

/// Render a date the way it appears on the form and the report: `dd/mm/yyyy`.
pub fn format_date(date: Date) -> String {
    date.strftime("%d/%m/%Y").to_string()
}

/// Parse `dd/mm/yyyy` (form format) or ISO `yyyy-mm-dd`.
pub fn parse_date(input: &str) -> Result<Date, CoreError> {
    let trimmed = input.trim();
    Date::strptime("%d/%m/%Y", trimmed)
        .or_else(|_| trimmed.parse::<Date>())
        .map_err(|_| CoreError::InvalidDate(trimmed.to_string()))
}

/// Today's date in the system time zone.
pub fn today() -> Date {
    jiff::Zoned::now().date()
}
