pub mod evaluation;
pub mod likert;
pub mod respondent;
