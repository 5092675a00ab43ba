use jiff::civil::date;

use scl90_core::error::CoreError;
use scl90_core::models::evaluation::{format_date, parse_date, Evaluation};
use scl90_core::models::likert::Responses;
use scl90_core::models::respondent::{Respondent, Sex};

fn zeros() -> Responses {
    Responses::from_values(&[0; 90]).unwrap()
}

fn respondent(name: &str) -> Respondent {
    Respondent {
        name: name.to_string(),
        sex: Sex::Female,
    }
}

#[test]
fn blank_name_is_rejected() {
    let err = Evaluation::new(respondent("   "), "Dr. Ruiz", date(2025, 3, 5), zeros()).unwrap_err();
    assert!(matches!(err, CoreError::MissingField(ref f) if f == "respondent name"));
}

#[test]
fn blank_evaluator_is_rejected() {
    let err = Evaluation::new(respondent("Ana"), "", date(2025, 3, 5), zeros()).unwrap_err();
    assert!(matches!(err, CoreError::MissingField(ref f) if f == "evaluator"));
}

#[test]
fn fields_are_trimmed() {
    let eval = Evaluation::new(respondent("  Ana  "), " Dr. Ruiz ", date(2025, 3, 5), zeros()).unwrap();
    assert_eq!(eval.respondent.name, "Ana");
    assert_eq!(eval.evaluator, "Dr. Ruiz");
}

#[test]
fn default_file_name_replaces_spaces_and_slashes() {
    let eval = Evaluation::new(respondent("Ana Garcia Lopez"), "Dr. Ruiz", date(2025, 3, 5), zeros())
        .unwrap();
    assert_eq!(eval.default_file_name(), "SCL90R_Ana_Garcia_Lopez_05-03-2025.pdf");
}

#[test]
fn dates_accept_form_and_iso_formats() {
    assert_eq!(parse_date("05/03/2025").unwrap(), date(2025, 3, 5));
    assert_eq!(parse_date("2025-03-05").unwrap(), date(2025, 3, 5));
    assert!(parse_date("March 5").is_err());
    assert_eq!(format_date(date(2025, 3, 5)), "05/03/2025");
}

#[test]
fn wrong_item_count_is_rejected() {
    let err = Responses::from_values(&[1; 89]).unwrap_err();
    assert!(matches!(
        err,
        CoreError::WrongItemCount {
            expected: 90,
            actual: 89
        }
    ));
}

#[test]
fn responses_round_trip_through_json_as_plain_array() {
    let mut values = [0u8; 90];
    values[0] = 4;
    values[89] = 2;
    let responses = Responses::from_values(&values).unwrap();

    let json = serde_json::to_string(&responses).unwrap();
    assert!(json.starts_with("[4,0,"));

    let back: Responses = serde_json::from_str(&json).unwrap();
    assert_eq!(back.item(1).unwrap().get(), 4);
    assert_eq!(back.item(90).unwrap().get(), 2);
    assert!(back.item(0).is_none());
    assert!(back.item(91).is_none());
}

#[test]
fn json_with_out_of_range_value_fails_to_deserialize() {
    let mut values = vec![0u8; 90];
    values[10] = 7;
    let json = serde_json::to_string(&values).unwrap();
    assert!(serde_json::from_str::<Responses>(&json).is_err());
}

#[test]
fn sex_parses_english_and_spanish_labels() {
    assert_eq!("Hombre".parse::<Sex>().unwrap(), Sex::Male);
    assert_eq!("mujer".parse::<Sex>().unwrap(), Sex::Female);
    assert_eq!(" F ".parse::<Sex>().unwrap(), Sex::Female);
    assert!("x".parse::<Sex>().is_err());
}

#[test]
fn bare_m_is_rejected_as_ambiguous() {
    for input in ["m", "M", " m "] {
        let err = input.parse::<Sex>().unwrap_err();
        assert!(matches!(err, CoreError::AmbiguousSex(_)), "{input:?} parsed");
    }
    assert_eq!("h".parse::<Sex>().unwrap(), Sex::Male);
    assert_eq!("f".parse::<Sex>().unwrap(), Sex::Female);
    assert_eq!(Sex::Male.toggled(), Sex::Female);
}
