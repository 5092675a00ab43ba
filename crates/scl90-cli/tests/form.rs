use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use scl90_cli::tui::app::{App, Field, FlashKind};
use scl90_cli::tui::handle_key_event;
use scl90_core::models::respondent::Sex;

fn press(app: &mut App, code: KeyCode) {
    handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE));
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

fn filled_app() -> App {
    let mut app = App::new(Sex::Female, Some("Dr. Ruiz"));
    type_text(&mut app, "Ana Garcia");
    app.date = "05/03/2025".to_string();
    app
}

#[test]
fn new_form_is_prefilled() {
    let app = App::new(Sex::Female, Some("Dr. Ruiz"));
    assert_eq!(app.sex, Sex::Female);
    assert_eq!(app.evaluator, "Dr. Ruiz");
    assert_eq!(app.date.len(), 10);
    assert_eq!(&app.date[2..3], "/");
    assert_eq!(app.focus, Field::Name);
    assert_eq!(app.answered(), 0);
}

#[test]
fn tab_walks_header_then_items_and_wraps() {
    let mut app = App::new(Sex::Male, None);
    for expected in [Field::Sex, Field::Date, Field::Evaluator, Field::Item(0)] {
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, expected);
    }
    // Item 30 is followed by item 31, the top of the second column
    app.focus = Field::Item(29);
    press(&mut app, KeyCode::Tab);
    assert_eq!(app.focus, Field::Item(30));

    app.focus = Field::Item(89);
    press(&mut app, KeyCode::Tab);
    assert_eq!(app.focus, Field::Item(0));
}

#[test]
fn shift_tab_is_swallowed_in_the_grid() {
    let mut app = App::new(Sex::Male, None);
    app.focus = Field::Item(42);
    press(&mut app, KeyCode::BackTab);
    assert_eq!(app.focus, Field::Item(42));

    app.focus = Field::Date;
    press(&mut app, KeyCode::BackTab);
    assert_eq!(app.focus, Field::Sex);
}

#[test]
fn arrows_move_within_the_grid() {
    let mut app = App::new(Sex::Male, None);
    app.focus = Field::Item(0);
    press(&mut app, KeyCode::Right);
    assert_eq!(app.focus, Field::Item(30));
    press(&mut app, KeyCode::Right);
    press(&mut app, KeyCode::Right);
    assert_eq!(app.focus, Field::Item(60));
    press(&mut app, KeyCode::Up);
    assert_eq!(app.focus, Field::Item(60));
    press(&mut app, KeyCode::Down);
    assert_eq!(app.focus, Field::Item(61));
}

#[test]
fn valid_rating_is_stored_and_advances() {
    let mut app = App::new(Sex::Male, None);
    app.focus = Field::Item(4);
    press(&mut app, KeyCode::Char('3'));
    assert_eq!(app.items[4], "3");
    assert_eq!(app.focus, Field::Item(5));
    assert_eq!(app.answered(), 1);
}

#[test]
fn invalid_rating_is_rejected_with_warning() {
    let mut app = App::new(Sex::Male, None);
    app.focus = Field::Item(4);
    app.items[4] = "2".to_string();
    press(&mut app, KeyCode::Char('7'));
    assert_eq!(app.items[4], "");
    assert_eq!(app.focus, Field::Item(4));
    let flash = app.flash.as_ref().unwrap();
    assert_eq!(flash.kind, FlashKind::Warning);
    assert!(flash.message.contains("Item 5"));

    press(&mut app, KeyCode::Char('a'));
    assert_eq!(app.items[4], "");
}

#[test]
fn space_and_arrows_toggle_sex() {
    let mut app = App::new(Sex::Male, None);
    app.focus = Field::Sex;
    press(&mut app, KeyCode::Char(' '));
    assert_eq!(app.sex, Sex::Female);
    press(&mut app, KeyCode::Left);
    assert_eq!(app.sex, Sex::Male);
}

#[test]
fn submit_requires_name() {
    let mut app = App::new(Sex::Male, Some("Dr. Ruiz"));
    app.focus = Field::Item(10);
    press(&mut app, KeyCode::F(2));
    assert!(app.submitted.is_none());
    assert!(!app.should_quit);
    assert_eq!(app.focus, Field::Name);
    assert_eq!(app.flash.as_ref().unwrap().kind, FlashKind::Error);
}

#[test]
fn submit_requires_evaluator() {
    let mut app = App::new(Sex::Male, None);
    type_text(&mut app, "Ana");
    handle_key_event(
        &mut app,
        KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL),
    );
    assert!(app.submitted.is_none());
    assert_eq!(app.focus, Field::Evaluator);
    assert!(app.flash.as_ref().unwrap().message.contains("evaluator"));
}

#[test]
fn submit_rejects_bad_date() {
    let mut app = filled_app();
    app.date = "31/02/2025".to_string();
    press(&mut app, KeyCode::F(2));
    assert!(app.submitted.is_none());
    assert_eq!(app.focus, Field::Date);
}

#[test]
fn blank_items_score_as_zero_on_submit() {
    let mut app = filled_app();
    app.items[0] = "4".to_string();
    press(&mut app, KeyCode::F(2));

    let evaluation = app.submitted.as_ref().unwrap();
    assert!(app.should_quit);
    assert_eq!(evaluation.respondent.name, "Ana Garcia");
    assert_eq!(evaluation.respondent.sex, Sex::Female);
    assert_eq!(evaluation.responses.total(), 4);
    assert_eq!(evaluation.default_file_name(), "SCL90R_Ana_Garcia_05-03-2025.pdf");
}

#[test]
fn escape_quits_without_submitting() {
    let mut app = filled_app();
    press(&mut app, KeyCode::Esc);
    assert!(app.should_quit);
    assert!(app.submitted.is_none());
}

#[test]
fn escape_with_answers_asks_before_discarding() {
    let mut app = filled_app();
    app.focus = Field::Item(0);
    type_text(&mut app, "31");

    press(&mut app, KeyCode::Esc);
    assert!(!app.should_quit);
    assert!(app.confirm_quit);
    let flash = app.flash.as_ref().unwrap();
    assert_eq!(flash.kind, FlashKind::Warning);
    assert!(flash.message.contains("discard 2 answers"));

    press(&mut app, KeyCode::Esc);
    assert!(app.should_quit);
    assert!(app.submitted.is_none());
}

#[test]
fn other_key_withdraws_pending_quit() {
    let mut app = filled_app();
    app.focus = Field::Item(0);
    type_text(&mut app, "2");

    press(&mut app, KeyCode::Esc);
    assert!(app.confirm_quit);
    press(&mut app, KeyCode::Down);
    assert!(!app.confirm_quit);
    assert!(app.flash.is_none());

    press(&mut app, KeyCode::Esc);
    assert!(!app.should_quit);
    assert_eq!(app.items[0], "2");
}
