use std::time::{Duration, Instant};

use scl90_core::ITEM_COUNT;
use scl90_core::models::evaluation::{self, Evaluation};
use scl90_core::models::likert::Responses;
use scl90_core::models::respondent::{Respondent, Sex};

/// Rows per column of the item grid.
pub const GRID_ROWS: usize = 30;
pub const GRID_COLUMNS: usize = ITEM_COUNT / GRID_ROWS;

const FLASH_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Sex,
    Date,
    Evaluator,
    /// Zero-based item index.
    Item(usize),
}

impl Field {
    const HEADER: [Field; 4] = [Field::Name, Field::Sex, Field::Date, Field::Evaluator];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct Flash {
    pub message: String,
    pub kind: FlashKind,
    pub since: Instant,
}

pub struct App {
    pub name: String,
    pub sex: Sex,
    pub date: String,
    pub evaluator: String,
    /// One entry per item, empty or a single digit 0-4.
    pub items: Vec<String>,
    pub focus: Field,
    pub flash: Option<Flash>,
    /// First grid row currently on screen; kept in view by the renderer.
    pub grid_offset: usize,
    pub should_quit: bool,
    /// Set by a first Esc when answers would be lost.
    pub confirm_quit: bool,
    pub submitted: Option<Evaluation>,
}

impl App {
    pub fn new(default_sex: Sex, default_evaluator: Option<&str>) -> Self {
        Self {
            name: String::new(),
            sex: default_sex,
            date: evaluation::format_date(evaluation::today()),
            evaluator: default_evaluator.unwrap_or_default().to_string(),
            items: vec![String::new(); ITEM_COUNT],
            focus: Field::Name,
            flash: None,
            grid_offset: 0,
            should_quit: false,
            confirm_quit: false,
            submitted: None,
        }
    }

    /// Tab: header fields in order, then the grid top to bottom, column by
    /// column. Inside the grid it wraps from item 90 back to item 1.
    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            Field::Item(i) => Field::Item((i + 1) % ITEM_COUNT),
            Field::Evaluator => Field::Item(0),
            header => {
                let pos = Field::HEADER.iter().position(|f| *f == header).unwrap_or(0);
                Field::HEADER[pos + 1]
            }
        };
    }

    /// Shift-Tab walks back through the header only; in the grid it does
    /// nothing.
    pub fn previous_field(&mut self) {
        self.focus = match self.focus {
            Field::Item(i) => Field::Item(i),
            Field::Name => Field::Name,
            header => {
                let pos = Field::HEADER.iter().position(|f| *f == header).unwrap_or(1);
                Field::HEADER[pos - 1]
            }
        };
    }

    pub fn move_up(&mut self) {
        match self.focus {
            Field::Item(i) if i % GRID_ROWS > 0 => self.focus = Field::Item(i - 1),
            Field::Item(_) => {}
            _ => self.previous_field(),
        }
    }

    pub fn move_down(&mut self) {
        match self.focus {
            Field::Item(i) if i % GRID_ROWS < GRID_ROWS - 1 => self.focus = Field::Item(i + 1),
            Field::Item(_) => {}
            _ => self.next_field(),
        }
    }

    pub fn move_left(&mut self) {
        match self.focus {
            Field::Item(i) if i >= GRID_ROWS => self.focus = Field::Item(i - GRID_ROWS),
            Field::Sex => self.sex = self.sex.toggled(),
            _ => {}
        }
    }

    pub fn move_right(&mut self) {
        match self.focus {
            Field::Item(i) if i + GRID_ROWS < ITEM_COUNT => self.focus = Field::Item(i + GRID_ROWS),
            Field::Sex => self.sex = self.sex.toggled(),
            _ => {}
        }
    }

    /// A printable key on the focused field.
    pub fn input_char(&mut self, c: char) {
        match self.focus {
            Field::Name => self.name.push(c),
            Field::Evaluator => self.evaluator.push(c),
            Field::Date => {
                if c.is_ascii_digit() || c == '/' || c == '-' {
                    self.date.push(c);
                }
            }
            Field::Sex => {
                if c == ' ' {
                    self.sex = self.sex.toggled();
                }
            }
            Field::Item(i) => {
                if ('0'..='4').contains(&c) {
                    self.items[i] = c.to_string();
                    self.clear_flash();
                    self.next_field();
                } else {
                    self.items[i].clear();
                    self.set_flash(
                        format!("Item {}: only numbers 0-4 are allowed", i + 1),
                        FlashKind::Warning,
                    );
                }
            }
        }
    }

    pub fn backspace(&mut self) {
        match self.focus {
            Field::Name => {
                self.name.pop();
            }
            Field::Evaluator => {
                self.evaluator.pop();
            }
            Field::Date => {
                self.date.pop();
            }
            Field::Item(i) => self.items[i].clear(),
            Field::Sex => {}
        }
    }

    /// Esc: leave at once when nothing has been rated, otherwise ask for a
    /// second Esc first.
    pub fn request_quit(&mut self) {
        let answered = self.answered();
        if answered == 0 || self.confirm_quit {
            self.should_quit = true;
            return;
        }
        self.confirm_quit = true;
        self.set_flash(
            format!("Press Esc again to discard {answered} answers, any other key to keep editing"),
            FlashKind::Warning,
        );
    }

    /// Any key other than Esc withdraws a pending quit.
    pub fn cancel_quit(&mut self) {
        if self.confirm_quit {
            self.confirm_quit = false;
            self.clear_flash();
        }
    }

    /// Validate the form. On success the evaluation is stored in
    /// `submitted` and the loop ends; on failure the first problem is
    /// flashed and focus moves to the offending field.
    pub fn submit(&mut self) {
        match self.build_evaluation() {
            Ok(evaluation) => {
                tracing::info!(
                    evaluation_id = %evaluation.id,
                    total = evaluation.responses.total(),
                    "form submitted"
                );
                self.submitted = Some(evaluation);
                self.should_quit = true;
            }
            Err((field, message)) => {
                self.focus = field;
                self.set_flash(message, FlashKind::Error);
            }
        }
    }

    fn build_evaluation(&self) -> Result<Evaluation, (Field, String)> {
        if self.name.trim().is_empty() {
            return Err((Field::Name, "Enter the respondent's name".to_string()));
        }
        if self.evaluator.trim().is_empty() {
            return Err((Field::Evaluator, "Enter the evaluator's name".to_string()));
        }
        let date = evaluation::parse_date(&self.date)
            .map_err(|e| (Field::Date, format!("{e} (use dd/mm/yyyy)")))?;
        let responses = Responses::from_fields(&self.items)
            .map_err(|e| (Field::Item(0), e.to_string()))?;
        let respondent = Respondent {
            name: self.name.clone(),
            sex: self.sex,
        };
        Evaluation::new(respondent, &self.evaluator, date, responses)
            .map_err(|e| (Field::Name, e.to_string()))
    }

    pub fn answered(&self) -> usize {
        self.items.iter().filter(|v| !v.is_empty()).count()
    }

    pub fn set_flash(&mut self, message: impl Into<String>, kind: FlashKind) {
        self.flash = Some(Flash {
            message: message.into(),
            kind,
            since: Instant::now(),
        });
    }

    pub fn clear_flash(&mut self) {
        self.flash = None;
    }

    /// Drop the flash message once it has been visible long enough.
    pub fn tick(&mut self) {
        if self
            .flash
            .as_ref()
            .is_some_and(|f| f.since.elapsed() >= FLASH_TTL)
        {
            self.flash = None;
        }
    }
}
