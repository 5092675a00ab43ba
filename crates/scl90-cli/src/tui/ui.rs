use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use scl90_core::models::respondent::Sex;

use crate::tui::app::{App, Field, FlashKind, GRID_COLUMNS, GRID_ROWS};
use crate::tui::theme;

const CELL_WIDTH: usize = 16;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    if area.height < 10 || area.width < 50 {
        let msg = Paragraph::new("Terminal too small").alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    // Title(1) + Header(4) + Grid(fill) + Status(1)
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .split(area);

    render_title(frame, chunks[0], app);
    render_header(frame, chunks[1], app);
    render_grid(frame, chunks[2], app);
    render_status_bar(frame, chunks[3], app);
}

fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    let title = "SCL-90-R";
    let progress = format!("{}/{} answered", app.answered(), app.items.len());
    let padding = (area.width as usize).saturating_sub(title.len() + progress.len());
    let line = Line::from(vec![
        Span::styled(title, Style::default().fg(theme::TITLE_COLOR).bold()),
        Span::raw(" ".repeat(padding)),
        Span::styled(progress, Style::default().fg(theme::MUTED)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(theme::DIVIDER));

    let sex = [Sex::Male, Sex::Female]
        .into_iter()
        .flat_map(|s| {
            let marker = if s == app.sex { "(x) " } else { "( ) " };
            [Span::raw(marker), Span::raw(s.label()), Span::raw("  ")]
        })
        .collect::<Vec<_>>();

    let lines = vec![
        field_line("Name", vec![Span::raw(app.name.as_str())], app.focus == Field::Name),
        field_line("Sex", sex, app.focus == Field::Sex),
        Line::from(
            [
                field_spans("Date", vec![Span::raw(app.date.as_str())], app.focus == Field::Date),
                vec![Span::raw("    ")],
                field_spans(
                    "Evaluator",
                    vec![Span::raw(app.evaluator.as_str())],
                    app.focus == Field::Evaluator,
                ),
            ]
            .concat(),
        ),
    ];
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn field_spans<'a>(label: &'a str, value: Vec<Span<'a>>, focused: bool) -> Vec<Span<'a>> {
    let mut spans = vec![Span::styled(
        format!("{label}: "),
        Style::default().fg(theme::LABEL).bold(),
    )];
    if focused {
        spans.extend(value.into_iter().map(|s| s.patch_style(theme::focused())));
        spans.push(Span::styled("_", theme::focused()));
    } else {
        spans.extend(value);
    }
    spans
}

fn field_line<'a>(label: &'a str, value: Vec<Span<'a>>, focused: bool) -> Line<'a> {
    Line::from(field_spans(label, value, focused))
}

fn render_grid(frame: &mut Frame, area: Rect, app: &mut App) {
    let visible = (area.height as usize).max(1);

    // Keep the focused row on screen
    if let Field::Item(i) = app.focus {
        let row = i % GRID_ROWS;
        if row < app.grid_offset {
            app.grid_offset = row;
        } else if row >= app.grid_offset + visible {
            app.grid_offset = row + 1 - visible;
        }
    }
    app.grid_offset = app.grid_offset.min(GRID_ROWS.saturating_sub(visible));

    let app: &App = app;

    let lines: Vec<Line> = (app.grid_offset..GRID_ROWS.min(app.grid_offset + visible))
        .map(|row| {
            let spans = (0..GRID_COLUMNS)
                .flat_map(|col| grid_cell(app, col * GRID_ROWS + row))
                .collect::<Vec<_>>();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}

fn grid_cell(app: &App, index: usize) -> Vec<Span<'static>> {
    let value = app.items[index].clone();
    let label = format!("Item {:>2} ", index + 1);
    let shown = if value.is_empty() { "-".to_string() } else { value.clone() };
    let mut value_style = theme::value_style(&value);
    if app.focus == Field::Item(index) {
        value_style = value_style.patch(theme::focused());
    }
    let used = label.len() + 3;
    vec![
        Span::styled(label, Style::default().fg(theme::LABEL)),
        Span::styled(format!("[{shown}]"), value_style),
        Span::raw(" ".repeat(CELL_WIDTH.saturating_sub(used))),
    ]
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let line = if let Some(flash) = &app.flash {
        let color = match flash.kind {
            FlashKind::Info => theme::FLASH_INFO,
            FlashKind::Warning => theme::FLASH_WARNING,
            FlashKind::Error => theme::FLASH_ERROR,
        };
        Line::from(Span::styled(
            format!(" {}", flash.message),
            Style::default().fg(color).bold(),
        ))
    } else {
        let keys = [
            ("Tab", "next"),
            ("\u{2190}\u{2191}\u{2193}\u{2192}", "move"),
            ("0-4", "rate"),
            ("F2/Ctrl+S", "score & generate PDF"),
            ("Esc", "quit"),
        ];
        let spans = keys
            .iter()
            .flat_map(|(key, action)| {
                [
                    Span::styled(format!(" {key}"), Style::default().fg(theme::STATUS_KEY).bold()),
                    Span::styled(format!(" {action} "), Style::default().fg(theme::MUTED)),
                ]
            })
            .collect::<Vec<_>>();
        Line::from(spans)
    };

    frame.render_widget(
        Paragraph::new(line).style(Style::default().bg(theme::STATUS_BAR_BG)),
        area,
    );
}
