pub mod grid;
pub mod screen;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Widget, Wrap},
    Frame,
};

use crate::{
    clock::{format_clock, format_total},
    App,
};

const HORIZONTAL_MARGIN: u16 = 2;
const VERTICAL_MARGIN: u16 = 1;
const CARD_WIDTH: u16 = 44;
const LIST_WIDTH: u16 = 30;

pub fn draw(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        screen::current_view(self.session.screen).render(self, area, buf);
    }
}

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn hint_style() -> Style {
    Style::default()
        .fg(Color::Gray)
        .add_modifier(Modifier::ITALIC)
}

/// A `width` x `height` box centred in `area`, shrunk to fit
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

pub(crate) fn render_start(app: &App, area: Rect, buf: &mut Buffer) {
    let frame = centered(area, CARD_WIDTH, 9);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // title
            Constraint::Length(3), // input box
            Constraint::Length(1), // status
            Constraint::Min(1),    // help
        ])
        .split(frame);

    Paragraph::new(Span::styled("Start a Session", bold().fg(Color::Cyan)))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

    let draft = &app.session.draft_input;
    let input_line = if draft.is_empty() {
        Line::from(vec![
            Span::styled("Enter number of questions", hint_style()),
            Span::styled("_", bold()),
        ])
    } else {
        Line::from(vec![
            Span::styled(draft.clone(), bold()),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ])
    };
    Paragraph::new(input_line)
        .block(Block::default().borders(Borders::ALL).title("Questions"))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

    if let Some(status) = &app.status {
        Paragraph::new(Span::styled(status.clone(), Style::default().fg(Color::Red)))
            .alignment(Alignment::Center)
            .render(chunks[2], buf);
    }

    Paragraph::new("(enter) start  (esc) quit")
        .style(hint_style())
        .alignment(Alignment::Center)
        .render(chunks[3], buf);
}

pub(crate) fn render_session(app: &App, area: Rect, buf: &mut Buffer) {
    let session = &app.session;
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([Constraint::Min(5), Constraint::Length(1)])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(CARD_WIDTH / 2), Constraint::Length(LIST_WIDTH)])
        .split(outer[0]);

    let first = session.active_index == 0;
    let prev = Span::styled(
        "[←] Prev",
        if first {
            Style::default().add_modifier(Modifier::DIM)
        } else {
            bold()
        },
    );
    let forward = if session.is_last_question() {
        Span::styled("Submit [enter]", bold().fg(Color::Green))
    } else {
        Span::styled("Next [→/space]", bold().fg(Color::Blue))
    };

    let card = Paragraph::new(vec![
        Line::default(),
        Line::from(Span::styled(
            format!("⏱ {}", format_clock(session.active_elapsed())),
            bold(),
        )),
        Line::default(),
        Line::from(vec![prev, Span::raw("    "), forward]),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Question {}", session.active_index + 1)),
    )
    .alignment(Alignment::Center);
    card.render(centered(columns[0], CARD_WIDTH, 8), buf);

    render_question_list(app, columns[1], buf);

    let help = match app.jump.as_str() {
        "" => "(←/p) prev  (→/n/space) next  (0-9, enter) jump  (esc) quit".to_string(),
        digits => format!("go to question {digits}_  (enter) confirm  (backspace) edit"),
    };
    Paragraph::new(help)
        .style(hint_style())
        .alignment(Alignment::Center)
        .render(outer[1], buf);
}

fn render_question_list(app: &App, area: Rect, buf: &mut Buffer) {
    let session = &app.session;
    let block = Block::default()
        .borders(Borders::ALL)
        .title("List of Questions")
        .title_alignment(Alignment::Center);
    let inner = block.inner(area);
    block.render(area, buf);

    let width = grid::cell_width(session.question_count) as usize;
    let active = Style::default()
        .fg(Color::White)
        .bg(Color::Blue)
        .add_modifier(Modifier::BOLD);
    let idle = Style::default().fg(Color::Gray);

    let lines: Vec<Line> = grid::visible_rows(
        session.question_count,
        session.active_index,
        inner.height as usize,
    )
    .map(|row| {
        let spans = grid::row_members(session.question_count, row)
            .flat_map(|i| {
                let label = format!("{:^width$}", i + 1);
                let style = if i == session.active_index { active } else { idle };
                [Span::styled(label, style), Span::raw(" ")]
            })
            .collect::<Vec<Span>>();
        Line::from(spans)
    })
    .collect();

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(inner, buf);
}

pub(crate) fn render_summary(app: &App, area: Rect, buf: &mut Buffer) {
    let session = &app.session;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(2), // title
            Constraint::Min(3),    // per-question table
            Constraint::Length(1), // total
            Constraint::Length(1), // help
        ])
        .split(centered(area, CARD_WIDTH + 10, area.height));

    Paragraph::new(Span::styled("Session Summary", bold().fg(Color::Cyan)))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

    // borders and header take three lines
    let body = chunks[1].height.saturating_sub(3) as usize;
    let total = session.elapsed.len();
    let shown = grid::window(total, app.summary_cursor, body);
    let title = if shown.len() < total {
        format!("{}-{} of {}", shown.start + 1, shown.end, total)
    } else {
        String::new()
    };

    let rows = shown.map(|i| {
        let row = Row::new(vec![
            Cell::from(format!("Question {}", i + 1)),
            Cell::from(format_clock(session.elapsed[i])),
        ]);
        if i == app.summary_cursor {
            row.style(Style::default().add_modifier(Modifier::REVERSED))
        } else {
            row
        }
    });
    Table::new(rows, [Constraint::Min(14), Constraint::Length(8)])
        .header(Row::new(vec!["Question", "Time"]).style(bold().fg(Color::Yellow)))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .title_alignment(Alignment::Right),
        )
        .render(chunks[1], buf);

    Paragraph::new(Line::from(vec![
        Span::styled("Total ", bold()),
        Span::raw(format_total(&session.elapsed)),
    ]))
    .alignment(Alignment::Right)
    .wrap(Wrap { trim: true })
    .render(chunks[2], buf);

    Paragraph::new("(↑/↓/pgup/pgdn) scroll  (r/enter) start new session  (esc) quit")
        .style(hint_style())
        .alignment(Alignment::Center)
        .render(chunks[3], buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Action;
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Duration;

    fn rendered(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| draw(app, f)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content
            .chunks(width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn start_view_shows_prompt_and_draft() {
        let app = App::new();
        let out = rendered(&app, 80, 24);
        assert!(out.contains("Start a Session"));
        assert!(out.contains("Enter number of questions"));

        let app = App::with_draft(Some(12));
        assert!(rendered(&app, 80, 24).contains("12"));
    }

    #[test]
    fn start_view_shows_rejection_hint() {
        let mut app = App::new();
        app.dispatch(Action::UpdateDraftInput("0".into()));
        app.dispatch(Action::Start);
        assert!(rendered(&app, 80, 24).contains("need at least one question"));
    }

    #[test]
    fn session_view_shows_question_and_clock() {
        let mut app = App::with_draft(Some(6));
        app.dispatch(Action::Start);
        app.advance(Duration::from_secs(65));
        let out = rendered(&app, 100, 24);
        assert!(out.contains("Question 1"));
        assert!(out.contains("01:05"));
        assert!(out.contains("List of Questions"));
        assert!(out.contains("Next"));
        assert!(!out.contains("Submit"));
    }

    #[test]
    fn session_view_offers_submit_on_last_question() {
        let mut app = App::with_draft(Some(2));
        app.dispatch(Action::Start);
        app.dispatch(Action::Next);
        let out = rendered(&app, 100, 24);
        assert!(out.contains("Question 2"));
        assert!(out.contains("Submit"));
    }

    #[test]
    fn session_view_echoes_jump_entry() {
        let mut app = App::with_draft(Some(20));
        app.dispatch(Action::Start);
        app.jump.push('1');
        app.jump.push('5');
        assert!(rendered(&app, 100, 24).contains("go to question 15_"));
    }

    #[test]
    fn summary_view_lists_every_question() {
        let mut app = App::with_draft(Some(3));
        app.dispatch(Action::Start);
        app.advance(Duration::from_secs(3));
        app.dispatch(Action::Next);
        app.advance(Duration::from_secs(1));
        app.dispatch(Action::Next);
        app.dispatch(Action::Submit);

        let out = rendered(&app, 80, 24);
        assert!(out.contains("Session Summary"));
        for q in ["Question 1", "Question 2", "Question 3"] {
            assert!(out.contains(q), "missing {q}");
        }
        assert!(out.contains("00:03"));
        assert!(out.contains("00:01"));
        assert!(out.contains("00:04"));
    }

    #[test]
    fn summary_view_pages_through_long_sessions() {
        let mut app = App::with_draft(Some(30));
        app.dispatch(Action::Start);
        for i in 0..30 {
            app.dispatch(Action::JumpTo(i));
            app.advance(Duration::from_secs(i as u64 + 60));
        }
        app.dispatch(Action::Submit);

        let first = rendered(&app, 80, 24);
        assert!(first.contains("Question 1 "));
        assert!(!first.contains("Question 30 "));
        assert!(first.contains("of 30"));

        let mut seen = vec![false; 30];
        for _ in 0..30 {
            let out = rendered(&app, 80, 24);
            for (i, hit) in seen.iter_mut().enumerate() {
                let row = format!("Question {} ", i + 1);
                if out.contains(&row) {
                    assert!(out.contains(&format_clock(i as u64 + 60)));
                    *hit = true;
                }
            }
            app.on_key(crossterm::event::KeyEvent::new(
                crossterm::event::KeyCode::Down,
                crossterm::event::KeyModifiers::NONE,
            ));
        }
        let missing: Vec<usize> = (1..=30).filter(|q| !seen[q - 1]).collect();
        assert!(missing.is_empty(), "never shown: {missing:?}");
        assert_eq!(app.summary_cursor, 29);
        assert!(rendered(&app, 80, 24).contains("Question 30 "));
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let mut app = App::with_draft(Some(50));
        rendered(&app, 10, 4);
        app.dispatch(Action::Start);
        rendered(&app, 10, 4);
        app.dispatch(Action::JumpTo(49));
        app.dispatch(Action::Submit);
        rendered(&app, 10, 4);
    }

    #[test]
    fn centered_clamps_to_area() {
        let area = Rect::new(0, 0, 20, 10);
        assert_eq!(centered(area, 10, 4), Rect::new(5, 3, 10, 4));
        assert_eq!(centered(area, 50, 50), area);
    }
}
