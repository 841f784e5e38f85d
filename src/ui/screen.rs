use ratatui::{buffer::Buffer, layout::Rect};

use crate::{
    session::Screen,
    ui::{render_session, render_start, render_summary},
    App,
};

/// One of the mutually exclusive views, chosen by the session screen
pub trait View {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer);
}

/// Question count entry
pub struct StartView;

impl View for StartView {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        render_start(app, area, buf);
    }
}

/// Active question card plus the jump list
pub struct SessionView;

impl View for SessionView {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        render_session(app, area, buf);
    }
}

/// Read-only per-question durations
pub struct SummaryView;

impl View for SummaryView {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        render_summary(app, area, buf);
    }
}

pub fn current_view(screen: Screen) -> Box<dyn View> {
    match screen {
        Screen::Start => Box::new(StartView),
        Screen::Session => Box::new(SessionView),
        Screen::Summary => Box::new(SummaryView),
    }
}
