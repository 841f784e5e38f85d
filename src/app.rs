use std::time::Duration;

use crossterm::event::{KeyEvent, KeyEventKind};
use tracing::{debug, trace};

use crate::input::{map_key, Command, JumpEntry, SpaceListener};
use crate::session::{Action, Outcome, Session};
use crate::timer::TickTimer;

/// Everything the event loop owns: the session plus its two scoped effects
#[derive(Debug, Clone)]
pub struct App {
    pub session: Session,
    pub timer: TickTimer,
    pub listener: SpaceListener,
    pub jump: JumpEntry,
    /// Highlighted row of the summary table
    pub summary_cursor: usize,
    pub status: Option<String>,
    pub should_quit: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self::with_timer(TickTimer::default())
    }

    pub fn with_timer(timer: TickTimer) -> Self {
        let mut app = Self {
            session: Session::new(),
            timer,
            listener: SpaceListener::new(),
            jump: JumpEntry::default(),
            summary_cursor: 0,
            status: None,
            should_quit: false,
        };
        app.sync_effects();
        app
    }

    /// Start screen with the count already typed in
    pub fn with_draft(questions: Option<usize>) -> Self {
        let mut app = Self::new();
        if let Some(n) = questions {
            app.dispatch(Action::UpdateDraftInput(n.to_string()));
        }
        app
    }

    pub fn dispatch(&mut self, action: Action) -> Outcome {
        let previous = self.session.screen;
        let transition = std::mem::take(&mut self.session).apply(action);
        self.session = transition.session;

        match &transition.outcome {
            Outcome::Changed => self.status = None,
            Outcome::Rejected(err) => self.status = Some(err.to_string()),
            Outcome::Ignored => {}
        }
        if self.session.screen != previous {
            debug!(from = %previous, to = %self.session.screen, "screen changed");
            self.jump.clear();
            self.summary_cursor = 0;
        }

        self.sync_effects();
        transition.outcome
    }

    /// Feed real time to the timer; fired ticks land on the active question.
    pub fn advance(&mut self, dt: Duration) -> u64 {
        let fired = self.timer.advance(dt);
        for _ in 0..fired {
            self.session = std::mem::take(&mut self.session).tick();
        }
        if fired > 0 {
            trace!(
                fired,
                question = self.session.active_index,
                secs = self.session.active_elapsed(),
                "tick"
            );
        }
        fired
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if let Some(action) = self.listener.intercept(&key) {
            self.dispatch(action);
            return;
        }

        match map_key(&self.session, &mut self.jump, key) {
            Command::Dispatch(action) => {
                self.dispatch(action);
            }
            Command::Scroll(scroll) => {
                self.summary_cursor =
                    scroll.apply(self.summary_cursor, self.session.elapsed.len());
            }
            Command::Quit => self.should_quit = true,
            Command::None => {}
        }
    }

    fn sync_effects(&mut self) {
        self.timer.sync(&self.session);
        self.listener.sync(self.session.screen);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Screen;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn press(app: &mut App, code: KeyCode) {
        app.on_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn fresh_app_has_no_running_effects() {
        let app = App::new();
        assert_eq!(app.session.screen, Screen::Start);
        assert!(!app.timer.is_running());
        assert!(!app.listener.is_attached());
    }

    #[test]
    fn starting_arms_timer_and_listener() {
        let mut app = App::new();
        type_str(&mut app, "3");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.session.screen, Screen::Session);
        assert!(app.timer.is_running());
        assert!(app.listener.is_attached());
    }

    #[test]
    fn invalid_count_sets_status_and_stays() {
        let mut app = App::new();
        type_str(&mut app, "0");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.session.screen, Screen::Start);
        assert!(app.status.is_some());
        assert!(!app.timer.is_running());

        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.status, None);
    }

    #[test]
    fn backspace_on_empty_draft_clears_hint() {
        let mut app = App::new();
        press(&mut app, KeyCode::Enter);
        assert!(app.status.is_some());
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.status, None);
        assert!(app.session.draft_input.is_empty());
    }

    #[test]
    fn summary_cursor_moves_within_questions_and_resets() {
        let mut app = App::with_draft(Some(30));
        app.dispatch(Action::Start);
        app.dispatch(Action::JumpTo(29));
        app.dispatch(Action::Submit);
        assert_eq!(app.summary_cursor, 0);

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::PageDown);
        assert_eq!(app.summary_cursor, 11);
        press(&mut app, KeyCode::End);
        assert_eq!(app.summary_cursor, 29);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.summary_cursor, 29);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.summary_cursor, 28);
        assert_eq!(app.session.screen, Screen::Summary);

        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.summary_cursor, 0);
    }

    #[test]
    fn space_advances_and_does_not_reach_draft() {
        let mut app = App::with_draft(Some(2));
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.session.active_index, 1);
        assert_eq!(app.session.draft_input, "2");
        // at the last question space is just a no-op Next
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.session.screen, Screen::Session);
        assert_eq!(app.session.active_index, 1);
    }

    #[test]
    fn space_on_start_screen_is_draft_text() {
        let mut app = App::new();
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.session.draft_input, " ");
    }

    #[test]
    fn release_events_are_ignored() {
        let mut app = App::new();
        let mut key = KeyEvent::new(KeyCode::Char('5'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        app.on_key(key);
        assert!(app.session.draft_input.is_empty());
    }

    #[test]
    fn ticks_follow_active_question() {
        let mut app = App::with_draft(Some(3));
        app.dispatch(Action::Start);
        assert_eq!(app.advance(Duration::from_secs(2)), 2);
        app.dispatch(Action::Next);
        app.advance(Duration::from_secs(1));
        assert_eq!(app.session.elapsed, vec![2, 1, 0]);
    }

    #[test]
    fn restart_releases_everything() {
        let mut app = App::with_draft(Some(1));
        app.dispatch(Action::Start);
        app.advance(Duration::from_secs(4));
        app.dispatch(Action::Submit);
        assert!(!app.timer.is_running());
        assert!(!app.listener.is_attached());
        app.advance(Duration::from_secs(4));
        assert_eq!(app.session.elapsed, vec![4]);

        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.session, Session::default());
        assert_eq!(app.timer.live_leases(), 0);
    }

    #[test]
    fn esc_requests_quit() {
        let mut app = App::new();
        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit);
    }
}
