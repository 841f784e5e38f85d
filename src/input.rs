use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::trace;

use crate::scoped::{Rekey, Scoped};
use crate::session::{Action, Screen, Session};

/// Longest jump entry accepted; more digits than this cannot name a question.
const MAX_JUMP_DIGITS: usize = 19;

/// Summary rows moved per PgUp/PgDn
pub const SUMMARY_PAGE: usize = 10;

/// What the event loop should do with a key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Dispatch(Action),
    /// Move the summary cursor; view-only, the session is untouched.
    Scroll(Scroll),
    Quit,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scroll {
    Up(usize),
    Down(usize),
    Top,
    Bottom,
}

impl Scroll {
    /// New cursor position within `len` rows
    pub fn apply(self, cursor: usize, len: usize) -> usize {
        let last = len.saturating_sub(1);
        match self {
            Scroll::Up(n) => cursor.saturating_sub(n).min(last),
            Scroll::Down(n) => cursor.saturating_add(n).min(last),
            Scroll::Top => 0,
            Scroll::Bottom => last,
        }
    }
}

/// Global space-bar shortcut, live only while a session is running.
///
/// An attached listener swallows every Space press and turns it into
/// [`Action::Next`]; nothing else sees the key.
#[derive(Debug, Clone, Default)]
pub struct SpaceListener {
    binding: Scoped<()>,
}

impl SpaceListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sync(&mut self, screen: Screen) -> Rekey {
        let change = self
            .binding
            .rekey((screen == Screen::Session).then_some(()));
        if change != Rekey::Kept {
            trace!(?change, "space listener re-bound");
        }
        change
    }

    pub fn intercept(&self, key: &KeyEvent) -> Option<Action> {
        if self.binding.is_live() && key.code == KeyCode::Char(' ') {
            Some(Action::Next)
        } else {
            None
        }
    }

    pub fn is_attached(&self) -> bool {
        self.binding.is_live()
    }

    pub fn live_bindings(&self) -> usize {
        self.binding.live_count()
    }
}

/// Digits typed on the Session screen to pick a question by its 1-based number
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JumpEntry {
    digits: String,
}

impl JumpEntry {
    pub fn push(&mut self, digit: char) {
        if digit.is_ascii_digit() && self.digits.len() < MAX_JUMP_DIGITS {
            self.digits.push(digit);
        }
    }

    pub fn pop(&mut self) -> Option<char> {
        self.digits.pop()
    }

    pub fn clear(&mut self) {
        self.digits.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.digits
    }

    /// Consume the entry as a zero-based index. `None` for an empty entry or "0".
    pub fn take(&mut self) -> Option<usize> {
        let number = self.digits.parse::<usize>().ok();
        self.digits.clear();
        number.and_then(|n| n.checked_sub(1))
    }
}

/// Translate a terminal key into a command for the current screen
pub fn map_key(session: &Session, jump: &mut JumpEntry, key: KeyEvent) -> Command {
    if key.code == KeyCode::Esc
        || (key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c'))
    {
        return Command::Quit;
    }

    match session.screen {
        Screen::Start => match key.code {
            KeyCode::Enter => Command::Dispatch(Action::Start),
            KeyCode::Backspace => {
                let mut draft = session.draft_input.clone();
                draft.pop();
                Command::Dispatch(Action::UpdateDraftInput(draft))
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                let mut draft = session.draft_input.clone();
                draft.push(c);
                Command::Dispatch(Action::UpdateDraftInput(draft))
            }
            _ => Command::None,
        },
        Screen::Session => match key.code {
            KeyCode::Char(d) if d.is_ascii_digit() => {
                jump.push(d);
                Command::None
            }
            KeyCode::Backspace => {
                jump.pop();
                Command::None
            }
            KeyCode::Enter if !jump.is_empty() => match jump.take() {
                Some(index) if index < session.question_count => {
                    Command::Dispatch(Action::JumpTo(index))
                }
                _ => Command::None,
            },
            KeyCode::Enter | KeyCode::Char('s') => Command::Dispatch(Action::Submit),
            KeyCode::Right | KeyCode::Char('n') | KeyCode::Char('l') => {
                Command::Dispatch(Action::Next)
            }
            KeyCode::Left | KeyCode::Char('p') | KeyCode::Char('h') => {
                Command::Dispatch(Action::Prev)
            }
            KeyCode::Home => Command::Dispatch(Action::JumpTo(0)),
            KeyCode::End => {
                Command::Dispatch(Action::JumpTo(session.question_count.saturating_sub(1)))
            }
            _ => Command::None,
        },
        Screen::Summary => match key.code {
            KeyCode::Enter | KeyCode::Char('r') => Command::Dispatch(Action::Restart),
            KeyCode::Up | KeyCode::Char('k') => Command::Scroll(Scroll::Up(1)),
            KeyCode::Down | KeyCode::Char('j') => Command::Scroll(Scroll::Down(1)),
            KeyCode::PageUp => Command::Scroll(Scroll::Up(SUMMARY_PAGE)),
            KeyCode::PageDown => Command::Scroll(Scroll::Down(SUMMARY_PAGE)),
            KeyCode::Home => Command::Scroll(Scroll::Top),
            KeyCode::End => Command::Scroll(Scroll::Bottom),
            _ => Command::None,
        },
    }
}
