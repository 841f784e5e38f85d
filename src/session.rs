use tracing::{debug, info};

use crate::error::{parse_count, CountError};

/// Which of the three mutually exclusive views is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum_macros::Display)]
pub enum Screen {
    #[default]
    Start,
    Session,
    Summary,
}

/// User intents accepted by the state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    UpdateDraftInput(String),
    Start,
    Next,
    Prev,
    JumpTo(usize),
    Submit,
    Restart,
}

/// What applying an action did to the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Changed,
    /// Not valid for the current screen or position; state untouched.
    Ignored,
    /// Start was requested with a draft that is not a positive integer.
    Rejected(CountError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub session: Session,
    pub outcome: Outcome,
}

impl Transition {
    fn changed(session: Session) -> Self {
        Self {
            session,
            outcome: Outcome::Changed,
        }
    }

    fn ignored(session: Session) -> Self {
        Self {
            session,
            outcome: Outcome::Ignored,
        }
    }
}

/// The whole timing session.
///
/// `elapsed.len() == question_count` once a session has started, and
/// `active_index < question_count` while on the Session or Summary screen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    pub screen: Screen,
    pub question_count: usize,
    pub active_index: usize,
    pub elapsed: Vec<u64>,
    pub draft_input: String,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one action and return the resulting state.
    pub fn apply(self, action: Action) -> Transition {
        match (self.screen, action) {
            (Screen::Start, Action::UpdateDraftInput(text)) => Transition::changed(Self {
                draft_input: text,
                ..self
            }),
            (Screen::Start, Action::Start) => self.start(),
            (Screen::Session, Action::Next) => {
                if self.active_index + 1 < self.question_count {
                    debug!(from = self.active_index, "next question");
                    Transition::changed(Self {
                        active_index: self.active_index + 1,
                        ..self
                    })
                } else {
                    Transition::ignored(self)
                }
            }
            (Screen::Session, Action::Prev) => {
                if self.active_index > 0 {
                    debug!(from = self.active_index, "previous question");
                    Transition::changed(Self {
                        active_index: self.active_index - 1,
                        ..self
                    })
                } else {
                    Transition::ignored(self)
                }
            }
            (Screen::Session, Action::JumpTo(index)) => {
                if index < self.question_count {
                    debug!(from = self.active_index, to = index, "jump to question");
                    Transition::changed(Self {
                        active_index: index,
                        ..self
                    })
                } else {
                    Transition::ignored(self)
                }
            }
            (Screen::Session, Action::Submit) => {
                if self.is_last_question() {
                    info!(
                        questions = self.question_count,
                        total_secs = self.total_elapsed(),
                        "session submitted"
                    );
                    Transition::changed(Self {
                        screen: Screen::Summary,
                        ..self
                    })
                } else {
                    Transition::ignored(self)
                }
            }
            (Screen::Summary, Action::Restart) => {
                info!("starting a new session");
                Transition::changed(Self::default())
            }
            (_, _) => Transition::ignored(self),
        }
    }

    fn start(self) -> Transition {
        let counted = parse_count(&self.draft_input)
            .and_then(|count| zeroed_elapsed(count, &self.draft_input).map(|e| (count, e)));
        match counted {
            Ok((count, elapsed)) => {
                info!(questions = count, "session started");
                Transition::changed(Self {
                    screen: Screen::Session,
                    question_count: count,
                    active_index: 0,
                    elapsed,
                    draft_input: self.draft_input,
                })
            }
            Err(err) => {
                debug!(draft = %self.draft_input, %err, "question count rejected");
                Transition {
                    session: self,
                    outcome: Outcome::Rejected(err),
                }
            }
        }
    }

    /// One real-time second on the active question. No effect off the Session screen.
    pub fn tick(mut self) -> Self {
        if self.screen == Screen::Session {
            if let Some(secs) = self.elapsed.get_mut(self.active_index) {
                *secs += 1;
            }
        }
        self
    }

    pub fn is_last_question(&self) -> bool {
        self.question_count > 0 && self.active_index == self.question_count - 1
    }

    pub fn active_elapsed(&self) -> u64 {
        self.elapsed.get(self.active_index).copied().unwrap_or(0)
    }

    pub fn total_elapsed(&self) -> u64 {
        self.elapsed.iter().sum()
    }
}

/// `count` zeroed counters, or `TooLarge` when they cannot be allocated.
fn zeroed_elapsed(count: usize, draft: &str) -> Result<Vec<u64>, CountError> {
    let mut elapsed = Vec::new();
    if let Err(err) = elapsed.try_reserve_exact(count) {
        debug!(count, %err, "cannot allocate question counters");
        return Err(CountError::TooLarge(draft.trim().to_string()));
    }
    elapsed.resize(count, 0);
    Ok(elapsed)
}
