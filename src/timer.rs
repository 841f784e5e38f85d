use std::time::Duration;

use tracing::trace;

use crate::scoped::{Rekey, Scoped};
use crate::session::{Screen, Session};

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Identity of the running tick: which question it feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerKey {
    pub active_index: usize,
}

impl TimerKey {
    /// The key a session wants, or `None` when nothing should be timed.
    pub fn for_session(session: &Session) -> Option<Self> {
        match session.screen {
            Screen::Session => Some(Self {
                active_index: session.active_index,
            }),
            Screen::Start | Screen::Summary => None,
        }
    }
}

/// Repeating one-period tick bound to the current [`TimerKey`].
///
/// Time is fed in through [`TickTimer::advance`]; a re-key discards the
/// partial period of the old lease so the new question starts counting
/// from zero.
#[derive(Debug, Clone)]
pub struct TickTimer {
    period: Duration,
    lease: Scoped<TimerKey>,
    carried: Duration,
}

impl Default for TickTimer {
    fn default() -> Self {
        Self::new(TICK_PERIOD)
    }
}

impl TickTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            lease: Scoped::new(),
            carried: Duration::ZERO,
        }
    }

    pub fn sync(&mut self, session: &Session) -> Rekey {
        let change = self.lease.rekey(TimerKey::for_session(session));
        if change != Rekey::Kept {
            self.carried = Duration::ZERO;
            trace!(?change, key = ?self.lease.key(), "timer re-keyed");
        }
        change
    }

    /// Feed `dt` of real time and return how many whole periods fired.
    pub fn advance(&mut self, dt: Duration) -> u64 {
        if !self.lease.is_live() || self.period.is_zero() {
            return 0;
        }

        self.carried += dt;
        let mut fired = 0;
        while self.carried >= self.period {
            self.carried -= self.period;
            fired += 1;
        }
        fired
    }

    pub fn key(&self) -> Option<TimerKey> {
        self.lease.key()
    }

    pub fn is_running(&self) -> bool {
        self.lease.is_live()
    }

    pub fn live_leases(&self) -> usize {
        self.lease.live_count()
    }

    pub fn acquisitions(&self) -> usize {
        self.lease.acquisitions()
    }
}
