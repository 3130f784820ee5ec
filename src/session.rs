//! Shell-owned state for one summarizer session.
//!
//! The state only changes through the event methods below. Each submission gets
//! a [`Ticket`]; results for anything but the latest ticket are dropped, so the
//! newest submission always wins the display.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    Submitting,
    Done,
    Error,
}

/// Identifies one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// What the shell should do with the speech engine after a toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechAction {
    Start(String),
    Cancel,
    None,
}

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    status: Status,
    last_summary: Option<String>,
    last_error: Option<String>,
    is_speaking: bool,
    latest: u64,
}

impl SessionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    #[must_use]
    pub fn last_summary(&self) -> Option<&str> {
        self.last_summary.as_deref()
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    #[must_use]
    pub fn is_speaking(&self) -> bool {
        self.is_speaking
    }

    /// Starts a submission. The previous summary stays visible until the result lands.
    pub fn submit(&mut self) -> Ticket {
        self.latest += 1;
        self.status = Status::Submitting;
        self.last_error = None;
        Ticket(self.latest)
    }

    /// Records a summary. Returns `false` if `ticket` was superseded.
    pub fn result_received(&mut self, ticket: Ticket, summary: String) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.status = Status::Done;
        self.last_summary = Some(summary);
        self.last_error = None;
        self.is_speaking = false;
        true
    }

    /// Records a failure and clears the stale summary. Returns `false` if
    /// `ticket` was superseded.
    pub fn error_received(&mut self, ticket: Ticket, message: String) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.status = Status::Error;
        self.last_summary = None;
        self.last_error = Some(message);
        self.is_speaking = false;
        true
    }

    /// Flips read-aloud on or off for the current summary.
    pub fn toggle_speech(&mut self) -> SpeechAction {
        if self.is_speaking {
            self.is_speaking = false;
            return SpeechAction::Cancel;
        }
        match &self.last_summary {
            Some(summary) => {
                self.is_speaking = true;
                SpeechAction::Start(summary.clone())
            }
            None => SpeechAction::None,
        }
    }

    /// The speech engine finished on its own.
    pub fn speech_finished(&mut self) {
        self.is_speaking = false;
    }

    fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.latest && self.status == Status::Submitting
    }
}
