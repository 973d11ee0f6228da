//! Interactive session state machine.
//!
//! Pure: no I/O, no tasks. The event loop feeds it inputs and completions
//! and carries out the [`Effect`] each one returns.
//!
//! In-flight policy: a new submission supersedes the one in flight. Only
//! the newest request id is current; completions for any other id are
//! dropped.

use whatsurname_core::{
    present, present_failure, AnalysisFailure, AnalysisRequest, AnalysisResult, Presentation,
};

pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for a name.
    Idle,
    /// A request is in flight.
    Submitted { id: RequestId, name: String },
    /// The last profile is on screen.
    Displaying,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Start a worker for `request`. `superseded` is the in-flight request
    /// it replaces, whose worker must be dropped.
    Dispatch {
        id: RequestId,
        request: AnalysisRequest,
        superseded: Option<RequestId>,
    },
    Render(Presentation),
    /// Stale completion, nothing to do.
    Discard,
    /// End the session, abandoning `abandoned` if set.
    Quit { abandoned: Option<RequestId> },
}

/// Inputs that end the session: `quit`, `exit` (any case) or an empty line.
pub fn is_sentinel(line: &str) -> bool {
    let line = line.trim();
    line.is_empty() || line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit")
}

#[derive(Debug)]
pub struct Session {
    state: SessionState,
    next_id: RequestId,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            next_id: 1,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    fn in_flight(&self) -> Option<RequestId> {
        match self.state {
            SessionState::Submitted { id, .. } => Some(id),
            _ => None,
        }
    }

    /// A line was entered.
    pub fn submit_line(&mut self, line: &str) -> Effect {
        if is_sentinel(line) {
            return self.quit();
        }

        let request = match AnalysisRequest::new(line) {
            Ok(request) => request,
            Err(rejected) => return Effect::Render(present_failure(&rejected)),
        };

        let id = self.next_id;
        self.next_id += 1;
        let superseded = self.in_flight();
        self.state = SessionState::Submitted {
            id,
            name: request.name().to_string(),
        };

        Effect::Dispatch {
            id,
            request,
            superseded,
        }
    }

    /// A worker finished.
    pub fn complete(
        &mut self,
        id: RequestId,
        outcome: Result<AnalysisResult, AnalysisFailure>,
    ) -> Effect {
        match &self.state {
            SessionState::Submitted { id: current, name } if *current == id => {
                let presentation = present(name, &outcome);
                self.state = match outcome {
                    Ok(_) => SessionState::Displaying,
                    Err(_) => SessionState::Idle,
                };
                Effect::Render(presentation)
            }
            _ => Effect::Discard,
        }
    }

    /// Quit, EOF or Ctrl-C.
    pub fn quit(&mut self) -> Effect {
        let abandoned = self.in_flight();
        self.state = SessionState::Idle;
        Effect::Quit { abandoned }
    }
}
