//! Search-run state definitions
//!
//! A run has no error state: every failure degrades to fewer records and the
//! run still ends in `Done`.

use crate::TapError;
use std::fmt;

/// Represents the current phase of a search run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunState {
    /// Nothing fetched yet
    Start,

    /// Fetching the first result page
    FetchFirstPage,

    /// Reading the result count from the first page
    ParseCount,

    /// Fetching pages 2..N of the page plan
    FetchRemainingPages,

    /// Pulling listing records from the fetched pages
    ExtractAll,

    /// Fetching one listing's detail page (deep mode)
    DetailFetch,

    /// Writing one record to the output
    Emit,

    /// Run finished
    Done,
}

impl RunState {
    /// Returns true if the run may move from `self` to `next`
    pub fn can_transition_to(&self, next: RunState) -> bool {
        use RunState::*;

        matches!(
            (self, next),
            (Start, FetchFirstPage)
                | (FetchFirstPage, ParseCount)
                | (ParseCount, FetchRemainingPages)
                | (ParseCount, ExtractAll)
                | (ParseCount, Done)
                | (FetchRemainingPages, ExtractAll)
                | (ExtractAll, DetailFetch)
                | (ExtractAll, Emit)
                | (ExtractAll, Done)
                | (DetailFetch, Emit)
                | (Emit, ExtractAll)
                | (Emit, Done)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::FetchFirstPage => "fetch_first_page",
            Self::ParseCount => "parse_count",
            Self::FetchRemainingPages => "fetch_remaining_pages",
            Self::ExtractAll => "extract_all",
            Self::DetailFetch => "detail_fetch",
            Self::Emit => "emit",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Tracks the phase of one search run
#[derive(Debug)]
pub struct RunTracker {
    state: RunState,
}

impl Default for RunTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl RunTracker {
    pub fn new() -> Self {
        Self {
            state: RunState::Start,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Moves to `next`, or fails with `TapError::InvalidTransition`
    pub fn advance(&mut self, next: RunState) -> Result<(), TapError> {
        if !self.state.can_transition_to(next) {
            return Err(TapError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }

        tracing::trace!("run state {} -> {}", self.state, next);
        self.state = next;
        Ok(())
    }
}
