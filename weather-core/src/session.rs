//! Single-slot search state owned by one interactive session.

use thiserror::Error;

use crate::{
    error::{ErrorKind, SearchError},
    model::WeatherSummary,
    orchestrator::Orchestrator,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("a search is already in progress")]
    AlreadySearching,

    #[error("no search in progress")]
    NotSearching,
}

/// `Idle → Searching → Success | Failed`, and back to `Searching` from any
/// state except `Searching`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SearchState {
    #[default]
    Idle,
    Searching,
    Success(WeatherSummary),
    Failed(ErrorKind),
}

impl SearchState {
    /// Enter `Searching`, dropping the previous result or error.
    pub fn start(&mut self) -> Result<(), SessionError> {
        if self.is_searching() {
            return Err(SessionError::AlreadySearching);
        }
        *self = SearchState::Searching;
        Ok(())
    }

    /// Store the outcome of the in-flight search.
    pub fn finish(
        &mut self,
        outcome: Result<WeatherSummary, SearchError>,
    ) -> Result<(), SessionError> {
        if !self.is_searching() {
            return Err(SessionError::NotSearching);
        }
        *self = match outcome {
            Ok(summary) => SearchState::Success(summary),
            Err(err) => {
                let kind = err.kind();
                tracing::warn!(error = %err, ?kind, "search failed");
                SearchState::Failed(kind)
            }
        };
        Ok(())
    }

    pub fn is_searching(&self) -> bool {
        matches!(self, SearchState::Searching)
    }

    pub fn summary(&self) -> Option<&WeatherSummary> {
        match self {
            SearchState::Success(summary) => Some(summary),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<ErrorKind> {
        match self {
            SearchState::Failed(kind) => Some(*kind),
            _ => None,
        }
    }
}

/// An [`Orchestrator`] plus the one result/error slot it writes into.
#[derive(Debug)]
pub struct Session {
    orchestrator: Orchestrator,
    state: SearchState,
}

impl Session {
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self {
            orchestrator,
            state: SearchState::Idle,
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Run a search and return the terminal state it left behind.
    pub async fn search(&mut self, city: &str) -> Result<&SearchState, SessionError> {
        self.state.start()?;
        let outcome = self.orchestrator.search(city).await;
        self.state.finish(outcome)?;
        Ok(&self.state)
    }
}
