//! Prediction request lifecycle.
//!
//! The workflow never touches the network itself. `trigger` hands back a
//! [`Dispatch`] for the caller to run, and the caller feeds the answer to
//! `resolve` together with the ticket it was issued. A ticket that no longer
//! matches the current selection is dropped on the floor.

use std::path::PathBuf;

use crate::error::PredictError;
use crate::prediction::{Prediction, PredictionOutcome};
use crate::selection::{SelectedInput, SelectionId, SelectionTracker};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    Idle,
    Ready,
    InFlight,
    Succeeded,
    Failed,
}

/// Tag carried by a dispatched request, naming the selection it was made for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    selection: SelectionId,
}

/// A request the caller must execute and later resolve.
#[derive(Debug, Clone)]
pub struct Dispatch {
    pub ticket: RequestTicket,
    pub input: SelectedInput,
}

#[derive(Debug)]
pub enum Trigger {
    Dispatch(Dispatch),
    /// A request for this selection is already outstanding.
    Busy,
    NoSelection,
}

#[derive(Debug, Default)]
pub struct Workflow {
    selection: SelectionTracker,
    in_flight: Option<RequestTicket>,
    outcome: Option<PredictionOutcome>,
}

impl Workflow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick a new file. Any outcome is discarded and an outstanding request
    /// is forgotten, so its eventual answer will be ignored.
    pub fn select_file(&mut self, path: impl Into<PathBuf>) -> bool {
        let Some(selected) = self.selection.select(path) else {
            tracing::debug!("Ignoring selection without a file name");
            return false;
        };
        tracing::info!("Selected {}", selected.display_name);
        if let Some(ticket) = self.in_flight.take() {
            tracing::debug!(?ticket, "Selection changed while a request was in flight");
        }
        self.outcome = None;
        true
    }

    pub fn trigger(&mut self) -> Trigger {
        if self.in_flight.is_some() {
            tracing::debug!("Trigger ignored: request already in flight");
            return Trigger::Busy;
        }
        let Some(input) = self.selection.current().cloned() else {
            tracing::warn!("Trigger without a selected file");
            self.outcome = Some(PredictionOutcome::Failure {
                message: PredictError::NoSelection.to_string(),
            });
            return Trigger::NoSelection;
        };

        let ticket = RequestTicket {
            selection: input.id,
        };
        self.outcome = None;
        self.in_flight = Some(ticket);
        tracing::info!("Dispatching prediction for {}", input.display_name);
        Trigger::Dispatch(Dispatch { ticket, input })
    }

    /// Apply a finished request. Returns `false` when the answer was stale
    /// and has been discarded.
    pub fn resolve(
        &mut self,
        ticket: RequestTicket,
        result: Result<Prediction, PredictError>,
    ) -> bool {
        let current = self.selection.current_id();
        if self.in_flight != Some(ticket) || current != Some(ticket.selection) {
            tracing::debug!(?ticket, "Discarding stale prediction result");
            return false;
        }

        self.in_flight = None;
        match &result {
            Ok(p) => tracing::info!("Prediction succeeded: {:?}", p.label()),
            Err(PredictError::Transport(detail)) => {
                tracing::warn!("Prediction failed, classifier unreachable: {detail}")
            }
            Err(PredictError::Rejected { status, message }) => {
                tracing::warn!("Prediction rejected with HTTP {status}: {message}")
            }
            Err(e) => tracing::warn!("Prediction failed: {e}"),
        }
        self.outcome = Some(result.into());
        true
    }

    pub fn state(&self) -> WorkflowState {
        if self.selection.current().is_none() {
            return WorkflowState::Idle;
        }
        if self.in_flight.is_some() {
            return WorkflowState::InFlight;
        }
        match self.outcome {
            None => WorkflowState::Ready,
            Some(PredictionOutcome::Result(_)) => WorkflowState::Succeeded,
            Some(PredictionOutcome::Failure { .. }) => WorkflowState::Failed,
        }
    }

    pub fn selection(&self) -> Option<&SelectedInput> {
        self.selection.current()
    }

    pub fn outcome(&self) -> Option<&PredictionOutcome> {
        self.outcome.as_ref()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Whether the predict control should be enabled.
    pub fn can_trigger(&self) -> bool {
        self.selection.current().is_some() && self.in_flight.is_none()
    }
}
