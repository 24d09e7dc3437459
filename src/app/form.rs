//! Form controller: owns the record being edited, the connection badge and
//! the single notification slot, and drives the submission client.
//!
//! Each async operation can be run in one go ([`FormController::submit`],
//! [`FormController::probe`]) or split into `begin_*` / `finish_*` so a front
//! end can keep handling input while the request is in flight. Tickets carry a
//! generation number; a result whose ticket was superseded is dropped.

use std::panic::AssertUnwindSafe;

use futures::FutureExt;

use super::submit::{probe_connection, submit};
use crate::interface::SheetApi;
use crate::model::structs::{
    ConnectionStatus, Field, Notification, StudentRecord, SubmissionResult,
};

pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred. Please try again.";

#[derive(Debug)]
pub struct SubmitTicket {
    generation: u64,
    record: StudentRecord,
}

impl SubmitTicket {
    /// Snapshot taken when the submission started.
    pub fn record(&self) -> &StudentRecord {
        &self.record
    }
}

#[derive(Debug)]
pub struct ProbeTicket {
    generation: u64,
}

/// How a submission ended, as seen by the controller.
#[derive(Debug)]
pub enum SubmitOutcome {
    Finished(SubmissionResult),
    /// The client panicked instead of returning a result.
    Aborted,
}

#[derive(Debug, Default)]
pub struct FormController {
    record: StudentRecord,
    status: ConnectionStatus,
    notification: Option<Notification>,
    submitting: bool,
    probing: bool,
    submit_generation: u64,
    probe_generation: u64,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the controller and run the initial connection probe.
    pub async fn mount<A: SheetApi>(api: &A) -> Self {
        let mut controller = Self::new();
        controller.probe(api).await;
        controller
    }

    pub fn record(&self) -> &StudentRecord {
        &self.record
    }

    pub fn connection_status(&self) -> ConnectionStatus {
        self.status
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn is_probing(&self) -> bool {
        self.probing
    }

    /// Inputs are disabled while a submission is in flight; returns whether
    /// the value was taken.
    pub fn update_field(&mut self, field: Field, value: impl Into<String>) -> bool {
        if self.submitting {
            return false;
        }
        self.record.set(field, value);
        true
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }

    /// Clear the form and any notification.
    pub fn reset(&mut self) {
        if !self.submitting {
            self.record = StudentRecord::default();
            self.notification = None;
        }
    }

    /// Forget everything in flight. Results of earlier tickets are ignored.
    pub fn abandon(&mut self) {
        self.submit_generation += 1;
        self.probe_generation += 1;
        self.submitting = false;
        self.probing = false;
    }

    pub fn begin_probe(&mut self) -> Option<ProbeTicket> {
        if self.probing {
            log::debug!("Probe already in flight, ignoring");
            return None;
        }
        self.probing = true;
        self.probe_generation += 1;
        Some(ProbeTicket {
            generation: self.probe_generation,
        })
    }

    /// Apply a probe result; `false` if the ticket is stale.
    pub fn finish_probe(&mut self, ticket: ProbeTicket, status: ConnectionStatus) -> bool {
        if ticket.generation != self.probe_generation {
            log::debug!("Dropping stale probe result {status:?}");
            return false;
        }
        self.probing = false;
        self.status = status;
        true
    }

    /// Re-test the connection. Ignored while a probe is already running.
    pub async fn probe<A: SheetApi>(&mut self, api: &A) -> bool {
        let Some(ticket) = self.begin_probe() else {
            return false;
        };
        let status = probe_connection(api).await;
        self.finish_probe(ticket, status)
    }

    /// Enter submitting state and snapshot the record.
    ///
    /// Returns `None` when a submission is already running, or when required
    /// fields are blank (an error notification lists them).
    pub fn begin_submit(&mut self) -> Option<SubmitTicket> {
        if self.submitting {
            log::debug!("Submit already in flight, ignoring");
            return None;
        }

        let missing = self.record.missing_fields();
        if !missing.is_empty() {
            let labels: Vec<&str> = missing.iter().map(|f| f.label()).collect();
            self.notification = Some(Notification::error(format!(
                "Please fill in all required fields: {}",
                labels.join(", ")
            )));
            return None;
        }

        self.submitting = true;
        self.submit_generation += 1;
        Some(SubmitTicket {
            generation: self.submit_generation,
            record: self.record.clone(),
        })
    }

    /// Apply a submission outcome; `false` if the ticket is stale.
    pub fn finish_submit(&mut self, ticket: SubmitTicket, outcome: SubmitOutcome) -> bool {
        if ticket.generation != self.submit_generation {
            log::debug!("Dropping stale submission outcome {outcome:?}");
            return false;
        }
        self.submitting = false;

        self.notification = Some(match outcome {
            SubmitOutcome::Finished(result) if result.success => {
                self.record = StudentRecord::default();
                Notification::success(result.message)
            }
            SubmitOutcome::Finished(result) => Notification::error(result.message),
            SubmitOutcome::Aborted => Notification::error(UNEXPECTED_ERROR_MESSAGE),
        });
        true
    }

    /// Submit the current record and show the outcome. Returns whether a
    /// submission was actually made and applied.
    pub async fn submit<A: SheetApi>(&mut self, api: &A) -> bool {
        let Some(ticket) = self.begin_submit() else {
            return false;
        };
        let outcome = run_submit(api, ticket.record()).await;
        self.finish_submit(ticket, outcome)
    }
}

/// Call the submission client, turning a panic into [`SubmitOutcome::Aborted`].
pub async fn run_submit<A: SheetApi>(api: &A, record: &StudentRecord) -> SubmitOutcome {
    match AssertUnwindSafe(submit(api, record)).catch_unwind().await {
        Ok(result) => SubmitOutcome::Finished(result),
        Err(_) => {
            log::error!("Submission client panicked");
            SubmitOutcome::Aborted
        }
    }
}
