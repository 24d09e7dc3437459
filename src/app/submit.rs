//! Submission client: one write, one probe, every failure classified.

use serde_json::Value;

use crate::error::Error;
use crate::interface::SheetApi;
use crate::model::dtos::{RawResponse, SheetRow};
use crate::model::failure::{classify_failure, FailureKind};
use crate::model::structs::{ConnectionStatus, StudentRecord, SubmissionResult};

/// Append `record` to the sheet. Never fails; errors come back as
/// `success == false` with a message for the user.
pub async fn submit<A: SheetApi>(api: &A, record: &StudentRecord) -> SubmissionResult {
    let row = SheetRow::now(record);
    log::info!("Submitting admission for student {:?}", row.student_id);
    log::debug!("Formatted row: {row:?}");

    let outcome = match api.append_row(&row).await {
        Ok(resp) => read_response(resp),
        Err(e) => Err(transport_failure(&e)),
    };

    match outcome {
        Ok(data) => {
            log::info!("Row appended");
            SubmissionResult::succeeded_with(api.success_message(), data)
        }
        Err(kind) => {
            log::warn!("Submission failed: {kind:?}");
            SubmissionResult::failed(kind)
        }
    }
}

/// GET the endpoint and report whether it answered with a 2xx.
pub async fn probe_connection<A: SheetApi>(api: &A) -> ConnectionStatus {
    match api.probe().await {
        Ok(resp) if resp.is_success() => {
            log::info!("API connection successful!");
            ConnectionStatus::Connected
        }
        Ok(resp) => {
            log::warn!("API test failed with status: {}", resp.status);
            ConnectionStatus::Error
        }
        Err(e) => {
            log::warn!("Failed to connect to API: {e}");
            ConnectionStatus::Error
        }
    }
}

fn read_response(resp: RawResponse) -> Result<Option<Value>, FailureKind> {
    if !resp.is_success() {
        log::error!("API error response ({}): {}", resp.status, resp.body);
        return Err(classify_failure(resp.status, &resp.body));
    }
    if resp.body.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(&resp.body).map(Some).map_err(|e| {
        log::error!("Unreadable success response: {e}");
        FailureKind::UnknownError
    })
}

fn transport_failure(e: &Error) -> FailureKind {
    log::error!("Error submitting form: {e}");
    if e.is_network() {
        FailureKind::NetworkError
    } else {
        FailureKind::UnknownError
    }
}
