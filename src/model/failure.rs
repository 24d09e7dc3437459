//! Classified submission failures.
//!
//! Every way a submission can go wrong ends up as one [`FailureKind`]; the
//! `Display` impl is the message shown to the user.

use serde_json::Value;

/// Text the API puts in `detail` when the sheet is not shared with it.
pub const ORIGIN_SHEET_DENIED: &str = "Connection to the origin sheet denied";

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FailureKind {
    #[error("Google Sheet Access Denied: Please check the sheet's sharing settings and give the API editor access.")]
    PermissionDenied,
    #[error("Invalid API Key: Please check your API key configuration.")]
    InvalidCredential,
    #[error("Sheet Not Found: Please verify your sheet ID and API connection.")]
    ResourceNotFound,
    #[error("API Error ({0}): Please check your configuration and try again.")]
    HttpError(u16),
    #[error("Network Error: Please check your internet connection and try again.")]
    NetworkError,
    #[error("Unexpected Error: Please try again later or contact support.")]
    UnknownError,
}

impl FailureKind {
    /// Steps the user can take to fix the failure.
    pub fn troubleshooting(&self) -> &'static [&'static str] {
        match self {
            FailureKind::PermissionDenied => &[
                "Open the Google Sheet and click \"Share\" (top-right corner)",
                "Change general access to \"Anyone with the link\"",
                "Set the permission to \"Editor\"",
                "Reconnect the sheet in the API dashboard and check the connection is active",
                "Make sure the sheet tab is named \"Sheet1\"; headers are created on first submission",
            ],
            FailureKind::InvalidCredential => &[
                "Verify the API key is correct and still active",
                "Check SHEET_AUTH_SCHEME matches what the API expects (api-key or bearer)",
            ],
            FailureKind::ResourceNotFound => &[
                "Make sure the sheet ID in SHEET_API_URL matches your actual sheet",
                "Try disconnecting and reconnecting the sheet in the API dashboard",
            ],
            FailureKind::HttpError(_) => &[
                "Check that you have sufficient quota in your API plan",
                "Double-check that the Google Sheet is accessible",
            ],
            FailureKind::NetworkError => &["Check your internet connection"],
            FailureKind::UnknownError => &["Run with SHEET_LOG=debug to see the API responses"],
        }
    }
}

/// Map a non-success response to its failure kind.
///
/// Checked in order: sheet permission denial (403 with the denial detail),
/// 401, 404, then any other status.
pub fn classify_failure(status: u16, body: &str) -> FailureKind {
    match status {
        403 if is_origin_denied(body) => FailureKind::PermissionDenied,
        401 => FailureKind::InvalidCredential,
        404 => FailureKind::ResourceNotFound,
        other => FailureKind::HttpError(other),
    }
}

fn is_origin_denied(body: &str) -> bool {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| json.get("detail")?.as_str().map(|d| d.contains(ORIGIN_SHEET_DENIED)))
        .unwrap_or(false)
}
