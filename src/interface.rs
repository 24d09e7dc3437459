#![allow(async_fn_in_trait)] // single-threaded callers only, futures need not be Send

use crate::config::ApiConfig;
use crate::error::Result;
use crate::model::dtos::{RawResponse, SheetRow};
use crate::model::structs::SUBMIT_SUCCESS_MESSAGE;

/// Common trait for HTTP client construction
pub trait HttpClient {
    /// Create a new HTTP client bound to the configured endpoint
    async fn new(config: ApiConfig) -> Result<Self>
    where
        Self: Sized;
}

/// Calls against the spreadsheet endpoint.
///
/// Any answered request is `Ok`, whatever its status; `Err` means the
/// request failed before a response could be read.
pub trait SheetApi {
    /// POST one row as JSON
    async fn append_row(&self, row: &SheetRow) -> Result<RawResponse>;

    /// GET the endpoint with the same credential, body ignored
    async fn probe(&self) -> Result<RawResponse>;

    /// Message shown once a row has been accepted
    fn success_message(&self) -> &str {
        SUBMIT_SUCCESS_MESSAGE
    }
}
