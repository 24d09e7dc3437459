//! Offline stand-in for the spreadsheet API.

use std::time::Duration;

use crate::error::Result;
use crate::interface::SheetApi;
use crate::model::dtos::{RawResponse, SheetRow};

pub const DEFAULT_DELAY: Duration = Duration::from_millis(1500);

pub const DEMO_SUCCESS_MESSAGE: &str = "Demo Mode: Form data logged to console successfully!";

/// Accepts every row after a short delay and echoes it back.
#[derive(Debug, Clone)]
pub struct DemoClient {
    delay: Duration,
}

impl Default for DemoClient {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}

impl DemoClient {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl SheetApi for DemoClient {
    async fn append_row(&self, row: &SheetRow) -> Result<RawResponse> {
        log::info!("DEMO MODE: row that would be submitted: {row:?}");
        tokio::time::sleep(self.delay).await;
        let body = serde_json::to_string(&[row])?;
        Ok(RawResponse::new(200, body))
    }

    async fn probe(&self) -> Result<RawResponse> {
        Ok(RawResponse::new(200, "[]"))
    }

    fn success_message(&self) -> &str {
        DEMO_SUCCESS_MESSAGE
    }
}
