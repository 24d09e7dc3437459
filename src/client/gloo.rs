//! WASM HTTP client implementation using gloo_net
//!
//! This module provides the spreadsheet transport for WASM environments
//! using the gloo_net crate for making HTTP requests via the browser's fetch API.

use gloo_net::http::{Request, RequestBuilder, Response};

use crate::config::ApiConfig;
use crate::error::Result;
use crate::interface::{HttpClient, SheetApi};
use crate::model::dtos::{RawResponse, SheetRow};

/// HTTP client for WASM environments using gloo_net
#[derive(Debug, Clone)]
pub struct WasmClient {
    config: ApiConfig,
}

impl HttpClient for WasmClient {
    async fn new(config: ApiConfig) -> Result<Self> {
        Ok(Self { config })
    }
}

impl WasmClient {
    fn with_auth(&self, builder: RequestBuilder) -> RequestBuilder {
        let (name, value) = self.config.auth.header();
        builder.header(name, &value)
    }

    async fn read(resp: Response) -> Result<RawResponse> {
        let status = resp.status();
        log::debug!("Response status: {status}");
        let body = resp.text().await?;
        Ok(RawResponse::new(status, body))
    }
}

impl SheetApi for WasmClient {
    async fn append_row(&self, row: &SheetRow) -> Result<RawResponse> {
        let body = serde_json::to_string(row)?;

        log::debug!("POST {}", self.config.endpoint);
        let resp = self
            .with_auth(Request::post(&self.config.endpoint))
            .header("Content-Type", "application/json")
            .body(body)?
            .send()
            .await?;

        Self::read(resp).await
    }

    async fn probe(&self) -> Result<RawResponse> {
        log::debug!("GET {}", self.config.endpoint);
        let resp = self
            .with_auth(Request::get(&self.config.endpoint))
            .send()
            .await?;

        Self::read(resp).await
    }
}
