//! No-WASM HTTP client implementation using reqwest
//!
//! This module provides the spreadsheet transport for non-WASM environments
//! using the reqwest crate for making HTTP requests.

use crate::config::ApiConfig;
use crate::error::{ErrorKind, Result};
use crate::interface::{HttpClient, SheetApi};
use crate::model::dtos::{RawResponse, SheetRow};
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE},
    Client, Response,
};

/// HTTP client for no-WASM environments using reqwest
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: Client,
    config: ApiConfig,
}

impl HttpClient for ReqwestClient {
    async fn new(config: ApiConfig) -> Result<Self> {
        let client = Client::builder().build()?;
        Self::with_client(client, config)
    }
}

impl ReqwestClient {
    /// Use an already configured reqwest client (proxy, timeouts, TLS roots).
    pub fn with_client(client: Client, config: ApiConfig) -> Result<Self> {
        Self::auth_headers(&config)?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn auth_headers(config: &ApiConfig) -> Result<HeaderMap> {
        let (name, value) = config.auth.header();
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ErrorKind::ParseError(e.to_string()))?,
            HeaderValue::from_str(&value).map_err(|e| ErrorKind::ParseError(e.to_string()))?,
        );
        Ok(headers)
    }

    async fn read(resp: Response) -> Result<RawResponse> {
        let status = resp.status();
        log::debug!("Response status: {}", status.as_u16());
        log::debug!("Response headers: {:?}", resp.headers());

        let body = resp.text().await?;
        Ok(RawResponse::new(status.as_u16(), body))
    }
}

impl SheetApi for ReqwestClient {
    async fn append_row(&self, row: &SheetRow) -> Result<RawResponse> {
        let mut headers = Self::auth_headers(&self.config)?;
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        // Serialization failures stay SerdeJsonError, never a send error.
        let body = serde_json::to_vec(row)?;

        log::debug!("POST {}", self.config.endpoint);
        let resp = self
            .client
            .post(&self.config.endpoint)
            .headers(headers)
            .body(body)
            .send()
            .await?;

        Self::read(resp).await
    }

    async fn probe(&self) -> Result<RawResponse> {
        let headers = Self::auth_headers(&self.config)?;

        log::debug!("GET {}", self.config.endpoint);
        let resp = self
            .client
            .get(&self.config.endpoint)
            .headers(headers)
            .send()
            .await?;

        Self::read(resp).await
    }
}
