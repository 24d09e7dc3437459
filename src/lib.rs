pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod interface;
pub mod model;

pub use app::{probe_connection, submit, FormController};
pub use config::{ApiConfig, AuthScheme};
pub use error::{Error, ErrorKind, Result};
pub use interface::{HttpClient, SheetApi};
pub use model::{ConnectionStatus, FailureKind, Field, StudentRecord, SubmissionResult};

#[cfg(feature = "no-wasm")]
pub use client::{demo::DemoClient, request::ReqwestClient};
#[cfg(feature = "no-wasm")]
pub use tokio;
