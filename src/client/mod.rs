//! Client module - spreadsheet transports for both WASM and no-WASM environments
//!
//! Every transport implements [`crate::interface::SheetApi`]; the submission
//! logic in [`crate::app`] never depends on a concrete one.

#[cfg(feature = "no-wasm")]
pub mod demo;
#[cfg(feature = "no-wasm")]
pub mod request;

#[cfg(feature = "wasm")]
pub mod gloo;
