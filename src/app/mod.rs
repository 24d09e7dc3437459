//! Application module - form state and submission logic
//!
//! Everything here is generic over [`crate::interface::SheetApi`], so the same
//! controller runs on top of the reqwest, gloo or demo transport.

pub mod form;
pub mod submit;

pub use form::{FormController, ProbeTicket, SubmitOutcome, SubmitTicket};
pub use submit::{probe_connection, submit};
