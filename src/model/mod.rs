pub mod dtos;
pub mod failure;
pub mod structs;

pub use dtos::{RawResponse, SheetRow};
pub use failure::{classify_failure, FailureKind};
pub use structs::{
    ConnectionStatus, Field, Notification, NotificationKind, StudentRecord, SubmissionResult,
};
