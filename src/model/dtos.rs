use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::structs::StudentRecord;

/// Row appended to the remote sheet, keyed by column header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetRow {
    #[serde(rename = "Student Name")]
    pub student_name: String,
    #[serde(rename = "Father Name")]
    pub father_name: String,
    #[serde(rename = "Student ID")]
    pub student_id: String,
    #[serde(rename = "Phone Number")]
    pub phone_number: String,
    #[serde(rename = "Address")]
    pub address: String,
    #[serde(rename = "Admission Fee")]
    pub admission_fee: String,
    #[serde(rename = "Class")]
    pub class: String,
    #[serde(rename = "Admission Date")]
    pub admission_date: String,
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
}

impl SheetRow {
    pub fn new(record: &StudentRecord, at: DateTime<Utc>) -> Self {
        SheetRow {
            student_name: record.student_name.clone(),
            father_name: record.father_name.clone(),
            student_id: record.student_id.clone(),
            phone_number: record.phone_number.clone(),
            address: record.address.clone(),
            admission_fee: record.admission_fee.clone(),
            class: record.class.clone(),
            admission_date: record.admission_date.clone(),
            timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    pub fn now(record: &StudentRecord) -> Self {
        Self::new(record, Utc::now())
    }
}

/// Status and body of an answered request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        RawResponse {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
