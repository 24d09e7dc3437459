use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{fmt, str::FromStr};

use crate::error::{Error, ErrorKind};
use crate::model::failure::FailureKind;

/// One admission form submission. Every field is kept as entered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    pub student_name: String,
    pub father_name: String,
    pub student_id: String,
    pub phone_number: String,
    pub address: String,
    pub admission_fee: String,
    pub class: String,
    pub admission_date: String,
}

impl StudentRecord {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::StudentName => &self.student_name,
            Field::FatherName => &self.father_name,
            Field::StudentId => &self.student_id,
            Field::PhoneNumber => &self.phone_number,
            Field::Address => &self.address,
            Field::AdmissionFee => &self.admission_fee,
            Field::Class => &self.class,
            Field::AdmissionDate => &self.admission_date,
        }
    }

    /// Replace a single field, leaving the other seven as they are.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::StudentName => &mut self.student_name,
            Field::FatherName => &mut self.father_name,
            Field::StudentId => &mut self.student_id,
            Field::PhoneNumber => &mut self.phone_number,
            Field::Address => &mut self.address,
            Field::AdmissionFee => &mut self.admission_fee,
            Field::Class => &mut self.class,
            Field::AdmissionDate => &mut self.admission_date,
        };
        *slot = value.into();
    }

    /// Required fields that are still blank, in form order.
    pub fn missing_fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|field| self.get(*field).trim().is_empty())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    StudentName,
    FatherName,
    StudentId,
    PhoneNumber,
    Address,
    AdmissionFee,
    Class,
    AdmissionDate,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::StudentName,
        Field::FatherName,
        Field::StudentId,
        Field::PhoneNumber,
        Field::Address,
        Field::AdmissionFee,
        Field::Class,
        Field::AdmissionDate,
    ];

    /// Attribute name used by the form inputs.
    pub fn name(self) -> &'static str {
        match self {
            Field::StudentName => "studentName",
            Field::FatherName => "fatherName",
            Field::StudentId => "studentId",
            Field::PhoneNumber => "phoneNumber",
            Field::Address => "address",
            Field::AdmissionFee => "admissionFee",
            Field::Class => "class",
            Field::AdmissionDate => "admissionDate",
        }
    }

    /// Column header in the remote sheet.
    pub fn column(self) -> &'static str {
        match self {
            Field::StudentName => "Student Name",
            Field::FatherName => "Father Name",
            Field::StudentId => "Student ID",
            Field::PhoneNumber => "Phone Number",
            Field::Address => "Address",
            Field::AdmissionFee => "Admission Fee",
            Field::Class => "Class",
            Field::AdmissionDate => "Admission Date",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::FatherName => "Father's Name",
            other => other.column(),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ErrorKind::ParseError(format!("Unknown field: {s}")).into())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    #[default]
    Unknown,
    Connected,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Notification {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notification {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }
}

pub const SUBMIT_SUCCESS_MESSAGE: &str = "Student form submitted successfully to Google Sheets!";

/// Outcome of one submission attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionResult {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip)]
    pub failure: Option<FailureKind>,
}

impl SubmissionResult {
    pub fn succeeded(data: Option<Value>) -> Self {
        Self::succeeded_with(SUBMIT_SUCCESS_MESSAGE, data)
    }

    pub fn succeeded_with(message: impl Into<String>, data: Option<Value>) -> Self {
        SubmissionResult {
            success: true,
            message: message.into(),
            data,
            failure: None,
        }
    }

    pub fn failed(kind: FailureKind) -> Self {
        SubmissionResult {
            success: false,
            message: kind.to_string(),
            data: None,
            failure: Some(kind),
        }
    }
}
