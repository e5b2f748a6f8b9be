//! Hearing test field constraints
//!
//! Server-side rules applied to every create and update body. All failing
//! fields are collected; nothing is coerced.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::models::{HearingTestDraft, HearingTestRequest};
use crate::time::parse_iso8601;

/// Maximum `testerName` length, in characters
pub const TESTER_NAME_MAX_CHARS: usize = 100;

/// Maximum `result` length, in characters
pub const RESULT_MAX_CHARS: usize = 500;

pub const FIELD_TESTER_NAME: &str = "testerName";
pub const FIELD_DATE_CONDUCTED: &str = "dateConducted";
pub const FIELD_RESULT: &str = "result";

/// Every violated constraint, keyed by wire field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Names of the fields that failed
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Messages recorded for one field (empty if it passed)
    pub fn messages(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{}: {}", field, message)?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl HearingTestDraft {
    /// Check every field and produce a request, or the full list of problems
    pub fn validate(self) -> Result<HearingTestRequest, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let tester_name = required_text(
            &mut errors,
            FIELD_TESTER_NAME,
            "Tester name",
            self.tester_name,
            TESTER_NAME_MAX_CHARS,
        );

        let date_conducted = match self.date_conducted.as_deref().map(str::trim) {
            None | Some("") => {
                errors.add(FIELD_DATE_CONDUCTED, "Date conducted is required");
                None
            }
            Some(raw) => match parse_iso8601(raw) {
                Ok(dt) => Some(dt),
                Err(_) => {
                    errors.add(
                        FIELD_DATE_CONDUCTED,
                        "Date conducted must be an ISO-8601 date-time",
                    );
                    None
                }
            },
        };

        let result = required_text(
            &mut errors,
            FIELD_RESULT,
            "Result",
            self.result,
            RESULT_MAX_CHARS,
        );

        match (tester_name, date_conducted, result) {
            (Some(tester_name), Some(date_conducted), Some(result)) => Ok(HearingTestRequest {
                tester_name,
                date_conducted,
                result,
            }),
            _ => Err(errors),
        }
    }
}

fn required_text(
    errors: &mut ValidationErrors,
    field: &str,
    label: &str,
    value: Option<String>,
    max_chars: usize,
) -> Option<String> {
    let value = match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => {
            errors.add(field, format!("{} is required", label));
            return None;
        }
    };

    if value.chars().count() > max_chars {
        errors.add(
            field,
            format!("{} cannot exceed {} characters", label, max_chars),
        );
        return None;
    }

    Some(value)
}
