//! Hearing test wire types
//!
//! Field names are camelCase on the wire. Incoming objects are matched
//! case-insensitively, so `TesterName`, `testerName` and `testername` all
//! land in the same field.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Record identifier assigned by the server store
pub type HearingTestId = i32;

/// Base path of the hearing test resource collection
pub const HEARING_TESTS_PATH: &str = "/api/hearingtests";

/// Path of a single hearing test resource
pub fn hearing_test_path(id: HearingTestId) -> String {
    format!("{}/{}", HEARING_TESTS_PATH, id)
}

// ========================================
// Request / View
// ========================================

/// Validated create-or-update payload
///
/// Deserializing goes through [`HearingTestDraft`] and its validation, so a
/// `HearingTestRequest` value always satisfies the field constraints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "HearingTestDraft")]
pub struct HearingTestRequest {
    pub tester_name: String,
    #[serde(with = "crate::time::iso8601")]
    pub date_conducted: DateTime<Utc>,
    pub result: String,
}

impl TryFrom<HearingTestDraft> for HearingTestRequest {
    type Error = crate::ValidationErrors;

    fn try_from(draft: HearingTestDraft) -> Result<Self, Self::Error> {
        draft.validate()
    }
}

/// Hearing test as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "FoldedObject")]
pub struct HearingTestView {
    pub id: HearingTestId,
    pub tester_name: String,
    #[serde(with = "crate::time::iso8601")]
    pub date_conducted: DateTime<Utc>,
    pub result: String,
}

#[derive(Deserialize)]
struct ViewFields {
    id: HearingTestId,
    testername: String,
    #[serde(with = "crate::time::iso8601")]
    dateconducted: DateTime<Utc>,
    result: String,
}

impl TryFrom<FoldedObject> for HearingTestView {
    type Error = serde_json::Error;

    fn try_from(object: FoldedObject) -> Result<Self, Self::Error> {
        let fields: ViewFields = object.into_fields()?;
        Ok(Self {
            id: fields.id,
            tester_name: fields.testername,
            date_conducted: fields.dateconducted,
            result: fields.result,
        })
    }
}

// ========================================
// Draft (unvalidated body)
// ========================================

/// Request body exactly as received, before validation
///
/// Every field is optional so that missing fields are reported by
/// [`HearingTestDraft::validate`] alongside every other problem instead of
/// failing deserialization on the first one. `date_conducted` stays raw text
/// for the same reason.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "FoldedObject")]
pub struct HearingTestDraft {
    pub tester_name: Option<String>,
    pub date_conducted: Option<String>,
    pub result: Option<String>,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct DraftFields {
    testername: Option<String>,
    dateconducted: Option<String>,
    result: Option<String>,
}

impl TryFrom<FoldedObject> for HearingTestDraft {
    type Error = serde_json::Error;

    fn try_from(object: FoldedObject) -> Result<Self, Self::Error> {
        let fields: DraftFields = object.into_fields()?;
        Ok(Self {
            tester_name: fields.testername,
            date_conducted: fields.dateconducted,
            result: fields.result,
        })
    }
}

impl From<&HearingTestRequest> for HearingTestDraft {
    fn from(request: &HearingTestRequest) -> Self {
        Self {
            tester_name: Some(request.tester_name.clone()),
            date_conducted: Some(crate::time::format_iso8601(&request.date_conducted)),
            result: Some(request.result.clone()),
        }
    }
}

// ========================================
// Case-insensitive object
// ========================================

/// JSON object with every key folded to lowercase
#[derive(Deserialize)]
#[serde(transparent)]
struct FoldedObject(Map<String, Value>);

impl FoldedObject {
    fn into_fields<T: DeserializeOwned>(self) -> Result<T, serde_json::Error> {
        let folded: Map<String, Value> = self
            .0
            .into_iter()
            .map(|(key, value)| (key.to_lowercase(), value))
            .collect();
        serde_json::from_value(Value::Object(folded))
    }
}
