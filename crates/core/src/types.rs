// crates/core/src/types.rs
//! Domain records for the service-request logbook.
//!
//! Serde names are camelCase and match the log/branch form control names
//! 1:1, so a submitted form body deserializes directly into a draft and
//! unknown fields fall away.

use serde::{Deserialize, Serialize};

/// One branch service request, as stored in the `logs` table.
///
/// Every field except `id` and the two dates is optional in the form and
/// stored as an empty string when left blank. `cost` is numeric-as-text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRecord {
    pub id: i64,
    pub branch_name: String,
    pub date_of_request: String,
    pub date_of_delivery: String,
    #[serde(default)]
    pub material_created: String,
    #[serde(default)]
    pub channel_of_request: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub survey_completed: String,
    #[serde(default)]
    pub cost: String,
    #[serde(default)]
    pub survey_rating: String,
}

/// Raw log form fields, before the store has assigned an id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LogDraft {
    pub branch_name: String,
    pub date_of_request: String,
    pub date_of_delivery: String,
    pub material_created: String,
    pub channel_of_request: String,
    pub status: String,
    pub survey_completed: String,
    pub cost: String,
    pub survey_rating: String,
}

impl LogDraft {
    /// Attach a store-assigned id to a draft.
    pub fn into_record(self, id: i64) -> LogRecord {
        LogRecord {
            id,
            branch_name: self.branch_name,
            date_of_request: self.date_of_request,
            date_of_delivery: self.date_of_delivery,
            material_created: self.material_created,
            channel_of_request: self.channel_of_request,
            status: self.status,
            survey_completed: self.survey_completed,
            cost: self.cost,
            survey_rating: self.survey_rating,
        }
    }
}

impl From<LogRecord> for LogDraft {
    fn from(record: LogRecord) -> Self {
        Self {
            branch_name: record.branch_name,
            date_of_request: record.date_of_request,
            date_of_delivery: record.date_of_delivery,
            material_created: record.material_created,
            channel_of_request: record.channel_of_request,
            status: record.status,
            survey_completed: record.survey_completed,
            cost: record.cost,
            survey_rating: record.survey_rating,
        }
    }
}

/// A branch lookup entity, keyed by `code`.
///
/// `name` is the display value log records reference by string — there is
/// no enforced foreign key, so deleting a branch leaves any referencing
/// `LogRecord.branch_name` values behind unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub regional_manager: String,
    #[serde(default)]
    pub area_manager: String,
}
