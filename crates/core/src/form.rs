// crates/core/src/form.rs
//! Log form validation and edit-mode state.

use chrono::NaiveDate;
use thiserror::Error;

use crate::types::LogDraft;

/// Calendar date form produced by the date inputs.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Which record a log form submission targets: a fresh insert, or a
/// merge-update of an existing id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditingTarget {
    New,
    Log(i64),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Request date must be before or equal to delivery date.")]
    RequestAfterDelivery,
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

/// The one rule the log form enforces: when both dates parse, the request
/// date must not come after the delivery date. Values that do not parse are
/// stored verbatim and never block a save; no other field is validated.
pub fn validate_log(draft: &LogDraft) -> Result<(), ValidationError> {
    if let (Some(request), Some(delivery)) = (
        parse_date(&draft.date_of_request),
        parse_date(&draft.date_of_delivery),
    ) {
        if request > delivery {
            return Err(ValidationError::RequestAfterDelivery);
        }
    }
    Ok(())
}

/// The survey-rating field is revealed only while the survey is marked
/// completed.
pub fn survey_rating_visible(survey_completed: &str) -> bool {
    survey_completed == "Yes"
}
