use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::stage::Stage;

/// Persisted representation of an applicant.
///
/// `job` holds the slug of the owning job's title, not the job id. The slug
/// is checked against the job collection at creation time; after that the
/// link is denormalized and travels with the record.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Applicant {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    /// Short locale date string captured at creation, e.g. "Apr 12, 2024".
    #[serde(rename = "appliedDate", default)]
    pub applied_date: String,
    pub stage: Stage,
    #[serde(rename = "resumeUrl", default)]
    pub resume_url: String,
    #[serde(default)]
    pub notes: String,
    pub job: String,
}

/// Input collected by the applicant intake form.
#[derive(Debug, Deserialize, Validate)]
pub struct ApplicantDraft {
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    pub phone: String,
    pub application_date: NaiveDate,
    pub resume_url: String,
    pub current_stage: Stage,
    pub notes: String,
}
