use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Job status enum representing whether a posting accepts applications
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Active,
    Closed,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Active => "Active",
            JobStatus::Closed => "Closed",
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted representation of a job posting.
///
/// Field names match the stored layout. `applicants` is the counter written
/// at creation time; the live count is always derived from the applicant
/// collection instead, so this field is informational only.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Job {
    pub id: i64,
    pub title: String,
    #[serde(default = "unassigned")]
    pub recruiter: String,
    #[serde(default)]
    pub location: String,
    /// Short locale date string captured at write time, e.g. "Apr 1, 2024".
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub applicants: u32,
    pub status: JobStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirements: Option<Vec<String>>,
}

fn unassigned() -> String {
    "unassigned".to_string()
}

/// Input collected by the job creation form.
#[derive(Debug, Deserialize, Validate)]
pub struct JobDraft {
    #[validate(length(min = 1, message = "Job title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Department is required"))]
    pub department: String,
    #[validate(length(min = 1, message = "Hiring manager is required"))]
    pub hiring_manager: String,
    pub location: String,
    pub description: String,
    /// Multi-line text, one requirement per line. Blank lines are dropped at
    /// creation time.
    pub requirements: String,
    pub posted_date: NaiveDate,
    pub is_active: bool,
}

impl JobDraft {
    /// Requirement lines with blanks removed, in form order.
    pub fn requirement_lines(&self) -> Vec<String> {
        self.requirements
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| line.to_string())
            .collect()
    }
}
