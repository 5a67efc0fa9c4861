pub mod applicant;
pub mod job;
pub mod stage;

// Re-export commonly used types
pub use applicant::{Applicant, ApplicantDraft};
pub use job::{Job, JobDraft, JobStatus};
pub use stage::Stage;
