//! Data layer of a recruitment-tracking application.
//!
//! Job postings and applicants live in two named collections behind a
//! key/value [`store::Storage`] boundary. The repositories do the reading,
//! validation and writing; [`slug`] derives the URL-safe identifier that
//! links an applicant to its job; [`model::Stage`] enumerates the pipeline
//! stages. Rendering and input collection belong to whatever front end calls
//! in (the bundled CLI binary is one such caller).

pub mod config;
pub mod error;
pub mod model;
pub mod repo;
pub mod slug;
pub mod store;

pub use error::TrackerError;
pub use model::{Applicant, ApplicantDraft, Job, JobDraft, JobStatus, Stage};
pub use repo::{ApplicantRepository, JobQuery, JobRepository, StatusFilter};
pub use slug::{deslugify, slugify};
pub use store::{FileStore, MemoryStore, Storage};
