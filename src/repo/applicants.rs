use serde_json::Value;
use tracing::{debug, info, warn};
use validator::Validate;

use crate::error::TrackerError;
use crate::model::{Applicant, ApplicantDraft, Stage};
use crate::store::{Storage, APPLICANTS_KEY};

use super::{format_short_date, next_id, read_entries, write_entries, Loaded};

use super::jobs::JobRepository;

/// Repository for the persisted applicant collection
///
/// Unlike jobs there is no seed dataset: a missing or unreadable collection
/// simply reads as empty. Every mutation is a read-modify-write against the
/// full collection, so applicants of other jobs are never clobbered.
pub struct ApplicantRepository<S: Storage> {
    store: S,
}

impl<S: Storage> ApplicantRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Load every valid applicant across all jobs.
    pub fn load_all(&self) -> Result<Vec<Applicant>, TrackerError> {
        let entries = match read_entries(&self.store, APPLICANTS_KEY)? {
            Loaded::Items(entries) => entries,
            Loaded::Missing => return Ok(Vec::new()),
            Loaded::Malformed => {
                warn!("Applicant collection unreadable, reading as empty");
                return Ok(Vec::new());
            }
        };
        Ok(decode_valid_applicants(entries))
    }

    /// Applicants whose `job` field equals `slug`, in stored order.
    pub fn load_for_job(&self, slug: &str) -> Result<Vec<Applicant>, TrackerError> {
        Ok(self
            .load_all()?
            .into_iter()
            .filter(|applicant| applicant.job == slug)
            .collect())
    }

    /// Live applicant count for a job, derived from the collection.
    ///
    /// The `applicants` counter stored on the job record is written once at
    /// creation and drifts; this is the number to display.
    pub fn count_for_job(&self, slug: &str) -> Result<usize, TrackerError> {
        Ok(self.load_for_job(slug)?.len())
    }

    /// Create an applicant for the job identified by `job_slug`.
    ///
    /// The slug must match some job's slugified title in `jobs`, otherwise
    /// the record would be orphaned from birth and creation is rejected with
    /// [`TrackerError::UnknownJob`].
    pub fn create(
        &self,
        draft: &ApplicantDraft,
        job_slug: &str,
        jobs: &JobRepository<S>,
    ) -> Result<Applicant, TrackerError> {
        draft.validate()?;
        if !jobs.slug_exists(job_slug)? {
            warn!("Rejecting applicant for unknown job slug '{}'", job_slug);
            return Err(TrackerError::UnknownJob(job_slug.to_string()));
        }
        debug!("Creating applicant: name={}, job={}", draft.full_name, job_slug);

        let mut all = self.load_all()?;
        let ids: Vec<i64> = all.iter().map(|a| a.id).collect();
        let applicant = Applicant {
            id: next_id(&ids),
            name: draft.full_name.clone(),
            email: draft.email.clone(),
            phone: draft.phone.clone(),
            applied_date: format_short_date(draft.application_date),
            stage: draft.current_stage,
            resume_url: draft.resume_url.clone(),
            notes: draft.notes.clone(),
            job: job_slug.to_string(),
        };
        all.push(applicant.clone());
        write_entries(&self.store, APPLICANTS_KEY, &all)?;

        info!("Applicant created with id={}", applicant.id);
        Ok(applicant)
    }

    /// Move an applicant to a new stage and persist the change.
    ///
    /// Any stage may be assigned from any other; the pipeline enforces no
    /// ordering. An unknown id is an explicit [`TrackerError::NotFound`] and
    /// leaves the stored collection untouched.
    pub fn update_stage(&self, id: i64, stage: Stage) -> Result<Applicant, TrackerError> {
        let mut all = self.load_all()?;
        let Some(applicant) = all.iter_mut().find(|a| a.id == id) else {
            warn!("Stage update for unknown applicant id={}", id);
            return Err(TrackerError::NotFound(id));
        };
        applicant.stage = stage;
        let updated = applicant.clone();
        write_entries(&self.store, APPLICANTS_KEY, &all)?;

        info!("Applicant {} moved to stage {}", id, stage);
        Ok(updated)
    }
}

fn decode_valid_applicants(entries: Vec<Value>) -> Vec<Applicant> {
    entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<Applicant>(entry) {
            Ok(applicant) => Some(applicant),
            Err(e) => {
                warn!("Dropping undecodable applicant entry: {}", e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono::NaiveDate;

    fn fixtures() -> (JobRepository<MemoryStore>, ApplicantRepository<MemoryStore>) {
        let store = MemoryStore::new();
        let jobs = JobRepository::new(store.clone());
        jobs.load_all().unwrap(); // seed the default jobs
        (jobs, ApplicantRepository::new(store))
    }

    fn draft(name: &str) -> ApplicantDraft {
        ApplicantDraft {
            full_name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
            phone: "555-0134".to_string(),
            application_date: NaiveDate::from_ymd_opt(2024, 4, 12).unwrap(),
            resume_url: String::new(),
            current_stage: Stage::Applied,
            notes: String::new(),
        }
    }

    #[test]
    fn missing_collection_reads_as_empty() {
        let (_, applicants) = fixtures();
        assert!(applicants.load_all().unwrap().is_empty());
    }

    #[test]
    fn malformed_collection_reads_as_empty_without_reseed() {
        let (_, applicants) = fixtures();
        applicants.store.set(APPLICANTS_KEY, "oops").unwrap();
        assert!(applicants.load_all().unwrap().is_empty());
        // No self-healing for applicants: the raw value is left alone.
        assert_eq!(
            applicants.store.get(APPLICANTS_KEY).unwrap().as_deref(),
            Some("oops")
        );
    }

    #[test]
    fn create_then_load_for_job() {
        let (jobs, applicants) = fixtures();
        let created = applicants
            .create(&draft("Priya Nair"), "frontend-developer", &jobs)
            .unwrap();
        assert_eq!(created.applied_date, "Apr 12, 2024");

        let found = applicants.load_for_job("frontend-developer").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Priya Nair");
        assert_eq!(found[0].email, "priya.nair@example.com");

        assert!(applicants.load_for_job("ux-designer").unwrap().is_empty());
    }

    #[test]
    fn create_rejects_unknown_job_slug() {
        let (jobs, applicants) = fixtures();
        let err = applicants
            .create(&draft("Priya Nair"), "staff-astronaut", &jobs)
            .unwrap_err();
        assert!(matches!(err, TrackerError::UnknownJob(slug) if slug == "staff-astronaut"));
        assert!(applicants.load_all().unwrap().is_empty());
    }

    #[test]
    fn sequential_creates_both_persist() {
        let (jobs, applicants) = fixtures();
        applicants
            .create(&draft("Priya Nair"), "frontend-developer", &jobs)
            .unwrap();
        applicants
            .create(&draft("Sam Ortiz"), "ux-designer", &jobs)
            .unwrap();

        let all = applicants.load_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_ne!(all[0].id, all[1].id);
        assert_eq!(applicants.count_for_job("frontend-developer").unwrap(), 1);
        assert_eq!(applicants.count_for_job("ux-designer").unwrap(), 1);
    }

    #[test]
    fn update_stage_touches_only_the_target() {
        let (jobs, applicants) = fixtures();
        let first = applicants
            .create(&draft("Priya Nair"), "frontend-developer", &jobs)
            .unwrap();
        let second = applicants
            .create(&draft("Sam Ortiz"), "frontend-developer", &jobs)
            .unwrap();

        let updated = applicants.update_stage(first.id, Stage::Interview).unwrap();
        assert_eq!(updated.stage, Stage::Interview);

        let all = applicants.load_all().unwrap();
        let by_id = |id| all.iter().find(|a| a.id == id).unwrap();
        assert_eq!(by_id(first.id).stage, Stage::Interview);
        assert_eq!(by_id(second.id).stage, Stage::Applied);
    }

    #[test]
    fn update_stage_for_unknown_id_is_not_found_and_writes_nothing() {
        let (jobs, applicants) = fixtures();
        applicants
            .create(&draft("Priya Nair"), "frontend-developer", &jobs)
            .unwrap();
        let before = applicants.store.get(APPLICANTS_KEY).unwrap().unwrap();

        let err = applicants.update_stage(424242, Stage::Interview).unwrap_err();
        assert!(matches!(err, TrackerError::NotFound(424242)));

        let after = applicants.store.get(APPLICANTS_KEY).unwrap().unwrap();
        assert_eq!(before, after);
    }
}
