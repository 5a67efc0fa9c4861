use serde_json::Value;
use tracing::{debug, info, warn};
use validator::Validate;

use crate::error::TrackerError;
use crate::model::{Job, JobDraft, JobStatus};
use crate::slug::slugify;
use crate::store::{Storage, JOBS_KEY};

use super::{format_short_date, next_id, read_entries, write_entries, Loaded};

/// Status predicate for [`JobRepository::filter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Closed,
}

impl StatusFilter {
    fn matches(&self, status: JobStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => status == JobStatus::Active,
            StatusFilter::Closed => status == JobStatus::Closed,
        }
    }
}

/// In-memory filter over a loaded job collection.
#[derive(Debug, Clone, Default)]
pub struct JobQuery {
    /// Case-insensitive substring match on the title.
    pub search_term: String,
    pub status: StatusFilter,
}

/// Repository for the persisted job collection
pub struct JobRepository<S: Storage> {
    store: S,
}

impl<S: Storage> JobRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Load every valid job, self-healing to the seed dataset.
    ///
    /// Entries that fail to decode, or decode with a zero id or an empty
    /// title, are dropped individually; the whole collection is replaced by
    /// [`default_jobs`] only when the key is missing, unreadable, or no valid
    /// entry remains. The seed is persisted before being returned, so a
    /// follow-up load sees the same data.
    pub fn load_all(&self) -> Result<Vec<Job>, TrackerError> {
        let entries = match read_entries(&self.store, JOBS_KEY)? {
            Loaded::Items(entries) => entries,
            Loaded::Missing => {
                info!("No job collection found, seeding defaults");
                return self.reset_to_defaults();
            }
            Loaded::Malformed => {
                warn!("Job collection unreadable, reseeding defaults");
                return self.reset_to_defaults();
            }
        };

        let total = entries.len();
        let jobs = decode_valid_jobs(entries);
        if jobs.is_empty() {
            warn!("No valid jobs among {} stored entries, reseeding defaults", total);
            return self.reset_to_defaults();
        }
        if jobs.len() < total {
            warn!("Dropped {} invalid job entries", total - jobs.len());
        }
        Ok(jobs)
    }

    /// Create a job from form input and persist the grown collection.
    ///
    /// Validation failure aborts before anything is written.
    pub fn create(&self, draft: &JobDraft) -> Result<Job, TrackerError> {
        draft.validate()?;
        debug!("Creating job: title={}", draft.title);

        let mut jobs = self.load_all()?;
        let ids: Vec<i64> = jobs.iter().map(|j| j.id).collect();
        let job = Job {
            id: next_id(&ids),
            title: draft.title.clone(),
            recruiter: draft.hiring_manager.clone(),
            location: draft.location.clone(),
            date: format_short_date(draft.posted_date),
            category: draft.department.clone(),
            applicants: 0,
            status: if draft.is_active {
                JobStatus::Active
            } else {
                JobStatus::Closed
            },
            description: Some(draft.description.clone()),
            requirements: Some(draft.requirement_lines()),
        };
        jobs.push(job.clone());
        write_entries(&self.store, JOBS_KEY, &jobs)?;

        info!("Job created with id={}", job.id);
        Ok(job)
    }

    /// Overwrite the persisted collection with the seed dataset.
    ///
    /// Debugging escape hatch; not part of the normal flow.
    pub fn reset_to_defaults(&self) -> Result<Vec<Job>, TrackerError> {
        let jobs = default_jobs();
        write_entries(&self.store, JOBS_KEY, &jobs)?;
        Ok(jobs)
    }

    /// True iff some job's slugified title equals `slug`.
    ///
    /// The applicant repository uses this as its referential check before
    /// accepting a new record.
    pub fn slug_exists(&self, slug: &str) -> Result<bool, TrackerError> {
        Ok(self
            .load_all()?
            .iter()
            .any(|job| slugify(&job.title) == slug))
    }

    /// Filter a loaded collection in memory.
    ///
    /// Both predicates are ANDed: the title must contain the search term
    /// (case-insensitively) and the status must satisfy the filter.
    pub fn filter(jobs: &[Job], query: &JobQuery) -> Vec<Job> {
        let term = query.search_term.to_lowercase();
        jobs.iter()
            .filter(|job| job.title.to_lowercase().contains(&term))
            .filter(|job| query.status.matches(job.status))
            .cloned()
            .collect()
    }
}

fn decode_valid_jobs(entries: Vec<Value>) -> Vec<Job> {
    entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<Job>(entry) {
            Ok(job) if job.id != 0 && !job.title.is_empty() => Some(job),
            Ok(job) => {
                warn!("Dropping job entry with missing id or title (id={})", job.id);
                None
            }
            Err(e) => {
                warn!("Dropping undecodable job entry: {}", e);
                None
            }
        })
        .collect()
}

/// The fixed seed dataset written whenever no valid job collection exists.
pub fn default_jobs() -> Vec<Job> {
    let job = |id: i64, title: &str, recruiter: &str, location: &str, date: &str, category: &str, applicants: u32| Job {
        id,
        title: title.to_string(),
        recruiter: recruiter.to_string(),
        location: location.to_string(),
        date: date.to_string(),
        category: category.to_string(),
        applicants,
        status: JobStatus::Active,
        description: None,
        requirements: None,
    };
    vec![
        job(1, "Frontend Developer", "Jane Smith", "Remote", "Apr 1, 2024", "Engineering", 3),
        job(2, "UX Designer", "Robert Chen", "Chicago, IL", "Apr 2, 2024", "Design", 2),
        job(3, "Product Manager", "Alice Johnson", "San Francisco, CA", "Apr 5, 2024", "Product", 2),
        job(4, "Python DEV", "Mike Wilson", "Austin, TX", "Apr 7, 2024", "Engineering", 0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono::NaiveDate;

    fn repo() -> JobRepository<MemoryStore> {
        JobRepository::new(MemoryStore::new())
    }

    fn draft(title: &str) -> JobDraft {
        JobDraft {
            title: title.to_string(),
            department: "Engineering".to_string(),
            hiring_manager: "Dana Cruz".to_string(),
            location: "Remote".to_string(),
            description: "Build things".to_string(),
            requirements: "Rust\n\nTests".to_string(),
            posted_date: NaiveDate::from_ymd_opt(2024, 4, 10).unwrap(),
            is_active: true,
        }
    }

    #[test]
    fn empty_store_seeds_and_stays_stable() {
        let repo = repo();
        let first = repo.load_all().unwrap();
        assert_eq!(first.len(), 4);
        assert_eq!(first[0].title, "Frontend Developer");
        let second = repo.load_all().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn one_bad_entry_is_dropped_not_reseeded() {
        let store = MemoryStore::new();
        store
            .set(
                JOBS_KEY,
                r#"[{"id": 7, "title": "QA Analyst", "status": "Active"},
                    {"id": 8, "status": "Active"}]"#,
            )
            .unwrap();
        let jobs = JobRepository::new(store).load_all().unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].title, "QA Analyst");
    }

    #[test]
    fn all_bad_entries_trigger_reseed() {
        let store = MemoryStore::new();
        store.set(JOBS_KEY, r#"[{"id": 8}, {"title": ""}]"#).unwrap();
        let jobs = JobRepository::new(store).load_all().unwrap();
        assert_eq!(jobs.len(), 4);
    }

    #[test]
    fn garbage_payload_triggers_reseed() {
        let store = MemoryStore::new();
        store.set(JOBS_KEY, "{{{{").unwrap();
        let jobs = JobRepository::new(store.clone()).load_all().unwrap();
        assert_eq!(jobs.len(), 4);
        // The reseed was persisted in the current envelope.
        let raw = store.get(JOBS_KEY).unwrap().unwrap();
        assert!(raw.contains("\"version\""));
    }

    #[test]
    fn create_appends_and_persists() {
        let repo = repo();
        let created = repo.create(&draft("Backend Developer")).unwrap();
        assert_eq!(created.status, JobStatus::Active);
        assert_eq!(created.applicants, 0);
        assert_eq!(created.recruiter, "Dana Cruz");
        assert_eq!(created.category, "Engineering");
        assert_eq!(created.date, "Apr 10, 2024");
        assert_eq!(
            created.requirements.as_deref(),
            Some(&["Rust".to_string(), "Tests".to_string()][..])
        );

        let jobs = repo.load_all().unwrap();
        assert_eq!(jobs.len(), 5);
        assert!(jobs.iter().any(|j| j.id == created.id));
    }

    #[test]
    fn create_rejects_blank_required_fields() {
        let repo = repo();
        let mut d = draft("Backend Developer");
        d.department.clear();
        assert!(matches!(repo.create(&d), Err(TrackerError::Validation(_))));
        // Nothing was persisted by the failed create.
        assert!(repo.store.get(JOBS_KEY).unwrap().is_none());
    }

    #[test]
    fn filter_ands_search_and_status() {
        let mut jobs = default_jobs();
        jobs[1].status = JobStatus::Closed;

        let query = JobQuery {
            search_term: "dev".to_string(),
            status: StatusFilter::Active,
        };
        let hits = JobRepository::<MemoryStore>::filter(&jobs, &query);
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|j| j.title.to_lowercase().contains("dev")));

        let query = JobQuery {
            search_term: String::new(),
            status: StatusFilter::Closed,
        };
        let hits = JobRepository::<MemoryStore>::filter(&jobs, &query);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "UX Designer");
    }

    #[test]
    fn slug_exists_matches_slugified_titles() {
        let repo = repo();
        assert!(repo.slug_exists("frontend-developer").unwrap());
        assert!(repo.slug_exists("python-dev").unwrap());
        assert!(!repo.slug_exists("staff-astronaut").unwrap());
    }
}
