use std::fmt;

use validator::ValidationErrors;

use crate::store::StoreError;

/// Crate-level errors
///
/// Nothing here is fatal to the caller: a malformed job collection degrades to
/// the seed dataset, a malformed applicant collection to an empty one, and the
/// remaining variants abort the single operation that raised them.
#[derive(Debug)]
pub enum TrackerError {
    /// Storage backend operation failed
    Storage(StoreError),

    /// Input validation failed
    Validation(String),

    /// Mutation targeted an applicant id with no matching record
    NotFound(i64),

    /// Applicant creation referenced a slug matching no job's title
    UnknownJob(String),
}

impl fmt::Display for TrackerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackerError::Storage(e) => write!(f, "Storage error: {}", e),
            TrackerError::Validation(msg) => write!(f, "Validation error: {}", msg),
            TrackerError::NotFound(id) => write!(f, "Applicant not found: {}", id),
            TrackerError::UnknownJob(slug) => write!(f, "No job matches slug: {}", slug),
        }
    }
}

impl std::error::Error for TrackerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TrackerError::Storage(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for TrackerError {
    fn from(e: StoreError) -> Self {
        TrackerError::Storage(e)
    }
}

impl From<ValidationErrors> for TrackerError {
    fn from(errors: ValidationErrors) -> Self {
        let messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Validation error in field: {}", field))
                })
            })
            .collect();
        TrackerError::Validation(messages.join("; "))
    }
}
