use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Pipeline stage of an applicant.
///
/// The tracked surfaces historically exposed two slightly different stage
/// lists: the intake form offered Screening and Technical, the transition
/// dropdown offered Phone Screen instead. The canonical set is the union of
/// both; [`Stage::INTAKE`] and [`Stage::PIPELINE`] expose the two original
/// lists for callers that render one surface or the other.
///
/// Transitions are free-form: any stage may be assigned from any other, there
/// is no enforced ordering.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Applied,
    Screening,
    #[serde(rename = "Phone Screen")]
    PhoneScreen,
    Interview,
    Technical,
    Offer,
    Hired,
    Rejected,
}

impl Stage {
    /// Every recognized stage.
    pub const ALL: [Stage; 8] = [
        Stage::Applied,
        Stage::Screening,
        Stage::PhoneScreen,
        Stage::Interview,
        Stage::Technical,
        Stage::Offer,
        Stage::Hired,
        Stage::Rejected,
    ];

    /// Stages offered when an applicant is first recorded.
    pub const INTAKE: [Stage; 7] = [
        Stage::Applied,
        Stage::Screening,
        Stage::Interview,
        Stage::Technical,
        Stage::Offer,
        Stage::Hired,
        Stage::Rejected,
    ];

    /// Stages offered by the stage-transition control.
    pub const PIPELINE: [Stage; 6] = [
        Stage::Applied,
        Stage::PhoneScreen,
        Stage::Interview,
        Stage::Offer,
        Stage::Hired,
        Stage::Rejected,
    ];

    /// Display name, matching the persisted serialization.
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Applied => "Applied",
            Stage::Screening => "Screening",
            Stage::PhoneScreen => "Phone Screen",
            Stage::Interview => "Interview",
            Stage::Technical => "Technical",
            Stage::Offer => "Offer",
            Stage::Hired => "Hired",
            Stage::Rejected => "Rejected",
        }
    }
}

impl Default for Stage {
    fn default() -> Self {
        Stage::Applied
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = UnknownStage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Applied" => Ok(Stage::Applied),
            "Screening" => Ok(Stage::Screening),
            "Phone Screen" => Ok(Stage::PhoneScreen),
            "Interview" => Ok(Stage::Interview),
            // The intake form labels this one "Technical Assessment".
            "Technical" | "Technical Assessment" => Ok(Stage::Technical),
            "Offer" => Ok(Stage::Offer),
            "Hired" => Ok(Stage::Hired),
            "Rejected" => Ok(Stage::Rejected),
            other => Err(UnknownStage(other.to_string())),
        }
    }
}

/// Raised when a stage name matches neither surface's list.
#[derive(Debug)]
pub struct UnknownStage(pub String);

impl fmt::Display for UnknownStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized stage: {}", self.0)
    }
}

impl std::error::Error for UnknownStage {}
