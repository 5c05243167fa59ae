use thiserror::Error;

use crate::budget::AbortReason;

pub type SolveResult<T> = Result<T, SolveError>;

/// Why a constraint set was rejected before search.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("At least one {0} is required")]
    EmptyCollection(&'static str),
    #[error("Days per week must be between 1 and 7, got {0}")]
    DaysPerWeek(u32),
    #[error("Slots per day must be between 1 and 12, got {0}")]
    SlotsPerDay(u32),
    #[error("Hours per week for subject '{subject}' must be between 1 and 20, got {hours}")]
    HoursPerWeek { subject: String, hours: u32 },
    #[error("Capacity of room '{room}' must be between 1 and 1000, got {capacity}")]
    RoomCapacity { room: String, capacity: u32 },
    #[error("Size of class '{class}' must be between 1 and 1000, got {size}")]
    ClassSize { class: String, size: u32 },
    #[error("Invalid {kind} name '{value}': must be 1 to {max} characters")]
    InvalidName {
        kind: &'static str,
        value: String,
        max: usize,
    },
    #[error("{kind} '{value}' exceeds {max} characters")]
    TooLong {
        kind: &'static str,
        value: String,
        max: usize,
    },
    #[error("Duplicate {kind} '{value}'")]
    Duplicate { kind: &'static str, value: String },
    #[error("Class '{class}' lists unknown subject '{subject}' in its curriculum")]
    UnknownCurriculumSubject { class: String, subject: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    #[error("Invalid constraints: {0}")]
    Invalid(#[from] ValidationError),
    #[error("Unable to generate conflict-free timetable with given constraints")]
    Infeasible,
    #[error("Search aborted before feasibility was decided: {0}")]
    Aborted(AbortReason),
}

impl SolveError {
    /// Stable machine-readable tag for the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            SolveError::Invalid(_) => "invalid_input",
            SolveError::Infeasible => "infeasible",
            SolveError::Aborted(_) => "aborted",
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{var} is not a valid socket address: {source}")]
    BindAddr {
        var: &'static str,
        source: std::net::AddrParseError,
    },
    #[error("{var} is not a valid unsigned integer: {source}")]
    Number {
        var: &'static str,
        source: std::num::ParseIntError,
    },
}
