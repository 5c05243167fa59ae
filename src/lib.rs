//! Conflict-free school timetables by backtracking search.
//!
//! A [`ConstraintSet`] is validated, expanded into one session per required
//! teaching hour, ordered most-constrained first and then placed cell by cell
//! into the (day, slot, room) grid. [`solve`] returns the timetable with its
//! statistics, or tells apart invalid input, proven infeasibility and an
//! aborted search.

pub mod budget;
pub mod config;
pub mod data;
pub mod error;
pub mod oracle;
pub mod report;
pub mod search;
pub mod server;
pub mod sessions;
pub mod solver;
pub mod validate;

pub use budget::{AbortReason, SolverConfig};
pub use data::{Assignment, ClassGroup, ConstraintSet, Room, Subject, Teacher, TimetableOutput};
pub use error::{SolveError, ValidationError};
pub use solver::{solve, solve_with_interrupt};
