use crate::budget::{SearchBudget, SolverConfig};
use crate::data::{Assignment, ConstraintSet, TimetableOutput};
use crate::error::{SolveError, SolveResult};
use crate::report::timetable_stats;
use crate::search::{SearchEngine, SearchOutcome};
use crate::sessions::{expand_sessions, order_sessions};
use crate::validate::validate;
use log::{info, warn};
use std::sync::atomic::AtomicBool;
use std::time::Instant;

/// Validates the constraint set and searches for a conflict-free timetable.
pub fn solve(input: &ConstraintSet, config: &SolverConfig) -> SolveResult<TimetableOutput> {
    solve_inner(input, config, None)
}

/// Like [`solve`], but aborts with [`AbortReason::Interrupted`] as soon as
/// `stop` is set.
///
/// [`AbortReason::Interrupted`]: crate::budget::AbortReason::Interrupted
pub fn solve_with_interrupt(
    input: &ConstraintSet,
    config: &SolverConfig,
    stop: &AtomicBool,
) -> SolveResult<TimetableOutput> {
    solve_inner(input, config, Some(stop))
}

fn solve_inner(
    input: &ConstraintSet,
    config: &SolverConfig,
    stop: Option<&AtomicBool>,
) -> SolveResult<TimetableOutput> {
    validate(input)?;

    let start_time = Instant::now();
    info!(
        "Received constraints: {} teachers, {} rooms, {} classes, {} subjects, {}x{} grid",
        input.teachers.len(),
        input.rooms.len(),
        input.classes.len(),
        input.subjects.len(),
        input.days_per_week,
        input.slots_per_day
    );

    let mut expansion = expand_sessions(input);
    order_sessions(&mut expansion.sessions);
    info!(
        "Starting backtracking search for {} sessions...",
        expansion.sessions.len()
    );

    let mut engine = SearchEngine::new(input, &expansion.sessions);
    let mut budget = SearchBudget::new(*config, stop);
    let outcome = engine.run(&mut budget);
    let search = engine.statistics();
    let duration = start_time.elapsed();

    let placements = match outcome {
        SearchOutcome::Solved(placements) => placements,
        SearchOutcome::Infeasible => {
            info!(
                "Search exhausted after {} candidates in {:.2?}: infeasible",
                search.candidates_evaluated, duration
            );
            return Err(SolveError::Infeasible);
        }
        SearchOutcome::Aborted(reason) => {
            warn!(
                "Search aborted after {} candidates in {:.2?}: {}",
                search.candidates_evaluated, duration, reason
            );
            return Err(SolveError::Aborted(reason));
        }
    };

    let timetable: Vec<Assignment> = placements
        .iter()
        .map(|p| Assignment::from_placement(p, input))
        .collect();
    info!(
        "Successfully generated timetable with {} assignments in {:.2?} ({} backtracks)",
        timetable.len(),
        duration,
        search.backtracks
    );

    let stats = timetable_stats(&timetable, input, expansion.skipped);
    Ok(TimetableOutput {
        timetable,
        generation_time: duration.as_secs_f64(),
        stats,
        search,
    })
}
