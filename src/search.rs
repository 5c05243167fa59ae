//! Depth-first backtracking over the ordered session list.
//!
//! The search state is the committed set plus, for each committed placement,
//! the cursor of the next cell to try if that placement is undone. This is the
//! recursion of the classic formulation unrolled onto an explicit stack: a
//! successful placement descends one level, exhausting every cell of a session
//! pops the previous placement and resumes its enumeration. The first complete
//! assignment found is returned; no attempt is made to improve on it.

use crate::budget::{AbortReason, SearchBudget};
use crate::data::{ConstraintSet, Placement, SearchStatistics, Session};
use crate::oracle::{CommittedSet, Grid, ValidityOracle};
use log::trace;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// One placement per session, in session order.
    Solved(Vec<Placement>),
    /// The whole tree was exhausted.
    Infeasible,
    /// A budget tripped before the tree was exhausted.
    Aborted(AbortReason),
}

#[derive(Debug)]
pub struct SearchEngine<'a> {
    input: &'a ConstraintSet,
    sessions: &'a [Session],
    oracle: ValidityOracle<'a>,
    grid: Grid,
    stats: SearchStatistics,
}

impl<'a> SearchEngine<'a> {
    pub fn new(input: &'a ConstraintSet, sessions: &'a [Session]) -> Self {
        Self {
            input,
            sessions,
            oracle: ValidityOracle::new(input),
            grid: Grid::of(input),
            stats: SearchStatistics::default(),
        }
    }

    pub fn statistics(&self) -> SearchStatistics {
        self.stats
    }

    pub fn run(&mut self, budget: &mut SearchBudget<'_>) -> SearchOutcome {
        let cell_count = self.grid.cell_count();
        let mut committed = CommittedSet::new(self.input);
        // resume[i] is the next cell to try for session i once its current
        // placement is undone.
        let mut resume: Vec<usize> = Vec::with_capacity(self.sessions.len());
        let mut cursor = 0;

        loop {
            let depth = committed.len();
            if depth == self.sessions.len() {
                return SearchOutcome::Solved(committed.into_placements());
            }
            let session = &self.sessions[depth];

            let mut placed = false;
            while cursor < cell_count {
                if let Some(reason) = budget.step() {
                    return SearchOutcome::Aborted(reason);
                }
                let (day, slot, room) = self.grid.cell(cursor);
                cursor += 1;
                self.stats.candidates_evaluated += 1;

                let candidate = Placement::new(session, day, slot, room);
                if self.oracle.is_valid(&candidate, &committed) {
                    committed.push(candidate);
                    resume.push(cursor);
                    self.stats.placements += 1;
                    self.stats.max_depth = self.stats.max_depth.max(committed.len());
                    placed = true;
                    break;
                }
            }

            if placed {
                cursor = 0;
                continue;
            }

            // Dead end: undo the previous placement and carry on after it.
            match (committed.pop(), resume.pop()) {
                (Some(undone), Some(next)) => {
                    trace!("Backtracking at depth {depth}, undoing {undone:?}");
                    self.stats.backtracks += 1;
                    cursor = next;
                }
                _ => return SearchOutcome::Infeasible,
            }
        }
    }
}
