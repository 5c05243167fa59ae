//! Session expansion and the static ordering heuristic.
//!
//! Every (class, subject) pair becomes `hours_per_week` sessions bound to the
//! first qualified teacher in declaration order. Teacher choice is not part of
//! the search space; only the (day, slot, room) cell is.

use crate::data::{ConstraintSet, Session, SkippedSubject, SubjectIdx, TeacherIdx};
use itertools::Itertools;
use log::{debug, warn};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct Expansion {
    pub sessions: Vec<Session>,
    pub skipped: Vec<SkippedSubject>,
}

impl Expansion {
    pub fn required_hours(&self) -> usize {
        self.sessions.len()
    }
}

/// Teachers able to teach each subject name, in declaration order.
pub fn qualified_teachers(input: &ConstraintSet) -> HashMap<&str, Vec<TeacherIdx>> {
    input
        .teachers
        .iter()
        .enumerate()
        .flat_map(|(idx, t)| t.subjects.iter().map(move |s| (s.as_str(), idx)))
        .unique()
        .into_group_map()
}

/// Scarcity priority: subjects with fewer qualified teachers go first.
pub fn priority(qualified: usize) -> f64 {
    100.0 / qualified as f64
}

pub fn expand_sessions(input: &ConstraintSet) -> Expansion {
    let qualified = qualified_teachers(input);
    let mut sessions = Vec::new();
    let mut dropped: Vec<u32> = vec![0; input.subjects.len()];

    for (class_idx, class) in input.classes.iter().enumerate() {
        for (subject_idx, subject) in input.subjects.iter().enumerate() {
            if !class.takes(subject) {
                continue;
            }
            let Some(teachers) = qualified.get(subject.name.as_str()) else {
                dropped[subject_idx] += subject.hours_per_week;
                continue;
            };
            let session = Session {
                class: class_idx,
                subject: subject_idx,
                teacher: teachers[0],
                priority: priority(teachers.len()),
            };
            sessions.extend(std::iter::repeat_n(
                session,
                subject.hours_per_week as usize,
            ));
        }
    }

    let skipped = skipped_subjects(input, &dropped);
    for skip in &skipped {
        warn!("{skip}");
    }
    debug!(
        "Expanded {} classes x {} subjects into {} sessions",
        input.classes.len(),
        input.subjects.len(),
        sessions.len()
    );

    Expansion { sessions, skipped }
}

fn skipped_subjects(input: &ConstraintSet, dropped: &[u32]) -> Vec<SkippedSubject> {
    dropped
        .iter()
        .enumerate()
        .filter(|&(_, &hours)| hours > 0)
        .map(|(idx, &hours): (SubjectIdx, &u32)| SkippedSubject {
            subject: input.subjects[idx].name.clone(),
            dropped_hours: hours,
        })
        .collect()
}

/// Sorts by descending priority. The sort is stable, so ties keep the
/// (class, subject) enumeration order.
pub fn order_sessions(sessions: &mut [Session]) {
    sessions.sort_by(|a, b| b.priority.total_cmp(&a.priority));
}
