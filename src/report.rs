use crate::data::{Assignment, ConstraintSet, SkippedSubject, TimetableStats};
use std::collections::BTreeMap;

/// Summarises a complete timetable.
///
/// `utilization_rate` keeps the historical denominator of `days * slots`,
/// ignoring how many rooms exist, so it can exceed 100.
/// `room_utilization_rate` divides by every (day, slot, room) cell instead.
pub fn timetable_stats(
    timetable: &[Assignment],
    input: &ConstraintSet,
    skipped_subjects: Vec<SkippedSubject>,
) -> TimetableStats {
    let total = timetable.len();
    let time_cells = f64::from(input.days_per_week * input.slots_per_day);
    let room_cells = time_cells * input.rooms.len() as f64;

    let mut teacher_loads: BTreeMap<String, u32> = BTreeMap::new();
    for assignment in timetable {
        *teacher_loads.entry(assignment.teacher.clone()).or_default() += 1;
    }

    TimetableStats {
        total_assignments: total,
        utilization_rate: percentage(total, time_cells),
        room_utilization_rate: percentage(total, room_cells),
        teacher_loads,
        skipped_subjects,
    }
}

fn percentage(count: usize, cells: f64) -> f64 {
    if cells == 0.0 {
        return 0.0;
    }
    count as f64 / cells * 100.0
}
