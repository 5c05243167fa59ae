use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// Type aliases for clarity
pub type Day = u32;
pub type Slot = u32;
pub type TeacherIdx = usize;
pub type RoomIdx = usize;
pub type ClassIdx = usize;
pub type SubjectIdx = usize;

/// A teacher, the subjects they may teach and the cells they cannot take.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    #[serde(default)]
    pub id: String,
    pub name: String,
    /// Required in the wire format.
    pub subjects: Vec<String>,
    /// `[day, slot]` pairs.
    #[serde(default)]
    pub unavailable: Vec<(Day, Slot)>,
}

/// Represents a physical room with a given capacity.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Room {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub capacity: u32,
}

/// A student batch. Without a curriculum it takes every declared subject.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassGroup {
    pub id: String,
    pub name: String,
    pub size: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curriculum: Option<Vec<String>>,
}

impl ClassGroup {
    pub fn takes(&self, subject: &Subject) -> bool {
        match &self.curriculum {
            Some(names) => names.iter().any(|n| *n == subject.name),
            None => true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub hours_per_week: u32,
}

/// The complete input for the timetabling problem.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintSet {
    #[serde(default)]
    pub teachers: Vec<Teacher>,
    #[serde(default)]
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub classes: Vec<ClassGroup>,
    #[serde(default)]
    pub subjects: Vec<Subject>,
    #[serde(default)]
    pub days_per_week: u32,
    #[serde(default)]
    pub slots_per_day: u32,
}

/// One required teaching hour of one subject for one class, bound to a teacher.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub class: ClassIdx,
    pub subject: SubjectIdx,
    pub teacher: TeacherIdx,
    pub priority: f64,
}

/// A session tentatively placed in a (day, slot, room) cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    pub class: ClassIdx,
    pub subject: SubjectIdx,
    pub teacher: TeacherIdx,
    pub room: RoomIdx,
    pub day: Day,
    pub slot: Slot,
}

impl Placement {
    pub fn new(session: &Session, day: Day, slot: Slot, room: RoomIdx) -> Self {
        Self {
            class: session.class,
            subject: session.subject,
            teacher: session.teacher,
            room,
            day,
            slot,
        }
    }
}

/// Represents a single, scheduled teaching hour.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub class_id: String,
    pub subject: String,
    pub teacher: String,
    pub room: String,
    pub day: Day,
    pub slot: Slot,
}

impl Assignment {
    pub fn from_placement(placement: &Placement, input: &ConstraintSet) -> Self {
        Self {
            class_id: input.classes[placement.class].id.clone(),
            subject: input.subjects[placement.subject].name.clone(),
            teacher: input.teachers[placement.teacher].name.clone(),
            room: input.rooms[placement.room].name.clone(),
            day: placement.day,
            slot: placement.slot,
        }
    }
}

/// A subject dropped from the timetable because nobody can teach it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedSubject {
    pub subject: String,
    pub dropped_hours: u32,
}

impl fmt::Display for SkippedSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[No Qualified Teacher] {} ({} hours not scheduled)",
            self.subject, self.dropped_hours
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableStats {
    pub total_assignments: usize,
    /// Assignments over `days * slots`; exceeds 100 with several rooms.
    pub utilization_rate: f64,
    /// Assignments over `days * slots * rooms`.
    pub room_utilization_rate: f64,
    pub teacher_loads: BTreeMap<String, u32>,
    pub skipped_subjects: Vec<SkippedSubject>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchStatistics {
    pub candidates_evaluated: u64,
    pub placements: u64,
    pub backtracks: u64,
    pub max_depth: usize,
}

/// The final output of the solver.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableOutput {
    pub timetable: Vec<Assignment>,
    /// Wall time in seconds, for observability only.
    pub generation_time: f64,
    pub stats: TimetableStats,
    pub search: SearchStatistics,
}
