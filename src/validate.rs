use crate::data::ConstraintSet;
use crate::error::ValidationError;
use std::collections::HashSet;

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_DAYS_PER_WEEK: u32 = 7;
pub const MAX_SLOTS_PER_DAY: u32 = 12;
pub const MAX_HOURS_PER_WEEK: u32 = 20;
pub const MAX_HEADCOUNT: u32 = 1000;

/// Structural checks on a constraint set. Runs before any search.
pub fn validate(input: &ConstraintSet) -> Result<(), ValidationError> {
    if input.teachers.is_empty() {
        return Err(ValidationError::EmptyCollection("teacher"));
    }
    if input.subjects.is_empty() {
        return Err(ValidationError::EmptyCollection("subject"));
    }
    if input.rooms.is_empty() {
        return Err(ValidationError::EmptyCollection("room"));
    }
    if input.classes.is_empty() {
        return Err(ValidationError::EmptyCollection("class"));
    }

    if !(1..=MAX_DAYS_PER_WEEK).contains(&input.days_per_week) {
        return Err(ValidationError::DaysPerWeek(input.days_per_week));
    }
    if !(1..=MAX_SLOTS_PER_DAY).contains(&input.slots_per_day) {
        return Err(ValidationError::SlotsPerDay(input.slots_per_day));
    }

    let mut teacher_names = HashSet::new();
    for teacher in &input.teachers {
        check_name("teacher", &teacher.name)?;
        check_len("teacher id", &teacher.id)?;
        for subject in &teacher.subjects {
            check_len("teacher subject", subject)?;
        }
        unique(&mut teacher_names, "teacher name", &teacher.name)?;
    }

    let mut subject_names = HashSet::new();
    for subject in &input.subjects {
        check_name("subject", &subject.name)?;
        check_len("subject id", &subject.id)?;
        if !(1..=MAX_HOURS_PER_WEEK).contains(&subject.hours_per_week) {
            return Err(ValidationError::HoursPerWeek {
                subject: subject.name.clone(),
                hours: subject.hours_per_week,
            });
        }
        unique(&mut subject_names, "subject name", &subject.name)?;
    }

    let mut room_names = HashSet::new();
    for room in &input.rooms {
        check_name("room", &room.name)?;
        check_len("room id", &room.id)?;
        if !(1..=MAX_HEADCOUNT).contains(&room.capacity) {
            return Err(ValidationError::RoomCapacity {
                room: room.name.clone(),
                capacity: room.capacity,
            });
        }
        unique(&mut room_names, "room name", &room.name)?;
    }

    let mut class_ids = HashSet::new();
    for class in &input.classes {
        check_name("class", &class.name)?;
        check_len("class id", &class.id)?;
        if !(1..=MAX_HEADCOUNT).contains(&class.size) {
            return Err(ValidationError::ClassSize {
                class: class.name.clone(),
                size: class.size,
            });
        }
        unique(&mut class_ids, "class id", &class.id)?;
        for subject in class.curriculum.iter().flatten() {
            if !subject_names.contains(subject.as_str()) {
                return Err(ValidationError::UnknownCurriculumSubject {
                    class: class.name.clone(),
                    subject: subject.clone(),
                });
            }
        }
    }

    Ok(())
}

fn check_name(kind: &'static str, value: &str) -> Result<(), ValidationError> {
    let len = text_len(value);
    if len == 0 || len > MAX_NAME_LEN {
        return Err(ValidationError::InvalidName {
            kind,
            value: value.to_string(),
            max: MAX_NAME_LEN,
        });
    }
    Ok(())
}

fn check_len(kind: &'static str, value: &str) -> Result<(), ValidationError> {
    if text_len(value) > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            kind,
            value: value.to_string(),
            max: MAX_NAME_LEN,
        });
    }
    Ok(())
}

/// Length in UTF-16 code units, the unit upstream clients count in.
fn text_len(value: &str) -> usize {
    value.encode_utf16().count()
}

fn unique<'a>(
    seen: &mut HashSet<&'a str>,
    kind: &'static str,
    value: &'a str,
) -> Result<(), ValidationError> {
    if !seen.insert(value) {
        return Err(ValidationError::Duplicate {
            kind,
            value: value.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{ClassGroup, Room, Subject, Teacher};

    fn valid() -> ConstraintSet {
        ConstraintSet {
            teachers: vec![Teacher {
                id: "t1".into(),
                name: "Dr. Smith".into(),
                subjects: vec!["Math".into()],
                unavailable: vec![],
            }],
            rooms: vec![Room {
                id: "r1".into(),
                name: "Room 101".into(),
                capacity: 40,
            }],
            classes: vec![ClassGroup {
                id: "c1".into(),
                name: "Class A".into(),
                size: 35,
                curriculum: None,
            }],
            subjects: vec![Subject {
                id: "s1".into(),
                name: "Math".into(),
                hours_per_week: 3,
            }],
            days_per_week: 5,
            slots_per_day: 6,
        }
    }

    #[test]
    fn accepts_well_formed_input() {
        assert_eq!(validate(&valid()), Ok(()));
    }

    #[test]
    fn rejects_empty_collections_in_order() {
        let mut input = valid();
        input.teachers.clear();
        input.rooms.clear();
        assert_eq!(
            validate(&input),
            Err(ValidationError::EmptyCollection("teacher"))
        );

        let mut input = valid();
        input.classes.clear();
        assert_eq!(
            validate(&input),
            Err(ValidationError::EmptyCollection("class"))
        );
    }

    #[test]
    fn rejects_grid_out_of_range() {
        let mut input = valid();
        input.days_per_week = 8;
        assert_eq!(validate(&input), Err(ValidationError::DaysPerWeek(8)));

        let mut input = valid();
        input.slots_per_day = 0;
        assert_eq!(validate(&input), Err(ValidationError::SlotsPerDay(0)));
    }

    #[test]
    fn rejects_numeric_fields_out_of_range() {
        let mut input = valid();
        input.subjects[0].hours_per_week = 21;
        assert!(matches!(
            validate(&input),
            Err(ValidationError::HoursPerWeek { hours: 21, .. })
        ));

        let mut input = valid();
        input.rooms[0].capacity = 0;
        assert!(matches!(
            validate(&input),
            Err(ValidationError::RoomCapacity { capacity: 0, .. })
        ));

        let mut input = valid();
        input.classes[0].size = 1001;
        assert!(matches!(
            validate(&input),
            Err(ValidationError::ClassSize { size: 1001, .. })
        ));
    }

    #[test]
    fn rejects_bad_names() {
        let mut input = valid();
        input.teachers[0].name = String::new();
        assert!(matches!(
            validate(&input),
            Err(ValidationError::InvalidName { kind: "teacher", .. })
        ));

        let mut input = valid();
        input.rooms[0].name = "x".repeat(101);
        assert!(matches!(
            validate(&input),
            Err(ValidationError::InvalidName { kind: "room", .. })
        ));

        let mut input = valid();
        input.teachers[0].subjects.push("y".repeat(101));
        assert!(matches!(
            validate(&input),
            Err(ValidationError::TooLong {
                kind: "teacher subject",
                ..
            })
        ));
    }

    #[test]
    fn name_length_counts_utf16_units() {
        let mut input = valid();
        // 50 astral-plane characters are 100 UTF-16 units
        input.subjects[0].name = "\u{1D4DC}".repeat(50);
        input.teachers[0].subjects = vec![input.subjects[0].name.clone()];
        assert_eq!(validate(&input), Ok(()));

        input.subjects[0].name.push('x');
        assert!(matches!(
            validate(&input),
            Err(ValidationError::InvalidName { kind: "subject", .. })
        ));
    }

    #[test]
    fn rejects_duplicate_keys() {
        let mut input = valid();
        let twin = input.classes[0].clone();
        input.classes.push(twin);
        assert_eq!(
            validate(&input),
            Err(ValidationError::Duplicate {
                kind: "class id",
                value: "c1".into()
            })
        );
    }

    #[test]
    fn rejects_unknown_curriculum_subject() {
        let mut input = valid();
        input.classes[0].curriculum = Some(vec!["Latin".into()]);
        assert_eq!(
            validate(&input),
            Err(ValidationError::UnknownCurriculumSubject {
                class: "Class A".into(),
                subject: "Latin".into()
            })
        );
    }
}
