use crate::data::{ConstraintSet, Day, Placement, RoomIdx, Slot};
use std::collections::HashSet;

/// Shape of the candidate space: `days * slots * rooms` cells, enumerated
/// day-major, then slot, then room in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub days: u32,
    pub slots: u32,
    pub rooms: usize,
}

impl Grid {
    pub fn of(input: &ConstraintSet) -> Self {
        Self {
            days: input.days_per_week,
            slots: input.slots_per_day,
            rooms: input.rooms.len(),
        }
    }

    pub fn time_cells(&self) -> usize {
        (self.days * self.slots) as usize
    }

    pub fn cell_count(&self) -> usize {
        self.time_cells() * self.rooms
    }

    /// Decodes the cursor-th candidate cell.
    pub fn cell(&self, cursor: usize) -> (Day, Slot, RoomIdx) {
        let room = cursor % self.rooms;
        let time = cursor / self.rooms;
        let day = time / self.slots as usize;
        let slot = time % self.slots as usize;
        (day as Day, slot as Slot, room)
    }

    fn time_index(&self, day: Day, slot: Slot) -> usize {
        (day * self.slots + slot) as usize
    }
}

/// Occupancy of one resource kind per (day, slot).
#[derive(Debug, Clone)]
struct Occupancy {
    width: usize,
    busy: Vec<bool>,
}

impl Occupancy {
    fn new(time_cells: usize, width: usize) -> Self {
        Self {
            width,
            busy: vec![false; time_cells * width],
        }
    }

    fn is_busy(&self, time: usize, who: usize) -> bool {
        self.busy[time * self.width + who]
    }

    fn set(&mut self, time: usize, who: usize, value: bool) {
        self.busy[time * self.width + who] = value;
    }
}

/// The placements fixed along the current search path.
///
/// Grows and shrinks strictly last-in-first-out. Alongside the ordered list it
/// keeps per-(day, slot) occupancy of teachers, rooms and classes, so that a
/// conflict lookup is O(1) instead of a scan over every placement.
#[derive(Debug, Clone)]
pub struct CommittedSet {
    grid: Grid,
    placements: Vec<Placement>,
    teachers: Occupancy,
    rooms: Occupancy,
    classes: Occupancy,
}

impl CommittedSet {
    pub fn new(input: &ConstraintSet) -> Self {
        let grid = Grid::of(input);
        let time_cells = grid.time_cells();
        Self {
            grid,
            placements: Vec::new(),
            teachers: Occupancy::new(time_cells, input.teachers.len()),
            rooms: Occupancy::new(time_cells, input.rooms.len()),
            classes: Occupancy::new(time_cells, input.classes.len()),
        }
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn into_placements(self) -> Vec<Placement> {
        self.placements
    }

    /// True when some committed placement shares the candidate's (day, slot)
    /// and its teacher, room or class.
    pub fn clashes_with(&self, candidate: &Placement) -> bool {
        let time = self.grid.time_index(candidate.day, candidate.slot);
        self.teachers.is_busy(time, candidate.teacher)
            || self.rooms.is_busy(time, candidate.room)
            || self.classes.is_busy(time, candidate.class)
    }

    pub fn push(&mut self, placement: Placement) {
        self.mark(&placement, true);
        self.placements.push(placement);
    }

    pub fn pop(&mut self) -> Option<Placement> {
        let placement = self.placements.pop()?;
        self.mark(&placement, false);
        Some(placement)
    }

    fn mark(&mut self, placement: &Placement, value: bool) {
        let time = self.grid.time_index(placement.day, placement.slot);
        self.teachers.set(time, placement.teacher, value);
        self.rooms.set(time, placement.room, value);
        self.classes.set(time, placement.class, value);
    }
}

/// Decides whether a candidate placement may join the committed set.
/// Pure: no state changes, same answer for the same arguments.
#[derive(Debug)]
pub struct ValidityOracle<'a> {
    input: &'a ConstraintSet,
    unavailable: Vec<HashSet<(Day, Slot)>>,
}

impl<'a> ValidityOracle<'a> {
    pub fn new(input: &'a ConstraintSet) -> Self {
        let unavailable = input
            .teachers
            .iter()
            .map(|t| t.unavailable.iter().copied().collect())
            .collect();
        Self { input, unavailable }
    }

    pub fn is_valid(&self, candidate: &Placement, committed: &CommittedSet) -> bool {
        let room = &self.input.rooms[candidate.room];
        let class = &self.input.classes[candidate.class];
        if room.capacity < class.size {
            return false;
        }

        if self.unavailable[candidate.teacher].contains(&(candidate.day, candidate.slot)) {
            return false;
        }

        !committed.clashes_with(candidate)
    }
}
