use std::collections::{HashMap, HashSet};
use types::{RoomId, TeacherId};

/// Rooms taken per (day, time). Nested by label so lookups borrow their keys.
#[derive(Clone, Debug, Default)]
pub struct OccupancyIndex {
    taken: HashMap<String, HashMap<String, HashSet<RoomId>>>,
}

impl OccupancyIndex {
    pub fn is_taken(&self, day: &str, time: &str, room: &RoomId) -> bool {
        self.taken
            .get(day)
            .and_then(|times| times.get(time))
            .is_some_and(|rooms| rooms.contains(room))
    }

    /// Returns false when the key was already taken.
    pub fn occupy(&mut self, day: &str, time: &str, room: &RoomId) -> bool {
        if self.is_taken(day, time, room) {
            return false;
        }
        self.taken
            .entry(day.to_string())
            .or_default()
            .entry(time.to_string())
            .or_default()
            .insert(room.clone())
    }

    pub fn release(&mut self, day: &str, time: &str, room: &RoomId) -> bool {
        self.taken
            .get_mut(day)
            .and_then(|times| times.get_mut(time))
            .is_some_and(|rooms| rooms.remove(room))
    }

    pub fn len(&self) -> usize {
        self.taken
            .values()
            .flat_map(HashMap::values)
            .map(HashSet::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// (day, time) pairs each teacher already teaches.
#[derive(Clone, Debug, Default)]
pub struct TeacherSchedule {
    busy: HashMap<TeacherId, HashMap<String, HashSet<String>>>,
}

impl TeacherSchedule {
    pub fn is_busy(&self, teacher: &TeacherId, day: &str, time: &str) -> bool {
        self.busy
            .get(teacher)
            .and_then(|days| days.get(day))
            .is_some_and(|times| times.contains(time))
    }

    pub fn assign(&mut self, teacher: &TeacherId, day: &str, time: &str) -> bool {
        if self.is_busy(teacher, day, time) {
            return false;
        }
        self.busy
            .entry(teacher.clone())
            .or_default()
            .entry(day.to_string())
            .or_default()
            .insert(time.to_string())
    }

    pub fn unassign(&mut self, teacher: &TeacherId, day: &str, time: &str) -> bool {
        self.busy
            .get_mut(teacher)
            .and_then(|days| days.get_mut(day))
            .is_some_and(|times| times.remove(time))
    }
}

/// A committed placement. Applying then undoing it leaves both indices
/// exactly as they were.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    pub day: String,
    pub time: String,
    pub room: RoomId,
    pub teacher: TeacherId,
}

/// Room occupancy and teacher schedule kept in lockstep.
#[derive(Clone, Debug, Default)]
pub struct ScheduleLedger {
    pub rooms: OccupancyIndex,
    pub teachers: TeacherSchedule,
}

impl ScheduleLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Room free and teacher idle.
    pub fn is_free(&self, day: &str, time: &str, room: &RoomId, teacher: &TeacherId) -> bool {
        !self.rooms.is_taken(day, time, room) && !self.teachers.is_busy(teacher, day, time)
    }

    pub fn commit(&mut self, p: &Placement) {
        self.rooms.occupy(&p.day, &p.time, &p.room);
        self.teachers.assign(&p.teacher, &p.day, &p.time);
    }

    pub fn undo(&mut self, p: &Placement) {
        self.rooms.release(&p.day, &p.time, &p.room);
        self.teachers.unassign(&p.teacher, &p.day, &p.time);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placement(day: &str, time: &str, room: &str, teacher: &str) -> Placement {
        Placement {
            day: day.into(),
            time: time.into(),
            room: room.into(),
            teacher: teacher.into(),
        }
    }

    #[test]
    fn occupancy_keys_on_day_time_and_room() {
        let mut occ = OccupancyIndex::default();
        let r1 = RoomId::from("r1");
        assert!(occ.occupy("Mon", "09:00", &r1));
        assert!(!occ.occupy("Mon", "09:00", &r1));
        assert!(occ.is_taken("Mon", "09:00", &r1));
        assert!(!occ.is_taken("Mon", "10:00", &r1));
        assert!(!occ.is_taken("Tue", "09:00", &r1));
        assert!(!occ.is_taken("Mon", "09:00", &RoomId::from("r2")));
    }

    #[test]
    fn teacher_busy_only_in_assigned_pair() {
        let mut ts = TeacherSchedule::default();
        let t = TeacherId::from("t1");
        assert!(!ts.is_busy(&t, "Mon", "09:00"));
        ts.assign(&t, "Mon", "09:00");
        assert!(ts.is_busy(&t, "Mon", "09:00"));
        assert!(!ts.is_busy(&TeacherId::from("t2"), "Mon", "09:00"));
        assert!(ts.unassign(&t, "Mon", "09:00"));
        assert!(!ts.unassign(&t, "Mon", "09:00"));
    }

    #[test]
    fn commit_then_undo_restores_state() {
        let mut ledger = ScheduleLedger::new();
        let keep = placement("Mon", "09:00", "r1", "t1");
        ledger.commit(&keep);

        let p = placement("Mon", "10:00", "r1", "t1");
        assert!(ledger.is_free(&p.day, &p.time, &p.room, &p.teacher));
        ledger.commit(&p);
        assert!(!ledger.is_free(&p.day, &p.time, &p.room, &p.teacher));
        assert!(!ledger.is_free("Mon", "10:00", &RoomId::from("r2"), &p.teacher));
        ledger.undo(&p);

        assert!(ledger.is_free(&p.day, &p.time, &p.room, &p.teacher));
        assert!(!ledger.is_free(&keep.day, &keep.time, &keep.room, &keep.teacher));
        assert_eq!(ledger.rooms.len(), 1);
    }

    #[test]
    fn release_of_unknown_key_is_a_no_op() {
        let mut occ = OccupancyIndex::default();
        let r1 = RoomId::from("r1");
        assert!(!occ.release("Mon", "09:00", &r1));
        occ.occupy("Mon", "09:00", &r1);
        occ.occupy("Mon", "10:00", &r1);
        assert!(occ.release("Mon", "09:00", &r1));
        assert!(!occ.release("Mon", "09:00", &r1));
        assert_eq!(occ.len(), 1);
        assert!(occ.release("Mon", "10:00", &r1));
        assert!(occ.is_empty());
    }
}
