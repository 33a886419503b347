#![allow(dead_code)]

use sched_core::{Assignment, Course, Room};
use std::collections::HashSet;

pub fn course(id: &str, category: &str, teacher: &str, students: u32) -> Course {
    Course {
        id: id.into(),
        name: format!("Course {id}"),
        category: category.into(),
        teacher: teacher.into(),
        students,
        duration: 1,
        preferred_slots: vec![],
        preferred_days: vec![],
        priority: None,
    }
}

pub fn room(id: &str, capacity: u32, room_type: &str) -> Room {
    Room {
        id: id.into(),
        name: format!("Room {id}"),
        capacity,
        room_type: room_type.into(),
        equipment: vec![],
    }
}

pub fn strings(xs: &[&str]) -> Vec<String> {
    xs.iter().map(|s| s.to_string()).collect()
}

pub fn assert_no_double_booking(out: &[Assignment]) {
    let mut seen = HashSet::new();
    for a in out {
        if let Some((day, time, room)) = a.placement() {
            assert!(
                seen.insert((day.to_string(), time.to_string(), room.clone())),
                "room {room} double booked at {day} {time}"
            );
        }
    }
}

pub fn assert_no_teacher_overlap(out: &[Assignment]) {
    let mut seen = HashSet::new();
    for a in out {
        if let Some((day, time, _)) = a.placement() {
            assert!(
                seen.insert((a.teacher.clone(), day.to_string(), time.to_string())),
                "teacher {} double booked at {day} {time}",
                a.teacher
            );
        }
    }
}

pub fn assert_capacity_respected(out: &[Assignment], rooms: &[Room]) {
    for a in out {
        if let Some((_, _, room_id)) = a.placement() {
            let room = rooms.iter().find(|r| &r.id == room_id).expect("unknown room");
            assert!(
                a.students <= room.capacity,
                "{} students in room {} of capacity {}",
                a.students,
                room.id,
                room.capacity
            );
        }
    }
}
