use crate::models::timetable::{Conflict, ConflictKind, TimeSlot};

pub struct ConflictService;

impl ConflictService {
    /// Pairwise scan for double-bookings. Two slots collide when they sit
    /// in the same (day, start time) cell; a colliding pair can yield a
    /// teacher, a class and a room conflict at once. Each unordered pair is
    /// reported once. The list is recomputed wholesale on every change,
    /// nothing is cached.
    pub fn detect_conflicts(slots: &[TimeSlot]) -> Vec<Conflict> {
        let mut conflicts = Vec::new();

        for (i, first) in slots.iter().enumerate() {
            for second in &slots[i + 1..] {
                if !first.overlaps(second) {
                    continue;
                }
                if first.teacher_id == second.teacher_id {
                    conflicts.push(Conflict {
                        kind: ConflictKind::Teacher,
                        message: "Teacher scheduled for multiple classes at the same time"
                            .to_string(),
                        slots: [first.clone(), second.clone()],
                    });
                }
                if first.class_id == second.class_id {
                    conflicts.push(Conflict {
                        kind: ConflictKind::Class,
                        message: "Class scheduled for multiple subjects at the same time"
                            .to_string(),
                        slots: [first.clone(), second.clone()],
                    });
                }
                if first.room == second.room {
                    conflicts.push(Conflict {
                        kind: ConflictKind::Room,
                        message: "Room double-booked at the same time".to_string(),
                        slots: [first.clone(), second.clone()],
                    });
                }
            }
        }

        conflicts
    }
}
