use quizmaster_backend::models::timetable::{
    slot_end_time, ConflictKind, SchoolClass, Teacher, TimeSlot, Weekday, ROOM_MAX, ROOM_MIN,
};
use quizmaster_backend::services::conflict_service::ConflictService;
use quizmaster_backend::services::timetable_service::TimetableService;
use rand::rngs::StdRng;
use rand::SeedableRng;
use uuid::Uuid;

fn slot(day: Weekday, time: &str, teacher: Uuid, class: Uuid, room: &str) -> TimeSlot {
    TimeSlot::new(day, time, Uuid::new_v4(), teacher, class, room.to_string()).unwrap()
}

fn teacher(name: &str, subjects: Vec<Uuid>) -> Teacher {
    Teacher {
        id: Uuid::new_v4(),
        name: name.to_string(),
        email: format!("{}@school.test", name.to_lowercase().replace(' ', ".")),
        subjects,
    }
}

fn class(name: &str, subjects: Vec<Uuid>) -> SchoolClass {
    SchoolClass {
        id: Uuid::new_v4(),
        name: name.to_string(),
        year: 2026,
        division: "A".to_string(),
        subjects,
    }
}

#[test]
fn same_cell_same_teacher_is_a_teacher_conflict() {
    let teacher_id = Uuid::new_v4();
    let slots = vec![
        slot(Weekday::Monday, "9:00", teacher_id, Uuid::new_v4(), "101"),
        slot(Weekday::Monday, "9:00", teacher_id, Uuid::new_v4(), "102"),
    ];

    let conflicts = ConflictService::detect_conflicts(&slots);
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].kind, ConflictKind::Teacher);
    assert_eq!(
        conflicts[0].message,
        "Teacher scheduled for multiple classes at the same time"
    );
    assert_eq!(conflicts[0].slots[0].id, slots[0].id);
    assert_eq!(conflicts[0].slots[1].id, slots[1].id);
}

#[test]
fn same_cell_same_class_is_a_class_conflict() {
    let class_id = Uuid::new_v4();
    let slots = vec![
        slot(Weekday::Tuesday, "10:00", Uuid::new_v4(), class_id, "101"),
        slot(Weekday::Tuesday, "10:00", Uuid::new_v4(), class_id, "102"),
    ];

    let conflicts = ConflictService::detect_conflicts(&slots);
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].kind, ConflictKind::Class);
    assert_eq!(
        conflicts[0].message,
        "Class scheduled for multiple subjects at the same time"
    );
}

#[test]
fn same_cell_same_room_is_a_room_conflict() {
    let slots = vec![
        slot(Weekday::Friday, "14:00", Uuid::new_v4(), Uuid::new_v4(), "105"),
        slot(Weekday::Friday, "14:00", Uuid::new_v4(), Uuid::new_v4(), "105"),
    ];

    let conflicts = ConflictService::detect_conflicts(&slots);
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].kind, ConflictKind::Room);
    assert_eq!(conflicts[0].message, "Room double-booked at the same time");
}

#[test]
fn one_pair_can_carry_all_three_conflict_kinds() {
    let teacher_id = Uuid::new_v4();
    let class_id = Uuid::new_v4();
    let slots = vec![
        slot(Weekday::Monday, "11:00", teacher_id, class_id, "103"),
        slot(Weekday::Monday, "11:00", teacher_id, class_id, "103"),
    ];

    let conflicts = ConflictService::detect_conflicts(&slots);
    assert_eq!(conflicts.len(), 3);
    let kinds: Vec<ConflictKind> = conflicts.iter().map(|c| c.kind).collect();
    assert!(kinds.contains(&ConflictKind::Teacher));
    assert!(kinds.contains(&ConflictKind::Class));
    assert!(kinds.contains(&ConflictKind::Room));
}

#[test]
fn different_cells_never_conflict() {
    let teacher_id = Uuid::new_v4();
    let class_id = Uuid::new_v4();
    let slots = vec![
        // Same everything, but spread over the grid.
        slot(Weekday::Monday, "9:00", teacher_id, class_id, "101"),
        slot(Weekday::Monday, "10:00", teacher_id, class_id, "101"),
        slot(Weekday::Tuesday, "9:00", teacher_id, class_id, "101"),
    ];

    assert!(ConflictService::detect_conflicts(&slots).is_empty());
}

#[test]
fn three_way_collisions_report_every_pair() {
    let teacher_id = Uuid::new_v4();
    let slots = vec![
        slot(Weekday::Wednesday, "12:00", teacher_id, Uuid::new_v4(), "101"),
        slot(Weekday::Wednesday, "12:00", teacher_id, Uuid::new_v4(), "102"),
        slot(Weekday::Wednesday, "12:00", teacher_id, Uuid::new_v4(), "103"),
    ];

    let conflicts = ConflictService::detect_conflicts(&slots);
    assert_eq!(conflicts.len(), 3);
    assert!(conflicts.iter().all(|c| c.kind == ConflictKind::Teacher));
}

#[test]
fn empty_slot_lists_are_conflict_free() {
    assert!(ConflictService::detect_conflicts(&[]).is_empty());
}

#[test]
fn generator_places_a_single_lesson_in_the_first_cell() {
    let math = Uuid::new_v4();
    let teachers = vec![teacher("Alice Brown", vec![math])];
    let classes = vec![class("9A", vec![math])];
    let mut rng = StdRng::seed_from_u64(7);

    let slots = TimetableService::generate_slots(&teachers, &classes, &mut rng).unwrap();
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].day, Weekday::Monday);
    assert_eq!(slots[0].start_time, "9:00");
    assert_eq!(slots[0].end_time, "10:00");
    assert_eq!(slots[0].subject_id, math);
    assert_eq!(slots[0].teacher_id, teachers[0].id);
    assert_eq!(slots[0].class_id, classes[0].id);
    let room: i32 = slots[0].room.parse().unwrap();
    assert!((ROOM_MIN..=ROOM_MAX).contains(&room));
}

#[test]
fn generator_skips_subjects_nobody_teaches() {
    let math = Uuid::new_v4();
    let art = Uuid::new_v4();
    let teachers = vec![teacher("Alice Brown", vec![math])];
    let classes = vec![class("9A", vec![art])];
    let mut rng = StdRng::seed_from_u64(7);

    let slots = TimetableService::generate_slots(&teachers, &classes, &mut rng).unwrap();
    assert!(slots.is_empty());
}

#[test]
fn generator_moves_a_busy_teacher_to_the_next_period() {
    let math = Uuid::new_v4();
    let teachers = vec![teacher("Alice Brown", vec![math])];
    let classes = vec![class("9A", vec![math]), class("10B", vec![math])];
    let mut rng = StdRng::seed_from_u64(7);

    let slots = TimetableService::generate_slots(&teachers, &classes, &mut rng).unwrap();
    assert_eq!(slots.len(), 2);
    assert_eq!(slots[0].start_time, "9:00");
    assert_eq!(slots[1].day, Weekday::Monday);
    assert_eq!(slots[1].start_time, "10:00");
    assert!(ConflictService::detect_conflicts(&slots).is_empty());
}

#[test]
fn generator_spreads_one_class_across_periods() {
    let math = Uuid::new_v4();
    let physics = Uuid::new_v4();
    let teachers = vec![teacher("Alice Brown", vec![math]), teacher("Bob Gray", vec![physics])];
    let classes = vec![class("9A", vec![math, physics])];
    let mut rng = StdRng::seed_from_u64(7);

    let slots = TimetableService::generate_slots(&teachers, &classes, &mut rng).unwrap();
    assert_eq!(slots.len(), 2);
    // Both teachers are free at Monday 9:00, but the class is not.
    assert_eq!(slots[0].start_time, "9:00");
    assert_eq!(slots[1].start_time, "10:00");
}

#[test]
fn generated_schedules_carry_no_teacher_or_class_conflicts() {
    let subjects: Vec<Uuid> = (0..4).map(|_| Uuid::new_v4()).collect();
    let teachers = vec![
        teacher("Alice Brown", vec![subjects[0], subjects[1]]),
        teacher("Bob Gray", vec![subjects[2], subjects[3]]),
    ];
    let classes = vec![
        class("9A", subjects.clone()),
        class("10B", subjects.clone()),
        class("11C", subjects.clone()),
    ];
    let mut rng = StdRng::seed_from_u64(42);

    let slots = TimetableService::generate_slots(&teachers, &classes, &mut rng).unwrap();
    assert_eq!(slots.len(), 12);
    let conflicts = ConflictService::detect_conflicts(&slots);
    // Rooms are random so a room clash is possible, but the placement rules
    // rule out teacher and class double-bookings.
    assert!(conflicts
        .iter()
        .all(|c| c.kind == ConflictKind::Room));
    for s in &slots {
        assert_eq!(s.end_time, slot_end_time(&s.start_time).unwrap());
    }
}

#[test]
fn end_times_sit_one_hour_after_start_times() {
    assert_eq!(slot_end_time("9:00").unwrap(), "10:00");
    assert_eq!(slot_end_time("12:30").unwrap(), "13:30");
    assert_eq!(slot_end_time("16:00").unwrap(), "17:00");
}

#[test]
fn malformed_start_times_are_rejected() {
    for bad in ["", "9", "9:0", "9:000", "23:00", "-1:00", "9:61", "abc:00", "9:xy"] {
        assert!(slot_end_time(bad).is_err(), "expected {:?} to be rejected", bad);
    }
}
