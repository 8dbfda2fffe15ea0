use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Teaching days, in scan order for the generator.
pub const SCHOOL_DAYS: [Weekday; 5] = [
    Weekday::Monday,
    Weekday::Tuesday,
    Weekday::Wednesday,
    Weekday::Thursday,
    Weekday::Friday,
];

/// Period start times, in scan order. 13:00 is the lunch break.
pub const PERIOD_START_TIMES: [&str; 7] =
    ["9:00", "10:00", "11:00", "12:00", "14:00", "15:00", "16:00"];

pub const ROOM_MIN: i32 = 101;
pub const ROOM_MAX: i32 = 110;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub credits: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Teacher {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// Subject ids this teacher can cover.
    pub subjects: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchoolClass {
    pub id: Uuid,
    pub name: String,
    pub year: i32,
    pub division: String,
    /// Subject ids on this class's curriculum.
    pub subjects: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSlot {
    pub id: Uuid,
    pub day: Weekday,
    pub start_time: String,
    pub end_time: String,
    pub subject_id: Uuid,
    pub teacher_id: Uuid,
    pub class_id: Uuid,
    pub room: String,
}

impl TimeSlot {
    /// Builds a slot on the fixed one-hour grid; the end time is derived
    /// from the start time.
    pub fn new(
        day: Weekday,
        start_time: &str,
        subject_id: Uuid,
        teacher_id: Uuid,
        class_id: Uuid,
        room: String,
    ) -> Result<Self> {
        Ok(Self {
            id: Uuid::new_v4(),
            day,
            start_time: start_time.to_string(),
            end_time: slot_end_time(start_time)?,
            subject_id,
            teacher_id,
            class_id,
            room,
        })
    }

    /// Two slots occupy the same grid cell when day and start time match.
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.day == other.day && self.start_time == other.start_time
    }
}

/// All slots last one hour: "9:00" ends at "10:00", "12:30" at "13:30".
pub fn slot_end_time(start_time: &str) -> Result<String> {
    let (hour, minutes) = start_time
        .split_once(':')
        .ok_or_else(|| Error::BadRequest(format!("Invalid start time: {}", start_time)))?;
    let hour: i32 = hour
        .parse()
        .map_err(|_| Error::BadRequest(format!("Invalid start time: {}", start_time)))?;
    if !(0..=22).contains(&hour) || minutes.len() != 2 || minutes.parse::<u32>().map_or(true, |m| m > 59) {
        return Err(Error::BadRequest(format!("Invalid start time: {}", start_time)));
    }
    Ok(format!("{}:{}", hour + 1, minutes))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timetable {
    pub id: Uuid,
    pub name: String,
    pub semester: String,
    pub year: i32,
    pub slots: Vec<TimeSlot>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    Teacher,
    Class,
    Room,
}

/// A detected double-booking. Conflicts are derived from the slot list on
/// every change and never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conflict {
    pub kind: ConflictKind,
    pub message: String,
    pub slots: [TimeSlot; 2],
}
