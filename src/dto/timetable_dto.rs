use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::Result;
use crate::models::timetable::{Conflict, TimeSlot, Timetable, Weekday};

/// A slot as submitted by the client. The end time is never accepted from
/// the wire; it is always derived from the start time on the hour grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotPayload {
    pub id: Option<uuid::Uuid>,
    pub day: Weekday,
    pub start_time: String,
    pub subject_id: uuid::Uuid,
    pub teacher_id: uuid::Uuid,
    pub class_id: uuid::Uuid,
    pub room: String,
}

impl SlotPayload {
    pub fn into_slot(self) -> Result<TimeSlot> {
        let mut slot = TimeSlot::new(
            self.day,
            &self.start_time,
            self.subject_id,
            self.teacher_id,
            self.class_id,
            self.room,
        )?;
        if let Some(id) = self.id {
            slot.id = id;
        }
        Ok(slot)
    }
}

pub fn into_slots(payloads: Vec<SlotPayload>) -> Result<Vec<TimeSlot>> {
    payloads.into_iter().map(SlotPayload::into_slot).collect()
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTimetablePayload {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub semester: String,
    #[validate(range(min = 2000, max = 2100))]
    pub year: i32,
    #[serde(default)]
    pub slots: Vec<SlotPayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateSlotsPayload {
    pub slots: Vec<SlotPayload>,
}

/// Stateless conflict check over a proposed slot list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckRequest {
    pub slots: Vec<SlotPayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResponse {
    pub conflicts: Vec<Conflict>,
}

/// A stored timetable together with its freshly computed conflicts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimetableView {
    pub timetable: Timetable,
    pub conflicts: Vec<Conflict>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub slots: Vec<TimeSlot>,
    pub conflicts: Vec<Conflict>,
}
