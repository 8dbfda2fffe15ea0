use crate::error::{Error, Result};
use crate::models::timetable::{
    Conflict, SchoolClass, Subject, Teacher, TimeSlot, Timetable, Weekday, PERIOD_START_TIMES,
    ROOM_MAX, ROOM_MIN, SCHOOL_DAYS,
};
use crate::services::conflict_service::ConflictService;
use crate::store::{RosterProvider, TimetableStore};
use chrono::Utc;
use rand::Rng;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct TimetableService {
    roster: Arc<dyn RosterProvider>,
    store: Arc<dyn TimetableStore>,
}

impl TimetableService {
    pub fn new(roster: Arc<dyn RosterProvider>, store: Arc<dyn TimetableStore>) -> Self {
        Self { roster, store }
    }

    pub async fn list_subjects(&self) -> Result<Vec<Subject>> {
        self.roster.list_subjects().await
    }

    pub async fn list_teachers(&self) -> Result<Vec<Teacher>> {
        self.roster.list_teachers().await
    }

    pub async fn list_classes(&self) -> Result<Vec<SchoolClass>> {
        self.roster.list_classes().await
    }

    pub async fn list_timetables(&self) -> Result<Vec<Timetable>> {
        self.store.list_timetables().await
    }

    pub async fn get_timetable(&self, id: Uuid) -> Result<(Timetable, Vec<Conflict>)> {
        let timetable = self
            .store
            .get_timetable(id)
            .await?
            .ok_or_else(|| Error::NotFound("Timetable not found".to_string()))?;
        let conflicts = ConflictService::detect_conflicts(&timetable.slots);
        Ok((timetable, conflicts))
    }

    pub async fn create_timetable(
        &self,
        created_by: Uuid,
        name: String,
        semester: String,
        year: i32,
        slots: Vec<TimeSlot>,
    ) -> Result<(Timetable, Vec<Conflict>)> {
        let now = Utc::now();
        let timetable = Timetable {
            id: Uuid::new_v4(),
            name,
            semester,
            year,
            slots,
            created_by,
            created_at: now,
            updated_at: now,
        };
        let saved = self.store.create_timetable(timetable).await?;
        let conflicts = ConflictService::detect_conflicts(&saved.slots);
        tracing::info!(timetable = %saved.name, slots = saved.slots.len(), "Timetable created");
        Ok((saved, conflicts))
    }

    /// Replaces the whole slot list. A store failure surfaces to the caller
    /// and leaves the stored timetable as it was.
    pub async fn update_slots(
        &self,
        id: Uuid,
        slots: Vec<TimeSlot>,
    ) -> Result<(Timetable, Vec<Conflict>)> {
        let updated = self.store.update_timetable(id, slots).await?;
        let conflicts = ConflictService::detect_conflicts(&updated.slots);
        Ok((updated, conflicts))
    }

    /// Swaps a single slot by id and recomputes every conflict from the
    /// resulting list.
    pub async fn replace_slot(
        &self,
        id: Uuid,
        slot: TimeSlot,
    ) -> Result<(Timetable, Vec<Conflict>)> {
        let timetable = self
            .store
            .get_timetable(id)
            .await?
            .ok_or_else(|| Error::NotFound("Timetable not found".to_string()))?;
        let mut slots = timetable.slots;
        let target = slots
            .iter_mut()
            .find(|s| s.id == slot.id)
            .ok_or_else(|| Error::NotFound("Slot not found in timetable".to_string()))?;
        *target = slot;
        self.update_slots(id, slots).await
    }

    pub async fn delete_timetable(&self, id: Uuid) -> Result<()> {
        self.store.delete_timetable(id).await?;
        tracing::info!(timetable_id = %id, "Timetable deleted");
        Ok(())
    }

    /// Builds a draft schedule from the roster. Nothing is persisted; the
    /// caller saves the slots through `create_timetable` if it wants them.
    pub async fn generate(&self) -> Result<(Vec<TimeSlot>, Vec<Conflict>)> {
        let teachers = self.roster.list_teachers().await?;
        let classes = self.roster.list_classes().await?;
        let slots = Self::generate_slots(&teachers, &classes, &mut rand::thread_rng())?;
        let conflicts = ConflictService::detect_conflicts(&slots);
        Ok((slots, conflicts))
    }

    /// Greedy generation: classes in roster order, each subject taken by
    /// the first teacher covering it, placed into the first grid cell where
    /// neither teacher nor class is booked yet. Rooms are drawn at random.
    /// A subject nobody teaches, or one that finds no free cell, is skipped.
    pub fn generate_slots(
        teachers: &[Teacher],
        classes: &[SchoolClass],
        rng: &mut impl Rng,
    ) -> Result<Vec<TimeSlot>> {
        let mut slots: Vec<TimeSlot> = Vec::new();

        for class in classes {
            for subject_id in &class.subjects {
                let Some(teacher) = teachers.iter().find(|t| t.subjects.contains(subject_id))
                else {
                    tracing::debug!(subject_id = %subject_id, class = %class.name, "No teacher covers subject, skipping");
                    continue;
                };
                let Some((day, time)) = Self::first_free_cell(&slots, teacher.id, class.id)
                else {
                    tracing::debug!(subject_id = %subject_id, class = %class.name, "No free slot in the grid, skipping");
                    continue;
                };
                let room = rng.gen_range(ROOM_MIN..=ROOM_MAX).to_string();
                slots.push(TimeSlot::new(
                    day,
                    time,
                    *subject_id,
                    teacher.id,
                    class.id,
                    room,
                )?);
            }
        }

        Ok(slots)
    }

    fn first_free_cell(
        slots: &[TimeSlot],
        teacher_id: Uuid,
        class_id: Uuid,
    ) -> Option<(Weekday, &'static str)> {
        for day in SCHOOL_DAYS {
            for time in PERIOD_START_TIMES {
                let taken = slots.iter().any(|s| {
                    s.day == day
                        && s.start_time == time
                        && (s.teacher_id == teacher_id || s.class_id == class_id)
                });
                if !taken {
                    return Some((day, time));
                }
            }
        }
        None
    }
}
