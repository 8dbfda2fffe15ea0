use crate::error::Result;
use crate::models::timetable::{TimeSlot, Timetable, SCHOOL_DAYS};
use rust_xlsxwriter::*;
use std::collections::HashMap;
use uuid::Uuid;

pub struct ExportService;

impl ExportService {
    /// Generate a styled XLSX workbook from a timetable, one row per slot
    /// ordered by day and start time. Roster names are resolved through the
    /// maps the caller supplies.
    pub fn generate_timetable_xlsx(
        timetable: &Timetable,
        subject_names: &HashMap<Uuid, String>,
        teacher_names: &HashMap<Uuid, String>,
        class_names: &HashMap<Uuid, String>,
    ) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Timetable")?;

        let header_bg = Color::RGB(0x0F172A);
        let title_bg = Color::RGB(0x1E293B);
        let alt_row = Color::RGB(0xF8FAFC);
        let border_color = Color::RGB(0xE2E8F0);

        let columns = [
            ("Day", 14.0),
            ("Time", 16.0),
            ("Subject", 28.0),
            ("Teacher", 28.0),
            ("Class", 14.0),
            ("Room", 10.0),
        ];

        for (i, (_, width)) in columns.iter().enumerate() {
            worksheet.set_column_width(i as u16, *width)?;
        }

        let title_format = Format::new()
            .set_font_size(14)
            .set_bold()
            .set_font_color(Color::White)
            .set_background_color(title_bg)
            .set_align(FormatAlign::CenterAcross)
            .set_align(FormatAlign::VerticalCenter);

        worksheet.set_row_height(0, 32)?;
        let title = format!(
            "{} ({} {})",
            timetable.name, timetable.semester, timetable.year
        );
        worksheet.merge_range(0, 0, 0, (columns.len() - 1) as u16, &title, &title_format)?;

        let subtitle_format = Format::new()
            .set_font_size(9)
            .set_italic()
            .set_font_color(Color::RGB(0x94A3B8))
            .set_background_color(title_bg)
            .set_align(FormatAlign::CenterAcross)
            .set_align(FormatAlign::VerticalCenter);

        worksheet.set_row_height(1, 20)?;
        let exported = chrono::Utc::now().format("%d.%m.%Y %H:%M UTC").to_string();
        let subtitle = format!("Exported {} | {} slots", exported, timetable.slots.len());
        worksheet.merge_range(1, 0, 1, (columns.len() - 1) as u16, &subtitle, &subtitle_format)?;

        let header_format = Format::new()
            .set_bold()
            .set_font_size(10)
            .set_font_color(Color::White)
            .set_background_color(header_bg)
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
            .set_border(FormatBorder::Thin)
            .set_border_color(border_color);

        let header_row = 2;
        worksheet.set_row_height(header_row, 24)?;
        for (i, (name, _)) in columns.iter().enumerate() {
            worksheet.write_string_with_format(header_row, i as u16, *name, &header_format)?;
        }

        let mut slots: Vec<&TimeSlot> = timetable.slots.iter().collect();
        slots.sort_by_key(|s| (day_index(s), minute_of_day(&s.start_time)));

        let data_start_row = 3;
        for (idx, slot) in slots.iter().enumerate() {
            let row = data_start_row + idx as u32;
            let base_fmt = Format::new()
                .set_font_size(10)
                .set_align(FormatAlign::VerticalCenter)
                .set_border(FormatBorder::Thin)
                .set_border_color(border_color);
            let base_fmt = if idx % 2 == 0 {
                base_fmt.set_background_color(alt_row)
            } else {
                base_fmt
            };
            let center_fmt = base_fmt.clone().set_align(FormatAlign::Center);

            worksheet.write_string_with_format(row, 0, slot.day.to_string(), &base_fmt)?;
            let time = format!("{} - {}", slot.start_time, slot.end_time);
            worksheet.write_string_with_format(row, 1, &time, &center_fmt)?;
            worksheet.write_string_with_format(
                row,
                2,
                resolve(subject_names, slot.subject_id),
                &base_fmt,
            )?;
            worksheet.write_string_with_format(
                row,
                3,
                resolve(teacher_names, slot.teacher_id),
                &base_fmt,
            )?;
            worksheet.write_string_with_format(
                row,
                4,
                resolve(class_names, slot.class_id),
                &center_fmt,
            )?;
            worksheet.write_string_with_format(row, 5, &slot.room, &center_fmt)?;
        }

        worksheet.set_freeze_panes(3, 0)?;
        if !slots.is_empty() {
            worksheet.autofilter(
                header_row,
                0,
                data_start_row + slots.len() as u32 - 1,
                (columns.len() - 1) as u16,
            )?;
        }

        let buffer = workbook.save_to_buffer()?;
        Ok(buffer)
    }
}

fn resolve(names: &HashMap<Uuid, String>, id: Uuid) -> &str {
    names.get(&id).map(String::as_str).unwrap_or("?")
}

fn day_index(slot: &TimeSlot) -> usize {
    SCHOOL_DAYS
        .iter()
        .position(|d| *d == slot.day)
        .unwrap_or(SCHOOL_DAYS.len())
}

fn minute_of_day(start_time: &str) -> i32 {
    let Some((hour, minute)) = start_time.split_once(':') else {
        return 0;
    };
    let hour: i32 = hour.parse().unwrap_or(0);
    let minute: i32 = minute.parse().unwrap_or(0);
    hour * 60 + minute
}
