pub mod quiz;
pub mod result;
pub mod session;
pub mod timetable;
pub mod user;
