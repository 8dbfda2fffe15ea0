pub mod auth_service;
pub mod conflict_service;
pub mod export_service;
pub mod grading_service;
pub mod quiz_service;
pub mod result_service;
pub mod session_service;
pub mod timetable_service;
