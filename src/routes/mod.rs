pub mod admin;
pub mod auth;
pub mod health;
pub mod quiz;
pub mod result;
pub mod session;
pub mod timetable;
