pub mod config;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;
pub mod utils;

use std::sync::Arc;

use crate::services::{
    auth_service::AuthService, quiz_service::QuizService, result_service::ResultService,
    session_service::SessionService, timetable_service::TimetableService,
};
use crate::store::memory::{
    MemoryQuizCatalog, MemoryResultStore, MemoryRoster, MemoryTimetableStore, MemoryUserStore,
};
use crate::store::seed::{demo_data, DemoData};

#[derive(Clone)]
pub struct AppState {
    pub auth_service: AuthService,
    pub quiz_service: QuizService,
    pub session_service: SessionService,
    pub result_service: ResultService,
    pub timetable_service: TimetableService,
}

impl AppState {
    /// Empty in-memory stores. Tests that seed their own data start here.
    pub fn new() -> Self {
        Self::from_data(DemoData::default())
    }

    /// Stores pre-filled with the demo accounts, quizzes and roster.
    pub fn with_demo_data() -> Self {
        Self::from_data(demo_data())
    }

    fn from_data(data: DemoData) -> Self {
        let users = Arc::new(MemoryUserStore::new(data.users));
        let quizzes = Arc::new(MemoryQuizCatalog::new(data.quizzes));
        let results = Arc::new(MemoryResultStore::new(data.results));
        let roster = Arc::new(MemoryRoster::new(data.subjects, data.teachers, data.classes));
        let timetables = Arc::new(MemoryTimetableStore::default());

        let auth_service = AuthService::new(users.clone());
        let quiz_service = QuizService::new(quizzes.clone());
        let session_service = SessionService::new(quizzes.clone(), results.clone());
        let result_service = ResultService::new(results, users, quizzes);
        let timetable_service = TimetableService::new(roster, timetables);

        Self {
            auth_service,
            quiz_service,
            session_service,
            result_service,
            timetable_service,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
