use std::collections::HashMap;
use std::sync::Arc;

use quizmaster_backend::models::quiz::{Question, Quiz};
use quizmaster_backend::models::result::UNANSWERED;
use quizmaster_backend::models::session::{
    EndReason, SessionEvent, SessionPhase, SessionState,
};
use quizmaster_backend::services::grading_service::GradingService;
use uuid::Uuid;

fn question(id: &str, correct_option: i32, points: i32) -> Question {
    Question {
        id: id.into(),
        text: format!("Question {}", id),
        options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
        correct_option,
        points,
    }
}

fn sample_quiz() -> Arc<Quiz> {
    Arc::new(Quiz {
        id: Uuid::new_v4(),
        title: "Web Development Basics".into(),
        description: "HTML and CSS fundamentals".into(),
        time_limit_minutes: 10,
        questions: vec![question("q1", 0, 10), question("q2", 1, 10), question("q3", 2, 10)],
        created_by: Uuid::new_v4(),
        is_published: true,
    })
}

fn in_progress() -> SessionState {
    SessionState::idle()
        .apply(SessionEvent::LoadQuiz(sample_quiz()))
        .apply(SessionEvent::Start)
}

#[test]
fn load_quiz_parks_session_in_instructions() {
    let state = SessionState::idle().apply(SessionEvent::LoadQuiz(sample_quiz()));
    assert_eq!(state.phase, SessionPhase::Instructions);
    assert_eq!(state.time_remaining_seconds, 600);
    assert_eq!(state.active_question, 0);
    assert!(state.answers.is_empty());
    assert!(state.end_reason.is_none());
}

#[test]
fn load_quiz_is_ignored_outside_idle() {
    let first = sample_quiz();
    let state = SessionState::idle().apply(SessionEvent::LoadQuiz(first.clone()));
    let other = sample_quiz();
    let state = state.apply(SessionEvent::LoadQuiz(other));
    assert_eq!(state.quiz.as_ref().map(|q| q.id), Some(first.id));
}

#[test]
fn quiz_without_questions_never_loads() {
    let empty = Arc::new(Quiz {
        id: Uuid::new_v4(),
        title: "Empty".into(),
        description: String::new(),
        time_limit_minutes: 5,
        questions: vec![],
        created_by: Uuid::new_v4(),
        is_published: true,
    });
    let state = SessionState::idle().apply(SessionEvent::LoadQuiz(empty));
    assert_eq!(state.phase, SessionPhase::Idle);
    assert!(state.quiz.is_none());
}

#[test]
fn start_requires_instructions_phase() {
    let state = SessionState::idle().apply(SessionEvent::Start);
    assert_eq!(state.phase, SessionPhase::Idle);

    let state = in_progress();
    assert_eq!(state.phase, SessionPhase::InProgress);
}

#[test]
fn tick_counts_down_one_second_at_a_time() {
    let mut state = in_progress();
    state = state.apply(SessionEvent::Tick);
    assert_eq!(state.time_remaining_seconds, 599);
    state = state.apply(SessionEvent::Tick);
    assert_eq!(state.time_remaining_seconds, 598);
    assert_eq!(state.phase, SessionPhase::InProgress);
}

#[test]
fn tick_reaching_zero_completes_with_time_expired() {
    let mut state = in_progress();
    for _ in 0..600 {
        state = state.apply(SessionEvent::Tick);
    }
    assert_eq!(state.phase, SessionPhase::Completed);
    assert_eq!(state.time_remaining_seconds, 0);
    assert_eq!(state.end_reason, Some(EndReason::TimeExpired));
    assert_eq!(state.time_taken_seconds(), Some(600));
}

#[test]
fn tick_never_pushes_time_below_zero() {
    let mut state = in_progress();
    for _ in 0..700 {
        state = state.apply(SessionEvent::Tick);
    }
    assert_eq!(state.time_remaining_seconds, 0);
    assert_eq!(state.phase, SessionPhase::Completed);
}

#[test]
fn answers_overwrite_previous_selection() {
    let state = in_progress()
        .apply(SessionEvent::SelectAnswer {
            question_id: "q1".into(),
            option_index: 2,
        })
        .apply(SessionEvent::SelectAnswer {
            question_id: "q1".into(),
            option_index: 3,
        });
    assert_eq!(state.answers.get("q1"), Some(&3));
    assert_eq!(state.answered_count(), 1);
}

#[test]
fn unknown_question_and_bad_index_are_dropped() {
    let state = in_progress()
        .apply(SessionEvent::SelectAnswer {
            question_id: "nope".into(),
            option_index: 0,
        })
        .apply(SessionEvent::SelectAnswer {
            question_id: "q1".into(),
            option_index: 4,
        })
        .apply(SessionEvent::SelectAnswer {
            question_id: "q1".into(),
            option_index: -1,
        });
    assert!(state.answers.is_empty());
}

#[test]
fn navigation_clamps_to_question_range() {
    let mut state = in_progress();
    state = state.apply(SessionEvent::PrevQuestion);
    assert_eq!(state.active_question, 0);

    for _ in 0..10 {
        state = state.apply(SessionEvent::NextQuestion);
    }
    assert_eq!(state.active_question, 2);

    state = state.apply(SessionEvent::PrevQuestion);
    assert_eq!(state.active_question, 1);
}

#[test]
fn pause_and_resume_keep_answers_and_clock() {
    let mut state = in_progress();
    state = state.apply(SessionEvent::Tick);
    state = state.apply(SessionEvent::SelectAnswer {
        question_id: "q2".into(),
        option_index: 1,
    });
    state = state.apply(SessionEvent::Pause);
    assert_eq!(state.phase, SessionPhase::Paused);

    // Ticks are only valid while running.
    let paused = state.apply(SessionEvent::Tick);
    assert_eq!(paused.time_remaining_seconds, 599);

    let resumed = paused.apply(SessionEvent::Resume);
    assert_eq!(resumed.phase, SessionPhase::InProgress);
    assert_eq!(resumed.time_remaining_seconds, 599);
    assert_eq!(resumed.answers.get("q2"), Some(&1));
}

#[test]
fn pause_requires_running_session() {
    let state = SessionState::idle().apply(SessionEvent::LoadQuiz(sample_quiz()));
    let paused = state.apply(SessionEvent::Pause);
    assert_eq!(paused.phase, SessionPhase::Instructions);
}

#[test]
fn submit_completes_with_submitted_reason() {
    let state = in_progress().apply(SessionEvent::Submit);
    assert_eq!(state.phase, SessionPhase::Completed);
    assert_eq!(state.end_reason, Some(EndReason::Submitted));
}

#[test]
fn tab_hidden_terminates_running_session() {
    let state = in_progress().apply(SessionEvent::TabHidden);
    assert_eq!(state.phase, SessionPhase::Completed);
    assert_eq!(state.end_reason, Some(EndReason::TabHidden));
}

#[test]
fn tab_hidden_is_a_noop_when_not_running() {
    let paused = in_progress().apply(SessionEvent::Pause);
    let after = paused.apply(SessionEvent::TabHidden);
    assert_eq!(after.phase, SessionPhase::Paused);
    assert!(after.end_reason.is_none());
}

#[test]
fn completed_session_ignores_further_events() {
    let done = in_progress().apply(SessionEvent::Submit);
    let after = done
        .apply(SessionEvent::Tick)
        .apply(SessionEvent::SelectAnswer {
            question_id: "q1".into(),
            option_index: 0,
        })
        .apply(SessionEvent::Submit);
    assert_eq!(after.phase, SessionPhase::Completed);
    assert_eq!(after.end_reason, Some(EndReason::Submitted));
    assert!(after.answers.is_empty());
}

#[test]
fn reset_returns_to_idle_from_any_phase() {
    let done = in_progress().apply(SessionEvent::Submit);
    let state = done.apply(SessionEvent::Reset);
    assert_eq!(state.phase, SessionPhase::Idle);
    assert!(state.quiz.is_none());
    assert_eq!(state.time_remaining_seconds, 0);
}

#[test]
fn grading_scores_only_exact_matches() {
    let quiz = sample_quiz();
    let mut answers = HashMap::new();
    answers.insert("q1".to_string(), 0); // correct
    answers.insert("q2".to_string(), 3); // wrong

    let (score, max_score, records) = GradingService::grade(&quiz, &answers);
    assert_eq!(score, 10);
    assert_eq!(max_score, 30);
    assert_eq!(records.len(), 3);

    let q1 = records.iter().find(|r| r.question_id == "q1").unwrap();
    assert!(q1.is_correct);
    assert_eq!(q1.selected_option, 0);

    let q2 = records.iter().find(|r| r.question_id == "q2").unwrap();
    assert!(!q2.is_correct);
}

#[test]
fn unanswered_questions_are_recorded_and_never_correct() {
    let quiz = sample_quiz();
    let (score, max_score, records) = GradingService::grade(&quiz, &HashMap::new());
    assert_eq!(score, 0);
    assert_eq!(max_score, 30);
    assert!(records.iter().all(|r| r.selected_option == UNANSWERED));
    assert!(records.iter().all(|r| !r.is_correct));
}
