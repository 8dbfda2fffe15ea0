use crate::models::quiz::Quiz;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Idle,
    Instructions,
    InProgress,
    Paused,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    Submitted,
    TimeExpired,
    TabHidden,
}

/// One user's quiz attempt as an immutable value. Every event application
/// yields a fresh state; the phase enum makes "in progress" and "completed"
/// mutually exclusive by construction.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub quiz: Option<Arc<Quiz>>,
    pub phase: SessionPhase,
    pub active_question: usize,
    /// question id -> selected option index
    pub answers: HashMap<String, i32>,
    pub time_remaining_seconds: i32,
    pub end_reason: Option<EndReason>,
}

#[derive(Debug, Clone)]
pub enum SessionEvent {
    LoadQuiz(Arc<Quiz>),
    Start,
    Tick,
    TabHidden,
    SelectAnswer { question_id: String, option_index: i32 },
    NextQuestion,
    PrevQuestion,
    Pause,
    Resume,
    Submit,
    Reset,
}

impl SessionState {
    pub fn idle() -> Self {
        Self {
            quiz: None,
            phase: SessionPhase::Idle,
            active_question: 0,
            answers: HashMap::new(),
            time_remaining_seconds: 0,
            end_reason: None,
        }
    }

    pub fn is_in_progress(&self) -> bool {
        self.phase == SessionPhase::InProgress
    }

    pub fn is_completed(&self) -> bool {
        self.phase == SessionPhase::Completed
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    /// Seconds consumed so far, `None` before a quiz is loaded.
    pub fn time_taken_seconds(&self) -> Option<i32> {
        self.quiz
            .as_ref()
            .map(|q| q.time_limit_seconds() - self.time_remaining_seconds)
    }

    /// Applies one event, returning the next state. Events that are not
    /// valid in the current phase leave the state unchanged; callers that
    /// need to report such events as errors check the phase up front.
    pub fn apply(&self, event: SessionEvent) -> SessionState {
        match event {
            SessionEvent::LoadQuiz(quiz) => {
                if self.phase != SessionPhase::Idle || quiz.questions.is_empty() {
                    return self.clone();
                }
                SessionState {
                    time_remaining_seconds: quiz.time_limit_seconds(),
                    quiz: Some(quiz),
                    phase: SessionPhase::Instructions,
                    active_question: 0,
                    answers: HashMap::new(),
                    end_reason: None,
                }
            }
            SessionEvent::Start => {
                if self.phase != SessionPhase::Instructions {
                    return self.clone();
                }
                SessionState {
                    phase: SessionPhase::InProgress,
                    ..self.clone()
                }
            }
            SessionEvent::Tick => {
                if self.phase != SessionPhase::InProgress {
                    return self.clone();
                }
                let remaining = (self.time_remaining_seconds - 1).max(0);
                if remaining == 0 {
                    SessionState {
                        time_remaining_seconds: 0,
                        phase: SessionPhase::Completed,
                        end_reason: Some(EndReason::TimeExpired),
                        ..self.clone()
                    }
                } else {
                    SessionState {
                        time_remaining_seconds: remaining,
                        ..self.clone()
                    }
                }
            }
            SessionEvent::TabHidden => {
                if self.phase != SessionPhase::InProgress {
                    return self.clone();
                }
                SessionState {
                    phase: SessionPhase::Completed,
                    end_reason: Some(EndReason::TabHidden),
                    ..self.clone()
                }
            }
            SessionEvent::SelectAnswer {
                question_id,
                option_index,
            } => {
                if self.phase != SessionPhase::InProgress {
                    return self.clone();
                }
                let Some(quiz) = self.quiz.as_deref() else {
                    return self.clone();
                };
                let Some(question) = quiz.question_by_id(&question_id) else {
                    return self.clone();
                };
                if option_index < 0 || option_index as usize >= question.options.len() {
                    return self.clone();
                }
                let mut next = self.clone();
                next.answers.insert(question_id, option_index);
                next
            }
            SessionEvent::NextQuestion => self.move_active(1),
            SessionEvent::PrevQuestion => self.move_active(-1),
            SessionEvent::Pause => {
                if self.phase != SessionPhase::InProgress {
                    return self.clone();
                }
                SessionState {
                    phase: SessionPhase::Paused,
                    ..self.clone()
                }
            }
            SessionEvent::Resume => {
                if self.phase != SessionPhase::Paused {
                    return self.clone();
                }
                SessionState {
                    phase: SessionPhase::InProgress,
                    ..self.clone()
                }
            }
            SessionEvent::Submit => {
                if self.phase != SessionPhase::InProgress {
                    return self.clone();
                }
                SessionState {
                    phase: SessionPhase::Completed,
                    end_reason: Some(EndReason::Submitted),
                    ..self.clone()
                }
            }
            SessionEvent::Reset => SessionState::idle(),
        }
    }

    fn move_active(&self, delta: i64) -> SessionState {
        if self.phase != SessionPhase::InProgress {
            return self.clone();
        }
        let Some(quiz) = self.quiz.as_deref() else {
            return self.clone();
        };
        let last = quiz.questions.len().saturating_sub(1) as i64;
        let next_index = (self.active_question as i64 + delta).clamp(0, last);
        SessionState {
            active_question: next_index as usize,
            ..self.clone()
        }
    }
}
