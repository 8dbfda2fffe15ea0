use crate::error::{Error, Result};
use crate::models::quiz::Quiz;
use crate::models::result::QuizResult;
use crate::models::session::{SessionEvent, SessionPhase, SessionState};
use crate::services::grading_service::GradingService;
use crate::store::{QuizCatalog, ResultStore};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;
use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use uuid::Uuid;

/// Finished sessions are evicted this long after completion.
const FINISHED_SESSION_TTL: Duration = Duration::from_secs(30 * 60);

/// Cancellable countdown task handle. Aborting the task is how the engine
/// guarantees no stale timer ever touches a superseded session.
struct Ticker {
    handle: JoinHandle<()>,
}

impl Ticker {
    fn cancel(&self) {
        self.handle.abort();
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

struct EngineInner {
    state: SessionState,
    ticker: Option<Ticker>,
    last_result: Option<QuizResult>,
    result_recorded: bool,
    persist_failed: bool,
    finished_at: Option<Instant>,
}

/// Read-only view of an engine at one instant.
pub struct EngineSnapshot {
    pub state: SessionState,
    pub result: Option<QuizResult>,
    pub persist_failed: bool,
}

enum TickOutcome {
    Continue,
    Stop,
    Expired(QuizResult),
}

/// Drives one user's quiz attempt: holds the current session state, owns
/// the countdown ticker and watches the host visibility signal. Storage is
/// reached only through the injected result store.
pub struct SessionEngine {
    user_id: Uuid,
    inner: Mutex<EngineInner>,
    results: Arc<dyn ResultStore>,
}

impl SessionEngine {
    /// Loads a quiz into a fresh session, leaving it in the instructions
    /// phase, and subscribes to the host visibility signal. A quiz without
    /// questions is rejected up front.
    pub fn spawn(
        user_id: Uuid,
        quiz: Arc<Quiz>,
        results: Arc<dyn ResultStore>,
        visibility: watch::Receiver<bool>,
    ) -> Result<Arc<Self>> {
        if quiz.questions.is_empty() {
            return Err(Error::BadRequest("Quiz has no questions".to_string()));
        }
        let state = SessionState::idle().apply(SessionEvent::LoadQuiz(quiz));
        let engine = Arc::new(Self {
            user_id,
            inner: Mutex::new(EngineInner {
                state,
                ticker: None,
                last_result: None,
                result_recorded: false,
                persist_failed: false,
                finished_at: None,
            }),
            results,
        });
        Self::spawn_visibility_watcher(&engine, visibility);
        Ok(engine)
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        let inner = self.lock();
        EngineSnapshot {
            state: inner.state.clone(),
            result: inner.last_result.clone(),
            persist_failed: inner.persist_failed,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.lock().state.phase
    }

    /// Begins the attempt and spawns the countdown.
    pub fn start(self: &Arc<Self>) -> Result<()> {
        let title = {
            let mut inner = self.lock();
            if inner.state.phase != SessionPhase::Instructions {
                return Err(Error::BadRequest(
                    "Session is not awaiting start".to_string(),
                ));
            }
            inner.state = inner.state.apply(SessionEvent::Start);
            inner.state.quiz.as_ref().map(|q| q.title.clone())
        };
        self.spawn_ticker();
        if let Some(title) = title {
            tracing::info!(user_id = %self.user_id, quiz = %title, "Quiz session started");
        }
        Ok(())
    }

    pub fn pause(&self) -> Result<()> {
        let mut inner = self.lock();
        if inner.state.phase != SessionPhase::InProgress {
            return Err(Error::BadRequest("Session is not in progress".to_string()));
        }
        inner.state = inner.state.apply(SessionEvent::Pause);
        Self::cancel_ticker(&mut inner);
        Ok(())
    }

    pub fn resume(self: &Arc<Self>) -> Result<()> {
        {
            let mut inner = self.lock();
            if inner.state.phase != SessionPhase::Paused {
                return Err(Error::BadRequest("Session is not paused".to_string()));
            }
            inner.state = inner.state.apply(SessionEvent::Resume);
        }
        self.spawn_ticker();
        Ok(())
    }

    /// Records an answer. Unknown question ids and out-of-range option
    /// indexes are dropped without an error, exactly as the reducer does.
    pub fn select_answer(&self, question_id: String, option_index: i32) -> Result<()> {
        let mut inner = self.lock();
        if inner.state.phase != SessionPhase::InProgress {
            return Err(Error::BadRequest("Session is not in progress".to_string()));
        }
        inner.state = inner.state.apply(SessionEvent::SelectAnswer {
            question_id,
            option_index,
        });
        Ok(())
    }

    pub fn next_question(&self) -> Result<()> {
        self.navigate(SessionEvent::NextQuestion)
    }

    pub fn prev_question(&self) -> Result<()> {
        self.navigate(SessionEvent::PrevQuestion)
    }

    fn navigate(&self, event: SessionEvent) -> Result<()> {
        let mut inner = self.lock();
        if inner.state.phase != SessionPhase::InProgress {
            return Err(Error::BadRequest("Session is not in progress".to_string()));
        }
        inner.state = inner.state.apply(event);
        Ok(())
    }

    /// Host visibility dropped while the attempt was running: terminate on
    /// the spot. No result is recorded. Safe to call repeatedly and from
    /// any phase.
    pub fn tab_hidden(&self) {
        let mut inner = self.lock();
        if inner.state.phase != SessionPhase::InProgress {
            return;
        }
        inner.state = inner.state.apply(SessionEvent::TabHidden);
        Self::cancel_ticker(&mut inner);
        inner.finished_at = Some(Instant::now());
        tracing::warn!(
            user_id = %self.user_id,
            "Anti-cheat: quiz session terminated, tab visibility lost"
        );
    }

    /// Grades the attempt and completes the session. The caller persists
    /// the returned result through [`SessionEngine::persist_result`].
    pub fn submit(&self) -> Result<QuizResult> {
        let mut inner = self.lock();
        if inner.state.phase != SessionPhase::InProgress {
            return Err(Error::BadRequest("Session is not in progress".to_string()));
        }
        if inner.result_recorded {
            return Err(Error::Internal(
                "Result already recorded for this attempt".to_string(),
            ));
        }
        let result = Self::build_result(self.user_id, &inner.state)?;
        inner.state = inner.state.apply(SessionEvent::Submit);
        Self::cancel_ticker(&mut inner);
        inner.result_recorded = true;
        inner.last_result = Some(result.clone());
        inner.finished_at = Some(Instant::now());
        tracing::info!(
            user_id = %self.user_id,
            score = result.score,
            max_score = result.max_score,
            "Quiz submitted"
        );
        Ok(result)
    }

    /// Writes a result through the store port. A failure leaves the session
    /// state untouched but is flagged so callers and later snapshots see it.
    pub async fn persist_result(&self, result: &QuizResult) -> bool {
        match self.results.append_result(result.clone()).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(user_id = %self.user_id, error = ?e, "Failed to persist quiz result");
                self.lock().persist_failed = true;
                false
            }
        }
    }

    /// Cancels the countdown. Used when the session is evicted or replaced.
    pub fn shutdown(&self) {
        let mut inner = self.lock();
        Self::cancel_ticker(&mut inner);
    }

    /// How long ago this session completed, if it has.
    pub fn finished_since(&self) -> Option<Duration> {
        self.lock().finished_at.map(|at| at.elapsed())
    }

    fn spawn_ticker(self: &Arc<Self>) {
        let weak: Weak<SessionEngine> = Arc::downgrade(self);
        let handle = tokio::spawn(async move {
            loop {
                tokio::time::sleep(Duration::from_secs(1)).await;
                let Some(engine) = weak.upgrade() else {
                    break;
                };
                match engine.tick_once() {
                    TickOutcome::Continue => {}
                    TickOutcome::Stop => break,
                    TickOutcome::Expired(result) => {
                        engine.persist_result(&result).await;
                        break;
                    }
                }
            }
        });
        self.lock().ticker = Some(Ticker { handle });
    }

    fn tick_once(&self) -> TickOutcome {
        let mut inner = self.lock();
        if inner.state.phase != SessionPhase::InProgress {
            return TickOutcome::Stop;
        }
        inner.state = inner.state.apply(SessionEvent::Tick);
        if inner.state.phase != SessionPhase::Completed {
            return TickOutcome::Continue;
        }
        // Countdown hit zero on this tick: auto-submit. The ticker handle is
        // left in place; aborting it here would cancel this very task before
        // the result write below it runs. The loop exits on its own.
        inner.finished_at = Some(Instant::now());
        if inner.result_recorded {
            return TickOutcome::Stop;
        }
        match Self::build_result(self.user_id, &inner.state) {
            Ok(result) => {
                inner.result_recorded = true;
                inner.last_result = Some(result.clone());
                tracing::info!(
                    user_id = %self.user_id,
                    score = result.score,
                    "Quiz time expired, auto-submitted"
                );
                TickOutcome::Expired(result)
            }
            Err(e) => {
                tracing::error!(user_id = %self.user_id, error = ?e, "Auto-submit failed");
                TickOutcome::Stop
            }
        }
    }

    fn build_result(user_id: Uuid, state: &SessionState) -> Result<QuizResult> {
        let quiz = state
            .quiz
            .as_deref()
            .ok_or_else(|| Error::Internal("Submit without an active quiz".to_string()))?;
        let (score, max_score, answers) = GradingService::grade(quiz, &state.answers);
        Ok(QuizResult {
            id: Uuid::new_v4(),
            user_id,
            quiz_id: quiz.id,
            score,
            max_score,
            time_taken_seconds: quiz.time_limit_seconds() - state.time_remaining_seconds,
            completed_at: Utc::now(),
            answers,
        })
    }

    fn cancel_ticker(inner: &mut EngineInner) {
        if let Some(ticker) = inner.ticker.take() {
            ticker.cancel();
        }
    }

    fn spawn_visibility_watcher(engine: &Arc<SessionEngine>, mut rx: watch::Receiver<bool>) {
        let weak = Arc::downgrade(engine);
        tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                let hidden = *rx.borrow();
                let Some(engine) = weak.upgrade() else {
                    break;
                };
                if hidden {
                    engine.tab_hidden();
                }
            }
        });
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, EngineInner> {
        self.inner.lock().expect("session engine mutex poisoned")
    }
}

struct SessionEntry {
    engine: Arc<SessionEngine>,
    visibility_tx: watch::Sender<bool>,
}

/// Registry of active sessions, one per user. Loading a quiz replaces any
/// previous session for that user.
#[derive(Clone)]
pub struct SessionService {
    sessions: Arc<RwLock<HashMap<Uuid, SessionEntry>>>,
    catalog: Arc<dyn QuizCatalog>,
    results: Arc<dyn ResultStore>,
}

impl SessionService {
    pub fn new(catalog: Arc<dyn QuizCatalog>, results: Arc<dyn ResultStore>) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            catalog,
            results,
        }
    }

    /// Creates a session for a published quiz and parks it in the
    /// instructions phase.
    pub async fn load_quiz(&self, user_id: Uuid, quiz_id: Uuid) -> Result<EngineSnapshot> {
        let quiz = self
            .catalog
            .get_quiz(quiz_id)
            .await?
            .filter(|q| q.is_published)
            .ok_or_else(|| Error::NotFound("Quiz not found".to_string()))?;

        // hidden = false until the client reports otherwise
        let (visibility_tx, visibility_rx) = watch::channel(false);
        let engine = SessionEngine::spawn(
            user_id,
            Arc::new(quiz),
            self.results.clone(),
            visibility_rx,
        )?;

        let snapshot = engine.snapshot();
        let mut sessions = self.sessions.write().await;
        if let Some(previous) = sessions.insert(
            user_id,
            SessionEntry {
                engine,
                visibility_tx,
            },
        ) {
            previous.engine.shutdown();
            tracing::info!(user_id = %user_id, "Replaced previous quiz session");
        }
        Ok(snapshot)
    }

    pub async fn snapshot(&self, user_id: Uuid) -> Result<EngineSnapshot> {
        Ok(self.engine(user_id).await?.snapshot())
    }

    pub async fn start(&self, user_id: Uuid) -> Result<EngineSnapshot> {
        let engine = self.engine(user_id).await?;
        engine.start()?;
        Ok(engine.snapshot())
    }

    pub async fn pause(&self, user_id: Uuid) -> Result<EngineSnapshot> {
        let engine = self.engine(user_id).await?;
        engine.pause()?;
        Ok(engine.snapshot())
    }

    pub async fn resume(&self, user_id: Uuid) -> Result<EngineSnapshot> {
        let engine = self.engine(user_id).await?;
        engine.resume()?;
        Ok(engine.snapshot())
    }

    pub async fn select_answer(
        &self,
        user_id: Uuid,
        question_id: String,
        option_index: i32,
    ) -> Result<EngineSnapshot> {
        let engine = self.engine(user_id).await?;
        engine.select_answer(question_id, option_index)?;
        Ok(engine.snapshot())
    }

    pub async fn next_question(&self, user_id: Uuid) -> Result<EngineSnapshot> {
        let engine = self.engine(user_id).await?;
        engine.next_question()?;
        Ok(engine.snapshot())
    }

    pub async fn prev_question(&self, user_id: Uuid) -> Result<EngineSnapshot> {
        let engine = self.engine(user_id).await?;
        engine.prev_question()?;
        Ok(engine.snapshot())
    }

    /// Forwards the client's visibility report into the engine's watch
    /// channel. Hiding the tab mid-attempt terminates the session.
    pub async fn report_visibility(&self, user_id: Uuid, hidden: bool) -> Result<EngineSnapshot> {
        let sessions = self.sessions.read().await;
        let entry = sessions
            .get(&user_id)
            .ok_or_else(|| Error::NotFound("No active quiz session".to_string()))?;
        let _ = entry.visibility_tx.send(hidden);
        let engine = entry.engine.clone();
        drop(sessions);
        // The watcher runs on its own task; apply the transition inline as
        // well so the caller observes the terminated state in the response.
        if hidden {
            engine.tab_hidden();
        }
        Ok(engine.snapshot())
    }

    /// Grades, completes and persists the attempt. Returns the result and
    /// whether the store write succeeded.
    pub async fn submit(&self, user_id: Uuid) -> Result<(QuizResult, bool)> {
        let engine = self.engine(user_id).await?;
        let result = engine.submit()?;
        let persisted = engine.persist_result(&result).await;
        Ok((result, persisted))
    }

    /// Drops the user's session entirely.
    pub async fn reset(&self, user_id: Uuid) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        let entry = sessions
            .remove(&user_id)
            .ok_or_else(|| Error::NotFound("No active quiz session".to_string()))?;
        entry.engine.shutdown();
        tracing::info!(user_id = %user_id, "Quiz session reset");
        Ok(())
    }

    /// Evicts sessions that completed more than the TTL ago. Driven by the
    /// background loop in `main`.
    pub async fn purge_finished(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| {
            match entry.engine.finished_since() {
                Some(elapsed) if elapsed >= FINISHED_SESSION_TTL => {
                    entry.engine.shutdown();
                    false
                }
                _ => true,
            }
        });
        let purged = before - sessions.len();
        if purged > 0 {
            tracing::debug!(purged, "Evicted finished quiz sessions");
        }
        purged
    }

    pub async fn active_sessions(&self) -> usize {
        self.sessions.read().await.len()
    }

    async fn engine(&self, user_id: Uuid) -> Result<Arc<SessionEngine>> {
        self.sessions
            .read()
            .await
            .get(&user_id)
            .map(|entry| entry.engine.clone())
            .ok_or_else(|| Error::NotFound("No active quiz session".to_string()))
    }
}
