use crate::dto::result_dto::{AdminStatsResponse, LeaderboardEntry, UserResultView};
use crate::error::Result;
use crate::models::result::QuizResult;
use crate::store::{QuizCatalog, ResultStore, UserStore};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct ResultService {
    results: Arc<dyn ResultStore>,
    users: Arc<dyn UserStore>,
    catalog: Arc<dyn QuizCatalog>,
}

impl ResultService {
    pub fn new(
        results: Arc<dyn ResultStore>,
        users: Arc<dyn UserStore>,
        catalog: Arc<dyn QuizCatalog>,
    ) -> Self {
        Self {
            results,
            users,
            catalog,
        }
    }

    /// The caller's own attempts, newest first, with quiz titles resolved.
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<UserResultView>> {
        let mut results = self.results.list_results_for_user(user_id).await?;
        results.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        let titles = self.quiz_titles().await?;

        Ok(results
            .into_iter()
            .map(|r| UserResultView {
                id: r.id,
                quiz_id: r.quiz_id,
                quiz_title: titles.get(&r.quiz_id).cloned().unwrap_or_default(),
                percentage: r.percentage(),
                score: r.score,
                max_score: r.max_score,
                time_taken_seconds: r.time_taken_seconds,
                completed_at: r.completed_at,
                answers: r.answers,
            })
            .collect())
    }

    /// Best attempt per user, ranked by percentage and then by speed.
    /// Optionally restricted to a single quiz.
    pub async fn leaderboard(&self, quiz_id: Option<Uuid>) -> Result<Vec<LeaderboardEntry>> {
        let results = self.results.list_results().await?;
        let mut best: HashMap<Uuid, QuizResult> = HashMap::new();

        for result in results {
            if let Some(filter) = quiz_id {
                if result.quiz_id != filter {
                    continue;
                }
            }
            match best.get(&result.user_id) {
                Some(current) if !beats(&result, current) => {}
                _ => {
                    best.insert(result.user_id, result);
                }
            }
        }

        let titles = self.quiz_titles().await?;
        let mut entries = Vec::with_capacity(best.len());
        for (user_id, result) in best {
            let username = match self.users.get_user(user_id).await? {
                Some(user) => user.username,
                None => "unknown".to_string(),
            };
            entries.push(LeaderboardEntry {
                user_id,
                username,
                quiz_id: result.quiz_id,
                quiz_title: titles.get(&result.quiz_id).cloned().unwrap_or_default(),
                percentage: result.percentage(),
                score: result.score,
                max_score: result.max_score,
                time_taken_seconds: result.time_taken_seconds,
                completed_at: result.completed_at,
            });
        }

        entries.sort_by(|a, b| {
            b.percentage
                .partial_cmp(&a.percentage)
                .unwrap_or(Ordering::Equal)
                .then(a.time_taken_seconds.cmp(&b.time_taken_seconds))
        });
        Ok(entries)
    }

    pub async fn admin_stats(&self, total_users: usize) -> Result<AdminStatsResponse> {
        let quizzes = self.catalog.list_quizzes().await?;
        let results = self.results.list_results().await?;

        let average_percentage = if results.is_empty() {
            0.0
        } else {
            results.iter().map(|r| r.percentage()).sum::<f64>() / results.len() as f64
        };

        Ok(AdminStatsResponse {
            total_quizzes: quizzes.len(),
            published_quizzes: quizzes.iter().filter(|q| q.is_published).count(),
            total_users,
            total_attempts: results.len(),
            average_percentage,
        })
    }

    async fn quiz_titles(&self) -> Result<HashMap<Uuid, String>> {
        let quizzes = self.catalog.list_quizzes().await?;
        Ok(quizzes.into_iter().map(|q| (q.id, q.title)).collect())
    }
}

/// Whether `candidate` is a strictly better leaderboard entry than
/// `current`: higher percentage, or the same percentage finished faster.
fn beats(candidate: &QuizResult, current: &QuizResult) -> bool {
    let cand = candidate.percentage();
    let curr = current.percentage();
    if cand != curr {
        return cand > curr;
    }
    candidate.time_taken_seconds < current.time_taken_seconds
}
