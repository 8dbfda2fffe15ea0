use crate::models::quiz::Quiz;
use crate::models::result::{AnswerRecord, UNANSWERED};
use std::collections::HashMap;

pub struct GradingService;

impl GradingService {
    /// Scores a finished attempt. Returns earned points, maximum points and
    /// a per-question record. The maximum depends only on the quiz; a
    /// question with no recorded answer is kept as `UNANSWERED` and never
    /// counts as correct.
    pub fn grade(quiz: &Quiz, answers: &HashMap<String, i32>) -> (i32, i32, Vec<AnswerRecord>) {
        let mut earned_points: i32 = 0;
        let mut max_points: i32 = 0;
        let mut records: Vec<AnswerRecord> = Vec::with_capacity(quiz.questions.len());

        for q in &quiz.questions {
            max_points += q.points;

            let selected = answers.get(&q.id).copied();
            let is_correct = selected == Some(q.correct_option);
            if is_correct {
                earned_points += q.points;
            }

            records.push(AnswerRecord {
                question_id: q.id.clone(),
                selected_option: selected.unwrap_or(UNANSWERED),
                is_correct,
            });
        }

        (earned_points, max_points, records)
    }
}
