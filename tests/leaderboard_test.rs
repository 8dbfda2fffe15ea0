use chrono::{Duration, Utc};
use quizmaster_backend::models::quiz::Quiz;
use quizmaster_backend::models::result::QuizResult;
use quizmaster_backend::models::user::{User, ROLE_STUDENT};
use quizmaster_backend::services::result_service::ResultService;
use quizmaster_backend::store::memory::{MemoryQuizCatalog, MemoryResultStore, MemoryUserStore};
use std::sync::Arc;
use uuid::Uuid;

fn student(username: &str) -> User {
    User {
        id: Uuid::new_v4(),
        username: username.to_string(),
        email: format!("{}@example.com", username),
        password: "password123".to_string(),
        role: ROLE_STUDENT.to_string(),
        created_at: Utc::now(),
    }
}

fn quiz(title: &str, is_published: bool) -> Quiz {
    Quiz {
        id: Uuid::new_v4(),
        title: title.to_string(),
        description: String::new(),
        time_limit_minutes: 10,
        questions: Vec::new(),
        created_by: Uuid::new_v4(),
        is_published,
    }
}

fn attempt(user: &User, quiz: &Quiz, score: i32, max: i32, seconds: i32, minutes_ago: i64) -> QuizResult {
    QuizResult {
        id: Uuid::new_v4(),
        user_id: user.id,
        quiz_id: quiz.id,
        score,
        max_score: max,
        time_taken_seconds: seconds,
        completed_at: Utc::now() - Duration::minutes(minutes_ago),
        answers: Vec::new(),
    }
}

struct Fixture {
    service: ResultService,
    alice: User,
    networks: Quiz,
    algorithms: Quiz,
}

/// Three students, two quizzes, five attempts:
///   alice    networks    50% in 300s   (older)
///   alice    networks    80% in 400s
///   bob      networks    80% in 350s
///   cara     networks    60% in 200s
///   alice    algorithms 100% in 100s   (newest)
fn fixture() -> Fixture {
    let alice = student("alice");
    let bob = student("bob");
    let cara = student("cara");
    let networks = quiz("Networks", true);
    let algorithms = quiz("Algorithms", false);

    let results = vec![
        attempt(&alice, &networks, 10, 20, 300, 50),
        attempt(&alice, &networks, 16, 20, 400, 40),
        attempt(&bob, &networks, 16, 20, 350, 30),
        attempt(&cara, &networks, 12, 20, 200, 20),
        attempt(&alice, &algorithms, 30, 30, 100, 10),
    ];

    let service = ResultService::new(
        Arc::new(MemoryResultStore::new(results)),
        Arc::new(MemoryUserStore::new(vec![
            alice.clone(),
            bob.clone(),
            cara.clone(),
        ])),
        Arc::new(MemoryQuizCatalog::new(vec![
            networks.clone(),
            algorithms.clone(),
        ])),
    );

    Fixture {
        service,
        alice,
        networks,
        algorithms,
    }
}

#[tokio::test]
async fn only_the_best_attempt_per_user_is_ranked() {
    let fx = fixture();

    let board = fx.service.leaderboard(Some(fx.networks.id)).await.unwrap();
    assert_eq!(board.len(), 3);
    let alice_entry = board.iter().find(|e| e.username == "alice").unwrap();
    assert_eq!(alice_entry.percentage, 80.0);
    assert_eq!(alice_entry.score, 16);
    assert_eq!(alice_entry.quiz_title, "Networks");
}

#[tokio::test]
async fn equal_percentages_rank_the_faster_finish_higher() {
    let fx = fixture();

    let board = fx.service.leaderboard(Some(fx.networks.id)).await.unwrap();
    let order: Vec<&str> = board.iter().map(|e| e.username.as_str()).collect();
    // bob and alice both sit at 80%, bob finished 50 seconds sooner.
    assert_eq!(order, vec!["bob", "alice", "cara"]);
    assert_eq!(board[0].time_taken_seconds, 350);
    assert_eq!(board[1].time_taken_seconds, 400);
}

#[tokio::test]
async fn the_unfiltered_board_takes_the_best_across_quizzes() {
    let fx = fixture();

    let board = fx.service.leaderboard(None).await.unwrap();
    assert_eq!(board.len(), 3);
    assert_eq!(board[0].username, "alice");
    assert_eq!(board[0].percentage, 100.0);
    assert_eq!(board[0].quiz_title, "Algorithms");
}

#[tokio::test]
async fn the_quiz_filter_drops_everyone_else() {
    let fx = fixture();

    let board = fx.service.leaderboard(Some(fx.algorithms.id)).await.unwrap();
    assert_eq!(board.len(), 1);
    assert_eq!(board[0].username, "alice");

    let board = fx.service.leaderboard(Some(Uuid::new_v4())).await.unwrap();
    assert!(board.is_empty());
}

#[tokio::test]
async fn a_users_history_lists_newest_first_with_titles() {
    let fx = fixture();

    let history = fx.service.list_for_user(fx.alice.id).await.unwrap();
    assert_eq!(history.len(), 3);
    assert_eq!(history[0].quiz_title, "Algorithms");
    assert_eq!(history[0].percentage, 100.0);
    assert_eq!(history[1].quiz_title, "Networks");
    assert_eq!(history[1].score, 16);
    assert_eq!(history[2].score, 10);
    assert!(history[0].completed_at > history[1].completed_at);
    assert!(history[1].completed_at > history[2].completed_at);
}

#[tokio::test]
async fn admin_stats_aggregate_the_whole_store() {
    let fx = fixture();

    let stats = fx.service.admin_stats(3).await.unwrap();
    assert_eq!(stats.total_quizzes, 2);
    assert_eq!(stats.published_quizzes, 1);
    assert_eq!(stats.total_users, 3);
    assert_eq!(stats.total_attempts, 5);
    // (50 + 80 + 80 + 60 + 100) / 5
    assert!((stats.average_percentage - 74.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn an_empty_store_yields_an_empty_board_and_zeroed_stats() {
    let service = ResultService::new(
        Arc::new(MemoryResultStore::new(Vec::new())),
        Arc::new(MemoryUserStore::new(Vec::new())),
        Arc::new(MemoryQuizCatalog::new(Vec::new())),
    );

    assert!(service.leaderboard(None).await.unwrap().is_empty());
    let stats = service.admin_stats(0).await.unwrap();
    assert_eq!(stats.total_attempts, 0);
    assert_eq!(stats.average_percentage, 0.0);
}
