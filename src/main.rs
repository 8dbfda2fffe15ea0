use axum::{
    routing::{get, post},
    Router,
};
use quizmaster_backend::{
    config::{get_config, init_config},
    middleware, routes, AppState,
};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let app_state = if config.seed_demo_data {
        info!("Seeding demo accounts, quizzes and roster");
        AppState::with_demo_data()
    } else {
        AppState::new()
    };

    {
        let state = app_state.clone();
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(Duration::from_secs(60)).await;
                let evicted = state.session_service.purge_finished().await;
                if evicted > 0 {
                    info!(evicted, "Evicted finished quiz sessions");
                }
            }
        });
    }

    let public_api = Router::new()
        .route("/health", get(routes::health::health))
        .route("/api/auth/register", post(routes::auth::register))
        .route("/api/auth/login", post(routes::auth::login))
        .route("/api/quizzes", get(routes::quiz::list_quizzes))
        .route("/api/quizzes/:id", get(routes::quiz::get_quiz))
        .layer(axum::middleware::from_fn_with_state(
            middleware::rate_limit::RateLimiter::per_second(config.public_rps),
            middleware::rate_limit::rps_middleware,
        ));

    let session_api = Router::new()
        .route("/api/auth/logout", post(routes::auth::logout))
        .route("/api/auth/me", get(routes::auth::me))
        .route(
            "/api/session",
            post(routes::session::load_session)
                .get(routes::session::get_session)
                .delete(routes::session::reset_session),
        )
        .route("/api/session/start", post(routes::session::start_session))
        .route("/api/session/pause", post(routes::session::pause_session))
        .route("/api/session/resume", post(routes::session::resume_session))
        .route("/api/session/next", post(routes::session::next_question))
        .route("/api/session/prev", post(routes::session::prev_question))
        .route(
            "/api/session/answer",
            axum::routing::patch(routes::session::save_answer),
        )
        .route(
            "/api/session/visibility",
            post(routes::session::report_visibility),
        )
        .route("/api/session/submit", post(routes::session::submit_session))
        .route("/api/results", get(routes::result::list_my_results))
        .route("/api/leaderboard", get(routes::result::leaderboard))
        .layer(axum::middleware::from_fn_with_state(
            app_state.clone(),
            middleware::auth::require_session,
        ))
        .layer(axum::middleware::from_fn_with_state(
            middleware::rate_limit::RateLimiter::per_second(config.public_rps),
            middleware::rate_limit::rps_middleware,
        ));

    let admin_api = Router::new()
        .route("/api/roster/subjects", get(routes::timetable::list_subjects))
        .route("/api/roster/teachers", get(routes::timetable::list_teachers))
        .route("/api/roster/classes", get(routes::timetable::list_classes))
        .route(
            "/api/timetables",
            get(routes::timetable::list_timetables).post(routes::timetable::create_timetable),
        )
        .route(
            "/api/timetables/check",
            post(routes::timetable::check_conflicts),
        )
        .route(
            "/api/timetables/generate",
            post(routes::timetable::generate_timetable),
        )
        .route(
            "/api/timetables/:id",
            get(routes::timetable::get_timetable).delete(routes::timetable::delete_timetable),
        )
        .route(
            "/api/timetables/:id/slots",
            axum::routing::put(routes::timetable::update_slots),
        )
        .route(
            "/api/timetables/:id/slots/:slot_id",
            axum::routing::patch(routes::timetable::replace_slot),
        )
        .route(
            "/api/timetables/:id/export",
            get(routes::timetable::export_timetable),
        )
        .route(
            "/api/admin/quizzes",
            get(routes::admin::list_quizzes).post(routes::admin::create_quiz),
        )
        .route(
            "/api/admin/quizzes/:id",
            axum::routing::patch(routes::admin::update_quiz).delete(routes::admin::delete_quiz),
        )
        .route("/api/admin/stats", get(routes::admin::stats))
        .layer(axum::middleware::from_fn_with_state(
            app_state.clone(),
            middleware::auth::require_admin,
        ))
        .layer(axum::middleware::from_fn_with_state(
            middleware::rate_limit::RateLimiter::per_second(config.admin_rps),
            middleware::rate_limit::rps_middleware,
        ));

    let app = public_api
        .merge(session_api)
        .merge(admin_api)
        .with_state(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
