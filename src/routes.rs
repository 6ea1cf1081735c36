// src/routes.rs

use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderName, Method},
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::GlobalKeyExtractor,
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::{
    handlers::{ai, feedback, quiz, wall},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (quiz, wall, ai, sounds, share).
/// * Rate-limits the generative endpoints and wall writes.
/// * Applies global middleware (Trace, CORS).
/// * Serves the front-end bundle for every other path.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            HeaderName::from_static(ai::CLIENT_ID_HEADER),
        ]);

    let quiz_routes = Router::new()
        .route("/questions", get(quiz::list_questions))
        .route("/sessions", post(quiz::start_session))
        .route(
            "/sessions/{id}",
            get(quiz::get_session).delete(quiz::end_session),
        )
        .route("/sessions/{id}/answer", post(quiz::answer))
        .route("/sessions/{id}/restart", post(quiz::restart));

    // The wall is shared by every visitor; posting and clearing get their own bucket.
    let mut wall_writes = Router::new().route(
        "/",
        post(wall::create_shout_out).delete(wall::clear_wall),
    );

    match GovernorConfigBuilder::default()
        .key_extractor(GlobalKeyExtractor)
        .per_second(2)
        .burst_size(5)
        .finish()
    {
        Some(governor_conf) => {
            wall_writes = wall_writes.route_layer(GovernorLayer::new(Arc::new(governor_conf)));
        }
        None => tracing::warn!("Invalid rate limit configuration; wall writes are not rate-limited"),
    }

    let wall_routes = Router::new()
        .route("/", get(wall::list_shout_outs))
        .merge(wall_writes);

    let sound_routes = Router::new()
        .route("/", get(feedback::list_sounds))
        .route("/{effect}", get(feedback::get_sound));

    // One shared bucket: refill one request every 2 seconds, bursts of up to 5.
    let mut ai_routes = Router::new()
        .route("/persona", post(ai::generate_persona))
        .route("/ballad", post(ai::rewrite_ballad))
        .route("/album-art", post(ai::generate_album_art));

    match GovernorConfigBuilder::default()
        .key_extractor(GlobalKeyExtractor)
        .per_second(2)
        .burst_size(5)
        .finish()
    {
        Some(governor_conf) => {
            ai_routes = ai_routes.layer(GovernorLayer::new(Arc::new(governor_conf)));
        }
        None => tracing::warn!("Invalid rate limit configuration; AI routes are not rate-limited"),
    }

    let frontend = ServeDir::new(&state.config.static_dir);

    Router::new()
        .nest("/api/quiz", quiz_routes)
        .nest("/api/wall", wall_routes)
        .nest("/api/sounds", sound_routes)
        .nest("/api/ai", ai_routes)
        .route("/api/share", get(feedback::share_site))
        .fallback_service(frontend)
        // Global Middleware (applied from outside in)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
