pub mod handlers;
pub mod middleware;
pub mod state;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, services::ServeDir, trace::TraceLayer,
};

use crate::{config::Settings, directory::LocationDirectory, service::ServiceContext};
use state::AppState;

pub fn create_app(
    service_context: Arc<ServiceContext>,
    directory: Arc<LocationDirectory>,
    settings: Arc<Settings>,
) -> Router {
    let app_state = AppState::new(service_context, directory, settings.clone());

    Router::new()
        // Root and health endpoints
        .route("/", get(handlers::root::root))
        .route("/health", get(handlers::root::health_check))
        // Auth routes
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout))
        // Public feeds (no session required)
        .route(
            "/feeds/announcements.rss",
            get(handlers::announcements::rss_feed),
        )
        // Everything else needs a session
        .nest("/api", api_routes(app_state.clone()))
        // Uploaded event images
        .nest_service("/uploads", ServeDir::new(&settings.uploads.dir))
        .with_state(app_state)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(handlers::dashboard::overview))
        .nest("/announcements", announcement_routes())
        .nest("/events", event_routes())
        .nest("/lost-found", lost_found_routes())
        .nest("/cafeteria", cafeteria_routes())
        .nest("/timetable", timetable_routes())
        .nest("/navigation", navigation_routes())
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            middleware::auth::require_auth,
        ))
}

fn announcement_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::announcements::list))
        .route("/", post(handlers::announcements::create))
        .route("/emergency", get(handlers::announcements::emergency))
        .route("/:id", get(handlers::announcements::get))
        .route("/:id/archive", post(handlers::announcements::archive))
}

fn event_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::events::list))
        .route("/", post(handlers::events::create))
        .route("/past", get(handlers::events::past))
        .route("/:id", get(handlers::events::get))
        .route("/:id/rsvp", post(handlers::events::rsvp))
}

fn lost_found_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::lost_found::list))
        .route("/report-lost", post(handlers::lost_found::report_lost))
        .route("/report-found", post(handlers::lost_found::report_found))
        .route("/:id", get(handlers::lost_found::get))
        .route("/:id/claim", post(handlers::lost_found::claim))
}

fn cafeteria_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::cafeteria::overview))
        .route("/report", post(handlers::cafeteria::report))
        .route("/status", get(handlers::cafeteria::current_status))
        .route("/history", get(handlers::cafeteria::history))
}

fn timetable_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::timetable::list))
        .route("/", post(handlers::timetable::create))
        .route("/my-exams", get(handlers::timetable::my_exams))
        .route("/export", get(handlers::timetable::export_csv))
        .route("/:id/deactivate", post(handlers::timetable::deactivate))
}

fn navigation_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::navigation::list))
        .route("/map", get(handlers::navigation::map))
        .route("/:id", get(handlers::navigation::get))
}
