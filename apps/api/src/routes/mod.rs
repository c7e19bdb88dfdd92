pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::state::AppState;
use crate::{leads, news, profile, sync};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Profile
        .route(
            "/api/v1/profile",
            get(profile::handlers::handle_get_profile)
                .delete(profile::handlers::handle_delete_profile),
        )
        .route(
            "/api/v1/profile/analyze",
            post(profile::handlers::handle_analyze),
        )
        .route(
            "/api/v1/profile/keywords/:index",
            patch(profile::handlers::handle_adjust_keyword),
        )
        // Refresh
        .route("/api/v1/sync", post(sync::handle_sync))
        // Leads
        .route("/api/v1/leads", get(leads::handlers::handle_list_leads))
        .route("/api/v1/pipeline", get(leads::handlers::handle_pipeline))
        .route(
            "/api/v1/leads/:id/status",
            patch(leads::handlers::handle_set_status),
        )
        .route(
            "/api/v1/leads/:id/outreach",
            post(leads::handlers::handle_generate_outreach),
        )
        // News
        .route("/api/v1/news", get(news::handlers::handle_list_news))
        .with_state(state)
}
