pub mod admin_topics;
pub mod editions;
pub mod error;
pub mod health;
pub mod imports;
pub mod roles;
pub mod statistics_announcements;
pub mod topics;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::infrastructure::AppState;

/// Spreadsheets exported by departments run to a few megabytes
const IMPORT_BODY_LIMIT: usize = 20 * 1024 * 1024;

pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Roles
        .route("/admin/roles", get(roles::index).post(roles::create))
        .route("/admin/roles/new", get(roles::new))
        .route("/admin/roles/:id/edit", get(roles::edit))
        .route("/admin/roles/:id", axum::routing::put(roles::update).delete(roles::destroy))
        // Topics admin
        .route(
            "/admin/topics",
            get(admin_topics::index).post(admin_topics::create),
        )
        .route("/admin/topics/new", get(admin_topics::new))
        .route("/admin/topics/:id/edit", get(admin_topics::edit))
        .route(
            "/admin/topics/:id",
            axum::routing::put(admin_topics::update).delete(admin_topics::destroy),
        )
        // Statistics announcements
        .route(
            "/admin/statistics_announcements",
            get(statistics_announcements::index).post(statistics_announcements::create),
        )
        .route(
            "/admin/statistics_announcements/new",
            get(statistics_announcements::new),
        )
        .route(
            "/admin/statistics_announcements/:id/edit",
            get(statistics_announcements::edit),
        )
        .route(
            "/admin/statistics_announcements/:id",
            axum::routing::put(statistics_announcements::update)
                .delete(statistics_announcements::destroy),
        )
        // Sidebar
        .route("/admin/editions/:id/tabs", get(editions::tabs))
        .route("/admin/sidebar/formatting", get(editions::formatting_sidebar))
        // Imports
        .route(
            "/admin/imports/publications",
            post(imports::import_publications_csv).layer(DefaultBodyLimit::max(IMPORT_BODY_LIMIT)),
        )
        // Public topic pages
        .route("/topics", get(topics::index))
        .route("/topics/:slug", get(topics::show))
        .with_state(state)
}
