//! Application state containing repositories and shared resources

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::domain::{RoleRepository, StatisticsAnnouncementRepository};
use crate::infrastructure::config::DEFAULT_PAGE_SIZE;
use crate::infrastructure::{SeaOrmRoleRepository, SeaOrmStatisticsAnnouncementRepository};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    /// Rows per page on paginated admin indexes
    pub page_size: u64,
    pub role_repo: Arc<dyn RoleRepository>,
    pub announcement_repo: Arc<dyn StatisticsAnnouncementRepository>,
}

impl AppState {
    /// Create a new AppState with all repositories initialized
    pub fn new(db: DatabaseConnection) -> Self {
        Self::with_page_size(db, DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(db: DatabaseConnection, page_size: u64) -> Self {
        let role_repo = Arc::new(SeaOrmRoleRepository::new(db.clone()));
        let announcement_repo = Arc::new(SeaOrmStatisticsAnnouncementRepository::new(db.clone()));

        Self {
            db,
            page_size,
            role_repo,
            announcement_repo,
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

// Implement FromRef to allow extracting DatabaseConnection from AppState
impl axum::extract::FromRef<AppState> for DatabaseConnection {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}
