//! Repository trait definitions
//!
//! These traits define the contract for data access.
//! Implementations live in the infrastructure layer.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::DomainError;

/// One page of results with enough information to render pagination links
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

/// Organisation data used by role forms and filters
#[derive(Debug, Clone, Serialize)]
pub struct OrganisationOption {
    pub id: i32,
    pub name: String,
    pub worldwide: bool,
}

/// Role row for the admin index
#[derive(Debug, Clone, Serialize)]
pub struct RoleSummary {
    pub id: i32,
    pub name: String,
    pub role_type: String,
    pub kind: String,
    pub permanent_secretary: bool,
    pub cabinet_member: bool,
    pub organisations: Vec<String>,
    pub current_people: Vec<String>,
}

/// Full role as edited in the admin
#[derive(Debug, Clone, Serialize)]
pub struct Role {
    pub id: i32,
    pub name: String,
    pub role_type: String,
    pub kind: String,
    pub permanent_secretary: bool,
    pub cabinet_member: bool,
    pub whip_organisation_id: Option<i32>,
    pub role_payment_type_id: Option<i32>,
    pub attends_cabinet_type_id: Option<i32>,
    pub responsibilities: Option<String>,
    pub organisation_ids: Vec<i32>,
    pub worldwide_organisation_ids: Vec<i32>,
}

/// Permitted role attributes submitted by the admin form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role_type: String,
    pub whip_organisation_id: Option<i32>,
    pub role_payment_type_id: Option<i32>,
    pub attends_cabinet_type_id: Option<i32>,
    pub responsibilities: Option<String>,
    #[serde(default)]
    pub organisation_ids: Vec<i32>,
    #[serde(default)]
    pub worldwide_organisation_ids: Vec<i32>,
}

/// What still points at a role
#[derive(Debug, Clone, Copy, Default)]
pub struct RoleDependants {
    pub appointments: u64,
    pub organisations: u64,
    pub documents: u64,
}

impl RoleDependants {
    pub fn is_empty(&self) -> bool {
        self.appointments == 0 && self.organisations == 0 && self.documents == 0
    }
}

/// Repository trait for Role entity
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// All roles with their organisation names and current people
    async fn find_all(&self) -> Result<Vec<RoleSummary>, DomainError>;

    /// Find a role by ID
    async fn find_by_id(&self, id: i32) -> Result<Option<Role>, DomainError>;

    /// Create a role from an already validated form
    async fn create(&self, form: &RoleForm) -> Result<Role, DomainError>;

    /// Update a role from an already validated form
    async fn update(&self, id: i32, form: &RoleForm) -> Result<Role, DomainError>;

    /// Count appointments, organisations and documents attached to a role
    async fn dependants(&self, id: i32) -> Result<RoleDependants, DomainError>;

    /// Delete a role by ID
    async fn delete(&self, id: i32) -> Result<(), DomainError>;

    /// Organisations a role can belong to, domestic and worldwide
    async fn organisation_options(&self) -> Result<Vec<OrganisationOption>, DomainError>;
}

/// Statistics announcement for admin responses
#[derive(Debug, Clone, Serialize)]
pub struct StatisticsAnnouncement {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub summary: String,
    pub organisation_id: Option<i32>,
    pub organisation_name: Option<String>,
    pub current_release_date: String,
    pub release_dates: Vec<ReleaseDate>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReleaseDate {
    pub release_date: String,
    pub precision: String,
    pub confirmed: bool,
    pub created_at: String,
}

/// Input for creating or updating an announcement
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatisticsAnnouncementForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub summary: String,
    pub organisation_id: Option<i32>,
    /// RFC 3339 or YYYY-MM-DD
    #[serde(default)]
    pub release_date: String,
    pub precision: Option<String>,
    #[serde(default)]
    pub confirmed: bool,
}

/// Resolved filter criteria for announcement queries
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnouncementQuery {
    pub title: Option<String>,
    pub organisation_id: Option<i32>,
    pub page: u64,
    pub per_page: u64,
}

/// Repository trait for StatisticsAnnouncement entity
#[async_trait]
pub trait StatisticsAnnouncementRepository: Send + Sync {
    /// One page of announcements matching the query, soonest release first
    async fn search(
        &self,
        query: &AnnouncementQuery,
    ) -> Result<Page<StatisticsAnnouncement>, DomainError>;

    /// Find an announcement by ID, with its release date history
    async fn find_by_id(&self, id: i32) -> Result<Option<StatisticsAnnouncement>, DomainError>;

    /// Create an announcement and its first release date
    async fn create(
        &self,
        form: &StatisticsAnnouncementForm,
    ) -> Result<StatisticsAnnouncement, DomainError>;

    /// Update an announcement, recording a new release date when it moved
    async fn update(
        &self,
        id: i32,
        form: &StatisticsAnnouncementForm,
    ) -> Result<StatisticsAnnouncement, DomainError>;

    /// Delete an announcement and its release dates
    async fn delete(&self, id: i32) -> Result<(), DomainError>;

    /// Organisations an announcement can be filed under
    async fn organisation_options(&self) -> Result<Vec<OrganisationOption>, DomainError>;
}
