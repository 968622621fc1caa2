//! Statistics announcement admin: the index filter and CRUD validation

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;

use crate::domain::{
    AnnouncementQuery, DomainError, Page, StatisticsAnnouncement, StatisticsAnnouncementForm,
    StatisticsAnnouncementRepository,
};
use crate::infrastructure::config::DEFAULT_PAGE_SIZE;

pub const PRECISIONS: [&str; 3] = ["exact", "one_month", "two_month"];

/// Raw filter options as they arrive on the query string
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterOptions {
    pub title: Option<String>,
    pub organisation_id: Option<String>,
    pub page: Option<String>,
}

pub struct StatisticsAnnouncementFilter {
    options: FilterOptions,
    per_page: u64,
}

impl StatisticsAnnouncementFilter {
    pub fn new(options: FilterOptions) -> Self {
        Self {
            options,
            per_page: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn per_page(mut self, per_page: u64) -> Self {
        self.per_page = per_page.max(1);
        self
    }

    /// Blank options are ignored; a bad page number falls back to the first page
    pub fn query(&self) -> Result<AnnouncementQuery, DomainError> {
        let present = |v: &Option<String>| {
            v.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        let organisation_id = match present(&self.options.organisation_id) {
            Some(raw) => Some(
                raw.parse::<i32>()
                    .map_err(|_| DomainError::invalid("Organisation is not valid"))?,
            ),
            None => None,
        };

        let page = present(&self.options.page)
            .and_then(|p| p.parse::<u64>().ok())
            .filter(|&p| p > 0)
            .unwrap_or(1);

        Ok(AnnouncementQuery {
            title: present(&self.options.title),
            organisation_id,
            page,
            per_page: self.per_page,
        })
    }

    pub async fn statistics_announcements(
        &self,
        repo: &dyn StatisticsAnnouncementRepository,
    ) -> Result<Page<StatisticsAnnouncement>, DomainError> {
        let query = self.query()?;
        tracing::debug!(?query, "Filtering statistics announcements");
        repo.search(&query).await
    }
}

/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM` and plain dates; returns RFC 3339 UTC
pub fn normalise_release_date(value: &str) -> Option<String> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc).to_rfc3339());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M") {
        return Some(dt.and_utc().to_rfc3339());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(9, 30, 0))
        .map(|dt| dt.and_utc().to_rfc3339())
}

/// Validated copy of the form, with the release date normalised
pub fn validate_form(
    form: &StatisticsAnnouncementForm,
    organisation_ids: &[i32],
) -> Result<StatisticsAnnouncementForm, DomainError> {
    let mut errors = Vec::new();

    if form.title.trim().is_empty() {
        errors.push("Title can't be blank".to_string());
    }
    if form.summary.trim().is_empty() {
        errors.push("Summary can't be blank".to_string());
    }

    let release_date = if form.release_date.trim().is_empty() {
        errors.push("Release date can't be blank".to_string());
        None
    } else {
        let parsed = normalise_release_date(&form.release_date);
        if parsed.is_none() {
            errors.push("Release date is not a valid date".to_string());
        }
        parsed
    };

    if let Some(precision) = form.precision.as_deref()
        && !PRECISIONS.contains(&precision)
    {
        errors.push("Precision is not valid".to_string());
    }

    if let Some(id) = form.organisation_id
        && !organisation_ids.contains(&id)
    {
        errors.push("Organisation is not valid".to_string());
    }

    if !errors.is_empty() {
        return Err(DomainError::Validation(errors));
    }

    Ok(StatisticsAnnouncementForm {
        title: form.title.trim().to_string(),
        summary: form.summary.trim().to_string(),
        release_date: release_date.unwrap_or_default(),
        ..form.clone()
    })
}

async fn validated(
    repo: &dyn StatisticsAnnouncementRepository,
    form: &StatisticsAnnouncementForm,
) -> Result<StatisticsAnnouncementForm, DomainError> {
    let organisation_ids: Vec<i32> = repo
        .organisation_options()
        .await?
        .into_iter()
        .map(|o| o.id)
        .collect();
    validate_form(form, &organisation_ids)
}

pub async fn get_announcement(
    repo: &dyn StatisticsAnnouncementRepository,
    id: i32,
) -> Result<StatisticsAnnouncement, DomainError> {
    repo.find_by_id(id)
        .await?
        .ok_or(DomainError::NotFound("Statistics announcement"))
}

pub async fn create_announcement(
    repo: &dyn StatisticsAnnouncementRepository,
    form: &StatisticsAnnouncementForm,
) -> Result<StatisticsAnnouncement, DomainError> {
    let form = validated(repo, form).await?;
    let announcement = repo.create(&form).await?;
    tracing::info!(announcement_id = announcement.id, "Statistics announcement created");
    Ok(announcement)
}

pub async fn update_announcement(
    repo: &dyn StatisticsAnnouncementRepository,
    id: i32,
    form: &StatisticsAnnouncementForm,
) -> Result<StatisticsAnnouncement, DomainError> {
    get_announcement(repo, id).await?;
    let form = validated(repo, form).await?;
    let announcement = repo.update(id, &form).await?;
    tracing::info!(
        announcement_id = id,
        release_date = %announcement.current_release_date,
        "Statistics announcement updated"
    );
    Ok(announcement)
}

/// Returns the title of the deleted announcement
pub async fn destroy_announcement(
    repo: &dyn StatisticsAnnouncementRepository,
    id: i32,
) -> Result<String, DomainError> {
    let announcement = get_announcement(repo, id).await?;
    repo.delete(id).await?;
    tracing::info!(announcement_id = id, "Statistics announcement destroyed");
    Ok(announcement.title)
}
