//! SeaORM implementation of StatisticsAnnouncementRepository

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use crate::domain::{
    AnnouncementQuery, DomainError, OrganisationOption, Page, ReleaseDate, StatisticsAnnouncement,
    StatisticsAnnouncementForm, StatisticsAnnouncementRepository,
};
use crate::models::statistics_announcement::{self, Column, Entity as AnnouncementEntity};
use crate::models::{organisation, statistics_announcement_date};
use crate::utils::slug::parameterize;

const DEFAULT_PRECISION: &str = "exact";

/// `%term%` with LIKE wildcards in `term` matched literally (escape `\`)
fn contains_pattern(term: &str) -> LikeExpr {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    LikeExpr::new(escaped).escape('\\')
}

/// SeaORM-based implementation of StatisticsAnnouncementRepository
pub struct SeaOrmStatisticsAnnouncementRepository {
    db: DatabaseConnection,
}

impl SeaOrmStatisticsAnnouncementRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn organisation_names(&self, ids: Vec<i32>) -> Result<HashMap<i32, String>, DomainError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        Ok(organisation::Entity::find()
            .filter(organisation::Column::Id.is_in(ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|o| (o.id, o.name))
            .collect())
    }
}

fn to_dto(
    model: statistics_announcement::Model,
    organisation_name: Option<String>,
    release_dates: Vec<ReleaseDate>,
) -> StatisticsAnnouncement {
    StatisticsAnnouncement {
        id: model.id,
        title: model.title,
        slug: model.slug,
        summary: model.summary,
        organisation_id: model.organisation_id,
        organisation_name,
        current_release_date: model.current_release_date,
        release_dates,
    }
}

async fn record_release_date<C: ConnectionTrait>(
    conn: &C,
    announcement_id: i32,
    form: &StatisticsAnnouncementForm,
    now: &str,
) -> Result<(), DomainError> {
    statistics_announcement_date::ActiveModel {
        statistics_announcement_id: Set(announcement_id),
        release_date: Set(form.release_date.clone()),
        precision: Set(form
            .precision
            .clone()
            .unwrap_or_else(|| DEFAULT_PRECISION.to_string())),
        confirmed: Set(form.confirmed),
        created_at: Set(now.to_string()),
        ..Default::default()
    }
    .insert(conn)
    .await?;
    Ok(())
}

#[async_trait]
impl StatisticsAnnouncementRepository for SeaOrmStatisticsAnnouncementRepository {
    async fn search(
        &self,
        query: &AnnouncementQuery,
    ) -> Result<Page<StatisticsAnnouncement>, DomainError> {
        let mut select = AnnouncementEntity::find();

        if let Some(title) = &query.title {
            select = select.filter(Expr::col(Column::Title).like(contains_pattern(title)));
        }

        if let Some(organisation_id) = query.organisation_id {
            select = select.filter(Column::OrganisationId.eq(organisation_id));
        }

        let select = select
            .order_by_asc(Column::CurrentReleaseDate)
            .order_by_asc(Column::Id);

        let per_page = query.per_page.max(1);
        let paginator = select.paginate(&self.db, per_page);
        let total = paginator.num_items().await?;
        let page = query.page.max(1);
        let models = paginator.fetch_page(page - 1).await?;

        let names = self
            .organisation_names(models.iter().filter_map(|m| m.organisation_id).collect())
            .await?;

        let items = models
            .into_iter()
            .map(|m| {
                let name = m.organisation_id.and_then(|id| names.get(&id).cloned());
                to_dto(m, name, Vec::new())
            })
            .collect();

        Ok(Page {
            items,
            total,
            page,
            per_page,
            total_pages: total.div_ceil(per_page),
        })
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<StatisticsAnnouncement>, DomainError> {
        let Some(model) = AnnouncementEntity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let release_dates = statistics_announcement_date::Entity::find()
            .filter(statistics_announcement_date::Column::StatisticsAnnouncementId.eq(id))
            .order_by_asc(statistics_announcement_date::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(|d| ReleaseDate {
                release_date: d.release_date,
                precision: d.precision,
                confirmed: d.confirmed,
                created_at: d.created_at,
            })
            .collect();

        let names = self
            .organisation_names(model.organisation_id.into_iter().collect())
            .await?;
        let name = model.organisation_id.and_then(|id| names.get(&id).cloned());

        Ok(Some(to_dto(model, name, release_dates)))
    }

    async fn create(
        &self,
        form: &StatisticsAnnouncementForm,
    ) -> Result<StatisticsAnnouncement, DomainError> {
        let now = chrono::Utc::now().to_rfc3339();
        let txn = self.db.begin().await?;

        let model = statistics_announcement::ActiveModel {
            title: Set(form.title.trim().to_string()),
            slug: Set(parameterize(&form.title)),
            summary: Set(form.summary.trim().to_string()),
            organisation_id: Set(form.organisation_id),
            current_release_date: Set(form.release_date.clone()),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        record_release_date(&txn, model.id, form, &now).await?;
        txn.commit().await?;

        self.find_by_id(model.id)
            .await?
            .ok_or(DomainError::NotFound("Statistics announcement"))
    }

    async fn update(
        &self,
        id: i32,
        form: &StatisticsAnnouncementForm,
    ) -> Result<StatisticsAnnouncement, DomainError> {
        let now = chrono::Utc::now().to_rfc3339();
        let txn = self.db.begin().await?;

        let existing = AnnouncementEntity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(DomainError::NotFound("Statistics announcement"))?;

        let latest = statistics_announcement_date::Entity::find()
            .filter(statistics_announcement_date::Column::StatisticsAnnouncementId.eq(id))
            .order_by_desc(statistics_announcement_date::Column::Id)
            .one(&txn)
            .await?;

        let precision = form.precision.as_deref().unwrap_or(DEFAULT_PRECISION);
        let date_changed = match &latest {
            Some(d) => {
                d.release_date != form.release_date
                    || d.precision != precision
                    || d.confirmed != form.confirmed
            }
            None => true,
        };

        let mut active: statistics_announcement::ActiveModel = existing.into();
        active.title = Set(form.title.trim().to_string());
        active.slug = Set(parameterize(&form.title));
        active.summary = Set(form.summary.trim().to_string());
        active.organisation_id = Set(form.organisation_id);
        active.current_release_date = Set(form.release_date.clone());
        active.updated_at = Set(now.clone());
        active.update(&txn).await?;

        if date_changed {
            record_release_date(&txn, id, form, &now).await?;
            tracing::debug!(announcement_id = id, release_date = %form.release_date, "Recorded new release date");
        }

        txn.commit().await?;

        self.find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound("Statistics announcement"))
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let txn = self.db.begin().await?;
        statistics_announcement_date::Entity::delete_many()
            .filter(statistics_announcement_date::Column::StatisticsAnnouncementId.eq(id))
            .exec(&txn)
            .await?;
        let result = AnnouncementEntity::delete_by_id(id).exec(&txn).await?;
        if result.rows_affected == 0 {
            return Err(DomainError::NotFound("Statistics announcement"));
        }
        txn.commit().await?;
        Ok(())
    }

    async fn organisation_options(&self) -> Result<Vec<OrganisationOption>, DomainError> {
        let organisations = organisation::Entity::find()
            .filter(organisation::Column::Worldwide.eq(false))
            .order_by_asc(organisation::Column::Name)
            .all(&self.db)
            .await?;

        Ok(organisations
            .into_iter()
            .map(|o| OrganisationOption {
                id: o.id,
                name: o.name,
                worldwide: o.worldwide,
            })
            .collect())
    }
}
