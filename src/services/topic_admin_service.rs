//! Topic admin CRUD

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::{Deserialize, Serialize};

use super::DestroyOutcome;
use crate::domain::DomainError;
use crate::models::{topic, topic_membership};
use crate::utils::slug::parameterize;

pub const DESTROY_REFUSED: &str = "Cannot destroy a topic with associated documents";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopicForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub featured: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Topic {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub featured: bool,
}

impl From<topic::Model> for Topic {
    fn from(model: topic::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            slug: model.slug,
            description: model.description,
            featured: model.featured,
        }
    }
}

pub async fn list_topics(db: &DatabaseConnection) -> Result<Vec<Topic>, DomainError> {
    Ok(topic::Entity::find()
        .order_by_asc(topic::Column::Name)
        .all(db)
        .await?
        .into_iter()
        .map(Topic::from)
        .collect())
}

pub async fn get_topic(db: &DatabaseConnection, id: i32) -> Result<Topic, DomainError> {
    find_model(db, id).await.map(Topic::from)
}

async fn find_model(db: &DatabaseConnection, id: i32) -> Result<topic::Model, DomainError> {
    topic::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DomainError::NotFound("Topic"))
}

/// Name and description required; the name must yield a slug that no other
/// topic has
async fn validate(
    db: &DatabaseConnection,
    form: &TopicForm,
    except_id: Option<i32>,
) -> Result<(), DomainError> {
    let mut errors = Vec::new();
    let name = form.name.trim();

    if name.is_empty() {
        errors.push("Name can't be blank".to_string());
    } else if parameterize(name).is_empty() {
        errors.push("Name must contain letters or numbers".to_string());
    } else {
        let mut clash = topic::Entity::find().filter(
            topic::Column::Name
                .eq(name)
                .or(topic::Column::Slug.eq(parameterize(name))),
        );
        if let Some(id) = except_id {
            clash = clash.filter(topic::Column::Id.ne(id));
        }
        if clash.count(db).await? > 0 {
            errors.push("Name has already been taken".to_string());
        }
    }

    if form.description.trim().is_empty() {
        errors.push("Description can't be blank".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(DomainError::Validation(errors))
    }
}

pub async fn create_topic(db: &DatabaseConnection, form: &TopicForm) -> Result<Topic, DomainError> {
    validate(db, form, None).await?;
    let now = chrono::Utc::now().to_rfc3339();
    let name = form.name.trim().to_string();

    let model = topic::ActiveModel {
        slug: Set(parameterize(&name)),
        name: Set(name),
        description: Set(form.description.trim().to_string()),
        featured: Set(form.featured),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await?;

    tracing::info!(topic_id = model.id, name = %model.name, "Topic created");
    Ok(model.into())
}

pub async fn update_topic(
    db: &DatabaseConnection,
    id: i32,
    form: &TopicForm,
) -> Result<Topic, DomainError> {
    let existing = find_model(db, id).await?;
    validate(db, form, Some(id)).await?;
    let name = form.name.trim().to_string();

    let mut active: topic::ActiveModel = existing.into();
    active.slug = Set(parameterize(&name));
    active.name = Set(name);
    active.description = Set(form.description.trim().to_string());
    active.featured = Set(form.featured);
    active.updated_at = Set(chrono::Utc::now().to_rfc3339());

    Ok(active.update(db).await?.into())
}

pub async fn destroy_topic(db: &DatabaseConnection, id: i32) -> Result<DestroyOutcome, DomainError> {
    let existing = find_model(db, id).await?;

    let memberships = topic_membership::Entity::find()
        .filter(topic_membership::Column::TopicId.eq(id))
        .count(db)
        .await?;
    if memberships > 0 {
        tracing::info!(topic_id = id, memberships, "Refusing to destroy topic in use");
        return Ok(DestroyOutcome::Refused {
            name: existing.name,
        });
    }

    topic::Entity::delete_by_id(id).exec(db).await?;
    tracing::info!(topic_id = id, "Topic destroyed");
    Ok(DestroyOutcome::Destroyed {
        name: existing.name,
    })
}
