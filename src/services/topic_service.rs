//! Public topic pages: the topic index with its featured topic, and a
//! single topic with its policies, news and recently changed documents.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter, QueryOrder, QuerySelect,
};
use serde::Serialize;

use crate::domain::{DocumentType, DomainError, EditionState};
use crate::models::{edition, edition_relation, topic, topic_membership};

pub const FEATURED_POLICY_LIMIT: usize = 2;
pub const FEATURED_NEWS_LIMIT: usize = 2;

#[derive(Debug, Clone, Serialize)]
pub struct DocumentSummary {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub summary: String,
    pub document_type: String,
    pub published_at: Option<String>,
}

impl From<edition::Model> for DocumentSummary {
    fn from(model: edition::Model) -> Self {
        let document_type = DocumentType::parse(&model.document_type)
            .map(|t| t.display_name().to_string())
            .unwrap_or(model.document_type);
        Self {
            id: model.id,
            title: model.title,
            slug: model.slug,
            summary: model.summary,
            document_type,
            published_at: model.published_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TopicSummary {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: String,
}

impl From<topic::Model> for TopicSummary {
    fn from(model: topic::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            slug: model.slug,
            description: model.description,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TopicPage {
    #[serde(flatten)]
    pub topic: TopicSummary,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub policies: Vec<DocumentSummary>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub news_articles: Vec<DocumentSummary>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub recently_changed_documents: Vec<DocumentSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeaturedTopic {
    #[serde(flatten)]
    pub topic: TopicSummary,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub policies: Vec<DocumentSummary>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub news_articles: Vec<DocumentSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopicIndex {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub topics: Vec<TopicSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_topic: Option<FeaturedTopic>,
}

fn published() -> sea_orm::sea_query::SimpleExpr {
    edition::Column::State.eq(EditionState::Published.as_str())
}

/// Published editions of one type in a topic, newest first
async fn published_in_topic(
    db: &DatabaseConnection,
    topic: &topic::Model,
    document_type: DocumentType,
    limit: Option<u64>,
) -> Result<Vec<edition::Model>, DomainError> {
    let mut query = topic
        .find_related(edition::Entity)
        .filter(published())
        .filter(edition::Column::DocumentType.eq(document_type.as_str()))
        .order_by_desc(edition::Column::PublishedAt)
        .order_by_asc(edition::Column::Id);
    if let Some(limit) = limit {
        query = query.limit(limit);
    }
    Ok(query.all(db).await?)
}

/// Published non-policy editions related to the given policies, whichever
/// side of the relation they sit on
async fn recently_changed(
    db: &DatabaseConnection,
    policy_ids: &[i32],
) -> Result<Vec<edition::Model>, DomainError> {
    if policy_ids.is_empty() {
        return Ok(Vec::new());
    }

    let outgoing = edition_relation::Entity::find()
        .filter(edition_relation::Column::EditionId.is_in(policy_ids.to_vec()))
        .all(db)
        .await?;
    let incoming = edition_relation::Entity::find()
        .filter(edition_relation::Column::RelatedEditionId.is_in(policy_ids.to_vec()))
        .all(db)
        .await?;

    let related: HashSet<i32> = outgoing
        .into_iter()
        .map(|r| r.related_edition_id)
        .chain(incoming.into_iter().map(|r| r.edition_id))
        .collect();
    if related.is_empty() {
        return Ok(Vec::new());
    }

    Ok(edition::Entity::find()
        .filter(edition::Column::Id.is_in(related))
        .filter(published())
        .filter(edition::Column::DocumentType.ne(DocumentType::Policy.as_str()))
        .order_by_desc(edition::Column::PublishedAt)
        .order_by_asc(edition::Column::Id)
        .all(db)
        .await?)
}

/// Ids of topics holding at least one published edition
async fn topic_ids_with_content(db: &DatabaseConnection) -> Result<HashSet<i32>, DomainError> {
    let published_ids: Vec<i32> = edition::Entity::find()
        .select_only()
        .column(edition::Column::Id)
        .filter(published())
        .into_tuple()
        .all(db)
        .await?;
    if published_ids.is_empty() {
        return Ok(HashSet::new());
    }

    Ok(topic_membership::Entity::find()
        .filter(topic_membership::Column::EditionId.is_in(published_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|m| m.topic_id)
        .collect())
}

pub async fn show(db: &DatabaseConnection, slug: &str) -> Result<TopicPage, DomainError> {
    let topic = topic::Entity::find()
        .filter(topic::Column::Slug.eq(slug))
        .one(db)
        .await?
        .ok_or(DomainError::NotFound("Topic"))?;

    let policies = published_in_topic(db, &topic, DocumentType::Policy, None).await?;
    let news_articles = published_in_topic(db, &topic, DocumentType::NewsArticle, None).await?;
    let policy_ids: Vec<i32> = policies.iter().map(|p| p.id).collect();
    let recent = recently_changed(db, &policy_ids).await?;

    Ok(TopicPage {
        topic: topic.into(),
        policies: policies.into_iter().map(Into::into).collect(),
        news_articles: news_articles.into_iter().map(Into::into).collect(),
        recently_changed_documents: recent.into_iter().map(Into::into).collect(),
    })
}

pub async fn index(db: &DatabaseConnection) -> Result<TopicIndex, DomainError> {
    let with_content = topic_ids_with_content(db).await?;
    let topics: Vec<TopicSummary> = topic::Entity::find()
        .order_by_asc(topic::Column::Name)
        .all(db)
        .await?
        .into_iter()
        .filter(|t| with_content.contains(&t.id))
        .map(Into::into)
        .collect();

    let featured_topic = match FeaturedTopicChooser::new(db).choose_topic().await? {
        Some(topic) => {
            let policies = published_in_topic(
                db,
                &topic,
                DocumentType::Policy,
                Some(FEATURED_POLICY_LIMIT as u64),
            )
            .await?;
            let news_articles = published_in_topic(
                db,
                &topic,
                DocumentType::NewsArticle,
                Some(FEATURED_NEWS_LIMIT as u64),
            )
            .await?;
            Some(FeaturedTopic {
                topic: topic.into(),
                policies: policies.into_iter().map(Into::into).collect(),
                news_articles: news_articles.into_iter().map(Into::into).collect(),
            })
        }
        None => None,
    };

    Ok(TopicIndex {
        topics,
        featured_topic,
    })
}

/// Picks the topic promoted at the top of the topic index
pub struct FeaturedTopicChooser<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> FeaturedTopicChooser<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// A featured topic when one exists, otherwise any topic with published content
    pub async fn choose_topic(&self) -> Result<Option<topic::Model>, DomainError> {
        match self.choose_random_featured_topic().await? {
            Some(topic) => Ok(Some(topic)),
            None => self.choose_random_topic().await,
        }
    }

    pub async fn choose_random_featured_topic(&self) -> Result<Option<topic::Model>, DomainError> {
        let featured = topic::Entity::find()
            .filter(topic::Column::Featured.eq(true))
            .all(self.db)
            .await?;
        Ok(featured.choose(&mut rand::thread_rng()).cloned())
    }

    pub async fn choose_random_topic(&self) -> Result<Option<topic::Model>, DomainError> {
        let with_content = topic_ids_with_content(self.db).await?;
        if with_content.is_empty() {
            return Ok(None);
        }
        let candidates = topic::Entity::find()
            .filter(topic::Column::Id.is_in(with_content))
            .all(self.db)
            .await?;
        Ok(candidates.choose(&mut rand::thread_rng()).cloned())
    }
}
