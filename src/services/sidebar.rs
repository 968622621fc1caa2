//! Tabs shown beside an edition in the admin

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};
use serde::Serialize;

use crate::domain::{DomainError, EditionState};
use crate::models::{edition, edition_audit_entry, fact_check_request};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge {
    pub count: u64,
    /// Extra class suffix, `warning` renders as `badge badge-warning`
    pub kind: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub id: &'static str,
    pub label: &'static str,
    pub badge: Option<Badge>,
}

impl Tab {
    fn new(id: &'static str, label: &'static str) -> Self {
        Self {
            id,
            label,
            badge: None,
        }
    }

    fn with_badge(mut self, count: u64, kind: Option<&'static str>) -> Self {
        self.badge = Some(Badge { count, kind });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedBadge {
    pub count: u64,
    pub class: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SidebarTab {
    pub id: &'static str,
    pub label: &'static str,
    pub href: String,
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<RenderedBadge>,
}

/// What the edition tabs depend on
#[derive(Debug, Clone, Copy)]
pub struct EditionFacts {
    pub state: EditionState,
    pub audit_entries: u64,
    pub pending_fact_checks: u64,
}

pub fn sidebar_tabs(tabs: Vec<Tab>) -> Vec<SidebarTab> {
    tabs.into_iter()
        .enumerate()
        .map(|(i, tab)| SidebarTab {
            id: tab.id,
            label: tab.label,
            href: format!("#{}", tab.id),
            active: i == 0,
            badge: tab.badge.map(|b| RenderedBadge {
                count: b.count,
                class: match b.kind {
                    Some(kind) => format!("badge badge-{kind}"),
                    None => "badge".to_string(),
                },
            }),
        })
        .collect()
}

pub fn simple_formatting_sidebar() -> Vec<SidebarTab> {
    sidebar_tabs(vec![Tab::new("govspeak_help", "Formatting Help")])
}

pub fn edition_tabs(facts: EditionFacts, editing: bool) -> Vec<Tab> {
    let mut tabs = Vec::with_capacity(3);
    if editing {
        tabs.push(Tab::new("govspeak_help", "Formatting Help"));
    } else {
        tabs.push(Tab::new("associations", "Associations"));
    }
    tabs.push(Tab::new("history", "History & Notes").with_badge(facts.audit_entries, None));
    if facts.state.can_be_fact_checked() {
        tabs.push(
            Tab::new("fact_checking", "Fact checking")
                .with_badge(facts.pending_fact_checks, Some("warning")),
        );
    }
    tabs
}

pub async fn edition_facts(db: &DatabaseConnection, edition_id: i32) -> Result<EditionFacts, DomainError> {
    let model = edition::Entity::find_by_id(edition_id)
        .one(db)
        .await?
        .ok_or(DomainError::NotFound("Edition"))?;

    let state = EditionState::parse(&model.state)
        .ok_or_else(|| DomainError::Internal(format!("unknown edition state '{}'", model.state)))?;

    let audit_entries = edition_audit_entry::Entity::find()
        .filter(edition_audit_entry::Column::EditionId.eq(edition_id))
        .count(db)
        .await?;
    let pending_fact_checks = fact_check_request::Entity::find()
        .filter(fact_check_request::Column::EditionId.eq(edition_id))
        .filter(fact_check_request::Column::Status.eq("pending"))
        .count(db)
        .await?;

    Ok(EditionFacts {
        state,
        audit_entries,
        pending_fact_checks,
    })
}

pub async fn edition_sidebar(
    db: &DatabaseConnection,
    edition_id: i32,
    editing: bool,
) -> Result<Vec<SidebarTab>, DomainError> {
    let facts = edition_facts(db, edition_id).await?;
    Ok(sidebar_tabs(edition_tabs(facts, editing)))
}
