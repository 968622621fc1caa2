//! Document types and edition workflow states

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Policy,
    Publication,
    NewsArticle,
    Speech,
    Consultation,
}

impl DocumentType {
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentType::Policy => "policy",
            DocumentType::Publication => "publication",
            DocumentType::NewsArticle => "news_article",
            DocumentType::Speech => "speech",
            DocumentType::Consultation => "consultation",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "policy" => Some(DocumentType::Policy),
            "publication" => Some(DocumentType::Publication),
            "news_article" => Some(DocumentType::NewsArticle),
            "speech" => Some(DocumentType::Speech),
            "consultation" => Some(DocumentType::Consultation),
            _ => None,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            DocumentType::Policy => "Policy",
            DocumentType::Publication => "Publication",
            DocumentType::NewsArticle => "News article",
            DocumentType::Speech => "Speech",
            DocumentType::Consultation => "Consultation",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditionState {
    Draft,
    Submitted,
    Published,
    Imported,
    Archived,
}

impl EditionState {
    pub fn as_str(self) -> &'static str {
        match self {
            EditionState::Draft => "draft",
            EditionState::Submitted => "submitted",
            EditionState::Published => "published",
            EditionState::Imported => "imported",
            EditionState::Archived => "archived",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "draft" => Some(EditionState::Draft),
            "submitted" => Some(EditionState::Submitted),
            "published" => Some(EditionState::Published),
            "imported" => Some(EditionState::Imported),
            "archived" => Some(EditionState::Archived),
            _ => None,
        }
    }

    /// Only work in progress can be sent out for fact checking.
    pub fn can_be_fact_checked(self) -> bool {
        matches!(self, EditionState::Draft | EditionState::Submitted)
    }
}
