//! Spreadsheet row describing a publication

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::PublicationType;

use super::finders::{
    find_document_collections, find_ministerial_roles, find_policies, find_publication_type,
    find_topics, find_world_locations,
};
use super::heading_validator::HeadingValidator;
use super::parsers::{parse_date, parse_flag};
use super::row::{AttachmentAttributes, ATTACHMENT_LIMIT, Row, value};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HtmlAttachmentAttributes {
    pub title: String,
    pub body: String,
}

/// Everything needed to persist one imported publication
#[derive(Debug, Clone, Default)]
pub struct PublicationAttributes {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub body: Option<String>,
    pub old_url: Option<String>,
    pub lead_organisations: Vec<i32>,
    pub alternative_format_provider: Option<i32>,
    pub attachments: Vec<AttachmentAttributes>,
    pub first_published_at: Option<NaiveDate>,
    pub html_attachment_attributes: Option<HtmlAttachmentAttributes>,
    pub ministerial_roles: Vec<i32>,
    pub publication_type: Option<PublicationType>,
    pub related_editions: Vec<i32>,
    pub document_collections: Vec<i32>,
    pub topics: Vec<i32>,
    pub world_locations: Vec<i32>,
}

impl PublicationAttributes {
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let blank = |v: &Option<String>| v.as_deref().is_none_or(|s| s.trim().is_empty());

        if blank(&self.title) {
            errors.push("Title can't be blank".to_string());
        }
        if blank(&self.summary) {
            errors.push("Summary can't be blank".to_string());
        }
        if blank(&self.body) {
            errors.push("Body can't be blank".to_string());
        }
        if self.publication_type.is_none() {
            errors.push("Publication type can't be blank".to_string());
        }
        if self.first_published_at.is_none() {
            errors.push("First published at can't be blank".to_string());
        }
        if self.lead_organisations.is_empty() {
            errors.push("Lead organisations can't be blank".to_string());
        }
        if let Some(html) = &self.html_attachment_attributes {
            if html.title.trim().is_empty() {
                errors.push("HTML title can't be blank".to_string());
            }
            if html.body.trim().is_empty() {
                errors.push("HTML body can't be blank".to_string());
            }
        }
        errors
    }
}

pub struct PublicationRow<'a> {
    row: Row<'a>,
}

impl<'a> From<Row<'a>> for PublicationRow<'a> {
    fn from(row: Row<'a>) -> Self {
        Self { row }
    }
}

impl<'a> PublicationRow<'a> {
    pub fn heading_validator() -> HeadingValidator {
        Row::heading_validator()
            .multiple(["policy_#"], 0..=20)
            .multiple(["document_collection_#"], 0..=4)
            .required(["publication_type", "publication_date"])
            .optional(["order_url", "price", "isbn", "urn", "command_paper_number"])
            .optional([
                "hoc_paper_number",
                "parliamentary_session",
                "unnumbered_hoc_paper",
                "unnumbered_command_paper",
            ])
            .multiple(["attachment_#_url", "attachment_#_title"], 0..=ATTACHMENT_LIMIT)
            .optional(["json_attachments"])
            .multiple(["country_#"], 0..=4)
            .optional(["html_title", "html_body"])
            .multiple(["html_body_#"], 0..=99)
            .multiple(["topic_#"], 0..=4)
            .multiple(["minister_#"], 0..=2)
    }

    pub fn row(&self) -> &Row<'a> {
        &self.row
    }

    pub fn into_row(self) -> Row<'a> {
        self.row
    }

    pub fn first_published_at(&mut self) -> Option<NaiveDate> {
        let row = &mut self.row;
        parse_date(value(&row.values, "publication_date"), &mut row.log, row.line)
    }

    pub fn publication_type(&mut self) -> Option<PublicationType> {
        let row = &mut self.row;
        find_publication_type(value(&row.values, "publication_type"), &mut row.log, row.line)
    }

    pub fn related_editions(&mut self) -> Vec<i32> {
        let policies = self.owned_fields("policy_#");
        let row = &mut self.row;
        find_policies(policies.iter().map(String::as_str), row.data, &mut row.log, row.line)
    }

    pub fn document_collections(&mut self) -> Vec<i32> {
        let slugs = self.owned_fields("document_collection_#");
        let row = &mut self.row;
        find_document_collections(slugs.iter().map(String::as_str), row.data, &mut row.log, row.line)
    }

    pub fn topics(&mut self) -> Vec<i32> {
        let names = self.owned_fields("topic_#");
        let row = &mut self.row;
        find_topics(names.iter().map(String::as_str), row.data, &mut row.log, row.line)
    }

    pub fn world_locations(&mut self) -> Vec<i32> {
        let names = self.owned_fields("country_#");
        let row = &mut self.row;
        find_world_locations(names.iter().map(String::as_str), row.data, &mut row.log, row.line)
    }

    /// Roles `minister_1` and `minister_2` held on the first published date
    pub fn ministerial_roles(&mut self) -> Vec<i32> {
        let date = self.first_published_at_quiet();
        let people = self.owned_fields("minister_#");
        let row = &mut self.row;
        find_ministerial_roles(people.iter().map(String::as_str), date, row.data, &mut row.log, row.line)
    }

    /// Attachments, with the publication metadata on the first one
    pub fn attachments(&mut self) -> Vec<AttachmentAttributes> {
        let mut attachments = self.row.attachments();
        if let Some(first) = attachments.first_mut() {
            let get = |key: &str| self.row.get(key).map(str::to_string);
            first.order_url = get("order_url");
            first.isbn = get("isbn");
            first.unique_reference = get("urn");
            first.command_paper_number = get("command_paper_number");
            first.price = get("price");
            first.hoc_paper_number = get("hoc_paper_number");
            first.parliamentary_session = get("parliamentary_session");
            first.unnumbered_hoc_paper = parse_flag(self.row.get("unnumbered_hoc_paper"));
            first.unnumbered_command_paper = parse_flag(self.row.get("unnumbered_command_paper"));
        }
        attachments
    }

    pub fn alternative_format_provider(&mut self) -> Option<i32> {
        self.row.lead_organisations().first().copied()
    }

    pub fn html_title(&self) -> Option<&str> {
        self.row.get("html_title")
    }

    /// `html_body` followed by any `html_body_<n>` continuation cells
    pub fn html_body(&self) -> Option<String> {
        let first = self.row.get("html_body")?;
        let mut body = first.to_string();
        for part in self.row.fields("html_body_#") {
            body.push_str(part);
        }
        Some(body)
    }

    /// Present when either half is given; a missing half fails validation
    pub fn html_attachment_attributes(&self) -> Option<HtmlAttachmentAttributes> {
        let title = self.html_title().map(str::to_string);
        let body = self.html_body();
        if title.is_none() && body.is_none() {
            return None;
        }
        Some(HtmlAttachmentAttributes {
            title: title.unwrap_or_default(),
            body: body.unwrap_or_default(),
        })
    }

    /// Resolve every attribute, logging what could not be found
    pub fn attributes(&mut self) -> PublicationAttributes {
        let lead_organisations = self.row.lead_organisations();
        PublicationAttributes {
            title: self.row.title().map(str::to_string),
            summary: self.row.summary().map(str::to_string),
            body: self.row.body().map(str::to_string),
            old_url: self.row.old_url().map(str::to_string),
            alternative_format_provider: lead_organisations.first().copied(),
            lead_organisations,
            attachments: self.attachments(),
            first_published_at: self.first_published_at(),
            html_attachment_attributes: self.html_attachment_attributes(),
            ministerial_roles: self.ministerial_roles(),
            publication_type: self.publication_type(),
            related_editions: self.related_editions(),
            document_collections: self.document_collections(),
            topics: self.topics(),
            world_locations: self.world_locations(),
        }
    }

    fn owned_fields(&self, pattern: &str) -> Vec<String> {
        self.row
            .fields(pattern)
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Date for role lookups; a bad date is already reported by `first_published_at`
    fn first_published_at_quiet(&self) -> Option<NaiveDate> {
        let mut scratch = super::import_log::ImportLog::new();
        parse_date(self.row.get("publication_date"), &mut scratch, self.row.line)
    }
}
