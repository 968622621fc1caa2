//! One spreadsheet line, with the attributes every imported document shares

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::utils::slug::slug_from_url;

use super::finders::find_organisations;
use super::heading_validator::{HeadingValidator, numbered_pattern};
use super::import_log::ImportLog;
use super::reference_data::ReferenceData;

pub const ATTACHMENT_LIMIT: usize = 50;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AttachmentAttributes {
    pub title: String,
    pub url: String,
    pub order_url: Option<String>,
    pub isbn: Option<String>,
    pub unique_reference: Option<String>,
    pub command_paper_number: Option<String>,
    pub price: Option<String>,
    pub hoc_paper_number: Option<String>,
    pub parliamentary_session: Option<String>,
    pub unnumbered_hoc_paper: bool,
    pub unnumbered_command_paper: bool,
}

impl AttachmentAttributes {
    fn new(title: Option<&str>, url: &str) -> Self {
        let title = title
            .map(str::to_string)
            .or_else(|| slug_from_url(url))
            .unwrap_or_else(|| url.to_string());
        Self {
            title,
            url: url.to_string(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Deserialize)]
struct JsonAttachment {
    title: Option<String>,
    link: String,
}

pub(super) fn value<'v>(values: &'v HashMap<String, String>, key: &str) -> Option<&'v str> {
    values.get(key).map(String::as_str)
}

pub struct Row<'a> {
    pub(super) line: usize,
    pub(super) values: HashMap<String, String>,
    pub(super) data: &'a ReferenceData,
    pub(super) default_organisation: Option<i32>,
    pub(super) log: ImportLog,
}

impl<'a> Row<'a> {
    /// Values are trimmed; blank cells are dropped.
    pub fn new<I, K, V>(
        line: usize,
        fields: I,
        data: &'a ReferenceData,
        default_organisation: Option<i32>,
    ) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let values = fields
            .into_iter()
            .filter_map(|(k, v)| {
                let v = v.as_ref().trim();
                (!v.is_empty()).then(|| (k.as_ref().trim().to_lowercase(), v.to_string()))
            })
            .collect();
        Self {
            line,
            values,
            data,
            default_organisation,
            log: ImportLog::new(),
        }
    }

    pub fn heading_validator() -> HeadingValidator {
        HeadingValidator::new()
            .required(["old_url", "title", "summary", "body", "organisation"])
            .ignored("ignore_*")
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        value(&self.values, key)
    }

    /// Non-blank values of every column matching `pattern` (`#` for the
    /// number), in numeric order
    pub fn fields(&self, pattern: &str) -> Vec<&str> {
        self.numbered(pattern).into_iter().map(|(_, v)| v).collect()
    }

    fn numbered(&self, pattern: &str) -> Vec<(usize, &str)> {
        let re = numbered_pattern(pattern);
        let mut found: Vec<(usize, &str)> = self
            .values
            .iter()
            .filter_map(|(key, v)| {
                let n = re.captures(key)?.get(1)?.as_str().parse().ok()?;
                Some((n, v.as_str()))
            })
            .collect();
        found.sort_by_key(|(n, _)| *n);
        found
    }

    pub fn title(&self) -> Option<&str> {
        self.get("title")
    }

    pub fn summary(&self) -> Option<&str> {
        self.get("summary")
    }

    pub fn body(&self) -> Option<&str> {
        self.get("body")
    }

    pub fn old_url(&self) -> Option<&str> {
        self.get("old_url")
    }

    pub fn lead_organisations(&mut self) -> Vec<i32> {
        find_organisations(
            value(&self.values, "organisation"),
            self.default_organisation,
            self.data,
            &mut self.log,
            self.line,
        )
    }

    /// Column attachments first, then `json_attachments`
    pub fn attachments(&mut self) -> Vec<AttachmentAttributes> {
        let mut attachments: Vec<AttachmentAttributes> = self
            .numbered("attachment_#_url")
            .into_iter()
            .map(|(n, url)| {
                let title = self.get(&format!("attachment_{n}_title"));
                AttachmentAttributes::new(title, url)
            })
            .collect();

        if let Some(json) = value(&self.values, "json_attachments") {
            match serde_json::from_str::<Vec<JsonAttachment>>(json) {
                Ok(entries) => attachments.extend(
                    entries
                        .iter()
                        .filter(|e| !e.link.trim().is_empty())
                        .map(|e| AttachmentAttributes::new(e.title.as_deref(), e.link.trim())),
                ),
                Err(e) => self
                    .log
                    .error(self.line, format!("Unable to parse json_attachments: {e}")),
            }
        }

        attachments
    }

    pub fn log(&self) -> &ImportLog {
        &self.log
    }

    pub fn into_log(self) -> ImportLog {
        self.log
    }
}
