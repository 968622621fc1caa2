//! Resolve spreadsheet values to existing records.
//!
//! Misses are logged against the row's line and the value is skipped.

use chrono::NaiveDate;

use crate::domain::PublicationType;
use crate::utils::slug::slug_from_url;

use super::import_log::ImportLog;
use super::reference_data::ReferenceData;

pub fn find_publication_type(
    value: Option<&str>,
    log: &mut ImportLog,
    line: usize,
) -> Option<PublicationType> {
    let value = value?;
    let found = PublicationType::find(value);
    if found.is_none() {
        log.error(line, format!("Unable to find Publication type with slug '{value}'"));
    }
    found
}

/// Policies referenced by URL or slug
pub fn find_policies<'a>(
    values: impl IntoIterator<Item = &'a str>,
    data: &ReferenceData,
    log: &mut ImportLog,
    line: usize,
) -> Vec<i32> {
    let mut ids = Vec::new();
    for value in values {
        let Some(slug) = slug_from_url(value) else {
            log.error(line, format!("Unable to find Policy with slug '{value}'"));
            continue;
        };
        match data.policy(&slug) {
            Some(id) if !ids.contains(&id) => ids.push(id),
            Some(_) => {}
            None => log.error(line, format!("Unable to find Policy with slug '{slug}'")),
        }
    }
    ids
}

/// Comma separated organisation names, slugs or acronyms, falling back to
/// the import default when the column is blank
pub fn find_organisations(
    value: Option<&str>,
    default_organisation: Option<i32>,
    data: &ReferenceData,
    log: &mut ImportLog,
    line: usize,
) -> Vec<i32> {
    let Some(value) = value else {
        return default_organisation.into_iter().collect();
    };

    let mut ids = Vec::new();
    for name in value.split(',').map(str::trim).filter(|n| !n.is_empty()) {
        match data.organisation(name) {
            Some(id) if !ids.contains(&id) => ids.push(id),
            Some(_) => {}
            None => log.error(line, format!("Unable to find Organisation named '{name}'")),
        }
    }

    if ids.is_empty() {
        ids.extend(default_organisation);
    }
    ids
}

fn find_each<'a>(
    values: impl IntoIterator<Item = &'a str>,
    thing: &str,
    lookup: impl Fn(&str) -> Option<i32>,
    log: &mut ImportLog,
    line: usize,
) -> Vec<i32> {
    let mut ids = Vec::new();
    for value in values {
        match lookup(value) {
            Some(id) if !ids.contains(&id) => ids.push(id),
            Some(_) => {}
            None => log.error(line, format!("Unable to find {thing} with slug '{value}'")),
        }
    }
    ids
}

pub fn find_topics<'a>(
    values: impl IntoIterator<Item = &'a str>,
    data: &ReferenceData,
    log: &mut ImportLog,
    line: usize,
) -> Vec<i32> {
    find_each(values, "Topic", |v| data.topic(v), log, line)
}

pub fn find_world_locations<'a>(
    values: impl IntoIterator<Item = &'a str>,
    data: &ReferenceData,
    log: &mut ImportLog,
    line: usize,
) -> Vec<i32> {
    find_each(values, "WorldLocation", |v| data.world_location(v), log, line)
}

pub fn find_document_collections<'a>(
    values: impl IntoIterator<Item = &'a str>,
    data: &ReferenceData,
    log: &mut ImportLog,
    line: usize,
) -> Vec<i32> {
    find_each(
        values,
        "DocumentCollection",
        |v| slug_from_url(v).and_then(|slug| data.document_collection(&slug)),
        log,
        line,
    )
}

/// Ministerial roles held by each named person on `date`
pub fn find_ministerial_roles<'a>(
    people: impl IntoIterator<Item = &'a str>,
    date: Option<NaiveDate>,
    data: &ReferenceData,
    log: &mut ImportLog,
    line: usize,
) -> Vec<i32> {
    let mut roles = Vec::new();
    for name in people {
        let Some(person_id) = data.person(name) else {
            log.error(line, format!("Unable to find Person with name or slug '{name}'"));
            continue;
        };
        let Some(date) = date else {
            log.warn(
                line,
                format!("Cannot look up ministerial roles for '{name}' without a publication date"),
            );
            continue;
        };
        let held = data.ministerial_roles_at(person_id, date);
        if held.is_empty() {
            log.warn(line, format!("'{name}' held no ministerial role on {date}"));
        }
        for role_id in held {
            if !roles.contains(&role_id) {
                roles.push(role_id);
            }
        }
    }
    roles
}
