//! In-memory lookup tables the row finders resolve names and slugs against.
//!
//! Loaded once per import so that row parsing stays synchronous and every
//! row sees the same snapshot.

use std::collections::HashMap;

use chrono::NaiveDate;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use crate::domain::roles::MINISTERIAL_ROLE;
use crate::domain::{DocumentType, DomainError};
use crate::models::{
    document_collection, edition, organisation, person, role, role_appointment, topic,
    world_location,
};
use crate::utils::slug::parameterize;

#[derive(Debug, Clone, PartialEq)]
struct Appointment {
    person_id: i32,
    role_id: i32,
    started_on: NaiveDate,
    ended_on: Option<NaiveDate>,
    ministerial: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    policies: HashMap<String, i32>,
    organisations: HashMap<String, i32>,
    topics: HashMap<String, i32>,
    world_locations: HashMap<String, i32>,
    document_collections: HashMap<String, i32>,
    people: HashMap<String, i32>,
    appointments: Vec<Appointment>,
}

/// Lookup key for free-text names: case and punctuation do not matter
fn key(value: &str) -> String {
    parameterize(value)
}

fn parse_day(value: &str) -> Option<NaiveDate> {
    let day = value.get(..10).unwrap_or(value);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

impl ReferenceData {
    pub async fn load(db: &DatabaseConnection) -> Result<Self, DomainError> {
        let mut data = Self::default();

        let policies = edition::Entity::find()
            .filter(edition::Column::DocumentType.eq(DocumentType::Policy.as_str()))
            .order_by_asc(edition::Column::Id)
            .all(db)
            .await?;
        for policy in policies {
            data.add_policy(&policy.slug, policy.id);
        }

        for org in organisation::Entity::find().all(db).await? {
            data.add_organisation(&org.name, &org.slug, org.acronym.as_deref(), org.id);
        }

        for t in topic::Entity::find().all(db).await? {
            data.add_topic(&t.name, &t.slug, t.id);
        }

        for location in world_location::Entity::find().all(db).await? {
            data.add_world_location(&location.name, &location.slug, location.id);
        }

        for collection in document_collection::Entity::find().all(db).await? {
            data.add_document_collection(&collection.slug, collection.id);
        }

        for p in person::Entity::find().all(db).await? {
            data.add_person(&p.name, &p.slug, p.id);
        }

        let appointments = role_appointment::Entity::find()
            .find_also_related(role::Entity)
            .all(db)
            .await?;
        for (appointment, role) in appointments {
            let Some(started_on) = parse_day(&appointment.started_at) else {
                tracing::warn!(
                    appointment_id = appointment.id,
                    "Skipping appointment with unreadable start date"
                );
                continue;
            };
            data.add_appointment(
                appointment.person_id,
                appointment.role_id,
                started_on,
                appointment.ended_at.as_deref().and_then(parse_day),
                role.is_some_and(|r| r.kind == MINISTERIAL_ROLE),
            );
        }

        tracing::debug!(
            policies = data.policies.len(),
            organisations = data.organisations.len(),
            people = data.people.len(),
            "Loaded import reference data"
        );

        Ok(data)
    }

    pub fn add_policy(&mut self, slug: &str, id: i32) -> &mut Self {
        self.policies.insert(slug.to_string(), id);
        self
    }

    pub fn add_organisation(
        &mut self,
        name: &str,
        slug: &str,
        acronym: Option<&str>,
        id: i32,
    ) -> &mut Self {
        self.organisations.insert(key(name), id);
        self.organisations.insert(slug.to_string(), id);
        if let Some(acronym) = acronym {
            self.organisations.insert(key(acronym), id);
        }
        self
    }

    pub fn add_topic(&mut self, name: &str, slug: &str, id: i32) -> &mut Self {
        self.topics.insert(key(name), id);
        self.topics.insert(slug.to_string(), id);
        self
    }

    pub fn add_world_location(&mut self, name: &str, slug: &str, id: i32) -> &mut Self {
        self.world_locations.insert(key(name), id);
        self.world_locations.insert(slug.to_string(), id);
        self
    }

    pub fn add_document_collection(&mut self, slug: &str, id: i32) -> &mut Self {
        self.document_collections.insert(slug.to_string(), id);
        self
    }

    pub fn add_person(&mut self, name: &str, slug: &str, id: i32) -> &mut Self {
        self.people.insert(key(name), id);
        self.people.insert(slug.to_string(), id);
        self
    }

    pub fn add_appointment(
        &mut self,
        person_id: i32,
        role_id: i32,
        started_on: NaiveDate,
        ended_on: Option<NaiveDate>,
        ministerial: bool,
    ) -> &mut Self {
        self.appointments.push(Appointment {
            person_id,
            role_id,
            started_on,
            ended_on,
            ministerial,
        });
        self
    }

    pub fn policy(&self, slug: &str) -> Option<i32> {
        self.policies.get(slug).copied()
    }

    pub fn organisation(&self, name_or_slug: &str) -> Option<i32> {
        self.organisations.get(&key(name_or_slug)).copied()
    }

    pub fn topic(&self, name_or_slug: &str) -> Option<i32> {
        self.topics.get(&key(name_or_slug)).copied()
    }

    pub fn world_location(&self, name_or_slug: &str) -> Option<i32> {
        self.world_locations.get(&key(name_or_slug)).copied()
    }

    pub fn document_collection(&self, slug: &str) -> Option<i32> {
        self.document_collections.get(&key(slug)).copied()
    }

    pub fn person(&self, name_or_slug: &str) -> Option<i32> {
        self.people.get(&key(name_or_slug)).copied()
    }

    /// Ministerial roles the person held on `date` (start and end inclusive)
    pub fn ministerial_roles_at(&self, person_id: i32, date: NaiveDate) -> Vec<i32> {
        let mut roles: Vec<i32> = self
            .appointments
            .iter()
            .filter(|a| a.person_id == person_id && a.ministerial)
            .filter(|a| a.started_on <= date && a.ended_on.is_none_or(|end| date <= end))
            .map(|a| a.role_id)
            .collect();
        roles.dedup();
        roles
    }
}
