#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use serde_json::Value;
use tower::util::ServiceExt; // for `oneshot`

use whitehall_admin::db;
use whitehall_admin::infrastructure::AppState;
use whitehall_admin::models::{
    edition, edition_relation, organisation, person, role, role_appointment, role_organisation,
    topic, topic_membership,
};

pub async fn setup_test_state() -> AppState {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    AppState::new(db)
}

pub fn app(state: AppState) -> Router {
    whitehall_admin::api::api_router(state)
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut req = Request::builder().uri(uri).method(method);
    let body = match body {
        Some(json) => {
            req = req.header(header::CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&json).unwrap())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(req.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}

pub async fn create_organisation(
    db: &DatabaseConnection,
    name: &str,
    acronym: Option<&str>,
    worldwide: bool,
) -> i32 {
    organisation::ActiveModel {
        name: Set(name.to_string()),
        slug: Set(whitehall_admin::utils::slug::parameterize(name)),
        acronym: Set(acronym.map(str::to_string)),
        worldwide: Set(worldwide),
        created_at: Set(now()),
        updated_at: Set(now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to create organisation")
    .id
}

pub async fn create_person(db: &DatabaseConnection, name: &str) -> i32 {
    person::ActiveModel {
        name: Set(name.to_string()),
        slug: Set(whitehall_admin::utils::slug::parameterize(name)),
        created_at: Set(now()),
        updated_at: Set(now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to create person")
    .id
}

pub async fn create_role(
    db: &DatabaseConnection,
    name: &str,
    role_type: whitehall_admin::domain::RoleType,
    organisation_ids: &[i32],
) -> i32 {
    let id = role::ActiveModel {
        name: Set(name.to_string()),
        role_type: Set(role_type.as_str().to_string()),
        kind: Set(role_type.kind().to_string()),
        permanent_secretary: Set(role_type.permanent_secretary()),
        cabinet_member: Set(role_type.cabinet_member()),
        created_at: Set(now()),
        updated_at: Set(now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to create role")
    .id;

    for organisation_id in organisation_ids {
        role_organisation::ActiveModel {
            role_id: Set(id),
            organisation_id: Set(*organisation_id),
        }
        .insert(db)
        .await
        .expect("Failed to link role to organisation");
    }
    id
}

pub async fn appoint(
    db: &DatabaseConnection,
    person_id: i32,
    role_id: i32,
    started_at: &str,
    ended_at: Option<&str>,
) {
    role_appointment::ActiveModel {
        role_id: Set(role_id),
        person_id: Set(person_id),
        started_at: Set(started_at.to_string()),
        ended_at: Set(ended_at.map(str::to_string)),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to create appointment");
}

pub async fn create_topic(db: &DatabaseConnection, name: &str, featured: bool) -> i32 {
    topic::ActiveModel {
        name: Set(name.to_string()),
        slug: Set(whitehall_admin::utils::slug::parameterize(name)),
        description: Set(format!("All about {name}")),
        featured: Set(featured),
        created_at: Set(now()),
        updated_at: Set(now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to create topic")
    .id
}

pub async fn create_edition(
    db: &DatabaseConnection,
    title: &str,
    document_type: &str,
    state: &str,
    published_at: Option<&str>,
) -> i32 {
    edition::ActiveModel {
        title: Set(title.to_string()),
        slug: Set(whitehall_admin::utils::slug::parameterize(title)),
        summary: Set(format!("Summary of {title}")),
        body: Set("Body".to_string()),
        document_type: Set(document_type.to_string()),
        state: Set(state.to_string()),
        published_at: Set(published_at.map(str::to_string)),
        created_at: Set(now()),
        updated_at: Set(now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to create edition")
    .id
}

pub async fn tag(db: &DatabaseConnection, topic_id: i32, edition_id: i32) {
    topic_membership::ActiveModel {
        topic_id: Set(topic_id),
        edition_id: Set(edition_id),
    }
    .insert(db)
    .await
    .expect("Failed to tag edition");
}

pub async fn relate(db: &DatabaseConnection, edition_id: i32, related_edition_id: i32) {
    edition_relation::ActiveModel {
        edition_id: Set(edition_id),
        related_edition_id: Set(related_edition_id),
    }
    .insert(db)
    .await
    .expect("Failed to relate editions");
}
