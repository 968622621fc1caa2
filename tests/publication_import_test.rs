mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde_json::Value;
use tower::util::ServiceExt; // for `oneshot`

use common::*;
use whitehall_admin::domain::{DomainError, RoleType};
use whitehall_admin::models::{
    attachment, edition, edition_audit_entry, edition_ministerial_role, edition_organisation,
    edition_relation, topic_membership,
};
use whitehall_admin::uploader::{ImportOptions, LogLevel, import_publications};

const HEADINGS: &str = "old_url,title,summary,body,organisation,policy_1,publication_type,publication_date,isbn,attachment_1_url,attachment_1_title,html_title,html_body,html_body_1,topic_1,minister_1";

fn csv(rows: &[&str]) -> Vec<u8> {
    let mut content = String::from(HEADINGS);
    for row in rows {
        content.push('\n');
        content.push_str(row);
    }
    content.push('\n');
    content.into_bytes()
}

#[tokio::test]
async fn test_import_persists_valid_rows() {
    let state = setup_test_state().await;
    let db = state.db().clone();
    let transport = create_organisation(&db, "Department for Transport", Some("DfT"), false).await;
    let policy = create_edition(&db, "Road safety", "policy", "published", Some("2011-01-01T00:00:00+00:00")).await;
    let topic = create_topic(&db, "Transport", false).await;
    let minister = create_role(&db, "Roads minister", RoleType::Minister, &[transport]).await;
    let person = create_person(&db, "Jane Smith").await;
    appoint(&db, person, minister, "2010-05-12", None).await;

    let content = csv(&[
        "http://old.example.com/1,Road casualties,Annual figures,Body text,DfT,https://www.gov.uk/government/policies/road-safety,Statistics,14/03/2011,978-0-10-000000-0,http://example.com/report.pdf,Full report,Casualties in HTML,<p>Part one</p>,<p>Part two</p>,Transport,Jane Smith",
    ]);

    let report = import_publications(&db, &content, &ImportOptions::default())
        .await
        .expect("import should run");
    assert_eq!(report.imported, 1, "{:?}", report.entries);
    assert_eq!(report.failed, 0);

    let id = report.edition_ids[0];
    let saved = edition::Entity::find_by_id(id).one(&db).await.unwrap().unwrap();
    assert_eq!(saved.title, "Road casualties");
    assert_eq!(saved.document_type, "publication");
    assert_eq!(saved.state, "imported");
    assert_eq!(saved.publication_type.as_deref(), Some("official-statistics"));
    assert_eq!(saved.first_published_at.as_deref(), Some("2011-03-14T00:00:00+00:00"));
    assert_eq!(saved.alternative_format_provider_id, Some(transport));
    assert_eq!(saved.old_url.as_deref(), Some("http://old.example.com/1"));

    let leads = edition_organisation::Entity::find()
        .filter(edition_organisation::Column::EditionId.eq(id))
        .all(&db)
        .await
        .unwrap();
    assert_eq!(leads.len(), 1);
    assert!(leads[0].lead);

    let relations = edition_relation::Entity::find()
        .filter(edition_relation::Column::EditionId.eq(id))
        .all(&db)
        .await
        .unwrap();
    assert_eq!(relations[0].related_edition_id, policy);

    let roles = edition_ministerial_role::Entity::find()
        .filter(edition_ministerial_role::Column::EditionId.eq(id))
        .all(&db)
        .await
        .unwrap();
    assert_eq!(roles[0].role_id, minister);

    let memberships = topic_membership::Entity::find()
        .filter(topic_membership::Column::EditionId.eq(id))
        .all(&db)
        .await
        .unwrap();
    assert_eq!(memberships[0].topic_id, topic);

    let attachments = attachment::Entity::find()
        .filter(attachment::Column::EditionId.eq(id))
        .order_by_asc(attachment::Column::Ordering)
        .all(&db)
        .await
        .unwrap();
    assert_eq!(attachments.len(), 2);
    assert_eq!(attachments[0].kind, "file");
    assert_eq!(attachments[0].title, "Full report");
    assert_eq!(attachments[0].isbn.as_deref(), Some("978-0-10-000000-0"));
    assert_eq!(attachments[1].kind, "html");
    assert_eq!(attachments[1].body.as_deref(), Some("<p>Part one</p><p>Part two</p>"));

    let audit = edition_audit_entry::Entity::find()
        .filter(edition_audit_entry::Column::EditionId.eq(id))
        .all(&db)
        .await
        .unwrap();
    assert_eq!(audit.len(), 1);
    assert_eq!(audit[0].action, "imported");
}

#[tokio::test]
async fn test_import_reports_invalid_rows_with_line_numbers() {
    let state = setup_test_state().await;
    let db = state.db().clone();
    create_organisation(&db, "Department for Transport", Some("DfT"), false).await;

    let content = csv(&[
        "http://old.example.com/1,Good row,Summary,Body,DfT,,Guidance,2012-01-31,,,,,,,,",
        "http://old.example.com/2,,Summary,Body,DfT,,Guidance,not a date,,,,,,,,",
        "http://old.example.com/3,Unknown policy,Summary,Body,DfT,missing-policy,Guidance,31-Jan-12,,,,,,,,",
    ]);

    let report = import_publications(&db, &content, &ImportOptions::default())
        .await
        .unwrap();
    assert_eq!(report.imported, 2);
    assert_eq!(report.failed, 1);

    let line_3: Vec<&str> = report
        .entries
        .iter()
        .filter(|e| e.line == 3 && e.level == LogLevel::Error)
        .map(|e| e.message.as_str())
        .collect();
    assert!(line_3.contains(&"Unable to parse the date 'not a date'"));
    assert!(line_3.contains(&"Title can't be blank"));

    assert!(report.entries.iter().any(|e| e.line == 4
        && e.level == LogLevel::Error
        && e.message == "Unable to find Policy with slug 'missing-policy'"));

    let count = edition::Entity::find()
        .filter(edition::Column::State.eq("imported"))
        .all(&db)
        .await
        .unwrap()
        .len();
    assert_eq!(count, 2);
}

#[tokio::test]
async fn test_unreadable_row_is_reported_and_later_rows_import() {
    let state = setup_test_state().await;
    let db = state.db().clone();
    create_organisation(&db, "Department for Transport", Some("DfT"), false).await;

    let mut content = csv(&["http://old.example.com/1,First,Summary,Body,DfT,,Guidance,2012-01-31,,,,,,,,"]);
    content.extend_from_slice(b"http://old.example.com/2,Bad \xff\xfe,Summary,Body,DfT,,Guidance,2012-01-31,,,,,,,,\n");
    content.extend_from_slice(b"http://old.example.com/3,Third,Summary,Body,DfT,,Guidance,2012-01-31,,,,,,,,\n");

    let report = import_publications(&db, &content, &ImportOptions::default())
        .await
        .expect("a bad row should not abort the import");
    assert_eq!(report.imported, 2);
    assert_eq!(report.failed, 1);
    assert!(report.entries.iter().any(|e| e.line == 3
        && e.level == LogLevel::Error
        && e.message.starts_with("Unable to read row")));

    let titles: Vec<String> = edition::Entity::find()
        .order_by_asc(edition::Column::Id)
        .all(&db)
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.title)
        .collect();
    assert_eq!(titles, vec!["First", "Third"]);
}

#[tokio::test]
async fn test_html_body_without_title_fails_the_row() {
    let state = setup_test_state().await;
    let db = state.db().clone();
    create_organisation(&db, "Department for Transport", Some("DfT"), false).await;

    let content = csv(&["http://old.example.com/1,Title,Summary,Body,DfT,,Guidance,2012-01-31,,,,,<p>Lost?</p>,,,"]);
    let report = import_publications(&db, &content, &ImportOptions::default())
        .await
        .unwrap();
    assert_eq!(report.imported, 0);
    assert_eq!(report.failed, 1);
    assert!(report
        .entries
        .iter()
        .any(|e| e.line == 2 && e.message == "HTML title can't be blank"));
    assert!(edition::Entity::find().all(&db).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_publication_date_is_reported_once() {
    let state = setup_test_state().await;
    let db = state.db().clone();
    create_organisation(&db, "Department for Transport", Some("DfT"), false).await;

    let content = csv(&["http://old.example.com/1,Title,Summary,Body,DfT,,Guidance,,,,,,,,,"]);
    let report = import_publications(&db, &content, &ImportOptions::default())
        .await
        .unwrap();
    assert_eq!(report.failed, 1);
    let messages: Vec<&str> = report
        .entries
        .iter()
        .filter(|e| e.line == 2)
        .map(|e| e.message.as_str())
        .collect();
    assert_eq!(messages, vec!["First published at can't be blank"]);
}

#[tokio::test]
async fn test_import_uses_default_organisation() {
    let state = setup_test_state().await;
    let db = state.db().clone();
    let cabinet_office = create_organisation(&db, "Cabinet Office", None, false).await;

    let content = csv(&["http://old.example.com/1,Title,Summary,Body,,,Guidance,2012-01-31,,,,,,,,"]);
    let options = ImportOptions {
        default_organisation: Some("cabinet-office".into()),
        ..Default::default()
    };
    let report = import_publications(&db, &content, &options).await.unwrap();
    assert_eq!(report.imported, 1);

    let leads = edition_organisation::Entity::find()
        .filter(edition_organisation::Column::EditionId.eq(report.edition_ids[0]))
        .all(&db)
        .await
        .unwrap();
    assert_eq!(leads[0].organisation_id, cabinet_office);

    let options = ImportOptions {
        default_organisation: Some("Ministry of Magic".into()),
        ..Default::default()
    };
    let err = import_publications(&db, &content, &options).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
}

#[tokio::test]
async fn test_dry_run_writes_nothing() {
    let state = setup_test_state().await;
    let db = state.db().clone();
    create_organisation(&db, "Department for Transport", Some("DfT"), false).await;

    let content = csv(&["http://old.example.com/1,Title,Summary,Body,DfT,,Guidance,2012-01-31,,,,,,,,"]);
    let options = ImportOptions {
        dry_run: true,
        ..Default::default()
    };
    let report = import_publications(&db, &content, &options).await.unwrap();
    assert!(report.dry_run);
    assert_eq!(report.imported, 1);
    assert!(report.edition_ids.is_empty());
    assert!(edition::Entity::find().all(&db).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_invalid_headings_reject_the_file() {
    let state = setup_test_state().await;
    let db = state.db().clone();

    let content = b"Title,Summary,Colour\nA,B,C\n".to_vec();
    let err = import_publications(&db, &content, &ImportOptions::default())
        .await
        .unwrap_err();
    let DomainError::InvalidHeadings(errors) = err else {
        panic!("expected heading errors, got {err:?}");
    };
    assert!(errors[0].starts_with("missing fields: 'old_url'"));
    assert_eq!(errors[1], "unexpected fields: 'colour'");
}

fn multipart(content: &[u8]) -> (String, Vec<u8>) {
    let boundary = "----whitehall-import-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        b"Content-Disposition: form-data; name=\"file\"; filename=\"publications.csv\"\r\n",
    );
    body.extend_from_slice(b"Content-Type: text/csv\r\n\r\n");
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    (format!("multipart/form-data; boundary={boundary}"), body)
}

#[tokio::test]
async fn test_import_endpoint() {
    let state = setup_test_state().await;
    let db = state.db().clone();
    create_organisation(&db, "Department for Transport", Some("DfT"), false).await;
    let app = app(state);

    let content = csv(&["http://old.example.com/1,Title,Summary,Body,DfT,,Guidance,2012-01-31,,,,,,,,"]);
    let (content_type, body) = multipart(&content);
    let req = Request::builder()
        .uri("/admin/imports/publications?dry_run=true")
        .method("POST")
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body))
        .unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let report: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(report["imported"], 1);
    assert_eq!(report["dry_run"], true);

    let (content_type, body) = multipart(b"title\nA\n");
    let req = Request::builder()
        .uri("/admin/imports/publications")
        .method("POST")
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body))
        .unwrap();
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
