mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::*;
use whitehall_admin::services::topic_service::FeaturedTopicChooser;

#[tokio::test]
async fn test_admin_topic_crud() {
    let state = setup_test_state().await;
    let app = app(state);

    let payload = json!({ "name": "Transport", "description": "Roads and rail" });
    let (status, body) = send(&app, "POST", "/admin/topics", Some(payload)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["notice"], "\"Transport\" created.");

    let payload = json!({ "name": "Climate change", "description": "Emissions", "featured": true });
    send(&app, "POST", "/admin/topics", Some(payload)).await;

    let (_, body) = send(&app, "GET", "/admin/topics", None).await;
    let names: Vec<&str> = body["topics"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Climate change", "Transport"]);
    assert_eq!(body["topics"][0]["slug"], "climate-change");

    let id = body["topics"][1]["id"].as_i64().unwrap();
    let payload = json!({ "name": "Transport and roads", "description": "Roads and rail" });
    let (status, body) = send(&app, "PUT", &format!("/admin/topics/{id}"), Some(payload)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["notice"], "\"Transport and roads\" updated.");

    let (_, body) = send(&app, "GET", &format!("/admin/topics/{id}/edit"), None).await;
    assert_eq!(body["topic"]["slug"], "transport-and-roads");

    let (status, body) = send(&app, "DELETE", &format!("/admin/topics/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["notice"], "\"Transport and roads\" destroyed.");
}

#[tokio::test]
async fn test_admin_topic_validation() {
    let state = setup_test_state().await;
    let db = state.db().clone();
    create_topic(&db, "Transport", false).await;
    let app = app(state);

    let payload = json!({ "name": "Transport", "description": "" });
    let (status, body) = send(&app, "POST", "/admin/topics", Some(payload)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body["errors"],
        json!(["Name has already been taken", "Description can't be blank"])
    );
    assert_eq!(body["topic"]["name"], "Transport");
}

#[tokio::test]
async fn test_admin_topic_name_needs_a_slug() {
    let state = setup_test_state().await;
    let app = app(state);

    let payload = json!({ "name": "!!!", "description": "Punctuation only" });
    let (status, body) = send(&app, "POST", "/admin/topics", Some(payload)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"], json!(["Name must contain letters or numbers"]));

    let (_, body) = send(&app, "GET", "/admin/topics", None).await;
    assert_eq!(body["topics"], json!([]));
}

#[tokio::test]
async fn test_admin_topic_with_documents_cannot_be_destroyed() {
    let state = setup_test_state().await;
    let db = state.db().clone();
    let topic = create_topic(&db, "Transport", false).await;
    let policy = create_edition(&db, "Road safety", "policy", "draft", None).await;
    tag(&db, topic, policy).await;

    let (status, body) = send(&app(state), "DELETE", &format!("/admin/topics/{topic}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["alert"], "Cannot destroy a topic with associated documents");
}

#[tokio::test]
async fn test_topic_page_sections() {
    let state = setup_test_state().await;
    let db = state.db().clone();
    let topic = create_topic(&db, "Transport", false).await;

    let policy = create_edition(&db, "Road safety", "policy", "published", Some("2012-01-01T00:00:00+00:00")).await;
    let draft_policy = create_edition(&db, "Cycling", "policy", "draft", None).await;
    tag(&db, topic, policy).await;
    tag(&db, topic, draft_policy).await;

    let older = create_edition(&db, "Casualty figures", "publication", "published", Some("2012-03-01T00:00:00+00:00")).await;
    let newer = create_edition(&db, "Minister's speech", "speech", "published", Some("2012-05-01T00:00:00+00:00")).await;
    let unpublished = create_edition(&db, "Draft guidance", "publication", "draft", None).await;
    let other_policy = create_edition(&db, "Rail fares", "policy", "published", Some("2012-04-01T00:00:00+00:00")).await;
    // related in both directions
    relate(&db, older, policy).await;
    relate(&db, policy, newer).await;
    relate(&db, unpublished, policy).await;
    relate(&db, other_policy, policy).await;
    relate(&db, newer, policy).await;

    let (status, body) = send(&app(state), "GET", "/topics/transport", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Transport");
    assert_eq!(body["policies"].as_array().unwrap().len(), 1);
    assert_eq!(body["policies"][0]["title"], "Road safety");
    assert!(body.get("news_articles").is_none());

    let recent: Vec<&str> = body["recently_changed_documents"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["title"].as_str().unwrap())
        .collect();
    assert_eq!(recent, vec!["Minister's speech", "Casualty figures"]);
    assert_eq!(body["recently_changed_documents"][0]["document_type"], "Speech");
    assert_eq!(
        body["recently_changed_documents"][0]["published_at"],
        "2012-05-01T00:00:00+00:00"
    );
}

#[tokio::test]
async fn test_unknown_topic_is_not_found() {
    let state = setup_test_state().await;
    let (status, _) = send(&app(state), "GET", "/topics/nothing-here", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_topic_index_limits_featured_content() {
    let state = setup_test_state().await;
    let db = state.db().clone();
    let featured = create_topic(&db, "Transport", true).await;
    create_topic(&db, "Empty topic", false).await;

    for (i, title) in ["Policy A", "Policy B", "Policy C"].iter().enumerate() {
        let date = format!("2012-0{}-01T00:00:00+00:00", i + 1);
        let id = create_edition(&db, title, "policy", "published", Some(&date)).await;
        tag(&db, featured, id).await;
    }
    for (i, title) in ["News A", "News B", "News C"].iter().enumerate() {
        let date = format!("2013-0{}-01T00:00:00+00:00", i + 1);
        let id = create_edition(&db, title, "news_article", "published", Some(&date)).await;
        tag(&db, featured, id).await;
    }

    let (status, body) = send(&app(state), "GET", "/topics", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["topics"].as_array().unwrap().len(), 1);
    assert_eq!(body["topics"][0]["name"], "Transport");

    let featured_topic = &body["featured_topic"];
    assert_eq!(featured_topic["name"], "Transport");
    assert_eq!(featured_topic["policies"].as_array().unwrap().len(), 2);
    assert_eq!(featured_topic["news_articles"].as_array().unwrap().len(), 2);
    assert_eq!(featured_topic["news_articles"][0]["title"], "News C");
}

#[tokio::test]
async fn test_featured_topic_chooser() {
    let state = setup_test_state().await;
    let db = state.db().clone();
    let chooser = FeaturedTopicChooser::new(&db);
    assert!(chooser.choose_topic().await.unwrap().is_none());

    let empty = create_topic(&db, "Empty", false).await;
    let with_content = create_topic(&db, "Busy", false).await;
    let draft = create_edition(&db, "Draft", "policy", "draft", None).await;
    tag(&db, empty, draft).await;
    let published = create_edition(&db, "Live", "policy", "published", Some("2012-01-01T00:00:00+00:00")).await;
    tag(&db, with_content, published).await;

    assert!(chooser.choose_random_featured_topic().await.unwrap().is_none());
    for _ in 0..10 {
        let chosen = chooser.choose_topic().await.unwrap().unwrap();
        assert_eq!(chosen.id, with_content);
    }

    let featured = create_topic(&db, "Featured", true).await;
    for _ in 0..10 {
        let chosen = chooser.choose_topic().await.unwrap().unwrap();
        assert_eq!(chosen.id, featured);
        assert!(chosen.featured);
    }
}

#[tokio::test]
async fn test_edition_sidebar_tabs() {
    let state = setup_test_state().await;
    let db = state.db().clone();
    let draft = create_edition(&db, "Draft", "publication", "draft", None).await;
    let published = create_edition(&db, "Live", "publication", "published", Some("2012-01-01T00:00:00+00:00")).await;
    let app = app(state);

    let (status, body) = send(&app, "GET", &format!("/admin/editions/{draft}/tabs?editing=true"), None).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body["tabs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["govspeak_help", "history", "fact_checking"]);
    assert_eq!(body["tabs"][0]["active"], true);
    assert_eq!(body["tabs"][2]["badge"]["class"], "badge badge-warning");

    let (_, body) = send(&app, "GET", &format!("/admin/editions/{published}/tabs"), None).await;
    assert_eq!(body["tabs"][0]["id"], "associations");
    assert_eq!(body["tabs"].as_array().unwrap().len(), 2);

    let (status, _) = send(&app, "GET", "/admin/editions/999/tabs", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&app, "GET", "/admin/sidebar/formatting", None).await;
    assert_eq!(body["tabs"][0]["label"], "Formatting Help");
}
