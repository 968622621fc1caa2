mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::*;
use whitehall_admin::domain::RoleType;

#[tokio::test]
async fn test_index_orders_roles_and_lists_current_people() {
    let state = setup_test_state().await;
    let db = state.db().clone();
    let treasury = create_organisation(&db, "HM Treasury", Some("HMT"), false).await;
    let transport = create_organisation(&db, "Department for Transport", None, false).await;

    create_role(&db, "Board member", RoleType::BoardMember, &[treasury]).await;
    let chancellor = create_role(&db, "Chancellor", RoleType::CabinetMinister, &[treasury]).await;
    create_role(&db, "Permanent secretary", RoleType::PermanentSecretary, &[treasury]).await;
    create_role(&db, "Roads minister", RoleType::Minister, &[transport]).await;
    create_role(&db, "Special envoy", RoleType::SpecialRepresentative, &[]).await;

    let jane = create_person(&db, "Jane Smith").await;
    let john = create_person(&db, "John Brown").await;
    appoint(&db, jane, chancellor, "2015-05-08", None).await;
    appoint(&db, john, chancellor, "2010-05-12", Some("2015-05-08")).await;

    let app = app(state);
    let (status, body) = send(&app, "GET", "/admin/roles", None).await;
    assert_eq!(status, StatusCode::OK);

    let names: Vec<&str> = body["roles"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec![
            "Special envoy",
            "Roads minister",
            "Chancellor",
            "Permanent secretary",
            "Board member",
        ]
    );
    assert_eq!(body["roles"][2]["current_people"], json!(["Jane Smith"]));
    assert_eq!(body["roles"][2]["organisations"], json!(["HM Treasury"]));
}

#[tokio::test]
async fn test_new_lists_options() {
    let state = setup_test_state().await;
    let db = state.db().clone();
    create_organisation(&db, "HM Treasury", None, false).await;
    create_organisation(&db, "British Embassy Paris", None, true).await;

    let (status, body) = send(&app(state), "GET", "/admin/roles/new", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"]["name"], "");
    assert_eq!(body["options"]["organisations"][0]["name"], "HM Treasury");
    assert_eq!(
        body["options"]["worldwide_organisations"][0]["name"],
        "British Embassy Paris"
    );
    assert_eq!(body["options"]["role_types"].as_array().unwrap().len(), 11);
    assert_eq!(body["options"]["whip_organisations"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_create_role() {
    let state = setup_test_state().await;
    let db = state.db().clone();
    let treasury = create_organisation(&db, "HM Treasury", None, false).await;
    let app = app(state);

    let payload = json!({
        "name": "Chief Secretary to the Treasury",
        "role_type": "cabinet_minister",
        "attends_cabinet_type_id": 1,
        "organisation_ids": [treasury],
    });
    let (status, body) = send(&app, "POST", "/admin/roles", Some(payload)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["redirect_to"], "/admin/roles");
    assert_eq!(body["notice"], "\"Chief Secretary to the Treasury\" created.");

    let (_, body) = send(&app, "GET", "/admin/roles", None).await;
    let role = &body["roles"][0];
    assert_eq!(role["kind"], "MinisterialRole");
    assert_eq!(role["cabinet_member"], true);

    let id = role["id"].as_i64().unwrap();
    let (status, body) = send(&app, "GET", &format!("/admin/roles/{id}/edit"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"]["organisation_ids"], json!([treasury]));
    assert_eq!(body["role"]["attends_cabinet_type_id"], 1);
}

#[tokio::test]
async fn test_create_invalid_role_rerenders_form() {
    let state = setup_test_state().await;
    let app = app(state);

    let payload = json!({ "name": "", "role_type": "board_member", "whip_organisation_id": 2 });
    let (status, body) = send(&app, "POST", "/admin/roles", Some(payload)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body["errors"],
        json!([
            "Name can't be blank",
            "Whip organisation can only be set on ministerial roles"
        ])
    );
    assert_eq!(body["role"]["role_type"], "board_member");
    assert!(body["options"]["role_types"].is_array());

    let (_, body) = send(&app, "GET", "/admin/roles", None).await;
    assert_eq!(body["roles"], json!([]));
}

#[tokio::test]
async fn test_update_role() {
    let state = setup_test_state().await;
    let db = state.db().clone();
    let id = create_role(&db, "Minister", RoleType::Minister, &[]).await;
    let app = app(state);

    let payload = json!({ "name": "Minister of State", "role_type": "minister" });
    let (status, body) = send(&app, "PUT", &format!("/admin/roles/{id}"), Some(payload)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["notice"], "\"Minister of State\" updated.");

    let payload = json!({ "name": "Minister of State", "role_type": "astronaut" });
    let (status, body) = send(&app, "PUT", &format!("/admin/roles/{id}"), Some(payload)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"], json!(["Role type is not valid"]));

    let payload = json!({ "name": "Ghost", "role_type": "minister" });
    let (status, _) = send(&app, "PUT", "/admin/roles/999", Some(payload)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_edit_missing_role_is_not_found() {
    let state = setup_test_state().await;
    let (status, body) = send(&app(state), "GET", "/admin/roles/999/edit", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_destroy_role() {
    let state = setup_test_state().await;
    let db = state.db().clone();
    let unused = create_role(&db, "Unused role", RoleType::Judge, &[]).await;
    let app = app(state);

    let (status, body) = send(&app, "DELETE", &format!("/admin/roles/{unused}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["notice"], "\"Unused role\" destroyed.");
    assert!(body.get("alert").is_none());

    let (status, _) = send(&app, "DELETE", &format!("/admin/roles/{unused}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_destroy_role_in_use_is_refused() {
    let state = setup_test_state().await;
    let db = state.db().clone();
    let treasury = create_organisation(&db, "HM Treasury", None, false).await;
    let with_org = create_role(&db, "Chancellor", RoleType::CabinetMinister, &[treasury]).await;
    let with_person = create_role(&db, "Whip", RoleType::Minister, &[]).await;
    let person = create_person(&db, "Jane Smith").await;
    appoint(&db, person, with_person, "2020-01-01", Some("2021-01-01")).await;
    let app = app(state);

    for id in [with_org, with_person] {
        let (status, body) = send(&app, "DELETE", &format!("/admin/roles/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["alert"],
            "Cannot destroy a role with appointments, organisations, or documents"
        );
        assert_eq!(body["redirect_to"], "/admin/roles");
    }

    let (_, body) = send(&app, "GET", "/admin/roles", None).await;
    assert_eq!(body["roles"].as_array().unwrap().len(), 2);
}
