use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use engine::{Currency, Engine, SequentialIds};

fn app() -> Router {
    let engine = Engine::builder().ids(SequentialIds::new()).build();
    server::router(Arc::new(engine), Currency::Inr)
}

async fn call(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    let request = match body {
        Some(body) => request.body(Body::from(body.to_string())).unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

/// Creates a group with Alice, Bob and Carol. Returns `(group_id, [ids])`.
async fn trip(app: &Router) -> (String, [String; 3]) {
    let (status, group) = call(
        app,
        Method::POST,
        "/groups",
        Some(json!({ "name": "Trip", "admin_name": "Alice" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let group_id = group["id"].as_str().unwrap().to_string();
    let alice = group["members"][0]["id"].as_str().unwrap().to_string();

    let mut ids = Vec::new();
    for name in ["Bob", "Carol"] {
        let (status, member) = call(
            app,
            Method::POST,
            &format!("/groups/{group_id}/members"),
            Some(json!({ "name": name })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        ids.push(member["id"].as_str().unwrap().to_string());
    }

    (group_id, [alice, ids[0].clone(), ids[1].clone()])
}

#[tokio::test]
async fn create_group_and_fetch_it() {
    let app = app();
    let (group_id, [alice, bob, carol]) = trip(&app).await;

    let (status, group) = call(&app, Method::GET, &format!("/groups/{group_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(group["currency"], "INR");
    assert_eq!(group["invite_code"], "INV001");

    let (status, members) =
        call(&app, Method::GET, &format!("/groups/{group_id}/members"), None).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = members["members"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec![alice.as_str(), bob.as_str(), carol.as_str()]);

    let (status, by_code) = call(&app, Method::GET, "/groups/invite/inv001", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_code["id"], group_id.as_str());
}

#[tokio::test]
async fn equal_expense_then_settlement_updates_plan() {
    let app = app();
    let (group_id, [alice, bob, carol]) = trip(&app).await;

    let (status, created) = call(
        &app,
        Method::POST,
        &format!("/groups/{group_id}/expenses"),
        Some(json!({
            "description": "Dinner",
            "amount_minor": 9000,
            "paid_by": alice,
            "split": { "method": "equally", "member_ids": [alice, bob, carol] },
            "occurred_at": "2024-05-01T20:00:00Z"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(created["id"].is_string());

    let (_, balances) =
        call(&app, Method::GET, &format!("/groups/{group_id}/balances"), None).await;
    let by_member = |id: &str| {
        balances["balances"]
            .as_array()
            .unwrap()
            .iter()
            .find(|b| b["member_id"] == id)
            .map(|b| b["balance_minor"].as_i64().unwrap())
            .unwrap()
    };
    assert_eq!(by_member(&alice), 6000);
    assert_eq!(by_member(&bob), -3000);
    assert_eq!(by_member(&carol), -3000);

    let (_, debts) = call(&app, Method::GET, &format!("/groups/{group_id}/debts"), None).await;
    assert_eq!(debts["debts"].as_array().unwrap().len(), 2);
    assert_eq!(debts["debts"][0]["from_name"], "Bob");
    assert_eq!(debts["debts"][0]["to_name"], "Alice");

    let (status, _) = call(
        &app,
        Method::POST,
        &format!("/groups/{group_id}/settlements"),
        Some(json!({
            "payer": bob,
            "receiver": alice,
            "amount_minor": 3000,
            "occurred_at": "2024-05-02T09:00:00Z"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, debts) = call(&app, Method::GET, &format!("/groups/{group_id}/debts"), None).await;
    let debts = debts["debts"].as_array().unwrap();
    assert_eq!(debts.len(), 1);
    assert_eq!(debts[0]["from"], carol.as_str());
    assert_eq!(debts[0]["to"], alice.as_str());
    assert_eq!(debts[0]["amount_minor"], 3000);

    let (_, activity) =
        call(&app, Method::GET, &format!("/groups/{group_id}/activity"), None).await;
    let kinds: Vec<&str> = activity["activity"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["kind"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, vec!["settlement", "expense"]);
}

#[tokio::test]
async fn percentage_split_is_stored_with_amounts() {
    let app = app();
    let (group_id, [alice, bob, _carol]) = trip(&app).await;

    let (status, _) = call(
        &app,
        Method::POST,
        &format!("/groups/{group_id}/expenses"),
        Some(json!({
            "amount_minor": 20000,
            "paid_by": alice,
            "split": {
                "method": "percentage",
                "shares": [
                    { "member_id": alice, "basis_points": 2500 },
                    { "member_id": bob, "basis_points": 7500 }
                ]
            }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, activity) =
        call(&app, Method::GET, &format!("/groups/{group_id}/activity"), None).await;
    let expense = &activity["activity"][0];
    assert_eq!(expense["description"], "Unspecified Expense");
    assert_eq!(expense["split_method"], "percentage");
    assert_eq!(expense["split_details"][0]["amount_minor"], 5000);
    assert_eq!(expense["split_details"][1]["amount_minor"], 15000);
    assert_eq!(expense["split_details"][1]["basis_points"], 7500);
}

#[tokio::test]
async fn validation_errors_are_reported() {
    let app = app();
    let (group_id, [alice, bob, _carol]) = trip(&app).await;

    let (status, body) = call(
        &app,
        Method::POST,
        &format!("/groups/{group_id}/members"),
        Some(json!({ "name": "bob" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].is_string());

    let (status, _) = call(
        &app,
        Method::POST,
        &format!("/groups/{group_id}/expenses"),
        Some(json!({
            "amount_minor": 3000,
            "paid_by": alice,
            "split": {
                "method": "custom",
                "shares": [
                    { "member_id": alice, "amount_minor": 1000 },
                    { "member_id": bob, "amount_minor": 1000 }
                ]
            }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = call(
        &app,
        Method::POST,
        &format!("/groups/{group_id}/settlements"),
        Some(json!({ "payer": alice, "receiver": alice, "amount_minor": 100 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = call(&app, Method::GET, "/groups/nope/balances", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn oversized_amounts_are_rejected_and_balances_stay_readable() {
    let app = app();
    let (group_id, [alice, bob, _carol]) = trip(&app).await;

    let (status, _) = call(
        &app,
        Method::POST,
        &format!("/groups/{group_id}/expenses"),
        Some(json!({
            "amount_minor": 100,
            "paid_by": alice,
            "split": {
                "method": "custom",
                "shares": [
                    { "member_id": alice, "amount_minor": i64::MAX },
                    { "member_id": bob, "amount_minor": i64::MAX }
                ]
            }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let settle = json!({ "payer": bob, "receiver": alice, "amount_minor": i64::MAX });
    let uri = format!("/groups/{group_id}/settlements");
    let (status, _) = call(&app, Method::POST, &uri, Some(settle.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = call(&app, Method::POST, &uri, Some(settle)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) =
        call(&app, Method::GET, &format!("/groups/{group_id}/balances"), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, debts) =
        call(&app, Method::GET, &format!("/groups/{group_id}/debts"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(debts["debts"][0]["amount_minor"], i64::MAX);
}
