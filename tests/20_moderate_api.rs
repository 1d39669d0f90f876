mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

const UPDATE_J1: &str = "/api/v1/jokes/update?id=j1";

#[tokio::test]
async fn rejection_returns_submit_joke_unchanged() -> Result<()> {
    let gateway = common::Gateway::spawn().await?;
    let token = gateway.login().await?;
    let rejected = json!({"_id": "j1", "content": "C", "type": "T", "status": "rejected", "author": "Jane"});
    gateway.submit.on("PUT", UPDATE_J1, 200, rejected.clone());

    let res = gateway
        .client
        .put(gateway.url("/api/v1/moderate/update?id=j1"))
        .bearer_auth(&token)
        .json(&json!({"status": "rejected"}))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?, rejected);

    let submit = gateway.submit.requests();
    assert_eq!(submit.len(), 1);
    assert_eq!(submit[0].body, json!({"status": "rejected"}));
    assert!(gateway.delivery.requests().is_empty());
    Ok(())
}

#[tokio::test]
async fn approval_creates_delivery_record() -> Result<()> {
    let gateway = common::Gateway::spawn().await?;
    let token = gateway.login().await?;
    let approved = json!({"id": "j1", "content": "C", "type": "T", "status": "approved"});
    gateway.submit.on("PUT", UPDATE_J1, 200, approved.clone());
    gateway.delivery.on("POST", "/api/v1/delivery/submit", 201, json!({"id": "d1"}));

    let res = gateway
        .client
        .put(gateway.url("/api/v1/moderate/update?id=j1"))
        .bearer_auth(&token)
        .json(&json!({"status": "approved"}))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.json::<Value>().await?,
        json!({
            "updatedJoke": approved,
            "deliveryJoke": {"id": "d1"},
            "message": "Joke approved and created in delivery service"
        })
    );

    let delivery = gateway.delivery.requests();
    assert_eq!(delivery.len(), 1);
    assert_eq!(delivery[0].body, json!({"content": "C", "type": "T", "status": "approved"}));
    assert_eq!(gateway.submit.requests().len(), 1);
    Ok(())
}

#[tokio::test]
async fn failed_delivery_rolls_back_to_pending() -> Result<()> {
    let gateway = common::Gateway::spawn().await?;
    let token = gateway.login().await?;
    gateway
        .submit
        .on("PUT", UPDATE_J1, 200, json!({"id": "j1", "content": "C", "type": "T", "status": "approved"}));
    gateway
        .delivery
        .on("POST", "/api/v1/delivery/submit", 500, json!({"message": "delivery exploded"}));
    gateway
        .submit
        .on("PUT", UPDATE_J1, 200, json!({"id": "j1", "content": "C", "type": "T", "status": "pending"}));

    let res = gateway
        .client
        .put(gateway.url("/api/v1/moderate/update?id=j1"))
        .bearer_auth(&token)
        .json(&json!({"status": "approved"}))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
    let body = res.json::<Value>().await?;
    let message = body["message"].as_str().unwrap_or_default();
    assert!(message.contains("Failed to create joke in delivery service"), "{}", message);
    assert!(message.contains("delivery exploded"), "{}", message);
    assert_eq!(body["details"]["upstream_status"], 500);
    assert_eq!(body["details"]["rollback"]["status"], "reverted");

    let submit = gateway.submit.requests();
    assert_eq!(submit.len(), 2);
    assert_eq!(submit[1].uri, UPDATE_J1);
    assert_eq!(submit[1].body, json!({"content": "C", "type": "T", "status": "pending"}));
    Ok(())
}

#[tokio::test]
async fn failed_rollback_is_visible_in_error() -> Result<()> {
    let gateway = common::Gateway::spawn().await?;
    let token = gateway.login().await?;
    gateway
        .submit
        .on("PUT", UPDATE_J1, 200, json!({"id": "j1", "content": "C", "type": "T", "status": "approved"}));
    gateway.delivery.on("POST", "/api/v1/delivery/submit", 503, json!({"message": "down"}));
    gateway.submit.on("PUT", UPDATE_J1, 500, json!({"message": "submit down too"}));

    let res = gateway
        .client
        .put(gateway.url("/api/v1/moderate/update?id=j1"))
        .bearer_auth(&token)
        .json(&json!({"status": "approved"}))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
    let body = res.json::<Value>().await?;
    assert_eq!(body["details"]["upstream_status"], 503);
    assert_eq!(body["details"]["rollback"]["status"], "failed");
    assert!(body["details"]["rollback"]["error"]
        .as_str()
        .unwrap_or_default()
        .contains("submit down too"));
    assert_eq!(gateway.submit.requests().len(), 2);
    Ok(())
}

#[tokio::test]
async fn empty_pending_list_is_not_an_error() -> Result<()> {
    let gateway = common::Gateway::spawn().await?;
    let token = gateway.login().await?;
    gateway.submit.on("GET", "/api/v1/jokes/pending?page=1&limit=10", 200, json!([]));

    let res = gateway
        .client
        .get(gateway.url("/api/v1/moderate/pending"))
        .bearer_auth(&token)
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!([]));
    Ok(())
}

#[tokio::test]
async fn pending_forwards_pagination() -> Result<()> {
    let gateway = common::Gateway::spawn().await?;
    let token = gateway.login().await?;
    let page = json!({
        "statusCode": 200,
        "message": "Pending jokes retrieved successfully",
        "data": [{"_id": "j9", "content": "Why did the chicken cross the road?", "type": "Pun", "status": "pending"}]
    });
    gateway.submit.on("GET", "/api/v1/jokes/pending?page=3&limit=5", 200, page.clone());

    let res = gateway
        .client
        .get(gateway.url("/api/v1/moderate/pending?page=3&limit=5"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.json::<Value>().await?, page);

    let bad = gateway
        .client
        .get(gateway.url("/api/v1/moderate/pending?page=-2"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(bad.status(), StatusCode::BAD_REQUEST);
    assert_eq!(bad.json::<Value>().await?["message"], "Page and limit must be positive numbers.");

    assert_eq!(gateway.submit.requests().len(), 1);
    Ok(())
}

#[tokio::test]
async fn deleting_twice_surfaces_not_found() -> Result<()> {
    let gateway = common::Gateway::spawn().await?;
    let token = gateway.login().await?;
    gateway.submit.on("DELETE", "/api/v1/jokes/delete/j1", 200, json!({"success": true}));
    gateway
        .submit
        .on("DELETE", "/api/v1/jokes/delete/j1", 404, json!({"statusCode": 404, "message": "Joke not found"}));

    let first = gateway
        .client
        .delete(gateway.url("/api/v1/moderate/delete?id=j1"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(first.json::<Value>().await?, json!({"success": true}));

    let second = gateway
        .client
        .delete(gateway.url("/api/v1/moderate/delete?id=j1"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(second.status(), StatusCode::BAD_GATEWAY);
    let body = second.json::<Value>().await?;
    assert_eq!(body["details"]["upstream_status"], 404);
    assert!(body["message"].as_str().unwrap_or_default().contains("Joke not found"));
    Ok(())
}

#[tokio::test]
async fn delete_requires_id() -> Result<()> {
    let gateway = common::Gateway::spawn().await?;
    let token = gateway.login().await?;

    let res = gateway
        .client
        .delete(gateway.url("/api/v1/moderate/delete"))
        .bearer_auth(&token)
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?["message"], "Joke id is required");
    assert!(gateway.submit.requests().is_empty());
    Ok(())
}

#[tokio::test]
async fn joke_types_are_forwarded_to_delivery() -> Result<()> {
    let gateway = common::Gateway::spawn().await?;
    let token = gateway.login().await?;
    let created = json!({"statusCode": 201, "message": "Joke type created successfully", "data": {"name": "Knock-Knock", "id": 1}});
    gateway.delivery.on("POST", "/api/v1/delivery/types", 201, created.clone());
    gateway
        .delivery
        .on("GET", "/api/v1/delivery/types", 200, json!([{"name": "Knock-Knock", "id": 1}]));

    let res = gateway
        .client
        .post(gateway.url("/api/v1/moderate/types"))
        .bearer_auth(&token)
        .json(&json!({"name": "Knock-Knock"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?, created);

    let list = gateway
        .client
        .get(gateway.url("/api/v1/moderate/types"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(list.json::<Value>().await?[0]["name"], "Knock-Knock");

    let delivery = gateway.delivery.requests();
    assert_eq!(delivery[0].body, json!({"name": "Knock-Knock"}));
    Ok(())
}

#[tokio::test]
async fn invalid_bodies_never_reach_upstreams() -> Result<()> {
    let gateway = common::Gateway::spawn().await?;
    let token = gateway.login().await?;

    let cases = [
        ("PUT", "/api/v1/moderate/update?id=j1", json!({"content": "hey"})),
        ("PUT", "/api/v1/moderate/update?id=j1", json!({"status": "published"})),
        ("PUT", "/api/v1/moderate/update?id=j1", json!({"status": "approved", "score": 3})),
        ("POST", "/api/v1/moderate/types", json!({})),
        ("POST", "/api/v1/moderate/types", json!({"name": "   "})),
    ];

    for (method, path, body) in cases {
        let method = reqwest::Method::from_bytes(method.as_bytes())?;
        let res = gateway
            .client
            .request(method.clone(), gateway.url(path))
            .bearer_auth(&token)
            .json(&body)
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "{} {} {}", method, path, body);
        assert_eq!(res.json::<Value>().await?["code"], "VALIDATION_ERROR");
    }

    assert!(gateway.submit.requests().is_empty());
    assert!(gateway.delivery.requests().is_empty());
    Ok(())
}
