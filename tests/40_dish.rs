mod common;

use anyhow::Result;
use common::spawn_app;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn owner_adds_dish_and_anyone_reads_it() -> Result<()> {
    let server = spawn_app().await?;
    let token = server.user_token("owner@example.com", json!({})).await?;
    let rid = server.create_restaurant(&token, "KFC", "Fast Food").await?;

    let res = server
        .client
        .post(server.url(&format!("/api/restaurant/{}/dish", rid)))
        .bearer_auth(&token)
        .json(&json!({ "name": "Zinger", "description": "Spicy burger", "price": "10.50" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let location = res
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap_or_default();
    let body: Value = res.json().await?;
    let did = body["data"]["id"].as_i64().unwrap_or_default();
    assert_eq!(location, format!("/api/restaurant/{}/dish/{}", rid, did));

    let (status, body) = server.get_json(&location).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Zinger");
    assert_eq!(body["data"]["price"], "10.50");

    let (status, body) = server.get_json(&format!("/api/restaurant/{}/dish", rid)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));

    // Dishes also show up on the restaurant itself
    let (_, body) = server.get_json(&format!("/api/restaurant/{}", rid)).await?;
    assert_eq!(body["data"]["dishes"][0]["name"], "Zinger");

    Ok(())
}

#[tokio::test]
async fn dish_validation_and_missing_parents() -> Result<()> {
    let server = spawn_app().await?;
    let token = server.user_token("owner@example.com", json!({})).await?;
    let rid = server.create_restaurant(&token, "KFC", "Fast Food").await?;

    let res = server
        .client
        .post(server.url(&format!("/api/restaurant/{}/dish", rid)))
        .bearer_auth(&token)
        .json(&json!({ "name": "", "price": -1 }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert!(body["field_errors"]["name"].is_array());
    assert!(body["field_errors"]["price"].is_array());

    let res = server
        .client
        .post(server.url("/api/restaurant/999/dish"))
        .bearer_auth(&token)
        .json(&json!({ "name": "Orphan", "price": "1.00" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let (status, body) = server.get_json("/api/restaurant/999/dish").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Restaurant not found");

    let (status, body) = server.get_json(&format!("/api/restaurant/{}/dish/999", rid)).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Dish not found");

    let res = server
        .client
        .delete(server.url(&format!("/api/restaurant/{}/dish/999", rid)))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn dish_from_another_restaurant_is_not_found() -> Result<()> {
    let server = spawn_app().await?;
    let token = server.user_token("owner@example.com", json!({})).await?;
    let first = server.create_restaurant(&token, "First", "Bistro").await?;
    let second = server.create_restaurant(&token, "Second", "Bistro").await?;

    let res = server
        .client
        .post(server.url(&format!("/api/restaurant/{}/dish", first)))
        .bearer_auth(&token)
        .json(&json!({ "name": "Soup", "price": 5 }))
        .send()
        .await?;
    let body: Value = res.json().await?;
    let did = body["data"]["id"].as_i64().unwrap_or_default();

    let (status, _) = server
        .get_json(&format!("/api/restaurant/{}/dish/{}", second, did))
        .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn only_owner_mutates_dishes() -> Result<()> {
    let server = spawn_app().await?;
    let owner = server.user_token("owner@example.com", json!({})).await?;
    let stranger = server.user_token("stranger@example.com", json!({})).await?;
    let rid = server.create_restaurant(&owner, "KFC", "Fast Food").await?;
    let dishes = format!("/api/restaurant/{}/dish", rid);

    let res = server
        .client
        .post(server.url(&dishes))
        .bearer_auth(&stranger)
        .json(&json!({ "name": "Fries", "price": "3.00" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    for name in ["Fries", "Cola"] {
        let res = server
            .client
            .post(server.url(&dishes))
            .bearer_auth(&owner)
            .json(&json!({ "name": name, "price": "3.00" }))
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    let res = server.client.delete(server.url(&dishes)).bearer_auth(&stranger).send().await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = server.client.delete(server.url(&dishes)).bearer_auth(&owner).send().await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let (_, body) = server.get_json(&dishes).await?;
    assert_eq!(body["data"], json!([]));

    Ok(())
}

#[tokio::test]
async fn price_outside_column_range_is_rejected() -> Result<()> {
    let server = spawn_app().await?;
    let token = server.user_token("owner@example.com", json!({})).await?;
    let rid = server.create_restaurant(&token, "KFC", "Fast Food").await?;
    let dishes = format!("/api/restaurant/{}/dish", rid);

    for price in ["99999999999999999.123456", "10000000000", "1.005"] {
        let res = server
            .client
            .post(server.url(&dishes))
            .bearer_auth(&token)
            .json(&json!({ "name": "X", "price": price }))
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "price {}", price);
        let body: Value = res.json().await?;
        assert!(body["field_errors"]["price"].is_array());
    }

    // Nothing was written
    let (_, body) = server.get_json(&dishes).await?;
    assert_eq!(body["data"], json!([]));

    let res = server
        .client
        .post(server.url(&dishes))
        .bearer_auth(&token)
        .json(&json!({ "name": "Wings", "price": 12.5 }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let (_, body) = server.get_json(&dishes).await?;
    assert_eq!(body["data"][0]["price"], "12.50");

    Ok(())
}
