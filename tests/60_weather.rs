mod common;

use anyhow::Result;
use common::spawn_app;
use reqwest::StatusCode;
use serde_json::Value;

#[tokio::test]
async fn default_forecast_has_five_entries() -> Result<()> {
    let server = spawn_app().await?;

    let (status, body) = server.get_json("/weatherforecast").await?;
    assert_eq!(status, StatusCode::OK);
    let items = body["data"].as_array().cloned().unwrap_or_default();
    assert_eq!(items.len(), 5);
    for item in &items {
        let c = item["temperatureC"].as_i64().unwrap_or(i64::MIN);
        assert!((-20..55).contains(&c), "temperature {} out of range", c);
        assert!(item["summary"].is_string());
    }

    Ok(())
}

#[tokio::test]
async fn generate_honours_count_and_range() -> Result<()> {
    let server = spawn_app().await?;

    let res = server
        .client
        .post(server.url("/weatherforecast/generate?count=3&min=10&max=12"))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    let items = body["data"].as_array().cloned().unwrap_or_default();
    assert_eq!(items.len(), 3);
    for item in &items {
        let c = item["temperatureC"].as_i64().unwrap_or(i64::MIN);
        assert!((10..12).contains(&c), "temperature {} out of range", c);
    }

    Ok(())
}

#[tokio::test]
async fn generate_rejects_bad_parameters() -> Result<()> {
    let server = spawn_app().await?;

    for query in ["count=3&min=10&max=10", "count=3&min=10&max=5", "count=0&min=0&max=5", "count=101&min=0&max=5"] {
        let res = server
            .client
            .post(server.url(&format!("/weatherforecast/generate?{}", query)))
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "query {}", query);
    }

    Ok(())
}

#[tokio::test]
async fn generate_survives_extreme_temperatures() -> Result<()> {
    let server = spawn_app().await?;

    let res = server
        .client
        .post(server.url("/weatherforecast/generate?count=3&min=2147483600&max=2147483647"))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    let items = body["data"].as_array().cloned().unwrap_or_default();
    assert_eq!(items.len(), 3);
    for item in &items {
        assert_eq!(item["temperatureF"], i64::from(i32::MAX));
    }

    Ok(())
}
