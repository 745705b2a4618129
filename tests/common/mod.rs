#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::{Client, Response, StatusCode};
use serde_json::{json, Value};

use restaurant_api::auth::password::hash_password;
use restaurant_api::config::AppConfig;
use restaurant_api::database::models::{NewUser, Role};
use restaurant_api::database::{MemoryStore, UserRepository};
use restaurant_api::{app, AppState};

pub const PASSWORD: &str = "secret1";

/// One in-process server per test, backed by its own in-memory store
pub struct TestServer {
    pub base_url: String,
    pub client: Client,
    pub store: MemoryStore,
}

pub async fn spawn_app() -> Result<TestServer> {
    // Pick an unused port for isolation
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let base_url = format!("http://127.0.0.1:{}", port);

    let store = MemoryStore::new();
    let state = AppState::new(AppConfig::development(), Arc::new(store.clone()));
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .context("failed to bind test port")?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app(state)).await;
    });

    let server = TestServer {
        base_url,
        client: Client::new(),
        store,
    };
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

impl TestServer {
    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn register(&self, body: Value) -> Result<Response> {
        Ok(self.client.post(self.url("/api/account/register")).json(&body).send().await?)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Response> {
        Ok(self
            .client
            .post(self.url("/api/account/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?)
    }

    /// Register with the default password plus any extra fields, then log in
    pub async fn user_token(&self, email: &str, extra: Value) -> Result<String> {
        let mut body = json!({
            "email": email,
            "password": PASSWORD,
            "confirmPassword": PASSWORD,
        });
        if let (Some(target), Some(fields)) = (body.as_object_mut(), extra.as_object()) {
            for (k, v) in fields {
                target.insert(k.clone(), v.clone());
            }
        }
        let res = self.register(body).await?;
        anyhow::ensure!(res.status() == StatusCode::OK, "register failed: {}", res.status());
        self.token_for(email).await
    }

    /// Admins cannot self-register, so they go straight into the store
    pub async fn admin_token(&self, email: &str) -> Result<String> {
        self.store
            .insert_user(NewUser {
                email: email.to_string(),
                password_hash: hash_password(PASSWORD)?,
                date_of_birth: None,
                nationality: None,
                role: Role::Admin,
            })
            .await?;
        self.token_for(email).await
    }

    async fn token_for(&self, email: &str) -> Result<String> {
        let res = self.login(email, PASSWORD).await?;
        anyhow::ensure!(res.status() == StatusCode::OK, "login failed: {}", res.status());
        let body: Value = res.json().await?;
        body["data"]["token"]
            .as_str()
            .map(str::to_string)
            .context("login response has no token")
    }

    pub async fn create_restaurant(&self, token: &str, name: &str, category: &str) -> Result<i32> {
        let res = self
            .client
            .post(self.url("/api/restaurant"))
            .bearer_auth(token)
            .json(&restaurant_body(name, category))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "create failed: {}", res.status());
        let body: Value = res.json().await?;
        body["data"]["id"]
            .as_i64()
            .map(|id| id as i32)
            .context("create response has no id")
    }

    pub async fn get_json(&self, path: &str) -> Result<(StatusCode, Value)> {
        let res = self.client.get(self.url(path)).send().await?;
        let status = res.status();
        let body = res.json::<Value>().await.unwrap_or(Value::Null);
        Ok((status, body))
    }
}

pub fn restaurant_body(name: &str, category: &str) -> Value {
    json!({
        "name": name,
        "description": format!("{} description", name),
        "category": category,
        "hasDelivery": true,
        "contactEmail": "contact@example.com",
        "contactNumber": "123 456 789",
        "city": "Kraków",
        "street": "Długa 5",
        "postalCode": "30-001"
    })
}
