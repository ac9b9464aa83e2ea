#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use measurement_api::config::AppConfig;
use measurement_api::database::{MeasurementStore, MemoryStore};
use measurement_api::{app, AppState};
use reqwest::RequestBuilder;
use serde_json::Value;

pub const API_KEY: &str = "integration-secret";

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    client: reqwest::Client,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Request carrying the correct api-key header
    pub fn authed(&self, method: reqwest::Method, path: &str) -> RequestBuilder {
        self.client.request(method, self.url(path)).header("api-key", API_KEY)
    }

    /// Request with no api-key header at all
    pub fn anonymous(&self, method: reqwest::Method, path: &str) -> RequestBuilder {
        self.client.request(method, self.url(path))
    }

    /// POST a create payload and return the stored row
    pub async fn create(&self, body: Value) -> Result<Value> {
        let res = self.authed(reqwest::Method::POST, "/measurements/").json(&body).send().await?;
        anyhow::ensure!(res.status() == reqwest::StatusCode::CREATED, "create failed: {}", res.status());
        Ok(res.json::<Value>().await?)
    }
}

/// Start a server over a fresh in-memory store on an unused port
pub async fn spawn_server() -> Result<TestServer> {
    spawn_server_with(Arc::new(MemoryStore::new())).await
}

pub async fn spawn_server_with(store: Arc<dyn MeasurementStore>) -> Result<TestServer> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let base_url = format!("http://127.0.0.1:{}", port);

    let mut config = AppConfig::from_env();
    config.security.api_key = API_KEY.to_string();
    config.api.enable_request_logging = false;
    config.filter.default_limit = 100;
    config.filter.max_limit = None;

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .with_context(|| format!("failed to bind port {}", port))?;
    let router = app(AppState::new(store, &config));
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            eprintln!("test server stopped: {}", e);
        }
    });

    Ok(TestServer { port, base_url, client: reqwest::Client::new() })
}
