#![allow(dead_code)]

use std::{path::Path, time::Duration};

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use pitchdesk_outreach::GraphSettings;
use pitchdesk_server::{
    api::app_router,
    build_state,
    config::{AiSettings, Config},
};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    // Held so the database and uploads outlive the router.
    _dir: TempDir,
}

pub fn test_config(dir: &Path, ai_base_url: Option<String>) -> Config {
    Config {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        db_path: dir.join("test.db").to_string_lossy().into_owned(),
        cors_allow: vec!["*".to_string()],
        request_timeout: Duration::from_secs(30),
        uploads_dir: dir.join("uploads"),
        jwt_secret: Some("0123456789-abcdefghij-0123456789".to_string()),
        token_ttl: Duration::from_secs(3600),
        public_url: "http://localhost:3000".to_string(),
        ai_deadline: Duration::from_secs(10),
        ai: ai_base_url.map(|base_url| AiSettings {
            api_key: "test-key".to_string(),
            model: Some("test/primary".to_string()),
            base_url: Some(base_url),
        }),
        sms: None,
        smtp: None,
        graph: GraphSettings::default(),
    }
}

pub async fn spawn_app(ai_base_url: Option<String>) -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path(), ai_base_url);
    let state = build_state(&config).await.unwrap();
    TestApp {
        router: app_router(state, &config),
        _dir: dir,
    }
}

impl TestApp {
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    /// Registers a main user and returns its token.
    pub async fn register(&self, email: &str) -> String {
        let (status, body) = self
            .request(
                Method::POST,
                "/api/auth/register",
                None,
                Some(serde_json::json!({
                    "email": email,
                    "password": "password123",
                    "name": "Owner",
                    "isMainUser": true
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["token"].as_str().unwrap().to_string()
    }

    pub async fn create_client(&self, token: &str, name: &str) -> String {
        let (status, body) = self
            .request(
                Method::POST,
                "/api/clients",
                Some(token),
                Some(serde_json::json!({
                    "name": name,
                    "phoneNumber": "+2348000000000",
                    "email": format!("{}@example.com", name.to_lowercase()),
                    "location": {"country": "Nigeria"}
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_str().unwrap().to_string()
    }
}
