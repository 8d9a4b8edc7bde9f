//! Shared test helpers for integration tests.
//!
//! Every test gets its own router over a fresh in-memory store, so tests
//! run in parallel without a database.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use shophub_api::{build_app, build_state};
use shophub_core::config::AppConfig;
use shophub_database::{MemoryStore, Repositories, UserRepository};
use shophub_entity::user::{Permission, PermissionSet};
use shophub_service::mail::RecordingMailer;

/// Test application context
#[derive(Clone)]
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// The store behind the router, for seeding and inspection
    pub store: MemoryStore,
    /// Captures outgoing mail
    pub mailer: RecordingMailer,
    /// Application config
    pub config: AppConfig,
}

/// Parsed response to a GraphQL request
#[derive(Debug)]
pub struct GqlResponse {
    /// HTTP status
    pub status: StatusCode,
    /// JSON body
    pub body: Value,
    /// Raw `Set-Cookie` header, if any
    pub set_cookie: Option<String>,
}

impl GqlResponse {
    /// The `data` member.
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }

    /// `extensions.code` of the first error.
    pub fn error_code(&self) -> Option<&str> {
        self.body["errors"][0]["extensions"]["code"].as_str()
    }

    /// Message of the first error.
    pub fn error_message(&self) -> Option<&str> {
        self.body["errors"][0]["message"].as_str()
    }

    /// Whether the response carries no errors.
    pub fn is_ok(&self) -> bool {
        self.body.get("errors").is_none()
    }

    /// The `name=value` pair of the session cookie, ready to send back.
    pub fn cookie(&self) -> Option<String> {
        self.set_cookie
            .as_deref()
            .and_then(|c| c.split(';').next())
            .map(str::to_string)
    }
}

impl TestApp {
    /// Create a new test application
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.auth.app_secret = "integration-test-secret".to_string();
        config.auth.bcrypt_cost = 4;
        config.frontend.url = "http://shop.test".to_string();

        let store = MemoryStore::new();
        let mailer = RecordingMailer::new();
        let state = build_state(
            config.clone(),
            Repositories::from_memory(store.clone()),
            None,
            std::sync::Arc::new(mailer.clone()),
        );

        Self {
            router: build_app(state),
            store,
            mailer,
            config,
        }
    }

    /// POST a GraphQL operation, optionally with a `Cookie` header.
    pub async fn graphql(&self, query: &str, variables: Value, cookie: Option<&str>) -> GqlResponse {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/graphql")
            .header(CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        let payload = json!({ "query": query, "variables": variables });
        let request = builder
            .body(Body::from(payload.to_string()))
            .expect("valid request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let set_cookie = response
            .headers()
            .get(SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        GqlResponse {
            status,
            body,
            set_cookie,
        }
    }

    /// GET a plain JSON endpoint.
    pub async fn get(&self, path: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .uri(path)
            .body(Body::empty())
            .expect("valid request");
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    /// Sign up and return the session cookie pair.
    pub async fn signup(&self, email: &str, password: &str, name: &str) -> String {
        let res = self
            .graphql(
                "mutation($email: String!, $password: String!, $name: String!) {
                    signup(email: $email, password: $password, name: $name) { id }
                }",
                json!({ "email": email, "password": password, "name": name }),
                None,
            )
            .await;
        assert!(res.is_ok(), "signup failed: {}", res.body);
        res.cookie().expect("signup sets a cookie")
    }

    /// Overwrite a user's permissions directly in the store.
    pub async fn grant(&self, email: &str, permissions: &[Permission]) {
        let user = UserRepository::find_by_email(&self.store, email)
            .await
            .expect("lookup")
            .expect("user exists");
        UserRepository::update_permissions(&self.store, user.id, PermissionSet::of(permissions))
            .await
            .expect("update permissions");
    }

    /// Create an item as the holder of `cookie` and return its id.
    pub async fn create_item(&self, cookie: &str, title: &str, price: i32) -> String {
        let res = self
            .graphql(
                "mutation($title: String!, $price: Int!) {
                    createItem(title: $title, description: \"A fine thing\", price: $price) { id }
                }",
                json!({ "title": title, "price": price }),
                Some(cookie),
            )
            .await;
        assert!(res.is_ok(), "createItem failed: {}", res.body);
        res.data()["createItem"]["id"]
            .as_str()
            .expect("item id")
            .to_string()
    }

    /// The signed-in user's `me` payload.
    pub async fn me(&self, cookie: Option<&str>) -> Value {
        let res = self
            .graphql(
                "{ me { id email name permissions cart { id quantity item { id } } } }",
                json!({}),
                cookie,
            )
            .await;
        assert!(res.is_ok(), "me failed: {}", res.body);
        res.data()["me"].clone()
    }
}
