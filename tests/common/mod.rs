#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, Response, StatusCode},
};
use http_body_util::BodyExt;
use picu::api::AppState;
use picu::cli::{AdminOutcome, create_admin, seed_products};
use picu::config::Config;
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

pub const BOUNDARY: &str = "----picu-test-boundary";

pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR\0\0\0\x01\0\0\0\x01\x08\x06\0\0\0";

pub struct TestApp {
    pub app: Router,
    pub state: Arc<AppState>,
    pub root: PathBuf,
    pub admin_key: String,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.root);
    }
}

pub fn test_config() -> (Config, PathBuf) {
    let root = std::env::temp_dir().join(format!("picu-test-{}", Uuid::new_v4()));
    std::fs::create_dir_all(&root).unwrap();

    let mut config = Config::default();
    config.general.database_path = format!("sqlite://{}?mode=rwc", root.join("picu.db").display());
    config.storage.media_root = root.join("media").display().to_string();
    config.server.secure_cookies = false;
    config.security.argon2_memory_cost_kib = 1024;
    config.security.argon2_time_cost = 1;

    (config, root)
}

pub async fn spawn_app() -> TestApp {
    let (config, root) = test_config();
    spawn_app_with(config, root).await
}

pub async fn spawn_app_with(config: Config, root: PathBuf) -> TestApp {
    let state = picu::api::create_app_state_from_config(config.clone(), None)
        .await
        .expect("Failed to create app state");

    seed_products(state.store()).await.unwrap();

    let admin_key = match create_admin(state.store(), &config, "admin@picu.com", "admin123", "Admin PICU")
        .await
        .unwrap()
    {
        AdminOutcome::Created(user) => user.api_key,
        AdminOutcome::AlreadyExists => panic!("fresh database already has an admin"),
    };

    let app = picu::api::router(state.clone()).await;

    TestApp {
        app,
        state,
        root,
        admin_key,
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.app.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str, api_key: &str) -> (StatusCode, serde_json::Value) {
        let response = self
            .send(
                Request::builder()
                    .uri(uri)
                    .header("X-Api-Key", api_key)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await;
        into_json(response).await
    }

    pub async fn post_json(
        &self,
        uri: &str,
        api_key: Option<&str>,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", mime::APPLICATION_JSON.as_ref());
        if let Some(key) = api_key {
            builder = builder.header("X-Api-Key", key);
        }
        let response = self
            .send(builder.body(Body::from(body.to_string())).unwrap())
            .await;
        into_json(response).await
    }

    pub async fn post_form(
        &self,
        uri: &str,
        api_key: &str,
        body: &str,
    ) -> (StatusCode, serde_json::Value) {
        let response = self
            .send(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("X-Api-Key", api_key)
                    .header(
                        "Content-Type",
                        mime::APPLICATION_WWW_FORM_URLENCODED.as_ref(),
                    )
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await;
        into_json(response).await
    }

    /// Registers a creator and returns `(user id, api key)`.
    pub async fn signup(&self, email: &str) -> (Uuid, String) {
        let (status, body) = self
            .post_json(
                "/accounts/signup/",
                None,
                serde_json::json!({
                    "email": email,
                    "password": "password123",
                    "password_confirm": "password123",
                    "full_name": "Test Creator",
                    "phone": "08120000000",
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "signup failed: {body}");

        let id = body["data"]["user"]["id"].as_str().unwrap().parse().unwrap();
        let key = body["data"]["api_key"].as_str().unwrap().to_string();
        (id, key)
    }

    pub async fn product_id(&self, name: &str) -> Uuid {
        self.state
            .store()
            .list_active_products()
            .await
            .unwrap()
            .into_iter()
            .find(|p| p.name == name)
            .map(|p| p.id)
            .unwrap_or_else(|| panic!("product {name} not seeded"))
    }

    pub async fn upload(
        &self,
        api_key: &str,
        title: &str,
        products: &[Uuid],
        image: Option<(&str, &[u8])>,
    ) -> (StatusCode, serde_json::Value) {
        let response = self
            .send(
                Request::builder()
                    .method("POST")
                    .uri("/designs/upload/")
                    .header("X-Api-Key", api_key)
                    .header(
                        "Content-Type",
                        format!("multipart/form-data; boundary={BOUNDARY}"),
                    )
                    .body(Body::from(multipart_body(title, products, image)))
                    .unwrap(),
            )
            .await;
        into_json(response).await
    }
}

pub async fn into_json(response: Response<Body>) -> (StatusCode, serde_json::Value) {
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null)
    };
    (status, json)
}

pub fn multipart_body(title: &str, products: &[Uuid], image: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();

    let mut text_field = |name: &str, value: &str| {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    };

    text_field("title", title);
    text_field("description", "Test artwork");
    for product in products {
        text_field("products", &product.to_string());
    }

    if let Some((filename, bytes)) = image {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image_file\"; filename=\"{filename}\"\r\nContent-Type: image/png\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}
