mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use common::{PNG_BYTES, spawn_app, spawn_app_with, test_config};
use picu::domain::Principal;
use picu::entities::products;
use picu::entities::users::Role;
use picu::services::{DesignService, DesignSubmission, ImageUpload};
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use std::path::Path;
use uuid::Uuid;

async fn logo_a(app: &common::TestApp, creator_key: &str) -> serde_json::Value {
    let tshirt = app.product_id("Kaos Cotton Combed 30s").await;
    let mug = app.product_id("Mug Ceramic").await;

    let (status, body) = app
        .upload(creator_key, "Logo A", &[tshirt, mug], Some(("logo.png", PNG_BYTES)))
        .await;
    assert_eq!(status, StatusCode::CREATED, "upload failed: {body}");
    body["data"]["design"].clone()
}

#[tokio::test]
async fn test_unauthenticated_requests_are_rejected() {
    let app = spawn_app().await;

    let response = app
        .send(Request::builder().uri("/designs/").body(Body::empty()).unwrap())
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let (status, _) = app.get("/designs/", "wrong-key").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.upload("wrong-key", "Logo", &[], None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_upload_creates_pending_design_with_skus() {
    let app = spawn_app().await;
    let (creator_id, key) = app.signup("creator@example.com").await;

    let design = logo_a(&app, &key).await;

    assert_eq!(design["title"], "Logo A");
    assert_eq!(design["status"], "pending");
    assert!(design["reject_reason"].is_null());

    let products = design["products"].as_array().unwrap();
    assert_eq!(products.len(), 2);

    let skus: Vec<&str> = products.iter().map(|p| p["sku"].as_str().unwrap()).collect();
    assert!(skus.iter().all(|s| s.starts_with("PICU-")));
    assert_ne!(skus[0], skus[1]);

    let design_prefix = design["id"].as_str().unwrap()[..4].to_uppercase();
    assert!(skus.iter().all(|s| s[5..9] == design_prefix));

    let image = design["image"].as_str().unwrap();
    assert!(image.starts_with(&format!("/media/designs/{creator_id}/")));
    assert!(image.ends_with(".png"));

    let on_disk = Path::new(&app.state.shared.config().await.storage.media_root)
        .join(image.trim_start_matches("/media/"));
    assert_eq!(std::fs::read(on_disk).unwrap(), PNG_BYTES);
}

#[tokio::test]
async fn test_upload_serves_image_from_media() {
    let app = spawn_app().await;
    let (_, key) = app.signup("creator@example.com").await;
    let design = logo_a(&app, &key).await;

    let response = app
        .send(
            Request::builder()
                .uri(design["image"].as_str().unwrap())
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_upload_without_products_is_rejected() {
    let app = spawn_app().await;
    let (_, key) = app.signup("creator@example.com").await;

    let (status, body) = app
        .upload(&key, "Logo A", &[], Some(("logo.png", PNG_BYTES)))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, body) = app.get("/designs/", &key).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].as_array().unwrap().is_empty());

    let media = Path::new(&app.state.shared.config().await.storage.media_root).join("designs");
    assert!(!media.exists());
}

#[tokio::test]
async fn test_upload_validation() {
    let app = spawn_app().await;
    let (_, key) = app.signup("creator@example.com").await;
    let mug = app.product_id("Mug Ceramic").await;

    let (status, _) = app
        .upload(&key, "Logo", &[mug], Some(("logo.gif", b"GIF89a-not-allowed")))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.upload(&key, "Logo", &[mug], None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .upload(&key, "   ", &[mug], Some(("logo.png", PNG_BYTES)))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .upload(&key, "Logo", &[Uuid::new_v4()], Some(("logo.png", PNG_BYTES)))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = app.get("/designs/", &key).await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_upload_with_inactive_product_is_rejected() {
    let app = spawn_app().await;
    let (_, key) = app.signup("creator@example.com").await;
    let tshirt = app.product_id("Kaos Cotton Combed 30s").await;

    let conn = &app.state.store().conn;
    let mut product: products::ActiveModel = products::Entity::find_by_id(tshirt)
        .one(conn)
        .await
        .unwrap()
        .unwrap()
        .into();
    product.is_active = Set(false);
    product.update(conn).await.unwrap();

    let (status, body) = app
        .upload(&key, "Logo A", &[tshirt], Some(("logo.png", PNG_BYTES)))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .contains("is not available")
    );

    let designs = app.state.store().list_designs(None, None).await.unwrap();
    assert!(designs.is_empty());
}

#[tokio::test]
async fn test_failed_insert_removes_stored_image() {
    let app = spawn_app().await;
    let mug = app.product_id("Mug Ceramic").await;

    // No matching users row, so the design insert hits the foreign key.
    let ghost = Principal {
        id: Uuid::new_v4(),
        email: "ghost@example.com".to_string(),
        full_name: "Ghost".to_string(),
        role: Role::Creator,
    };

    let result = app
        .state
        .shared
        .design_service
        .submit(
            &ghost,
            DesignSubmission {
                title: "Orphan".to_string(),
                description: None,
                image: Some(ImageUpload {
                    filename: "orphan.png".to_string(),
                    content_type: Some("image/png".to_string()),
                    bytes: PNG_BYTES.to_vec(),
                }),
                product_ids: vec![mug],
            },
        )
        .await;
    assert!(result.is_err());

    let owner_dir = Path::new(&app.state.shared.config().await.storage.media_root)
        .join("designs")
        .join(ghost.id.to_string());
    let leftover = std::fs::read_dir(&owner_dir).map_or(0, |entries| entries.count());
    assert_eq!(leftover, 0);

    assert!(app.state.store().list_designs(None, None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_upload_size_limits() {
    let (mut config, root) = test_config();
    config.storage.max_upload_bytes = 1024;
    let app = spawn_app_with(config, root).await;
    let (_, key) = app.signup("creator@example.com").await;
    let mug = app.product_id("Mug Ceramic").await;

    let mut oversized = PNG_BYTES.to_vec();
    oversized.resize(4096, 0);
    let (status, body) = app
        .upload(&key, "Big", &[mug], Some(("big.png", &oversized)))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Image is too large (max 1 KB)");

    // Past the request body limit the multipart reader itself gives up.
    let mut huge = PNG_BYTES.to_vec();
    huge.resize(2 * 1024 * 1024, 0);
    let (status, _) = app
        .upload(&key, "Huge", &[mug], Some(("huge.png", &huge)))
        .await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);

    let (_, body) = app.get("/designs/", &key).await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_duplicate_product_selection_is_collapsed() {
    let app = spawn_app().await;
    let (_, key) = app.signup("creator@example.com").await;
    let mug = app.product_id("Mug Ceramic").await;

    let (status, body) = app
        .upload(&key, "Mug Art", &[mug, mug], Some(("mug.jpg", PNG_BYTES)))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["design"]["products"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_admin_rejects_then_approves() {
    let app = spawn_app().await;
    let (_, key) = app.signup("creator@example.com").await;
    let design = logo_a(&app, &key).await;
    let id = design["id"].as_str().unwrap();

    let (status, body) = app.get(&format!("/designs/{id}/reject/"), &app.admin_key).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["product_count"], 2);

    let (status, body) = app
        .post_form(
            &format!("/designs/{id}/reject/"),
            &app.admin_key,
            "reject_reason=blurry+image",
        )
        .await;
    assert_eq!(status, StatusCode::OK, "reject failed: {body}");
    assert_eq!(body["data"]["design"]["status"], "rejected");
    assert_eq!(body["data"]["design"]["reject_reason"], "blurry image");

    let (status, body) = app
        .post_form(&format!("/designs/{id}/approve/"), &app.admin_key, "")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["design"]["status"], "approved");
    assert!(body["data"]["design"]["reject_reason"].is_null());
}

#[tokio::test]
async fn test_reject_without_reason_stores_empty_string() {
    let app = spawn_app().await;
    let (_, key) = app.signup("creator@example.com").await;
    let design = logo_a(&app, &key).await;
    let id = design["id"].as_str().unwrap();

    let response = app
        .send(
            Request::builder()
                .method("POST")
                .uri(format!("/designs/{id}/reject/"))
                .header("X-Api-Key", &app.admin_key)
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    let (status, body) = common::into_json(response).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["design"]["status"], "rejected");
    assert_eq!(body["data"]["design"]["reject_reason"], "");
}

#[tokio::test]
async fn test_non_admin_cannot_review() {
    let app = spawn_app().await;
    let (_, owner_key) = app.signup("owner@example.com").await;
    let (_, other_key) = app.signup("other@example.com").await;
    let design = logo_a(&app, &owner_key).await;
    let id = design["id"].as_str().unwrap();

    for key in [&other_key, &owner_key] {
        let (status, _) = app
            .post_form(&format!("/designs/{id}/approve/"), key, "")
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = app
            .post_form(&format!("/designs/{id}/reject/"), key, "reject_reason=no")
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    let (_, body) = app.get(&format!("/designs/{id}/"), &owner_key).await;
    assert_eq!(body["data"]["status"], "pending");
    assert!(body["data"]["reject_reason"].is_null());
}

#[tokio::test]
async fn test_review_unknown_design_is_not_found() {
    let app = spawn_app().await;
    let id = Uuid::new_v4();

    let (status, _) = app
        .post_form(&format!("/designs/{id}/approve/"), &app.admin_key, "")
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_detail_permissions() {
    let app = spawn_app().await;
    let (_, owner_key) = app.signup("owner@example.com").await;
    let (_, other_key) = app.signup("other@example.com").await;
    let design = logo_a(&app, &owner_key).await;
    let id = design["id"].as_str().unwrap();

    let (status, body) = app.get(&format!("/designs/{id}/"), &owner_key).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["products"].as_array().unwrap().len(), 2);

    let (status, _) = app.get(&format!("/designs/{id}/"), &app.admin_key).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.get(&format!("/designs/{id}/"), &other_key).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .get(&format!("/designs/{}/", Uuid::new_v4()), &owner_key)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.get("/designs/not-a-uuid/", &owner_key).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_removes_rows_and_local_file() {
    let app = spawn_app().await;
    let (_, key) = app.signup("creator@example.com").await;
    let design = logo_a(&app, &key).await;
    let id: Uuid = design["id"].as_str().unwrap().parse().unwrap();

    let on_disk = Path::new(&app.state.shared.config().await.storage.media_root)
        .join(design["image"].as_str().unwrap().trim_start_matches("/media/"));
    assert!(on_disk.exists());

    let (status, body) = app.get(&format!("/designs/{id}/delete/"), &key).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "Logo A");

    let (status, body) = app
        .post_form(&format!("/designs/{id}/delete/"), &key, "")
        .await;
    assert_eq!(status, StatusCode::OK, "delete failed: {body}");
    assert_eq!(body["data"]["image_removed"], true);

    assert!(!on_disk.exists());
    assert_eq!(app.state.store().count_design_products(id).await.unwrap(), 0);
    assert!(app.state.store().get_design(id).await.unwrap().is_none());

    let (status, _) = app.get(&format!("/designs/{id}/"), &key).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_permissions() {
    let app = spawn_app().await;
    let (_, owner_key) = app.signup("owner@example.com").await;
    let (_, other_key) = app.signup("other@example.com").await;

    let design = logo_a(&app, &owner_key).await;
    let id = design["id"].as_str().unwrap();

    let (status, _) = app
        .post_form(&format!("/designs/{id}/delete/"), &other_key, "")
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .post_form(&format!("/designs/{id}/delete/"), &app.admin_key, "")
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_list_scoping_and_status_filter() {
    let app = spawn_app().await;
    let (_, first_key) = app.signup("first@example.com").await;
    let (_, second_key) = app.signup("second@example.com").await;

    let first = logo_a(&app, &first_key).await;
    logo_a(&app, &second_key).await;

    let (_, body) = app.get("/designs/", &first_key).await;
    let mine = body["data"].as_array().unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0]["id"], first["id"]);

    let (_, body) = app.get("/designs/", &app.admin_key).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let id = first["id"].as_str().unwrap();
    app.post_form(&format!("/designs/{id}/approve/"), &app.admin_key, "")
        .await;

    let (_, body) = app.get("/designs/?status=approved", &app.admin_key).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (_, body) = app.get("/designs/?status=pending", &first_key).await;
    assert!(body["data"].as_array().unwrap().is_empty());

    let (_, body) = app.get("/designs/?status=bogus", &app.admin_key).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_dashboards() {
    let app = spawn_app().await;
    let (_, key) = app.signup("creator@example.com").await;
    logo_a(&app, &key).await;

    let (status, body) = app.get("/dashboard/dashboard/", &key).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["stats"]["total"], 1);
    assert_eq!(body["data"]["stats"]["pending"], 1);
    assert_eq!(body["data"]["recent_designs"].as_array().unwrap().len(), 1);

    let (status, _) = app.get("/dashboard/admin-dashboard/", &key).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let response = app
        .send(
            Request::builder()
                .uri("/dashboard/dashboard/")
                .header("X-Api-Key", &app.admin_key)
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers()[header::LOCATION],
        "/dashboard/admin-dashboard/"
    );

    let (status, body) = app.get("/dashboard/admin-dashboard/", &app.admin_key).await;
    assert_eq!(status, StatusCode::OK);
    let stats = &body["data"]["stats"];
    assert_eq!(stats["total_creators"], 1);
    assert_eq!(stats["total_designs"], 1);
    assert_eq!(stats["total_products"], 7);
    assert_eq!(stats["pending_reviews"], 1);
    assert_eq!(stats["approved_designs"], 0);
    assert_eq!(body["data"]["pending_designs"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_index_redirects_signed_in_users() {
    let app = spawn_app().await;

    let (status, body) = common::into_json(
        app.send(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["login"], "/accounts/login/");

    let response = app
        .send(
            Request::builder()
                .uri("/")
                .header("Authorization", format!("Bearer {}", app.admin_key))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers()[header::LOCATION],
        "/dashboard/admin-dashboard/"
    );
}

#[tokio::test]
async fn test_signup_rules() {
    let app = spawn_app().await;
    app.signup("creator@example.com").await;

    let payload = |email: &str, password: &str, confirm: &str| {
        serde_json::json!({
            "email": email,
            "password": password,
            "password_confirm": confirm,
            "full_name": "Someone",
            "phone": "0812",
        })
    };

    let (status, _) = app
        .post_json(
            "/accounts/signup/",
            None,
            payload("creator@example.com", "password123", "password123"),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app
        .post_json(
            "/accounts/signup/",
            None,
            payload("new@example.com", "password123", "different123"),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post_json(
            "/accounts/signup/",
            None,
            payload("new@example.com", "short", "short"),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post_json(
            "/accounts/signup/",
            None,
            payload("not-an-email", "password123", "password123"),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_signup_always_creates_creator() {
    let app = spawn_app().await;

    let (status, body) = app
        .post_json(
            "/accounts/signup/",
            None,
            serde_json::json!({
                "email": "sneaky@example.com",
                "password": "password123",
                "password_confirm": "password123",
                "full_name": "Sneaky",
                "phone": "0812",
                "role": "admin",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["user"]["role"], "creator");
    assert_eq!(body["data"]["redirect"], "/dashboard/dashboard/");
}

#[tokio::test]
async fn test_login_session_flow() {
    let app = spawn_app().await;
    app.signup("creator@example.com").await;

    let (status, _) = app
        .post_json(
            "/accounts/login/",
            None,
            serde_json::json!({"email": "creator@example.com", "password": "wrong-password"}),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let response = app
        .send(
            Request::builder()
                .method("POST")
                .uri("/accounts/login/")
                .header("Content-Type", "application/json")
                .body(Body::from(
                    serde_json::json!({"email": "creator@example.com", "password": "password123"})
                        .to_string(),
                ))
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("login should set a session cookie")
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string();

    let response = app
        .send(
            Request::builder()
                .uri("/accounts/")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    let (status, body) = common::into_json(response).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "creator@example.com");

    let response = app
        .send(
            Request::builder()
                .method("POST")
                .uri("/accounts/logout/")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .send(
            Request::builder()
                .uri("/accounts/")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_profile_and_bank_updates() {
    let app = spawn_app().await;
    let (_, key) = app.signup("creator@example.com").await;

    let (status, body) = app
        .post_json(
            "/accounts/",
            Some(&key),
            serde_json::json!({
                "full_name": "Rina Art",
                "phone": "0813",
                "instagram": "@rina.art",
                "email": "hijack@example.com",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["full_name"], "Rina Art");
    assert_eq!(body["data"]["instagram"], "@rina.art");
    assert_eq!(body["data"]["email"], "creator@example.com");

    let (status, _) = app
        .post_json(
            "/accounts/",
            Some(&key),
            serde_json::json!({"full_name": "", "phone": "0813"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .post_json(
            "/accounts/bank/",
            Some(&key),
            serde_json::json!({
                "bank_name": "BCA",
                "bank_number": "1234567890",
                "bank_holder": "  ",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["bank_name"], "BCA");
    assert!(body["data"]["bank_holder"].is_null());

    let (status, body) = app.get("/accounts/bank/", &key).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["bank_number"], "1234567890");
}

#[tokio::test]
async fn test_products_catalog() {
    let app = spawn_app().await;
    let (_, key) = app.signup("creator@example.com").await;

    let (status, body) = app.get("/products/", &key).await;
    assert_eq!(status, StatusCode::OK);
    let products = body["data"].as_array().unwrap();
    assert_eq!(products.len(), 7);
    assert_eq!(products[0]["name"], "Crewneck");

    let new_product = serde_json::json!({
        "name": "Tote Bag",
        "category": "merchandise",
        "base_cost": "30000.50",
    });

    let (status, _) = app
        .post_json("/products/", Some(&key), new_product.clone())
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .post_json("/products/", Some(&app.admin_key), new_product)
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["base_cost"], "30000.50");
    assert_eq!(body["data"]["category"], "merchandise");
}

#[tokio::test]
async fn test_health() {
    let app = spawn_app().await;

    let response = app
        .send(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await;
    let (status, body) = common::into_json(response).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["database"], "up");
    assert_eq!(body["data"]["remote_storage"], false);
}
