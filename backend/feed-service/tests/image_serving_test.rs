/// Route-level tests for serving stored image blobs back to clients.
mod common;

use std::path::Path;
use std::sync::Arc;

use actix_web::{http::StatusCode, test, web, App};
use tempfile::tempdir;

use feed_service::app_state::AppState;
use feed_service::config::AuthConfig;
use feed_service::realtime::FeedBroadcaster;
use feed_service::routes::configure_routes;
use feed_service::services::{AuthService, PostService};
use feed_service::storage::{DiskImageStore, ImageStore};

use common::{MemoryPostStore, MemoryUserStore};

const SECRET: &str = "integration-test-secret-32-bytes-min!!!!";

fn state(images: Arc<dyn ImageStore>) -> web::Data<AppState> {
    let broadcaster = FeedBroadcaster::new();
    web::Data::new(AppState {
        auth: AuthService::new(
            Arc::new(MemoryUserStore::new()),
            AuthConfig {
                jwt_secret: SECRET.to_string(),
                token_expiry_hours: 1,
            },
        ),
        posts: PostService::new(
            Arc::new(MemoryPostStore::new()),
            images.clone(),
            broadcaster.clone(),
            2,
        ),
        images,
        broadcaster,
        jwt_secret: SECRET.to_string(),
    })
}

#[actix_web::test]
async fn stored_image_is_served_at_its_reference() {
    let dir = tempdir().unwrap();
    let store = Arc::new(DiskImageStore::new(dir.path()));
    let stored = store
        .save("cat.png", "image/png", b"png bytes")
        .await
        .unwrap();

    let app = test::init_service(
        App::new()
            .app_data(state(store))
            .configure(|cfg| configure_routes(cfg, SECRET)),
    )
    .await;

    // A post's imagePath is "<root>/<name>"; the route serves the name.
    let name = Path::new(&stored.path)
        .file_name()
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    let req = test::TestRequest::get()
        .uri(&format!("/images/{}", name))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers().get("content-type").unwrap(), "image/png");
    assert_eq!(test::read_body(res).await, b"png bytes".as_ref());
}

#[actix_web::test]
async fn unknown_image_name_is_not_found() {
    let dir = tempdir().unwrap();
    let store = Arc::new(DiskImageStore::new(dir.path()));

    let app = test::init_service(
        App::new()
            .app_data(state(store))
            .configure(|cfg| configure_routes(cfg, SECRET)),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/images/never-stored.png")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
