/// Route configuration
///
/// Feed reads are public; mutating feed handlers take the `Identity`
/// extractor, which verifies the bearer credential before the handler body
/// runs. The personalized `/users` scope is wrapped in `RequireAuth` as a
/// whole.
use actix_web::{web, HttpResponse};

use crate::handlers;
use crate::middleware::RequireAuth;

/// Configure all routes for the application
pub fn configure_routes(cfg: &mut web::ServiceConfig, jwt_secret: &str) {
    cfg.route("/api/v1/health", web::get().to(health_summary))
        .service(
            web::scope("/api/v1/auth")
                .route("/signup", web::put().to(handlers::auth::signup))
                .route("/login", web::post().to(handlers::auth::login)),
        )
        .service(
            web::scope("/api/v1/feed")
                .service(
                    web::resource("/posts")
                        .route(web::get().to(handlers::feed::get_posts))
                        .route(web::post().to(handlers::feed::create_post)),
                )
                .service(
                    web::resource("/posts/{id}")
                        .route(web::get().to(handlers::feed::get_post))
                        .route(web::put().to(handlers::feed::update_post))
                        .route(web::delete().to(handlers::feed::delete_post)),
                ),
        )
        .service(
            web::scope("/api/v1/users")
                .wrap(RequireAuth::new(jwt_secret))
                .route("/status", web::get().to(handlers::users::get_status))
                .route("/status", web::put().to(handlers::users::put_status)),
        )
        // Stored image blobs, referenced by each post's imagePath
        .route("/images/{name}", web::get().to(handlers::images::get_image))
        // WebSocket endpoint (outside /api/v1)
        .route("/ws/feed", web::get().to(handlers::ws::feed_updates));
}

async fn health_summary() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "service": "feed-service",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
