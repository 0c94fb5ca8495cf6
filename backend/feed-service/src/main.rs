use std::io;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use feed_service::app_state::AppState;
use feed_service::db::{PgPostStore, PgUserStore};
use feed_service::realtime::FeedBroadcaster;
use feed_service::routes::configure_routes;
use feed_service::services::{AuthService, PostService};
use feed_service::storage::{DiskImageStore, ImageStore};
use feed_service::Config;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("configuration loading failed: {}", e);
            eprintln!("ERROR: failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting feed-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    // Database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("database connect: {e}")))?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("migrations: {e}")))?;

    tracing::info!("Connected to database");

    // Fan-out bus: constructed here, torn down when the server stops.
    let broadcaster = FeedBroadcaster::new();

    let users = Arc::new(PgUserStore::new(pool.clone()));
    let posts = Arc::new(PgPostStore::new(pool.clone()));
    let images: Arc<dyn ImageStore> =
        Arc::new(DiskImageStore::new(config.media.image_dir.clone()));

    let state = web::Data::new(AppState {
        auth: AuthService::new(users, config.auth.clone()),
        posts: PostService::new(
            posts,
            images.clone(),
            broadcaster.clone(),
            config.feed.page_size,
        ),
        images,
        broadcaster,
        jwt_secret: config.auth.jwt_secret.clone(),
    });

    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!("Starting HTTP server at {}", bind_address);

    let allowed_origins = config.app.allowed_origins.clone();
    let jwt_secret = config.auth.jwt_secret.clone();

    HttpServer::new(move || {
        let mut cors = Cors::default();
        for origin in allowed_origins.split(',').map(str::trim) {
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        App::new()
            .app_data(state.clone())
            .wrap(cors)
            .wrap(tracing_actix_web::TracingLogger::default())
            .configure(|cfg| configure_routes(cfg, &jwt_secret))
    })
    .bind(&bind_address)?
    .run()
    .await
}
