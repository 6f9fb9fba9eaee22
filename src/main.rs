//! Texas Elite Gutters backend server.
//!
//! Loads the profile's `.env` file, connects MongoDB and Redis, initialises
//! every registered repository and service, creates the collection indexes,
//! then serves the API.

use std::io;
use std::sync::Arc;
use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{middleware, App, HttpServer};
use actix_governor::{Governor, GovernorConfigBuilder};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};
use elite_gutters_backend::caching::redis::RedisClient;
use elite_gutters_backend::config::{
    CorsConfig, Environment, JwtConfig, MailConfig, RateLimitConfig, ServerConfig,
};
use elite_gutters_backend::core::registry::ServiceLocator;
use elite_gutters_backend::db::Database;
use elite_gutters_backend::repositories;
use elite_gutters_backend::routes::configure_all_routes;

#[actix_web::main]
async fn main() -> io::Result<()> {
    load_env_file();
    init_logging();

    info!("🚀 Starting Texas Elite Gutters backend...");

    JwtConfig::require_secret(&Environment::current()).map_err(|e| {
        error!("{}", e);
        io::Error::other(e)
    })?;

    let (database, redis_client) = initialize_data_stores().await?;

    ServiceLocator::set(database);
    ServiceLocator::set(redis_client);

    ServiceLocator::initialize_all().await.map_err(|e| {
        error!("Component initialisation failed: {}", e);
        io::Error::other(e.to_string())
    })?;

    repositories::create_indexes().await.map_err(|e| {
        error!("Index creation failed: {}", e);
        io::Error::other(e.to_string())
    })?;

    if MailConfig::from_env().is_none() {
        warn!("✉️ Mail is not configured; contact notifications are disabled");
    }

    info!("✅ All components initialised");

    start_http_server().await
}

async fn start_http_server() -> io::Result<()> {
    let bind_address = (ServerConfig::host(), ServerConfig::port());
    let workers = ServerConfig::workers();

    info!("🌐 Listening on http://{}:{}", bind_address.0, bind_address.1);
    info!("📍 Health check: http://{}:{}/health", bind_address.0, bind_address.1);

    let per_second = RateLimitConfig::per_second();
    let burst_size = RateLimitConfig::burst_size();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(per_second)
        .burst_size(burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| io::Error::other("invalid rate limit configuration"))?;

    info!("🛡️ Rate limiting: {} req/s, burst {}", per_second, burst_size);

    let allowed_origins = CorsConfig::allowed_origins();
    info!("CORS origins: {:?}", allowed_origins);

    HttpServer::new(move || {
        App::new()
            .wrap(Governor::new(&governor_conf))
            .wrap(configure_cors(&allowed_origins))
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(configure_all_routes)
    })
        .bind(bind_address)?
        .workers(workers)
        .run()
        .await
}

/// `PROFILE=prod` loads `.env.prod`, `PROFILE=dev` (the default) loads
/// `.env.dev`, anything else the plain `.env`.
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    // Logging is not up yet, so report straight to stderr.
    let result = match profile.as_str() {
        "prod" => dotenv::from_filename(".env.prod").map(|_| ()),
        "dev" => dotenv::from_filename(".env.dev").map(|_| ()),
        _ => dotenv().map(|_| ()),
    };

    if let Err(e) = result {
        eprintln!("Env file for profile '{}' not loaded: {}", profile, e);
    }
}

/// `RUST_LOG` overrides the default filter.
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=info"));
}

async fn initialize_data_stores() -> io::Result<(Arc<Database>, Arc<RedisClient>)> {
    info!("📡 Connecting to MongoDB...");
    let database = Database::new().await.map_err(|e| {
        error!("MongoDB connection failed: {}", e);
        io::Error::other(e.to_string())
    })?;
    info!("✅ MongoDB connected");

    info!("📡 Connecting to Redis...");
    let redis_client = RedisClient::new().await.map_err(|e| {
        error!("Redis connection failed: {}", e);
        io::Error::other(e.to_string())
    })?;
    info!("✅ Redis connected");

    Ok((Arc::new(database), Arc::new(redis_client)))
}

fn configure_cors(allowed_origins: &[String]) -> Cors {
    let cors = allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin));

    cors.allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .supports_credentials()
        .max_age(3600)
}
