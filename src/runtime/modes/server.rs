//! Server mode
//!
//! This module contains the HTTP server startup logic.
//! It configures and starts the HTTP server with all necessary routes.

use actix_web::{
    App, HttpServer,
    middleware::{Compress, DefaultHeaders},
    web,
};
use anyhow::Result;
use tracing::warn;

use crate::api::services::{AppStartTime, api_routes, health_routes, redirect_routes};
use crate::runtime::lifetime;

/// 最大工作线程数
const MAX_WORKERS: usize = 32;

/// Register every route
///
/// Shared by the server and the HTTP integration tests. The caller provides
/// app data: `Arc<LinkService>`, `Arc<SeaOrmStorage>`, `JwtService`,
/// `ShortUrlBase` and `AppStartTime`.
pub fn build_app(cfg: &mut web::ServiceConfig) {
    cfg.service(api_routes())
        .service(health_routes())
        .service(redirect_routes());
}

/// Run the HTTP server
///
/// This function:
/// 1. Records startup time
/// 2. Prepares storage, services and token validation
/// 3. Configures and starts the HTTP server
/// 4. Listens for graceful shutdown signals
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server() -> Result<()> {
    let app_start_time = AppStartTime {
        start_datetime: chrono::Utc::now(),
    };

    let startup = lifetime::startup::prepare_server_startup()
        .await
        .map_err(|e| {
            tracing::error!("Server startup failed: {}", e);
            e
        })?;

    let config = crate::config::get_config();

    let storage = web::Data::new(startup.storage.clone());
    let link_service = web::Data::new(startup.link_service.clone());
    let jwt = web::Data::new(startup.jwt);
    let short_url_base = web::Data::new(startup.short_url_base);
    let app_start_time = web::Data::new(app_start_time);

    let cpu_count = config.server.cpu_count.clamp(1, MAX_WORKERS);
    warn!("Using {} CPU cores for the server", cpu_count);

    // Clone db handle before storage moves into HttpServer closure
    let db_for_shutdown = startup.storage.get_db().clone();

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Compress::default())
            .wrap(DefaultHeaders::new().add(("X-Content-Type-Options", "nosniff")))
            .app_data(storage.clone())
            .app_data(link_service.clone())
            .app_data(jwt.clone())
            .app_data(short_url_base.clone())
            .app_data(app_start_time.clone())
            .app_data(web::PayloadConfig::new(64 * 1024))
            .configure(build_app)
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .client_request_timeout(std::time::Duration::from_millis(5000))
    .client_disconnect_timeout(std::time::Duration::from_millis(1000))
    .workers(cpu_count);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    warn!("Starting server at http://{}", bind_address);
    let server = server.bind(bind_address)?.run();

    // Wait for server or shutdown signal
    tokio::select! {
        res = server => {
            res?;
        }
        _ = lifetime::shutdown::listen_for_shutdown(db_for_shutdown) => {
            warn!("Graceful shutdown: all tasks completed");
        }
    }

    Ok(())
}
