use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info};

use crate::api::JwtService;
use crate::api::services::ShortUrlBase;
use crate::config::get_config;
use crate::services::LinkService;
use crate::storage::{SeaOrmStorage, StorageFactory};

pub struct StartupContext {
    pub storage: Arc<SeaOrmStorage>,
    pub link_service: Arc<LinkService>,
    pub jwt: JwtService,
    pub short_url_base: ShortUrlBase,
}

/// 准备服务器启动的上下文
/// 包括存储（含迁移）、链接服务与 token 校验
pub async fn prepare_server_startup() -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let config = get_config();

    let storage = StorageFactory::create()
        .await
        .context("Failed to create storage backend")?;
    info!("Using storage backend: {}", storage.backend_name());

    let link_service = Arc::new(LinkService::new(storage.clone()));
    let jwt = JwtService::from_config(&config.auth);
    let short_url_base = ShortUrlBase::from_config(&config.server);

    debug!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );

    Ok(StartupContext {
        storage,
        link_service,
        jwt,
        short_url_base,
    })
}
