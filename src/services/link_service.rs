//! Link management service
//!
//! Business rules for creating, editing, deleting and resolving short links.
//! Shared by the JSON API and the redirect endpoint. The caller's identity is
//! always passed in explicitly as an optional owner id.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::errors::{Result, SnaplinkError};
use crate::storage::backend::LinkChanges;
use crate::storage::{Link, SeaOrmStorage};
use crate::utils::url_validator::validate_url;
use crate::utils::{is_valid_short_code, validate_custom_code};

use super::code_generator::{CodeGenerator, RandomCodeGenerator};

/// 随机短码最多尝试次数
pub const MAX_GENERATION_ATTEMPTS: u32 = 10;

// ============ Request/Response DTOs ============

/// Request to create a new link
#[derive(Debug, Clone, Default)]
pub struct CreateLinkRequest {
    /// Destination URL
    pub original_url: String,
    /// Custom short code; `None` or `""` means generate one
    pub custom_code: Option<String>,
}

/// Request to edit an existing link
#[derive(Debug, Clone, Default)]
pub struct UpdateLinkRequest {
    /// New destination URL
    pub original_url: String,
    /// New short code; `None`, `""` or the current code keep it unchanged
    pub custom_code: Option<String>,
}

/// Identity of a created or edited link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkCreated {
    pub link_id: String,
    pub short_code: String,
}

fn check_url(url: &str) -> Result<()> {
    validate_url(url).map_err(|e| {
        debug!("Rejected destination URL '{}': {}", url, e);
        SnaplinkError::invalid_url(e.to_string())
    })
}

/// 空字符串视为未提供
fn non_empty(code: Option<String>) -> Option<String> {
    code.filter(|c| !c.is_empty())
}

pub struct LinkService {
    storage: Arc<SeaOrmStorage>,
    generator: Arc<dyn CodeGenerator>,
}

impl LinkService {
    /// Create a service backed by the random code generator
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self::with_generator(storage, Arc::new(RandomCodeGenerator::default()))
    }

    pub fn with_generator(storage: Arc<SeaOrmStorage>, generator: Arc<dyn CodeGenerator>) -> Self {
        Self { storage, generator }
    }

    /// 校验自定义短码并确认未被占用
    async fn reserve_custom_code(&self, code: &str) -> Result<()> {
        validate_custom_code(code).inspect_err(|e| {
            debug!("Rejected custom code: {}", e);
        })?;

        if self.storage.code_exists(code).await? {
            info!("Custom code '{}' is already taken", code);
            return Err(SnaplinkError::code_taken(code));
        }
        Ok(())
    }

    fn new_link(&self, original_url: String, short_code: String, owner_id: Option<&str>) -> Link {
        Link {
            id: uuid::Uuid::now_v7().to_string(),
            original_url,
            short_code,
            owner_id: owner_id.map(str::to_string),
            created_at: Utc::now(),
            clicks: 0,
        }
    }

    /// 随机短码：最多尝试 `MAX_GENERATION_ATTEMPTS` 次
    ///
    /// 预检查命中或插入时撞上唯一索引都算一次碰撞。
    async fn insert_with_generated_code(
        &self,
        original_url: String,
        owner_id: Option<&str>,
    ) -> Result<Link> {
        for attempt in 1..=MAX_GENERATION_ATTEMPTS {
            let candidate = self.generator.generate();

            if self.storage.code_exists(&candidate).await? {
                debug!(
                    "Generated code '{}' collided (attempt {}/{})",
                    candidate, attempt, MAX_GENERATION_ATTEMPTS
                );
                continue;
            }

            let link = self.new_link(original_url.clone(), candidate, owner_id);
            match self.storage.insert(&link).await {
                Ok(()) => return Ok(link),
                Err(SnaplinkError::CodeTaken(code)) => {
                    debug!(
                        "Generated code '{}' was claimed concurrently (attempt {}/{})",
                        code, attempt, MAX_GENERATION_ATTEMPTS
                    );
                }
                Err(e) => return Err(e),
            }
        }

        warn!(
            "Gave up generating a short code after {} attempts",
            MAX_GENERATION_ATTEMPTS
        );
        Err(SnaplinkError::CodeGenerationExhausted {
            attempts: MAX_GENERATION_ATTEMPTS,
        })
    }

    // ============ Operations ============

    /// Create a new short link owned by `owner_id` (anonymous when `None`)
    pub async fn create_link(
        &self,
        req: CreateLinkRequest,
        owner_id: Option<&str>,
    ) -> Result<LinkCreated> {
        check_url(&req.original_url)?;

        let link = match non_empty(req.custom_code) {
            Some(code) => {
                self.reserve_custom_code(&code).await?;
                let link = self.new_link(req.original_url, code, owner_id);
                // 并发竞争时唯一索引兜底，insert 会返回 CodeTaken
                self.storage.insert(&link).await?;
                link
            }
            None => {
                self.insert_with_generated_code(req.original_url, owner_id)
                    .await?
            }
        };

        info!(
            "LinkService: created '{}' -> '{}'",
            link.short_code, link.original_url
        );
        Ok(LinkCreated {
            link_id: link.id,
            short_code: link.short_code,
        })
    }

    /// Edit destination and optionally the short code; owner only
    pub async fn update_link(
        &self,
        link_id: &str,
        req: UpdateLinkRequest,
        acting_user: Option<&str>,
    ) -> Result<LinkCreated> {
        let existing = self.require_owned(link_id, acting_user).await?;

        check_url(&req.original_url)?;

        let new_code = match non_empty(req.custom_code) {
            Some(code) if code != existing.short_code => {
                self.reserve_custom_code(&code).await?;
                Some(code)
            }
            _ => None,
        };

        let changes = LinkChanges {
            original_url: req.original_url,
            short_code: new_code.clone(),
        };
        self.storage.update_target(link_id, &changes).await?;

        let short_code = new_code.unwrap_or(existing.short_code);
        info!("LinkService: updated '{}' ({})", link_id, short_code);
        Ok(LinkCreated {
            link_id: link_id.to_string(),
            short_code,
        })
    }

    /// Permanently remove a link; owner only
    pub async fn delete_link(&self, link_id: &str, acting_user: Option<&str>) -> Result<()> {
        self.require_owned(link_id, acting_user).await?;
        self.storage.delete_by_id(link_id).await?;

        info!("LinkService: deleted '{}'", link_id);
        Ok(())
    }

    async fn require_owned(&self, link_id: &str, acting_user: Option<&str>) -> Result<Link> {
        let link = self
            .storage
            .find_by_id(link_id)
            .await?
            .ok_or_else(|| SnaplinkError::not_found(format!("Link '{}' not found", link_id)))?;

        if !link.is_owned_by(acting_user) {
            info!(
                "Denied change to link '{}' for user {:?}",
                link_id, acting_user
            );
            return Err(SnaplinkError::forbidden("You do not own this link"));
        }
        Ok(link)
    }

    /// Resolve a short code; codes that cannot exist never reach the store
    pub async fn get_link_by_code(&self, short_code: &str) -> Result<Option<Link>> {
        if !is_valid_short_code(short_code) {
            return Ok(None);
        }
        self.storage.find_by_code(short_code).await
    }

    pub async fn get_link(&self, link_id: &str) -> Result<Option<Link>> {
        self.storage.find_by_id(link_id).await
    }

    /// Links owned by the caller, newest first; empty for anonymous callers
    pub async fn list_links_by_owner(&self, owner_id: Option<&str>) -> Result<Vec<Link>> {
        match owner_id {
            Some(owner) => self.storage.list_by_owner(owner).await,
            None => Ok(Vec::new()),
        }
    }

    /// Count one visit
    pub async fn record_visit(&self, link_id: &str) -> Result<()> {
        self.storage.increment_clicks(link_id).await
    }
}
