//! Query operations for SeaOrmStorage
//!
//! This module contains all read-only database operations.

use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use tracing::{debug, error};

use super::{SeaOrmStorage, retry};
use crate::errors::{Result, SnaplinkError};
use crate::storage::Link;

use migration::entities::link;

use super::converters::model_to_link;

impl SeaOrmStorage {
    /// 按 id 查询
    pub async fn find_by_id(&self, id: &str) -> Result<Option<Link>> {
        let db = &self.db;

        let result = retry::with_retry(&format!("find_by_id({})", id), self.retry_config, || {
            link::Entity::find_by_id(id).one(db)
        })
        .await
        .map_err(|e| {
            error!("Failed to load link by id (after retries): {}", e);
            SnaplinkError::database_operation(format!("Failed to load link '{}': {}", id, e))
        })?;

        Ok(result.map(model_to_link))
    }

    /// 按短码查询（走唯一索引）
    pub async fn find_by_code(&self, code: &str) -> Result<Option<Link>> {
        let db = &self.db;

        let result = retry::with_retry(&format!("find_by_code({})", code), self.retry_config, || {
            link::Entity::find()
                .filter(link::Column::ShortCode.eq(code))
                .one(db)
        })
        .await
        .map_err(|e| {
            error!("Failed to load link by code (after retries): {}", e);
            SnaplinkError::database_operation(format!(
                "Failed to load short code '{}': {}",
                code, e
            ))
        })?;

        Ok(result.map(model_to_link))
    }

    /// 短码是否已存在
    pub async fn code_exists(&self, code: &str) -> Result<bool> {
        Ok(self.find_by_code(code).await?.is_some())
    }

    /// 列出某个用户的全部链接，最新的在前
    ///
    /// id 为 UUID v7（按时间递增），同一时刻创建的记录以 id 作为次序。
    pub async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Link>> {
        let db = &self.db;

        let models = retry::with_retry("list_by_owner", self.retry_config, || {
            link::Entity::find()
                .filter(link::Column::OwnerId.eq(owner_id))
                .order_by_desc(link::Column::CreatedAt)
                .order_by_desc(link::Column::Id)
                .all(db)
        })
        .await
        .map_err(|e| {
            error!("Failed to list links for owner (after retries): {}", e);
            SnaplinkError::database_operation(format!("Failed to list links: {}", e))
        })?;

        debug!("Loaded {} links for owner {}", models.len(), owner_id);
        Ok(models.into_iter().map(model_to_link).collect())
    }

    /// 统计链接总数（健康检查使用）
    pub async fn count(&self) -> Result<u64> {
        link::Entity::find()
            .count(&self.db)
            .await
            .map_err(|e| SnaplinkError::database_operation(format!("Failed to count links: {}", e)))
    }
}
