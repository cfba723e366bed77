//! Mutation operations for SeaOrmStorage
//!
//! This module contains all write database operations. Every mutation is a
//! single statement; uniqueness of `short_code` is left to the unique index.

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, sea_query::Expr};
use tracing::{debug, info};

use super::converters::link_to_active_model;
use super::{SeaOrmStorage, is_unique_violation, retry};
use crate::errors::{Result, SnaplinkError};
use crate::storage::Link;

use migration::entities::link;

/// 可修改的字段
#[derive(Debug, Clone)]
pub struct LinkChanges {
    pub original_url: String,
    /// None 表示短码不变
    pub short_code: Option<String>,
}

impl SeaOrmStorage {
    /// 插入新链接；短码冲突返回 `CodeTaken`
    pub async fn insert(&self, new_link: &Link) -> Result<()> {
        let db = &self.db;

        retry::with_retry(
            &format!("insert({})", new_link.short_code),
            self.retry_config,
            || link::Entity::insert(link_to_active_model(new_link)).exec(db),
        )
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                SnaplinkError::code_taken(&new_link.short_code)
            } else {
                SnaplinkError::database_operation(format!(
                    "Failed to insert link '{}': {}",
                    new_link.short_code, e
                ))
            }
        })?;

        info!(
            "Link inserted: {} -> {}",
            new_link.short_code, new_link.original_url
        );
        Ok(())
    }

    /// 更新目标地址（以及可选的短码），单条 UPDATE 语句
    pub async fn update_target(&self, id: &str, changes: &LinkChanges) -> Result<()> {
        let db = &self.db;

        let result = retry::with_retry(&format!("update({})", id), self.retry_config, || {
            let mut update = link::Entity::update_many()
                .col_expr(
                    link::Column::OriginalUrl,
                    Expr::val(changes.original_url.clone()),
                )
                .filter(link::Column::Id.eq(id));
            if let Some(ref code) = changes.short_code {
                update = update.col_expr(link::Column::ShortCode, Expr::val(code.clone()));
            }
            update.exec(db)
        })
        .await
        .map_err(|e| match changes.short_code {
            Some(ref code) if is_unique_violation(&e) => SnaplinkError::code_taken(code),
            _ => SnaplinkError::database_operation(format!("Failed to update link '{}': {}", id, e)),
        })?;

        // MySQL 对未改变的行返回 0，需要区分“不存在”和“无变化”
        if result.rows_affected == 0 && self.find_by_id(id).await?.is_none() {
            return Err(SnaplinkError::not_found(format!("Link '{}' not found", id)));
        }

        info!("Link updated: {}", id);
        Ok(())
    }

    pub async fn delete_by_id(&self, id: &str) -> Result<()> {
        let db = &self.db;

        let result = retry::with_retry(&format!("delete({})", id), self.retry_config, || {
            link::Entity::delete_by_id(id).exec(db)
        })
        .await
        .map_err(|e| {
            SnaplinkError::database_operation(format!("Failed to delete link '{}': {}", id, e))
        })?;

        if result.rows_affected == 0 {
            return Err(SnaplinkError::not_found(format!("Link '{}' not found", id)));
        }

        info!("Link deleted: {}", id);
        Ok(())
    }

    /// 原子自增点击数：`clicks = clicks + 1`
    pub async fn increment_clicks(&self, id: &str) -> Result<()> {
        use sea_orm::ExprTrait;

        let db = &self.db;

        // 连接中断时语句可能已提交，不重放
        let result = retry::with_retry_non_idempotent(
            &format!("increment_clicks({})", id),
            self.retry_config,
            || {
                link::Entity::update_many()
                    .col_expr(
                        link::Column::Clicks,
                        Expr::col(link::Column::Clicks).add(Expr::val(1i64)),
                    )
                    .filter(Expr::col(link::Column::Id).eq(id))
                    .exec(db)
            },
        )
        .await
        .map_err(|e| {
            SnaplinkError::database_operation(format!(
                "Failed to record visit for link '{}': {}",
                id, e
            ))
        })?;

        if result.rows_affected == 0 {
            return Err(SnaplinkError::not_found(format!("Link '{}' not found", id)));
        }

        debug!("Click recorded for link {}", id);
        Ok(())
    }
}
