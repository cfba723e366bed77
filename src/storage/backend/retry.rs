//! 数据库操作重试
//!
//! 连接抖动、死锁、锁等待超时、SQLite BUSY 等瞬时错误按指数退避重试；
//! 唯一索引冲突等确定性错误立即返回。

use sea_orm::DbErr;
use sea_orm::error::RuntimeErr;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::DatabaseConfig;

/// 可重试的数据库错误码
///
/// MySQL 1213/1205（死锁、锁等待超时），PostgreSQL 40001/40P01
/// （序列化失败、死锁），SQLite 5/6（BUSY、LOCKED）
const TRANSIENT_SQL_CODES: &[&str] = &["1213", "1205", "40001", "40P01", "5", "6"];

/// 驱动没有给出错误码时按消息匹配（小写）
const TRANSIENT_MESSAGES: &[&str] = &[
    "deadlock",
    "lock wait timeout",
    "database is locked",
    "serialization failure",
];

/// 判断数据库错误是否可重试
pub fn is_retryable_error(err: &DbErr) -> bool {
    match err {
        DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => true,
        DbErr::Exec(runtime) | DbErr::Query(runtime) => is_transient(runtime),
        _ => false,
    }
}

/// 非幂等语句（如自增）只在确定未执行时重试
///
/// `Conn` 可能发生在语句已提交之后，重放会重复生效；取连接失败与锁冲突回滚
/// 则保证语句没有生效
pub fn is_replay_safe_error(err: &DbErr) -> bool {
    !matches!(err, DbErr::Conn(_)) && is_retryable_error(err)
}

fn is_transient(err: &RuntimeErr) -> bool {
    match err {
        RuntimeErr::SqlxError(sqlx_err) => {
            let code = sqlx_err
                .as_database_error()
                .and_then(|db_err| db_err.code().map(|c| c.into_owned()));
            match code {
                Some(code) => TRANSIENT_SQL_CODES.contains(&code.as_str()),
                None => message_is_transient(&sqlx_err.to_string()),
            }
        }
        RuntimeErr::Internal(msg) => message_is_transient(msg),
        #[allow(unreachable_patterns)]
        _ => false,
    }
}

fn message_is_transient(msg: &str) -> bool {
    let msg = msg.to_lowercase();
    TRANSIENT_MESSAGES.iter().any(|needle| msg.contains(needle))
}

/// 重试配置
#[derive(Clone, Copy, Debug)]
pub struct RetryConfig {
    /// 首次失败后的最多重试次数
    pub max_retries: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay_ms: 100,
            max_delay_ms: 2000,
        }
    }
}

impl RetryConfig {
    pub fn from_database(config: &DatabaseConfig) -> Self {
        Self {
            max_retries: config.retry_count,
            base_delay_ms: config.retry_base_delay_ms,
            max_delay_ms: config.retry_max_delay_ms,
        }
    }

    /// 第 `retry` 次重试（从 1 开始）前的等待：`base * 2^(retry-1)`，
    /// 上限 `max_delay_ms`，再加 0-25% 抖动
    fn delay_before(&self, retry: u32) -> Duration {
        let factor = 1u64.checked_shl(retry.saturating_sub(1)).unwrap_or(u64::MAX);
        let capped = self
            .base_delay_ms
            .saturating_mul(factor)
            .min(self.max_delay_ms);
        let jitter = rand::random_range(0..=capped / 4);
        Duration::from_millis(capped + jitter)
    }
}

/// 执行 `operation`，瞬时错误按 `config` 退避重试
pub async fn with_retry<T, F, Fut>(
    operation_name: &str,
    config: RetryConfig,
    operation: F,
) -> Result<T, DbErr>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DbErr>>,
{
    retry_while(operation_name, config, is_retryable_error, operation).await
}

/// 非幂等操作的重试：连接中断不重放
pub async fn with_retry_non_idempotent<T, F, Fut>(
    operation_name: &str,
    config: RetryConfig,
    operation: F,
) -> Result<T, DbErr>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DbErr>>,
{
    retry_while(operation_name, config, is_replay_safe_error, operation).await
}

async fn retry_while<T, F, Fut>(
    operation_name: &str,
    config: RetryConfig,
    retryable: fn(&DbErr) -> bool,
    mut operation: F,
) -> Result<T, DbErr>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DbErr>>,
{
    let mut retries = 0;
    loop {
        let err = match operation().await {
            Ok(value) => {
                if retries > 0 {
                    debug!("'{}' succeeded after {} retries", operation_name, retries);
                }
                return Ok(value);
            }
            Err(err) => err,
        };

        if retries >= config.max_retries || !retryable(&err) {
            return Err(err);
        }

        retries += 1;
        let delay = config.delay_before(retries);
        warn!(
            "'{}' hit a transient error ({}), retry {}/{} in {:?}",
            operation_name, err, retries, config.max_retries, delay
        );
        tokio::time::sleep(delay).await;
    }
}
