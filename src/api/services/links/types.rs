//! Links API 类型定义

use serde::{Deserialize, Serialize};

use crate::storage::Link;

/// 统一响应包装
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub message: String,
    pub data: Option<T>,
}

/// `POST /api/links` 请求体
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PostNewLink {
    pub original_url: String,
    #[serde(default)]
    pub custom_code: Option<String>,
}

/// `PUT /api/links/{id}` 请求体
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PutLink {
    pub original_url: String,
    #[serde(default)]
    pub custom_code: Option<String>,
}

/// 创建/更新后的返回
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct LinkCreatedResponse {
    pub link_id: String,
    pub short_code: String,
    pub short_url: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct LinkResponse {
    pub id: String,
    pub original_url: String,
    pub short_code: String,
    pub short_url: String,
    pub clicks: u64,
    pub created_at: String,
}

impl LinkResponse {
    pub fn from_link(link: Link, short_url: String) -> Self {
        Self {
            id: link.id,
            original_url: link.original_url,
            short_code: link.short_code,
            short_url,
            clicks: link.clicks,
            created_at: link.created_at.to_rfc3339(),
        }
    }
}
