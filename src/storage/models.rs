use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub id: String,
    pub original_url: String,
    pub short_code: String,
    pub owner_id: Option<String>,
    pub created_at: DateTime<Utc>,

    #[serde(default)]
    pub clicks: u64,
}

impl Link {
    /// 是否由指定用户拥有（匿名创建的记录不属于任何人）
    pub fn is_owned_by(&self, user_id: Option<&str>) -> bool {
        matches!((self.owner_id.as_deref(), user_id), (Some(owner), Some(user)) if owner == user)
    }
}
