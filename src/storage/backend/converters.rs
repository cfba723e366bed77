use crate::storage::Link;
use migration::entities::link;

/// 将 Sea-ORM Model 转换为 Link
pub fn model_to_link(model: link::Model) -> Link {
    Link {
        id: model.id,
        original_url: model.original_url,
        short_code: model.short_code,
        owner_id: model.owner_id,
        created_at: model.created_at,
        clicks: model.clicks.max(0) as u64,
    }
}

/// 将新建的 Link 转换为 ActiveModel（仅用于插入）
pub fn link_to_active_model(link: &Link) -> link::ActiveModel {
    use sea_orm::ActiveValue::Set;

    link::ActiveModel {
        id: Set(link.id.clone()),
        original_url: Set(link.original_url.clone()),
        short_code: Set(link.short_code.clone()),
        owner_id: Set(link.owner_id.clone()),
        clicks: Set(link.clicks as i64),
        created_at: Set(link.created_at),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::ActiveValue;

    fn create_test_model() -> link::Model {
        link::Model {
            id: "01928f3e-0000-7000-8000-000000000001".to_string(),
            original_url: "https://example.com".to_string(),
            short_code: "abc123".to_string(),
            owner_id: Some("user-1".to_string()),
            clicks: 42,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_model_to_link_basic() {
        let model = create_test_model();
        let expected = model.clone();

        let link = model_to_link(model);

        assert_eq!(link.id, expected.id);
        assert_eq!(link.short_code, expected.short_code);
        assert_eq!(link.original_url, expected.original_url);
        assert_eq!(link.owner_id.as_deref(), Some("user-1"));
        assert_eq!(link.clicks, 42);
        assert_eq!(link.created_at, expected.created_at);
    }

    #[test]
    fn test_model_to_link_anonymous_owner() {
        let model = link::Model {
            owner_id: None,
            ..create_test_model()
        };

        let link = model_to_link(model);
        assert!(link.owner_id.is_none());
    }

    #[test]
    fn test_model_to_link_negative_clicks() {
        let model = link::Model {
            clicks: -10, // 负数应该被转换为 0
            ..create_test_model()
        };

        let link = model_to_link(model);
        assert_eq!(link.clicks, 0);
    }

    #[test]
    fn test_link_to_active_model_sets_every_column() {
        let link = model_to_link(create_test_model());
        let active_model = link_to_active_model(&link);

        assert!(matches!(active_model.id, ActiveValue::Set(_)));
        assert!(matches!(active_model.created_at, ActiveValue::Set(_)));
        if let ActiveValue::Set(code) = active_model.short_code {
            assert_eq!(code, link.short_code);
        }
        if let ActiveValue::Set(owner) = active_model.owner_id {
            assert_eq!(owner, link.owner_id);
        }
        if let ActiveValue::Set(clicks) = active_model.clicks {
            assert_eq!(clicks, 42);
        }
    }
}
