//! Links API 处理函数

use std::sync::Arc;

use actix_web::{HttpResponse, web};
use tracing::{info, trace};

use crate::api::identity::Caller;
use crate::errors::SnaplinkError;
use crate::services::{CreateLinkRequest, LinkService, UpdateLinkRequest};

use super::helpers::{
    ShortUrlBase, api_result, created_response, error_from_snaplink, success_response,
};
use super::types::{LinkCreatedResponse, LinkResponse, PostNewLink, PutLink};

/// 创建短链接（允许匿名）
pub async fn create_link(
    caller: Caller,
    body: web::Json<PostNewLink>,
    links: web::Data<Arc<LinkService>>,
    base: web::Data<ShortUrlBase>,
) -> HttpResponse {
    let body = body.into_inner();
    trace!("Links API: create request for {}", body.original_url);

    let req = CreateLinkRequest {
        original_url: body.original_url,
        custom_code: body.custom_code,
    };

    match links.create_link(req, caller.user_id()).await {
        Ok(created) => created_response(LinkCreatedResponse {
            short_url: base.short_url(&created.short_code),
            link_id: created.link_id,
            short_code: created.short_code,
        }),
        Err(e) => error_from_snaplink(&e),
    }
}

/// 当前用户的链接列表（最新在前），匿名返回空列表
pub async fn list_my_links(
    caller: Caller,
    links: web::Data<Arc<LinkService>>,
    base: web::Data<ShortUrlBase>,
) -> HttpResponse {
    let result = links
        .list_links_by_owner(caller.user_id())
        .await
        .map(|items| {
            items
                .into_iter()
                .map(|link| {
                    let short_url = base.short_url(&link.short_code);
                    LinkResponse::from_link(link, short_url)
                })
                .collect::<Vec<_>>()
        });

    if let Ok(ref items) = result {
        info!("Links API: returning {} links", items.len());
    }
    api_result(result)
}

/// 按短码查询（公开）
pub async fn get_link_by_code(
    path: web::Path<String>,
    links: web::Data<Arc<LinkService>>,
    base: web::Data<ShortUrlBase>,
) -> HttpResponse {
    let code = path.into_inner();

    match links.get_link_by_code(&code).await {
        Ok(Some(link)) => {
            let short_url = base.short_url(&link.short_code);
            success_response(LinkResponse::from_link(link, short_url))
        }
        Ok(None) => error_from_snaplink(&SnaplinkError::not_found(format!(
            "Short code '{}' not found",
            code
        ))),
        Err(e) => error_from_snaplink(&e),
    }
}

/// 按 id 查询，仅所有者可见
pub async fn get_link(
    caller: Caller,
    path: web::Path<String>,
    links: web::Data<Arc<LinkService>>,
    base: web::Data<ShortUrlBase>,
) -> HttpResponse {
    let link_id = path.into_inner();

    let result = match links.get_link(&link_id).await {
        Ok(Some(link)) if link.is_owned_by(caller.user_id()) => {
            let short_url = base.short_url(&link.short_code);
            Ok(LinkResponse::from_link(link, short_url))
        }
        Ok(Some(_)) => Err(SnaplinkError::forbidden("You do not own this link")),
        Ok(None) => Err(SnaplinkError::not_found(format!(
            "Link '{}' not found",
            link_id
        ))),
        Err(e) => Err(e),
    };
    api_result(result)
}

/// 修改目标地址 / 短码
pub async fn update_link(
    caller: Caller,
    path: web::Path<String>,
    body: web::Json<PutLink>,
    links: web::Data<Arc<LinkService>>,
    base: web::Data<ShortUrlBase>,
) -> HttpResponse {
    let link_id = path.into_inner();
    let body = body.into_inner();

    let req = UpdateLinkRequest {
        original_url: body.original_url,
        custom_code: body.custom_code,
    };

    let result = links
        .update_link(&link_id, req, caller.user_id())
        .await
        .map(|updated| LinkCreatedResponse {
            short_url: base.short_url(&updated.short_code),
            link_id: updated.link_id,
            short_code: updated.short_code,
        });
    api_result(result)
}

pub async fn delete_link(
    caller: Caller,
    path: web::Path<String>,
    links: web::Data<Arc<LinkService>>,
) -> HttpResponse {
    let link_id = path.into_inner();
    api_result(
        links
            .delete_link(&link_id, caller.user_id())
            .await
            .map(|()| serde_json::Value::Null),
    )
}
