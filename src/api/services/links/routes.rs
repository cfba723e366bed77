//! Links API 路由配置

use actix_web::web;

use super::handlers::{
    create_link, delete_link, get_link, get_link_by_code, list_my_links, update_link,
};
use super::helpers::json_config;

/// 链接路由 `/links`
///
/// 包含：
/// - GET /links - 当前用户的链接
/// - POST /links - 创建链接
/// - GET /links/code/{code} - 按短码查询
/// - GET /links/{id} - 按 id 查询
/// - PUT /links/{id} - 更新链接
/// - DELETE /links/{id} - 删除链接
pub fn links_routes() -> actix_web::Scope {
    web::scope("/links")
        .app_data(json_config())
        .route("", web::get().to(list_my_links))
        .route("", web::post().to(create_link))
        // must be before /{id}
        .route("/code/{code}", web::get().to(get_link_by_code))
        .route("/{id}", web::get().to(get_link))
        .route("/{id}", web::put().to(update_link))
        .route("/{id}", web::delete().to(delete_link))
}

/// `/api` 作用域
pub fn api_routes() -> actix_web::Scope {
    web::scope("/api").service(links_routes())
}
