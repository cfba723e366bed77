use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, web};
use std::sync::Arc;
use tracing::{debug, error, trace, warn};

use crate::services::LinkService;
use crate::storage::Link;
use crate::utils::is_valid_short_code;

pub struct RedirectService {}

impl RedirectService {
    pub async fn handle_redirect(
        path: web::Path<String>,
        links: web::Data<Arc<LinkService>>,
    ) -> impl Responder {
        let captured_path = path.into_inner();
        let code = Self::extract_code(&captured_path);

        if code.is_empty() {
            Self::bad_request_response()
        } else if !is_valid_short_code(code) {
            // 非法短码，不查库
            trace!("Invalid short code rejected: {}", code);
            Self::not_found_response()
        } else {
            Self::process_redirect(code, &links).await
        }
    }

    /// 短码取路径最后一段；`abc/` 得到空串
    fn extract_code(captured_path: &str) -> &str {
        captured_path.rsplit('/').next().unwrap_or_default()
    }

    /// `/r` 与 `/r/`：缺少短码
    pub async fn handle_missing_code() -> impl Responder {
        Self::bad_request_response()
    }

    async fn process_redirect(code: &str, links: &LinkService) -> HttpResponse {
        match links.get_link_by_code(code).await {
            Ok(Some(link)) => {
                Self::record_visit(links, &link).await;
                Self::finish_redirect(&link)
            }
            Ok(None) => {
                debug!("Redirect link not found in database: {}", code);
                Self::not_found_response()
            }
            Err(e) => {
                error!("Database error during redirect lookup: {}", e);
                Self::error_response()
            }
        }
    }

    /// 计数失败（例如链接刚被删除）不影响跳转
    async fn record_visit(links: &LinkService, link: &Link) {
        if let Err(e) = links.record_visit(&link.id).await {
            warn!(
                "Failed to record visit for '{}' ({}): {}",
                link.short_code, link.id, e
            );
        }
    }

    #[inline]
    fn finish_redirect(link: &Link) -> HttpResponse {
        trace!("Redirecting {} -> {}", link.short_code, link.original_url);

        HttpResponse::build(StatusCode::FOUND)
            .insert_header(("Location", link.original_url.as_str()))
            .insert_header(("Cache-Control", "no-store"))
            .finish()
    }

    #[inline]
    fn bad_request_response() -> HttpResponse {
        HttpResponse::build(StatusCode::BAD_REQUEST)
            .insert_header(("Content-Type", "text/plain; charset=utf-8"))
            .body("Invalid short code")
    }

    #[inline]
    fn not_found_response() -> HttpResponse {
        HttpResponse::build(StatusCode::NOT_FOUND)
            .insert_header(("Content-Type", "text/plain; charset=utf-8"))
            .body("Link not found")
    }

    #[inline]
    fn error_response() -> HttpResponse {
        HttpResponse::build(StatusCode::INTERNAL_SERVER_ERROR)
            .insert_header(("Content-Type", "text/plain; charset=utf-8"))
            .body("Internal Server Error")
    }
}

pub fn redirect_routes() -> actix_web::Scope {
    web::scope("/r")
        .route("", web::get().to(RedirectService::handle_missing_code))
        .route("/{code:.*}", web::get().to(RedirectService::handle_redirect))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_code() {
        assert_eq!(RedirectService::extract_code("promo"), "promo");
        assert_eq!(RedirectService::extract_code(""), "");
        assert_eq!(RedirectService::extract_code("promo/"), "");
        assert_eq!(RedirectService::extract_code("a/promo"), "promo");
    }
}
