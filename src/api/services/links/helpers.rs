//! Links API 帮助函数

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError, web};
use serde::Serialize;

use crate::config::ServerConfig;
use crate::errors::SnaplinkError;

use super::error_code::ErrorCode;
use super::types::ApiResponse;

/// 构建 JSON 响应
pub fn json_response<T: Serialize>(
    status: StatusCode,
    code: ErrorCode,
    message: impl Into<String>,
    data: Option<T>,
) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(ApiResponse {
            code: code as i32,
            message: message.into(),
            data,
        })
}

/// 构建成功响应
pub fn success_response<T: Serialize>(data: T) -> HttpResponse {
    json_response(StatusCode::OK, ErrorCode::Success, "OK", Some(data))
}

/// 构建 201 响应
pub fn created_response<T: Serialize>(data: T) -> HttpResponse {
    json_response(StatusCode::CREATED, ErrorCode::Success, "Created", Some(data))
}

/// 构建错误响应
pub fn error_response(status: StatusCode, error_code: ErrorCode, message: &str) -> HttpResponse {
    json_response::<()>(status, error_code, message, None)
}

/// 从 SnaplinkError 构建错误响应（自动映射 HTTP 状态码和 ErrorCode）
pub fn error_from_snaplink(err: &SnaplinkError) -> HttpResponse {
    error_response(err.http_status(), ErrorCode::from(err), &err.message())
}

/// 统一 Result → HttpResponse 转换
pub fn api_result<T: Serialize>(result: Result<T, SnaplinkError>) -> HttpResponse {
    match result {
        Ok(data) => success_response(data),
        Err(e) => error_from_snaplink(&e),
    }
}

impl ResponseError for SnaplinkError {
    fn status_code(&self) -> StatusCode {
        self.http_status()
    }

    fn error_response(&self) -> HttpResponse {
        error_from_snaplink(self)
    }
}

/// JSON 请求体解析失败时也返回统一格式
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(64 * 1024)
        .error_handler(|err, _req| {
            let message = format!("Invalid JSON body: {}", err);
            actix_web::error::InternalError::from_response(
                err,
                error_response(StatusCode::BAD_REQUEST, ErrorCode::BadRequest, &message),
            )
            .into()
        })
}

/// 对外短链地址前缀
#[derive(Debug, Clone)]
pub struct ShortUrlBase(String);

impl ShortUrlBase {
    pub fn new(base: impl Into<String>) -> Self {
        Self(base.into().trim_end_matches('/').to_string())
    }

    pub fn from_config(server: &ServerConfig) -> Self {
        Self::new(server.public_base_url.clone())
    }

    /// `{base}/r/{code}`
    pub fn short_url(&self, short_code: &str) -> String {
        format!("{}/r/{}", self.0, short_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn test_short_url_trims_trailing_slash() {
        let base = ShortUrlBase::new("https://sl.example.com/");
        assert_eq!(base.short_url("abc123"), "https://sl.example.com/r/abc123");
    }

    #[actix_web::test]
    async fn test_error_envelope() {
        let resp = error_from_snaplink(&SnaplinkError::code_taken("promo"));
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let body = to_bytes(resp.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["code"], ErrorCode::LinkCodeTaken as i32);
        assert!(json["data"].is_null());
        assert!(json["message"].as_str().unwrap().contains("promo"));
    }
}
