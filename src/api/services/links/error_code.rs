//! 统一 API 错误码定义

use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::errors::SnaplinkError;

/// API 错误码枚举
///
/// 使用 serde_repr 序列化为数字。按千位分域：
/// - 0: 成功
/// - 1000-1099: 通用错误
/// - 3000-3099: 链接错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(i32)]
pub enum ErrorCode {
    // 成功
    Success = 0,

    // 通用错误 1000-1099
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    InternalServerError = 1005,
    ServiceUnavailable = 1030,

    // 链接错误 3000-3099
    LinkNotFound = 3000,
    LinkCodeTaken = 3001,
    LinkInvalidUrl = 3002,
    LinkCodeTooLong = 3003,
    LinkInvalidCode = 3004,
    LinkDatabaseError = 3005,
    LinkCodeExhausted = 3006,
}

impl From<&SnaplinkError> for ErrorCode {
    fn from(err: &SnaplinkError) -> Self {
        match err {
            SnaplinkError::InvalidUrl(_) => ErrorCode::LinkInvalidUrl,
            SnaplinkError::CodeTooLong { .. } => ErrorCode::LinkCodeTooLong,
            SnaplinkError::InvalidCodeCharset(_) => ErrorCode::LinkInvalidCode,
            SnaplinkError::CodeTaken(_) => ErrorCode::LinkCodeTaken,
            SnaplinkError::CodeGenerationExhausted { .. } => ErrorCode::LinkCodeExhausted,
            SnaplinkError::NotFound(_) => ErrorCode::LinkNotFound,
            SnaplinkError::Forbidden(_) => ErrorCode::Forbidden,
            SnaplinkError::BadRequest(_) => ErrorCode::BadRequest,
            SnaplinkError::Unauthorized(_) => ErrorCode::Unauthorized,
            SnaplinkError::DatabaseOperation(_) | SnaplinkError::DatabaseConnection(_) => {
                ErrorCode::LinkDatabaseError
            }
            SnaplinkError::DatabaseConfig(_) => ErrorCode::InternalServerError,
        }
    }
}
