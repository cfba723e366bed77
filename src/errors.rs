use std::fmt;

use actix_web::http::StatusCode;

use crate::utils::MAX_CODE_LENGTH;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnaplinkError {
    InvalidUrl(String),
    CodeTooLong { length: usize, max: usize },
    InvalidCodeCharset(String),
    CodeTaken(String),
    CodeGenerationExhausted { attempts: u32 },
    NotFound(String),
    Forbidden(String),
    BadRequest(String),
    Unauthorized(String),
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
}

impl SnaplinkError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            SnaplinkError::InvalidUrl(_) => "E001",
            SnaplinkError::CodeTooLong { .. } => "E002",
            SnaplinkError::InvalidCodeCharset(_) => "E003",
            SnaplinkError::CodeTaken(_) => "E004",
            SnaplinkError::CodeGenerationExhausted { .. } => "E005",
            SnaplinkError::NotFound(_) => "E006",
            SnaplinkError::Forbidden(_) => "E007",
            SnaplinkError::BadRequest(_) => "E008",
            SnaplinkError::Unauthorized(_) => "E009",
            SnaplinkError::DatabaseConfig(_) => "E010",
            SnaplinkError::DatabaseConnection(_) => "E011",
            SnaplinkError::DatabaseOperation(_) => "E012",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            SnaplinkError::InvalidUrl(_) => "Invalid URL",
            SnaplinkError::CodeTooLong { .. } => "Short Code Too Long",
            SnaplinkError::InvalidCodeCharset(_) => "Invalid Short Code",
            SnaplinkError::CodeTaken(_) => "Short Code Taken",
            SnaplinkError::CodeGenerationExhausted { .. } => "Code Generation Exhausted",
            SnaplinkError::NotFound(_) => "Resource Not Found",
            SnaplinkError::Forbidden(_) => "Forbidden",
            SnaplinkError::BadRequest(_) => "Bad Request",
            SnaplinkError::Unauthorized(_) => "Unauthorized",
            SnaplinkError::DatabaseConfig(_) => "Database Configuration Error",
            SnaplinkError::DatabaseConnection(_) => "Database Connection Error",
            SnaplinkError::DatabaseOperation(_) => "Database Operation Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> String {
        match self {
            SnaplinkError::InvalidUrl(reason) => format!("Invalid URL: {}", reason),
            SnaplinkError::CodeTooLong { length, max } => format!(
                "Custom code is {} characters long, the limit is {}",
                length, max
            ),
            SnaplinkError::InvalidCodeCharset(code) => format!(
                "Custom code '{}' may only contain letters, numbers and hyphens",
                code
            ),
            SnaplinkError::CodeTaken(code) => format!("Short code '{}' is already taken", code),
            SnaplinkError::CodeGenerationExhausted { attempts } => format!(
                "Failed to generate a unique short code after {} attempts",
                attempts
            ),
            SnaplinkError::NotFound(msg)
            | SnaplinkError::Forbidden(msg)
            | SnaplinkError::BadRequest(msg)
            | SnaplinkError::Unauthorized(msg)
            | SnaplinkError::DatabaseConfig(msg)
            | SnaplinkError::DatabaseConnection(msg)
            | SnaplinkError::DatabaseOperation(msg) => msg.clone(),
        }
    }

    /// HTTP 状态码映射
    pub fn http_status(&self) -> StatusCode {
        match self {
            SnaplinkError::InvalidUrl(_)
            | SnaplinkError::CodeTooLong { .. }
            | SnaplinkError::InvalidCodeCharset(_)
            | SnaplinkError::BadRequest(_) => StatusCode::BAD_REQUEST,
            SnaplinkError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            SnaplinkError::Forbidden(_) => StatusCode::FORBIDDEN,
            SnaplinkError::NotFound(_) => StatusCode::NOT_FOUND,
            SnaplinkError::CodeTaken(_) => StatusCode::CONFLICT,
            SnaplinkError::CodeGenerationExhausted { .. } => StatusCode::SERVICE_UNAVAILABLE,
            SnaplinkError::DatabaseConfig(_)
            | SnaplinkError::DatabaseConnection(_)
            | SnaplinkError::DatabaseOperation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for SnaplinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for SnaplinkError {}

// 便捷的构造函数
impl SnaplinkError {
    pub fn invalid_url<T: Into<String>>(reason: T) -> Self {
        SnaplinkError::InvalidUrl(reason.into())
    }

    pub fn code_too_long(length: usize) -> Self {
        SnaplinkError::CodeTooLong {
            length,
            max: MAX_CODE_LENGTH,
        }
    }

    pub fn invalid_code_charset<T: Into<String>>(code: T) -> Self {
        SnaplinkError::InvalidCodeCharset(code.into())
    }

    pub fn code_taken<T: Into<String>>(code: T) -> Self {
        SnaplinkError::CodeTaken(code.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::NotFound(msg.into())
    }

    pub fn forbidden<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::Forbidden(msg.into())
    }

    pub fn bad_request<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::BadRequest(msg.into())
    }

    pub fn unauthorized<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::Unauthorized(msg.into())
    }

    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::DatabaseOperation(msg.into())
    }
}

impl From<sea_orm::DbErr> for SnaplinkError {
    fn from(err: sea_orm::DbErr) -> Self {
        SnaplinkError::DatabaseOperation(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SnaplinkError>;
