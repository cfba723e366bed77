pub mod url_validator;

use crate::errors::{Result, SnaplinkError};

/// 短码最大长度
pub const MAX_CODE_LENGTH: usize = 32;

/// 随机短码默认长度
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// 随机短码字符集
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

pub fn generate_random_code(length: usize) -> String {
    use std::iter;

    // thread_rng 为 ChaCha CSPRNG，由操作系统熵源播种
    iter::repeat_with(|| CODE_ALPHABET[rand::random_range(0..CODE_ALPHABET.len())] as char)
        .take(length)
        .collect()
}

#[inline]
fn is_code_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-'
}

/// 检查字符串能否作为短码存在（1..=32 个 `[A-Za-z0-9-]`）
pub fn is_valid_short_code(code: &str) -> bool {
    !code.is_empty() && code.len() <= MAX_CODE_LENGTH && code.chars().all(is_code_char)
}

/// 校验用户自定义短码
///
/// 长度先于字符集检查，两者都不通过时报 `CodeTooLong`。
pub fn validate_custom_code(code: &str) -> Result<()> {
    let length = code.chars().count();
    if length > MAX_CODE_LENGTH {
        return Err(SnaplinkError::code_too_long(length));
    }
    if code.is_empty() || !code.chars().all(is_code_char) {
        return Err(SnaplinkError::invalid_code_charset(code));
    }
    Ok(())
}
