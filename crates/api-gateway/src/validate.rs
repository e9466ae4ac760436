//! Client-side validation, applied before any network call.

use crate::{ApiError, ApiResult};

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Shape check for e-mail addresses: non-empty local part and domain with a
/// dot, no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let Some(domain) = parts.next() else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    let mut domain_parts = domain.rsplitn(2, '.');
    let tld = domain_parts.next().unwrap_or("");
    let rest = domain_parts.next().unwrap_or("");
    !tld.is_empty() && !rest.is_empty()
}

/// Fail with a validation error when the e-mail is malformed.
pub fn validate_email(email: &str) -> ApiResult<()> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(ApiError::validation("Email inválido"))
    }
}

/// Fail with a validation error when the password is too short.
pub fn validate_password(senha: &str) -> ApiResult<()> {
    if senha.chars().count() >= MIN_PASSWORD_LEN {
        Ok(())
    } else {
        Err(ApiError::validation(format!(
            "Senha deve ter no mínimo {} caracteres",
            MIN_PASSWORD_LEN
        )))
    }
}
