//! Token retrieval from the auth endpoint.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};

use crate::error::{CostApiError, Result};

/// Body returned by the auth endpoint once the app's token is no longer valid.
pub const TOKEN_EXPIRED_SENTINEL: &str = "<ANONYMOUS>";

/// Opaque bearer credential returned by the auth endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    /// Validate a decoded auth response body.
    ///
    /// # Errors
    ///
    /// Returns [`CostApiError::TokenExpired`] if the body is the anonymous marker.
    pub fn from_body(body: String) -> Result<Self> {
        if body == TOKEN_EXPIRED_SENTINEL {
            return Err(CostApiError::TokenExpired);
        }
        Ok(Self(body))
    }

    /// Decode raw response bytes as UTF-8 and validate them.
    ///
    /// # Errors
    ///
    /// Returns [`CostApiError::InvalidToken`] for non-UTF-8 bodies and
    /// [`CostApiError::TokenExpired`] for the anonymous marker.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let body = String::from_utf8(bytes.to_vec())
            .map_err(|e| CostApiError::InvalidToken(format!("token is not valid UTF-8: {e}")))?;
        Self::from_body(body)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Token").field(&"<redacted>").finish()
    }
}

/// Build request headers carrying `Authorization: Bearer <token>`.
///
/// # Errors
///
/// Returns [`CostApiError::InvalidToken`] if the token cannot be sent as a header value.
pub fn bearer_headers(token: &Token) -> Result<HeaderMap> {
    let mut value = HeaderValue::from_str(&format!("Bearer {}", token.as_str()))
        .map_err(|e| CostApiError::InvalidToken(format!("token is not a valid header value: {e}")))?;
    value.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, value);
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_body_returns_token_verbatim() {
        let token = Token::from_body("eyJhbGciOi.abc.def\n".to_string()).unwrap();
        assert_eq!(token.as_str(), "eyJhbGciOi.abc.def\n");
    }

    #[test]
    fn test_from_body_rejects_sentinel() {
        let result = Token::from_body(TOKEN_EXPIRED_SENTINEL.to_string());
        assert!(matches!(result, Err(CostApiError::TokenExpired)));
    }

    #[test]
    fn test_sentinel_match_is_exact() {
        assert!(Token::from_body("<ANONYMOUS> ".to_string()).is_ok());
        assert!(Token::from_body("<anonymous>".to_string()).is_ok());
    }

    #[test]
    fn test_from_bytes_rejects_invalid_utf8() {
        let result = Token::from_bytes(&[0xff, 0xfe, 0x00]);
        assert!(matches!(result, Err(CostApiError::InvalidToken(_))));
    }

    #[test]
    fn test_debug_is_redacted() {
        let token = Token::from_body("secret-value".to_string()).unwrap();
        assert!(!format!("{token:?}").contains("secret-value"));
    }

    #[test]
    fn test_bearer_headers() {
        let token = Token::from_body("abc123".to_string()).unwrap();
        let headers = bearer_headers(&token).unwrap();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer abc123");
    }

    #[test]
    fn test_bearer_headers_rejects_control_characters() {
        let token = Token::from_body("abc\n123".to_string()).unwrap();
        assert!(matches!(
            bearer_headers(&token),
            Err(CostApiError::InvalidToken(_))
        ));
    }
}
