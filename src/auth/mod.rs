//! Identity: verification of provider-issued tokens and the request-scoped
//! authenticated user handed to every handler.

pub mod jwt;
pub mod middleware;
pub mod policy;

use axum::http::HeaderMap;

/// Extract the bearer token from the `Authorization` header.
///
/// Returns `Ok(None)` when the header is absent and `Err(())` when it is present
/// but not a well-formed `Bearer <token>` value.
pub fn bearer_token(headers: &HeaderMap) -> Result<Option<&str>, ()> {
    let Some(value) = headers.get("authorization") else {
        return Ok(None);
    };
    let value = value.to_str().map_err(|_| ())?;
    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(Some)
        .ok_or(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_token() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), Ok(None));

        headers.insert("authorization", HeaderValue::from_static("Bearer abc.def"));
        assert_eq!(bearer_token(&headers), Ok(Some("abc.def")));

        headers.insert("authorization", HeaderValue::from_static("Basic abc"));
        assert_eq!(bearer_token(&headers), Err(()));

        headers.insert("authorization", HeaderValue::from_static("Bearer "));
        assert_eq!(bearer_token(&headers), Err(()));
    }
}
