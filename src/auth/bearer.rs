// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! `Authorization: Bearer <token>` header parsing.

use axum::http::{header::AUTHORIZATION, HeaderMap};

use super::AuthError;

const BEARER_PREFIX: &str = "Bearer ";

/// Raw `Authorization` header value, if present and valid UTF-8.
///
/// A non-UTF-8 header is reported as present-but-malformed so the caller
/// still answers `InvalidAuthHeader` rather than `MissingAuthHeader`.
pub fn authorization_header(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .map(|value| value.to_str().unwrap_or(""))
}

/// Strip the `Bearer ` prefix from an `Authorization` header value.
pub fn parse_bearer(header: Option<&str>) -> Result<&str, AuthError> {
    let header = header.ok_or(AuthError::MissingAuthHeader)?;
    let token = header
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .ok_or(AuthError::InvalidAuthHeader)?;

    if token.is_empty() {
        return Err(AuthError::InvalidAuthHeader);
    }
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn strips_bearer_prefix() {
        assert_eq!(parse_bearer(Some("Bearer abc.def.ghi")), Ok("abc.def.ghi"));
        assert_eq!(parse_bearer(Some("Bearer  abc ")), Ok("abc"));
    }

    #[test]
    fn missing_header_is_distinct_from_malformed() {
        assert_eq!(parse_bearer(None), Err(AuthError::MissingAuthHeader));
        assert_eq!(parse_bearer(Some("")), Err(AuthError::InvalidAuthHeader));
        assert_eq!(parse_bearer(Some("Basic abc")), Err(AuthError::InvalidAuthHeader));
        assert_eq!(parse_bearer(Some("bearer abc")), Err(AuthError::InvalidAuthHeader));
        assert_eq!(parse_bearer(Some("Bearer ")), Err(AuthError::InvalidAuthHeader));
        assert_eq!(parse_bearer(Some("abc")), Err(AuthError::InvalidAuthHeader));
    }

    #[test]
    fn reads_authorization_header() {
        let mut headers = HeaderMap::new();
        assert_eq!(authorization_header(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer xyz"));
        assert_eq!(authorization_header(&headers), Some("Bearer xyz"));

        headers.insert(AUTHORIZATION, HeaderValue::from_bytes(b"Bearer \xff").unwrap());
        assert_eq!(authorization_header(&headers), Some(""));
    }
}
