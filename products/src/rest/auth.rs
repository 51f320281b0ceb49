// III-IV
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Shared-secret authentication for the mutating APIs.

use crate::model::ApiKey;
use async_trait::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::HeaderMap;
use axum::http::request::Parts;
use catalog_core::rest::{RestError, RestResult, get_unique_header};

/// Name of the header that carries the caller's credential.
pub(crate) const API_KEY_HEADER: &str = "x-api-key";

/// Reason reported to callers that fail the credential check, whatever the cause.
const INVALID_API_KEY: &str = "Invalid API Key";

/// Validates that the `headers` carry exactly one `x-api-key` value equal to `expected`.
fn check_api_key(headers: &HeaderMap, expected: &ApiKey) -> RestResult<()> {
    let provided = match get_unique_header(headers, API_KEY_HEADER) {
        Ok(Some(value)) => value,
        Ok(None) => {
            log::warn!("Rejecting request without an API key");
            return Err(RestError::Unauthorized(INVALID_API_KEY.to_owned()));
        }
        Err(e) => {
            log::warn!("Rejecting request with a malformed API key: {}", e);
            return Err(RestError::Unauthorized(INVALID_API_KEY.to_owned()));
        }
    };

    if !expected.matches(provided.as_bytes()) {
        log::warn!("Rejecting request with a mismatched API key");
        return Err(RestError::Unauthorized(INVALID_API_KEY.to_owned()));
    }
    Ok(())
}

/// Extractor that only succeeds if the request carries the configured API key.
///
/// Handlers must list this before any extractor that consumes the request body so that callers
/// without the credential never get their payload inspected.
pub(crate) struct RequireApiKey;

#[async_trait]
impl<S> FromRequestParts<S> for RequireApiKey
where
    ApiKey: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        check_api_key(&parts.headers, &ApiKey::from_ref(state))?;
        Ok(RequireApiKey)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Runs `check_api_key` against the header `values` and returns the outcome.
    fn check(values: &[&str]) -> RestResult<()> {
        let mut headers = HeaderMap::new();
        for value in values {
            headers.append(API_KEY_HEADER, value.parse().unwrap());
        }
        check_api_key(&headers, &ApiKey::new("the-key".to_owned()))
    }

    #[test]
    fn test_check_api_key_ok() {
        check(&["the-key"]).unwrap();
    }

    #[test]
    fn test_check_api_key_errors() {
        let exp_error = RestError::Unauthorized("Invalid API Key".to_owned());
        assert_eq!(exp_error, check(&[]).unwrap_err());
        assert_eq!(exp_error, check(&[""]).unwrap_err());
        assert_eq!(exp_error, check(&["The-Key"]).unwrap_err());
        assert_eq!(exp_error, check(&["the-key "]).unwrap_err());
        assert_eq!(exp_error, check(&["the-key", "the-key"]).unwrap_err());
    }

    #[test]
    fn test_check_api_key_header_name_is_case_insensitive() {
        let mut headers = HeaderMap::new();
        headers.append("X-API-Key", "the-key".parse().unwrap());
        check_api_key(&headers, &ApiKey::new("the-key".to_owned())).unwrap();
    }
}
