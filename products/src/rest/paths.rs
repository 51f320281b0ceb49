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
//! Extraction of the product addressed by a request path.

use crate::model::ProductId;
use async_trait::async_trait;
use axum::extract::{FromRequestParts, MatchedPath, Path};
use axum::http::request::Parts;
use catalog_core::rest::RestError;

/// Returns the final segment of the route template `route` if it is a literal.
fn literal_tail(route: &str) -> Option<&str> {
    let (_, tail) = route.rsplit_once('/')?;
    if tail.is_empty() || tail.starts_with(':') { None } else { Some(tail) }
}

/// Extractor for the identifier of the product that a request addresses.
///
/// On the `:id` route the identifier comes from the path parameter.  The literal `search` and
/// `stats` routes only take over `GET`, so the other methods on those routes address the product
/// whose identifier is the literal segment itself.
pub(crate) struct ProductPath(pub(crate) ProductId);

#[async_trait]
impl<S> FromRequestParts<S> for ProductPath
where
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let literal = parts
            .extensions
            .get::<MatchedPath>()
            .and_then(|matched| literal_tail(matched.as_str()))
            .map(str::to_owned);
        if let Some(id) = literal {
            return Ok(ProductPath(ProductId::new(id)));
        }

        let Path(id) = Path::<ProductId>::from_request_parts(parts, state).await?;
        Ok(ProductPath(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_tail() {
        assert_eq!(Some("stats"), literal_tail("/api/products/stats"));
        assert_eq!(Some("search"), literal_tail("/api/products/search"));
        assert_eq!(None, literal_tail("/api/products/:id"));
        assert_eq!(None, literal_tail("/api/products/"));
        assert_eq!(None, literal_tail("stats"));
    }
}
