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

//! API to list the products, with optional filtering and pagination.

use crate::driver::Driver;
use crate::model::{Limit, Page};
use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use catalog_core::rest::{EmptyBody, RestError};
use serde::Deserialize;

/// Query parameters accepted by this API.
#[derive(Deserialize)]
pub(crate) struct ListQuery {
    /// Only return products in this exact category.  Empty means no filtering.
    category: Option<String>,

    /// One-based page to return.
    page: Option<usize>,

    /// Maximum number of products per page.
    limit: Option<usize>,
}

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    query: Result<Query<ListQuery>, QueryRejection>,
    _: EmptyBody,
) -> Result<impl IntoResponse, RestError> {
    let Query(query) = query?;
    let page = query.page.map(Page::new).transpose()?.unwrap_or_default();
    let limit = query.limit.map(Limit::new).transpose()?.unwrap_or_default();
    let category = query.category.as_deref().filter(|c| !c.is_empty());

    let list = driver.list_products(category, page, limit).await?;
    Ok(Json(list))
}
