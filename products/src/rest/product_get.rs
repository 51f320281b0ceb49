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

//! API to get one product.

use crate::driver::Driver;
use crate::rest::paths::ProductPath;
use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use catalog_core::rest::{EmptyBody, RestError};

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    ProductPath(id): ProductPath,
    _: EmptyBody,
) -> Result<impl IntoResponse, RestError> {
    let product = driver.get_product(&id).await?;
    Ok(Json(product))
}
