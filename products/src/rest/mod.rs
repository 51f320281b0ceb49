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

//! Entry point to the REST server.
//!
//! Every request goes through the same chain: the access log, the panic catcher, and then the
//! route's handler.  Handlers for mutating routes declare `RequireApiKey` before the payload
//! extractors, so the credential check always runs before validation, which always runs before
//! the handler body touches the store.  Any failure along the chain is a `RestError` and is
//! rendered by its `IntoResponse` implementation.

use crate::driver::Driver;
use crate::model::ApiKey;
use axum::Router;
use axum::extract::FromRef;
use catalog_core::rest::panic_to_response;
use tower_http::catch_panic::CatchPanicLayer;

mod access_log;
mod auth;
mod paths;
mod product_delete;
mod product_get;
mod product_put;
mod products_get;
mod products_post;
mod products_search_get;
mod products_stats_get;
mod root_get;
#[cfg(test)]
mod testutils;
mod validation;

/// State shared by all handlers.
#[derive(Clone)]
pub(crate) struct AppState {
    /// Business logic for the product collection.
    driver: Driver,

    /// Secret that gates the mutating routes.
    api_key: ApiKey,
}

impl FromRef<AppState> for Driver {
    fn from_ref(state: &AppState) -> Self {
        state.driver.clone()
    }
}

impl FromRef<AppState> for ApiKey {
    fn from_ref(state: &AppState) -> Self {
        state.api_key.clone()
    }
}

/// Creates the router for the application.
///
/// The router always prefers literal segments over the `:id` wildcard, so `GET` on `search` and
/// `stats` never reaches the single-product lookup.  Updates and deletions on those two paths
/// still address the products with those identifiers.
pub(crate) fn app(driver: Driver, api_key: ApiKey) -> Router {
    use axum::middleware;
    use axum::routing::get;

    Router::new()
        .route("/", get(root_get::handler))
        .route("/api/products", get(products_get::handler).post(products_post::handler))
        .route(
            "/api/products/search",
            get(products_search_get::handler)
                .put(product_put::handler)
                .delete(product_delete::handler),
        )
        .route(
            "/api/products/stats",
            get(products_stats_get::handler)
                .put(product_put::handler)
                .delete(product_delete::handler),
        )
        .route(
            "/api/products/:id",
            get(product_get::handler).put(product_put::handler).delete(product_delete::handler),
        )
        .with_state(AppState { driver, api_key })
        .layer(CatchPanicLayer::custom(panic_to_response))
        .layer(middleware::from_fn(access_log::log_request))
}
