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

//! API to create a new product.

use crate::driver::Driver;
use crate::rest::auth::RequireApiKey;
use crate::rest::validation::ValidatedProduct;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::{Json, http};
use catalog_core::rest::RestError;

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    _: RequireApiKey,
    ValidatedProduct(fields): ValidatedProduct,
) -> Result<(http::StatusCode, impl IntoResponse), RestError> {
    let product = driver.create_product(fields).await?;
    Ok((http::StatusCode::CREATED, Json(product)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::*;
    use crate::rest::auth::API_KEY_HEADER;
    use crate::rest::testutils::*;
    use catalog_core::rest::FieldError;
    use catalog_core::rest::testutils::*;
    use serde_json::json;

    fn route() -> (http::Method, String) {
        (http::Method::POST, "/api/products".to_owned())
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup();
        context.put_fruit_and_veg().await;

        let response = OneShotBuilder::new(context.app(), route())
            .with_header(API_KEY_HEADER, TEST_API_KEY)
            .send_json(json!({"name": "Leek", "category": "veg", "price": 3, "organic": true}))
            .await
            .expect_status(http::StatusCode::CREATED)
            .expect_json::<Product>()
            .await;

        assert_eq!("Leek", response.name().as_str());
        assert_eq!("veg", response.category().as_str());
        assert_eq!(Some(&json!(true)), response.extra().get("organic"));
        assert!(!response.id().as_str().is_empty());

        let products = context.get_products().await;
        assert_eq!(3, products.len());
        assert_eq!(&response, &products[2]);
    }

    #[tokio::test]
    async fn test_id_is_always_minted() {
        let context = TestContext::setup();
        context.put_fruit_and_veg().await;

        let response = OneShotBuilder::new(context.app(), route())
            .with_header(API_KEY_HEADER, TEST_API_KEY)
            .send_json(json!({"id": "1", "name": "Leek", "category": "veg", "price": 3}))
            .await
            .expect_status(http::StatusCode::CREATED)
            .expect_json::<Product>()
            .await;

        assert_ne!("1", response.id().as_str());
        assert_eq!(Some(Product::for_test("1", "Apple", "fruit", 1)), context.get_product("1").await);
        assert_eq!(Some(response.clone()), context.get_product(response.id().as_str()).await);
    }

    #[tokio::test]
    async fn test_missing_api_key() {
        let context = TestContext::setup();

        OneShotBuilder::new(context.app(), route())
            .send_json(json!({"name": "Leek", "category": "veg", "price": 3}))
            .await
            .expect_status(http::StatusCode::UNAUTHORIZED)
            .expect_error("^Unauthorized: Invalid API Key$")
            .await;

        assert!(context.get_products().await.is_empty());
    }

    #[tokio::test]
    async fn test_wrong_api_key() {
        let context = TestContext::setup();

        OneShotBuilder::new(context.app(), route())
            .with_header(API_KEY_HEADER, "mysecretkey")
            .send_json(json!({"name": "Leek", "category": "veg", "price": 3}))
            .await
            .expect_status(http::StatusCode::UNAUTHORIZED)
            .expect_error("^Unauthorized: Invalid API Key$")
            .await;

        assert!(context.get_products().await.is_empty());
    }

    #[tokio::test]
    async fn test_default_api_key() {
        let context = TestContext::setup_with_api_key(ApiKey::default());

        OneShotBuilder::new(context.app(), route())
            .with_header(API_KEY_HEADER, "mysecretkey")
            .send_json(json!({"name": "Leek", "category": "veg", "price": 3}))
            .await
            .expect_status(http::StatusCode::CREATED)
            .expect_json::<Product>()
            .await;

        assert_eq!(1, context.get_products().await.len());
    }

    #[tokio::test]
    async fn test_auth_runs_before_validation() {
        let context = TestContext::setup();

        OneShotBuilder::new(context.app(), route())
            .send_json(json!({}))
            .await
            .expect_status(http::StatusCode::UNAUTHORIZED)
            .expect_error("Invalid API Key")
            .await;
    }

    #[tokio::test]
    async fn test_validation_failed() {
        let context = TestContext::setup();

        let response = OneShotBuilder::new(context.app(), route())
            .with_header(API_KEY_HEADER, TEST_API_KEY)
            .send_json(json!({"name": "", "price": "cheap"}))
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("^Validation failed$")
            .await;

        assert_eq!(
            Some(vec![
                FieldError::new("name", "name cannot be empty"),
                FieldError::new("category", "category is required"),
                FieldError::new("price", "price must be a number"),
            ]),
            response.errors
        );
        assert!(context.get_products().await.is_empty());
    }

    test_payload_must_be_json!(
        TestContext::setup().into_app(),
        route(),
        (API_KEY_HEADER, TEST_API_KEY)
    );
}
