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

//! API to update an existing product.

use crate::driver::Driver;
use crate::rest::auth::RequireApiKey;
use crate::rest::paths::ProductPath;
use crate::rest::validation::ValidatedProduct;
use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use catalog_core::rest::RestError;

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    _: RequireApiKey,
    ProductPath(id): ProductPath,
    ValidatedProduct(fields): ValidatedProduct,
) -> Result<impl IntoResponse, RestError> {
    let product = driver.update_product(&id, fields).await?;
    Ok(Json(product))
}

#[cfg(test)]
mod tests {
    use crate::model::*;
    use crate::rest::auth::API_KEY_HEADER;
    use crate::rest::testutils::*;
    use axum::http;
    use catalog_core::rest::testutils::*;
    use serde_json::json;

    fn route(id: &str) -> (http::Method, String) {
        (http::Method::PUT, format!("/api/products/{}", id))
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup();
        context
            .put_product(Product::for_test("1", "Apple", "fruit", 1).with_extra("color", "red"))
            .await;
        context.put_product(Product::for_test("2", "Carrot", "veg", 2)).await;

        let response = OneShotBuilder::new(context.app(), route("1"))
            .with_header(API_KEY_HEADER, TEST_API_KEY)
            .send_json(json!({"id": "2", "name": "Apple", "category": "fruit", "price": 4, "stock": 7}))
            .await
            .expect_json::<Product>()
            .await;

        let exp_product = Product::for_test("1", "Apple", "fruit", 4)
            .with_extra("color", "red")
            .with_extra("stock", 7);
        assert_eq!(exp_product, response);
        assert_eq!(
            vec![exp_product, Product::for_test("2", "Carrot", "veg", 2)],
            context.get_products().await
        );
    }

    #[tokio::test]
    async fn test_missing() {
        let context = TestContext::setup();
        context.put_fruit_and_veg().await;

        OneShotBuilder::new(context.app(), route("3"))
            .with_header(API_KEY_HEADER, TEST_API_KEY)
            .send_json(json!({"name": "Leek", "category": "veg", "price": 3}))
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("^Product not found$")
            .await;

        assert_eq!(2, context.get_products().await.len());
    }

    #[tokio::test]
    async fn test_missing_api_key() {
        let context = TestContext::setup();
        context.put_fruit_and_veg().await;

        OneShotBuilder::new(context.app(), route("1"))
            .send_json(json!({"name": "Pear", "category": "fruit", "price": 3}))
            .await
            .expect_status(http::StatusCode::UNAUTHORIZED)
            .expect_error("^Unauthorized: Invalid API Key$")
            .await;

        assert_eq!(Some(Product::for_test("1", "Apple", "fruit", 1)), context.get_product("1").await);
    }

    #[tokio::test]
    async fn test_validation_runs_before_lookup() {
        let context = TestContext::setup();

        let response = OneShotBuilder::new(context.app(), route("unknown"))
            .with_header(API_KEY_HEADER, TEST_API_KEY)
            .send_json(json!({"name": "Pear"}))
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("^Validation failed$")
            .await;

        let fields = response
            .errors
            .unwrap()
            .into_iter()
            .map(|e| e.field)
            .collect::<Vec<String>>();
        assert_eq!(vec!["category", "price"], fields);
    }

    #[tokio::test]
    async fn test_id_not_utf8() {
        let context = TestContext::setup();
        context.put_fruit_and_veg().await;

        OneShotBuilder::new(context.app(), route("%FF"))
            .with_header(API_KEY_HEADER, TEST_API_KEY)
            .send_json(json!({"name": "Pear", "category": "fruit", "price": 4}))
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("Invalid UTF-8 in `id`")
            .await;
        assert_eq!(2, context.get_products().await.len());
    }

    test_payload_must_be_json!(
        TestContext::setup().into_app(),
        route("1"),
        (API_KEY_HEADER, TEST_API_KEY)
    );
}
