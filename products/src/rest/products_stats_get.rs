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

//! API to count the products in each category.

use crate::driver::Driver;
use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use catalog_core::rest::{EmptyBody, RestError};

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    _: EmptyBody,
) -> Result<impl IntoResponse, RestError> {
    let stats = driver.get_category_stats().await?;
    Ok(Json(stats))
}

#[cfg(test)]
mod tests {
    use crate::model::*;
    use crate::rest::testutils::*;
    use axum::http;
    use catalog_core::rest::testutils::*;
    use serde_json::{Map, Value};

    fn route() -> (http::Method, String) {
        (http::Method::GET, "/api/products/stats".to_owned())
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup();
        context.put_product(Product::for_test("1", "Carrot", "veg", 1)).await;
        context.put_product(Product::for_test("2", "Apple", "fruit", 2)).await;
        context.put_product(Product::for_test("3", "Leek", "veg", 3)).await;
        context.put_product(Product::for_test("4", "Hammer", "tools", 4)).await;

        let response = OneShotBuilder::new(context.into_app(), route())
            .send_empty()
            .await
            .expect_json::<Map<String, Value>>()
            .await;
        let entries = response
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_u64().unwrap()))
            .collect::<Vec<(&str, u64)>>();
        assert_eq!(vec![("veg", 2), ("fruit", 1), ("tools", 1)], entries);
    }

    #[tokio::test]
    async fn test_empty() {
        let context = TestContext::setup();

        let response = OneShotBuilder::new(context.into_app(), route())
            .send_empty()
            .await
            .expect_json::<Map<String, Value>>()
            .await;
        assert!(response.is_empty());
    }

    #[tokio::test]
    async fn test_not_confused_with_product_id() {
        let context = TestContext::setup();
        context.put_product(Product::for_test("stats", "Abacus", "tools", 9)).await;

        let response = OneShotBuilder::new(context.into_app(), route())
            .send_empty()
            .await
            .expect_json::<Map<String, Value>>()
            .await;
        assert_eq!(Some(&Value::from(1)), response.get("tools"));
        assert!(response.get("id").is_none());
    }

    test_payload_must_be_empty!(TestContext::setup().into_app(), route());
}
