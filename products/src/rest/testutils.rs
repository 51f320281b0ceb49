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

//! Test utilities for the REST API.

use crate::db::ProductsDb;
use crate::driver::Driver;
use crate::model::*;
use crate::rest::app;
use axum::Router;

/// API key configured in the apps created by `TestContext`.
pub(crate) const TEST_API_KEY: &str = "test-api-key";

pub(crate) struct TestContext {
    db: ProductsDb,
    app: Router,
}

impl TestContext {
    pub(crate) fn setup() -> Self {
        Self::setup_with_api_key(ApiKey::new(TEST_API_KEY.to_owned()))
    }

    pub(crate) fn setup_with_api_key(api_key: ApiKey) -> Self {
        let db = ProductsDb::default();
        let driver = Driver::new(db.clone());
        let app = app(driver, api_key);
        Self { db, app }
    }

    pub(crate) fn app(&self) -> Router {
        self.app.clone()
    }

    pub(crate) fn into_app(self) -> Router {
        self.app
    }

    pub(crate) async fn put_product(&self, product: Product) {
        self.db.begin().await.put_product(product).unwrap();
    }

    pub(crate) async fn get_product(&self, id: &str) -> Option<Product> {
        self.db.begin().await.get_product(&ProductId::new(id.to_owned())).ok().cloned()
    }

    pub(crate) async fn get_products(&self) -> Vec<Product> {
        self.db.begin().await.get_products().to_vec()
    }

    /// Seeds the store with the two products used by most tests.
    pub(crate) async fn put_fruit_and_veg(&self) {
        self.put_product(Product::for_test("1", "Apple", "fruit", 1)).await;
        self.put_product(Product::for_test("2", "Carrot", "veg", 2)).await;
    }
}
