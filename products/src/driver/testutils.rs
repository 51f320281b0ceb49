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

//! Test utilities for the business layer.

use crate::db::ProductsDb;
use crate::driver::Driver;
use crate::model::{Product, ProductId};

pub(crate) struct TestContext {
    db: ProductsDb,
    driver: Driver,
}

impl TestContext {
    pub(crate) fn setup() -> Self {
        let db = ProductsDb::default();
        let driver = Driver::new(db.clone());
        Self { db, driver }
    }

    pub(crate) fn driver(&self) -> Driver {
        self.driver.clone()
    }

    pub(crate) async fn put_product(&self, product: Product) {
        self.db.begin().await.put_product(product).unwrap();
    }

    pub(crate) async fn get_product(&self, id: &str) -> Option<Product> {
        self.db.begin().await.get_product(&ProductId::new(id.to_owned())).ok().cloned()
    }

    pub(crate) async fn count(&self) -> usize {
        self.db.begin().await.get_products().len()
    }
}
