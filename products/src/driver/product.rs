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

//! Operations on one product.

use crate::driver::{Driver, product_error};
use crate::model::*;
use catalog_core::driver::DriverResult;

impl Driver {
    /// Gets the product identified by `id`.
    pub(crate) async fn get_product(self, id: &ProductId) -> DriverResult<Product> {
        let tx = self.db.begin().await;
        let product = tx.get_product(id).map_err(product_error)?;
        Ok(product.clone())
    }

    /// Creates a new product out of `fields`, assigning it a fresh identifier.
    pub(crate) async fn create_product(self, fields: ProductFields) -> DriverResult<Product> {
        let product = Product::new(ProductId::generate(), fields);
        let mut tx = self.db.begin().await;
        tx.put_product(product.clone())?;
        Ok(product)
    }

    /// Shallow-merges `fields` over the product identified by `id` and returns the result.
    pub(crate) async fn update_product(
        self,
        id: &ProductId,
        fields: ProductFields,
    ) -> DriverResult<Product> {
        let mut tx = self.db.begin().await;
        let product = tx.get_product(id).map_err(product_error)?.clone().merge(fields);
        tx.update_product(product.clone()).map_err(product_error)?;
        Ok(product)
    }

    /// Deletes the product identified by `id`.
    pub(crate) async fn delete_product(self, id: &ProductId) -> DriverResult<()> {
        let mut tx = self.db.begin().await;
        tx.delete_product(id).map_err(product_error)?;
        Ok(())
    }
}
