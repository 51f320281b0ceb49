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

//! In-memory store for the product collection.
//!
//! The collection is a plain vector: insertion order is the iteration order, which is what
//! pagination is based on.  There are no secondary indexes so every lookup scans the whole
//! collection.

use crate::model::{Product, ProductId};
use catalog_core::db::{DbError, DbResult};
use futures::lock::{Mutex, MutexGuard};
use std::sync::Arc;


/// Handle to the process-wide product collection.
///
/// Cloning the handle yields another reference to the same collection.
#[derive(Clone, Default)]
pub(crate) struct ProductsDb {
    /// The products, in insertion order.
    products: Arc<Mutex<Vec<Product>>>,
}

impl ProductsDb {
    /// Begins a transaction.
    ///
    /// The transaction holds exclusive access to the collection until it is dropped, so callers
    /// must perform a whole operation through it and then release it.
    pub(crate) async fn begin(&self) -> ProductsTx<'_> {
        ProductsTx { products: self.products.lock().await }
    }
}

/// Exclusive access to the product collection with high-level operations on it.
pub(crate) struct ProductsTx<'a> {
    /// Guard over the locked collection.
    products: MutexGuard<'a, Vec<Product>>,
}

impl ProductsTx<'_> {
    /// Returns the position of the product identified by `id`.
    fn position(&self, id: &ProductId) -> DbResult<usize> {
        self.products.iter().position(|p| p.id() == id).ok_or(DbError::NotFound)
    }

    /// Gets all products in insertion order.
    pub(crate) fn get_products(&self) -> &[Product] {
        &self.products
    }

    /// Gets the product identified by `id`.
    pub(crate) fn get_product(&self, id: &ProductId) -> DbResult<&Product> {
        let index = self.position(id)?;
        Ok(&self.products[index])
    }

    /// Appends a new `product` to the collection.  Fails if its identifier is already in use.
    pub(crate) fn put_product(&mut self, product: Product) -> DbResult<()> {
        if self.position(product.id()).is_ok() {
            return Err(DbError::AlreadyExists);
        }
        log::debug!("Adding product {}", product.id().as_str());
        self.products.push(product);
        Ok(())
    }

    /// Replaces the product that has the same identifier as `product`, keeping its position.
    pub(crate) fn update_product(&mut self, product: Product) -> DbResult<()> {
        let index = self.position(product.id())?;
        log::debug!("Replacing product {}", product.id().as_str());
        self.products[index] = product;
        Ok(())
    }

    /// Removes the product identified by `id`.
    pub(crate) fn delete_product(&mut self, id: &ProductId) -> DbResult<()> {
        let index = self.position(id)?;
        log::debug!("Removing product {}", id.as_str());
        self.products.remove(index);
        Ok(())
    }
}
