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

//! Business logic for the service.

use crate::db::ProductsDb;
use catalog_core::db::DbError;
use catalog_core::driver::DriverError;

mod product;
mod products;
#[cfg(test)]
mod testutils;

/// Message reported when an operation targets a product that does not exist.
pub(crate) const PRODUCT_NOT_FOUND: &str = "Product not found";

/// Converts a store error into a driver error, naming the product as the missing entity.
fn product_error(e: DbError) -> DriverError {
    match e {
        DbError::NotFound => DriverError::NotFound(PRODUCT_NOT_FOUND.to_owned()),
        e => e.into(),
    }
}

/// Business logic.
///
/// The public operations exposed by the driver are all "one shot": they begin a transaction on
/// the store, run to completion and release it, so it's incorrect for the caller to use two
/// separate calls to implement a single operation.  For this reason, these operations consume the
/// driver in an attempt to minimize the possibility of executing two operations.
#[derive(Clone)]
pub(crate) struct Driver {
    /// The store that holds the product collection.
    db: ProductsDb,
}

impl Driver {
    /// Creates a new driver backed by the given injected components.
    pub(crate) fn new(db: ProductsDb) -> Self {
        Self { db }
    }
}
