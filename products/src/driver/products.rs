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

//! Operations on the whole product collection.

use crate::driver::Driver;
use crate::model::*;
use catalog_core::driver::{DriverError, DriverResult};

/// Message reported when a search is attempted without a term.
pub(crate) const SEARCH_QUERY_MISSING: &str = "Search query missing";

impl Driver {
    /// Gets one page of the products, optionally restricted to those in `category`.
    ///
    /// The page starts at `(page - 1) * limit` within the filtered sequence.  A page beyond the
    /// end of the sequence is empty, not an error.
    pub(crate) async fn list_products(
        self,
        category: Option<&str>,
        page: Page,
        limit: Limit,
    ) -> DriverResult<ProductList> {
        let tx = self.db.begin().await;
        let filtered = tx
            .get_products()
            .iter()
            .filter(|p| category.is_none_or(|c| p.category().as_str() == c))
            .collect::<Vec<&Product>>();

        let start = (page.as_usize() - 1).saturating_mul(limit.as_usize());
        let data = filtered.iter().skip(start).take(limit.as_usize()).map(|p| (*p).clone()).collect();
        Ok(ProductList::new(filtered.len(), page, limit, data))
    }

    /// Gets all products whose name contains `term`, ignoring case.
    pub(crate) async fn search_products(self, term: &str) -> DriverResult<Vec<Product>> {
        if term.is_empty() {
            return Err(DriverError::InvalidInput(SEARCH_QUERY_MISSING.to_owned()));
        }
        let term = term.to_lowercase();

        let tx = self.db.begin().await;
        Ok(tx
            .get_products()
            .iter()
            .filter(|p| p.name().as_str().to_lowercase().contains(&term))
            .cloned()
            .collect())
    }

    /// Counts the products in each category.
    pub(crate) async fn get_category_stats(self) -> DriverResult<CategoryStats> {
        let tx = self.db.begin().await;
        let mut stats = CategoryStats::default();
        for product in tx.get_products() {
            stats.add(product.category());
        }
        Ok(stats)
    }
}
