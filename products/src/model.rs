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

//! High-level data types.

use catalog_core::model::{ModelError, ModelResult};
use derive_getters::Getters;
use derive_more::Constructor;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Number, Value};
use std::fmt;
use subtle::ConstantTimeEq;
use uuid::Uuid;

/// Names of the payload fields that have dedicated storage in a `Product`.  These never end up in
/// the product's extra fields.
pub(crate) const RESERVED_FIELDS: &[&str] = &["id", "name", "category", "price"];

/// Opaque identifier of a product, unique within the collection.
#[derive(Clone, Constructor, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub(crate) struct ProductId(String);

impl ProductId {
    /// Mints a new random identifier.
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns a string view of the identifier.
    pub(crate) fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Generates a newtype that wraps a string that must not be empty once trimmed.
macro_rules! nonempty_text [
    ( $name:ident, $field:literal, $doc:literal ) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Eq, PartialEq, Serialize)]
        #[cfg_attr(test, derive(Deserialize))]
        #[serde(transparent)]
        pub(crate) struct $name(String);

        impl $name {
            /// Creates a new value from an untrusted string `s`, making sure it is valid.
            pub(crate) fn new<S: Into<String>>(s: S) -> ModelResult<Self> {
                let s = s.into();
                if s.trim().is_empty() {
                    return Err(ModelError(concat!($field, " cannot be empty").to_owned()));
                }
                Ok(Self(s))
            }

            /// Returns a string view of the value.
            pub(crate) fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }
    }
];

nonempty_text!(ProductName, "name", "Human-readable name of a product.");
nonempty_text!(Category, "category", "Free-form category used to group products.");

/// Price of a product.  Kept as the JSON number that was received so that integers stay integers.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
#[serde(transparent)]
pub(crate) struct Price(Number);

impl From<Number> for Price {
    fn from(n: Number) -> Self {
        Self(n)
    }
}

/// Validated contents of a create or update request.
#[derive(Debug, Getters)]
pub(crate) struct ProductFields {
    /// Name of the product.
    name: ProductName,

    /// Category of the product.
    category: Category,

    /// Price of the product.
    price: Price,

    /// Caller-supplied fields with no dedicated storage, passed through untouched.
    extra: Map<String, Value>,
}

impl ProductFields {
    /// Creates a new set of fields.  Any reserved key in `extra`, including `id`, is discarded so
    /// that payloads can never choose or change a product's identifier.
    pub(crate) fn new(
        name: ProductName,
        category: Category,
        price: Price,
        extra: Map<String, Value>,
    ) -> Self {
        let extra =
            extra.into_iter().filter(|(k, _)| !RESERVED_FIELDS.contains(&k.as_str())).collect();
        Self { name, category, price, extra }
    }
}

/// A product record as held in the collection.
#[derive(Clone, Debug, Getters, PartialEq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
pub(crate) struct Product {
    /// Identifier assigned at creation time.
    id: ProductId,

    /// Name of the product.
    name: ProductName,

    /// Category of the product.
    category: Category,

    /// Price of the product.
    price: Price,

    /// Caller-supplied fields with no dedicated storage.
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl Product {
    /// Creates a new product with identifier `id` out of validated `fields`.
    pub(crate) fn new(id: ProductId, fields: ProductFields) -> Self {
        Self {
            id,
            name: fields.name,
            category: fields.category,
            price: fields.price,
            extra: fields.extra,
        }
    }

    /// Shallow-merges `fields` over this product.
    ///
    /// Every field in `fields` replaces the same-named field in the product and extra fields not
    /// mentioned in `fields` are kept.  The identifier is never part of the overwrite set.
    pub(crate) fn merge(self, fields: ProductFields) -> Self {
        let mut extra = self.extra;
        for (key, value) in fields.extra {
            extra.insert(key, value);
        }
        Self { id: self.id, name: fields.name, category: fields.category, price: fields.price, extra }
    }
}

/// Generates a newtype for a positive pagination parameter with a default value.
macro_rules! positive_param [
    ( $name:ident, $field:literal, $default:expr, $doc:literal ) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
        #[cfg_attr(test, derive(Deserialize))]
        #[serde(transparent)]
        pub(crate) struct $name(usize);

        impl $name {
            /// Creates a new value from an untrusted number, which must be at least 1.
            pub(crate) fn new(n: usize) -> ModelResult<Self> {
                if n == 0 {
                    return Err(ModelError(concat!($field, " must be a positive integer").to_owned()));
                }
                Ok(Self(n))
            }

            /// Returns the raw value.
            pub(crate) fn as_usize(self) -> usize {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self($default)
            }
        }
    }
];

positive_param!(Page, "page", 1, "One-based index of a page of results.");
positive_param!(Limit, "limit", 5, "Maximum number of results in a page.");

/// One page of a listing of products.
#[derive(Constructor, Debug, Serialize)]
#[cfg_attr(test, derive(Deserialize, PartialEq))]
pub(crate) struct ProductList {
    /// Number of products that matched the filter, regardless of pagination.
    total: usize,

    /// The page that was returned.
    page: Page,

    /// The maximum size of the page that was requested.
    limit: Limit,

    /// Products in this page, in collection order.
    data: Vec<Product>,
}

/// Number of products per category, in the order in which categories were first seen.
#[derive(Debug, Default)]
pub(crate) struct CategoryStats(Vec<(Category, usize)>);

impl CategoryStats {
    /// Records one more product in `category`.
    pub(crate) fn add(&mut self, category: &Category) {
        match self.0.iter_mut().find(|(c, _)| c == category) {
            Some((_, count)) => *count += 1,
            None => self.0.push((category.clone(), 1)),
        }
    }
}

impl Serialize for CategoryStats {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (category, count) in &self.0 {
            map.serialize_entry(category.as_str(), count)?;
        }
        map.end()
    }
}

/// Default value of the shared secret that gates mutating operations.
pub(crate) const DEFAULT_API_KEY: &str = "mysecretkey";

/// Shared secret that callers must present to mutate the collection.
#[derive(Clone, Constructor)]
pub struct ApiKey(String);

impl ApiKey {
    /// Checks whether `candidate` is exactly this key, without leaking timing information.
    pub(crate) fn matches(&self, candidate: &[u8]) -> bool {
        self.0.as_bytes().ct_eq(candidate).into()
    }
}

impl Default for ApiKey {
    fn default() -> Self {
        Self(DEFAULT_API_KEY.to_owned())
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(scrubbed)")
    }
}

#[cfg(test)]
impl Product {
    /// Builds a product out of hardcoded values, which must be valid.
    pub(crate) fn for_test(id: &str, name: &str, category: &str, price: i64) -> Self {
        Self {
            id: ProductId::new(id.to_owned()),
            name: ProductName::new(name).unwrap(),
            category: Category::new(category).unwrap(),
            price: Price::from(Number::from(price)),
            extra: Map::new(),
        }
    }

    /// Adds an extra field to a product built by `for_test`.
    pub(crate) fn with_extra<V: Into<Value>>(mut self, key: &str, value: V) -> Self {
        self.extra.insert(key.to_owned(), value.into());
        self
    }
}
