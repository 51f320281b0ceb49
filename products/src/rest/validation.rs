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

//! Validation of the payloads of the create and update APIs.

use crate::model::{Category, Price, ProductFields, ProductName};
use async_trait::async_trait;
use axum::Json;
use axum::extract::{FromRequest, Request};
use catalog_core::model::ModelResult;
use catalog_core::rest::{FieldError, RestError, RestResult};
use serde_json::{Map, Value};

/// Extracts a required text field named `field` from `payload` and builds it with `new`.
///
/// Failures are recorded in `errors` so that all broken fields can be reported at once.
fn text_field<T>(
    payload: &Map<String, Value>,
    field: &'static str,
    new: fn(String) -> ModelResult<T>,
    errors: &mut Vec<FieldError>,
) -> Option<T> {
    match payload.get(field) {
        None | Some(Value::Null) => {
            errors.push(FieldError::new(field, format!("{} is required", field)));
            None
        }
        Some(Value::String(s)) => match new(s.clone()) {
            Ok(value) => Some(value),
            Err(e) => {
                errors.push(FieldError::new(field, e.to_string()));
                None
            }
        },
        Some(_) => {
            errors.push(FieldError::new(field, format!("{} must be a string", field)));
            None
        }
    }
}

/// Extracts the required numeric `price` field from `payload`.
fn price_field(payload: &Map<String, Value>, errors: &mut Vec<FieldError>) -> Option<Price> {
    match payload.get("price") {
        None | Some(Value::Null) => {
            errors.push(FieldError::new("price", "price is required"));
            None
        }
        Some(Value::Number(n)) => Some(Price::from(n.clone())),
        Some(_) => {
            errors.push(FieldError::new("price", "price must be a number"));
            None
        }
    }
}

/// Checks that `payload` has a usable `name`, `category` and `price`.
///
/// Every failing field is reported, not just the first one.  A payload that is not a JSON object
/// has none of the required fields.
pub(crate) fn validate_product(payload: Value) -> RestResult<ProductFields> {
    let payload = match payload {
        Value::Object(map) => map,
        _ => Map::new(),
    };

    let mut errors = vec![];
    let name = text_field(&payload, "name", ProductName::new, &mut errors);
    let category = text_field(&payload, "category", Category::new, &mut errors);
    let price = price_field(&payload, &mut errors);

    match (name, category, price) {
        (Some(name), Some(category), Some(price)) => {
            Ok(ProductFields::new(name, category, price, payload))
        }
        _ => Err(RestError::ValidationFailed(errors)),
    }
}

/// Extractor for a JSON product payload that has passed `validate_product`.
pub(crate) struct ValidatedProduct(pub(crate) ProductFields);

#[async_trait]
impl<S> FromRequest<S> for ValidatedProduct
where
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<Value>::from_request(req, state).await?;
        Ok(ValidatedProduct(validate_product(payload)?))
    }
}
