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

//! Generic types for the persistence layer.
//!
//! Services own their store and expose it to the driver layer through transactions: a service
//! type that, while alive, grants exclusive access to the stored data.  Every driver operation
//! should begin exactly one transaction, perform all of its reads and writes through it, and drop
//! it before returning.  This keeps concurrent requests from observing each other's half-applied
//! mutations.
//!
//! The operations on a transaction report failures with `DbError`.

/// Database errors.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum DbError {
    /// Indicates that a request to create an entry failed because it already exists.
    #[error("Already exists")]
    AlreadyExists,

    /// Indicates that a requested entry does not exist.
    #[error("Entity not found")]
    NotFound,
}

/// Result type for this module.
pub type DbResult<T> = Result<T, DbError>;
