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

//! Service configuration.

use crate::model::ApiKey;
use catalog_core::env::get_optional_var;
use derive_getters::Getters;

/// Prefix shared by the names of all environment variables read by the service.
const ENV_PREFIX: &str = "PRODUCTS";

/// Port to listen on when none is configured.
const DEFAULT_PORT: u16 = 3000;

/// Settings read once at startup and immutable for the lifetime of the process.
#[derive(Debug, Getters)]
pub struct Config {
    /// TCP port to listen on.
    port: u16,

    /// Secret required by the mutating APIs.
    #[getter(skip)]
    api_key: ApiKey,
}

impl Config {
    /// Loads the configuration from `PRODUCTS_PORT` and `PRODUCTS_API_KEY`, using defaults for the
    /// variables that are not set.
    pub fn from_env() -> Result<Self, String> {
        let port = get_optional_var::<u16>(ENV_PREFIX, "PORT")?.unwrap_or(DEFAULT_PORT);
        let api_key =
            get_optional_var::<String>(ENV_PREFIX, "API_KEY")?.map(ApiKey::new).unwrap_or_default();
        Ok(Self { port, api_key })
    }

    /// Returns the secret required by the mutating APIs.
    pub(crate) fn api_key(&self) -> &ApiKey {
        &self.api_key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env_defaults() {
        temp_env::with_vars_unset(["PRODUCTS_PORT", "PRODUCTS_API_KEY"], || {
            let config = Config::from_env().unwrap();
            assert_eq!(3000, *config.port());
            assert!(config.api_key().matches(b"mysecretkey"));
        });
    }

    #[test]
    fn test_from_env_overrides() {
        temp_env::with_vars(
            [("PRODUCTS_PORT", Some("8080")), ("PRODUCTS_API_KEY", Some("another-key"))],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(8080, *config.port());
                assert!(config.api_key().matches(b"another-key"));
                assert!(!config.api_key().matches(b"mysecretkey"));
            },
        );
    }

    #[test]
    fn test_from_env_bad_port() {
        temp_env::with_vars(
            [("PRODUCTS_PORT", Some("http")), ("PRODUCTS_API_KEY", None::<&str>)],
            || {
                let err = Config::from_env().unwrap_err();
                assert!(err.starts_with("Invalid type in environment variable PRODUCTS_PORT"));
            },
        );
    }
}
