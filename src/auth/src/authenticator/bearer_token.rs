// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Bearer token authentication.
//!
//! The application supplies a bearer token, which is sent as-is in every
//! request:
//!
//! ```text
//! Authorization: Bearer <bearer-token>
//! ```
//!
//! The token is never refreshed. Applications replace it with
//! [BearerTokenAuthenticator::set_bearer_token] when it expires.

use crate::authenticator::Result;
use crate::authenticator::dynamic::{AUTHTYPE_BEARER_TOKEN, Authenticate};
use crate::build_errors::{Error as BuildError, require_non_empty};
use crate::headers_util::set_bearer_header;
use http::HeaderMap;
use std::sync::{Arc, RwLock};

const BEARER_TOKEN_FIELD: &str = "bearerToken";

/// Adds a fixed bearer token to requests.
///
/// Clones share the token, so a clone kept by the application can replace the
/// token used by an [Authenticator][crate::authenticator::Authenticator]
/// created from another clone.
#[derive(Clone)]
pub struct BearerTokenAuthenticator {
    bearer_token: Arc<RwLock<String>>,
}

impl BearerTokenAuthenticator {
    /// Sets a new bearer token to be sent in subsequent requests.
    pub fn set_bearer_token<T: Into<String>>(&self, bearer_token: T) {
        let token = bearer_token.into();
        match self.bearer_token.write() {
            Ok(mut guard) => *guard = token,
            // The lock only guards a String, a poisoned value is still usable.
            Err(poisoned) => *poisoned.into_inner() = token,
        }
    }

    fn current(&self) -> String {
        match self.bearer_token.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl std::fmt::Debug for BearerTokenAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerTokenAuthenticator")
            .field("bearer_token", &"[censored]")
            .finish()
    }
}

#[async_trait::async_trait]
impl Authenticate for BearerTokenAuthenticator {
    async fn authenticate(&self, headers: &mut HeaderMap) -> Result<()> {
        set_bearer_header(headers, &self.current())
    }

    fn authentication_type(&self) -> &'static str {
        AUTHTYPE_BEARER_TOKEN
    }
}

/// A builder for [BearerTokenAuthenticator] instances.
///
/// # Example
/// ```
/// # use sdk_core_auth::authenticator::bearer_token::Builder;
/// let authenticator = Builder::new("my-bearer-token").build();
/// assert!(authenticator.is_ok());
/// ```
#[derive(Debug)]
pub struct Builder {
    bearer_token: Option<String>,
}

impl Builder {
    /// Creates a new builder with the given bearer token.
    pub fn new<T: Into<String>>(bearer_token: T) -> Self {
        Self {
            bearer_token: Some(bearer_token.into()),
        }
    }

    pub(crate) fn from_option(bearer_token: Option<String>) -> Self {
        Self { bearer_token }
    }

    /// Returns a [BearerTokenAuthenticator] with the configured token.
    ///
    /// # Errors
    ///
    /// Returns a [BuildError] if the bearer token is missing or empty.
    pub fn build(self) -> std::result::Result<BearerTokenAuthenticator, BuildError> {
        let token = require_non_empty(BEARER_TOKEN_FIELD, self.bearer_token)?;
        Ok(BearerTokenAuthenticator {
            bearer_token: Arc::new(RwLock::new(token)),
        })
    }
}
