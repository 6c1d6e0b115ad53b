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

//! IAM access token management.
//!
//! A [TokenManager] turns an API key into access tokens issued by the IAM
//! token service, caches the most recent token, and renews it once it
//! expires. Renewal prefers the (cheaper) refresh token exchange, and falls
//! back to a full token request when the refresh token is missing or stale.
//!
//! Applications that manage their own access tokens can configure a
//! user-managed token instead of an API key. Such a token is returned as-is,
//! the token manager never contacts the IAM service for it.
//!
//! # Example
//! ```
//! # use sdk_core_auth::token_manager::Builder;
//! # tokio_test::block_on(async {
//! let manager = Builder::default()
//!     .with_access_token("my-access-token")
//!     .build()?;
//! assert_eq!(manager.token().await?, "my-access-token");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! # });
//! ```

mod endpoint;

use crate::build_errors::{Error as BuildError, require_non_empty};
use crate::clock::{Clock, SystemClock};
use crate::constants::{DEFAULT_IAM_CLIENT_ID, DEFAULT_IAM_CLIENT_SECRET, DEFAULT_IAM_URL};
use crate::errors::TokenRequestError;
use crate::token::TokenRecord;
use endpoint::{IamTokenEndpoint, TokenEndpoint};
use std::sync::Arc;
use tokio::sync::Mutex;

type Result<T> = std::result::Result<T, TokenRequestError>;

const API_KEY_FIELD: &str = "iamApikey";
const ACCESS_TOKEN_FIELD: &str = "iamAccessToken";
const CLIENT_ID_FIELD: &str = "iamClientId";
const CLIENT_SECRET_FIELD: &str = "iamClientSecret";
const URL_FIELD: &str = "iamUrl";

/// Obtains, caches, and renews IAM access tokens for one set of credentials.
///
/// Cloning a `TokenManager` is cheap, all clones share the same cached token.
/// Concurrent calls to [token][TokenManager::token] are serialized, so at most
/// one request to the IAM service is in flight for a given manager.
#[derive(Clone, Debug)]
pub struct TokenManager {
    inner: Arc<TokenManagerImpl>,
}

#[derive(Debug)]
struct TokenManagerImpl {
    endpoint: Arc<dyn TokenEndpoint>,
    clock: Arc<dyn Clock>,
    // Guards the whole read-check-fetch-store sequence. Holding the lock
    // across the network call is what coalesces concurrent callers.
    state: Mutex<State>,
}

#[derive(Debug)]
struct State {
    credentials: Credentials,
    record: Option<TokenRecord>,
}

#[derive(Clone, PartialEq)]
enum Credentials {
    /// Managed by the application. Never refreshed.
    AccessToken(String),
    /// Exchanged for access tokens with the IAM service.
    ApiKey(String),
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::AccessToken(_) => f.write_str("AccessToken([censored])"),
            Credentials::ApiKey(_) => f.write_str("ApiKey([censored])"),
        }
    }
}

impl TokenManager {
    /// Returns an access token that is valid at the time of the call.
    ///
    /// The token comes from the cache when possible. Otherwise this function
    /// makes exactly one request to the IAM service, either a refresh or a
    /// new token request, and caches the result.
    ///
    /// # Errors
    ///
    /// Returns a [TokenRequestError] if the IAM service cannot produce a
    /// token. The previously cached token, if any, is left untouched.
    pub async fn token(&self) -> Result<String> {
        let mut state = self.inner.state.lock().await;
        let api_key = match &state.credentials {
            Credentials::AccessToken(token) => return Ok(token.clone()),
            Credentials::ApiKey(key) => key.clone(),
        };

        let now = self.inner.clock.now();
        let response = match state.record.as_ref() {
            None => {
                tracing::debug!("no cached IAM token, requesting a new one");
                self.inner.endpoint.request_token(&api_key).await?
            }
            Some(record) if !record.is_expired(now) => {
                tracing::debug!(expiration = record.expiration, "using cached IAM token");
                return Ok(record.access_token.clone());
            }
            Some(record) => match record.refresh_token.as_deref() {
                Some(refresh_token) if record.can_refresh(now) => {
                    tracing::debug!(expiration = record.expiration, "refreshing IAM token");
                    self.inner.endpoint.refresh_token(refresh_token).await?
                }
                _ => {
                    tracing::debug!(
                        expiration = record.expiration,
                        "IAM token cannot be refreshed, requesting a new one"
                    );
                    self.inner.endpoint.request_token(&api_key).await?
                }
            },
        };

        if response.expiration.is_none() {
            tracing::warn!(
                expires_in = response.expires_in,
                "IAM token response has no expiration, the token will not be reused"
            );
        }
        let record = TokenRecord::from(response);
        let token = record.access_token.clone();
        state.record = Some(record);
        Ok(token)
    }

    /// Sets a user-managed access token.
    ///
    /// Subsequent calls to [token][TokenManager::token] return this value
    /// without contacting the IAM service, regardless of any token cached
    /// from the API key.
    pub async fn set_access_token<T: Into<String>>(&self, access_token: T) {
        let mut state = self.inner.state.lock().await;
        state.credentials = Credentials::AccessToken(access_token.into());
    }
}

/// A builder for [TokenManager] instances.
///
/// Exactly one of [with_api_key][Builder::with_api_key] or
/// [with_access_token][Builder::with_access_token] must be called.
///
/// # Example
/// ```
/// # use sdk_core_auth::token_manager::Builder;
/// let manager = Builder::default()
///     .with_api_key("my-api-key")
///     .with_url("https://iam.test.cloud.ibm.com/identity/token")
///     .build();
/// assert!(manager.is_ok());
/// ```
#[derive(Debug, Default)]
pub struct Builder {
    api_key: Option<String>,
    access_token: Option<String>,
    url: Option<String>,
    client_credentials: Option<(String, String)>,
    clock: Option<Arc<dyn Clock>>,
    endpoint: Option<Arc<dyn TokenEndpoint>>,
}

impl Builder {
    /// Uses an API key to obtain access tokens from the IAM service.
    pub fn with_api_key<T: Into<String>>(mut self, api_key: T) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Uses an access token managed by the application.
    ///
    /// The token is never refreshed. The application is responsible for
    /// replacing it, see [TokenManager::set_access_token].
    pub fn with_access_token<T: Into<String>>(mut self, access_token: T) -> Self {
        self.access_token = Some(access_token.into());
        self
    }

    /// Overrides the IAM token service URL.
    ///
    /// Defaults to `https://iam.cloud.ibm.com/identity/token`.
    pub fn with_url<T: Into<String>>(mut self, url: T) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Overrides the client id and secret used to authenticate with the IAM
    /// token service.
    ///
    /// Both values must be non-empty. Defaults to `bx` / `bx`.
    pub fn with_client_credentials<I, S>(mut self, client_id: I, client_secret: S) -> Self
    where
        I: Into<String>,
        S: Into<String>,
    {
        self.client_credentials = Some((client_id.into(), client_secret.into()));
        self
    }

    /// Overrides the time source used to decide if a token has expired.
    pub fn with_clock<C: Clock + 'static>(mut self, clock: C) -> Self {
        self.clock = Some(Arc::new(clock));
        self
    }

    #[cfg(test)]
    pub(crate) fn with_token_endpoint<E: TokenEndpoint + 'static>(mut self, endpoint: E) -> Self {
        self.endpoint = Some(Arc::new(endpoint));
        self
    }

    /// Returns a [TokenManager] with the configured settings.
    ///
    /// # Errors
    ///
    /// Returns a [BuildError] if no credentials were configured, if both an
    /// API key and an access token were configured, or if any configured value
    /// is empty.
    pub fn build(self) -> std::result::Result<TokenManager, BuildError> {
        let credentials = match (self.api_key, self.access_token) {
            (Some(_), Some(_)) => {
                return Err(BuildError::conflicting_fields(
                    API_KEY_FIELD,
                    ACCESS_TOKEN_FIELD,
                ));
            }
            (None, Some(token)) => {
                Credentials::AccessToken(require_non_empty(ACCESS_TOKEN_FIELD, Some(token))?)
            }
            (key, None) => Credentials::ApiKey(require_non_empty(API_KEY_FIELD, key)?),
        };

        let endpoint = match self.endpoint {
            Some(endpoint) => endpoint,
            None => {
                let url = match self.url {
                    Some(url) => require_non_empty(URL_FIELD, Some(url))?,
                    None => DEFAULT_IAM_URL.to_string(),
                };
                let (client_id, client_secret) = match self.client_credentials {
                    Some((id, secret)) => (
                        require_non_empty(CLIENT_ID_FIELD, Some(id))?,
                        require_non_empty(CLIENT_SECRET_FIELD, Some(secret))?,
                    ),
                    None => (
                        DEFAULT_IAM_CLIENT_ID.to_string(),
                        DEFAULT_IAM_CLIENT_SECRET.to_string(),
                    ),
                };
                Arc::new(IamTokenEndpoint::new(url, client_id, client_secret))
            }
        };

        Ok(TokenManager {
            inner: Arc::new(TokenManagerImpl {
                endpoint,
                clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
                state: Mutex::new(State {
                    credentials,
                    record: None,
                }),
            }),
        })
    }
}
