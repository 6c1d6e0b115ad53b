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

//! Creates an [Authenticator] from service configuration.
//!
//! SDK clients are usually configured with a JSON-like object naming the
//! credentials. The credential field present selects the authentication
//! strategy:
//!
//! | Field            | Authenticator                       |
//! | ---------------- | ----------------------------------- |
//! | `bearerToken`    | [BearerTokenAuthenticator]          |
//! | `iamAccessToken` | [IamAuthenticator], user-managed    |
//! | `iamApikey`      | [IamAuthenticator], API key         |
//! | none             | [NoAuthAuthenticator]               |
//!
//! # Example
//! ```
//! # use sdk_core_auth::options::Builder;
//! let authenticator = Builder::new(serde_json::json!({
//!     "iamApikey": "my-api-key",
//!     "iamUrl": "https://iam.test.cloud.ibm.com/identity/token",
//! }))
//! .build()?;
//! assert_eq!(authenticator.authentication_type(), "iam");
//! # Ok::<(), sdk_core_auth::build_errors::Error>(())
//! ```
//!
//! [BearerTokenAuthenticator]: crate::authenticator::bearer_token::BearerTokenAuthenticator
//! [IamAuthenticator]: crate::authenticator::iam::IamAuthenticator
//! [NoAuthAuthenticator]: crate::authenticator::no_auth::NoAuthAuthenticator

use crate::authenticator::iam::IamAuthenticator;
use crate::authenticator::{Authenticator, bearer_token, no_auth};
use crate::build_errors::Error as BuildError;
use crate::token_manager;
use serde_json::Value;

/// The authentication options understood by [Builder].
#[derive(Clone, Default, PartialEq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthOptions {
    /// A bearer token sent as-is.
    pub bearer_token: Option<String>,
    /// An IAM access token managed by the application.
    pub iam_access_token: Option<String>,
    /// An API key exchanged for IAM access tokens.
    pub iam_apikey: Option<String>,
    /// Overrides the IAM token service URL.
    pub iam_url: Option<String>,
    /// Overrides the client id used with the IAM token service.
    pub iam_client_id: Option<String>,
    /// Overrides the client secret used with the IAM token service.
    pub iam_client_secret: Option<String>,
}

impl std::fmt::Debug for AuthOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let censor = |v: &Option<String>| v.as_ref().map(|_| "[censored]");
        f.debug_struct("AuthOptions")
            .field("bearer_token", &censor(&self.bearer_token))
            .field("iam_access_token", &censor(&self.iam_access_token))
            .field("iam_apikey", &censor(&self.iam_apikey))
            .field("iam_url", &self.iam_url)
            .field("iam_client_id", &self.iam_client_id)
            .field("iam_client_secret", &censor(&self.iam_client_secret))
            .finish()
    }
}

/// A builder for [Authenticator] instances configured from [AuthOptions].
#[derive(Debug)]
pub struct Builder {
    options: Value,
}

impl Builder {
    /// Creates a new builder from a JSON value holding [AuthOptions].
    pub fn new(options: Value) -> Self {
        Self { options }
    }

    /// Returns the [Authenticator] selected by the configured options.
    ///
    /// # Errors
    ///
    /// Returns a [BuildError] if the options cannot be parsed, if more than
    /// one credential field is present, or if the selected credential is
    /// empty.
    pub fn build(self) -> Result<Authenticator, BuildError> {
        let options =
            serde_json::from_value::<AuthOptions>(self.options).map_err(BuildError::parsing)?;
        build_authenticator(options)
    }
}

/// Returns the [Authenticator] selected by `options`.
pub fn build_authenticator(options: AuthOptions) -> Result<Authenticator, BuildError> {
    if options.bearer_token.is_some() {
        if options.iam_apikey.is_some() {
            return Err(BuildError::conflicting_fields("bearerToken", "iamApikey"));
        }
        if options.iam_access_token.is_some() {
            return Err(BuildError::conflicting_fields(
                "bearerToken",
                "iamAccessToken",
            ));
        }
        let authenticator = bearer_token::Builder::from_option(options.bearer_token).build()?;
        tracing::debug!("using bearer token authentication");
        return Ok(authenticator.into());
    }

    if options.iam_apikey.is_none() && options.iam_access_token.is_none() {
        tracing::debug!("no credentials configured, requests are not authenticated");
        return Ok(no_auth::Builder::new().build().into());
    }

    let mut builder = token_manager::Builder::default();
    if let Some(key) = options.iam_apikey {
        builder = builder.with_api_key(key);
    }
    if let Some(token) = options.iam_access_token {
        builder = builder.with_access_token(token);
    }
    if let Some(url) = options.iam_url {
        builder = builder.with_url(url);
    }
    match (options.iam_client_id, options.iam_client_secret) {
        (Some(id), Some(secret)) => builder = builder.with_client_credentials(id, secret),
        (None, None) => {}
        _ => tracing::warn!(
            "only one of iamClientId or iamClientSecret was set, using the default client credentials"
        ),
    }
    tracing::debug!("using IAM authentication");
    Ok(IamAuthenticator::new(builder.build()?).into())
}
