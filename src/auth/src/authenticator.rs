// Copyright 2024 Google LLC
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

//! Types and functions to attach credentials to outgoing requests.
//!
//! An [Authenticator] decorates the headers of an outgoing HTTP request with
//! authentication information. The request sender calls
//! [authenticate][Authenticator::authenticate] right before sending each
//! request, and never inspects the credentials itself.
//!
//! # Example
//! ```
//! # use sdk_core_auth::authenticator::{Authenticator, bearer_token};
//! # use http::HeaderMap;
//! # tokio_test::block_on(async {
//! let authenticator: Authenticator = bearer_token::Builder::new("my-token").build()?.into();
//! let mut headers = HeaderMap::new();
//! authenticator.authenticate(&mut headers).await?;
//! assert_eq!(headers["authorization"], "Bearer my-token");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! # });
//! ```

pub mod bearer_token;
pub mod iam;
pub mod no_auth;

use crate::errors::AuthError;
use http::HeaderMap;
use std::sync::Arc;

pub type Result<T> = std::result::Result<T, AuthError>;

/// An implementation of [dynamic::Authenticate].
///
/// Represents one of the supported authentication strategies. Use the
/// builders in [bearer_token], [no_auth], and [iam], or
/// [crate::options::Builder], to create instances.
///
/// `Authenticator` is cheap to clone, clones share the same underlying
/// strategy and, for IAM, the same cached token.
#[derive(Clone, Debug)]
pub struct Authenticator {
    inner: Arc<dyn dynamic::Authenticate>,
}

impl<T> std::convert::From<T> for Authenticator
where
    T: dynamic::Authenticate + 'static,
{
    fn from(value: T) -> Self {
        Self {
            inner: Arc::new(value),
        }
    }
}

impl Authenticator {
    /// Adds authentication information to the headers of a request.
    ///
    /// Headers not related to authentication are preserved.
    pub async fn authenticate(&self, headers: &mut HeaderMap) -> Result<()> {
        self.inner.authenticate(headers).await
    }

    /// The name of the authentication strategy, e.g. `"bearerToken"`.
    pub fn authentication_type(&self) -> &'static str {
        self.inner.authentication_type()
    }
}

pub mod dynamic {
    use super::Result;
    use http::HeaderMap;

    /// The name reported by bearer token authenticators.
    pub const AUTHTYPE_BEARER_TOKEN: &str = "bearerToken";
    /// The name reported by authenticators that add no credentials.
    pub const AUTHTYPE_NOAUTH: &str = "noAuth";
    /// The name reported by IAM authenticators.
    pub const AUTHTYPE_IAM: &str = "iam";

    /// A trait implemented by each authentication strategy.
    ///
    /// Applications may implement this trait to plug custom strategies into
    /// an [Authenticator][super::Authenticator].
    #[async_trait::async_trait]
    pub trait Authenticate: std::fmt::Debug + Send + Sync {
        /// Adds authentication information to `headers`.
        async fn authenticate(&self, headers: &mut HeaderMap) -> Result<()>;

        /// The name of the authentication strategy.
        fn authentication_type(&self) -> &'static str;
    }
}
