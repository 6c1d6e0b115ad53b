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

//! IAM token authentication.
//!
//! Sends an access token managed by a [TokenManager] as a bearer token. The
//! token manager obtains and renews the token, this authenticator only writes
//! the `Authorization` header.

use crate::authenticator::Result;
use crate::authenticator::dynamic::{AUTHTYPE_IAM, Authenticate};
use crate::headers_util::set_bearer_header;
use crate::token_manager::TokenManager;
use http::HeaderMap;

/// Adds an IAM access token to requests.
#[derive(Clone, Debug)]
pub struct IamAuthenticator {
    token_manager: TokenManager,
}

impl IamAuthenticator {
    /// Creates an authenticator backed by `token_manager`.
    ///
    /// # Example
    /// ```
    /// # use sdk_core_auth::authenticator::iam::IamAuthenticator;
    /// # use sdk_core_auth::token_manager::Builder;
    /// let token_manager = Builder::default().with_api_key("my-api-key").build()?;
    /// let authenticator = IamAuthenticator::new(token_manager);
    /// # Ok::<(), sdk_core_auth::build_errors::Error>(())
    /// ```
    pub fn new(token_manager: TokenManager) -> Self {
        Self { token_manager }
    }

    /// The token manager used by this authenticator.
    pub fn token_manager(&self) -> &TokenManager {
        &self.token_manager
    }
}

#[async_trait::async_trait]
impl Authenticate for IamAuthenticator {
    async fn authenticate(&self, headers: &mut HeaderMap) -> Result<()> {
        let token = self.token_manager.token().await?;
        set_bearer_header(headers, &token)
    }

    fn authentication_type(&self) -> &'static str {
        AUTHTYPE_IAM
    }
}
