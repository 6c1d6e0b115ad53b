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

//! Authenticators that add no credentials.
//!
//! These are useful for services that do not require authentication.

use crate::authenticator::Result;
use crate::authenticator::dynamic::{AUTHTYPE_NOAUTH, Authenticate};
use http::HeaderMap;

/// Leaves requests untouched.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoAuthAuthenticator;

/// A builder for [NoAuthAuthenticator] instances.
#[derive(Debug, Default)]
pub struct Builder {}

impl Builder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a [NoAuthAuthenticator].
    pub fn build(self) -> NoAuthAuthenticator {
        NoAuthAuthenticator
    }
}

#[async_trait::async_trait]
impl Authenticate for NoAuthAuthenticator {
    async fn authenticate(&self, _headers: &mut HeaderMap) -> Result<()> {
        Ok(())
    }

    fn authentication_type(&self) -> &'static str {
        AUTHTYPE_NOAUTH
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authenticator::Authenticator;
    use http::header::{CONTENT_TYPE, HeaderValue};

    #[tokio::test]
    async fn leaves_headers_untouched() -> anyhow::Result<()> {
        let authenticator = Authenticator::from(Builder::new().build());
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let want = headers.clone();

        authenticator.authenticate(&mut headers).await?;
        assert_eq!(headers, want);
        assert_eq!(authenticator.authentication_type(), "noAuth");
        Ok(())
    }
}
