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

//! The token record cached by the IAM token manager.

/// Refresh tokens issued by IAM remain usable for this long past the
/// expiration of the access token they were issued with.
pub(crate) const REFRESH_TOKEN_LIFETIME_SECS: i64 = 7 * 24 * 60 * 60;

/// The token information returned by the IAM token service.
///
/// Only `access_token` is required. Every other field may be missing, the
/// token manager decides how to treat a record with gaps.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub expiration: Option<i64>,
}

/// A cached access token and the metadata needed to reuse or renew it.
///
/// The record is replaced as a whole, never updated field by field.
#[derive(Clone, PartialEq)]
pub(crate) struct TokenRecord {
    /// The value sent in the `Authorization:` header.
    pub access_token: String,

    /// Exchanged for a new access token without using the API key again.
    pub refresh_token: Option<String>,

    /// Conventionally `"Bearer"`.
    pub token_type: String,

    /// The lifetime of the access token, in seconds, as reported by IAM.
    pub expires_in: Option<i64>,

    /// The expiration of the access token, in seconds since the Unix epoch.
    pub expiration: Option<i64>,
}

impl TokenRecord {
    /// Returns `true` unless the access token is known to be valid at `now`.
    ///
    /// A record without an absolute expiration cannot be trusted, even when it
    /// carries a relative `expires_in`.
    pub fn is_expired(&self, now: i64) -> bool {
        match self.expiration {
            Some(expiration) => now >= expiration,
            None => true,
        }
    }

    /// Returns `true` if the refresh token can still be exchanged at `now`.
    ///
    /// The refresh token expiration is derived from the access token
    /// expiration. Without the latter the refresh token is not usable.
    pub fn can_refresh(&self, now: i64) -> bool {
        let Some(expiration) = self.expiration else {
            return false;
        };
        self.refresh_token.as_deref().is_some_and(|t| !t.is_empty())
            && now < expiration.saturating_add(REFRESH_TOKEN_LIFETIME_SECS)
    }
}

impl From<TokenResponse> for TokenRecord {
    fn from(response: TokenResponse) -> Self {
        TokenRecord {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
            token_type: response.token_type.unwrap_or_else(|| "Bearer".to_string()),
            expires_in: response.expires_in,
            expiration: response.expiration,
        }
    }
}

impl std::fmt::Debug for TokenRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenRecord")
            .field("access_token", &"[censored]")
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "[censored]"),
            )
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("expiration", &self.expiration)
            .finish()
    }
}
