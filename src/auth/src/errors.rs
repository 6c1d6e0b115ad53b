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

//! Errors returned while obtaining tokens and authenticating requests.

use http::StatusCode;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter, Result};
use std::sync::Arc;

/// Represents an error obtaining an access token from the IAM token service.
///
/// Returned by [TokenManager::token] when either the initial token request
/// or a refresh fails. The error carries a hint about whether the operation
/// might succeed if attempted again. The token manager never retries on its
/// own; that decision belongs to the request sender.
///
/// [TokenManager::token]: crate::token_manager::TokenManager::token
#[derive(Clone, Debug)]
pub struct TokenRequestError {
    /// If `true`, the operation that resulted in this error might succeed upon
    /// retry.
    is_retryable: bool,

    /// The underlying source of the error.
    source: TokenRequestErrorImpl,
}

#[derive(Clone, Debug)]
enum TokenRequestErrorImpl {
    SimpleMessage(String),
    Source(Arc<dyn Error + Send + Sync>),
}

impl TokenRequestError {
    /// Creates a new `TokenRequestError`.
    ///
    /// # Arguments
    /// * `is_retryable` - A boolean indicating whether the error is retryable.
    /// * `source` - The underlying error that caused the failure.
    pub fn new<T: Error + Send + Sync + 'static>(is_retryable: bool, source: T) -> Self {
        TokenRequestError {
            is_retryable,
            source: TokenRequestErrorImpl::Source(Arc::new(source)),
        }
    }

    /// Creates a new `TokenRequestError` from a message.
    ///
    /// # Arguments
    /// * `is_retryable` - A boolean indicating whether the error is retryable.
    /// * `message` - A description of the failure.
    pub fn from_str<T: Into<String>>(is_retryable: bool, message: T) -> Self {
        TokenRequestError {
            is_retryable,
            source: TokenRequestErrorImpl::SimpleMessage(message.into()),
        }
    }

    /// Returns `true` if the error is retryable; otherwise returns `false`.
    pub fn is_retryable(&self) -> bool {
        self.is_retryable
    }
}

pub(crate) fn retryable<T: Error + Send + Sync + 'static>(source: T) -> TokenRequestError {
    TokenRequestError::new(true, source)
}

#[allow(dead_code)]
pub(crate) fn non_retryable_from_str<T: Into<String>>(message: T) -> TokenRequestError {
    TokenRequestError::from_str(false, message)
}

impl Display for TokenRequestErrorImpl {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match &self {
            TokenRequestErrorImpl::SimpleMessage(message) => write!(f, "{message}"),
            TokenRequestErrorImpl::Source(source) => write!(f, "{source}"),
        }
    }
}

impl Error for TokenRequestError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.source {
            TokenRequestErrorImpl::SimpleMessage(_) => None,
            TokenRequestErrorImpl::Source(source) => Some(source.as_ref()),
        }
    }
}

const RETRYABLE_MSG: &str = "but future attempts may succeed";
const NON_RETRYABLE_MSG: &str = "and future attempts will not succeed";

impl Display for TokenRequestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let msg = if self.is_retryable {
            RETRYABLE_MSG
        } else {
            NON_RETRYABLE_MSG
        };
        write!(
            f,
            "cannot obtain access token, {msg}, source: {}",
            self.source
        )
    }
}

/// The error type for [Authenticator::authenticate].
///
/// [Authenticator::authenticate]: crate::authenticator::Authenticator::authenticate
#[derive(thiserror::Error, Debug)]
pub enum AuthError {
    /// The token source could not produce a token.
    #[error(transparent)]
    TokenRequest(#[from] TokenRequestError),
    /// The token cannot be represented as an HTTP header value.
    #[error("the token is not a valid header value: {0}")]
    InvalidHeader(#[from] http::header::InvalidHeaderValue),
}

impl AuthError {
    /// Returns `true` if authenticating again might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            AuthError::TokenRequest(e) => e.is_retryable(),
            AuthError::InvalidHeader(_) => false,
        }
    }
}

pub(crate) fn is_retryable(c: StatusCode) -> bool {
    match c {
        // Internal server errors do not indicate that there is anything wrong
        // with our request, so we retry them.
        StatusCode::INTERNAL_SERVER_ERROR
        | StatusCode::SERVICE_UNAVAILABLE
        | StatusCode::REQUEST_TIMEOUT
        | StatusCode::TOO_MANY_REQUESTS => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(StatusCode::INTERNAL_SERVER_ERROR)]
    #[test_case(StatusCode::SERVICE_UNAVAILABLE)]
    #[test_case(StatusCode::REQUEST_TIMEOUT)]
    #[test_case(StatusCode::TOO_MANY_REQUESTS)]
    fn retryable_status(c: StatusCode) {
        assert!(is_retryable(c));
    }

    #[test_case(StatusCode::NOT_FOUND)]
    #[test_case(StatusCode::UNAUTHORIZED)]
    #[test_case(StatusCode::BAD_REQUEST)]
    #[test_case(StatusCode::BAD_GATEWAY)]
    #[test_case(StatusCode::PRECONDITION_FAILED)]
    fn non_retryable_status(c: StatusCode) {
        assert!(!is_retryable(c));
    }

    #[test]
    fn fmt() {
        let e = TokenRequestError::from_str(true, "test-only-err-123");
        let got = format!("{e}");
        assert!(got.contains("test-only-err-123"), "{got}");
        assert!(got.contains(RETRYABLE_MSG), "{got}");

        let e = TokenRequestError::from_str(false, "test-only-err-123");
        let got = format!("{e}");
        assert!(got.contains("test-only-err-123"), "{got}");
        assert!(got.contains(NON_RETRYABLE_MSG), "{got}");
    }

    #[test]
    fn source() {
        let e = TokenRequestError::from_str(false, "no source");
        assert!(e.source().is_none(), "{e:?}");

        let inner = std::io::Error::other("io failure");
        let e = retryable(inner);
        assert!(e.is_retryable());
        let got = e.source().map(|s| s.to_string());
        assert_eq!(got.as_deref(), Some("io failure"));

        let e = TokenRequestError::new(false, std::io::Error::other("bad"));
        assert!(!e.is_retryable());
    }

    #[test]
    fn auth_error() {
        let e = AuthError::from(TokenRequestError::from_str(true, "try again"));
        assert!(e.is_retryable(), "{e:?}");
        assert!(e.to_string().contains("try again"), "{e}");

        let invalid = http::HeaderValue::from_str("bad\nvalue").unwrap_err();
        let e = AuthError::from(invalid);
        assert!(!e.is_retryable(), "{e:?}");
        assert!(matches!(e, AuthError::InvalidHeader(_)), "{e:?}");
    }
}
