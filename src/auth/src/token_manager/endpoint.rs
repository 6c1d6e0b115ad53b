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

use crate::constants::{API_KEY_GRANT_TYPE, IAM_RESPONSE_TYPE, REFRESH_TOKEN_GRANT_TYPE};
use crate::errors::{self, TokenRequestError, is_retryable};
use crate::token::TokenResponse;
use http::header::{ACCEPT, HeaderValue};

type Result<T> = std::result::Result<T, TokenRequestError>;

/// The IAM token service, as seen by the token manager.
///
/// Each call performs exactly one exchange with the service. Implementations
/// do not retry.
#[async_trait::async_trait]
pub(crate) trait TokenEndpoint: std::fmt::Debug + Send + Sync {
    /// Exchanges an API key for a new access and refresh token pair.
    async fn request_token(&self, api_key: &str) -> Result<TokenResponse>;

    /// Exchanges a refresh token for a new access and refresh token pair.
    async fn refresh_token(&self, refresh_token: &str) -> Result<TokenResponse>;
}

/// Talks to the IAM token service over HTTP.
///
/// Requests are form encoded and authenticated with the IAM client id and
/// secret using HTTP basic authentication.
pub(crate) struct IamTokenEndpoint {
    client: reqwest::Client,
    url: String,
    client_id: String,
    client_secret: String,
}

impl IamTokenEndpoint {
    pub(crate) fn new(url: String, client_id: String, client_secret: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
            client_id,
            client_secret,
        }
    }

    async fn execute(&self, params: &[(&str, &str)]) -> Result<TokenResponse> {
        let resp = self
            .client
            .post(self.url.as_str())
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(params)
            .send()
            .await
            .map_err(errors::retryable)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp
                .text()
                .await
                .map_err(|e| TokenRequestError::new(is_retryable(status), e))?;
            return Err(TokenRequestError::from_str(
                is_retryable(status),
                format!("failed to fetch token, status {status}: {body}"),
            ));
        }
        resp.json::<TokenResponse>().await.map_err(|e| {
            let retryable = !e.is_decode();
            TokenRequestError::new(retryable, e)
        })
    }
}

impl std::fmt::Debug for IamTokenEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IamTokenEndpoint")
            .field("url", &self.url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[censored]")
            .finish()
    }
}

#[async_trait::async_trait]
impl TokenEndpoint for IamTokenEndpoint {
    async fn request_token(&self, api_key: &str) -> Result<TokenResponse> {
        self.execute(&[
            ("grant_type", API_KEY_GRANT_TYPE),
            ("apikey", api_key),
            ("response_type", IAM_RESPONSE_TYPE),
        ])
        .await
    }

    async fn refresh_token(&self, refresh_token: &str) -> Result<TokenResponse> {
        self.execute(&[
            ("grant_type", REFRESH_TOKEN_GRANT_TYPE),
            ("refresh_token", refresh_token),
        ])
        .await
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use httptest::{Expectation, Server, matchers::*, responders::*};
    use serde_json::json;
    use std::error::Error as _;
    use test_case::test_case;

    type TestResult = anyhow::Result<()>;

    mockall::mock! {
        #[derive(Debug)]
        pub TokenEndpoint { }

        #[async_trait::async_trait]
        impl TokenEndpoint for TokenEndpoint {
            async fn request_token(&self, api_key: &str) -> Result<TokenResponse>;
            async fn refresh_token(&self, refresh_token: &str) -> Result<TokenResponse>;
        }
    }

    fn endpoint(server: &Server) -> IamTokenEndpoint {
        IamTokenEndpoint::new(
            server.url("/identity/token").to_string(),
            "bx".to_string(),
            "bx".to_string(),
        )
    }

    #[test]
    fn debug() {
        let endpoint = IamTokenEndpoint::new(
            "https://iam.test-only".to_string(),
            "test-client-id".to_string(),
            "test-client-secret".to_string(),
        );
        let fmt = format!("{endpoint:?}");
        assert!(fmt.contains("https://iam.test-only"), "{fmt}");
        assert!(fmt.contains("test-client-id"), "{fmt}");
        assert!(!fmt.contains("test-client-secret"), "{fmt}");
    }

    #[tokio::test]
    async fn request_token_success() -> TestResult {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("POST", "/identity/token"),
                // base64("bx:bx")
                request::headers(contains(("authorization", "Basic Yng6Yng="))),
                request::headers(contains(("accept", "application/json"))),
                request::body(url_decoded(contains((
                    "grant_type",
                    "urn:ibm:params:oauth:grant-type:apikey"
                )))),
                request::body(url_decoded(contains(("apikey", "test-api-key")))),
                request::body(url_decoded(contains(("response_type", "cloud_iam")))),
            ])
            .respond_with(json_encoded(json!({
                "access_token": "A1",
                "refresh_token": "R1",
                "token_type": "Bearer",
                "expires_in": 3600,
                "expiration": 1_700_003_600,
            }))),
        );

        let got = endpoint(&server).request_token("test-api-key").await?;
        let want = TokenResponse {
            access_token: "A1".to_string(),
            refresh_token: Some("R1".to_string()),
            token_type: Some("Bearer".to_string()),
            expires_in: Some(3600),
            expiration: Some(1_700_003_600),
        };
        assert_eq!(got, want);
        Ok(())
    }

    #[tokio::test]
    async fn refresh_token_success() -> TestResult {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("POST", "/identity/token"),
                request::body(url_decoded(contains(("grant_type", "refresh_token")))),
                request::body(url_decoded(contains(("refresh_token", "R1")))),
            ])
            .respond_with(json_encoded(json!({
                "access_token": "A2",
                "refresh_token": "R2",
            }))),
        );

        let got = endpoint(&server).refresh_token("R1").await?;
        assert_eq!(got.access_token, "A2");
        assert_eq!(got.refresh_token.as_deref(), Some("R2"));
        assert_eq!(got.expiration, None);
        Ok(())
    }

    #[test_case(503, true)]
    #[test_case(429, true)]
    #[test_case(400, false)]
    #[test_case(401, false)]
    #[tokio::test]
    async fn request_token_http_error(code: u16, retryable: bool) -> TestResult {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("POST", "/identity/token"))
                .respond_with(status_code(code).body("test-only-failure")),
        );

        let e = endpoint(&server)
            .request_token("test-api-key")
            .await
            .unwrap_err();
        assert_eq!(e.is_retryable(), retryable, "{e}");
        assert!(e.to_string().contains("test-only-failure"), "{e}");
        Ok(())
    }

    #[tokio::test]
    async fn malformed_response_is_not_retryable() -> TestResult {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("POST", "/identity/token"))
                .respond_with(json_encoded(json!("bad json"))),
        );

        let e = endpoint(&server).refresh_token("R1").await.unwrap_err();
        assert!(!e.is_retryable(), "{e}");
        assert!(e.source().is_some(), "{e:?}");
        Ok(())
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_retryable() -> TestResult {
        let endpoint = IamTokenEndpoint::new(
            // Nothing listens on the discard port.
            "http://127.0.0.1:9/identity/token".to_string(),
            "bx".to_string(),
            "bx".to_string(),
        );
        let e = endpoint.request_token("test-api-key").await.unwrap_err();
        assert!(e.is_retryable(), "{e}");
        Ok(())
    }
}
