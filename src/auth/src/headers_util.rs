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

use crate::constants::BEARER_SCHEME;
use crate::errors::AuthError;
use http::HeaderMap;
use http::header::{AUTHORIZATION, HeaderValue};

/// Sets `Authorization: Bearer <token>` in `headers`.
///
/// Any previous `Authorization` values are replaced, all other headers are
/// left untouched. The new value is marked as sensitive.
pub(crate) fn set_bearer_header(headers: &mut HeaderMap, token: &str) -> Result<(), AuthError> {
    let mut value = HeaderValue::from_str(&format!("{BEARER_SCHEME} {token}"))?;
    value.set_sensitive(true);
    headers.insert(AUTHORIZATION, value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::header::{CONTENT_TYPE, HeaderName};

    #[test]
    fn sets_authorization() {
        let mut headers = HeaderMap::new();
        set_bearer_header(&mut headers, "test-token").unwrap();

        assert_eq!(headers.len(), 1, "{headers:?}");
        let value = headers.get(AUTHORIZATION).unwrap();
        assert_eq!(value, HeaderValue::from_static("Bearer test-token"));
        assert!(value.is_sensitive());
    }

    #[test]
    fn preserves_other_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            HeaderName::from_static("x-test-only"),
            HeaderValue::from_static("value"),
        );
        set_bearer_header(&mut headers, "test-token").unwrap();

        assert_eq!(headers.len(), 3, "{headers:?}");
        assert_eq!(
            headers.get(CONTENT_TYPE),
            Some(&HeaderValue::from_static("application/json"))
        );
        assert_eq!(
            headers.get("x-test-only"),
            Some(&HeaderValue::from_static("value"))
        );
    }

    #[test]
    fn replaces_authorization() {
        let mut headers = HeaderMap::new();
        headers.append(AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        headers.append(AUTHORIZATION, HeaderValue::from_static("Bearer old"));
        set_bearer_header(&mut headers, "new").unwrap();

        let values = headers.get_all(AUTHORIZATION).iter().collect::<Vec<_>>();
        assert_eq!(values, vec![&HeaderValue::from_static("Bearer new")]);
    }

    #[test]
    fn invalid_token() {
        let mut headers = HeaderMap::new();
        let e = set_bearer_header(&mut headers, "token with \n invalid chars").unwrap_err();
        assert!(matches!(e, AuthError::InvalidHeader(_)), "{e:?}");
        assert!(headers.is_empty(), "{headers:?}");
    }
}
