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

/// The default IAM token service endpoint.
pub(crate) const DEFAULT_IAM_URL: &str = "https://iam.cloud.ibm.com/identity/token";
/// The client id used to authenticate with the IAM token service.
pub(crate) const DEFAULT_IAM_CLIENT_ID: &str = "bx";
/// The client secret used to authenticate with the IAM token service.
pub(crate) const DEFAULT_IAM_CLIENT_SECRET: &str = "bx";
/// API key OAuth Grant Type
pub(crate) const API_KEY_GRANT_TYPE: &str = "urn:ibm:params:oauth:grant-type:apikey";
/// Refresh Token OAuth Grant Type
pub(crate) const REFRESH_TOKEN_GRANT_TYPE: &str = "refresh_token";
/// The response type requested from the IAM token service.
pub(crate) const IAM_RESPONSE_TYPE: &str = "cloud_iam";
/// The scheme used in `Authorization:` headers.
pub(crate) const BEARER_SCHEME: &str = "Bearer";
