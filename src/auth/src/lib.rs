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

//! SDK Core - Authentication Components
//!
//! This crate contains the strategies SDK clients use to attach credentials to
//! outgoing HTTP requests. The SDK clients consume an
//! [authenticator::Authenticator] and call it right before sending each
//! request.
//!
//! Three strategies are provided:
//! * [authenticator::bearer_token] sends a fixed, application-managed bearer
//!   token.
//! * [authenticator::no_auth] sends no credentials at all.
//! * [authenticator::iam] sends an access token issued by the IAM token
//!   service. The [token_manager] module caches these tokens and renews them
//!   when they expire.
//!
//! The [options] module selects a strategy from service configuration.

pub mod build_errors;
pub mod errors;

/// Types and functions to attach credentials to requests.
pub mod authenticator;

/// Time sources used to evaluate token expiration.
pub mod clock;

pub mod options;

pub mod token_manager;

/// The cached token record.
pub(crate) mod token;

pub(crate) mod constants;

/// Header utility functions shared by the authenticators.
pub(crate) mod headers_util;
