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

//! Errors created during authenticator and token manager construction.

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The error type for authenticator and token manager builders.
///
/// These errors are fatal: the configuration must be fixed, retrying the same
/// construction will fail in the same way.
#[derive(thiserror::Error, Debug)]
#[error(transparent)]
pub struct Error(ErrorKind);

impl Error {
    /// A required field was missing from the configuration.
    pub fn is_missing_field(&self) -> bool {
        matches!(self.0, ErrorKind::MissingField(_))
    }

    /// A required field was present, but empty.
    pub fn is_empty_field(&self) -> bool {
        matches!(self.0, ErrorKind::EmptyField(_))
    }

    /// The configuration names more than one mutually exclusive credential.
    pub fn is_conflicting_fields(&self) -> bool {
        matches!(self.0, ErrorKind::ConflictingFields(_, _))
    }

    /// A problem parsing a configuration value.
    pub fn is_parsing(&self) -> bool {
        matches!(self.0, ErrorKind::Parsing(_))
    }

    pub(crate) fn missing_field(field: &'static str) -> Error {
        Error(ErrorKind::MissingField(field))
    }

    pub(crate) fn empty_field(field: &'static str) -> Error {
        Error(ErrorKind::EmptyField(field))
    }

    pub(crate) fn conflicting_fields(first: &'static str, second: &'static str) -> Error {
        Error(ErrorKind::ConflictingFields(first, second))
    }

    pub(crate) fn parsing<T>(source: T) -> Error
    where
        T: Into<BoxError>,
    {
        Error(ErrorKind::Parsing(source.into()))
    }
}

/// Rejects a missing or empty credential field.
pub(crate) fn require_non_empty(
    field: &'static str,
    value: Option<String>,
) -> std::result::Result<String, Error> {
    match value {
        None => Err(Error::missing_field(field)),
        Some(v) if v.trim().is_empty() => Err(Error::empty_field(field)),
        Some(v) => Ok(v),
    }
}

#[derive(thiserror::Error, Debug)]
enum ErrorKind {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("required field is empty: {0}")]
    EmptyField(&'static str),
    #[error("exactly one of {0} or {1} must be set, found both")]
    ConflictingFields(&'static str, &'static str),
    #[error("cannot parse the authentication options {0}")]
    Parsing(#[source] BoxError),
}
