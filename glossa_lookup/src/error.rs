// Copyright 2025 the Glossa Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lookup failures.

use thiserror::Error;

/// Why a definition could not be produced.
///
/// Each kind maps to a distinct user-facing message; none of them is ever raised past
/// [`DictionaryClient::lookup`](crate::DictionaryClient::lookup).
#[derive(Debug, Error)]
pub enum LookupError {
    /// The definition API answered 404 for the exact term.
    #[error("no definition entry for the exact term")]
    NotFound,
    /// The definition API answered with a non-success status other than 404.
    #[error("definition API returned HTTP {status}")]
    Http {
        /// The HTTP status code.
        status: u16,
    },
    /// The request never produced a response.
    #[error("network failure: {0}")]
    Transport(String),
    /// The response body was not the expected JSON document.
    #[error("malformed definition response: {0}")]
    Malformed(#[from] serde_json::Error),
}
