// Copyright 2025 the Glossa Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dictionary client over a pluggable HTTP transport.

use serde_json::{Map, Value};

use crate::error::LookupError;
use crate::wiktionary::{self, DefinitionItem};

/// A minimal HTTP response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    /// Status code.
    pub status: u16,
    /// Response body.
    pub body: String,
}

impl HttpResponse {
    /// Convenience constructor.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Performs a GET request. Implementations own networking, timeouts and headers.
pub trait Transport {
    /// Fetch `url`. An `Err` means no response was received at all.
    fn get(&self, url: &str) -> Result<HttpResponse, Box<dyn core::error::Error + Send + Sync>>;
}

impl<F> Transport for F
where
    F: Fn(&str) -> Result<HttpResponse, Box<dyn core::error::Error + Send + Sync>>,
{
    fn get(&self, url: &str) -> Result<HttpResponse, Box<dyn core::error::Error + Send + Sync>> {
        self(url)
    }
}

/// What a lookup produced. Lookups never fail outward; failures are a variant.
#[derive(Debug)]
pub enum LookupOutcome {
    /// Displayable definitions, at most [`wiktionary::MAX_DEFINITIONS`].
    Definitions(Vec<DefinitionItem>),
    /// The term exists but exposes no Chinese (or Translingual) definition.
    NoTargetDefinition,
    /// The service has no entry for this exact term.
    NotFound,
    /// The lookup failed for another reason.
    Failed(LookupError),
}

/// Looks terms up against the Wiktionary definitions endpoint.
#[derive(Debug)]
pub struct DictionaryClient<T> {
    transport: T,
}

impl<T: Transport> DictionaryClient<T> {
    /// Create a client over `transport`.
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Fetch the raw definition document for `term`.
    ///
    /// A 404 maps to [`LookupError::NotFound`]; other non-success statuses to
    /// [`LookupError::Http`].
    pub fn fetch(&self, term: &str) -> Result<Map<String, Value>, LookupError> {
        let url = wiktionary::definition_url(term);
        let response = self
            .transport
            .get(&url)
            .map_err(|err| LookupError::Transport(err.to_string()))?;
        match response.status {
            404 => Err(LookupError::NotFound),
            200..=299 => Ok(wiktionary::parse_document(&response.body)?),
            status => Err(LookupError::Http { status }),
        }
    }

    /// Look `term` up and classify the result for display.
    pub fn lookup(&self, term: &str) -> LookupOutcome {
        match self.fetch(term) {
            Ok(doc) => {
                let items = wiktionary::format_definitions(&wiktionary::target_entries(&doc));
                if items.is_empty() {
                    LookupOutcome::NoTargetDefinition
                } else {
                    LookupOutcome::Definitions(items)
                }
            }
            Err(LookupError::NotFound) => {
                tracing::debug!("no dictionary entry for {term:?}");
                LookupOutcome::NotFound
            }
            Err(err) => {
                tracing::warn!("dictionary lookup for {term:?} failed: {err}");
                LookupOutcome::Failed(err)
            }
        }
    }
}
