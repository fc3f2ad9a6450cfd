// Copyright 2025 the Glossa Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=glossa_lookup --heading-base-level=0

//! Glossa Lookup: dictionary definitions for a selected term.
//!
//! The crate talks to the public Wiktionary definitions endpoint through a host-supplied
//! [`Transport`], keeps the Chinese (or Translingual) senses, and turns the result into a
//! [`Popup`] description placed under the selection.
//!
//! Lookups never fail outward. A missing entry, an entry without a Chinese definition and a
//! generic failure each get their own message, and every finished popup links to the full
//! page so the reader has somewhere to go.
//!
//! ## Example
//!
//! ```rust
//! use glossa_lookup::{DictionaryClient, HttpResponse, LookupOutcome, Popup};
//!
//! type BoxError = Box<dyn core::error::Error + Send + Sync>;
//!
//! let client = DictionaryClient::new(|_url: &str| -> Result<HttpResponse, BoxError> {
//!     Ok(HttpResponse::new(404, ""))
//! });
//! let outcome = client.lookup("你好");
//! assert!(matches!(outcome, LookupOutcome::NotFound));
//!
//! let popup = Popup::for_outcome("你好", &outcome);
//! assert!(popup.link.is_some());
//! ```

mod client;
mod error;
mod popup;
mod tooltip;
pub mod wiktionary;

pub use client::{DictionaryClient, HttpResponse, LookupOutcome, Transport};
pub use error::LookupError;
pub use popup::{Anchor, Block, Link, Popup, is_dark_background, place};
pub use tooltip::Tooltip;
pub use wiktionary::DefinitionItem;

/// Constants describing popup geometry and copy.
pub mod copy {
    pub use crate::popup::{
        FAILURE_MESSAGE, FAILURE_NOTE, FOUND_NOTE, LINK_LABEL, LOADING_MESSAGE, MAX_WIDTH,
        NO_TARGET_MESSAGE, NO_TARGET_NOTE, NOT_FOUND_MESSAGE, NOT_FOUND_NOTE, OFFSET_Y,
        SAFE_MARGIN, SUBTITLE,
    };
}
