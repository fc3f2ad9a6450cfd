// Copyright 2025 the Glossa Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for injected capabilities and settings persistence.
//!
//! Capability errors never escape the engine: they are logged and replaced by a safe
//! default at the smallest scope. Only [`SettingsError`] reaches callers of a
//! [`SettingsStore`](crate::SettingsStore).

use thiserror::Error;

/// A transliteration capability could not produce a transcription.
#[derive(Debug, Error)]
pub enum TransliterationError {
    /// The input contains a character the capability has no reading for.
    #[error("no reading for {0:?}")]
    Unsupported(char),
    /// Any other failure reported by the capability.
    #[error("transliteration failed: {0}")]
    Failed(String),
}

/// A word segmenter could not be created or could not segment its input.
#[derive(Debug, Error)]
pub enum SegmenterError {
    /// No segmenter exists for the requested locale.
    #[error("no word segmenter for locale {0:?}")]
    UnsupportedLocale(String),
    /// Any other failure reported by the capability.
    #[error("segmentation failed: {0}")]
    Failed(String),
}

/// Settings could not be loaded or saved.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Reading or writing the backing file failed.
    #[error("settings i/o failed: {0}")]
    Io(#[from] std::io::Error),
    /// The stored document is not valid settings JSON.
    #[error("settings document is malformed: {0}")]
    Json(#[from] serde_json::Error),
}
