// Copyright 2025 the Glossa Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Injected capabilities: transliteration and word segmentation.
//!
//! The engine never probes its environment. Hosts hand it a [`Capabilities`] value whose
//! members are `None` when the platform lacks them, and the engine degrades accordingly:
//! no transliterator means empty transcriptions, no segmenter means per-character
//! segmentation.

use core::fmt;

use crate::error::{SegmenterError, TransliterationError};

/// How tones are written in a transcription.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ToneStyle {
    /// Diacritic marks on the vowel (`nǐ`).
    #[default]
    Mark,
    /// Trailing tone digit (`ni3`).
    Number,
    /// No tone information (`ni`).
    None,
}

/// Options passed to every transliteration call.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TransliterationOptions {
    /// Tone rendering style.
    pub tone_style: ToneStyle,
}

/// Text to phonetic transcription. Assumed pure.
pub trait Transliterator {
    /// Transcribe `text`. Implementations may separate syllables with whitespace.
    fn transliterate(
        &self,
        text: &str,
        options: &TransliterationOptions,
    ) -> Result<String, TransliterationError>;
}

impl<F> Transliterator for F
where
    F: Fn(&str, &TransliterationOptions) -> Result<String, TransliterationError>,
{
    fn transliterate(
        &self,
        text: &str,
        options: &TransliterationOptions,
    ) -> Result<String, TransliterationError> {
        self(text, options)
    }
}

/// One piece of a segmenter's output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordSegment {
    /// The slice of input text.
    pub text: String,
    /// Whether the segmenter considers this piece a word (as opposed to punctuation or
    /// whitespace).
    pub is_word_like: bool,
}

impl WordSegment {
    /// Convenience constructor.
    pub fn new(text: impl Into<String>, is_word_like: bool) -> Self {
        Self {
            text: text.into(),
            is_word_like,
        }
    }
}

/// Locale-aware word segmentation.
pub trait WordSegmenter {
    /// Split `text` into consecutive pieces.
    fn segment(&self, text: &str) -> Result<Vec<WordSegment>, SegmenterError>;
}

/// Creates word segmenters. Creation may fail, e.g. for an unsupported locale.
pub trait SegmenterFactory {
    /// Build a segmenter for `locale`.
    fn create(&self, locale: &str) -> Result<Box<dyn WordSegmenter>, SegmenterError>;
}

/// The capability set handed to the engine.
#[derive(Default)]
pub struct Capabilities {
    /// Transliteration, if the host has one.
    pub transliterator: Option<Box<dyn Transliterator>>,
    /// Word segmentation, if the host has one.
    pub segmenter: Option<Box<dyn SegmenterFactory>>,
}

impl Capabilities {
    /// No capabilities at all.
    pub fn none() -> Self {
        Self::default()
    }

    /// Set the transliterator.
    #[must_use]
    pub fn with_transliterator(mut self, t: impl Transliterator + 'static) -> Self {
        self.transliterator = Some(Box::new(t));
        self
    }

    /// Set the segmenter factory.
    #[must_use]
    pub fn with_segmenter(mut self, f: impl SegmenterFactory + 'static) -> Self {
        self.segmenter = Some(Box::new(f));
        self
    }
}

impl fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capabilities")
            .field("transliterator", &self.transliterator.is_some())
            .field("segmenter", &self.segmenter.is_some())
            .finish()
    }
}
