// Copyright 2025 the Glossa Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Segmentation adapter: word policy over an injected segmenter, per-character fallback.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::capability::{SegmenterFactory, WordSegmenter};
use crate::script::{contains_target_script, is_target_char};

/// A lossless slice of a text run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    /// The original text of this slice.
    pub text: String,
    /// Whether this slice gets an annotation unit.
    pub annotatable: bool,
}

impl Segment {
    /// Convenience constructor.
    pub fn new(text: impl Into<String>, annotatable: bool) -> Self {
        Self {
            text: text.into(),
            annotatable,
        }
    }
}

/// Active segmentation policy.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentationMode {
    /// Word policy, using the injected segmenter when one is available.
    #[default]
    Word,
    /// One segment per character.
    Character,
}

impl SegmentationMode {
    /// Class name placed on the root while annotations are visible.
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Word => "glossa-word-mode",
            Self::Character => "glossa-char-mode",
        }
    }
}

/// Per-character segmentation: every character is its own segment.
pub fn segment_characters(text: &str) -> Vec<Segment> {
    text.chars()
        .map(|c| Segment::new(c, is_target_char(c)))
        .collect()
}

enum Cached {
    Empty,
    Ready(Box<dyn WordSegmenter>),
    Failed,
}

/// Produces segments for text runs under the active [`SegmentationMode`].
///
/// The word segmenter is created lazily on first use and cached until the mode changes or
/// [`invalidate`](Self::invalidate) is called. A failed creation is cached as well, so a
/// missing locale is reported once per policy rather than once per run.
pub struct SegmentationAdapter {
    mode: SegmentationMode,
    locale: String,
    cached: Cached,
}

impl fmt::Debug for SegmentationAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cached = match self.cached {
            Cached::Empty => "empty",
            Cached::Ready(_) => "ready",
            Cached::Failed => "failed",
        };
        f.debug_struct("SegmentationAdapter")
            .field("mode", &self.mode)
            .field("locale", &self.locale)
            .field("cached", &cached)
            .finish()
    }
}

impl SegmentationAdapter {
    /// Create an adapter for `mode`, building segmenters for `locale`.
    pub fn new(mode: SegmentationMode, locale: impl Into<String>) -> Self {
        Self {
            mode,
            locale: locale.into(),
            cached: Cached::Empty,
        }
    }

    /// The active mode.
    pub fn mode(&self) -> SegmentationMode {
        self.mode
    }

    /// Switch policy. The cached segmenter is dropped when the mode actually changes.
    pub fn set_mode(&mut self, mode: SegmentationMode) {
        if self.mode != mode {
            self.mode = mode;
            self.invalidate();
        }
    }

    /// Drop the cached segmenter so the next word-policy call recreates it.
    pub fn invalidate(&mut self) {
        self.cached = Cached::Empty;
    }

    /// Returns true if a segmenter is currently cached.
    pub fn has_cached_segmenter(&self) -> bool {
        matches!(self.cached, Cached::Ready(_))
    }

    /// Segment `text`. The result always concatenates back to `text`.
    pub fn segment(&mut self, text: &str, factory: Option<&dyn SegmenterFactory>) -> Vec<Segment> {
        if self.mode == SegmentationMode::Character {
            return segment_characters(text);
        }
        let Some(segmenter) = self.segmenter(factory) else {
            return segment_characters(text);
        };
        let pieces = match segmenter.segment(text) {
            Ok(pieces) => pieces,
            Err(err) => {
                tracing::debug!("word segmentation failed, using characters: {err}");
                return segment_characters(text);
            }
        };
        if pieces.iter().map(|p| p.text.as_str()).collect::<String>() != text {
            tracing::debug!("word segmenter output does not partition the run, using characters");
            return segment_characters(text);
        }
        pieces
            .into_iter()
            .map(|p| {
                let annotatable = p.is_word_like && contains_target_script(&p.text);
                Segment::new(p.text, annotatable)
            })
            .collect()
    }

    fn segmenter(&mut self, factory: Option<&dyn SegmenterFactory>) -> Option<&dyn WordSegmenter> {
        if matches!(self.cached, Cached::Empty) {
            let factory = factory?;
            self.cached = match factory.create(&self.locale) {
                Ok(s) => Cached::Ready(s),
                Err(err) => {
                    tracing::debug!("word segmenter unavailable, using characters: {err}");
                    Cached::Failed
                }
            };
        }
        match &self.cached {
            Cached::Ready(s) => Some(s.as_ref()),
            _ => None,
        }
    }
}
