// Copyright 2025 the Glossa Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Small table-driven capabilities.
//!
//! These are not meant to compete with a real pinyin converter or a statistical word
//! segmenter. They give hosts without one something deterministic to plug in, and they are
//! what the tests and demos run against.

use std::collections::HashMap;

use crate::capability::{
    SegmenterFactory, ToneStyle, TransliterationOptions, Transliterator, WordSegment,
    WordSegmenter,
};
use crate::error::{SegmenterError, TransliterationError};
use crate::script::is_target_char;

/// Per-character readings, written with tone marks.
///
/// Output separates syllables with single spaces, the way common converters do; runs of
/// characters without a reading are passed through as one token. A target-script character
/// missing from the table is an error.
#[derive(Clone, Debug, Default)]
pub struct SyllableTable {
    readings: HashMap<char, String>,
}

impl SyllableTable {
    /// Build a table from `(character, marked syllable)` pairs.
    pub fn new<'a>(entries: impl IntoIterator<Item = (char, &'a str)>) -> Self {
        Self {
            readings: entries
                .into_iter()
                .map(|(c, s)| (c, s.to_owned()))
                .collect(),
        }
    }

    /// The reading for `c`, if any.
    pub fn reading(&self, c: char) -> Option<&str> {
        self.readings.get(&c).map(String::as_str)
    }
}

impl Transliterator for SyllableTable {
    fn transliterate(
        &self,
        text: &str,
        options: &TransliterationOptions,
    ) -> Result<String, TransliterationError> {
        let mut tokens: Vec<String> = Vec::new();
        let mut passthrough = String::new();
        for c in text.chars() {
            if let Some(syllable) = self.reading(c) {
                if !passthrough.is_empty() {
                    tokens.push(core::mem::take(&mut passthrough));
                }
                tokens.push(restyle(syllable, options.tone_style));
            } else if is_target_char(c) {
                return Err(TransliterationError::Unsupported(c));
            } else if c.is_whitespace() {
                if !passthrough.is_empty() {
                    tokens.push(core::mem::take(&mut passthrough));
                }
            } else {
                passthrough.push(c);
            }
        }
        if !passthrough.is_empty() {
            tokens.push(passthrough);
        }
        Ok(tokens.join(" "))
    }
}

/// Split a tone-marked vowel into its base vowel and tone number.
fn split_tone(c: char) -> Option<(char, u8)> {
    const MARKED: [(char, [char; 4]); 6] = [
        ('a', ['ā', 'á', 'ǎ', 'à']),
        ('e', ['ē', 'é', 'ě', 'è']),
        ('i', ['ī', 'í', 'ǐ', 'ì']),
        ('o', ['ō', 'ó', 'ǒ', 'ò']),
        ('u', ['ū', 'ú', 'ǔ', 'ù']),
        ('ü', ['ǖ', 'ǘ', 'ǚ', 'ǜ']),
    ];
    MARKED.iter().find_map(|(base, marks)| {
        marks
            .iter()
            .zip(1_u8..)
            .find(|(m, _)| **m == c)
            .map(|(_, tone)| (*base, tone))
    })
}

fn restyle(syllable: &str, style: ToneStyle) -> String {
    if style == ToneStyle::Mark {
        return syllable.to_owned();
    }
    let mut out = String::with_capacity(syllable.len() + 1);
    let mut tone = None;
    for c in syllable.chars() {
        match split_tone(c) {
            Some((base, t)) => {
                out.push(base);
                tone = Some(t);
            }
            None => out.push(c),
        }
    }
    if let (ToneStyle::Number, Some(t)) = (style, tone) {
        out.push(char::from(b'0' + t));
    }
    out
}

/// Greedy longest-match segmentation over a word list.
///
/// Target-script text is cut into the longest lexicon words available, single characters
/// otherwise. Other text is grouped into alphanumeric runs (word-like) and runs of anything
/// else (not word-like). The output always concatenates back to the input.
#[derive(Clone, Debug, Default)]
pub struct LexiconSegmenter {
    words: Vec<Vec<char>>,
}

impl LexiconSegmenter {
    /// Build a segmenter from a word list.
    pub fn new<'a>(words: impl IntoIterator<Item = &'a str>) -> Self {
        let mut words: Vec<Vec<char>> = words
            .into_iter()
            .map(|w| w.chars().collect::<Vec<_>>())
            .filter(|w| !w.is_empty())
            .collect();
        words.sort_by(|a, b| b.len().cmp(&a.len()));
        Self { words }
    }

    fn longest_match(&self, chars: &[char]) -> usize {
        self.words
            .iter()
            .find(|w| chars.starts_with(w))
            .map_or(1, Vec::len)
    }
}

impl WordSegmenter for LexiconSegmenter {
    fn segment(&self, text: &str) -> Result<Vec<WordSegment>, SegmenterError> {
        let chars: Vec<char> = text.chars().collect();
        let mut out = Vec::new();
        let mut i = 0;
        while i < chars.len() {
            let c = chars[i];
            let len = if is_target_char(c) {
                self.longest_match(&chars[i..])
            } else {
                let alnum = c.is_alphanumeric();
                chars[i..]
                    .iter()
                    .take_while(|d| !is_target_char(**d) && d.is_alphanumeric() == alnum)
                    .count()
            };
            let piece: String = chars[i..i + len].iter().collect();
            let word_like = is_target_char(c) || c.is_alphanumeric();
            out.push(WordSegment::new(piece, word_like));
            i += len;
        }
        Ok(out)
    }
}

impl SegmenterFactory for LexiconSegmenter {
    fn create(&self, locale: &str) -> Result<Box<dyn WordSegmenter>, SegmenterError> {
        if locale == "zh" || locale.starts_with("zh-") {
            Ok(Box::new(self.clone()))
        } else {
            Err(SegmenterError::UnsupportedLocale(locale.to_owned()))
        }
    }
}
