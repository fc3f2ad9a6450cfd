// Copyright 2025 the Glossa Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Target-script matching.

use core::ops::RangeInclusive;

/// Codepoints treated as annotatable (CJK Unified Ideographs).
pub const TARGET_RANGE: RangeInclusive<char> = '\u{4e00}'..='\u{9fff}';

/// Narrower range used by the page-language heuristic.
const DETECT_RANGE: RangeInclusive<char> = '\u{4e00}'..='\u{9fa5}';
/// Number of leading characters sampled by [`looks_like_target_page`].
pub const DETECT_SAMPLE_CHARS: usize = 1000;
/// A page needs strictly more than this many target characters in its sample.
pub const DETECT_MIN_CHARS: usize = 10;

/// Returns true if `c` belongs to the target script.
pub fn is_target_char(c: char) -> bool {
    TARGET_RANGE.contains(&c)
}

/// Returns true if `text` contains at least one target-script character.
pub fn contains_target_script(text: &str) -> bool {
    text.chars().any(is_target_char)
}

/// Maximal contiguous runs of target-script characters, in order.
pub fn extract_target_runs(text: &str) -> Vec<&str> {
    let mut runs = Vec::new();
    let mut start = None;
    for (i, c) in text.char_indices() {
        match (is_target_char(c), start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                runs.push(&text[s..i]);
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        runs.push(&text[s..]);
    }
    runs
}

/// Heuristic used by auto-activation: does this page text read as target-script content?
pub fn looks_like_target_page(text: &str) -> bool {
    text.chars()
        .take(DETECT_SAMPLE_CHARS)
        .filter(|c| DETECT_RANGE.contains(c))
        .count()
        > DETECT_MIN_CHARS
}
