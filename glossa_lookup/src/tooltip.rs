// Copyright 2025 the Glossa Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The single on-screen tooltip slot.

use kurbo::{Point, Rect};

use crate::popup::{MAX_WIDTH, Popup};

/// Holds at most one visible popup. Showing a new one replaces the old.
#[derive(Clone, Debug, Default)]
pub struct Tooltip {
    current: Option<Popup>,
    generation: u64,
}

impl Tooltip {
    /// An empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `popup`, replacing any visible one. Returns a ticket for [`Tooltip::update`].
    pub fn show(&mut self, popup: Popup) -> u64 {
        self.generation += 1;
        self.current = Some(popup);
        self.generation
    }

    /// Replace the content of the popup opened with `ticket`, keeping its position and theme.
    ///
    /// Returns false (and does nothing) if that popup was closed or replaced meanwhile.
    pub fn update(&mut self, ticket: u64, mut popup: Popup) -> bool {
        if ticket != self.generation {
            return false;
        }
        let Some(current) = self.current.as_mut() else {
            return false;
        };
        popup.origin = current.origin;
        popup.dark = current.dark;
        *current = popup;
        true
    }

    /// Remove the visible popup, if any.
    pub fn remove(&mut self) -> Option<Popup> {
        self.current.take()
    }

    /// The visible popup.
    pub fn current(&self) -> Option<&Popup> {
        self.current.as_ref()
    }

    /// Returns true if a popup is showing.
    pub fn is_visible(&self) -> bool {
        self.current.is_some()
    }

    /// Handle a click at `point` in page coordinates; clicks outside close the popup.
    ///
    /// `height` is the rendered popup height, which only the host knows.
    pub fn click(&mut self, point: Point, height: f64) {
        let Some(popup) = &self.current else {
            return;
        };
        let bounds = Rect::from_origin_size(popup.origin, (MAX_WIDTH, height));
        if !bounds.contains(point) {
            self.current = None;
        }
    }
}
