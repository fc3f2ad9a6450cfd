// Copyright 2025 the Glossa Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The engine controller: lifecycle, configuration updates and host callbacks.
//!
//! ## Host contract
//!
//! The host owns the [`Document`] and passes it into every call. It must:
//!
//! - call [`Engine::on_idle`] once for every [`IdleScheduler::request_idle`] it received,
//! - call [`Engine::on_mutations`] whenever it would deliver observer callbacks (after its
//!   own tree changes, typically at the end of each task),
//! - forward configuration [`Message`]s to [`Engine::handle_message`],
//! - fire [`Engine::run_auto_detect`] once, some time after [`Engine::start`], if
//!   [`Engine::auto_detect`] reports [`AutoDetect::Pending`].

use glossa_doc::{Document, NodeId, ObserverId};
use glossa_lookup::{Anchor, DictionaryClient, LookupOutcome, Popup, Tooltip, Transport};

use crate::capability::{Capabilities, ToneStyle, TransliterationOptions};
use crate::feedback;
use crate::queue::{DEFAULT_BATCH_SIZE, IdleScheduler, WorkQueue};
use crate::render::Renderer;
use crate::revert;
use crate::script::looks_like_target_page;
use crate::segment::{SegmentationAdapter, SegmentationMode};
use crate::selection::lookup_term;
use crate::settings::{Message, Settings, SettingsStore};
use crate::traverse::{is_eligible, text_runs, visible_text};

/// Class on the root while annotations are shown.
pub const VISIBLE_CLASS: &str = "glossa-visible";

/// Engine tuning.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Runs processed per idle callback.
    pub batch_size: usize,
    /// Locale passed to the segmenter factory.
    pub locale: String,
    /// Tone rendering for transcriptions.
    pub tone_style: ToneStyle,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            locale: String::from("zh"),
            tone_style: ToneStyle::Mark,
        }
    }
}

/// Observable lifecycle phase.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Not annotating; no observer is connected.
    Disabled,
    /// Annotating and observing.
    Enabled,
}

/// State of the one-shot auto-activation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum AutoDetect {
    /// Nothing armed.
    #[default]
    Idle,
    /// The host should fire [`Engine::run_auto_detect`] after its delay.
    Pending,
}

/// Engine-wide mutable state.
#[derive(Debug)]
pub struct EngineState {
    enabled: bool,
    has_processed_once: bool,
    mode: SegmentationMode,
    queue: WorkQueue,
    observer: Option<ObserverId>,
    stale_mode: bool,
}

impl EngineState {
    fn new(mode: SegmentationMode, batch_size: usize) -> Self {
        Self {
            enabled: false,
            has_processed_once: false,
            mode,
            queue: WorkQueue::new(batch_size),
            observer: None,
            stale_mode: false,
        }
    }

    /// Returns true while enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns true once the whole root has been swept; reset by reversion.
    pub fn has_processed_once(&self) -> bool {
        self.has_processed_once
    }

    /// Active segmentation mode.
    pub fn mode(&self) -> SegmentationMode {
        self.mode
    }

    /// Pending work.
    pub fn queue(&self) -> &WorkQueue {
        &self.queue
    }

    /// The observer handle; present exactly while enabled.
    pub fn observer(&self) -> Option<ObserverId> {
        self.observer
    }
}

/// Counters, mostly for tests and diagnostics.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct EngineStats {
    /// Runs ever enqueued.
    pub enqueued: usize,
    /// Runs replaced by annotation structure.
    pub rendered: usize,
    /// Dequeued runs that were no longer eligible.
    pub skipped: usize,
    /// Idle turns that processed a batch.
    pub turns: usize,
}

/// A dictionary lookup whose loading popup is showing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingLookup {
    /// The normalized term to look up.
    pub term: String,
    ticket: u64,
}

/// The incremental annotation engine.
#[derive(Debug)]
pub struct Engine<S, St> {
    state: EngineState,
    settings: Settings,
    capabilities: Capabilities,
    adapter: SegmentationAdapter,
    config: EngineConfig,
    scheduler: S,
    store: St,
    tooltip: Tooltip,
    auto_detect: AutoDetect,
    stats: EngineStats,
}

impl<S: IdleScheduler, St: SettingsStore> Engine<S, St> {
    /// Create a disabled engine with default settings. Call [`start`](Self::start) to
    /// apply stored settings.
    pub fn new(capabilities: Capabilities, config: EngineConfig, scheduler: S, store: St) -> Self {
        let settings = Settings::default();
        let mode = settings.segmentation_mode;
        Self {
            state: EngineState::new(mode, config.batch_size),
            adapter: SegmentationAdapter::new(mode, config.locale.clone()),
            settings,
            capabilities,
            config,
            scheduler,
            store,
            tooltip: Tooltip::new(),
            auto_detect: AutoDetect::Idle,
            stats: EngineStats::default(),
        }
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        if self.state.enabled {
            Phase::Enabled
        } else {
            Phase::Disabled
        }
    }

    /// Engine state.
    pub fn state(&self) -> &EngineState {
        &self.state
    }

    /// Settings in effect.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Counters.
    pub fn stats(&self) -> EngineStats {
        self.stats
    }

    /// Auto-activation state.
    pub fn auto_detect(&self) -> AutoDetect {
        self.auto_detect
    }

    /// The scheduler.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// The scheduler, mutably (hosts polling a [`ManualScheduler`](crate::ManualScheduler)
    /// need this).
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// The settings store.
    pub fn store(&self) -> &St {
        &self.store
    }

    /// The dictionary tooltip.
    pub fn tooltip(&self) -> &Tooltip {
        &self.tooltip
    }

    /// The dictionary tooltip, mutably (for click handling).
    pub fn tooltip_mut(&mut self) -> &mut Tooltip {
        &mut self.tooltip
    }

    /// Load stored settings and enter the initial phase.
    ///
    /// With the master switch off nothing happens. With auto-detect on, auto-activation is
    /// armed and takes precedence over the stored site state. Otherwise a stored `true`
    /// enables; anything else stays disabled.
    pub fn start(&mut self, doc: &mut Document) {
        self.settings = match self.store.load() {
            Ok(settings) => settings,
            Err(err) => {
                tracing::warn!("failed to load settings, using defaults: {err}");
                Settings::default()
            }
        };
        let mode = self.settings.segmentation_mode;
        self.state.mode = mode;
        self.adapter.set_mode(mode);
        if !self.settings.master_enabled {
            return;
        }
        if self.settings.auto_detect {
            self.auto_detect = AutoDetect::Pending;
            return;
        }
        match self.settings.site_state {
            Some(true) => self.enable(doc),
            Some(false) => self.disable(doc),
            None => {}
        }
    }

    /// Show annotations. Idempotent.
    ///
    /// The whole root is swept only the first time (or after a reversion); later enables
    /// just reconnect the observer.
    pub fn enable(&mut self, doc: &mut Document) {
        if self.state.enabled {
            return;
        }
        let root = doc.root();
        self.state.enabled = true;
        doc.add_class(root, VISIBLE_CLASS);
        self.update_mode_class(doc);
        if self.state.stale_mode {
            self.state.stale_mode = false;
            if self.state.has_processed_once {
                self.revert(doc);
            }
        }
        if !self.state.has_processed_once {
            self.sweep(doc, root);
            self.state.has_processed_once = true;
        }
        self.state.observer = Some(doc.observe(root));
        tracing::info!(mode = ?self.state.mode, "annotations enabled");
    }

    /// Hide annotations. Idempotent.
    ///
    /// Disconnects the observer, drops pending work, closes the tooltip and removes the root
    /// classes. Rendered annotations stay in the tree.
    pub fn disable(&mut self, doc: &mut Document) {
        let root = doc.root();
        doc.remove_class(root, VISIBLE_CLASS);
        doc.remove_class(root, SegmentationMode::Word.class_name());
        doc.remove_class(root, SegmentationMode::Character.class_name());
        if let Some(observer) = self.state.observer.take() {
            doc.disconnect(observer);
        }
        self.state.queue.clear();
        self.tooltip.remove();
        if self.state.enabled {
            self.state.enabled = false;
            tracing::info!("annotations disabled");
        }
    }

    /// Change the segmentation mode.
    ///
    /// While enabled this reverts and re-sweeps the whole root. While disabled it only
    /// records the mode; existing annotations are redone on the next enable.
    pub fn set_mode(&mut self, doc: &mut Document, mode: SegmentationMode) {
        if self.state.mode == mode {
            return;
        }
        self.state.mode = mode;
        self.settings.segmentation_mode = mode;
        self.adapter.set_mode(mode);
        tracing::info!(?mode, "segmentation mode changed");
        if self.state.enabled {
            self.update_mode_class(doc);
            self.reapply(doc);
        } else if self.state.has_processed_once {
            self.state.stale_mode = true;
        }
    }

    /// Revert all annotations and sweep the root again under the current mode.
    ///
    /// While disabled this only reverts; the next enable sweeps.
    pub fn reapply(&mut self, doc: &mut Document) {
        self.revert(doc);
        if !self.state.enabled {
            return;
        }
        let root = doc.root();
        self.sweep(doc, root);
        self.state.has_processed_once = true;
    }

    /// Remove all annotations, restoring and merging the original text.
    ///
    /// Clears pending work, the cached segmenter and the processed-once flag. Mutation
    /// records produced by the reversion itself are discarded.
    pub fn revert(&mut self, doc: &mut Document) {
        let root = doc.root();
        let units = revert::revert(doc, root);
        if let Some(observer) = self.state.observer {
            doc.take_records(observer);
        }
        self.state.queue.clear();
        self.state.has_processed_once = false;
        self.adapter.invalidate();
        tracing::debug!(units, "annotations reverted");
    }

    /// Idle callback: annotate at most one batch. Returns the number of runs rendered.
    pub fn on_idle(&mut self, doc: &mut Document) -> usize {
        if !self.state.enabled {
            self.state.queue.release_turn();
            return 0;
        }
        let batch = self.state.queue.begin_turn();
        if batch.is_empty() {
            return 0;
        }
        self.stats.turns += 1;
        let options = TransliterationOptions {
            tone_style: self.config.tone_style,
        };
        let renderer = Renderer::new(self.capabilities.transliterator.as_deref(), options);
        let mut rendered = 0;
        for run in batch {
            if !is_eligible(doc, run) {
                tracing::debug!(?run, "skipping run that is gone or no longer eligible");
                self.stats.skipped += 1;
                continue;
            }
            let Some(text) = doc.text(run).map(str::to_owned) else {
                continue;
            };
            let segments = self
                .adapter
                .segment(&text, self.capabilities.segmenter.as_deref());
            if renderer.render_run(doc, run, &segments).is_some() {
                rendered += 1;
            }
        }
        self.stats.rendered += rendered;
        self.state.queue.finish_turn(&mut self.scheduler);
        tracing::trace!(rendered, remaining = self.state.queue.len(), "batch drained");
        rendered
    }

    /// Observer callback: pull pending records and enqueue newly eligible runs.
    ///
    /// Returns the number of runs enqueued.
    pub fn on_mutations(&mut self, doc: &mut Document) -> usize {
        let Some(observer) = self.state.observer else {
            return 0;
        };
        let records = doc.take_records(observer);
        if records.is_empty() {
            return 0;
        }
        let runs = feedback::collect(doc, &records);
        self.enqueue(runs)
    }

    /// Apply a live configuration update.
    pub fn handle_message(&mut self, doc: &mut Document, message: Message) {
        match message {
            Message::TogglePinyin => {
                if self.state.enabled {
                    self.disable(doc);
                    self.persist_site_state(false);
                } else {
                    self.enable(doc);
                    self.persist_site_state(true);
                }
            }
            Message::SetSegmentation(word) => {
                let mode = if word {
                    SegmentationMode::Word
                } else {
                    SegmentationMode::Character
                };
                if mode != self.state.mode {
                    self.set_mode(doc, mode);
                    self.persist_flags();
                }
            }
            Message::SetDictionaryEnabled(enabled) => {
                self.settings.dictionary_enabled = enabled;
                self.persist_flags();
            }
            Message::SetMasterEnabled(enabled) => {
                self.settings.master_enabled = enabled;
                self.persist_flags();
                if enabled {
                    self.restore_after_master_on(doc);
                } else {
                    self.auto_detect = AutoDetect::Idle;
                    self.disable(doc);
                }
            }
        }
    }

    /// Fire the armed auto-activation. Returns true if it enabled the engine.
    ///
    /// Target-script pages get word mode, the dictionary and annotations, and the choice is
    /// persisted for the site.
    pub fn run_auto_detect(&mut self, doc: &mut Document) -> bool {
        if core::mem::take(&mut self.auto_detect) != AutoDetect::Pending {
            return false;
        }
        if !self.settings.master_enabled || !self.settings.auto_detect {
            return false;
        }
        if !looks_like_target_page(&visible_text(doc, doc.root())) {
            tracing::debug!("auto-detect: page does not look like target-script content");
            return false;
        }
        self.settings.dictionary_enabled = true;
        self.set_mode(doc, SegmentationMode::Word);
        self.enable(doc);
        self.persist_site_state(true);
        self.persist_flags();
        tracing::info!("auto-detect enabled annotations");
        true
    }

    /// Start a dictionary lookup for a raw selection: normalize it and show the loading
    /// popup under `anchor`.
    ///
    /// Returns `None` when the dictionary (or everything) is switched off, or when the
    /// selection does not yield a term.
    pub fn begin_lookup(
        &mut self,
        raw: &str,
        anchor: &Anchor,
        background: &str,
    ) -> Option<PendingLookup> {
        if !self.settings.master_enabled || !self.settings.dictionary_enabled {
            return None;
        }
        let term = lookup_term(raw)?;
        let popup = Popup::loading(&term).themed_for(background).placed(anchor);
        let ticket = self.tooltip.show(popup);
        Some(PendingLookup { term, ticket })
    }

    /// Replace the loading popup with the lookup result.
    ///
    /// Returns false if the popup was closed or replaced in the meantime.
    pub fn finish_lookup(&mut self, pending: PendingLookup, outcome: &LookupOutcome) -> bool {
        self.tooltip
            .update(pending.ticket, Popup::for_outcome(&pending.term, outcome))
    }

    /// [`begin_lookup`](Self::begin_lookup), a blocking lookup, then
    /// [`finish_lookup`](Self::finish_lookup).
    pub fn handle_selection<T: Transport>(
        &mut self,
        raw: &str,
        anchor: &Anchor,
        background: &str,
        client: &DictionaryClient<T>,
    ) -> Option<LookupOutcome> {
        let pending = self.begin_lookup(raw, anchor, background)?;
        let outcome = client.lookup(&pending.term);
        self.finish_lookup(pending, &outcome);
        Some(outcome)
    }

    fn restore_after_master_on(&mut self, doc: &mut Document) {
        let site_state = match self.store.load() {
            Ok(stored) => stored.site_state,
            Err(err) => {
                tracing::warn!("failed to reload site state: {err}");
                self.settings.site_state
            }
        };
        match site_state {
            Some(true) => self.enable(doc),
            Some(false) => {}
            None if self.settings.auto_detect => self.auto_detect = AutoDetect::Pending,
            None => {}
        }
    }

    fn sweep(&mut self, doc: &Document, root: NodeId) {
        let runs: Vec<NodeId> = text_runs(doc, root).collect();
        let n = self.enqueue(runs);
        tracing::debug!(runs = n, "swept subtree");
    }

    fn enqueue(&mut self, runs: Vec<NodeId>) -> usize {
        let n = self.state.queue.enqueue(runs, &mut self.scheduler);
        self.stats.enqueued += n;
        n
    }

    fn update_mode_class(&self, doc: &mut Document) {
        let root = doc.root();
        doc.remove_class(root, SegmentationMode::Word.class_name());
        doc.remove_class(root, SegmentationMode::Character.class_name());
        doc.add_class(root, self.state.mode.class_name());
    }

    fn persist_site_state(&mut self, enabled: bool) {
        self.settings.site_state = Some(enabled);
        if let Err(err) = self.store.save_site_state(enabled) {
            tracing::warn!("failed to persist site state: {err}");
        }
    }

    fn persist_flags(&mut self) {
        if let Err(err) = self.store.save_flags(&self.settings) {
            tracing::warn!("failed to persist settings: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue::ManualScheduler;
    use crate::settings::MemoryStore;

    type TestEngine = Engine<ManualScheduler, MemoryStore>;

    fn engine_with(settings: Settings) -> TestEngine {
        Engine::new(
            Capabilities::none(),
            EngineConfig::default(),
            ManualScheduler::new(),
            MemoryStore::new(settings),
        )
    }

    fn page(text: &str) -> Document {
        let mut doc = Document::new();
        let root = doc.root();
        let p = doc.append_element(root, "p");
        doc.append_text(p, text);
        doc
    }

    fn drain(engine: &mut TestEngine, doc: &mut Document) {
        while engine.scheduler_mut().take_request() {
            engine.on_idle(doc);
            engine.on_mutations(doc);
        }
    }

    #[test]
    fn enable_sets_classes_and_observer() {
        let mut doc = page("中文");
        let mut engine = engine_with(Settings::default());
        engine.enable(&mut doc);
        let root = doc.root();
        assert_eq!(engine.phase(), Phase::Enabled);
        assert!(doc.has_class(root, VISIBLE_CLASS));
        assert!(doc.has_class(root, "glossa-word-mode"));
        assert!(engine.state().observer().is_some());
        assert_eq!(engine.state().queue().len(), 1);

        engine.disable(&mut doc);
        assert_eq!(engine.phase(), Phase::Disabled);
        assert!(!doc.has_class(root, VISIBLE_CLASS));
        assert!(!doc.has_class(root, "glossa-word-mode"));
        assert!(engine.state().observer().is_none());
        assert!(engine.state().queue().is_empty());
    }

    #[test]
    fn disable_cancels_pending_batches() {
        let mut doc = page("中文");
        let mut engine = engine_with(Settings::default());
        engine.enable(&mut doc);
        engine.disable(&mut doc);
        drain(&mut engine, &mut doc);
        assert_eq!(engine.stats().rendered, 0);
        assert_eq!(doc.markup(doc.root()), "<body><p>中文</p></body>");
    }

    #[test]
    fn re_enable_does_not_rewalk() {
        let mut doc = page("中文");
        let mut engine = engine_with(Settings::default());
        engine.enable(&mut doc);
        drain(&mut engine, &mut doc);
        engine.disable(&mut doc);
        engine.enable(&mut doc);
        assert!(engine.state().queue().is_empty());
        assert_eq!(engine.stats().enqueued, 1);
    }

    #[test]
    fn start_obeys_master_and_site_state() {
        let mut doc = page("中文");
        let mut off = engine_with(Settings {
            master_enabled: false,
            site_state: Some(true),
            ..Settings::default()
        });
        off.start(&mut doc);
        assert_eq!(off.phase(), Phase::Disabled);
        assert_eq!(off.auto_detect(), AutoDetect::Idle);

        let mut stored = engine_with(Settings {
            auto_detect: false,
            site_state: Some(true),
            ..Settings::default()
        });
        stored.start(&mut doc);
        assert_eq!(stored.phase(), Phase::Enabled);

        let mut armed = engine_with(Settings {
            site_state: Some(false),
            ..Settings::default()
        });
        armed.start(&mut doc);
        assert_eq!(armed.phase(), Phase::Disabled);
        assert_eq!(armed.auto_detect(), AutoDetect::Pending);
    }

    #[test]
    fn auto_detect_needs_target_page() {
        let mut doc = page("just some latin text on this page");
        let mut engine = engine_with(Settings::default());
        engine.start(&mut doc);
        assert!(!engine.run_auto_detect(&mut doc));
        assert_eq!(engine.auto_detect(), AutoDetect::Idle);
        assert!(!engine.run_auto_detect(&mut doc), "fires once");
    }

    #[test]
    fn auto_detect_ignores_script_text() {
        let mut doc = Document::new();
        let root = doc.root();
        let script = doc.append_element(root, "script");
        doc.append_text(script, "var s = '我们今天学习中文，明天继续学习。';");
        let p = doc.append_element(root, "p");
        doc.append_text(p, "An English page.");
        let mut engine = engine_with(Settings::default());
        engine.start(&mut doc);
        assert!(!engine.run_auto_detect(&mut doc));
        assert_eq!(engine.phase(), Phase::Disabled);
    }

    #[test]
    fn auto_detect_forces_word_mode_and_dictionary() {
        let mut doc = page("我们今天学习中文，明天继续学习。");
        let mut engine = engine_with(Settings {
            segmentation_mode: SegmentationMode::Character,
            dictionary_enabled: false,
            ..Settings::default()
        });
        engine.start(&mut doc);
        assert!(engine.run_auto_detect(&mut doc));
        assert_eq!(engine.phase(), Phase::Enabled);
        assert_eq!(engine.state().mode(), SegmentationMode::Word);
        let stored = engine.store().settings();
        assert_eq!(stored.site_state, Some(true));
        assert!(stored.dictionary_enabled);
        assert_eq!(stored.segmentation_mode, SegmentationMode::Word);
    }

    #[test]
    fn toggle_persists_site_state() {
        let mut doc = page("中文");
        let mut engine = engine_with(Settings::default());
        engine.handle_message(&mut doc, Message::TogglePinyin);
        assert_eq!(engine.phase(), Phase::Enabled);
        assert_eq!(engine.store().settings().site_state, Some(true));
        engine.handle_message(&mut doc, Message::TogglePinyin);
        assert_eq!(engine.phase(), Phase::Disabled);
        assert_eq!(engine.store().settings().site_state, Some(false));
    }

    #[test]
    fn master_switch_restores_stored_state() {
        let mut doc = page("中文");
        let mut engine = engine_with(Settings {
            auto_detect: false,
            site_state: Some(true),
            ..Settings::default()
        });
        engine.start(&mut doc);
        engine.handle_message(&mut doc, Message::SetMasterEnabled(false));
        assert_eq!(engine.phase(), Phase::Disabled);
        assert_eq!(engine.store().settings().site_state, Some(true));
        assert!(!engine.store().settings().master_enabled);
        engine.handle_message(&mut doc, Message::SetMasterEnabled(true));
        assert_eq!(engine.phase(), Phase::Enabled);
    }

    #[test]
    fn master_on_without_site_state_arms_auto_detect() {
        let mut doc = page("中文");
        let mut engine = engine_with(Settings {
            master_enabled: false,
            ..Settings::default()
        });
        engine.start(&mut doc);
        engine.handle_message(&mut doc, Message::SetMasterEnabled(true));
        assert_eq!(engine.auto_detect(), AutoDetect::Pending);
        assert_eq!(engine.phase(), Phase::Disabled);
    }

    #[test]
    fn mode_change_while_disabled_only_records() {
        let mut doc = page("中文");
        let mut engine = engine_with(Settings::default());
        engine.handle_message(&mut doc, Message::SetSegmentation(false));
        assert_eq!(engine.state().mode(), SegmentationMode::Character);
        assert!(!doc.has_class(doc.root(), "glossa-char-mode"));
        assert_eq!(
            engine.store().settings().segmentation_mode,
            SegmentationMode::Character
        );
        assert_eq!(engine.scheduler().total_requests(), 0);
    }

    #[test]
    fn dictionary_respects_flags() {
        let mut engine = engine_with(Settings::default());
        let mut doc = page("中文");
        let anchor = Anchor {
            selection: kurbo::Rect::new(0.0, 0.0, 10.0, 10.0),
            scroll: kurbo::Vec2::ZERO,
            viewport_width: 800.0,
        };
        assert!(engine.begin_lookup("hello", &anchor, "").is_none());
        let pending = engine.begin_lookup(" 中文。", &anchor, "rgb(0,0,0)").unwrap();
        assert_eq!(pending.term, "中文");
        assert!(engine.tooltip().current().is_some_and(|p| p.dark));

        engine.handle_message(&mut doc, Message::SetDictionaryEnabled(false));
        assert!(engine.begin_lookup("中文", &anchor, "").is_none());

        assert!(engine.finish_lookup(pending, &LookupOutcome::NotFound));
        engine.enable(&mut doc);
        engine.disable(&mut doc);
        assert!(!engine.tooltip().is_visible());
    }
}
