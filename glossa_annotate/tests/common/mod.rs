// Copyright 2025 the Glossa Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![allow(dead_code, reason = "not every test binary uses every helper")]

use glossa_annotate::builtin::{LexiconSegmenter, SyllableTable};
use glossa_annotate::{
    Capabilities, Document, Engine, EngineConfig, ManualScheduler, MemoryStore,
    SegmentationMode, Settings,
};

pub(crate) type TestEngine = Engine<ManualScheduler, MemoryStore>;

pub(crate) const READINGS: [(char, &str); 10] = [
    ('我', "wǒ"),
    ('爱', "ài"),
    ('你', "nǐ"),
    ('好', "hǎo"),
    ('中', "zhōng"),
    ('文', "wén"),
    ('学', "xué"),
    ('习', "xí"),
    ('测', "cè"),
    ('试', "shì"),
];

pub(crate) const WORDS: [&str; 5] = ["我爱你", "你好", "中文", "学习", "测试"];

pub(crate) fn capabilities() -> Capabilities {
    Capabilities::none()
        .with_transliterator(SyllableTable::new(READINGS))
        .with_segmenter(LexiconSegmenter::new(WORDS))
}

/// A started, disabled engine in `mode` with the given batch size.
pub(crate) fn engine_with(
    doc: &mut Document,
    mode: SegmentationMode,
    batch_size: usize,
    capabilities: Capabilities,
) -> TestEngine {
    let settings = Settings {
        segmentation_mode: mode,
        auto_detect: false,
        ..Settings::default()
    };
    let config = EngineConfig {
        batch_size,
        ..EngineConfig::default()
    };
    let mut engine = Engine::new(
        capabilities,
        config,
        ManualScheduler::new(),
        MemoryStore::new(settings),
    );
    engine.start(doc);
    engine
}

pub(crate) fn engine(doc: &mut Document, mode: SegmentationMode) -> TestEngine {
    engine_with(doc, mode, glossa_annotate::DEFAULT_BATCH_SIZE, capabilities())
}

/// Service idle callbacks and observer deliveries until nothing is scheduled.
pub(crate) fn drain(engine: &mut TestEngine, doc: &mut Document) {
    engine.on_mutations(doc);
    while engine.scheduler_mut().take_request() {
        engine.on_idle(doc);
        engine.on_mutations(doc);
    }
}

/// A document with one `<p>` per text.
pub(crate) fn paragraphs(texts: &[&str]) -> Document {
    let mut doc = Document::new();
    let root = doc.root();
    for text in texts {
        let p = doc.append_element(root, "p");
        doc.append_text(p, text);
    }
    doc
}
