// Copyright 2025 the Glossa Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Switching segmentation modes through configuration messages.
//!
//! Run:
//! - `cargo run -p glossa_demos --example mode_switch`

use glossa_annotate::builtin::{LexiconSegmenter, SyllableTable};
use glossa_annotate::{
    Capabilities, Engine, EngineConfig, ManualScheduler, MemoryStore, Message, Settings,
};
use glossa_doc::Document;

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .init();

    let mut doc = Document::new();
    let root = doc.root();
    let p = doc.append_element(root, "p");
    doc.append_text(p, "中文学习");

    let capabilities = Capabilities::none()
        .with_transliterator(SyllableTable::new([
            ('中', "zhōng"),
            ('文', "wén"),
            ('学', "xué"),
            ('习', "xí"),
        ]))
        .with_segmenter(LexiconSegmenter::new(["中文", "学习"]));
    let settings = Settings {
        auto_detect: false,
        ..Settings::default()
    };
    let mut engine = Engine::new(
        capabilities,
        EngineConfig::default(),
        ManualScheduler::new(),
        MemoryStore::new(settings),
    );
    engine.start(&mut doc);

    engine.handle_message(&mut doc, Message::TogglePinyin);
    drain(&mut engine, &mut doc);
    println!("word:      {}", doc.markup(p));

    engine.handle_message(&mut doc, Message::SetSegmentation(false));
    drain(&mut engine, &mut doc);
    println!("character: {}", doc.markup(p));

    // Mode changes while hidden are applied on the next toggle.
    engine.handle_message(&mut doc, Message::TogglePinyin);
    engine.handle_message(&mut doc, Message::SetSegmentation(true));
    println!("hidden:    {}", doc.markup(p));
    engine.handle_message(&mut doc, Message::TogglePinyin);
    drain(&mut engine, &mut doc);
    println!("word:      {}", doc.markup(p));

    println!("stored:    {:?}", engine.store().settings());
}

fn drain(engine: &mut Engine<ManualScheduler, MemoryStore>, doc: &mut Document) {
    while engine.scheduler_mut().take_request() {
        engine.on_idle(doc);
        engine.on_mutations(doc);
    }
}
