// Copyright 2025 the Glossa Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Annotate basics.
//!
//! Build a small page, enable annotations, drain the queue one idle turn at a time, then
//! append content and watch the observer pick it up.
//!
//! Run:
//! - `cargo run -p glossa_demos --example annotate_basics`

use glossa_annotate::builtin::{LexiconSegmenter, SyllableTable};
use glossa_annotate::{
    Capabilities, Engine, EngineConfig, ManualScheduler, MemoryStore, Settings,
};
use glossa_doc::Document;

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_target(false)
        .init();

    let mut doc = Document::new();
    let root = doc.root();
    let h1 = doc.append_element(root, "h1");
    doc.append_text(h1, "你好");
    let p = doc.append_element(root, "p");
    doc.append_text(p, "我爱学习中文。");
    let code = doc.append_element(root, "script");
    doc.append_text(code, "const 中文 = true;");

    let capabilities = Capabilities::none()
        .with_transliterator(SyllableTable::new([
            ('你', "nǐ"),
            ('好', "hǎo"),
            ('我', "wǒ"),
            ('爱', "ài"),
            ('学', "xué"),
            ('习', "xí"),
            ('中', "zhōng"),
            ('文', "wén"),
        ]))
        .with_segmenter(LexiconSegmenter::new(["你好", "学习", "中文"]));
    let settings = Settings {
        auto_detect: false,
        site_state: Some(true),
        ..Settings::default()
    };
    let config = EngineConfig {
        batch_size: 1,
        ..EngineConfig::default()
    };
    let mut engine = Engine::new(
        capabilities,
        config,
        ManualScheduler::new(),
        MemoryStore::new(settings),
    );

    engine.start(&mut doc);
    run_idle(&mut engine, &mut doc);
    println!("{}", doc.markup(root));

    // Content added after the first sweep reaches the engine through the observer.
    let late = doc.append_element(root, "p");
    doc.append_text(late, "你好");
    engine.on_mutations(&mut doc);
    run_idle(&mut engine, &mut doc);
    println!("{}", doc.markup(late));
    println!("{:?}", engine.stats());

    engine.revert(&mut doc);
    println!("{}", doc.markup(root));
}

fn run_idle(engine: &mut Engine<ManualScheduler, MemoryStore>, doc: &mut Document) {
    while engine.scheduler_mut().take_request() {
        let rendered = engine.on_idle(doc);
        println!("idle turn rendered {rendered} run(s)");
        engine.on_mutations(doc);
    }
}
