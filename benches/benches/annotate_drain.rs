// Copyright 2025 the Glossa Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use glossa_annotate::builtin::{LexiconSegmenter, SyllableTable};
use glossa_annotate::{
    Capabilities, Engine, EngineConfig, ManualScheduler, MemoryStore, SegmentationMode, Settings,
};
use glossa_doc::Document;

const READINGS: [(char, &str); 8] = [
    ('我', "wǒ"),
    ('爱', "ài"),
    ('你', "nǐ"),
    ('好', "hǎo"),
    ('中', "zhōng"),
    ('文', "wén"),
    ('学', "xué"),
    ('习', "xí"),
];

const SENTENCES: [&str; 4] = [
    "我爱你，你好！",
    "学习中文 in 2025.",
    "你好中文学习",
    "plain latin text only",
];

fn gen_page(paragraphs: usize) -> Document {
    let mut doc = Document::new();
    let root = doc.root();
    for i in 0..paragraphs {
        let p = doc.append_element(root, "p");
        doc.append_text(p, SENTENCES[i % SENTENCES.len()]);
        if i % 7 == 0 {
            let script = doc.append_element(p, "script");
            doc.append_text(script, "var 中文 = 1;");
        }
    }
    doc
}

fn new_engine(mode: SegmentationMode) -> Engine<ManualScheduler, MemoryStore> {
    let capabilities = Capabilities::none()
        .with_transliterator(SyllableTable::new(READINGS))
        .with_segmenter(LexiconSegmenter::new(["我爱你", "你好", "中文", "学习"]));
    let settings = Settings {
        segmentation_mode: mode,
        auto_detect: false,
        ..Settings::default()
    };
    Engine::new(
        capabilities,
        EngineConfig::default(),
        ManualScheduler::new(),
        MemoryStore::new(settings),
    )
}

fn drain(engine: &mut Engine<ManualScheduler, MemoryStore>, doc: &mut Document) -> usize {
    let mut rendered = 0;
    while engine.scheduler_mut().take_request() {
        rendered += engine.on_idle(doc);
        engine.on_mutations(doc);
    }
    rendered
}

fn bench_enable_drain(c: &mut Criterion) {
    let mut group = c.benchmark_group("enable_drain");
    for &n in &[100_usize, 1_000, 5_000] {
        group.throughput(Throughput::Elements(n as u64));
        for mode in [SegmentationMode::Word, SegmentationMode::Character] {
            group.bench_function(format!("{mode:?}_p{n}"), |b| {
                b.iter_batched(
                    || (gen_page(n), new_engine(mode)),
                    |(mut doc, mut engine)| {
                        engine.start(&mut doc);
                        engine.enable(&mut doc);
                        black_box(drain(&mut engine, &mut doc))
                    },
                    BatchSize::SmallInput,
                );
            });
        }
    }
    group.finish();
}

fn bench_mode_switch(c: &mut Criterion) {
    let mut group = c.benchmark_group("mode_switch");
    let n = 1_000_usize;
    group.throughput(Throughput::Elements(n as u64));
    group.bench_function(format!("word_to_character_p{n}"), |b| {
        b.iter_batched(
            || {
                let mut doc = gen_page(n);
                let mut engine = new_engine(SegmentationMode::Word);
                engine.start(&mut doc);
                engine.enable(&mut doc);
                drain(&mut engine, &mut doc);
                (doc, engine)
            },
            |(mut doc, mut engine)| {
                engine.set_mode(&mut doc, SegmentationMode::Character);
                black_box(drain(&mut engine, &mut doc))
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(benches, bench_enable_drain, bench_mode_switch);
criterion_main!(benches);
