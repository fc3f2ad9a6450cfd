// Copyright 2025 the Glossa Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use glossa_annotate::revert::merge_adjacent_text;
use glossa_annotate::traverse::text_runs;
use glossa_doc::Document;

fn gen_nested(depth: usize, fanout: usize) -> (Document, usize) {
    let mut doc = Document::new();
    let mut frontier = vec![doc.root()];
    let mut runs = 0;
    for level in 0..depth {
        let mut next = Vec::with_capacity(frontier.len() * fanout);
        for &parent in &frontier {
            for i in 0..fanout {
                let tag = if (level + i) % 5 == 4 { "textarea" } else { "div" };
                let el = doc.append_element(parent, tag);
                doc.append_text(el, "中文 text");
                runs += 1;
                next.push(el);
            }
        }
        frontier = next;
    }
    (doc, runs)
}

fn bench_text_runs(c: &mut Criterion) {
    let mut group = c.benchmark_group("text_runs");
    for &(depth, fanout) in &[(4_usize, 4_usize), (6, 4), (3, 20)] {
        let (doc, runs) = gen_nested(depth, fanout);
        group.throughput(Throughput::Elements(runs as u64));
        group.bench_function(format!("d{depth}_f{fanout}"), |b| {
            b.iter(|| black_box(text_runs(&doc, doc.root()).count()));
        });
    }
    group.finish();
}

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge_adjacent_text");
    for &n in &[100_usize, 1_000] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("fragments_n{n}"), |b| {
            b.iter_batched(
                || {
                    let mut doc = Document::new();
                    let root = doc.root();
                    let p = doc.append_element(root, "p");
                    for _ in 0..n {
                        doc.append_text(p, "字");
                    }
                    doc
                },
                |mut doc| {
                    let root = doc.root();
                    merge_adjacent_text(&mut doc, root);
                    black_box(doc)
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_text_runs, bench_merge);
criterion_main!(benches);
