// Copyright 2025 the Glossa Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end behavior of the annotation engine over a live document.

mod common;

use common::{capabilities, drain, engine, engine_with, paragraphs};
use glossa_annotate::builtin::SyllableTable;
use glossa_annotate::traverse::text_runs;
use glossa_annotate::{
    Capabilities, Document, SegmentationMode, TransliterationError, TransliterationOptions,
    Transliterator,
};
use glossa_doc::NodeFlags;

#[test]
fn word_mode_collapses_transcription() {
    let mut doc = paragraphs(&["我爱你"]);
    let mut engine = engine(&mut doc, SegmentationMode::Word);
    engine.enable(&mut doc);
    drain(&mut engine, &mut doc);
    let p = doc.children(doc.root())[0];
    assert_eq!(
        doc.markup(p),
        "<p><ruby class=\"glossa-word\" data-segment=\"我爱你\">我爱你<rt class=\"is-sans\">wǒàinǐ</rt></ruby></p>"
    );
}

#[test]
fn character_mode_keeps_single_syllable_spacing() {
    let table = SyllableTable::new(common::READINGS);
    let padded = move |text: &str,
                       options: &TransliterationOptions|
          -> Result<String, TransliterationError> {
        Ok(format!("{} ", table.transliterate(text, options)?))
    };
    let mut doc = paragraphs(&["我爱你"]);
    let caps = Capabilities::none().with_transliterator(padded);
    let mut engine = engine_with(&mut doc, SegmentationMode::Character, 50, caps);
    engine.enable(&mut doc);
    drain(&mut engine, &mut doc);
    let p = doc.children(doc.root())[0];
    let units = doc.children(p).to_vec();
    assert_eq!(units.len(), 3);
    let transcriptions: Vec<String> = units
        .iter()
        .map(|&u| doc.text_content(doc.children(u)[1]))
        .collect();
    assert_eq!(transcriptions, ["wǒ ", "ài ", "nǐ "]);
    let originals: Vec<_> = units
        .iter()
        .map(|&u| doc.attribute(u, "data-segment").unwrap().to_owned())
        .collect();
    assert_eq!(originals, ["我", "爱", "你"]);
}

#[test]
fn enable_twice_equals_enable_once() {
    let texts = ["你好，世界", "学习中文", "plain"];
    let mut once = paragraphs(&texts);
    let mut e1 = engine(&mut once, SegmentationMode::Word);
    e1.enable(&mut once);
    drain(&mut e1, &mut once);

    let mut twice = paragraphs(&texts);
    let mut e2 = engine(&mut twice, SegmentationMode::Word);
    e2.enable(&mut twice);
    e2.enable(&mut twice);
    drain(&mut e2, &mut twice);
    e2.enable(&mut twice);
    drain(&mut e2, &mut twice);

    assert_eq!(once.markup(once.root()), twice.markup(twice.root()));
    assert_eq!(e1.stats(), e2.stats());
}

#[test]
fn own_insertions_are_never_enqueued() {
    let texts = ["我爱你", "中文 and 测试", "nothing here", "学习"];
    let mut doc = paragraphs(&texts);
    let eligible = text_runs(&doc, doc.root()).count();
    let mut engine = engine(&mut doc, SegmentationMode::Character);
    engine.enable(&mut doc);
    drain(&mut engine, &mut doc);
    let stats = engine.stats();
    assert_eq!(stats.enqueued, eligible);
    assert_eq!(stats.rendered, eligible);
    assert_eq!(stats.skipped, 0);
    assert_eq!(text_runs(&doc, doc.root()).count(), 0);
}

#[test]
fn excluded_containers_are_not_annotated() {
    let mut doc = Document::new();
    let root = doc.root();
    let editor = doc.append_element(root, "div");
    doc.insert_flags(editor, NodeFlags::CONTENT_EDITABLE);
    doc.append_text(editor, "中文");
    let plain = doc.append_element(root, "div");
    doc.append_text(plain, "中文");
    let style = doc.append_element(root, "style");
    doc.append_text(style, "/* 中文 */");

    let mut engine = engine(&mut doc, SegmentationMode::Word);
    engine.enable(&mut doc);
    drain(&mut engine, &mut doc);

    assert_eq!(doc.markup(editor), "<div>中文</div>");
    assert_eq!(doc.markup(style), "<style>/* 中文 */</style>");
    assert!(doc.markup(plain).starts_with("<div><ruby"));
}

#[test]
fn draining_is_bounded_per_turn() {
    let texts: Vec<String> = (0..120).map(|i| format!("中文{i}")).collect();
    let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
    let mut doc = paragraphs(&refs);
    let mut engine = engine_with(&mut doc, SegmentationMode::Word, 50, capabilities());
    engine.enable(&mut doc);
    assert_eq!(engine.scheduler().pending(), 1);

    assert!(engine.scheduler_mut().take_request());
    assert_eq!(engine.on_idle(&mut doc), 50);
    assert_eq!(engine.state().queue().len(), 70);

    drain(&mut engine, &mut doc);
    assert_eq!(engine.stats().turns, 3);
    assert_eq!(engine.scheduler().total_requests(), 3);
    assert_eq!(engine.stats().rendered, 120);
}

#[test]
fn external_insertions_are_picked_up_mid_drain() {
    let texts: Vec<String> = (0..60).map(|_| String::from("你好")).collect();
    let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
    let mut doc = paragraphs(&refs);
    let mut engine = engine(&mut doc, SegmentationMode::Word);
    engine.enable(&mut doc);

    assert!(engine.scheduler_mut().take_request());
    engine.on_idle(&mut doc);
    engine.on_mutations(&mut doc);

    // Foreign code adds a paragraph and appends text next to an annotated run.
    let root = doc.root();
    let fresh = doc.create_element("section");
    doc.append_text(fresh, "学习");
    doc.append_child(root, fresh);
    let first = doc.children(root)[0];
    doc.append_text(first, "测试");

    drain(&mut engine, &mut doc);
    assert_eq!(engine.stats().rendered, 62);
    assert_eq!(text_runs(&doc, root).count(), 0);
    assert!(doc.markup(first).ends_with("测试<rt class=\"is-sans\">cèshì</rt></ruby></p>"));
}

#[test]
fn removed_runs_are_skipped() {
    let mut doc = paragraphs(&["中文", "学习"]);
    let mut engine = engine(&mut doc, SegmentationMode::Word);
    engine.enable(&mut doc);
    let first = doc.children(doc.root())[0];
    doc.remove(first);
    drain(&mut engine, &mut doc);
    assert_eq!(engine.stats().skipped, 1);
    assert_eq!(engine.stats().rendered, 1);
}

#[test]
fn mode_switch_matches_direct_word_mode() {
    let texts = ["我爱你，你好！", "学习中文 ok", "测试"];
    let mut direct = paragraphs(&texts);
    let mut e1 = engine(&mut direct, SegmentationMode::Word);
    e1.enable(&mut direct);
    drain(&mut e1, &mut direct);

    let mut switched = paragraphs(&texts);
    let mut e2 = engine(&mut switched, SegmentationMode::Character);
    e2.enable(&mut switched);
    drain(&mut e2, &mut switched);
    assert!(switched.has_class(switched.root(), "glossa-char-mode"));
    e2.set_mode(&mut switched, SegmentationMode::Word);
    drain(&mut e2, &mut switched);
    assert_eq!(direct.markup(direct.root()), switched.markup(switched.root()));

    e2.set_mode(&mut switched, SegmentationMode::Character);
    drain(&mut e2, &mut switched);
    e2.set_mode(&mut switched, SegmentationMode::Word);
    drain(&mut e2, &mut switched);
    assert_eq!(direct.markup(direct.root()), switched.markup(switched.root()));
}

#[test]
fn mode_change_while_disabled_applies_on_enable() {
    let texts = ["我爱你"];
    let mut direct = paragraphs(&texts);
    let mut e1 = engine(&mut direct, SegmentationMode::Word);
    e1.enable(&mut direct);
    drain(&mut e1, &mut direct);

    let mut doc = paragraphs(&texts);
    let mut e2 = engine(&mut doc, SegmentationMode::Character);
    e2.enable(&mut doc);
    drain(&mut e2, &mut doc);
    e2.disable(&mut doc);
    e2.set_mode(&mut doc, SegmentationMode::Word);
    e2.enable(&mut doc);
    drain(&mut e2, &mut doc);
    assert_eq!(direct.markup(direct.root()), doc.markup(doc.root()));
}

#[test]
fn missing_transliterator_still_renders() {
    let mut doc = paragraphs(&["中文"]);
    let mut engine = engine_with(&mut doc, SegmentationMode::Word, 50, Capabilities::none());
    engine.enable(&mut doc);
    drain(&mut engine, &mut doc);
    let p = doc.children(doc.root())[0];
    assert_eq!(
        doc.markup(p),
        "<p><ruby class=\"glossa-word\" data-segment=\"中\">中<rt class=\"is-sans\"></rt></ruby>\
         <ruby class=\"glossa-word\" data-segment=\"文\">文<rt class=\"is-sans\"></rt></ruby></p>"
    );
}

#[test]
fn serif_parents_get_serif_transcriptions() {
    let mut doc = Document::new();
    let root = doc.root();
    doc.set_font_family(root, Some("\"Noto Serif SC\", serif"));
    let p = doc.append_element(root, "p");
    doc.append_text(p, "你好");
    let mut engine = engine(&mut doc, SegmentationMode::Word);
    engine.enable(&mut doc);
    drain(&mut engine, &mut doc);
    assert!(doc.markup(p).contains("<rt class=\"is-serif\">nǐhǎo</rt>"));
}

#[test]
fn reapply_while_disabled_is_redone_on_enable() {
    let mut doc = paragraphs(&["我爱你"]);
    let root = doc.root();
    let mut engine = engine(&mut doc, SegmentationMode::Word);
    engine.enable(&mut doc);
    drain(&mut engine, &mut doc);
    engine.disable(&mut doc);

    engine.reapply(&mut doc);
    assert_eq!(doc.markup(root), "<body><p>我爱你</p></body>");
    assert!(!engine.state().has_processed_once());
    drain(&mut engine, &mut doc);

    engine.enable(&mut doc);
    drain(&mut engine, &mut doc);
    assert_eq!(text_runs(&doc, root).count(), 0);
    let p = doc.children(root)[0];
    assert_eq!(
        doc.markup(p),
        "<p><ruby class=\"glossa-word\" data-segment=\"我爱你\">我爱你<rt class=\"is-sans\">wǒàinǐ</rt></ruby></p>"
    );
}

#[test]
fn idle_callback_while_disabled_releases_the_scheduler() {
    let mut doc = paragraphs(&["你好"]);
    let root = doc.root();
    let mut engine = engine(&mut doc, SegmentationMode::Word);
    engine.enable(&mut doc);
    engine.disable(&mut doc);
    assert!(engine.scheduler_mut().take_request());
    assert_eq!(engine.on_idle(&mut doc), 0);
    assert!(!engine.state().queue().is_draining());

    engine.enable(&mut doc);
    let p = doc.append_element(root, "p");
    doc.append_text(p, "学习");
    assert_eq!(engine.on_mutations(&mut doc), 1);
    assert_eq!(engine.scheduler().pending(), 1);
    drain(&mut engine, &mut doc);
    assert_eq!(text_runs(&doc, p).count(), 0);
}
