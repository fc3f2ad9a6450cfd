// Copyright 2025 the Glossa Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dictionary lookups for selections, served from canned responses.
//!
//! Run:
//! - `cargo run -p glossa_demos --example dictionary_popup`

use glossa_annotate::{
    Capabilities, Document, Engine, EngineConfig, ManualScheduler, MemoryStore, Settings,
};
use glossa_lookup::{Anchor, Block, DictionaryClient, HttpResponse};
use kurbo::{Point, Rect, Vec2};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

const ENTRY: &str = r#"{
  "zh": [
    {
      "partOfSpeech": "Interjection",
      "language": "Chinese",
      "definitions": [
        { "definition": "<a>hello</a>; hi", "parsedExamples": [{ "example": "你好！" }] }
      ]
    }
  ]
}"#;

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_target(false)
        .init();

    let client = DictionaryClient::new(|url: &str| -> Result<HttpResponse, BoxError> {
        println!("GET {url}");
        if url.ends_with("%E4%BD%A0%E5%A5%BD") {
            Ok(HttpResponse::new(200, ENTRY))
        } else {
            Ok(HttpResponse::new(404, ""))
        }
    });

    let mut doc = Document::new();
    let settings = Settings {
        auto_detect: false,
        ..Settings::default()
    };
    let mut engine = Engine::new(
        Capabilities::none(),
        EngineConfig::default(),
        ManualScheduler::new(),
        MemoryStore::new(settings),
    );
    engine.start(&mut doc);

    let anchor = Anchor {
        selection: Rect::new(900.0, 100.0, 960.0, 120.0),
        scroll: Vec2::new(0.0, 50.0),
        viewport_width: 1024.0,
    };
    for selection in ["  你好！ ", "测试", "hello"] {
        match engine.handle_selection(selection, &anchor, "rgb(20, 20, 20)", &client) {
            Some(outcome) => println!("{selection:?} -> {outcome:?}"),
            None => println!("{selection:?} -> not looked up"),
        }
        if let Some(popup) = engine.tooltip().current() {
            println!("  popup {:?} at {:?} dark={}", popup.title, popup.origin, popup.dark);
            for block in &popup.blocks {
                match block {
                    Block::Message(message) => println!("  {message}"),
                    Block::Definitions(items) => {
                        for item in items {
                            println!("  [{}] {}", item.part_of_speech, item.definition_html);
                        }
                    }
                }
            }
            if let Some(link) = &popup.link {
                println!("  {} -> {}", link.label, link.url);
            }
        }
    }

    engine.tooltip_mut().click(Point::new(5.0, 5.0), 120.0);
    println!("visible after outside click: {}", engine.tooltip().is_visible());
}
