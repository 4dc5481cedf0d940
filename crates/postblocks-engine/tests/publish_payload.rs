use chrono::Utc;
use postblocks_engine::editing::{Cmd, DocumentStore};
use postblocks_engine::embed::embed_url;
use postblocks_engine::models::{Block, BlockKind, find_common_language};
use postblocks_engine::publish::{PublishForm, PublishPayload};
use postblocks_engine::stats::calculate_word_count;
use pretty_assertions::assert_eq;
use rstest::rstest;

/// English with three sections of text, Vietnamese with one
fn populated_store() -> DocumentStore {
    let mut store = DocumentStore::default();
    for html in ["<p>one two</p>", "<h1>A</h1><p>B C</p>", "<p>  spaced   out  </p>"] {
        store.apply(Cmd::AddSection).unwrap();
        let mut section = store.current_sections().last().unwrap().clone();
        section.columns[0].blocks.push(Block::text(html));
        section.columns[0].blocks.push(Block::new(BlockKind::Image));
        store
            .apply(Cmd::UpdateSection {
                id: section.id.clone(),
                section,
            })
            .unwrap();
    }

    store
        .apply(Cmd::AddLanguage {
            language: find_common_language("vi").unwrap().to_version(),
        })
        .unwrap();
    store
        .apply(Cmd::SwitchLanguage {
            code: "vi".to_string(),
        })
        .unwrap();
    store.apply(Cmd::AddSection).unwrap();
    let mut section = store.current_sections()[0].clone();
    section.columns[0].blocks.push(Block::text("<p>Xin chào</p>"));
    store
        .apply(Cmd::UpdateSection {
            id: section.id.clone(),
            section,
        })
        .unwrap();
    store
}

#[test]
fn payload_word_counts_match_live_totals() {
    let store = populated_store();
    let mut form = PublishForm::new();
    form.set_title("Round trip");

    let payload = PublishPayload::build(form.metadata().unwrap(), &store, Utc::now());
    let json = serde_json::to_string(&payload).unwrap();
    let received: PublishPayload = serde_json::from_str(&json).unwrap();

    for entry in &received.languages {
        let live = store.language(&entry.language.code).unwrap();
        assert_eq!(entry.word_count, calculate_word_count(&live.sections));
        assert_eq!(entry.word_count, calculate_word_count(&entry.language.sections));
    }
    assert_eq!(received.languages[0].word_count, 7);
    assert_eq!(received.languages[1].word_count, 2);
    assert_eq!(received.current_language, "vi");
    assert_eq!(received.metadata.slug, "round-trip");
}

#[test]
fn publishing_does_not_touch_the_store() {
    let store = populated_store();
    let before = store.clone();
    let mut form = PublishForm::new();
    form.set_title("Untouched");

    let _payload = PublishPayload::build(form.metadata().unwrap(), &store, Utc::now());

    assert_eq!(store, before);
}

#[rstest]
#[case("https://www.youtube.com/watch?v=XYZ123", "/embed/XYZ123")]
#[case("https://vimeo.com/55555", "/video/55555")]
fn known_hosts_become_players(#[case] url: &str, #[case] expected: &str) {
    let embedded = embed_url(url);
    assert!(embedded.ends_with(expected), "{embedded} should end with {expected}");
}

#[test]
fn other_urls_pass_through() {
    assert_eq!(embed_url("https://example.org/widget"), "https://example.org/widget");
}
