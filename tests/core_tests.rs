//! Core engine tests for dualpane
//!
//! These tests exercise the width engine, the highlighter, the key decoder and the scroll
//! model through the library API. Randomized tests draw their input from `rand` and check
//! properties that must hold for every input.

use dualpane::core::highlight::{TokenKind, Tokens, highlight, rules_for};
use dualpane::core::input::{Key, KeyDecoder, ScriptedSource};
use dualpane::core::viewport::{self, Layout, Viewport};
use dualpane::core::width::{display_width, pad_to, take_columns, truncate, width};

use rand::{Rng, rng};
use std::time::Duration;

const POLL: Duration = Duration::from_millis(10);

fn random_line(alphabet: &[&str], max_len: usize) -> String {
    let mut rng = rng();
    let len = rng.random_range(0..=max_len);
    (0..len)
        .map(|_| alphabet[rng.random_range(0..alphabet.len())])
        .collect()
}

#[test]
fn test_printable_ascii_is_one_column() {
    let mut rng = rng();
    for _ in 0..500 {
        let len = rng.random_range(0..64);
        let text: String = (0..len)
            .map(|_| char::from(rng.random_range(0x20u8..0x7F)))
            .collect();
        assert_eq!(
            display_width(&text),
            text.len(),
            "Width of printable ASCII must equal its length: {:?}",
            text
        );
    }
}

#[test]
fn test_pad_to_keeps_prefix_and_fills_target() {
    let alphabet = ["a", "Z", " ", "漢", "é", "🦀", "-", "\u{301}"];
    let mut rng = rng();
    for _ in 0..500 {
        let text = random_line(&alphabet, 20);
        let target = rng.random_range(0..40);
        let padded = pad_to(&text, target);

        assert!(padded.starts_with(&text), "Padding changed the text: {:?}", text);
        assert_eq!(
            display_width(&padded),
            display_width(&text).max(target),
            "Wrong padded width for {:?} to {}",
            text,
            target
        );
    }
}

#[test]
fn test_width_classes() {
    assert_eq!(width('a'), 1);
    assert_eq!(width('漢'), 2);
    assert_eq!(width('🦀'), 2);
    assert_eq!(width('\u{301}'), 0);
    assert_eq!(display_width("e\u{301}漢"), 3);
}

#[test]
fn test_truncate_and_take_columns() {
    assert_eq!(truncate("report_2024_final.pdf", 12), "report_20...");
    assert_eq!(truncate("ok.txt", 12), "ok.txt");
    assert_eq!(take_columns("漢字漢字", 5), "漢字");
}

#[test]
fn test_spans_reconstruct_the_line() {
    let alphabet = [
        "if", "for", "fn", "x", "_y", "42", "3.5", "0x1F", " ", "\t", "\"", "'", "`", "//",
        "#", "--", "/*", "$", "@", "(", ")", "=", "+", ".", ";", "ü", "漢",
    ];
    let languages = [
        "rust",
        "c",
        "python",
        "javascript",
        "php",
        "ruby",
        "bash",
        "sql",
        "go",
    ];

    for _ in 0..300 {
        let line = random_line(&alphabet, 24);
        for lang in languages {
            let spans = highlight(&line, rules_for(lang));
            let rebuilt: String = spans.iter().map(|s| s.text).collect();
            assert_eq!(rebuilt, line, "Spans of {} lost text of {:?}", lang, line);
            assert!(
                spans.iter().all(|s| !s.text.is_empty()),
                "Empty span for {} in {:?}",
                lang,
                line
            );
        }
    }
}

#[test]
fn test_keyword_boundaries() -> Result<(), Box<dyn std::error::Error>> {
    let rust = rules_for("rust").ok_or("rust rules missing")?;
    let spans: Vec<_> = Tokens::new("fnord fn", rust).collect();

    assert_eq!(spans[0].text, "fnord");
    assert_ne!(spans[0].kind, TokenKind::Keyword);
    assert_eq!(spans.last().map(|s| (s.text, s.kind)), Some(("fn", TokenKind::Keyword)));
    Ok(())
}

#[test]
fn test_comment_wins_over_string() {
    let spans = highlight("# 'quoted' text", rules_for("python"));
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].kind, TokenKind::Comment);

    let spans = highlight("s = '# not a comment'", rules_for("python"));
    assert_eq!(
        spans.last().map(|s| (s.text, s.kind)),
        Some(("'# not a comment'", TokenKind::String))
    );
}

#[test]
fn test_numeric_scan() {
    let spans = highlight("n = 1e10 + 0xff", rules_for("c"));
    let numbers: Vec<&str> = spans
        .iter()
        .filter(|s| s.kind == TokenKind::Number)
        .map(|s| s.text)
        .collect();
    assert_eq!(numbers, vec!["1e10", "0xff"]);
}

#[test]
fn test_decoder_sequences() -> Result<(), Box<dyn std::error::Error>> {
    let mut decoder = KeyDecoder::new(ScriptedSource::new(
        b"\x1b[A\x1b[B\x1b[5~\x1b[6~\x1b[H\x1b[4~q",
    ));

    let expected = [
        Key::Up,
        Key::Down,
        Key::PageUp,
        Key::PageDown,
        Key::Home,
        Key::End,
        Key::Byte(b'q'),
        Key::Timeout,
    ];
    for key in expected {
        assert_eq!(decoder.next_key(POLL)?, key);
    }
    Ok(())
}

#[test]
fn test_decoder_lone_escape_keeps_next_byte() -> Result<(), Box<dyn std::error::Error>> {
    let mut decoder = KeyDecoder::new(ScriptedSource::new(b"\x1bj"));
    assert_eq!(decoder.next_key(POLL)?, Key::Escape);
    assert_eq!(decoder.next_key(POLL)?, Key::Byte(b'j'));

    decoder.source_mut().push(b"\x1b");
    assert_eq!(decoder.next_key(POLL)?, Key::Escape);
    assert!(decoder.source().is_empty());
    Ok(())
}

#[test]
fn test_decoder_unknown_sequence() -> Result<(), Box<dyn std::error::Error>> {
    let mut decoder = KeyDecoder::new(ScriptedSource::new(b"\x1b[2~x"));
    assert_eq!(decoder.next_key(POLL)?, Key::Unknown(b"\x1b[2~".to_vec()));
    assert_eq!(decoder.next_key(POLL)?, Key::Byte(b'x'));
    Ok(())
}

#[test]
fn test_viewport_scenarios() {
    assert_eq!(viewport::adjust(0, 0, 10, 100), 0);
    assert_eq!(viewport::adjust(15, 0, 10, 100), 6);
    assert_eq!(viewport::adjust(3, 6, 10, 100), 3);
    assert_eq!(viewport::jump_to_end(0, 10, 100), (99, 90));
    assert_eq!(viewport::jump_to_end(0, 10, 0), (0, 0));
    assert_eq!(viewport::page_move(95, 1, 10, 100), 99);
    assert_eq!(viewport::page_move(5, -1, 10, 100), 0);
}

#[test]
fn test_random_moves_keep_cursor_visible() {
    let mut rng = rng();
    for _ in 0..200 {
        let total = rng.random_range(1..200);
        let visible = rng.random_range(1..30);
        let mut view = Viewport::default();

        for _ in 0..50 {
            match rng.random_range(0..5) {
                0 => {
                    view.step(1, visible, total);
                }
                1 => {
                    view.step(-1, visible, total);
                }
                2 => view.page(if rng.random_bool(0.5) { 1 } else { -1 }, visible, total),
                3 => view.to_end(visible, total),
                _ => view.to_start(),
            }
            assert!(view.cursor() < total);
            assert!(view.scroll() <= view.cursor());
            assert!(view.cursor() < view.scroll() + visible);
            assert!(view.scroll() <= viewport::max_scroll(total, visible));
        }
    }
}

#[test]
fn test_layout_budgets() {
    let layout = Layout::new(80, 24);
    assert_eq!(layout.panel_width, 38);
    assert_eq!(layout.content_height, 18);
    assert_eq!(layout.list_rows, 16);
    assert_eq!(layout.name_width, 11);
    assert_eq!(layout.viewer_height, 20);
    assert_eq!(Layout::new(0, 0), Layout::default());
}
