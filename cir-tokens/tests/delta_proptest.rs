//! Delta encoder properties and request-sequence scenarios.

use cir_tokens::{apply, diff, diff_tokens, Highlighter, TOKEN_WIDTH};
use proptest::prelude::*;

/// Small value range so prefixes and suffixes collide frequently.
fn stream() -> impl Strategy<Value = Vec<u32>> {
    proptest::collection::vec(0u32..4, 0..40)
}

fn token_stream() -> impl Strategy<Value = Vec<u32>> {
    proptest::collection::vec(proptest::array::uniform5(0u32..3), 0..10)
        .prop_map(|tokens| tokens.into_iter().flatten().collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn applying_diff_reproduces_after(before in stream(), after in stream()) {
        let edits = diff(&before, &after);
        prop_assert!(edits.len() <= 1);
        prop_assert_eq!(apply(&before, &edits), after);
    }

    #[test]
    fn diff_of_equal_streams_is_empty(stream in stream()) {
        prop_assert!(diff(&stream, &stream).is_empty());
        prop_assert!(diff_tokens(&[], &[]).is_empty());
    }

    #[test]
    fn token_diff_is_aligned_and_correct(before in token_stream(), after in token_stream()) {
        let edits = diff_tokens(&before, &after);
        for edit in &edits {
            prop_assert_eq!(edit.start % TOKEN_WIDTH, 0);
            prop_assert_eq!(edit.delete_count % TOKEN_WIDTH, 0);
            prop_assert_eq!(edit.data.len() % TOKEN_WIDTH, 0);
        }
        prop_assert_eq!(apply(&before, &edits), after);
    }

    #[test]
    fn token_diff_never_starts_later_than_element_diff(
        before in token_stream(),
        after in token_stream(),
    ) {
        let coarse = diff_tokens(&before, &after);
        let fine = diff(&before, &after);
        prop_assert_eq!(coarse.len(), fine.len());
        if let (Some(coarse), Some(fine)) = (coarse.first(), fine.first()) {
            prop_assert!(coarse.start <= fine.start);
        }
    }
}

fn document(lines: &[&str]) -> String {
    lines.join("\n")
}

#[test]
fn edit_on_one_line_replaces_only_that_line() {
    let highlighter = Highlighter::default();
    let before_text = document(&[
        "%0 = cir.const #a",
        "%1 = cir.const #b",
        "%2 = cir.const #c",
        "%3 = cir.const #d",
        "%4 = cir.const #e",
    ]);
    let after_text = document(&[
        "%0 = cir.const #a",
        "%1 = cir.const #b",
        "%2 = cir.const #c",
        "%33 = cir.call @f",
        "%4 = cir.const #e",
    ]);
    let before = highlighter.highlight(&before_text).unwrap();
    let after = highlighter.highlight(&after_text).unwrap();

    let edits = diff_tokens(before.as_slice(), after.as_slice());
    assert_eq!(edits.len(), 1);
    let edit = &edits[0];
    // Four tokens per line; line 3 starts at token 12.
    assert_eq!(edit.start, 12 * TOKEN_WIDTH);
    assert_eq!(edit.delete_count, 4 * TOKEN_WIDTH);
    assert_eq!(edit.data, after.as_slice()[60..80].to_vec());
    assert_eq!(apply(before.as_slice(), &edits), after.as_slice());
}

#[test]
fn emptied_document_deletes_every_token() {
    let highlighter = Highlighter::default();
    let before = highlighter.highlight("%0 = cir.const #true\n").unwrap();
    let after = highlighter.highlight("").unwrap();
    assert!(after.is_empty());

    let edits = diff_tokens(before.as_slice(), after.as_slice());
    assert_eq!(edits.len(), 1);
    assert_eq!(edits[0].start, 0);
    assert_eq!(edits[0].delete_count, before.as_slice().len());
    assert!(edits[0].data.is_empty());
}

#[test]
fn unchanged_document_produces_no_edits() {
    let highlighter = Highlighter::default();
    let text = "cir.func @f() {\n  cir.return\n}\n";
    let before = highlighter.highlight(text).unwrap();
    let after = highlighter.highlight(text).unwrap();
    assert!(diff_tokens(before.as_slice(), after.as_slice()).is_empty());
}
