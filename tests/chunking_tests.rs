//! Unit and property tests for text chunking.

use kb_rag::chunking::{Chunker, SentenceChunker, chunk_text};
use kb_rag::document::{Document, DocumentMetadata};
use proptest::prelude::*;

fn document(id: &str, text: &str) -> Document {
    Document {
        id: id.to_string(),
        name: format!("{id}.txt"),
        text: text.to_string(),
        metadata: DocumentMetadata::default(),
    }
}

#[test]
fn empty_text_produces_no_chunks() {
    assert!(chunk_text("", 1000, 200).is_empty());
}

#[test]
fn whitespace_only_text_produces_no_chunks() {
    assert!(chunk_text("   \n\t  ", 1000, 200).is_empty());
}

#[test]
fn short_text_is_a_single_trimmed_chunk() {
    let chunks = chunk_text("  hello world  ", 1000, 200);
    assert_eq!(chunks, vec!["hello world".to_string()]);
}

#[test]
fn snaps_to_sentence_boundaries_past_the_midpoint() {
    let chunks = chunk_text("Sentence one. Sentence two. Sentence three.", 20, 5);

    // The first window is "Sentence one. Senten"; its last '.' sits past
    // the window midpoint, so the chunk ends at the sentence terminator.
    assert_eq!(chunks[0], "Sentence one.");
    for chunk in &chunks {
        assert!(!chunk.is_empty());
        assert_eq!(chunk.trim(), chunk.as_str());
    }
}

#[test]
fn keeps_full_window_when_boundary_is_before_midpoint() {
    // The only '.' falls in the first half of the 20-char window, so no
    // snapping happens and the chunk is the full window.
    let text = "Abc. aaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
    let chunks = chunk_text(text, 20, 5);
    assert_eq!(chunks[0], "Abc. aaaaaaaaaaaaaaa");
}

#[test]
fn window_reaching_end_of_text_never_snaps() {
    // Well under one window: the terminator mid-text must not truncate.
    let chunks = chunk_text("First part. Second part without ending", 1000, 200);
    assert_eq!(chunks, vec!["First part. Second part without ending".to_string()]);
}

#[test]
fn newline_counts_as_a_boundary() {
    let chunks = chunk_text("line one goes here\nmore text after the break", 20, 5);
    assert_eq!(chunks[0], "line one goes here");
}

#[test]
fn overlap_repeats_content_across_chunks() {
    // 26 letters, no boundaries: windows of 10 stepping by 10 - 4.
    let text = "abcdefghijklmnopqrstuvwxyz";
    let chunks = chunk_text(text, 10, 4);
    assert_eq!(chunks[0], "abcdefghij");
    assert_eq!(chunks[1], "ghijklmnop");
    assert!(chunks[1].starts_with(&chunks[0][6..]));
}

#[test]
fn multibyte_text_chunks_without_panicking() {
    let text = "héllo wörld. ünïcode tëxt hère! ".repeat(40);
    let chunks = chunk_text(&text, 50, 10);
    assert!(!chunks.is_empty());
    for chunk in &chunks {
        assert!(!chunk.is_empty());
    }
}

#[test]
fn zero_chunk_size_yields_nothing() {
    assert!(chunk_text("some text", 0, 0).is_empty());
}

#[test]
fn sentence_chunker_indexes_chunks_in_order() {
    let doc = document("doc_1", &"One sentence here. ".repeat(200));
    let chunks = SentenceChunker::default().chunk(&doc);

    assert!(chunks.len() > 1);
    for (i, chunk) in chunks.iter().enumerate() {
        assert_eq!(chunk.index, i as u32);
        assert_eq!(chunk.document_id, "doc_1");
        assert!(!chunk.content.is_empty());
        assert!(chunk.metadata.contains_key("word_count"));
        assert!(chunk.metadata.contains_key("char_count"));
    }
}

#[test]
fn sentence_chunker_empty_document_yields_no_chunks() {
    let doc = document("doc_1", "");
    assert!(SentenceChunker::default().chunk(&doc).is_empty());
}

proptest! {
    /// Chunking always terminates with trimmed, non-empty chunks.
    #[test]
    fn terminates_with_trimmed_nonempty_chunks(
        text in "\\PC{0,600}",
        chunk_size in 1usize..200,
        overlap in 0usize..100,
    ) {
        prop_assume!(overlap < chunk_size);
        let chunks = chunk_text(&text, chunk_size, overlap);
        for chunk in &chunks {
            prop_assert!(!chunk.is_empty());
            prop_assert_eq!(chunk.trim(), chunk.as_str());
        }
    }

    /// For text with no boundary characters and no whitespace, nothing
    /// snaps or trims, so dropping each chunk's leading overlap
    /// reconstructs the input exactly.
    #[test]
    fn reconstructs_boundary_free_text(
        text in "[a-z0-9]{0,400}",
        chunk_size in 1usize..100,
        overlap in 0usize..50,
    ) {
        prop_assume!(overlap < chunk_size);
        let chunks = chunk_text(&text, chunk_size, overlap);

        let mut rebuilt = String::new();
        for (i, chunk) in chunks.iter().enumerate() {
            if i == 0 {
                rebuilt.push_str(chunk);
            } else {
                rebuilt.push_str(&chunk[overlap.min(chunk.len())..]);
            }
        }
        prop_assert_eq!(rebuilt, text);
    }

    /// No chunk ever exceeds the configured size.
    #[test]
    fn chunks_never_exceed_chunk_size(
        text in "\\PC{0,600}",
        chunk_size in 1usize..200,
        overlap in 0usize..100,
    ) {
        prop_assume!(overlap < chunk_size);
        for chunk in chunk_text(&text, chunk_size, overlap) {
            prop_assert!(chunk.chars().count() <= chunk_size);
        }
    }
}
