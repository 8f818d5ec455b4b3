//! Unit and property tests for candidate ranking and context assembly.

use std::collections::HashMap;

use kb_rag::context::{NO_RELEVANT_CONTENT, build_context};
use kb_rag::document::{Candidate, Chunk, Embedding, ScoredChunk};
use kb_rag::retriever::rank;
use proptest::prelude::*;

fn chunk(document_id: &str, index: u32, content: &str) -> Chunk {
    Chunk {
        document_id: document_id.to_string(),
        index,
        content: content.to_string(),
        metadata: HashMap::new(),
    }
}

fn candidate(document_id: &str, index: u32, content: &str, vector: Option<Vec<f32>>) -> Candidate {
    let embedding = vector.map(|vector| Embedding { vector, model: "nomic-embed-text".into() });
    Candidate::new(chunk(document_id, index, content), embedding, format!("{document_id}.txt"))
}

#[test]
fn empty_candidates_rank_to_nothing() {
    let ranked = rank(&[1.0, 0.0], Vec::new(), 5);
    assert!(ranked.is_empty());
    assert_eq!(build_context(&ranked), NO_RELEVANT_CONTENT);
}

#[test]
fn missing_embeddings_are_excluded() {
    // A candidate without an embedding never ranks, whatever its length.
    let long_content = "x".repeat(5000);
    let candidates = vec![
        candidate("doc_1", 0, &long_content, None),
        candidate("doc_1", 1, "short but embedded", Some(vec![1.0, 0.0])),
    ];

    let ranked = rank(&[1.0, 0.0], candidates, 5);
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].chunk.index, 1);
}

#[test]
fn dimension_mismatch_gets_content_length_fallback() {
    // Query of 768 dims against a 384-dim legacy embedding with 2000
    // chars of content: min(2000 / 1000, 1) * 0.5 = 0.5.
    let query = vec![0.3f32; 768];
    let content = "y".repeat(2000);
    let legacy = candidate("doc_1", 0, &content, Some(vec![0.5f32; 384]));
    assert_eq!(legacy.content_length, 2000);

    let ranked = rank(&query, vec![legacy], 5);
    assert_eq!(ranked.len(), 1);
    assert!((ranked[0].similarity - 0.5).abs() < 1e-6);
}

#[test]
fn short_mismatched_content_scores_proportionally() {
    // 300 chars: min(300 / 1000, 1) * 0.5 = 0.15.
    let query = vec![0.3f32; 8];
    let content = "z".repeat(300);
    let legacy = candidate("doc_1", 0, &content, Some(vec![0.5f32; 4]));

    let ranked = rank(&query, vec![legacy], 5);
    assert!((ranked[0].similarity - 0.15).abs() < 1e-6);
}

#[test]
fn mismatched_candidates_rank_below_genuine_matches() {
    let query = vec![1.0f32, 0.0];
    let content = "w".repeat(2000);
    let candidates = vec![
        candidate("legacy", 0, &content, Some(vec![0.5f32; 384])),
        candidate("fresh", 0, "relevant text", Some(vec![1.0, 0.0])),
    ];

    let ranked = rank(&query, candidates, 5);
    assert_eq!(ranked[0].chunk.document_id, "fresh");
    assert!((ranked[0].similarity - 1.0).abs() < 1e-6);
    assert_eq!(ranked[1].chunk.document_id, "legacy");
    assert!((ranked[1].similarity - 0.5).abs() < 1e-6);
}

#[test]
fn tied_scores_keep_candidate_order() {
    // Two candidates with identical embeddings tie exactly; the stable
    // sort must keep their input order, with the weaker match last.
    let query = vec![1.0f32, 0.0];
    let candidates = vec![
        candidate("doc_1", 0, "first of the tie", Some(vec![2.0, 0.0])),
        candidate("doc_2", 0, "second of the tie", Some(vec![2.0, 0.0])),
        candidate("doc_3", 0, "weaker match", Some(vec![1.0, 1.0])),
    ];

    let ranked = rank(&query, candidates, 5);
    assert_eq!(ranked.len(), 3);
    assert_eq!(ranked[0].chunk.document_id, "doc_1");
    assert_eq!(ranked[1].chunk.document_id, "doc_2");
    assert_eq!(ranked[2].chunk.document_id, "doc_3");
}

#[test]
fn top_k_truncates_the_ranking() {
    let query = vec![1.0f32, 0.0];
    let candidates: Vec<Candidate> = (0..8)
        .map(|i| candidate("doc_1", i, "content", Some(vec![1.0, i as f32 * 0.1])))
        .collect();

    let ranked = rank(&query, candidates, 5);
    assert_eq!(ranked.len(), 5);
}

#[test]
fn context_blocks_carry_source_content_and_relevance() {
    let ranked = vec![
        ScoredChunk {
            chunk: chunk("doc_1", 0, "The warranty lasts two years."),
            similarity: 0.875,
            source_label: "warranty.pdf".to_string(),
        },
        ScoredChunk {
            chunk: chunk("doc_2", 3, "Returns are accepted within 30 days."),
            similarity: 0.5,
            source_label: "returns.txt".to_string(),
        },
    ];

    let context = build_context(&ranked);
    assert_eq!(
        context,
        "Source: warranty.pdf\nContent: The warranty lasts two years.\nRelevance: 87.5%\n\n\
         Source: returns.txt\nContent: Returns are accepted within 30 days.\nRelevance: 50.0%"
    );
}

#[test]
fn empty_store_and_no_match_produce_the_same_sentinel() {
    let query = vec![1.0f32, 0.0];

    // Empty knowledge base.
    let from_empty = build_context(&rank(&query, Vec::new(), 5));

    // Populated knowledge base where nothing is scorable.
    let unscorable = vec![
        candidate("doc_1", 0, "present but never embedded", None),
        candidate("doc_1", 1, "same here", None),
    ];
    let from_no_match = build_context(&rank(&query, unscorable, 5));

    assert_eq!(from_empty, NO_RELEVANT_CONTENT);
    assert_eq!(from_empty, from_no_match);
}

/// Generate a non-zero L2-normalized embedding of the given dimension.
fn arb_normalized_embedding(dim: usize) -> impl Strategy<Value = Vec<f32>> {
    proptest::collection::vec(-1.0f32..1.0f32, dim).prop_filter_map("non-zero embedding", |mut v| {
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm < 1e-8 {
            return None;
        }
        for val in &mut v {
            *val /= norm;
        }
        Some(v)
    })
}

/// Generate a candidate with a normalized embedding.
fn arb_candidate(dim: usize) -> impl Strategy<Value = Candidate> {
    ("[a-z]{3,8}", "[a-z ]{5,30}", arb_normalized_embedding(dim)).prop_map(
        |(document_id, content, vector)| {
            candidate(&document_id, 0, &content, Some(vector))
        },
    )
}

proptest! {
    /// Ranking returns at most top_k results in descending score order.
    #[test]
    fn results_ordered_descending_and_bounded_by_top_k(
        candidates in proptest::collection::vec(arb_candidate(16), 0..20),
        query in arb_normalized_embedding(16),
        top_k in 1usize..25,
    ) {
        let count = candidates.len();
        let ranked = rank(&query, candidates, top_k);

        prop_assert!(ranked.len() <= top_k);
        prop_assert!(ranked.len() <= count);

        for window in ranked.windows(2) {
            prop_assert!(
                window[0].similarity >= window[1].similarity,
                "results not in descending order: {} < {}",
                window[0].similarity,
                window[1].similarity,
            );
        }
    }
}
