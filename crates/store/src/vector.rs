//! Vector similarity and hybrid ranking utilities.
//!
//! Pure-Rust implementations of:
//! - Cosine similarity
//! - Reciprocal Rank Fusion (RRF) for merging ranked fragment lists

use std::collections::HashMap;
use upskiller_core::Fragment;

/// Standard RRF damping constant.
pub const RRF_K: u32 = 60;

/// Compute cosine similarity between two vectors.
///
/// Returns a value in [-1, 1] where 1 = identical, 0 = orthogonal, -1 = opposite.
/// Returns 0.0 if the vectors differ in length, are empty, or either is zero.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;

    for (x, y) in a.iter().zip(b.iter()) {
        let x = *x as f64;
        let y = *y as f64;
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom < 1e-10 {
        return 0.0;
    }

    (dot / denom) as f32
}

/// Rank fragments by cosine similarity to a query embedding.
///
/// Fragments without an embedding are skipped. `score` is set to the
/// similarity value.
pub fn vector_search(
    fragments: &[Fragment],
    query_embedding: &[f32],
    limit: usize,
    min_score: f32,
) -> Vec<Fragment> {
    let mut scored: Vec<Fragment> = fragments
        .iter()
        .filter_map(|fragment| {
            let emb = fragment.embedding.as_ref()?;
            let sim = cosine_similarity(emb, query_embedding);
            (sim >= min_score).then(|| {
                let mut f = fragment.clone();
                f.score = sim;
                f
            })
        })
        .collect();

    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(limit);
    scored
}

/// Reciprocal Rank Fusion: merge two ranked lists.
///
/// Each fragment's final score is the sum of `1/(k + rank)` across both
/// lists. Results are deduplicated by fragment ID; ties go to the vector
/// list, which is the primary ranking.
pub fn reciprocal_rank_fusion(
    keyword_results: &[Fragment],
    vector_results: &[Fragment],
    k: u32,
    limit: usize,
) -> Vec<Fragment> {
    let k = k as f32;

    // id -> (rrf_score, first-seen rank order, fragment)
    let mut scores: HashMap<&str, (f32, usize, &Fragment)> = HashMap::new();
    let mut order = 0usize;

    for list in [vector_results, keyword_results] {
        for (rank, fragment) in list.iter().enumerate() {
            let rrf_score = 1.0 / (k + rank as f32 + 1.0);
            scores
                .entry(fragment.id.as_str())
                .and_modify(|(score, _, _)| *score += rrf_score)
                .or_insert_with(|| {
                    order += 1;
                    (rrf_score, order, fragment)
                });
        }
    }

    let mut merged: Vec<(f32, usize, &Fragment)> = scores.into_values().collect();
    merged.sort_by(|a, b| {
        b.0.partial_cmp(&a.0)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.1.cmp(&b.1))
    });
    merged.truncate(limit);

    merged
        .into_iter()
        .map(|(score, _, fragment)| {
            let mut f = fragment.clone();
            f.score = score;
            f
        })
        .collect()
}
