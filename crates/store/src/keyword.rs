//! Keyword relevance ranking over fragments.
//!
//! This is the lexical partner in hybrid ranking, and the whole ranking when
//! no embedder is configured.

use upskiller_core::Fragment;

/// Terms shorter than this carry no signal ("a", "of", "to").
const MIN_TERM_LEN: usize = 3;

/// Function words that match nearly every fragment.
const STOPWORDS: &[&str] = &[
    "about", "after", "all", "also", "and", "any", "are", "been", "before", "but", "can", "could",
    "did", "does", "for", "from", "had", "has", "have", "her", "his", "how", "into", "its", "more",
    "most", "not", "our", "out", "should", "some", "such", "than", "that", "the", "their", "them",
    "then", "there", "these", "they", "this", "those", "through", "under", "use", "was", "were",
    "what", "when", "where", "which", "while", "who", "why", "will", "with", "would", "you", "your",
];

fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
}

/// Lower-cased content terms of a query, deduplicated in order.
pub fn query_terms(text: &str) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();
    for term in words(text)
        .filter(|t| t.chars().count() >= MIN_TERM_LEN)
        .filter(|t| !STOPWORDS.contains(&t.as_str()))
    {
        if !terms.contains(&term) {
            terms.push(term);
        }
    }
    terms
}

/// Score a single text against pre-computed terms.
///
/// Counts whole words that start with a term ("forecast" hits "forecasts")
/// and normalizes by length, so a short fragment dense with query terms
/// outranks a long one that mentions them once.
pub fn keyword_score(content: &str, terms: &[String]) -> f32 {
    if terms.is_empty() {
        return 0.0;
    }
    let occurrences = words(content)
        .filter(|w| terms.iter().any(|t| w.starts_with(t.as_str())))
        .count();
    occurrences as f32 / (content.len() as f32 / 100.0).max(1.0)
}

/// Rank fragments by keyword relevance, best first.
///
/// Fragments with no matching term are excluded. Ties keep store order.
pub fn keyword_search(
    fragments: &[Fragment],
    query: &str,
    limit: usize,
    min_score: f32,
) -> Vec<Fragment> {
    let terms = query_terms(query);
    if terms.is_empty() {
        return Vec::new();
    }

    let mut results: Vec<Fragment> = fragments
        .iter()
        .filter_map(|f| {
            let score = keyword_score(&f.content, &terms);
            if score > 0.0 && score >= min_score {
                let mut f = f.clone();
                f.score = score;
                Some(f)
            } else {
                None
            }
        })
        .collect();

    results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    results.truncate(limit);
    results
}
