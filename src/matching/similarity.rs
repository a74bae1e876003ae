//! TF-IDF cosine similarity over recipe ingredient text.
//!
//! Used as the fallback tier when no recipe satisfies a boolean query. Each
//! recipe is one document: its normalized ingredient names joined together.
//! Weighting follows the usual smoothed scheme:
//!
//! - term frequency: raw count of the token in the document
//! - `idf(t) = ln((1 + n) / (1 + df(t))) + 1`
//! - vectors are L2-normalized, so cosine similarity is a dot product
//!
//! Tokens are whitespace-separated words of at least two characters that are
//! not stop words. Query tokens outside the vocabulary are ignored.

use std::collections::{BTreeMap, HashMap};

use crate::catalog::store::RecipeCatalog;
use crate::core::recipe::Recipe;
use crate::matching::normalize::{is_stop_word, normalize};
use crate::matching::ranking::compare_similarity;
use crate::matching::scoring::count_to_f64;

/// Similarity a recipe must exceed to be returned on its own merit
pub const SIMILARITY_THRESHOLD: f64 = 0.5;

/// How many of the closest recipes to return when none pass the threshold
pub const FALLBACK_TOP_N: usize = 5;

/// Sparse vector keyed by vocabulary index
type SparseVector = BTreeMap<usize, f64>;

/// Split normalized text into vocabulary tokens
fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
        .filter(|token| token.chars().count() >= 2 && !is_stop_word(token))
}

/// A fitted TF-IDF vector space over a fixed set of documents
#[derive(Debug, Clone, Default)]
pub struct TfIdfIndex {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    documents: Vec<SparseVector>,
}

impl TfIdfIndex {
    /// Fit the vocabulary and idf weights on `documents` and vectorize them
    pub fn fit<S: AsRef<str>>(documents: &[S]) -> Self {
        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut document_frequency: Vec<usize> = Vec::new();

        for doc in documents {
            let mut seen: Vec<usize> = Vec::new();
            for token in tokenize(doc.as_ref()) {
                let next = vocabulary.len();
                let idx = *vocabulary.entry(token.to_string()).or_insert(next);
                if idx == document_frequency.len() {
                    document_frequency.push(0);
                }
                if !seen.contains(&idx) {
                    seen.push(idx);
                    document_frequency[idx] += 1;
                }
            }
        }

        let n = count_to_f64(documents.len());
        let idf = document_frequency
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + count_to_f64(df))).ln() + 1.0)
            .collect();

        let mut index = Self {
            vocabulary,
            idf,
            documents: Vec::new(),
        };
        let vectors = documents
            .iter()
            .map(|doc| index.transform(doc.as_ref()))
            .collect();
        index.documents = vectors;
        index
    }

    /// Fit on every recipe's ingredient text, in catalog order
    pub fn from_catalog(catalog: &RecipeCatalog) -> Self {
        let documents: Vec<String> = catalog.recipes().iter().map(Recipe::ingredient_text).collect();
        Self::fit(&documents)
    }

    /// Project normalized text into the fitted space
    #[must_use]
    pub fn transform(&self, text: &str) -> SparseVector {
        let mut vector = SparseVector::new();
        for token in tokenize(text) {
            if let Some(&idx) = self.vocabulary.get(token) {
                *vector.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        for (idx, weight) in &mut vector {
            *weight *= self.idf[*idx];
        }

        let norm = vector.values().map(|w| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for weight in vector.values_mut() {
                *weight /= norm;
            }
        }
        vector
    }

    /// Cosine similarity of `text` against every fitted document
    #[must_use]
    pub fn scores(&self, text: &str) -> Vec<f64> {
        let query = self.transform(text);
        self.documents
            .iter()
            .map(|doc| cosine(&query, doc))
            .collect()
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }
}

/// Cosine similarity of two L2-normalized sparse vectors
fn cosine(a: &SparseVector, b: &SparseVector) -> f64 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    small
        .iter()
        .filter_map(|(idx, w)| large.get(idx).map(|v| w * v))
        .sum()
}

/// Rank recipes by ingredient-text similarity to the query terms.
///
/// Returns every recipe scoring strictly above `threshold`, or the `top_n`
/// closest recipes when none do. Output is ordered by score descending, then
/// recipe id ascending. Empty only for an empty catalog or an empty query.
pub fn rank_by_similarity<'a, S: AsRef<str>>(
    catalog: &'a RecipeCatalog,
    terms: &[S],
    threshold: f64,
    top_n: usize,
) -> Vec<(&'a Recipe, f64)> {
    let query_text = terms
        .iter()
        .map(|t| normalize(t.as_ref()))
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if query_text.is_empty() || catalog.is_empty() {
        return Vec::new();
    }

    let index = TfIdfIndex::from_catalog(catalog);
    let mut scored: Vec<(&Recipe, f64)> = catalog
        .recipes()
        .iter()
        .zip(index.scores(&query_text))
        .collect();
    scored.sort_by(|a, b| compare_similarity(*a, *b));

    let above = scored.iter().take_while(|(_, s)| *s > threshold).count();
    let keep = if above > 0 { above } else { top_n };
    scored.truncate(keep);

    tracing::debug!(
        query = %query_text,
        vocabulary = index.vocabulary_len(),
        above_threshold = above,
        returned = scored.len(),
        "Similarity search"
    );

    scored
}
