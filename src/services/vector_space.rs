use std::collections::{BTreeMap, BTreeSet};

/// Shortest token kept by the tokenizer
const MIN_TOKEN_CHARS: usize = 2;

/// Splits text into lowercase word tokens
///
/// A token is a maximal run of alphanumeric characters or underscores.
/// Single-character runs are dropped.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|word| word.chars().count() >= MIN_TOKEN_CHARS)
        .map(str::to_lowercase)
        .collect()
}

/// Sparse vector stored as `(dimension, weight)` pairs sorted by dimension
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    fn from_sorted(entries: Vec<(usize, f64)>) -> Self {
        Self { entries }
    }

    pub fn magnitude(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (da, wa) = self.entries[i];
            let (db, wb) = other.entries[j];
            match da.cmp(&db) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += wa * wb;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    fn normalize(&mut self) {
        let norm = self.magnitude();
        if norm > 0.0 {
            for (_, w) in self.entries.iter_mut() {
                *w /= norm;
            }
        }
    }
}

/// Cosine similarity between two vectors
///
/// Defined as `0.0` when either vector has zero magnitude, so a movie
/// without genre terms is dissimilar to everything instead of producing NaN.
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    let norm_a = a.magnitude();
    let norm_b = b.magnitude();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (a.dot(b) / (norm_a * norm_b)).clamp(0.0, 1.0)
}

/// Term to dimension mapping with the IDF weight of each dimension
#[derive(Debug, Clone)]
pub struct Vocabulary {
    terms: BTreeMap<String, usize>,
    idf: Vec<f64>,
}

impl Vocabulary {
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn dimension(&self, term: &str) -> Option<usize> {
        self.terms.get(term).copied()
    }

    pub fn idf(&self, dimension: usize) -> Option<f64> {
        self.idf.get(dimension).copied()
    }
}

/// TF-IDF vector space fitted over a fixed set of documents
///
/// The vocabulary and the document vectors are produced together by
/// [`VectorSpace::fit`]. There is no way to add documents afterwards.
#[derive(Debug, Clone)]
pub struct VectorSpace {
    vocabulary: Vocabulary,
    vectors: Vec<SparseVector>,
}

impl VectorSpace {
    /// Fits the vocabulary and one L2-normalized TF-IDF vector per document
    ///
    /// IDF is smoothed as `ln((1 + n) / (1 + df)) + 1`, so terms present in
    /// every document still carry a small positive weight.
    pub fn fit<S: AsRef<str>>(documents: &[S]) -> Self {
        let tokenized: Vec<Vec<String>> =
            documents.iter().map(|d| tokenize(d.as_ref())).collect();

        let distinct: BTreeSet<&str> = tokenized
            .iter()
            .flat_map(|tokens| tokens.iter().map(String::as_str))
            .collect();
        let terms: BTreeMap<String, usize> = distinct
            .into_iter()
            .enumerate()
            .map(|(dim, term)| (term.to_string(), dim))
            .collect();

        let mut doc_freq = vec![0usize; terms.len()];
        let counts: Vec<BTreeMap<usize, usize>> = tokenized
            .iter()
            .map(|tokens| {
                let mut tf: BTreeMap<usize, usize> = BTreeMap::new();
                for token in tokens {
                    if let Some(&dim) = terms.get(token) {
                        *tf.entry(dim).or_insert(0) += 1;
                    }
                }
                for dim in tf.keys() {
                    doc_freq[*dim] += 1;
                }
                tf
            })
            .collect();

        let n = documents.len() as f64;
        let idf: Vec<f64> = doc_freq
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        let vectors = counts
            .into_iter()
            .map(|tf| {
                let mut vector = SparseVector::from_sorted(
                    tf.into_iter()
                        .map(|(dim, count)| (dim, count as f64 * idf[dim]))
                        .collect(),
                );
                vector.normalize();
                vector
            })
            .collect();

        Self {
            vocabulary: Vocabulary { terms, idf },
            vectors,
        }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn vector(&self, index: usize) -> Option<&SparseVector> {
        self.vectors.get(index)
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Cosine similarity of document `index` against every document, in order
    pub fn similarities(&self, index: usize) -> Option<Vec<f64>> {
        let query = self.vectors.get(index)?;
        Some(
            self.vectors
                .iter()
                .map(|other| cosine_similarity(query, other))
                .collect(),
        )
    }
}
