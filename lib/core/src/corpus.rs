// Corpus collaborator: per-document stored fields and term frequencies
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::weighting::GlobalWeights;

/// One `(term, frequency)` entry of a document field
///
/// Serialized as a two element array, `["term", 3]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, u32)", into = "(String, u32)")]
pub struct TermFreq {
    pub term: String,
    pub frequency: u32,
}

impl TermFreq {
    pub fn new(term: impl Into<String>, frequency: u32) -> Self {
        Self {
            term: term.into(),
            frequency,
        }
    }
}

impl From<(String, u32)> for TermFreq {
    fn from((term, frequency): (String, u32)) -> Self {
        Self { term, frequency }
    }
}

impl From<TermFreq> for (String, u32) {
    fn from(tf: TermFreq) -> Self {
        (tf.term, tf.frequency)
    }
}

/// Read-only view over a corpus of documents with term frequency data
pub trait CorpusIterator: GlobalWeights {
    fn document_count(&self) -> usize;

    /// Value of a stored field (e.g. the document id field), if the document has it
    fn stored_field(&self, doc: usize, field: &str) -> Option<&str>;

    /// Term frequencies of `field` in document `doc`, `None` when the field has no data
    fn term_frequencies(&self, doc: usize, field: &str) -> Option<&[TermFreq]>;
}

/// A single document as held by [`InMemoryCorpus`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorpusDocument {
    /// Stored field values, used for the document identifier
    #[serde(default)]
    pub fields: HashMap<String, String>,
    /// Field name -> term frequencies
    #[serde(default)]
    pub terms: HashMap<String, Vec<TermFreq>>,
}

impl CorpusDocument {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_terms<I, S>(mut self, field: impl Into<String>, terms: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        self.terms
            .entry(field.into())
            .or_default()
            .extend(terms.into_iter().map(|(t, f)| TermFreq::new(t, f)));
        self
    }
}

/// Corpus held entirely in memory, with log-entropy statistics precomputed
#[derive(Debug, Clone, Default)]
pub struct InMemoryCorpus {
    documents: Vec<CorpusDocument>,
    // field -> term -> 1 + sum(p log2 p) / log2 N
    entropy: AHashMap<String, AHashMap<String, f32>>,
}

impl InMemoryCorpus {
    /// Build the corpus. Zero frequencies are dropped here so they never
    /// reach the weighting scheme.
    pub fn new(mut documents: Vec<CorpusDocument>) -> Self {
        let mut dropped = 0usize;
        for doc in &mut documents {
            for tfs in doc.terms.values_mut() {
                let before = tfs.len();
                tfs.retain(|tf| tf.frequency > 0);
                dropped += before - tfs.len();
            }
        }
        if dropped > 0 {
            tracing::debug!("Dropped {} zero-frequency term entries", dropped);
        }

        let entropy = compute_entropy(&documents);
        Self { documents, entropy }
    }

}

fn compute_entropy(documents: &[CorpusDocument]) -> AHashMap<String, AHashMap<String, f32>> {
    // (field, term) -> [(doc, tf)], tf summed per document
    let mut postings: AHashMap<(String, String), Vec<(usize, u64)>> = AHashMap::new();
    for (doc_idx, doc) in documents.iter().enumerate() {
        for (field, tfs) in &doc.terms {
            for tf in tfs {
                let entries = postings
                    .entry((field.clone(), tf.term.clone()))
                    .or_default();
                match entries.last_mut() {
                    Some((last, freq)) if *last == doc_idx => *freq += u64::from(tf.frequency),
                    _ => entries.push((doc_idx, u64::from(tf.frequency))),
                }
            }
        }
    }

    let n = documents.len() as f64;
    let log2n = n.log2();

    let mut entropy: AHashMap<String, AHashMap<String, f32>> = AHashMap::new();
    for ((field, term), entries) in postings {
        let weight = if n <= 1.0 {
            1.0
        } else {
            let gf: u64 = entries.iter().map(|&(_, f)| f).sum();
            let gf = gf as f64;
            let plogp: f64 = entries
                .iter()
                .map(|&(_, f)| {
                    let p = f as f64 / gf;
                    p * p.log2()
                })
                .sum();
            (1.0 + plogp / log2n).max(0.0) as f32
        };
        entropy.entry(field).or_default().insert(term, weight);
    }
    entropy
}

impl GlobalWeights for InMemoryCorpus {
    /// Terms never seen in `field` get a neutral weight of 1
    fn global_weight(&self, term: &str, field: &str) -> f32 {
        self.entropy
            .get(field)
            .and_then(|terms| terms.get(term))
            .copied()
            .unwrap_or(1.0)
    }
}

impl CorpusIterator for InMemoryCorpus {
    #[inline]
    fn document_count(&self) -> usize {
        self.documents.len()
    }

    fn stored_field(&self, doc: usize, field: &str) -> Option<&str> {
        self.documents
            .get(doc)
            .and_then(|d| d.fields.get(field))
            .map(String::as_str)
    }

    fn term_frequencies(&self, doc: usize, field: &str) -> Option<&[TermFreq]> {
        self.documents
            .get(doc)
            .and_then(|d| d.terms.get(field))
            .map(Vec::as_slice)
    }
}
