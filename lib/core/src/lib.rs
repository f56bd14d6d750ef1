//! # semvec Core
//!
//! Core library for building semantic document vectors.
//!
//! A document vector is the normalized, weighted sum of the pre-trained
//! vectors of the terms a document contains. This crate provides:
//!
//! - [`Vector`] - Dense vector with SIMD superposition and normalization
//! - [`WeightingScheme`] - Raw term frequency or log-entropy weighting
//! - [`DocumentAccumulator`] - Per-document running sum
//! - [`TermVectorLookup`] / [`CorpusIterator`] - The read-only collaborators
//! - [`TermVectorStore`] / [`InMemoryCorpus`] - In-memory implementations
//!
//! ## Example
//!
//! ```rust
//! use semvec_core::{DocumentAccumulator, TermVectorLookup, TermVectorStore, Vector};
//!
//! let mut terms = TermVectorStore::new(2);
//! terms.insert("apple", Vector::new(vec![1.0, 0.0]));
//!
//! let mut acc = DocumentAccumulator::begin(2);
//! acc.contribute(terms.get("apple"), 3.0);
//! acc.contribute(terms.get("unknown"), 1.0);
//! assert_eq!(acc.finish().as_slice(), &[1.0, 0.0]);
//! ```

pub mod accumulator;
pub mod config;
pub mod corpus;
pub mod error;
pub mod lookup;
pub mod progress;
pub mod vector;
pub mod weighting;

/// SIMD-optimized vector kernels
///
/// AVX2/FMA on x86_64 with a scalar fallback elsewhere.
pub mod simd;

pub use accumulator::DocumentAccumulator;
pub use config::{DocVectorConfig, TermWeight};
pub use corpus::{CorpusDocument, CorpusIterator, InMemoryCorpus, TermFreq};
pub use error::{Error, Result};
pub use lookup::{TermVectorLookup, TermVectorStore};
pub use progress::{ProgressReporter, TracingProgress};
pub use vector::Vector;
pub use weighting::{GlobalWeights, WeightingScheme};
