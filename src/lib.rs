//! # semvec
//!
//! Incremental document vectors for semantic indexing.
//!
//! Given a pre-trained term vector space and a corpus of per-document term
//! frequencies, semvec superposes the weighted term vectors of every
//! document into one normalized vector and streams the results to a
//! compact binary file, one document at a time.
//!
//! ## Quick Start
//!
//! ### From the command line
//!
//! ```bash
//! semvec termvectors.bin corpus.json --termweight logentropy
//! # writes termvectors_docvectors.bin
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use semvec::prelude::*;
//!
//! let terms = load_term_vectors("termvectors.bin").unwrap();
//! let corpus = load_corpus("corpus.json").unwrap();
//!
//! let config = DocVectorConfig::new("docvectors.bin", terms.dimension())
//!     .with_term_weight(TermWeight::LogEntropy)
//!     .with_fields(["title", "contents"]);
//!
//! let stats = DocVectorBuilder::new(&config, &terms, &corpus)
//!     .unwrap()
//!     .build()
//!     .unwrap();
//! println!("wrote {} document vectors", stats.documents);
//! ```
//!
//! ## File Format
//!
//! Little-endian throughout. A string is a `u32` byte length followed by
//! UTF-8 bytes.
//!
//! ```text
//! string "-dimensions"  int32 D
//! string doc_id          float32 x D     (repeated, corpus order)
//! ```
//!
//! ## Crate Structure
//!
//! - [`semvec-core`](https://docs.rs/semvec-core) - Vector, weighting, accumulation, collaborator traits
//! - [`semvec-storage`](https://docs.rs/semvec-storage) - File format, loaders and the builder

// Re-export core types
pub use semvec_core::{
    CorpusDocument, CorpusIterator, DocVectorConfig, DocumentAccumulator, Error,
    GlobalWeights, InMemoryCorpus, ProgressReporter, Result, TermFreq, TermVectorLookup,
    TermVectorStore, TermWeight, TracingProgress, Vector, WeightingScheme,
};

// Re-export storage
pub use semvec_storage::{
    load_corpus, load_term_vectors, BuildStats, DocVectorBuilder, DocVectorReader,
    DocVectorWriter,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        load_corpus, load_term_vectors, BuildStats, CorpusDocument, CorpusIterator,
        DocVectorBuilder, DocVectorConfig, DocVectorReader, DocVectorWriter, DocumentAccumulator,
        Error, InMemoryCorpus, Result, TermVectorLookup, TermVectorStore, TermWeight, Vector,
        WeightingScheme,
    };
}

/// SIMD-optimized vector kernels
pub mod simd {
    pub use semvec_core::simd::{axpy_simd, dot_product_simd, norm_simd};
}
