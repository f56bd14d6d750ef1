//! # semvec Storage
//!
//! Binary vector files and the document vector build that produces them.
//!
//! - [`DocVectorWriter`] / [`DocVectorReader`] - the `-dimensions` file format
//! - [`DocVectorBuilder`] - drives corpus -> weighting -> accumulation -> writer
//! - [`load_term_vectors`] / [`load_corpus`] - inputs from disk

pub mod builder;
pub mod codec;
pub mod corpus_file;
pub mod reader;
pub mod term_vectors;
pub mod writer;

pub use builder::{BuildStats, DocVectorBuilder};
pub use codec::{VectorInput, VectorOutput};
pub use corpus_file::{load_corpus, CorpusFile};
pub use reader::DocVectorReader;
pub use term_vectors::load_term_vectors;
pub use writer::{DocVectorWriter, DIMENSIONS_MARKER};
