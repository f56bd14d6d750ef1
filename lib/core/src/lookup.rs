use ahash::AHashMap;

use crate::vector::Vector;

/// Read-only mapping from a term to its pre-trained vector
///
/// A term outside the trained vocabulary is `None`, never an error.
pub trait TermVectorLookup {
    fn get(&self, term: &str) -> Option<&Vector>;

    /// Dimension shared by every vector in the space
    fn dimension(&self) -> usize;
}

/// In-memory term vector space
#[derive(Debug, Clone, Default)]
pub struct TermVectorStore {
    dimension: usize,
    vectors: AHashMap<String, Vector>,
}

impl TermVectorStore {
    #[must_use]
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            vectors: AHashMap::new(),
        }
    }

    /// Insert or replace a term vector, returning the previous one
    ///
    /// Vectors of a different dimension are stored as given; they are
    /// skipped at accumulation time like any other vocabulary gap.
    pub fn insert(&mut self, term: impl Into<String>, vector: Vector) -> Option<Vector> {
        self.vectors.insert(term.into(), vector)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

impl TermVectorLookup for TermVectorStore {
    #[inline]
    fn get(&self, term: &str) -> Option<&Vector> {
        self.vectors.get(term)
    }

    #[inline]
    fn dimension(&self) -> usize {
        self.dimension
    }
}
