// Local and global term weighting for document vector accumulation
use crate::config::TermWeight;

/// Source of corpus-level term informativeness
///
/// Implemented by corpora that track term statistics. The score is
/// non-negative; higher means more discriminative.
pub trait GlobalWeights {
    fn global_weight(&self, term: &str, field: &str) -> f32;
}

/// Computes the scalar weight of a `(term, field, frequency)` observation
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightingScheme {
    term_weight: TermWeight,
}

impl WeightingScheme {
    #[inline]
    #[must_use]
    pub fn new(term_weight: TermWeight) -> Self {
        Self { term_weight }
    }

    /// Resolve a scheme by name; unknown names mean raw term frequency
    pub fn from_name(name: &str) -> Self {
        Self::new(TermWeight::from_name(name))
    }

    #[inline]
    pub fn term_weight(&self) -> TermWeight {
        self.term_weight
    }

    /// Weight derived from the frequency alone. `frequency` must be at least 1.
    #[inline]
    pub fn local_weight(&self, frequency: u32) -> f32 {
        debug_assert!(frequency >= 1, "zero frequencies are filtered by the caller");
        let tf = frequency as f32;
        match self.term_weight {
            TermWeight::TermFrequency => tf,
            TermWeight::LogEntropy => 1.0 + tf.ln(),
        }
    }

    /// Full weight: local weight times the global weight the scheme asks for
    pub fn weight<G>(&self, term: &str, field: &str, frequency: u32, globals: &G) -> f32
    where
        G: GlobalWeights + ?Sized,
    {
        let local = self.local_weight(frequency);
        let global = match self.term_weight {
            TermWeight::TermFrequency => 1.0,
            TermWeight::LogEntropy => globals.global_weight(term, field).max(0.0),
        };
        local * global
    }
}
