use crate::vector::Vector;

/// Running weighted sum of term vectors for one document
///
/// The lifecycle is encoded in ownership: [`DocumentAccumulator::begin`]
/// starts accumulating, [`contribute`](DocumentAccumulator::contribute) may
/// be called any number of times, and [`finish`](DocumentAccumulator::finish)
/// consumes the accumulator and hands back the normalized vector. No state
/// survives into the next document.
#[derive(Debug)]
pub struct DocumentAccumulator {
    vector: Vector,
    contributions: usize,
    skipped: usize,
}

impl DocumentAccumulator {
    #[inline]
    #[must_use]
    pub fn begin(dimension: usize) -> Self {
        Self {
            vector: Vector::zeros(dimension),
            contributions: 0,
            skipped: 0,
        }
    }

    /// Superpose `weight * term_vector` into the running sum.
    ///
    /// Missing, empty or mismatched term vectors are vocabulary gaps and are
    /// skipped. Returns whether the vector was folded in.
    pub fn contribute(&mut self, term_vector: Option<&Vector>, weight: f32) -> bool {
        let Some(term_vector) = term_vector else {
            self.skipped += 1;
            return false;
        };
        if term_vector.is_empty() || term_vector.dim() != self.vector.dim() {
            self.skipped += 1;
            return false;
        }
        match self.vector.superpose(term_vector, weight) {
            Ok(()) => {
                self.contributions += 1;
                true
            }
            Err(_) => {
                self.skipped += 1;
                false
            }
        }
    }

    /// Number of term vectors folded in so far
    #[inline]
    pub fn contributions(&self) -> usize {
        self.contributions
    }

    /// Number of observations skipped as vocabulary gaps
    #[inline]
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Normalize and return the document vector
    #[must_use]
    pub fn finish(self) -> Vector {
        let mut vector = self.vector;
        vector.normalize();
        vector
    }
}
