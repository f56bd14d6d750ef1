/// Receives the running document count at progress milestones
///
/// Purely informational; nothing about the output depends on it.
pub trait ProgressReporter {
    fn documents_processed(&mut self, count: usize);
}

impl<F: FnMut(usize)> ProgressReporter for F {
    fn documents_processed(&mut self, count: usize) {
        self(count)
    }
}

/// Logs milestones at debug level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingProgress;

impl ProgressReporter for TracingProgress {
    fn documents_processed(&mut self, count: usize) {
        tracing::debug!("Processed {} documents ...", count);
    }
}

/// Every 10k documents up to 50k, then every 50k
#[inline]
pub fn is_milestone(count: usize) -> bool {
    count > 0 && (count % 50_000 == 0 || (count < 50_000 && count % 10_000 == 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_milestones() {
        assert!(!is_milestone(0));
        assert!(!is_milestone(5_000));
        assert!(is_milestone(10_000));
        assert!(is_milestone(40_000));
        assert!(is_milestone(50_000));
        assert!(!is_milestone(60_000));
        assert!(is_milestone(100_000));
    }

    #[test]
    fn test_closure_reporter() {
        let mut seen = Vec::new();
        {
            let mut reporter = |n: usize| seen.push(n);
            reporter.documents_processed(10_000);
        }
        assert_eq!(seen, vec![10_000]);
    }
}
