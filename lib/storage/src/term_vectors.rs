use semvec_core::{Result, TermVectorLookup, TermVectorStore};
use std::path::Path;

use crate::reader::DocVectorReader;

/// Load a term vector file into memory
///
/// Term vector files share the document vector layout: a `-dimensions`
/// header followed by `(term, vector)` records. A repeated term keeps its
/// last vector.
pub fn load_term_vectors<P: AsRef<Path>>(path: P) -> Result<TermVectorStore> {
    let path = path.as_ref();
    let reader = DocVectorReader::open(path)?;
    let mut store = TermVectorStore::new(reader.dimension());

    let mut duplicates = 0usize;
    for record in reader {
        let (term, vector) = record?;
        if store.insert(term, vector).is_some() {
            duplicates += 1;
        }
    }
    if duplicates > 0 {
        tracing::warn!("{} duplicate terms in {:?}, kept the last of each", duplicates, path);
    }

    tracing::info!(
        "Loaded {} term vectors of dimension {} from {:?}",
        store.len(),
        store.dimension(),
        path
    );
    Ok(store)
}
