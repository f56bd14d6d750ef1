// JSON corpus of pre-computed term frequencies
use semvec_core::{CorpusDocument, Error, InMemoryCorpus, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// On-disk shape of a corpus file
///
/// ```json
/// {"documents": [{"fields": {"path": "a.txt"}, "terms": {"contents": [["apple", 2]]}}]}
/// ```
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CorpusFile {
    #[serde(default)]
    pub documents: Vec<CorpusDocument>,
}

pub fn load_corpus<P: AsRef<Path>>(path: P) -> Result<InMemoryCorpus> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let parsed: CorpusFile = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| Error::Corpus(format!("{:?}: {}", path, e)))?;

    tracing::info!("Loaded {} documents from {:?}", parsed.documents.len(), path);
    Ok(InMemoryCorpus::new(parsed.documents))
}
