use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::error::{Error, Result};

pub const DEFAULT_DIMENSION: usize = 200;
pub const DEFAULT_DOC_ID_FIELD: &str = "path";
pub const DEFAULT_CONTENTS_FIELD: &str = "contents";

/// Term weighting scheme used when folding term vectors into a document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TermWeight {
    /// Raw term frequency, no global weight
    #[default]
    TermFrequency,
    /// `1 + ln(tf)` times the term's entropy weight in the corpus
    LogEntropy,
}

impl TermWeight {
    /// Resolve a scheme by name. Never fails: unknown names fall back to
    /// [`TermWeight::TermFrequency`].
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "logentropy" => TermWeight::LogEntropy,
            "termfrequency" | "none" | "" => TermWeight::TermFrequency,
            other => {
                tracing::warn!(
                    "Unknown term weighting scheme {:?}, using termfrequency",
                    other
                );
                TermWeight::TermFrequency
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TermWeight::TermFrequency => "termfrequency",
            TermWeight::LogEntropy => "logentropy",
        }
    }
}

// Config files go through the same lenient name resolution as the CLI
impl From<String> for TermWeight {
    fn from(name: String) -> Self {
        TermWeight::from_name(&name)
    }
}

impl From<TermWeight> for String {
    fn from(term_weight: TermWeight) -> Self {
        term_weight.name().to_string()
    }
}

impl fmt::Display for TermWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything a document vector build needs to know, resolved by the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocVectorConfig {
    pub output_path: PathBuf,
    pub dimension: usize,
    #[serde(default)]
    pub term_weight: TermWeight,
    pub fields_to_index: Vec<String>,
    pub doc_id_field: String,
}

impl DocVectorConfig {
    pub fn new<P: Into<PathBuf>>(output_path: P, dimension: usize) -> Self {
        Self {
            output_path: output_path.into(),
            dimension,
            term_weight: TermWeight::default(),
            fields_to_index: vec![DEFAULT_CONTENTS_FIELD.to_string()],
            doc_id_field: DEFAULT_DOC_ID_FIELD.to_string(),
        }
    }

    #[must_use]
    pub fn with_term_weight(mut self, term_weight: TermWeight) -> Self {
        self.term_weight = term_weight;
        self
    }

    #[must_use]
    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields_to_index = fields.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_doc_id_field(mut self, field: impl Into<String>) -> Self {
        self.doc_id_field = field.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.dimension == 0 {
            return Err(Error::InvalidConfig("dimension must be positive".to_string()));
        }
        if self.fields_to_index.is_empty() {
            return Err(Error::InvalidConfig("no fields to index".to_string()));
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(Error::InvalidConfig("output path is empty".to_string()));
        }
        Ok(())
    }
}
