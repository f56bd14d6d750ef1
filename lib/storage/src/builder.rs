use semvec_core::progress::is_milestone;
use semvec_core::{
    CorpusIterator, DocVectorConfig, DocumentAccumulator, Error, ProgressReporter, Result,
    TermVectorLookup, TracingProgress, WeightingScheme,
};
use std::borrow::Cow;
use tracing::{info, warn};

use crate::writer::DocVectorWriter;

/// Summary of a finished build
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Records written, one per corpus document
    pub documents: usize,
    /// Documents whose id field was present but empty
    pub empty_ids: usize,
    /// Term vectors folded into document vectors
    pub contributions: usize,
    /// Term observations with no usable term vector
    pub skipped_terms: usize,
}

/// Builds one normalized vector per corpus document and streams them to disk
///
/// Documents are processed strictly one at a time, in corpus order: every
/// configured field is folded into a single accumulator and exactly one
/// record is written once all fields are done.
pub struct DocVectorBuilder<'a, L: ?Sized, C: ?Sized> {
    config: &'a DocVectorConfig,
    terms: &'a L,
    corpus: &'a C,
    scheme: WeightingScheme,
}

impl<'a, L, C> DocVectorBuilder<'a, L, C>
where
    L: TermVectorLookup + ?Sized,
    C: CorpusIterator + ?Sized,
{
    /// Validate the configuration against the term vector space
    pub fn new(config: &'a DocVectorConfig, terms: &'a L, corpus: &'a C) -> Result<Self> {
        config.validate()?;
        if terms.dimension() != config.dimension {
            return Err(Error::InvalidConfig(format!(
                "term vectors have dimension {}, configured dimension is {}",
                terms.dimension(),
                config.dimension
            )));
        }

        Ok(Self {
            config,
            terms,
            corpus,
            scheme: WeightingScheme::new(config.term_weight),
        })
    }

    pub fn build(&self) -> Result<BuildStats> {
        self.build_with_progress(&mut TracingProgress)
    }

    pub fn build_with_progress(&self, progress: &mut dyn ProgressReporter) -> Result<BuildStats> {
        let dimension = self.config.dimension;
        let mut writer = DocVectorWriter::create(&self.config.output_path)?;
        info!("Write vectors incrementally to file {:?}", writer.path());

        writer.write_header(dimension)?;

        let mut stats = BuildStats::default();
        for doc in 0..self.corpus.document_count() {
            if is_milestone(doc) {
                progress.documents_processed(doc);
            }

            let doc_id = self.resolve_doc_id(doc, &mut stats);

            let mut acc = DocumentAccumulator::begin(dimension);
            for field in &self.config.fields_to_index {
                let Some(term_freqs) = self.corpus.term_frequencies(doc, field) else {
                    continue;
                };
                for tf in term_freqs {
                    if tf.frequency == 0 {
                        continue;
                    }
                    let weight = self.scheme.weight(&tf.term, field, tf.frequency, self.corpus);
                    acc.contribute(self.terms.get(&tf.term), weight);
                }
            }

            stats.contributions += acc.contributions();
            stats.skipped_terms += acc.skipped();

            // All fields in the document have been processed
            writer.write_record(&doc_id, &acc.finish())?;
            stats.documents += 1;
        }

        writer.finish()?;
        info!(
            "Finished writing vectors for {} documents ({} term contributions, {} skipped)",
            stats.documents, stats.contributions, stats.skipped_terms
        );
        Ok(stats)
    }

    fn resolve_doc_id(&self, doc: usize, stats: &mut BuildStats) -> Cow<'a, str> {
        match self.corpus.stored_field(doc, &self.config.doc_id_field) {
            Some(id) => {
                if id.is_empty() {
                    stats.empty_ids += 1;
                    warn!(
                        "Empty document id for document {}; set the doc id field to a non-empty field ({:?})",
                        doc, self.config.doc_id_field
                    );
                }
                Cow::Borrowed(id)
            }
            None => Cow::Owned(doc.to_string()),
        }
    }
}
