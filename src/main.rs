use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use semvec_core::{DocVectorConfig, TermVectorLookup, TermWeight};
use semvec_storage::{load_corpus, load_term_vectors, DocVectorBuilder};

/// Build document vectors from a term vector space and a corpus
#[derive(Parser, Debug)]
#[command(name = "semvec")]
#[command(about = "Superpose term vectors into normalized document vectors", long_about = None)]
struct Args {
    /// Term vector file (same binary format as the output)
    term_vectors: PathBuf,

    /// JSON corpus of per-document term frequencies
    corpus: PathBuf,

    /// Output file [default: <term_vectors without .bin>_docvectors.bin]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Vector dimension; must match the term vectors [default: taken from the term vector file]
    #[arg(short, long)]
    dimension: Option<usize>,

    /// Term weighting scheme: termfrequency or logentropy
    #[arg(long, default_value = "termfrequency")]
    termweight: String,

    /// Comma separated fields to index, in order
    #[arg(long, value_delimiter = ',', default_value = "contents")]
    contentsfields: Vec<String>,

    /// Stored field holding the document identifier
    #[arg(long, default_value = "path")]
    docidfield: String,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting semvec v{}", env!("CARGO_PKG_VERSION"));

    let terms = load_term_vectors(&args.term_vectors)
        .with_context(|| format!("loading term vectors from {:?}", args.term_vectors))?;
    let corpus = load_corpus(&args.corpus)
        .with_context(|| format!("loading corpus from {:?}", args.corpus))?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.term_vectors));

    let config = DocVectorConfig::new(output, args.dimension.unwrap_or(terms.dimension()))
        .with_term_weight(TermWeight::from_name(&args.termweight))
        .with_fields(args.contentsfields.iter().map(|f| f.trim()).filter(|f| !f.is_empty()))
        .with_doc_id_field(args.docidfield.clone());

    info!("Term weighting: {}", config.term_weight);
    info!("Contents fields are: {:?}", config.fields_to_index);
    info!("Document id field: {}", config.doc_id_field);

    let stats = DocVectorBuilder::new(&config, &terms, &corpus)
        .context("invalid configuration")?
        .build()
        .with_context(|| format!("writing document vectors to {:?}", config.output_path))?;

    if stats.empty_ids > 0 {
        info!("{} documents had an empty id", stats.empty_ids);
    }
    info!("Wrote {} document vectors to {:?}", stats.documents, config.output_path);
    Ok(())
}

/// `dir/terms.bin` becomes `dir/terms_docvectors.bin`
fn default_output_path(term_vectors: &Path) -> PathBuf {
    let name = term_vectors
        .file_name()
        .map(|n| n.to_string_lossy().replace(".bin", ""))
        .unwrap_or_else(|| "termvectors".to_string());
    term_vectors.with_file_name(format!("{}_docvectors.bin", name))
}
