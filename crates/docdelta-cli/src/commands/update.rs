//! Update command
//!
//! Usage: docdelta update --csv <FILE> [--old-csv <FILE>] [-a f1,f2] [-i f1] [--dry-run]

use clap::Args;
use docdelta_core::{BatchBuilder, BatchConfig, Document, ExError, FieldAllowList};
use docdelta_core_types::RequestId;
use docdelta_ingest::{open_input, parse_csv, ParseOptions};
use docdelta_solr::{SolrClient, SolrConfig, UpdateTransport};
use std::collections::BTreeSet;
use std::io::Write;

#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// Solr host (host:port)
    #[arg(long, default_value = "localhost:8983")]
    pub host: String,

    /// Solr collection
    #[arg(long, default_value = "test")]
    pub collection: String,

    /// CSV with the documents as they should be indexed ("-" for stdin)
    #[arg(long, default_value = "-")]
    pub csv: String,

    /// CSV with the documents as they are currently indexed
    #[arg(long)]
    pub old_csv: Option<String>,

    /// Fields to consider (default: all fields)
    #[arg(short = 'a', long, value_delimiter = ',')]
    pub allowed_fields: Option<Vec<String>>,

    /// Fields that may be updated in place
    #[arg(short = 'i', long = "inplace-fields", value_delimiter = ',')]
    pub inplace_fields: Vec<String>,

    /// CSV whose id column lists documents to delete
    #[arg(long)]
    pub delete_csv: Option<String>,

    /// Delete documents present in --old-csv but absent from --csv
    #[arg(long, requires = "old_csv")]
    pub delete_missing: bool,

    /// Parse numeric-looking cells as numbers
    #[arg(long)]
    pub infer_types: bool,

    /// Print the update body without sending it
    #[arg(long)]
    pub dry_run: bool,
}

/// Execute update command
pub fn execute(args: UpdateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let request_id = RequestId::new();
    let span = tracing::info_span!("update", request_id = %request_id);
    let _guard = span.enter();

    let options = ParseOptions::new().with_infer_types(args.infer_types);
    let config = batch_config(&args);

    let documents = read_documents(&args.csv, &options)?;
    let old_documents = match &args.old_csv {
        Some(path) => read_documents(path, &options)?,
        None => Vec::new(),
    };

    let mut builder = BatchBuilder::new(config);

    if args.delete_missing {
        let new_ids: BTreeSet<&str> = documents.iter().map(Document::id).collect();
        let missing: Vec<String> = old_documents
            .iter()
            .map(Document::id)
            .filter(|id| !new_ids.contains(id))
            .map(str::to_string)
            .collect();
        builder.delete_all(missing);
    }

    if let Some(path) = &args.delete_csv {
        let deletes = read_documents(path, &ParseOptions::new())?;
        builder.delete_all(deletes.iter().map(Document::id));
    }

    builder.add_all(documents);
    builder.add_old_all(old_documents);

    println!("allowed fields: {}", describe_allowed(builder.config().allowed_fields()));
    println!("inplace fields: {}", describe_keys(builder.config().in_place_fields()));

    let (body, summary) = builder.build_with_summary().map_err(ExError::from)?;
    println!("{}", body);
    tracing::info!(
        full_adds = summary.full_adds,
        in_place_adds = summary.in_place_adds,
        skipped = summary.skipped,
        deletes = summary.deletes,
        "batch built"
    );

    if args.dry_run {
        return Ok(());
    }

    let client = SolrClient::new(SolrConfig::new(args.host, args.collection)).map_err(ExError::from)?;
    let mut response = client.update(&body).map_err(ExError::from)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    std::io::copy(&mut response, &mut out)?;
    writeln!(out)?;

    Ok(())
}

fn batch_config(args: &UpdateArgs) -> BatchConfig {
    let allowed = match &args.allowed_fields {
        Some(keys) => FieldAllowList::only(keys.iter().cloned()),
        None => FieldAllowList::all(),
    };
    BatchConfig::new()
        .with_allowed_fields(allowed)
        .with_in_place_fields(args.inplace_fields.iter().cloned())
}

fn read_documents(path: &str, options: &ParseOptions) -> Result<Vec<Document>, ExError> {
    let reader = open_input(path).map_err(ExError::from)?;
    parse_csv(reader, options).map_err(ExError::from)
}

fn describe_allowed(allowed: &FieldAllowList) -> String {
    match allowed.keys() {
        Some(keys) => describe_keys(keys),
        None => "(all)".to_string(),
    }
}

fn describe_keys(keys: &BTreeSet<String>) -> String {
    let keys: Vec<&str> = keys.iter().map(String::as_str).collect();
    format!("[{}]", keys.join(", "))
}
