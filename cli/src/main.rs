//! pdfnode CLI - PDF to content graph records

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use pdfnode::{
    DocumentRecord, FileLoader, MemoryLoader, NamespacedIds, NodeSink, PdfTransformer,
    SourceDocument, TransformOptions,
};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "pdfnode")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Turn PDF files into content graph records", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Transform one PDF and print its record as JSON
    Record {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Source document id (defaults to the file path)
        #[arg(long, value_name = "ID")]
        parent_id: Option<String>,

        /// Media type of the source document (guessed from the extension if not specified)
        #[arg(long, value_name = "TYPE")]
        media_type: Option<String>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        transform: TransformArgs,
    },

    /// Transform many PDFs concurrently into JSON lines
    Batch {
        /// Input PDF files
        #[arg(value_name = "FILES", required = true)]
        inputs: Vec<PathBuf>,

        /// Output JSONL file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Maximum number of documents in flight
        #[arg(short, long, default_value = "4", env = "PDFNODE_JOBS")]
        jobs: usize,

        #[command(flatten)]
        transform: TransformArgs,
    },

    /// Show a summary of the record for a PDF
    Info {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        transform: TransformArgs,
    },

    /// Show version information
    Version,
}

#[derive(Args, Clone, Copy)]
struct TransformArgs {
    /// Interpret document dates as UTC instead of local time
    #[arg(long)]
    utc: bool,

    /// Leave the stack out of captured errors
    #[arg(long)]
    no_stack: bool,
}

/// The CLI prints the returned records itself, so emissions are dropped.
struct DiscardSink;

impl NodeSink for DiscardSink {
    fn create_node(&self, _record: &DocumentRecord) {}

    fn create_parent_child_link(&self, _parent: &SourceDocument, _child: &DocumentRecord) {}
}

impl From<TransformArgs> for TransformOptions {
    fn from(args: TransformArgs) -> Self {
        let options = TransformOptions::new().with_stack(!args.no_stack);
        if args.utc {
            options.utc()
        } else {
            options
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Record {
            input,
            parent_id,
            media_type,
            output,
            compact,
            transform,
        } => cmd_record(
            &input,
            parent_id,
            media_type,
            output.as_deref(),
            compact,
            transform,
        ),
        Commands::Batch {
            inputs,
            output,
            jobs,
            transform,
        } => cmd_batch(inputs, output.as_deref(), jobs, transform),
        Commands::Info { input, transform } => cmd_info(&input, transform),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Transform a single file, keyed by `parent_id` when given.
fn transform_file(
    input: &Path,
    parent_id: Option<String>,
    media_type: Option<String>,
    transform: TransformArgs,
) -> CliResult<Option<DocumentRecord>> {
    let guessed = FileLoader::source_for(input);
    let document = SourceDocument::new(
        parent_id.unwrap_or(guessed.id),
        media_type.unwrap_or(guessed.media_type),
    );

    let rt = tokio::runtime::Runtime::new()?;
    let record = rt.block_on(async {
        let bytes = tokio::fs::read(input).await?;
        let loader = MemoryLoader::new().with_content(document.id.clone(), bytes);
        let record = PdfTransformer::with_options(transform.into())
            .transform(&document, &loader, &NamespacedIds::default(), &DiscardSink)
            .await?;
        Ok::<_, Box<dyn std::error::Error>>(record)
    })?;

    if record.is_none() {
        log::info!("{} is not a PDF ({})", input.display(), document.media_type);
    }
    Ok(record)
}

fn cmd_record(
    input: &Path,
    parent_id: Option<String>,
    media_type: Option<String>,
    output: Option<&Path>,
    compact: bool,
    transform: TransformArgs,
) -> CliResult<()> {
    let Some(record) = transform_file(input, parent_id, media_type, transform)? else {
        println!("{} {}", "Skipped (not a PDF):".yellow(), input.display());
        return Ok(());
    };

    let json = if compact {
        serde_json::to_string(&record)?
    } else {
        serde_json::to_string_pretty(&record)?
    };

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_batch(
    inputs: Vec<PathBuf>,
    output: Option<&Path>,
    jobs: usize,
    transform: TransformArgs,
) -> CliResult<()> {
    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let rt = tokio::runtime::Runtime::new()?;
    let results = rt.block_on(async {
        let transformer = Arc::new(PdfTransformer::with_options(transform.into()));
        let loader = Arc::new(FileLoader::new());
        let ids = Arc::new(NamespacedIds::default());
        let permits = Arc::new(Semaphore::new(jobs.max(1)));

        let mut tasks = JoinSet::new();
        for (index, input) in inputs.iter().enumerate() {
            let document = FileLoader::source_for(input);
            let (transformer, loader, ids, permits) = (
                transformer.clone(),
                loader.clone(),
                ids.clone(),
                permits.clone(),
            );
            tasks.spawn(async move {
                let _permit = permits.acquire_owned().await;
                let result = transformer
                    .transform(&document, loader.as_ref(), ids.as_ref(), &DiscardSink)
                    .await;
                (index, result)
            });
        }

        let mut results = Vec::with_capacity(inputs.len());
        while let Some(joined) = tasks.join_next().await {
            let (index, result) = joined?;
            pb.set_message(inputs[index].display().to_string());
            pb.inc(1);
            results.push((index, result));
        }
        Ok::<_, Box<dyn std::error::Error>>(results)
    })?;
    pb.finish_and_clear();

    let mut results = results;
    results.sort_by_key(|(index, _)| *index);

    let mut out: Box<dyn Write> = match output {
        Some(path) => Box::new(fs::File::create(path)?),
        None => Box::new(std::io::stdout().lock()),
    };

    let (mut written, mut captured, mut skipped, mut unreadable) = (0, 0, 0, 0);
    for (index, result) in results {
        match result {
            Ok(Some(record)) => {
                if !record.is_success() {
                    captured += 1;
                }
                writeln!(out, "{}", serde_json::to_string(&record)?)?;
                written += 1;
            }
            Ok(None) => skipped += 1,
            Err(e) => {
                log::warn!("Could not read {}: {}", inputs[index].display(), e);
                unreadable += 1;
            }
        }
    }
    out.flush()?;

    eprintln!(
        "{} {} records ({} with errors), {} skipped, {} unreadable",
        "Done!".green().bold(),
        written,
        captured,
        skipped,
        unreadable
    );
    if let Some(path) = output {
        eprintln!("{} {}", "Saved to".green(), path.display());
    }

    Ok(())
}

fn cmd_info(input: &Path, transform: TransformArgs) -> CliResult<()> {
    let Some(record) = transform_file(input, None, None, transform)? else {
        println!("{} {}", "Skipped (not a PDF):".yellow(), input.display());
        return Ok(());
    };

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Id".bold(), record.id);
    println!("{}: {}", "Digest".bold(), record.content_digest);
    println!("{}: {}", "Pages".bold(), record.number_of_pages());

    if let Some(metadata) = record.metadata() {
        println!("{}: PDF {}", "Format".bold(), metadata.pdf_version);
        for (label, value) in [
            ("Title", &metadata.title),
            ("Author", &metadata.author),
            ("Subject", &metadata.subject),
            ("Creator", &metadata.creator),
            ("Created", &metadata.created_date),
            ("Modified", &metadata.modified_date),
        ] {
            if !value.is_empty() {
                println!("{}: {}", label.bold(), value);
            }
        }
        let keywords: Vec<_> = metadata.keywords.iter().filter(|k| !k.is_empty()).collect();
        if !keywords.is_empty() {
            println!(
                "{}: {}",
                "Keywords".bold(),
                keywords
                    .iter()
                    .map(|k| k.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }
    }

    if let Some(error) = record.error() {
        println!();
        println!("{}", "Extraction Error".red().bold());
        println!("{}", "─".repeat(40).dimmed());
        if let Some(code) = &error.code {
            println!("{}: {}", "Code".bold(), code);
        }
        println!("{}: {}", "Message".bold(), error.message);
        return Ok(());
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let words: usize = record
        .pages()
        .iter()
        .map(|p| p.text.split_whitespace().count())
        .sum();
    let chars: usize = record.pages().iter().map(|p| p.text.chars().count()).sum();
    let blank = record.pages().iter().filter(|p| p.is_blank()).count();

    println!("{}: {}", "Words".bold(), words);
    println!("{}: {}", "Characters".bold(), chars);
    println!("{}: {}", "Blank pages".bold(), blank);

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pdfnode".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF to content graph records");
    println!();
    println!("License: MIT");
}
