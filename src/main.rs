//! ddldoc — generate NEX protocol documentation from DDL parse trees.
//!
//! Each protocol in a tree becomes one markdown page: a method index, a
//! Request/Response section per method, and a Types appendix for the
//! classes declared alongside it, with struct stubs after every table.
//!
//! - **stdin mode**: `ddldoc < tree.json` prints the pages to stdout
//! - **file mode**: `ddldoc -o docs/protocols trees/*.json`

mod anchor;
mod error;
mod extract;
mod generate;
mod model;
mod render;
mod resolve;
mod tree;

use anyhow::{Context, Result};
use clap::Parser;
use generate::{DirSink, DocumentSink, Generator, StdoutSink};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "ddldoc",
    about = "Generate protocol documentation and struct stubs from DDL parse trees"
)]
struct Cli {
    /// Parse-tree JSON files (glob patterns supported). If omitted, reads from stdin.
    files: Vec<String>,

    /// Output directory. If omitted, documents are printed to stdout.
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Output format: markdown (default), json
    #[arg(short = 'f', long, default_value = "markdown")]
    format: String,

    /// Log extraction details
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let renderer = render::create_renderer(&cli.format)?;
    let mut generator = Generator::new(renderer);
    let mut sink: Box<dyn DocumentSink> = match cli.output {
        Some(ref dir) => Box::new(DirSink::new(dir)),
        None => Box::new(StdoutSink::default()),
    };

    if cli.files.is_empty() {
        let mut input = String::new();
        io::stdin()
            .read_to_string(&mut input)
            .context("failed to read stdin")?;
        return run_tree(&mut generator, sink.as_mut(), &input, "<stdin>");
    }

    for path in expand_globs(&cli.files)? {
        let input = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        run_tree(&mut generator, sink.as_mut(), &input, &path.display().to_string())?;
    }

    Ok(())
}

fn run_tree(
    generator: &mut Generator,
    sink: &mut dyn DocumentSink,
    input: &str,
    source: &str,
) -> Result<()> {
    debug!(source, "decoding parse tree");
    let tree = tree::decode(input).with_context(|| format!("failed to decode {}", source))?;
    generator
        .run(&tree, sink)
        .with_context(|| format!("failed to generate documentation for {}", source))?;
    Ok(())
}

/// Log to stderr so stdout stays clean for documents. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr).with_target(false))
        .init();
}

/// File extensions recognized as parse trees when scanning directories.
const SUPPORTED_EXTENSIONS: &[&str] = &["json"];

/// Expand glob patterns into a list of real file paths.
/// Also handles bare directory paths by scanning for supported file types.
fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        // Directory: non-recursive scan
        if path.is_dir() {
            let entries = fs::read_dir(path)
                .with_context(|| format!("failed to read directory: {}", path.display()))?;
            for entry in entries.flatten() {
                let p = entry.path();
                if p.is_file() && has_supported_extension(&p) {
                    files.push(p);
                }
            }
            continue;
        }
        let matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            warn!("no files matched: {}", pattern);
        }
        files.extend(matches);
    }
    // Sorted so synthetic protocol names are stable between invocations
    files.sort();
    files.dedup();
    Ok(files)
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext))
}
