use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

use ctxbundle::context::{format_bundle_as_json, format_bundle_as_text};
use ctxbundle::diagnostics::TracingSink;
use ctxbundle::errors::BundleError;
use ctxbundle::extraction::{analyze_file, export_pieces, parse_file};
use ctxbundle::graph::{DependencyCollector, VisitedSet};
use ctxbundle::resolution::resolve_import;
use ctxbundle::types::{ContextBundle, OutputFormat};
use ctxbundle::workspace::Workspace;

/// Export-slice context bundles for TypeScript and JavaScript files.
#[derive(Parser)]
#[command(
    name = "ctxbundle",
    version,
    about = "Export-slice context bundles for TypeScript and JavaScript files"
)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration
    Init {
        /// Project path (default: current directory)
        path: Option<String>,
    },
    /// Resolve an import specifier as seen from a file
    Resolve {
        /// File containing the import
        from: String,
        /// Raw specifier, e.g. ./utils
        specifier: String,
    },
    /// Show the import/export surface of a file
    Analyze {
        /// File to analyze
        file: String,
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
    /// Print the exported declarations of a file
    Slice {
        /// File to slice
        file: String,
    },
    /// List local dependencies of a file
    Deps {
        /// Starting file
        file: String,
        /// Maximum import hops
        #[arg(short, long, default_value = "1")]
        depth: usize,
    },
    /// Build a context bundle
    Bundle {
        /// Main file (omit with --changed)
        file: Option<String>,
        /// Bundle every changed source file in the repository
        #[arg(short, long)]
        changed: bool,
        /// Project path
        #[arg(short, long)]
        path: Option<String>,
        /// Output format (text or json)
        #[arg(short, long)]
        format: Option<String>,
    },
    /// List changed source files
    Changed {
        /// Project path
        #[arg(short, long)]
        path: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Sends logs to stderr; `RUST_LOG` overrides the level.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> ctxbundle::errors::Result<()> {
    match cli.command {
        Commands::Init { path } => {
            let project_path = resolve_path(path);
            Workspace::init(&project_path)?;
            println!("Initialized ctxbundle at {}", project_path.display());
        }
        Commands::Resolve { from, specifier } => match resolve_import(Path::new(&from), &specifier)
        {
            Some(resolved) => println!("{}", resolved.display()),
            None => println!("unresolved"),
        },
        Commands::Analyze { file, json } => {
            let parsed = parse_file(Path::new(&file))?;
            let analysis = analyze_file(&parsed);
            if json {
                println!("{}", serde_json::to_string_pretty(&analysis)?);
            } else {
                println!("Imports:");
                for import in &analysis.imports {
                    println!("  {}", import);
                }
                println!("Exports:");
                for export in &analysis.exports {
                    println!("  {}", export);
                }
                println!("Resolved:");
                for resolved in &analysis.resolved_imports {
                    println!("  {}", resolved.display());
                }
            }
        }
        Commands::Slice { file } => {
            let parsed = parse_file(Path::new(&file))?;
            for piece in export_pieces(&parsed) {
                println!("// {} (line {})", piece.kind.as_str(), piece.line);
                println!("{}\n", piece.text);
            }
        }
        Commands::Deps { file, depth } => {
            let mut visited = VisitedSet::new();
            let deps =
                DependencyCollector::new(&TracingSink)?.collect(Path::new(&file), depth, &mut visited)?;
            if deps.is_empty() {
                println!("No local dependencies found for '{}'", file);
            }
            for dep in &deps {
                println!("{}", dep.display());
            }
        }
        Commands::Bundle {
            file,
            changed,
            path,
            format,
        } => {
            let workspace = Workspace::open(&resolve_path(path))?;
            let format = match format.as_deref() {
                Some(name) => OutputFormat::from_name(name).ok_or_else(|| BundleError::Config {
                    message: format!("unknown output format '{}'", name),
                })?,
                None => workspace.config().format,
            };

            if changed {
                let results = workspace.bundle_changes(&TracingSink)?;
                if results.is_empty() {
                    println!("No changed files detected.");
                }
                for result in results {
                    match result.bundle {
                        Ok(bundle) => print_bundle(&bundle, format),
                        Err(e) => eprintln!("Skipping {}: {}", result.file.display(), e),
                    }
                }
            } else {
                let file = file.ok_or_else(|| BundleError::Config {
                    message: "a file argument or --changed is required".to_string(),
                })?;
                let bundle = workspace.bundle(Path::new(&file), &TracingSink)?;
                print_bundle(&bundle, format);
            }
        }
        Commands::Changed { path } => {
            let workspace = Workspace::open(&resolve_path(path))?;
            let files = workspace.changed_sources()?;
            if files.is_empty() {
                println!("No changed files detected.");
            }
            for file in &files {
                println!("{}", file.display());
            }
        }
    }
    Ok(())
}

fn print_bundle(bundle: &ContextBundle, format: OutputFormat) {
    match format {
        OutputFormat::Text => print!("{}", format_bundle_as_text(bundle)),
        OutputFormat::Json => println!("{}", format_bundle_as_json(bundle)),
    }
}

/// Resolves an optional path argument, defaulting to the current directory.
fn resolve_path(path: Option<String>) -> PathBuf {
    match path {
        Some(p) => PathBuf::from(p),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}
