//! docrank CLI - document outline extraction and section ranking tool

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use docrank::embed::{DEFAULT_BASE_URL, DEFAULT_DIMENSION, DEFAULT_MODEL};
use docrank::{
    extract_outline_file_with_options, write_json, AnalyzeOptions, Analyzer, DirectorySource,
    Embedder, HashingEmbedder, JsonFormat, OllamaEmbedder, OutlineOptions, RankOptions,
    RankingResult, Request,
};

#[derive(Parser)]
#[command(name = "docrank")]
#[command(version)]
#[command(
    about = "Extract heading outlines and rank sections for a persona and task",
    long_about = None
)]
struct Cli {
    /// Input directory containing input.json and the documents
    #[arg(value_name = "INPUT_DIR")]
    input: Option<PathBuf>,

    /// Output directory for output.json
    #[arg(value_name = "OUTPUT_DIR")]
    output: Option<PathBuf>,

    #[command(flatten)]
    engine: EngineArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank document sections for the request in a JSON file
    Rank {
        /// Request file ({"persona", "task", "documents"})
        #[arg(value_name = "INPUT_JSON")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Directory document identifiers are resolved against
        /// (defaults to the request file's directory)
        #[arg(long, value_name = "DIR")]
        base_dir: Option<PathBuf>,

        #[command(flatten)]
        engine: EngineArgs,
    },

    /// Print the outline and page text of one document
    Outline {
        /// Input document (.pdf or .json span dump)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Maximum number of headings kept
        #[arg(long, default_value_t = 20)]
        max_headings: usize,
    },

    /// Show version information
    Version,
}

/// Options shared by every command that ranks sections.
#[derive(Args, Clone)]
struct EngineArgs {
    /// Number of ranked sections returned
    #[arg(long, default_value_t = 10)]
    top_k: usize,

    /// Maximum number of headings kept per document
    #[arg(long, default_value_t = 20)]
    max_headings: usize,

    /// Extract documents one at a time
    #[arg(long)]
    sequential: bool,

    /// Embedding backend
    #[arg(long, value_enum, default_value = "hashing", env = "DOCRANK_EMBEDDER")]
    embedder: EmbedderKind,

    /// Ollama endpoint
    #[arg(long, default_value = DEFAULT_BASE_URL, env = "OLLAMA_URL")]
    ollama_url: String,

    /// Ollama embedding model
    #[arg(long, default_value = DEFAULT_MODEL, env = "DOCRANK_MODEL")]
    model: String,

    /// Vector dimension of the hashing embedder
    #[arg(long, default_value_t = DEFAULT_DIMENSION)]
    dimension: usize,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum EmbedderKind {
    /// Local feature hashing (deterministic, no model download)
    Hashing,
    /// Sentence embeddings from an Ollama server
    Ollama,
}

impl EngineArgs {
    fn build_embedder(&self) -> Result<Arc<dyn Embedder>, Box<dyn std::error::Error>> {
        let embedder: Arc<dyn Embedder> = match self.embedder {
            EmbedderKind::Hashing => {
                if self.dimension == 0 {
                    return Err("--dimension must be greater than zero".into());
                }
                Arc::new(HashingEmbedder::new().with_dimension(self.dimension))
            }
            EmbedderKind::Ollama => Arc::new(OllamaEmbedder::new(&self.ollama_url, &self.model)?),
        };
        Ok(embedder)
    }

    fn analyze_options(&self) -> AnalyzeOptions {
        let options = AnalyzeOptions::new()
            .with_outline(OutlineOptions::new().with_max_headings(self.max_headings))
            .with_rank(RankOptions::new().with_top_k(self.top_k));
        if self.sequential {
            options.sequential()
        } else {
            options
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Rank {
            input,
            output,
            base_dir,
            engine,
        }) => cmd_rank(&input, output.as_deref(), base_dir, &engine),
        Some(Commands::Outline {
            input,
            output,
            compact,
            max_headings,
        }) => cmd_outline(&input, output.as_deref(), compact, max_headings),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: INPUT_DIR/input.json -> OUTPUT_DIR/output.json
            if let Some(input) = cli.input {
                cmd_run_dir(&input, cli.output.as_deref(), &cli.engine)
            } else {
                println!("{}", "Usage: docrank <INPUT_DIR> [OUTPUT_DIR]".yellow());
                println!("       docrank --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn read_request(path: &Path) -> Result<Request, Box<dyn std::error::Error>> {
    if !path.is_file() {
        return Err(format!("Missing request file: {}", path.display()).into());
    }
    let json = std::fs::read_to_string(path)?;
    let request = Request::from_json(&json)?;
    request.validate()?;
    Ok(request)
}

fn run_request(
    request: &Request,
    base_dir: &Path,
    engine: &EngineArgs,
) -> Result<RankingResult, Box<dyn std::error::Error>> {
    let pb = ProgressBar::new(request.documents.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb.set_message("Extracting...");

    let progress = pb.clone();
    let analyzer = Analyzer::new(
        Arc::new(DirectorySource::new(base_dir)),
        engine.build_embedder()?,
    )
    .with_options(engine.analyze_options())
    .with_progress(move |id, ok| {
        if !ok {
            progress.println(format!("{} {}", "Skipping".yellow(), id));
        }
        progress.set_message(id.to_string());
        progress.inc(1);
    });

    let result = analyzer.analyze(request);
    pb.finish_and_clear();
    Ok(result?)
}

fn print_summary(result: &RankingResult) {
    if result.is_empty() {
        println!("{}", "No relevant sections found".yellow());
        return;
    }

    println!("\n{}", "Top sections:".green().bold());
    let last = result.len() - 1;
    for (i, section) in result.extracted_sections.iter().enumerate() {
        let branch = if i == last { "└─" } else { "├─" };
        println!(
            "  {} {:>2}. {} {}",
            branch.dimmed(),
            section.importance_rank,
            section.section_title,
            format!("({}, p. {})", section.document, section.page).dimmed()
        );
    }
}

fn cmd_rank(
    input: &Path,
    output: Option<&Path>,
    base_dir: Option<PathBuf>,
    engine: &EngineArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let request = read_request(input)?;
    let base_dir = base_dir.unwrap_or_else(|| {
        input
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    });

    let result = run_request(&request, &base_dir, engine)?;

    if let Some(path) = output {
        write_json(&result, path, JsonFormat::Pretty)?;
        print_summary(&result);
        println!("\n{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", docrank::to_json(&result, JsonFormat::Pretty)?);
    }

    Ok(())
}

fn cmd_run_dir(
    input_dir: &Path,
    output_dir: Option<&Path>,
    engine: &EngineArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let request = read_request(&input_dir.join("input.json"))?;
    let result = run_request(&request, input_dir, engine)?;

    let output_dir = output_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("output"));
    let output_path = output_dir.join("output.json");
    write_json(&result, &output_path, JsonFormat::Pretty)?;

    print_summary(&result);
    println!(
        "\n{} {}",
        "Ranking completed. Results saved to".green(),
        output_path.display()
    );
    Ok(())
}

fn cmd_outline(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    max_headings: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = OutlineOptions::new().with_max_headings(max_headings);
    let bundle = extract_outline_file_with_options(input, &options)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    if let Some(path) = output {
        write_json(&bundle, path, format)?;
        println!(
            "{} {} headings to {}",
            "Saved".green(),
            bundle.heading_count(),
            path.display()
        );
    } else {
        println!("{}", docrank::to_json(&bundle, format)?);
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "docrank".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Document outline extraction and section ranking tool");
    println!();
    println!("License: MIT");
}
