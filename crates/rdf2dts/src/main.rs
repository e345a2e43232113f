use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use rdf2dts::compile::{CompileOptions, OntologyCompiler};
use rdf2dts::emitter::json::JsonLinesEmitter;
use rdf2dts::emitter::typescript::TypeScriptEmitter;
use rdf2dts::emitter::{emit, DeclarationEmitter};
use rdf2dts::loader::load_file;
use rdf2dts::model::context::NamingContext;

/// Compile an RDF ontology (N-Triples) into type declarations.
#[derive(Parser)]
#[command(name = "rdf2dts", version, about)]
struct Cli {
    /// Path to an N-Triples ontology file.
    input: PathBuf,

    /// Output file path [default: stdout].
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format: typescript, json.
    #[arg(short, long, value_name = "FORMAT", default_value = "typescript")]
    format: String,

    /// Naming context: a base URL, or comma-separated `prefix:url` entries.
    #[arg(short, long, value_name = "CONTEXT", default_value = "https://schema.org")]
    context: String,

    /// Include superseded classes and properties.
    #[arg(long)]
    deprecated: bool,

    /// Verbose output.
    #[arg(short, long)]
    verbose: bool,

    /// Quiet output.
    #[arg(short, long)]
    quiet: bool,
}

fn init_logging(cli: &Cli) {
    let default = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(input = %cli.input.display(), "loading ontology");
    let statements = load_file(&cli.input)?;

    let options = CompileOptions {
        include_deprecated: cli.deprecated,
        context: NamingContext::parse(&cli.context)?,
    };
    let compiled = OntologyCompiler::new(options).compile(statements)?;

    let output_writer: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let format = cli.format.to_lowercase();
    let mut emitter: Box<dyn DeclarationEmitter> = match format.as_str() {
        "typescript" | "ts" => Box::new(TypeScriptEmitter::new(output_writer)),
        "json" => Box::new(JsonLinesEmitter::new(output_writer)),
        _ => {
            return Err(format!("Unknown format: {format}. Use 'typescript' or 'json'.").into());
        }
    };
    emit(&compiled, emitter.as_mut())?;

    if !cli.quiet {
        eprintln!(
            "Emitted {} declarations ({} diagnostics)",
            emitter.declaration_count(),
            compiled.diagnostics.len()
        );
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);
    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
