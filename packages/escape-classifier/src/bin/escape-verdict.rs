//! Escape Verdict CLI
//!
//! # Usage
//!
//! ```bash
//! # Classify a YAML program description
//! cargo run --bin escape-verdict -- classify demos/ptr_iface_multi_impl.yaml
//!
//! # Classify and compare with the description's `expect` map
//! cargo run --bin escape-verdict -- check demos/*.yaml --format markdown
//!
//! # Run the built-in scenarios
//! cargo run --bin escape-verdict -- scenarios
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use escape_classifier::config::{ClassifierConfig, Preset};
use escape_classifier::features::escape_analysis::{EscapeClassificationService, Verdict};
use escape_classifier::features::verdict_report::{JsonRenderer, MarkdownRenderer, TextRenderer};
use escape_classifier::harness::{scenarios, validate, ProgramSpec, ValidationReport};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "escape-verdict")]
#[command(about = "Stack/heap escape classification for program descriptions", long_about = None)]
struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "text", global = true)]
    format: Format,

    /// Classifier configuration (YAML, version 1)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Preset used when no configuration file is given
    #[arg(long, default_value = "balanced", global = true)]
    preset: String,

    /// Log classifier events to stderr (RUST_LOG overrides the level)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a program description
    Classify {
        /// Program description (YAML)
        file: PathBuf,
    },

    /// Classify program descriptions and validate their expectations
    Check {
        /// Program descriptions (YAML)
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Run the built-in scenarios against their expectations
    Scenarios {
        /// Only run the named scenario
        #[arg(short, long)]
        name: Option<String>,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
    Markdown,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    let config = load_config(&cli)?;
    let service = EscapeClassificationService::new(config)?;

    let all_passed = match &cli.command {
        Commands::Classify { file } => {
            let spec = ProgramSpec::from_yaml(file)?;
            let built = spec.build()?;
            let verdict = service.classify(&built.catalog, &built.program)?;
            print_verdict(cli.format, spec.display_name(), &verdict)?;
            true
        }
        Commands::Check { files } => {
            let mut all_passed = true;
            for file in files {
                let spec = ProgramSpec::from_yaml(file)?;
                all_passed &= check(&service, cli.format, &spec)?;
            }
            all_passed
        }
        Commands::Scenarios { name } => {
            let selected: Vec<_> = scenarios::all()
                .into_iter()
                .filter(|s| name.as_deref().map_or(true, |n| n == s.name))
                .collect();
            if selected.is_empty() {
                return Err(format!("no scenario named '{}'", name.as_deref().unwrap_or("")).into());
            }

            let mut all_passed = true;
            for scenario in selected {
                all_passed &= check(&service, cli.format, &scenario.spec()?)?;
            }
            all_passed
        }
    };

    Ok(if all_passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn load_config(cli: &Cli) -> Result<ClassifierConfig, Box<dyn std::error::Error>> {
    match &cli.config {
        Some(path) => Ok(ClassifierConfig::from_yaml(path)?),
        None => {
            let preset = Preset::from_str(&cli.preset)?;
            Ok(ClassifierConfig::from_preset(preset))
        }
    }
}

fn check(
    service: &EscapeClassificationService,
    format: Format,
    spec: &ProgramSpec,
) -> Result<bool, Box<dyn std::error::Error>> {
    let built = spec.build()?;
    let verdict = service.classify(&built.catalog, &built.program)?;
    print_verdict(format, spec.display_name(), &verdict)?;

    let report = validate(&verdict, &spec.expect);
    print_validation(format, &report)?;
    Ok(report.all_passed())
}

fn print_verdict(
    format: Format,
    name: &str,
    verdict: &Verdict,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        Format::Text => {
            println!("== {}", name);
            TextRenderer::print(verdict);
        }
        Format::Json => println!("{}", JsonRenderer::render(verdict)?),
        Format::Markdown => println!("{}", MarkdownRenderer::render(verdict)),
    }
    Ok(())
}

fn print_validation(
    format: Format,
    report: &ValidationReport,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(report)?),
        Format::Markdown => println!("## Ground Truth Validation\n\n{}\n", report.summary()),
        Format::Text => println!("{}\n", report.summary()),
    }
    Ok(())
}
