//! # sarabun-cli: Command-Line Front End
//!
//! Thin wrapper over the `sarabun` core for desk use: list the document
//! kinds and their templates, classify a request with the bundled rule-based
//! extractor, or validate a record file before hand-off to a renderer.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use sarabun::providers::extractor::{FieldExtractor, RegexFieldExtractor};
use sarabun::{
    classify, completeness_check, is_valid, section_spec, taxonomy, validate, ClassifierConfig,
    DocumentKind, DocumentRecord, ValidatorConfig,
};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

// --- CLI Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about = "Thai official document classification and validation")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the six document kinds and their section templates
    Kinds,
    /// Classify a free-form request with the rule-based extractor
    Classify(ClassifyArgs),
    /// Validate a DocumentRecord JSON file
    Validate(ValidateArgs),
}

#[derive(Parser, Debug)]
struct ClassifyArgs {
    /// The request text, e.g. "ขออนุมัติเดินทางไปราชการจังหวัดเชียงใหม่"
    request: String,
    /// TOML file overriding the classifier tuning tables
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Path to a DocumentRecord serialized as JSON
    file: PathBuf,
}

// --- Main Application Entry ---

#[tokio::main]
async fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    taxonomy::verify().context("registry self-check failed")?;

    let cli = Cli::parse();
    match cli.command {
        Commands::Kinds => list_kinds(),
        Commands::Classify(args) => classify_request(args).await?,
        Commands::Validate(args) => validate_file(args)?,
    }
    Ok(())
}

fn list_kinds() {
    for kind in DocumentKind::ALL {
        let spec = section_spec(kind);
        println!("{kind} ({})", kind.name_th());
        for def in spec.sections {
            let marker = if def.required { "*" } else { " " };
            println!("  {marker} {} ({})", def.name, def.title_th);
        }
        println!();
    }
}

/// Loads the classifier config override, or the defaults.
fn load_classifier_config(path: Option<&PathBuf>) -> Result<ClassifierConfig> {
    let Some(path) = path else {
        return Ok(ClassifierConfig::default());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config: ClassifierConfig =
        toml::from_str(&raw).context("failed to parse classifier config")?;
    config.verify().context("classifier config rejected")?;
    Ok(config)
}

async fn classify_request(args: ClassifyArgs) -> Result<()> {
    let config = load_classifier_config(args.config.as_ref())?;

    let fields = RegexFieldExtractor::new().extract(&args.request).await?;
    let missing = completeness_check(&fields);
    if !missing.is_empty() {
        println!("missing fields: {}", missing.into_iter().collect::<Vec<_>>().join(", "));
    }

    let result = classify(&args.request, &fields, &config);
    println!(
        "kind: {} ({})  confidence: {:.2}",
        result.kind,
        result.kind.name_th(),
        result.confidence
    );
    if result.confidence < config.ambiguity_threshold {
        println!(
            "ambiguous: runner-up {}, ask the user instead of guessing",
            result.runner_up
        );
    }
    for (kind, score) in &result.scores {
        println!("  {kind:<13} {score:>5.1}");
    }
    Ok(())
}

fn validate_file(args: ValidateArgs) -> Result<()> {
    let raw = fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let record: DocumentRecord =
        serde_json::from_str(&raw).context("file is not a DocumentRecord")?;

    let findings = validate(&record, &ValidatorConfig::default());
    if findings.is_empty() {
        println!("ผ่านการตรวจสอบ: no findings");
        return Ok(());
    }
    for finding in &findings {
        println!("{finding}");
    }
    if !is_valid(&findings) {
        bail!("document has error-severity findings");
    }
    Ok(())
}
