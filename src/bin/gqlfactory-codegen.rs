//! generate apollo client wrappers from graphql documents
//!
//! this binary reads graphql documents and an optional json configuration,
//! checks the output path, and writes one typescript file with:
//! - a `gql` document constant per operation and local fragment
//! - a typed wrapper per query
//! - a factory grouping the wrappers under `query` and `mutate`
//!
//! command help reference (kept in sync with `gqlfactory-codegen --help`):
#[doc = concat!("```text\n", include_str!("gqlfactory-codegen-help.txt"), "\n```")]
pub const CLI_HELP: &str = include_str!("gqlfactory-codegen-help.txt");

use gqlfactory::{generate, parse_document, validate_output, PluginConfig, QueryDocument};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, PartialEq)]
struct Args {
    documents: Vec<PathBuf>,
    out: PathBuf,
    config_path: Option<PathBuf>,
    disable_checks: bool,
}

#[derive(Debug, PartialEq)]
enum ParseArgsError {
    Help,
    Message(String),
}

fn main() {
    init_tracing();

    let args = match parse_args(std::env::args().collect()) {
        Ok(args) => args,
        Err(ParseArgsError::Help) => {
            print!("{CLI_HELP}");
            return;
        }
        Err(ParseArgsError::Message(err)) => {
            eprintln!("{err}\n\n{CLI_HELP}");
            std::process::exit(1);
        }
    };

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("failed to load config: {err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = validate_output(&args.out, &config) {
        eprintln!("{err}");
        std::process::exit(1);
    }

    let documents = match load_documents(&args) {
        Ok(documents) => documents,
        Err(err) => {
            eprintln!("failed to load documents: {err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = write_output(&args, &documents, &config) {
        eprintln!("codegen failed: {err}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn parse_args(args: Vec<String>) -> Result<Args, ParseArgsError> {
    let mut documents = Vec::new();
    let mut out = None;
    let mut config_path = None;
    let mut disable_checks = false;

    let mut iter = args.into_iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--documents" => match iter.next() {
                Some(path) => documents.push(PathBuf::from(path)),
                None => {
                    return Err(ParseArgsError::Message(
                        "--documents needs a file".to_string(),
                    ))
                }
            },
            "--out" => out = iter.next().map(PathBuf::from),
            "--config" => config_path = iter.next().map(PathBuf::from),
            "--disable-checks" => disable_checks = true,
            "--help" | "-h" => return Err(ParseArgsError::Help),
            _ => return Err(ParseArgsError::Message(format!("unknown argument: {arg}"))),
        }
    }

    let out = out.ok_or_else(|| ParseArgsError::Message("--out is required".to_string()))?;

    if documents.is_empty() {
        return Err(ParseArgsError::Message(
            "at least one --documents is required".to_string(),
        ));
    }

    Ok(Args {
        documents,
        out,
        config_path,
        disable_checks,
    })
}

fn load_config(args: &Args) -> gqlfactory::Result<PluginConfig> {
    let config = match &args.config_path {
        Some(path) => PluginConfig::from_json(&fs::read_to_string(path)?)?,
        None => PluginConfig::new(),
    };
    Ok(if args.disable_checks {
        config.with_disable_checks(true)
    } else {
        config
    })
}

fn load_documents(args: &Args) -> Result<Vec<QueryDocument>, String> {
    args.documents
        .iter()
        .map(|path| {
            let source = fs::read_to_string(path)
                .map_err(|err| format!("failed to read {}: {err}", path.display()))?;
            parse_document(&source).map_err(|err| format!("{}: {err}", path.display()))
        })
        .collect()
}

fn write_output(
    args: &Args,
    documents: &[QueryDocument],
    config: &PluginConfig,
) -> gqlfactory::Result<()> {
    let output = generate(documents, config)?;
    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(&args.out, output.render())?;
    tracing::info!(out = %args.out.display(), "wrote generated client");
    Ok(())
}
