use clap::{Parser, command};
use serde::Serialize;
use serde_json::{Map, Value};
use shapeprint::{
    Converter, InternalResult, Mapping, TokenRecord, config::ConvertConfig, vocabulary,
};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// `AMOUNT`, `MAPPING`, or one or more source files
    #[arg(required = true, value_name = "MODE-OR-PATH")]
    inputs: Vec<String>,

    /// Path to a JSON conversion config
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Fail instead of retrying a broken file with the lenient parser
    #[arg(long)]
    strict: bool,

    /// Indent the JSON output
    #[arg(long)]
    pretty: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> InternalResult<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

fn load_config(cli: &Cli) -> InternalResult<ConvertConfig> {
    let mut config = match &cli.config {
        Some(path) => ConvertConfig::from_file(path)?,
        None => ConvertConfig::default(),
    };
    if cli.strict {
        config.lenient_fallback = false;
    }
    debug!("config: {:?}", config);
    Ok(config)
}

fn run(cli: &Cli) -> InternalResult<String> {
    match cli.inputs.as_slice() {
        [mode] if mode == "AMOUNT" => return Ok(vocabulary::amount().to_string()),
        [mode] if mode == "MAPPING" => return to_json(&Mapping, cli.pretty),
        _ => {}
    }

    let converter = Converter::new(load_config(cli)?);
    if let [path] = cli.inputs.as_slice() {
        let records = converter.convert_file(path)?.to_records();
        return to_json(&records, cli.pretty);
    }

    let mut outputs = Map::new();
    for path in &cli.inputs {
        let records: Vec<TokenRecord> = converter.convert_file(path)?.to_records();
        outputs.insert(path.clone(), serde_json::to_value(records)?);
    }
    to_json(&Value::Object(outputs), cli.pretty)
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(&cli) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
