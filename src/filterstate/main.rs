use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use filterstate::api::FilterApi;
use filterstate::config::{FilterConfig, CONFIG_FILENAME};
use filterstate::error::{FilterError, Result};
use filterstate::params::RawParams;
use filterstate::state::TableOptions;
use serde_json::{json, Value};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod args;
use args::{Cli, Commands};

const PROJECT_CONFIG_DIR: &str = ".filterstate";

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        let code = if e.is_client_error() { 2 } else { 1 };
        std::process::exit(code);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let api = FilterApi::from_config(&config);

    match cli.command {
        Commands::Merge { params, state } => handle_merge(&api, &params, state.as_deref()),
        Commands::Encode { state } => handle_encode(&api, &state),
        Commands::Apply { params, state } => handle_apply(&api, &params, state.as_deref()),
        Commands::Filters => handle_filters(&api),
    }
}

fn load_config(explicit: Option<&Path>) -> Result<FilterConfig> {
    if let Some(path) = explicit {
        return FilterConfig::load_file(path);
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let project_dir = cwd.join(PROJECT_CONFIG_DIR);
    if project_dir.join(CONFIG_FILENAME).exists() {
        return FilterConfig::load(project_dir);
    }

    match ProjectDirs::from("com", "filterstate", "filterstate") {
        Some(dirs) => FilterConfig::load(dirs.config_dir()),
        None => Ok(FilterConfig::default()),
    }
}

fn read_json(path: &Path) -> Result<Value> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)?
    };
    Ok(serde_json::from_str(&content)?)
}

fn read_state(path: Option<&Path>) -> Result<TableOptions> {
    match path {
        Some(path) => Ok(serde_json::from_value(read_json(path)?)?),
        None => Ok(TableOptions::default()),
    }
}

fn read_params(api: &FilterApi, path: &Path) -> Result<RawParams> {
    RawParams::from_request(read_json(path)?, api.params_key())
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn handle_merge(api: &FilterApi, params: &Path, state: Option<&Path>) -> Result<()> {
    let previous = read_state(state)?;
    let params = read_params(api, params)?;
    let next = api.merge(&previous, &params)?;
    print_json(&serde_json::to_value(&next)?)
}

fn handle_encode(api: &FilterApi, state: &Path) -> Result<()> {
    let options = read_state(Some(state))?;
    let wire = api.encode_state(&options.filters)?;
    print_json(&Value::Object(wire))
}

fn handle_apply(api: &FilterApi, params: &Path, state: Option<&Path>) -> Result<()> {
    let previous = read_state(state)?;
    let params = read_params(api, params)?;
    let applied = api.apply(&previous, &params)?;
    let state = serde_json::to_value(&applied.options)?;
    print_json(&json!({
        "state": state,
        "wire": applied.wire,
    }))
}

fn handle_filters(api: &FilterApi) -> Result<()> {
    if api.registry().is_empty() {
        return Err(FilterError::Config("no filters configured".into()));
    }

    for (key, filter) in api.registry().iter() {
        let target = filter.field().unwrap_or("-");
        let label = filter.label().unwrap_or("");
        println!(
            "{:<16} {:<13} {:<16} {}",
            key.to_string().bold(),
            filter.kind().to_string().cyan(),
            target,
            label.dimmed()
        );
    }
    Ok(())
}
