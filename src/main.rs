// src/main.rs
mod cli;
mod logging;

use clap::Parser;
use cli::Args;
use football_api::error::AppError;
use football_api::{Client, ClientConfig, MemoryCache, ParamGroup, RequestParams};
use std::sync::Arc;
use tracing::{error, info};

/// Loads the configuration and layers command line flags on top of it.
fn resolve_config(args: &Args) -> Result<ClientConfig, AppError> {
    let mut config = match &args.config {
        Some(path) => ClientConfig::load_with_overrides(path)?,
        None => ClientConfig::load()?,
    };

    if let Some(output_type) = args.output_type {
        config.output_type = output_type;
    }
    if args.generate_hash {
        config.generate_hash = true;
    }
    if let Some(request_ip) = &args.request_ip {
        config.request_ip = Some(request_ip.clone());
    }

    Ok(config)
}

fn build_params(args: &Args) -> Result<RequestParams, AppError> {
    let group = args
        .params
        .iter()
        .map(|pair| ParamGroup::parse_pair(pair))
        .collect::<Result<ParamGroup, AppError>>()?;
    Ok(RequestParams::from(group))
}

fn run(args: &Args, config: ClientConfig) -> Result<(), AppError> {
    let params = build_params(args)?;

    let mut builder = Client::builder(config.clone());
    if config.cache_time > 0 {
        builder = builder.cache(Arc::new(MemoryCache::default()));
    }
    let mut client = builder.build()?;

    let response = client.call(&args.action, &params)?;
    println!("{}", response.to_display_string());
    println!(
        "Remaining API calls: {}",
        client.get_remaining_api_calls()
    );
    Ok(())
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    let config = resolve_config(&args)?;

    let (log_file_path, _guard) = logging::setup_logging(&args, config.log_file_path.as_ref())?;
    info!(
        "{} {} starting, logs at {log_file_path}",
        football_api::NAME,
        football_api::VERSION
    );

    if let Err(e) = run(&args, config) {
        error!("{} failed: {e}", args.action);
        return Err(e);
    }

    Ok(())
}
