//! Terminal news reader: browse top headlines by category or search.
mod app;
mod config;
mod effects;
mod input;
mod logging;
mod render;

use anyhow::Context;
use newsdesk_logging::news_info;

use crate::config::AppConfig;

fn main() -> anyhow::Result<()> {
    let (config, source) = AppConfig::load().context("loading configuration")?;
    logging::initialize(config.log_destination, config.log_level()?, &config.log_file);
    match &source {
        Some(path) => news_info!("Loaded configuration from {:?}", path),
        None => news_info!("No configuration file; using defaults"),
    }

    let api_key = config::api_key_from_env()?;
    let dispatcher_config = config.dispatcher_config()?;
    let settings = config.gateway_settings(api_key)?;

    app::run(dispatcher_config, settings, config.tick_interval())
}
